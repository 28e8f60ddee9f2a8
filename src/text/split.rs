use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?] +").unwrap());

/// Split narration text into sentences.
///
/// Newlines are folded into spaces, then the text is cut after every `.`, `!` or `?` that is
/// followed by at least one space. The terminator stays with its sentence; blank pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let text = text.replace(['\r', '\n'], " ");
    let text = text.trim();

    let mut out = Vec::new();
    let mut start = 0usize;
    for m in SENTENCE_END.find_iter(text) {
        // terminators are single-byte ASCII
        push_non_blank(&mut out, &text[start..m.start() + 1]);
        start = m.end();
    }
    push_non_blank(&mut out, &text[start..]);
    out
}

fn push_non_blank(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// Whitespace-delimited words in reading order.
pub fn words(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

/// Character count used for duration weighting.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

#[cfg(test)]
#[path = "../../tests/unit/text/split.rs"]
mod tests;
