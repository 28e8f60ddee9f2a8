use crate::foundation::error::{ReelError, ReelResult};
use crate::text::split;

/// Split `total_secs` across the words of `sentence` proportionally to their character length.
///
/// One duration per whitespace-delimited word, in order. A sentence without words (or without
/// characters) yields an empty vector. The last word absorbs floating-point residue, so the
/// durations always sum to `total_secs`.
pub fn allocate_word_durations(sentence: &str, total_secs: f64) -> ReelResult<Vec<f64>> {
    let lens: Vec<usize> = split::words(sentence)
        .into_iter()
        .map(split::char_len)
        .collect();
    allocate_by_lengths(&lens, total_secs)
}

/// Length-weighted allocation over precomputed character counts.
pub fn allocate_by_lengths(char_lens: &[usize], total_secs: f64) -> ReelResult<Vec<f64>> {
    if !total_secs.is_finite() || total_secs <= 0.0 {
        return Err(ReelError::validation(
            "spoken duration must be finite and > 0",
        ));
    }

    let total_chars: usize = char_lens.iter().sum();
    if total_chars == 0 {
        return Ok(Vec::new());
    }

    let total_chars = total_chars as f64;
    let mut out: Vec<f64> = char_lens
        .iter()
        .map(|&n| (n as f64 / total_chars) * total_secs)
        .collect();

    if let Some((last, head)) = out.split_last_mut() {
        let head_sum: f64 = head.iter().sum();
        let residue = total_secs - head_sum;
        if residue > 0.0 {
            *last = residue;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/words.rs"]
mod tests;
