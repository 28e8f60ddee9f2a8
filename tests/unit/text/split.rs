use super::*;

#[test]
fn splits_after_terminators_followed_by_space() {
    let got = split_sentences("Hello there. How are you? I am fine!  Thanks");
    assert_eq!(
        got,
        vec!["Hello there.", "How are you?", "I am fine!", "Thanks"]
    );
}

#[test]
fn newlines_fold_into_spaces() {
    let got = split_sentences("First line.\nSecond line.\r\n\r\nThird");
    assert_eq!(got, vec!["First line.", "Second line.", "Third"]);
}

#[test]
fn terminators_without_space_do_not_split() {
    let got = split_sentences("Version 2.5 is out. e.g.this stays");
    assert_eq!(got, vec!["Version 2.5 is out.", "e.g.this stays"]);
}

#[test]
fn blank_input_yields_no_sentences() {
    assert!(split_sentences("   \n  ").is_empty());
    assert!(split_sentences("").is_empty());
}

#[test]
fn words_and_char_len_use_unicode_scalars() {
    assert_eq!(words("  This is\ta test "), vec!["This", "is", "a", "test"]);
    assert_eq!(char_len("café"), 4);
}
