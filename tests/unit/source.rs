use super::*;

#[test]
fn full_text_prefixes_title() {
    let p = Post {
        title: "AITA for this".to_string(),
        body: "It happened.".to_string(),
    };
    assert_eq!(p.full_text(), "AITA for this. It happened.");
}

#[test]
fn full_text_handles_missing_parts() {
    let p = Post::from_reader(r#"{"title": "Only title"}"#.as_bytes()).unwrap();
    assert_eq!(p.full_text(), "Only title.");
    let p = Post {
        title: " ".to_string(),
        body: "Body only.".to_string(),
    };
    assert_eq!(p.full_text(), "Body only.");
}

#[test]
fn full_text_keeps_existing_title_punctuation() {
    let p = Post {
        title: "Am I wrong?".to_string(),
        body: "Maybe.".to_string(),
    };
    assert_eq!(p.full_text(), "Am I wrong? Maybe.");
}

#[test]
fn malformed_json_is_serde_error() {
    assert!(Post::from_reader("[]".as_bytes()).is_err());
}
