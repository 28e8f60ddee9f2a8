use super::*;
use crate::layout::lines::Line;

fn word(text: &str, width: f64, height: f64) -> MeasuredWord {
    MeasuredWord {
        text: text.to_string(),
        width,
        height,
    }
}

fn geom() -> FrameGeometry {
    FrameGeometry::from_style(Canvas::VERTICAL_HD, &CaptionStyle::default())
}

#[test]
fn single_line_is_centered_on_canvas() {
    let words: Vec<_> = ["This", "is", "a", "test"]
        .iter()
        .map(|t| word(t, 100.0, 80.0))
        .collect();
    let durations = [1.0, 0.5, 0.25, 1.0];
    let frames =
        layout_sentence(&words, &durations, Canvas::VERTICAL_HD, &CaptionStyle::default())
            .unwrap();

    assert_eq!(frames.len(), 4);
    // line width 460 -> start_x (1080 - 460) / 2 = 310; line height 90 -> start_y (1920 - 90) / 2.
    let first = &frames[0].positioned_words;
    assert_eq!(first[0].origin, Point::new(310.0, 915.0));
    assert_eq!(first[1].origin, Point::new(430.0, 915.0));
    assert_eq!(first[3].origin, Point::new(670.0, 915.0));
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.page_index, 0);
        assert_eq!(f.active_word_index, i);
        assert_eq!(f.duration, durations[i]);
        assert_eq!(f.active_word().unwrap().text, words[i].text);
    }
}

#[test]
fn positions_are_stable_across_frames_of_a_page() {
    let words: Vec<_> = (0..7)
        .map(|i| word(&format!("w{i}"), 150.0 + 40.0 * i as f64, 60.0 + i as f64))
        .collect();
    let durations = vec![0.3; words.len()];
    let frames =
        layout_sentence(&words, &durations, Canvas::VERTICAL_HD, &CaptionStyle::default())
            .unwrap();

    for pair in frames.windows(2) {
        if pair[0].page_index != pair[1].page_index {
            continue;
        }
        let a = &pair[0].positioned_words;
        let b = &pair[1].positioned_words;
        assert_eq!(a.len(), b.len());
        for (wa, wb) in a.iter().zip(b) {
            assert_eq!(wa.text, wb.text);
            assert_eq!(wa.origin, wb.origin);
        }
    }
}

#[test]
fn one_active_word_advancing_globally() {
    let words: Vec<_> = (0..9).map(|i| word(&format!("w{i}"), 400.0, 70.0)).collect();
    let durations: Vec<f64> = (0..9).map(|i| 0.1 * (i + 1) as f64).collect();
    let frames =
        layout_sentence(&words, &durations, Canvas::VERTICAL_HD, &CaptionStyle::default())
            .unwrap();

    assert_eq!(frames.len(), words.len());
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.active_word_index, i);
        assert_eq!(f.positioned_words.iter().filter(|w| w.is_active).count(), 1);
        assert_eq!(f.active_word().unwrap().text, format!("w{i}"));
        assert_eq!(f.duration, durations[i]);
    }
    let total: f64 = frames.iter().map(|f| f.duration).sum();
    let expected: f64 = durations.iter().sum();
    assert!((total - expected).abs() < 1e-12);
}

#[test]
fn frames_only_reference_their_page() {
    // Two words per line, two lines per page: 9 words -> pages of 4, 4, 1.
    let words: Vec<_> = (0..9).map(|i| word(&format!("w{i}"), 400.0, 70.0)).collect();
    let durations = vec![0.2; 9];
    let frames =
        layout_sentence(&words, &durations, Canvas::VERTICAL_HD, &CaptionStyle::default())
            .unwrap();

    let pages: Vec<usize> = frames.iter().map(|f| f.page_index).collect();
    assert_eq!(pages, vec![0, 0, 0, 0, 1, 1, 1, 1, 2]);
    assert_eq!(frames[4].positioned_words.len(), 4);
    assert_eq!(frames[4].positioned_words[0].text, "w4");
    assert_eq!(frames[8].positioned_words.len(), 1);
    assert_eq!(frames[8].positioned_words[0].text, "w8");
}

#[test]
fn page_block_is_vertically_centered_with_page_line_height() {
    let page = Page {
        lines: vec![
            Line {
                words: vec![word("tall", 100.0, 100.0)],
            },
            Line {
                words: vec![word("short", 100.0, 50.0)],
            },
        ],
    };
    let placed = place_page(&page, &geom());
    // line height 110, block 220 -> start_y 850.
    assert_eq!(placed[0].origin.y, 850.0);
    assert_eq!(placed[1].origin.y, 960.0);
    assert_eq!(placed[0].origin.x, 490.0);
}

#[test]
fn empty_pages_produce_no_frames() {
    let frames = build_frames(&[], &[], &geom()).unwrap();
    assert!(frames.is_empty());
    let frames =
        layout_sentence(&[], &[], Canvas::VERTICAL_HD, &CaptionStyle::default()).unwrap();
    assert!(frames.is_empty());
}

#[test]
fn mismatched_durations_are_rejected() {
    let words = vec![word("a", 10.0, 10.0), word("b", 10.0, 10.0)];
    let err = layout_sentence(&words, &[1.0], Canvas::VERTICAL_HD, &CaptionStyle::default())
        .unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn words_carry_the_paint_of_their_state() {
    let mut style = CaptionStyle::default();
    style.active.stroke_width = 9.0;
    style.inactive.fill = crate::foundation::core::Rgba8::opaque(10, 20, 30);
    let words: Vec<_> = ["one", "two", "three"]
        .iter()
        .map(|t| word(t, 100.0, 60.0))
        .collect();
    let frames = layout_sentence(&words, &[1.0, 1.0, 1.0], Canvas::VERTICAL_HD, &style).unwrap();

    for f in &frames {
        for w in &f.positioned_words {
            let want = if w.is_active { style.active } else { style.inactive };
            assert_eq!(w.paint, want);
        }
    }
    assert_eq!(frames[1].active_word().unwrap().paint.stroke_width, 9.0);
}
