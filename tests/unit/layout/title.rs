use super::*;
use crate::config::CaptionStyle;
use crate::foundation::core::{Canvas, Rgba8};
use crate::text::measure::ApproxMeasurer;

fn geom() -> FrameGeometry {
    FrameGeometry::from_style(Canvas::VERTICAL_HD, &CaptionStyle::default())
}

fn style(box_width: f64, box_height: f64) -> TitleStyle {
    TitleStyle {
        max_font_size: 90.0,
        min_font_size: 30.0,
        step: 10.0,
        box_width,
        box_height,
        ..TitleStyle::default()
    }
}

#[test]
fn short_title_keeps_max_size() {
    let mut m = ApproxMeasurer::default();
    let card = fit_title(&mut m, "Hi", &style(900.0, 600.0), &geom())
        .unwrap()
        .unwrap();
    assert_eq!(card.font_size, 90.0);
    assert!(card.fits);
    assert_eq!(card.words.len(), 1);
    assert!(card.words.iter().all(|w| !w.is_active));
}

#[test]
fn long_title_shrinks_until_it_fits() {
    let mut m = ApproxMeasurer::default();
    // Line height at size s is 1.2s + 10, which fits a 90px box once s <= 66.
    let card = fit_title(&mut m, "Tiny", &style(900.0, 90.0), &geom())
        .unwrap()
        .unwrap();
    assert_eq!(card.font_size, 60.0);
    assert!(card.fits);
}

#[test]
fn floors_at_min_size_when_nothing_fits() {
    let mut m = ApproxMeasurer::default();
    let card = fit_title(&mut m, "Supercalifragilistic", &style(100.0, 20.0), &geom())
        .unwrap()
        .unwrap();
    assert_eq!(card.font_size, 30.0);
    assert!(!card.fits);
    assert_eq!(card.words.len(), 1);
}

#[test]
fn empty_title_has_no_card() {
    let mut m = ApproxMeasurer::default();
    assert!(
        fit_title(&mut m, "   ", &style(900.0, 600.0), &geom())
            .unwrap()
            .is_none()
    );
}

#[test]
fn lone_overwide_word_only_has_to_fit_vertically() {
    let mut m = ApproxMeasurer::default();
    // 20 chars at 90px is 1080px wide, but a single word is never held against the box width.
    let card = fit_title(&mut m, "Supercalifragilistic", &style(900.0, 600.0), &geom())
        .unwrap()
        .unwrap();
    assert_eq!(card.font_size, 90.0);
    assert!(card.fits);
}

#[test]
fn floor_is_tried_when_steps_skip_it() {
    let mut m = ApproxMeasurer::default();
    // 90, 86, ..., 38 never lands on 36.
    let style = TitleStyle {
        box_width: 100.0,
        box_height: 20.0,
        ..TitleStyle::default()
    };
    let card = fit_title(&mut m, "Supercalifragilistic", &style, &geom())
        .unwrap()
        .unwrap();
    assert_eq!(card.font_size, 36.0);
    assert!(!card.fits);
}

#[test]
fn title_words_use_title_paint() {
    let mut m = ApproxMeasurer::default();
    let mut ts = style(900.0, 600.0);
    ts.paint.fill = Rgba8::opaque(1, 2, 3);
    let card = fit_title(&mut m, "Two words", &ts, &geom()).unwrap().unwrap();
    assert_eq!(card.words.len(), 2);
    assert!(card.words.iter().all(|w| w.paint == ts.paint));
}
