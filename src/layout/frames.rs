use serde::{Deserialize, Serialize};

use crate::config::{CaptionStyle, WordPaint};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::lines::{Page, paginate, wrap_lines};
use crate::text::measure::MeasuredWord;

/// A word placed on the canvas for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    /// Word text.
    pub text: String,
    /// Top-left corner in canvas pixels.
    pub origin: Point,
    /// Measured width in pixels.
    pub width: f64,
    /// Measured height in pixels.
    pub height: f64,
    /// Whether this word is the one being spoken.
    pub is_active: bool,
    /// Fill and outline to draw the word with.
    pub paint: WordPaint,
}

/// One still caption image held for the duration of a single spoken word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Page this frame belongs to.
    pub page_index: usize,
    /// Sentence-global index of the highlighted word.
    pub active_word_index: usize,
    /// Hold time in seconds.
    pub duration: f64,
    /// Every word of the page, with exactly one marked active.
    pub positioned_words: Vec<PositionedWord>,
}

impl FrameDescriptor {
    /// The highlighted word.
    pub fn active_word(&self) -> Option<&PositionedWord> {
        self.positioned_words.iter().find(|w| w.is_active)
    }
}

/// Geometry inputs shared by every page of a sentence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Output canvas.
    pub canvas: Canvas,
    /// Horizontal gap between words.
    pub word_spacing: f64,
    /// Added to the tallest word of a page to get its line height.
    pub line_padding: f64,
    /// Paint of the highlighted word.
    pub active: WordPaint,
    /// Paint of every other word.
    pub inactive: WordPaint,
}

impl FrameGeometry {
    /// Geometry for `style` on `canvas`.
    pub fn from_style(canvas: Canvas, style: &CaptionStyle) -> Self {
        Self {
            canvas,
            word_spacing: style.word_spacing,
            line_padding: style.line_padding,
            active: *style.paint_for(true),
            inactive: *style.paint_for(false),
        }
    }
}

/// Place every word of `page`: lines stacked from a vertically centered block, each line
/// centered horizontally.
///
/// Returned in reading order, all inactive and painted with `geom.inactive`. Positions depend only
/// on the page, so every frame built from them is pixel-stable.
pub fn place_page(page: &Page, geom: &FrameGeometry) -> Vec<PositionedWord> {
    let max_h = page
        .lines
        .iter()
        .map(|l| l.max_height())
        .fold(0.0, f64::max);
    let line_height = max_h + geom.line_padding;
    let start_y = (geom.canvas.height_f64() - page.lines.len() as f64 * line_height) / 2.0;

    let mut out = Vec::with_capacity(page.word_count());
    for (row, line) in page.lines.iter().enumerate() {
        let y = start_y + row as f64 * line_height;
        let mut x = (geom.canvas.width_f64() - line.pixel_width(geom.word_spacing)) / 2.0;
        for word in &line.words {
            out.push(PositionedWord {
                text: word.text.clone(),
                origin: Point::new(x, y),
                width: word.width,
                height: word.height,
                is_active: false,
                paint: geom.inactive,
            });
            x += word.width + geom.word_spacing;
        }
    }
    out
}

/// Build one frame per word, page by page.
///
/// `durations` is indexed by sentence-global word order; page-local positions are mapped back to
/// it through a running counter, so pages never look up each other's words.
pub fn build_frames(
    pages: &[Page],
    durations: &[f64],
    geom: &FrameGeometry,
) -> ReelResult<Vec<FrameDescriptor>> {
    let word_count: usize = pages.iter().map(Page::word_count).sum();
    if word_count != durations.len() {
        return Err(ReelError::validation(format!(
            "word durations ({}) do not match laid out words ({word_count})",
            durations.len()
        )));
    }

    let mut frames = Vec::with_capacity(word_count);
    let mut global = 0usize;
    for (page_index, page) in pages.iter().enumerate() {
        let placed = place_page(page, geom);
        for local in 0..placed.len() {
            let mut positioned_words = placed.clone();
            positioned_words[local].is_active = true;
            positioned_words[local].paint = geom.active;
            frames.push(FrameDescriptor {
                page_index,
                active_word_index: global,
                duration: durations[global],
                positioned_words,
            });
            global += 1;
        }
    }
    Ok(frames)
}

/// Wrap, paginate and build frames for one measured sentence.
pub fn layout_sentence(
    words: &[MeasuredWord],
    durations: &[f64],
    canvas: Canvas,
    style: &CaptionStyle,
) -> ReelResult<Vec<FrameDescriptor>> {
    let lines = wrap_lines(words, style.max_line_width, style.word_spacing);
    let pages = paginate(lines, style.max_lines_per_page);
    build_frames(&pages, durations, &FrameGeometry::from_style(canvas, style))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/frames.rs"]
mod tests;
