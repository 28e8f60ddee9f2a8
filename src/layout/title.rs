use serde::{Deserialize, Serialize};

use crate::config::TitleStyle;
use crate::foundation::error::ReelResult;
use crate::layout::frames::{FrameGeometry, PositionedWord, place_page};
use crate::layout::lines::{Page, wrap_lines};
use crate::text::measure::{TextMeasurer, measure_words};

/// Title text laid out at the largest font size that fits the title box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TitleCard {
    /// Chosen font size.
    pub font_size: f32,
    /// Words placed on the canvas, all inactive and carrying the title paint.
    pub words: Vec<PositionedWord>,
    /// `false` when even `min_font_size` overflows the box.
    pub fits: bool,
}

/// Shrink the title font until the wrapped title fits `style`'s box.
///
/// Every attempt re-measures and re-wraps from scratch at the candidate size. The last attempt is
/// always `min_font_size`, even when the steps do not land on it. Words are painted with
/// `style.paint`. Returns `None` for a title without words.
pub fn fit_title<M: TextMeasurer + ?Sized>(
    measurer: &mut M,
    title: &str,
    style: &TitleStyle,
    geom: &FrameGeometry,
) -> ReelResult<Option<TitleCard>> {
    let geom = &FrameGeometry {
        inactive: style.paint,
        ..*geom
    };
    let mut size = style.max_font_size;
    loop {
        let words = measure_words(measurer, title, size)?;
        if words.is_empty() {
            return Ok(None);
        }
        let page = Page {
            lines: wrap_lines(&words, style.box_width, geom.word_spacing),
        };
        let fits = block_fits(&page, style, geom);
        if fits || size <= style.min_font_size {
            tracing::debug!(font_size = size, fits, "title fitted");
            return Ok(Some(TitleCard {
                font_size: size,
                words: place_page(&page, geom),
                fits,
            }));
        }
        size = (size - style.step).max(style.min_font_size);
    }
}

fn block_fits(page: &Page, style: &TitleStyle, geom: &FrameGeometry) -> bool {
    // a lone word wider than the box cannot be wrapped any further
    let widest = page
        .lines
        .iter()
        .filter(|l| l.len() > 1)
        .map(|l| l.pixel_width(geom.word_spacing))
        .fold(0.0, f64::max);
    let tallest = page
        .lines
        .iter()
        .map(|l| l.max_height())
        .fold(0.0, f64::max);
    let block_h = page.lines.len() as f64 * (tallest + geom.line_padding);
    widest <= style.box_width && block_h <= style.box_height
}

#[cfg(test)]
#[path = "../../tests/unit/layout/title.rs"]
mod tests;
