use serde::{Deserialize, Serialize};

use crate::text::measure::MeasuredWord;

/// Words that share one caption line, in reading order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Words left to right.
    pub words: Vec<MeasuredWord>,
}

impl Line {
    /// Rendered width: word widths plus `spacing` between neighbours.
    pub fn pixel_width(&self, spacing: f64) -> f64 {
        let words: f64 = self.words.iter().map(|w| w.width).sum();
        words + (self.words.len().saturating_sub(1) as f64) * spacing
    }

    /// Height of the tallest word.
    pub fn max_height(&self) -> f64 {
        self.words.iter().map(|w| w.height).fold(0.0, f64::max)
    }

    /// Number of words on the line.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` when the line holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lines shown on screen together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Lines top to bottom.
    pub lines: Vec<Line>,
}

impl Page {
    /// Total words on the page.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }
}

/// Greedy word wrap.
///
/// A word starts a new line when the running width (which includes the spacing after every
/// placed word) plus its own width exceeds `max_line_width`. A word wider than the maximum still
/// gets a line of its own; it is never split or rejected. No rebalancing is done.
pub fn wrap_lines(words: &[MeasuredWord], max_line_width: f64, spacing: f64) -> Vec<Line> {
    let mut lines = Vec::<Line>::new();
    let mut current = Line::default();
    let mut current_width = 0.0f64;

    for word in words {
        if !current.is_empty() && current_width + word.width > max_line_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.words.push(word.clone());
        current_width += word.width + spacing;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Group consecutive lines into pages of at most `max_lines_per_page` lines.
///
/// `max_lines_per_page` of zero is treated as one.
pub fn paginate(lines: Vec<Line>, max_lines_per_page: usize) -> Vec<Page> {
    let per_page = max_lines_per_page.max(1);
    let mut pages = Vec::<Page>::with_capacity(lines.len().div_ceil(per_page));
    let mut it = lines.into_iter().peekable();
    while it.peek().is_some() {
        pages.push(Page {
            lines: it.by_ref().take(per_page).collect(),
        });
    }
    pages
}

#[cfg(test)]
#[path = "../../tests/unit/layout/lines.rs"]
mod tests;
