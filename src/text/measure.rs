use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ReelError, ReelResult};
use crate::text::split;

/// Pixel extent of a shaped run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextExtent {
    /// Advance width in pixels.
    pub width: f64,
    /// Line height (ascent + descent + leading) in pixels.
    pub height: f64,
}

/// A word measured at a given font size. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasuredWord {
    /// Word text as spoken and displayed.
    pub text: String,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl MeasuredWord {
    /// Build a measured word from its text and extent.
    pub fn new(text: impl Into<String>, extent: TextExtent) -> Self {
        Self {
            text: text.into(),
            width: extent.width,
            height: extent.height,
        }
    }
}

/// Capability to measure text at a given font size.
///
/// Implementations may keep shaping caches, hence `&mut self`.
pub trait TextMeasurer {
    /// Measure `text` rendered on a single line at `font_size` pixels.
    fn measure(&mut self, text: &str, font_size: f32) -> ReelResult<TextExtent>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &str, font_size: f32) -> ReelResult<TextExtent> {
        (**self).measure(text, font_size)
    }
}

/// Measure every whitespace-delimited word of `sentence`, in order.
///
/// Returns an empty vector for a sentence without words.
pub fn measure_words<M: TextMeasurer + ?Sized>(
    measurer: &mut M,
    sentence: &str,
    font_size: f32,
) -> ReelResult<Vec<MeasuredWord>> {
    split::words(sentence)
        .into_iter()
        .map(|w| Ok(MeasuredWord::new(w, measurer.measure(w, font_size)?)))
        .collect()
}

/// Font-free measurer that assumes a fixed advance per character.
///
/// Useful for dry runs when no font file is available. Widths are `chars * font_size * advance_em`
/// and heights `font_size * line_height_em`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxMeasurer {
    /// Advance per character, in ems.
    pub advance_em: f64,
    /// Line height, in ems.
    pub line_height_em: f64,
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMeasurer for ApproxMeasurer {
    fn measure(&mut self, text: &str, font_size: f32) -> ReelResult<TextExtent> {
        validate_font_size(font_size)?;
        let size = f64::from(font_size);
        Ok(TextExtent {
            width: split::char_len(text) as f64 * size * self.advance_em,
            height: size * self.line_height_em,
        })
    }
}

/// Parley-backed measurer built from raw font bytes.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl std::fmt::Debug for ParleyMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyMeasurer")
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl ParleyMeasurer {
    /// Register `font_bytes` and use its first family for every measurement.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::measurement("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::measurement("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Read a font file and build a measurer from it.
    pub fn from_font_path(path: impl AsRef<std::path::Path>) -> ReelResult<Self> {
        use anyhow::Context as _;

        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        Self::from_font_bytes(bytes)
    }

    /// Family name resolved from the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str, font_size: f32) -> ReelResult<TextExtent> {
        validate_font_size(font_size)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font_size));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(f64::from(m.advance));
            height += f64::from(m.ascent + m.descent + m.leading);
        }
        Ok(TextExtent { width, height })
    }
}

fn validate_font_size(font_size: f32) -> ReelResult<()> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(ReelError::validation(
            "font size must be finite and > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
