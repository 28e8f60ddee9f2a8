//! Pipeline configuration.
//!
//! Every field has a default so partial JSON files are accepted; [`PipelineConfig::validate`]
//! checks cross-field constraints before a pipeline is built.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};

/// Fill and stroke treatment for one caption word state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordPaint {
    /// Glyph fill color.
    pub fill: Rgba8,
    /// Outline color.
    pub stroke: Rgba8,
    /// Outline width in pixels.
    pub stroke_width: f32,
}

/// Layout and paint settings for the karaoke caption track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Body font size in pixels.
    pub font_size: f32,
    /// Maximum pixel width of one caption line.
    pub max_line_width: f64,
    /// Horizontal gap between words in pixels.
    pub word_spacing: f64,
    /// Extra vertical space added to the tallest word to get the line height.
    pub line_padding: f64,
    /// Maximum number of lines shown at once.
    pub max_lines_per_page: usize,
    /// Paint for the word currently being spoken.
    pub active: WordPaint,
    /// Paint for every other word on the page.
    pub inactive: WordPaint,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 70.0,
            max_line_width: 900.0,
            word_spacing: 20.0,
            line_padding: 10.0,
            max_lines_per_page: 2,
            active: WordPaint {
                fill: Rgba8::YELLOW,
                stroke: Rgba8::BLACK,
                stroke_width: 4.0,
            },
            inactive: WordPaint {
                fill: Rgba8::WHITE,
                stroke: Rgba8::BLACK,
                stroke_width: 2.0,
            },
        }
    }
}

impl CaptionStyle {
    /// Paint for a word given its highlight state.
    pub fn paint_for(&self, is_active: bool) -> &WordPaint {
        if is_active {
            &self.active
        } else {
            &self.inactive
        }
    }

    fn validate(&self) -> ReelResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ReelError::validation(
                "caption font_size must be finite and > 0",
            ));
        }
        if !self.max_line_width.is_finite() || self.max_line_width <= 0.0 {
            return Err(ReelError::validation(
                "caption max_line_width must be finite and > 0",
            ));
        }
        if !self.word_spacing.is_finite() || self.word_spacing < 0.0 {
            return Err(ReelError::validation(
                "caption word_spacing must be finite and >= 0",
            ));
        }
        if !self.line_padding.is_finite() || self.line_padding < 0.0 {
            return Err(ReelError::validation(
                "caption line_padding must be finite and >= 0",
            ));
        }
        if self.max_lines_per_page == 0 {
            return Err(ReelError::validation(
                "caption max_lines_per_page must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Bounding box and font range used to auto-fit the title card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    /// First font size tried.
    pub max_font_size: f32,
    /// Smallest font size accepted, used even if the title still overflows.
    pub min_font_size: f32,
    /// Amount subtracted per fitting attempt.
    pub step: f32,
    /// Width of the title box in pixels.
    pub box_width: f64,
    /// Height of the title box in pixels.
    pub box_height: f64,
    /// Paint for title text.
    pub paint: WordPaint,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            max_font_size: 90.0,
            min_font_size: 36.0,
            step: 4.0,
            box_width: 900.0,
            box_height: 600.0,
            paint: WordPaint {
                fill: Rgba8::WHITE,
                stroke: Rgba8::BLACK,
                stroke_width: 4.0,
            },
        }
    }
}

impl TitleStyle {
    fn validate(&self) -> ReelResult<()> {
        if !self.min_font_size.is_finite() || self.min_font_size <= 0.0 {
            return Err(ReelError::validation(
                "title min_font_size must be finite and > 0",
            ));
        }
        if !self.max_font_size.is_finite() || self.max_font_size < self.min_font_size {
            return Err(ReelError::validation(
                "title max_font_size must be finite and >= min_font_size",
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ReelError::validation("title step must be finite and > 0"));
        }
        if !(self.box_width > 0.0 && self.box_height > 0.0) {
            return Err(ReelError::validation(
                "title box_width/box_height must be > 0",
            ));
        }
        Ok(())
    }
}

/// Fallback speech settings used when the synthesizer is unavailable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Assumed speaking rate for duration estimates.
    pub words_per_minute: f64,
    /// Sample rate of generated silence.
    pub sample_rate: u32,
    /// Channel count of generated silence.
    pub channels: u16,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 160.0,
            sample_rate: 24_000,
            channels: 1,
        }
    }
}

impl SpeechConfig {
    fn validate(&self) -> ReelResult<()> {
        if !self.words_per_minute.is_finite() || self.words_per_minute <= 0.0 {
            return Err(ReelError::validation(
                "speech words_per_minute must be finite and > 0",
            ));
        }
        if self.sample_rate == 0 || self.channels == 0 {
            return Err(ReelError::validation(
                "speech sample_rate/channels must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Background clip selection thresholds, in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// A background must exceed the narration by this much to be cut instead of looped.
    pub min_surplus_secs: f64,
    /// Headroom kept after the random start so the cut never runs off the source.
    pub tail_guard_secs: f64,
    /// Extra background played past the narration.
    pub overrun_secs: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            min_surplus_secs: 5.0,
            tail_guard_secs: 2.0,
            overrun_secs: 1.0,
        }
    }
}

/// Threading controls for frame building.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Build sentence frame sequences in parallel.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

/// Top-level configuration for one pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate handed to the renderer.
    pub fps: u32,
    /// Hard cap on the final video length.
    pub max_duration_secs: f64,
    /// Caption layout and paint.
    pub caption: CaptionStyle,
    /// Title card fitting.
    pub title: TitleStyle,
    /// Speech fallback.
    pub speech: SpeechConfig,
    /// Background clip selection.
    pub background: BackgroundConfig,
    /// Threading.
    pub render: RenderOpts,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::VERTICAL_HD,
            fps: 30,
            max_duration_secs: 59.0,
            caption: CaptionStyle::default(),
            title: TitleStyle::default(),
            speech: SpeechConfig::default(),
            background: BackgroundConfig::default(),
            render: RenderOpts::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration JSON from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Load configuration JSON from any reader.
    pub fn from_reader(r: impl std::io::Read) -> ReelResult<Self> {
        serde_json::from_reader(r).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Check every field constraint.
    pub fn validate(&self) -> ReelResult<()> {
        self.canvas.validate()?;
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be non-zero"));
        }
        if !self.max_duration_secs.is_finite() || self.max_duration_secs <= 0.0 {
            return Err(ReelError::validation(
                "max_duration_secs must be finite and > 0",
            ));
        }
        self.caption.validate()?;
        self.title.validate()?;
        self.speech.validate()?;
        let bg = &self.background;
        if [bg.min_surplus_secs, bg.tail_guard_secs, bg.overrun_secs]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ReelError::validation(
                "background thresholds must be finite and >= 0",
            ));
        }
        if self.render.threads == Some(0) {
            return Err(ReelError::validation("render threads must be >= 1 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
