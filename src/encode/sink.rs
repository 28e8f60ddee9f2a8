use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::assemble::track::{CaptionTrack, TimedFrame};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::frames::FrameDescriptor;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frames-per-second.
    pub fps: u32,
    /// Track length in seconds.
    pub duration_secs: f64,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
}

/// A caption frame with its placement on the track, as handed to sinks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Sentence the frame belongs to.
    pub sentence_index: usize,
    /// Absolute start time in seconds.
    pub start_secs: f64,
    /// The frame.
    pub frame: FrameDescriptor,
}

impl From<TimedFrame<'_>> for FrameRecord {
    fn from(tf: TimedFrame<'_>) -> Self {
        Self {
            sentence_index: tf.sentence_index,
            start_secs: tf.start_secs,
            frame: tf.frame.clone(),
        }
    }
}

/// Consumer of caption frames in timeline order (a renderer, a file writer, a test buffer).
///
/// Ordering contract: `push_frame` is called with non-decreasing `start_secs`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, frame: TimedFrame<'_>) -> ReelResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> ReelResult<()>;
}

/// Stream every frame of `track` into `sink`.
pub fn stream_track(
    track: &CaptionTrack,
    canvas: Canvas,
    fps: u32,
    sink: &mut dyn FrameSink,
) -> ReelResult<()> {
    sink.begin(SinkConfig {
        canvas,
        fps,
        duration_secs: track.duration(),
        frame_count: track.frame_count(),
    })?;
    for tf in track.timeline() {
        sink.push_frame(tf)?;
    }
    sink.end()
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    records: Vec<FrameRecord>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in push order.
    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.records.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: TimedFrame<'_>) -> ReelResult<()> {
        self.records.push(frame.into());
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes the sink config, then one [`FrameRecord`] per line, as JSON.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> ReelResult<()> {
        serde_json::to_writer(&mut self.out, value).map_err(|e| ReelError::serde(e.to_string()))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| ReelError::Other(anyhow::Error::new(e)))
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.write_line(&cfg)
    }

    fn push_frame(&mut self, frame: TimedFrame<'_>) -> ReelResult<()> {
        self.write_line(&FrameRecord::from(frame))
    }

    fn end(&mut self) -> ReelResult<()> {
        self.out
            .flush()
            .map_err(|e| ReelError::Other(anyhow::Error::new(e)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
