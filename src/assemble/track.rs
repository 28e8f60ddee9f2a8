use serde::{Deserialize, Serialize};

use crate::layout::frames::FrameDescriptor;

/// Karaoke frames for one sentence, played back to back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentenceClip {
    /// Position of the sentence in the narration.
    pub sentence_index: usize,
    /// Sentence text.
    pub text: String,
    /// Length of the clip in seconds; equals the sentence's spoken duration.
    pub duration: f64,
    /// Frames in word order. Empty for a blank gap.
    pub frames: Vec<FrameDescriptor>,
}

impl SentenceClip {
    /// Clip whose duration is the sum of its frames.
    #[cfg(test)]
    pub(crate) fn from_frames(
        sentence_index: usize,
        text: String,
        frames: Vec<FrameDescriptor>,
    ) -> Self {
        let duration = frames.iter().map(|f| f.duration).sum();
        Self {
            sentence_index,
            text,
            duration,
            frames,
        }
    }

    /// Caption-less clip that keeps narration and captions aligned.
    pub fn gap(sentence_index: usize, text: String, duration: f64) -> Self {
        Self {
            sentence_index,
            text,
            duration,
            frames: Vec::new(),
        }
    }

    /// `true` when the clip shows no captions.
    pub fn is_gap(&self) -> bool {
        self.frames.is_empty()
    }
}

/// A frame with its absolute position on the caption track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedFrame<'a> {
    /// Sentence the frame belongs to.
    pub sentence_index: usize,
    /// Start time in seconds from the beginning of the track.
    pub start_secs: f64,
    /// The frame itself.
    pub frame: &'a FrameDescriptor,
}

impl TimedFrame<'_> {
    /// End time in seconds (exclusive).
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.frame.duration
    }
}

/// Sentence clips concatenated in narration order, without transitions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    clips: Vec<SentenceClip>,
}

impl CaptionTrack {
    /// Order clips by sentence index and concatenate them.
    ///
    /// Clips may arrive in any order (e.g. from parallel workers).
    pub fn assemble(clips: impl IntoIterator<Item = SentenceClip>) -> Self {
        let mut clips: Vec<SentenceClip> = clips.into_iter().collect();
        clips.sort_by_key(|c| c.sentence_index);
        Self { clips }
    }

    /// Clips in playback order.
    pub fn clips(&self) -> &[SentenceClip] {
        &self.clips
    }

    /// Total playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.clips.iter().map(|c| c.duration).sum()
    }

    /// Total number of frames across all clips.
    pub fn frame_count(&self) -> usize {
        self.clips.iter().map(|c| c.frames.len()).sum()
    }

    /// Start time of every clip, in playback order.
    pub fn clip_starts(&self) -> Vec<f64> {
        let mut t = 0.0;
        self.clips
            .iter()
            .map(|c| {
                let start = t;
                t += c.duration;
                start
            })
            .collect()
    }

    /// Every frame with its absolute start time, in playback order.
    pub fn timeline(&self) -> impl Iterator<Item = TimedFrame<'_>> {
        self.clips
            .iter()
            .zip(self.clip_starts())
            .flat_map(|(clip, clip_start)| {
                let mut t = clip_start;
                clip.frames.iter().map(move |frame| {
                    let start_secs = t;
                    t += frame.duration;
                    TimedFrame {
                        sentence_index: clip.sentence_index,
                        start_secs,
                        frame,
                    }
                })
            })
    }

    /// Frame visible at `t` seconds, or `None` during a gap or outside the track.
    pub fn frame_at(&self, t: f64) -> Option<TimedFrame<'_>> {
        if t.is_nan() || t < 0.0 {
            return None;
        }
        self.timeline()
            .take_while(|tf| tf.start_secs <= t)
            .find(|tf| t < tf.end_secs())
    }

    /// Truncate the track to `limit_secs`.
    ///
    /// Clips and frames starting at or after the limit are dropped; the ones straddling it are
    /// shortened.
    pub fn capped(self, limit_secs: f64) -> Self {
        let mut out = Vec::with_capacity(self.clips.len());
        let mut clip_start = 0.0f64;
        for mut clip in self.clips {
            if clip_start >= limit_secs {
                break;
            }
            let clip_end = clip_start + clip.duration;
            if clip_end > limit_secs {
                clip.duration = limit_secs - clip_start;
                let mut t = clip_start;
                clip.frames.retain_mut(|f| {
                    if t >= limit_secs {
                        return false;
                    }
                    f.duration = f.duration.min(limit_secs - t);
                    t += f.duration;
                    true
                });
            }
            clip_start = clip_end;
            out.push(clip);
        }
        Self { clips: out }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/track.rs"]
mod tests;
