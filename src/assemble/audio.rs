use serde::{Deserialize, Serialize};

use crate::config::SpeechConfig;
use crate::speech::synth::{SpeechAudio, SpeechSegment, SpeechSource, silence_pcm};

/// Placement of one sentence's narration on the output timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioCue {
    /// Sentence the audio speaks.
    pub sentence_index: usize,
    /// Start time in seconds.
    pub start_secs: f64,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Whether real speech or estimated silence backs this cue.
    pub source: SpeechSource,
    /// Size of the encoded speech payload (0 for silence).
    pub byte_len: usize,
}

/// Narration cues in playback order, aligned with the caption track.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioPlan {
    /// Sample rate used for generated silence.
    pub sample_rate: u32,
    /// Channel count used for generated silence.
    pub channels: u16,
    /// Cues back to back from t = 0.
    pub cues: Vec<AudioCue>,
}

impl AudioPlan {
    /// Lay `segments` end to end. Segments must already be in sentence order.
    pub fn from_segments<'a>(
        segments: impl IntoIterator<Item = (usize, &'a SpeechSegment)>,
        cfg: &SpeechConfig,
    ) -> Self {
        let mut t = 0.0f64;
        let cues = segments
            .into_iter()
            .map(|(sentence_index, seg)| {
                let cue = AudioCue {
                    sentence_index,
                    start_secs: t,
                    duration_secs: seg.duration_secs,
                    source: seg.source(),
                    byte_len: match &seg.audio {
                        SpeechAudio::Encoded(b) => b.len(),
                        SpeechAudio::Silence => 0,
                    },
                };
                t += seg.duration_secs;
                cue
            })
            .collect();
        Self {
            sample_rate: cfg.sample_rate,
            channels: cfg.channels,
            cues,
        }
    }

    /// Total narration length in seconds.
    pub fn duration(&self) -> f64 {
        self.cues.iter().map(|c| c.duration_secs).sum()
    }

    /// Silent PCM for a cue backed by an estimate; empty for synthesized cues.
    pub fn silence_for(&self, cue: &AudioCue) -> Vec<f32> {
        match cue.source {
            SpeechSource::Estimated => silence_pcm(cue.duration_secs, self.sample_rate, self.channels),
            SpeechSource::Synthesized => Vec::new(),
        }
    }

    /// Truncate narration to `limit_secs`, shortening the cue that straddles it.
    pub fn capped(mut self, limit_secs: f64) -> Self {
        self.cues.retain(|c| c.start_secs < limit_secs);
        if let Some(last) = self.cues.last_mut() {
            last.duration_secs = last.duration_secs.min(limit_secs - last.start_secs);
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/audio.rs"]
mod tests;
