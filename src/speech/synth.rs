use serde::{Deserialize, Serialize};

use crate::config::SpeechConfig;
use crate::foundation::error::{ReelError, ReelResult};
use crate::timing::rate::estimate_spoken_secs;

/// Audio backing one spoken sentence.
#[derive(Clone, Debug, PartialEq)]
pub enum SpeechAudio {
    /// Encoded bytes returned by the synthesizer (container format is the synthesizer's choice).
    Encoded(Vec<u8>),
    /// No audio was produced; the muxer should insert silence of the segment duration.
    Silence,
}

/// Result of speaking one sentence.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeechSegment {
    /// Spoken length in seconds.
    pub duration_secs: f64,
    /// Audio payload.
    pub audio: SpeechAudio,
}

impl SpeechSegment {
    /// Segment of `duration_secs` with no audio.
    pub fn silence(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            audio: SpeechAudio::Silence,
        }
    }

    /// Where this segment's audio came from.
    pub fn source(&self) -> SpeechSource {
        match self.audio {
            SpeechAudio::Encoded(_) => SpeechSource::Synthesized,
            SpeechAudio::Silence => SpeechSource::Estimated,
        }
    }
}

/// Origin of a segment's duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechSource {
    /// Duration reported by the synthesizer.
    Synthesized,
    /// Duration estimated from the speaking rate.
    Estimated,
}

/// Text-to-speech collaborator.
///
/// Calls are synchronous; timeouts and retries are the implementation's concern.
pub trait SpeechSynthesizer {
    /// Speak `text` and report its duration.
    fn synthesize(&mut self, text: &str) -> ReelResult<SpeechSegment>;
}

impl<S: SpeechSynthesizer + ?Sized> SpeechSynthesizer for Box<S> {
    fn synthesize(&mut self, text: &str) -> ReelResult<SpeechSegment> {
        (**self).synthesize(text)
    }
}

/// Synthesizer used when no speech backend is configured. Always fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSpeech;

impl SpeechSynthesizer for NoSpeech {
    fn synthesize(&mut self, _text: &str) -> ReelResult<SpeechSegment> {
        Err(ReelError::synthesis("no speech backend configured"))
    }
}

/// Speak `text`, falling back to an estimated silent segment if the synthesizer fails or reports
/// an unusable duration.
pub fn synthesize_or_estimate<S: SpeechSynthesizer + ?Sized>(
    synth: &mut S,
    text: &str,
    cfg: &SpeechConfig,
) -> ReelResult<SpeechSegment> {
    match synth.synthesize(text) {
        Ok(seg) if seg.duration_secs.is_finite() && seg.duration_secs > 0.0 => Ok(seg),
        Ok(seg) => {
            tracing::warn!(
                duration_secs = seg.duration_secs,
                "synthesizer returned unusable duration, estimating"
            );
            estimate_segment(text, cfg)
        }
        Err(e) => {
            tracing::warn!(error = %e, "speech synthesis failed, estimating");
            estimate_segment(text, cfg)
        }
    }
}

fn estimate_segment(text: &str, cfg: &SpeechConfig) -> ReelResult<SpeechSegment> {
    Ok(SpeechSegment::silence(estimate_spoken_secs(
        text,
        cfg.words_per_minute,
    )?))
}

/// Interleaved `f32` silence of `duration_secs`.
pub fn silence_pcm(duration_secs: f64, sample_rate: u32, channels: u16) -> Vec<f32> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Vec::new();
    }
    let frames = (duration_secs * f64::from(sample_rate)).round() as usize;
    vec![0.0f32; frames * usize::from(channels)]
}

#[cfg(test)]
#[path = "../../tests/unit/speech/synth.rs"]
mod tests;
