use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assemble::audio::AudioPlan;
use crate::assemble::background::{BackgroundPlan, plan_background};
use crate::assemble::track::{CaptionTrack, SentenceClip};
use crate::config::{CaptionStyle, PipelineConfig, RenderOpts};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::frames::{FrameGeometry, layout_sentence};
use crate::layout::title::{TitleCard, fit_title};
use crate::source::Post;
use crate::speech::synth::{SpeechSegment, SpeechSynthesizer, synthesize_or_estimate};
use crate::text::measure::{MeasuredWord, TextMeasurer, measure_words};
use crate::text::split::{split_sentences, words};
use crate::timing::words::allocate_word_durations;

/// Background source footage offered to the planner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundSource {
    /// Length of the source clip in seconds.
    pub duration_secs: f64,
    /// Random draw in `[0, 1]` used to pick the cut position.
    pub unit: f64,
}

/// Everything the renderer needs to compose the final short.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortPlan {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: u32,
    /// Final length after the duration cap.
    pub duration_secs: f64,
    /// Title card fitted to the title box.
    pub title_card: Option<TitleCard>,
    /// Karaoke caption track.
    pub captions: CaptionTrack,
    /// Narration cues.
    pub audio: AudioPlan,
    /// Background fitting, when a source was offered.
    pub background: Option<BackgroundPlan>,
}

/// Result of a full run: the plan plus the synthesized audio payloads it refers to.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Render plan.
    pub plan: ShortPlan,
    /// Speech per sentence index, in narration order.
    pub speech: Vec<(usize, SpeechSegment)>,
}

/// A sentence that has been spoken and measured, ready for layout.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedSentence {
    /// Position in the narration.
    pub index: usize,
    /// Sentence text.
    pub text: String,
    /// Spoken length in seconds.
    pub duration_secs: f64,
    /// Measured words; `None` when measurement failed.
    pub words: Option<Vec<MeasuredWord>>,
}

/// Explicit context for one run: configuration plus the measuring and speaking collaborators.
pub struct Pipeline<M, S> {
    cfg: PipelineConfig,
    measurer: M,
    synth: S,
}

impl<M: TextMeasurer, S: SpeechSynthesizer> Pipeline<M, S> {
    /// Validate `cfg` and build a pipeline.
    pub fn new(cfg: PipelineConfig, measurer: M, synth: S) -> ReelResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            measurer,
            synth,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Speak and measure one sentence.
    ///
    /// Returns `None` for a sentence without words. A measurement failure is logged and leaves
    /// `words` empty so the sentence still occupies its narration time.
    #[tracing::instrument(skip(self, text))]
    pub fn prepare_sentence(
        &mut self,
        index: usize,
        text: &str,
    ) -> ReelResult<Option<(PreparedSentence, SpeechSegment)>> {
        if words(text).is_empty() {
            tracing::debug!("skipping sentence without words");
            return Ok(None);
        }

        let speech = synthesize_or_estimate(&mut self.synth, text, &self.cfg.speech)?;
        let measured = match measure_words(&mut self.measurer, text, self.cfg.caption.font_size) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "measurement failed, sentence will show no captions");
                None
            }
        };

        Ok(Some((
            PreparedSentence {
                index,
                text: text.to_string(),
                duration_secs: speech.duration_secs,
                words: measured,
            },
            speech,
        )))
    }

    /// Fit `title` into the configured title box.
    pub fn fit_title(&mut self, title: &str) -> ReelResult<Option<TitleCard>> {
        let geom = FrameGeometry::from_style(self.cfg.canvas, &self.cfg.caption);
        fit_title(&mut self.measurer, title, &self.cfg.title, &geom)
    }

    /// Narrate `post` and plan the short.
    #[tracing::instrument(skip(self, post, background))]
    pub fn run(
        &mut self,
        post: &Post,
        background: Option<BackgroundSource>,
    ) -> ReelResult<PipelineOutput> {
        let sentences = split_sentences(&post.full_text());
        tracing::info!(sentences = sentences.len(), "processing post");

        let mut prepared = Vec::with_capacity(sentences.len());
        let mut speech = Vec::with_capacity(sentences.len());
        for (index, text) in sentences.iter().enumerate() {
            if let Some((p, seg)) = self.prepare_sentence(index, text)? {
                prepared.push(p);
                speech.push((index, seg));
            }
        }

        let clips = build_clips(prepared, self.cfg.canvas, &self.cfg.caption, &self.cfg.render)?;
        let captions = CaptionTrack::assemble(clips);
        let audio = AudioPlan::from_segments(speech.iter().map(|(i, s)| (*i, s)), &self.cfg.speech);

        let total = audio.duration();
        let limit = self.cfg.max_duration_secs;
        if total > limit {
            tracing::info!(total_secs = total, limit_secs = limit, "capping duration");
        }
        let duration_secs = total.min(limit);

        let background = background
            .map(|src| {
                plan_background(
                    src.duration_secs,
                    duration_secs,
                    &self.cfg.background,
                    src.unit,
                )
            })
            .transpose()?;
        let title_card = self.fit_title(&post.title)?;

        tracing::info!(
            duration_secs,
            frames = captions.frame_count(),
            "planned short"
        );
        Ok(PipelineOutput {
            plan: ShortPlan {
                canvas: self.cfg.canvas,
                fps: self.cfg.fps,
                duration_secs,
                title_card,
                captions: captions.capped(limit),
                audio: audio.capped(limit),
                background,
            },
            speech,
        })
    }
}

/// Lay out one prepared sentence. Never fails: layout problems turn the sentence into a gap.
pub fn build_clip(p: PreparedSentence, canvas: Canvas, style: &CaptionStyle) -> SentenceClip {
    let Some(words) = p.words.as_deref() else {
        return SentenceClip::gap(p.index, p.text, p.duration_secs);
    };

    let frames = allocate_word_durations(&p.text, p.duration_secs)
        .and_then(|durations| layout_sentence(words, &durations, canvas, style));
    match frames {
        Ok(frames) => SentenceClip {
            sentence_index: p.index,
            text: p.text,
            duration: p.duration_secs,
            frames,
        },
        Err(e) => {
            tracing::warn!(sentence = p.index, error = %e, "layout failed, inserting gap");
            SentenceClip::gap(p.index, p.text, p.duration_secs)
        }
    }
}

/// Lay out every prepared sentence, optionally in parallel, returning clips in sentence order.
pub fn build_clips(
    prepared: Vec<PreparedSentence>,
    canvas: Canvas,
    style: &CaptionStyle,
    opts: &RenderOpts,
) -> ReelResult<Vec<SentenceClip>> {
    let build = |p: PreparedSentence| build_clip(p, canvas, style);
    let mut clips: Vec<SentenceClip> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| prepared.into_par_iter().map(build).collect::<Vec<_>>())
    } else {
        prepared.into_iter().map(build).collect()
    };
    clips.sort_by_key(|c| c.sentence_index);
    Ok(clips)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation(
            "render 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/session.rs"]
mod tests;
