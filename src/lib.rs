//! reelcap plans narrated short-form vertical videos with word-by-word highlighted captions.
//!
//! A post is split into sentences; each sentence is spoken by a [`SpeechSynthesizer`] (or given an
//! estimated silent duration), measured by a [`TextMeasurer`], and laid out into karaoke frames.
//!
//! # Pipeline overview
//!
//! 1. **Time**: sentence + spoken duration -> per-word durations weighted by character count
//! 2. **Wrap**: measured words -> greedy lines -> pages of at most two lines
//! 3. **Frame**: pages -> one [`FrameDescriptor`] per word, with pixel-stable positions per page
//! 4. **Assemble**: sentence clips -> [`CaptionTrack`] in narration order, capped to the platform limit
//!
//! The result is a serializable [`ShortPlan`] for a renderer to composite over a background clip.
//! Rasterization, encoding and speech engines stay outside this crate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assemble;
mod config;
mod encode;
mod foundation;
mod layout;
mod pipeline;
mod source;
mod speech;
mod text;
mod timing;

pub use assemble::audio::{AudioCue, AudioPlan};
pub use assemble::background::{BackgroundPlan, plan_background};
pub use assemble::track::{CaptionTrack, SentenceClip, TimedFrame};
pub use config::{
    BackgroundConfig, CaptionStyle, PipelineConfig, RenderOpts, SpeechConfig, TitleStyle,
    WordPaint,
};
pub use encode::sink::{
    FrameRecord, FrameSink, InMemorySink, JsonLinesSink, SinkConfig, stream_track,
};
pub use foundation::core::{Canvas, Point, Rgba8};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::frames::{
    FrameDescriptor, FrameGeometry, PositionedWord, build_frames, layout_sentence, place_page,
};
pub use layout::lines::{Line, Page, paginate, wrap_lines};
pub use layout::title::{TitleCard, fit_title};
pub use pipeline::session::{
    BackgroundSource, Pipeline, PipelineOutput, PreparedSentence, ShortPlan, build_clip,
    build_clips,
};
pub use source::Post;
pub use speech::synth::{
    NoSpeech, SpeechAudio, SpeechSegment, SpeechSource, SpeechSynthesizer, silence_pcm,
    synthesize_or_estimate,
};
pub use text::measure::{
    ApproxMeasurer, MeasuredWord, ParleyMeasurer, TextExtent, TextMeasurer, measure_words,
};
pub use text::split::{char_len, split_sentences, words};
pub use timing::rate::estimate_spoken_secs;
pub use timing::words::{allocate_by_lengths, allocate_word_durations};
