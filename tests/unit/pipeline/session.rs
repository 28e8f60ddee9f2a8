use super::*;
use crate::speech::synth::{NoSpeech, SpeechAudio, SpeechSource};
use crate::text::measure::{ApproxMeasurer, TextExtent};

/// Speaks every sentence in one second per word.
struct WordClock;

impl SpeechSynthesizer for WordClock {
    fn synthesize(&mut self, text: &str) -> ReelResult<SpeechSegment> {
        Ok(SpeechSegment {
            duration_secs: words(text).len() as f64,
            audio: SpeechAudio::Encoded(text.as_bytes().to_vec()),
        })
    }
}

/// Fails on any word containing `!`.
struct Picky;

impl TextMeasurer for Picky {
    fn measure(&mut self, text: &str, font_size: f32) -> ReelResult<TextExtent> {
        if text.contains('!') {
            return Err(ReelError::measurement("no glyph for '!'"));
        }
        ApproxMeasurer::default().measure(text, font_size)
    }
}

fn post() -> Post {
    Post {
        title: "My neighbour keeps parking in my spot".to_string(),
        body: "I asked nicely twice. They laughed at me! So I called the landlord today."
            .to_string(),
    }
}

#[test]
fn run_produces_one_frame_per_word_in_order() {
    let mut p = Pipeline::new(PipelineConfig::default(), ApproxMeasurer::default(), WordClock)
        .unwrap();
    let out = p.run(&post(), None).unwrap();

    let sentences = split_sentences(&post().full_text());
    let clips = out.plan.captions.clips();
    assert_eq!(clips.len(), sentences.len());
    for (clip, sentence) in clips.iter().zip(&sentences) {
        assert_eq!(&clip.text, sentence);
        assert_eq!(clip.frames.len(), words(sentence).len());
        let sum: f64 = clip.frames.iter().map(|f| f.duration).sum();
        assert!((sum - clip.duration).abs() < 1e-9);
    }
    assert_eq!(out.plan.duration_secs, out.plan.captions.duration());
    assert_eq!(out.plan.audio.cues.len(), sentences.len());
    assert!(out.plan.title_card.is_some());
    assert!(out.plan.background.is_none());
}

#[test]
fn synthesis_failure_uses_estimated_durations() {
    let mut cfg = PipelineConfig::default();
    cfg.speech.words_per_minute = 60.0;
    let mut p = Pipeline::new(cfg, ApproxMeasurer::default(), NoSpeech).unwrap();
    let out = p.run(&post(), None).unwrap();

    assert!(
        out.plan
            .audio
            .cues
            .iter()
            .all(|c| c.source == SpeechSource::Estimated)
    );
    let first = &out.plan.captions.clips()[0];
    assert!((first.duration - words(&first.text).len() as f64).abs() < 1e-9);
}

#[test]
fn measurement_failure_leaves_a_gap_for_that_sentence_only() {
    let mut p = Pipeline::new(PipelineConfig::default(), Picky, WordClock).unwrap();
    let out = p.run(&post(), None).unwrap();
    let clips = out.plan.captions.clips();

    let gaps: Vec<&str> = clips
        .iter()
        .filter(|c| c.is_gap())
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(gaps, vec!["They laughed at me!"]);
    assert!(clips.iter().filter(|c| !c.is_gap()).all(|c| !c.frames.is_empty()));
    assert_eq!(out.plan.captions.duration(), out.plan.audio.duration());
}

#[test]
fn parallel_build_matches_sequential() {
    let sequential = Pipeline::new(PipelineConfig::default(), ApproxMeasurer::default(), WordClock)
        .unwrap()
        .run(&post(), None)
        .unwrap();

    let mut cfg = PipelineConfig::default();
    cfg.render.parallel = true;
    cfg.render.threads = Some(3);
    let parallel = Pipeline::new(cfg, ApproxMeasurer::default(), WordClock)
        .unwrap()
        .run(&post(), None)
        .unwrap();

    assert_eq!(sequential.plan.captions, parallel.plan.captions);
}

#[test]
fn long_narration_is_capped() {
    let mut cfg = PipelineConfig::default();
    cfg.max_duration_secs = 5.5;
    let mut p = Pipeline::new(cfg, ApproxMeasurer::default(), WordClock).unwrap();
    let out = p
        .run(
            &post(),
            Some(BackgroundSource {
                duration_secs: 300.0,
                unit: 0.5,
            }),
        )
        .unwrap();

    assert_eq!(out.plan.duration_secs, 5.5);
    assert!((out.plan.captions.duration() - 5.5).abs() < 1e-9);
    assert!((out.plan.audio.duration() - 5.5).abs() < 1e-9);
    assert_eq!(out.plan.background.unwrap().duration_secs(), 6.5);
    // Speech payloads are kept whole for the muxer.
    assert_eq!(out.speech.len(), split_sentences(&post().full_text()).len());
}

#[test]
fn blank_sentence_is_skipped() {
    let mut p = Pipeline::new(PipelineConfig::default(), ApproxMeasurer::default(), WordClock)
        .unwrap();
    assert!(p.prepare_sentence(0, "   ").unwrap().is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = PipelineConfig::default();
    cfg.canvas.width = 0;
    assert!(Pipeline::new(cfg, ApproxMeasurer::default(), NoSpeech).is_err());
}

#[test]
fn gap_clip_for_missing_words() {
    let clip = build_clip(
        PreparedSentence {
            index: 3,
            text: "Hello there.".to_string(),
            duration_secs: 1.25,
            words: None,
        },
        Canvas::VERTICAL_HD,
        &CaptionStyle::default(),
    );
    assert!(clip.is_gap());
    assert_eq!(clip.duration, 1.25);
    assert_eq!(clip.sentence_index, 3);
}
