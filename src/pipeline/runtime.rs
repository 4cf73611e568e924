use std::path::Path;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::traits::{PronunciationScorer, Tokenizer, Transcriber, WordAligner};
use crate::types::{AttemptFeedback, AttemptResult, ScoreBundle, TranscriptionOutcome};

/// Tokenize, align and score one attempt against its reference text.
///
/// Holds no per-call state; a single evaluator can serve concurrent callers.
pub struct PronunciationEvaluator {
    config: ScoringConfig,
    tokenizer: Box<dyn Tokenizer>,
    word_aligner: Box<dyn WordAligner>,
    scorer: Box<dyn PronunciationScorer>,
}

pub(crate) struct PronunciationEvaluatorParts {
    pub config: ScoringConfig,
    pub tokenizer: Box<dyn Tokenizer>,
    pub word_aligner: Box<dyn WordAligner>,
    pub scorer: Box<dyn PronunciationScorer>,
}

impl PronunciationEvaluator {
    pub(crate) fn from_parts(parts: PronunciationEvaluatorParts) -> Self {
        Self {
            config: parts.config,
            tokenizer: parts.tokenizer,
            word_aligner: parts.word_aligner,
            scorer: parts.scorer,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        expected_text: &str,
        transcribed_text: &str,
    ) -> Result<ScoreBundle, ScoringError> {
        let expected = self.tokenizer.tokenize(expected_text);
        let transcribed = self.tokenizer.tokenize(transcribed_text);

        if transcribed.is_empty() && !expected.is_empty() {
            tracing::warn!(
                expected_words = expected.len(),
                "empty transcript; every expected word will score 0"
            );
        }

        let matches = self
            .word_aligner
            .align(&expected, &transcribed, self.config.window_radius);
        self.scorer.score(
            expected.len(),
            transcribed.len(),
            &matches,
            self.config.mispronunciation_threshold,
        )
    }

    /// Scores a transcription result. A failed transcription skips alignment
    /// entirely and yields an error marker instead of scores.
    pub fn evaluate_outcome(
        &self,
        expected_text: &str,
        outcome: TranscriptionOutcome,
    ) -> Result<AttemptResult, ScoringError> {
        match outcome {
            TranscriptionOutcome::Transcript(transcribed_text) => {
                let bundle = self.evaluate(expected_text, &transcribed_text)?;
                Ok(AttemptResult {
                    transcribed_text,
                    feedback: AttemptFeedback::Scored(bundle),
                })
            }
            TranscriptionOutcome::Failed { reason } => {
                tracing::error!(reason = reason.as_str(), "transcription failed; attempt not scored");
                Ok(AttemptResult {
                    transcribed_text: String::new(),
                    feedback: AttemptFeedback::Failed { error: reason },
                })
            }
        }
    }

    pub fn process_attempt(
        &self,
        transcriber: &dyn Transcriber,
        expected_text: &str,
        audio_path: &Path,
    ) -> Result<AttemptResult, ScoringError> {
        tracing::debug!(audio_path = %audio_path.display(), "transcribing attempt");
        let outcome = transcriber.transcribe(audio_path);
        self.evaluate_outcome(expected_text, outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use crate::pipeline::builder::PronunciationEvaluatorBuilder;
    use crate::pipeline::traits::Transcriber;

    use super::*;

    struct FixedTranscriber {
        outcome: TranscriptionOutcome,
        seen_paths: Mutex<Vec<PathBuf>>,
    }

    impl FixedTranscriber {
        fn new(outcome: TranscriptionOutcome) -> Self {
            Self {
                outcome,
                seen_paths: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transcriber for FixedTranscriber {
        fn transcribe(&self, audio_path: &Path) -> TranscriptionOutcome {
            if let Ok(mut seen) = self.seen_paths.lock() {
                seen.push(audio_path.to_path_buf());
            }
            self.outcome.clone()
        }
    }

    /// Fails the test if scoring is ever reached.
    struct UnreachableScorer;

    impl PronunciationScorer for UnreachableScorer {
        fn score(
            &self,
            _expected_count: usize,
            _transcribed_count: usize,
            _matches: &[crate::types::MatchResult],
            _mispronunciation_threshold: f64,
        ) -> Result<ScoreBundle, ScoringError> {
            panic!("scorer must not run for a failed transcription");
        }
    }

    fn evaluator() -> PronunciationEvaluator {
        PronunciationEvaluatorBuilder::new(ScoringConfig::default())
            .build()
            .expect("build should succeed")
    }

    #[test]
    fn evaluate_lowercases_both_texts() {
        let bundle = evaluator().evaluate("Hello World", "hello WORLD").unwrap();
        assert_eq!(bundle.overall_score, 100.0);
        assert!(bundle.mispronounced_words.is_empty());
    }

    #[test]
    fn evaluate_empty_transcript_degrades_to_zero() {
        let bundle = evaluator().evaluate("hello world", "   ").unwrap();
        assert_eq!(bundle.overall_score, 0.0);
        assert_eq!(bundle.mispronounced_words.len(), 2);
        assert_eq!(bundle.detailed_analysis.transcribed_words, 0);
    }

    #[test]
    fn evaluate_respects_configured_radius() {
        let narrow = PronunciationEvaluatorBuilder::new(ScoringConfig {
            window_radius: 0,
            ..ScoringConfig::default()
        })
        .build()
        .expect("build should succeed");
        let bundle = narrow.evaluate("hello world", "helo").unwrap();
        assert_eq!(bundle.detailed_analysis.word_scores[1], 0.0);
        assert!((bundle.overall_score - (200.0 / 9.0 + 25.0)).abs() < 1e-9);
    }

    #[test]
    fn evaluate_outcome_scores_transcript() {
        let result = evaluator()
            .evaluate_outcome(
                "hello world",
                TranscriptionOutcome::Transcript("hello world".to_string()),
            )
            .unwrap();
        assert_eq!(result.transcribed_text, "hello world");
        let bundle = result.feedback.bundle().expect("scored feedback");
        assert_eq!(bundle.overall_score, 100.0);
    }

    #[test]
    fn failed_transcription_is_not_scored() {
        let evaluator = PronunciationEvaluatorBuilder::new(ScoringConfig::default())
            .with_scorer(Box::new(UnreachableScorer))
            .build()
            .expect("build should succeed");
        let result = evaluator
            .evaluate_outcome(
                "hello world",
                TranscriptionOutcome::Failed {
                    reason: "provider error: 503".to_string(),
                },
            )
            .unwrap();
        assert!(result.transcribed_text.is_empty());
        assert_eq!(
            result.feedback,
            AttemptFeedback::Failed {
                error: "provider error: 503".to_string()
            }
        );
    }

    #[test]
    fn failed_transcription_differs_from_zero_score() {
        let evaluator = evaluator();
        let failed = evaluator
            .evaluate_outcome(
                "hello",
                TranscriptionOutcome::Failed {
                    reason: "timeout".to_string(),
                },
            )
            .unwrap();
        let silent = evaluator
            .evaluate_outcome("hello", TranscriptionOutcome::Transcript(String::new()))
            .unwrap();
        assert!(failed.feedback.is_failed());
        assert!(!silent.feedback.is_failed());
        assert_ne!(
            serde_json::to_value(&failed.feedback).unwrap(),
            serde_json::to_value(&silent.feedback).unwrap()
        );
    }

    #[test]
    fn process_attempt_passes_audio_path_to_transcriber() {
        let transcriber =
            FixedTranscriber::new(TranscriptionOutcome::Transcript("the quick fox".to_string()));
        let audio = Path::new("attempts/0001.wav");
        let result = evaluator()
            .process_attempt(&transcriber, "the quick brown fox", audio)
            .unwrap();
        assert_eq!(
            transcriber.seen_paths.lock().unwrap().as_slice(),
            [PathBuf::from("attempts/0001.wav")]
        );
        let bundle = result.feedback.bundle().expect("scored feedback");
        assert_eq!(bundle.detailed_analysis.expected_words, 4);
        assert_eq!(bundle.detailed_analysis.transcribed_words, 3);
        assert!((bundle.fluency_score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn evaluator_is_shareable_across_threads() {
        let evaluator = std::sync::Arc::new(evaluator());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let evaluator = std::sync::Arc::clone(&evaluator);
                std::thread::spawn(move || {
                    evaluator
                        .evaluate("she sells sea shells", "she shells see sells")
                        .map(|b| b.overall_score)
                })
            })
            .collect();
        let scores: Vec<f64> = handles
            .into_iter()
            .map(|h| h.join().expect("thread").expect("score"))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }
}
