use std::path::Path;

use crate::error::ScoringError;
use crate::types::{MatchResult, ScoreBundle, TranscriptionOutcome, WordToken};

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<WordToken>;
}

pub trait WordAligner: Send + Sync {
    fn align(
        &self,
        expected: &[WordToken],
        transcribed: &[WordToken],
        window_radius: usize,
    ) -> Vec<MatchResult>;
}

pub trait PronunciationScorer: Send + Sync {
    fn score(
        &self,
        expected_count: usize,
        transcribed_count: usize,
        matches: &[MatchResult],
        mispronunciation_threshold: f64,
    ) -> Result<ScoreBundle, ScoringError>;
}

/// Speech-to-text collaborator. Provider failures are reported through
/// [`TranscriptionOutcome::Failed`], never by panicking.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> TranscriptionOutcome;
}
