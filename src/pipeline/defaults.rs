use crate::alignment::tokenization::tokenize_words;
use crate::alignment::window::align_tokens;
use crate::error::ScoringError;
use crate::pipeline::traits::{PronunciationScorer, Tokenizer, WordAligner};
use crate::scoring::score;
use crate::types::{MatchResult, ScoreBundle, WordToken};

pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<WordToken> {
        tokenize_words(text)
    }
}

pub struct WindowedWordAligner;

impl WordAligner for WindowedWordAligner {
    fn align(
        &self,
        expected: &[WordToken],
        transcribed: &[WordToken],
        window_radius: usize,
    ) -> Vec<MatchResult> {
        align_tokens(expected, transcribed, window_radius)
    }
}

pub struct WeightedPronunciationScorer;

impl PronunciationScorer for WeightedPronunciationScorer {
    fn score(
        &self,
        expected_count: usize,
        transcribed_count: usize,
        matches: &[MatchResult],
        mispronunciation_threshold: f64,
    ) -> Result<ScoreBundle, ScoringError> {
        score(
            expected_count,
            transcribed_count,
            matches,
            mispronunciation_threshold,
        )
    }
}
