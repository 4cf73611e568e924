use serde::{Deserialize, Serialize};

/// A lowercase word and its 0-based position in the sequence it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub text: String,
    pub position: usize,
}

impl WordToken {
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Best transcribed candidate for one expected word.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub expected: WordToken,
    pub matched: Option<WordToken>,
    /// Similarity ratio in [0, 1]; 0 when no candidate matched.
    pub similarity: f64,
}

impl MatchResult {
    /// Index into the transcribed sequence, `None` when nothing matched.
    pub fn matched_index(&self) -> Option<usize> {
        self.matched.as_ref().map(|token| token.position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MispronunciationRecord {
    pub word: String,
    pub expected_pronunciation: String,
    /// Matched transcribed word, empty when no candidate existed.
    pub actual_pronunciation: String,
    pub confidence_score: f64,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub expected_words: usize,
    pub transcribed_words: usize,
    pub word_scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub correctness_score: f64,
    pub fluency_score: f64,
    pub clarity_score: f64,
    pub overall_score: f64,
    pub mispronounced_words: Vec<MispronunciationRecord>,
    pub detailed_analysis: DetailedAnalysis,
}

/// What the speech-to-text collaborator handed back for one recording.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionOutcome {
    Transcript(String),
    Failed { reason: String },
}

/// Persisted feedback for an attempt. A failed transcription serializes as
/// `{"error": ...}` so it never reads as a zero score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttemptFeedback {
    Scored(ScoreBundle),
    Failed { error: String },
}

impl AttemptFeedback {
    pub fn bundle(&self) -> Option<&ScoreBundle> {
        match self {
            Self::Scored(bundle) => Some(bundle),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub transcribed_text: String,
    pub feedback: AttemptFeedback,
}
