use crate::config::validate_threshold;
use crate::error::ScoringError;
use crate::types::{DetailedAnalysis, MatchResult, MispronunciationRecord, ScoreBundle};

pub const CORRECTNESS_WEIGHT: f64 = 0.5;
pub const FLUENCY_WEIGHT: f64 = 0.25;
pub const CLARITY_WEIGHT: f64 = 0.25;

/// Reduces per-word matches into the four score dimensions (each in [0, 100])
/// and the mispronunciation list.
///
/// A match is mispronounced when `similarity < mispronunciation_threshold`.
/// Empty inputs score 0 on every dimension rather than failing.
pub fn score(
    expected_count: usize,
    transcribed_count: usize,
    matches: &[MatchResult],
    mispronunciation_threshold: f64,
) -> Result<ScoreBundle, ScoringError> {
    validate_threshold(mispronunciation_threshold)?;
    if matches.len() != expected_count {
        return Err(ScoringError::invalid_argument(format!(
            "expected_count ({expected_count}) does not match the number of match results ({})",
            matches.len()
        )));
    }

    let word_scores: Vec<f64> = matches.iter().map(|m| m.similarity).collect();

    let correctness_score = if word_scores.is_empty() {
        0.0
    } else {
        word_scores.iter().sum::<f64>() / word_scores.len() as f64 * 100.0
    };

    let longest = expected_count.max(transcribed_count);
    let fluency_score = if longest == 0 {
        0.0
    } else {
        expected_count.min(transcribed_count) as f64 / longest as f64 * 100.0
    };

    let mispronounced_words: Vec<MispronunciationRecord> = matches
        .iter()
        .filter(|m| m.similarity < mispronunciation_threshold)
        .map(|m| MispronunciationRecord {
            word: m.expected.text.clone(),
            expected_pronunciation: m.expected.text.clone(),
            actual_pronunciation: m
                .matched
                .as_ref()
                .map(|token| token.text.clone())
                .unwrap_or_default(),
            confidence_score: m.similarity,
            position: m.expected.position,
        })
        .collect();

    let clarity_score = if expected_count == 0 {
        0.0
    } else {
        (1.0 - mispronounced_words.len() as f64 / expected_count as f64) * 100.0
    };

    let overall_score = correctness_score * CORRECTNESS_WEIGHT
        + fluency_score * FLUENCY_WEIGHT
        + clarity_score * CLARITY_WEIGHT;

    tracing::debug!(
        expected_count,
        transcribed_count,
        mispronounced = mispronounced_words.len(),
        correctness = format!("{correctness_score:.2}"),
        fluency = format!("{fluency_score:.2}"),
        clarity = format!("{clarity_score:.2}"),
        overall = format!("{overall_score:.2}"),
        "scoring: computed score bundle"
    );

    Ok(ScoreBundle {
        correctness_score,
        fluency_score,
        clarity_score,
        overall_score,
        mispronounced_words,
        detailed_analysis: DetailedAnalysis {
            expected_words: expected_count,
            transcribed_words: transcribed_count,
            word_scores,
        },
    })
}
