use crate::alignment::similarity::similarity_ratio;
use crate::alignment::tokenization::tokens_from_words;
use crate::types::{MatchResult, WordToken};

/// Aligns plain word lists. Words are used as given; see
/// [`crate::alignment::tokenization::tokenize_words`] for normalization.
pub fn align<E: AsRef<str>, T: AsRef<str>>(
    expected: &[E],
    transcribed: &[T],
    window_radius: usize,
) -> Vec<MatchResult> {
    align_tokens(
        &tokens_from_words(expected),
        &tokens_from_words(transcribed),
        window_radius,
    )
}

/// For every expected token, picks the most similar transcribed token whose
/// index lies within `window_radius` of the expected index.
///
/// The result has exactly one entry per expected token. Ties keep the earliest
/// transcribed index; a candidate must score above 0 to be matched at all.
pub fn align_tokens(
    expected: &[WordToken],
    transcribed: &[WordToken],
    window_radius: usize,
) -> Vec<MatchResult> {
    expected
        .iter()
        .enumerate()
        .map(|(i, expected_token)| {
            let start = i.saturating_sub(window_radius);
            let end = i
                .saturating_add(window_radius)
                .saturating_add(1)
                .min(transcribed.len());

            let mut best: Option<&WordToken> = None;
            let mut best_similarity = 0.0f64;
            for candidate in transcribed.get(start..end).unwrap_or(&[]) {
                let similarity = similarity_ratio(&expected_token.text, &candidate.text);
                if similarity > best_similarity {
                    best_similarity = similarity;
                    best = Some(candidate);
                }
            }

            tracing::debug!(
                word = expected_token.text.as_str(),
                position = i,
                window_start = start,
                window_end = end,
                matched = best.map(|t| t.text.as_str()).unwrap_or(""),
                similarity = format!("{best_similarity:.3}"),
                "alignment: best candidate in window"
            );

            MatchResult {
                expected: expected_token.clone(),
                matched: best.cloned(),
                similarity: best_similarity,
            }
        })
        .collect()
}
