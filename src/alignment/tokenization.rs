use crate::types::WordToken;

/// Lowercases `text` and splits it on whitespace, keeping source order.
/// Punctuation is left attached to its word.
pub fn tokenize_words(text: &str) -> Vec<WordToken> {
    text.to_lowercase()
        .split_whitespace()
        .enumerate()
        .map(|(position, word)| WordToken::new(word, position))
        .collect()
}

/// Wraps already-normalized words as tokens without touching their text.
pub fn tokens_from_words<S: AsRef<str>>(words: &[S]) -> Vec<WordToken> {
    words
        .iter()
        .enumerate()
        .map(|(position, word)| WordToken::new(word.as_ref(), position))
        .collect()
}
