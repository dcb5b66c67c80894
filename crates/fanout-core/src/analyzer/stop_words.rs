//! Stop words: common words left out of the frequency count.

use std::collections::HashSet;

/// Built-in list, used when the config does not provide one.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "the", "in", "at", "on", "for", "with", "to", "is", "it", "and", "but", "or", "of",
    "an",
];

/// Lowercased set of words to discard. Passed explicitly to the counting
/// pass rather than shared as global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }

    pub fn none() -> Self {
        Self(HashSet::new())
    }

    /// `word` must already be lowercase.
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOP_WORDS)
    }
}
