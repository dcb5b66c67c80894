//! Tokenizing and counting words across fetched texts.

use std::collections::HashMap;

use super::stop_words::StopWords;

/// Splits on every non-alphanumeric character and lowercases each token.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: u64,
    /// Order in which the word was first counted; breaks ties in `top`.
    first_seen: usize,
}

/// Single accumulator for all texts. Fill it sequentially after the fetches
/// have been joined; it is never shared between tasks.
#[derive(Debug, Default, Clone)]
pub struct WordCounts {
    tallies: HashMap<String, Tally>,
    total: u64,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every non-stop-word token in `text`.
    pub fn add_text(&mut self, text: &str, stop_words: &StopWords) {
        for word in tokenize(text) {
            if stop_words.contains(&word) {
                continue;
            }
            let next = self.tallies.len();
            self.tallies
                .entry(word)
                .or_insert(Tally {
                    count: 0,
                    first_seen: next,
                })
                .count += 1;
            self.total += 1;
        }
    }

    pub fn get(&self, word: &str) -> u64 {
        self.tallies.get(word).map_or(0, |t| t.count)
    }

    /// Distinct words counted.
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Total tokens counted (after stop-word filtering).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The `n` most frequent words, highest count first; equal counts keep
    /// first-occurrence order.
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(&String, &Tally)> = self.tallies.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        ranked
            .into_iter()
            .take(n)
            .map(|(w, t)| (w.clone(), t.count))
            .collect()
    }

    pub fn to_map(&self) -> HashMap<String, u64> {
        self.tallies
            .iter()
            .map(|(w, t)| (w.clone(), t.count))
            .collect()
    }
}

/// Count all `texts` in order into one accumulator.
pub fn count_words<'a>(
    texts: impl IntoIterator<Item = &'a str>,
    stop_words: &StopWords,
) -> WordCounts {
    let mut counts = WordCounts::new();
    for text in texts {
        counts.add_text(text, stop_words);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(words: &[&str]) -> StopWords {
        StopWords::from_words(words.iter().copied())
    }

    #[test]
    fn tokenize_splits_and_lowercases() {
        let tokens: Vec<String> = tokenize("Hello, World! It's 2024--ok").collect();
        assert_eq!(tokens, vec!["hello", "world", "it", "s", "2024", "ok"]);
    }

    #[test]
    fn tokenize_handles_unicode_letters() {
        let tokens: Vec<String> = tokenize("Über café;naïve").collect();
        assert_eq!(tokens, vec!["über", "café", "naïve"]);
    }

    #[test]
    fn counts_across_texts_without_stop_words() {
        let counts = count_words(["the cat sat", "the dog sat"], &stop(&["the"]));
        let expected: HashMap<String, u64> = [("cat", 1), ("sat", 2), ("dog", 1)]
            .into_iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect();
        assert_eq!(counts.to_map(), expected);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.top(1), vec![("sat".to_string(), 2)]);
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let counts = count_words(["zebra apple mango", "mango apple zebra"], &StopWords::none());
        let top: Vec<String> = counts.top(3).into_iter().map(|(w, _)| w).collect();
        assert_eq!(top, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn stop_words_match_case_insensitively() {
        let counts = count_words(["The THE the Cat"], &stop(&["the"]));
        assert_eq!(counts.get("the"), 0);
        assert_eq!(counts.get("cat"), 1);
    }

    #[test]
    fn top_larger_than_vocabulary() {
        let counts = count_words(["one two"], &StopWords::none());
        assert_eq!(counts.top(10).len(), 2);
        assert!(count_words([""], &StopWords::none()).top(5).is_empty());
    }
}
