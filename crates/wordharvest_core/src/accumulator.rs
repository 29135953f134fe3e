use std::collections::{BTreeSet, HashMap};

/// Running collection of accepted words plus the appearance counts behind them.
///
/// The word set is ordered, so iteration is already the final output order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordState {
    words: BTreeSet<String>,
    appearances: HashMap<String, u32>,
}

impl WordState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Occurrences counted so far; always 0 unless a threshold above 1 is in use.
    pub fn appearances(&self, word: &str) -> u32 {
        self.appearances.get(word).copied().unwrap_or(0)
    }

    /// Drop the lexicographically largest words until at most `target` remain.
    /// Returns how many were removed.
    pub fn trim_to(&mut self, target: usize) -> usize {
        let mut removed = 0;
        while self.words.len() > target {
            self.words.pop_last();
            removed += 1;
        }
        removed
    }

    pub fn into_sorted_vec(self) -> Vec<String> {
        self.words.into_iter().collect()
    }
}

/// Merge one tokenized batch into `state`.
///
/// With `threshold <= 1` the batch is unioned into the word set. Above 1 every
/// token is counted and the word set is rebuilt from the counts, holding
/// exactly the tokens seen at least `threshold` times so far.
pub fn merge(mut state: WordState, tokens: Vec<String>, threshold: u32) -> WordState {
    if tokens.is_empty() {
        return state;
    }

    if threshold <= 1 {
        state.words.extend(tokens);
        return state;
    }

    for token in tokens {
        *state.appearances.entry(token).or_insert(0) += 1;
    }
    state.words = state
        .appearances
        .iter()
        .filter(|(_, &count)| count >= threshold)
        .map(|(word, _)| word.clone())
        .collect();
    state
}
