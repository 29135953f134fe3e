use std::collections::BTreeSet;

use proptest::prelude::*;
use wordharvest_core::{
    merge, tokenize, Effect, ExtractionConfig, HarvestSettings, Msg, Session, SessionState,
    WordPattern, WordState,
};

fn extraction_config() -> impl Strategy<Value = ExtractionConfig> {
    (any::<bool>(), "[-@.'_&~\\]\\[^]{0,4}").prop_map(|(allow_capitalized, extra)| {
        ExtractionConfig {
            allow_capitalized,
            ..ExtractionConfig::default()
        }
        .with_extra_chars(&extra)
    })
}

fn token_batch() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{1,3}", 0..20)
}

proptest! {
    /// Every token, preserved in case, matches the pattern in full when padded.
    #[test]
    fn prop_tokens_rematch_in_full(
        config in extraction_config(),
        text in "[ a-zA-Z.,;()@'_-]{0,60}",
    ) {
        let pattern = WordPattern::compile(&config).unwrap();
        let regex = fancy_regex::Regex::new(pattern.as_str()).unwrap();
        for token in tokenize(&text, &pattern, true) {
            let padded = format!(" {token} ");
            let found = regex.find(&padded).unwrap().map(|m| m.as_str().to_string());
            prop_assert_eq!(found, Some(token.clone()));
        }
    }

    /// With a threshold of 1 merging is plain set union.
    #[test]
    fn prop_threshold_one_is_union(first in token_batch(), second in token_batch()) {
        let state = merge(WordState::new(), first.clone(), 1);
        let state = merge(state, second.clone(), 1);
        let expected: BTreeSet<String> = first.into_iter().chain(second).collect();
        prop_assert_eq!(state.into_sorted_vec(), expected.into_iter().collect::<Vec<_>>());
    }

    /// A word enters the set exactly when its running count reaches the threshold.
    #[test]
    fn prop_threshold_membership(batches in prop::collection::vec(token_batch(), 1..6), threshold in 2u32..4) {
        let mut state = WordState::new();
        let mut seen: std::collections::HashMap<String, u32> = Default::default();
        for batch in batches {
            for token in &batch {
                *seen.entry(token.clone()).or_default() += 1;
            }
            state = merge(state, batch, threshold);
            for (word, count) in &seen {
                prop_assert_eq!(state.contains(word), *count >= threshold);
            }
        }
    }

    /// Merging an empty batch never changes state.
    #[test]
    fn prop_empty_merge_is_identity(batch in token_batch(), threshold in 0u32..4) {
        let state = merge(WordState::new(), batch, threshold);
        prop_assert_eq!(merge(state.clone(), Vec::new(), threshold), state);
    }

    /// Trimming yields min(target, size) words and never grows the set.
    #[test]
    fn prop_trim_size(batch in token_batch(), target in 0usize..25) {
        let mut state = merge(WordState::new(), batch, 1);
        let before = state.len();
        state.trim_to(target);
        prop_assert_eq!(state.len(), before.min(target));
    }

    /// Final output is sorted, duplicate free and never longer than the target.
    #[test]
    fn prop_output_sorted_and_unique(
        pages in prop::collection::vec("[a-z ]{0,40}", 1..5),
        target in 0usize..15,
    ) {
        let session = Session::new(
            &ExtractionConfig::default(),
            HarvestSettings { target, page_budget: Some(pages.len() as u32), ..HarvestSettings::default() },
        ).unwrap();
        let (mut state, mut effects) = session.update(SessionState::new(), Msg::Start { piped_text: None });
        let mut pages = pages.into_iter();
        let words = loop {
            match effects.pop() {
                Some(Effect::FetchPage { page_index }) => {
                    let text = pages.next().unwrap_or_default();
                    let (next, next_effects) = session.update(state, Msg::PageFetched { page_index, text });
                    state = next;
                    effects = next_effects;
                }
                Some(Effect::Finished { words }) => break words,
                Some(_) => {}
                None => prop_assert!(false, "session ended without finishing"),
            }
        };
        prop_assert!(words.len() <= target);
        prop_assert!(words.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
