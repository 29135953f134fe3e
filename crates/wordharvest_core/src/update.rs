use wordharvest_logging::{harvest_debug, harvest_info, harvest_warn};

use crate::{
    merge, tokenize, AbortReason, ConfigError, Effect, ExtractionConfig, FailurePolicy,
    HarvestSettings, Msg, Phase, SessionState, WordPattern,
};

/// Immutable configuration of one harvesting run: settings plus the compiled
/// word pattern. Drives [`SessionState`] through [`Session::update`].
#[derive(Debug, Clone)]
pub struct Session {
    settings: HarvestSettings,
    pattern: WordPattern,
}

impl Session {
    pub fn new(extraction: &ExtractionConfig, settings: HarvestSettings) -> Result<Self, ConfigError> {
        if settings.max_consecutive_failures == 0 {
            return Err(ConfigError::ZeroFailureLimit);
        }
        let has_override = extraction
            .override_pattern
            .as_deref()
            .is_some_and(|pattern| !pattern.is_empty());
        if has_override && (extraction.allow_capitalized || !extraction.extra_chars.is_empty()) {
            harvest_warn!("custom word pattern set; capitalization and extra characters are ignored");
        }
        let pattern = WordPattern::compile(extraction)?;
        Ok(Self { settings, pattern })
    }

    pub fn settings(&self) -> &HarvestSettings {
        &self.settings
    }

    pub fn pattern(&self) -> &WordPattern {
        &self.pattern
    }

    /// Pure update function: applies a message to state and returns any effects.
    ///
    /// Messages that do not fit the current phase, or that answer a page other
    /// than the one requested, leave the state untouched.
    pub fn update(&self, mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
        let effects = match msg {
            Msg::Start { piped_text } => {
                if state.phase != Phase::Seeding {
                    return (state, Vec::new());
                }
                if let Some(text) = piped_text {
                    self.absorb(&mut state, &text);
                    harvest_info!("seeded {} unique words from piped input", state.words.len());
                }
                state.phase = Phase::Fetching;
                self.advance(&mut state)
            }
            Msg::PageFetched { page_index, text } => {
                if !self.is_pending(&state, page_index) {
                    return (state, Vec::new());
                }
                self.absorb(&mut state, &text);
                state.pages_fetched += 1;
                state.consecutive_failures = 0;

                let mut effects = vec![Effect::ReportProgress {
                    unique: state.words.len(),
                    target: self.settings.target,
                }];
                effects.extend(self.advance(&mut state));
                effects
            }
            Msg::PageFailed { page_index, reason } => {
                if !self.is_pending(&state, page_index) {
                    return (state, Vec::new());
                }
                state.pages_fetched += 1;
                state.pages_skipped += 1;
                state.consecutive_failures += 1;

                match self.settings.failure_policy {
                    FailurePolicy::Abort => {
                        state.phase = Phase::Done;
                        vec![Effect::Abort(AbortReason::FetchFailed { page_index, reason })]
                    }
                    FailurePolicy::SkipAndCount if self.failure_streak_exhausted(&state) => {
                        let consecutive = state.consecutive_failures;
                        if state.words.is_empty() {
                            state.phase = Phase::Done;
                            vec![Effect::Abort(AbortReason::TooManyFailures {
                                consecutive,
                                last_page: page_index,
                                last_reason: reason,
                            })]
                        } else {
                            let mut effects = vec![Effect::GaveUp {
                                consecutive,
                                last_page: page_index,
                                last_reason: reason,
                            }];
                            effects.extend(self.finish(&mut state));
                            effects
                        }
                    }
                    FailurePolicy::SkipAndCount => {
                        let mut effects = vec![Effect::PageSkipped { page_index, reason }];
                        effects.extend(self.advance(&mut state));
                        effects
                    }
                }
            }
            Msg::CancelRequested => {
                if state.phase != Phase::Fetching {
                    return (state, Vec::new());
                }
                self.finish(&mut state)
            }
        };

        (state, effects)
    }

    fn is_pending(&self, state: &SessionState, page_index: u32) -> bool {
        state.phase == Phase::Fetching && page_index == state.pages_fetched
    }

    /// Only an unbounded run gives up on a failure streak; a bounded one
    /// spends its budget.
    fn failure_streak_exhausted(&self, state: &SessionState) -> bool {
        self.settings.page_budget.is_none()
            && state.consecutive_failures >= self.settings.max_consecutive_failures
    }

    fn absorb(&self, state: &mut SessionState, text: &str) {
        let tokens = tokenize(text, &self.pattern, self.settings.preserve_case);
        let token_count = tokens.len();
        let words = std::mem::take(&mut state.words);
        state.words = merge(words, tokens, self.settings.appearance_threshold);
        harvest_debug!(
            "{} tokens merged, {} unique words",
            token_count,
            state.words.len()
        );
    }

    fn should_fetch(&self, state: &SessionState) -> bool {
        let within_budget = self
            .settings
            .page_budget
            .is_none_or(|budget| state.pages_fetched < budget);
        within_budget && state.words.len() < self.settings.target
    }

    fn advance(&self, state: &mut SessionState) -> Vec<Effect> {
        if self.should_fetch(state) {
            vec![Effect::FetchPage {
                page_index: state.pages_fetched,
            }]
        } else {
            self.finish(state)
        }
    }

    fn finish(&self, state: &mut SessionState) -> Vec<Effect> {
        vec![Effect::Finished {
            words: self.conclude(state),
        }]
    }

    /// Trims to the target and closes the session, returning the final list.
    pub(crate) fn conclude(&self, state: &mut SessionState) -> Vec<String> {
        state.phase = Phase::Trimming;
        state.trimmed += state.words.trim_to(self.settings.target);
        if state.trimmed > 0 {
            harvest_debug!("trimmed {} surplus words", state.trimmed);
        }
        state.phase = Phase::Done;
        state.words.words().map(str::to_string).collect()
    }
}
