pub const DEFAULT_TARGET: usize = 1000;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_APPEARANCE_THRESHOLD: u32 = 1;
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// What the session does when a page fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Count the failed fetch against the page budget and keep going.
    #[default]
    SkipAndCount,
    /// Abort the whole run on the first failure.
    Abort,
}

/// Run-level settings, fixed for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    /// Desired number of unique words.
    pub target: usize,
    /// Maximum number of page fetches; `None` is unbounded.
    pub page_budget: Option<u32>,
    /// Minimum number of appearances before a word counts; values <= 1 disable counting.
    pub appearance_threshold: u32,
    pub preserve_case: bool,
    pub language: String,
    pub failure_policy: FailurePolicy,
    /// Consecutive failed fetches tolerated under `FailurePolicy::SkipAndCount`.
    pub max_consecutive_failures: u32,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            page_budget: None,
            appearance_threshold: DEFAULT_APPEARANCE_THRESHOLD,
            preserve_case: false,
            language: DEFAULT_LANGUAGE.to_string(),
            failure_policy: FailurePolicy::default(),
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }
}
