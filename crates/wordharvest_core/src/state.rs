use crate::view_model::SessionSummary;
use crate::WordState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Seeding,
    Fetching,
    Trimming,
    Done,
}

/// Everything one run accumulates. Owned by a single session driver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(crate) phase: Phase,
    pub(crate) words: WordState,
    pub(crate) pages_fetched: u32,
    pub(crate) pages_skipped: u32,
    pub(crate) consecutive_failures: u32,
    pub(crate) trimmed: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn words(&self) -> &WordState {
        &self.words
    }

    /// Fetch attempts so far, failed ones included.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn view(&self) -> SessionSummary {
        SessionSummary {
            phase: self.phase,
            unique_words: self.words.len(),
            pages_fetched: self.pages_fetched,
            pages_skipped: self.pages_skipped,
            trimmed: self.trimmed,
        }
    }
}
