use crate::Phase;

/// Read-only snapshot of a session, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub phase: Phase,
    pub unique_words: usize,
    pub pages_fetched: u32,
    pub pages_skipped: u32,
    pub trimmed: usize,
}
