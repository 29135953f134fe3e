#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { page_index: u32 },
    ReportProgress { unique: usize, target: usize },
    PageSkipped { page_index: u32, reason: String },
    /// An unbounded run stopped on a failure streak and keeps what it has.
    GaveUp {
        consecutive: u32,
        last_page: u32,
        last_reason: String,
    },
    Abort(AbortReason),
    /// Final word list, trimmed and sorted.
    Finished { words: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    FetchFailed {
        page_index: u32,
        reason: String,
    },
    TooManyFailures {
        consecutive: u32,
        last_page: u32,
        last_reason: String,
    },
}
