#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the session, seeding it with piped text if any was supplied.
    Start { piped_text: Option<String> },
    /// Text extracted from the page requested at `page_index`.
    PageFetched { page_index: u32, text: String },
    /// The fetch for `page_index` failed.
    PageFailed { page_index: u32, reason: String },
    /// Stop fetching and finish with what has been gathered.
    CancelRequested,
}
