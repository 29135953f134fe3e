use thiserror::Error;

/// Problems with the session configuration, raised before any page is fetched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("word pattern {pattern:?} does not compile: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("max consecutive failures must be at least 1")]
    ZeroFailureLimit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unsupported language code {language:?}")]
    UnsupportedLanguage { language: String },
    #[error("fetching page {page_index} for language {language:?} failed: {reason}")]
    Fetch {
        page_index: u32,
        language: String,
        reason: String,
    },
    #[error(
        "{consecutive} consecutive page fetches failed for language {language:?}; \
         last was page {last_page}: {last_reason}"
    )]
    TooManyFailures {
        language: String,
        consecutive: u32,
        last_page: u32,
        last_reason: String,
    },
}
