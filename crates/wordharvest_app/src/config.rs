//! Optional RON file supplying defaults for the command-line options.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Every field is optional; command-line flags take precedence.
///
/// ```ron
/// #![enable(implicit_some)]
/// (
///     language: "de",
///     num_words: 500,
///     min_appearances: 2,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub language: Option<String>,
    pub num_words: Option<usize>,
    pub max_pages: Option<u32>,
    pub min_appearances: Option<u32>,
    pub allow_capitalized: Option<bool>,
    pub preserve_case: Option<bool>,
    pub word_chars: Option<String>,
    pub word_regex: Option<String>,
    pub abort_on_fetch_error: Option<bool>,
    pub max_consecutive_failures: Option<u32>,
    pub random_page_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }
}
