use std::io;

use wordharvest_core::{LanguageValidator, PageSource};
use wordharvest_logging::{harvest_debug, harvest_warn};

use crate::{
    decode_page, FailureKind, FetchError, FetchSettings, Fetcher, ParagraphExtractor,
    ReqwestFetcher, TextExtractor,
};

pub const DEFAULT_RANDOM_PAGE_URL: &str = "https://{lang}.wikipedia.org/wiki/Special:Random";

const LANG_PLACEHOLDER: &str = "{lang}";
const MAX_LANGUAGE_CODE_LEN: usize = 20;

/// Language codes look like `en`, `simple` or `zh-min-nan`.
pub fn is_plausible_language_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_LANGUAGE_CODE_LEN
        && !code.starts_with('-')
        && !code.ends_with('-')
        && code
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// URL template for a random article; `{lang}` is replaced by the language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomPageEndpoint {
    template: String,
}

impl RandomPageEndpoint {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn url_for(&self, language: &str) -> Result<url::Url, FetchError> {
        if !is_plausible_language_code(language) {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("invalid language code {language:?}"),
            ));
        }
        let raw = self.template.replace(LANG_PLACEHOLDER, language);
        url::Url::parse(&raw).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

impl Default for RandomPageEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_PAGE_URL)
    }
}

/// Blocking front for the async fetcher: one current-thread runtime, one
/// request at a time.
struct PageClient {
    runtime: tokio::runtime::Runtime,
    fetcher: ReqwestFetcher,
    endpoint: RandomPageEndpoint,
}

impl PageClient {
    fn new(settings: FetchSettings, endpoint: RandomPageEndpoint) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            fetcher: ReqwestFetcher::new(settings),
            endpoint,
        })
    }

    fn fetch_html(&self, language: &str) -> Result<String, FetchError> {
        let url = self.endpoint.url_for(language)?;
        let output = self.runtime.block_on(self.fetcher.fetch(url.as_str()))?;
        let decoded = decode_page(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_errors {
            harvest_warn!(
                "{} did not decode cleanly as {}",
                output.metadata.resolved_url,
                decoded.encoding_label
            );
        }
        harvest_debug!(
            "fetched {} ({} bytes, {} redirects, {})",
            output.metadata.resolved_url,
            output.metadata.byte_len,
            output.metadata.redirect_count,
            decoded.encoding_label
        );
        Ok(decoded.html)
    }
}

/// Random Wikipedia articles as plain paragraph text.
pub struct WikipediaPageSource {
    client: PageClient,
    extractor: ParagraphExtractor,
}

impl WikipediaPageSource {
    pub fn new(settings: FetchSettings, endpoint: RandomPageEndpoint) -> io::Result<Self> {
        Ok(Self {
            client: PageClient::new(settings, endpoint)?,
            extractor: ParagraphExtractor,
        })
    }
}

impl PageSource for WikipediaPageSource {
    type Error = FetchError;

    fn fetch_random_page(&mut self, language: &str) -> Result<String, FetchError> {
        let html = self.client.fetch_html(language)?;
        let extracted = self.extractor.extract(&html);
        harvest_debug!(
            "{:?}: {} paragraphs, {} chars",
            extracted.title.as_deref().unwrap_or("untitled"),
            extracted.paragraphs,
            extracted.text.len()
        );
        Ok(extracted.text)
    }
}

/// Accepts a language when its code is well formed and its random page answers.
pub struct WikipediaLanguageValidator {
    client: PageClient,
}

impl WikipediaLanguageValidator {
    pub fn new(settings: FetchSettings, endpoint: RandomPageEndpoint) -> io::Result<Self> {
        Ok(Self {
            client: PageClient::new(settings, endpoint)?,
        })
    }
}

impl LanguageValidator for WikipediaLanguageValidator {
    fn is_supported_language(&self, code: &str) -> bool {
        if !is_plausible_language_code(code) {
            return false;
        }
        match self.client.fetch_html(code) {
            Ok(_) => true,
            Err(err) => {
                harvest_warn!("language {:?} probe failed: {}", code, err);
                false
            }
        }
    }
}
