use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use wordharvest_logging::{harvest_debug, harvest_trace};

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

const USER_AGENT: &str = concat!("wordharvest/", env!("CARGO_PKG_VERSION"));

/// Limits applied to every page request.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Special:Random answers with one redirect to the article.
    pub max_redirects: usize,
    pub max_body_bytes: u64,
    pub accepted_mime_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_redirects: 5,
            max_body_bytes: 5 * 1024 * 1024,
            accepted_mime_types: vec!["text/html".into(), "application/xhtml+xml".into()],
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// Counts the hops of one request while enforcing the redirect cap.
#[derive(Clone)]
struct RedirectTracker {
    hops: Arc<AtomicUsize>,
    max: usize,
}

impl RedirectTracker {
    fn new(max: usize) -> Self {
        Self {
            hops: Arc::new(AtomicUsize::new(0)),
            max,
        }
    }

    fn policy(&self) -> reqwest::redirect::Policy {
        let tracker = self.clone();
        reqwest::redirect::Policy::custom(move |attempt| {
            let hops = attempt.previous().len();
            tracker.hops.store(hops, Ordering::Relaxed);
            if hops > tracker.max {
                attempt.error("too many redirects")
            } else {
                attempt.follow()
            }
        })
    }

    fn hops(&self) -> usize {
        self.hops.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn client(&self, redirects: &RedirectTracker) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(redirects.policy())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// Media type of the response, rejected unless it is one we can scrape.
    fn accepted_content_type(&self, headers: &HeaderMap) -> Result<Option<String>, FetchError> {
        let Some(raw) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return Ok(None);
        };
        let mime = raw.split(';').next().unwrap_or_default().trim();
        let accepted = self
            .settings
            .accepted_mime_types
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(mime));
        if accepted {
            Ok(Some(raw.to_string()))
        } else {
            Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: raw.to_string(),
                },
                "not an html page",
            ))
        }
    }

    fn body_too_large(&self, seen: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_body_bytes,
                actual: Some(seen),
            },
            "page body exceeds limit",
        )
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let limit = self.settings.max_body_bytes;
        if let Some(declared) = response.content_length().filter(|len| *len > limit) {
            return Err(self.body_too_large(declared));
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(classify)?;
            let seen = (body.len() + chunk.len()) as u64;
            if seen > limit {
                return Err(self.body_too_large(seen));
            }
            body.extend_from_slice(&chunk);
            harvest_trace!("{} body bytes so far", body.len());
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let target = url::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirects = RedirectTracker::new(self.settings.max_redirects);
        let response = self
            .client(&redirects)?
            .get(target)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{url} answered {status}"),
            ));
        }
        let content_type = self.accepted_content_type(response.headers())?;
        let resolved_url = response.url().to_string();
        if resolved_url != url {
            harvest_debug!("{} resolved to {}", url, resolved_url);
        }

        let bytes = self.read_body(response).await?;
        Ok(FetchOutput {
            metadata: FetchMetadata {
                requested_url: url.to_string(),
                resolved_url,
                redirect_count: redirects.hops(),
                content_type,
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
