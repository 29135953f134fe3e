use std::fmt;

use wordharvest_logging::{
    clear_page_context, harvest_debug, harvest_info, harvest_warn, set_page_context,
};

use crate::{
    AbortReason, CancelToken, Effect, Msg, Session, SessionError, SessionState, SessionSummary,
};

/// Supplies the plain text of one random page per call.
pub trait PageSource {
    type Error: fmt::Display;

    fn fetch_random_page(&mut self, language: &str) -> Result<String, Self::Error>;
}

pub trait LanguageValidator {
    fn is_supported_language(&self, code: &str) -> bool;
}

/// Told the unique word count after every processed page.
pub trait ProgressObserver {
    fn on_progress(&mut self, current: usize, target: usize);
}

impl<F> ProgressObserver for F
where
    F: FnMut(usize, usize),
{
    fn on_progress(&mut self, current: usize, target: usize) {
        self(current, target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOutcome {
    pub words: Vec<String>,
    pub summary: SessionSummary,
}

/// Runs a [`Session`] to completion against its collaborators, one page at a
/// time on the calling thread.
pub struct SessionRunner<'a, S: PageSource> {
    session: &'a Session,
    validator: &'a dyn LanguageValidator,
    source: &'a mut S,
    observer: Option<&'a mut dyn ProgressObserver>,
    cancel: CancelToken,
}

impl<'a, S: PageSource> SessionRunner<'a, S> {
    pub fn new(
        session: &'a Session,
        validator: &'a dyn LanguageValidator,
        source: &'a mut S,
    ) -> Self {
        Self {
            session,
            validator,
            source,
            observer: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn run(mut self, piped_text: Option<String>) -> Result<HarvestOutcome, SessionError> {
        let language = self.session.settings().language.clone();
        if !self.validator.is_supported_language(&language) {
            return Err(SessionError::UnsupportedLanguage { language });
        }
        harvest_info!(
            "harvesting {} words from language {:?} with pattern {}",
            self.session.settings().target,
            language,
            self.session.pattern().as_str()
        );

        let mut state = SessionState::new();
        let mut next = Some(Msg::Start { piped_text });
        while let Some(msg) = next.take() {
            let (updated, effects) = self.session.update(state, msg);
            state = updated;
            for effect in effects {
                match effect {
                    Effect::FetchPage { page_index } => {
                        next = Some(self.fetch(page_index, &language));
                    }
                    Effect::ReportProgress { unique, target } => {
                        if let Some(observer) = self.observer.as_deref_mut() {
                            observer.on_progress(unique, target);
                        }
                    }
                    Effect::PageSkipped { page_index, reason } => {
                        harvest_warn!("skipping page {} ({}): {}", page_index, language, reason);
                    }
                    Effect::GaveUp {
                        consecutive,
                        last_page,
                        last_reason,
                    } => {
                        harvest_warn!(
                            "giving up after {} consecutive failures (last page {}: {}); keeping {} words",
                            consecutive,
                            last_page,
                            last_reason,
                            state.words().len()
                        );
                    }
                    Effect::Abort(reason) => {
                        clear_page_context();
                        return Err(abort_error(reason, language));
                    }
                    Effect::Finished { words } => {
                        clear_page_context();
                        let summary = state.view();
                        harvest_info!(
                            "finished with {} words after {} pages ({} skipped, {} trimmed)",
                            words.len(),
                            summary.pages_fetched,
                            summary.pages_skipped,
                            summary.trimmed
                        );
                        return Ok(HarvestOutcome { words, summary });
                    }
                }
            }
        }

        // Every message either requests another page or ends the session.
        clear_page_context();
        let words = self.session.conclude(&mut state);
        Ok(HarvestOutcome {
            words,
            summary: state.view(),
        })
    }

    fn fetch(&mut self, page_index: u32, language: &str) -> Msg {
        if self.cancel.is_cancelled() {
            harvest_info!("cancelled before page {}", page_index);
            return Msg::CancelRequested;
        }
        set_page_context(u64::from(page_index));
        match self.source.fetch_random_page(language) {
            Ok(text) => {
                harvest_debug!("received {} bytes of text", text.len());
                Msg::PageFetched { page_index, text }
            }
            Err(err) => Msg::PageFailed {
                page_index,
                reason: err.to_string(),
            },
        }
    }
}

fn abort_error(reason: AbortReason, language: String) -> SessionError {
    match reason {
        AbortReason::FetchFailed { page_index, reason } => SessionError::Fetch {
            page_index,
            language,
            reason,
        },
        AbortReason::TooManyFailures {
            consecutive,
            last_page,
            last_reason,
        } => SessionError::TooManyFailures {
            language,
            consecutive,
            last_page,
            last_reason,
        },
    }
}
