use std::collections::VecDeque;
use std::sync::Once;

use pretty_assertions::assert_eq;
use wordharvest_core::{
    CancelToken, ExtractionConfig, HarvestSettings, LanguageValidator, PageSource, Session,
    SessionError, SessionRunner,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(wordharvest_logging::initialize_for_tests);
}

struct ScriptedSource {
    pages: VecDeque<Result<String, String>>,
    requested: Vec<String>,
    cancel_after: Option<(usize, CancelToken)>,
}

impl ScriptedSource {
    fn new(pages: Vec<Result<&str, &str>>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|page| page.map(str::to_string).map_err(str::to_string))
                .collect(),
            requested: Vec::new(),
            cancel_after: None,
        }
    }
}

impl PageSource for ScriptedSource {
    type Error = String;

    fn fetch_random_page(&mut self, language: &str) -> Result<String, String> {
        self.requested.push(language.to_string());
        if let Some((limit, token)) = &self.cancel_after {
            if self.requested.len() >= *limit {
                token.cancel();
            }
        }
        self.pages
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()))
    }
}

struct KnownLanguages(&'static [&'static str]);

impl LanguageValidator for KnownLanguages {
    fn is_supported_language(&self, code: &str) -> bool {
        self.0.contains(&code)
    }
}

const LANGUAGES: KnownLanguages = KnownLanguages(&["en", "de"]);

fn session(settings: HarvestSettings) -> Session {
    Session::new(&ExtractionConfig::default(), settings).expect("valid session")
}

#[test]
fn runs_until_target_and_reports_progress() {
    init_logging();
    let session = session(HarvestSettings {
        target: 3,
        page_budget: Some(5),
        ..HarvestSettings::default()
    });
    let mut source = ScriptedSource::new(vec![
        Ok("alpha beta"),
        Ok("gamma delta"),
        Ok("never requested"),
    ]);
    let mut progress = Vec::new();
    let mut observer = |current: usize, target: usize| progress.push((current, target));

    let outcome = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .with_observer(&mut observer)
        .run(None)
        .unwrap();

    assert_eq!(outcome.words, vec!["alpha", "beta", "delta"]);
    assert_eq!(outcome.summary.pages_fetched, 2);
    assert_eq!(source.requested, vec!["en", "en"]);
    assert_eq!(progress, vec![(2, 3), (4, 3)]);
}

#[test]
fn unsupported_language_refuses_to_start() {
    init_logging();
    let session = session(HarvestSettings {
        language: "xx".to_string(),
        ..HarvestSettings::default()
    });
    let mut source = ScriptedSource::new(vec![Ok("words")]);

    let err = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .run(Some("seed text".to_string()))
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::UnsupportedLanguage {
            language: "xx".to_string()
        }
    );
    assert!(source.requested.is_empty());
}

#[test]
fn skipped_failures_keep_progress() {
    init_logging();
    let session = session(HarvestSettings {
        target: 10,
        page_budget: Some(3),
        language: "de".to_string(),
        ..HarvestSettings::default()
    });
    let mut source = ScriptedSource::new(vec![Ok("eins zwei"), Err("timeout"), Ok("drei")]);

    let outcome = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .run(None)
        .unwrap();

    assert_eq!(outcome.words, vec!["drei", "eins", "zwei"]);
    assert_eq!(outcome.summary.pages_fetched, 3);
    assert_eq!(outcome.summary.pages_skipped, 1);
}

#[test]
fn bounded_budget_keeps_words_through_long_outage() {
    init_logging();
    let session = session(HarvestSettings {
        target: 100,
        page_budget: Some(20),
        ..HarvestSettings::default()
    });
    let mut source = ScriptedSource::new(vec![Ok("alpha beta gamma delta")]);

    let outcome = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .run(None)
        .unwrap();

    assert_eq!(outcome.words, vec!["alpha", "beta", "delta", "gamma"]);
    assert_eq!(outcome.summary.pages_fetched, 20);
    assert_eq!(outcome.summary.pages_skipped, 19);
    assert_eq!(source.requested.len(), 20);
}

#[test]
fn unbounded_budget_gives_up_but_keeps_words() {
    init_logging();
    let session = session(HarvestSettings {
        max_consecutive_failures: 3,
        ..HarvestSettings::default()
    });
    let mut source = ScriptedSource::new(vec![Ok("some words")]);

    let outcome = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .run(None)
        .unwrap();

    assert_eq!(outcome.words, vec!["some", "words"]);
    assert_eq!(outcome.summary.pages_skipped, 3);
    assert_eq!(source.requested.len(), 4);
}

#[test]
fn unbounded_budget_with_dead_network_fails() {
    init_logging();
    let session = session(HarvestSettings {
        max_consecutive_failures: 3,
        ..HarvestSettings::default()
    });
    let mut source = ScriptedSource::new(Vec::new());

    let err = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .run(None)
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::TooManyFailures {
            language: "en".to_string(),
            consecutive: 3,
            last_page: 2,
            last_reason: "script exhausted".to_string()
        }
    );
}

#[test]
fn cancellation_stops_between_pages() {
    init_logging();
    let session = session(HarvestSettings::default());
    let token = CancelToken::new();
    let mut source = ScriptedSource::new(vec![Ok("first page"), Ok("second page")]);
    source.cancel_after = Some((1, token.clone()));

    let outcome = SessionRunner::new(&session, &LANGUAGES, &mut source)
        .with_cancel_token(token)
        .run(None)
        .unwrap();

    assert_eq!(outcome.words, vec!["first", "page"]);
    assert_eq!(source.requested.len(), 1);
}
