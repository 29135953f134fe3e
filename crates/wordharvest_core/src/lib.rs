//! Wordharvest core: word pattern, tokenizer, accumulator and the pure
//! session state machine that ties them together.
mod accumulator;
mod cancel;
mod driver;
mod effect;
mod error;
mod msg;
mod output;
mod pattern;
mod settings;
mod state;
mod tokenizer;
mod update;
mod view_model;

pub use accumulator::{merge, WordState};
pub use cancel::CancelToken;
pub use driver::{HarvestOutcome, LanguageValidator, PageSource, ProgressObserver, SessionRunner};
pub use effect::{AbortReason, Effect};
pub use error::{ConfigError, SessionError};
pub use msg::Msg;
pub use output::render_word_list;
pub use pattern::{build_pattern, ExtractionConfig, WordPattern};
pub use settings::{
    FailurePolicy, HarvestSettings, DEFAULT_APPEARANCE_THRESHOLD, DEFAULT_LANGUAGE,
    DEFAULT_MAX_CONSECUTIVE_FAILURES, DEFAULT_TARGET,
};
pub use state::{Phase, SessionState};
pub use tokenizer::tokenize;
pub use update::Session;
pub use view_model::SessionSummary;
