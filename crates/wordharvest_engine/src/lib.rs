//! Wordharvest engine: page fetching, decoding, text extraction and result
//! persistence behind the collaborator traits of `wordharvest_core`.
mod decode;
mod extract;
mod fetch;
mod persist;
mod source;
mod types;

pub use decode::{decode_page, DecodedPage};
pub use extract::{ExtractedText, ParagraphExtractor, TextExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_output_dir, write_word_list, PersistError};
pub use source::{
    is_plausible_language_code, RandomPageEndpoint, WikipediaLanguageValidator,
    WikipediaPageSource, DEFAULT_RANDOM_PAGE_URL,
};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
