use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use wordharvest_core::{
    ExtractionConfig, FailurePolicy, HarvestSettings, DEFAULT_APPEARANCE_THRESHOLD,
    DEFAULT_LANGUAGE, DEFAULT_MAX_CONSECUTIVE_FAILURES, DEFAULT_TARGET,
};
use wordharvest_engine::{FetchSettings, RandomPageEndpoint, DEFAULT_RANDOM_PAGE_URL};

use crate::config::FileConfig;

pub const DEFAULT_OUTPUT_FILE: &str = "wiki_words.txt";

#[derive(Debug, Parser)]
#[command(
    name = "wordharvest",
    version,
    about = "Scours random Wikipedia articles to build a custom list of words."
)]
pub struct Args {
    /// Number of words to generate [default: 1000]
    #[arg(short = 'n', long = "num-words", value_name = "NUM-WORDS")]
    pub num_words: Option<usize>,

    /// Maximum number of page fetches [default: unbounded]
    #[arg(short = 'p', long = "max-pages", value_name = "MAX-HTTP-CALLS")]
    pub max_pages: Option<u32>,

    /// Language to draw words from [default: en]
    #[arg(short = 'l', long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Write results to OUTPUT-FILE instead of stdout
    #[arg(
        short = 'f',
        long = "file",
        value_name = "OUTPUT-FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_OUTPUT_FILE
    )]
    pub output_file: Option<PathBuf>,

    /// Allow words starting with a capital letter (proper nouns, sentence starts)
    #[arg(short = 'c', long = "caps")]
    pub allow_capitalized: bool,

    /// Preserve words' original capitalization
    #[arg(short = 'o', long = "preserve-case")]
    pub preserve_case: bool,

    /// Minimum number of times a word must appear to be kept [default: 1]
    #[arg(short = 's', long = "min-appearances", value_name = "MIN-APPEARANCES")]
    pub min_appearances: Option<u32>,

    /// Extra characters allowed inside a word; `-w @.` makes jon@gmail.com a word
    #[arg(
        short = 'w',
        long = "word-chars",
        value_name = "STRING-OF-CHARS",
        allow_hyphen_values = true
    )]
    pub word_chars: Option<String>,

    /// Regex that defines a word, replacing the other word options. Each page's
    /// text is padded with a space at both ends before matching.
    #[arg(
        short = 'r',
        long = "word-regex",
        value_name = "REGEX",
        allow_hyphen_values = true
    )]
    pub word_regex: Option<String>,

    /// Print the regex that defines a word for the current options and exit
    #[arg(short = 'g', long = "get-regex")]
    pub get_regex: bool,

    /// Abort on the first failed page fetch instead of skipping it
    #[arg(long)]
    pub abort_on_fetch_error: bool,

    /// Consecutive failed fetches tolerated before giving up [default: 5]
    #[arg(long, value_name = "COUNT")]
    pub max_consecutive_failures: Option<u32>,

    /// RON file supplying defaults for these options
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silence log output
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also write logs to PATH
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Everything one invocation needs, after merging flags over the config file.
#[derive(Debug, Clone)]
pub struct HarvestPlan {
    pub extraction: ExtractionConfig,
    pub settings: HarvestSettings,
    pub fetch: FetchSettings,
    pub endpoint: RandomPageEndpoint,
    pub output_file: Option<PathBuf>,
    pub print_pattern: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Off;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn into_plan(self, file: FileConfig) -> HarvestPlan {
        let extraction = ExtractionConfig {
            allow_capitalized: self.allow_capitalized || file.allow_capitalized.unwrap_or(false),
            override_pattern: self.word_regex.or(file.word_regex),
            ..ExtractionConfig::default()
        }
        .with_extra_chars(&self.word_chars.or(file.word_chars).unwrap_or_default());

        let abort = self.abort_on_fetch_error || file.abort_on_fetch_error.unwrap_or(false);
        let settings = HarvestSettings {
            target: self.num_words.or(file.num_words).unwrap_or(DEFAULT_TARGET),
            page_budget: self.max_pages.or(file.max_pages),
            appearance_threshold: self
                .min_appearances
                .or(file.min_appearances)
                .unwrap_or(DEFAULT_APPEARANCE_THRESHOLD),
            preserve_case: self.preserve_case || file.preserve_case.unwrap_or(false),
            language: self
                .language
                .or(file.language)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            failure_policy: if abort {
                FailurePolicy::Abort
            } else {
                FailurePolicy::SkipAndCount
            },
            max_consecutive_failures: self
                .max_consecutive_failures
                .or(file.max_consecutive_failures)
                .unwrap_or(DEFAULT_MAX_CONSECUTIVE_FAILURES),
        };

        let mut fetch = FetchSettings::default();
        if let Some(secs) = file.connect_timeout_secs {
            fetch.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            fetch.request_timeout = Duration::from_secs(secs);
        }
        let endpoint = RandomPageEndpoint::new(
            file.random_page_url
                .unwrap_or_else(|| DEFAULT_RANDOM_PAGE_URL.to_string()),
        );

        HarvestPlan {
            extraction,
            settings,
            fetch,
            endpoint,
            output_file: self.output_file,
            print_pattern: self.get_regex,
        }
    }
}
