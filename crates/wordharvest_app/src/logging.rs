//! Logger setup for the wordharvest binary.
//!
//! Logs go to stderr, since stdout carries the word list, and optionally to a
//! file as well.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use indicatif::ProgressBar;
use log::{LevelFilter, Log, Metadata, Record};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Bar that terminal log lines are written around while a harvest runs.
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub fn attach_progress_bar(bar: ProgressBar) {
    if let Ok(mut active) = ACTIVE_BAR.lock() {
        *active = Some(bar);
    }
}

pub fn detach_progress_bar() {
    if let Ok(mut active) = ACTIVE_BAR.lock() {
        *active = None;
    }
}

fn active_bar() -> Option<ProgressBar> {
    ACTIVE_BAR.lock().ok().and_then(|active| active.clone())
}

/// Terminal logger that clears the progress bar before each line and redraws
/// it afterwards.
struct BarAwareLogger {
    inner: Box<TermLogger>,
}

impl Log for BarAwareLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match active_bar() {
            Some(bar) => bar.suspend(|| self.inner.log(record)),
            None => self.inner.log(record),
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

impl SharedLogger for BarAwareLogger {
    fn level(&self) -> LevelFilter {
        self.inner.level()
    }

    fn config(&self) -> Option<&Config> {
        self.inner.config()
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

pub fn initialize(level: LevelFilter, log_file: Option<&Path>) {
    if level == LevelFilter::Off && log_file.is_none() {
        return;
    }

    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![Box::new(BarAwareLogger {
        inner: TermLogger::new(level, config.clone(), TerminalMode::Stderr, ColorChoice::Auto),
    })];
    if let Some(path) = log_file {
        if let Some(file_logger) = create_file_logger(path, level.max(LevelFilter::Info), config) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        // HTTP stack chatter stays out of the log.
        .add_filter_allow_str("wordharvest")
        .build()
}

fn create_file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
