use indicatif::{ProgressBar, ProgressStyle};
use wordharvest_core::ProgressObserver;

const TEMPLATE: &str = "Generating words: [{bar:25}] {pos} of {len}";

/// Terminal progress bar on stderr; hidden when stderr is not a terminal.
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    pub fn new(target: usize) -> Self {
        let bar = ProgressBar::new(target as u64);
        let style = ProgressStyle::with_template(TEMPLATE)
            .map(|style| style.progress_chars("# "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_progress(&mut self, current: usize, target: usize) {
        self.bar.set_length(target as u64);
        self.bar.set_position(current.min(target) as u64);
    }
}
