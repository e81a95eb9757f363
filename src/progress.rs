//! Terminal progress reporting for the scan phase

use indicatif::ProgressBar;

/// Progress bar over the eligible file count, hidden when stdout is not a
/// terminal so logs and redirected output stay clean.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    pub fn new(total_files: usize) -> Self {
        let bar = ProgressBar::new(total_files as u64).with_message("Parsing files");
        let bar = if console::Term::stdout().is_term() {
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub fn tick(&self, file: &str) {
        self.bar.inc(1);
        if !file.is_empty() {
            self.bar.set_message(format!("Parsing: {}", file));
        }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }
}
