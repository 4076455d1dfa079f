//! Terminal progress for the stages of a collage command

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Shows one bar per running stage, stacked under each other
///
/// A stage is a countable unit of work such as loading candidates or filling
/// mosaic rows. Finished stages stay visible with a check mark until
/// [`ProgressManager::finish`] clears the display.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    current: Option<ProgressBar>,
    label: String,
    stages_done: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>12}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a manager with nothing displayed yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            current: None,
            label: String::new(),
            stages_done: 0,
        }
    }

    /// Begin a stage of `total` steps, finishing the previous one if needed
    pub fn start_stage(&mut self, label: &str, total: usize) {
        self.finish_stage();

        let bar = ProgressBar::new(total as u64);
        bar.set_style(STAGE_STYLE.clone());
        bar.set_prefix(label.to_owned());
        self.current = Some(self.multi_progress.add(bar));
        self.label = label.to_owned();
    }

    /// Count one step of the current stage
    pub fn advance(&mut self, message: &str) {
        if let Some(ref bar) = self.current {
            bar.set_message(message.to_owned());
            bar.inc(1);
        }
    }

    /// Mark the current stage complete
    pub fn finish_stage(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.set_prefix(format!("✓ {}", self.label));
            bar.finish_with_message(String::new());
            self.stages_done += 1;
        }
    }

    /// Number of completed stages
    pub const fn stages_done(&self) -> usize {
        self.stages_done
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_stage();
        let _ = self.multi_progress.clear();
    }
}
