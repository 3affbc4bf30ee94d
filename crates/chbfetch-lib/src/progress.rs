use crate::manifest::Class;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const OVERALL_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)";
const TRANSFER_TEMPLATE: &str =
    "  {spinner:.blue} {wide_msg} [{bar:30.white/dim}] {bytes}/{total_bytes} {bytes_per_sec}";
const UNSIZED_TRANSFER_TEMPLATE: &str = "  {spinner:.blue} {wide_msg} {bytes} {bytes_per_sec}";

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}

/// Overall bar over the manifest plus one transient byte counter per file.
pub struct BatchProgress {
    multi: MultiProgress,
    overall: ProgressBar,
}

impl BatchProgress {
    pub fn new(total_entries: usize, class: Class, enabled: bool) -> Self {
        let multi = if enabled {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };
        let overall = multi.add(ProgressBar::new(total_entries as u64));
        overall.set_style(style(OVERALL_TEMPLATE));
        overall.set_message(format!("Downloading {class}"));

        Self { multi, overall }
    }

    pub fn file_bar(&self, file_name: &str) -> ProgressBar {
        let bar = self
            .multi
            .insert_before(&self.overall, ProgressBar::no_length());
        bar.set_style(style(UNSIZED_TRANSFER_TEMPLATE));
        bar.set_message(format!("📥 {file_name}"));
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    pub fn advance(&self) {
        self.overall.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.overall.position()
    }

    /// Runs `f` with the bars hidden so log lines do not tear the display.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi.suspend(f)
    }

    pub fn finish(&self) {
        self.overall.finish_and_clear();
    }
}

/// Switches a transfer bar to a sized bar once the content length is known.
pub fn set_transfer_length(bar: &ProgressBar, length: u64) {
    bar.set_length(length);
    bar.set_style(style(TRANSFER_TEMPLATE));
}
