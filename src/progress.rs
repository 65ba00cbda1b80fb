//! Progress bar display for the template copy

use indicatif::{ProgressBar, ProgressStyle};

/// Longest path shown in the bar message before truncation
const MAX_MESSAGE_LEN: usize = 50;

/// Progress display for copying the template tree
pub struct CopyProgress {
    pb: ProgressBar,
}

impl CopyProgress {
    /// Create a new progress display with total file count
    pub fn new(total_files: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total_files);
        pb.set_style(style);
        Self { pb }
    }

    /// A progress display that renders nothing
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Record one copied file
    pub fn tick(&self, file_path: &str) {
        self.pb.set_message(truncate_path(file_path));
        self.pb.inc(1);
    }

    /// Finish and clear the message
    pub fn finish(&self) {
        self.pb.finish_with_message("done");
    }
}

/// Keep the tail of a long path for display, cutting on a char boundary
fn truncate_path(file_path: &str) -> String {
    if file_path.len() <= MAX_MESSAGE_LEN {
        return file_path.to_string();
    }
    let mut cut = file_path.len() - (MAX_MESSAGE_LEN - 3);
    while !file_path.is_char_boundary(cut) {
        cut += 1;
    }
    format!("...{}", &file_path[cut..])
}
