//! Progress indicators for network calls.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a spinner with `msg`, or a hidden one in quiet mode
pub fn spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Stop a spinner, leaving nothing behind
pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

/// Run `f` under a spinner, clearing it afterwards
pub fn with_spinner<T>(msg: &str, quiet: bool, f: impl FnOnce() -> T) -> T {
    let pb = spinner(msg, quiet);
    let result = f();
    finish_clear(&pb);
    result
}
