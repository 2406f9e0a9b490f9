use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const TICK_INTERVAL: Duration = Duration::from_millis(100);

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Busy state shown while a request or kit assembly is in flight.
///
/// Clones share the same state, which stays busy while any guard is held.
#[derive(Clone, Debug)]
pub struct BusyIndicator {
    active: Arc<AtomicUsize>,
    hidden: bool,
}

impl Default for BusyIndicator {
    fn default() -> Self { Self::new() }
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            hidden: false,
        }
    }

    /// Tracks state without drawing anything.
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::new()
        }
    }

    pub fn is_busy(&self) -> bool { self.active.load(Ordering::SeqCst) > 0 }

    /// Show the spinner until the returned guard is dropped.
    #[must_use = "the busy state ends when the guard is dropped"]
    pub fn start(&self, prefix: &str, message: &str) -> BusyGuard {
        let pb = if self.hidden {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            let pb = match SPINNER_TEMPLATE.as_ref() {
                Some(style) => pb.with_style(style.clone()),
                None => pb,
            };
            pb.enable_steady_tick(TICK_INTERVAL);
            pb
        };
        pb.set_prefix(prefix.to_string());
        pb.set_message(message.to_string());

        self.active.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            pb,
            active: Arc::clone(&self.active),
        }
    }
}

pub struct BusyGuard {
    pb:     ProgressBar,
    active: Arc<AtomicUsize>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
