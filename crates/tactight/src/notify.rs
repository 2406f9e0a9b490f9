//! User-facing notifications.

use std::fmt;
use std::sync::Mutex;

use console::{Term, style};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message:  String,
}

pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

/// Writes styled lines to stderr.
#[derive(Debug)]
pub struct ConsoleNotifier {
    term: Term,
}

impl Default for ConsoleNotifier {
    fn default() -> Self { Self::new() }
}

impl ConsoleNotifier {
    pub fn new() -> Self { Self { term: Term::stderr() } }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let tag = match severity {
            Severity::Info => style("info").cyan().bold(),
            Severity::Success => style("done").green().bold(),
            Severity::Warning => style("warn").yellow().bold(),
            Severity::Error => style("fail").red().bold(),
        };
        // Nothing sensible to do if stderr is gone.
        let _ = self.term.write_line(&format!("{tag:>6} {message}"));
    }
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    log: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self { Self::default() }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> { self.notifications().pop() }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push(Notification {
                severity,
                message: message.to_string(),
            });
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, severity: Severity, message: &str) { (**self).notify(severity, message) }
}
