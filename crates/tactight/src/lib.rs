//! TacTight strap generation client.
//!
//! # Architecture
//!
//! - `config.rs` - Layered configuration (defaults, TOML file, environment)
//! - `workflow.rs` - Generate, download and download-kit flow
//! - `notify.rs` - User-facing notifications
//! - `ui/` - Busy indicator
//! - `cli.rs` - Command-line front end
//!
//! The calibration model, the generation request, kit assembly and download
//! placement live in the `tactight-core`, `tactight-fetch`,
//! `tactight-archive` and `tactight-fs` crates.

pub mod cli;
pub mod config;
mod error;
pub mod notify;
pub mod ui;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use notify::{ConsoleNotifier, Notification, Notifier, RecordingNotifier, Severity};
pub use ui::{BusyGuard, BusyIndicator};
pub use workflow::Workflow;
