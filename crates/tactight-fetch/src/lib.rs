//! STL generation requests with typed outcomes.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable response and outcome types
//! - [`core`] - Pure classification of HTTP responses
//! - [`effects`] - I/O behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Status-Driven**: outcomes are decided by status code and payload size, never by message text
//! - **Single Attempt**: no automatic retry; a rate limit carries a cooldown hint instead
//! - **Single Slot**: a successful generation replaces the session's held artifact

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{classify, error_message, filename_from_content_disposition};
pub use crate::data::{HttpResponse, RATE_LIMIT_COOLDOWN, RequestOutcome};
pub use crate::effects::{GENERATE_PATH, Generator, HttpClient, base_url};

#[cfg(feature = "reqwest")]
pub use crate::effects::{ClientSetting, ReqwestClient};

pub use crate::error::{Error, GenerateError, Result};
