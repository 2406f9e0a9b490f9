//! Immutable types exchanged between the HTTP layer and callers.

pub mod outcome;
pub mod response;

pub use outcome::{RATE_LIMIT_COOLDOWN, RequestOutcome};
pub use response::HttpResponse;
