//! Pure transformations from HTTP responses to request outcomes.
//!
//! Nothing here performs I/O; the effects layer hands buffered responses in.

mod classify;
mod disposition;
mod error_body;

pub use classify::classify;
pub use disposition::filename_from_content_disposition;
pub use error_body::error_message;
