//! I/O operations: the HTTP client seam and the generation orchestrator.

mod generator;
mod http;

pub use generator::{GENERATE_PATH, Generator, base_url};
pub use http::HttpClient;

#[cfg(feature = "reqwest")]
pub use http::{ClientSetting, ReqwestClient};
