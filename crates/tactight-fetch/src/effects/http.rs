use std::future::Future;

use url::Url;

use crate::data::HttpResponse;

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface the generator and the archive
/// assembler need: a GET returning a fully buffered response.
///
/// # Contract
///
/// - Every response, whatever its status, is `Ok`.
/// - `Err` means no response was received (DNS, connect, read failures).
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET for `url` with the given extra headers.
    fn get(
        &self,
        url: &Url,
        headers: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use reqwest::{Client, Proxy, header::CONTENT_DISPOSITION};
    use tracing::debug;
    use url::Url;

    use super::HttpClient;
    use crate::data::HttpResponse;
    use crate::error::{Error, Result};

    /// Settings used to build the underlying `reqwest::Client`.
    #[derive(Clone, Debug, Default)]
    pub struct ClientSetting {
        pub proxies: Option<Vec<Url>>,
        /// Caller-imposed limit on a whole request, body included.
        pub timeout: Option<Duration>,
    }

    impl ClientSetting {
        pub fn build(self) -> Result<Client> {
            let mut cb = Client::builder();

            if let Some(proxies) = self.proxies {
                let (secure, insecure): (Vec<Url>, Vec<Url>) =
                    proxies.into_iter().partition(|u| u.scheme() == "https");

                for u in secure {
                    cb = cb.proxy(Proxy::https(u.as_str()).map_err(|e| Error::ClientBuild(e.to_string()))?);
                }

                for u in insecure {
                    cb = cb.proxy(Proxy::http(u.as_str()).map_err(|e| Error::ClientBuild(e.to_string()))?);
                }
            }

            if let Some(timeout) = self.timeout {
                cb = cb.timeout(timeout);
            }

            cb.build().map_err(|e| Error::ClientBuild(e.to_string()))
        }
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone, Debug)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self> { Self::with_setting(ClientSetting::default()) }

        pub fn with_setting(setting: ClientSetting) -> Result<Self> {
            Ok(Self {
                client: setting.build()?,
            })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &Url, headers: &[(String, String)]) -> std::result::Result<HttpResponse, Self::Error> {
            let mut request = self.client.get(url.as_str());

            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let content_disposition = response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = response.bytes().await?;

            debug!(%url, status, size = body.len(), "response received");

            Ok(HttpResponse {
                status,
                content_disposition,
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSetting, ReqwestClient};
