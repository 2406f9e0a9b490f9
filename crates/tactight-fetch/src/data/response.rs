use bytes::Bytes;

/// A fully buffered HTTP response.
///
/// Only what classification needs is kept: the status, the optional
/// `Content-Disposition` header and the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status:              u16,
    pub content_disposition: Option<String>,
    pub body:                Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_disposition: None,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn content_disposition(mut self, value: impl Into<String>) -> Self {
        self.content_disposition = Some(value.into());
        self
    }

    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}
