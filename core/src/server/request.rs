//! Read-only view of an accepted request.

/// What the encoder needs from the host's request type.
pub trait Request {
    /// Request target, including the query string.
    fn url(&self) -> &str;
    /// Header value by case-insensitive name.
    fn header(&self, name: &str) -> Option<&str>;
}

impl<R: Request + ?Sized> Request for &R {
    fn url(&self) -> &str {
        (**self).url()
    }
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

/// Owned request value for hosts without their own request type, and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    url: String,
    headers: Vec<(String, String)>,
}

impl IncomingRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), headers: Vec::new() }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl Request for IncomingRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
