use http::Method;
use url::Url;

use crate::SnippetError;

/// Ordered HTTP header multimap of a captured request.
///
/// Insertion order is preserved and a name may appear several times, so the
/// generated header fragments follow the original request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, String)>,
}

impl RequestHeaders {
    /// Creates a new empty `RequestHeaders` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, keeping any previous value for the same name.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Checks if the headers collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of header entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<N, V> FromIterator<(N, V)> for RequestHeaders
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { entries }
    }
}

/// A captured HTTP request: method, absolute URL, ordered headers and optional body.
///
/// Capturing the request (browser, proxy, HAR file, ...) is up to the caller;
/// this type only holds what the snippet generation needs.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use odata_snippet_core::CapturedRequest;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "https://graph.microsoft.com/v1.0/me/events?$top=5";
/// let request = CapturedRequest::new(Method::GET, url)?
///     .with_header("Prefer", "outlook.timezone=\"Pacific Standard Time\"");
///
/// assert_eq!(request.url().path(), "/v1.0/me/events");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    method: Method,
    url: Url,
    headers: RequestHeaders,
    body: Option<String>,
}

impl CapturedRequest {
    /// Captures a request with the given method and absolute URL.
    ///
    /// # Errors
    ///
    /// Fails with [`SnippetError::UrlError`] when the URL cannot be parsed.
    pub fn new(method: Method, url: &str) -> Result<Self, SnippetError> {
        let url = Url::parse(url)?;
        Ok(Self {
            method,
            url,
            headers: RequestHeaders::default(),
            body: None,
        })
    }

    /// Appends a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers = self.headers.add_header(name, value);
        self
    }

    /// Replaces all request headers.
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the raw request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The absolute request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request headers in capture order.
    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }

    /// The raw body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
