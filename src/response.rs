//! The response value handlers return to the dispatcher.

use crate::constants::status_title;

/// An in-memory HTTP response produced by a handler under test.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Create a response from raw components.
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A 200 response with the given body and no headers.
    #[must_use]
    pub fn ok(body: Vec<u8>) -> Self {
        Self::new(200, Vec::new(), body)
    }

    /// A bodyless response with the given status.
    #[must_use]
    pub fn status_only(status: u16) -> Self {
        Self::new(status, Vec::new(), Vec::new())
    }

    /// HTTP status code.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Standard title for the status code ("OK", "Not Found", ...).
    #[inline]
    #[must_use]
    pub const fn status_title(&self) -> &'static str {
        status_title(self.status)
    }

    /// Response body bytes.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text, if valid.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Response headers as (name, value) pairs.
    #[inline]
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value by name, case-insensitively.
    ///
    /// Responses carry few headers, so this is a linear scan rather than the
    /// indexed lookup requests use.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// True for 4xx statuses.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// True for 5xx statuses.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}
