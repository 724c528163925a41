//! The fake HTTP request object handed to handlers under test.
//!
//! [`Request`] is a plain in-memory value: no socket, no stream, no router.
//! The [`mock`](crate::mock) module constructs one from overrides and an
//! optional multipart body; handler code reads it through the same accessors
//! a production request object would offer (headers, query parameters, form
//! fields, body bytes, route params).

mod parsing;

use parsing::contains_ignore_ascii_case;
pub use parsing::{DecodeError, url_decode};

use crate::constants::{
    HEADER_CONTENT_TYPE, MAX_FORM_FIELDS, MAX_HEADER_VALUE_LEN, MAX_TOTAL_HEADERS_SIZE,
    MIME_FORM_URLENCODED, MIME_MULTIPART_FORM,
};
use std::cell::OnceCell;
use std::collections::HashMap;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Method {
    /// HTTP GET method - retrieve a resource.
    Get,
    /// HTTP POST method - create a resource.
    Post,
    /// HTTP PUT method - replace a resource.
    Put,
    /// HTTP PATCH method - partially update a resource.
    Patch,
    /// HTTP DELETE method - remove a resource.
    Delete,
    /// HTTP HEAD method - retrieve headers only.
    Head,
    /// HTTP OPTIONS method - retrieve allowed methods.
    Options,
}

impl Method {
    /// Returns the method as an uppercase string (e.g., "GET", "POST").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-memory HTTP request.
///
/// Headers are stored in their original form with a lowercase index for
/// case-insensitive O(1) lookup. Query strings and urlencoded form bodies
/// are parsed lazily on first access and cached; handlers that never touch
/// them pay nothing.
#[non_exhaustive]
pub struct Request {
    method: Method,
    path: String,
    /// Original header pairs, for iteration.
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    /// Route params, filled in by the mock layer in place of a router.
    params: HashMap<String, String>,
    query_cache: OnceCell<HashMap<String, Vec<String>>>,
    form_cache: OnceCell<HashMap<String, Vec<String>>>,
    /// Lowercase header name -> indices into `headers`.
    header_index: HashMap<String, Vec<usize>>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Lazy caches and the header index are lookup plumbing; showing them
        // would make output vary with access patterns.
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &self.headers.len())
            .field("body", &self.body.as_ref().map(std::vec::Vec::len))
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Request {
    /// Create a request from raw components.
    ///
    /// Usually called through [`mock::fake_request`](crate::mock::fake_request)
    /// rather than directly.
    #[must_use]
    pub fn new(
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
        params: HashMap<String, String>,
    ) -> Self {
        let mut header_index: HashMap<String, Vec<usize>> = HashMap::with_capacity(headers.len());

        let mut total_size: usize = 0;
        let mut oversized = 0u32;
        for (i, (name, value)) in headers.iter().enumerate() {
            total_size = total_size.saturating_add(name.len().saturating_add(value.len()));
            if value.len() > MAX_HEADER_VALUE_LEN {
                oversized += 1;
            }
            header_index.entry(name.to_lowercase()).or_default().push(i);
        }

        if oversized > 0 {
            log::warn!(
                "{oversized} header value(s) exceed {MAX_HEADER_VALUE_LEN} bytes; \
                 production stacks would reject these"
            );
        }
        if total_size > MAX_TOTAL_HEADERS_SIZE {
            log::warn!(
                "total header size {total_size} bytes exceeds {MAX_TOTAL_HEADERS_SIZE} byte limit"
            );
        }

        Self {
            method,
            path,
            headers,
            body,
            params,
            query_cache: OnceCell::new(),
            form_cache: OnceCell::new(),
            header_index,
        }
    }

    /// HTTP method.
    #[inline]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Full request path including any query string.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path portion without the query string.
    #[inline]
    pub fn path_without_query(&self) -> &str {
        self.path.split('?').next().unwrap_or(&self.path)
    }

    /// A route parameter, as a router would have extracted it.
    ///
    /// The mock layer sets these directly via
    /// [`RequestOverrides::param`](crate::mock::RequestOverrides::param);
    /// no route matching happens.
    #[inline]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// First query parameter value for a key.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_cache()
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// First query parameter value, or a default when absent.
    pub fn query_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.query(name).unwrap_or(default)
    }

    /// All query parameter values for a key (`?tag=a&tag=b`).
    pub fn query_all(&self, name: &str) -> &[String] {
        self.query_cache().get(name).map_or(&[], Vec::as_slice)
    }

    /// First header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_indices(name)
            .and_then(|idx| idx.first())
            .and_then(|&i| self.headers.get(i))
            .map(|(_, v)| v.as_str())
    }

    /// All values for a header name, case-insensitively.
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.header_indices(name)
            .map(|idx| {
                idx.iter()
                    .filter_map(|&i| self.headers.get(i).map(|(_, v)| v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All headers in their original form.
    #[inline]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Raw body bytes, if a body was attached.
    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Body as UTF-8 text, if present and valid.
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// True when a non-empty body is attached.
    #[inline]
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Content-Type header value.
    #[inline]
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header(HEADER_CONTENT_TYPE)
    }

    /// True when the Content-Type is form-urlencoded (case-insensitive).
    #[inline]
    #[must_use]
    pub fn is_form(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| contains_ignore_ascii_case(ct, MIME_FORM_URLENCODED))
    }

    /// True when the Content-Type is multipart/form-data (case-insensitive).
    #[inline]
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| contains_ignore_ascii_case(ct, MIME_MULTIPART_FORM))
    }

    /// First form field value from a urlencoded body.
    #[must_use]
    pub fn form(&self, name: &str) -> Option<&str> {
        self.form_cache()
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// First form field value, or a default when absent.
    pub fn form_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.form(name).unwrap_or(default)
    }

    /// All form field values for a key from a urlencoded body.
    pub fn form_all(&self, name: &str) -> &[String] {
        self.form_cache().get(name).map_or(&[], Vec::as_slice)
    }

    // --- Private helpers ---

    fn header_indices(&self, name: &str) -> Option<&Vec<usize>> {
        // Avoid the lowercase allocation when the caller already passes a
        // lowercase name, which is the common case in handler code
        if name.bytes().all(|b| !b.is_ascii_uppercase()) {
            self.header_index.get(name)
        } else {
            self.header_index.get(&name.to_lowercase())
        }
    }

    fn query_cache(&self) -> &HashMap<String, Vec<String>> {
        self.query_cache.get_or_init(|| {
            let query = match self.path.split_once('?') {
                Some((_, q)) => q,
                None => return HashMap::new(),
            };
            let (map, dropped) = parse_pairs(query, usize::MAX);
            if dropped > 0 {
                log::warn!("dropped {dropped} query param(s) that failed percent-decoding");
            }
            map
        })
    }

    fn form_cache(&self) -> &HashMap<String, Vec<String>> {
        self.form_cache.get_or_init(|| {
            let Some(body) = self.text() else {
                return HashMap::new();
            };
            let (map, dropped) = parse_pairs(body, MAX_FORM_FIELDS);
            if dropped > 0 {
                log::warn!("dropped {dropped} form field(s) that failed percent-decoding");
            }
            if map.len() >= MAX_FORM_FIELDS {
                log::warn!("form field count reached the {MAX_FORM_FIELDS} field limit");
            }
            map
        })
    }
}

/// Parse `k=v&k2=v2` pairs with percent-decoding.
///
/// Returns the decoded map and the number of pairs dropped because decoding
/// failed. Keys without `=` become empty-valued entries.
fn parse_pairs(input: &str, max_fields: usize) -> (HashMap<String, Vec<String>>, u32) {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    let mut dropped = 0u32;

    for pair in input.split('&') {
        if map.len() >= max_fields {
            break;
        }
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None if pair.is_empty() => continue,
            None => (pair, ""),
        };
        match (url_decode(raw_key), url_decode(raw_value)) {
            (Ok(key), Ok(value)) => map.entry(key).or_default().push(value),
            _ => dropped += 1,
        }
    }

    (map, dropped)
}

#[cfg(test)]
mod tests;
