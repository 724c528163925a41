//! Fake request construction and direct dispatch.
//!
//! Everything here is orchestration: build a [`Request`] from overrides (and
//! optionally a multipart body), then hand it straight to a handler. No
//! socket is opened and no route matching happens; route params are whatever
//! the overrides say they are.
//!
//! # Example
//!
//! ```
//! use requestkit::mock::{self, RequestOverrides};
//! use requestkit::params;
//! use requestkit::{Request, Response};
//!
//! let mut create_widget = |req: &Request| {
//!     assert_eq!(req.method().as_str(), "POST");
//!     Response::status_only(201)
//! };
//!
//! let response = mock::dispatch_multipart_to(
//!     &mut create_widget,
//!     &params! { "name" => "sprocket" },
//!     RequestOverrides::new().path("/widgets"),
//! );
//! assert_eq!(response.status(), 201);
//! ```

use crate::constants::{HEADER_CONTENT_LENGTH_TITLE, HEADER_CONTENT_TYPE_TITLE};
use crate::multipart::{MultipartBody, Params};
use crate::request::{Method, Request};
use crate::response::Response;
use std::collections::HashMap;

/// Builder for the pieces of a fake request a test wants to control.
///
/// Unspecified fields fall back to a GET request for `/` with no headers, no
/// route params, and no body.
#[derive(Debug, Clone, Default)]
#[must_use = "overrides do nothing until turned into a request"]
#[non_exhaustive]
pub struct RequestOverrides {
    method: Option<Method>,
    path: Option<String>,
    headers: Vec<(String, String)>,
    params: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestOverrides {
    /// Start with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the request path (may include a query string).
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a header.
    ///
    /// # Panics
    ///
    /// Panics if the value contains CR or LF, which would corrupt any
    /// serialized form of the request (header injection).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        assert!(
            !value.contains('\r') && !value.contains('\n'),
            "header value must not contain CR or LF characters"
        );
        self.headers.push((name.into(), value));
        self
    }

    /// Set a route param, standing in for what a router would extract.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Attach a raw body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replace any existing value for a header, or add it.
    fn set_header(&mut self, name: &str, value: String) {
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    fn into_request(self, default_method: Method) -> Request {
        Request::new(
            self.method.unwrap_or(default_method),
            self.path.unwrap_or_else(|| "/".to_string()),
            self.headers,
            self.body,
            self.params,
        )
    }
}

/// A handler a fake request can be dispatched to.
///
/// Implemented for every `FnMut(&Request) -> Response` closure, and meant to
/// be implemented by controller-like structs whose state tests may want to
/// prepare first (see [`dispatch_multipart_to_with`]).
pub trait Handler {
    /// Handle one request.
    fn handle(&mut self, req: &Request) -> Response;
}

impl<F> Handler for F
where
    F: FnMut(&Request) -> Response,
{
    fn handle(&mut self, req: &Request) -> Response {
        self(req)
    }
}

/// Build a plain fake request from overrides alone.
///
/// Defaults to `GET /`.
#[must_use]
pub fn fake_request(overrides: RequestOverrides) -> Request {
    overrides.into_request(Method::Get)
}

/// Build a fake request carrying the given params as a multipart body.
///
/// With empty params this is exactly [`fake_request`]. Otherwise the params
/// are serialized once, the matching `Content-Type` and `Content-Length`
/// headers are merged into the overrides (replacing any caller-supplied
/// values), the body is attached, and the method defaults to POST.
#[must_use]
pub fn multipart_fake_request(overrides: RequestOverrides, params: &Params) -> Request {
    if params.is_empty() {
        return fake_request(overrides);
    }

    let (body, content_type) = MultipartBody::new(params).encode();
    let mut overrides = overrides;
    overrides.set_header(HEADER_CONTENT_TYPE_TITLE, content_type.to_string());
    overrides.set_header(HEADER_CONTENT_LENGTH_TITLE, body.len().to_string());
    overrides.body = Some(body);
    overrides.into_request(Method::Post)
}

/// A multipart POST request to `path`.
#[must_use]
pub fn multipart_post(path: &str, params: &Params, overrides: RequestOverrides) -> Request {
    multipart_fake_request(overrides.method(Method::Post).path(path), params)
}

/// A multipart PUT request to `path`.
#[must_use]
pub fn multipart_put(path: &str, params: &Params, overrides: RequestOverrides) -> Request {
    multipart_fake_request(overrides.method(Method::Put).path(path), params)
}

/// Dispatch a request directly to a handler and return its response.
pub fn dispatch_request<H: Handler>(req: &Request, handler: &mut H) -> Response {
    handler.handle(req)
}

/// Build a multipart request from params and overrides, then dispatch it.
pub fn dispatch_multipart_to<H: Handler>(
    handler: &mut H,
    params: &Params,
    overrides: RequestOverrides,
) -> Response {
    let req = multipart_fake_request(overrides, params);
    dispatch_request(&req, handler)
}

/// Like [`dispatch_multipart_to`], but runs `setup` against the handler
/// first, mirroring test flows that stub or prime controller state before
/// the action runs.
pub fn dispatch_multipart_to_with<H: Handler>(
    handler: &mut H,
    params: &Params,
    overrides: RequestOverrides,
    setup: impl FnOnce(&mut H),
) -> Response {
    setup(handler);
    dispatch_multipart_to(handler, params, overrides)
}

#[cfg(test)]
mod tests;
