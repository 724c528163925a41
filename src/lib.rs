// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
// Pedantic lints - allow stylistic ones that don't affect correctness
#![allow(clippy::doc_markdown)] // Code in docs - extensive changes needed
#![allow(clippy::must_use_candidate)] // Not all returned values need must_use
#![allow(clippy::return_self_not_must_use)] // Builder pattern returns Self by design
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::match_same_arms)] // Intentional for clarity
#![allow(clippy::items_after_statements)] // Const in functions for locality

//! requestkit - Test-support toolkit for HTTP handler code
//!
//! # Overview
//!
//! requestkit builds fake HTTP requests - including full multipart/form-data
//! bodies - and dispatches them directly to handler functions, with no socket
//! and no router in between. It also ships a small argument parser that
//! supports both GNU-style permutation and POSIX-strict ordering, selected by
//! the `POSIXLY_CORRECT` environment variable.
//!
//! # Quick Start
//!
//! ```
//! use requestkit::mock::{self, RequestOverrides};
//! use requestkit::params;
//! use requestkit::{Request, Response};
//!
//! let params = params! {
//!     "name" => "bob",
//!     "tags" => vec!["x", "y"],
//! };
//!
//! let mut handler = |req: &Request| {
//!     assert!(req.is_multipart());
//!     Response::ok(b"created".to_vec())
//! };
//!
//! let response = mock::dispatch_multipart_to(
//!     &mut handler,
//!     &params,
//!     RequestOverrides::new().path("/widgets"),
//! );
//! assert!(response.is_success());
//! ```
//!
//! # Uploading Files
//!
//! Put a [`multipart::Value::File`] in the params to simulate a file upload:
//!
//! ```
//! use requestkit::multipart::{MultipartBody, Value};
//! use requestkit::params;
//!
//! let params = params! {
//!     "upload" => Value::file("a.png", vec![0x89, 0x50, 0x4e, 0x47]),
//! };
//! let (body, content_type) = MultipartBody::new(&params).encode();
//! assert!(content_type.starts_with("multipart/form-data"));
//! ```
//!
//! # Argument Parsing
//!
//! ```
//! use requestkit::args::ArgParser;
//!
//! let parser = ArgParser::new().flag("-v").flag("-x").strict_order(false);
//! let argv = vec!["-v".to_string(), "file1".into(), "-x".into(), "file2".into()];
//! let (matches, rest) = parser.parse(&argv).unwrap();
//! assert!(matches.is_present("-v"));
//! assert_eq!(rest, ["file1", "file2"]);
//! ```

pub mod args;
pub mod constants;
pub mod mock;
pub mod multipart;
mod request;
mod response;

pub use request::{DecodeError, Method, Request, url_decode};
pub use response::Response;

/// Convenience re-exports for test code.
///
/// ```
/// use requestkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::args::ArgParser;
    pub use crate::mock::{
        self, Handler, RequestOverrides, dispatch_multipart_to, dispatch_request, fake_request,
        multipart_fake_request, multipart_post, multipart_put,
    };
    pub use crate::multipart::{MultipartBody, Params, Value};
    pub use crate::params;
    pub use crate::request::{DecodeError, Method, Request};
    pub use crate::response::Response;
}
