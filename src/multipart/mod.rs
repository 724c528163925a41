//! Multipart/form-data body construction.
//!
//! This module turns a nested parameter tree into the exact bytes of a
//! multipart/form-data payload, using a fixed boundary so the output is
//! reproducible across runs. Nesting follows the bracket convention web
//! frameworks decode on the other side:
//!
//! - `{a: {b: 1}}` serializes the field `a[b]` with value `1`
//! - `{a: [1, 2]}` serializes `a[]` twice, once per element
//! - a [`Value::File`] anywhere in the tree becomes a file part
//!
//! Sibling keys within a map are always emitted in lexicographic order, so
//! the body bytes depend only on the logical parameter set and never on
//! insertion order.
//!
//! # Example
//!
//! ```
//! use requestkit::multipart::{MultipartBody, Value};
//! use requestkit::params;
//!
//! let params = params! {
//!     "name" => "bob",
//!     "tags" => vec!["x", "y"],
//! };
//! let (body, content_type) = MultipartBody::new(&params).encode();
//! assert!(content_type.starts_with("multipart/form-data"));
//! assert!(body.ends_with(b"--"));
//! ```

use crate::constants::{MULTIPART_BOUNDARY, MULTIPART_CONTENT_TYPE, mime_type_for};
use std::collections::BTreeMap;
use std::path::Path;

/// A parameter value in the nested tree handed to [`MultipartBody::new`].
///
/// File content is carried as owned bytes: callers decide up front whether a
/// value is a field or a file, and any I/O needed to get the bytes happens
/// before the tree is built (see [`Value::file_from_path`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Value {
    /// A scalar field value.
    Text(String),
    /// An ordered list; each element serializes under `key[]`.
    List(Vec<Value>),
    /// A nested map; each entry serializes under `key[child]`.
    Map(BTreeMap<String, Value>),
    /// A file part with its reported filename and raw content.
    File {
        /// Filename reported in the part's Content-Disposition header,
        /// also used for MIME type lookup.
        filename: String,
        /// Raw file content, fully buffered.
        content: Vec<u8>,
    },
}

impl Value {
    /// A scalar field value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// A file part from an explicit filename and content.
    pub fn file(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::File {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// A file part read from disk.
    ///
    /// The path string (as given) becomes the reported filename. Read
    /// failures surface unmodified from [`std::fs::read`].
    pub fn file_from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        Ok(Self::File {
            filename: path.display().to_string(),
            content,
        })
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<Params> for Value {
    fn from(v: Params) -> Self {
        Self::Map(v.0)
    }
}

/// A nested parameter set, keyed by field name.
///
/// Backed by a [`BTreeMap`] so sibling keys iterate in lexicographic order;
/// that ordering is what makes [`MultipartBody::encode`] deterministic. Build
/// one with the [`params!`](crate::params) macro or [`Params::insert`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    /// An empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// True when no parameters are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build a [`Params`] set from `key => value` pairs.
///
/// Values are anything convertible into [`Value`]: strings, integers, `Vec`s
/// (lists), nested `params!` blocks (maps), or explicit [`Value::File`]s.
///
/// ```
/// use requestkit::params;
/// use requestkit::multipart::Value;
///
/// let p = params! {
///     "name" => "bob",
///     "tags" => vec!["x", "y"],
///     "profile" => params! { "age" => 42 },
///     "avatar" => Value::file("a.png", b"\x89PNG".to_vec()),
/// };
/// assert_eq!(p.len(), 4);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::multipart::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut p = $crate::multipart::Params::new();
        $( p.insert($key, $value); )+
        p
    }};
}

/// A single flattened part, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Field {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content: Vec<u8>,
    },
}

impl Part {
    /// Append this part's bytes (everything after the boundary line).
    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Field { name, value } => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                out.extend_from_slice(value.as_bytes());
                out.extend_from_slice(b"\r\n");
            },
            Self::File {
                name,
                filename,
                content,
            } => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(
                    format!("Content-Type: {}\r\n\r\n", mime_type_for(filename)).as_bytes(),
                );
                out.extend_from_slice(content);
                out.extend_from_slice(b"\r\n");
            },
        }
    }
}

/// A multipart/form-data body, flattened from a [`Params`] tree.
///
/// Construction flattens the tree into an ordered part list; [`encode`]
/// serializes it once. The intended lifecycle is build, encode, discard.
///
/// [`encode`]: MultipartBody::encode
#[derive(Debug, Clone)]
pub struct MultipartBody {
    parts: Vec<Part>,
}

impl MultipartBody {
    /// Flatten a parameter tree into an ordered part list.
    #[must_use]
    pub fn new(params: &Params) -> Self {
        let mut parts = Vec::new();
        for (key, value) in &params.0 {
            push_value(key.clone(), value, &mut parts);
        }
        Self { parts }
    }

    /// Number of parts the body will contain.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Serialize to body bytes and the matching Content-Type value.
    ///
    /// Each part is prefixed with `--<boundary>\r\n`; the body ends with the
    /// terminator `--<boundary>--` and no trailing CRLF. Encoding cannot
    /// fail: all content is already in memory.
    #[must_use]
    pub fn encode(&self) -> (Vec<u8>, &'static str) {
        let mut body = Vec::new();
        for part in &self.parts {
            body.extend_from_slice(b"--");
            body.extend_from_slice(MULTIPART_BOUNDARY.as_bytes());
            body.extend_from_slice(b"\r\n");
            part.write_to(&mut body);
        }
        body.extend_from_slice(b"--");
        body.extend_from_slice(MULTIPART_BOUNDARY.as_bytes());
        body.extend_from_slice(b"--");
        (body, MULTIPART_CONTENT_TYPE)
    }
}

/// Flatten one value under its already-prefixed key.
///
/// Map entries recurse as `key[child]` in key order; list elements recurse as
/// `key[]` in element order.
fn push_value(key: String, value: &Value, out: &mut Vec<Part>) {
    match value {
        Value::Text(text) => out.push(Part::Field {
            name: key,
            value: text.clone(),
        }),
        Value::File { filename, content } => out.push(Part::File {
            name: key,
            filename: filename.clone(),
            content: content.clone(),
        }),
        Value::Map(map) => {
            for (child, v) in map {
                push_value(format!("{key}[{child}]"), v, out);
            }
        },
        Value::List(items) => {
            for v in items {
                push_value(format!("{key}[]"), v, out);
            }
        },
    }
}
