//! Centralized constants for the requestkit crate.
//!
//! Wire-format literals, header names, parsing limits, and lookup tables are
//! defined here so every module agrees on them.

// ============================================================================
// MULTIPART WIRE FORMAT
// ============================================================================

/// Boundary token separating parts in a multipart body.
///
/// This is a fixed literal rather than a random token: test assertions and
/// recorded fixtures depend on byte-for-byte reproducible bodies.
pub const MULTIPART_BOUNDARY: &str = "----------0xKhTmLbOuNdArY";

/// Content-Type header value announcing the fixed boundary.
///
/// Uses the comma separator form; the decoders this crate targets accept it
/// interchangeably with the semicolon form.
pub const MULTIPART_CONTENT_TYPE: &str =
    "multipart/form-data, boundary=----------0xKhTmLbOuNdArY";

// ============================================================================
// HTTP REQUEST LIMITS
// ============================================================================

/// Maximum decoded URL length (64KB).
/// Prevents memory exhaustion from extremely long encoded values.
pub const MAX_URL_DECODED_LEN: usize = 65536;

/// Maximum number of form fields parsed from a urlencoded body.
pub const MAX_FORM_FIELDS: usize = 1000;

/// Maximum individual header value length (8KB).
pub const MAX_HEADER_VALUE_LEN: usize = 8192;

/// Maximum total size of all headers combined (1MB).
pub const MAX_TOTAL_HEADERS_SIZE: usize = 1024 * 1024;

// ============================================================================
// COMMON HEADER NAMES
// ============================================================================

/// Content-Type header name (lowercase for lookups).
pub const HEADER_CONTENT_TYPE: &str = "content-type";

/// Content-Type header name (title-case for setting headers).
pub const HEADER_CONTENT_TYPE_TITLE: &str = "Content-Type";

/// Content-Length header name (title-case for setting headers).
pub const HEADER_CONTENT_LENGTH_TITLE: &str = "Content-Length";

// ============================================================================
// COMMON MIME TYPES
// ============================================================================

/// Form URL-encoded MIME type.
pub const MIME_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Multipart form-data MIME type (without boundary parameter).
pub const MIME_MULTIPART_FORM: &str = "multipart/form-data";

/// Fallback MIME type for unknown file extensions.
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

// ============================================================================
// ENVIRONMENT VARIABLES
// ============================================================================

/// When present in the environment (any value, including empty), argument
/// parsing stops consuming switches at the first positional argument.
pub const ENV_POSIXLY_CORRECT: &str = "POSIXLY_CORRECT";

/// Returns a best-guess MIME type for a filename, keyed on its extension.
///
/// The extension match is case-insensitive. Unknown or missing extensions
/// fall back to [`MIME_OCTET_STREAM`].
///
/// # Examples
///
/// ```
/// use requestkit::constants::mime_type_for;
///
/// assert_eq!(mime_type_for("a.png"), "image/png");
/// assert_eq!(mime_type_for("report.PDF"), "application/pdf");
/// assert_eq!(mime_type_for("noext"), "application/octet-stream");
/// ```
#[must_use]
pub fn mime_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();

    // Longest extension in the table is 4 chars; avoids allocating for
    // case-insensitive comparison of arbitrary input.
    let mut buf = [0u8; 4];
    if ext.is_empty() || ext.len() > buf.len() {
        return MIME_OCTET_STREAM;
    }
    for (dst, src) in buf.iter_mut().zip(ext.bytes()) {
        *dst = src.to_ascii_lowercase();
    }
    let ext = &buf[..ext.len()];

    match ext {
        b"png" => "image/png",
        b"jpg" | b"jpeg" => "image/jpeg",
        b"gif" => "image/gif",
        b"svg" => "image/svg+xml",
        b"webp" => "image/webp",
        b"ico" => "image/x-icon",
        b"txt" => "text/plain",
        b"html" | b"htm" => "text/html",
        b"css" => "text/css",
        b"csv" => "text/csv",
        b"md" => "text/markdown",
        b"js" => "text/javascript",
        b"json" => "application/json",
        b"xml" => "application/xml",
        b"pdf" => "application/pdf",
        b"zip" => "application/zip",
        b"gz" => "application/gzip",
        b"mp3" => "audio/mpeg",
        b"mp4" => "video/mp4",
        _ => MIME_OCTET_STREAM,
    }
}

/// Returns the standard title for an HTTP status code.
///
/// # Examples
///
/// ```
/// use requestkit::constants::status_title;
///
/// assert_eq!(status_title(200), "OK");
/// assert_eq!(status_title(404), "Not Found");
/// assert_eq!(status_title(999), "Error"); // Unknown codes
/// ```
#[inline]
#[must_use]
pub const fn status_title(code: u16) -> &'static str {
    match code {
        // 2xx Success
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        // 3xx Redirection
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        // 4xx Client Errors
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        413 => "Payload Too Large",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        // 5xx Server Errors
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        // Fallback for unknown codes
        _ => "Error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_lookup_by_extension() {
        assert_eq!(mime_type_for("a.png"), "image/png");
        assert_eq!(mime_type_for("photo.JPEG"), "image/jpeg");
        assert_eq!(mime_type_for("notes.txt"), "text/plain");
        assert_eq!(mime_type_for("data.json"), "application/json");
    }

    #[test]
    fn mime_lookup_unknown_falls_back() {
        assert_eq!(mime_type_for("archive.tar.xyz"), MIME_OCTET_STREAM);
        assert_eq!(mime_type_for("noext"), MIME_OCTET_STREAM);
        assert_eq!(mime_type_for(""), MIME_OCTET_STREAM);
        assert_eq!(mime_type_for("weird.reallylongext"), MIME_OCTET_STREAM);
    }

    #[test]
    fn mime_lookup_uses_last_extension() {
        assert_eq!(mime_type_for("bundle.tar.gz"), "application/gzip");
    }

    #[test]
    fn boundary_appears_in_content_type() {
        assert!(MULTIPART_CONTENT_TYPE.ends_with(MULTIPART_BOUNDARY));
    }

    #[test]
    fn status_titles() {
        assert_eq!(status_title(204), "No Content");
        assert_eq!(status_title(503), "Service Unavailable");
        assert_eq!(status_title(777), "Error");
    }
}
