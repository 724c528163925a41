//! URL decoding and case-insensitive matching used by [`Request`](super::Request)
//! for query strings, form bodies, and header values.

use crate::constants::MAX_URL_DECODED_LEN;

/// Error returned when URL decoding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// Decoded output would exceed the maximum length.
    TooLong,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLong => write!(
                f,
                "url decoded output exceeds maximum length ({}KB limit)",
                MAX_URL_DECODED_LEN / 1024
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Case-insensitive ASCII substring check (no allocation).
#[inline]
pub(crate) fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    // windows(0) panics, and an empty needle is trivially contained
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

fn hex_pair(h1: u8, h2: u8) -> Option<u8> {
    let hi = (h1 as char).to_digit(16)?;
    let lo = (h2 as char).to_digit(16)?;
    #[allow(clippy::cast_possible_truncation)] // two hex digits always fit in u8
    Some((hi * 16 + lo) as u8)
}

/// Basic URL decoding (handles `%XX` sequences and `+` as space).
///
/// Invalid percent escapes are kept verbatim rather than rejected; real
/// clients produce them and dropping a whole field over one bad escape is
/// worse than passing the raw bytes through.
///
/// # Errors
///
/// Returns [`DecodeError::TooLong`] if decoded output would exceed
/// [`MAX_URL_DECODED_LEN`], which guards against maliciously inflated input.
///
/// # Examples
///
/// ```
/// use requestkit::url_decode;
///
/// assert_eq!(url_decode("hello%20world").unwrap(), "hello world");
/// assert_eq!(url_decode("hello+world").unwrap(), "hello world");
/// assert_eq!(url_decode("caf%C3%A9").unwrap(), "café");
/// ```
pub fn url_decode(s: &str) -> Result<String, DecodeError> {
    let mut out = Vec::with_capacity(s.len());
    let mut input = s.bytes();

    while let Some(b) = input.next() {
        if out.len() >= MAX_URL_DECODED_LEN {
            return Err(DecodeError::TooLong);
        }

        match b {
            b'%' => match (input.next(), input.next()) {
                (Some(h1), Some(h2)) => match hex_pair(h1, h2) {
                    Some(decoded) => out.push(decoded),
                    None => out.extend_from_slice(&[b'%', h1, h2]),
                },
                (h1, _) => {
                    // Truncated escape at end of input, keep as-is
                    out.push(b'%');
                    out.extend(h1);
                },
            },
            b'+' => out.push(b' '),
            _ => out.push(b),
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_percent_and_plus() {
        assert_eq!(url_decode("hello%20world").unwrap(), "hello world");
        assert_eq!(url_decode("hello+world").unwrap(), "hello world");
        assert_eq!(url_decode("a%2Fb").unwrap(), "a/b");
        assert_eq!(url_decode("plain").unwrap(), "plain");
    }

    #[test]
    fn decodes_multibyte_utf8() {
        assert_eq!(url_decode("caf%C3%A9").unwrap(), "café");
        assert_eq!(url_decode("%E4%B8%AD%E6%96%87").unwrap(), "中文");
    }

    #[test]
    fn decodes_one_level_only() {
        assert_eq!(url_decode("%2520").unwrap(), "%20");
    }

    #[test]
    fn keeps_invalid_escapes_verbatim() {
        assert_eq!(url_decode("100%ZZ").unwrap(), "100%ZZ");
        assert_eq!(url_decode("trailing%").unwrap(), "trailing%");
        assert_eq!(url_decode("trailing%A").unwrap(), "trailing%A");
    }

    #[test]
    fn rejects_oversized_output() {
        let big = "a".repeat(MAX_URL_DECODED_LEN + 1);
        assert_eq!(url_decode(&big), Err(DecodeError::TooLong));
    }

    #[test]
    fn case_insensitive_contains() {
        assert!(contains_ignore_ascii_case("Multipart/Form-Data; x", "multipart/form-data"));
        assert!(contains_ignore_ascii_case("anything", ""));
        assert!(!contains_ignore_ascii_case("short", "much longer needle"));
    }
}
