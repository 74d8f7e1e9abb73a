//! Content transcoders for the two RFC 2047 sub-encodings.
//!
//! Q encoding is the restricted quoted-printable variant of RFC 2047 §4.2;
//! Base64 is the standard alphabet without line wrapping (folding is a
//! separate stage of the encode pipeline).

use crate::error::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use encoding_rs::Encoding;
use std::fmt::Write as _;

/// Content encoding tag of an encoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// Tag not recognized. Legal at runtime, rejected as encoder input.
    Unknown,
    /// Q encoding (`?Q?`), quoted-printable-like.
    QEncoding,
    /// Base64 (`?B?`).
    Base64,
}

impl ContentEncoding {
    /// Classifies a tag byte, case-insensitively.
    pub(crate) const fn from_tag(tag: u8) -> Self {
        match tag {
            b'Q' | b'q' => Self::QEncoding,
            b'B' | b'b' => Self::Base64,
            _ => Self::Unknown,
        }
    }
}

/// ASCII characters that Q encoding must always hex-escape, even though
/// they fall inside the printable range.
const SPECIAL_CHARS: &[u8] = b"()<>@,;:/[]?.=\t";

/// Decodes a Q-encoded payload.
///
/// Underscores become spaces first, unconditionally. Then every `=` followed
/// by two hex digits is replaced by the charset's single-byte decoding of
/// that byte value. An `=` followed by two alphanumeric characters that do
/// not parse as hex is dropped entirely; an `=` followed by anything else is
/// left as a literal.
pub(crate) fn q_decode(payload: &str, charset: &'static Encoding) -> String {
    let unescaped = payload.replace('_', " ");
    let bytes = unescaped.as_bytes();
    let mut out = String::with_capacity(unescaped.len());
    let mut lit_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'='
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_alphanumeric()
            && bytes[i + 2].is_ascii_alphanumeric()
        {
            out.push_str(&unescaped[lit_start..i]);
            if let Ok(byte) = u8::from_str_radix(&unescaped[i + 1..i + 3], 16) {
                let buf = [byte];
                let (text, _) = charset.decode_without_bom_handling(&buf);
                out.push_str(&text);
            }
            i += 3;
            lit_start = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&unescaped[lit_start..]);
    out
}

/// Q-encodes text under a single-byte charset.
///
/// Printable ASCII bytes outside [`SPECIAL_CHARS`] pass through; everything
/// else becomes `=XX` with uppercase hex. Spaces are swapped for `_` after
/// the escaping pass, so a literal `_` in the source is emitted unescaped.
pub(crate) fn q_encode(text: &str, charset: &'static Encoding) -> String {
    let (bytes, _, _) = charset.encode(text);
    let mut out = String::with_capacity(bytes.len());
    for &byte in bytes.iter() {
        if byte <= 0x7F && !SPECIAL_CHARS.contains(&byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "={byte:02X}");
        }
    }
    out.replace(' ', "_")
}

/// Decodes a Base64 payload, then interprets the bytes under the charset.
///
/// # Errors
///
/// Returns an error if the payload is not valid Base64.
pub(crate) fn base64_decode(payload: &str, charset: &'static Encoding) -> Result<String> {
    let bytes = STANDARD.decode(payload)?;
    let (text, _) = charset.decode_without_bom_handling(&bytes);
    Ok(text.into_owned())
}

/// Charset-encodes text and emits it as a single unwrapped Base64 string.
pub(crate) fn base64_encode(text: &str, charset: &'static Encoding) -> String {
    let (bytes, _, _) = charset.encode(text);
    STANDARD.encode(bytes)
}
