//! Encode pipeline: input validation, transcoding, and line folding into
//! one or more encoded-word envelopes.

use crate::charset;
use crate::error::{Error, Result};
use crate::transcode::{self, ContentEncoding};
use std::fmt::Write as _;

/// Maximum length of one encoded-word line (RFC 2047 §2).
const MAX_LINE_LENGTH: usize = 75;

/// Encodes text as one or more RFC 2047 encoded words.
///
/// Output that would exceed the 75-character line limit is split into
/// multiple envelopes joined by `CRLF SPACE`; a folded result also ends
/// with that separator.
///
/// # Errors
///
/// Returns an error for [`ContentEncoding::Unknown`], for a charset name
/// not in the catalog, or for Q encoding combined with a charset that is
/// not single-byte. Empty input returns empty output with no validation.
pub fn encode(text: &str, encoding: ContentEncoding, charset: &str) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }
    let codec = charset::require(charset)?;
    let (tag, payload) = match encoding {
        ContentEncoding::Unknown => return Err(Error::UnknownEncoding),
        ContentEncoding::QEncoding => {
            if !codec.is_single_byte() {
                return Err(Error::MultiByteCharset(charset.to_string()));
            }
            ('Q', transcode::q_encode(text, codec))
        }
        ContentEncoding::Base64 => ('B', transcode::base64_encode(text, codec)),
    };
    Ok(fold(charset, tag, &payload))
}

/// Wraps a transcoded payload in envelopes of at most [`MAX_LINE_LENGTH`]
/// characters each.
fn fold(charset: &str, tag: char, payload: &str) -> String {
    // Length of the envelope around an empty payload: "=?charset?T??=".
    let wrapper_len = charset.len() + 7;
    let chunk_len = MAX_LINE_LENGTH.saturating_sub(wrapper_len);
    if chunk_len == 0 || payload.len() <= chunk_len {
        return format!("=?{charset}?{tag}?{payload}?=");
    }
    let chars: Vec<char> = payload.chars().collect();
    let mut out = String::new();
    for chunk in chars.chunks(chunk_len) {
        let chunk: String = chunk.iter().collect();
        let _ = write!(out, "=?{charset}?{tag}?{chunk}?=\r\n ");
    }
    out
}
