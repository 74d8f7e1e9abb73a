//! Decode pipeline: separator unfolding, encoded-word tokenization, and
//! in-place substitution of each token's decoded text.
//!
//! The grammar is `=?charset?tag?payload?=` with non-greedy fields: the
//! charset ends at the nearest `?` from which the rest of the grammar still
//! matches, and the payload ends at the nearest `?=` terminator. Matching
//! runs across line boundaries. Anything that does not match passes through
//! unchanged.

use crate::charset;
use crate::error::Result;
use crate::transcode::{self, ContentEncoding};

/// One parsed encoded word, borrowed from the surrounding text.
///
/// The charset is raw and unvalidated; resolution happens at decode time.
struct EncodedWord<'a> {
    charset: &'a str,
    encoding: ContentEncoding,
    payload: &'a str,
}

/// Soft line break emitted between adjacent folded encoded words.
const SOFT_BREAK: &str = "?=\r\n =?";

/// Splices folded adjacent encoded words back together.
///
/// Only the exact `?=` CRLF SPACE `=?` sequence is recognized; no general
/// whitespace unfolding is performed.
fn unfold(text: &str) -> String {
    text.replace(SOFT_BREAK, "?==?")
}

/// Decodes every RFC 2047 encoded word found in the input.
///
/// Text outside encoded words is preserved byte-for-byte. Tokens with an
/// unknown charset decode under Latin-1; malformed Q escapes are dropped
/// from the token's output.
///
/// # Errors
///
/// Returns an error if a Base64 encoded word carries an invalid payload.
/// All other malformed input decodes to something rather than failing.
pub fn decode(encoded: &str) -> Result<String> {
    let unfolded = unfold(encoded);
    let mut out = String::with_capacity(unfolded.len());
    let mut rest = unfolded.as_str();
    while let Some((start, word, end)) = find_word(rest) {
        out.push_str(&rest[..start]);
        out.push_str(&decode_word(&word)?);
        rest = &rest[end..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Decodes a single tokenized encoded word.
fn decode_word(word: &EncodedWord<'_>) -> Result<String> {
    let charset = charset::resolve(word.charset);
    match word.encoding {
        ContentEncoding::QEncoding => Ok(transcode::q_decode(word.payload, charset)),
        ContentEncoding::Base64 => transcode::base64_decode(word.payload, charset),
        // Unreachable through tokenization (the tag class admits only Q/B),
        // kept for the dispatch contract: the token is consumed and dropped.
        ContentEncoding::Unknown => Ok(String::new()),
    }
}

/// Finds the leftmost encoded word, returning its start, the parsed token,
/// and the offset just past its terminator.
fn find_word(input: &str) -> Option<(usize, EncodedWord<'_>, usize)> {
    let mut from = 0;
    while let Some(rel) = input[from..].find("=?") {
        let start = from + rel;
        if let Some((word, end)) = match_word_at(input, start) {
            return Some((start, word, end));
        }
        from = start + 1;
    }
    None
}

/// Attempts a grammar match anchored at `start` (which points at `=?`).
fn match_word_at(input: &str, start: usize) -> Option<(EncodedWord<'_>, usize)> {
    let bytes = input.as_bytes();
    // Candidate charset terminators, nearest `?` first. A rejected tag
    // extends the charset field past that `?`, as non-greedy backtracking
    // would.
    let mut q = start + 2;
    loop {
        q += bytes.get(q..)?.iter().position(|&b| b == b'?')?;
        let encoding = ContentEncoding::from_tag(*bytes.get(q + 1)?);
        if encoding != ContentEncoding::Unknown && bytes.get(q + 2) == Some(&b'?') {
            // Payload runs to the nearest `?=`; a lone `?` stays inside it.
            let mut k = q + 3;
            loop {
                k += bytes.get(k..)?.iter().position(|&b| b == b'?')?;
                if bytes.get(k + 1) == Some(&b'=') {
                    let word = EncodedWord {
                        charset: &input[start + 2..q],
                        encoding,
                        payload: &input[q + 3..k],
                    };
                    return Some((word, k + 2));
                }
                k += 1;
            }
        }
        q += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode("").unwrap(), "");
    }

    #[test]
    fn test_decode_plain_text_passes_through() {
        let text = "Subject: nothing encoded here? really =nothing";
        assert_eq!(decode(text).unwrap(), text);
    }

    #[test]
    fn test_decode_q_encoded_word() {
        assert_eq!(
            decode("=?iso-8859-1?Q?=A1Hola,_se=F1or!?=").unwrap(),
            "¡Hola, señor!"
        );
    }

    #[test]
    fn test_decode_unknown_charset_falls_back_to_latin1() {
        assert_eq!(
            decode("=?wrong-charset?Q?=A1Hola,_se=F1or!?=").unwrap(),
            "¡Hola, señor!"
        );
    }

    #[test]
    fn test_decode_base64_encoded_word() {
        assert_eq!(decode("=?utf-8?B?SMOpbGxv?=").unwrap(), "Héllo");
    }

    #[test]
    fn test_decode_lowercase_tags() {
        assert_eq!(decode("=?iso-8859-1?q?se=F1or?=").unwrap(), "señor");
        assert_eq!(decode("=?utf-8?b?SMOpbGxv?=").unwrap(), "Héllo");
    }

    #[test]
    fn test_decode_preserves_surrounding_text() {
        assert_eq!(
            decode("Re: =?iso-8859-1?Q?se=F1or?= Garcia").unwrap(),
            "Re: señor Garcia"
        );
    }

    #[test]
    fn test_decode_multiple_words() {
        assert_eq!(
            decode("=?iso-8859-1?Q?a?= and =?iso-8859-1?Q?b?=").unwrap(),
            "a and b"
        );
    }

    #[test]
    fn test_decode_unfolds_soft_break_between_words() {
        assert_eq!(
            decode("A=?iso-8859-1?Q?x?=\r\n =?iso-8859-1?Q?y?=B").unwrap(),
            "AxyB"
        );
    }

    #[test]
    fn test_decode_unrecognized_tag_is_a_non_match() {
        // `Z` is outside the tag class, so the token never matches the
        // grammar and passes through literally.
        let text = "=?iso-8859-1?Z?SGVsbG8=?=";
        assert_eq!(decode(text).unwrap(), text);
    }

    #[test]
    fn test_decode_word_drops_unknown_encoding() {
        // The dispatch path the tokenizer cannot reach: a token classified
        // Unknown is consumed and replaced with nothing.
        let word = EncodedWord {
            charset: "iso-8859-1",
            encoding: ContentEncoding::Unknown,
            payload: "SGVsbG8=",
        };
        assert_eq!(decode_word(&word).unwrap(), "");
    }

    #[test]
    fn test_decode_propagates_bad_base64() {
        assert!(decode("=?utf-8?B?not base64!?=").unwrap_err().to_string().contains("Base64"));
    }

    #[test]
    fn test_decode_payload_may_span_lines() {
        assert_eq!(
            decode("=?iso-8859-1?Q?a\r\nb?=").unwrap(),
            "a\r\nb"
        );
    }

    #[test]
    fn test_decode_payload_may_contain_lone_question_mark() {
        // A `?` not followed by `=` stays inside the payload, as with a
        // non-greedy `(.*?)\?=`.
        assert_eq!(decode("=?iso-8859-1?Q?a?b?=").unwrap(), "a?b");
    }

    #[test]
    fn test_decode_charset_extends_past_rejected_tag() {
        // Nearest-`?` charset end gives tag `x`, which is rejected; the
        // charset grows to `a?x` and the word still matches (the unknown
        // charset then falls back to Latin-1).
        assert_eq!(decode("=?a?x?Q?data?=").unwrap(), "data");
    }

    #[test]
    fn test_decode_unterminated_word_passes_through() {
        let text = "=?iso-8859-1?Q?no terminator";
        assert_eq!(decode(text).unwrap(), text);
    }

    #[test]
    fn test_decode_empty_charset_and_payload() {
        assert_eq!(decode("=??Q??=").unwrap(), "");
    }
}
