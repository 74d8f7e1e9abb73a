//! Charset resolution against the `encoding_rs` catalog.
//!
//! Lookup is case-insensitive over the WHATWG encoding labels. The decode
//! path substitutes the catalog's `iso-8859-1` table (windows-1252, which
//! decodes all 256 byte values) for any unrecognized name, so decoding a
//! token never fails on the charset alone. The encode path has no fallback.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, WINDOWS_1252};

/// Resolves a charset name, falling back to the Latin-1 table when the name
/// is not in the catalog.
pub(crate) fn resolve(name: &str) -> &'static Encoding {
    Encoding::for_label_no_replacement(name.as_bytes()).unwrap_or(WINDOWS_1252)
}

/// Resolves a charset name, rejecting names not in the catalog.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCharset`] if the name matches no known label.
pub(crate) fn require(name: &str) -> Result<&'static Encoding> {
    Encoding::for_label_no_replacement(name.as_bytes())
        .ok_or_else(|| Error::UnsupportedCharset(name.to_string()))
}
