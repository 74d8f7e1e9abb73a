//! # encoded-words
//!
//! RFC 2047 encoded-word codec for email header fields.
//!
//! ## Features
//!
//! - **Decoding**: Find and decode `=?charset?encoding?text?=` tokens
//!   anywhere in a string, leaving surrounding text untouched
//! - **Encoding**: Produce Q-encoded or Base64 encoded words, folded into
//!   75-character lines when the payload is long
//! - **Charsets**: Case-insensitive lookup over the WHATWG encoding
//!   catalog, with a Latin-1 fallback on the decode path
//! - **Unfolding**: Splices encoded words separated by a soft line break
//!   (`CRLF SPACE`) back together before decoding
//!
//! ## Quick Start
//!
//! ### Decoding header text
//!
//! ```ignore
//! use encoded_words::decode;
//!
//! let subject = decode("Re: =?iso-8859-1?Q?=A1Hola,_se=F1or!?=")?;
//! assert_eq!(subject, "Re: ¡Hola, señor!");
//! ```
//!
//! ### Encoding header text
//!
//! ```ignore
//! use encoded_words::{encode, ContentEncoding};
//!
//! let encoded = encode("¡Hola!", ContentEncoding::QEncoding, "iso-8859-1")?;
//! assert_eq!(encoded, "=?iso-8859-1?Q?=A1Hola!?=");
//!
//! // Long output is folded into multiple encoded words.
//! let folded = encode(&"x".repeat(200), ContentEncoding::Base64, "utf-8")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod charset;
mod decode;
mod encode;
mod error;
mod transcode;

pub use decode::decode;
pub use encode::encode;
pub use error::{Error, Result};
pub use transcode::ContentEncoding;
