// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! MIME Body Extraction
//!
//! Turns email bodies stored verbatim from an inbound mail fetch into clean
//! plain text and, when the message has one, its HTML alternative, while
//! detecting and counting attachments.
//!
//! Input is untrusted: bodies may start in the middle of the header block,
//! lack a closing boundary, or declare a boundary they never use. Nothing
//! here fails on such input; every problem degrades to the most readable
//! text available, in the worst case the raw body itself.
//!
//! # Features
//!
//! - Declared and implicit boundary discovery with literal splitting
//! - Recursive multipart handling with a nesting limit
//! - Quoted-printable and base64 decoding with charset fallback
//! - HTML-to-text conversion when no plain-text part exists
//! - Attachment detection by disposition or media type
//! - A cheap display-time cleaner for rendering
//!
//! # Example
//!
//! ```rust
//! use mail_body_extract::extract;
//!
//! let raw = "Content-Type: multipart/alternative; boundary=\"abc\"\r\n\r\n\
//!            --abc\r\nContent-Type: text/plain\r\n\r\nHello\r\n\
//!            --abc\r\nContent-Type: text/html\r\n\r\n<p>Hello</p>\r\n--abc--";
//! let result = extract(raw);
//!
//! assert_eq!(result.text_content, "Hello");
//! assert_eq!(result.html_content.as_deref(), Some("<p>Hello</p>"));
//! assert!(!result.has_attachments);
//! ```

mod boundary;
mod config;
mod decode;
mod display;
mod error;
mod extract;
mod html;
mod part;
mod types;

pub use boundary::{Boundary, BoundarySource, discover, split_header_block, split_parts};
pub use config::{DEFAULT_MAX_DEPTH, ExtractOptions, PartPreference};
pub use decode::{
    DEFAULT_CHARSET, TransferEncoding, base64_bytes, decode_b64, decode_charset, decode_qp,
    normalize_charset, qp_bytes,
};
pub use display::{EMPTY_BODY_PLACEHOLDER, clean_for_display};
pub use error::{DecodeError, Result};
pub use extract::{extract, extract_with};
pub use html::html_to_text;
pub use part::{MimePart, MimeTree, PartBody, PartHeaders};
pub use types::*;
