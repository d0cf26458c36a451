//! MIME part tree built from a raw body
//!
//! Boundaries are found and split first; classification and decoding happen
//! later on the finished tree, see [`crate::extract`].

use crate::boundary::{self, Boundary};
use crate::decode::{DEFAULT_CHARSET, TransferEncoding};
use mailparse::{DispositionType, MailHeaderMap, ParsedContentType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Media type prefixes that mark a part as an attachment
const BINARY_PREFIXES: [&str; 4] = ["image/", "application/", "audio/", "video/"];

/// Headers of a single part, reduced to what extraction needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartHeaders {
    /// Lowercased media type, e.g. `text/plain`
    pub content_type: String,
    pub charset: String,
    pub transfer_encoding: TransferEncoding,
    /// `Content-Disposition: attachment` was declared
    pub attachment_disposition: bool,
    pub filename: Option<String>,
    /// `boundary` parameter of a multipart content type
    pub boundary: Option<String>,
}

impl PartHeaders {
    /// Parse a part's header block.
    ///
    /// Returns `None` when the block is not a header block or carries no
    /// `Content-Type`, since such a part cannot be classified.
    #[must_use]
    pub fn parse(block: &str) -> Option<Self> {
        let (headers, _) = mailparse::parse_headers(block.as_bytes()).ok()?;
        let ctype = mailparse::parse_content_type(&headers.get_first_value("Content-Type")?);
        let disposition = headers
            .get_first_value("Content-Disposition")
            .map(|value| mailparse::parse_content_disposition(&value));

        let transfer_encoding = headers
            .get_first_value("Content-Transfer-Encoding")
            .map_or(TransferEncoding::Identity, |value| {
                TransferEncoding::from_header(&value)
            });

        let filename = disposition
            .as_ref()
            .and_then(|d| d.params.get("filename").cloned())
            .or_else(|| ctype.params.get("name").cloned());

        Some(Self {
            charset: declared_charset(&ctype),
            boundary: ctype.params.get("boundary").cloned(),
            content_type: ctype.mimetype,
            transfer_encoding,
            attachment_disposition: disposition
                .is_some_and(|d| matches!(d.disposition, DispositionType::Attachment)),
            filename,
        })
    }

    /// Attachment by disposition, or by a binary media type
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.attachment_disposition
            || (!self.content_type.contains("text/")
                && BINARY_PREFIXES
                    .iter()
                    .any(|prefix| self.content_type.starts_with(prefix)))
    }

    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.content_type.starts_with("multipart/")
    }
}

// mailparse reports `us-ascii` when no charset is given; bodies stored
// without one are overwhelmingly UTF-8
fn declared_charset(ctype: &ParsedContentType) -> String {
    ctype
        .params
        .get("charset")
        .cloned()
        .or_else(|| (ctype.charset != "us-ascii").then(|| ctype.charset.clone()))
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// Content of a part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum PartBody {
    /// Trimmed content, still transfer-encoded
    Leaf(String),
    /// Nested parts of a `multipart/*` part
    Multipart(Vec<MimePart>),
    /// Content left unsplit: nesting limit reached, or no delimiter found.
    /// Read as undecoded plain text.
    Opaque(String),
}

/// A classified part and its content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MimePart {
    pub headers: PartHeaders,
    pub body: PartBody,
}

impl MimePart {
    /// Transfer-decoded text of a leaf part
    #[must_use]
    pub fn decoded_text(&self) -> Option<String> {
        match &self.body {
            PartBody::Leaf(content) => Some(
                self.headers
                    .transfer_encoding
                    .decode(content, &self.headers.charset),
            ),
            PartBody::Multipart(_) | PartBody::Opaque(_) => None,
        }
    }
}

/// Top level of a multipart body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MimeTree {
    pub boundary: Boundary,
    pub parts: Vec<MimePart>,
}

impl MimeTree {
    /// Build the part tree of `raw`.
    ///
    /// `max_depth` bounds multipart nesting, the top level counting as one.
    /// Deeper multiparts are kept as [`PartBody::Opaque`].
    ///
    /// Returns `None` when `raw` is not multipart: no boundary can be found,
    /// or the boundary never occurs as a delimiter.
    #[must_use]
    pub fn parse(raw: &str, max_depth: usize) -> Option<Self> {
        let found = boundary::discover(raw)?;
        let Some(segments) = boundary::split_parts(raw, &found) else {
            debug!("Boundary {} never used as a delimiter", found.token);
            return None;
        };

        let parts = segments
            .into_iter()
            .filter_map(|segment| parse_part(segment, 1, max_depth))
            .collect();

        Some(Self {
            boundary: found,
            parts,
        })
    }
}

fn parse_part(segment: &str, depth: usize, max_depth: usize) -> Option<MimePart> {
    let (block, content) = boundary::split_header_block(segment);
    let Some(headers) = PartHeaders::parse(block) else {
        debug!("Skipping part without a Content-Type");
        return None;
    };
    let content = content.trim();

    let body = if headers.is_multipart() && !headers.is_attachment() {
        split_nested(&headers, content, depth, max_depth)
    } else {
        PartBody::Leaf(content.to_string())
    };

    Some(MimePart { headers, body })
}

fn split_nested(headers: &PartHeaders, content: &str, depth: usize, max_depth: usize) -> PartBody {
    if depth >= max_depth {
        warn!("Multipart nesting deeper than {max_depth} levels, keeping it opaque");
        return PartBody::Opaque(content.to_string());
    }

    let nested = headers
        .boundary
        .as_deref()
        .map(Boundary::declared)
        .or_else(|| boundary::discover(content));

    let segments = nested
        .as_ref()
        .and_then(|nested| boundary::split_parts(content, nested));

    match segments {
        Some(segments) => PartBody::Multipart(
            segments
                .into_iter()
                .filter_map(|segment| parse_part(segment, depth + 1, max_depth))
                .collect(),
        ),
        None => {
            debug!("Nested multipart without usable boundary");
            PartBody::Opaque(content.to_string())
        }
    }
}
