//! Content-Transfer-Encoding decoders with charset-aware text conversion

use crate::error::{DecodeError, Result};
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use charset::Charset;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

// Some mailers drop the trailing `=` padding
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Charset assumed when a part does not declare one
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Transfer encoding declared by a part's `Content-Transfer-Encoding` header
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TransferEncoding {
    QuotedPrintable,
    Base64,
    /// 7bit, 8bit, binary, or anything unrecognised: passed through as is
    #[default]
    Identity,
}

impl TransferEncoding {
    /// Parse a header value such as `Quoted-Printable` or ` base64 `
    #[must_use]
    pub fn from_header(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "quoted-printable" => Self::QuotedPrintable,
            "base64" => Self::Base64,
            _ => Self::Identity,
        }
    }

    /// Decode `text` with this encoding, never failing
    #[must_use]
    pub fn decode(self, text: &str, charset: &str) -> String {
        match self {
            Self::QuotedPrintable => decode_qp(text, charset),
            Self::Base64 => decode_b64(text, charset),
            Self::Identity => text.to_string(),
        }
    }
}

/// Normalize a declared charset name before looking it up.
///
/// Lowercases and keeps only ASCII letters, digits and hyphens, so
/// `"UTF-8"`, `utf8` and `iso-8859-1;` all resolve.
#[must_use]
pub fn normalize_charset(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Strictly decode `bytes` as text in the declared charset.
pub fn decode_charset(bytes: &[u8], charset: &str) -> Result<String> {
    let label = normalize_charset(charset);
    let decoder = Charset::for_label(label.as_bytes())
        .ok_or_else(|| DecodeError::UnknownCharset(charset.to_string()))?;

    let (text, malformed) = decoder.decode_without_bom_handling(bytes);
    if malformed {
        return Err(DecodeError::Malformed { charset: label });
    }
    Ok(text.into_owned())
}

/// Turn quoted-printable text into raw bytes.
///
/// Soft line breaks go first, then every `=` followed by two hex digits
/// becomes the byte they encode. Any other `=` is kept literally.
#[must_use]
pub fn qp_bytes(text: &str) -> Vec<u8> {
    let unwrapped = text.replace("=\r\n", "").replace("=\n", "");
    let src = unwrapped.as_bytes();
    let mut out = Vec::with_capacity(src.len());

    let mut i = 0;
    while i < src.len() {
        if src[i] == b'='
            && let (Some(hi), Some(lo)) = (
                src.get(i + 1).copied().and_then(hex_value),
                src.get(i + 2).copied().and_then(hex_value),
            )
        {
            out.push((hi << 4) | lo);
            i += 3;
            continue;
        }
        out.push(src[i]);
        i += 1;
    }

    out
}

/// Turn base64 text into raw bytes, ignoring any whitespace in it.
///
/// Padding may be canonical or missing; anything else is rejected.
pub fn base64_bytes(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(LENIENT_BASE64.decode(compact)?)
}

/// Decode a quoted-printable body into text.
///
/// Falls back to UTF-8 when the charset is unknown or rejects the bytes, and
/// to `text` unchanged when UTF-8 fails too.
#[must_use]
pub fn decode_qp(text: &str, charset: &str) -> String {
    text_or_original(&qp_bytes(text), charset, text)
}

/// Decode a base64 body into text with the same fallback chain as
/// [`decode_qp`]. Malformed base64 returns `text` unchanged.
#[must_use]
pub fn decode_b64(text: &str, charset: &str) -> String {
    match base64_bytes(text) {
        Ok(bytes) => text_or_original(&bytes, charset, text),
        Err(e) => {
            debug!("Keeping undecoded base64 body: {e}");
            text.to_string()
        }
    }
}

fn text_or_original(bytes: &[u8], charset: &str, original: &str) -> String {
    decode_charset(bytes, charset)
        .or_else(|e| {
            trace!("Charset decode failed ({e}), retrying as UTF-8");
            decode_charset(bytes, DEFAULT_CHARSET)
        })
        .unwrap_or_else(|e| {
            debug!("Keeping undecoded body: {e}");
            original.to_string()
        })
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
