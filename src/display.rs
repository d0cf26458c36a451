//! Lightweight cleanup of a stored body for display
//!
//! Used when rendering a message that has no stored HTML. Cheaper and less
//! thorough than [`crate::extract`]: no charset lookup and no recursion.

use crate::decode::qp_bytes;
use regex::Regex;

/// Text shown for a message without a body. Matched verbatim by the UI.
pub const EMPTY_BODY_PLACEHOLDER: &str = "(Sem conteudo)";

// Six characters at least, so signature and rule lines such as `--Ana` or
// `------` are not taken for a boundary
static BOUNDARY_LINE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?m)^--([0-9A-Za-z][0-9A-Za-z_=.'+-]{5,}?)(?:--)?[ \t]*\r?$").unwrap()
});

static HEADER_LINE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*content-(?:type|transfer-encoding):[^\n]*(?:\n|$)").unwrap()
});

static EXCESS_NEWLINES: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip MIME leftovers from a body so it can be shown as plain text.
///
/// Returns [`EMPTY_BODY_PLACEHOLDER`] for a missing or blank body, or when
/// nothing readable is left after cleanup.
#[must_use]
pub fn clean_for_display(body: Option<&str>) -> String {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return EMPTY_BODY_PLACEHOLDER.to_string();
    };
    let body = body.replace("\r\n", "\n");

    let token = BOUNDARY_LINE
        .captures(&body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let mut text = token
        .as_deref()
        .and_then(|token| plain_segment(&body, token))
        .unwrap_or_else(|| body.clone());

    if let Some(token) = token {
        text = text
            .lines()
            .filter(|line| {
                let line = line.trim_end();
                line != format!("--{token}") && line != format!("--{token}--")
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    let text = HEADER_LINE.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    let text = text.trim();

    if text.is_empty() {
        EMPTY_BODY_PLACEHOLDER.to_string()
    } else {
        text.to_string()
    }
}

/// Content of the first `text/plain` segment, quoted-printable decoded
fn plain_segment(body: &str, token: &str) -> Option<String> {
    let delimiter = format!("--{token}");
    body.split(delimiter.as_str()).find_map(|segment| {
        let (headers, content) = segment.split_once("\n\n")?;
        let headers = headers.to_ascii_lowercase();
        if !headers.contains("text/plain") {
            return None;
        }
        let content = content.trim();
        Some(if headers.contains("quoted-printable") {
            String::from_utf8_lossy(&qp_bytes(content)).into_owned()
        } else {
            content.to_string()
        })
    })
}
