//! Boundary discovery and literal multipart splitting

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

static MULTIPART_HEADER: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)content-type:[ \t]*multipart/[a-z0-9.+-]*").unwrap()
});

static BOUNDARY_PARAM: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r#"(?i)\bboundary[ \t]*=[ \t]*(?:"([^"\r\n]+)"|([^\s;"]+))"#).unwrap()
});

static BLANK_LINE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

static DELIMITER_LINE: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?m)^--(\S+?)(?:--)?[ \t]*\r?$").unwrap());

/// Where a boundary token came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySource {
    /// A `Content-Type: multipart/...; boundary=...` header
    Declared,
    /// The first `--token` line in the body
    Implicit,
}

/// Multipart boundary token, without the leading `--`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Boundary {
    pub token: String,
    pub source: BoundarySource,
}

impl Boundary {
    #[must_use]
    pub fn declared(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            source: BoundarySource::Declared,
        }
    }

    /// Separator form, `--token`
    #[must_use]
    pub fn delimiter(&self) -> String {
        format!("--{}", self.token)
    }
}

/// Find the boundary of a multipart body.
///
/// A declared multipart header is searched for anywhere in the text, since
/// stored bodies may start in the middle of the header block. Without one,
/// the first line shaped like `--token` is taken as an implicit boundary.
#[must_use]
pub fn discover(raw: &str) -> Option<Boundary> {
    declared_boundary(raw).or_else(|| implicit_boundary(raw))
}

fn declared_boundary(raw: &str) -> Option<Boundary> {
    MULTIPART_HEADER.find_iter(raw).find_map(|header| {
        let rest = &raw[header.end()..];
        let window = BLANK_LINE.find(rest).map_or(rest, |blank| &rest[..blank.start()]);
        let caps = BOUNDARY_PARAM.captures(window)?;
        let token = caps.get(1).or_else(|| caps.get(2))?.as_str();
        trace!("Declared boundary: {token}");
        Some(Boundary::declared(token))
    })
}

fn implicit_boundary(raw: &str) -> Option<Boundary> {
    let caps = DELIMITER_LINE.captures(raw)?;
    let token = caps.get(1)?.as_str();
    trace!("Implicit boundary: {token}");
    Some(Boundary {
        token: token.to_string(),
        source: BoundarySource::Implicit,
    })
}

/// Split `body` into the segments between boundary delimiters.
///
/// Matching is a literal substring search, never a pattern built from the
/// token. A match only counts as a delimiter when it starts a line and the
/// rest of that line is blank, or is `--` (the terminator) followed by
/// blanks. Each segment starts on the line after its delimiter. The preamble and the epilogue
/// are dropped; a missing terminator keeps the trailing segment.
///
/// Returns `None` when no delimiter for `boundary` occurs in `body`.
#[must_use]
pub fn split_parts<'a>(body: &'a str, boundary: &Boundary) -> Option<Vec<&'a str>> {
    let delimiter = boundary.delimiter();
    let mut segments = Vec::new();
    let mut open: Option<usize> = None;
    let mut found = false;

    for (start, _) in body.match_indices(delimiter.as_str()) {
        if start > 0 && body.as_bytes()[start - 1] != b'\n' {
            continue;
        }
        let after = start + delimiter.len();
        let line_end = body[after..].find('\n').map_or(body.len(), |n| after + n);
        let tail = &body[after..line_end];
        let closing = tail.starts_with("--");
        let tail = if closing { &tail[2..] } else { tail };
        if !tail.trim().is_empty() {
            continue;
        }

        found = true;
        if let Some(content) = open.take() {
            segments.push(&body[content..start]);
        }
        if closing {
            return Some(segments);
        }
        open = Some((line_end + 1).min(body.len()));
    }

    if !found {
        return None;
    }
    if let Some(content) = open {
        segments.push(&body[content..]);
    }
    Some(segments)
}

/// Split a segment at its first blank line into `(headers, content)`.
///
/// Without a blank line the whole segment is the header block.
#[must_use]
pub fn split_header_block(segment: &str) -> (&str, &str) {
    BLANK_LINE.find(segment).map_or((segment, ""), |blank| {
        (&segment[..blank.start()], &segment[blank.end()..])
    })
}
