//! Plain-text rendering of HTML bodies, used when a message has no text part

use regex::Regex;

static STYLE_BLOCK: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

static SCRIPT_BLOCK: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

static LINE_BREAK: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());

static PARAGRAPH_END: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)</p\s*>").unwrap());

static DIV_END: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?i)</div\s*>").unwrap());

static ANY_TAG: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static EXCESS_NEWLINES: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Entities decoded after tag stripping, applied in this order
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Convert an HTML body into readable plain text.
///
/// Style and script blocks are dropped, `<br>`, `</p>` and `</div>` become
/// line breaks, every other tag is removed and the common entities are
/// decoded. Runs of blank lines collapse to a single paragraph break.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let text = html.replace("\r\n", "\n");
    let text = STYLE_BLOCK.replace_all(&text, "");
    let text = SCRIPT_BLOCK.replace_all(&text, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = PARAGRAPH_END.replace_all(&text, "\n\n");
    let text = DIV_END.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");

    let mut text = text.into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }

    EXCESS_NEWLINES
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}
