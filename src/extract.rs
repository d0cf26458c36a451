//! Body extraction: turns a stored raw body into text, HTML and attachments

use crate::config::{ExtractOptions, PartPreference};
use crate::html::html_to_text;
use crate::part::{MimePart, MimeTree, PartBody};
use crate::types::{AttachmentInfo, ExtractionResult};
use tracing::debug;

/// Extract a message body with the default options.
///
/// Never fails: anything that cannot be parsed or decoded degrades to the
/// best readable text, ultimately the raw input itself.
#[must_use]
pub fn extract(raw: &str) -> ExtractionResult {
    extract_with(raw, &ExtractOptions::default())
}

/// Extract a message body.
#[must_use]
pub fn extract_with(raw: &str, options: &ExtractOptions) -> ExtractionResult {
    if raw.is_empty() {
        return ExtractionResult::default();
    }

    let Some(tree) = MimeTree::parse(raw, options.max_depth) else {
        debug!("Body is not multipart, passing it through");
        return ExtractionResult::passthrough(raw);
    };

    let mut collector = Collector::new(options.duplicate_parts);
    collector.visit(&tree.parts);
    collector.finish(raw)
}

struct Collector {
    preference: PartPreference,
    text: Option<String>,
    html: Option<String>,
    attachments: Vec<AttachmentInfo>,
}

impl Collector {
    const fn new(preference: PartPreference) -> Self {
        Self {
            preference,
            text: None,
            html: None,
            attachments: Vec::new(),
        }
    }

    fn visit(&mut self, parts: &[MimePart]) {
        for part in parts {
            if part.headers.is_attachment() {
                self.attachments.push(AttachmentInfo {
                    content_type: part.headers.content_type.clone(),
                    filename: part.headers.filename.clone(),
                });
                continue;
            }

            match &part.body {
                PartBody::Multipart(children) => self.visit(children),
                PartBody::Opaque(content) => {
                    let candidate = Some(content.clone());
                    Self::offer(self.preference, &mut self.text, candidate);
                }
                PartBody::Leaf(_) => match part.headers.content_type.as_str() {
                    "text/plain" => {
                        let candidate = part.decoded_text();
                        Self::offer(self.preference, &mut self.text, candidate);
                    }
                    "text/html" => {
                        let candidate = part.decoded_text();
                        Self::offer(self.preference, &mut self.html, candidate);
                    }
                    other => debug!("Ignoring {other} part"),
                },
            }
        }
    }

    fn offer(preference: PartPreference, slot: &mut Option<String>, candidate: Option<String>) {
        let Some(candidate) = candidate
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
        else {
            return;
        };
        if preference == PartPreference::Last || slot.is_none() {
            *slot = Some(candidate);
        }
    }

    fn finish(self, raw: &str) -> ExtractionResult {
        let text_content = match (&self.text, &self.html) {
            (Some(text), _) => text.clone(),
            (None, Some(html)) => html_to_text(html),
            (None, None) => raw.to_string(),
        };
        let text_content = if text_content.is_empty() {
            raw.to_string()
        } else {
            text_content
        };

        ExtractionResult {
            text_content,
            html_content: self.html,
            has_attachments: !self.attachments.is_empty(),
            attachment_count: self.attachments.len(),
            attachments: self.attachments,
        }
    }
}
