//! Value types produced by extraction

use serde::{Deserialize, Serialize};

/// Clean representation of a stored message body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Readable text; never empty when the input was not
    pub text_content: String,

    /// Content of a real `text/html` part, never synthesized
    pub html_content: Option<String>,

    pub has_attachments: bool,

    pub attachment_count: usize,

    /// What was detected for each attachment; the content itself is dropped
    pub attachments: Vec<AttachmentInfo>,
}

impl ExtractionResult {
    /// Result for a body that is not multipart
    #[must_use]
    pub fn passthrough(raw: &str) -> Self {
        Self {
            text_content: raw.to_string(),
            ..Self::default()
        }
    }

    /// Fields written back to the message record by a backfill job
    #[must_use]
    pub fn stored_fields(&self) -> StoredFields {
        StoredFields {
            body_html: self.html_content.clone(),
            has_attachments: self.has_attachments,
            attachment_count: self.attachment_count,
        }
    }
}

/// An attachment found while walking the parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentInfo {
    pub content_type: String,
    pub filename: Option<String>,
}

/// Persisted columns derived from an [`ExtractionResult`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredFields {
    pub body_html: Option<String>,
    pub has_attachments: bool,
    pub attachment_count: usize,
}

impl From<&ExtractionResult> for StoredFields {
    fn from(result: &ExtractionResult) -> Self {
        result.stored_fields()
    }
}
