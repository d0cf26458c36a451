//! Extraction options

use serde::{Deserialize, Serialize};

/// Default bound on multipart nesting
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Which part wins when several `text/plain` (or `text/html`) parts exist
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PartPreference {
    /// First one in document order
    First,
    /// Last one in document order, i.e. the richest `multipart/alternative`
    #[default]
    Last,
}

/// Options for [`crate::extract_with`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractOptions {
    /// Maximum multipart nesting levels, the top level counting as one
    pub max_depth: usize,

    /// Tie-break for duplicate text or HTML parts
    pub duplicate_parts: PartPreference,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_parts: PartPreference::Last,
        }
    }
}

impl ExtractOptions {
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub const fn with_duplicate_parts(mut self, preference: PartPreference) -> Self {
        self.duplicate_parts = preference;
        self
    }
}
