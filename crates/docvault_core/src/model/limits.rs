//! Injected validation thresholds.
//!
//! # Responsibility
//! - Hold the size/length limits and the allowed upload extensions as
//!   explicit configuration instead of scattered constants.
//!
//! # Invariants
//! - `allowed_extensions` entries are lowercase and include the dot.
//! - `Default` yields the production limits.

use serde::{Deserialize, Serialize};

/// Production payload cap: 700 KiB.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 700 * 1024;
/// Production title cap in characters.
pub const DEFAULT_MAX_TITLE_CHARS: usize = 255;
/// Production category cap in characters.
pub const DEFAULT_MAX_CATEGORY_CHARS: usize = 100;

const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &[".pdf", ".txt", ".doc", ".docx", ".xls", ".xlsx"];

/// Validation thresholds injected into the repository.
///
/// Kept as plain data so tests can tighten or loosen limits without
/// touching globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Maximum payload size in bytes.
    pub max_payload_bytes: usize,
    /// Maximum title length in characters.
    pub max_title_chars: usize,
    /// Maximum category length in characters.
    pub max_category_chars: usize,
    /// Accepted file-name suffixes, lowercase, dot included.
    pub allowed_extensions: Vec<String>,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            max_category_chars: DEFAULT_MAX_CATEGORY_CHARS,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }
}

impl ValidationLimits {
    /// Returns whether `file_name` ends with one of the allowed
    /// extensions. Matching is case-insensitive on the file name.
    pub fn allows_extension(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext.as_str()))
    }
}
