//! Document records and write-side validation.
//!
//! # Responsibility
//! - Define the read model (`Document`) and the write models
//!   (`NewDocument`, `DocumentUpdate`, `FileUpload`).
//! - Validate user input before any persistence is attempted.
//!
//! # Invariants
//! - Validation reports the FIRST violation in a fixed order so error
//!   messages stay deterministic: title, category, creation-required
//!   fields, payload size, file extension.
//! - A `FileUpload` always pairs payload bytes with their file name.

use crate::model::limits::ValidationLimits;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned document identifier. Positive for persisted rows.
pub type DocumentId = i64;

/// Canonical read model for a stored document.
///
/// `file_data` is `None` in metadata-only projections (listings and
/// search results) and populated by `get_document`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Storage-assigned identifier, immutable after creation.
    pub id: DocumentId,
    /// Display title, trimmed, non-empty.
    pub title: String,
    /// Original upload file name.
    pub file_name: String,
    /// Filter dimension, trimmed, non-empty.
    pub category: String,
    /// Binary payload; omitted from metadata projections.
    pub file_data: Option<Vec<u8>>,
    /// Maintained by storage on insert and every update. Sole sort key.
    pub last_updated: NaiveDateTime,
}

/// An uploaded file: payload bytes plus the name they arrived under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Original file name; its extension drives type validation.
    pub file_name: String,
    /// Raw payload bytes.
    pub data: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}

/// Write model for document creation. The payload is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub category: String,
    pub payload: FileUpload,
}

impl NewDocument {
    /// Validates creation input against the injected limits.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, limits: &ValidationLimits) -> Result<(), DocumentValidationError> {
        validate_title(&self.title, limits)?;
        validate_category(&self.category, limits)?;
        if self.payload.data.is_empty() {
            return Err(DocumentValidationError::EmptyPayload);
        }
        if self.payload.file_name.trim().is_empty() {
            return Err(DocumentValidationError::EmptyFileName);
        }
        validate_payload(&self.payload, limits)
    }
}

/// Write model for document update.
///
/// `payload: Some` replaces file name, payload and metadata in one
/// overwrite; `None` touches title and category only, leaving the
/// stored file untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub id: DocumentId,
    pub title: String,
    pub category: String,
    pub payload: Option<FileUpload>,
}

impl DocumentUpdate {
    /// Validates update input against the injected limits.
    ///
    /// The payload is optional; when present it must satisfy the same
    /// file checks as creation. The id is checked last, after field
    /// validation, matching the store's message ordering.
    pub fn validate(&self, limits: &ValidationLimits) -> Result<(), DocumentValidationError> {
        validate_title(&self.title, limits)?;
        validate_category(&self.category, limits)?;
        if let Some(payload) = &self.payload {
            if payload.data.is_empty() {
                return Err(DocumentValidationError::EmptyPayload);
            }
            if payload.file_name.trim().is_empty() {
                return Err(DocumentValidationError::EmptyFileName);
            }
            validate_payload(payload, limits)?;
        }
        validate_document_id(self.id)
    }
}

/// First-violation validation error for document input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    EmptyTitle,
    TitleTooLong { max_chars: usize },
    EmptyCategory,
    CategoryTooLong { max_chars: usize },
    EmptyPayload,
    EmptyFileName,
    PayloadTooLarge { max_bytes: usize },
    UnsupportedFileType { file_name: String },
    InvalidId { id: DocumentId },
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max_chars } => {
                write!(f, "title must not exceed {max_chars} characters")
            }
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::CategoryTooLong { max_chars } => {
                write!(f, "category must not exceed {max_chars} characters")
            }
            Self::EmptyPayload => write!(f, "file data must not be empty"),
            Self::EmptyFileName => write!(f, "file name must not be empty"),
            Self::PayloadTooLarge { max_bytes } => {
                write!(f, "file too large; maximum size is {} KiB", max_bytes / 1024)
            }
            Self::UnsupportedFileType { file_name } => {
                write!(f, "unsupported file type for `{file_name}`")
            }
            Self::InvalidId { id } => write!(f, "document id must be positive, got {id}"),
        }
    }
}

impl Error for DocumentValidationError {}

/// Rejects non-positive identifiers before any lookup or mutation.
pub fn validate_document_id(id: DocumentId) -> Result<(), DocumentValidationError> {
    if id <= 0 {
        return Err(DocumentValidationError::InvalidId { id });
    }
    Ok(())
}

fn validate_title(title: &str, limits: &ValidationLimits) -> Result<(), DocumentValidationError> {
    if title.trim().is_empty() {
        return Err(DocumentValidationError::EmptyTitle);
    }
    if title.chars().count() > limits.max_title_chars {
        return Err(DocumentValidationError::TitleTooLong {
            max_chars: limits.max_title_chars,
        });
    }
    Ok(())
}

fn validate_category(
    category: &str,
    limits: &ValidationLimits,
) -> Result<(), DocumentValidationError> {
    if category.trim().is_empty() {
        return Err(DocumentValidationError::EmptyCategory);
    }
    if category.chars().count() > limits.max_category_chars {
        return Err(DocumentValidationError::CategoryTooLong {
            max_chars: limits.max_category_chars,
        });
    }
    Ok(())
}

// Size before extension, so an oversized payload with a bad name
// reports the size problem first.
fn validate_payload(
    payload: &FileUpload,
    limits: &ValidationLimits,
) -> Result<(), DocumentValidationError> {
    if payload.data.len() > limits.max_payload_bytes {
        return Err(DocumentValidationError::PayloadTooLarge {
            max_bytes: limits.max_payload_bytes,
        });
    }
    if !limits.allows_extension(&payload.file_name) {
        return Err(DocumentValidationError::UnsupportedFileType {
            file_name: payload.file_name.clone(),
        });
    }
    Ok(())
}
