//! Core document vault logic.
//! This crate is the single source of truth for document store
//! invariants: validation, CRUD, and filtered search.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    Document, DocumentId, DocumentUpdate, DocumentValidationError, FileUpload, NewDocument,
};
pub use model::limits::ValidationLimits;
pub use repo::document_repo::{
    is_all_categories, DocumentRepository, SearchFilter, SqliteDocumentRepository, StoreError,
    StoreResult, ALL_CATEGORIES,
};
pub use service::document_service::DocumentService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
