//! Document use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for callers (UI, CLI, API layers).
//! - Delegate persistence to repository implementations.
//! - Own the failure logging policy.
//!
//! # Invariants
//! - Storage failures are logged with full detail; validation
//!   rejections and plain misses are not, they are expected outcomes.
//! - Service APIs never bypass repository validation contracts.

use crate::model::document::{Document, DocumentId, DocumentUpdate, NewDocument};
use crate::repo::document_repo::{DocumentRepository, SearchFilter, StoreResult};
use log::error;

/// Use-case service wrapper for document store operations.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new document, returning its assigned id.
    pub fn create_document(&self, document: &NewDocument) -> StoreResult<DocumentId> {
        logged("document_create", self.repo.create_document(document))
    }

    /// Overwrites a stored document.
    ///
    /// With a payload the stored file name and file data are replaced
    /// too; without one only title and category change.
    pub fn update_document(&self, update: &DocumentUpdate) -> StoreResult<()> {
        logged("document_update", self.repo.update_document(update))
    }

    /// Hard-deletes one document. `Ok(true)` iff a row was removed;
    /// deleting the same id again yields `Ok(false)`.
    pub fn delete_document(&self, id: DocumentId) -> StoreResult<bool> {
        logged("document_delete", self.repo.delete_document(id))
    }

    /// Fetches one document including its payload.
    pub fn get_document(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        logged("document_get", self.repo.get_document(id))
    }

    /// Fetches only the payload bytes of one document.
    pub fn get_document_file(&self, id: DocumentId) -> StoreResult<Option<Vec<u8>>> {
        logged("document_get_file", self.repo.get_document_file(id))
    }

    /// Lists all documents, newest first, metadata only.
    pub fn list_documents(&self) -> StoreResult<Vec<Document>> {
        logged("document_list", self.repo.list_documents())
    }

    /// Counts all stored documents.
    pub fn count_documents(&self) -> StoreResult<u64> {
        logged("document_count", self.repo.count_documents())
    }

    /// Lists distinct categories in alphabetical order.
    pub fn list_categories(&self) -> StoreResult<Vec<String>> {
        logged("document_list_categories", self.repo.list_categories())
    }

    /// Runs a dynamically composed filter query, newest first.
    pub fn search_documents(&self, filter: &SearchFilter) -> StoreResult<Vec<Document>> {
        logged("document_search", self.repo.search_documents(filter))
    }

    /// Keyword/category search without a date range.
    pub fn search_by_keyword_and_category(
        &self,
        keyword: Option<&str>,
        category: Option<&str>,
    ) -> StoreResult<Vec<Document>> {
        self.search_documents(&SearchFilter {
            keyword: keyword.map(str::to_string),
            category: category.map(str::to_string),
            ..SearchFilter::default()
        })
    }
}

// Validation errors and misses are expected rejections, not failures;
// only storage-layer errors reach the log.
fn logged<T>(operation: &'static str, result: StoreResult<T>) -> StoreResult<T> {
    if let Err(err) = &result {
        if err.is_storage_failure() {
            error!("event={operation} module=document_service status=error error={err}");
        }
    }
    result
}
