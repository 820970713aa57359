//! Document repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and filtered-search APIs over the canonical
//!   `documents` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation, so a
//!   validation failure can never leave partial side effects.
//! - Listing and search results are ordered by `last_updated DESC`
//!   (id tiebreak for determinism) and exclude the payload column.
//! - Search filter clauses are appended in fixed order: keyword,
//!   category, from-date, to-date.

use crate::db::DbError;
use crate::model::document::{
    validate_document_id, Document, DocumentId, DocumentUpdate, DocumentValidationError,
    NewDocument,
};
use crate::model::limits::ValidationLimits;
use crate::repo::query::WhereBuilder;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Metadata-only projection; `file_data` deliberately excluded.
const DOCUMENT_META_SELECT_SQL: &str =
    "SELECT id, title, file_name, category, last_updated FROM documents";

/// Category filter sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for document persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected before any storage access.
    Validation(DocumentValidationError),
    /// Target row does not exist.
    NotFound(DocumentId),
    /// Payload exceeded a limit of the storage engine itself
    /// (SQLITE_TOOBIG), as opposed to the validation cap.
    PayloadTooLargeForEngine,
    /// The `documents` table is missing from the schema.
    MissingDocumentsTable,
    /// Any other storage failure.
    Db(DbError),
}

impl StoreError {
    /// Whether this error came from the storage layer rather than from
    /// input validation or a plain miss. Drives the logging policy:
    /// only storage failures are logged as errors.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::PayloadTooLargeForEngine | Self::MissingDocumentsTable | Self::Db(_)
        )
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "document not found: {id}"),
            Self::PayloadTooLargeForEngine => {
                write!(f, "file too large for the current database configuration")
            }
            Self::MissingDocumentsTable => {
                write!(f, "table `documents` does not exist in the database")
            }
            Self::Db(err) => write!(f, "database error: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::PayloadTooLargeForEngine | Self::MissingDocumentsTable => {
                None
            }
        }
    }
}

impl From<DocumentValidationError> for StoreError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == rusqlite::ErrorCode::TooBig {
                return Self::PayloadTooLargeForEngine;
            }
            if message
                .as_deref()
                .is_some_and(|text| text.contains("no such table: documents"))
            {
                return Self::MissingDocumentsTable;
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for document search. `Default` means unfiltered.
///
/// All present filters combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring match on title or file name.
    /// Blank values are ignored.
    pub keyword: Option<String>,
    /// Exact category match. Blank values and the [`ALL_CATEGORIES`]
    /// sentinel are ignored.
    pub category: Option<String>,
    /// Inclusive lower bound on the date part of `last_updated`.
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound on the date part of `last_updated`.
    pub to_date: Option<NaiveDate>,
}

/// Repository interface for document CRUD and search.
pub trait DocumentRepository {
    /// Validates and inserts a new document, returning its assigned id.
    fn create_document(&self, document: &NewDocument) -> StoreResult<DocumentId>;
    /// Overwrites a stored document. With a payload the file name and
    /// file data are replaced too; without one only title and category
    /// change and the stored file is untouched.
    fn update_document(&self, update: &DocumentUpdate) -> StoreResult<()>;
    /// Hard-deletes one row. `Ok(true)` iff a row was removed.
    fn delete_document(&self, id: DocumentId) -> StoreResult<bool>;
    /// Fetches one document including its payload.
    fn get_document(&self, id: DocumentId) -> StoreResult<Option<Document>>;
    /// Fetches only the payload bytes of one document.
    fn get_document_file(&self, id: DocumentId) -> StoreResult<Option<Vec<u8>>>;
    /// Lists all documents, newest first, metadata only.
    fn list_documents(&self) -> StoreResult<Vec<Document>>;
    /// Counts all stored documents.
    fn count_documents(&self) -> StoreResult<u64>;
    /// Lists distinct categories in alphabetical order.
    fn list_categories(&self) -> StoreResult<Vec<String>>;
    /// Runs a dynamically composed filter query, newest first,
    /// metadata only.
    fn search_documents(&self, filter: &SearchFilter) -> StoreResult<Vec<Document>>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
    limits: ValidationLimits,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    /// Constructs a repository with production validation limits.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_limits(conn, ValidationLimits::default())
    }

    /// Constructs a repository with caller-provided limits.
    pub fn with_limits(conn: &'conn Connection, limits: ValidationLimits) -> Self {
        Self { conn, limits }
    }

    /// Active validation limits.
    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn create_document(&self, document: &NewDocument) -> StoreResult<DocumentId> {
        document.validate(&self.limits)?;

        self.conn.execute(
            "INSERT INTO documents (title, file_name, file_data, category)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                document.title.trim(),
                document.payload.file_name.as_str(),
                document.payload.data.as_slice(),
                document.category.trim(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_document(&self, update: &DocumentUpdate) -> StoreResult<()> {
        update.validate(&self.limits)?;

        let changed = match &update.payload {
            Some(payload) => self.conn.execute(
                "UPDATE documents
                 SET
                    title = ?1,
                    file_name = ?2,
                    file_data = ?3,
                    category = ?4,
                    last_updated = datetime('now')
                 WHERE id = ?5;",
                params![
                    update.title.trim(),
                    payload.file_name.as_str(),
                    payload.data.as_slice(),
                    update.category.trim(),
                    update.id,
                ],
            )?,
            None => self.conn.execute(
                "UPDATE documents
                 SET
                    title = ?1,
                    category = ?2,
                    last_updated = datetime('now')
                 WHERE id = ?3;",
                params![update.title.trim(), update.category.trim(), update.id],
            )?,
        };

        if changed == 0 {
            return Err(StoreError::NotFound(update.id));
        }

        Ok(())
    }

    fn delete_document(&self, id: DocumentId) -> StoreResult<bool> {
        validate_document_id(id)?;

        let changed = self
            .conn
            .execute("DELETE FROM documents WHERE id = ?1;", [id])?;
        Ok(changed == 1)
    }

    fn get_document(&self, id: DocumentId) -> StoreResult<Option<Document>> {
        validate_document_id(id)?;

        let mut stmt = self.conn.prepare(
            "SELECT id, title, file_name, file_data, category, last_updated
             FROM documents
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row, true)?));
        }

        Ok(None)
    }

    fn get_document_file(&self, id: DocumentId) -> StoreResult<Option<Vec<u8>>> {
        validate_document_id(id)?;

        let data = self
            .conn
            .query_row(
                "SELECT file_data FROM documents WHERE id = ?1;",
                [id],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        Ok(data)
    }

    fn list_documents(&self) -> StoreResult<Vec<Document>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DOCUMENT_META_SELECT_SQL} ORDER BY last_updated DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row, false)?);
        }

        Ok(documents)
    }

    fn count_documents(&self) -> StoreResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents;", [], |row| {
                row.get::<_, u64>(0)
            })?;
        Ok(count)
    }

    fn list_categories(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT category FROM documents ORDER BY category ASC;")?;

        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(row.get(0)?);
        }

        Ok(categories)
    }

    fn search_documents(&self, filter: &SearchFilter) -> StoreResult<Vec<Document>> {
        // Fixed clause order: keyword, category, from-date, to-date.
        let mut clauses = WhereBuilder::new();

        if let Some(keyword) = filter.keyword.as_deref() {
            let keyword = keyword.trim();
            if !keyword.is_empty() {
                let pattern = format!("%{keyword}%");
                clauses.push(
                    "(title LIKE ? OR file_name LIKE ?)",
                    vec![Value::Text(pattern.clone()), Value::Text(pattern)],
                );
            }
        }

        if let Some(category) = filter.category.as_deref() {
            let category = category.trim();
            if !category.is_empty() && !is_all_categories(category) {
                clauses.push("category = ?", vec![Value::Text(category.to_string())]);
            }
        }

        if let Some(from_date) = filter.from_date {
            clauses.push(
                "DATE(last_updated) >= ?",
                vec![Value::Text(from_date.format("%Y-%m-%d").to_string())],
            );
        }

        if let Some(to_date) = filter.to_date {
            clauses.push(
                "DATE(last_updated) <= ?",
                vec![Value::Text(to_date.format("%Y-%m-%d").to_string())],
            );
        }

        let (where_sql, bind_values) = clauses.into_parts();
        let sql = format!(
            "{DOCUMENT_META_SELECT_SQL}{where_sql} ORDER BY last_updated DESC, id ASC;"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row, false)?);
        }

        Ok(documents)
    }
}

/// Whether `category` is the "no category filter" sentinel.
pub fn is_all_categories(category: &str) -> bool {
    category.trim().eq_ignore_ascii_case(ALL_CATEGORIES)
}

fn parse_document_row(row: &Row<'_>, with_payload: bool) -> StoreResult<Document> {
    let file_data = if with_payload {
        Some(row.get("file_data")?)
    } else {
        None
    };

    Ok(Document {
        id: row.get("id")?,
        title: row.get("title")?,
        file_name: row.get("file_name")?,
        category: row.get("category")?,
        file_data,
        last_updated: row.get("last_updated")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{is_all_categories, StoreError};
    use crate::db::DbError;

    #[test]
    fn all_categories_sentinel_matches_case_insensitively() {
        assert!(is_all_categories("all"));
        assert!(is_all_categories("All"));
        assert!(is_all_categories("  ALL "));
        assert!(!is_all_categories("Finance"));
        assert!(!is_all_categories(""));
    }

    #[test]
    fn toobig_engine_failure_maps_to_dedicated_variant() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_TOOBIG),
            Some("string or blob too big".to_string()),
        );
        assert!(matches!(
            StoreError::from(err),
            StoreError::PayloadTooLargeForEngine
        ));
    }

    #[test]
    fn missing_table_failure_maps_to_dedicated_variant() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
            Some("no such table: documents".to_string()),
        );
        assert!(matches!(
            StoreError::from(err),
            StoreError::MissingDocumentsTable
        ));
    }

    #[test]
    fn other_sqlite_failures_map_to_generic_db_error() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        let store_err = StoreError::from(err);
        assert!(matches!(store_err, StoreError::Db(DbError::Sqlite(_))));
        assert!(store_err.to_string().starts_with("database error:"));
    }

    #[test]
    fn storage_failure_classification_drives_logging_policy() {
        assert!(StoreError::PayloadTooLargeForEngine.is_storage_failure());
        assert!(StoreError::MissingDocumentsTable.is_storage_failure());
        assert!(!StoreError::NotFound(9).is_storage_failure());
        assert!(!StoreError::Validation(
            crate::model::document::DocumentValidationError::EmptyTitle
        )
        .is_storage_failure());
    }
}
