//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the document data-access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate input before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition
//!   to storage transport errors.

pub mod document_repo;
pub mod query;
