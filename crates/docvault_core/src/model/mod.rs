//! Domain model for stored documents.
//!
//! # Responsibility
//! - Define the canonical document record and its write-side shapes.
//! - Own the input validation contract applied before every mutation.
//!
//! # Invariants
//! - A persisted document always carries a valid title and category.
//! - A document is created with a payload; the payload can be replaced
//!   later but never cleared.

pub mod document;
pub mod limits;
