//! Ordered WHERE-clause builder for dynamic filter queries.
//!
//! # Responsibility
//! - Collect optional filter clauses together with their bound values.
//! - Render the final WHERE suffix with clauses joined by AND.
//!
//! # Invariants
//! - A clause and its values are appended as one atomic pair, so the
//!   positional parameter order always matches the clause order.

use rusqlite::types::Value;

/// Conditional filter assembly: an ordered list of
/// (clause text, bound values) pairs.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one clause and its positional values atomically.
    ///
    /// `clause` must use `?` placeholders, one per value.
    pub fn push(&mut self, clause: impl Into<String>, values: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.into());
        self.params.extend(values);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Renders the `" WHERE ..."` suffix (empty when no clause was
    /// pushed) and the bound values in clause order.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        let where_sql = if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        };
        (where_sql, self.params)
    }
}
