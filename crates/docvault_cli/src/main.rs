//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `docvault_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use docvault_core::db::open_db_in_memory;
use docvault_core::{DocumentRepository, SqliteDocumentRepository};

fn main() {
    println!("docvault_core version={}", docvault_core::core_version());

    match open_db_in_memory() {
        Ok(conn) => {
            let repo = SqliteDocumentRepository::new(&conn);
            match repo.count_documents() {
                Ok(count) => println!("docvault_core probe=ok documents={count}"),
                Err(err) => eprintln!("docvault_core probe=count_failed error={err}"),
            }
        }
        Err(err) => eprintln!("docvault_core probe=open_failed error={err}"),
    }
}
