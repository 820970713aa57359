use chrono::NaiveDate;
use docvault_core::db::open_db_in_memory;
use docvault_core::{
    DocumentRepository, FileUpload, NewDocument, SearchFilter, SqliteDocumentRepository,
};
use rusqlite::{params, Connection};

fn seed(
    repo: &SqliteDocumentRepository<'_>,
    conn: &Connection,
    title: &str,
    category: &str,
    file_name: &str,
    last_updated: &str,
) -> i64 {
    let id = repo
        .create_document(&NewDocument {
            title: title.to_string(),
            category: category.to_string(),
            payload: FileUpload::new(file_name, b"x".to_vec()),
        })
        .unwrap();
    conn.execute(
        "UPDATE documents SET last_updated = ?1 WHERE id = ?2;",
        params![last_updated, id],
    )
    .unwrap();
    id
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn unfiltered_search_returns_everything_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    let a = seed(&repo, &conn, "a", "x", "a.txt", "2026-01-01 08:00:00");
    let b = seed(&repo, &conn, "b", "x", "b.txt", "2026-03-01 08:00:00");
    let c = seed(&repo, &conn, "c", "x", "c.txt", "2026-02-01 08:00:00");

    let hits = repo.search_documents(&SearchFilter::default()).unwrap();
    assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![b, c, a]);
    assert!(hits.iter().all(|d| d.file_data.is_none()));
}

#[test]
fn keyword_matches_title_or_file_name_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    let by_title = seed(
        &repo,
        &conn,
        "March Invoice",
        "Finance",
        "scan-0042.pdf",
        "2026-03-05 08:00:00",
    );
    let by_file = seed(
        &repo,
        &conn,
        "Quarterly summary",
        "Finance",
        "INVOICE-final.xlsx",
        "2026-03-04 08:00:00",
    );
    seed(
        &repo,
        &conn,
        "Meeting notes",
        "Finance",
        "notes.txt",
        "2026-03-03 08:00:00",
    );

    let hits = repo
        .search_documents(&SearchFilter {
            keyword: Some("invoice".to_string()),
            category: Some("all".to_string()),
            ..SearchFilter::default()
        })
        .unwrap();

    assert_eq!(
        hits.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![by_title, by_file]
    );
}

#[test]
fn blank_keyword_and_all_sentinel_are_ignored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    seed(&repo, &conn, "a", "x", "a.txt", "2026-01-01 08:00:00");
    seed(&repo, &conn, "b", "y", "b.txt", "2026-01-02 08:00:00");

    let hits = repo
        .search_documents(&SearchFilter {
            keyword: Some("   ".to_string()),
            category: Some("All".to_string()),
            ..SearchFilter::default()
        })
        .unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn category_filter_matches_exactly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    let legal = seed(&repo, &conn, "nda", "Legal", "nda.pdf", "2026-01-01 08:00:00");
    seed(&repo, &conn, "budget", "Finance", "b.xls", "2026-01-02 08:00:00");

    let hits = repo
        .search_documents(&SearchFilter {
            category: Some("Legal".to_string()),
            ..SearchFilter::default()
        })
        .unwrap();
    assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![legal]);
}

#[test]
fn date_range_bounds_are_inclusive_on_the_date_part() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    seed(&repo, &conn, "before", "x", "a.txt", "2026-01-09 23:59:59");
    let on_from = seed(&repo, &conn, "on from", "x", "b.txt", "2026-01-10 00:00:01");
    let inside = seed(&repo, &conn, "inside", "x", "c.txt", "2026-01-15 12:00:00");
    let on_to = seed(&repo, &conn, "on to", "x", "d.txt", "2026-01-20 23:59:59");
    seed(&repo, &conn, "after", "x", "e.txt", "2026-01-21 00:00:00");

    let hits = repo
        .search_documents(&SearchFilter {
            from_date: Some(date(2026, 1, 10)),
            to_date: Some(date(2026, 1, 20)),
            ..SearchFilter::default()
        })
        .unwrap();

    assert_eq!(
        hits.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![on_to, inside, on_from]
    );
}

#[test]
fn inverted_date_range_yields_no_results() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    seed(&repo, &conn, "a", "x", "a.txt", "2026-01-15 08:00:00");

    let hits = repo
        .search_documents(&SearchFilter {
            from_date: Some(date(2026, 2, 1)),
            to_date: Some(date(2026, 1, 1)),
            ..SearchFilter::default()
        })
        .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn all_filters_combine_with_logical_and() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    let matching = seed(
        &repo,
        &conn,
        "tax invoice",
        "Finance",
        "tax.pdf",
        "2026-01-15 08:00:00",
    );
    // Same keyword, wrong category.
    seed(
        &repo,
        &conn,
        "legal invoice",
        "Legal",
        "l.pdf",
        "2026-01-15 09:00:00",
    );
    // Same keyword and category, outside the date range.
    seed(
        &repo,
        &conn,
        "old invoice",
        "Finance",
        "old.pdf",
        "2025-11-01 08:00:00",
    );

    let hits = repo
        .search_documents(&SearchFilter {
            keyword: Some("invoice".to_string()),
            category: Some("Finance".to_string()),
            from_date: Some(date(2026, 1, 1)),
            to_date: Some(date(2026, 1, 31)),
        })
        .unwrap();
    assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![matching]);
}

#[test]
fn list_categories_is_distinct_and_alphabetical() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);

    seed(&repo, &conn, "a", "Legal", "a.pdf", "2026-01-01 08:00:00");
    seed(&repo, &conn, "b", "Finance", "b.pdf", "2026-01-02 08:00:00");
    seed(&repo, &conn, "c", "Finance", "c.pdf", "2026-01-03 08:00:00");
    seed(&repo, &conn, "d", "Archive", "d.pdf", "2026-01-04 08:00:00");

    let categories = repo.list_categories().unwrap();
    assert_eq!(categories, vec!["Archive", "Finance", "Legal"]);
}
