use chrono::Local;
use ledger::{Amount, LedgerError, Repository, render};
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

async fn repository_with_db() -> (Repository, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    (Repository::new(db.clone()), db)
}

/// Inserts a row with an explicit date, bypassing the repository's
/// dated-today behavior.
async fn insert_dated(db: &DatabaseConnection, cents: i64, memo: &str, date: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO expenses (amount_minor, memo, created_on) VALUES (?, ?, ?)",
        vec![cents.into(), memo.into(), date.into()],
    ))
    .await
    .unwrap();
}

#[tokio::test]
async fn add_then_list_shows_the_new_row_dated_today() {
    let (repository, _db) = repository_with_db().await;

    let added = repository.add(Amount::new(1250), "groceries").await.unwrap();
    assert_eq!(added.id, 1);
    assert_eq!(added.amount, Amount::new(1250));
    assert_eq!(added.memo, "groceries");
    assert_eq!(added.created_on, Local::now().date_naive());

    let rows = repository.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], added);
}

#[tokio::test]
async fn add_rejects_non_positive_amounts_at_the_storage_layer() {
    let (repository, _db) = repository_with_db().await;

    for cents in [0, -100] {
        let err = repository.add(Amount::new(cents), "bad").await.unwrap_err();
        assert!(matches!(err, LedgerError::Database(_)));
    }

    assert!(repository.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_rejects_empty_memo_at_the_storage_layer() {
    let (repository, _db) = repository_with_db().await;

    let err = repository.add(Amount::new(100), "").await.unwrap_err();
    assert!(matches!(err, LedgerError::Database(_)));
    assert!(repository.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_case_insensitive_substrings() {
    let (repository, _db) = repository_with_db().await;
    repository.add(Amount::new(300), "Coffee beans").await.unwrap();
    repository.add(Amount::new(1250), "groceries").await.unwrap();
    repository.add(Amount::new(250), "more coffee").await.unwrap();

    let hits = repository.search("COFFEE").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|e| e.memo.to_lowercase().contains("coffee")));

    // The empty pattern degenerates to matching everything.
    assert_eq!(repository.search("").await.unwrap().len(), 3);

    let none = repository.search("zzz").await.unwrap();
    assert!(none.is_empty());
    assert_eq!(render(&none), "There are no expenses.");
}

#[tokio::test]
async fn delete_by_id_removes_exactly_that_row() {
    let (repository, _db) = repository_with_db().await;
    repository.add(Amount::new(1250), "groceries").await.unwrap();
    let coffee = repository.add(Amount::new(500), "coffee").await.unwrap();

    let deleted = repository.delete_by_id("2").await.unwrap().unwrap();
    assert_eq!(deleted, coffee);

    let rows = repository.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].memo, "groceries");
}

#[tokio::test]
async fn delete_by_id_with_no_match_is_a_soft_no_op() {
    let (repository, _db) = repository_with_db().await;
    repository.add(Amount::new(1250), "groceries").await.unwrap();

    assert_eq!(repository.delete_by_id("99").await.unwrap(), None);
    // A non-numeric token cannot match a row either.
    assert_eq!(repository.delete_by_id("banana").await.unwrap(), None);
    assert_eq!(repository.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn ids_are_never_reused_after_a_delete() {
    let (repository, _db) = repository_with_db().await;
    repository.add(Amount::new(100), "first").await.unwrap();
    let second = repository.add(Amount::new(200), "second").await.unwrap();
    assert_eq!(second.id, 2);

    repository.delete_by_id("2").await.unwrap().unwrap();

    let third = repository.add(Amount::new(300), "third").await.unwrap();
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn delete_all_empties_the_table_and_resets_the_sequence() {
    let (repository, _db) = repository_with_db().await;
    repository.add(Amount::new(1250), "groceries").await.unwrap();
    repository.add(Amount::new(500), "coffee").await.unwrap();

    repository.delete_all().await.unwrap();
    assert!(repository.list().await.unwrap().is_empty());

    let next = repository.add(Amount::new(325), "tea").await.unwrap();
    assert_eq!(next.id, 1);
}

#[tokio::test]
async fn delete_all_on_a_fresh_store_is_safe() {
    let (repository, _db) = repository_with_db().await;

    repository.delete_all().await.unwrap();
    assert!(repository.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_orders_by_date_then_insertion_order() {
    let (repository, db) = repository_with_db().await;
    insert_dated(&db, 500, "older", "2026-01-05").await;
    insert_dated(&db, 700, "oldest", "2025-12-31").await;
    repository.add(Amount::new(100), "today").await.unwrap();
    insert_dated(&db, 900, "same day, inserted later", "2026-01-05").await;

    let rows = repository.list().await.unwrap();
    let memos: Vec<&str> = rows.iter().map(|e| e.memo.as_str()).collect();
    assert_eq!(
        memos,
        vec!["oldest", "older", "same day, inserted later", "today"]
    );
}

#[tokio::test]
async fn report_total_is_an_exact_decimal_sum() {
    let (repository, _db) = repository_with_db().await;
    repository.add(Amount::new(1250), "groceries").await.unwrap();
    repository.add(Amount::new(725), "coffee").await.unwrap();
    repository.add(Amount::new(1), "gum").await.unwrap();

    let out = render(&repository.list().await.unwrap());
    assert!(out.starts_with("There are 3 expenses."));
    assert!(out.ends_with("Total      19.76"));
}
