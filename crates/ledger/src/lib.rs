use chrono::Local;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Statement, TransactionTrait,
};

pub use error::LedgerError;
pub use expense::Expense;
pub use money::Amount;
pub use report::render;

mod error;
mod expense;
mod money;
pub mod report;

type ResultLedger<T> = Result<T, LedgerError>;

/// The component owning CRUD/search logic against the relational store.
///
/// The connection is injected so callers (and tests) decide where the data
/// lives; the schema itself belongs to the `migration` crate and must be
/// applied before the first operation runs.
#[derive(Debug)]
pub struct Repository {
    database: DatabaseConnection,
}

impl Repository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    /// Returns all expenses ordered by creation date, oldest first. Ties on
    /// the date fall back to insertion order via the id.
    pub async fn list(&self) -> ResultLedger<Vec<Expense>> {
        let rows = expense::Entity::find()
            .order_by_asc(expense::Column::CreatedOn)
            .order_by_asc(expense::Column::Id)
            .all(&self.database)
            .await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    /// Inserts one expense dated today (local date).
    ///
    /// Non-positive amounts and empty memos are rejected by the storage
    /// constraints, so the failure surfaces as a database error here rather
    /// than being checked up front.
    pub async fn add(&self, amount: Amount, memo: &str) -> ResultLedger<Expense> {
        let created_on = Local::now().date_naive();
        let inserted = Expense::insert_model(amount, memo, created_on)
            .insert(&self.database)
            .await?;

        tracing::debug!(id = inserted.id, "expense recorded");
        Ok(inserted.into())
    }

    /// Returns all expenses whose memo contains `pattern` as a
    /// case-insensitive substring. An empty pattern matches everything.
    pub async fn search(&self, pattern: &str) -> ResultLedger<Vec<Expense>> {
        let needle = format!("%{}%", pattern.to_lowercase());
        let rows = expense::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(expense::Column::Memo))).like(needle))
            .order_by_asc(expense::Column::CreatedOn)
            .order_by_asc(expense::Column::Id)
            .all(&self.database)
            .await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    /// Deletes the expense with the given id, returning the deleted row, or
    /// `None` when nothing matched. The id arrives as a raw token; anything
    /// that does not parse as an id cannot match a row.
    ///
    /// The presence check and the delete run in one transaction so the pair
    /// is atomic.
    pub async fn delete_by_id(&self, id: &str) -> ResultLedger<Option<Expense>> {
        let Ok(id) = id.trim().parse::<i32>() else {
            return Ok(None);
        };

        let tx = self.database.begin().await?;
        let Some(found) = expense::Entity::find_by_id(id).one(&tx).await? else {
            tx.commit().await?;
            return Ok(None);
        };
        expense::Entity::delete_by_id(id).exec(&tx).await?;
        tx.commit().await?;

        tracing::debug!(id, "expense deleted");
        Ok(Some(found.into()))
    }

    /// Deletes every expense and restarts the identity sequence, so the next
    /// insert gets id 1 again. Both statements run in a single transaction.
    pub async fn delete_all(&self) -> ResultLedger<()> {
        let tx = self.database.begin().await?;
        expense::Entity::delete_many().exec(&tx).await?;

        // AUTOINCREMENT keeps its high-water mark in sqlite_sequence; the
        // table exists from the moment the expenses table was created.
        let backend = tx.get_database_backend();
        tx.execute(Statement::from_string(
            backend,
            "DELETE FROM sqlite_sequence WHERE name = 'expenses'",
        ))
        .await?;
        tx.commit().await?;

        tracing::debug!("all expenses deleted, identity sequence reset");
        Ok(())
    }
}
