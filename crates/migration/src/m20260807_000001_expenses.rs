//! Creates the `expenses` table.
//!
//! The data invariants live here as storage-level constraints:
//!
//! - `amount_minor` is integer cents and must be strictly positive
//! - `memo` must be non-empty
//! - `created_on` is a non-null calendar date
//! - `id` is an AUTOINCREMENT primary key, so ids are monotonic and never
//!   reused after a delete; only the clear operation resets the sequence

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    AmountMinor,
    Memo,
    CreatedOn,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Expenses::AmountMinor).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Expenses::Memo)
                            .string()
                            .not_null()
                            .check(Expr::col(Expenses::Memo).ne("")),
                    )
                    .col(ColumnDef::new(Expenses::CreatedOn).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-created_on")
                    .table(Expenses::Table)
                    .col(Expenses::CreatedOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        Ok(())
    }
}
