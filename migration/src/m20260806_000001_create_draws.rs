use sea_orm_migration::prelude::*;

/// Draws (one row per lottery draw)
///
/// draw_number is the external draw identifier and carries the UNIQUE index
/// that makes imports idempotent. draw_date is stored as canonical
/// YYYY-MM-DD text; malformed historical dates are kept verbatim, which is
/// why the column is text and the recency filter compares lexicographically.
#[derive(DeriveIden)]
enum Draws {
    Table,
    Id,
    DrawNumber,
    DrawDate,
    Number1,
    Number2,
    Number3,
    Number4,
    Number5,
    Number6,
    StrongNumber,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Draws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Draws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Draws::DrawNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Draws::DrawDate)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Draws::Number1).integer().not_null())
                    .col(ColumnDef::new(Draws::Number2).integer().not_null())
                    .col(ColumnDef::new(Draws::Number3).integer().not_null())
                    .col(ColumnDef::new(Draws::Number4).integer().not_null())
                    .col(ColumnDef::new(Draws::Number5).integer().not_null())
                    .col(ColumnDef::new(Draws::Number6).integer().not_null())
                    .col(
                        ColumnDef::new(Draws::StrongNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Draws::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // draw_number 唯一索引 (重复导入时 ON CONFLICT DO NOTHING)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_draw_number_unique")
                    .table(Draws::Table)
                    .col(Draws::DrawNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // history / recency queries order by draw_date
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_draws_draw_date")
                    .table(Draws::Table)
                    .col(Draws::DrawDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Draws::Table).to_owned())
            .await?;

        Ok(())
    }
}
