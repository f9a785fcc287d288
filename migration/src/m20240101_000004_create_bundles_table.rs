use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bundles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bundles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bundles::CategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(Bundles::Name)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Bundles::Price).double().not_null())
                    // 新建套餐默认停售
                    .col(ColumnDef::new(Bundles::Status).integer().not_null().default(0))
                    .col(ColumnDef::new(Bundles::Description).string_len(255))
                    .col(ColumnDef::new(Bundles::Image).string_len(255).not_null().default(""))
                    .col(
                        ColumnDef::new(Bundles::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bundles::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bundles_category_id")
                            .from(Bundles::Table, Bundles::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bundles_category_status")
                    .table(Bundles::Table)
                    .col(Bundles::CategoryId)
                    .col(Bundles::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bundles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bundles {
    Table,
    Id,
    CategoryId,
    Name,
    Price,
    Status,
    Description,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}
