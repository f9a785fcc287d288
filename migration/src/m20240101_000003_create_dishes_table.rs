use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dishes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dishes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Dishes::Name)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Dishes::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Dishes::Price).double().not_null())
                    .col(ColumnDef::new(Dishes::Image).string_len(255).not_null().default(""))
                    .col(ColumnDef::new(Dishes::Description).string_len(255))
                    .col(ColumnDef::new(Dishes::Status).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Dishes::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Dishes::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dishes_category_id")
                            .from(Dishes::Table, Dishes::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dishes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Dishes {
    Table,
    Id,
    Name,
    CategoryId,
    Price,
    Image,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}
