use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartLines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CartLines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CartLines::UserId).integer().not_null())
                    .col(ColumnDef::new(CartLines::DishId).integer())
                    .col(ColumnDef::new(CartLines::BundleId).integer())
                    .col(ColumnDef::new(CartLines::DishFlavor).string_len(50))
                    .col(ColumnDef::new(CartLines::LineKey).string_len(128).not_null())
                    .col(ColumnDef::new(CartLines::Name).string_len(32).not_null())
                    .col(ColumnDef::new(CartLines::Image).string_len(255).not_null().default(""))
                    .col(ColumnDef::new(CartLines::UnitPrice).double().not_null())
                    .col(ColumnDef::new(CartLines::Quantity).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(CartLines::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_lines_user_id")
                            .from(CartLines::Table, CartLines::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一用户同一购物车定义只允许一行，并发加购时由 upsert 合并
        manager
            .create_index(
                Index::create()
                    .name("idx_cart_lines_user_line_key")
                    .table(CartLines::Table)
                    .col(CartLines::UserId)
                    .col(CartLines::LineKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartLines::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CartLines {
    Table,
    Id,
    UserId,
    DishId,
    BundleId,
    DishFlavor,
    LineKey,
    Name,
    Image,
    UnitPrice,
    Quantity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
