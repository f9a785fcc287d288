use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BundleItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BundleItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BundleItems::BundleId).integer().not_null())
                    .col(ColumnDef::new(BundleItems::DishId).integer().not_null())
                    .col(ColumnDef::new(BundleItems::Name).string_len(32).not_null())
                    .col(ColumnDef::new(BundleItems::Price).double().not_null())
                    .col(ColumnDef::new(BundleItems::Copies).integer().not_null().default(1))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bundle_items_bundle_id")
                            .from(BundleItems::Table, BundleItems::BundleId)
                            .to(Bundles::Table, Bundles::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bundle_items_dish_id")
                            .from(BundleItems::Table, BundleItems::DishId)
                            .to(Dishes::Table, Dishes::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bundle_items_bundle_dish")
                    .table(BundleItems::Table)
                    .col(BundleItems::BundleId)
                    .col(BundleItems::DishId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bundle_items_dish_id")
                    .table(BundleItems::Table)
                    .col(BundleItems::DishId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BundleItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BundleItems {
    Table,
    Id,
    BundleId,
    DishId,
    Name,
    Price,
    Copies,
}

#[derive(DeriveIden)]
enum Bundles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Dishes {
    Table,
    Id,
}
