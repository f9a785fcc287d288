pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_categories_table;
mod m20240101_000003_create_dishes_table;
mod m20240101_000004_create_bundles_table;
mod m20240101_000005_create_bundle_items_table;
mod m20240101_000006_create_cart_lines_table;
mod m20240101_000007_create_orders_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_categories_table::Migration),
            Box::new(m20240101_000003_create_dishes_table::Migration),
            Box::new(m20240101_000004_create_bundles_table::Migration),
            Box::new(m20240101_000005_create_bundle_items_table::Migration),
            Box::new(m20240101_000006_create_cart_lines_table::Migration),
            Box::new(m20240101_000007_create_orders_table::Migration),
        ]
    }
}
