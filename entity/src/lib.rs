//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod status;

pub mod users;
pub mod categories;
pub mod dishes;
pub mod bundles;
pub mod bundle_items;
pub mod cart_lines;
pub mod orders;

pub use status::{CategoryKind, OrderStatus, SaleStatus};

pub use users::Entity as Users;
pub use categories::Entity as Categories;
pub use dishes::Entity as Dishes;
pub use bundles::Entity as Bundles;
pub use bundle_items::Entity as BundleItems;
pub use cart_lines::Entity as CartLines;
pub use orders::Entity as Orders;
