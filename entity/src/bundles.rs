//! # 套餐实体定义
//!
//! 由若干菜品组合而成的可售商品

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::status::SaleStatus;

/// 套餐实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bundles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub price: f64,
    pub status: SaleStatus,
    pub description: Option<String>,
    pub image: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::bundle_items::Entity")]
    BundleItems,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::bundle_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BundleItems.def()
    }
}

/// 通过 `bundle_items` 关联到成员菜品
impl Related<super::dishes::Entity> for Entity {
    fn to() -> RelationDef {
        super::bundle_items::Relation::Dish.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::bundle_items::Relation::Bundle.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
