//! # 套餐菜品关系实体定义
//!
//! 套餐与菜品的成员关系，记录关联时的菜品名称与价格快照。
//! 行的生命周期完全归属于所在套餐。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 套餐菜品关系实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bundle_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bundle_id: i32,
    pub dish_id: i32,
    pub name: String,
    pub price: f64,
    pub copies: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bundles::Entity",
        from = "Column::BundleId",
        to = "super::bundles::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Bundle,
    #[sea_orm(
        belongs_to = "super::dishes::Entity",
        from = "Column::DishId",
        to = "super::dishes::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Dish,
}

impl Related<super::bundles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundle.def()
    }
}

impl Related<super::dishes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dish.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
