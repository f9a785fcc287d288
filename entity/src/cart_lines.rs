//! # 购物车实体定义
//!
//! 用户购物车中的一行；`dish_id` 与 `bundle_id` 恰有一个非空。
//! `line_key` 由定义购物车行的字段派生，(`user_id`, `line_key`) 唯一。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 购物车行实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub dish_id: Option<i32>,
    pub bundle_id: Option<i32>,
    pub dish_flavor: Option<String>,
    pub line_key: String,
    pub name: String,
    pub image: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
