//! # 用户实体定义
//!
//! C 端用户表的 Sea-ORM 实体模型，报表按 `created_at` 统计新增 / 累计用户

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 用户实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub openid: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_lines::Entity")]
    CartLines,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::cart_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartLines.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
