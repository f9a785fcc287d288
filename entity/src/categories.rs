//! # 分类实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::status::{CategoryKind, SaleStatus};

/// 分类实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kind: CategoryKind,
    #[sea_orm(unique)]
    pub name: String,
    pub sort: i32,
    pub status: SaleStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dishes::Entity")]
    Dishes,
    #[sea_orm(has_many = "super::bundles::Entity")]
    Bundles,
}

impl Related<super::dishes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dishes.def()
    }
}

impl Related<super::bundles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
