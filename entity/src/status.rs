//! # 状态枚举定义
//!
//! 以整数形式落库的业务状态，供各实体复用

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 起售 / 停售状态（菜品、套餐、分类共用）
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// 停售
    #[sea_orm(num_value = 0)]
    Disabled,
    /// 起售
    #[sea_orm(num_value = 1)]
    Enabled,
}

impl SaleStatus {
    /// 从接口层的整数编码解析
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Disabled),
            1 => Some(Self::Enabled),
            _ => None,
        }
    }

    /// 整数编码（0 停售，1 起售）
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Disabled => 0,
            Self::Enabled => 1,
        }
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// 订单状态
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// 待付款
    #[sea_orm(num_value = 1)]
    PendingPayment,
    /// 待接单
    #[sea_orm(num_value = 2)]
    ToBeConfirmed,
    /// 已接单
    #[sea_orm(num_value = 3)]
    Confirmed,
    /// 派送中
    #[sea_orm(num_value = 4)]
    Delivering,
    /// 已完成
    #[sea_orm(num_value = 5)]
    Completed,
    /// 已取消
    #[sea_orm(num_value = 6)]
    Cancelled,
}

/// 分类类型
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// 菜品分类
    #[sea_orm(num_value = 1)]
    Dish,
    /// 套餐分类
    #[sea_orm(num_value = 2)]
    Bundle,
}
