//! # 测试数据 Fixtures
//!
//! 用户、分类、菜品与订单的构建器，直接写入数据库

use chrono::{NaiveDateTime, Utc};
use entity::{CategoryKind, OrderStatus, SaleStatus, categories, dishes, orders, users};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

/// 用户测试数据构建器
pub struct UserFixture {
    pub openid: String,
    pub name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl UserFixture {
    pub fn new(openid: &str) -> Self {
        Self {
            openid: openid.to_string(),
            name: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// 注册时间（UTC）
    #[must_use]
    pub const fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<users::Model, DbErr> {
        users::ActiveModel {
            openid: Set(self.openid),
            name: Set(self.name),
            phone: Set(None),
            created_at: Set(self.created_at),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

/// 分类测试数据构建器，默认是套餐分类
pub struct CategoryFixture {
    pub name: String,
    pub kind: CategoryKind,
}

impl CategoryFixture {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: CategoryKind::Bundle,
        }
    }

    #[must_use]
    pub const fn kind(mut self, kind: CategoryKind) -> Self {
        self.kind = kind;
        self
    }

    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<categories::Model, DbErr> {
        let now = Utc::now().naive_utc();
        categories::ActiveModel {
            kind: Set(self.kind),
            name: Set(self.name),
            sort: Set(0),
            status: Set(SaleStatus::Enabled),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

/// 菜品测试数据构建器，默认启售
pub struct DishFixture {
    pub category_id: i32,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub status: SaleStatus,
}

impl DishFixture {
    pub fn new(category_id: i32, name: &str, price: f64) -> Self {
        Self {
            category_id,
            name: name.to_string(),
            price,
            image: format!("{name}.png"),
            status: SaleStatus::Enabled,
        }
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.status = SaleStatus::Disabled;
        self
    }

    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<dishes::Model, DbErr> {
        let now = Utc::now().naive_utc();
        dishes::ActiveModel {
            name: Set(self.name),
            category_id: Set(self.category_id),
            price: Set(self.price),
            image: Set(self.image),
            description: Set(None),
            status: Set(self.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}

/// 订单测试数据构建器，默认已完成
pub struct OrderFixture {
    pub number: String,
    pub user_id: i32,
    pub status: OrderStatus,
    pub amount: f64,
    pub order_time: NaiveDateTime,
}

impl OrderFixture {
    pub fn new(number: &str, user_id: i32, amount: f64, order_time: NaiveDateTime) -> Self {
        Self {
            number: number.to_string(),
            user_id,
            status: OrderStatus::Completed,
            amount,
            order_time,
        }
    }

    #[must_use]
    pub const fn status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn insert<C: ConnectionTrait>(self, db: &C) -> Result<orders::Model, DbErr> {
        let checkout_time = (self.status == OrderStatus::Completed).then_some(self.order_time);
        orders::ActiveModel {
            number: Set(self.number),
            user_id: Set(self.user_id),
            status: Set(self.status),
            amount: Set(self.amount),
            order_time: Set(self.order_time),
            checkout_time: Set(checkout_time),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
