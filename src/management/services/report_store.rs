//! # 报表聚合查询
//!
//! 报表引擎只通过 [`ReportStore`] 访问持久层，按命名边界做聚合。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use entity::{OrderStatus, Orders, Users, orders, users};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Select,
};
use tracing::debug;

use crate::error::{Context, Result};

/// 聚合查询条件
///
/// 时间区间为半开区间 `[begin, end)`；`begin` 为空表示不设下界。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateFilter {
    pub begin: Option<NaiveDateTime>,
    pub end: NaiveDateTime,
    pub status: Option<OrderStatus>,
}

impl AggregateFilter {
    /// `[begin, end)` 内的全部记录
    #[must_use]
    pub const fn between(begin: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            begin: Some(begin),
            end,
            status: None,
        }
    }

    /// 截止到 `end`（不含）的全部记录
    #[must_use]
    pub const fn until(end: NaiveDateTime) -> Self {
        Self {
            begin: None,
            end,
            status: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// 报表所需的三类聚合查询
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// 订单金额合计；没有匹配订单时为 0.0
    async fn sum_turnover(&self, filter: &AggregateFilter) -> Result<f64>;

    /// 按下单时间统计订单数
    async fn count_orders(&self, filter: &AggregateFilter) -> Result<u64>;

    /// 按注册时间统计用户数，忽略 `status`
    async fn count_users(&self, filter: &AggregateFilter) -> Result<u64>;
}

/// 基于 sea-orm 的实现
#[derive(Clone)]
pub struct SeaOrmReportStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReportStore {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn filtered_orders(filter: &AggregateFilter) -> Select<Orders> {
        let mut select = Orders::find().filter(orders::Column::OrderTime.lt(filter.end));
        if let Some(begin) = filter.begin {
            select = select.filter(orders::Column::OrderTime.gte(begin));
        }
        if let Some(status) = filter.status {
            select = select.filter(orders::Column::Status.eq(status));
        }
        select
    }
}

#[async_trait]
impl ReportStore for SeaOrmReportStore {
    async fn sum_turnover(&self, filter: &AggregateFilter) -> Result<f64> {
        let turnover: Option<f64> = Self::filtered_orders(filter)
            .select_only()
            .column_as(orders::Column::Amount.sum(), "turnover")
            .into_tuple::<Option<f64>>()
            .one(self.db.as_ref())
            .await
            .context("Failed to sum order turnover")?
            .flatten();

        debug!(?filter, ?turnover, "Summed turnover");
        Ok(turnover.unwrap_or(0.0))
    }

    async fn count_orders(&self, filter: &AggregateFilter) -> Result<u64> {
        Self::filtered_orders(filter)
            .count(self.db.as_ref())
            .await
            .context("Failed to count orders")
    }

    async fn count_users(&self, filter: &AggregateFilter) -> Result<u64> {
        let mut select = Users::find().filter(users::Column::CreatedAt.lt(filter.end));
        if let Some(begin) = filter.begin {
            select = select.filter(users::Column::CreatedAt.gte(begin));
        }

        select
            .count(self.db.as_ref())
            .await
            .context("Failed to count users")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{OrderFixture, UserFixture, create_test_db, utc};

    #[tokio::test]
    async fn filters_are_half_open_and_respect_status() {
        let db = create_test_db().await.unwrap();
        let user = UserFixture::new("wx-1")
            .created_at(utc((2024, 1, 1), 8, 0))
            .insert(db.as_ref())
            .await
            .unwrap();

        OrderFixture::new("A1", user.id, 10.0, utc((2024, 1, 1), 0, 0))
            .insert(db.as_ref())
            .await
            .unwrap();
        OrderFixture::new("A2", user.id, 4.5, utc((2024, 1, 1), 23, 59))
            .status(OrderStatus::Cancelled)
            .insert(db.as_ref())
            .await
            .unwrap();
        // 恰好落在上界，不计入
        OrderFixture::new("A3", user.id, 99.0, utc((2024, 1, 2), 0, 0))
            .insert(db.as_ref())
            .await
            .unwrap();

        let store = SeaOrmReportStore::new(db);
        let day = AggregateFilter::between(utc((2024, 1, 1), 0, 0), utc((2024, 1, 2), 0, 0));

        assert_eq!(store.count_orders(&day).await.unwrap(), 2);
        assert_eq!(
            store
                .count_orders(&day.with_status(OrderStatus::Completed))
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .sum_turnover(&day.with_status(OrderStatus::Completed))
                .await
                .unwrap(),
            10.0
        );
        assert_eq!(store.count_users(&day).await.unwrap(), 1);
        assert_eq!(
            store
                .count_users(&AggregateFilter::until(utc((2024, 1, 1), 8, 0)))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn empty_sum_is_zero() {
        let db = create_test_db().await.unwrap();
        let store = SeaOrmReportStore::new(db);

        let filter = AggregateFilter::until(utc((2030, 1, 1), 0, 0)).with_status(OrderStatus::Completed);
        assert_eq!(store.sum_turnover(&filter).await.unwrap(), 0.0);
    }
}
