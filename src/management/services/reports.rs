//! # 运营报表服务
//!
//! 把 `[begin, end]` 切成自然日，逐日聚合营业额、用户数与订单数。

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use entity::OrderStatus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

use super::report_store::{AggregateFilter, ReportStore};
use super::shared::{DateRange, DayBucket, join_dates, join_series};

/// 报表查询参数（`yyyy-MM-dd`）
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportQuery {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

/// 营业额报表
#[derive(Debug, Clone, PartialEq)]
pub struct TurnoverReport {
    pub dates: Vec<NaiveDate>,
    pub turnovers: Vec<f64>,
}

/// 用户报表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReport {
    pub dates: Vec<NaiveDate>,
    pub total_users: Vec<u64>,
    pub new_users: Vec<u64>,
}

/// 订单报表
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReport {
    pub dates: Vec<NaiveDate>,
    pub order_counts: Vec<u64>,
    pub valid_order_counts: Vec<u64>,
    pub total_order_count: u64,
    pub valid_order_count: u64,
    /// 区间内没有订单时为 0.0
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverReportView {
    pub date_list: String,
    pub turnover_list: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReportView {
    pub date_list: String,
    pub total_user_list: String,
    pub new_user_list: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReportView {
    pub date_list: String,
    pub order_count_list: String,
    pub valid_order_count_list: String,
    pub total_order_count: u64,
    pub valid_order_count: u64,
    pub order_completion_rate: f64,
}

impl TurnoverReport {
    #[must_use]
    pub fn to_view(&self) -> TurnoverReportView {
        TurnoverReportView {
            date_list: join_dates(&self.dates),
            turnover_list: join_series(&self.turnovers),
        }
    }
}

impl UserReport {
    #[must_use]
    pub fn to_view(&self) -> UserReportView {
        UserReportView {
            date_list: join_dates(&self.dates),
            total_user_list: join_series(&self.total_users),
            new_user_list: join_series(&self.new_users),
        }
    }
}

impl OrderReport {
    #[must_use]
    pub fn to_view(&self) -> OrderReportView {
        OrderReportView {
            date_list: join_dates(&self.dates),
            order_count_list: join_series(&self.order_counts),
            valid_order_count_list: join_series(&self.valid_order_counts),
            total_order_count: self.total_order_count,
            valid_order_count: self.valid_order_count,
            order_completion_rate: self.completion_rate,
        }
    }
}

/// 完成率；分母为 0 时返回 0.0
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn completion_rate(valid: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        valid as f64 / total as f64
    }
}

/// 报表引擎
///
/// 只读，不持有任何锁；每次请求都重新聚合。
#[derive(Clone)]
pub struct ReportingEngine {
    store: Arc<dyn ReportStore>,
    timezone: Tz,
    max_range_days: u32,
}

impl ReportingEngine {
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>, timezone: Tz, max_range_days: u32) -> Self {
        Self {
            store,
            timezone,
            max_range_days,
        }
    }

    fn buckets(&self, begin: NaiveDate, end: NaiveDate) -> Result<(Vec<NaiveDate>, Vec<DayBucket>)> {
        let range = DateRange::new(begin, end, self.max_range_days)?;
        let buckets = range.buckets(&self.timezone)?;
        let dates = buckets.iter().map(|bucket| bucket.date).collect();
        debug!(%begin, %end, days = buckets.len(), tz = %self.timezone, "Resolved report buckets");
        Ok((dates, buckets))
    }

    /// 每日已完成订单的营业额
    pub async fn turnover_report(&self, begin: NaiveDate, end: NaiveDate) -> Result<TurnoverReport> {
        let (dates, buckets) = self.buckets(begin, end)?;

        let mut turnovers = Vec::with_capacity(buckets.len());
        for bucket in &buckets {
            let filter = AggregateFilter::between(bucket.start, bucket.end)
                .with_status(OrderStatus::Completed);
            turnovers.push(self.store.sum_turnover(&filter).await?);
        }

        info!(%begin, %end, "Built turnover report");
        Ok(TurnoverReport { dates, turnovers })
    }

    /// 每日累计用户数与新增用户数
    pub async fn user_report(&self, begin: NaiveDate, end: NaiveDate) -> Result<UserReport> {
        let (dates, buckets) = self.buckets(begin, end)?;

        let mut total_users = Vec::with_capacity(buckets.len());
        let mut new_users = Vec::with_capacity(buckets.len());
        for bucket in &buckets {
            total_users.push(self.store.count_users(&AggregateFilter::until(bucket.end)).await?);
            new_users.push(
                self.store
                    .count_users(&AggregateFilter::between(bucket.start, bucket.end))
                    .await?,
            );
        }

        info!(%begin, %end, "Built user report");
        Ok(UserReport {
            dates,
            total_users,
            new_users,
        })
    }

    /// 每日订单数、有效订单数以及区间完成率
    pub async fn order_report(&self, begin: NaiveDate, end: NaiveDate) -> Result<OrderReport> {
        let (dates, buckets) = self.buckets(begin, end)?;

        let mut order_counts = Vec::with_capacity(buckets.len());
        let mut valid_order_counts = Vec::with_capacity(buckets.len());
        for bucket in &buckets {
            let filter = AggregateFilter::between(bucket.start, bucket.end);
            order_counts.push(self.store.count_orders(&filter).await?);
            valid_order_counts.push(
                self.store
                    .count_orders(&filter.with_status(OrderStatus::Completed))
                    .await?,
            );
        }

        let total_order_count: u64 = order_counts.iter().sum();
        let valid_order_count: u64 = valid_order_counts.iter().sum();

        info!(%begin, %end, total_order_count, valid_order_count, "Built order report");
        Ok(OrderReport {
            dates,
            order_counts,
            valid_order_counts,
            total_order_count,
            valid_order_count,
            completion_rate: completion_rate(valid_order_count, total_order_count),
        })
    }
}
