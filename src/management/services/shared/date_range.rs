//! 报表使用的闭区间日期切分

use std::fmt::Debug;

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::{
    ensure_validation,
    error::{Result, TakeoutError},
    types::timezone_utils,
};

/// 闭区间 `[begin, end]` 的自然日序列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    begin: NaiveDate,
    end: NaiveDate,
}

/// 一个自然日对应的 UTC 时间区间 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    /// 校验并构造日期区间；`begin > end` 或天数超过 `max_days` 时返回校验错误
    pub fn new(begin: NaiveDate, end: NaiveDate, max_days: u32) -> Result<Self> {
        ensure_validation!(
            begin <= end,
            "开始日期 {} 不能晚于结束日期 {}",
            begin,
            end
        );

        let range = Self { begin, end };
        ensure_validation!(
            range.day_count() <= max_days as usize,
            "统计区间 {} 天超过上限 {} 天",
            range.day_count(),
            max_days
        );

        Ok(range)
    }

    /// 区间内的天数，含首尾
    #[must_use]
    pub fn day_count(&self) -> usize {
        let days = self.end.signed_duration_since(self.begin).num_days();
        usize::try_from(days).map_or(0, |days| days + 1)
    }

    /// 升序的日期序列
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.begin.iter_days().take(self.day_count()).collect()
    }

    /// 按 `timezone` 把每个日期换算成 UTC 区间
    pub fn buckets(&self, timezone: &Tz) -> Result<Vec<DayBucket>> {
        self.dates()
            .into_iter()
            .map(|date| {
                let (start, end) = timezone_utils::local_day_bounds(date, timezone).ok_or_else(
                    || TakeoutError::internal(format!("无法计算 {date} 在 {timezone} 的日界")),
                )?;
                Ok(DayBucket { date, start, end })
            })
            .collect()
    }
}

/// 用逗号拼接序列
///
/// 浮点数使用 `Debug` 格式，整数金额也保留一位小数（`10.0`）。
#[must_use]
pub fn join_series<T: Debug>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| format!("{value:?}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// 日期序列拼接为 `yyyy-MM-dd,...`
#[must_use]
pub fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(",")
}
