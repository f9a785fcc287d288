//! # 时区转换类型和工具
//!
//! 数据库中的时间一律按 UTC 存储为 `NaiveDateTime`；自然日的划分按配置时区计算。

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// 一个将本地时间安全转换为UTC时间的工具 Trait
pub trait ConvertToUtc {
    /// 接受一个时区作为参数，返回一个UTC的DateTime
    fn to_utc(&self, tz: &Tz) -> Option<DateTime<Utc>>;
}

impl ConvertToUtc for NaiveDateTime {
    fn to_utc(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        // 歧义时间（夏令时回拨）取较早的时刻，不存在的时间返回 None
        tz.from_local_datetime(self)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// 时区工具函数
pub mod timezone_utils {
    use super::{ConvertToUtc, NaiveDate, NaiveDateTime, Tz};

    /// 本地日期在 `timezone` 中的起始时刻（UTC）
    ///
    /// 午夜落在夏令时跳变缺口内时，取当天第一个存在的整点。
    #[must_use]
    pub fn local_day_start(date: NaiveDate, timezone: &Tz) -> Option<NaiveDateTime> {
        (0..=3).find_map(|hour| {
            date.and_hms_opt(hour, 0, 0)
                .and_then(|local| local.to_utc(timezone))
                .map(|utc| utc.naive_utc())
        })
    }

    /// 本地自然日对应的 UTC 半开区间 `[start, next_start)`
    #[must_use]
    pub fn local_day_bounds(
        date: NaiveDate,
        timezone: &Tz,
    ) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = local_day_start(date, timezone)?;
        let end = local_day_start(date.succ_opt()?, timezone)?;
        Some((start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::timezone_utils;
    use super::{ConvertToUtc, NaiveDate, Tz};
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_convert_to_utc_trait() {
        let tz = Tz::Asia__Shanghai;
        let naive_dt = date(2024, 1, 1).and_hms_opt(12, 0, 0).unwrap();

        let utc_dt = naive_dt.to_utc(&tz).unwrap();
        assert_eq!(utc_dt.hour(), 4); // 上海时间12点 = UTC 4点
    }

    #[test]
    fn test_local_day_bounds_shanghai() {
        let (start, end) = timezone_utils::local_day_bounds(date(2024, 1, 2), &Tz::Asia__Shanghai)
            .unwrap();

        assert_eq!(start, date(2024, 1, 1).and_hms_opt(16, 0, 0).unwrap());
        assert_eq!(end, date(2024, 1, 2).and_hms_opt(16, 0, 0).unwrap());
    }

    #[test]
    fn test_local_day_bounds_across_dst_change() {
        // 2024-03-10 纽约进入夏令时，当天只有 23 小时
        let (start, end) =
            timezone_utils::local_day_bounds(date(2024, 3, 10), &Tz::America__New_York).unwrap();
        assert_eq!((end - start).num_hours(), 23);
    }
}
