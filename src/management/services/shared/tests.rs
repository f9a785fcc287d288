use super::date_range::join_dates;
use super::{DateRange, PaginationParams, join_series};
use crate::error::TakeoutError;
use chrono::NaiveDate;
use chrono_tz::{Asia::Shanghai, UTC};
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn pagination_params_apply_defaults_and_limits() {
    let params = PaginationParams::new(Some(0), Some(200), 10, 100);
    assert_eq!(params.page, 1, "page 应回退到最小值 1");
    assert_eq!(params.page_size, 100, "page_size 应被限制在最大值内");
    assert_eq!(params.offset(), 0, "第一页 offset 应为 0");

    let params = PaginationParams::new(Some(3), None, 10, 100);
    assert_eq!(params.page_size, 10);
    assert_eq!(params.offset(), 20);

    let params = PaginationParams::new(None, Some(0), 10, 100);
    assert_eq!(params.page_size, 1, "page_size 下限为 1");
}

#[rstest]
#[case(date(2024, 1, 1), date(2024, 1, 1), 1)]
#[case(date(2024, 1, 1), date(2024, 1, 3), 3)]
#[case(date(2024, 2, 27), date(2024, 3, 1), 4)]
#[case(date(2023, 12, 30), date(2024, 1, 2), 4)]
fn date_range_has_one_entry_per_day(
    #[case] begin: NaiveDate,
    #[case] end: NaiveDate,
    #[case] expected: usize,
) {
    let range = DateRange::new(begin, end, 366).expect("valid range");
    let dates = range.dates();

    assert_eq!(range.day_count(), expected);
    assert_eq!(dates.len(), expected);
    assert_eq!(dates.first(), Some(&begin));
    assert_eq!(dates.last(), Some(&end));
    assert!(dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
}

#[test]
fn date_range_rejects_reversed_bounds() {
    let err = DateRange::new(date(2024, 1, 3), date(2024, 1, 1), 366).unwrap_err();
    assert!(matches!(err, TakeoutError::Validation { .. }));
}

#[test]
fn date_range_rejects_too_long_range() {
    assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 7), 7).is_ok());
    let err = DateRange::new(date(2024, 1, 1), date(2024, 1, 8), 7).unwrap_err();
    assert!(matches!(err, TakeoutError::Validation { .. }));
}

#[test]
fn buckets_are_contiguous_half_open_intervals() {
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3), 366).unwrap();
    let buckets = range.buckets(&Shanghai).unwrap();

    assert_eq!(buckets.len(), 3);
    assert_eq!(
        buckets[0].start,
        date(2023, 12, 31).and_hms_opt(16, 0, 0).unwrap()
    );
    assert!(buckets.windows(2).all(|pair| pair[0].end == pair[1].start));
}

#[test]
fn utc_buckets_start_at_midnight() {
    let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 1), 366).unwrap();
    let bucket = range.buckets(&UTC).unwrap()[0];

    assert_eq!(bucket.start, date(2024, 5, 1).and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(bucket.end, date(2024, 5, 2).and_hms_opt(0, 0, 0).unwrap());
}

#[test]
fn join_helpers_render_series() {
    assert_eq!(join_series(&[10.0_f64, 0.0, 5.5]), "10.0,0.0,5.5");
    assert_eq!(join_series(&[1_u64, 2, 3]), "1,2,3");
    assert_eq!(join_series::<u64>(&[]), "");
    assert_eq!(
        join_dates(&[date(2024, 1, 1), date(2024, 1, 2)]),
        "2024-01-01,2024-01-02"
    );
}
