//! ReportingEngine 集成测试：真实 SQLite 聚合 + 上海时区日切分

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Asia::Shanghai;
use entity::{OrderStatus, orders, users};
use migration::{Migrator, MigratorTrait};
use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, Database, Set};
use sky_takeout::TakeoutError;
use sky_takeout::management::services::{
    ReportingEngine, SeaOrmReportStore, TurnoverReportView,
};
use std::sync::Arc;

async fn setup_test_db() -> Arc<sea_orm::DatabaseConnection> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn utc(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, minute, 0).expect("valid time")
}

async fn seed_user(db: &sea_orm::DatabaseConnection, openid: &str, created_at: NaiveDateTime) -> i32 {
    users::ActiveModel {
        openid: Set(openid.to_string()),
        name: Set(None),
        phone: Set(None),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert user")
    .id
}

async fn seed_order(
    db: &sea_orm::DatabaseConnection,
    number: &str,
    user_id: i32,
    status: OrderStatus,
    amount: f64,
    order_time: NaiveDateTime,
) {
    orders::ActiveModel {
        number: Set(number.to_string()),
        user_id: Set(user_id),
        status: Set(status),
        amount: Set(amount),
        order_time: Set(order_time),
        checkout_time: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert order");
}

/// 上海时间 1 月 1 日 ~ 1 月 3 日的数据，时间均以 UTC 存储
async fn seed_week(db: &sea_orm::DatabaseConnection) {
    let u1 = seed_user(db, "wx-1", utc(2023, 12, 30, 4, 0)).await;
    seed_user(db, "wx-2", utc(2024, 1, 1, 5, 0)).await;
    // 本地 1 月 3 日 23:59
    seed_user(db, "wx-3", utc(2024, 1, 3, 15, 59)).await;

    // 本地 1 月 1 日 01:00
    seed_order(db, "N1", u1, OrderStatus::Completed, 6.0, utc(2023, 12, 31, 17, 0)).await;
    seed_order(db, "N2", u1, OrderStatus::Completed, 4.0, utc(2024, 1, 1, 2, 0)).await;
    // 本地 1 月 2 日 01:00
    seed_order(db, "N3", u1, OrderStatus::Cancelled, 30.0, utc(2024, 1, 1, 17, 0)).await;
    seed_order(db, "N4", u1, OrderStatus::Completed, 5.0, utc(2024, 1, 3, 3, 0)).await;
    seed_order(db, "N5", u1, OrderStatus::PendingPayment, 8.0, utc(2024, 1, 3, 4, 0)).await;
    // 本地 1 月 4 日 00:00，区间之外
    seed_order(db, "N6", u1, OrderStatus::Completed, 100.0, utc(2024, 1, 3, 16, 0)).await;
}

fn engine(db: Arc<sea_orm::DatabaseConnection>) -> ReportingEngine {
    ReportingEngine::new(Arc::new(SeaOrmReportStore::new(db)), Shanghai, 366)
}

#[tokio::test]
async fn turnover_report_sums_completed_orders_per_local_day() {
    let db = setup_test_db().await;
    seed_week(&db).await;

    let report = engine(db)
        .turnover_report(date(2024, 1, 1), date(2024, 1, 3))
        .await
        .unwrap();

    assert_eq!(report.turnovers, vec![10.0, 0.0, 5.0]);
    assert_eq!(
        report.to_view(),
        TurnoverReportView {
            date_list: "2024-01-01,2024-01-02,2024-01-03".to_string(),
            turnover_list: "10.0,0.0,5.0".to_string(),
        }
    );
}

#[tokio::test]
async fn user_report_counts_cumulative_and_new_users() {
    let db = setup_test_db().await;
    seed_week(&db).await;

    let report = engine(db)
        .user_report(date(2024, 1, 1), date(2024, 1, 3))
        .await
        .unwrap();

    assert_eq!(report.total_users, vec![2, 2, 3]);
    assert_eq!(report.new_users, vec![1, 0, 1]);

    let view = report.to_view();
    assert_eq!(view.total_user_list, "2,2,3");
    assert_eq!(view.new_user_list, "1,0,1");
}

#[tokio::test]
async fn order_report_counts_orders_and_completion_rate() {
    let db = setup_test_db().await;
    seed_week(&db).await;

    let report = engine(db)
        .order_report(date(2024, 1, 1), date(2024, 1, 3))
        .await
        .unwrap();

    assert_eq!(report.order_counts, vec![2, 1, 2]);
    assert_eq!(report.valid_order_counts, vec![2, 0, 1]);
    assert_eq!(report.total_order_count, 5);
    assert_eq!(report.valid_order_count, 3);
    assert!((report.completion_rate - 0.6).abs() < f64::EPSILON);
}

#[tokio::test]
async fn empty_range_yields_zero_series() {
    let db = setup_test_db().await;
    let engine = engine(db);

    let turnover = engine
        .turnover_report(date(2025, 6, 1), date(2025, 6, 2))
        .await
        .unwrap();
    assert_eq!(turnover.to_view().turnover_list, "0.0,0.0");

    let orders = engine
        .order_report(date(2025, 6, 1), date(2025, 6, 2))
        .await
        .unwrap();
    assert_eq!(orders.total_order_count, 0);
    assert_eq!(orders.completion_rate, 0.0);
}

#[tokio::test]
async fn invalid_ranges_are_rejected() {
    let db = setup_test_db().await;
    let engine = engine(db);

    let err = engine
        .user_report(date(2024, 1, 3), date(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, TakeoutError::Validation { .. }));

    let err = engine
        .turnover_report(date(2023, 1, 1), date(2024, 12, 31))
        .await
        .unwrap_err();
    assert!(matches!(err, TakeoutError::Validation { .. }));
}
