//! # 服务层
//!
//! 套餐、购物车与报表三个互不依赖的业务组件，供 HTTP handler 或其它入口复用。

pub mod bundles;
pub mod cart;
pub mod report_store;
pub mod reports;
pub mod shared;

pub use bundles::{
    BundleInput, BundleItemInput, BundleItemView, BundleManager, BundleQuery, BundleSummary,
    BundleView, UpdateBundleRequest, parse_sale_status,
};
pub use cart::{CartAggregator, CartCandidate, CartLineView};
pub use report_store::{AggregateFilter, ReportStore, SeaOrmReportStore};
pub use reports::{
    OrderReport, OrderReportView, ReportQuery, ReportingEngine, TurnoverReport,
    TurnoverReportView, UserReport, UserReportView, completion_rate,
};

pub use shared::{DateRange, DayBucket, PageResult, PaginationParams};
