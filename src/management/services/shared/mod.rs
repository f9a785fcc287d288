//! # 服务层共享工具
//!
//! 提供分页、日期区间切分等辅助方法，避免在各域服务中重复实现。

pub mod date_range;
pub mod pagination;

pub use date_range::{DateRange, DayBucket, join_dates, join_series};
pub use pagination::{PageResult, PaginationParams, validate_name_format};

#[cfg(test)]
mod tests;
