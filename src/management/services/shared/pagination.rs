use serde::Serialize;

use crate::{ensure_validation, error::Result};

/// `i64::MAX`
const MAX_OFFSET: u64 = u64::MAX >> 1;

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// 当前页码（>= 1）
    pub page: u64,
    /// 每页条数（>= 1）
    pub page_size: u64,
}

impl PaginationParams {
    /// 根据可选参数创建分页配置，并应用默认值与上限。
    #[must_use]
    pub fn new(
        page: Option<u64>,
        page_size: Option<u64>,
        default_page_size: u64,
        max_page_size: u64,
    ) -> Self {
        let max_page_size = max_page_size.max(1);
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(default_page_size)
            .clamp(1, max_page_size);
        Self { page, page_size }
    }

    /// 跳过的行数，封顶在 SQLite 可接受的 `i64::MAX`
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let offset = (self.page - 1).saturating_mul(self.page_size);
        if offset > MAX_OFFSET { MAX_OFFSET } else { offset }
    }
}

/// 分页查询结果
#[derive(Debug, Clone, Serialize)]
pub struct PageResult<T> {
    pub total: u64,
    pub records: Vec<T>,
}

impl<T> PageResult<T> {
    #[must_use]
    pub const fn new(total: u64, records: Vec<T>) -> Self {
        Self { total, records }
    }
}

/// 验证名称格式
///
/// # 规则
/// - 不能为空
/// - 不能只包含空白字符
/// - 长度不能超过 `max_chars` 个字符
pub fn validate_name_format(name: &str, max_chars: usize) -> Result<()> {
    let trimmed = name.trim();

    ensure_validation!(!trimmed.is_empty(), "名称不能为空");
    ensure_validation!(
        trimmed.chars().count() <= max_chars,
        "名称长度不能超过 {} 个字符",
        max_chars
    );

    Ok(())
}
