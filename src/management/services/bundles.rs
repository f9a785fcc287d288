//! # 套餐管理服务
//!
//! 套餐及其菜品组成的增删改查。所有多步写操作都在单个事务内完成，
//! 校验全部发生在第一次写入之前。

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use entity::{
    BundleItems, Bundles, Categories, CategoryKind, Dishes, SaleStatus, bundle_items, bundles,
    categories, dishes,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PaginationConfig;
use crate::error::{Context, Result, TakeoutError};
use crate::{ensure_precondition, ensure_validation};

use super::shared::{PageResult, PaginationParams, validate_name_format};

const BUNDLE_NAME_MAX_CHARS: usize = 32;

/// 套餐内的一道菜
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleItemInput {
    pub dish_id: i32,
    #[serde(default = "default_copies")]
    pub copies: i32,
}

const fn default_copies() -> i32 {
    1
}

/// 新建或修改套餐时提交的完整定义
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleInput {
    pub category_id: i32,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub description: Option<String>,
    /// 完整的菜品列表，修改时整体替换
    #[serde(default, alias = "setmealDishes")]
    pub items: Vec<BundleItemInput>,
}

/// 修改套餐请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBundleRequest {
    pub id: i32,
    #[serde(flatten)]
    pub bundle: BundleInput,
}

/// 分页查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub status: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleItemView {
    pub id: i32,
    pub dish_id: i32,
    pub name: String,
    pub price: f64,
    pub copies: i32,
}

/// 套餐详情（含菜品组成）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleView {
    pub id: i32,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub name: String,
    pub price: f64,
    pub status: i32,
    pub description: Option<String>,
    pub image: String,
    pub updated_at: String,
    pub items: Vec<BundleItemView>,
}

/// 分页列表中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSummary {
    pub id: i32,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub name: String,
    pub price: f64,
    pub status: i32,
    pub description: Option<String>,
    pub image: String,
    pub updated_at: String,
}

impl BundleItemView {
    fn from_model(item: bundle_items::Model) -> Self {
        Self {
            id: item.id,
            dish_id: item.dish_id,
            name: item.name,
            price: item.price,
            copies: item.copies,
        }
    }
}

impl BundleSummary {
    fn from_models(bundle: bundles::Model, category: Option<categories::Model>) -> Self {
        Self {
            id: bundle.id,
            category_id: bundle.category_id,
            category_name: category.map(|c| c.name),
            name: bundle.name,
            price: bundle.price,
            status: bundle.status.code(),
            description: bundle.description,
            image: bundle.image,
            updated_at: bundle.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl BundleView {
    fn from_models(
        bundle: bundles::Model,
        category: Option<categories::Model>,
        items: Vec<bundle_items::Model>,
    ) -> Self {
        let summary = BundleSummary::from_models(bundle, category);
        Self {
            id: summary.id,
            category_id: summary.category_id,
            category_name: summary.category_name,
            name: summary.name,
            price: summary.price,
            status: summary.status,
            description: summary.description,
            image: summary.image,
            updated_at: summary.updated_at,
            items: items.into_iter().map(BundleItemView::from_model).collect(),
        }
    }
}

/// 把接口层的状态码解析为 [`SaleStatus`]
pub fn parse_sale_status(code: i32) -> Result<SaleStatus> {
    SaleStatus::from_code(code).ok_or_else(|| {
        TakeoutError::validation_field(format!("无效的售卖状态: {code}"), "status")
    })
}

/// 与数据库无关的输入校验
fn validate_bundle_input(input: &BundleInput) -> Result<()> {
    validate_name_format(&input.name, BUNDLE_NAME_MAX_CHARS)?;
    ensure_validation!(
        input.price.is_finite() && input.price >= 0.0,
        "套餐价格不能为负数: {}",
        input.price
    );

    let mut seen = HashSet::with_capacity(input.items.len());
    for item in &input.items {
        ensure_validation!(
            item.copies >= 1,
            "菜品 {} 的份数必须大于0, 实际 {}",
            item.dish_id,
            item.copies
        );
        ensure_validation!(
            seen.insert(item.dish_id),
            "套餐中菜品 {} 重复",
            item.dish_id
        );
    }

    Ok(())
}

/// 套餐管理服务
#[derive(Clone)]
pub struct BundleManager {
    db: Arc<DatabaseConnection>,
    pagination: PaginationConfig,
}

impl BundleManager {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, pagination: PaginationConfig) -> Self {
        Self { db, pagination }
    }

    fn db(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    /// 新建套餐，返回生成的 id；新套餐默认停售
    pub async fn create(&self, input: &BundleInput) -> Result<i32> {
        validate_bundle_input(input)?;

        let txn = self.db().begin().await.context("Failed to begin transaction")?;

        Self::ensure_bundle_category(&txn, input.category_id).await?;
        Self::ensure_name_available(&txn, &input.name, None).await?;
        let dishes = Self::load_member_dishes(&txn, &input.items).await?;

        let now = Utc::now().naive_utc();
        let bundle = bundles::ActiveModel {
            category_id: Set(input.category_id),
            name: Set(input.name.trim().to_string()),
            price: Set(input.price),
            status: Set(SaleStatus::Disabled),
            description: Set(input.description.clone()),
            image: Set(input.image.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert bundle")?;

        Self::insert_items(&txn, bundle.id, &input.items, &dishes).await?;

        txn.commit().await.context("Failed to commit bundle creation")?;

        info!(
            bundle_id = bundle.id,
            items = input.items.len(),
            "Bundle created"
        );
        Ok(bundle.id)
    }

    /// 修改套餐：更新基本字段并整体替换菜品组成
    pub async fn update(&self, bundle_id: i32, input: &BundleInput) -> Result<()> {
        validate_bundle_input(input)?;

        let txn = self.db().begin().await.context("Failed to begin transaction")?;

        let bundle = Self::find_bundle(&txn, bundle_id).await?;
        Self::ensure_bundle_category(&txn, input.category_id).await?;
        Self::ensure_name_available(&txn, &input.name, Some(bundle_id)).await?;
        let dishes = Self::load_member_dishes(&txn, &input.items).await?;

        let mut active: bundles::ActiveModel = bundle.into();
        active.category_id = Set(input.category_id);
        active.name = Set(input.name.trim().to_string());
        active.price = Set(input.price);
        active.description = Set(input.description.clone());
        active.image = Set(input.image.clone());
        active.updated_at = Set(Utc::now().naive_utc());
        active
            .update(&txn)
            .await
            .context("Failed to update bundle")?;

        BundleItems::delete_many()
            .filter(bundle_items::Column::BundleId.eq(bundle_id))
            .exec(&txn)
            .await
            .context("Failed to remove bundle items")?;
        Self::insert_items(&txn, bundle_id, &input.items, &dishes).await?;

        txn.commit().await.context("Failed to commit bundle update")?;

        info!(bundle_id, items = input.items.len(), "Bundle updated");
        Ok(())
    }

    /// 起售或停售
    ///
    /// 起售前检查全部成员菜品，任一停售则整个操作失败且状态不变。
    pub async fn set_status(&self, bundle_id: i32, status: SaleStatus) -> Result<()> {
        let txn = self.db().begin().await.context("Failed to begin transaction")?;

        let bundle = Self::find_bundle(&txn, bundle_id).await?;

        if status.is_enabled() {
            let disabled: Vec<String> = bundle
                .find_related(Dishes)
                .filter(dishes::Column::Status.eq(SaleStatus::Disabled))
                .all(&txn)
                .await
                .context("Failed to load bundle dishes")?
                .into_iter()
                .map(|dish| dish.name)
                .collect();

            if !disabled.is_empty() {
                warn!(bundle_id, ?disabled, "Refusing to enable bundle with disabled dishes");
            }
            ensure_precondition!(
                disabled.is_empty(),
                "套餐内包含未启售菜品，无法启售: {}",
                disabled.join(",")
            );
        }

        let mut active: bundles::ActiveModel = bundle.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().naive_utc());
        active
            .update(&txn)
            .await
            .context("Failed to update bundle status")?;

        txn.commit().await.context("Failed to commit bundle status")?;

        info!(bundle_id, ?status, "Bundle status changed");
        Ok(())
    }

    /// 查询套餐详情及当前菜品组成
    pub async fn get_by_id(&self, bundle_id: i32) -> Result<BundleView> {
        let (bundle, category) = Bundles::find_by_id(bundle_id)
            .find_also_related(Categories)
            .one(self.db())
            .await
            .context("Failed to load bundle")?
            .ok_or_else(|| TakeoutError::not_found("bundle", bundle_id))?;

        let items = bundle
            .find_related(BundleItems)
            .order_by_asc(bundle_items::Column::Id)
            .all(self.db())
            .await
            .context("Failed to load bundle items")?;

        Ok(BundleView::from_models(bundle, category, items))
    }

    /// 批量删除
    ///
    /// 任一套餐不存在或处于起售状态时整批拒绝；通过校验后在同一事务内删除套餐及其菜品关系。
    pub async fn delete_batch(&self, ids: &[i32]) -> Result<u64> {
        ensure_validation!(!ids.is_empty(), "请选择要删除的套餐");

        let ids: Vec<i32> = ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let txn = self.db().begin().await.context("Failed to begin transaction")?;

        let targets = Bundles::find()
            .filter(bundles::Column::Id.is_in(ids.clone()))
            .all(&txn)
            .await
            .context("Failed to load bundles")?;

        if let Some(missing) = ids
            .iter()
            .find(|id| !targets.iter().any(|bundle| bundle.id == **id))
        {
            return Err(TakeoutError::not_found("bundle", missing));
        }

        let enabled: Vec<&str> = targets
            .iter()
            .filter(|bundle| bundle.status.is_enabled())
            .map(|bundle| bundle.name.as_str())
            .collect();
        if !enabled.is_empty() {
            warn!(?enabled, "Refusing to delete enabled bundles");
        }
        ensure_precondition!(
            enabled.is_empty(),
            "起售中的套餐不能删除: {}",
            enabled.join(",")
        );

        BundleItems::delete_many()
            .filter(bundle_items::Column::BundleId.is_in(ids.clone()))
            .exec(&txn)
            .await
            .context("Failed to delete bundle items")?;
        let deleted = Bundles::delete_many()
            .filter(bundles::Column::Id.is_in(ids))
            .exec(&txn)
            .await
            .context("Failed to delete bundles")?
            .rows_affected;

        txn.commit().await.context("Failed to commit bundle deletion")?;

        info!(deleted, "Bundles deleted");
        Ok(deleted)
    }

    /// 分页查询，按更新时间倒序
    pub async fn page(&self, query: &BundleQuery) -> Result<PageResult<BundleSummary>> {
        let params = PaginationParams::new(
            query.page,
            query.page_size,
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        );

        let select = Self::filtered_bundles(query)?;
        let total = select
            .clone()
            .count(self.db())
            .await
            .context("Failed to count bundles")?;

        let records = select
            .order_by_desc(bundles::Column::UpdatedAt)
            .order_by_desc(bundles::Column::Id)
            .offset(params.offset())
            .limit(params.page_size)
            .find_also_related(Categories)
            .all(self.db())
            .await
            .context("Failed to fetch bundles")?
            .into_iter()
            .map(|(bundle, category)| BundleSummary::from_models(bundle, category))
            .collect();

        debug!(total, page = params.page, page_size = params.page_size, "Paged bundles");
        Ok(PageResult::new(total, records))
    }

    fn filtered_bundles(query: &BundleQuery) -> Result<Select<Bundles>> {
        let mut select = Bundles::find();

        if let Some(name) = query
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            select = select.filter(bundles::Column::Name.contains(name));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(bundles::Column::CategoryId.eq(category_id));
        }
        if let Some(code) = query.status {
            select = select.filter(bundles::Column::Status.eq(parse_sale_status(code)?));
        }

        Ok(select)
    }

    async fn find_bundle<C: ConnectionTrait>(conn: &C, bundle_id: i32) -> Result<bundles::Model> {
        Bundles::find_by_id(bundle_id)
            .one(conn)
            .await
            .context("Failed to load bundle")?
            .ok_or_else(|| TakeoutError::not_found("bundle", bundle_id))
    }

    async fn ensure_bundle_category<C: ConnectionTrait>(conn: &C, category_id: i32) -> Result<()> {
        let category = Categories::find_by_id(category_id)
            .one(conn)
            .await
            .context("Failed to load category")?
            .ok_or_else(|| {
                TakeoutError::validation_field(format!("分类 {category_id} 不存在"), "categoryId")
            })?;

        ensure_validation!(
            category.kind == CategoryKind::Bundle,
            "分类 {} 不是套餐分类",
            category.name
        );
        Ok(())
    }

    async fn ensure_name_available<C: ConnectionTrait>(
        conn: &C,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<()> {
        let mut select = Bundles::find().filter(bundles::Column::Name.eq(name.trim()));
        if let Some(id) = exclude_id {
            select = select.filter(bundles::Column::Id.ne(id));
        }

        let taken = select
            .count(conn)
            .await
            .context("Failed to check bundle name")?;
        ensure_validation!(taken == 0, "套餐名称 {} 已存在", name.trim());
        Ok(())
    }

    /// 加载套餐引用的菜品；存在不认识的菜品 id 时返回校验错误
    async fn load_member_dishes<C: ConnectionTrait>(
        conn: &C,
        items: &[BundleItemInput],
    ) -> Result<Vec<dishes::Model>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = items.iter().map(|item| item.dish_id).collect();
        let found = Dishes::find()
            .filter(dishes::Column::Id.is_in(ids))
            .all(conn)
            .await
            .context("Failed to load dishes")?;

        let missing: Vec<String> = items
            .iter()
            .filter(|item| !found.iter().any(|dish| dish.id == item.dish_id))
            .map(|item| item.dish_id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(TakeoutError::validation_field(
                format!("菜品不存在: {}", missing.join(",")),
                "items",
            ));
        }

        Ok(found)
    }

    /// 以菜品当前名称与价格为快照批量写入菜品关系
    async fn insert_items<C: ConnectionTrait>(
        conn: &C,
        bundle_id: i32,
        items: &[BundleItemInput],
        dishes: &[dishes::Model],
    ) -> Result<()> {
        let models: Vec<bundle_items::ActiveModel> = items
            .iter()
            .filter_map(|item| {
                dishes
                    .iter()
                    .find(|dish| dish.id == item.dish_id)
                    .map(|dish| bundle_items::ActiveModel {
                        bundle_id: Set(bundle_id),
                        dish_id: Set(dish.id),
                        name: Set(dish.name.clone()),
                        price: Set(dish.price),
                        copies: Set(item.copies),
                        ..Default::default()
                    })
            })
            .collect();

        if models.is_empty() {
            return Ok(());
        }

        BundleItems::insert_many(models)
            .exec(conn)
            .await
            .context("Failed to insert bundle items")?;
        Ok(())
    }
}
