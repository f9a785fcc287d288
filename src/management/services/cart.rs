//! # 购物车服务
//!
//! 同一用户同一购物车定义（菜品或套餐，加口味）只保留一行，重复加购只累加数量。
//! 行的唯一性由 `(user_id, line_key)` 唯一索引保证，插入使用 upsert 合并并发请求。

use std::sync::Arc;

use chrono::Utc;
use entity::{Bundles, CartLines, Dishes, Users, cart_lines};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Context, Result, TakeoutError};

/// 加购 / 减购请求中定义购物车行的字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCandidate {
    pub dish_id: Option<i32>,
    #[serde(alias = "setmealId")]
    pub bundle_id: Option<i32>,
    pub dish_flavor: Option<String>,
}

/// 商品快照
struct ItemSnapshot {
    name: String,
    image: String,
    unit_price: f64,
}

impl CartCandidate {
    #[must_use]
    pub const fn dish(dish_id: i32) -> Self {
        Self {
            dish_id: Some(dish_id),
            bundle_id: None,
            dish_flavor: None,
        }
    }

    #[must_use]
    pub const fn bundle(bundle_id: i32) -> Self {
        Self {
            dish_id: None,
            bundle_id: Some(bundle_id),
            dish_flavor: None,
        }
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.dish_flavor = Some(flavor.into());
        self
    }

    fn flavor(&self) -> Option<&str> {
        self.dish_flavor
            .as_deref()
            .map(str::trim)
            .filter(|flavor| !flavor.is_empty())
    }

    /// 由全部定义字段派生的行键，例如 `dish:3|少辣`、`bundle:7`
    pub fn line_key(&self) -> Result<String> {
        let base = match (self.dish_id, self.bundle_id) {
            (Some(dish_id), None) => format!("dish:{dish_id}"),
            (None, Some(bundle_id)) => format!("bundle:{bundle_id}"),
            (Some(_), Some(_)) => {
                return Err(TakeoutError::validation("菜品与套餐只能指定其一"));
            }
            (None, None) => return Err(TakeoutError::validation("必须指定菜品或套餐")),
        };

        Ok(match self.flavor() {
            Some(flavor) => format!("{base}|{flavor}"),
            None => base,
        })
    }
}

/// 购物车行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: i32,
    pub dish_id: Option<i32>,
    pub bundle_id: Option<i32>,
    pub dish_flavor: Option<String>,
    pub name: String,
    pub image: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub created_at: String,
}

impl CartLineView {
    fn from_model(line: cart_lines::Model) -> Self {
        Self {
            id: line.id,
            dish_id: line.dish_id,
            bundle_id: line.bundle_id,
            dish_flavor: line.dish_flavor,
            name: line.name,
            image: line.image,
            unit_price: line.unit_price,
            quantity: line.quantity,
            created_at: line.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 购物车服务
#[derive(Clone)]
pub struct CartAggregator {
    db: Arc<DatabaseConnection>,
}

impl CartAggregator {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    /// 加购一份
    ///
    /// 已有同定义的行时数量加一；否则以当前商品信息为快照新建一行。
    pub async fn add_line(&self, user_id: i32, candidate: &CartCandidate) -> Result<CartLineView> {
        let line_key = candidate.line_key()?;

        let txn = self.db().begin().await.context("Failed to begin transaction")?;

        Users::find_by_id(user_id)
            .one(&txn)
            .await
            .context("Failed to load user")?
            .ok_or_else(|| TakeoutError::not_found("user", user_id))?;

        let existing = Self::first_match(&txn, user_id, &line_key).await?;

        if let Some(line) = existing {
            CartLines::update_many()
                .col_expr(cart_lines::Column::Quantity, Expr::cust("quantity + 1"))
                .filter(cart_lines::Column::Id.eq(line.id))
                .exec(&txn)
                .await
                .context("Failed to increment cart line")?;
            debug!(user_id, line_id = line.id, %line_key, "Incremented cart line");
        } else {
            let snapshot = Self::snapshot(&txn, candidate).await?;
            let line = cart_lines::ActiveModel {
                user_id: Set(user_id),
                dish_id: Set(candidate.dish_id),
                bundle_id: Set(candidate.bundle_id),
                dish_flavor: Set(candidate.flavor().map(str::to_string)),
                line_key: Set(line_key.clone()),
                name: Set(snapshot.name),
                image: Set(snapshot.image),
                unit_price: Set(snapshot.unit_price),
                quantity: Set(1),
                created_at: Set(Utc::now().naive_utc()),
                ..Default::default()
            };

            // 并发插入同一行时合并为数量加一
            CartLines::insert(line)
                .on_conflict(
                    OnConflict::columns([
                        cart_lines::Column::UserId,
                        cart_lines::Column::LineKey,
                    ])
                    .value(cart_lines::Column::Quantity, Expr::cust("quantity + 1"))
                    .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .context("Failed to insert cart line")?;
            info!(user_id, %line_key, "Added cart line");
        }

        let line = Self::first_match(&txn, user_id, &line_key)
            .await?
            .ok_or_else(|| TakeoutError::internal(format!("购物车行 {line_key} 写入后未找到")))?;

        txn.commit().await.context("Failed to commit cart line")?;

        Ok(CartLineView::from_model(line))
    }

    /// 用户的全部购物车行，按加入顺序
    pub async fn list(&self, user_id: i32) -> Result<Vec<CartLineView>> {
        let lines = CartLines::find()
            .filter(cart_lines::Column::UserId.eq(user_id))
            .order_by_asc(cart_lines::Column::Id)
            .all(self.db())
            .await
            .context("Failed to list cart lines")?;

        Ok(lines.into_iter().map(CartLineView::from_model).collect())
    }

    /// 减购一份；数量为 1 时删除该行，没有匹配行时什么也不做
    pub async fn remove_one(&self, user_id: i32, candidate: &CartCandidate) -> Result<()> {
        let line_key = candidate.line_key()?;

        let txn = self.db().begin().await.context("Failed to begin transaction")?;

        let Some(line) = Self::first_match(&txn, user_id, &line_key).await? else {
            debug!(user_id, %line_key, "No cart line to remove");
            return Ok(());
        };

        if line.quantity <= 1 {
            CartLines::delete_by_id(line.id)
                .exec(&txn)
                .await
                .context("Failed to delete cart line")?;
            info!(user_id, line_id = line.id, "Removed cart line");
        } else {
            CartLines::update_many()
                .col_expr(cart_lines::Column::Quantity, Expr::cust("quantity - 1"))
                .filter(cart_lines::Column::Id.eq(line.id))
                .exec(&txn)
                .await
                .context("Failed to decrement cart line")?;
            debug!(user_id, line_id = line.id, "Decremented cart line");
        }

        txn.commit().await.context("Failed to commit cart removal")?;
        Ok(())
    }

    /// 清空购物车，返回删除的行数
    pub async fn clear(&self, user_id: i32) -> Result<u64> {
        let deleted = CartLines::delete_many()
            .filter(cart_lines::Column::UserId.eq(user_id))
            .exec(self.db())
            .await
            .context("Failed to clear cart")?
            .rows_affected;

        info!(user_id, deleted, "Cleared cart");
        Ok(deleted)
    }

    async fn first_match<C: ConnectionTrait>(
        conn: &C,
        user_id: i32,
        line_key: &str,
    ) -> Result<Option<cart_lines::Model>> {
        CartLines::find()
            .filter(cart_lines::Column::UserId.eq(user_id))
            .filter(cart_lines::Column::LineKey.eq(line_key))
            .order_by_asc(cart_lines::Column::Id)
            .one(conn)
            .await
            .context("Failed to find cart line")
    }

    /// 菜品优先于套餐
    async fn snapshot<C: ConnectionTrait>(
        conn: &C,
        candidate: &CartCandidate,
    ) -> Result<ItemSnapshot> {
        if let Some(dish_id) = candidate.dish_id {
            let dish = Dishes::find_by_id(dish_id)
                .one(conn)
                .await
                .context("Failed to load dish")?
                .ok_or_else(|| TakeoutError::not_found("dish", dish_id))?;
            return Ok(ItemSnapshot {
                name: dish.name,
                image: dish.image,
                unit_price: dish.price,
            });
        }

        let bundle_id = candidate
            .bundle_id
            .ok_or_else(|| TakeoutError::validation("必须指定菜品或套餐"))?;
        let bundle = Bundles::find_by_id(bundle_id)
            .one(conn)
            .await
            .context("Failed to load bundle")?
            .ok_or_else(|| TakeoutError::not_found("bundle", bundle_id))?;
        Ok(ItemSnapshot {
            name: bundle.name,
            image: bundle.image,
            unit_price: bundle.price,
        })
    }
}
