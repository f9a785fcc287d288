//! # HTTP 服务器
//!
//! Axum HTTP服务器，对外暴露套餐、购物车与报表接口

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{AppConfig, ServerConfig};
use crate::error::{Context, Result, TakeoutError};
use crate::management::services::{
    BundleManager, CartAggregator, ReportingEngine, SeaOrmReportStore,
};

/// 应用状态：三个业务组件共享同一个数据库连接池
#[derive(Clone)]
pub struct AppState {
    pub bundles: BundleManager,
    pub cart: CartAggregator,
    pub reports: ReportingEngine,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: &AppConfig) -> Result<Self> {
        let store = Arc::new(SeaOrmReportStore::new(db.clone()));

        Ok(Self {
            bundles: BundleManager::new(db.clone(), config.pagination.clone()),
            cart: CartAggregator::new(db),
            reports: ReportingEngine::new(
                store,
                config.report.tz()?,
                config.report.max_range_days,
            ),
        })
    }
}

/// HTTP 服务器
pub struct ManagementServer {
    config: ServerConfig,
    router: Router,
}

impl ManagementServer {
    pub fn new(config: &AppConfig, db: Arc<DatabaseConnection>) -> Result<Self> {
        let state = AppState::new(db, config)?;

        Ok(Self {
            config: config.server.clone(),
            router: Self::create_router(state),
        })
    }

    /// 创建路由器
    pub fn create_router(state: AppState) -> Router {
        super::routes::create_routes(state)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// 启动服务器，收到 Ctrl-C 后优雅退出
    pub async fn serve(self) -> Result<()> {
        let bind_address = self.config.bind_address();
        let addr: SocketAddr = bind_address.parse().map_err(|e| {
            TakeoutError::config_with_source(format!("无效的监听地址: {bind_address}"), e)
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .context(format!("Failed to bind {addr}"))?;

        info!(%addr, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated")?;

        info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
