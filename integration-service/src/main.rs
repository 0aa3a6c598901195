//! 集成管理服务
//!
//! 提供集成管理功能，包括：
//! - 集成的增删改查（UI 视图映射与请求校验）
//! - 集成列表分页
//! - 通过 AWS OIDC 集成发现 RDS 数据库

mod aws_oidc;
mod handlers;
mod routes;
mod service;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use common::config::{AppConfig, LogFormat};
use state::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;

use crate::aws_oidc::StaticRdsCatalog;

const SERVICE_NAME: &str = "integration-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "集成服务 API",
        version = "0.1.0",
        description = "集成管理微服务"
    ),
    paths(
        handlers::list_integrations,
        handlers::create_integration,
        handlers::get_integration,
        handlers::update_integration,
        handlers::delete_integration,
        handlers::list_aws_oidc_databases,
        handlers::health_check,
    ),
    components(schemas(
        common::models::Integration,
        common::models::IntegrationAwsOidcSpec,
        common::models::UpdateIntegrationRequest,
        common::models::IntegrationsListResponse,
        common::models::AwsOidcListDatabasesRequest,
        common::models::AwsOidcListDatabasesResponse,
        common::models::Database,
        common::models::Label,
        handlers::HealthResponse,
    )),
    tags(
        (name = "integrations", description = "集成管理端点"),
        (name = "aws-oidc", description = "AWS OIDC 数据库发现端点"),
        (name = "health", description = "健康检查端点")
    )
)]
pub(crate) struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);

    // 初始化日志追踪
    init_tracing(config.log_format);

    // 加载 RDS 目录
    let catalog = load_catalog(&config)?;
    info!(databases = catalog.database_count(), "RDS 目录已加载");

    // 创建应用状态与路由
    let state = AppState::new(config.clone(), Arc::new(catalog));
    let app = routes::create_router(state);

    // 启动服务
    let addr = config.bind_addr();
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {addr}"))?;
    axum::serve(listener, app).await.context("服务启动失败")?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<StaticRdsCatalog> {
    let Some(path) = &config.rds_catalog_path else {
        return Ok(StaticRdsCatalog::new(Vec::new(), config.rds_page_size));
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("读取 RDS 目录失败: {path}"))?;
    StaticRdsCatalog::from_json(&json, config.rds_page_size)
        .with_context(|| format!("解析 RDS 目录失败: {path}"))
}
