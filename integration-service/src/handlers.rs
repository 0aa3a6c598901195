//! Handler模块

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use common::errors::AppError;
use common::middleware::RequestId;
use common::models::{
    AwsOidcListDatabasesRequest, AwsOidcListDatabasesResponse, CreateIntegrationRequest,
    Integration, IntegrationsListResponse, UpdateIntegrationRequest,
};
use common::response::ApiResponse;

use crate::service::IntegrationServiceTrait;
use crate::state::AppState;

const SERVICE_NAME: &str = "integration-service";

/// 集成列表查询参数
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListIntegrationsQuery {
    /// 每页最大数量（默认及上限由配置决定）
    pub limit: Option<usize>,
    /// 从该名称开始继续列出
    pub start_key: Option<String>,
}

/// 分页列出集成
#[utoipa::path(
    get,
    path = "/api/integrations",
    tag = "integrations",
    params(ListIntegrationsQuery),
    responses(
        (status = 200, description = "集成列表", body = IntegrationsListResponse)
    )
)]
pub async fn list_integrations(
    State(state): State<AppState>,
    Query(query): Query<ListIntegrationsQuery>,
) -> Json<IntegrationsListResponse> {
    let service = state.integration_service();
    let start_key = query.start_key.unwrap_or_default();
    Json(service.list(query.limit, &start_key).await)
}

/// 创建新的集成
#[utoipa::path(
    post,
    path = "/api/integrations",
    tag = "integrations",
    request_body = Integration,
    responses(
        (status = 200, description = "集成已创建", body = Integration),
        (status = 400, description = "参数缺失或不支持的 subKind"),
        (status = 409, description = "集成已存在")
    )
)]
pub async fn create_integration(
    State(state): State<AppState>,
    Json(req): Json<CreateIntegrationRequest>,
) -> Result<Json<Integration>, AppError> {
    let service = state.integration_service();
    Ok(Json(service.create(req).await?))
}

/// 根据名称获取集成
#[utoipa::path(
    get,
    path = "/api/integrations/{name}",
    tag = "integrations",
    params(
        ("name" = String, Path, description = "集成名称")
    ),
    responses(
        (status = 200, description = "集成详情", body = Integration),
        (status = 404, description = "集成未找到")
    )
)]
pub async fn get_integration(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Integration>, AppError> {
    let service = state.integration_service();
    Ok(Json(service.get(&name).await?))
}

/// 更新集成
#[utoipa::path(
    put,
    path = "/api/integrations/{name}",
    tag = "integrations",
    params(
        ("name" = String, Path, description = "集成名称")
    ),
    request_body = UpdateIntegrationRequest,
    responses(
        (status = 200, description = "集成已更新", body = Integration),
        (status = 400, description = "参数缺失或 subKind 不匹配"),
        (status = 404, description = "集成未找到")
    )
)]
pub async fn update_integration(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateIntegrationRequest>,
) -> Result<Json<Integration>, AppError> {
    let service = state.integration_service();
    Ok(Json(service.update(&name, req).await?))
}

/// 根据名称删除集成
#[utoipa::path(
    delete,
    path = "/api/integrations/{name}",
    tag = "integrations",
    params(
        ("name" = String, Path, description = "集成名称")
    ),
    responses(
        (status = 200, description = "集成已删除", body = ApiResponse<bool>),
        (status = 404, description = "集成未找到")
    )
)]
pub async fn delete_integration(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<bool>>, AppError> {
    let service = state.integration_service();
    service.delete(&name).await?;
    Ok(Json(
        ApiResponse::ok_with_service(true, SERVICE_NAME).with_request_id(request_id.as_str()),
    ))
}

/// 通过 AWS OIDC 集成发现 RDS 数据库
#[utoipa::path(
    post,
    path = "/api/integrations/{name}/aws-oidc/databases",
    tag = "aws-oidc",
    params(
        ("name" = String, Path, description = "aws-oidc 集成名称")
    ),
    request_body = AwsOidcListDatabasesRequest,
    responses(
        (status = 200, description = "数据库分页列表", body = AwsOidcListDatabasesResponse),
        (status = 400, description = "请求参数无效"),
        (status = 404, description = "集成未找到")
    )
)]
pub async fn list_aws_oidc_databases(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<AwsOidcListDatabasesRequest>,
) -> Result<Json<AwsOidcListDatabasesResponse>, AppError> {
    let service = state.integration_service();
    Ok(Json(service.list_databases(&name, req).await?))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        integrations: state.store.integration_count().await,
    })
}

/// 健康检查响应
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
    /// 已保存的集成数量
    pub integrations: usize,
}
