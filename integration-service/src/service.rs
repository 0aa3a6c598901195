//! 集成管理服务模块

use std::sync::Arc;

use async_trait::async_trait;

use common::errors::{AppError, AppResult};
use common::models::{
    make_integration, make_integrations, validate_create_request, validate_update_request,
    AwsOidcIntegrationSpecV1, AwsOidcListDatabasesRequest, AwsOidcListDatabasesResponse,
    CreateIntegrationRequest, Integration, IntegrationResource, IntegrationV1,
    IntegrationsListResponse, UpdateIntegrationRequest, SUB_KIND_AWS_OIDC,
};

use crate::aws_oidc::DatabaseLister;
use crate::store::IntegrationStore;

/// 集成服务 Trait
#[async_trait]
pub trait IntegrationServiceTrait: Send + Sync {
    /// 分页列出集成
    async fn list(&self, limit: Option<usize>, start_key: &str) -> IntegrationsListResponse;

    /// 创建新集成
    async fn create(&self, req: CreateIntegrationRequest) -> AppResult<Integration>;

    /// 根据名称获取集成
    async fn get(&self, name: &str) -> AppResult<Integration>;

    /// 更新集成
    async fn update(&self, name: &str, req: UpdateIntegrationRequest) -> AppResult<Integration>;

    /// 根据名称删除集成
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// 通过 AWS OIDC 集成发现数据库
    async fn list_databases(
        &self,
        name: &str,
        req: AwsOidcListDatabasesRequest,
    ) -> AppResult<AwsOidcListDatabasesResponse>;
}

/// 集成管理服务
pub struct IntegrationService {
    store: Arc<IntegrationStore>,
    lister: Arc<dyn DatabaseLister>,
    page_limit: usize,
}

impl IntegrationService {
    /// 创建新的集成服务实例
    pub fn new(store: Arc<IntegrationStore>, lister: Arc<dyn DatabaseLister>, page_limit: usize) -> Self {
        Self {
            store,
            lister,
            page_limit,
        }
    }

    fn effective_limit(&self, limit: Option<usize>) -> usize {
        match limit {
            Some(n) if n > 0 && n <= self.page_limit => n,
            _ => self.page_limit,
        }
    }
}

#[async_trait]
impl IntegrationServiceTrait for IntegrationService {
    async fn list(&self, limit: Option<usize>, start_key: &str) -> IntegrationsListResponse {
        let limit = self.effective_limit(limit);
        let (page, next_key) = self.store.list(limit, start_key).await;
        tracing::debug!(limit, count = page.len(), next_key = %next_key, "列出集成");

        IntegrationsListResponse {
            items: make_integrations(&page),
            next_key,
        }
    }

    async fn create(&self, req: CreateIntegrationRequest) -> AppResult<Integration> {
        validate_create_request(&req)?;

        let ig = match req.sub_kind.as_str() {
            SUB_KIND_AWS_OIDC => {
                let spec = req
                    .awsoidc
                    .ok_or_else(|| AppError::invalid_argument("missing awsoidc spec"))?;
                IntegrationV1::new_aws_oidc(
                    req.name,
                    AwsOidcIntegrationSpecV1 {
                        role_arn: spec.role_arn,
                    },
                )?
            }
            other => {
                return Err(AppError::invalid_argument(format!(
                    "subkind {other:?} is not supported"
                )))
            }
        };

        let stored = self.store.create(ig).await?;
        tracing::info!(name = %stored.name(), sub_kind = %stored.sub_kind(), "集成已创建");
        Ok(make_integration(&stored))
    }

    async fn get(&self, name: &str) -> AppResult<Integration> {
        self.store.get(name).await.map(|ig| make_integration(&ig))
    }

    async fn update(&self, name: &str, req: UpdateIntegrationRequest) -> AppResult<Integration> {
        validate_update_request(&req)?;

        let mut ig = self.store.get(name).await?;
        let Some(spec) = req.awsoidc else {
            return Ok(make_integration(&ig));
        };

        if !ig.is_aws_oidc() {
            return Err(AppError::invalid_argument(format!(
                "cannot update {SUB_KIND_AWS_OIDC:?} fields for a {:?} integration",
                ig.sub_kind()
            )));
        }

        ig.set_aws_oidc_role_arn(spec.role_arn);
        let stored = self.store.update(ig).await?;
        tracing::info!(name = %stored.name(), "集成已更新");
        Ok(make_integration(&stored))
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        self.store.delete(name).await?;
        tracing::info!(name = %name, "集成已删除");
        Ok(())
    }

    async fn list_databases(
        &self,
        name: &str,
        req: AwsOidcListDatabasesRequest,
    ) -> AppResult<AwsOidcListDatabasesResponse> {
        let ig = self.store.get(name).await?;
        if !ig.is_aws_oidc() {
            return Err(AppError::invalid_argument(format!(
                "integration {name:?} is not an {SUB_KIND_AWS_OIDC:?} integration"
            )));
        }

        let role_arn = ig.aws_oidc_integration_spec().role_arn;
        self.lister.list_databases(&role_arn, &req).await
    }
}
