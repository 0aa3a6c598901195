//! Shared data models.

pub mod database;
pub mod integration;
pub mod resource;

// Re-export commonly used types
pub use database::{AwsOidcListDatabasesRequest, AwsOidcListDatabasesResponse, Database, Label};
pub use integration::{
    make_integration, make_integrations, validate_create_request, validate_update_request,
    CreateIntegrationRequest, Integration, IntegrationAwsOidcSpec, IntegrationsListResponse,
    UpdateIntegrationRequest,
};
pub use resource::{AwsOidcIntegrationSpecV1, IntegrationResource, IntegrationV1, SUB_KIND_AWS_OIDC};
