//! Integration view models.
//!
//! Converts backend integration resources into the UI representation and
//! validates inbound create/update requests. Field checks are presence only.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::resource::IntegrationResource;

pub(crate) const MISSING_NAME: &str = "missing integration name";
pub(crate) const MISSING_SUB_KIND: &str = "missing subKind";
pub(crate) const MISSING_ROLE_ARN: &str = "missing awsoidc.roleArn field";

/// Fields specific to the `aws-oidc` subKind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationAwsOidcSpec {
    /// Role associated with the integration.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(min = 1, message = "missing awsoidc.roleArn field"))]
    pub role_arn: String,
}

/// UI representation of an integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    /// Integration name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(min = 1, message = "missing integration name"))]
    pub name: String,

    /// Integration subKind, e.g. `aws-oidc`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(min = 1, message = "missing subKind"))]
    pub sub_kind: String,

    /// Fields for the `aws-oidc` subKind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awsoidc: Option<IntegrationAwsOidcSpec>,
}

/// Request body for creating an integration.
pub type CreateIntegrationRequest = Integration;

/// Request body for updating an integration.
///
/// The integration name comes from the request path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateIntegrationRequest {
    /// Fields for the `aws-oidc` subKind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awsoidc: Option<IntegrationAwsOidcSpec>,
}

/// A page of integrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationsListResponse {
    /// Integrations on this page.
    pub items: Vec<Integration>,
    /// Key to resume listing from. Empty on the last page.
    pub next_key: String,
}

/// Validates a create request.
///
/// Checks run in order: name, subKind, then `awsoidc.roleArn` when the
/// `awsoidc` block is present. The first failure is returned.
///
/// # Errors
/// Returns `AppError::InvalidArgument` naming the missing field.
pub fn validate_create_request(req: &CreateIntegrationRequest) -> AppResult<()> {
    let mut reported = violations(req);
    reported.extend(aws_oidc_violations(req.awsoidc.as_ref()));
    reject_first(reported, &[MISSING_NAME, MISSING_SUB_KIND, MISSING_ROLE_ARN])
}

/// Validates an update request.
///
/// An update without an `awsoidc` block is accepted.
///
/// # Errors
/// Returns `AppError::InvalidArgument` when `awsoidc` is present with an empty role ARN.
pub fn validate_update_request(req: &UpdateIntegrationRequest) -> AppResult<()> {
    reject_first(aws_oidc_violations(req.awsoidc.as_ref()), &[MISSING_ROLE_ARN])
}

/// Creates the UI representation of a backend integration.
///
/// `awsoidc` is always populated from the resource accessor, whatever the subKind.
pub fn make_integration<R: IntegrationResource + ?Sized>(ig: &R) -> Integration {
    Integration {
        name: ig.name().to_string(),
        sub_kind: ig.sub_kind().to_string(),
        awsoidc: Some(IntegrationAwsOidcSpec {
            role_arn: ig.aws_oidc_integration_spec().role_arn,
        }),
    }
}

/// Creates the UI list of integrations, preserving order.
pub fn make_integrations<R: IntegrationResource>(igs: &[R]) -> Vec<Integration> {
    igs.iter().map(make_integration).collect()
}

fn aws_oidc_violations(spec: Option<&IntegrationAwsOidcSpec>) -> Vec<String> {
    spec.map(violations).unwrap_or_default()
}

fn violations<T: Validate>(value: &T) -> Vec<String> {
    match value.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .map(|e| {
                e.message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect(),
    }
}

fn reject_first(reported: Vec<String>, order: &[&str]) -> AppResult<()> {
    let Some(fallback) = reported.first() else {
        return Ok(());
    };

    let message = order
        .iter()
        .find(|expected| reported.iter().any(|r| r == *expected))
        .map(|m| m.to_string())
        .unwrap_or_else(|| fallback.clone());
    Err(AppError::InvalidArgument(message))
}
