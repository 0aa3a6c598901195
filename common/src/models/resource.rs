//! Backend integration resource.
//!
//! This is the stored representation the service manages. The UI never sees
//! it directly; see [`crate::models::integration`] for the view mapping.

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::integration::{MISSING_NAME, MISSING_ROLE_ARN};

/// SubKind of integrations backed by AWS OIDC.
pub const SUB_KIND_AWS_OIDC: &str = "aws-oidc";

/// Read access to a backend integration resource.
///
/// `aws_oidc_integration_spec` must be total: resources without an AWS OIDC
/// spec return the zero value.
pub trait IntegrationResource {
    /// Integration name.
    fn name(&self) -> &str;
    /// Integration subKind.
    fn sub_kind(&self) -> &str;
    /// AWS OIDC spec, or the zero value when the resource has none.
    fn aws_oidc_integration_spec(&self) -> AwsOidcIntegrationSpecV1;
}

/// AWS OIDC specific settings of an integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsOidcIntegrationSpecV1 {
    /// IAM role assumed through the OIDC identity provider.
    pub role_arn: String,
}

/// Stored integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationV1 {
    name: String,
    sub_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aws_oidc: Option<AwsOidcIntegrationSpecV1>,
}

impl IntegrationV1 {
    /// Creates an integration of an arbitrary subKind without any sub-spec.
    pub fn new(name: impl Into<String>, sub_kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_kind: sub_kind.into(),
            aws_oidc: None,
        }
    }

    /// Creates an `aws-oidc` integration.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if the name or the role ARN is empty.
    pub fn new_aws_oidc(name: impl Into<String>, spec: AwsOidcIntegrationSpecV1) -> AppResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(AppError::invalid_argument(MISSING_NAME));
        }
        if spec.role_arn.is_empty() {
            return Err(AppError::invalid_argument(MISSING_ROLE_ARN));
        }

        Ok(Self {
            name,
            sub_kind: SUB_KIND_AWS_OIDC.to_string(),
            aws_oidc: Some(spec),
        })
    }

    /// Returns true if this integration is backed by AWS OIDC.
    pub fn is_aws_oidc(&self) -> bool {
        self.sub_kind == SUB_KIND_AWS_OIDC
    }

    /// Replaces the AWS OIDC role ARN.
    pub fn set_aws_oidc_role_arn(&mut self, role_arn: impl Into<String>) {
        self.aws_oidc
            .get_or_insert_with(AwsOidcIntegrationSpecV1::default)
            .role_arn = role_arn.into();
    }
}

impl IntegrationResource for IntegrationV1 {
    fn name(&self) -> &str {
        &self.name
    }

    fn sub_kind(&self) -> &str {
        &self.sub_kind
    }

    fn aws_oidc_integration_spec(&self) -> AwsOidcIntegrationSpecV1 {
        self.aws_oidc.clone().unwrap_or_default()
    }
}
