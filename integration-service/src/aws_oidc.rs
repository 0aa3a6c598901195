//! AWS OIDC database discovery.
//!
//! `DatabaseLister` is the seam towards AWS. `StaticRdsCatalog` serves a fixed
//! set of RDS records, enough for local development and tests.

use async_trait::async_trait;
use serde::Deserialize;

use common::errors::{AppError, AppResult};
use common::models::{AwsOidcListDatabasesRequest, AwsOidcListDatabasesResponse, Database, Label};

/// RDS type for DB instances.
pub const RDS_TYPE_INSTANCE: &str = "instance";
/// RDS type for Aurora clusters.
pub const RDS_TYPE_CLUSTER: &str = "cluster";

/// Lists databases visible to an AWS OIDC integration.
#[async_trait]
pub trait DatabaseLister: Send + Sync {
    /// Lists one page of databases reachable with `role_arn`.
    async fn list_databases(
        &self,
        role_arn: &str,
        req: &AwsOidcListDatabasesRequest,
    ) -> AppResult<AwsOidcListDatabasesResponse>;
}

/// Checks the discovery request parameters.
///
/// # Errors
/// Returns `AppError::InvalidArgument` when the region is empty, the RDS type
/// is unknown, or no engine is given.
pub fn validate_list_databases_request(req: &AwsOidcListDatabasesRequest) -> AppResult<()> {
    if req.region.is_empty() {
        return Err(AppError::invalid_argument("region must be set"));
    }
    if req.rds_type != RDS_TYPE_INSTANCE && req.rds_type != RDS_TYPE_CLUSTER {
        return Err(AppError::invalid_argument(
            "invalid rds type, supported values: instance and cluster",
        ));
    }
    if req.engines.is_empty() {
        return Err(AppError::invalid_argument("a list of engines is required"));
    }
    Ok(())
}

/// A known RDS database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsDatabase {
    /// Instance or cluster identifier.
    pub name: String,
    /// Engine, e.g. `postgres`, `aurora-mysql`.
    pub engine: String,
    /// AWS region.
    pub region: String,
    /// `instance` or `cluster`.
    pub rds_type: String,
    /// Endpoint host.
    pub endpoint: String,
    /// Endpoint port.
    pub port: u16,
}

impl RdsDatabase {
    fn protocol(&self) -> &'static str {
        if self.engine.contains("postgres") {
            "postgres"
        } else {
            "mysql"
        }
    }

    fn endpoint_type(&self) -> &'static str {
        if self.rds_type == RDS_TYPE_CLUSTER {
            "primary"
        } else {
            "instance"
        }
    }

    fn matches(&self, req: &AwsOidcListDatabasesRequest) -> bool {
        self.region == req.region
            && self.rds_type == req.rds_type
            && req.engines.iter().any(|e| e == &self.engine)
    }
}

impl From<&RdsDatabase> for Database {
    fn from(rds: &RdsDatabase) -> Self {
        Self {
            name: rds.name.clone(),
            desc: format!("RDS {} in {}", rds.rds_type, rds.region),
            protocol: rds.protocol().to_string(),
            db_type: "rds".to_string(),
            uri: format!("{}:{}", rds.endpoint, rds.port),
            labels: vec![
                Label::new("region", &rds.region),
                Label::new("engine", &rds.engine),
                Label::new("endpoint-type", rds.endpoint_type()),
            ],
        }
    }
}

/// Database lister backed by a fixed catalog.
///
/// Page tokens are the offset of the first record of the page, as a string.
pub struct StaticRdsCatalog {
    databases: Vec<RdsDatabase>,
    page_size: usize,
}

impl StaticRdsCatalog {
    /// Creates a catalog serving `page_size` records per page.
    pub fn new(databases: Vec<RdsDatabase>, page_size: usize) -> Self {
        Self {
            databases,
            page_size: page_size.max(1),
        }
    }

    /// Loads the catalog from a JSON array of RDS records.
    pub fn from_json(json: &str, page_size: usize) -> AppResult<Self> {
        let databases: Vec<RdsDatabase> = serde_json::from_str(json)
            .map_err(|e| AppError::Internal(format!("invalid RDS catalog: {e}")))?;
        Ok(Self::new(databases, page_size))
    }

    /// Number of records in the catalog.
    pub fn database_count(&self) -> usize {
        self.databases.len()
    }
}

#[async_trait]
impl DatabaseLister for StaticRdsCatalog {
    async fn list_databases(
        &self,
        role_arn: &str,
        req: &AwsOidcListDatabasesRequest,
    ) -> AppResult<AwsOidcListDatabasesResponse> {
        validate_list_databases_request(req)?;

        let offset = if req.next_token.is_empty() {
            0
        } else {
            req.next_token
                .parse::<usize>()
                .map_err(|_| AppError::invalid_argument("invalid next token"))?
        };

        tracing::debug!(role_arn, region = %req.region, rds_type = %req.rds_type, offset, "listing RDS databases");

        let matching: Vec<&RdsDatabase> = self.databases.iter().filter(|db| db.matches(req)).collect();
        let databases: Vec<Database> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|db| Database::from(*db))
            .collect();

        let next = offset + databases.len();
        let next_token = if next < matching.len() {
            next.to_string()
        } else {
            String::new()
        };

        Ok(AwsOidcListDatabasesResponse {
            databases,
            next_token,
        })
    }
}
