//! Database discovery models.
//!
//! Request/response pair for listing AWS RDS databases through an `aws-oidc`
//! integration, plus the database view shown in the UI.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for listing databases through an AWS OIDC integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AwsOidcListDatabasesRequest {
    /// Either `instance` or `cluster`.
    pub rds_type: String,
    /// Engine filters, e.g. `mysql`, `postgres`, `aurora-postgresql`.
    pub engines: Vec<String>,
    /// AWS region.
    pub region: String,
    /// Token of the page to fetch. Empty fetches the first page.
    pub next_token: String,
}

/// A page of discovered databases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsOidcListDatabasesResponse {
    /// Databases on this page.
    pub databases: Vec<Database>,
    /// Token for the next page, omitted on the last page.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_token: String,
}

/// Key/value label attached to a database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Label {
    /// Label key.
    pub name: String,
    /// Label value.
    pub value: String,
}

impl Label {
    /// Creates a new label.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Database view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Database {
    /// Database display name.
    pub name: String,
    /// Free-form description.
    pub desc: String,
    /// Wire protocol (mysql, postgres).
    pub protocol: String,
    /// Database type (rds).
    #[serde(rename = "type")]
    pub db_type: String,
    /// Connection endpoint, `host:port`.
    pub uri: String,
    /// Labels.
    pub labels: Vec<Label>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_field_names() {
        let req: AwsOidcListDatabasesRequest = serde_json::from_value(json!({
            "rdsType": "instance",
            "engines": ["postgres", "mysql"],
            "region": "us-east-1",
            "nextToken": "abc"
        }))
        .unwrap();
        assert_eq!(req.rds_type, "instance");
        assert_eq!(req.engines, vec!["postgres", "mysql"]);
        assert_eq!(req.region, "us-east-1");
        assert_eq!(req.next_token, "abc");

        // none of the request fields are omitted
        let value = serde_json::to_value(AwsOidcListDatabasesRequest::default()).unwrap();
        assert_eq!(
            value,
            json!({"rdsType": "", "engines": [], "region": "", "nextToken": ""})
        );
    }

    #[test]
    fn test_response_omits_empty_next_token() {
        let value = serde_json::to_value(AwsOidcListDatabasesResponse::default()).unwrap();
        assert_eq!(value, json!({"databases": []}));

        let resp = AwsOidcListDatabasesResponse {
            databases: vec![],
            next_token: "50".to_string(),
        };
        assert_eq!(serde_json::to_value(resp).unwrap()["nextToken"], "50");
    }

    #[test]
    fn test_database_type_key() {
        let db = Database {
            name: "orders".to_string(),
            desc: String::new(),
            protocol: "postgres".to_string(),
            db_type: "rds".to_string(),
            uri: "orders.abc.us-east-1.rds.amazonaws.com:5432".to_string(),
            labels: vec![Label::new("region", "us-east-1")],
        };
        let value = serde_json::to_value(db).unwrap();
        assert_eq!(value["type"], "rds");
        assert_eq!(value["labels"][0]["name"], "region");
    }
}
