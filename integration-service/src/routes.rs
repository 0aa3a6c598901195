//! 集成服务路由模块

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use common::middleware::request_id_middleware;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handlers::{
    create_integration, delete_integration, get_integration, health_check,
    list_aws_oidc_databases, list_integrations, update_integration,
};
use crate::state::AppState;
use crate::ApiDoc;

/// 创建集成管理路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/integrations", get(list_integrations).post(create_integration))
        .route(
            "/api/integrations/{name}",
            get(get_integration)
                .put(update_integration)
                .delete(delete_integration),
        )
        .route(
            "/api/integrations/{name}/aws-oidc/databases",
            post(list_aws_oidc_databases),
        )
        .route("/api/health", get(health_check))
}

/// 创建完整应用（中间件 + 文档）
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use common::config::AppConfig;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::aws_oidc::{RdsDatabase, StaticRdsCatalog};

    const ROLE: &str = "arn:aws:iam::123:role/x";

    fn app() -> Router {
        let catalog = StaticRdsCatalog::new(
            vec![RdsDatabase {
                name: "orders".to_string(),
                engine: "postgres".to_string(),
                region: "us-east-1".to_string(),
                rds_type: "instance".to_string(),
                endpoint: "orders.local".to_string(),
                port: 5432,
            }],
            10,
        );
        let state = AppState::new(AppConfig::default(), Arc::new(catalog));
        create_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn create_body(name: &str) -> Value {
        json!({"name": name, "subKind": "aws-oidc", "awsoidc": {"roleArn": ROLE}})
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = app();
        let (status, body) = send(&app, Method::POST, "/api/integrations", Some(create_body("prod"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, create_body("prod"));

        let (status, body) = send(&app, Method::GET, "/api/integrations/prod", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["awsoidc"]["roleArn"], ROLE);
    }

    #[tokio::test]
    async fn test_create_missing_name_is_bad_request() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/integrations",
            Some(json!({"subKind": "aws-oidc"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
        assert_eq!(body["error"]["message"], "missing integration name");
    }

    #[tokio::test]
    async fn test_list_pagination_envelope() {
        let app = app();
        for name in ["a", "b", "c"] {
            send(&app, Method::POST, "/api/integrations", Some(create_body(name))).await;
        }

        let (status, body) = send(&app, Method::GET, "/api/integrations?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["nextKey"], "c");

        let (_, body) = send(&app, Method::GET, "/api/integrations?limit=2&startKey=c", None).await;
        assert_eq!(body["items"][0]["name"], "c");
        assert_eq!(body["nextKey"], "");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = app();
        send(&app, Method::POST, "/api/integrations", Some(create_body("prod"))).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/integrations/prod",
            Some(json!({"awsoidc": {"roleArn": "arn:aws:iam::123:role/y"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["awsoidc"]["roleArn"], "arn:aws:iam::123:role/y");

        let (status, body) = send(&app, Method::PUT, "/api/integrations/prod", Some(json!({"awsoidc": {}}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "missing awsoidc.roleArn field");

        let (status, body) = send(&app, Method::DELETE, "/api/integrations/prod", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["meta"]["request_id"].is_string());

        let (status, body) = send(&app, Method::GET, "/api/integrations/prod", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_aws_oidc_databases() {
        let app = app();
        send(&app, Method::POST, "/api/integrations", Some(create_body("prod"))).await;

        let req = json!({"rdsType": "instance", "engines": ["postgres"], "region": "us-east-1", "nextToken": ""});
        let (status, body) = send(&app, Method::POST, "/api/integrations/prod/aws-oidc/databases", Some(req)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["databases"][0]["name"], "orders");
        assert_eq!(body["databases"][0]["uri"], "orders.local:5432");
        assert!(body.get("nextToken").is_none());

        let bad = json!({"rdsType": "proxy", "engines": ["postgres"], "region": "us-east-1"});
        let (status, _) = send(&app, Method::POST, "/api/integrations/prod/aws-oidc/databases", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_and_openapi() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["integrations"], 0);

        let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/integrations"].is_object());
    }
}
