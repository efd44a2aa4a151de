// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum::Extension;
use axum_test::TestServer;
use indexrs::domain::models::resource::ResourceRecord;
use indexrs::domain::search::backend::{BackendError, SearchBackend, SearchResults};
use indexrs::domain::search::indexing::IndexingTaskRunner;
use indexrs::domain::search::session::{SessionHandle, SessionResolver};
use indexrs::domain::services::search_service::SearchService;
use indexrs::domain::services::tenant_index_tracker::TenantIndexTracker;
use indexrs::infrastructure::search::RegistrySessionResolver;
use indexrs::presentation::routes;
use indexrs::workers::manager::LifecycleManager;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// 返回固定结果束的后端stub
struct StubBackend(SearchResults);

#[async_trait]
impl SearchBackend for StubBackend {
    async fn search_content(
        &self,
        _query: &str,
        _session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        Ok(self.0.clone())
    }

    async fn search_by_attribute(
        &self,
        _fields: &HashMap<String, String>,
        _session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        Ok(self.0.clone())
    }

    async fn search_terms(
        &self,
        _fields: &HashMap<String, String>,
        _session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        Ok(self.0.clone())
    }

    async fn search_terms_by_query(
        &self,
        _query: &str,
        _facet_field: &str,
        _session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        Ok(self.0.clone())
    }
}

/// 测试中不应被触发的索引任务
struct IdleRunner;

#[async_trait]
impl IndexingTaskRunner for IdleRunner {
    fn start(&self) -> Result<(), indexrs::domain::search::indexing::IndexingError> {
        Ok(())
    }

    fn request_stop(&self) {}

    async fn wait_stopped(&self) {}
}

fn test_server(outcome: SearchResults) -> TestServer {
    let backend: Arc<dyn SearchBackend> = Arc::new(StubBackend(outcome));
    let sessions: Arc<dyn SessionResolver> = Arc::new(RegistrySessionResolver::new("registry"));
    let service = Arc::new(SearchService::new(backend, sessions));
    let tenants = Arc::new(TenantIndexTracker::new());
    let indexer: Arc<dyn IndexingTaskRunner> = Arc::new(IdleRunner);
    let lifecycle = Arc::new(LifecycleManager::new(tenants.clone(), indexer, false));

    let app = routes::routes()
        .layer(Extension(service))
        .layer(Extension(lifecycle))
        .layer(Extension(tenants));

    TestServer::new(app).expect("test server should start")
}

fn sample_results() -> SearchResults {
    SearchResults::with_resources(vec![ResourceRecord::new(
        "report.pdf".to_string(),
        "/docs/report.pdf".to_string(),
    )])
}

#[tokio::test]
async fn health_check_works() {
    let server = test_server(SearchResults::default());
    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn content_search_returns_results() {
    let server = test_server(sample_results());
    let response = server
        .post("/v1/search/content")
        .json(&json!({ "query": "annual report" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"][0]["path"], "/docs/report.pdf");
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let server = test_server(sample_results());
    let response = server
        .post("/v1/search/content")
        .json(&json!({ "query": "" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn backend_query_failure_maps_to_bad_request() {
    let server = test_server(SearchResults::with_error("missing collection"));
    let response = server
        .post("/v1/search/content")
        .json(&json!({ "query": "x" }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "missing collection");
}

#[tokio::test]
async fn malformed_tenant_header_is_rejected() {
    let server = test_server(sample_results());
    let response = server
        .post("/v1/search/content")
        .add_header(
            HeaderName::from_static("x-tenant-id"),
            HeaderValue::from_static("not-a-number"),
        )
        .json(&json!({ "query": "x" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn tenant_header_scopes_the_search() {
    let server = test_server(sample_results());
    let response = server
        .post("/v1/search/content")
        .add_header(
            HeaderName::from_static("x-tenant-id"),
            HeaderValue::from_static("42"),
        )
        .json(&json!({ "query": "x" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn terms_query_returns_term_records() {
    let server = test_server(SearchResults::with_terms(vec![
        indexrs::domain::models::term::TermRecord::new("pdf".to_string(), 3),
    ]));
    let response = server
        .post("/v1/search/terms-query")
        .json(&json!({ "query": "*", "facet_field": "media_type" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"][0]["term"], "pdf");
    assert_eq!(body["results"][0]["frequency"], 3);
}

#[tokio::test]
async fn tenant_index_lifecycle_over_http() {
    let server = test_server(SearchResults::default());

    // 登录激活
    let response = server
        .put("/v1/tenants/42/index")
        .json(&json!({ "reason": "login" }))
        .await;
    assert_eq!(response.status_code(), 204);

    let status: Value = server.get("/v1/tenants/42/index").await.json();
    assert_eq!(status["can_index"], true);
    assert_eq!(status["loaded_via_deployment"], false);

    // 部署事件升级激活原因
    let response = server
        .put("/v1/tenants/42/index")
        .json(&json!({ "reason": "deployment" }))
        .await;
    assert_eq!(response.status_code(), 204);

    let status: Value = server.get("/v1/tenants/42/index").await.json();
    assert_eq!(status["loaded_via_deployment"], true);

    // 终止后回到未激活
    let response = server.delete("/v1/tenants/42/index").await;
    assert_eq!(response.status_code(), 204);

    let status: Value = server.get("/v1/tenants/42/index").await.json();
    assert_eq!(status["can_index"], false);
    assert_eq!(status["loaded_via_deployment"], Value::Null);
}

#[tokio::test]
async fn invalid_tenant_id_cannot_be_loaded() {
    let server = test_server(SearchResults::default());
    let response = server
        .put("/v1/tenants/-1/index")
        .json(&json!({ "reason": "deployment" }))
        .await;

    assert_eq!(response.status_code(), 400);
}
