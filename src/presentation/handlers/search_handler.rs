// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::dto::search_request::{
        AttributeSearchRequestDto, ContentSearchRequestDto, ResourceSearchResponseDto,
        TermSearchResponseDto, TermsQuerySearchRequestDto, TermsSearchRequestDto,
    },
    domain::services::search_service::{SearchError, SearchService},
    presentation::extractors::tenant_id::AmbientTenantHeader,
};

/// 处理内容搜索请求
///
/// 租户上下文取自可选的 `X-Tenant-Id` 请求头；缺失时由门面
/// 回退到超级租户。
///
/// # 返回值
///
/// 返回实现了 `IntoResponse` 的响应，包含搜索结果或错误信息
pub async fn search_content(
    Extension(service): Extension<Arc<SearchService>>,
    ambient: AmbientTenantHeader,
    Json(payload): Json<ContentSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
    }
    match service.search_content(&ambient, &payload.query).await {
        Ok(results) => resource_response(results),
        Err(e) => error_response(e),
    }
}

/// 处理属性搜索请求
pub async fn search_by_attribute(
    Extension(service): Extension<Arc<SearchService>>,
    ambient: AmbientTenantHeader,
    Json(payload): Json<AttributeSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
    }
    match service.search_by_attribute(&ambient, &payload.fields).await {
        Ok(results) => resource_response(results),
        Err(e) => error_response(e),
    }
}

/// 处理词条搜索请求
pub async fn search_terms(
    Extension(service): Extension<Arc<SearchService>>,
    ambient: AmbientTenantHeader,
    Json(payload): Json<TermsSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
    }
    match service.search_terms(&ambient, &payload.fields).await {
        Ok(terms) => term_response(terms),
        Err(e) => error_response(e),
    }
}

/// 处理按查询词条搜索请求
pub async fn search_terms_by_query(
    Extension(service): Extension<Arc<SearchService>>,
    ambient: AmbientTenantHeader,
    Json(payload): Json<TermsQuerySearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response();
    }
    match service
        .search_terms_by_query(&ambient, &payload.query, &payload.facet_field)
        .await
    {
        Ok(terms) => term_response(terms),
        Err(e) => error_response(e),
    }
}

fn resource_response(results: Vec<crate::domain::models::resource::ResourceRecord>) -> axum::response::Response {
    let body = ResourceSearchResponseDto {
        total: results.len(),
        results,
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn term_response(results: Vec<crate::domain::models::term::TermRecord>) -> axum::response::Response {
    let body = TermSearchResponseDto {
        total: results.len(),
        results,
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(err: SearchError) -> axum::response::Response {
    let (status, msg): (StatusCode, String) = err.into();
    (status, Json(json!({ "error": msg }))).into_response()
}

impl From<SearchError> for (StatusCode, String) {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::BackendUnavailable(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            SearchError::QueryFailed(message) => (StatusCode::BAD_REQUEST, message),
        }
    }
}
