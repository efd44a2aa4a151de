// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{search_handler, tenant_handler};
use axum::{
    routing::{get, post, put},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/v1/search/content", post(search_handler::search_content))
        .route(
            "/v1/search/attribute",
            post(search_handler::search_by_attribute),
        )
        .route("/v1/search/terms", post(search_handler::search_terms))
        .route(
            "/v1/search/terms-query",
            post(search_handler::search_terms_by_query),
        )
        .route(
            "/v1/tenants/{id}/index",
            put(tenant_handler::load_tenant_index)
                .delete(tenant_handler::unload_tenant_index)
                .get(tenant_handler::tenant_index_status),
        );

    Router::new().merge(public_routes).merge(api_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
