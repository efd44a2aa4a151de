// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use once_cell::sync::Lazy;
use serde_json::json;

use crate::domain::models::tenant::TenantId;
use crate::domain::search::session::AmbientTenant;

static HEADER_NAME: Lazy<HeaderName> = Lazy::new(|| HeaderName::from_static("x-tenant-id"));

/// 从请求头提取的环境租户上下文
///
/// 请求未携带 `X-Tenant-Id` 时为 `None`，由搜索门面回退到超级租户；
/// 携带了无法解析的值则拒绝请求。
#[derive(Debug, Clone, Copy)]
pub struct AmbientTenantHeader(pub Option<TenantId>);

impl AmbientTenant for AmbientTenantHeader {
    fn current_tenant(&self) -> Option<TenantId> {
        self.0
    }
}

impl<S> FromRequestParts<S> for AmbientTenantHeader
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(&*HEADER_NAME) {
            None => Ok(Self(None)),
            Some(value) => {
                let parsed = value
                    .to_str()
                    .ok()
                    .and_then(|raw| raw.trim().parse::<i32>().ok());
                match parsed {
                    Some(id) => Ok(Self(Some(TenantId(id)))),
                    None => {
                        let status = StatusCode::BAD_REQUEST;
                        let body = Json(json!({ "error": "Invalid X-Tenant-Id header" }));
                        Err((status, body).into_response())
                    }
                }
            }
        }
    }
}
