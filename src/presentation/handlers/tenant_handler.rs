// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    application::dto::tenant_request::{
        LoadReason, TenantIndexLoadRequestDto, TenantIndexStatusDto,
    },
    domain::models::tenant::TenantId,
    domain::services::tenant_index_tracker::TenantIndexTracker,
    presentation::errors::AppError,
    workers::manager::LifecycleManager,
};

/// 激活租户索引
///
/// 宿主在租户部署完成或用户登录时调用；`reason` 区分两种激活路径。
pub async fn load_tenant_index(
    Extension(lifecycle): Extension<Arc<LifecycleManager>>,
    Path(id): Path<i32>,
    Json(payload): Json<TenantIndexLoadRequestDto>,
) -> Result<StatusCode, AppError> {
    let tenant_id = TenantId(id);
    if !tenant_id.is_valid() {
        return Err(anyhow::anyhow!("invalid tenant id: {}", id).into());
    }

    match payload.reason {
        LoadReason::Deployment => lifecycle.on_tenant_created(tenant_id),
        LoadReason::Login => lifecycle.load_tenant_index(tenant_id),
    }

    Ok(StatusCode::NO_CONTENT)
}

/// 移除租户索引激活状态
///
/// 对应租户上下文终止事件；重复调用为空操作。
pub async fn unload_tenant_index(
    Extension(lifecycle): Extension<Arc<LifecycleManager>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    lifecycle.on_tenant_terminated(TenantId(id));
    StatusCode::NO_CONTENT.into_response()
}

/// 查询租户索引激活状态
pub async fn tenant_index_status(
    Extension(tenants): Extension<Arc<TenantIndexTracker>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let tenant_id = TenantId(id);
    let body = TenantIndexStatusDto {
        tenant_id: id,
        can_index: tenants.can_index(tenant_id),
        loaded_via_deployment: tenants.is_loaded(tenant_id),
    };
    (StatusCode::OK, Json(body)).into_response()
}
