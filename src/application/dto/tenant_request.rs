// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 租户索引激活原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadReason {
    /// 随租户部署事件激活
    #[default]
    Deployment,
    /// 由用户登录惰性激活
    Login,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct TenantIndexLoadRequestDto {
    #[serde(default)]
    pub reason: LoadReason,
}

#[derive(Debug, Serialize)]
pub struct TenantIndexStatusDto {
    pub tenant_id: i32,
    pub can_index: bool,
    /// `Some(true)` 部署激活；`Some(false)` 登录激活；`None` 未激活
    pub loaded_via_deployment: Option<bool>,
}
