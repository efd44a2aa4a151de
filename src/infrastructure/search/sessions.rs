// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tenant::TenantId;
use crate::domain::search::session::{ResolveError, SessionHandle, SessionResolver};
use async_trait::async_trait;
use tracing::debug;

/// 租户会话解析器
///
/// 将租户ID映射到其后端集合：超级租户使用根集合，
/// 其他租户使用 `{根集合}_{租户ID}`。
pub struct RegistrySessionResolver {
    root_collection: String,
}

impl RegistrySessionResolver {
    pub fn new(root_collection: impl Into<String>) -> Self {
        Self {
            root_collection: root_collection.into(),
        }
    }
}

#[async_trait]
impl SessionResolver for RegistrySessionResolver {
    async fn resolve(
        &self,
        tenant_id: TenantId,
        principal: &str,
    ) -> Result<SessionHandle, ResolveError> {
        if !tenant_id.is_valid() {
            return Err(ResolveError::UnknownTenant(tenant_id));
        }

        let collection = if tenant_id.is_super() {
            self.root_collection.clone()
        } else {
            format!("{}_{}", self.root_collection, tenant_id.0)
        };

        debug!(
            "Resolved session for tenant {} as {} on collection {}",
            tenant_id, principal, collection
        );

        Ok(SessionHandle {
            tenant_id,
            principal: principal.to_string(),
            collection,
        })
    }
}
