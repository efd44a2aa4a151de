// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tenant::TenantId;
use async_trait::async_trait;
use thiserror::Error;

/// Principal used when the facade resolves a session on behalf of a tenant id.
pub const SYSTEM_PRINCIPAL: &str = "system";

/// A tenant-scoped execution context for backend queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub tenant_id: TenantId,
    pub principal: String,
    /// Backend collection the queries of this session run against.
    pub collection: String,
}

#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    #[error("Unknown tenant: {0}")]
    UnknownTenant(TenantId),
    #[error("Session resolution failed: {0}")]
    Internal(String),
}

#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve a tenant-scoped session for the given principal.
    async fn resolve(
        &self,
        tenant_id: TenantId,
        principal: &str,
    ) -> Result<SessionHandle, ResolveError>;
}

/// The "current tenant" associated with an in-flight call.
///
/// Passed explicitly by the caller; `None` means no context could be resolved
/// and the facade substitutes the super tenant.
pub trait AmbientTenant: Send + Sync {
    fn current_tenant(&self) -> Option<TenantId>;
}
