// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::resource::ResourceRecord;
use crate::domain::models::tenant::TenantId;
use crate::domain::models::term::TermRecord;
use crate::domain::search::backend::{BackendError, SearchBackend, SearchResults};
use crate::domain::search::session::{
    AmbientTenant, ResolveError, SessionHandle, SessionResolver, SYSTEM_PRINCIPAL,
};
use metrics::counter;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The backend could not be reached or failed internally, including the
    /// case where no tenant session could be resolved.
    #[error("Unable to obtain a search backend client: {0}")]
    BackendUnavailable(#[from] BackendError),
    /// The backend executed the query but reported a logical failure.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<ResolveError> for SearchError {
    fn from(err: ResolveError) -> Self {
        // Callers cannot distinguish "can't resolve tenant" from "can't reach
        // backend"; topology stays internal.
        SearchError::BackendUnavailable(BackendError::Internal(err.to_string()))
    }
}

/// 租户级搜索门面
///
/// 四个查询族（内容、属性、词条、按查询词条），每族提供三种入口：
/// 显式会话、显式租户ID（以系统主体解析会话）、环境租户上下文
/// （解析失败或无效时回退到超级租户）。
pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
    sessions: Arc<dyn SessionResolver>,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>, sessions: Arc<dyn SessionResolver>) -> Self {
        Self { backend, sessions }
    }

    // === Content search ===

    pub async fn search_content_with_session(
        &self,
        session: &SessionHandle,
        query: &str,
    ) -> Result<Vec<ResourceRecord>, SearchError> {
        counter!("indexrs_searches_total", "family" => "content").increment(1);
        let results = self.backend.search_content(query, session).await?;
        Self::resources(results)
    }

    pub async fn search_content_for_tenant(
        &self,
        tenant_id: TenantId,
        query: &str,
    ) -> Result<Vec<ResourceRecord>, SearchError> {
        let session = self.system_session(tenant_id).await?;
        self.search_content_with_session(&session, query).await
    }

    pub async fn search_content(
        &self,
        ambient: &dyn AmbientTenant,
        query: &str,
    ) -> Result<Vec<ResourceRecord>, SearchError> {
        self.search_content_for_tenant(Self::ambient_tenant(ambient), query)
            .await
    }

    // === Attribute search ===

    pub async fn search_by_attribute_with_session(
        &self,
        session: &SessionHandle,
        fields: &HashMap<String, String>,
    ) -> Result<Vec<ResourceRecord>, SearchError> {
        counter!("indexrs_searches_total", "family" => "attribute").increment(1);
        let results = self.backend.search_by_attribute(fields, session).await?;
        Self::resources(results)
    }

    pub async fn search_by_attribute_for_tenant(
        &self,
        tenant_id: TenantId,
        fields: &HashMap<String, String>,
    ) -> Result<Vec<ResourceRecord>, SearchError> {
        let session = self.system_session(tenant_id).await?;
        self.search_by_attribute_with_session(&session, fields).await
    }

    pub async fn search_by_attribute(
        &self,
        ambient: &dyn AmbientTenant,
        fields: &HashMap<String, String>,
    ) -> Result<Vec<ResourceRecord>, SearchError> {
        self.search_by_attribute_for_tenant(Self::ambient_tenant(ambient), fields)
            .await
    }

    // === Terms search ===

    pub async fn search_terms_with_session(
        &self,
        session: &SessionHandle,
        fields: &HashMap<String, String>,
    ) -> Result<Vec<TermRecord>, SearchError> {
        counter!("indexrs_searches_total", "family" => "terms").increment(1);
        let results = self.backend.search_terms(fields, session).await?;
        Self::terms(results)
    }

    pub async fn search_terms_for_tenant(
        &self,
        tenant_id: TenantId,
        fields: &HashMap<String, String>,
    ) -> Result<Vec<TermRecord>, SearchError> {
        let session = self.system_session(tenant_id).await?;
        self.search_terms_with_session(&session, fields).await
    }

    pub async fn search_terms(
        &self,
        ambient: &dyn AmbientTenant,
        fields: &HashMap<String, String>,
    ) -> Result<Vec<TermRecord>, SearchError> {
        self.search_terms_for_tenant(Self::ambient_tenant(ambient), fields)
            .await
    }

    // === Terms-by-query search ===

    pub async fn search_terms_by_query_with_session(
        &self,
        session: &SessionHandle,
        query: &str,
        facet_field: &str,
    ) -> Result<Vec<TermRecord>, SearchError> {
        counter!("indexrs_searches_total", "family" => "terms_query").increment(1);
        let results = self
            .backend
            .search_terms_by_query(query, facet_field, session)
            .await?;
        Self::terms(results)
    }

    pub async fn search_terms_by_query_for_tenant(
        &self,
        tenant_id: TenantId,
        query: &str,
        facet_field: &str,
    ) -> Result<Vec<TermRecord>, SearchError> {
        let session = self.system_session(tenant_id).await?;
        self.search_terms_by_query_with_session(&session, query, facet_field)
            .await
    }

    pub async fn search_terms_by_query(
        &self,
        ambient: &dyn AmbientTenant,
        query: &str,
        facet_field: &str,
    ) -> Result<Vec<TermRecord>, SearchError> {
        self.search_terms_by_query_for_tenant(Self::ambient_tenant(ambient), query, facet_field)
            .await
    }

    // === Shared plumbing ===

    async fn system_session(&self, tenant_id: TenantId) -> Result<SessionHandle, SearchError> {
        Ok(self.sessions.resolve(tenant_id, SYSTEM_PRINCIPAL).await?)
    }

    /// 解析环境租户；无上下文或无效租户时回退到超级租户
    fn ambient_tenant(ambient: &dyn AmbientTenant) -> TenantId {
        match ambient.current_tenant() {
            Some(tenant_id) if tenant_id != TenantId::INVALID => tenant_id,
            _ => TenantId::SUPER,
        }
    }

    fn resources(results: SearchResults) -> Result<Vec<ResourceRecord>, SearchError> {
        match results.error_message {
            Some(message) if !message.is_empty() => {
                counter!("indexrs_search_failures_total").increment(1);
                Err(SearchError::QueryFailed(message))
            }
            _ => Ok(results.resources),
        }
    }

    fn terms(results: SearchResults) -> Result<Vec<TermRecord>, SearchError> {
        match results.error_message {
            Some(message) if !message.is_empty() => {
                counter!("indexrs_search_failures_total").increment(1);
                Err(SearchError::QueryFailed(message))
            }
            _ => Ok(results.terms),
        }
    }
}

#[cfg(test)]
#[path = "search_service_test.rs"]
mod tests;
