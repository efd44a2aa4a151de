// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::resource::ResourceRecord;
use crate::domain::models::term::TermRecord;
use crate::domain::search::session::SessionHandle;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum BackendError {
    #[error("Backend connection error: {0}")]
    Connection(String),
    #[error("Backend internal error: {0}")]
    Internal(String),
    #[error("Backend request timed out")]
    Timeout,
}

/// Result bundle produced by one backend query.
///
/// A populated `error_message` means the backend executed the query but
/// reported a logical failure; callers must treat the bundle as a failure and
/// ignore any record lists.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub resources: Vec<ResourceRecord>,
    pub terms: Vec<TermRecord>,
    pub error_message: Option<String>,
}

impl SearchResults {
    pub fn with_resources(resources: Vec<ResourceRecord>) -> Self {
        Self {
            resources,
            ..Default::default()
        }
    }

    pub fn with_terms(terms: Vec<TermRecord>) -> Self {
        Self {
            terms,
            ..Default::default()
        }
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Free-text search over a tenant's content.
    async fn search_content(
        &self,
        query: &str,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError>;

    /// Search by attribute name/value pairs. Key order is irrelevant.
    async fn search_by_attribute(
        &self,
        fields: &HashMap<String, String>,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError>;

    /// Term/frequency lookup for the given field filters.
    async fn search_terms(
        &self,
        fields: &HashMap<String, String>,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError>;

    /// Term/frequency lookup for a free-text query, faceted on one field.
    async fn search_terms_by_query(
        &self,
        query: &str,
        facet_field: &str,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError>;
}
