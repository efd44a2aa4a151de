use crate::config::settings::BackendSettings;
use crate::domain::models::resource::ResourceRecord;
use crate::domain::models::term::TermRecord;
use crate::domain::search::backend::{BackendError, SearchBackend, SearchResults};
use crate::domain::search::indexing::IndexMaintenance;
use crate::domain::search::session::SessionHandle;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Solr查询响应结构
#[derive(Debug, Deserialize)]
struct SolrResponse {
    response: Option<SolrDocList>,
    facet_counts: Option<SolrFacetCounts>,
    error: Option<SolrErrorBody>,
}

#[derive(Debug, Deserialize)]
struct SolrDocList {
    docs: Vec<SolrDoc>,
}

/// 平台在后端中使用的文档schema字段
#[derive(Debug, Deserialize)]
struct SolrDoc {
    name: Option<String>,
    path: Option<String>,
    media_type: Option<String>,
    author: Option<String>,
    created_at: Option<DateTime<Utc>>,
    score: Option<f64>,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SolrFacetCounts {
    facet_fields: HashMap<String, Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct SolrErrorBody {
    msg: Option<String>,
    code: Option<i32>,
}

impl From<SolrDoc> for ResourceRecord {
    fn from(doc: SolrDoc) -> Self {
        ResourceRecord {
            name: doc.name.unwrap_or_default(),
            path: doc.path.unwrap_or_default(),
            media_type: doc.media_type,
            author: doc.author,
            created_at: doc.created_at,
            score: doc.score.unwrap_or(0.0),
            snippet: doc.snippet,
        }
    }
}

/// Solr风格HTTP搜索后端客户端
///
/// 每个租户集合暴露标准的 select/update 端点；查询错误随响应体返回，
/// 连接层错误映射为 [`BackendError`]。后端自身的索引实现保持不透明。
pub struct SolrBackend {
    client: reqwest::Client,
    base_url: String,
    root_collection: String,
    row_limit: u32,
}

impl SolrBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        // 尽早暴露配置错误
        Url::parse(&settings.url)
            .map_err(|e| BackendError::Internal(format!("Invalid backend URL: {}", e)))?;

        let timeout = Duration::from_secs(settings.request_timeout.unwrap_or(30));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            root_collection: settings.root_collection.clone(),
            row_limit: settings.row_limit.unwrap_or(100),
        })
    }

    fn select_url(&self, collection: &str) -> String {
        format!("{}/{}/select", self.base_url, collection)
    }

    /// 执行一次select查询并解析响应
    ///
    /// 非2xx状态下Solr仍返回JSON错误体，此时作为逻辑错误随结果束返回；
    /// 传输层失败映射为 [`BackendError`]。
    async fn select(
        &self,
        collection: &str,
        params: Vec<(String, String)>,
    ) -> Result<SolrResponse, BackendError> {
        let url = self.select_url(collection);
        debug!("Backend select: {} ({} params)", url, params.len());

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        match serde_json::from_str::<SolrResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!("Unparseable backend response (status {}): {}", status, e);
                Err(BackendError::Internal(format!(
                    "Backend returned status {} with unparseable body",
                    status
                )))
            }
        }
    }

    fn base_params(&self, query: &str, rows: u32) -> Vec<(String, String)> {
        vec![
            ("q".to_string(), query.to_string()),
            ("wt".to_string(), "json".to_string()),
            ("rows".to_string(), rows.to_string()),
        ]
    }

    fn into_resource_results(response: SolrResponse) -> SearchResults {
        if let Some(error) = response.error {
            return SearchResults::with_error(Self::error_text(error));
        }
        let resources = response
            .response
            .map(|list| list.docs.into_iter().map(ResourceRecord::from).collect())
            .unwrap_or_default();
        SearchResults::with_resources(resources)
    }

    fn into_term_results(response: SolrResponse) -> SearchResults {
        if let Some(error) = response.error {
            return SearchResults::with_error(Self::error_text(error));
        }
        let terms = response
            .facet_counts
            .map(|counts| {
                counts
                    .facet_fields
                    .into_values()
                    .flat_map(|entries| Self::facet_pairs(&entries))
                    .collect()
            })
            .unwrap_or_default();
        SearchResults::with_terms(terms)
    }

    /// facet数组交替存放词条与计数: ["pdf", 3, "xml", 1]
    fn facet_pairs(entries: &[serde_json::Value]) -> Vec<TermRecord> {
        entries
            .chunks(2)
            .filter_map(|pair| match pair {
                [term, count] => Some(TermRecord::new(
                    term.as_str()?.to_string(),
                    count.as_u64()?,
                )),
                _ => None,
            })
            .collect()
    }

    fn error_text(error: SolrErrorBody) -> String {
        match (error.msg, error.code) {
            (Some(msg), _) => msg,
            (None, Some(code)) => format!("Backend error code {}", code),
            (None, None) => "Unknown backend error".to_string(),
        }
    }
}

#[async_trait]
impl SearchBackend for SolrBackend {
    async fn search_content(
        &self,
        query: &str,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        let params = self.base_params(query, self.row_limit);
        let response = self.select(&session.collection, params).await?;
        Ok(Self::into_resource_results(response))
    }

    async fn search_by_attribute(
        &self,
        fields: &HashMap<String, String>,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        let mut params = self.base_params("*:*", self.row_limit);
        for (field, value) in fields {
            params.push(("fq".to_string(), format!("{}:\"{}\"", field, value)));
        }
        let response = self.select(&session.collection, params).await?;
        Ok(Self::into_resource_results(response))
    }

    async fn search_terms(
        &self,
        fields: &HashMap<String, String>,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        let mut params = self.base_params("*:*", 0);
        params.push(("facet".to_string(), "true".to_string()));
        params.push(("facet.mincount".to_string(), "1".to_string()));
        for (field, value) in fields {
            params.push(("facet.field".to_string(), field.clone()));
            if !value.is_empty() && value != "*" {
                params.push(("fq".to_string(), format!("{}:\"{}\"", field, value)));
            }
        }
        let response = self.select(&session.collection, params).await?;
        Ok(Self::into_term_results(response))
    }

    async fn search_terms_by_query(
        &self,
        query: &str,
        facet_field: &str,
        session: &SessionHandle,
    ) -> Result<SearchResults, BackendError> {
        let mut params = self.base_params(query, 0);
        params.push(("facet".to_string(), "true".to_string()));
        params.push(("facet.mincount".to_string(), "1".to_string()));
        params.push(("facet.field".to_string(), facet_field.to_string()));
        let response = self.select(&session.collection, params).await?;
        Ok(Self::into_term_results(response))
    }
}

#[async_trait]
impl IndexMaintenance for SolrBackend {
    /// 对根集合提交一次commit，将积压的索引写入刷入可见状态
    async fn run_maintenance(&self) -> Result<(), BackendError> {
        let url = format!(
            "{}/{}/update?commit=true",
            self.base_url, self.root_collection
        );
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout
                } else {
                    BackendError::Connection(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(BackendError::Internal(format!(
                "Index maintenance returned status {}",
                response.status()
            )));
        }
        debug!("Index maintenance commit acknowledged");
        Ok(())
    }
}
