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

use axum::Extension;
use indexrs::config::settings::Settings;
use indexrs::domain::search::backend::SearchBackend;
use indexrs::domain::search::indexing::{IndexMaintenance, IndexingTaskRunner};
use indexrs::domain::search::session::SessionResolver;
use indexrs::domain::services::search_service::SearchService;
use indexrs::domain::services::tenant_index_tracker::TenantIndexTracker;
use indexrs::infrastructure::search::{RegistrySessionResolver, SolrBackend};
use indexrs::presentation::routes;
use indexrs::utils::telemetry;
use indexrs::workers::indexing_worker::IndexingWorker;
use indexrs::workers::manager::LifecycleManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting indexrs...");

    // Initialize Prometheus Metrics
    indexrs::infrastructure::metrics::init_metrics();

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize search backend adapter
    let solr = Arc::new(SolrBackend::new(&settings.backend)?);
    let backend: Arc<dyn SearchBackend> = solr.clone();
    info!("Search backend client initialized ({})", settings.backend.url);

    // 4. Initialize session resolver and tenant index tracker
    let sessions: Arc<dyn SessionResolver> = Arc::new(RegistrySessionResolver::new(
        settings.backend.root_collection.clone(),
    ));
    let tenants = Arc::new(TenantIndexTracker::new());

    // 5. Initialize search facade
    let search_service = Arc::new(SearchService::new(backend, sessions));

    // 6. Initialize lifecycle manager and start background indexing
    let maintenance: Arc<dyn IndexMaintenance> = solr;
    let indexer: Arc<dyn IndexingTaskRunner> = Arc::new(IndexingWorker::new(
        maintenance,
        Duration::from_secs(settings.indexing.interval_secs),
    ));
    let lifecycle = Arc::new(LifecycleManager::new(
        tenants.clone(),
        indexer,
        settings.indexing.enabled,
    ));
    lifecycle.on_start();

    // 7. Start HTTP server
    let app = routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(Extension(search_service))
        .layer(Extension(lifecycle.clone()))
        .layer(Extension(tenants));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(err) => tracing::error!("Unable to listen for shutdown signal: {}", err),
            }
        })
        .await?;

    // 8. Two-phase indexing shutdown before anything else is released
    lifecycle.on_stop().await;
    info!("indexrs shut down");

    Ok(())
}
