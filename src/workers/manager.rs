// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tenant::TenantId;
use crate::domain::search::indexing::IndexingTaskRunner;
use crate::domain::services::tenant_index_tracker::TenantIndexTracker;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 租户生命周期管理器
///
/// 响应宿主的租户事件（创建、终止、登录激活）维护租户索引状态，
/// 并在宿主启动/关闭时管理后台索引任务。
pub struct LifecycleManager {
    tenants: Arc<TenantIndexTracker>,
    indexer: Arc<dyn IndexingTaskRunner>,
    indexing_enabled: bool,
}

impl LifecycleManager {
    pub fn new(
        tenants: Arc<TenantIndexTracker>,
        indexer: Arc<dyn IndexingTaskRunner>,
        indexing_enabled: bool,
    ) -> Self {
        Self {
            tenants,
            indexer,
            indexing_enabled,
        }
    }

    /// 租户上下文创建事件：随部署激活索引
    pub fn on_tenant_created(&self, tenant_id: TenantId) {
        debug!("Tenant context created: {}", tenant_id);
        self.tenants.load(tenant_id, true);
    }

    /// 租户上下文终止事件：移除激活条目
    pub fn on_tenant_terminated(&self, tenant_id: TenantId) {
        debug!("Tenant context terminated: {}", tenant_id);
        self.tenants.unload(tenant_id);
    }

    /// 登录触发的惰性激活
    ///
    /// 用于租户仅被使用而非重新部署的场景
    pub fn load_tenant_index(&self, tenant_id: TenantId) {
        self.tenants.load(tenant_id, false);
    }

    /// 宿主启动钩子
    ///
    /// 启用时启动后台索引任务；启动失败只记录日志，
    /// 门面的即席查询不受影响。
    pub fn on_start(&self) {
        if !self.indexing_enabled {
            info!("Background indexing disabled by configuration");
            return;
        }
        if let Err(e) = self.indexer.start() {
            error!("Failed to start background indexing task: {}", e);
        }
    }

    /// 宿主关闭钩子
    ///
    /// 两阶段关闭：先请求停止，再等待任务确认完成。
    /// 必须在宿主释放其余组件之前完成，避免打断进行中的索引写入。
    pub async fn on_stop(&self) {
        self.indexer.request_stop();
        self.indexer.wait_stopped().await;
        info!("Background indexing task shut down");
    }
}
