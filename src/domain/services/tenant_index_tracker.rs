// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tenant::TenantId;
use dashmap::DashMap;
use tracing::debug;

/// 租户索引激活状态跟踪器
///
/// 记录每个租户的搜索索引是否已激活，以及激活原因：
/// `true` 表示随租户部署事件激活，`false` 表示由用户登录惰性激活。
/// 没有条目表示未激活。部署激活具有粘性，不会被登录激活降级。
#[derive(Debug, Default)]
pub struct TenantIndexTracker {
    /// 已激活租户及其激活原因
    entries: DashMap<TenantId, bool>,
}

impl TenantIndexTracker {
    /// 创建一个新的TenantIndexTracker实例
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// 查询租户索引的激活原因
    ///
    /// # 参数
    ///
    /// * `tenant_id` - 租户的唯一标识符
    ///
    /// # 返回值
    ///
    /// * `Some(true)` - 随部署事件激活
    /// * `Some(false)` - 由登录事件激活
    /// * `None` - 索引未激活
    pub fn is_loaded(&self, tenant_id: TenantId) -> Option<bool> {
        self.entries.get(&tenant_id).map(|entry| *entry)
    }

    /// 判断租户当前是否允许使用索引
    ///
    /// 超级租户始终允许；其他租户只要存在激活条目即允许，与激活原因无关。
    pub fn can_index(&self, tenant_id: TenantId) -> bool {
        tenant_id.is_super() || self.entries.contains_key(&tenant_id)
    }

    /// 标记租户索引已激活
    ///
    /// 无条目时插入；已有登录条目且本次为部署激活时升级为部署；
    /// 其余情况为幂等空操作。整个读-改-写在单个条目锁内完成，
    /// 并发调用同一租户时部署激活必定胜出。
    ///
    /// # 参数
    ///
    /// * `tenant_id` - 租户的唯一标识符
    /// * `via_deployment` - 是否由部署事件触发
    pub fn load(&self, tenant_id: TenantId, via_deployment: bool) {
        self.entries
            .entry(tenant_id)
            .and_modify(|flag| {
                if via_deployment && !*flag {
                    *flag = true;
                }
            })
            .or_insert(via_deployment);
        debug!(
            "Tenant {} index loaded (via_deployment: {}), tracked tenants: {}",
            tenant_id,
            via_deployment,
            self.entries.len()
        );
    }

    /// 移除租户的激活条目
    ///
    /// 条目不存在时为空操作。
    pub fn unload(&self, tenant_id: TenantId) {
        if self.entries.remove(&tenant_id).is_some() {
            debug!(
                "Tenant {} index unloaded, tracked tenants: {}",
                tenant_id,
                self.entries.len()
            );
        }
    }
}
