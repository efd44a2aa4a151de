// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::backend::BackendError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexingError {
    #[error("Indexing task already running")]
    AlreadyRunning,
}

/// 后台索引任务在每个周期驱动的维护钩子
///
/// 实际的索引写入由搜索后端完成，这里只负责触发
#[async_trait]
pub trait IndexMaintenance: Send + Sync {
    async fn run_maintenance(&self) -> Result<(), BackendError>;
}

/// 后台索引任务的两阶段生命周期契约
///
/// 关闭分两步：先请求停止，再等待任务确认完成。任务必须协作式地
/// 响应停止信号，不会被强制终止。
#[async_trait]
pub trait IndexingTaskRunner: Send + Sync {
    /// 启动后台任务
    fn start(&self) -> Result<(), IndexingError>;

    /// 请求停止（阶段一，立即返回）
    fn request_stop(&self);

    /// 等待任务确认停止完成（阶段二）
    ///
    /// 若任务从未启动则立即返回
    async fn wait_stopped(&self);
}
