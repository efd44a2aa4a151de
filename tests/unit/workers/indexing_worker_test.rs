// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use indexrs::domain::search::backend::BackendError;
use indexrs::domain::search::indexing::{IndexMaintenance, IndexingError, IndexingTaskRunner};
use indexrs::workers::indexing_worker::IndexingWorker;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

struct CountingMaintenance {
    ticks: AtomicUsize,
}

impl CountingMaintenance {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            ticks: AtomicUsize::new(0),
        })
    }

    fn tick_count(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexMaintenance for CountingMaintenance {
    async fn run_maintenance(&self) -> Result<(), BackendError> {
        self.ticks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 维护钩子返回错误时工作器不得退出
struct FailingMaintenance;

#[async_trait]
impl IndexMaintenance for FailingMaintenance {
    async fn run_maintenance(&self) -> Result<(), BackendError> {
        Err(BackendError::Connection("refused".to_string()))
    }
}

#[tokio::test]
async fn worker_drives_maintenance_and_acknowledges_stop() {
    let maintenance = CountingMaintenance::new();
    let worker = IndexingWorker::new(maintenance.clone(), Duration::from_millis(5));

    worker.start().unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    // 两阶段关闭：请求停止，然后等待确认
    worker.request_stop();
    worker.wait_stopped().await;

    let ticks = maintenance.tick_count();
    assert!(ticks >= 1, "expected at least one maintenance tick");

    // 停止确认后不再产生新的tick
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(maintenance.tick_count(), ticks);
}

#[tokio::test]
async fn second_start_is_rejected() {
    let worker = IndexingWorker::new(CountingMaintenance::new(), Duration::from_secs(60));

    worker.start().unwrap();
    let err = worker.start().unwrap_err();
    assert!(matches!(err, IndexingError::AlreadyRunning));

    worker.request_stop();
    worker.wait_stopped().await;
}

#[tokio::test]
async fn wait_stopped_returns_immediately_when_never_started() {
    let worker = IndexingWorker::new(CountingMaintenance::new(), Duration::from_secs(60));

    // 从未启动的任务无需等待
    worker.wait_stopped().await;
}

#[tokio::test]
async fn maintenance_failures_do_not_stop_the_worker() {
    let worker = IndexingWorker::new(Arc::new(FailingMaintenance), Duration::from_millis(5));

    worker.start().unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    // 仍然响应停止信号
    worker.request_stop();
    worker.wait_stopped().await;
}
