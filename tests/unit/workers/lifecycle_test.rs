// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use indexrs::domain::models::tenant::TenantId;
use indexrs::domain::search::indexing::{IndexingError, IndexingTaskRunner};
use indexrs::domain::services::tenant_index_tracker::TenantIndexTracker;
use indexrs::workers::manager::LifecycleManager;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// 记录调用顺序的索引任务mock
struct RecordingRunner {
    calls: Mutex<Vec<&'static str>>,
    fail_start: bool,
    stop_requested: AtomicBool,
}

impl RecordingRunner {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_start: false,
            stop_requested: AtomicBool::new(false),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_start: true,
            stop_requested: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexingTaskRunner for RecordingRunner {
    fn start(&self) -> Result<(), IndexingError> {
        self.calls.lock().unwrap().push("start");
        if self.fail_start {
            return Err(IndexingError::AlreadyRunning);
        }
        Ok(())
    }

    fn request_stop(&self) {
        self.calls.lock().unwrap().push("request_stop");
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    async fn wait_stopped(&self) {
        // 阶段二必须在阶段一之后
        assert!(
            self.stop_requested.load(Ordering::SeqCst),
            "wait_stopped called before request_stop"
        );
        self.calls.lock().unwrap().push("wait_stopped");
    }
}

fn manager_with(runner: Arc<RecordingRunner>, enabled: bool) -> LifecycleManager {
    LifecycleManager::new(Arc::new(TenantIndexTracker::new()), runner, enabled)
}

#[test]
fn tenant_events_update_the_tracker() {
    let tracker = Arc::new(TenantIndexTracker::new());
    let manager = LifecycleManager::new(tracker.clone(), RecordingRunner::new(), true);
    let tenant = TenantId(11);

    manager.on_tenant_created(tenant);
    assert_eq!(tracker.is_loaded(tenant), Some(true));
    assert!(tracker.can_index(tenant));

    manager.on_tenant_terminated(tenant);
    assert_eq!(tracker.is_loaded(tenant), None);
}

#[test]
fn login_activation_is_tracked_as_non_deployment() {
    let tracker = Arc::new(TenantIndexTracker::new());
    let manager = LifecycleManager::new(tracker.clone(), RecordingRunner::new(), true);
    let tenant = TenantId(12);

    manager.load_tenant_index(tenant);
    assert_eq!(tracker.is_loaded(tenant), Some(false));

    // 部署事件升级激活原因，此后登录事件不再降级
    manager.on_tenant_created(tenant);
    manager.load_tenant_index(tenant);
    assert_eq!(tracker.is_loaded(tenant), Some(true));
}

#[test]
fn start_hook_respects_indexing_config() {
    let runner = RecordingRunner::new();
    manager_with(runner.clone(), true).on_start();
    assert_eq!(runner.calls(), vec!["start"]);

    let idle_runner = RecordingRunner::new();
    manager_with(idle_runner.clone(), false).on_start();
    assert!(idle_runner.calls().is_empty());
}

#[test]
fn failed_indexing_start_is_not_fatal() {
    let runner = RecordingRunner::failing();
    let manager = manager_with(runner.clone(), true);

    // 只记录日志，不panic也不传播
    manager.on_start();
    assert_eq!(runner.calls(), vec!["start"]);
}

#[tokio::test]
async fn stop_hook_runs_both_phases_in_order() {
    let runner = RecordingRunner::new();
    let manager = manager_with(runner.clone(), true);

    manager.on_start();
    manager.on_stop().await;

    assert_eq!(runner.calls(), vec!["start", "request_stop", "wait_stopped"]);
}
