use crate::domain::search::indexing::{IndexMaintenance, IndexingError, IndexingTaskRunner};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// 后台索引工作器
///
/// 按固定周期驱动索引维护钩子。停止是协作式的：
/// 收到停止信号后结束当前循环并通过完成信号确认。
pub struct IndexingWorker {
    maintenance: Arc<dyn IndexMaintenance>,
    interval: Duration,
    started: AtomicBool,
    stop_tx: watch::Sender<bool>,
    done_tx: watch::Sender<bool>,
    done_rx: watch::Receiver<bool>,
}

impl IndexingWorker {
    pub fn new(maintenance: Arc<dyn IndexMaintenance>, interval: Duration) -> Self {
        let (stop_tx, _) = watch::channel(false);
        let (done_tx, done_rx) = watch::channel(false);
        Self {
            maintenance,
            interval,
            started: AtomicBool::new(false),
            stop_tx,
            done_tx,
            done_rx,
        }
    }
}

#[async_trait]
impl IndexingTaskRunner for IndexingWorker {
    fn start(&self) -> Result<(), IndexingError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(IndexingError::AlreadyRunning);
        }

        let maintenance = self.maintenance.clone();
        let period = self.interval;
        let mut stop_rx = self.stop_tx.subscribe();
        let done_tx = self.done_tx.clone();

        tokio::spawn(async move {
            info!("Indexing worker started (period: {:?})", period);
            let mut ticker = tokio::time::interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match maintenance.run_maintenance().await {
                            Ok(()) => debug!("Index maintenance tick completed"),
                            Err(e) => error!("Index maintenance failed: {}", e),
                        }
                    }
                    result = async { stop_rx.wait_for(|stop| *stop).await.map(|_| ()) } => {
                        let _ = result;
                        break;
                    }
                }
            }

            info!("Indexing worker stopped");
            let _ = done_tx.send(true);
        });

        Ok(())
    }

    fn request_stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    async fn wait_stopped(&self) {
        if !self.started.load(Ordering::SeqCst) {
            return;
        }
        let mut done_rx = self.done_rx.clone();
        let _ = done_rx.wait_for(|done| *done).await;
    }
}
