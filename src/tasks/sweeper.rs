//! Sweeper Task
//!
//! Background task that periodically erases tombstoned and expired entries.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Shared;

// == Sweeper ==
/// Handle to a running sweeper task.
///
/// Dropping the handle closes the shutdown channel, which also ends the task.
#[derive(Debug)]
pub(crate) struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Signals the task to stop and waits for it to exit.
    pub(crate) async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                std::panic::resume_unwind(e.into_panic());
            }
        }
        info!("Sweeper stopped");
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns the sweeper on `runtime`.
///
/// Every `interval` the task runs one sweep pass. The stop signal is checked
/// while sleeping, so shutdown never waits out a full interval. An empty store
/// or a pass with nothing to erase does not end the loop.
pub(crate) fn spawn_sweeper<K, V>(
    shared: Arc<Shared<K, V>>,
    interval: Duration,
    runtime: &Handle,
) -> Sweeper
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    let (shutdown, mut stop_rx) = watch::channel(false);

    let handle = runtime.spawn(async move {
        info!("Starting sweeper with interval of {:?}", interval);

        loop {
            tokio::select! {
                biased;
                changed = stop_rx.changed() => {
                    // Err means every sender is gone: the engine was dropped
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                    continue;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = shared.sweep();
            if removed > 0 {
                info!("Sweep: removed {} dead entries", removed);
            } else {
                debug!("Sweep: no dead entries found");
            }
        }
    });

    Sweeper { shutdown, handle }
}
