use std::future::Future;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

type Fetch<T> = Box<dyn Fn() -> BoxFuture<'static, T> + Send + Sync>;

/// Worker that re-runs a read on a fixed interval while its consumer is visible
pub struct PollingWorker<T> {
    name: String,
    poll_interval: Duration,
    fetch: Fetch<T>,
}

impl<T> PollingWorker<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(name: &str, poll_interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            poll_interval,
            fetch: Box::new(move || fetch().boxed()),
        }
    }

    /// Start polling. The first refresh happens immediately.
    pub fn spawn(self) -> PollSubscription<T> {
        let (updates_tx, updates_rx) = watch::channel(None);
        let (visible_tx, visible_rx) = watch::channel(true);

        let handle = tokio::spawn(async move {
            self.run(updates_tx, visible_rx).await;
        });

        PollSubscription {
            updates: updates_rx,
            visible: visible_tx,
            handle,
        }
    }

    async fn run(self, updates: watch::Sender<Option<T>>, mut visible: watch::Receiver<bool>) {
        info!("{} poller started (interval: {:?})", self.name, self.poll_interval);

        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = updates.closed() => break,
                _ = interval.tick() => {
                    if !*visible.borrow() {
                        debug!("{} poller hidden, skipping tick", self.name);
                        continue;
                    }
                }
                changed = visible.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if !*visible.borrow_and_update() {
                        debug!("{} poller paused", self.name);
                        continue;
                    }
                    debug!("{} poller resumed", self.name);
                    interval.reset();
                }
            }

            let value = (self.fetch)().await;

            // An in-flight fetch is allowed to finish; its result is dropped
            if updates.is_closed() {
                debug!("{} poller stopped, discarding result", self.name);
                break;
            }
            updates.send_replace(Some(value));
        }

        info!("{} poller stopped", self.name);
    }
}

/// Consumer side of a running `PollingWorker`. Dropping it stops the worker.
pub struct PollSubscription<T> {
    updates: watch::Receiver<Option<T>>,
    visible: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl<T: Clone> PollSubscription<T> {
    /// Most recent result, if any refresh has completed
    pub fn latest(&self) -> Option<T> {
        self.updates.borrow().clone()
    }

    /// Wait for the next refresh. `None` once the worker has exited.
    pub async fn changed(&mut self) -> Option<T> {
        self.updates.changed().await.ok()?;
        self.updates.borrow_and_update().clone()
    }

    /// Pause while hidden; becoming visible triggers an immediate refresh
    pub fn set_visible(&self, visible: bool) {
        self.visible.send_if_modified(|current| {
            let modified = *current != visible;
            *current = visible;
            modified
        });
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    /// Stop the worker and wait for it to exit
    pub async fn stop(self) {
        let PollSubscription {
            updates,
            visible,
            handle,
        } = self;
        drop(updates);
        drop(visible);
        let _ = handle.await;
    }
}
