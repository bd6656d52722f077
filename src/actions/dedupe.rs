use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

struct InFlight<V> {
    started: Instant,
    future: Shared<BoxFuture<'static, V>>,
}

/// Coalesces requests for the same key.
///
/// The first caller for a key starts the fetch; anyone asking for that key
/// within `window` of the start awaits the same future and gets a clone of
/// its output.
pub struct Deduplicator<V: Clone> {
    window: Duration,
    inflight: Mutex<HashMap<String, InFlight<V>>>,
}

impl<V> Deduplicator<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn run<F, Fut>(&self, key: &str, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let future = {
            let mut inflight = self.inflight.lock().await;
            let now = Instant::now();
            inflight.retain(|_, entry| now.duration_since(entry.started) < self.window);

            match inflight.get(key) {
                Some(entry) => {
                    debug!("Joining in-flight request for {}", key);
                    entry.future.clone()
                }
                None => {
                    let future = fetch().boxed().shared();
                    inflight.insert(
                        key.to_string(),
                        InFlight {
                            started: now,
                            future: future.clone(),
                        },
                    );
                    future
                }
            }
        };

        future.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted(counter: &Arc<AtomicUsize>) -> impl Future<Output = usize> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_key_is_coalesced() {
        let dedupe = Deduplicator::new(Duration::from_secs(5));
        let counter = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            dedupe.run("matches:current", || counted(&counter)),
            dedupe.run("matches:current", || counted(&counter)),
        );

        assert_eq!(a, 1);
        assert_eq!(b, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_expiry_and_distinct_keys() {
        let dedupe = Deduplicator::new(Duration::from_secs(5));
        let counter = Arc::new(AtomicUsize::new(0));

        dedupe.run("match:1", || counted(&counter)).await;
        dedupe.run("match:1", || counted(&counter)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        dedupe.run("match:2", || counted(&counter)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(6)).await;
        dedupe.run("match:1", || counted(&counter)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
