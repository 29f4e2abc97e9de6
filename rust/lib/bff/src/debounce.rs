use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Trailing-edge debounce.
///
/// Each [`call`](Self::call) bumps a generation counter and spawns a timer.
/// When a timer fires it runs its action only if no newer call (or
/// [`cancel`](Self::cancel)) happened in between.
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` after the delay. Must be called inside a tokio runtime.
    pub fn call<F, Fut>(&self, action: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                action().await;
            } else {
                trace!(generation, "debounce superseded");
            }
        })
    }

    /// Drop any pending action.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn only_last_call_fires() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let fired = Arc::new(Mutex::new(Vec::new()));

        for term in ["r", "ru", "rus"] {
            let fired = Arc::clone(&fired);
            debouncer.call(move || async move { fired.lock().unwrap().push(term) });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["rus"]);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let count = Arc::new(AtomicU64::new(0));

        for _ in 0..3 {
            let count = Arc::clone(&count);
            debouncer
                .call(move || async move {
                    count.fetch_add(1, Ordering::SeqCst);
                })
                .await
                .unwrap();
        }
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let count = Arc::new(AtomicU64::new(0));

        let c = Arc::clone(&count);
        let handle = debouncer.call(move || async move {
            c.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        handle.await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
