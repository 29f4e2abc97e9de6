use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::pattern::Pattern;
use crate::store::StateStore;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Type-erased handler stored in the router. Takes owned arguments so the
/// returned future can be `'static`.
type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Routes emitted requests to the handlers registered for them.
///
/// Handlers for one path run sequentially in registration order, and
/// `dispatch` returns only after the last one finishes.
pub struct Router {
    routes: RwLock<Vec<(Pattern, ErasedHandler)>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
        }
    }

    /// Add `handler` for every path `pattern` matches.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.routes
            .write()
            .unwrap()
            .push((Pattern::parse(pattern), handler));
    }

    /// Dispatch a request to all matching handlers.
    ///
    /// Returns the number of handlers that ran; zero is not an error.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) -> usize {
        let handlers: Vec<ErasedHandler> = self
            .routes
            .read()
            .unwrap()
            .iter()
            .filter(|(pattern, _)| pattern.matches(path))
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        if handlers.is_empty() {
            tracing::debug!(path, "no handler registered");
        }
        for handler in &handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
        handlers.len()
    }

    /// True if a handler was registered with exactly this pattern.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.routes
            .read()
            .unwrap()
            .iter()
            .any(|(p, _)| p.as_str() == pattern)
    }

    /// True if any handler would run for `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.routes
            .read()
            .unwrap()
            .iter()
            .any(|(p, _)| p.matches(path))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
