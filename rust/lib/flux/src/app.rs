use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::query::QueryCache;
use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// The engine a shell talks to.
///
/// A shell never calls the API itself. It emits requests at paths such as
/// `feed/like`, reads view state such as `feed/card/f1`, and subscribes to
/// the paths it renders. Fetched server data lives in the [`QueryCache`],
/// which writes into the same store.
///
/// # Examples
///
/// ```ignore
/// let flux = Flux::new();
///
/// flux.on("feed/photo/open", |_, payload, store| async move {
///     let req = payload.downcast_ref::<OpenPhotoReq>().unwrap();
///     store.set("feed/photo", req.url.clone());
/// });
///
/// flux.subscribe("feed/#", |path, _| println!("{} changed", path));
/// flux.emit("feed/photo/open", OpenPhotoReq { url }).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
    queries: Arc<QueryCache>,
}

impl Flux {
    /// Empty store, no handlers, no queries.
    pub fn new() -> Self {
        let store = Arc::new(StateStore::new());
        let queries = Arc::new(QueryCache::new(Arc::clone(&store)));
        Self {
            store,
            router: Router::new(),
            queries,
        }
    }

    // ====================================================================
    // State: read
    // ====================================================================

    /// The value at `path`, shared with the store.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    /// Read state at `path` as an owned `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    /// Everything below `prefix`, e.g. all `feed/card` entries.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.store.snapshot()
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Emit a request and wait for every matching handler to finish.
    ///
    /// Unmatched paths are a silent no-op.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    /// Emit with a pre-built payload, e.g. one decoded from JSON by a
    /// platform bridge.
    pub async fn emit_arc(&self, path: &str, payload: Payload) {
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await;
    }

    /// Register an async request handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Whether emitting at `path` would reach any handler.
    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Subscribe to state changes. Handlers run synchronously inside `set`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }

    // ====================================================================
    // Advanced
    // ====================================================================

    /// Direct store access for code that writes state outside a handler.
    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// The server-state cache bound to this instance's store.
    pub fn queries(&self) -> &Arc<QueryCache> {
        &self.queries
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
