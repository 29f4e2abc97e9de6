//! Server-state query cache with invalidation by key.
//!
//! A query is a named fetch whose result lives at a state path as a
//! [`QueryState<T>`]. Each query carries one [`CacheKey`]. After a mutation,
//! a handler calls [`QueryCache::invalidate`] with the keys it affects and
//! every registered query carrying that key refetches.
//!
//! ```ignore
//! cache.register(CacheKey::ListComment, "ListComment/f1", "feed/f1/comments",
//!     move || { let api = api.clone(); async move { api.list_comments("f1").await } },
//! ).await;
//!
//! // after posting a comment:
//! cache.invalidate(CacheKey::ListComment).await;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, warn};

use crate::router::BoxFuture;
use crate::store::StateStore;

/// Invalidation keys shared by every component that reads server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CacheKey {
    UserInfo,
    ListComment,
    SearchUserInfo,
    UserProfile,
    GroupInfo,
}

impl CacheKey {
    pub const ALL: [CacheKey; 5] = [
        CacheKey::UserInfo,
        CacheKey::ListComment,
        CacheKey::SearchUserInfo,
        CacheKey::UserProfile,
        CacheKey::GroupInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::UserInfo => "UserInfo",
            CacheKey::ListComment => "ListComment",
            CacheKey::SearchUserInfo => "SearchUserInfo",
            CacheKey::UserProfile => "UserProfile",
            CacheKey::GroupInfo => "GroupInfo",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result slot of a query, stored at the query's state path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState<T> {
    /// Last successful result. Kept while a refetch is in flight.
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    /// No data and nothing in flight, e.g. after the query is dropped.
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

type Runner = Arc<dyn Fn(Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Which run of each query may publish its result.
///
/// Every run takes a fresh ticket. A run whose ticket is no longer the
/// latest for its id (re-registered, refetched again, or removed) drops
/// its result instead of overwriting newer state.
#[derive(Default)]
struct Tickets {
    next: AtomicU64,
    latest: RwLock<HashMap<String, u64>>,
}

impl Tickets {
    fn issue(&self, id: &str) -> u64 {
        let ticket = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.write().unwrap().insert(id.to_string(), ticket);
        ticket
    }

    fn is_current(&self, id: &str, ticket: u64) -> bool {
        self.latest.read().unwrap().get(id) == Some(&ticket)
    }

    fn revoke(&self, id: &str) {
        self.latest.write().unwrap().remove(id);
    }
}

struct QueryEntry {
    key: CacheKey,
    path: String,
    run: Runner,
}

/// Registry of active queries.
pub struct QueryCache {
    store: Arc<StateStore>,
    queries: RwLock<BTreeMap<String, QueryEntry>>,
    invalidations: RwLock<HashMap<CacheKey, u64>>,
    tickets: Arc<Tickets>,
}

impl QueryCache {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            queries: RwLock::new(BTreeMap::new()),
            invalidations: RwLock::new(HashMap::new()),
            tickets: Arc::new(Tickets::default()),
        }
    }

    /// Register (or replace) the query `id` and run it once.
    ///
    /// The result is written to `path` as `QueryState<T>`. Re-registering
    /// the same id swaps the fetcher, e.g. when a search term changes; a
    /// fetch still in flight for the old registration is then discarded.
    pub async fn register<T, E, F, Fut>(
        &self,
        key: CacheKey,
        id: impl Into<String>,
        path: impl Into<String>,
        fetch: F,
    ) where
        T: Clone + Send + Sync + 'static,
        E: fmt::Display + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let id = id.into();
        let path = path.into();
        let run = make_runner(id.clone(), path.clone(), Arc::clone(&self.tickets), fetch);

        self.queries.write().unwrap().insert(
            id.clone(),
            QueryEntry {
                key,
                path,
                run: Arc::clone(&run),
            },
        );
        debug!(%key, id = %id, "query registered");
        run(Arc::clone(&self.store)).await;
    }

    /// Refetch every query carrying `key`. Returns how many ran.
    pub async fn invalidate(&self, key: CacheKey) -> usize {
        *self.invalidations.write().unwrap().entry(key).or_insert(0) += 1;

        let runners: Vec<Runner> = self
            .queries
            .read()
            .unwrap()
            .values()
            .filter(|q| q.key == key)
            .map(|q| Arc::clone(&q.run))
            .collect();

        debug!(%key, queries = runners.len(), "invalidate");
        for run in &runners {
            run(Arc::clone(&self.store)).await;
        }
        runners.len()
    }

    /// Refetch a single query by id. Returns `false` if it is unknown.
    pub async fn refetch(&self, id: &str) -> bool {
        let run = self
            .queries
            .read()
            .unwrap()
            .get(id)
            .map(|q| Arc::clone(&q.run));
        match run {
            Some(run) => {
                run(Arc::clone(&self.store)).await;
                true
            }
            None => false,
        }
    }

    /// Drop a query. A fetch still in flight for it is discarded; its last
    /// state stays in the store until removed there.
    pub fn remove(&self, id: &str) -> bool {
        self.tickets.revoke(id);
        self.queries.write().unwrap().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.queries.read().unwrap().contains_key(id)
    }

    /// Ids of the queries carrying `key`, in id order.
    pub fn ids_for(&self, key: CacheKey) -> Vec<String> {
        self.queries
            .read()
            .unwrap()
            .iter()
            .filter(|(_, q)| q.key == key)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// State path a query writes to.
    pub fn path_of(&self, id: &str) -> Option<String> {
        self.queries.read().unwrap().get(id).map(|q| q.path.clone())
    }

    /// How many times `key` has been invalidated.
    pub fn invalidation_count(&self, key: CacheKey) -> u64 {
        self.invalidations
            .read()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(0)
    }
}

fn make_runner<T, E, F, Fut>(id: String, path: String, tickets: Arc<Tickets>, fetch: F) -> Runner
where
    T: Clone + Send + Sync + 'static,
    E: fmt::Display + Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    Arc::new(move |store: Arc<StateStore>| -> BoxFuture {
        let ticket = tickets.issue(&id);
        let previous = store
            .get_as::<QueryState<T>>(&path)
            .and_then(|s| s.data);
        store.set(
            &path,
            QueryState {
                data: previous.clone(),
                loading: true,
                error: None,
            },
        );

        let fut = fetch();
        let id = id.clone();
        let path = path.clone();
        let tickets = Arc::clone(&tickets);
        Box::pin(async move {
            let outcome = fut.await;
            if !tickets.is_current(&id, ticket) {
                debug!(id = %id, ticket, "stale query result dropped");
                return;
            }
            let next = match outcome {
                Ok(data) => QueryState {
                    data: Some(data),
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    warn!(id = %id, error = %e, "query fetch failed");
                    QueryState {
                        data: previous,
                        loading: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            store.set(&path, next);
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn counting_fetch(
        counter: Arc<AtomicU64>,
    ) -> impl Fn() -> std::future::Ready<Result<u64, String>> + Send + Sync + 'static {
        move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(n))
        }
    }

    #[tokio::test]
    async fn register_fetches_once() {
        let store = Arc::new(StateStore::new());
        let cache = QueryCache::new(store.clone());
        let calls = Arc::new(AtomicU64::new(0));

        cache
            .register(
                CacheKey::ListComment,
                "ListComment/f1",
                "feed/f1/comments",
                counting_fetch(calls.clone()),
            )
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let state = store.get_as::<QueryState<u64>>("feed/f1/comments").unwrap();
        assert_eq!(state.data, Some(1));
        assert!(!state.loading);
        assert!(cache.contains("ListComment/f1"));
        assert_eq!(cache.path_of("ListComment/f1").as_deref(), Some("feed/f1/comments"));
    }

    #[tokio::test]
    async fn invalidate_refetches_only_matching_key() {
        let store = Arc::new(StateStore::new());
        let cache = QueryCache::new(store.clone());
        let comments = Arc::new(AtomicU64::new(0));
        let profile = Arc::new(AtomicU64::new(0));

        cache
            .register(CacheKey::ListComment, "c", "c", counting_fetch(comments.clone()))
            .await;
        cache
            .register(CacheKey::UserProfile, "p", "p", counting_fetch(profile.clone()))
            .await;

        let ran = cache.invalidate(CacheKey::ListComment).await;
        assert_eq!(ran, 1);
        assert_eq!(comments.load(Ordering::SeqCst), 2);
        assert_eq!(profile.load(Ordering::SeqCst), 1);
        assert_eq!(store.get_as::<QueryState<u64>>("c").unwrap().data, Some(2));

        assert_eq!(cache.invalidation_count(CacheKey::ListComment), 1);
        assert_eq!(cache.invalidation_count(CacheKey::UserProfile), 0);
    }

    #[tokio::test]
    async fn invalidate_without_queries_is_counted() {
        let cache = QueryCache::new(Arc::new(StateStore::new()));
        assert_eq!(cache.invalidate(CacheKey::GroupInfo).await, 0);
        assert_eq!(cache.invalidation_count(CacheKey::GroupInfo), 1);
    }

    #[tokio::test]
    async fn removed_query_is_not_refetched() {
        let store = Arc::new(StateStore::new());
        let cache = QueryCache::new(store.clone());
        let calls = Arc::new(AtomicU64::new(0));

        cache
            .register(CacheKey::ListComment, "c", "c", counting_fetch(calls.clone()))
            .await;
        assert!(cache.remove("c"));
        assert!(!cache.remove("c"));

        cache.invalidate(CacheKey::ListComment).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!cache.refetch("c").await);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_data() {
        let store = Arc::new(StateStore::new());
        let cache = QueryCache::new(store.clone());
        let fail = Arc::new(AtomicU64::new(0));

        let f = fail.clone();
        cache
            .register(CacheKey::UserInfo, "UserInfo", "user/info", move || {
                let failing = f.load(Ordering::SeqCst) == 1;
                async move {
                    if failing {
                        Err("HTTP 500".to_string())
                    } else {
                        Ok("ann".to_string())
                    }
                }
            })
            .await;

        fail.store(1, Ordering::SeqCst);
        assert!(cache.refetch("UserInfo").await);

        let state = store.get_as::<QueryState<String>>("user/info").unwrap();
        assert_eq!(state.data.as_deref(), Some("ann"));
        assert_eq!(state.error.as_deref(), Some("HTTP 500"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn loading_state_is_published_before_result() {
        let store = Arc::new(StateStore::new());
        let cache = QueryCache::new(store.clone());
        let seen = Arc::new(RwLock::new(Vec::<bool>::new()));
        let s = seen.clone();
        store.subscribe("header/search/result", move |_, v| {
            let state = v.cloned::<QueryState<u64>>().unwrap();
            s.write().unwrap().push(state.loading);
        });

        cache
            .register(
                CacheKey::SearchUserInfo,
                "SearchUserInfo",
                "header/search/result",
                counting_fetch(Arc::new(AtomicU64::new(0))),
            )
            .await;

        assert_eq!(*seen.read().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn re_register_replaces_fetcher() {
        let store = Arc::new(StateStore::new());
        let cache = QueryCache::new(store.clone());

        for term in ["an", "ann"] {
            let term = term.to_string();
            cache
                .register(
                    CacheKey::SearchUserInfo,
                    "SearchUserInfo",
                    "header/search/result",
                    move || std::future::ready(Ok::<_, String>(term.clone())),
                )
                .await;
        }

        assert_eq!(cache.ids_for(CacheKey::SearchUserInfo), vec!["SearchUserInfo"]);
        cache.invalidate(CacheKey::SearchUserInfo).await;
        let state = store
            .get_as::<QueryState<String>>("header/search/result")
            .unwrap();
        assert_eq!(state.data.as_deref(), Some("ann"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_replaced_run_does_not_overwrite() {
        let store = Arc::new(StateStore::new());
        let cache = Arc::new(QueryCache::new(store.clone()));

        let slow = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .register(CacheKey::SearchUserInfo, "SearchUserInfo", "search", || async {
                        tokio::time::sleep(Duration::from_millis(1000)).await;
                        Ok::<_, String>("lee".to_string())
                    })
                    .await;
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        cache
            .register(CacheKey::SearchUserInfo, "SearchUserInfo", "search", || {
                std::future::ready(Ok::<_, String>("leo".to_string()))
            })
            .await;
        slow.await.unwrap();

        let state = store.get_as::<QueryState<String>>("search").unwrap();
        assert_eq!(state.data.as_deref(), Some("leo"));
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn removed_query_result_is_discarded() {
        let store = Arc::new(StateStore::new());
        let cache = Arc::new(QueryCache::new(store.clone()));

        let slow = {
            let cache = cache.clone();
            tokio::spawn(async move {
                cache
                    .register(CacheKey::ListComment, "ListComment/f1", "feed/f1/comments", || {
                        async {
                            tokio::time::sleep(Duration::from_millis(1000)).await;
                            Ok::<_, String>(3u64)
                        }
                    })
                    .await;
            })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.get_as::<QueryState<u64>>("feed/f1/comments").unwrap().loading);

        cache.remove("ListComment/f1");
        store.remove("feed/f1/comments");
        slow.await.unwrap();

        assert!(!store.contains("feed/f1/comments"));
    }

    #[test]
    fn idle_state_is_empty() {
        let state = QueryState::<u64>::idle();
        assert_eq!(state.data, None);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn key_names() {
        let names: Vec<&str> = CacheKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["UserInfo", "ListComment", "SearchUserInfo", "UserProfile", "GroupInfo"]
        );
        assert_eq!(CacheKey::ListComment.to_string(), "ListComment");
    }
}
