use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::pattern::Pattern;
use crate::value::{StateValue, SubscriptionId};

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-addressed view state with pattern subscriptions.
///
/// Every `set` stores the value first and then notifies matching
/// subscribers synchronously, so a subscriber always reads the new value.
/// No lock is held while subscribers run; they may `set` other paths.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    pattern: Pattern,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a typed value at `path` and notify subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    /// [`set`](Self::set) for a value that is already erased, e.g. one
    /// read back from another path.
    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap()
            .insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    /// Shared handle to the value at `path`. No copy is made.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values.read().unwrap().get(path).cloned()
    }

    /// Read the value at `path` as an owned `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Read-modify-write the `T` at `path`.
    ///
    /// The write lock is held across `f`, so concurrent updates of the same
    /// path never lose each other's edits. `f` must not touch the store.
    /// Subscribers run after the lock is released.
    ///
    /// Returns `false` (and leaves the store untouched) when nothing of
    /// type `T` lives there.
    pub fn update<T, F>(&self, path: &str, f: F) -> bool
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce(&mut T),
    {
        let value = {
            let mut values = self.values.write().unwrap();
            let Some(mut current) = values.get(path).and_then(|v| v.cloned::<T>()) else {
                return false;
            };
            f(&mut current);
            let value = StateValue::new(current);
            values.insert(path.to_string(), value.clone());
            value
        };
        self.notify(path, &value);
        true
    }

    /// Like [`update`](Self::update), but starts from `T::default()` when
    /// the path is unset or holds another type. Returns the stored value.
    pub fn update_or_default<T, F>(&self, path: &str, f: F) -> T
    where
        T: Any + Clone + Default + Send + Sync,
        F: FnOnce(&mut T),
    {
        let (updated, value) = {
            let mut values = self.values.write().unwrap();
            let mut current = values
                .get(path)
                .and_then(|v| v.cloned::<T>())
                .unwrap_or_default();
            f(&mut current);
            let value = StateValue::new(current.clone());
            values.insert(path.to_string(), value.clone());
            (current, value)
        };
        self.notify(path, &value);
        updated
    }

    /// Remove the value at `path`. Subscribers are not notified; publish a
    /// closing value with `set` first when observers need to see it.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values.write().unwrap().remove(path)
    }

    /// Entries strictly under `{prefix}/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let scan_prefix = format!("{}/", prefix);
        self.values
            .read()
            .unwrap()
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    /// Number of populated paths.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, ordered by path.
    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.values
            .read()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Subscribe to changes of every path matching `pattern`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().unwrap().push(Subscriber {
            id,
            pattern: Pattern::parse(pattern),
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.subscribers
            .write()
            .unwrap()
            .retain(|s| !(s.id == id && s.pattern.as_str() == pattern));
    }

    fn notify(&self, path: &str, value: &StateValue) {
        let matched: Vec<Subscriber> = self
            .subscribers
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.pattern.matches(path))
            .cloned()
            .collect();
        for subscriber in matched {
            (subscriber.handler)(path, value);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
