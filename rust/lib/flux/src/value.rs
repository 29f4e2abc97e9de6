use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// What a state path holds: any `Send + Sync` view type behind an `Arc`.
///
/// The store, subscribers and shells all hold the same allocation; a
/// handler that wants to edit a value takes an owned copy with
/// [`cloned`](Self::cloned) and writes it back.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
}

impl StateValue {
    /// Erase `value` into a fresh allocation.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Borrow the value as `T`, or `None` if it holds another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Owned copy of the value as `T`, for read-modify-write.
    pub fn cloned<T: Any + Clone>(&self) -> Option<T> {
        self.inner.downcast_ref::<T>().cloned()
    }

    /// Whether the path holds a `T`. Shells use this to pick a renderer.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Handles currently sharing this value. The store's own copy counts.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type_id", &(*self.inner).type_id())
            .finish()
    }
}

/// Identifies one subscription so it can be dropped again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
