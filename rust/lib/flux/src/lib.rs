//! Flux: headless client state engine.
//!
//! Rust owns all view state and interaction logic; a platform shell
//! (web, desktop, mobile) only renders what it reads and emits requests.
//!
//! # Primitives
//!
//! - `get(path)`: read state at a path, Arc zero-copy
//! - `emit(path, payload)`: send a request to the handler(s) for a path
//! - `subscribe(pattern)`: observe state changes
//! - `queries()`: server-state cache with invalidation by [`CacheKey`]
//!
//! # Path Addressing
//!
//! State and requests share one `/`-separated namespace:
//! - Global: `app/route`, `auth/state`, `toast/list`
//! - Per item: `feed/{feed_id}/card`, `feed/{feed_id}/comments`
//!
//! Patterns accept `+` (one level) and a trailing `#` (any remaining levels).

pub mod app;
pub mod pattern;
pub mod query;
pub mod router;
pub mod store;
pub mod value;

pub use app::Flux;
pub use pattern::Pattern;
pub use query::{CacheKey, QueryCache, QueryState};
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{StateValue, SubscriptionId};
