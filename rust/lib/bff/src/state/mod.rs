//! State definitions.
//!
//! Each file defines the state a platform shell reads. Singletons carry a
//! `PATH` const; per-item state exposes a path helper instead.

pub mod action;
pub mod app;
pub mod auth;
pub mod feed;
pub mod header;
pub mod toast;
pub mod user;

pub use action::ActionState;
pub use app::AppRoute;
pub use auth::{AuthPhase, AuthState};
pub use feed::{CommentModalState, FeedCardState, ImageLayout};
pub use header::{GroupRow, HeaderState, SearchMode, SearchRows};
pub use toast::{Toast, ToastKind, ToastList};
pub use user::ProfileMenu;
