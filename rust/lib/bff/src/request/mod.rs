//! Request definitions.
//!
//! Each request carries the path it is emitted on as `PATH`. Requests
//! deserialize from camelCase JSON so a platform bridge can decode them.

pub mod app;
pub mod auth;
pub mod feed;
pub mod header;

pub use app::*;
pub use auth::*;
pub use feed::*;
pub use header::*;
