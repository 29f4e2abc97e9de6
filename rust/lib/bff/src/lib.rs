//! Clover BFF: request handlers and view state for the Clover client.
//!
//! Structure:
//! - `state/`: state types a platform shell reads (`feed/{id}/card`, `header/state`, ...)
//! - `request/`: request types a platform shell emits (`feed/like`, `header/search/input`, ...)
//! - `handlers/`: handler implementations + Flux wiring
//!
//! ```ignore
//! let flux = Flux::new();
//! let bff = CloverBff::new(&flux, api, session, clipboard, ClientConfig::default());
//! bff.register(&flux);
//!
//! flux.emit(LikeFeedReq::PATH, LikeFeedReq { feed_id: "f1".into() }).await;
//! let card = flux.get_as::<FeedCardState>("feed/f1/card");
//! ```

pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod error;
pub mod handlers;
pub mod request;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use config::ClientConfig;
pub use error::BffError;
pub use handlers::CloverBff;
pub use session::{FileStorage, MemoryStorage, SessionData, SessionStorage, SessionToken};
