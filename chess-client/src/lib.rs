//! Portfolio chess client
//!
//! Terminal client that plays a local board and keeps it synchronized with
//! a coordinator room over the polling REST API.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod sync;

pub use api::ChessApi;
pub use auth::AuthClient;
pub use config::ClientConfig;
pub use error::SyncError;
pub use session::{ClickOutcome, GameSession};
pub use sync::SyncClient;
