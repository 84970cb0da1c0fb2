//! Chess room coordinator
//!
//! Provides:
//! - Room directory and seat assignment
//! - Versioned shared game state
//! - HTTP API for the sync client

pub mod config;
pub mod room;
pub mod server;

pub use config::ServerConfig;
pub use room::{Room, RoomDirectory, RoomError};
pub use server::{RoomServer, ShutdownHandle};
