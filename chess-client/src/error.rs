//! Client-side error taxonomy
//!
//! Every variant is recoverable: the caller surfaces the message as a status
//! line and the local board stays playable.

use thiserror::Error;

/// Errors from talking to the auth service or the room coordinator
#[derive(Debug, Error)]
pub enum SyncError {
    /// No usable token, or the auth service rejected it
    #[error("Login first from main app.")]
    AuthRequired,
    /// The room id is unknown to the coordinator
    #[error("Room not found.")]
    NotFound,
    /// Both seats are already taken
    #[error("Room is full.")]
    RoomFull,
    /// The pushed version no longer matches the room
    #[error("Move rejected, reloading the shared board.")]
    VersionConflict,
    /// Transport-level failure
    #[error("Cannot reach chess server.")]
    Unavailable,
    /// Any other server rejection
    #[error("Server error {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        tracing::debug!("Transport failure: {}", e);
        SyncError::Unavailable
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
