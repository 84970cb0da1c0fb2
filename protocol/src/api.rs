//! Coordination API wire types
//!
//! JSON bodies for the room endpoints. All field names are camelCase on the
//! wire; error responses carry a single `error` string.

use serde::{Deserialize, Serialize};

use crate::board::GameState;
use crate::piece::Color;

/// Body of POST /api/chess/create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    /// The creator's current local state becomes the room's initial state
    pub state: GameState,
}

/// Body of POST /api/chess/join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub room_id: String,
}

/// Response to create and join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: String,
    /// Color assigned to the caller
    pub color: Color,
    pub version: u64,
    pub state: GameState,
}

/// Body of POST /api/chess/move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub room_id: String,
    /// Color claiming the move, recorded in the server log
    pub moved_by: Color,
    /// Full post-move state; the coordinator stores it verbatim
    pub state: GameState,
    /// Version the client last saw; a mismatch is rejected
    pub version: u64,
}

/// Response to an accepted move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub version: u64,
}

/// Body of POST /api/chess/reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub room_id: String,
}

/// Response to GET /api/chess/state and POST /api/chess/reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResponse {
    pub state: GameState,
    pub version: u64,
}

/// Error body for failed requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
