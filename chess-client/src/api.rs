//! Room coordinator REST client

use std::time::Duration;

use anyhow::Context;
use protocol::{
    Color, CreateRoomRequest, ErrorResponse, GameState, JoinRoomRequest, MoveRequest,
    MoveResponse, ResetRequest, RoomResponse, StateResponse,
};
use tracing::debug;

use crate::error::{Result, SyncError};

/// Request timeout for coordinator calls
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the chess coordination API
pub struct ChessApi {
    base_url: String,
    client: reqwest::Client,
}

impl ChessApi {
    /// Create a client for the given coordinator base URL
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Create a room seeded with the given state
    pub async fn create_room(&self, state: GameState) -> Result<RoomResponse> {
        let url = format!("{}/api/chess/create", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CreateRoomRequest { state })
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Join an existing room
    pub async fn join_room(&self, room_id: &str) -> Result<RoomResponse> {
        let url = format!("{}/api/chess/join", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&JoinRoomRequest {
                room_id: room_id.to_string(),
            })
            .send()
            .await?;
        // A join conflict means both seats are taken
        Self::decode(response).await.map_err(|err| match err {
            SyncError::Api { status: 409, .. } => SyncError::RoomFull,
            other => other,
        })
    }

    /// Push a new state at the version the client last saw
    pub async fn submit_move(
        &self,
        room_id: &str,
        moved_by: Color,
        state: GameState,
        version: u64,
    ) -> Result<MoveResponse> {
        let url = format!("{}/api/chess/move", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&MoveRequest {
                room_id: room_id.to_string(),
                moved_by,
                state,
                version,
            })
            .send()
            .await?;
        // A move conflict means the room advanced past the pushed version
        Self::decode(response).await.map_err(|err| match err {
            SyncError::Api { status: 409, .. } => SyncError::VersionConflict,
            other => other,
        })
    }

    /// Fetch the authoritative state
    pub async fn get_state(&self, room_id: &str) -> Result<StateResponse> {
        let url = format!("{}/api/chess/state", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("roomId", room_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Restore the room to the initial layout
    pub async fn reset(&self, room_id: &str) -> Result<StateResponse> {
        let url = format!("{}/api/chess/reset", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ResetRequest {
                room_id: room_id.to_string(),
            })
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Map a response to its payload or the error taxonomy
    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        debug!("Coordinator rejected request: {} {}", status, message);

        Err(match status.as_u16() {
            404 => SyncError::NotFound,
            code => SyncError::Api {
                status: code,
                message,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chess_server::{server, RoomDirectory, ServerConfig};
    use protocol::Position;

    async fn start_coordinator() -> (chess_server::RoomServer, ChessApi) {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            ..Default::default()
        };
        let rooms = Arc::new(RoomDirectory::new());
        let coordinator = server::start(config, rooms).unwrap();
        let api = ChessApi::new(format!("http://{}", coordinator.addr)).unwrap();
        (coordinator, api)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_error_variants_per_endpoint() {
        let (coordinator, api) = start_coordinator().await;

        let unknown = api.join_room("ZZZZZZ").await;
        assert!(matches!(unknown, Err(SyncError::NotFound)));

        let room = api.create_room(GameState::initial()).await.unwrap();
        assert_eq!(room.color, Color::White);
        api.join_room(&room.room_id).await.unwrap();

        let full = api.join_room(&room.room_id).await;
        assert!(matches!(full, Err(SyncError::RoomFull)));

        let mut state = room.state.clone();
        state
            .apply_move(
                Position::from_algebraic("e2").unwrap(),
                Position::from_algebraic("e4").unwrap(),
            )
            .unwrap();
        let accepted = api
            .submit_move(&room.room_id, Color::White, state.clone(), 0)
            .await
            .unwrap();
        assert_eq!(accepted.version, 1);

        let stale = api.submit_move(&room.room_id, Color::Black, state, 0).await;
        assert!(matches!(stale, Err(SyncError::VersionConflict)));

        coordinator.shutdown();
        coordinator.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_coordinator_is_unavailable() {
        // Port 1 is never bound in the test environment
        let api = ChessApi::new("http://127.0.0.1:1").unwrap();
        let result = api.get_state("ABCDEF").await;
        assert!(matches!(result, Err(SyncError::Unavailable)));
    }
}
