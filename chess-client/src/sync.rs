//! Room synchronization
//!
//! Moves are applied locally first, then pushed with the last seen version.
//! A rejected push discards the speculative state by pulling the
//! authoritative copy. Polling replaces the local state only when the room
//! version has changed, so repeated polls at the same version are no-ops.

use protocol::{Color, Position};
use tracing::{debug, info, warn};

use crate::api::ChessApi;
use crate::auth::AuthClient;
use crate::config::ClientConfig;
use crate::session::{ClickOutcome, GameSession};

/// Fields held only while a room is joined
struct OnlineState {
    room_id: String,
    color: Color,
    version: u64,
}

/// Couples the local session to a coordinator room
pub struct SyncClient {
    session: GameSession,
    api: ChessApi,
    auth: AuthClient,
    token: String,
    online: Option<OnlineState>,
    status: String,
}

impl SyncClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        Ok(Self {
            session: GameSession::new(),
            api: ChessApi::new(config.chess_api_base.clone())?,
            auth: AuthClient::new(config.auth_api_base.clone())?,
            token: config.auth_token.clone(),
            online: None,
            status: "Offline mode".to_string(),
        })
    }

    /// Local session, including the board to render
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current status line
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_online(&self) -> bool {
        self.online.is_some()
    }

    /// Room code to share out-of-band, if online
    pub fn room_id(&self) -> Option<&str> {
        self.online.as_ref().map(|online| online.room_id.as_str())
    }

    /// Create a room seeded with the current local state
    pub async fn create_room(&mut self) -> bool {
        if let Err(err) = self.auth.verify(&self.token).await {
            self.status = err.to_string();
            return false;
        }

        match self.api.create_room(self.session.state().clone()).await {
            Ok(room) => {
                info!("Created room {}", room.room_id);
                self.session.apply_state(room.state);
                self.session.set_assigned(Some(room.color));
                self.online = Some(OnlineState {
                    room_id: room.room_id,
                    color: room.color,
                    version: room.version,
                });
                self.set_room_status();
                true
            }
            Err(err) => {
                self.status = err.to_string();
                false
            }
        }
    }

    /// Join an existing room by code
    pub async fn join_room(&mut self, code: &str) -> bool {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            self.status = "Enter a room code.".to_string();
            return false;
        }

        if let Err(err) = self.auth.verify(&self.token).await {
            self.status = err.to_string();
            return false;
        }

        match self.api.join_room(&code).await {
            Ok(room) => {
                info!("Joined room {} as {}", room.room_id, room.color);
                let status = format!("Joined {} as {}", room.room_id, room.color);
                self.session.apply_state(room.state);
                self.session.set_assigned(Some(room.color));
                self.online = Some(OnlineState {
                    room_id: room.room_id,
                    color: room.color,
                    version: room.version,
                });
                self.status = status;
                true
            }
            Err(err) => {
                self.status = err.to_string();
                false
            }
        }
    }

    /// Leave the room locally; the coordinator keeps it until the idle sweep
    pub fn leave(&mut self) {
        if let Some(online) = self.online.take() {
            info!("Left room {}", online.room_id);
        }
        self.session.set_assigned(None);
        self.status = "Offline mode".to_string();
    }

    /// Apply a click; a resulting move is pushed when online
    pub async fn click(&mut self, square: Position) -> ClickOutcome {
        let outcome = self.session.click(square);
        match &outcome {
            ClickOutcome::Locked => {
                self.status = format!("Waiting for {} move", self.session.state().turn);
            }
            ClickOutcome::Moved(mv) => {
                debug!("Applied local move {}", mv);
                if self.online.is_some() {
                    self.push_state().await;
                }
            }
            _ => {}
        }
        outcome
    }

    /// One poll tick; true when newer state was adopted
    pub async fn poll_once(&mut self) -> bool {
        let Some(online) = &self.online else {
            return false;
        };
        let room_id = online.room_id.clone();
        let version = online.version;

        match self.api.get_state(&room_id).await {
            Ok(response) => {
                if response.version == version {
                    return false;
                }
                debug!("Adopting version {} of room {}", response.version, room_id);
                self.session.apply_state(response.state);
                if let Some(online) = &mut self.online {
                    online.version = response.version;
                }
                self.set_room_status();
                true
            }
            Err(err) => {
                debug!("Poll failed: {}", err);
                self.status = err.to_string();
                false
            }
        }
    }

    /// Reset the board; resets the shared room when online
    pub async fn reset(&mut self) -> bool {
        let Some(online) = &self.online else {
            self.session.reset_local();
            self.status = "Offline mode".to_string();
            return true;
        };
        let room_id = online.room_id.clone();

        match self.api.reset(&room_id).await {
            Ok(response) => {
                info!("Reset room {}", room_id);
                self.session.apply_state(response.state);
                if let Some(online) = &mut self.online {
                    online.version = response.version;
                }
                self.set_room_status();
                true
            }
            Err(err) => {
                self.status = err.to_string();
                false
            }
        }
    }

    /// Push the local state; any failure reconciles from the coordinator
    async fn push_state(&mut self) {
        let Some(online) = &self.online else { return };
        let room_id = online.room_id.clone();
        let color = online.color;
        let version = online.version;

        let result = self
            .api
            .submit_move(&room_id, color, self.session.state().clone(), version)
            .await;
        match result {
            Ok(response) => {
                if let Some(online) = &mut self.online {
                    online.version = response.version;
                }
                self.set_room_status();
            }
            Err(err) => {
                warn!("Push rejected: {}", err);
                self.status = err.to_string();
                self.resync().await;
            }
        }
    }

    /// Pull the authoritative state and overwrite the local copy
    async fn resync(&mut self) {
        let Some(online) = &self.online else { return };
        let room_id = online.room_id.clone();

        match self.api.get_state(&room_id).await {
            Ok(response) => {
                self.session.apply_state(response.state);
                if let Some(online) = &mut self.online {
                    online.version = response.version;
                }
            }
            Err(err) => {
                debug!("Resync failed: {}", err);
            }
        }
    }

    fn set_room_status(&mut self) {
        match &self.online {
            Some(online) => {
                self.status = format!("Online room {} ({})", online.room_id, online.color);
            }
            None => {
                self.status = "Offline mode".to_string();
            }
        }
    }
}
