//! Room store
//!
//! Rooms hold the authoritative {state, version} pair. The directory keeps
//! each room behind its own lock; operations on different rooms never
//! contend with each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use protocol::{
    Color, GameState, MoveResponse, RoomResponse, StateResponse, ROOM_CODE_ALPHABET,
    ROOM_CODE_LENGTH,
};

/// Room operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoomError {
    /// Unknown room id
    #[error("Room not found")]
    NotFound,

    /// Both seats already taken
    #[error("Room is full")]
    RoomFull,

    /// Submitted version does not match the stored one
    #[error("Version conflict: room is at {current}, client sent {submitted}")]
    VersionConflict { current: u64, submitted: u64 },
}

/// Result type for room operations
pub type Result<T> = std::result::Result<T, RoomError>;

/// A single game room
pub struct Room {
    pub id: String,
    /// White seat occupancy (the creator)
    white_taken: bool,
    /// Black seat occupancy (the joiner)
    black_taken: bool,
    pub state: GameState,
    pub version: u64,
    /// Updated on every served operation; drives idle purging
    pub last_activity: Instant,
}

impl Room {
    /// Create a room with the creator already seated as white
    fn new(id: String, state: GameState) -> Self {
        Self {
            id,
            white_taken: true,
            black_taken: false,
            state,
            version: 0,
            last_activity: Instant::now(),
        }
    }

    /// Check whether both seats are taken
    pub fn is_full(&self) -> bool {
        self.white_taken && self.black_taken
    }

    /// Seat a joining player on the first free color, white first
    pub fn claim_seat(&mut self) -> Result<Color> {
        if !self.white_taken {
            self.white_taken = true;
            Ok(Color::White)
        } else if !self.black_taken {
            self.black_taken = true;
            Ok(Color::Black)
        } else {
            Err(RoomError::RoomFull)
        }
    }

    /// Store a pushed state if the submitted version matches the stored one
    pub fn submit_move(
        &mut self,
        moved_by: Color,
        state: GameState,
        submitted_version: u64,
    ) -> Result<u64> {
        if submitted_version != self.version {
            return Err(RoomError::VersionConflict {
                current: self.version,
                submitted: submitted_version,
            });
        }
        self.state = state;
        self.version += 1;
        self.touch();
        debug!(
            "Room {}: move by {} accepted, version {}",
            self.id, moved_by, self.version
        );
        Ok(self.version)
    }

    /// Restore the standard initial layout
    pub fn reset(&mut self) -> StateResponse {
        self.state = GameState::initial();
        self.version += 1;
        self.touch();
        StateResponse {
            state: self.state.clone(),
            version: self.version,
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Shared handle to a room
type RoomHandle = Arc<Mutex<Room>>;

/// Server-wide room table
pub struct RoomDirectory {
    rooms: RwLock<HashMap<String, RoomHandle>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Create a room seeded with the caller's state; the caller is white
    pub fn create(&self, initial: GameState) -> RoomResponse {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);

        let mut id = Self::random_code();
        while rooms.contains_key(&id) {
            id = Self::random_code();
        }

        let room = Room::new(id.clone(), initial);
        let response = RoomResponse {
            room_id: room.id.clone(),
            color: Color::White,
            version: room.version,
            state: room.state.clone(),
        };
        rooms.insert(id.clone(), Arc::new(Mutex::new(room)));
        info!("Room {} created ({} total)", id, rooms.len());
        response
    }

    /// Join a room on its free seat
    pub fn join(&self, room_id: &str) -> Result<RoomResponse> {
        let handle = self.get_room(room_id)?;
        let mut room = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let color = room.claim_seat()?;
        room.touch();
        info!("Room {}: {} seat taken", room.id, color);
        Ok(RoomResponse {
            room_id: room.id.clone(),
            color,
            version: room.version,
            state: room.state.clone(),
        })
    }

    /// Current {state, version} pair of a room
    pub fn get_state(&self, room_id: &str) -> Result<StateResponse> {
        let handle = self.get_room(room_id)?;
        let mut room = handle.lock().unwrap_or_else(PoisonError::into_inner);

        room.touch();
        Ok(StateResponse {
            state: room.state.clone(),
            version: room.version,
        })
    }

    /// Store a pushed state, rejecting stale versions
    pub fn submit_move(
        &self,
        room_id: &str,
        moved_by: Color,
        state: GameState,
        submitted_version: u64,
    ) -> Result<MoveResponse> {
        let handle = self.get_room(room_id)?;
        let mut room = handle.lock().unwrap_or_else(PoisonError::into_inner);

        let version = room.submit_move(moved_by, state, submitted_version)?;
        Ok(MoveResponse { version })
    }

    /// Reset a room to the standard initial layout
    pub fn reset(&self, room_id: &str) -> Result<StateResponse> {
        let handle = self.get_room(room_id)?;
        let mut room = handle.lock().unwrap_or_else(PoisonError::into_inner);

        info!("Room {} reset", room.id);
        Ok(room.reset())
    }

    /// Remove rooms idle longer than `ttl`, returning how many were purged
    pub fn purge_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut expired = Vec::new();

        {
            let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
            for (id, handle) in rooms.iter() {
                let room = handle.lock().unwrap_or_else(PoisonError::into_inner);
                if now.duration_since(room.last_activity) >= ttl {
                    expired.push(id.clone());
                }
            }
        }

        if expired.is_empty() {
            return 0;
        }

        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let mut purged = 0;
        for id in expired {
            // Re-check under the write lock; the room may have woken up
            let still_idle = rooms.get(&id).is_some_and(|handle| {
                let room = handle.lock().unwrap_or_else(PoisonError::into_inner);
                now.duration_since(room.last_activity) >= ttl
            });
            if still_idle {
                rooms.remove(&id);
                purged += 1;
                info!("Room {} purged after idle timeout", id);
            }
        }
        purged
    }

    /// Number of live rooms
    pub fn count(&self) -> usize {
        self.rooms
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Look up a room by id, normalized to uppercase
    fn get_room(&self, room_id: &str) -> Result<RoomHandle> {
        let id = room_id.trim().to_uppercase();
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        rooms.get(&id).cloned().ok_or(RoomError::NotFound)
    }

    /// Random room code drawn from the code alphabet
    fn random_code() -> String {
        let mut rng = rand::thread_rng();
        (0..ROOM_CODE_LENGTH)
            .map(|_| {
                let index = rng.gen_range(0..ROOM_CODE_ALPHABET.len());
                ROOM_CODE_ALPHABET[index] as char
            })
            .collect()
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Position;

    #[test]
    fn test_create_assigns_white() {
        let directory = RoomDirectory::new();

        let created = directory.create(GameState::initial());
        assert_eq!(created.color, Color::White);
        assert_eq!(created.version, 0);
        assert_eq!(created.room_id.len(), ROOM_CODE_LENGTH);
        assert!(created
            .room_id
            .bytes()
            .all(|b| ROOM_CODE_ALPHABET.contains(&b)));
        assert_eq!(directory.count(), 1);
    }

    #[test]
    fn test_create_distinct_codes() {
        let directory = RoomDirectory::new();

        let first = directory.create(GameState::initial());
        let second = directory.create(GameState::initial());
        assert_ne!(first.room_id, second.room_id);
        assert_eq!(directory.count(), 2);
    }

    #[test]
    fn test_join_takes_remaining_color() {
        let directory = RoomDirectory::new();
        let created = directory.create(GameState::initial());

        let joined = directory.join(&created.room_id).unwrap();
        assert_eq!(joined.color, Color::Black);
        assert_eq!(joined.version, 0);
        assert_eq!(joined.state, created.state);

        // Third seat does not exist
        let third = directory.join(&created.room_id);
        assert_eq!(third, Err(RoomError::RoomFull));
    }

    #[test]
    fn test_join_unknown_room() {
        let directory = RoomDirectory::new();
        assert_eq!(directory.join("ZZZZZZ"), Err(RoomError::NotFound));
        assert_eq!(
            directory.get_state("ZZZZZZ").map(|_| ()),
            Err(RoomError::NotFound)
        );
    }

    #[test]
    fn test_join_normalizes_case() {
        let directory = RoomDirectory::new();
        let created = directory.create(GameState::initial());

        let lower = created.room_id.to_lowercase();
        let joined = directory.join(&lower).unwrap();
        assert_eq!(joined.room_id, created.room_id);

        // Surrounding whitespace is tolerated too
        let padded = format!("  {}  ", created.room_id);
        assert!(directory.get_state(&padded).is_ok());
    }

    #[test]
    fn test_move_increments_version() {
        let directory = RoomDirectory::new();
        let created = directory.create(GameState::initial());

        let mut pushed = created.state.clone();
        pushed
            .apply_move(
                Position::from_algebraic("e2").unwrap(),
                Position::from_algebraic("e4").unwrap(),
            )
            .unwrap();

        let accepted = directory
            .submit_move(&created.room_id, Color::White, pushed.clone(), 0)
            .unwrap();
        assert_eq!(accepted.version, 1);

        let fetched = directory.get_state(&created.room_id).unwrap();
        assert_eq!(fetched.version, 1);
        assert_eq!(fetched.state, pushed);
    }

    #[test]
    fn test_stale_version_rejected() {
        let directory = RoomDirectory::new();
        let created = directory.create(GameState::initial());

        directory
            .submit_move(&created.room_id, Color::White, GameState::initial(), 0)
            .unwrap();

        // A second push against version 0 loses the race
        let stale = directory.submit_move(&created.room_id, Color::Black, GameState::initial(), 0);
        assert_eq!(
            stale,
            Err(RoomError::VersionConflict {
                current: 1,
                submitted: 0,
            })
        );

        // The stored version is unchanged by the rejection
        let fetched = directory.get_state(&created.room_id).unwrap();
        assert_eq!(fetched.version, 1);
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let directory = RoomDirectory::new();

        let mut scrambled = GameState::initial();
        scrambled
            .apply_move(
                Position::from_algebraic("b1").unwrap(),
                Position::from_algebraic("c3").unwrap(),
            )
            .unwrap();
        let created = directory.create(scrambled);

        let reset = directory.reset(&created.room_id).unwrap();
        assert_eq!(reset.state, GameState::initial());
        assert_eq!(reset.version, 1);
    }

    #[test]
    fn test_purge_idle_rooms() {
        let directory = RoomDirectory::new();
        let created = directory.create(GameState::initial());
        directory.create(GameState::initial());

        // Nothing is old enough yet
        assert_eq!(directory.purge_idle(Duration::from_secs(60)), 0);

        // With a zero TTL everything that has not just been touched expires
        let purged = directory.purge_idle(Duration::ZERO);
        assert_eq!(purged, 2);
        assert_eq!(directory.count(), 0);
        assert_eq!(directory.join(&created.room_id), Err(RoomError::NotFound));
    }
}
