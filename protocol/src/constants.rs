//! Shared constants

use std::time::Duration;

/// Board dimension (8x8)
pub const BOARD_SIZE: usize = 8;

/// Number of characters in a room code
pub const ROOM_CODE_LENGTH: usize = 6;

/// Room code alphabet (uppercase, 0/O and 1/I excluded)
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Poll interval (milliseconds)
pub const POLL_INTERVAL_MS: u64 = 1200;

/// Idle room lifetime (seconds)
pub const ROOM_IDLE_TIMEOUT_SECS: u64 = 3600;

/// Interval between idle room sweeps (seconds)
pub const ROOM_SWEEP_INTERVAL_SECS: u64 = 60;

/// Default coordinator bind address
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:4010";

/// Default coordinator base URL
pub const DEFAULT_CHESS_API_BASE: &str = "http://localhost:4010";

/// Default auth service base URL
pub const DEFAULT_AUTH_API_BASE: &str = "http://localhost:4001/api";

/// Poll interval Duration
pub const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS);

/// Idle room lifetime Duration
pub const ROOM_IDLE_TIMEOUT: Duration = Duration::from_secs(ROOM_IDLE_TIMEOUT_SECS);

/// Sweep interval Duration
pub const ROOM_SWEEP_INTERVAL: Duration = Duration::from_secs(ROOM_SWEEP_INTERVAL_SECS);
