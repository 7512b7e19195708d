//! Game state: pearl overlay, practice texts, sessions and the session store.
//!
//! The motion engine in `core-actions` is pure; everything that changes over a game
//! lives here. A `GameSession` owns one board (grid plus overlay), the cursor and
//! the counters, and applies moves atomically. `SessionStore` hands out sessions by
//! id, enforces one active game per player and keeps player statistics and the
//! leaderboard.
//!
//! Telemetry:
//! - Lifecycle events (`session_created`, `session_deactivated`, `session_expired`,
//!   `session_completed`) log at info under `state.session`.
//! - Per-move events (`move_applied`, `pearl_collected`, `move_out_of_bounds`) log at
//!   debug under the same target; pearl placement traces under `state.overlay`.

pub mod overlay;
pub mod patterns;
pub mod session;
pub mod store;

pub use overlay::{CellTag, Overlay, place_collectible};
pub use patterns::{TextPattern, pattern_grid, random_pattern};
pub use session::{GameSession, MoveOutcome, SessionError, SessionSnapshot};
pub use store::{LeaderboardEntry, LeaderboardKind, PlayerStats, SessionId, SessionStore};
