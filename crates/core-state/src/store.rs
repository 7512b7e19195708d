//! In-memory registry of game sessions and per-player statistics.
//!
//! Locking: the session map and the player map each have their own lock, held only
//! for lookup or insert. Every session sits behind its own mutex, which is held for
//! a whole move. No code path holds a map lock while waiting on a session lock.

use core_actions::MotionRequest;
use core_config::GameConfig;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::patterns;
use crate::session::{GameSession, MoveOutcome, SessionError, SessionSnapshot};

pub type SessionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardKind {
    /// Highest final score first.
    Score,
    /// Fastest completion first.
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player: String,
    pub final_score: u32,
    pub completion_time: Duration,
    pub moves: u32,
    pub pearls: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub total_games: u32,
    pub completed_games: u32,
    pub best_score: u32,
    pub fastest_time: Option<Duration>,
    pub total_pearls: u32,
    pub total_moves: u32,
}

#[derive(Debug, Default)]
struct PlayerRecord {
    stats: PlayerStats,
    active: Option<SessionId>,
}

/// Totals of a finished game, folded into the player's record after the session lock
/// is released.
struct Finished {
    player: String,
    final_score: u32,
    completion_time: Duration,
    pearls: u32,
    moves: u32,
}

pub struct SessionStore {
    rules: GameConfig,
    seeds: Mutex<StdRng>,
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<GameSession>>>>,
    players: Mutex<HashMap<String, PlayerRecord>>,
}

impl SessionStore {
    /// Store using `rules`. A configured seed makes every session's board and pearl
    /// sequence reproducible.
    pub fn new(rules: GameConfig) -> Self {
        let seeds = match rules.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rules,
            seeds: Mutex::new(seeds),
            sessions: Mutex::new(HashMap::new()),
            players: Mutex::new(HashMap::new()),
        }
    }

    pub fn rules(&self) -> &GameConfig {
        &self.rules
    }

    fn session_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seeds.lock().r#gen())
    }

    /// Start a game on a randomly chosen practice text.
    pub fn create(&self, player: &str) -> SessionId {
        let mut rng = self.session_rng();
        let (index, pattern) = patterns::random_pattern(&mut rng);
        self.insert(player, index, pattern.grid(), rng)
    }

    /// Start a game on the practice text at `index`.
    pub fn create_with_pattern(&self, player: &str, index: usize) -> Result<SessionId, SessionError> {
        let grid = patterns::pattern_grid(index).ok_or(SessionError::UnknownPattern(index))?;
        Ok(self.insert(player, index, grid, self.session_rng()))
    }

    fn insert(&self, player: &str, index: usize, grid: core_text::Grid, rng: StdRng) -> SessionId {
        let now = Instant::now();
        let session = GameSession::new(player, index, grid, rng, now);
        let id = session.id();
        self.sessions
            .lock()
            .insert(id, Arc::new(Mutex::new(session)));

        let previous = {
            let mut players = self.players.lock();
            let record = players.entry(player.to_string()).or_default();
            record.stats.total_games += 1;
            record.active.replace(id)
        };
        if let Some(prev) = previous
            && let Some(handle) = self.handle(prev)
        {
            handle.lock().deactivate(now);
            tracing::info!(target: "state.session", id = %prev, player, "session_deactivated");
        }
        tracing::info!(target: "state.session", %id, player, pattern = index, "session_created");
        id
    }

    fn handle(&self, id: SessionId) -> Option<Arc<Mutex<GameSession>>> {
        self.sessions.lock().get(&id).cloned()
    }

    /// Active session of `player`, if any.
    pub fn active_session(&self, player: &str) -> Option<SessionId> {
        let id = self.players.lock().get(player).and_then(|r| r.active)?;
        self.handle(id)
            .filter(|h| h.lock().is_active())
            .map(|_| id)
    }

    pub fn process_move(&self, id: SessionId, request: MotionRequest) -> Result<MoveOutcome, SessionError> {
        self.process_move_at(id, request, Instant::now())
    }

    /// Apply one move as of `now`. The session's lock is held for the whole step.
    pub fn process_move_at(
        &self,
        id: SessionId,
        request: MotionRequest,
        now: Instant,
    ) -> Result<MoveOutcome, SessionError> {
        let handle = self.handle(id).ok_or(SessionError::NotFound)?;
        let (outcome, finished) = {
            let mut session = handle.lock();
            let outcome = session.apply_move(request, now, &self.rules)?;
            let finished = outcome.completed.then(|| Finished {
                player: session.player().to_string(),
                final_score: session.final_score().unwrap_or_default(),
                completion_time: session.completion_time().unwrap_or_default(),
                pearls: session.pearls(),
                moves: session.moves(),
            });
            (outcome, finished)
        };
        if let Some(done) = finished {
            self.record_completion(id, done);
        }
        Ok(outcome)
    }

    fn record_completion(&self, id: SessionId, done: Finished) {
        let mut players = self.players.lock();
        let record = players.entry(done.player).or_default();
        let stats = &mut record.stats;
        stats.completed_games += 1;
        stats.best_score = stats.best_score.max(done.final_score);
        stats.fastest_time = Some(match stats.fastest_time {
            Some(t) => t.min(done.completion_time),
            None => done.completion_time,
        });
        stats.total_pearls += done.pearls;
        stats.total_moves += done.moves;
        if record.active == Some(id) {
            record.active = None;
        }
    }

    pub fn snapshot(&self, id: SessionId) -> Result<SessionSnapshot, SessionError> {
        let handle = self.handle(id).ok_or(SessionError::NotFound)?;
        let snapshot = handle.lock().snapshot(Instant::now());
        Ok(snapshot)
    }

    /// Completed games ranked by `kind`, at most `limit` entries.
    pub fn leaderboard(&self, kind: LeaderboardKind, limit: usize) -> Vec<LeaderboardEntry> {
        let handles: Vec<_> = self.sessions.lock().values().cloned().collect();
        let mut entries: Vec<LeaderboardEntry> = handles
            .iter()
            .filter_map(|h| {
                let s = h.lock();
                Some(LeaderboardEntry {
                    rank: 0,
                    player: s.player().to_string(),
                    final_score: s.final_score()?,
                    completion_time: s.completion_time()?,
                    moves: s.moves(),
                    pearls: s.pearls(),
                })
            })
            .collect();
        match kind {
            LeaderboardKind::Score => entries.sort_by(|a, b| {
                b.final_score
                    .cmp(&a.final_score)
                    .then(a.completion_time.cmp(&b.completion_time))
            }),
            LeaderboardKind::Time => entries.sort_by(|a, b| {
                a.completion_time
                    .cmp(&b.completion_time)
                    .then(b.final_score.cmp(&a.final_score))
            }),
        }
        entries.truncate(limit);
        for (i, e) in entries.iter_mut().enumerate() {
            e.rank = i + 1;
        }
        entries
    }

    pub fn player_stats(&self, player: &str) -> Option<PlayerStats> {
        self.players.lock().get(player).map(|r| r.stats.clone())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
