//! A single game: board, cursor, score and the move pipeline.
//!
//! `GameSession::apply_move` is the whole read-compute-mutate step for one move. It
//! runs with the session borrowed mutably, which the store guarantees by holding the
//! session's lock for the duration, so a move is never observed half applied.
//!
//! Rejected moves (every `Err`) leave the session untouched, with one exception:
//! an expired session is deactivated as it is rejected.

use core_actions::{CursorState, MotionError, MotionRequest, compute_motion};
use core_config::GameConfig;
use core_text::{Grid, Position};
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use crate::overlay::{Overlay, place_collectible};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid or expired game session")]
    NotFound,
    #[error("game already completed")]
    Completed,
    #[error("game expired due to time limit")]
    Expired,
    #[error("move requests too frequent, retry in {}ms", remaining.as_millis())]
    MoveTooSoon { remaining: Duration },
    #[error(transparent)]
    InvalidRequest(#[from] MotionError),
    #[error("out of bounds: ({row}, {col})")]
    OutOfBounds { row: isize, col: isize },
    #[error("score integrity validation failed (score {score}, pearls {pearls})")]
    Integrity { score: u32, pearls: u32 },
    #[error("unknown text pattern {0}")]
    UnknownPattern(usize),
}

/// What a committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub position: Position,
    pub preferred_col: isize,
    pub score: u32,
    pub pearl_collected: bool,
    /// Where the replacement pearl went, when one was collected and a cell was free.
    pub new_pearl: Option<Position>,
    pub completed: bool,
    pub final_score: Option<u32>,
    pub completion_time: Option<Duration>,
}

/// Read-only copy of a session for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub player: String,
    pub pattern: usize,
    pub grid: Grid,
    pub cursor: CursorState,
    pub pearl: Option<Position>,
    pub score: u32,
    pub pearls: u32,
    pub moves: u32,
    pub active: bool,
    pub completed: bool,
    pub final_score: Option<u32>,
    pub completion_time: Option<Duration>,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    player: String,
    pattern: usize,
    grid: Grid,
    overlay: Overlay,
    cursor: CursorState,
    score: u32,
    pearls: u32,
    moves: u32,
    started_at: Instant,
    last_move_at: Option<Instant>,
    ended_at: Option<Instant>,
    active: bool,
    completed: bool,
    final_score: Option<u32>,
    completion_time: Option<Duration>,
    rng: StdRng,
}

impl GameSession {
    /// Fresh game on `grid`: occupant at (0,0) and one pearl placed with `rng`.
    pub fn new(
        player: impl Into<String>,
        pattern: usize,
        grid: Grid,
        mut rng: StdRng,
        now: Instant,
    ) -> Self {
        let mut overlay = Overlay::new(&grid);
        place_collectible(&mut overlay, &mut rng, 0, 0);
        Self {
            id: Uuid::new_v4(),
            player: player.into(),
            pattern,
            grid,
            overlay,
            cursor: CursorState::default(),
            score: 0,
            pearls: 0,
            moves: 0,
            started_at: now,
            last_move_at: None,
            ended_at: None,
            active: true,
            completed: false,
            final_score: None,
            completion_time: None,
            rng,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pearls(&self) -> u32 {
        self.pearls
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn completion_time(&self) -> Option<Duration> {
        self.completion_time
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    pub fn is_expired(&self, now: Instant, rules: &GameConfig) -> bool {
        now.saturating_duration_since(self.started_at) > rules.max_game_time()
    }

    /// Take the session out of play without completing it.
    pub fn deactivate(&mut self, now: Instant) {
        if self.active {
            self.active = false;
            self.ended_at.get_or_insert(now);
        }
    }

    pub fn snapshot(&self, now: Instant) -> SessionSnapshot {
        let end = self.ended_at.unwrap_or(now);
        SessionSnapshot {
            id: self.id,
            player: self.player.clone(),
            pattern: self.pattern,
            grid: self.grid.clone(),
            cursor: self.cursor,
            pearl: self.overlay.collectible(),
            score: self.score,
            pearls: self.pearls,
            moves: self.moves,
            active: self.active,
            completed: self.completed,
            final_score: self.final_score,
            completion_time: self.completion_time,
            elapsed: end.saturating_duration_since(self.started_at),
        }
    }

    /// Check, compute and commit one move.
    pub fn apply_move(
        &mut self,
        request: MotionRequest,
        now: Instant,
        rules: &GameConfig,
    ) -> Result<MoveOutcome, SessionError> {
        if self.completed {
            return Err(SessionError::Completed);
        }
        if !self.active {
            return Err(SessionError::NotFound);
        }
        if self.is_expired(now, rules) {
            self.deactivate(now);
            tracing::info!(target: "state.session", id = %self.id, player = %self.player, "session_expired");
            return Err(SessionError::Expired);
        }
        if let Some(last) = self.last_move_at {
            let since = now.saturating_duration_since(last);
            let cooldown = rules.move_cooldown();
            if since < cooldown {
                return Err(SessionError::MoveTooSoon {
                    remaining: cooldown - since,
                });
            }
        }

        let result = compute_motion(&self.grid, self.cursor, request)?;
        let Some(next) = result.cursor() else {
            tracing::debug!(
                target: "state.session",
                id = %self.id,
                motion = %request.kind,
                row = result.row(),
                col = result.col(),
                "move_out_of_bounds"
            );
            return Err(SessionError::OutOfBounds {
                row: result.row(),
                col: result.col(),
            });
        };

        let pearl_collected = self.overlay.has_collectible_at(next.position);
        let (score, pearls) = if pearl_collected {
            (
                self.score.saturating_add(rules.pearl_points),
                self.pearls.saturating_add(1),
            )
        } else {
            (self.score, self.pearls)
        };
        if u64::from(score) != u64::from(pearls) * u64::from(rules.pearl_points) {
            tracing::warn!(target: "state.session", id = %self.id, score, pearls, "score_integrity_failed");
            return Err(SessionError::Integrity { score, pearls });
        }

        // Commit.
        self.overlay.move_occupant(next.position);
        self.cursor = next;
        self.score = score;
        self.pearls = pearls;
        self.moves = self.moves.saturating_add(1);
        self.last_move_at = Some(now);
        let new_pearl = if pearl_collected {
            let placed = place_collectible(
                &mut self.overlay,
                &mut self.rng,
                next.position.row,
                next.position.col,
            );
            tracing::debug!(
                target: "state.session",
                id = %self.id,
                score,
                pearls,
                "pearl_collected"
            );
            placed
        } else {
            None
        };
        if self.score >= rules.target_score {
            self.complete(now);
        }
        tracing::debug!(
            target: "state.session",
            id = %self.id,
            motion = %request.kind,
            row = next.position.row,
            col = next.position.col,
            moves = self.moves,
            "move_applied"
        );
        Ok(MoveOutcome {
            position: next.position,
            preferred_col: next.preferred_col,
            score: self.score,
            pearl_collected,
            new_pearl,
            completed: self.completed,
            final_score: self.final_score,
            completion_time: self.completion_time,
        })
    }

    fn complete(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.completed = true;
        self.active = false;
        self.ended_at = Some(now);
        self.final_score = Some(self.score);
        self.completion_time = Some(elapsed);
        tracing::info!(
            target: "state.session",
            id = %self.id,
            player = %self.player,
            score = self.score,
            moves = self.moves,
            secs = elapsed.as_secs(),
            "session_completed"
        );
    }

    #[cfg(test)]
    pub(crate) fn corrupt_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub(crate) fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_actions::MotionKind;
    use rand::SeedableRng;

    fn rules() -> GameConfig {
        GameConfig {
            pearl_points: 100,
            target_score: 300,
            max_game_time_secs: 60,
            move_cooldown_ms: 100,
            seed: None,
        }
    }

    fn session(rows: &[&str]) -> (GameSession, Instant) {
        let start = Instant::now();
        let grid = Grid::from_rows(rows.iter().copied());
        let s = GameSession::new("ann", 0, grid, StdRng::seed_from_u64(1), start);
        (s, start)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Put the only pearl on `pos` by filling every other candidate first.
    fn force_pearl(s: &mut GameSession, pos: Position) {
        let overlay = s.overlay_mut();
        let mut rng = StdRng::seed_from_u64(3);
        while overlay.collectible() != Some(pos) {
            place_collectible(overlay, &mut rng, -1, -1);
        }
    }

    #[test]
    fn new_session_has_occupant_and_one_pearl() {
        let (s, _) = session(&["abc", "def"]);
        assert_eq!(s.overlay().occupant(), Some(Position::origin()));
        let pearl = s.overlay().collectible().unwrap();
        assert_ne!(pearl, Position::origin());
        assert!(s.grid().contains(pearl));
        assert!(s.is_active());
        assert_eq!((s.score(), s.pearls(), s.moves()), (0, 0, 0));
    }

    #[test]
    fn plain_move_updates_cursor_and_counters() {
        let (mut s, t0) = session(&["abcdef", "ab"]);
        force_pearl(&mut s, Position::new(1, 0));
        let out = s
            .apply_move(MotionKind::LineEnd.into(), t0 + ms(10), &rules())
            .unwrap();
        assert_eq!(out.position, Position::new(0, 5));
        assert!(!out.pearl_collected);
        assert_eq!(s.moves(), 1);
        assert_eq!(s.overlay().occupant(), Some(Position::new(0, 5)));
        let out = s
            .apply_move(MotionKind::Down.into(), t0 + ms(200), &rules())
            .unwrap();
        assert_eq!((out.position, out.preferred_col), (Position::new(1, 1), 5));
    }

    #[test]
    fn out_of_bounds_changes_nothing() {
        let (mut s, t0) = session(&["abc"]);
        let before = s.snapshot(t0);
        let err = s
            .apply_move(MotionKind::Left.into(), t0, &rules())
            .unwrap_err();
        assert_eq!(err, SessionError::OutOfBounds { row: 0, col: -1 });
        assert_eq!(s.snapshot(t0), before);
        // No cooldown was started by the rejected move.
        assert!(s.apply_move(MotionKind::Right.into(), t0, &rules()).is_ok());
    }

    #[test]
    fn collecting_pearl_scores_and_respawns_elsewhere() {
        let (mut s, t0) = session(&["abcd", "efgh"]);
        force_pearl(&mut s, Position::new(0, 1));
        let out = s
            .apply_move(MotionKind::Right.into(), t0, &rules())
            .unwrap();
        assert!(out.pearl_collected);
        assert_eq!((out.score, s.pearls()), (100, 1));
        let pearl = out.new_pearl.unwrap();
        assert_ne!(pearl, Position::new(0, 1));
        assert_eq!(s.overlay().collectible(), Some(pearl));
    }

    #[test]
    fn reaching_target_completes_game() {
        let (mut s, t0) = session(&["abcd"]);
        let rules = GameConfig {
            target_score: 200,
            move_cooldown_ms: 0,
            ..rules()
        };
        let mut now = t0;
        for step in 1..=2 {
            let here = s.cursor().position;
            let target = Position::new(0, if here.col == 3 { 2 } else { here.col + 1 });
            force_pearl(&mut s, target);
            let kind = if target.col > here.col {
                MotionKind::Right
            } else {
                MotionKind::Left
            };
            now += ms(1000);
            let out = s.apply_move(kind.into(), now, &rules).unwrap();
            assert!(out.pearl_collected);
            assert_eq!(out.completed, step == 2);
        }
        assert!(s.is_completed());
        assert!(!s.is_active());
        assert_eq!(s.final_score(), Some(200));
        assert_eq!(s.completion_time(), Some(Duration::from_secs(2)));
        let err = s
            .apply_move(MotionKind::Left.into(), now + ms(500), &rules)
            .unwrap_err();
        assert_eq!(err, SessionError::Completed);
    }

    #[test]
    fn cooldown_rejects_rapid_moves() {
        let (mut s, t0) = session(&["abcdef"]);
        s.apply_move(MotionKind::Right.into(), t0, &rules()).unwrap();
        let err = s
            .apply_move(MotionKind::Right.into(), t0 + ms(40), &rules())
            .unwrap_err();
        assert_eq!(err, SessionError::MoveTooSoon { remaining: ms(60) });
        assert_eq!(s.moves(), 1);
        assert!(s.apply_move(MotionKind::Right.into(), t0 + ms(100), &rules()).is_ok());
    }

    #[test]
    fn expired_session_is_deactivated() {
        let (mut s, t0) = session(&["abcdef"]);
        let late = t0 + Duration::from_secs(61);
        let err = s.apply_move(MotionKind::Right.into(), late, &rules()).unwrap_err();
        assert_eq!(err, SessionError::Expired);
        assert!(!s.is_active());
        assert_eq!(s.ended_at(), Some(late));
        let err = s
            .apply_move(MotionKind::Right.into(), late + ms(500), &rules())
            .unwrap_err();
        assert_eq!(err, SessionError::NotFound);
    }

    #[test]
    fn invalid_request_is_reported() {
        let (mut s, t0) = session(&["abc"]);
        let err = s
            .apply_move(MotionKind::FindCharForward.into(), t0, &rules())
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidRequest(MotionError::MissingTarget(MotionKind::FindCharForward))
        );
        assert_eq!(err.to_string(), "invalid request: find-char-forward requires a target character");
    }

    #[test]
    fn integrity_violation_rolls_back() {
        let (mut s, t0) = session(&["abcdef"]);
        s.corrupt_score(50);
        let before = s.snapshot(t0);
        let err = s.apply_move(MotionKind::Right.into(), t0, &rules()).unwrap_err();
        assert!(matches!(err, SessionError::Integrity { .. }));
        assert_eq!(s.snapshot(t0), before);
    }
}
