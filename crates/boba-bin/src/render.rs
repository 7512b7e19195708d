//! Plain-text rendering of the board, help and leaderboard.

use core_actions::available_motions;
use core_config::GameConfig;
use core_state::{LeaderboardEntry, LeaderboardKind, PlayerStats, SessionSnapshot};
use core_text::Position;
use std::fmt::Write as _;
use std::time::Duration;

pub const CURSOR_MARK: char = '@';
pub const PEARL_MARK: char = 'o';

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Status line followed by the grid with the cursor and pearl drawn over the text.
pub fn render_board(snap: &SessionSnapshot, rules: &GameConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "score {}/{}  pearls {}  moves {}  time {}",
        snap.score,
        rules.target_score,
        snap.pearls,
        snap.moves,
        format_duration(snap.elapsed)
    );
    for (r, row) in snap.grid.rows().enumerate() {
        for (c, &ch) in row.iter().enumerate() {
            let here = Position::at(r, c);
            let mark = if here == snap.cursor.position {
                CURSOR_MARK
            } else if Some(here) == snap.pearl {
                PEARL_MARK
            } else {
                ch
            };
            out.push(mark);
        }
        out.push('\n');
    }
    out
}

pub fn render_help() -> String {
    let mut out = String::from("motions:\n");
    for m in available_motions() {
        let key = if m.kind.needs_target() {
            format!("{}<c>", m.key)
        } else {
            m.key.to_string()
        };
        let _ = writeln!(out, "  {key:<5} {}", m.description);
    }
    out.push_str("commands:\n  :help  this list\n  :board leaderboard\n  :q     quit\n");
    out
}

pub fn render_leaderboard(kind: LeaderboardKind, entries: &[LeaderboardEntry]) -> String {
    let title = match kind {
        LeaderboardKind::Score => "top scores",
        LeaderboardKind::Time => "fastest games",
    };
    let mut out = format!("{title}:\n");
    if entries.is_empty() {
        out.push_str("  (no completed games)\n");
    }
    for e in entries {
        let _ = writeln!(
            out,
            "  {:>2}. {:<12} {:>5}  {}  {} moves  {} pearls",
            e.rank,
            e.player,
            e.final_score,
            format_duration(e.completion_time),
            e.moves,
            e.pearls
        );
    }
    out
}

pub fn render_stats(player: &str, stats: &PlayerStats) -> String {
    let fastest = stats
        .fastest_time
        .map_or_else(|| "--:--".to_string(), format_duration);
    format!(
        "{player}: {} games, {} completed, best {}, fastest {}, {} pearls, {} moves\n",
        stats.total_games,
        stats.completed_games,
        stats.best_score,
        fastest,
        stats.total_pearls,
        stats.total_moves
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_actions::CursorState;
    use core_state::SessionStore;
    use core_text::Grid;

    /// Snapshot of a real session, moved onto a hand-made board.
    fn snapshot(rows: &[&str], cursor: Position, pearl: Option<Position>) -> SessionSnapshot {
        let store = SessionStore::new(GameConfig::default());
        let id = store.create("ann");
        let mut snap = store.snapshot(id).unwrap();
        snap.grid = Grid::from_rows(rows.iter().copied());
        snap.cursor = CursorState::at(cursor);
        snap.pearl = pearl;
        snap.elapsed = Duration::from_secs(75);
        snap
    }

    #[test]
    fn board_marks_cursor_and_pearl() {
        let snap = snapshot(
            &["abc", "", "de"],
            Position::new(0, 1),
            Some(Position::new(2, 0)),
        );
        let text = render_board(&snap, &GameConfig::default());
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("score 0/1000  pearls 0  moves 0  time 01:15")
        );
        assert_eq!(lines.collect::<Vec<_>>(), ["a@c", "", "oe"]);
    }

    #[test]
    fn help_lists_every_motion() {
        let help = render_help();
        for m in available_motions() {
            assert!(help.contains(m.description), "{}", m.description);
        }
        assert!(help.contains("  g_    Last non-blank character"));
        assert!(help.contains("  f<c>  Find character forward on line"));
        assert!(help.contains(":board"));
    }

    #[test]
    fn leaderboard_rows() {
        let entries = [LeaderboardEntry {
            rank: 1,
            player: "ann".to_string(),
            final_score: 1000,
            completion_time: Duration::from_secs(61),
            moves: 40,
            pearls: 10,
        }];
        let text = render_leaderboard(LeaderboardKind::Score, &entries);
        assert_eq!(
            text,
            "top scores:\n   1. ann           1000  01:01  40 moves  10 pearls\n"
        );
        let empty = render_leaderboard(LeaderboardKind::Time, &[]);
        assert_eq!(empty, "fastest games:\n  (no completed games)\n");
    }

    #[test]
    fn stats_without_completed_games() {
        let stats = PlayerStats {
            total_games: 2,
            ..PlayerStats::default()
        };
        assert_eq!(
            render_stats("ann", &stats),
            "ann: 2 games, 0 completed, best 0, fastest --:--, 0 pearls, 0 moves\n"
        );
    }
}
