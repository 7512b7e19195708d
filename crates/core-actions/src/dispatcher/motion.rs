//! Motion sub-dispatch (cursor movement).
//!
//! Pure and synchronous: reads a grid snapshot and a cursor, returns a `MotionResult`.
//! Nothing here mutates caller state, so a single grid may be shared across threads.
//!
//! Preferred column rules:
//! * Horizontal and jump motions reset it to the landing column.
//! * Vertical and screen motions pass the caller's value through and clamp toward it.
//!
//! Validity is decided once, after the primitive ran, by `Grid::contains`. A search
//! that finds nothing is a valid no-op, not an out-of-bounds result.

use crate::{CursorState, MotionError, MotionKind, MotionRequest, MotionResult};
use core_text::motion::{self, SearchDirection, WordKind};
use core_text::{Grid, Position};

/// Compute where `cursor` lands after `request` on `grid`.
///
/// Errors only on caller-contract violations (a search kind without a target).
pub fn compute_motion(
    grid: &Grid,
    cursor: CursorState,
    request: MotionRequest,
) -> Result<MotionResult, MotionError> {
    let kind = request.kind;
    let target = match (kind.needs_target(), request.target) {
        (true, None) => return Err(MotionError::MissingTarget(kind)),
        (_, target) => target,
    };
    let mut pos = cursor.position;
    let preferred = cursor.preferred_col;
    match kind {
        MotionKind::Left => apply_horizontal_motion(grid, &mut pos, motion::left),
        MotionKind::Right => apply_horizontal_motion(grid, &mut pos, motion::right),
        MotionKind::Up => apply_vertical_motion(grid, &mut pos, preferred, motion::up),
        MotionKind::Down => apply_vertical_motion(grid, &mut pos, preferred, motion::down),
        MotionKind::WordForward => motion::word_forward(grid, &mut pos, WordKind::Word),
        MotionKind::BigWordForward => motion::word_forward(grid, &mut pos, WordKind::BigWord),
        MotionKind::WordBackward => motion::word_backward(grid, &mut pos, WordKind::Word),
        MotionKind::BigWordBackward => motion::word_backward(grid, &mut pos, WordKind::BigWord),
        MotionKind::WordEnd => motion::word_end(grid, &mut pos, WordKind::Word),
        MotionKind::BigWordEnd => motion::word_end(grid, &mut pos, WordKind::BigWord),
        MotionKind::LineStart => apply_horizontal_motion(grid, &mut pos, motion::line_start),
        MotionKind::LineEnd => apply_horizontal_motion(grid, &mut pos, motion::line_end),
        MotionKind::FirstNonBlank => {
            apply_horizontal_motion(grid, &mut pos, motion::first_non_blank)
        }
        MotionKind::LastNonBlank => apply_horizontal_motion(grid, &mut pos, motion::last_non_blank),
        MotionKind::FileStart => apply_horizontal_motion(grid, &mut pos, motion::file_start),
        MotionKind::FileEnd => apply_horizontal_motion(grid, &mut pos, motion::file_end),
        MotionKind::ScreenTop => {
            apply_vertical_motion(grid, &mut pos, preferred, motion::screen_top)
        }
        MotionKind::ScreenMiddle => {
            apply_vertical_motion(grid, &mut pos, preferred, motion::screen_middle)
        }
        MotionKind::ScreenBottom => {
            apply_vertical_motion(grid, &mut pos, preferred, motion::screen_bottom)
        }
        MotionKind::ParagraphPrev => motion::paragraph_backward(grid, &mut pos),
        MotionKind::ParagraphNext => motion::paragraph_forward(grid, &mut pos),
        MotionKind::SentencePrev => motion::sentence_backward(grid, &mut pos),
        MotionKind::SentenceNext => motion::sentence_forward(grid, &mut pos),
        MotionKind::FindCharForward
        | MotionKind::FindCharBackward
        | MotionKind::TillCharForward
        | MotionKind::TillCharBackward => {
            // `target` is Some here: checked above.
            if let Some(target) = target {
                apply_search(grid, &mut pos, kind, target);
            }
        }
    }
    let preferred_col = if kind.is_vertical() { preferred } else { pos.col };
    let result = MotionResult {
        position: pos,
        preferred_col,
        is_valid: grid.contains(pos),
    };
    tracing::trace!(
        target: "actions.motion",
        motion = %kind,
        from_row = cursor.position.row,
        from_col = cursor.position.col,
        to_row = pos.row,
        to_col = pos.col,
        valid = result.is_valid,
        "motion"
    );
    Ok(result)
}

fn apply_search(grid: &Grid, pos: &mut Position, kind: MotionKind, target: char) {
    let found = match kind {
        MotionKind::FindCharForward => {
            motion::find_char(grid, pos, target, SearchDirection::Forward)
        }
        MotionKind::FindCharBackward => {
            motion::find_char(grid, pos, target, SearchDirection::Backward)
        }
        MotionKind::TillCharForward => {
            motion::till_char(grid, pos, target, SearchDirection::Forward)
        }
        _ => motion::till_char(grid, pos, target, SearchDirection::Backward),
    };
    if !found {
        tracing::trace!(target: "actions.motion", motion = %kind, ?target, "search_no_match");
    }
}

fn apply_horizontal_motion(grid: &Grid, cursor: &mut Position, f: fn(&Grid, &mut Position)) {
    f(grid, cursor);
}

fn apply_vertical_motion(
    grid: &Grid,
    cursor: &mut Position,
    preferred: isize,
    f: fn(&Grid, &mut Position, isize),
) {
    f(grid, cursor, preferred);
}
