//! Cursor motion primitives.
//!
//! These operate purely on a `Grid` + `Position` pair and are free of session state.
//! Each primitive rewrites the position in place; none of them checks that the result
//! lands inside the grid. Callers (the dispatcher in `core-actions`) decide validity
//! with `Grid::contains` and own the preferred column.
//!
//! Scanning motions (word, sentence, paragraph) walk the grid in row-major order and
//! treat a zero-length row as already exhausted, so it is crossed rather than landed
//! on. Horizontal motions never leave the current row.

use crate::classify::{CharClass, classify, is_sentence_end, is_space};
use crate::{Grid, Position};

/// Which notion of "word" a motion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// `w` `b` `e`: a run of Word characters or a run of Punct characters.
    Word,
    /// `W` `B` `E`: a run of any non-Space characters.
    BigWord,
}

impl WordKind {
    /// Does `c` continue a run that started on a character of class `anchor`?
    fn continues(self, anchor: CharClass, c: char) -> bool {
        let class = classify(c);
        match self {
            WordKind::Word => class == anchor,
            WordKind::BigWord => class != CharClass::Space,
        }
    }
}

/// Direction of a single-row character search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

type Cell = (usize, usize);

fn to_position((row, col): Cell) -> Position {
    Position::at(row, col)
}

/// Resolve a cursor into a scan origin. The row must exist; the column is clamped into
/// `[0, row_len]`, where `row_len` stands for "past the last character".
fn scan_origin(grid: &Grid, pos: Position) -> Option<Cell> {
    if pos.row < 0 || pos.row as usize >= grid.row_count() {
        return None;
    }
    let row = pos.row as usize;
    let col = pos.col.max(0) as usize;
    Some((row, col.min(grid.row_len(row))))
}

/// First non-Space cell at or after `from` in row-major order.
fn next_non_space(grid: &Grid, (mut row, mut col): Cell) -> Option<Cell> {
    while let Some(line) = grid.row(row) {
        if let Some(offset) = line.iter().skip(col).position(|&c| !is_space(c)) {
            return Some((row, col + offset));
        }
        row += 1;
        col = 0;
    }
    None
}

/// The cell before `cell` in row-major order, skipping zero-length rows.
fn prev_cell(grid: &Grid, (row, col): Cell) -> Option<Cell> {
    if col > 0 {
        return Some((row, col - 1));
    }
    (0..row)
        .rev()
        .find(|&r| grid.row_len(r) > 0)
        .map(|r| (r, grid.row_len(r) - 1))
}

/// Last valid position of the grid, or `(last_row, 0)` when every row is empty.
pub fn end_of_grid(grid: &Grid) -> Position {
    grid.last_cell()
        .map_or(Position::at(grid.last_row(), 0), to_position)
}

/// Clamp a preferred column into the target row.
///
/// Returns `preferred` untouched when `row` lies outside the grid so the caller's bounds
/// check reports the move as invalid. A zero-length row yields column 0, which is itself
/// never a valid position.
pub fn clamp_to_row(grid: &Grid, row: isize, preferred: isize) -> isize {
    if row < 0 || row as usize >= grid.row_count() {
        return preferred;
    }
    if preferred < 0 {
        return 0;
    }
    let len = grid.row_len(row as usize) as isize;
    preferred.min((len - 1).max(0))
}

/// Move left one cell. May produce column -1.
pub fn left(_grid: &Grid, pos: &mut Position) {
    pos.col -= 1;
}

/// Move right one cell. May produce a column past the row end.
pub fn right(_grid: &Grid, pos: &mut Position) {
    pos.col += 1;
}

/// Move up one row toward `preferred`.
pub fn up(grid: &Grid, pos: &mut Position, preferred: isize) {
    pos.row -= 1;
    pos.col = clamp_to_row(grid, pos.row, preferred);
}

/// Move down one row toward `preferred`.
pub fn down(grid: &Grid, pos: &mut Position, preferred: isize) {
    pos.row += 1;
    pos.col = clamp_to_row(grid, pos.row, preferred);
}

pub fn screen_top(grid: &Grid, pos: &mut Position, preferred: isize) {
    pos.row = 0;
    pos.col = clamp_to_row(grid, pos.row, preferred);
}

/// Middle row is `row_count / 2`; the whole grid counts as the screen.
pub fn screen_middle(grid: &Grid, pos: &mut Position, preferred: isize) {
    pos.row = (grid.row_count() / 2) as isize;
    pos.col = clamp_to_row(grid, pos.row, preferred);
}

pub fn screen_bottom(grid: &Grid, pos: &mut Position, preferred: isize) {
    pos.row = grid.last_row() as isize;
    pos.col = clamp_to_row(grid, pos.row, preferred);
}

pub fn line_start(_grid: &Grid, pos: &mut Position) {
    pos.col = 0;
}

/// Move to the last character of the row (column 0 on a zero-length row).
pub fn line_end(grid: &Grid, pos: &mut Position) {
    let len = if pos.row < 0 {
        0
    } else {
        grid.row_len(pos.row as usize)
    };
    pos.col = len.saturating_sub(1) as isize;
}

/// First non-Space character of the row, or 0 when the row is blank.
pub fn first_non_blank(grid: &Grid, pos: &mut Position) {
    let idx = row_of(grid, *pos).and_then(|r| r.iter().position(|&c| !is_space(c)));
    pos.col = idx.unwrap_or(0) as isize;
}

/// Last non-Space character of the row, or 0 when the row is blank.
pub fn last_non_blank(grid: &Grid, pos: &mut Position) {
    let idx = row_of(grid, *pos).and_then(|r| r.iter().rposition(|&c| !is_space(c)));
    pos.col = idx.unwrap_or(0) as isize;
}

fn row_of(grid: &Grid, pos: Position) -> Option<&[char]> {
    if pos.row < 0 {
        return None;
    }
    grid.row(pos.row as usize)
}

pub fn file_start(_grid: &Grid, pos: &mut Position) {
    *pos = Position::origin();
}

pub fn file_end(grid: &Grid, pos: &mut Position) {
    *pos = Position::at(grid.last_row(), 0);
}

/// Move forward to the start of the next word (`w`) or WORD (`W`).
///
/// Skips the rest of the run under the cursor, then any Space, crossing rows when the
/// current one is exhausted. Clamps to the last valid position at the end of the grid,
/// where repeated application is a fixed point.
pub fn word_forward(grid: &Grid, pos: &mut Position, kind: WordKind) {
    let Some((row, mut col)) = scan_origin(grid, *pos) else {
        return;
    };
    if let Some(c) = grid.char_at(row, col) {
        let anchor = classify(c);
        if anchor != CharClass::Space {
            while let Some(c) = grid.char_at(row, col) {
                if !kind.continues(anchor, c) {
                    break;
                }
                col += 1;
            }
        }
    }
    *pos = next_non_space(grid, (row, col)).map_or_else(|| end_of_grid(grid), to_position);
}

/// Move backward to the start of the current or previous word (`b`) or WORD (`B`).
///
/// Steps back one cell (onto the previous row's last character when crossing), skips
/// Space backward, then walks to the start of the run. Returns (0,0) when the start of
/// the grid is reached first.
pub fn word_backward(grid: &Grid, pos: &mut Position, kind: WordKind) {
    let Some(origin) = scan_origin(grid, *pos) else {
        return;
    };
    let mut cell = match prev_cell(grid, origin) {
        Some(cell) => cell,
        None => {
            *pos = Position::origin();
            return;
        }
    };
    while grid.char_at(cell.0, cell.1).is_some_and(is_space) {
        match prev_cell(grid, cell) {
            Some(prev) => cell = prev,
            None => {
                *pos = Position::origin();
                return;
            }
        }
    }
    let (row, mut col) = cell;
    if let (Some(line), Some(c)) = (grid.row(row), grid.char_at(row, col)) {
        let anchor = classify(c);
        while col > 0 && kind.continues(anchor, line[col - 1]) {
            col -= 1;
        }
    }
    *pos = Position::at(row, col);
}

/// Move to the end of the next word (`e`) or WORD (`E`).
///
/// From a non-Space character the rest of the current run is skipped first, so the
/// motion always advances to a later run. Clamps to the last valid position.
pub fn word_end(grid: &Grid, pos: &mut Position, kind: WordKind) {
    let Some((row, mut col)) = scan_origin(grid, *pos) else {
        return;
    };
    if let Some(c) = grid.char_at(row, col) {
        let anchor = classify(c);
        if anchor != CharClass::Space {
            while grid.char_at(row, col).is_some_and(|c| kind.continues(anchor, c)) {
                col += 1;
            }
        }
    }
    let Some((row, mut col)) = next_non_space(grid, (row, col)) else {
        *pos = end_of_grid(grid);
        return;
    };
    if let (Some(line), Some(c)) = (grid.row(row), grid.char_at(row, col)) {
        let anchor = classify(c);
        while col + 1 < line.len() && kind.continues(anchor, line[col + 1]) {
            col += 1;
        }
    }
    *pos = Position::at(row, col);
}

/// `{`: land on the first row of the previous paragraph, column 0.
///
/// Steps to the row above, skips the non-blank rows of the current paragraph, skips
/// the blank run above it and then walks up to the top of the paragraph found.
pub fn paragraph_backward(grid: &Grid, pos: &mut Position) {
    let start = pos.row.clamp(0, grid.row_count() as isize);
    let blank = |r: isize| grid.is_blank_row(r as usize);
    let mut r = start - 1;
    while r >= 0 && !blank(r) {
        r -= 1;
    }
    while r >= 0 && blank(r) {
        r -= 1;
    }
    if r < 0 {
        *pos = Position::origin();
        return;
    }
    while r > 0 && !blank(r - 1) {
        r -= 1;
    }
    *pos = Position::new(r, 0);
}

/// `}`: land on the first row of the next paragraph, column 0; the last row when none.
pub fn paragraph_forward(grid: &Grid, pos: &mut Position) {
    let count = grid.row_count();
    let mut r = (pos.row.max(-1) + 1) as usize;
    while r < count && !grid.is_blank_row(r) {
        r += 1;
    }
    while r < count && grid.is_blank_row(r) {
        r += 1;
    }
    *pos = Position::at(r.min(grid.last_row()), 0);
}

/// `)`: start of the next sentence.
///
/// Scans from the cursor for a terminator, then lands on the first non-Space cell after
/// it (crossing rows). Without a further sentence the last character of the grid is used.
pub fn sentence_forward(grid: &Grid, pos: &mut Position) {
    let Some((mut row, mut col)) = scan_origin(grid, *pos) else {
        return;
    };
    while let Some(line) = grid.row(row) {
        if let Some(offset) = line.iter().skip(col).position(|&c| is_sentence_end(c)) {
            let terminator = col + offset;
            match next_non_space(grid, (row, terminator + 1)) {
                Some(start) => *pos = to_position(start),
                None => *pos = end_of_grid(grid),
            }
            return;
        }
        row += 1;
        col = 0;
    }
    *pos = end_of_grid(grid);
}

/// `(`: start of the closest sentence strictly before the cursor, or (0,0).
///
/// A sentence start is the first non-Space cell after a terminator. Terminators whose
/// following sentence starts at or after the cursor are passed over.
pub fn sentence_backward(grid: &Grid, pos: &mut Position) {
    let Some(origin) = scan_origin(grid, *pos) else {
        return;
    };
    let mut cursor = prev_cell(grid, origin);
    while let Some((row, col)) = cursor {
        if grid.char_at(row, col).is_some_and(is_sentence_end)
            && let Some(start) = next_non_space(grid, (row, col + 1))
            && start < origin
        {
            *pos = to_position(start);
            return;
        }
        cursor = prev_cell(grid, (row, col));
    }
    *pos = Position::origin();
}

/// Locate `target` on the cursor's row, starting one cell past the cursor.
fn search_row(grid: &Grid, pos: Position, target: char, dir: SearchDirection) -> Option<usize> {
    let line = row_of(grid, pos)?;
    match dir {
        SearchDirection::Forward => {
            let from = (pos.col + 1).max(0) as usize;
            line.iter()
                .skip(from)
                .position(|&c| c == target)
                .map(|off| from + off)
        }
        SearchDirection::Backward => {
            if pos.col <= 0 {
                return None;
            }
            let end = (pos.col as usize).min(line.len());
            line[..end].iter().rposition(|&c| c == target)
        }
    }
}

/// `f`/`F`: jump onto the next occurrence of `target` on the current row.
///
/// Returns false, leaving the position untouched, when there is no match.
pub fn find_char(grid: &Grid, pos: &mut Position, target: char, dir: SearchDirection) -> bool {
    match search_row(grid, *pos, target, dir) {
        Some(col) => {
            pos.col = col as isize;
            true
        }
        None => false,
    }
}

/// `t`/`T`: stop one cell short of the next occurrence of `target` on the current row.
pub fn till_char(grid: &Grid, pos: &mut Position, target: char, dir: SearchDirection) -> bool {
    match search_row(grid, *pos, target, dir) {
        Some(col) => {
            pos.col = match dir {
                SearchDirection::Forward => col as isize - 1,
                SearchDirection::Backward => col as isize + 1,
            };
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows.iter().copied())
    }

    fn apply(g: &Grid, row: isize, col: isize, f: impl Fn(&Grid, &mut Position)) -> (isize, isize) {
        let mut pos = Position::new(row, col);
        f(g, &mut pos);
        (pos.row, pos.col)
    }

    #[test]
    fn horizontal_steps_can_leave_the_row() {
        let g = grid(&["abc"]);
        assert_eq!(apply(&g, 0, 0, left), (0, -1));
        assert_eq!(apply(&g, 0, 2, right), (0, 3));
        assert_eq!(apply(&g, 0, 1, right), (0, 2));
    }

    #[test]
    fn vertical_clamps_toward_preferred_column() {
        let g = grid(&["long line here", "ab", "", "another long line"]);
        let mut pos = Position::new(0, 5);
        down(&g, &mut pos, 5);
        assert_eq!(pos, Position::new(1, 1));
        down(&g, &mut pos, 5);
        assert_eq!(pos, Position::new(2, 0));
        assert!(!g.contains(pos), "zero-length row is never a landing cell");
        down(&g, &mut pos, 5);
        assert_eq!(pos, Position::new(3, 5));
        up(&g, &mut pos, -3);
        assert_eq!(pos.col, 0);
    }

    #[test]
    fn vertical_out_of_grid_keeps_preferred_column() {
        let g = grid(&["abc", "de"]);
        let mut pos = Position::new(0, 1);
        up(&g, &mut pos, 7);
        assert_eq!(pos, Position::new(-1, 7));
        let mut pos = Position::new(1, 1);
        down(&g, &mut pos, 1);
        assert_eq!(pos, Position::new(2, 1));
    }

    #[test]
    fn screen_rows() {
        let g = grid(&["aaaa", "bb", "cccc", "d", "eeeee"]);
        assert_eq!(apply(&g, 3, 0, |g, p| screen_top(g, p, 3)), (0, 3));
        assert_eq!(apply(&g, 0, 0, |g, p| screen_middle(g, p, 3)), (2, 3));
        assert_eq!(apply(&g, 0, 0, |g, p| screen_bottom(g, p, 9)), (4, 4));
        let even = grid(&["a", "b", "c", "d"]);
        assert_eq!(apply(&even, 0, 0, |g, p| screen_middle(g, p, 0)), (2, 0));
    }

    #[test]
    fn line_and_blank_jumps() {
        let g = grid(&["  foo bar  ", "", "   "]);
        assert_eq!(apply(&g, 0, 4, line_start), (0, 0));
        assert_eq!(apply(&g, 0, 0, line_end), (0, 10));
        assert_eq!(apply(&g, 0, 0, first_non_blank), (0, 2));
        assert_eq!(apply(&g, 0, 0, last_non_blank), (0, 8));
        assert_eq!(apply(&g, 1, 0, line_end), (1, 0));
        assert_eq!(apply(&g, 1, 0, first_non_blank), (1, 0));
        assert_eq!(apply(&g, 2, 1, last_non_blank), (2, 0));
    }

    #[test]
    fn file_jumps() {
        let g = grid(&["abc", "def", "  g"]);
        assert_eq!(apply(&g, 1, 2, file_start), (0, 0));
        assert_eq!(apply(&g, 0, 2, file_end), (2, 0));
    }

    #[test]
    fn word_forward_crosses_empty_rows() {
        let g = grid(&["ab cd", "", "ef"]);
        let w = |g: &Grid, p: &mut Position| word_forward(g, p, WordKind::Word);
        assert_eq!(apply(&g, 0, 0, w), (0, 3));
        assert_eq!(apply(&g, 0, 3, w), (2, 0));
    }

    #[test]
    fn word_forward_distinguishes_punct_runs() {
        let g = grid(&["foo->bar baz"]);
        let w = |g: &Grid, p: &mut Position| word_forward(g, p, WordKind::Word);
        let big = |g: &Grid, p: &mut Position| word_forward(g, p, WordKind::BigWord);
        assert_eq!(apply(&g, 0, 0, w), (0, 3));
        assert_eq!(apply(&g, 0, 3, w), (0, 5));
        assert_eq!(apply(&g, 0, 5, w), (0, 9));
        assert_eq!(apply(&g, 0, 0, big), (0, 9));
    }

    #[test]
    fn word_forward_skips_leading_space_of_next_row() {
        let g = grid(&["alpha", "    beta"]);
        let w = |g: &Grid, p: &mut Position| word_forward(g, p, WordKind::Word);
        assert_eq!(apply(&g, 0, 2, w), (1, 4));
    }

    #[test]
    fn word_forward_clamps_at_end_of_grid() {
        let g = grid(&["one two", ""]);
        let w = |g: &Grid, p: &mut Position| word_forward(g, p, WordKind::Word);
        assert_eq!(apply(&g, 0, 4, w), (0, 6));
        assert_eq!(apply(&g, 0, 6, w), (0, 6));
    }

    #[test]
    fn word_backward_basic_and_punct() {
        let g = grid(&["foo, bar baz", "qux!! zip"]);
        let b = |g: &Grid, p: &mut Position| word_backward(g, p, WordKind::Word);
        assert_eq!(apply(&g, 1, 0, b), (0, 9));
        assert_eq!(apply(&g, 0, 9, b), (0, 5));
        assert_eq!(apply(&g, 0, 5, b), (0, 3));
        assert_eq!(apply(&g, 0, 3, b), (0, 0));
        assert_eq!(apply(&g, 1, 6, b), (1, 3));
        assert_eq!(apply(&g, 1, 3, b), (1, 0));
    }

    #[test]
    fn word_backward_big_word_only_stops_on_space() {
        let g = grid(&["foo->bar baz"]);
        let big = |g: &Grid, p: &mut Position| word_backward(g, p, WordKind::BigWord);
        assert_eq!(apply(&g, 0, 9, big), (0, 0));
        assert_eq!(apply(&g, 0, 7, big), (0, 0));
    }

    #[test]
    fn word_backward_crosses_blank_rows_and_stops_at_origin() {
        let g = grid(&["  alpha", "", "   ", "beta"]);
        let b = |g: &Grid, p: &mut Position| word_backward(g, p, WordKind::Word);
        assert_eq!(apply(&g, 3, 0, b), (0, 2));
        assert_eq!(apply(&g, 0, 2, b), (0, 0));
        assert_eq!(apply(&g, 0, 0, b), (0, 0));
    }

    #[test]
    fn word_end_advances_to_next_run_end() {
        let g = grid(&["hello world", "  foo.bar"]);
        let e = |g: &Grid, p: &mut Position| word_end(g, p, WordKind::Word);
        let big = |g: &Grid, p: &mut Position| word_end(g, p, WordKind::BigWord);
        assert_eq!(apply(&g, 0, 0, e), (0, 10));
        assert_eq!(apply(&g, 0, 5, e), (0, 10));
        assert_eq!(apply(&g, 0, 10, e), (1, 4));
        assert_eq!(apply(&g, 1, 4, e), (1, 5));
        assert_eq!(apply(&g, 0, 10, big), (1, 8));
    }

    #[test]
    fn word_end_clamps_at_end_of_grid() {
        let g = grid(&["ab cd"]);
        let e = |g: &Grid, p: &mut Position| word_end(g, p, WordKind::Word);
        assert_eq!(apply(&g, 0, 4, e), (0, 4));
        assert_eq!(apply(&g, 0, 3, e), (0, 4));
    }

    #[test]
    fn paragraph_jumps() {
        let g = grid(&["a", "b", "", "  ", "c", "d", "", "e"]);
        assert_eq!(apply(&g, 5, 0, paragraph_backward), (0, 0));
        assert_eq!(apply(&g, 7, 0, paragraph_backward), (4, 0));
        assert_eq!(apply(&g, 4, 0, paragraph_backward), (0, 0));
        assert_eq!(apply(&g, 0, 0, paragraph_forward), (4, 0));
        assert_eq!(apply(&g, 4, 0, paragraph_forward), (7, 0));
        assert_eq!(apply(&g, 7, 0, paragraph_forward), (7, 0));
    }

    #[test]
    fn paragraph_forward_clamps_to_last_row() {
        let g = grid(&["a", "b", ""]);
        assert_eq!(apply(&g, 0, 0, paragraph_forward), (2, 0));
    }

    #[test]
    fn sentence_forward_skips_blank_rows() {
        let g = grid(&["line one.", "", "line two."]);
        assert_eq!(apply(&g, 0, 0, sentence_forward), (2, 0));
        assert_eq!(apply(&g, 2, 0, sentence_forward), (2, 8));
    }

    #[test]
    fn sentence_forward_within_row() {
        let g = grid(&["One. Two! Three? End"]);
        assert_eq!(apply(&g, 0, 0, sentence_forward), (0, 5));
        assert_eq!(apply(&g, 0, 5, sentence_forward), (0, 10));
        assert_eq!(apply(&g, 0, 10, sentence_forward), (0, 17));
        assert_eq!(apply(&g, 0, 17, sentence_forward), (0, 19));
    }

    #[test]
    fn sentence_backward_finds_previous_start() {
        let g = grid(&["One. Two. Three."]);
        assert_eq!(apply(&g, 0, 10, sentence_backward), (0, 5));
        assert_eq!(apply(&g, 0, 12, sentence_backward), (0, 10));
        assert_eq!(apply(&g, 0, 5, sentence_backward), (0, 0));
        assert_eq!(apply(&g, 0, 0, sentence_backward), (0, 0));
    }

    #[test]
    fn sentence_backward_across_rows() {
        let g = grid(&["First.", "", "  Second one.", "Third"]);
        assert_eq!(apply(&g, 3, 3, sentence_backward), (3, 0));
        assert_eq!(apply(&g, 3, 0, sentence_backward), (2, 2));
    }

    #[test]
    fn find_and_till() {
        let g = grid(&["abcabc"]);
        let f = |g: &Grid, p: &mut Position| {
            find_char(g, p, 'c', SearchDirection::Forward);
        };
        assert_eq!(apply(&g, 0, 0, f), (0, 2));
        assert_eq!(apply(&g, 0, 2, f), (0, 5));
        let mut pos = Position::new(0, 5);
        assert!(!find_char(&g, &mut pos, 'c', SearchDirection::Forward));
        assert_eq!(pos, Position::new(0, 5));

        let mut pos = Position::new(0, 5);
        assert!(find_char(&g, &mut pos, 'a', SearchDirection::Backward));
        assert_eq!(pos, Position::new(0, 3));

        let mut pos = Position::new(0, 0);
        assert!(till_char(&g, &mut pos, 'c', SearchDirection::Forward));
        assert_eq!(pos, Position::new(0, 1));
        let mut pos = Position::new(0, 5);
        assert!(till_char(&g, &mut pos, 'a', SearchDirection::Backward));
        assert_eq!(pos, Position::new(0, 4));
    }

    #[test]
    fn search_never_leaves_the_row() {
        let g = grid(&["ab", "cx"]);
        let mut pos = Position::new(0, 0);
        assert!(!find_char(&g, &mut pos, 'x', SearchDirection::Forward));
        assert_eq!(pos, Position::new(0, 0));
        let mut pos = Position::new(1, 0);
        assert!(!till_char(&g, &mut pos, 'a', SearchDirection::Backward));
        assert_eq!(pos, Position::new(1, 0));
    }

    #[test]
    fn till_adjacent_match_does_not_move() {
        let g = grid(&["a,b"]);
        let mut pos = Position::new(0, 0);
        assert!(till_char(&g, &mut pos, ',', SearchDirection::Forward));
        assert_eq!(pos, Position::new(0, 0));
    }
}
