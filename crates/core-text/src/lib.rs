//! Ragged character grid abstraction.
//!
//! A `Grid` is an immutable, row-major sequence of rows where every row holds single
//! Unicode scalar values. Rows are independently sized and may be empty. No motion
//! logic lives here; `motion` builds on the bounds queries below.

use std::fmt;

pub mod classify;
pub mod motion;

pub use classify::{CharClass, classify, is_sentence_end};

/// A cell coordinate (row, column).
///
/// Coordinates are signed so that a motion can report a landing spot outside the grid
/// (e.g. column `-1` after moving left from column 0). Use `Grid::contains` before
/// indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub row: isize,
    pub col: isize,
}

impl Position {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Construct from unsigned indices (always in the non-negative quadrant).
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row: row as isize,
            col: col as isize,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable ragged grid of characters. Always holds at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: vec![Vec::new()],
        }
    }
}

impl Grid {
    /// Build a grid from pre-split rows. An empty input yields a single empty row.
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        let rows: Vec<Vec<char>> = rows
            .into_iter()
            .map(|r| r.as_ref().chars().collect())
            .collect();
        if rows.is_empty() {
            return Self::default();
        }
        Self { rows }
    }

    /// Build a grid from text, splitting on `\n` and preserving all other whitespace.
    /// A `\r` immediately before the newline is dropped.
    pub fn from_text(text: &str) -> Self {
        Self::from_rows(text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the last row (grids are never empty).
    pub fn last_row(&self) -> usize {
        self.rows.len() - 1
    }

    /// Length of a row in characters; 0 for rows outside the grid.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True iff `0 <= row < row_count` and `0 <= col < row_len(row)`.
    /// Always false on a zero-length row.
    pub fn is_valid_position(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        (col as usize) < self.row_len(row as usize)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.is_valid_position(pos.row, pos.col)
    }

    /// A row is blank when it is empty or made only of Space-class characters.
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.row(row)
            .is_none_or(|r| r.iter().all(|&c| classify(c) == CharClass::Space))
    }

    /// Last character of the last non-empty row, if any row has content.
    pub fn last_cell(&self) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .rev()
            .find(|(_, r)| !r.is_empty())
            .map(|(idx, r)| (idx, r.len() - 1))
    }

    /// Total number of cells across all rows.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
