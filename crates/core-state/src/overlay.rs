//! Per-cell tag layer for the game board.
//!
//! The overlay mirrors the grid's shape (ragged rows included) and tags each cell
//! as empty, the occupant (the cursor's token) or the collectible pearl. It never
//! looks at the characters underneath. At most one occupant and one collectible
//! exist at any time; both are tracked alongside the tag rows so lookups stay O(1).

use core_text::{Grid, Position};
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellTag {
    #[default]
    Empty,
    Occupant,
    Collectible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    cells: Vec<Vec<CellTag>>,
    occupant: Option<Position>,
    collectible: Option<Position>,
}

impl Overlay {
    /// All-empty overlay shaped like `grid`.
    pub fn empty(grid: &Grid) -> Self {
        Self {
            cells: grid.rows().map(|r| vec![CellTag::Empty; r.len()]).collect(),
            occupant: None,
            collectible: None,
        }
    }

    /// Overlay for a fresh game: occupant at (0,0) when that cell exists.
    pub fn new(grid: &Grid) -> Self {
        let mut overlay = Self::empty(grid);
        overlay.move_occupant(Position::origin());
        overlay
    }

    fn cell(&self, pos: Position) -> Option<&CellTag> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        self.cells.get(pos.row as usize)?.get(pos.col as usize)
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut CellTag> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        self.cells.get_mut(pos.row as usize)?.get_mut(pos.col as usize)
    }

    /// Tag at `pos`, or `None` outside the board.
    pub fn tag(&self, pos: Position) -> Option<CellTag> {
        self.cell(pos).copied()
    }

    pub fn occupant(&self) -> Option<Position> {
        self.occupant
    }

    pub fn collectible(&self) -> Option<Position> {
        self.collectible
    }

    pub fn has_collectible_at(&self, pos: Position) -> bool {
        self.collectible == Some(pos)
    }

    /// Move the occupant onto `to`, overwriting whatever was tagged there.
    ///
    /// Returns `Some(true)` when a collectible was picked up, `Some(false)` for a plain
    /// move and `None` (no change) when `to` is off the board.
    pub fn move_occupant(&mut self, to: Position) -> Option<bool> {
        let previous = *self.cell(to)?;
        if let Some(from) = self.occupant.take()
            && let Some(cell) = self.cell_mut(from)
        {
            *cell = CellTag::Empty;
        }
        if let Some(cell) = self.cell_mut(to) {
            *cell = CellTag::Occupant;
        }
        self.occupant = Some(to);
        let picked = previous == CellTag::Collectible;
        if picked {
            self.collectible = None;
        }
        Some(picked)
    }

    /// Every Empty cell except `exclude`, in row-major order.
    pub fn empty_cells(&self, exclude: Position) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, tag)| **tag == CellTag::Empty)
                    .map(move |(c, _)| Position::at(r, c))
            })
            .filter(|&pos| pos != exclude)
            .collect()
    }

    fn set_collectible(&mut self, pos: Position) {
        if let Some(old) = self.collectible.take()
            && let Some(cell) = self.cell_mut(old)
            && *cell == CellTag::Collectible
        {
            *cell = CellTag::Empty;
        }
        if let Some(cell) = self.cell_mut(pos) {
            *cell = CellTag::Collectible;
            self.collectible = Some(pos);
        }
    }
}

/// Tag one uniformly chosen Empty cell (other than the excluded one) as the collectible.
///
/// Returns the chosen cell, or `None` when no candidate exists; the overlay is left
/// without a collectible in that case. A collectible already on the board is replaced.
pub fn place_collectible<R: Rng + ?Sized>(
    overlay: &mut Overlay,
    rng: &mut R,
    exclude_row: isize,
    exclude_col: isize,
) -> Option<Position> {
    let candidates = overlay.empty_cells(Position::new(exclude_row, exclude_col));
    let Some(&chosen) = candidates.choose(rng) else {
        tracing::debug!(
            target: "state.overlay",
            exclude_row,
            exclude_col,
            "no_collectible_placement"
        );
        return None;
    };
    overlay.set_collectible(chosen);
    tracing::trace!(
        target: "state.overlay",
        row = chosen.row,
        col = chosen.col,
        candidates = candidates.len(),
        "collectible_placed"
    );
    Some(chosen)
}
