//! Rule engine for grid-based mine-detection puzzles.
//!
//! The [`Board`] owns the grid, the mine layout and the per-cell labels, and
//! exposes a coordinate-based command surface (reveal, flag, chord, auto-flag)
//! plus queries a presentation layer uses to decide what to draw. Commands are
//! total: misuse is a no-op reported as a `NoChange` outcome, never an error.
#![no_std]

extern crate alloc;

use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use adjacency::*;
pub use change::*;
pub use chord::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod adjacency;
mod change;
mod chord;
mod engine;
mod error;
mod generator;
mod tile;
mod types;
mod view;

/// Board dimensions and requested mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps both dimensions to at least one and the mine count so that at
    /// least one safe cell remains.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mines = mines.min(max_mines((rows, cols)));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Re-applies the clamping of [`BoardConfig::new`], used on configs that
    /// were deserialized or built with `new_unchecked`.
    pub fn normalized(self) -> Self {
        Self::new(self.size, self.mines)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Largest mine count a board of `size` can hold while keeping a safe cell.
pub const fn max_mines(size: Coord2) -> CellCount {
    mult(size.0, size.1).saturating_sub(1)
}

/// Mine positions and the adjacency labels derived from them.
///
/// Both are fixed at construction, the mask is the single source of truth for
/// which cells are mines. Only the mask is serialized, labels are rebuilt on
/// load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    labels: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Rejects empty masks and masks wider or taller than `Coord::MAX`.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GameError::InvalidBoardShape);
        }
        let total = mine_mask.len();
        let mines = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        if mines >= total {
            return Err(GameError::TooManyMines);
        }
        let mine_count = mines.try_into().map_err(|_| GameError::TooManyMines)?;
        Ok(Self::new_unchecked(mine_mask, mine_count))
    }

    /// Caller guarantees `mine_count` matches the mask and leaves a safe cell.
    pub(crate) fn new_unchecked(mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        let labels = compute_adjacency(&mine_mask);
        Self {
            mine_mask,
            labels,
            mine_count,
        }
    }

    /// Builds a layout from explicit coordinates, duplicates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidCoords);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// `false` for out-of-range coordinates.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.contains(coords) && self[coords]
    }

    /// Precomputed label of a safe cell, `None` for mines and out-of-range
    /// coordinates.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Option<u8> {
        (self.contains(coords) && !self[coords]).then(|| self.labels[coords.to_nd_index()])
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }

    pub fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    /// Label lookup without the mine check, `coords` must be in bounds.
    pub(crate) fn label(&self, coords: Coord2) -> u8 {
        self.labels[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl TryFrom<Array2<bool>> for MineLayout {
    type Error = GameError;

    fn try_from(mine_mask: Array2<bool>) -> Result<Self> {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }

    pub(crate) const fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::NoChange }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges outcomes of multi-cell reveals, a hit mine dominates.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
