use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the presentation layer needs to draw the board in one pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub state: BoardState,
    pub cells: Array2<VisibleCell>,
    pub pressed: Array2<bool>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), VisibleCell::Hidden);
        let mut pressed = Array2::from_elem(size.to_nd_index(), false);

        for coords in iter_coords(size) {
            if let Some(cell) = board.cell_at(coords) {
                cells[coords.to_nd_index()] = cell;
            }
            pressed[coords.to_nd_index()] = board.is_pressed_for_display(coords);
        }

        Self {
            size,
            mine_count: board.total_mines(),
            state: board.state(),
            cells,
            pressed,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let expected = (usize::from(self.size.0), usize::from(self.size.1));
        if self.cells.dim() != expected || self.pressed.dim() != expected {
            return Err(GameError::InvalidBoardShape);
        }

        if self.mine_count > max_mines(self.size) {
            return Err(GameError::TooManyMines);
        }

        Ok(())
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<VisibleCell> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }
}
