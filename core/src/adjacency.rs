use ndarray::Array2;

use crate::*;

/// Counts mines among the Moore neighbors of `coords`.
pub fn count_adjacent_mines(mine_mask: &Array2<bool>, coords: Coord2) -> u8 {
    let count = mine_mask
        .iter_neighbors(coords)
        .filter(|&pos| mine_mask[pos.to_nd_index()])
        .count();
    // at most 8 neighbors
    count as u8
}

/// Derives the label of every cell from the mine mask.
///
/// Mine cells get no label and are left at zero. The result is a pure function
/// of the mask, so it is computed once when a [`MineLayout`] is built.
pub fn compute_adjacency(mine_mask: &Array2<bool>) -> Array2<u8> {
    let mut labels = Array2::zeros(mine_mask.raw_dim());
    for coords in iter_coords(grid_size(mine_mask)) {
        if !mine_mask[coords.to_nd_index()] {
            labels[coords.to_nd_index()] = count_adjacent_mines(mine_mask, coords);
        }
    }
    labels
}
