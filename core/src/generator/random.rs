use hashbrown::HashSet;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Samples distinct mine coordinates uniformly, without replacement.
///
/// The count is clamped so at least one safe cell remains. Every draw picks a
/// random `(row, col)` and is discarded if that cell was already chosen.
pub fn place_mines<R: Rng + ?Sized>(
    (rows, cols): Coord2,
    requested: CellCount,
    rng: &mut R,
) -> HashSet<Coord2> {
    let target = requested.min(max_mines((rows, cols)));
    if target < requested {
        log::warn!(
            "Too many mines requested, placing {} instead of {} on a {}x{} board",
            target,
            requested,
            rows,
            cols
        );
    }

    let mut mines = HashSet::with_capacity(target.into());
    while mines.len() < usize::from(target) {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        if !mines.insert(coords) {
            log::trace!("Mine draw at {:?} rejected, already taken", coords);
        }
    }
    mines
}

/// Purely random placement with no guaranteed-safe start cell.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<R> {
    rng: R,
}

impl<R: Rng> RandomMinefieldGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomMinefieldGenerator<SmallRng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MinefieldGenerator for RandomMinefieldGenerator<R> {
    fn generate(mut self, config: BoardConfig) -> MineLayout {
        let config = config.normalized();
        let mines = place_mines(config.size, config.mines, &mut self.rng);

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &coords in &mines {
            mine_mask[coords.to_nd_index()] = true;
        }

        log::debug!(
            "Generated {}x{} minefield with {} mines",
            config.size.0,
            config.size.1,
            mines.len()
        );
        MineLayout::new_unchecked(mine_mask, config.mines)
    }
}
