use serde::{Deserialize, Serialize};

/// Rule-level state of a single cell.
///
/// Transitions are limited to `Hidden -> Revealed`, `Hidden -> Flagged` and
/// `Flagged -> Hidden`. `Revealed` is terminal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// Player-visible rendition of a cell.
///
/// Mine information is only present once the cell has been revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    ExplodedMine,
}

impl VisibleCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::ExplodedMine)
    }
}
