use serde::{Deserialize, Serialize};

use crate::*;

/// What happened to a cell, as reported to the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Safe cell revealed with its label.
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
    /// Any other mine shown after a loss.
    MineShown,
    Flagged,
    Unflagged,
    /// Chord hint set on a hidden neighbor.
    Pressed,
    /// Chord hint cleared.
    Unpressed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub kind: ChangeKind,
}

impl CellChange {
    pub const fn new(coords: Coord2, kind: ChangeKind) -> Self {
        Self { coords, kind }
    }

    /// Whether the change moved the cell out of `Hidden`/`Flagged` for good.
    pub const fn is_reveal(&self) -> bool {
        matches!(
            self.kind,
            ChangeKind::Revealed(_) | ChangeKind::Exploded | ChangeKind::MineShown
        )
    }
}
