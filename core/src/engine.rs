use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Neighbor coordinates of a single cell.
pub type Neighbors = SmallVec<[Coord2; 8]>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game worth of board state.
///
/// Mines and labels are fixed at construction, only cell states change
/// afterwards. A new game replaces the whole board.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    layout: MineLayout,
    cells: Array2<CellState>,
    pub(crate) chord: ChordGesture,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: BoardState,
    triggered_mine: Option<Coord2>,
    changes: Vec<CellChange>,
}

impl Board {
    /// Generates a fresh random board, `config` is clamped first.
    pub fn new<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Self {
        Self::from_layout(RandomMinefieldGenerator::new(rng).generate(config))
    }

    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::from_layout(RandomMinefieldGenerator::with_seed(seed).generate(config))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        log::debug!(
            "New {}x{} board with {} mines",
            size.0,
            size.1,
            layout.mine_count()
        );
        Self {
            layout,
            cells: Array2::default(size.to_nd_index()),
            chord: ChordGesture::Idle,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: BoardState::Ready,
            triggered_mine: None,
            changes: Vec::new(),
        }
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    /// Mines minus placed flags, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_state(&self, coords: Coord2) -> Option<CellState> {
        self.layout
            .contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> Option<u8> {
        self.layout.adjacent_mine_count(coords)
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.layout.contains_mine(coords)
    }

    /// What a player may see at `coords`, without leaking hidden mines.
    pub fn cell_at(&self, coords: Coord2) -> Option<VisibleCell> {
        let state = self.cell_state(coords)?;
        Some(match state {
            CellState::Hidden => VisibleCell::Hidden,
            CellState::Flagged => VisibleCell::Flagged,
            CellState::Revealed if self.triggered_mine == Some(coords) => {
                VisibleCell::ExplodedMine
            }
            CellState::Revealed if self.layout[coords] => VisibleCell::Mine,
            CellState::Revealed => VisibleCell::Revealed(self.layout.label(coords)),
        })
    }

    /// Every safe cell is revealed and no mine is.
    pub fn is_solved(&self) -> bool {
        self.triggered_mine.is_none()
            && self.revealed_count == Saturating(self.layout.safe_cell_count())
    }

    /// Drains pending cell changes in the order they happened.
    pub fn take_changes(&mut self) -> Vec<CellChange> {
        core::mem::take(&mut self.changes)
    }

    pub fn pending_changes(&self) -> &[CellChange] {
        &self.changes
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use CellState::*;

        if self.is_finished() || !self.layout.contains(coords) {
            return MarkOutcome::NoChange;
        }

        match self.cells[coords.to_nd_index()] {
            Hidden => {
                self.set_flagged(coords);
                MarkOutcome::Changed
            }
            Flagged => {
                self.cells[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                self.push_change(coords, ChangeKind::Unflagged);
                MarkOutcome::Changed
            }
            Revealed => MarkOutcome::NoChange,
        }
    }

    /// Flags every hidden neighbor of a revealed label when exactly that many
    /// hidden neighbors remain.
    pub fn auto_flag_neighbors(&mut self, coords: Coord2) -> MarkOutcome {
        if self.is_finished() {
            return MarkOutcome::NoChange;
        }
        let Some(label) = self.numbered_label(coords) else {
            return MarkOutcome::NoChange;
        };

        let hidden = self.hidden_neighbors(coords);
        if hidden.len() != usize::from(label) {
            return MarkOutcome::NoChange;
        }

        for &pos in &hidden {
            self.set_flagged(pos);
        }
        log::debug!("Auto-flagged {} neighbors of {:?}", hidden.len(), coords);
        MarkOutcome::from_changed(!hidden.is_empty())
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.is_finished() || !self.layout.contains(coords) {
            return RevealOutcome::NoChange;
        }
        self.reveal_cell(coords)
    }

    /// Reveals a hidden in-bounds cell, cascading over zero labels.
    ///
    /// Does not check whether the game already ended, chords rely on that to
    /// finish revealing their targets after a mine was hit.
    pub(crate) fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.cells[coords.to_nd_index()].is_hidden() {
            return RevealOutcome::NoChange;
        }

        if self.layout[coords] {
            self.explode(coords);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(coords);

        if self.is_solved() {
            self.end_game(true);
            RevealOutcome::Won
        } else {
            self.mark_started();
            RevealOutcome::Revealed
        }
    }

    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        // only safe cells get queued: the start was checked and neighbors of
        // a zero label are never mines
        while let Some(coords) = to_visit.pop_front() {
            if !self.cells[coords.to_nd_index()].is_hidden() {
                continue;
            }

            let label = self.layout.label(coords);
            self.cells[coords.to_nd_index()] = CellState::Revealed;
            self.revealed_count += 1;
            self.push_change(coords, ChangeKind::Revealed(label));
            log::trace!("Revealed {:?} with label {}", coords, label);

            if label == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    self.layout
                        .iter_neighbors(coords)
                        .filter(|&pos| cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }
    }

    /// Reveals the triggered mine and every other hidden mine.
    fn explode(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = CellState::Revealed;
        self.triggered_mine = Some(coords);
        self.push_change(coords, ChangeKind::Exploded);

        for pos in iter_coords(self.size()) {
            if self.layout[pos] && self.cells[pos.to_nd_index()].is_hidden() {
                self.cells[pos.to_nd_index()] = CellState::Revealed;
                self.push_change(pos, ChangeKind::MineShown);
            }
        }

        self.end_game(false);
    }

    fn set_flagged(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = CellState::Flagged;
        self.chord.release_cell(coords);
        self.flagged_count += 1;
        self.push_change(coords, ChangeKind::Flagged);
    }

    fn mark_started(&mut self) {
        if self.state.is_ready() {
            self.state = BoardState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        self.clear_pressed();
        log::debug!("Game ended: {:?}", self.state);
    }

    pub(crate) fn push_change(&mut self, coords: Coord2, kind: ChangeKind) {
        self.changes.push(CellChange::new(coords, kind));
    }

    /// Label of a revealed safe cell with at least one adjacent mine.
    pub(crate) fn numbered_label(&self, coords: Coord2) -> Option<u8> {
        match self.cell_at(coords)? {
            VisibleCell::Revealed(label) if label > 0 => Some(label),
            _ => None,
        }
    }

    pub(crate) fn is_hidden_at(&self, coords: Coord2) -> bool {
        self.cell_state(coords).is_some_and(CellState::is_hidden)
    }

    pub(crate) fn hidden_neighbors(&self, coords: Coord2) -> Neighbors {
        self.layout
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden())
            .collect()
    }

    pub(crate) fn count_flagged_neighbors(&self, coords: Coord2) -> usize {
        self.layout
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count()
    }
}
