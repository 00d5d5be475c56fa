use core::ops::BitOr;

use crate::*;

/// Press/release state of the chord gesture.
///
/// Only one chord can be held at a time. The held cells are a display hint
/// and never affect the rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ChordGesture {
    #[default]
    Idle,
    Pressed { anchor: Coord2, held: Neighbors },
}

impl ChordGesture {
    pub fn anchor(&self) -> Option<Coord2> {
        match self {
            Self::Idle => None,
            Self::Pressed { anchor, .. } => Some(*anchor),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Stops holding `coords`, leaving the rest of the chord pressed.
    pub(crate) fn release_cell(&mut self, coords: Coord2) {
        if let Self::Pressed { held, .. } = self {
            held.retain(|pos| *pos != coords);
        }
    }

    fn holds(&self, coords: Coord2) -> bool {
        match self {
            Self::Idle => false,
            Self::Pressed { held, .. } => held.contains(&coords),
        }
    }
}

impl Board {
    pub fn chord(&self) -> &ChordGesture {
        &self.chord
    }

    /// Whether `coords` should be drawn as held down by an active chord.
    pub fn is_pressed_for_display(&self, coords: Coord2) -> bool {
        self.chord.holds(coords) && self.is_hidden_at(coords)
    }

    /// Starts a chord on a revealed numbered cell, replacing any active one,
    /// and marks its hidden neighbors as pressed.
    pub fn chord_press(&mut self, coords: Coord2) -> MarkOutcome {
        if self.is_finished() || self.numbered_label(coords).is_none() {
            return MarkOutcome::NoChange;
        }

        let cleared = self.clear_pressed();
        let held = self.hidden_neighbors(coords);
        for &pos in &held {
            self.push_change(pos, ChangeKind::Pressed);
        }
        log::debug!("Chord pressed at {:?}, holding {} cells", coords, held.len());

        let pressed_any = !held.is_empty();
        self.chord = ChordGesture::Pressed {
            anchor: coords,
            held,
        };
        MarkOutcome::from_changed(cleared || pressed_any)
    }

    /// Drops the active chord without revealing anything.
    pub fn chord_cancel(&mut self) -> MarkOutcome {
        MarkOutcome::from_changed(self.clear_pressed())
    }

    /// Completes the chord anchored at `coords`.
    ///
    /// When at least as many neighbors are flagged as the label says, every
    /// hidden unflagged neighbor is revealed with the usual cascade. A release
    /// naming a different cell than the press only cancels.
    pub fn chord_release(&mut self, coords: Coord2) -> RevealOutcome {
        let anchor = self.chord.anchor();
        self.clear_pressed();

        if self.is_finished() {
            return RevealOutcome::NoChange;
        }
        if anchor != Some(coords) {
            log::debug!(
                "Chord released at {:?} but pressed at {:?}, cancelled",
                coords,
                anchor
            );
            return RevealOutcome::NoChange;
        }
        let Some(label) = self.numbered_label(coords) else {
            return RevealOutcome::NoChange;
        };
        if self.count_flagged_neighbors(coords) < usize::from(label) {
            return RevealOutcome::NoChange;
        }

        self.hidden_neighbors(coords)
            .into_iter()
            .map(|pos| self.reveal_cell(pos))
            .fold(RevealOutcome::NoChange, BitOr::bitor)
    }

    /// Returns to `Idle`, reporting whether any pressed marker was visible.
    pub(crate) fn clear_pressed(&mut self) -> bool {
        let ChordGesture::Pressed { held, .. } = core::mem::take(&mut self.chord) else {
            return false;
        };

        let mut cleared = false;
        for pos in held {
            if self.is_hidden_at(pos) {
                self.push_change(pos, ChangeKind::Unpressed);
                cleared = true;
            }
        }
        cleared
    }
}
