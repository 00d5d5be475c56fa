//! Rule-level scenarios played through the public command surface.

use std::collections::{BTreeSet, VecDeque};

use minegrid_core::*;

const SIZE: Coord2 = (10, 10);

const MINES: [Coord2; 20] = [
    (0, 6),
    (0, 9),
    (1, 8),
    (2, 5),
    (2, 9),
    (3, 7),
    (4, 4),
    (4, 9),
    (5, 0),
    (5, 5),
    (6, 1),
    (6, 8),
    (7, 3),
    (7, 6),
    (8, 0),
    (8, 4),
    (8, 9),
    (9, 2),
    (9, 5),
    (9, 7),
];

fn board(size: Coord2, mines: &[Coord2]) -> Board {
    Board::from_layout(MineLayout::from_mine_coords(size, mines).unwrap())
}

fn brute_force_label(mines: &BTreeSet<Coord2>, (row, col): Coord2) -> u8 {
    let mut count = 0;
    for d_row in -1i16..=1 {
        for d_col in -1i16..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let (r, c) = (row as i16 + d_row, col as i16 + d_col);
            if r >= 0 && c >= 0 && mines.contains(&(r as u8, c as u8)) {
                count += 1;
            }
        }
    }
    count
}

/// Reference flood fill: the zero region around `start` plus its border.
fn reference_closure(size: Coord2, mines: &BTreeSet<Coord2>, start: Coord2) -> BTreeSet<Coord2> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if brute_force_label(mines, pos) != 0 {
            continue;
        }
        for next in NeighborIter::new(pos, size) {
            if !mines.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn revealed_cells(board: &Board) -> BTreeSet<Coord2> {
    iter_coords(board.size())
        .filter(|&pos| board.cell_state(pos) == Some(CellState::Revealed))
        .collect()
}

#[test]
fn labels_match_brute_force_count() {
    let board = board(SIZE, &MINES);
    let mines: BTreeSet<_> = MINES.into_iter().collect();

    assert_eq!(board.total_mines(), 20);
    for pos in iter_coords(SIZE) {
        if mines.contains(&pos) {
            assert!(board.is_mine(pos));
            assert_eq!(board.adjacent_mine_count(pos), None);
        } else {
            assert!(!board.is_mine(pos));
            assert_eq!(
                board.adjacent_mine_count(pos),
                Some(brute_force_label(&mines, pos))
            );
        }
    }
}

#[test]
fn zero_cell_reveals_exactly_its_flood_fill_closure() {
    let mut board = board(SIZE, &MINES);
    let mines: BTreeSet<_> = MINES.into_iter().collect();
    assert_eq!(board.adjacent_mine_count((0, 0)), Some(0));

    let expected = reference_closure(SIZE, &mines, (0, 0));
    let outcome = board.reveal((0, 0));

    assert_eq!(outcome, RevealOutcome::Revealed);
    assert!(expected.len() > 10);
    assert_eq!(revealed_cells(&board), expected);
    assert_eq!(usize::from(board.revealed_count()), expected.len());
}

#[test]
fn every_zero_cell_matches_reference_closure() {
    let mines: BTreeSet<_> = MINES.into_iter().collect();

    for start in iter_coords(SIZE) {
        if mines.contains(&start) || brute_force_label(&mines, start) != 0 {
            continue;
        }
        let mut board = board(SIZE, &MINES);
        board.reveal(start);
        assert_eq!(
            revealed_cells(&board),
            reference_closure(SIZE, &mines, start),
            "closure from {start:?}"
        );
    }
}

#[test]
fn revealing_a_mine_shows_every_mine_and_nothing_else() {
    let mut board = board(SIZE, &MINES);

    assert_eq!(board.reveal((4, 4)), RevealOutcome::HitMine);

    assert_eq!(board.cell_at((4, 4)), Some(VisibleCell::ExplodedMine));
    for &pos in MINES.iter().filter(|&&pos| pos != (4, 4)) {
        assert_eq!(board.cell_at(pos), Some(VisibleCell::Mine));
    }
    for pos in iter_coords(SIZE).filter(|pos| !MINES.contains(pos)) {
        assert_eq!(board.cell_state(pos), Some(CellState::Hidden));
    }
    assert_eq!(board.state(), BoardState::Lost);
    assert!(!board.is_solved());
}

#[test]
fn reveal_twice_is_same_as_once() {
    let mut once = board(SIZE, &MINES);
    once.reveal((0, 0));
    once.reveal((3, 3));

    let mut twice = once.clone();
    twice.reveal((0, 0));
    twice.reveal((3, 3));

    assert_eq!(once, twice);
}

#[test]
fn chord_release_reveals_only_the_unflagged_neighbor() {
    let mut board = board((2, 3), &[(0, 0), (0, 2)]);
    board.reveal((1, 0));
    board.reveal((1, 2));
    board.reveal((1, 1));
    assert_eq!(board.cell_at((1, 1)), Some(VisibleCell::Revealed(2)));
    board.toggle_flag((0, 0));
    board.toggle_flag((0, 2));
    board.take_changes();

    assert_eq!(board.chord_press((1, 1)), MarkOutcome::Changed);
    assert!(board.is_pressed_for_display((0, 1)));
    let outcome = board.chord_release((1, 1));

    assert_eq!(outcome, RevealOutcome::Won);
    let reveals: Vec<_> = board
        .take_changes()
        .into_iter()
        .filter(CellChange::is_reveal)
        .collect();
    assert_eq!(
        reveals,
        [CellChange::new((0, 1), ChangeKind::Revealed(2))]
    );
    assert_eq!(board.cell_state((0, 0)), Some(CellState::Flagged));
    assert_eq!(board.cell_state((0, 2)), Some(CellState::Flagged));
    assert!(board.is_solved());
}

#[test]
fn chord_cancel_never_changes_cell_states() {
    let mut board = board(SIZE, &MINES);
    board.reveal((0, 0));
    let anchor = iter_coords(SIZE)
        .find(|&pos| matches!(board.cell_at(pos), Some(VisibleCell::Revealed(n)) if n > 0))
        .unwrap();
    let before: Vec<_> = iter_coords(SIZE).map(|pos| board.cell_state(pos)).collect();

    board.chord_press(anchor);
    board.chord_cancel();

    let after: Vec<_> = iter_coords(SIZE).map(|pos| board.cell_state(pos)).collect();
    assert_eq!(before, after);
    assert!(iter_coords(SIZE).all(|pos| !board.is_pressed_for_display(pos)));
}

#[test]
fn auto_flag_needs_exactly_label_hidden_neighbors() {
    let mut board = board((1, 6), &[(0, 0), (0, 4)]);
    board.reveal((0, 1));

    // (0, 0) and (0, 2) are both hidden around a 1
    assert_eq!(board.auto_flag_neighbors((0, 1)), MarkOutcome::NoChange);
    assert_eq!(board.flagged_count(), 0);

    board.reveal((0, 2));
    assert_eq!(board.state(), BoardState::Active);
    assert_eq!(board.auto_flag_neighbors((0, 1)), MarkOutcome::Changed);
    assert_eq!(board.cell_state((0, 0)), Some(CellState::Flagged));
    assert_eq!(board.mines_left(), 1);
}

#[test]
fn solved_only_when_every_safe_cell_is_revealed() {
    let mut board = board((2, 2), &[(0, 0)]);

    assert!(!board.is_solved());
    board.reveal((0, 1));
    board.reveal((1, 0));
    assert!(!board.is_solved());
    assert_eq!(board.reveal((1, 1)), RevealOutcome::Won);
    assert!(board.is_solved());
    assert_eq!(board.state(), BoardState::Won);
}

#[test]
fn out_of_range_commands_are_no_ops() {
    let mut board = board(SIZE, &MINES);
    let before = board.clone();

    assert_eq!(board.reveal((10, 0)), RevealOutcome::NoChange);
    assert_eq!(board.toggle_flag((0, 10)), MarkOutcome::NoChange);
    assert_eq!(board.auto_flag_neighbors((200, 3)), MarkOutcome::NoChange);
    assert_eq!(board.chord_press((10, 10)), MarkOutcome::NoChange);
    assert_eq!(board.chord_release((10, 10)), RevealOutcome::NoChange);
    assert_eq!(board.cell_state((10, 10)), None);
    assert_eq!(board.cell_at((10, 10)), None);
    assert!(!board.is_pressed_for_display((10, 10)));

    assert_eq!(board, before);
}
