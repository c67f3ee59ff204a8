//! Single-board state machine behavior through the public facade.

use duotris::core::Simulation;
use duotris::types::{GameAction, PieceKind, RotationMode};

fn sim(mode: RotationMode) -> Simulation {
    let mut s = Simulation::new(mode, 0);
    s.start(PieceKind::T);
    s
}

#[test]
fn gravity_eventually_locks_a_piece() {
    let mut s = sim(RotationMode::Srs);

    let mut locked = None;
    for _ in 0..60 {
        if let Some(event) = s.tick(1000, false) {
            locked = Some(event);
            break;
        }
    }

    let event = locked.expect("piece never locked under gravity");
    assert_eq!(event.lines_cleared, 0);
    assert!(!event.topped_out);
    assert!(s.needs_piece());
}

#[test]
fn soft_drop_locks_sooner_than_gravity() {
    let mut fast = sim(RotationMode::Srs);
    let mut slow = sim(RotationMode::Srs);

    let mut fast_ticks = 0;
    while fast.tick(100, true).is_none() {
        fast_ticks += 1;
        assert!(fast_ticks < 10_000);
    }
    let mut slow_ticks = 0;
    while slow.tick(100, false).is_none() {
        slow_ticks += 1;
        assert!(slow_ticks < 10_000);
    }

    assert!(fast_ticks < slow_ticks);
}

#[test]
fn hard_drop_locks_immediately_and_scores_per_cell() {
    let mut s = sim(RotationMode::Srs);
    let start_y = s.active().unwrap().y;
    let ghost_y = s.ghost_y().unwrap();

    let event = s.apply(GameAction::HardDrop).expect("hard drop locks");
    assert_eq!(event.lines_cleared, 0);
    assert_eq!(s.score(), 2 * (ghost_y - start_y) as u32);
}

#[test]
fn hold_swaps_and_is_single_use_per_piece() {
    let mut s = sim(RotationMode::Srs);
    assert!(s.apply(GameAction::Hold).is_none());
    assert_eq!(s.hold_piece(), Some(PieceKind::T));
    // First hold vacates the active slot.
    assert!(s.needs_piece());

    assert!(s.spawn(PieceKind::J));
    assert!(s.apply(GameAction::Hold).is_none());
    // Swapped back, and a second hold of the same piece is refused.
    assert_eq!(s.hold_piece(), Some(PieceKind::J));
    assert_eq!(s.active().map(|p| p.kind), Some(PieceKind::T));
    s.apply(GameAction::Hold);
    assert_eq!(s.active().map(|p| p.kind), Some(PieceKind::T));
}

#[test]
fn classic_mode_has_no_hold() {
    let mut s = sim(RotationMode::Classic);
    assert!(s.apply(GameAction::Hold).is_none());
    assert_eq!(s.hold_piece(), None);
    assert_eq!(s.active().map(|p| p.kind), Some(PieceKind::T));
}

#[test]
fn classic_rotation_never_kicks_off_the_wall() {
    let mut s = sim(RotationMode::Classic);
    // Push the piece against the left wall.
    for _ in 0..10 {
        s.apply(GameAction::MoveLeft);
    }
    let x_before = s.active().unwrap().x;
    s.apply(GameAction::RotateCw);
    // Classic rotation happens in place or not at all.
    assert_eq!(s.active().unwrap().x, x_before);
}

#[test]
fn repeated_garbage_tops_the_board_out() {
    let mut s = sim(RotationMode::Srs);
    for _ in 0..10 {
        s.add_garbage(4, 0);
        if s.topped_out() {
            break;
        }
    }
    assert!(s.topped_out());
}

#[test]
fn frozen_board_ignores_everything() {
    let mut s = sim(RotationMode::Srs);
    s.freeze();
    let piece_before = s.active();

    assert!(s.apply(GameAction::HardDrop).is_none());
    assert!(s.tick(10_000, true).is_none());
    assert_eq!(s.active(), piece_before);
    assert_eq!(s.score(), 0);
}
