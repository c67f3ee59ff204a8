//! Board mechanics through the public facade.

use duotris::core::Board;
use duotris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(PieceKind::S));
    }
}

#[test]
fn cleared_rows_shift_the_stack_down() {
    let mut board = Board::new();
    board.set(0, 17, Some(PieceKind::T));
    fill_row(&mut board, 18);
    fill_row(&mut board, 19);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[18, 19]);

    // The lone cell above the cleared rows lands on the floor.
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
    assert!(board.is_free(0, 17));
    assert!(board.is_free(0, 18));
}

#[test]
fn garbage_rises_with_a_single_gap() {
    let mut board = Board::new();
    board.set(4, 19, Some(PieceKind::O));

    board.insert_garbage(2, 7);

    // The old floor cell moved up two rows.
    assert_eq!(board.get(4, 17), Some(Some(PieceKind::O)));
    for y in 18..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.is_free(x, y), x == 7, "({x},{y})");
        }
    }
    // Garbage rows are never full, so they never clear on their own.
    assert!(board.clear_full_rows().is_empty());
}

#[test]
fn lock_piece_rejects_occupied_cells() {
    let mut board = Board::new();
    let shape = [(0, 0), (1, 0), (0, 1), (1, 1)];
    assert!(board.lock_piece(&shape, 4, 18, PieceKind::O));
    assert!(!board.lock_piece(&shape, 4, 18, PieceKind::O));
    assert!(board.is_occupied(5, 19));
}

#[test]
fn spawn_row_occupancy_blocks_spawning() {
    let mut board = Board::new();
    assert!(!board.is_spawn_blocked());
    board.set(5, 0, Some(PieceKind::Z));
    assert!(board.is_spawn_blocked());
}
