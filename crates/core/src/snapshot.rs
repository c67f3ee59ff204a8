//! Allocation-free render snapshot of one board.

use crate::sim::ActivePiece;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

/// Numeric cell code for the view layer (0 = empty, 1..=7 = piece kind).
pub fn cell_code(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 1,
        PieceKind::O => 2,
        PieceKind::T => 3,
        PieceKind::S => 4,
        PieceKind::Z => 5,
        PieceKind::J => 6,
        PieceKind::L => 7,
    }
}

/// Everything the view needs to draw one player's pane.
///
/// Filled by [`Simulation::snapshot_into`](crate::sim::Simulation::snapshot_into);
/// the `next` previews come from the round layer, which owns the piece feeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActivePiece>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next: [Option<PieceKind>; PREVIEW_LEN],
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub topped_out: bool,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: false,
            next: [None; PREVIEW_LEN],
            score: 0,
            level: 0,
            lines: 0,
            topped_out: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Simulation;
    use crate::types::RotationMode;

    #[test]
    fn cell_codes_are_distinct_and_nonzero() {
        let codes: Vec<u8> = PieceKind::ALL.iter().map(|&k| cell_code(k)).collect();
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn snapshot_reflects_sim_state() {
        let mut sim = Simulation::new(RotationMode::Srs, 2);
        sim.start(PieceKind::J);
        sim.board_mut().set(0, 19, Some(PieceKind::I));

        let mut snap = BoardSnapshot::default();
        sim.snapshot_into(&mut snap);

        assert_eq!(snap.board[19][0], cell_code(PieceKind::I));
        assert_eq!(snap.board[19][1], 0);
        assert_eq!(snap.active.map(|a| a.kind), Some(PieceKind::J));
        assert_eq!(snap.level, 2);
        assert!(snap.can_hold);
        assert!(snap.ghost_y.is_some());
    }
}
