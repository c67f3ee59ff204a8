//! Tetromino shapes and rotation.
//!
//! Shapes are four (dx, dy) mino offsets from the piece origin. Rotation
//! comes in two rulesets: `Srs` walks the standard wall-kick tables
//! (https://tetris.wiki/SRS), `Classic` only attempts the in-place rotation.

use crate::types::{PieceKind, Rotation, RotationMode};

/// Offset of a single mino relative to the piece origin.
pub type MinoOffset = (i8, i8);

/// Four mino offsets.
pub type PieceShape = [MinoOffset; 4];

/// Spawn position for new pieces.
pub const SPAWN_X: i8 = 3;
pub const SPAWN_Y: i8 = 0;

/// Shape for a piece kind in a given rotation state.
pub fn shape_of(kind: PieceKind, rotation: Rotation) -> PieceShape {
    use PieceKind::*;
    use Rotation::*;

    match (kind, rotation) {
        (I, North) => [(0, 1), (1, 1), (2, 1), (3, 1)],
        (I, East) => [(2, 0), (2, 1), (2, 2), (2, 3)],
        (I, South) => [(0, 2), (1, 2), (2, 2), (3, 2)],
        (I, West) => [(1, 0), (1, 1), (1, 2), (1, 3)],

        // O ignores rotation.
        (O, _) => [(1, 0), (2, 0), (1, 1), (2, 1)],

        (T, North) => [(1, 0), (0, 1), (1, 1), (2, 1)],
        (T, East) => [(1, 0), (1, 1), (2, 1), (1, 2)],
        (T, South) => [(0, 1), (1, 1), (2, 1), (1, 2)],
        (T, West) => [(1, 0), (0, 1), (1, 1), (1, 2)],

        (S, North) => [(1, 0), (2, 0), (0, 1), (1, 1)],
        (S, East) => [(1, 0), (1, 1), (2, 1), (2, 2)],
        (S, South) => [(1, 1), (2, 1), (0, 2), (1, 2)],
        (S, West) => [(0, 0), (0, 1), (1, 1), (1, 2)],

        (Z, North) => [(0, 0), (1, 0), (1, 1), (2, 1)],
        (Z, East) => [(2, 0), (1, 1), (2, 1), (1, 2)],
        (Z, South) => [(0, 1), (1, 1), (1, 2), (2, 2)],
        (Z, West) => [(1, 0), (0, 1), (1, 1), (0, 2)],

        (J, North) => [(0, 0), (0, 1), (1, 1), (2, 1)],
        (J, East) => [(1, 0), (2, 0), (1, 1), (1, 2)],
        (J, South) => [(0, 1), (1, 1), (2, 1), (2, 2)],
        (J, West) => [(1, 0), (1, 1), (0, 2), (1, 2)],

        (L, North) => [(2, 0), (0, 1), (1, 1), (2, 1)],
        (L, East) => [(1, 0), (1, 1), (1, 2), (2, 2)],
        (L, South) => [(0, 1), (1, 1), (2, 1), (0, 2)],
        (L, West) => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// Five kick offsets to try for one rotation transition.
type KickRow = [(i8, i8); 5];

/// All eight transitions (four states, two directions each).
type KickTable = [KickRow; 8];

const JLSTZ_KICKS: KickTable = [
    // N->E
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // N->W
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // E->N
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // E->S
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // S->E
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // S->W
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // W->S
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // W->N
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const I_KICKS: KickTable = [
    // N->E
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // N->W
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // E->N
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // E->S
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // S->E
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // S->W
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // W->S
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // W->N
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

const NO_KICKS: KickTable = [[(0, 0); 5]; 8];

fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        PieceKind::O => &NO_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

fn transition_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,
        (Rotation::North, false) => 1,
        (Rotation::East, false) => 2,
        (Rotation::East, true) => 3,
        (Rotation::South, false) => 4,
        (Rotation::South, true) => 5,
        (Rotation::West, false) => 6,
        (Rotation::West, true) => 7,
    }
}

/// Attempt a rotation under the given ruleset.
///
/// `is_free` answers whether a board cell can host a mino. On success the new
/// rotation state and the applied kick offset are returned.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    mode: RotationMode,
    is_free: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    let target = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };
    let shape = shape_of(kind, target);

    let kicks: &[(i8, i8)] = match mode {
        RotationMode::Srs => &kick_table(kind)[transition_index(rotation, clockwise)],
        RotationMode::Classic => &[(0, 0)],
    };

    for &(kx, ky) in kicks {
        let fits = shape
            .iter()
            .all(|&(mx, my)| is_free(x + kx + mx, y + ky + my));
        if fits {
            return Some((target, (kx, ky)));
        }
    }

    None
}
