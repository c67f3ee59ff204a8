//! Shared data types and constants.
//!
//! Pure data with no dependencies, usable from the simulation core, the duel
//! layer, input mapping, and the terminal view alike.

/// Board dimensions.
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep of the main loop (milliseconds, ~60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity intervals by level (milliseconds per row).
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];
/// Gravity floor past the end of the table.
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Soft drop runs this many times faster than gravity.
pub const SOFT_DROP_MULTIPLIER: u32 = 10;

/// Lock delay for SRS-mode rounds, with move/rotate resets.
pub const SRS_LOCK_DELAY_MS: u32 = 450;
/// Lock delay for classic-mode rounds (no resets beyond the limit either).
pub const CLASSIC_LOCK_DELAY_MS: u32 = 250;
/// Maximum number of lock-delay resets per piece.
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Pause after a line clear before the next spawn (milliseconds).
pub const LINE_CLEAR_PAUSE_MS: u32 = 180;

/// DAS/ARR timing (milliseconds).
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;
pub const SOFT_DROP_DAS_MS: u32 = 50;
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// How many upcoming pieces the view shows per player.
pub const PREVIEW_LEN: usize = 3;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Display character for previews and debugging.
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Rotation states (North = spawn orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Rotation ruleset for a round.
///
/// `Srs` also enables hold and the long lock delay; `Classic` rotates in
/// place without wall kicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    Classic,
    Srs,
}

impl RotationMode {
    pub fn hold_enabled(&self) -> bool {
        matches!(self, RotationMode::Srs)
    }

    pub fn lock_delay_ms(&self) -> u32 {
        match self {
            RotationMode::Srs => SRS_LOCK_DELAY_MS,
            RotationMode::Classic => CLASSIC_LOCK_DELAY_MS,
        }
    }
}

/// Per-player game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
}

/// Which of the two paired boards a value belongs to.
///
/// `Left` is always the primary role: it owns piece generation and its update
/// drives the shared refill. `Right` replays the left side's piece order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    Left,
    Right,
}

impl PlayerSlot {
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::Left, PlayerSlot::Right];

    pub fn index(&self) -> usize {
        match self {
            PlayerSlot::Left => 0,
            PlayerSlot::Right => 1,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            PlayerSlot::Left => PlayerSlot::Right,
            PlayerSlot::Right => PlayerSlot::Left,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind).
pub type Cell = Option<PieceKind>;
