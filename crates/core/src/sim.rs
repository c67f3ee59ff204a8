//! Per-board simulation state machine.
//!
//! One `Simulation` is one player's board, gravity, lock delay, hold slot and
//! score. It never generates pieces itself: when the active slot is empty it
//! reports `needs_piece()` and the round layer injects the next kind with
//! `spawn`. That inversion is what lets two paired boards share a single
//! generation stream.
//!
//! Piece locks are surfaced as [`LockEvent`]s so the caller can run its
//! bookkeeping (queue resync, garbage exchange, end-of-round checks).

use crate::board::Board;
use crate::pieces::{shape_of, try_rotate, PieceShape, SPAWN_X, SPAWN_Y};
use crate::scoring::{drop_interval_ms, drop_score, level_for, line_clear_score};
use crate::types::{
    GameAction, PieceKind, Rotation, RotationMode, LINE_CLEAR_PAUSE_MS, LOCK_RESET_LIMIT,
    SOFT_DROP_MULTIPLIER,
};

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    fn at_spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> PieceShape {
        shape_of(self.kind, self.rotation)
    }

    fn fits(&self, board: &Board) -> bool {
        self.shape()
            .iter()
            .all(|&(dx, dy)| board.is_free(self.x + dx, self.y + dy))
    }

    fn grounded(&self, board: &Board) -> bool {
        self.shape()
            .iter()
            .any(|&(dx, dy)| !board.is_free(self.x + dx, self.y + dy + 1))
    }
}

/// Result of a piece lock, reported to the round layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub topped_out: bool,
}

/// One player's board simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: Board,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    mode: RotationMode,
    starting_level: u32,
    score: u32,
    lines: u32,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    lock_resets: u8,
    line_clear_pause_ms: u32,
    started: bool,
    topped_out: bool,
    frozen: bool,
}

impl Simulation {
    pub fn new(mode: RotationMode, starting_level: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            mode,
            starting_level,
            score: 0,
            lines: 0,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            lock_resets: 0,
            line_clear_pause_ms: 0,
            started: false,
            topped_out: false,
            frozen: false,
        }
    }

    /// Begin the round with the first injected piece.
    pub fn start(&mut self, first: PieceKind) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn(first);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        level_for(self.starting_level, self.lines)
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Stop advancing. Used when the opposing board decides the round.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn frozen(&self) -> bool {
        self.frozen
    }

    /// The active slot is empty and a new piece should be injected.
    ///
    /// Stays false during the line-clear pause so the spawn lands after the
    /// pause.
    pub fn needs_piece(&self) -> bool {
        self.started
            && !self.topped_out
            && !self.frozen
            && self.active.is_none()
            && self.line_clear_pause_ms == 0
    }

    /// Install the next piece. Returns false (and tops out) when it cannot
    /// be placed.
    pub fn spawn(&mut self, kind: PieceKind) -> bool {
        if self.board.is_spawn_blocked() {
            self.topped_out = true;
            return false;
        }

        let piece = ActivePiece::at_spawn(kind);
        if !piece.fits(&self.board) {
            self.topped_out = true;
            return false;
        }

        self.active = Some(piece);
        self.can_hold = true;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        true
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// `soft_drop` is the caller-tracked held state of the player's soft-drop
    /// key. Returns the lock event when gravity locked the piece this tick.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> Option<LockEvent> {
        if self.frozen || self.topped_out || !self.started {
            return None;
        }

        if self.line_clear_pause_ms > 0 {
            self.line_clear_pause_ms = self.line_clear_pause_ms.saturating_sub(elapsed_ms);
            return None;
        }

        let Some(active) = self.active else {
            return None;
        };

        if active.grounded(&self.board) {
            self.lock_timer_ms += elapsed_ms;
            if self.lock_timer_ms >= self.mode.lock_delay_ms() {
                return Some(self.lock_active());
            }
            return None;
        }

        let mut interval = drop_interval_ms(self.level());
        if soft_drop {
            interval = (interval / SOFT_DROP_MULTIPLIER).max(1);
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms >= interval {
            self.drop_timer_ms = 0;
            if self.shift(0, 1) && soft_drop {
                self.score += drop_score(1, false);
            }
        }

        None
    }

    /// Apply a player action. Hard drops lock synchronously and report it.
    pub fn apply(&mut self, action: GameAction) -> Option<LockEvent> {
        if self.frozen || self.topped_out || self.active.is_none() {
            return None;
        }

        match action {
            GameAction::MoveLeft => {
                self.shift(-1, 0);
                None
            }
            GameAction::MoveRight => {
                self.shift(1, 0);
                None
            }
            GameAction::SoftDrop => {
                if self.shift(0, 1) {
                    self.score += drop_score(1, false);
                }
                None
            }
            GameAction::HardDrop => Some(self.hard_drop()),
            GameAction::RotateCw => {
                self.rotate(true);
                None
            }
            GameAction::RotateCcw => {
                self.rotate(false);
                None
            }
            GameAction::Hold => {
                self.hold_active();
                None
            }
        }
    }

    /// Receive opponent garbage: `rows` rows with a gap at `gap`.
    ///
    /// The active piece is lifted out of the way if the shifted stack now
    /// overlaps it.
    pub fn add_garbage(&mut self, rows: usize, gap: usize) {
        self.board.insert_garbage(rows, gap);

        if let Some(mut active) = self.active {
            while !active.fits(&self.board) && active.y > SPAWN_Y {
                active.y -= 1;
            }
            if active.fits(&self.board) {
                self.active = Some(active);
            } else {
                self.topped_out = true;
                self.active = None;
            }
        }
    }

    /// Where the active piece would land (for the ghost outline).
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let shape = active.shape();
        let mut dy: i8 = 0;
        while shape
            .iter()
            .all(|&(mx, my)| self.board.is_free(active.x + mx, active.y + my + dy + 1))
        {
            dy += 1;
        }
        Some(active.y + dy)
    }

    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if !moved.fits(&self.board) {
            return false;
        }

        let was_grounded = active.grounded(&self.board);
        self.active = Some(moved);
        if dy > 0 || was_grounded {
            self.reset_lock_timer();
        }
        true
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if active.kind == PieceKind::O {
            return false;
        }

        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            self.mode,
            |x, y| self.board.is_free(x, y),
        );

        if let Some((rotation, (kx, ky))) = result {
            self.active = Some(ActivePiece {
                rotation,
                x: active.x + kx,
                y: active.y + ky,
                ..active
            });
            self.reset_lock_timer();
            return true;
        }
        false
    }

    fn reset_lock_timer(&mut self) {
        if self.lock_resets < LOCK_RESET_LIMIT {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }
    }

    fn hard_drop(&mut self) -> LockEvent {
        let Some(active) = self.active else {
            return LockEvent::default();
        };

        let shape = active.shape();
        let mut distance: i8 = 0;
        while shape
            .iter()
            .all(|&(dx, dy)| self.board.is_free(active.x + dx, active.y + dy + distance + 1))
        {
            distance += 1;
        }

        self.active = Some(ActivePiece {
            y: active.y + distance,
            ..active
        });
        self.score += drop_score(distance as u32, true);
        self.lock_active()
    }

    fn hold_active(&mut self) -> bool {
        if !self.mode.hold_enabled() || !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.take() {
            Some(stored) => {
                let swapped = ActivePiece::at_spawn(stored);
                self.hold = Some(active.kind);
                if swapped.fits(&self.board) {
                    self.active = Some(swapped);
                } else {
                    self.topped_out = true;
                    self.active = None;
                    return false;
                }
            }
            None => {
                // First hold: stash the piece and wait for the next injection.
                self.hold = Some(active.kind);
                self.active = None;
            }
        }

        self.can_hold = false;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        true
    }

    fn lock_active(&mut self) -> LockEvent {
        let Some(active) = self.active.take() else {
            return LockEvent::default();
        };

        let shape = active.shape();
        self.board.lock_piece(&shape, active.x, active.y, active.kind);

        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared > 0 {
            self.score += line_clear_score(cleared as usize, self.level());
            self.lines += cleared;
            self.line_clear_pause_ms = LINE_CLEAR_PAUSE_MS;
        }

        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;

        let topped_out = self.board.is_spawn_blocked();
        if topped_out {
            self.topped_out = true;
        }

        LockEvent {
            lines_cleared: cleared,
            topped_out,
        }
    }

    /// Export render state without allocating.
    pub fn snapshot_into(&self, out: &mut crate::snapshot::BoardSnapshot) {
        use crate::snapshot::cell_code;

        for (y, row) in out.board.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = match self.board.get(x as i8, y as i8) {
                    Some(Some(kind)) => cell_code(kind),
                    _ => 0,
                };
            }
        }

        out.active = self.active;
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold && self.mode.hold_enabled();
        out.score = self.score;
        out.level = self.level();
        out.lines = self.lines;
        out.topped_out = self.topped_out;
        out.next = [None; crate::types::PREVIEW_LEN];
    }
}
