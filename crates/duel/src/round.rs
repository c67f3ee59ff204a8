//! Round controller for a same-device duel.
//!
//! Owns the two simulations and the piece link by composition: there is no
//! "multiplayer model" subclass, just a controller that advances both boards
//! from one tick, reacts to lock events, and mirrors line clears across as
//! garbage. The left slot carries the primary role for piece generation; the
//! right slot replays.

use crate::core::rng::{BagGenerator, SimpleRng};
use crate::core::sim::{LockEvent, Simulation};
use crate::core::snapshot::BoardSnapshot;
use crate::feed::PieceFeed;
use crate::link::PieceLink;
use crate::types::{GameAction, PlayerSlot, RotationMode, BOARD_WIDTH};

/// Parameters a new round is started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParams {
    pub starting_level: u32,
    pub rotation: RotationMode,
    /// Mirror line clears to the opponent as garbage rows.
    pub garbage: bool,
    pub seed: u32,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            starting_level: 0,
            rotation: RotationMode::Srs,
            garbage: true,
            seed: 1,
        }
    }
}

/// Garbage rows sent for a clear of `lines` rows.
fn garbage_rows_for(lines: u32) -> usize {
    match lines {
        2 => 1,
        3 => 2,
        4 => 4,
        _ => 0,
    }
}

/// A running (or finished) two-player round.
pub struct DuelRound {
    sims: [Simulation; 2],
    link: PieceLink,
    garbage_rng: SimpleRng,
    params: RoundParams,
    paused: bool,
    over: bool,
    winner: Option<PlayerSlot>,
}

impl DuelRound {
    pub fn new(params: RoundParams) -> Self {
        let primary = PieceFeed::with_generator(Box::new(BagGenerator::new(params.seed)));
        let mut link = PieceLink::new(primary);

        let mut sims = [
            Simulation::new(params.rotation, params.starting_level),
            Simulation::new(params.rotation, params.starting_level),
        ];
        for slot in PlayerSlot::BOTH {
            if let Some(kind) = link.draw(slot) {
                sims[slot.index()].start(kind);
            }
        }

        Self {
            sims,
            link,
            // Offset so the gap stream differs from the piece stream.
            garbage_rng: SimpleRng::new(params.seed.wrapping_add(0x51ed_270b)),
            params,
            paused: false,
            over: false,
            winner: None,
        }
    }

    pub fn params(&self) -> RoundParams {
        self.params
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        if !self.over {
            self.paused = !self.paused;
        }
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.winner
    }

    pub fn sim(&self, slot: PlayerSlot) -> &Simulation {
        &self.sims[slot.index()]
    }

    pub fn link(&self) -> &PieceLink {
        &self.link
    }

    /// Individual player scores, indexed by slot.
    pub fn scores(&self) -> [u32; 2] {
        [self.sims[0].score(), self.sims[1].score()]
    }

    /// The round's shared score notion: the better of the two players.
    pub fn round_score(&self) -> u32 {
        self.sims[0].score().max(self.sims[1].score())
    }

    /// Advance the whole round by one tick.
    ///
    /// The left (primary) board is advanced first, then the right one, from
    /// the same elapsed time. `soft_drop` is the per-slot held state of each
    /// player's soft-drop key.
    pub fn update(&mut self, elapsed_ms: u32, soft_drop: [bool; 2]) {
        if self.paused || self.over {
            return;
        }

        for slot in PlayerSlot::BOTH {
            let event = self.sims[slot.index()].tick(elapsed_ms, soft_drop[slot.index()]);
            self.after_advance(slot, event);
            if self.over {
                return;
            }
        }

        // Catch top-outs that did not surface through a lock event (garbage
        // pushed a board over while its piece was falling).
        for slot in PlayerSlot::BOTH {
            if self.sims[slot.index()].topped_out() {
                self.finish(Some(slot.opponent()));
                return;
            }
        }

        for slot in PlayerSlot::BOTH {
            self.satisfy_spawn(slot);
            if self.over {
                return;
            }
        }
    }

    /// Route one player's action into their board.
    pub fn apply(&mut self, slot: PlayerSlot, action: GameAction) {
        if self.paused || self.over {
            return;
        }

        let event = self.sims[slot.index()].apply(action);
        self.after_advance(slot, event);
        if !self.over {
            // Hold with an empty hold slot vacates the active piece.
            self.satisfy_spawn(slot);
        }
    }

    /// Post-drop bookkeeping: queue resync, garbage exchange, end of round.
    fn after_advance(&mut self, slot: PlayerSlot, event: Option<LockEvent>) {
        let Some(event) = event else {
            return;
        };

        // Every drop, from either board, triggers the resynchronization check.
        self.link.sync_after_drop();

        if event.topped_out {
            self.finish(Some(slot.opponent()));
            return;
        }

        if self.params.garbage {
            let rows = garbage_rows_for(event.lines_cleared);
            if rows > 0 {
                let gap = self.garbage_rng.next_below(BOARD_WIDTH as u32) as usize;
                let opponent = slot.opponent();
                self.sims[opponent.index()].add_garbage(rows, gap);
                if self.sims[opponent.index()].topped_out() {
                    self.finish(Some(slot));
                }
            }
        }
    }

    fn satisfy_spawn(&mut self, slot: PlayerSlot) {
        if !self.sims[slot.index()].needs_piece() {
            return;
        }
        if let Some(kind) = self.link.draw(slot) {
            if !self.sims[slot.index()].spawn(kind) {
                self.finish(Some(slot.opponent()));
            }
        }
    }

    fn finish(&mut self, winner: Option<PlayerSlot>) {
        self.over = true;
        self.winner = winner;
        for sim in &mut self.sims {
            sim.freeze();
        }
    }

    /// Fill one player's render snapshot, previews included.
    pub fn snapshot_into(&self, slot: PlayerSlot, out: &mut BoardSnapshot) {
        self.sims[slot.index()].snapshot_into(out);
        self.link.preview_into(slot, &mut out.next);
    }
}
