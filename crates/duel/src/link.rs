//! Twin-feed piece synchronizer.
//!
//! Binds a primary feed (owns the generator) to a replay feed so that both
//! players consume the identical piece order at independent read positions.
//! Generation is only ever driven through the primary; the replay side never
//! generates on its own.

use crate::feed::PieceFeed;
use crate::types::{PieceKind, PlayerSlot};

/// When either feed's remaining lookahead falls below this after a drop,
/// the primary generator is run once and the fresh batch mirrored across.
pub const REFILL_THRESHOLD: usize = 5;

#[derive(Debug)]
pub struct PieceLink {
    primary: PieceFeed,
    replay: PieceFeed,
}

impl PieceLink {
    /// Take ownership of the primary feed and mirror its initial lookahead.
    ///
    /// The primary is topped up first, then its entire current queue is
    /// copied verbatim into a fresh replay feed.
    pub fn new(mut primary: PieceFeed) -> Self {
        primary.top_up();

        let mut replay = PieceFeed::replay();
        let initial: Vec<PieceKind> = primary.iter().collect();
        replay.queue_pieces(&initial);

        Self { primary, replay }
    }

    fn feed(&self, slot: PlayerSlot) -> &PieceFeed {
        match slot {
            PlayerSlot::Left => &self.primary,
            PlayerSlot::Right => &self.replay,
        }
    }

    fn feed_mut(&mut self, slot: PlayerSlot) -> &mut PieceFeed {
        match slot {
            PlayerSlot::Left => &mut self.primary,
            PlayerSlot::Right => &mut self.replay,
        }
    }

    /// Remaining lookahead for one side.
    pub fn remaining(&self, slot: PlayerSlot) -> usize {
        self.feed(slot).len()
    }

    /// Consume the next piece for one side.
    pub fn draw(&mut self, slot: PlayerSlot) -> Option<PieceKind> {
        self.feed_mut(slot).pop()
    }

    /// Copy one side's upcoming pieces for display.
    pub fn preview_into(&self, slot: PlayerSlot, out: &mut [Option<PieceKind>]) {
        self.feed(slot).preview_into(out);
    }

    /// The resynchronization check, run after every piece drop.
    ///
    /// If either side's remaining lookahead is below [`REFILL_THRESHOLD`], the
    /// primary's generator runs once and exactly the newly generated pieces
    /// are appended, in order, to the replay feed. Returns how many fresh
    /// pieces were produced (0 when no refill was needed).
    pub fn sync_after_drop(&mut self) -> usize {
        if self.primary.len() >= REFILL_THRESHOLD && self.replay.len() >= REFILL_THRESHOLD {
            return 0;
        }

        let fresh = self.primary.top_up();
        self.replay.queue_pieces(&fresh);
        fresh.len()
    }

    /// The queued pieces of one side, front first. Test and debug aid.
    pub fn queued(&self, slot: PlayerSlot) -> Vec<PieceKind> {
        self.feed(slot).iter().collect()
    }
}
