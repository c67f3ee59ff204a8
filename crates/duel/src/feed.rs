//! Lookahead piece feed.
//!
//! A feed is an ordered queue of upcoming pieces one board consumes from.
//! A feed constructed with a generator (the primary role) can produce new
//! pieces; a replay feed can only receive pieces that were generated
//! elsewhere. The role is fixed at construction.

use std::collections::VecDeque;
use std::fmt;

use crate::core::rng::PieceGenerator;
use crate::types::PieceKind;

pub struct PieceFeed {
    queue: VecDeque<PieceKind>,
    generator: Option<Box<dyn PieceGenerator>>,
}

impl PieceFeed {
    /// A primary feed: owns the generator and can top itself up.
    pub fn with_generator(generator: Box<dyn PieceGenerator>) -> Self {
        Self {
            queue: VecDeque::new(),
            generator: Some(generator),
        }
    }

    /// A replay feed: consumes only what is queued into it.
    pub fn replay() -> Self {
        Self {
            queue: VecDeque::new(),
            generator: None,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.generator.is_some()
    }

    /// Remaining lookahead length.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The queued pieces, front (next to be drawn) first.
    pub fn iter(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    /// Append already-generated pieces, preserving their order.
    pub fn queue_pieces(&mut self, pieces: &[PieceKind]) {
        self.queue.extend(pieces.iter().copied());
    }

    /// Consume the next piece.
    pub fn pop(&mut self) -> Option<PieceKind> {
        self.queue.pop_front()
    }

    /// Run the generator once and append its batch to the queue.
    ///
    /// Returns exactly the freshly generated pieces so a paired replay feed
    /// can receive the very same batch. A replay feed returns an empty vec.
    pub fn top_up(&mut self) -> Vec<PieceKind> {
        let Some(generator) = self.generator.as_mut() else {
            return Vec::new();
        };
        let mut fresh = Vec::new();
        generator.next_batch(&mut fresh);
        self.queue.extend(fresh.iter().copied());
        fresh
    }

    /// Copy the first `out.len()` upcoming pieces into `out`.
    pub fn preview_into(&self, out: &mut [Option<PieceKind>]) {
        for (slot, kind) in out.iter_mut().zip(self.queue.iter().map(|k| Some(*k))) {
            *slot = kind;
        }
        for slot in out.iter_mut().skip(self.queue.len()) {
            *slot = None;
        }
    }
}

impl fmt::Debug for PieceFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceFeed")
            .field("queued", &self.queue.len())
            .field("primary", &self.is_primary())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::BagGenerator;

    #[test]
    fn primary_top_up_returns_exactly_the_fresh_batch() {
        let mut feed = PieceFeed::with_generator(Box::new(BagGenerator::new(9)));
        let first = feed.top_up();
        assert_eq!(first.len(), 7);
        assert_eq!(feed.len(), 7);

        let second = feed.top_up();
        assert_eq!(second.len(), 7);
        assert_eq!(feed.len(), 14);

        // The queue is first batch then second batch, in order.
        let queued: Vec<_> = feed.iter().collect();
        assert_eq!(&queued[..7], first.as_slice());
        assert_eq!(&queued[7..], second.as_slice());
    }

    #[test]
    fn replay_feed_cannot_generate() {
        let mut feed = PieceFeed::replay();
        assert!(!feed.is_primary());
        assert!(feed.top_up().is_empty());
        assert!(feed.is_empty());
    }

    #[test]
    fn queued_pieces_are_consumed_in_order() {
        let mut feed = PieceFeed::replay();
        feed.queue_pieces(&[PieceKind::S, PieceKind::Z, PieceKind::I]);
        assert_eq!(feed.pop(), Some(PieceKind::S));
        assert_eq!(feed.pop(), Some(PieceKind::Z));
        assert_eq!(feed.pop(), Some(PieceKind::I));
        assert_eq!(feed.pop(), None);
    }

    #[test]
    fn preview_fills_and_pads_with_none() {
        let mut feed = PieceFeed::replay();
        feed.queue_pieces(&[PieceKind::T, PieceKind::O]);

        let mut out = [None; 4];
        feed.preview_into(&mut out);
        assert_eq!(
            out,
            [Some(PieceKind::T), Some(PieceKind::O), None, None]
        );
        // Preview must not consume.
        assert_eq!(feed.len(), 2);
    }
}
