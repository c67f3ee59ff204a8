//! Deterministic randomness and the piece-generation policy.
//!
//! Piece generation is deliberately an opaque policy behind the
//! [`PieceGenerator`] trait: the duel layer only ever asks "give me the next
//! batch" and never assumes a particular randomizer. The stock policy is the
//! 7-bag shuffle, one full bag per batch.

use crate::types::PieceKind;

/// Linear congruential generator (Numerical Recipes constants).
///
/// Small, seedable, and good enough for piece shuffling and garbage gaps;
/// identical seeds replay identical rounds.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // State 0 would loop on the additive constant alone.
        Self {
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`.
    pub fn next_below(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below(i as u32 + 1) as usize;
            slice.swap(i, j);
        }
    }
}

/// Opaque "generate the next pieces" policy.
///
/// One call appends one batch of upcoming pieces to `out`. Implementations
/// must be deterministic for a given construction seed.
pub trait PieceGenerator {
    fn next_batch(&mut self, out: &mut Vec<PieceKind>);
}

/// 7-bag randomizer: every batch is one shuffled permutation of all seven
/// kinds, so no kind can drought for more than 12 pieces.
#[derive(Debug, Clone)]
pub struct BagGenerator {
    rng: SimpleRng,
}

impl BagGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceGenerator for BagGenerator {
    fn next_batch(&mut self, out: &mut Vec<PieceKind>) {
        let mut bag = PieceKind::ALL;
        self.rng.shuffle(&mut bag);
        out.extend_from_slice(&bag);
    }
}
