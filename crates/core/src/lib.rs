//! Pure board simulation: deterministic, I/O-free, testable.
//!
//! One [`Simulation`] is one player's board. It deliberately does **not** own
//! a piece queue: pieces are injected by whoever runs the round, so two paired
//! simulations can share a single generation stream. See the `duotris-duel`
//! crate for that wiring.
//!
//! - [`board`]: 10x20 grid with line clears and garbage insertion
//! - [`pieces`]: tetromino shapes, SRS wall kicks, classic rotation
//! - [`rng`]: deterministic LCG and the piece-generation policy trait
//! - [`scoring`]: classic line/drop scoring and the gravity table
//! - [`sim`]: the per-board state machine
//! - [`snapshot`]: allocation-free render export

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod sim;
pub mod snapshot;

pub use duotris_types as types;

pub use board::Board;
pub use pieces::{shape_of, try_rotate};
pub use rng::{BagGenerator, PieceGenerator, SimpleRng};
pub use sim::{LockEvent, Simulation};
pub use snapshot::{cell_code, BoardSnapshot};
