//! The duel layer: shared piece generation for two paired boards.
//!
//! Two board simulations run from one synchronous tick and must see the
//! identical upcoming piece order. The split is an explicit leader/follower
//! arrangement:
//!
//! - a **primary** [`PieceFeed`] owns the piece generator and is the only
//!   place new pieces are ever created;
//! - a **replay** feed mirrors exactly what the primary generated, merely at
//!   its own read position;
//! - the [`PieceLink`] binds the two and performs the threshold refill after
//!   every piece drop;
//! - the [`DuelRound`] controller owns both simulations and the link, routes
//!   input, exchanges garbage, and decides the winner.

pub mod feed;
pub mod link;
pub mod round;

pub use duotris_core as core;
pub use duotris_types as types;

pub use feed::PieceFeed;
pub use link::{PieceLink, REFILL_THRESHOLD};
pub use round::{DuelRound, RoundParams};
