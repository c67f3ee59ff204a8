//! Duotris (workspace facade crate).
//!
//! Re-exports the member crates under the stable `duotris::{core,duel,input,term,types}`
//! paths; the implementation lives in dedicated crates under `crates/`.

pub use duotris_core as core;
pub use duotris_duel as duel;
pub use duotris_input as input;
pub use duotris_term as term;
pub use duotris_types as types;
