//! Keyboard input for two players on one keyboard.
//!
//! [`map`] translates crossterm key events into per-player game actions and
//! round-global actions; [`das`] adds DAS/ARR auto-repeat per player, with an
//! auto-release timeout for terminals that never emit key-release events.

pub mod das;
pub mod map;

pub use duotris_types as types;

pub use das::DuelInput;
pub use map::{global_action, player_action, GlobalAction};
