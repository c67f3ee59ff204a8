//! Terminal front end: framebuffer, renderer, and the duel view.
//!
//! The view is pure (snapshots in, framebuffer out) so it can be unit tested;
//! only [`renderer::TerminalRenderer`] touches the terminal.

pub mod duel_view;
pub mod fb;
pub mod renderer;

pub use duotris_core as core;
pub use duotris_types as types;

pub use duel_view::{DuelView, RoundStatus, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
