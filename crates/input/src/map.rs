//! Key bindings.
//!
//! The two binding sets are disjoint so both players can mash simultaneously:
//!
//! - left player: A/D move, S soft drop, W rotate CW, Q rotate CCW,
//!   E hold, X hard drop;
//! - right player: arrow keys move/soft-drop, Up rotates CW, comma rotates
//!   CCW, period holds, Enter hard-drops;
//! - global: P pause, R restart, Esc or Ctrl-C quit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{GameAction, PlayerSlot};

/// Actions that affect the whole round rather than one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Pause,
    Restart,
    Quit,
}

/// Map a key event to a round-global action.
pub fn global_action(key: KeyEvent) -> Option<GlobalAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(GlobalAction::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(GlobalAction::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GlobalAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GlobalAction::Restart),
        _ => None,
    }
}

/// Map a key code to one player's action.
pub fn player_action(code: KeyCode) -> Option<(PlayerSlot, GameAction)> {
    use GameAction::*;
    use PlayerSlot::*;

    match code {
        // Left player.
        KeyCode::Char('a') | KeyCode::Char('A') => Some((Left, MoveLeft)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some((Left, MoveRight)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((Left, SoftDrop)),
        KeyCode::Char('w') | KeyCode::Char('W') => Some((Left, RotateCw)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some((Left, RotateCcw)),
        KeyCode::Char('e') | KeyCode::Char('E') => Some((Left, Hold)),
        KeyCode::Char('x') | KeyCode::Char('X') => Some((Left, HardDrop)),

        // Right player.
        KeyCode::Left => Some((Right, MoveLeft)),
        KeyCode::Right => Some((Right, MoveRight)),
        KeyCode::Down => Some((Right, SoftDrop)),
        KeyCode::Up => Some((Right, RotateCw)),
        KeyCode::Char(',') => Some((Right, RotateCcw)),
        KeyCode::Char('.') => Some((Right, Hold)),
        KeyCode::Enter => Some((Right, HardDrop)),

        _ => None,
    }
}
