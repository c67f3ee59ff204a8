//! DAS/ARR auto-repeat for both players.
//!
//! Terminals often deliver only key-press events; a short timeout releases
//! held state when no repeat press arrives, so a single tap does not turn
//! into a sustained hold.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::player_action;
use crate::types::{
    GameAction, PlayerSlot, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

const AUTO_RELEASE_MS: u32 = 150;

/// Routed repeat actions produced by one update tick.
pub type RepeatActions = ArrayVec<(PlayerSlot, GameAction), 32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    None,
    Left,
    Right,
}

/// Held-key state for one player.
#[derive(Debug, Clone)]
struct PlayerDas {
    horizontal: Horizontal,
    down_held: bool,
    last_press: Instant,
    h_das_ms: u32,
    h_arr_acc: u32,
    v_das_ms: u32,
    v_arr_acc: u32,
}

impl PlayerDas {
    fn new() -> Self {
        Self {
            horizontal: Horizontal::None,
            down_held: false,
            last_press: Instant::now(),
            h_das_ms: 0,
            h_arr_acc: 0,
            v_das_ms: 0,
            v_arr_acc: 0,
        }
    }

    /// Record a movement press. Returns true when it is a new hold (the
    /// immediate action should fire once).
    fn press(&mut self, action: GameAction) -> bool {
        self.last_press = Instant::now();
        match action {
            GameAction::MoveLeft => self.set_horizontal(Horizontal::Left),
            GameAction::MoveRight => self.set_horizontal(Horizontal::Right),
            GameAction::SoftDrop => {
                if self.down_held {
                    false
                } else {
                    self.down_held = true;
                    self.v_das_ms = 0;
                    self.v_arr_acc = 0;
                    true
                }
            }
            _ => true,
        }
    }

    fn set_horizontal(&mut self, dir: Horizontal) -> bool {
        if self.horizontal == dir {
            return false;
        }
        self.horizontal = dir;
        self.h_das_ms = 0;
        self.h_arr_acc = 0;
        true
    }

    fn release(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft if self.horizontal == Horizontal::Left => {
                self.set_horizontal(Horizontal::None);
            }
            GameAction::MoveRight if self.horizontal == Horizontal::Right => {
                self.set_horizontal(Horizontal::None);
            }
            GameAction::SoftDrop => {
                self.down_held = false;
                self.v_das_ms = 0;
                self.v_arr_acc = 0;
            }
            _ => {}
        }
    }

    fn auto_release_if_stale(&mut self, timeout_ms: u32) {
        if (self.last_press.elapsed().as_millis() as u32) <= timeout_ms {
            return;
        }
        self.set_horizontal(Horizontal::None);
        self.down_held = false;
        self.v_das_ms = 0;
        self.v_arr_acc = 0;
    }

    fn update(&mut self, elapsed_ms: u32, slot: PlayerSlot, out: &mut RepeatActions) {
        match self.horizontal {
            Horizontal::Left | Horizontal::Right => {
                let prev = self.h_das_ms;
                self.h_das_ms += elapsed_ms;
                if self.h_das_ms >= DEFAULT_DAS_MS {
                    let excess = if prev < DEFAULT_DAS_MS {
                        self.h_das_ms - DEFAULT_DAS_MS
                    } else {
                        elapsed_ms
                    };
                    self.h_arr_acc += excess;
                    let action = if self.horizontal == Horizontal::Left {
                        GameAction::MoveLeft
                    } else {
                        GameAction::MoveRight
                    };
                    while self.h_arr_acc >= DEFAULT_ARR_MS {
                        let _ = out.try_push((slot, action));
                        self.h_arr_acc -= DEFAULT_ARR_MS;
                    }
                }
            }
            Horizontal::None => {
                self.h_das_ms = 0;
                self.h_arr_acc = 0;
            }
        }

        if self.down_held {
            let prev = self.v_das_ms;
            self.v_das_ms += elapsed_ms;
            if self.v_das_ms >= SOFT_DROP_DAS_MS {
                let excess = if prev < SOFT_DROP_DAS_MS {
                    self.v_das_ms - SOFT_DROP_DAS_MS
                } else {
                    elapsed_ms
                };
                self.v_arr_acc += excess;
                while self.v_arr_acc >= SOFT_DROP_ARR_MS {
                    let _ = out.try_push((slot, GameAction::SoftDrop));
                    self.v_arr_acc -= SOFT_DROP_ARR_MS;
                }
            }
        } else {
            self.v_das_ms = 0;
            self.v_arr_acc = 0;
        }
    }
}

/// DAS/ARR handler covering both players.
#[derive(Debug, Clone)]
pub struct DuelInput {
    players: [PlayerDas; 2],
    auto_release_ms: u32,
}

impl DuelInput {
    pub fn new() -> Self {
        Self {
            players: [PlayerDas::new(), PlayerDas::new()],
            auto_release_ms: AUTO_RELEASE_MS,
        }
    }

    #[cfg(test)]
    fn with_auto_release_ms(mut self, ms: u32) -> Self {
        self.auto_release_ms = ms;
        self
    }

    /// Route a key press. Returns the action to apply immediately, if any.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<(PlayerSlot, GameAction)> {
        let (slot, action) = player_action(code)?;
        if self.players[slot.index()].press(action) {
            Some((slot, action))
        } else {
            None
        }
    }

    /// Route a key release (when the terminal delivers them).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some((slot, action)) = player_action(code) {
            self.players[slot.index()].release(action);
        }
    }

    /// Whether a player is currently holding soft drop.
    pub fn soft_drop_held(&self, slot: PlayerSlot) -> bool {
        self.players[slot.index()].down_held
    }

    /// Advance the repeat timers, producing routed repeat actions.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatActions {
        let mut out = RepeatActions::new();
        for slot in PlayerSlot::BOTH {
            let das = &mut self.players[slot.index()];
            das.auto_release_if_stale(self.auto_release_ms);
            das.update(elapsed_ms, slot, &mut out);
        }
        out
    }

    pub fn reset(&mut self) {
        self.players = [PlayerDas::new(), PlayerDas::new()];
    }
}

impl Default for DuelInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_press_fires_once_then_repeats_after_das() {
        let mut input = DuelInput::new().with_auto_release_ms(10_000);

        assert_eq!(
            input.handle_key_press(KeyCode::Char('a')),
            Some((PlayerSlot::Left, GameAction::MoveLeft))
        );
        // Repeated press while held: no duplicate immediate action.
        assert_eq!(input.handle_key_press(KeyCode::Char('a')), None);

        // Below DAS: silent.
        assert!(input.update(DEFAULT_DAS_MS - 1).is_empty());
        // Cross DAS plus one ARR interval: one repeat.
        let actions = input.update(DEFAULT_ARR_MS + 1);
        assert_eq!(actions.as_slice(), &[(PlayerSlot::Left, GameAction::MoveLeft)]);
    }

    #[test]
    fn the_two_players_repeat_independently() {
        let mut input = DuelInput::new().with_auto_release_ms(10_000);
        input.handle_key_press(KeyCode::Char('d'));
        input.handle_key_press(KeyCode::Left);

        let actions = input.update(DEFAULT_DAS_MS + DEFAULT_ARR_MS);
        assert!(actions.contains(&(PlayerSlot::Left, GameAction::MoveRight)));
        assert!(actions.contains(&(PlayerSlot::Right, GameAction::MoveLeft)));
    }

    #[test]
    fn release_stops_repeats() {
        let mut input = DuelInput::new().with_auto_release_ms(10_000);
        input.handle_key_press(KeyCode::Char('a'));
        assert!(!input.update(DEFAULT_DAS_MS + 2 * DEFAULT_ARR_MS).is_empty());

        input.handle_key_release(KeyCode::Char('a'));
        assert!(input.update(10 * DEFAULT_ARR_MS).is_empty());
    }

    #[test]
    fn stale_holds_auto_release_without_release_events() {
        let mut input = DuelInput::new().with_auto_release_ms(50);
        input.handle_key_press(KeyCode::Down);
        assert!(input.soft_drop_held(PlayerSlot::Right));

        // Pretend time passed with no further presses.
        input.players[PlayerSlot::Right.index()].last_press =
            Instant::now() - Duration::from_millis(51);

        assert!(input.update(0).is_empty());
        assert!(!input.soft_drop_held(PlayerSlot::Right));
    }

    #[test]
    fn soft_drop_repeats_at_its_own_rate() {
        let mut input = DuelInput::new().with_auto_release_ms(10_000);
        assert_eq!(
            input.handle_key_press(KeyCode::Char('s')),
            Some((PlayerSlot::Left, GameAction::SoftDrop))
        );

        assert!(input.update(SOFT_DROP_DAS_MS - 1).is_empty());
        let actions = input.update(SOFT_DROP_ARR_MS + 1);
        assert_eq!(actions.as_slice(), &[(PlayerSlot::Left, GameAction::SoftDrop)]);
    }

    #[test]
    fn opposite_direction_restarts_das() {
        let mut input = DuelInput::new().with_auto_release_ms(10_000);
        input.handle_key_press(KeyCode::Char('a'));
        input.update(DEFAULT_DAS_MS + DEFAULT_ARR_MS);

        // Switching direction is a fresh hold with a fresh DAS window.
        assert_eq!(
            input.handle_key_press(KeyCode::Char('d')),
            Some((PlayerSlot::Left, GameAction::MoveRight))
        );
        assert!(input.update(DEFAULT_DAS_MS - 1).is_empty());
    }
}
