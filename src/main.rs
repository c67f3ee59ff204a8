//! Two-player terminal duel runner (default binary).
//!
//! Both players share one keyboard: WASD-side keys drive the left board,
//! arrow keys drive the right one. Crossterm supplies input; rendering goes
//! through the framebuffer renderer in `duotris-term`.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use duotris::duel::{DuelRound, RoundParams};
use duotris::input::{global_action, DuelInput, GlobalAction};
use duotris::term::{DuelView, FrameBuffer, RoundStatus, TerminalRenderer, Viewport};
use duotris::types::{PlayerSlot, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Round seed: `DUOTRIS_SEED` pins it for reproducible rounds, otherwise it
/// is derived from the clock.
fn round_seed() -> (u32, bool) {
    if let Ok(s) = std::env::var("DUOTRIS_SEED") {
        if let Ok(seed) = s.trim().parse::<u32>() {
            return (seed, true);
        }
    }
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos ^ 0xa5a5_5a5a, false)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let (seed, pinned) = round_seed();
    let params = RoundParams {
        seed,
        ..Default::default()
    };
    let mut round = DuelRound::new(params);
    let mut input = DuelInput::new();

    let view = DuelView::default();
    let mut fb = FrameBuffer::new(1, 1);
    let mut snaps = [Default::default(), Default::default()];

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        for slot in PlayerSlot::BOTH {
            round.snapshot_into(slot, &mut snaps[slot.index()]);
        }
        let status = RoundStatus {
            paused: round.paused(),
            over: round.over(),
            winner: round.winner(),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snaps, status, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if let Some(global) = global_action(key) {
                            match global {
                                GlobalAction::Quit => return Ok(()),
                                GlobalAction::Pause => round.toggle_pause(),
                                GlobalAction::Restart => {
                                    // A pinned seed replays the same round.
                                    let seed = if pinned { seed } else { round_seed().0 };
                                    round = DuelRound::new(RoundParams {
                                        seed,
                                        ..round.params()
                                    });
                                    input.reset();
                                }
                            }
                        } else if let Some((slot, action)) = input.handle_key_press(key.code) {
                            round.apply(slot, action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; DAS/ARR owns repeats.
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for (slot, action) in input.update(TICK_MS) {
                round.apply(slot, action);
            }

            let soft_drop = [
                input.soft_drop_held(PlayerSlot::Left),
                input.soft_drop_held(PlayerSlot::Right),
            ];
            round.update(TICK_MS, soft_drop);
        }
    }
}
