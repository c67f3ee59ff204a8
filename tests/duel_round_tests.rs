//! End-to-end round behavior through the public facade.

use duotris::core::BoardSnapshot;
use duotris::duel::{DuelRound, RoundParams};
use duotris::types::{GameAction, PlayerSlot, RotationMode};

fn round(seed: u32) -> DuelRound {
    DuelRound::new(RoundParams {
        seed,
        ..Default::default()
    })
}

fn snapshots(r: &DuelRound) -> [BoardSnapshot; 2] {
    let mut out = [BoardSnapshot::default(), BoardSnapshot::default()];
    for slot in PlayerSlot::BOTH {
        r.snapshot_into(slot, &mut out[slot.index()]);
    }
    out
}

#[test]
fn both_boards_start_with_the_same_piece() {
    let r = round(77);
    let left = r.sim(PlayerSlot::Left).active().expect("left has a piece");
    let right = r.sim(PlayerSlot::Right).active().expect("right has a piece");
    assert_eq!(left.kind, right.kind);
}

#[test]
fn identical_seeds_and_inputs_replay_identically() {
    let mut a = round(555);
    let mut b = round(555);

    for step in 0u32..400 {
        if step % 7 == 0 {
            a.apply(PlayerSlot::Left, GameAction::MoveLeft);
            b.apply(PlayerSlot::Left, GameAction::MoveLeft);
        }
        if step % 11 == 0 {
            a.apply(PlayerSlot::Right, GameAction::RotateCw);
            b.apply(PlayerSlot::Right, GameAction::RotateCw);
        }
        if step % 31 == 0 {
            a.apply(PlayerSlot::Left, GameAction::HardDrop);
            b.apply(PlayerSlot::Left, GameAction::HardDrop);
        }
        let soft = [step % 2 == 0, false];
        a.update(16, soft);
        b.update(16, soft);
    }

    assert_eq!(snapshots(&a), snapshots(&b));
    assert_eq!(a.scores(), b.scores());
}

#[test]
fn paused_round_does_not_advance() {
    let mut r = round(3);
    r.toggle_pause();
    assert!(r.paused());

    let before = snapshots(&r);
    for _ in 0..100 {
        r.update(16, [true, true]);
        r.apply(PlayerSlot::Left, GameAction::HardDrop);
    }
    assert_eq!(snapshots(&r), before);

    r.toggle_pause();
    assert!(!r.paused());
}

#[test]
fn hard_drop_scores_and_respawns() {
    let mut r = round(8);
    let before = r.sim(PlayerSlot::Left).score();

    r.apply(PlayerSlot::Left, GameAction::HardDrop);
    r.update(16, [false, false]);

    assert!(r.sim(PlayerSlot::Left).score() > before);
    assert!(r.sim(PlayerSlot::Left).active().is_some());
}

#[test]
fn hard_drops_consume_the_shared_stream_in_preview_order() {
    let mut r = round(21);
    let snap = snapshots(&r)[0];
    let upcoming: Vec<_> = snap.next.iter().flatten().copied().collect();
    assert_eq!(upcoming.len(), snap.next.len());

    for expected in upcoming {
        r.apply(PlayerSlot::Left, GameAction::HardDrop);
        r.update(16, [false, false]);
        let active = r.sim(PlayerSlot::Left).active().expect("respawned");
        assert_eq!(active.kind, expected);
    }
}

#[test]
fn round_score_is_the_better_player() {
    let mut r = round(13);
    r.apply(PlayerSlot::Left, GameAction::HardDrop);
    r.update(16, [false, false]);

    let [left, right] = r.scores();
    assert_eq!(r.round_score(), left.max(right));
    assert!(left > right);
}

#[test]
fn a_full_round_eventually_ends_with_a_winner() {
    let mut r = DuelRound::new(RoundParams {
        starting_level: 8,
        rotation: RotationMode::Classic,
        seed: 99,
        ..Default::default()
    });

    // Pile left's pieces straight down until someone tops out.
    for _ in 0..100_000 {
        if r.over() {
            break;
        }
        r.apply(PlayerSlot::Left, GameAction::HardDrop);
        r.update(16, [false, false]);
    }

    assert!(r.over());
    assert!(r.winner().is_some());
    for slot in PlayerSlot::BOTH {
        assert!(r.sim(slot).frozen());
    }
    // Hard-dropping into a column tops the left board out first.
    assert_eq!(r.winner(), Some(PlayerSlot::Right));
}

#[test]
fn finished_round_ignores_further_input() {
    let mut r = DuelRound::new(RoundParams {
        rotation: RotationMode::Classic,
        seed: 4,
        ..Default::default()
    });
    while !r.over() {
        r.apply(PlayerSlot::Left, GameAction::HardDrop);
        r.update(16, [false, false]);
    }

    let frozen = snapshots(&r);
    r.apply(PlayerSlot::Right, GameAction::MoveLeft);
    r.update(16, [false, true]);
    assert_eq!(snapshots(&r), frozen);
}
