//! Unit tests for the step sequencer.
//!
//! These tests run on the host and drive the sequencer with a hand-moved
//! clock, checking cursor movement, window arithmetic and echo behaviour
//! cycle by cycle.

use super::*;
use crate::clock::ManualClock;
use crate::config;
use crate::hid::{Buttons, Hat, STICK_MIN};
use crate::script::{jump_script, Action, ActionKind};

fn script<'a>(actions: &'a [Action], loop_start: usize) -> Script<'a> {
    Script::new(actions, loop_start).unwrap()
}

/// Sequencer without echoes so every tick is a fresh evaluation.
fn bare(script: Script<'_>) -> Sequencer<'_> {
    Sequencer::with_options(script, 0, WrapPolicy::LoopBack)
}

/// Burn the two warm-up cycles (Init, Settle).
fn warm_up(seq: &mut Sequencer<'_>, clock: &ManualClock) {
    assert!(seq.tick(clock).is_neutral());
    assert!(seq.tick(clock).is_neutral());
    assert_eq!(seq.phase(), Phase::Running);
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn warm_up_takes_two_neutral_cycles() {
    let actions = [Action::ticks(ActionKind::A, 1)];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::default();

    assert_eq!(seq.phase(), Phase::Init);
    assert!(seq.tick(&clock).is_neutral());
    assert_eq!(seq.phase(), Phase::Settle);
    assert!(seq.tick(&clock).is_neutral());
    assert_eq!(seq.phase(), Phase::Running);

    let report = seq.tick(&clock);
    assert_eq!(report.buttons, Buttons::A);
}

#[test]
fn reset_rewinds_through_settle() {
    let actions = [
        Action::ticks(ActionKind::A, 1),
        Action::ticks(ActionKind::B, 1),
        Action::ticks(ActionKind::X, 100),
    ];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    for _ in 0..4 {
        seq.tick(&clock);
    }
    assert_eq!(seq.cursor(), 2);

    seq.reset();
    assert_eq!(seq.phase(), Phase::ResetPosition);

    assert!(seq.tick(&clock).is_neutral());
    assert_eq!(seq.phase(), Phase::Settle);
    assert_eq!(seq.cursor(), 0);
    assert_eq!(seq.ticks_in_action(), 0);
    assert!(seq.window().is_none());

    assert!(seq.tick(&clock).is_neutral());
    assert_eq!(seq.phase(), Phase::Running);
    assert_eq!(seq.tick(&clock).buttons, Buttons::A);
}

#[test]
fn finish_policy_idles_with_neutral_reports() {
    let actions = [Action::ticks(ActionKind::A, 1)];
    let mut seq = Sequencer::with_options(script(&actions, 0), 0, WrapPolicy::Finish);
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    assert_eq!(seq.tick(&clock).buttons, Buttons::A);
    assert_eq!(seq.idle_hint(), None);

    // Second cycle crosses the tick threshold and runs off the end.
    assert!(seq.tick(&clock).is_neutral());
    assert_eq!(seq.phase(), Phase::Finished);
    assert_eq!(seq.cursor(), 0);

    for _ in 0..5 {
        assert!(seq.tick(&clock).is_neutral());
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.echo_remaining(), 0);
    }
    assert_eq!(seq.idle_hint(), Some(config::FINISHED_IDLE_MS));
}

#[test]
fn finished_does_not_rearm_echo() {
    let actions = [Action::ticks(ActionKind::B, 1)];
    let mut seq = Sequencer::with_options(script(&actions, 0), 2, WrapPolicy::Finish);
    let clock = ManualClock::default();

    // Init, Settle, B (count 1), B (count 2 -> finish), each followed by 2 echoes.
    for _ in 0..12 {
        seq.tick(&clock);
    }
    assert_eq!(seq.phase(), Phase::Finished);

    let report = seq.tick(&clock);
    assert!(report.is_neutral());
    assert_eq!(seq.echo_remaining(), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Tick-based Advance Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn tick_based_action_advances_on_d_plus_one() {
    let actions = [
        Action::ticks(ActionKind::A, 5),
        Action::ticks(ActionKind::B, 5),
    ];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    for n in 1..=5 {
        let report = seq.tick(&clock);
        assert_eq!(report.buttons, Buttons::A);
        assert_eq!(seq.cursor(), 0, "advanced early on tick {n}");
        assert_eq!(seq.ticks_in_action(), n);
    }

    // Sixth tick still shows A but moves the cursor.
    let report = seq.tick(&clock);
    assert_eq!(report.buttons, Buttons::A);
    assert_eq!(seq.cursor(), 1);
    assert_eq!(seq.ticks_in_action(), 0);

    assert_eq!(seq.tick(&clock).buttons, Buttons::B);
}

#[test]
fn frozen_clock_still_advances_tick_based_actions() {
    let actions = [
        Action::ticks(ActionKind::B, 3),
        Action::ticks(ActionKind::A, 1),
    ];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::starting_at(42);
    warm_up(&mut seq, &clock);

    for _ in 0..4 {
        seq.tick(&clock);
    }
    assert_eq!(seq.cursor(), 1);
}

#[test]
fn frozen_clock_holds_time_based_action() {
    let actions = [
        Action::millis(ActionKind::A, 10),
        Action::ticks(ActionKind::B, 1),
    ];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::starting_at(500);
    warm_up(&mut seq, &clock);

    for n in 1..=50 {
        assert_eq!(seq.tick(&clock).buttons, Buttons::A);
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.ticks_in_action(), n);
    }
    assert_eq!(
        seq.window(),
        Some(Window {
            start: 500,
            deadline: 510
        })
    );
}

#[test]
fn immediate_action_advances_every_cycle() {
    let actions = [
        Action::ticks(ActionKind::A, 0),
        Action::millis(ActionKind::X, 0),
        Action::ticks(ActionKind::B, 2),
    ];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    assert_eq!(seq.tick(&clock).buttons, Buttons::A);
    assert_eq!(seq.cursor(), 1);
    assert_eq!(seq.tick(&clock).buttons, Buttons::X);
    assert_eq!(seq.cursor(), 2);
    assert!(seq.window().is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Time-based Advance Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn time_based_window_opens_and_rearms_from_deadline() {
    let actions = [
        Action::millis(ActionKind::A, 80),
        Action::millis(ActionKind::B, 40),
        Action::ticks(ActionKind::Nothing, 1),
    ];
    let mut seq = bare(script(&actions, 0));
    let mut clock = ManualClock::starting_at(1000);

    fn tick_at(seq: &mut Sequencer<'_>, clock: &mut ManualClock) -> JoystickReport {
        let report = seq.tick(&*clock);
        clock.advance(10);
        report
    }

    // Warm-up at 1000 and 1010.
    tick_at(&mut seq, &mut clock);
    tick_at(&mut seq, &mut clock);

    // 1020: window opens.
    assert_eq!(tick_at(&mut seq, &mut clock).buttons, Buttons::A);
    assert_eq!(
        seq.window(),
        Some(Window {
            start: 1020,
            deadline: 1100
        })
    );

    // 1030..=1100: not past the deadline yet.
    for _ in 0..8 {
        tick_at(&mut seq, &mut clock);
        assert_eq!(seq.cursor(), 0);
    }

    // 1110: past 1100, advance and re-arm 1100 + 40. `start` keeps the
    // anchor of the chain.
    tick_at(&mut seq, &mut clock);
    assert_eq!(seq.cursor(), 1);
    assert_eq!(
        seq.window(),
        Some(Window {
            start: 1020,
            deadline: 1140
        })
    );

    // 1120, 1130, 1140 hold B; 1150 advances.
    for _ in 0..3 {
        assert_eq!(tick_at(&mut seq, &mut clock).buttons, Buttons::B);
        assert_eq!(seq.cursor(), 1);
    }
    tick_at(&mut seq, &mut clock);
    assert_eq!(seq.cursor(), 2);

    // 1160 counts, 1170 wraps and closes the window.
    tick_at(&mut seq, &mut clock);
    assert!(tick_at(&mut seq, &mut clock).is_neutral());
    assert_eq!(seq.cursor(), 0);
    assert_eq!(seq.laps(), 1);
    assert!(seq.window().is_none());

    // 1180: a fresh window for the second lap.
    tick_at(&mut seq, &mut clock);
    assert_eq!(
        seq.window(),
        Some(Window {
            start: 1180,
            deadline: 1260
        })
    );
}

#[test]
fn late_poll_does_not_push_following_deadlines() {
    let actions = [
        Action::millis(ActionKind::A, 100),
        Action::millis(ActionKind::B, 100),
    ];
    let mut seq = bare(script(&actions, 0));
    let mut clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    seq.tick(&clock);
    assert_eq!(seq.window().map(|w| w.deadline), Some(100));

    // Host stalls; the poll lands 50 ms late.
    clock.set(150);
    seq.tick(&clock);
    assert_eq!(seq.cursor(), 1);
    assert_eq!(seq.window().map(|w| w.deadline), Some(200));

    clock.set(201);
    seq.tick(&clock);
    assert_eq!(seq.cursor(), 0);
    assert_eq!(seq.laps(), 1);
    assert_eq!(seq.window().map(|w| w.deadline), Some(300));
}

// ═══════════════════════════════════════════════════════════════════════════
// Wrap / Bounds Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn wrap_returns_to_loop_start_not_zero() {
    let actions = [
        Action::ticks(ActionKind::A, 1),
        Action::ticks(ActionKind::B, 1),
        Action::ticks(ActionKind::X, 1),
    ];
    let mut seq = bare(script(&actions, 1));
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    // A, A -> B
    seq.tick(&clock);
    seq.tick(&clock);
    assert_eq!(seq.cursor(), 1);

    for _ in 0..40 {
        seq.tick(&clock);
        assert!(seq.cursor() >= 1 && seq.cursor() < 3);
    }
    assert_eq!(seq.laps(), 10);
}

#[test]
fn wrap_cycle_emits_neutral_report() {
    let actions = [Action::ticks(ActionKind::Throw, 1)];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);

    let report = seq.tick(&clock);
    assert_eq!(report.ly, STICK_MIN);
    assert_eq!(report.buttons, Buttons::R);

    // Crossing the threshold wraps; that cycle is forced neutral.
    assert!(seq.tick(&clock).is_neutral());
    assert_eq!(seq.laps(), 1);
    assert_eq!(seq.tick(&clock).buttons, Buttons::R);
}

#[test]
fn cursor_stays_in_bounds_for_degenerate_scripts() {
    let single = [Action::ticks(ActionKind::Nothing, 0)];
    let immediates = [
        Action::ticks(ActionKind::A, 0),
        Action::millis(ActionKind::B, 0),
        Action::ticks(ActionKind::L, 0),
    ];
    let mixed = [
        Action::millis(ActionKind::Up, 1),
        Action::ticks(ActionKind::Down, 0),
        Action::millis(ActionKind::Triggers, 3),
    ];
    let scripts = [
        script(&single, 0),
        script(&immediates, 2),
        script(&mixed, 1),
    ];

    for s in scripts {
        let mut seq = Sequencer::new(s);
        let mut clock = ManualClock::default();
        for _ in 0..500 {
            let report = seq.tick(&clock);
            assert!(seq.cursor() < s.len());
            assert!(Hat::from_raw(report.hat as u8).is_some());
            clock.advance(1);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Echo Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn every_fresh_report_is_echoed_twice() {
    let mut seq = Sequencer::new(jump_script());
    let mut clock = ManualClock::default();
    let mut fresh = JoystickReport::neutral();

    for i in 0..5_000 {
        let report = seq.tick(&clock);
        if i % 3 == 0 {
            assert_eq!(seq.echo_remaining(), 2);
            fresh = report;
        } else {
            assert_eq!(report, fresh, "echo {i} differs");
        }
        assert_eq!(seq.last_report(), &fresh);
        clock.advance(1);
    }
}

#[test]
fn echo_window_freezes_sequencer_state() {
    let actions = [Action::ticks(ActionKind::A, 1)];
    let mut seq = Sequencer::new(script(&actions, 0));
    let clock = ManualClock::default();

    seq.tick(&clock);
    assert_eq!(seq.phase(), Phase::Settle);
    seq.tick(&clock);
    seq.tick(&clock);
    assert_eq!(seq.phase(), Phase::Settle);
    seq.tick(&clock);
    assert_eq!(seq.phase(), Phase::Running);
}

#[test]
fn press_then_timed_release_scenario() {
    // A for 5 ticks, then an 80 ms pause, looping from the start. Clock
    // moves 10 ms per poll; every fresh evaluation is echoed twice.
    let actions = [
        Action::ticks(ActionKind::A, 5),
        Action::millis(ActionKind::Nothing, 80),
    ];
    let mut seq = Sequencer::new(script(&actions, 0));
    let mut clock = ManualClock::default();

    for k in 1..=40u64 {
        let report = seq.tick(&clock);
        match k {
            // Init, Settle and their echoes.
            1..=6 => assert!(report.is_neutral(), "poll {k}"),
            // Six fresh A evaluations (7, 10, ..., 22) plus echoes.
            7..=24 => {
                assert_eq!(report.buttons, Buttons::A, "poll {k}");
                assert!(report.hat == Hat::Center && report.lx == 0x80 && report.ly == 0x80);
            }
            // Pause opens at 240 ms, deadline 320 ms, crossed at 330 ms.
            25..=36 => assert!(report.is_neutral(), "poll {k}"),
            37 => assert_eq!(report.buttons, Buttons::A, "poll {k}"),
            _ => {}
        }

        match k {
            21 => assert_eq!(seq.cursor(), 0),
            22 => assert_eq!(seq.cursor(), 1),
            25 => assert_eq!(
                seq.window(),
                Some(Window {
                    start: 240,
                    deadline: 320
                })
            ),
            33 => assert_eq!(seq.cursor(), 1),
            34 => {
                assert_eq!(seq.cursor(), 0);
                assert_eq!(seq.laps(), 1);
                // Re-armed with the tick-based action's zero budget.
                assert_eq!(seq.window().map(|w| w.deadline), Some(320));
            }
            _ => {}
        }

        clock.advance(10);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Indicator / Status Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn indicator_tracks_a_b_presses() {
    let actions = [
        Action::ticks(ActionKind::B, 1),
        Action::ticks(ActionKind::Up, 1),
        Action::ticks(ActionKind::Nothing, 1),
    ];
    let mut seq = bare(script(&actions, 0));
    let clock = ManualClock::default();
    warm_up(&mut seq, &clock);
    assert!(!seq.indicator());

    seq.tick(&clock);
    assert!(seq.indicator());
    seq.tick(&clock);
    seq.tick(&clock);
    assert_eq!(seq.cursor(), 1);
    assert!(seq.indicator(), "directions leave the indicator alone");
    seq.tick(&clock);
    seq.tick(&clock);
    assert!(!seq.indicator());

    let status = seq.status();
    assert_eq!(status.phase, Phase::Running);
    assert_eq!(status.cursor, 2);
    assert!(!status.indicator);
}
