//! Clock actor lifecycle tests.
//!
//! The form owns the repeating timer: opening it starts ticking, leaving it
//! stops ticking, and ticks that arrive late are ignored.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use crossterm::event::KeyCode;

use datenum::tea::{Command, Message, Screen};

use crate::fixtures::{at, ctrl, instant, key, AppHarness, SteppingClock, NOW};

const INTERVAL: Duration = Duration::from_millis(500);

fn stepping_harness() -> (AppHarness, Arc<SteppingClock>) {
    let clock = Arc::new(SteppingClock::new(instant(NOW), TimeDelta::seconds(1)));
    let harness = AppHarness::new("en-US", clock.clone(), INTERVAL);
    (harness, clock)
}

/// Test: Labels appear with the first tick
/// Before any tick the clock-driven labels are empty; the first tick fills them.
#[tokio::test(start_paused = true)]
async fn test_first_tick_is_immediate() {
    let (mut h, _clock) = stepping_harness();
    h.send(key(KeyCode::Enter));
    assert_eq!(h.commands, vec![Command::StartClock]);
    assert_eq!(h.model.form.outputs.today_is, "");

    let tick = h.rx.recv().await.expect("tick");
    h.send(tick);
    assert!(h
        .model
        .form
        .outputs
        .today_is
        .starts_with("Today is October 18, 2026 at 3:04:05 PM"));
}

/// Test: Ticks refresh "today" every period
/// Given a clock that advances one second per read
/// When three periods elapse
/// Then the label shows the latest sample
#[tokio::test(start_paused = true)]
async fn test_ticks_refresh_today_label() {
    let (mut h, clock) = stepping_harness();
    h.send(key(KeyCode::Enter));

    tokio::time::sleep(INTERVAL * 3 + Duration::from_millis(1)).await;
    assert_eq!(h.pump_ticks(), 4);
    assert_eq!(clock.reads(), 4);
    assert!(h
        .model
        .form
        .outputs
        .today_is
        .starts_with("Today is October 18, 2026 at 3:04:08 PM"));
    assert_eq!(h.model.form.now, Some(at("2026-10-18T15:04:08+02:00")));
}

/// Test: Going back stops the timer
/// No clock reads happen once the form is left.
#[tokio::test(start_paused = true)]
async fn test_go_back_stops_sampling() {
    let (mut h, clock) = stepping_harness();
    h.send(key(KeyCode::Enter));
    tokio::time::sleep(INTERVAL + Duration::from_millis(1)).await;

    h.send(key(KeyCode::Esc));
    assert_eq!(h.model.screen, Screen::Home);
    assert!(!h.actor.is_running());
    let reads = clock.reads();

    tokio::time::sleep(INTERVAL * 10).await;
    assert_eq!(clock.reads(), reads);
}

/// Test: Late ticks are dropped
/// Ticks still queued when the form closes do not recompute the hidden form.
#[tokio::test(start_paused = true)]
async fn test_queued_ticks_after_go_back_are_ignored() {
    let (mut h, _clock) = stepping_harness();
    h.send(key(KeyCode::Enter));
    let first = h.rx.recv().await.expect("tick");
    h.send(first);
    let today = h.model.form.outputs.today_is.clone();

    tokio::time::sleep(INTERVAL * 2 + Duration::from_millis(1)).await;
    h.send(key(KeyCode::Esc));
    h.model.dirty = false;

    assert_eq!(h.pump_ticks(), 2);
    assert_eq!(h.model.form.outputs.today_is, today);
    assert!(!h.model.dirty);
}

/// Test: Re-entering restarts the timer
/// A second visit gets a fresh timer and fresh ticks.
#[tokio::test(start_paused = true)]
async fn test_reenter_restarts_timer() {
    let (mut h, _clock) = stepping_harness();
    h.send(key(KeyCode::Enter));
    h.send(key(KeyCode::Esc));
    h.pump_ticks();

    h.send(key(KeyCode::Enter));
    assert!(h.actor.is_running());
    assert_eq!(
        h.commands,
        vec![Command::StartClock, Command::StopClock, Command::StartClock]
    );

    let tick = h.rx.recv().await.expect("tick");
    assert!(matches!(tick, Message::Tick(_)));
    h.send(tick);
    assert!(!h.model.form.outputs.today_is.is_empty());
}

/// Test: Quit from home never touches the timer
#[tokio::test(start_paused = true)]
async fn test_quit_from_home_sends_no_stop() {
    let (mut h, clock) = stepping_harness();
    h.send(ctrl('c'));
    assert!(h.quit);
    assert_eq!(h.commands, vec![Command::Quit]);
    assert_eq!(clock.reads(), 0);
}

/// Test: Clock and edits interleave
/// Edits between ticks keep the latest clock sample.
#[tokio::test(start_paused = true)]
async fn test_edits_between_ticks_use_latest_sample() {
    let (mut h, _clock) = stepping_harness();
    h.send(key(KeyCode::Enter));
    tokio::time::sleep(INTERVAL + Duration::from_millis(1)).await;
    h.pump_ticks();

    h.type_str("2");
    assert!(h
        .model
        .form
        .outputs
        .date_offset_from_today
        .starts_with("2 days from today: October 20, 2026 at 3:04:06 PM"));
}
