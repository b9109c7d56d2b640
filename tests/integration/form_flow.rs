//! End-to-end form tests.
//!
//! Every scenario starts on the home screen, opens the form with Enter and
//! drives it with keystrokes, pastes and clock ticks.

use crossterm::event::KeyCode;

use datenum::bindings::UNDEFINED;
use datenum::input::MAX_INPUT_LENGTH;
use datenum::tea::{Field, Message, Screen};

use crate::fixtures::{at, ctrl, key, AppHarness, NOW};

/// Open the form and deliver the first tick.
async fn open_form(harness: &mut AppHarness) {
    harness.send(key(KeyCode::Enter));
    let tick = harness.rx.recv().await.expect("first tick");
    harness.send(tick);
}

/// Test: Dividing through the form
/// Given the form is open
/// When 10 and 4 are typed into dividend and divisor
/// Then the quotient shows 2.500 and both operands are grouped
#[tokio::test(start_paused = true)]
async fn test_division_happy_path() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;

    h.send(key(KeyCode::Tab));
    h.type_str("1000000");
    h.send(key(KeyCode::Tab));
    h.type_str("16");

    let outputs = &h.model.form.outputs;
    assert_eq!(outputs.dividend_formatted, "1,000,000");
    assert_eq!(outputs.divisor_formatted, "16");
    assert_eq!(outputs.quotient, "62,500.000");
}

/// Test: Half-even rounding
/// Ties at the third decimal round to the even neighbour.
#[tokio::test(start_paused = true)]
async fn test_quotient_rounds_half_even() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;

    h.send(key(KeyCode::Tab));
    h.type_str("1");
    h.send(key(KeyCode::Tab));
    h.type_str("16");
    assert_eq!(h.model.form.outputs.quotient, "0.062");

    h.send(key(KeyCode::BackTab));
    h.send(ctrl('u'));
    h.type_str("3");
    assert_eq!(h.model.form.outputs.quotient, "0.188");
}

/// Test: Division by zero
/// A zero divisor shows "undefined"; fixing the divisor recovers.
#[tokio::test(start_paused = true)]
async fn test_division_by_zero_recovers() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;

    h.send(key(KeyCode::Tab));
    h.type_str("7");
    h.send(key(KeyCode::Tab));
    h.type_str("0");
    assert_eq!(h.model.form.outputs.quotient, UNDEFINED);

    h.send(key(KeyCode::Backspace));
    assert_eq!(h.model.form.outputs.quotient, "");
    h.type_str("2");
    assert_eq!(h.model.form.outputs.quotient, "3.500");
}

/// Test: Huge operands
/// 64-digit operands divide exactly with no overflow.
#[tokio::test(start_paused = true)]
async fn test_sixty_four_digit_operands() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;

    let nines = "9".repeat(MAX_INPUT_LENGTH);
    h.send(key(KeyCode::Tab));
    h.send(Message::Paste(nines.clone()));
    h.send(key(KeyCode::Tab));
    h.send(Message::Paste(nines));

    assert_eq!(h.model.form.outputs.quotient, "1.000");

    // One more digit would exceed the limit and is rejected.
    h.type_str("9");
    assert_eq!(h.model.form.divisor.text().len(), MAX_INPUT_LENGTH);
}

/// Test: Input filter
/// Non-digit keystrokes and pastes leave the field untouched.
#[tokio::test(start_paused = true)]
async fn test_rejected_edits_leave_field_unchanged() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;

    h.type_str("12");
    h.send(key(KeyCode::Home));
    h.type_str("-");
    h.send(Message::Paste("3.5".to_string()));
    h.send(Message::Paste(" 4".to_string()));

    assert_eq!(h.model.form.date_offset.text(), "12");
    assert_eq!(h.model.form.date_offset.cursor(), 0);

    h.send(Message::Paste("9".to_string()));
    assert_eq!(h.model.form.date_offset.text(), "912");
}

/// Test: Date offset follows typing
/// Each accepted edit of the offset field recomputes the offset label.
#[tokio::test(start_paused = true)]
async fn test_date_offset_label_tracks_edits() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;
    assert!(h
        .model
        .form
        .outputs
        .date_offset_from_today
        .starts_with("0 days from today: October 18, 2026"));

    h.type_str("14");
    assert!(h
        .model
        .form
        .outputs
        .date_offset_from_today
        .starts_with("14 days from today: November 1, 2026"));

    h.type_str("00");
    assert!(h
        .model
        .form
        .outputs
        .date_offset_from_today
        .starts_with("1,400 days from today: August 18, 2030"));
}

/// Test: Offset beyond the calendar
/// An offset past the representable range shows the warning, not a date.
#[tokio::test(start_paused = true)]
async fn test_huge_offset_shows_out_of_range() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;

    h.type_str("999999999999");
    assert_eq!(
        h.model.form.outputs.date_offset_from_today,
        "Offset outside allowed range"
    );
    assert!(h.model.form.outputs.today_is.starts_with("Today is"));

    h.send(ctrl('u'));
    h.type_str("1");
    assert!(h
        .model
        .form
        .outputs
        .date_offset_from_today
        .starts_with("1 days from today: October 19, 2026"));
}

/// Test: Field edits are independent
/// Editing one field recomputes only the labels that read it.
#[tokio::test(start_paused = true)]
async fn test_edits_do_not_touch_unrelated_labels() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;
    let today = h.model.form.outputs.today_is.clone();

    h.send(key(KeyCode::Tab));
    h.type_str("5");
    let offset_label = h.model.form.outputs.date_offset_from_today.clone();

    h.send(key(KeyCode::Tab));
    h.type_str("2");

    assert_eq!(h.model.form.outputs.today_is, today);
    assert_eq!(h.model.form.outputs.date_offset_from_today, offset_label);
    assert_eq!(h.model.form.outputs.quotient, "2.500");
}

/// Test: Navigation round trip
/// Leaving the form and coming back starts from a clean form.
#[tokio::test(start_paused = true)]
async fn test_navigation_round_trip() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;
    h.type_str("3");
    h.send(key(KeyCode::Tab));
    assert_eq!(h.model.form.focus, Field::Dividend);

    h.send(key(KeyCode::Esc));
    assert_eq!(h.model.screen, Screen::Home);

    open_form(&mut h).await;
    assert_eq!(h.model.screen, Screen::Form);
    assert_eq!(h.model.form.focus, Field::DateOffset);
    assert!(h.model.form.date_offset.is_empty());
    assert_eq!(h.model.form.now, Some(at(NOW)));
}

/// Test: Snapshot mirrors the model
/// The render snapshot carries localized labels and the focused cursor.
#[tokio::test(start_paused = true)]
async fn test_snapshot_after_edits() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;
    h.send(key(KeyCode::Down));
    h.type_str("123");
    h.send(key(KeyCode::Left));

    let state = h.model.snapshot();
    assert_eq!(state.screen, Screen::Form);
    assert_eq!(state.fields[1].label, "Dividend");
    assert_eq!(state.fields[1].formatted, "123");
    assert_eq!(state.fields[1].cursor, 2);
    assert!(state.fields[1].focused);
    assert!(!state.fields[0].focused);
    assert!(state.today_is.starts_with("Today is October 18, 2026"));
}

/// Test: Quit from the form
/// Ctrl-C stops the clock before quitting.
#[tokio::test(start_paused = true)]
async fn test_ctrl_c_from_form() {
    let mut h = AppHarness::fixed("en-US");
    open_form(&mut h).await;
    assert!(h.actor.is_running());

    h.send(ctrl('c'));
    assert!(h.quit);
    assert!(!h.actor.is_running());
}
