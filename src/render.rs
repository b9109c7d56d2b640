use std::sync::atomic::{AtomicU64, Ordering};

use crate::tea::Screen;

/// One numeric field as the render thread sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub text: String,
    pub cursor: usize,
    pub focused: bool,
    /// Grouped rendering of `text`; empty for the date-offset field.
    pub formatted: String,
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Immutable snapshot sent from the logic thread to the render thread.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub version: u64,
    pub screen: Screen,
    pub title: String,
    pub locale: String,
    pub home_title: String,
    pub home_entry: String,
    pub today_is: String,
    pub date_offset_from_today: String,
    pub fields: Vec<FieldView>,
    pub result_label: String,
    pub quotient: String,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
}
