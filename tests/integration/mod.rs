//! Integration test suite for datenum.
//!
//! These tests drive the TEA store the way the logic thread does: messages
//! go through `update`, the returned commands start and stop a real clock
//! actor, and ticks flow back over the message channel.
//!
//! # Test Categories
//!
//! - `form_flow`: Keystrokes, paste and derived labels end to end
//! - `clock_lifecycle`: Clock actor start/stop tied to form navigation
//! - `localization`: Locale resolution, bundles and overrides, headless output
//! - `performance`: Binding refresh and frame rendering thresholds
//!
//! # CI Compatibility
//!
//! Clocks are fixed or stepped and tokio time is paused, so nothing depends
//! on the wall clock or the host locale.

mod fixtures;

mod clock_lifecycle;
mod form_flow;
