//! # fieldvim-keys
//!
//! Key and command model for fieldvim.
//!
//! ## Features
//!
//! - Canonical key combos (base key label + Alt/Control/Meta/Shift modifiers)
//! - Keyspec normalization for the configuration language
//! - Static registry of built-in commands with per-platform key sequences
//! - Per-mode keymaps compiled into modifier-mask dispatch tables

mod combo;
mod command;
mod dispatch;
mod keymap;
mod keyspec;
mod mode;

pub use combo::{KeyCombo, KeyInput, KeyspecError, Modifiers};
pub use command::{registry, Command, CommandGroup, CommandName, Platform, UnknownCommand};
pub use dispatch::{DispatchTable, TableEntry};
pub use keymap::{Action, ActionKind, Keymap};
pub use keyspec::normalize_keyspec;
pub use mode::{ActiveMode, Mode};

/// Helper to create an unmodified key combo for a known-good label.
///
/// Panics on an unrecognized label, so it is only suitable for static data
/// and tests.
pub fn key(base: &str) -> KeyCombo {
    KeyCombo::parse(base).expect("recognized key label")
}
