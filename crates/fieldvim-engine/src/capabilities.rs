//! Capability traits supplied by the surrounding host.
//!
//! The engine never inspects document structure itself; a host embeds it by
//! implementing these traits. A single document and a frame tree are both
//! valid implementations; frame traversal is entirely the host's concern.

use async_trait::async_trait;
use fieldvim_keys::{KeyCombo, Mode, Platform};
use std::sync::Arc;
use thiserror::Error;

/// Failure injecting a key. Recoverable: the executor logs it and proceeds
/// as if the key had been pressed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    /// The host rejected the injection request.
    #[error("key injection rejected: {0}")]
    Rejected(String),
    /// The injection mechanism is gone (tab closed, channel dropped).
    #[error("key injection unavailable")]
    Unavailable,
}

/// Simulated key presses. `press_key` requests a key down+up for the combo;
/// it may reject or never resolve, so the executor awaits it under a
/// bounded timeout.
#[async_trait]
pub trait KeyInjector: Send + Sync {
    async fn press_key(&self, combo: &KeyCombo) -> Result<(), InjectError>;
}

/// Mode change notifications, for UI indication.
pub trait ModeSink: Send + Sync {
    fn set_mode(&self, mode: Mode);
}

/// Which end of a selection holds the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    Forward,
    Backward,
}

/// Selection endpoints as host-defined offsets. The anchor is where the
/// selection started; the focus is the moving end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: usize,
    pub focus: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    /// Whether the selection is empty.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn direction(&self) -> SelectionDirection {
        if self.focus < self.anchor {
            SelectionDirection::Backward
        } else {
            SelectionDirection::Forward
        }
    }

    /// The same range with anchor and focus exchanged.
    pub fn swapped(self) -> Self {
        Self {
            anchor: self.focus,
            focus: self.anchor,
        }
    }
}

/// Read and write access to the active selection.
pub trait SelectionProvider: Send + Sync {
    /// Whether a non-empty selection exists.
    fn is_selecting(&self) -> bool;
    /// The selection endpoints, if any selection (even collapsed) exists.
    fn selection(&self) -> Option<SelectionRange>;
    /// Replace the selection endpoints.
    fn set_selection(&self, range: SelectionRange);
}

/// Focus inspection.
pub trait FocusProvider: Send + Sync {
    /// Whether an editable element currently has focus.
    fn is_editable_focused(&self) -> bool;
}

/// The bundle of capabilities a manager is constructed with.
#[derive(Clone)]
pub struct Host {
    pub keys: Arc<dyn KeyInjector>,
    pub selection: Arc<dyn SelectionProvider>,
    pub focus: Arc<dyn FocusProvider>,
    pub ui: Arc<dyn ModeSink>,
    /// Host platform string, deciding which shortcut convention applies.
    pub platform: Platform,
    /// The active page location, for site-scoped settings.
    pub location: String,
}
