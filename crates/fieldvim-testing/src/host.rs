//! A scripted host: in-memory implementations of every capability trait,
//! with a log of everything the engine asked for.

use async_trait::async_trait;
use fieldvim_engine::{
    FocusProvider, Host, InjectError, KeyInjector, ModeSink, SelectionProvider, SelectionRange,
};
use fieldvim_keys::{KeyCombo, Mode, Platform};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct HostState {
    injected: Mutex<Vec<KeyCombo>>,
    modes: Mutex<Vec<Mode>>,
    focused: AtomicBool,
    selection: Mutex<Option<SelectionRange>>,
    failing: AtomicBool,
    /// Combo whose injection collapses the selection, simulating an edit
    /// that consumes it (e.g. a cut).
    collapse_on: Mutex<Option<KeyCombo>>,
}

/// Cloneable scripted host. All clones share the same state, so a clone can
/// be handed to the manager while the test keeps another for assertions.
#[derive(Clone, Default)]
pub struct ScriptedHost {
    inner: Arc<HostState>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle this host's capabilities for a manager.
    pub fn host(&self, platform: Platform, location: &str) -> Host {
        Host {
            keys: Arc::new(self.clone()),
            selection: Arc::new(self.clone()),
            focus: Arc::new(self.clone()),
            ui: Arc::new(self.clone()),
            platform,
            location: location.to_string(),
        }
    }

    /// Script whether an editable element has focus.
    pub fn focus_editable(&self, focused: bool) {
        self.inner.focused.store(focused, Ordering::SeqCst);
    }

    /// Script a selection.
    pub fn select(&self, anchor: usize, focus: usize) {
        *self.inner.selection.lock() = Some(SelectionRange::new(anchor, focus));
    }

    /// Script the absence of a selection.
    pub fn clear_selection(&self) {
        *self.inner.selection.lock() = None;
    }

    /// The current scripted selection (also reflects `set_selection` calls
    /// made by the engine).
    pub fn current_selection(&self) -> Option<SelectionRange> {
        *self.inner.selection.lock()
    }

    /// Make every injection fail until turned off again.
    pub fn fail_injections(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Clear the selection when this combo is injected.
    pub fn collapse_selection_on(&self, combo: &str) {
        *self.inner.collapse_on.lock() =
            Some(KeyCombo::parse(combo).expect("collapse combo parses"));
    }

    /// Canonical strings of every injected combo, in order.
    pub fn injected_keys(&self) -> Vec<String> {
        self.inner
            .injected
            .lock()
            .iter()
            .map(KeyCombo::to_string)
            .collect()
    }

    /// Drain the injection log.
    pub fn take_injected(&self) -> Vec<String> {
        std::mem::take(&mut *self.inner.injected.lock())
            .iter()
            .map(KeyCombo::to_string)
            .collect()
    }

    /// Every mode the engine announced, in order.
    pub fn mode_log(&self) -> Vec<Mode> {
        self.inner.modes.lock().clone()
    }

    /// The most recently announced mode.
    pub fn last_mode(&self) -> Option<Mode> {
        self.inner.modes.lock().last().copied()
    }
}

#[async_trait]
impl KeyInjector for ScriptedHost {
    async fn press_key(&self, combo: &KeyCombo) -> Result<(), InjectError> {
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(InjectError::Rejected("scripted failure".to_string()));
        }
        if self.inner.collapse_on.lock().as_ref() == Some(combo) {
            *self.inner.selection.lock() = None;
        }
        self.inner.injected.lock().push(combo.clone());
        Ok(())
    }
}

impl ModeSink for ScriptedHost {
    fn set_mode(&self, mode: Mode) {
        self.inner.modes.lock().push(mode);
    }
}

impl SelectionProvider for ScriptedHost {
    fn is_selecting(&self) -> bool {
        self.inner
            .selection
            .lock()
            .map_or(false, |s| !s.is_collapsed())
    }

    fn selection(&self) -> Option<SelectionRange> {
        *self.inner.selection.lock()
    }

    fn set_selection(&self, range: SelectionRange) {
        *self.inner.selection.lock() = Some(range);
    }
}

impl FocusProvider for ScriptedHost {
    fn is_editable_focused(&self) -> bool {
        self.inner.focused.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_injection_log() {
        let host = ScriptedHost::new();
        let combo = KeyCombo::parse("C-x").unwrap();
        host.press_key(&combo).await.unwrap();
        assert_eq!(host.injected_keys(), vec!["C-x"]);
        assert_eq!(host.take_injected(), vec!["C-x"]);
        assert!(host.injected_keys().is_empty());
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let host = ScriptedHost::new();
        host.fail_injections(true);
        let combo = KeyCombo::parse("Enter").unwrap();
        assert!(host.press_key(&combo).await.is_err());
        assert!(host.injected_keys().is_empty());
    }

    #[test]
    fn test_selection_scripting() {
        let host = ScriptedHost::new();
        assert!(!host.is_selecting());
        host.select(2, 7);
        assert!(host.is_selecting());
        host.select(3, 3);
        assert!(!host.is_selecting());
        host.clear_selection();
        assert_eq!(host.current_selection(), None);
    }
}
