//! Command execution: sequential key injection with settle delays, mode
//! switches and the two selection built-ins.

use crate::capabilities::SelectionDirection;
use crate::gate::INJECTION_TIMEOUT;
use crate::manager::ModeManager;
use crate::state::SessionState;
use fieldvim_keys::{CommandName, KeyCombo};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{error, warn};

/// Minimum pause after every injected key. Without it, long sequences drop
/// keys downstream.
pub(crate) const KEY_SETTLE: Duration = Duration::from_millis(1);

/// Pause between a completed motion and its deferred operator.
pub(crate) const OPERATOR_SETTLE: Duration = Duration::from_millis(20);

impl ModeManager {
    /// Run a command list strictly in order, each command awaited to
    /// completion before the next starts.
    pub(crate) async fn perform_commands(&mut self, commands: &[CommandName]) {
        let platform = self.host.platform;
        for &name in commands {
            let command = name.command();

            for combo in command.keys_for(platform) {
                self.press_key(combo).await;
            }

            // Apply the command's mode switch immediately, so a later
            // command in the same list observes the new mode.
            if let Some(mode) = command.mode {
                self.change_state(SessionState::active(mode), "command", false);
            }

            match name {
                CommandName::ExitSelection => self.exit_selection().await,
                CommandName::SwapSelectionDirection => self.swap_selection_direction(),
                _ => {}
            }
        }
    }

    /// Request one key injection, bounded by the injection timeout.
    /// Failures and timeouts are recoverable: the executor proceeds as if
    /// the key had been pressed.
    async fn press_key(&self, combo: &KeyCombo) {
        self.gate.begin_injection(combo.clone());
        match timeout(INJECTION_TIMEOUT, self.host.keys.press_key(combo)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!(key = %combo, %err, "key injection failed"),
            Err(_) => warn!(key = %combo, "key injection timed out"),
        }
        sleep(KEY_SETTLE).await;
        self.gate.end_injection();
    }

    /// Collapse the selection to its directional edge: the right edge of a
    /// forward selection, else the left edge.
    async fn exit_selection(&mut self) {
        let direction = self.host.selection.selection().map(|s| s.direction());
        let edge = if direction == Some(SelectionDirection::Backward) {
            CommandName::Left
        } else {
            CommandName::Right
        };
        let platform = self.host.platform;
        for combo in edge.command().keys_for(platform) {
            self.press_key(combo).await;
        }
    }

    /// Reverse which end of the selection is anchor versus focus, using the
    /// selection capability directly; no key injection involved.
    fn swap_selection_direction(&self) {
        if let Some(selection) = self.host.selection.selection() {
            self.host.selection.set_selection(selection.swapped());
        }
    }
}
