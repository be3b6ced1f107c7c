//! The mode manager: owns the session state, dispatches key events and
//! reconciles mode against focus, selection and pointer signals.

use crate::capabilities::Host;
use crate::executor::OPERATOR_SETTLE;
use crate::gate::{Admission, InputGate};
use crate::state::SessionState;
use fieldvim_config::{parse_configuration, AutoSwitchMode, Configuration, ParseError, Settings};
use fieldvim_keys::{ActionKind, ActiveMode, DispatchTable, KeyInput, Mode, TableEntry};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Delay before the single-flight flag is released after a bound key, so
/// the trailing selection recheck observes the final selection state.
const RELEASE_DELAY: Duration = Duration::from_millis(10);

/// What the host should do with the original key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Let the event through untouched.
    Pass,
    /// Suppress the event's default behavior; nothing was executed.
    Block,
    /// The event was consumed by a binding.
    Handled,
}

/// What kind of event was seen last, for the reconciler's suppression
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastEvent {
    Bound,
    Unbound,
    Other,
}

/// Compiled dispatch tables, one per keymap-bearing mode. Insert mode is
/// not repeat-capable; the others get synthetic digit entries.
struct ModeTables {
    insert: DispatchTable,
    normal: DispatchTable,
    visual: DispatchTable,
    motion: DispatchTable,
}

impl ModeTables {
    fn compile(config: &Configuration) -> Self {
        Self {
            insert: DispatchTable::compile(&config.insert, false),
            normal: DispatchTable::compile(&config.normal, true),
            visual: DispatchTable::compile(&config.visual, true),
            motion: DispatchTable::compile(&config.motion, true),
        }
    }

    fn for_mode(&self, mode: Mode) -> Option<&DispatchTable> {
        match mode {
            Mode::Insert => Some(&self.insert),
            Mode::Normal => Some(&self.normal),
            Mode::Visual => Some(&self.visual),
            Mode::Motion => Some(&self.motion),
            Mode::Off => None,
        }
    }
}

/// One manager per watched document group. All session state lives here
/// and is mutated only through the transition methods below.
pub struct ModeManager {
    pub(crate) host: Host,
    config: Configuration,
    pub(crate) settings: Settings,
    tables: ModeTables,
    pub(crate) state: SessionState,
    pub(crate) gate: InputGate,
    last_event: LastEvent,
    was_selecting: bool,
}

impl ModeManager {
    /// Create a manager. The initial mode is derived from the current focus
    /// state and the configured defaults, and announced to the host.
    pub fn new(host: Host, config: Configuration) -> Self {
        let settings = config.settings_for(&host.location);
        let tables = ModeTables::compile(&config);
        let was_selecting = host.selection.is_selecting();

        let mut manager = Self {
            host,
            config,
            settings,
            tables,
            state: SessionState::Off,
            gate: InputGate::new(),
            last_event: LastEvent::Other,
            was_selecting,
        };
        let initial = SessionState::resting(manager.default_mode());
        manager.change_state(initial, "init", true);
        manager
    }

    /// Re-parse configuration text and replace the active configuration.
    /// On error the previous configuration stays in effect.
    pub fn update_config(&mut self, text: &str) -> Result<(), ParseError> {
        let config = parse_configuration(text)?;
        self.set_configuration(config);
        Ok(())
    }

    /// Replace the active configuration wholesale.
    pub fn set_configuration(&mut self, config: Configuration) {
        self.settings = config.settings_for(&self.host.location);
        self.tables = ModeTables::compile(&config);
        self.config = config;
    }

    /// The active configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// The settings in effect for this manager's location.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current mode.
    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// A handle to the synchronous admission gate, for the host's raw event
    /// listeners.
    pub fn gate(&self) -> InputGate {
        self.gate.clone()
    }

    /// Switch between off and the context-appropriate default mode.
    pub fn toggle_mode(&mut self) {
        if self.state.is_off() {
            let mode = match self.default_mode() {
                Mode::Off => Mode::Normal,
                mode => mode,
            };
            self.change_state(SessionState::resting(mode), "toggle", false);
        } else {
            self.change_state(SessionState::Off, "toggle", false);
        }
    }

    /// Handle a key-down event.
    pub async fn on_key_down(&mut self, input: KeyInput) -> KeyDisposition {
        if input.is_modifier_key() {
            return KeyDisposition::Pass;
        }
        if self.state.is_off() {
            return KeyDisposition::Pass;
        }

        match self.gate.admit(&input) {
            Admission::Echo => {
                debug!(key = %input.key, "echo of injected key");
                KeyDisposition::Pass
            }
            Admission::Blocked => {
                debug!(key = %input.key, "blocked overlapping key");
                KeyDisposition::Block
            }
            Admission::User => self.dispatch_key(&input).await,
        }
    }

    async fn dispatch_key(&mut self, input: &KeyInput) -> KeyDisposition {
        let entry = self
            .tables
            .for_mode(self.state.mode())
            .and_then(|table| table.lookup(input))
            .cloned();
        let Some(entry) = entry else {
            return self.on_unbound(input);
        };

        self.gate.begin_handling();
        self.last_event = LastEvent::Bound;
        let disposition = self.run_entry(input, entry).await;
        self.settle_and_release().await;
        disposition
    }

    async fn run_entry(&mut self, input: &KeyInput, entry: TableEntry) -> KeyDisposition {
        // Effective repeat for this key, clamped to the configured maximum.
        let mut count = self.state.repeat().unwrap_or(1);
        if let Some(max) = self.settings.max_repeat() {
            count = count.min(max);
        }

        let action = match entry {
            // Zero defers to its explicit binding until digits accumulate.
            TableEntry::Zero { bound: Some(action) } if self.state.repeat().is_none() => action,
            TableEntry::Zero { .. } => {
                self.accumulate_digit(0);
                return KeyDisposition::Handled;
            }
            TableEntry::Digit(digit) => {
                self.accumulate_digit(digit);
                return KeyDisposition::Handled;
            }
            TableEntry::Action(action) => action,
        };

        // Any recognized non-digit action clears the accumulation.
        self.change_state(self.state.clone().with_repeat(None), "norepeat", false);

        debug!(key = %input.key, commands = ?action.commands, "bound key");

        if action.kind == ActionKind::Operator {
            match &self.state {
                SessionState::Motion { .. } => {
                    error!("cannot perform an operator as a motion");
                    return KeyDisposition::Handled;
                }
                SessionState::Active { mode, .. } => {
                    let previous = *mode;
                    self.change_state(
                        SessionState::Motion {
                            repeat: None,
                            operator: action.commands,
                            previous,
                        },
                        "operator",
                        false,
                    );
                    return KeyDisposition::Handled;
                }
                SessionState::Off => unreachable!("keys are not dispatched while off"),
            }
        }

        for _ in 0..count {
            self.perform_commands(&action.commands).await;
        }

        // A command list that ran while in motion mode was the motion
        // completing a pending operator: run the operator once, then
        // restore the previous mode if nothing else changed it.
        if let SessionState::Motion {
            operator, previous, ..
        } = &self.state
        {
            let operator = operator.clone();
            let previous = *previous;
            sleep(OPERATOR_SETTLE).await;
            self.perform_commands(&operator).await;
            if matches!(self.state, SessionState::Motion { .. }) {
                self.change_state(SessionState::active(previous), "motion", false);
            }
        }

        self.reconcile_selection();
        KeyDisposition::Handled
    }

    fn accumulate_digit(&mut self, digit: u8) {
        let repeat = self
            .state
            .repeat()
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(u32::from(digit));
        debug!(digit, repeat, "repeat digit");
        self.change_state(self.state.clone().with_repeat(Some(repeat)), "repeat", false);
    }

    fn on_unbound(&mut self, input: &KeyInput) -> KeyDisposition {
        self.last_event = LastEvent::Unbound;
        debug!(key = %input.key, "unbound key");

        match &self.state {
            // An unrecognized motion cancels the pending operator.
            SessionState::Motion { previous, .. } => {
                let previous = *previous;
                self.change_state(SessionState::active(previous), "nomotion", false);
                KeyDisposition::Pass
            }
            SessionState::Active { .. } => {
                let mode = self.state.mode();
                if self.settings.block_insertions(mode)
                    && !input.control
                    && !input.alt
                    && !input.meta
                {
                    KeyDisposition::Block
                } else {
                    KeyDisposition::Pass
                }
            }
            SessionState::Off => KeyDisposition::Pass,
        }
    }

    async fn settle_and_release(&mut self) {
        sleep(RELEASE_DELAY).await;
        self.gate.end_handling();
        self.reconcile_selection();
    }

    /// Selection-change entry point.
    pub fn on_selection_change(&mut self) {
        self.reconcile_selection();
    }

    /// Focus/blur entry point.
    pub fn on_focus_change(&mut self) {
        if self.gate.is_handling() {
            return;
        }
        let editable = self.host.focus.is_editable_focused();
        debug!(editable, "focus changed");

        // A binding that moves focus into an input must not flip the mode.
        if editable && self.last_event == LastEvent::Bound {
            return;
        }

        if !self.state.is_off() && self.settings.auto_switch_mode() != AutoSwitchMode::Never {
            self.change_state(SessionState::resting(self.default_mode()), "focus", true);
        }
        self.reconcile_selection();
    }

    /// Pointer-down entry point.
    pub fn on_pointer_down(&mut self) {
        debug!("pointer down");
        self.last_event = LastEvent::Other;
        if self.settings.auto_switch_mode() == AutoSwitchMode::Always {
            self.on_focus_change();
        }
        self.reconcile_selection();
    }

    fn reconcile_selection(&mut self) {
        let selecting = self.host.selection.is_selecting();
        if selecting == self.was_selecting {
            return;
        }
        self.was_selecting = selecting;
        debug!(selecting, "selection changed");

        // A change produced by the bound key being handled must not flip
        // the mode, or commands that collapse the selection would
        // oscillate. The delta above is still consumed.
        if self.gate.is_handling() && self.last_event == LastEvent::Bound {
            return;
        }

        if self.state.is_off() {
            return;
        }

        if let SessionState::Motion { previous, .. } = &self.state {
            let previous = *previous;
            self.change_state(SessionState::active(previous), "selection-motion", false);
            return;
        }

        let mode = self.state.mode();
        if selecting && mode != Mode::Visual && self.settings.visual_mode_on_select() {
            self.change_state(SessionState::active(ActiveMode::Visual), "selection", false);
        } else if !selecting && mode == Mode::Visual {
            self.change_state(SessionState::resting(self.default_mode()), "noselection", false);
        }
    }

    fn default_mode(&self) -> Mode {
        if self.host.focus.is_editable_focused() {
            if let Some(mode) = self.settings.default_input_mode() {
                return mode;
            }
        }
        self.settings.default_mode()
    }

    /// Apply a state transition and notify the host when the mode changed
    /// (or unconditionally when forced).
    pub(crate) fn change_state(&mut self, new: SessionState, reason: &str, force: bool) {
        let mode_changed = new.mode() != self.state.mode();
        self.state = new;
        if !force && !mode_changed {
            return;
        }
        if self.settings.verbose() {
            info!(mode = %self.state.mode(), reason, "mode changed");
        } else {
            debug!(mode = %self.state.mode(), reason, "mode changed");
        }
        self.host.ui.set_mode(self.state.mode());
    }
}
