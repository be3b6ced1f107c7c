//! Scenario builder: a manager wired to a scripted host, driven by key
//! specs.

use crate::host::ScriptedHost;
use fieldvim_config::{parse_configuration, Configuration, ParseError};
use fieldvim_engine::{KeyDisposition, ModeManager};
use fieldvim_keys::{KeyCombo, KeyInput, Mode, Platform};

/// Builder for a test scenario.
pub struct ScenarioBuilder {
    config: Option<String>,
    platform: Platform,
    location: String,
    focused: bool,
    selection: Option<(usize, usize)>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            platform: Platform::Standard,
            location: "https://example.com/".to_string(),
            focused: false,
            selection: None,
        }
    }

    /// Configuration text to parse (over the defaults).
    pub fn config(mut self, text: impl Into<String>) -> Self {
        self.config = Some(text.into());
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Start with an editable element focused.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Start with a selection in place.
    pub fn selected(mut self, anchor: usize, focus: usize) -> Self {
        self.selection = Some((anchor, focus));
        self
    }

    /// Build the scenario. Fails like the engine would on bad configuration
    /// text.
    pub fn build(self) -> Result<Scenario, ParseError> {
        let config = match &self.config {
            Some(text) => parse_configuration(text)?,
            None => Configuration::default(),
        };

        let host = ScriptedHost::new();
        host.focus_editable(self.focused);
        if let Some((anchor, focus)) = self.selection {
            host.select(anchor, focus);
        }

        let manager = ModeManager::new(host.host(self.platform, &self.location), config);
        Ok(Scenario { host, manager })
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A manager under test plus the scripted host it talks to.
pub struct Scenario {
    host: ScriptedHost,
    manager: ModeManager,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario").finish_non_exhaustive()
    }
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::new()
    }

    /// Press a key given as a canonical combo spec (e.g. `"d"`, `"C-q"`).
    ///
    /// Panics on a malformed spec; scenarios are static test data.
    pub async fn press(&mut self, spec: &str) -> KeyDisposition {
        let combo = KeyCombo::parse(spec).expect("scenario key spec parses");
        self.manager.on_key_down(KeyInput::from_combo(&combo)).await
    }

    /// Press a sequence of keys in order.
    pub async fn press_all(&mut self, specs: &[&str]) {
        for spec in specs {
            self.press(spec).await;
        }
    }

    pub fn mode(&self) -> Mode {
        self.manager.mode()
    }

    /// Canonical strings of every injected combo so far.
    pub fn injected(&self) -> Vec<String> {
        self.host.injected_keys()
    }

    pub fn host(&self) -> &ScriptedHost {
        &self.host
    }

    pub fn manager(&self) -> &ModeManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ModeManager {
        &mut self.manager
    }
}
