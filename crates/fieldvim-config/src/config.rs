//! The parsed configuration.

use crate::settings::{Settings, SiteOverride};
use fieldvim_keys::{Keymap, Mode};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Everything the configuration language produces: one keymap per mode,
/// global settings and the ordered site overrides.
///
/// A configuration is immutable once parsed; reconfiguration replaces it
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub insert: Keymap,
    pub normal: Keymap,
    pub visual: Keymap,
    pub motion: Keymap,
    pub settings: Settings,
    pub site_overrides: Vec<SiteOverride>,
}

impl Configuration {
    /// A configuration with no bindings, settings or overrides. Parsing
    /// does not start here; see [`crate::default_configuration`].
    pub fn empty() -> Self {
        Self {
            insert: Keymap::new(),
            normal: Keymap::new(),
            visual: Keymap::new(),
            motion: Keymap::new(),
            settings: Settings::default(),
            site_overrides: Vec::new(),
        }
    }

    /// The keymap active in a mode. `Off` has none.
    pub fn keymap(&self, mode: Mode) -> Option<&Keymap> {
        match mode {
            Mode::Insert => Some(&self.insert),
            Mode::Normal => Some(&self.normal),
            Mode::Visual => Some(&self.visual),
            Mode::Motion => Some(&self.motion),
            Mode::Off => None,
        }
    }

    pub(crate) fn keymap_mut(&mut self, mode: Mode) -> Option<&mut Keymap> {
        match mode {
            Mode::Insert => Some(&mut self.insert),
            Mode::Normal => Some(&mut self.normal),
            Mode::Visual => Some(&mut self.visual),
            Mode::Motion => Some(&mut self.motion),
            Mode::Off => None,
        }
    }

    /// Resolve the settings for a location: global settings with every
    /// matching site override applied in order.
    ///
    /// The location's URL scheme is stripped before matching, and patterns
    /// are rooted so they must cover the whole remainder. Patterns were
    /// validated at parse time; one failing to recompile is skipped.
    pub fn settings_for(&self, location: &str) -> Settings {
        let target = strip_scheme(location);
        let mut settings = self.settings.clone();
        for site in &self.site_overrides {
            let Ok(pattern) = Regex::new(&format!("^{}$", site.site)) else {
                continue;
            };
            if pattern.is_match(target) {
                settings.set(site.setting, site.value.clone());
            }
        }
        settings
    }
}

impl Default for Configuration {
    /// The built-in default configuration.
    fn default() -> Self {
        crate::default_configuration().clone()
    }
}

fn strip_scheme(location: &str) -> &str {
    match location.split_once("://") {
        Some((scheme, rest)) if !scheme.contains('/') => rest,
        _ => location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Setting, SettingValue};

    #[test]
    fn test_keymap_by_mode() {
        let config = Configuration::empty();
        assert!(config.keymap(Mode::Normal).is_some());
        assert!(config.keymap(Mode::Motion).is_some());
        assert!(config.keymap(Mode::Off).is_none());
    }

    #[test]
    fn test_settings_for_applies_matching_overrides() {
        let mut config = Configuration::empty();
        config.site_overrides.push(SiteOverride {
            site: "mail\\.example\\.com/.*".into(),
            setting: Setting::MaxRepeat,
            value: SettingValue::Int(3),
        });

        let settings = config.settings_for("https://mail.example.com/inbox");
        assert_eq!(settings.max_repeat(), Some(3));

        let settings = config.settings_for("https://example.com/");
        assert_eq!(settings.max_repeat(), None);
    }

    #[test]
    fn test_overrides_apply_in_order() {
        let mut config = Configuration::empty();
        config.site_overrides.push(SiteOverride {
            site: ".*".into(),
            setting: Setting::MaxRepeat,
            value: SettingValue::Int(1),
        });
        config.site_overrides.push(SiteOverride {
            site: "example\\.com.*".into(),
            setting: Setting::MaxRepeat,
            value: SettingValue::Int(7),
        });

        let settings = config.settings_for("https://example.com/page");
        assert_eq!(settings.max_repeat(), Some(7));
    }

    #[test]
    fn test_pattern_is_rooted() {
        let mut config = Configuration::empty();
        config.site_overrides.push(SiteOverride {
            site: "example\\.com".into(),
            setting: Setting::Verbose,
            value: SettingValue::Bool(true),
        });

        // Without `.*` the pattern must cover the whole scheme-stripped
        // location, so a path suffix makes it fail.
        assert!(!config.settings_for("https://example.com/page").verbose());
        assert!(config.settings_for("https://example.com").verbose());
    }

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://a.b/c"), "a.b/c");
        assert_eq!(strip_scheme("moz-extension://uuid/x"), "uuid/x");
        assert_eq!(strip_scheme("a.b/c"), "a.b/c");
    }
}
