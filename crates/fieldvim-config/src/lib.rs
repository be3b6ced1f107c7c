//! # fieldvim-config
//!
//! The configuration layer for fieldvim: a typed settings schema, the
//! line-oriented configuration language, and the built-in defaults.
//!
//! Parsing is fail-fast: the first offending line aborts with a 1-based
//! line number and reason, and the caller keeps whatever configuration it
//! had before. A successful parse always starts from the built-in defaults,
//! so user configuration is a delta over them.

mod config;
mod default;
mod parser;
mod settings;

pub use config::Configuration;
pub use default::{default_configuration, DEFAULT_CONFIG_TEXT};
pub use parser::{parse_configuration, ParseError};
pub use settings::{
    AutoSwitchMode, Setting, SettingError, SettingKind, SettingValue, Settings, SiteOverride,
};
