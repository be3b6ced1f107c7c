//! Editing modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The modal editing state a session can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Modal editing disabled; every key passes through.
    Off,
    /// Keys insert text as usual; only explicit bindings intercept.
    Insert,
    /// Navigation and editing bindings.
    Normal,
    /// Like normal, with an active selection.
    Visual,
    /// Transient state after an operator key, waiting for a motion.
    Motion,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Off => "off",
            Self::Insert => "insert",
            Self::Normal => "normal",
            Self::Visual => "visual",
            Self::Motion => "motion",
        };
        write!(f, "{}", s)
    }
}

/// The three modes a session can rest in while enabled. Commands may target
/// one of these; `motion` is only ever entered through an operator and `off`
/// only through toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveMode {
    Insert,
    Normal,
    Visual,
}

impl From<ActiveMode> for Mode {
    fn from(mode: ActiveMode) -> Self {
        match mode {
            ActiveMode::Insert => Mode::Insert,
            ActiveMode::Normal => Mode::Normal,
            ActiveMode::Visual => Mode::Visual,
        }
    }
}

impl fmt::Display for ActiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Mode::from(*self).fmt(f)
    }
}
