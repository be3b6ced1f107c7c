//! Session state.

use fieldvim_keys::{ActiveMode, CommandName, Mode};

/// The modal state of one watched document group.
///
/// Motion carries which operator to run once a motion arrives and which
/// mode to return to afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Modal editing disabled.
    Off,
    /// Resting in insert, normal or visual mode.
    Active {
        mode: ActiveMode,
        /// Repeat count accumulated from digit keys, if any.
        repeat: Option<u32>,
    },
    /// An operator was pressed; waiting for its motion.
    Motion {
        repeat: Option<u32>,
        /// The deferred operator body.
        operator: Vec<CommandName>,
        /// Mode in effect when the operator was triggered.
        previous: ActiveMode,
    },
}

impl SessionState {
    /// A fresh active state with no repeat.
    pub fn active(mode: ActiveMode) -> Self {
        Self::Active { mode, repeat: None }
    }

    /// The state a derived resting mode maps to. Motion is not a resting
    /// mode; deriving it indicates a programming error.
    pub fn resting(mode: Mode) -> Self {
        match mode {
            Mode::Off => Self::Off,
            Mode::Insert => Self::active(ActiveMode::Insert),
            Mode::Normal => Self::active(ActiveMode::Normal),
            Mode::Visual => Self::active(ActiveMode::Visual),
            Mode::Motion => panic!("motion is not a resting mode"),
        }
    }

    /// The mode this state presents.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Off => Mode::Off,
            Self::Active { mode, .. } => (*mode).into(),
            Self::Motion { .. } => Mode::Motion,
        }
    }

    /// The accumulated repeat count, if any.
    pub fn repeat(&self) -> Option<u32> {
        match self {
            Self::Off => None,
            Self::Active { repeat, .. } | Self::Motion { repeat, .. } => *repeat,
        }
    }

    /// The same state with a different repeat count.
    pub fn with_repeat(self, repeat: Option<u32>) -> Self {
        match self {
            Self::Off => Self::Off,
            Self::Active { mode, .. } => Self::Active { mode, repeat },
            Self::Motion {
                operator, previous, ..
            } => Self::Motion {
                repeat,
                operator,
                previous,
            },
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}
