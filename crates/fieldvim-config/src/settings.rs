//! Typed settings and their validation schema.
//!
//! Every setting name maps to a value kind in a declarative table, so
//! validation and error reporting go through one path instead of scattered
//! per-field checks.

use fieldvim_keys::Mode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// When the reconciler re-derives the mode from focus changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoSwitchMode {
    /// Never switch automatically.
    #[default]
    Never,
    /// Switch when focus moves.
    Focus,
    /// Switch on focus moves and pointer presses.
    Always,
}

impl fmt::Display for AutoSwitchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Never => "never",
            Self::Focus => "focus",
            Self::Always => "always",
        };
        write!(f, "{}", s)
    }
}

/// The value kind a setting accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// `true` or `false`
    Bool,
    /// integer >= 1
    PositiveInt,
    /// insert, normal, visual or off
    Mode,
    /// never, focus or always
    AutoSwitch,
    /// a syntactically valid color token
    Color,
}

/// Recognized setting names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Setting {
    DefaultMode,
    DefaultInputMode,
    VisualModeOnSelect,
    AutoSwitchMode,
    NormalBlockInsertions,
    VisualBlockInsertions,
    MaxRepeat,
    NormalCaretColor,
    VisualCaretColor,
    InsertCaretColor,
    MotionCaretColor,
    NormalDarkCaretColor,
    VisualDarkCaretColor,
    InsertDarkCaretColor,
    MotionDarkCaretColor,
    Verbose,
}

impl Setting {
    /// The schema: every setting with its value kind.
    pub const ALL: &'static [(Setting, SettingKind)] = &[
        (Self::DefaultMode, SettingKind::Mode),
        (Self::DefaultInputMode, SettingKind::Mode),
        (Self::VisualModeOnSelect, SettingKind::Bool),
        (Self::AutoSwitchMode, SettingKind::AutoSwitch),
        (Self::NormalBlockInsertions, SettingKind::Bool),
        (Self::VisualBlockInsertions, SettingKind::Bool),
        (Self::MaxRepeat, SettingKind::PositiveInt),
        (Self::NormalCaretColor, SettingKind::Color),
        (Self::VisualCaretColor, SettingKind::Color),
        (Self::InsertCaretColor, SettingKind::Color),
        (Self::MotionCaretColor, SettingKind::Color),
        (Self::NormalDarkCaretColor, SettingKind::Color),
        (Self::VisualDarkCaretColor, SettingKind::Color),
        (Self::InsertDarkCaretColor, SettingKind::Color),
        (Self::MotionDarkCaretColor, SettingKind::Color),
        (Self::Verbose, SettingKind::Bool),
    ];

    /// The setting name as written in configuration text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DefaultMode => "DefaultMode",
            Self::DefaultInputMode => "DefaultInputMode",
            Self::VisualModeOnSelect => "VisualModeOnSelect",
            Self::AutoSwitchMode => "AutoSwitchMode",
            Self::NormalBlockInsertions => "NormalBlockInsertions",
            Self::VisualBlockInsertions => "VisualBlockInsertions",
            Self::MaxRepeat => "MaxRepeat",
            Self::NormalCaretColor => "NormalCaretColor",
            Self::VisualCaretColor => "VisualCaretColor",
            Self::InsertCaretColor => "InsertCaretColor",
            Self::MotionCaretColor => "MotionCaretColor",
            Self::NormalDarkCaretColor => "NormalDarkCaretColor",
            Self::VisualDarkCaretColor => "VisualDarkCaretColor",
            Self::InsertDarkCaretColor => "InsertDarkCaretColor",
            Self::MotionDarkCaretColor => "MotionDarkCaretColor",
            Self::Verbose => "Verbose",
        }
    }

    /// Look up a setting by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .map(|(setting, _)| *setting)
            .find(|setting| setting.name() == name)
    }

    /// The value kind this setting accepts.
    pub fn kind(&self) -> SettingKind {
        Self::ALL
            .iter()
            .find(|(setting, _)| setting == self)
            .map(|(_, kind)| *kind)
            .expect("every setting appears in the schema table")
    }

    /// Validate a raw token against this setting's kind.
    pub fn validate(&self, raw: &str) -> Result<SettingValue, SettingError> {
        match self.kind() {
            SettingKind::Bool => match raw {
                "true" => Ok(SettingValue::Bool(true)),
                "false" => Ok(SettingValue::Bool(false)),
                _ => Err(SettingError::Bool),
            },
            SettingKind::PositiveInt => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .map(SettingValue::Int)
                .ok_or(SettingError::PositiveInt),
            SettingKind::Mode => match raw {
                "insert" => Ok(SettingValue::Mode(Mode::Insert)),
                "normal" => Ok(SettingValue::Mode(Mode::Normal)),
                "visual" => Ok(SettingValue::Mode(Mode::Visual)),
                "off" => Ok(SettingValue::Mode(Mode::Off)),
                _ => Err(SettingError::Mode),
            },
            SettingKind::AutoSwitch => match raw {
                "never" => Ok(SettingValue::AutoSwitch(AutoSwitchMode::Never)),
                "focus" => Ok(SettingValue::AutoSwitch(AutoSwitchMode::Focus)),
                "always" => Ok(SettingValue::AutoSwitch(AutoSwitchMode::Always)),
                _ => Err(SettingError::AutoSwitch),
            },
            SettingKind::Color => {
                if is_valid_color(raw) {
                    Ok(SettingValue::Color(raw.to_string()))
                } else {
                    Err(SettingError::Color)
                }
            }
        }
    }
}

/// A validated setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Bool(bool),
    Int(u32),
    Mode(Mode),
    AutoSwitch(AutoSwitchMode),
    Color(String),
}

/// A value failing its setting's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("must be true or false")]
    Bool,
    #[error("must be a positive integer")]
    PositiveInt,
    #[error("must be one of insert, normal, visual, off")]
    Mode,
    #[error("must be one of never, focus, always")]
    AutoSwitch,
    #[error("invalid color")]
    Color,
}

/// A setting value scoped to locations matching a site pattern. Overrides
/// are applied in order on top of the global settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOverride {
    /// Rooted regular expression source matched against the location with
    /// its scheme stripped. Validated when parsed.
    pub site: String,
    pub setting: Setting,
    pub value: SettingValue,
}

/// Global settings. Every field is optional; accessors apply the documented
/// fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    default_mode: Option<Mode>,
    default_input_mode: Option<Mode>,
    visual_mode_on_select: Option<bool>,
    auto_switch_mode: Option<AutoSwitchMode>,
    normal_block_insertions: Option<bool>,
    visual_block_insertions: Option<bool>,
    max_repeat: Option<u32>,
    normal_caret_color: Option<String>,
    visual_caret_color: Option<String>,
    insert_caret_color: Option<String>,
    motion_caret_color: Option<String>,
    normal_dark_caret_color: Option<String>,
    visual_dark_caret_color: Option<String>,
    insert_dark_caret_color: Option<String>,
    motion_dark_caret_color: Option<String>,
    verbose: Option<bool>,
}

impl Settings {
    /// Store a validated value. The value's variant always matches the
    /// setting's kind because it came out of [`Setting::validate`]; a
    /// mismatch is a programming error.
    pub fn set(&mut self, setting: Setting, value: SettingValue) {
        use crate::settings::{Setting as S, SettingValue as V};
        match (setting, value) {
            (S::DefaultMode, V::Mode(v)) => self.default_mode = Some(v),
            (S::DefaultInputMode, V::Mode(v)) => self.default_input_mode = Some(v),
            (S::VisualModeOnSelect, V::Bool(v)) => self.visual_mode_on_select = Some(v),
            (S::AutoSwitchMode, V::AutoSwitch(v)) => self.auto_switch_mode = Some(v),
            (S::NormalBlockInsertions, V::Bool(v)) => self.normal_block_insertions = Some(v),
            (S::VisualBlockInsertions, V::Bool(v)) => self.visual_block_insertions = Some(v),
            (S::MaxRepeat, V::Int(v)) => self.max_repeat = Some(v),
            (S::NormalCaretColor, V::Color(v)) => self.normal_caret_color = Some(v),
            (S::VisualCaretColor, V::Color(v)) => self.visual_caret_color = Some(v),
            (S::InsertCaretColor, V::Color(v)) => self.insert_caret_color = Some(v),
            (S::MotionCaretColor, V::Color(v)) => self.motion_caret_color = Some(v),
            (S::NormalDarkCaretColor, V::Color(v)) => self.normal_dark_caret_color = Some(v),
            (S::VisualDarkCaretColor, V::Color(v)) => self.visual_dark_caret_color = Some(v),
            (S::InsertDarkCaretColor, V::Color(v)) => self.insert_dark_caret_color = Some(v),
            (S::MotionDarkCaretColor, V::Color(v)) => self.motion_dark_caret_color = Some(v),
            (S::Verbose, V::Bool(v)) => self.verbose = Some(v),
            (setting, value) => {
                panic!("value {:?} does not match kind of setting {:?}", value, setting)
            }
        }
    }

    /// Mode to use when nothing more specific applies.
    pub fn default_mode(&self) -> Mode {
        self.default_mode.unwrap_or(Mode::Insert)
    }

    /// Mode to use while an editable element is focused.
    pub fn default_input_mode(&self) -> Option<Mode> {
        self.default_input_mode
    }

    /// Whether selecting text outside visual mode switches into it.
    pub fn visual_mode_on_select(&self) -> bool {
        self.visual_mode_on_select.unwrap_or(false)
    }

    /// Focus-driven mode re-derivation policy.
    pub fn auto_switch_mode(&self) -> AutoSwitchMode {
        self.auto_switch_mode.unwrap_or_default()
    }

    /// Whether unbound printable keys are swallowed in the given mode.
    pub fn block_insertions(&self, mode: Mode) -> bool {
        match mode {
            Mode::Normal => self.normal_block_insertions.unwrap_or(false),
            Mode::Visual => self.visual_block_insertions.unwrap_or(false),
            _ => false,
        }
    }

    /// Upper bound applied to repeat counts, if any.
    pub fn max_repeat(&self) -> Option<u32> {
        self.max_repeat
    }

    /// Caret color for a mode; the dark variant falls back to the light one.
    pub fn caret_color(&self, mode: Mode, dark: bool) -> Option<&str> {
        let light = match mode {
            Mode::Normal => self.normal_caret_color.as_deref(),
            Mode::Visual => self.visual_caret_color.as_deref(),
            Mode::Insert => self.insert_caret_color.as_deref(),
            Mode::Motion => self.motion_caret_color.as_deref(),
            Mode::Off => None,
        };
        if !dark {
            return light;
        }
        let dark_color = match mode {
            Mode::Normal => self.normal_dark_caret_color.as_deref(),
            Mode::Visual => self.visual_dark_caret_color.as_deref(),
            Mode::Insert => self.insert_dark_caret_color.as_deref(),
            Mode::Motion => self.motion_dark_caret_color.as_deref(),
            Mode::Off => None,
        };
        dark_color.or(light)
    }

    /// Whether verbose diagnostics are enabled.
    pub fn verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }
}

/// CSS named colors, plus `transparent` and `currentcolor` (checked
/// case-insensitively).
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "currentcolor", "cyan",
    "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue",
    "tan", "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Shallow syntactic check for a color token: hex forms, the `rgb()`-family
/// function forms, or a named color.
fn is_valid_color(raw: &str) -> bool {
    if let Some(hex) = raw.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let lower = raw.to_ascii_lowercase();
    // Longer names first, so `rgba(...)` is not cut short at `rgb`.
    for func in ["rgba", "rgb", "hsla", "hsl"] {
        if let Some(rest) = lower.strip_prefix(func) {
            return rest.starts_with('(') && rest.ends_with(')') && rest.len() > 2;
        }
    }

    NAMED_COLORS.contains(&lower.as_str())
}
