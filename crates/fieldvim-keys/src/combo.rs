//! Key combo types.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Modifier keys attached to a key combo.
///
/// Canonical letters are `A` (Alt), `C` (Control), `M` (Meta) and `S`
/// (Shift), always written in alphabetical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub control: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        alt: false,
        control: false,
        meta: false,
        shift: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        alt: false,
        control: false,
        meta: false,
        shift: true,
    };

    /// Check whether no modifier is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// 3-bit dispatch mask: bit0 = Shift, bit1 = Control, bit2 = Alt or
    /// Meta. Alt and Meta collapse into one bit because host key events do
    /// not reliably distinguish them across platforms.
    pub fn mask(&self) -> u8 {
        let mut mask = 0;
        if self.shift {
            mask |= 1;
        }
        if self.control {
            mask |= 2;
        }
        if self.alt || self.meta {
            mask |= 4;
        }
        mask
    }

    /// Canonical modifier letters in alphabetical order.
    pub fn letters(&self) -> Vec<char> {
        let mut letters = Vec::new();
        if self.alt {
            letters.push('A');
        }
        if self.control {
            letters.push('C');
        }
        if self.meta {
            letters.push('M');
        }
        if self.shift {
            letters.push('S');
        }
        letters
    }

    /// Set the modifier named by a canonical letter. Returns false for an
    /// unknown letter.
    pub(crate) fn set_letter(&mut self, letter: char) -> bool {
        match letter {
            'A' => self.alt = true,
            'C' => self.control = true,
            'M' => self.meta = true,
            'S' => self.shift = true,
            _ => return false,
        }
        true
    }
}

/// Named base-key labels recognized in combos, besides single characters.
/// Matches the host's key event labels.
const NAMED_KEYS: &[&str] = &[
    "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowUp", "Backspace", "Delete",
    "End", "Enter", "Escape", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8",
    "F9", "F10", "F11", "F12", "Home", "Insert", "PageDown", "PageUp", "Tab",
];

fn is_recognized_base(label: &str) -> bool {
    let mut chars = label.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return !c.is_control();
    }
    NAMED_KEYS.contains(&label)
}

/// Error building or parsing a key combo or keyspec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyspecError {
    /// Empty input
    #[error("empty key specification")]
    Empty,
    /// A modifier segment outside the allowed set
    #[error("invalid key modifier '{0}'")]
    InvalidModifier(String),
    /// The base key label is not recognized
    #[error("unrecognized key '{0}'")]
    UnrecognizedKey(String),
}

/// A base key label plus a modifier set.
///
/// The canonical textual form is the sorted modifier letters and the base
/// label joined with `-`, e.g. `C-S-ArrowLeft`. That form is used both as
/// the keymap key and as the injected-keystroke descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    base: String,
    modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a combo, validating the base label.
    pub fn new(base: impl Into<String>, modifiers: Modifiers) -> Result<Self, KeyspecError> {
        let base = base.into();
        if base.is_empty() {
            return Err(KeyspecError::Empty);
        }
        if !is_recognized_base(&base) {
            return Err(KeyspecError::UnrecognizedKey(base));
        }
        Ok(Self { base, modifiers })
    }

    /// Parse a combo already in canonical form: zero or more `A-`/`C-`/
    /// `M-`/`S-` prefixes followed by the base label.
    pub fn parse(s: &str) -> Result<Self, KeyspecError> {
        if s.is_empty() {
            return Err(KeyspecError::Empty);
        }
        let mut modifiers = Modifiers::NONE;
        let mut rest = s;
        loop {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), Some('-')) if chars.clone().next().is_some() => {
                    if !modifiers.set_letter(letter) {
                        break;
                    }
                    rest = chars.as_str();
                }
                _ => break,
            }
        }
        Self::new(rest, modifiers)
    }

    /// The base key label.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The modifier set.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The 3-bit dispatch mask of the modifier set.
    pub fn mask(&self) -> u8 {
        self.modifiers.mask()
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.modifiers.letters() {
            write!(f, "{}-", letter)?;
        }
        write!(f, "{}", self.base)
    }
}

impl FromStr for KeyCombo {
    type Err = KeyspecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for KeyCombo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyCombo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// An incoming key event, as reported by the host: the key label plus the
/// raw modifier flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyInput {
    /// Create a key input with explicit modifier flags.
    pub fn new(key: impl Into<String>, shift: bool, control: bool, alt: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            shift,
            control,
            alt,
            meta,
        }
    }

    /// Create a key input with no modifiers.
    pub fn plain(key: impl Into<String>) -> Self {
        Self::new(key, false, false, false, false)
    }

    /// Synthesize the event a combo would produce when injected.
    pub fn from_combo(combo: &KeyCombo) -> Self {
        let m = combo.modifiers();
        Self::new(combo.base(), m.shift, m.control, m.alt, m.meta)
    }

    /// 3-bit dispatch mask of the event's modifier flags.
    pub fn mask(&self) -> u8 {
        let mut mask = 0;
        if self.shift {
            mask |= 1;
        }
        if self.control {
            mask |= 2;
        }
        if self.alt || self.meta {
            mask |= 4;
        }
        mask
    }

    /// Whether the pressed key is itself a modifier key. Such events are
    /// never dispatched.
    pub fn is_modifier_key(&self) -> bool {
        matches!(
            self.key.as_str(),
            "Control" | "Shift" | "Alt" | "Meta" | "CapsLock"
        )
    }

    /// Whether this event matches an injected combo. Alt and Meta are
    /// treated as equivalent so Apple-convention injections are recognized.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        self.key == combo.base() && self.mask() == combo.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let combo = KeyCombo::parse("a").unwrap();
        assert_eq!(combo.base(), "a");
        assert!(combo.modifiers().is_empty());
    }

    #[test]
    fn test_parse_modifiers() {
        let combo = KeyCombo::parse("C-S-ArrowLeft").unwrap();
        assert!(combo.modifiers().control);
        assert!(combo.modifiers().shift);
        assert!(!combo.modifiers().alt);
        assert_eq!(combo.base(), "ArrowLeft");
    }

    #[test]
    fn test_display_sorted() {
        let combo = KeyCombo::new(
            "x",
            Modifiers {
                shift: true,
                alt: true,
                ..Modifiers::NONE
            },
        )
        .unwrap();
        assert_eq!(combo.to_string(), "A-S-x");
    }

    #[test]
    fn test_parse_display_round_trip() {
        for s in ["C-q", "A-S-ArrowRight", "M-c", "S-$", "Enter", " "] {
            let combo = KeyCombo::parse(s).unwrap();
            assert_eq!(combo.to_string(), s);
        }
    }

    #[test]
    fn test_dash_base() {
        // A bare dash is a valid single-character base.
        let combo = KeyCombo::parse("-").unwrap();
        assert_eq!(combo.base(), "-");

        let combo = KeyCombo::parse("C--").unwrap();
        assert_eq!(combo.base(), "-");
        assert!(combo.modifiers().control);
    }

    #[test]
    fn test_unrecognized_base() {
        assert_eq!(
            KeyCombo::parse("NoSuchKey"),
            Err(KeyspecError::UnrecognizedKey("NoSuchKey".into()))
        );
        assert_eq!(KeyCombo::parse(""), Err(KeyspecError::Empty));
    }

    #[test]
    fn test_mask_collapses_alt_meta() {
        let alt = KeyCombo::parse("A-c").unwrap();
        let meta = KeyCombo::parse("M-c").unwrap();
        assert_eq!(alt.mask(), meta.mask());
        assert_ne!(alt, meta);
    }

    #[test]
    fn test_input_matches_injected_combo() {
        // Meta-flagged event must match an Alt-labelled combo and vice versa.
        let event = KeyInput::new("c", false, false, false, true);
        assert!(event.matches(&KeyCombo::parse("M-c").unwrap()));
        assert!(event.matches(&KeyCombo::parse("A-c").unwrap()));
        assert!(!event.matches(&KeyCombo::parse("C-c").unwrap()));
    }

    #[test]
    fn test_modifier_key_events() {
        assert!(KeyInput::plain("Shift").is_modifier_key());
        assert!(KeyInput::plain("CapsLock").is_modifier_key());
        assert!(!KeyInput::plain("s").is_modifier_key());
    }

    #[test]
    fn test_serde_as_string() {
        let combo = KeyCombo::parse("C-S-Home").unwrap();
        let json = serde_json::to_string(&combo).unwrap();
        assert_eq!(json, "\"C-S-Home\"");
        let back: KeyCombo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, combo);
    }
}
