//! Built-in command registry.
//!
//! Commands are the atomic operations keymaps can bind: each one emits an
//! ordered list of key combos (with an Apple-convention variant where the
//! shortcut differs), optionally switches the mode, or performs one of the
//! two selection built-ins.

use crate::combo::KeyCombo;
use crate::mode::ActiveMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Host platform convention for shortcut selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Standard,
    Apple,
}

impl Platform {
    /// Classify a host platform string. Apple convention applies to Mac
    /// desktops and iPhones, matching how hosts report `navigator.platform`.
    pub fn from_platform_string(platform: &str) -> Self {
        if platform.starts_with("Mac") || platform == "iPhone" {
            Self::Apple
        } else {
            Self::Standard
        }
    }
}

/// Registry grouping, used by hosts when listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandGroup {
    Modes,
    Navigation,
    SelectionNavigation,
    Editing,
    Builtin,
}

/// Names of the built-in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandName {
    // Modes
    Normal,
    Visual,
    Insert,
    // Navigation
    Left,
    Right,
    Down,
    Up,
    BackwardWord,
    ForwardWord,
    LineStart,
    LineEnd,
    Top,
    Bottom,
    // Navigation with selection
    SelectLeft,
    SelectRight,
    SelectDown,
    SelectUp,
    SelectBackwardWord,
    SelectForwardWord,
    SelectLineStart,
    SelectLineEnd,
    SelectTop,
    SelectBottom,
    // Editing
    Backspace,
    Delete,
    BackspaceWord,
    DeleteWord,
    Enter,
    Tab,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    // Selection built-ins
    ExitSelection,
    SwapSelectionDirection,
}

/// Error resolving a command name from the configuration language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl CommandName {
    /// All commands, in registry order.
    pub const ALL: &'static [CommandName] = &[
        Self::Normal,
        Self::Visual,
        Self::Insert,
        Self::Left,
        Self::Right,
        Self::Down,
        Self::Up,
        Self::BackwardWord,
        Self::ForwardWord,
        Self::LineStart,
        Self::LineEnd,
        Self::Top,
        Self::Bottom,
        Self::SelectLeft,
        Self::SelectRight,
        Self::SelectDown,
        Self::SelectUp,
        Self::SelectBackwardWord,
        Self::SelectForwardWord,
        Self::SelectLineStart,
        Self::SelectLineEnd,
        Self::SelectTop,
        Self::SelectBottom,
        Self::Backspace,
        Self::Delete,
        Self::BackspaceWord,
        Self::DeleteWord,
        Self::Enter,
        Self::Tab,
        Self::Cut,
        Self::Copy,
        Self::Paste,
        Self::Undo,
        Self::Redo,
        Self::ExitSelection,
        Self::SwapSelectionDirection,
    ];

    /// The command name as written in configuration text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Visual => "Visual",
            Self::Insert => "Insert",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Down => "Down",
            Self::Up => "Up",
            Self::BackwardWord => "BackwardWord",
            Self::ForwardWord => "ForwardWord",
            Self::LineStart => "LineStart",
            Self::LineEnd => "LineEnd",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::SelectLeft => "SelectLeft",
            Self::SelectRight => "SelectRight",
            Self::SelectDown => "SelectDown",
            Self::SelectUp => "SelectUp",
            Self::SelectBackwardWord => "SelectBackwardWord",
            Self::SelectForwardWord => "SelectForwardWord",
            Self::SelectLineStart => "SelectLineStart",
            Self::SelectLineEnd => "SelectLineEnd",
            Self::SelectTop => "SelectTop",
            Self::SelectBottom => "SelectBottom",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::BackspaceWord => "BackspaceWord",
            Self::DeleteWord => "DeleteWord",
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Cut => "Cut",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::ExitSelection => "ExitSelection",
            Self::SwapSelectionDirection => "SwapSelectionDirection",
        }
    }

    /// The registry entry for this command.
    pub fn command(&self) -> &'static Command {
        registry()
            .get(self)
            .expect("every command name has a registry entry")
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// A registry entry: what a command does when executed.
#[derive(Debug, Clone)]
pub struct Command {
    pub name: CommandName,
    pub group: CommandGroup,
    pub description: &'static str,
    /// Key combos to inject, in order.
    pub keys: Vec<KeyCombo>,
    /// Apple-convention variant; empty means `keys` applies everywhere.
    pub apple_keys: Vec<KeyCombo>,
    /// Mode to switch to after the keys are injected.
    pub mode: Option<ActiveMode>,
}

impl Command {
    /// The key sequence for a platform.
    pub fn keys_for(&self, platform: Platform) -> &[KeyCombo] {
        if platform == Platform::Apple && !self.apple_keys.is_empty() {
            &self.apple_keys
        } else {
            &self.keys
        }
    }
}

fn combos(specs: &[&str]) -> Vec<KeyCombo> {
    specs
        .iter()
        .map(|s| KeyCombo::parse(s).expect("registry combos are well-formed"))
        .collect()
}

struct Entry {
    name: CommandName,
    group: CommandGroup,
    description: &'static str,
    keys: &'static [&'static str],
    apple_keys: &'static [&'static str],
    mode: Option<ActiveMode>,
}

const fn nav(name: CommandName, description: &'static str, keys: &'static [&'static str]) -> Entry {
    nav2(name, description, keys, &[])
}

const fn nav2(
    name: CommandName,
    description: &'static str,
    keys: &'static [&'static str],
    apple_keys: &'static [&'static str],
) -> Entry {
    Entry {
        name,
        group: CommandGroup::Navigation,
        description,
        keys,
        apple_keys,
        mode: None,
    }
}

const fn sel(name: CommandName, description: &'static str, keys: &'static [&'static str]) -> Entry {
    sel2(name, description, keys, &[])
}

const fn sel2(
    name: CommandName,
    description: &'static str,
    keys: &'static [&'static str],
    apple_keys: &'static [&'static str],
) -> Entry {
    Entry {
        name,
        group: CommandGroup::SelectionNavigation,
        description,
        keys,
        apple_keys,
        mode: None,
    }
}

const fn edit(
    name: CommandName,
    description: &'static str,
    keys: &'static [&'static str],
    apple_keys: &'static [&'static str],
) -> Entry {
    Entry {
        name,
        group: CommandGroup::Editing,
        description,
        keys,
        apple_keys,
        mode: None,
    }
}

const fn mode_switch(name: CommandName, description: &'static str, mode: ActiveMode) -> Entry {
    Entry {
        name,
        group: CommandGroup::Modes,
        description,
        keys: &[],
        apple_keys: &[],
        mode: Some(mode),
    }
}

const fn builtin(name: CommandName, description: &'static str) -> Entry {
    Entry {
        name,
        group: CommandGroup::Builtin,
        description,
        keys: &[],
        apple_keys: &[],
        mode: None,
    }
}

const ENTRIES: &[Entry] = &[
    mode_switch(CommandName::Normal, "Switch to normal mode", ActiveMode::Normal),
    mode_switch(CommandName::Visual, "Switch to visual mode", ActiveMode::Visual),
    mode_switch(CommandName::Insert, "Switch to insert mode", ActiveMode::Insert),
    nav(CommandName::Left, "Move cursor left", &["ArrowLeft"]),
    nav(CommandName::Right, "Move cursor right", &["ArrowRight"]),
    nav(CommandName::Down, "Move cursor down", &["ArrowDown"]),
    nav(CommandName::Up, "Move cursor up", &["ArrowUp"]),
    nav2(
        CommandName::BackwardWord,
        "Move cursor to the previous word",
        &["C-ArrowLeft"],
        &["A-ArrowLeft"],
    ),
    nav2(
        CommandName::ForwardWord,
        "Move cursor to the next word",
        &["C-ArrowRight"],
        &["A-ArrowRight"],
    ),
    nav(CommandName::LineStart, "Move cursor to the start of the line", &["Home"]),
    nav(CommandName::LineEnd, "Move cursor to the end of the line", &["End"]),
    nav(CommandName::Top, "Move cursor to the start of the editable area", &["C-Home"]),
    nav(CommandName::Bottom, "Move cursor to the end of the editable area", &["C-End"]),
    sel(CommandName::SelectLeft, "Expand selection left", &["S-ArrowLeft"]),
    sel(CommandName::SelectRight, "Expand selection right", &["S-ArrowRight"]),
    sel(CommandName::SelectDown, "Expand selection down", &["S-ArrowDown"]),
    sel(CommandName::SelectUp, "Expand selection up", &["S-ArrowUp"]),
    sel2(
        CommandName::SelectBackwardWord,
        "Expand selection to previous word",
        &["C-S-ArrowLeft"],
        &["A-S-ArrowLeft"],
    ),
    sel2(
        CommandName::SelectForwardWord,
        "Expand selection to next word",
        &["C-S-ArrowRight"],
        &["A-S-ArrowRight"],
    ),
    sel(CommandName::SelectLineStart, "Expand selection to the start of the line", &["S-Home"]),
    sel(CommandName::SelectLineEnd, "Expand selection to the end of the line", &["S-End"]),
    sel(CommandName::SelectTop, "Expand selection to the start of the editable area", &["C-S-Home"]),
    sel(CommandName::SelectBottom, "Expand selection to the end of the editable area", &["C-S-End"]),
    edit(CommandName::Backspace, "Delete character before the cursor", &["Backspace"], &[]),
    edit(CommandName::Delete, "Delete character after the cursor", &["Delete"], &[]),
    edit(CommandName::BackspaceWord, "Delete previous word", &["C-Backspace"], &["A-Backspace"]),
    edit(CommandName::DeleteWord, "Delete next word", &["C-Delete"], &["A-Delete"]),
    edit(CommandName::Enter, "Create a new line", &["Enter"], &[]),
    edit(CommandName::Tab, "Press the tab key", &["Tab"], &[]),
    edit(CommandName::Cut, "Cut selection", &["C-x"], &["Backspace"]),
    edit(CommandName::Copy, "Copy selection", &["C-c"], &["M-c"]),
    edit(CommandName::Paste, "Paste from clipboard", &["C-v"], &["M-v"]),
    edit(CommandName::Undo, "Undo last action", &["C-z"], &["M-z"]),
    edit(CommandName::Redo, "Redo last undone action", &["C-S-z"], &["M-S-z"]),
    builtin(
        CommandName::ExitSelection,
        "Exit the selection, putting the cursor on the correct side",
    ),
    builtin(
        CommandName::SwapSelectionDirection,
        "Move the cursor to the opposite side of the selection",
    ),
];

static REGISTRY: LazyLock<HashMap<CommandName, Command>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|e| {
            (
                e.name,
                Command {
                    name: e.name,
                    group: e.group,
                    description: e.description,
                    keys: combos(e.keys),
                    apple_keys: combos(e.apple_keys),
                    mode: e.mode,
                },
            )
        })
        .collect()
});

/// The full command registry, keyed by name. Built once at first use.
pub fn registry() -> &'static HashMap<CommandName, Command> {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_names() {
        for name in CommandName::ALL {
            let command = name.command();
            assert_eq!(command.name, *name);
            assert!(!command.description.is_empty());
        }
        assert_eq!(registry().len(), CommandName::ALL.len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ForwardWord".parse(), Ok(CommandName::ForwardWord));
        assert_eq!(
            "Bogus".parse::<CommandName>(),
            Err(UnknownCommand("Bogus".into()))
        );
    }

    #[test]
    fn test_platform_keys() {
        let cut = CommandName::Cut.command();
        assert_eq!(cut.keys_for(Platform::Standard)[0].to_string(), "C-x");
        assert_eq!(cut.keys_for(Platform::Apple)[0].to_string(), "Backspace");

        // Commands without an Apple variant fall back to the standard keys.
        let left = CommandName::Left.command();
        assert_eq!(left.keys_for(Platform::Apple)[0].to_string(), "ArrowLeft");
    }

    #[test]
    fn test_platform_detection() {
        assert_eq!(Platform::from_platform_string("MacIntel"), Platform::Apple);
        assert_eq!(Platform::from_platform_string("iPhone"), Platform::Apple);
        assert_eq!(Platform::from_platform_string("Win32"), Platform::Standard);
        assert_eq!(Platform::from_platform_string("Linux x86_64"), Platform::Standard);
    }

    #[test]
    fn test_mode_commands_have_no_keys() {
        let insert = CommandName::Insert.command();
        assert!(insert.keys.is_empty());
        assert_eq!(insert.mode, Some(ActiveMode::Insert));
    }
}
