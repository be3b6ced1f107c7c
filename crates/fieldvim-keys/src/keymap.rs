//! Keymap and action definitions.

use crate::combo::KeyCombo;
use crate::command::CommandName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How an action executes when its key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Execute the command list immediately.
    Command,
    /// Defer the command list until a motion completes it.
    Operator,
}

/// A bound action: an ordered command list, run now or deferred as an
/// operator body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub commands: Vec<CommandName>,
}

impl Action {
    /// An immediately executing action.
    pub fn command(commands: Vec<CommandName>) -> Self {
        Self {
            kind: ActionKind::Command,
            commands,
        }
    }

    /// An operator action that waits for a motion.
    pub fn operator(commands: Vec<CommandName>) -> Self {
        Self {
            kind: ActionKind::Operator,
            commands,
        }
    }
}

/// Bindings for one mode: canonical key combo to action, last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, Action>,
}

impl Keymap {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a combo, replacing any previous binding.
    pub fn bind(&mut self, combo: KeyCombo, action: Action) {
        self.bindings.insert(combo, action);
    }

    /// Remove a binding, if present.
    pub fn unbind(&mut self, combo: &KeyCombo) {
        self.bindings.remove(combo);
    }

    /// Remove every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Get the action bound to a combo.
    pub fn get(&self, combo: &KeyCombo) -> Option<&Action> {
        self.bindings.get(combo)
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, &Action)> {
        self.bindings.iter()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the keymap has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyspec::normalize_keyspec;

    #[test]
    fn test_bind_and_get() {
        let mut map = Keymap::new();
        let combo = normalize_keyspec("C-q").unwrap();
        map.bind(combo.clone(), Action::command(vec![CommandName::Normal]));

        let action = map.get(&combo).unwrap();
        assert_eq!(action.kind, ActionKind::Command);
        assert_eq!(action.commands, vec![CommandName::Normal]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut map = Keymap::new();
        let combo = normalize_keyspec("d").unwrap();
        map.bind(combo.clone(), Action::command(vec![CommandName::Delete]));
        map.bind(combo.clone(), Action::operator(vec![CommandName::Cut]));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&combo).unwrap().kind, ActionKind::Operator);
    }

    #[test]
    fn test_equivalent_specs_collide() {
        // `S-A` and `A` normalize to the same combo, so the second bind
        // replaces the first.
        let mut map = Keymap::new();
        map.bind(
            normalize_keyspec("S-A").unwrap(),
            Action::command(vec![CommandName::Left]),
        );
        map.bind(
            normalize_keyspec("A").unwrap(),
            Action::command(vec![CommandName::Right]),
        );

        assert_eq!(map.len(), 1);
        let action = map.get(&normalize_keyspec("S-A").unwrap()).unwrap();
        assert_eq!(action.commands, vec![CommandName::Right]);
    }

    #[test]
    fn test_unbind_and_clear() {
        let mut map = Keymap::new();
        let combo = normalize_keyspec("x").unwrap();
        map.bind(combo.clone(), Action::command(vec![CommandName::Delete]));
        map.unbind(&combo);
        assert!(map.is_empty());

        map.bind(combo, Action::command(vec![CommandName::Delete]));
        map.clear();
        assert!(map.is_empty());
    }
}
