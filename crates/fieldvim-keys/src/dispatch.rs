//! Modifier-mask dispatch tables.
//!
//! A [`Keymap`] is compiled once per configuration change into eight
//! buckets, one per 3-bit modifier mask, each mapping the base-key label to
//! its entry. Lookup on a keystroke reads the event's modifier flags and
//! probes a single bucket, so no combo string is ever re-parsed per key.

use crate::combo::{KeyCombo, KeyInput, Modifiers};
use crate::keymap::{Action, Keymap};
use std::collections::HashMap;

/// What a compiled table slot resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    /// A configured binding.
    Action(Action),
    /// Synthetic: accumulate a repeat digit (`1`–`9`, and `0` once a repeat
    /// is in progress).
    Digit(u8),
    /// Synthetic: `0` defers to its explicit binding while no repeat digits
    /// have been accumulated, else counts as a digit.
    Zero { bound: Option<Action> },
}

/// Dispatch table for one mode.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    buckets: [HashMap<String, TableEntry>; 8],
}

impl DispatchTable {
    /// Compile a keymap. When `numeric` is set (repeat-capable modes),
    /// unmodified digit keys become synthetic repeat entries overriding any
    /// configured binding, except that a bound `0` still applies while no
    /// repeat is accumulated.
    pub fn compile(map: &Keymap, numeric: bool) -> Self {
        let mut buckets: [HashMap<String, TableEntry>; 8] = Default::default();

        for (combo, action) in map.iter() {
            buckets[combo.mask() as usize]
                .insert(combo.base().to_string(), TableEntry::Action(action.clone()));
        }

        if numeric {
            let zero = KeyCombo::new("0", Modifiers::NONE).expect("digit labels are recognized");
            let bound = map.get(&zero).cloned();
            buckets[0].insert("0".to_string(), TableEntry::Zero { bound });
            for digit in 1..=9u8 {
                buckets[0].insert(digit.to_string(), TableEntry::Digit(digit));
            }
        }

        Self { buckets }
    }

    /// Resolve a key event. `None` means the key is unbound in this mode.
    pub fn lookup(&self, input: &KeyInput) -> Option<&TableEntry> {
        self.buckets[input.mask() as usize].get(input.key.as_str())
    }
}
