//! Keyspec normalization for the configuration language.
//!
//! A keyspec is the second token of a map statement, e.g. `C-S-ArrowLeft`
//! or `A`. Normalization produces the canonical [`KeyCombo`] used as the
//! keymap key, so differently written but equivalent specs collide by
//! construction.

use crate::combo::{KeyCombo, KeyspecError, Modifiers};

/// Symbols on the shifted row of a US layout. A binding for one of these
/// implies the shift modifier.
const SHIFTED_SYMBOLS: &str = "~!@#$%^&*()_+{}|:\"<>?";

/// Normalize a keyspec into a canonical key combo.
///
/// Rules:
/// - segments are split on `-`; the last is the base key, the rest must
///   each be one of the modifier letters `A`, `C`, `S` (case-sensitive)
/// - a single-character base that is an uppercase letter or a shifted-row
///   symbol implies `S`; named labels are never shift-promoted
/// - modifiers are sorted into canonical order
pub fn normalize_keyspec(spec: &str) -> Result<KeyCombo, KeyspecError> {
    if spec.is_empty() {
        return Err(KeyspecError::Empty);
    }

    let segments: Vec<&str> = spec.split('-').collect();
    let Some((base, mod_segments)) = segments.split_last() else {
        return Err(KeyspecError::Empty);
    };

    let mut modifiers = Modifiers::NONE;
    for segment in mod_segments {
        let mut chars = segment.chars();
        match (chars.next(), chars.next()) {
            (Some(letter @ ('A' | 'C' | 'S')), None) => {
                modifiers.set_letter(letter);
            }
            _ => return Err(KeyspecError::InvalidModifier(segment.to_string())),
        }
    }

    if implies_shift(base) {
        modifiers.shift = true;
    }

    KeyCombo::new(*base, modifiers)
}

fn implies_shift(base: &str) -> bool {
    let mut chars = base.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_uppercase() || SHIFTED_SYMBOLS.contains(c),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_key() {
        let combo = normalize_keyspec("h").unwrap();
        assert_eq!(combo.to_string(), "h");
    }

    #[test]
    fn test_explicit_modifiers_sorted() {
        let combo = normalize_keyspec("S-C-ArrowLeft").unwrap();
        assert_eq!(combo.to_string(), "C-S-ArrowLeft");
    }

    #[test]
    fn test_uppercase_implies_shift() {
        // `S-A` and a bare uppercase `A` are the same binding.
        let explicit = normalize_keyspec("S-A").unwrap();
        let implicit = normalize_keyspec("A").unwrap();
        assert_eq!(explicit, implicit);
        assert_eq!(implicit.to_string(), "S-A");
    }

    #[test]
    fn test_shifted_symbol_implies_shift() {
        assert_eq!(normalize_keyspec("$").unwrap().to_string(), "S-$");
        assert_eq!(normalize_keyspec("^").unwrap().to_string(), "S-^");
        // Unshifted symbols stay as they are.
        assert_eq!(normalize_keyspec(",").unwrap().to_string(), ",");
    }

    #[test]
    fn test_named_labels_never_shift_promoted() {
        // `ArrowLeft` contains uppercase letters but is not a single
        // character, so no implicit shift applies.
        let combo = normalize_keyspec("ArrowLeft").unwrap();
        assert!(combo.modifiers().is_empty());
    }

    #[test]
    fn test_invalid_modifier() {
        assert_eq!(
            normalize_keyspec("Q-x"),
            Err(KeyspecError::InvalidModifier("Q".into()))
        );
        // Meta and lowercase letters are not valid keyspec modifiers.
        assert_eq!(
            normalize_keyspec("M-x"),
            Err(KeyspecError::InvalidModifier("M".into()))
        );
        assert_eq!(
            normalize_keyspec("c-x"),
            Err(KeyspecError::InvalidModifier("c".into()))
        );
    }

    #[test]
    fn test_unrecognized_base() {
        assert!(matches!(
            normalize_keyspec("C-Bogus"),
            Err(KeyspecError::UnrecognizedKey(_))
        ));
    }

    proptest! {
        // Normalizing a spec already in canonical form is the identity.
        #[test]
        fn canonical_form_is_idempotent(
            control in any::<bool>(),
            alt in any::<bool>(),
            base in "[a-z0-9,;.=]",
        ) {
            let mut spec = String::new();
            if alt {
                spec.push_str("A-");
            }
            if control {
                spec.push_str("C-");
            }
            spec.push_str(&base);

            let combo = normalize_keyspec(&spec).unwrap();
            prop_assert_eq!(combo.to_string(), spec.clone());
            let again = normalize_keyspec(&combo.to_string()).unwrap();
            prop_assert_eq!(again, combo);
        }

        // Uppercase bases always normalize with shift present and sorted
        // modifiers.
        #[test]
        fn uppercase_base_gains_shift(
            control in any::<bool>(),
            base in "[A-Z]",
        ) {
            let spec = if control {
                format!("C-{}", base)
            } else {
                base.clone()
            };
            let combo = normalize_keyspec(&spec).unwrap();
            prop_assert!(combo.modifiers().shift);
            let expected = if control {
                format!("C-S-{}", base)
            } else {
                format!("S-{}", base)
            };
            prop_assert_eq!(combo.to_string(), expected);
        }
    }
}
