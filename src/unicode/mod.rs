//! Unicode data access: case canonicalization and property sets.
//!
//! Two canonicalization regimes exist, selected by the `u` flag
//! (ECMA-262 §21.2.2.8.2 "Canonicalize"):
//!
//! - With `u`, characters are compared under simple case folding
//!   (Case_Folding statuses C and S).
//! - Without `u`, the legacy rule applies: uppercase the single UTF-16
//!   code unit; a multi-unit uppercase form, or a non-ASCII character
//!   whose uppercase falls into ASCII, leaves the character unchanged.
//!
//! `uncanonicalize` inverts either regime for case-insensitive class
//! membership. The inverse maps are built on first use and shared
//! process-wide.

pub mod case_folding;
pub mod properties;
pub mod tables;

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::char_set::CharSet;

pub use properties::{load_property, load_property_value};

/// ECMA-262 line terminators: LF, CR, LS, PS.
pub fn is_line_terminator(cp: u32) -> bool {
    matches!(cp, 0x0A | 0x0D | 0x2028 | 0x2029)
}

/// Case-fold `cp` under the regime selected by `unicode`.
pub fn canonicalize(cp: u32, unicode: bool) -> u32 {
    if unicode {
        case_folding::fold(cp)
    } else {
        legacy_fold(cp)
    }
}

/// The non-`u` canonicalization: uppercase via the single-code-unit rule.
fn legacy_fold(cp: u32) -> u32 {
    let c = match char::from_u32(cp) {
        Some(c) => c,
        None => return cp, // lone surrogate code unit
    };
    let mut upper = c.to_uppercase();
    let first = upper.next();
    if upper.next().is_some() {
        return cp; // uppercase form longer than one character
    }
    let up = match first {
        Some(u) => u as u32,
        None => return cp,
    };
    if up > 0xFFFF && cp <= 0xFFFF {
        return cp; // would not fit a single code unit
    }
    if cp >= 0x80 && up < 0x80 {
        return cp; // non-ASCII must not canonicalize into ASCII
    }
    up
}

lazy_static! {
    /// fold target -> all code points folding to it (targets included).
    static ref FOLD_INVERSE: HashMap<u32, Vec<u32>> = {
        let mut map: HashMap<u32, Vec<u32>> = HashMap::new();
        case_folding::for_each_mapping(|from, to| {
            map.entry(to).or_default().push(from);
        });
        map
    };

    /// Legacy-fold target -> all BMP code units folding to it.
    static ref LEGACY_INVERSE: HashMap<u32, Vec<u32>> = {
        let mut map: HashMap<u32, Vec<u32>> = HashMap::new();
        for cp in 0..=0xFFFFu32 {
            let up = legacy_fold(cp);
            if up != cp {
                map.entry(up).or_default().push(cp);
            }
        }
        map
    };
}

/// Every code point that canonicalizes to the same value as `cp`,
/// including `cp`'s canonical form itself. Used for case-insensitive
/// class membership.
pub fn uncanonicalize(cp: u32, unicode: bool) -> Vec<u32> {
    let canonical = canonicalize(cp, unicode);
    let inverse = if unicode { &*FOLD_INVERSE } else { &*LEGACY_INVERSE };
    let mut out = vec![canonical];
    if let Some(pre) = inverse.get(&canonical) {
        out.extend_from_slice(pre);
    }
    out
}

/// The `\d` set.
pub fn digit_set() -> CharSet {
    CharSet::from_range('0' as u32, '9' as u32 + 1)
}

/// The `\w` set. With both `u` and `i`, the fold pre-images of the ASCII
/// word characters (long s and the kelvin sign) are included as well.
pub fn word_set(unicode_ignore_case: bool) -> CharSet {
    let mut set = CharSet::new();
    set.add('0' as u32, '9' as u32 + 1);
    set.add('A' as u32, 'Z' as u32 + 1);
    set.add_one('_' as u32);
    set.add('a' as u32, 'z' as u32 + 1);
    if unicode_ignore_case {
        set.add_one(0x017F); // ſ
        set.add_one(0x212A); // K
    }
    set
}

/// The `\s` set: WhiteSpace plus LineTerminator (ECMA-262 §11.2, §11.3).
pub fn space_set() -> CharSet {
    let mut set = CharSet::from_inclusive_ranges(tables::binary_props::WHITE_SPACE);
    set.add_one(0xFEFF); // ZWNBSP is WhiteSpace in ECMA-262 but not in UCD
    set
}

/// Word-character test for `\b` / `\B`, matching the `\w` set.
pub fn is_word_char(cp: u32, unicode_ignore_case: bool) -> bool {
    matches!(cp,
        0x30..=0x39 | 0x41..=0x5A | 0x5F | 0x61..=0x7A)
        || (unicode_ignore_case && (cp == 0x017F || cp == 0x212A))
}

lazy_static! {
    static ref ID_START: CharSet = properties::id_start_set();
    static ref ID_CONTINUE: CharSet = properties::id_continue_set();
}

/// ID_Start test for group-name lexing (`$` and `_` are handled by the
/// caller per the RegExpIdentifierStart grammar).
pub fn is_id_start(cp: u32) -> bool {
    ID_START.contains(cp)
}

/// ID_Continue test for group-name lexing.
pub fn is_id_continue(cp: u32) -> bool {
    ID_CONTINUE.contains(cp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_fold_ascii() {
        assert_eq!(canonicalize('a' as u32, false), 'A' as u32);
        assert_eq!(canonicalize('A' as u32, false), 'A' as u32);
        assert_eq!(canonicalize('0' as u32, false), '0' as u32);
    }

    #[test]
    fn test_legacy_fold_blocks_ascii_crossing() {
        // ſ uppercases to S, which would cross into ASCII: unchanged.
        assert_eq!(canonicalize(0x017F, false), 0x017F);
        // K (kelvin) uppercases to itself.
        assert_eq!(canonicalize(0x212A, false), 0x212A);
        // ß uppercases to "SS" (two units): unchanged.
        assert_eq!(canonicalize(0x00DF, false), 0x00DF);
    }

    #[test]
    fn test_unicode_fold() {
        assert_eq!(canonicalize('A' as u32, true), 'a' as u32);
        assert_eq!(canonicalize(0x212A, true), 'k' as u32);
        assert_eq!(canonicalize(0x017F, true), 's' as u32);
    }

    #[test]
    fn test_canonicalize_idempotent() {
        for cp in [0x41, 0x61, 0x17F, 0x212A, 0x3C2, 0x1E9E, 0x1F1, 0x410, 0x430] {
            let once = canonicalize(cp, true);
            assert_eq!(canonicalize(once, true), once, "U+{:04X}", cp);
        }
    }

    #[test]
    fn test_uncanonicalize_contains_all_variants() {
        let ks = uncanonicalize('k' as u32, true);
        assert!(ks.contains(&('k' as u32)));
        assert!(ks.contains(&('K' as u32)));
        assert!(ks.contains(&0x212A));

        // dz digraph: Ǳ ǲ ǳ all fold together
        let dz = uncanonicalize(0x01F1, true);
        assert!(dz.contains(&0x01F1));
        assert!(dz.contains(&0x01F2));
        assert!(dz.contains(&0x01F3));
    }

    #[test]
    fn test_uncanonicalize_legacy() {
        let asciis = uncanonicalize('a' as u32, false);
        assert!(asciis.contains(&('a' as u32)));
        assert!(asciis.contains(&('A' as u32)));
        // Kelvin does not join k/K without the u flag
        assert!(!asciis.contains(&0x212A));
    }

    #[test]
    fn test_word_set_variants() {
        assert!(!word_set(false).contains(0x212A));
        assert!(word_set(true).contains(0x212A));
        assert!(word_set(true).contains(0x017F));
        assert!(word_set(false).contains('_' as u32));
    }

    #[test]
    fn test_space_set_has_zwnbsp() {
        let s = space_set();
        assert!(s.contains(0xFEFF));
        assert!(s.contains(0x0A));
        assert!(s.contains(0x2029));
        assert!(!s.contains('x' as u32));
    }

    #[test]
    fn test_id_start_continue() {
        assert!(is_id_start('a' as u32));
        assert!(is_id_start(0x3042));
        assert!(!is_id_start('1' as u32));
        assert!(is_id_continue('1' as u32));
        assert!(!is_id_start('$' as u32)); // caller adds $ and _
    }
}
