//! Tests for canonicalization and property lookup, including the
//! idempotence and equivariance properties of case folding.

use ecma_regex::unicode::{canonicalize, load_property, load_property_value, uncanonicalize};
use ecma_regex::Regex;
use proptest::prelude::*;

mod canonicalize_unicode {
    use super::*;

    #[test]
    fn test_folds_to_lowercase_families() {
        assert_eq!(canonicalize('A' as u32, true), 'a' as u32);
        assert_eq!(canonicalize(0x0410, true), 0x0430); // А -> а
        assert_eq!(canonicalize(0x0391, true), 0x03B1); // Α -> α
        assert_eq!(canonicalize(0x212A, true), 'k' as u32);
    }

    #[test]
    fn test_uncanonicalize_inverts_fold() {
        for &cp in &[0x6B, 0x4B, 0x212A] {
            let family = uncanonicalize(cp, true);
            assert!(family.contains(&0x6B));
            assert!(family.contains(&0x4B));
            assert!(family.contains(&0x212A));
        }
    }

    proptest! {
        /// canonicalize(canonicalize(c)) == canonicalize(c)
        #[test]
        fn prop_fold_idempotent(cp in 0u32..0x110000) {
            let once = canonicalize(cp, true);
            prop_assert_eq!(canonicalize(once, true), once);
        }

        /// Every member of a fold family canonicalizes to the same value.
        #[test]
        fn prop_family_shares_canonical(cp in 0u32..0x110000) {
            let canonical = canonicalize(cp, true);
            for member in uncanonicalize(cp, true) {
                prop_assert_eq!(canonicalize(member, true), canonical);
            }
        }

        /// The legacy rule never maps non-ASCII into ASCII.
        #[test]
        fn prop_legacy_respects_ascii_border(cp in 0x80u32..0x10000) {
            prop_assert!(canonicalize(cp, false) >= 0x80);
        }
    }
}

mod matching_equivariance {
    use super::*;

    /// Under `i`+`u`, a class matches a character iff it matches any
    /// member of the character's fold family.
    #[test]
    fn test_class_matching_is_fold_equivariant() {
        let re = Regex::with_flags("[k]", "iu").unwrap();
        for &cp in &[0x6B, 0x4B, 0x212A] {
            let c = char::from_u32(cp).unwrap().to_string();
            assert!(re.test(&c), "U+{:04X} should match [k]/iu", cp);
        }
        let re = Regex::with_flags("[σ]", "iu").unwrap();
        for c in ["σ", "Σ", "ς"] {
            assert!(re.test(c), "{} should match [σ]/iu", c);
        }
    }

    #[test]
    fn test_legacy_class_matching() {
        let re = Regex::with_flags("[k]", "i").unwrap();
        assert!(re.test("k"));
        assert!(re.test("K"));
        assert!(!re.test("\u{212A}")); // kelvin joins only under u
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_general_category_lookup() {
        let lu = load_property_value("gc", "Lu").unwrap();
        assert!(lu.contains('A' as u32));
        assert!(!lu.contains('a' as u32));
        // lone value form
        let nd = load_property("Nd").unwrap();
        assert!(nd.contains('3' as u32));
    }

    #[test]
    fn test_script_aliases_agree() {
        let a = load_property_value("Script", "Hiragana").unwrap();
        let b = load_property_value("sc", "Hira").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_is_absent() {
        assert!(load_property("Bogus").is_none());
        assert!(load_property_value("sc", "Bogus").is_none());
        assert!(load_property_value("Bogus", "L").is_none());
    }

    #[test]
    fn test_property_escapes_in_patterns() {
        assert!(Regex::with_flags("\\p{Any}", "u").unwrap().test("\u{10FFFF}"));
        assert!(Regex::with_flags("\\p{ASCII}", "u").unwrap().test("a"));
        assert!(!Regex::with_flags("\\p{ASCII}", "u").unwrap().test("é"));
        assert!(Regex::with_flags("\\p{AHex}", "u").unwrap().test("F"));
        assert!(Regex::with_flags("\\P{Assigned}", "u").unwrap().test("\u{0378}"));
    }

    #[test]
    fn test_inverted_property_in_class() {
        let re = Regex::with_flags("[\\P{L}]", "u").unwrap();
        assert!(re.test("5"));
        assert!(!re.test("x"));
    }
}
