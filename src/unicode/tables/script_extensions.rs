//! Script_Extensions additions.
//!
//! For most scripts Script_Extensions equals Script. The tables here hold
//! only the *additional* code points a script gains through scx: shared
//! punctuation, combining marks, and signs whose Script is Common or
//! Inherited. The lookup layer unions an addition table with the base
//! Script table.

use super::RangeTable;

/// Extra Hiragana members: kana repeat marks, voicing marks, the
/// prolonged sound mark, and the vertical kana repeat marks.
pub const HIRAGANA_EXT: RangeTable = &[
    (0x3031, 0x3035),
    (0x303C, 0x303D),
    (0x3099, 0x309C),
    (0x30A0, 0x30A0),
    (0x30FC, 0x30FC),
    (0xFF70, 0xFF70),
    (0xFF9E, 0xFF9F),
];

/// Extra Katakana members (same shared kana signs).
pub const KATAKANA_EXT: RangeTable = &[
    (0x3031, 0x3035),
    (0x303C, 0x303D),
    (0x3099, 0x309C),
    (0x30A0, 0x30A0),
    (0x30FB, 0x30FC),
    (0xFF70, 0xFF70),
    (0xFF9E, 0xFF9F),
];

/// Extra Han members: ideographic iteration/closing marks and kanbun.
pub const HAN_EXT: RangeTable = &[
    (0x3003, 0x3003),
    (0x3006, 0x3006),
    (0x303C, 0x303D),
    (0x3190, 0x319F),
];

/// Extra Cyrillic members: the combining titlo and related marks.
pub const CYRILLIC_EXT: RangeTable = &[(0x0483, 0x0483), (0x0485, 0x0486), (0x2E43, 0x2E43)];

/// Extra Arabic members: shared Arabic-script signs and digits.
pub const ARABIC_EXT: RangeTable = &[
    (0x0640, 0x0640),
    (0x0660, 0x0669),
    (0x06DD, 0x06DD),
    (0xFD3E, 0xFD3F),
];

/// Extra Devanagari members: danda, double danda, and Vedic signs.
pub const DEVANAGARI_EXT: RangeTable = &[(0x0951, 0x0952), (0x0964, 0x0965), (0x20F0, 0x20F0)];

/// The scx additions for a canonical script name, if it has any.
pub fn additions(name: &str) -> Option<RangeTable> {
    Some(match name {
        "Hiragana" => HIRAGANA_EXT,
        "Katakana" => KATAKANA_EXT,
        "Han" => HAN_EXT,
        "Cyrillic" => CYRILLIC_EXT,
        "Arabic" => ARABIC_EXT,
        "Devanagari" => DEVANAGARI_EXT,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::tables::table_contains;

    #[test]
    fn test_kana_share_voicing_marks() {
        assert!(table_contains(HIRAGANA_EXT, 0x3099));
        assert!(table_contains(KATAKANA_EXT, 0x3099));
        assert!(table_contains(HIRAGANA_EXT, 0x30FC));
    }

    #[test]
    fn test_no_additions_for_most_scripts() {
        assert!(additions("Latin").is_none());
        assert!(additions("Hiragana").is_some());
    }
}
