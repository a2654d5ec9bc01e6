//! Binary property range tables.
//!
//! Properties whose extent is a plain union of General_Category tables
//! (`Alphabetic`, `Uppercase`, …) are composed by the lookup layer; the
//! tables here are the ones with their own extents, plus the small
//! "Other_*" contributory sets the compositions need.

use super::RangeTable;

/// White_Space.
pub const WHITE_SPACE: RangeTable = &[
    (0x0009, 0x000D),
    (0x0020, 0x0020),
    (0x0085, 0x0085),
    (0x00A0, 0x00A0),
    (0x1680, 0x1680),
    (0x2000, 0x200A),
    (0x2028, 0x2029),
    (0x202F, 0x202F),
    (0x205F, 0x205F),
    (0x3000, 0x3000),
];

/// ASCII.
pub const ASCII: RangeTable = &[(0x0000, 0x007F)];

/// Any: the full code-point space.
pub const ANY: RangeTable = &[(0x0000, 0x10FFFF)];

/// ASCII_Hex_Digit.
pub const ASCII_HEX_DIGIT: RangeTable = &[(0x0030, 0x0039), (0x0041, 0x0046), (0x0061, 0x0066)];

/// Hex_Digit.
pub const HEX_DIGIT: RangeTable = &[
    (0x0030, 0x0039),
    (0x0041, 0x0046),
    (0x0061, 0x0066),
    (0xFF10, 0xFF19),
    (0xFF21, 0xFF26),
    (0xFF41, 0xFF46),
];

/// Ideographic.
pub const IDEOGRAPHIC: RangeTable = &[
    (0x3006, 0x3007),
    (0x3021, 0x3029),
    (0x3038, 0x303A),
    (0x3400, 0x4DB5),
    (0x4E00, 0x9FEF),
    (0xF900, 0xFA6D),
    (0xFA70, 0xFAD9),
    (0x20000, 0x2A6D6),
    (0x2A700, 0x2B734),
    (0x2F800, 0x2FA1D),
];

/// Dash.
pub const DASH: RangeTable = &[
    (0x002D, 0x002D),
    (0x058A, 0x058A),
    (0x05BE, 0x05BE),
    (0x1400, 0x1400),
    (0x2010, 0x2015),
    (0x2053, 0x2053),
    (0x207B, 0x207B),
    (0x208B, 0x208B),
    (0x2212, 0x2212),
    (0x2E17, 0x2E17),
    (0x301C, 0x301C),
    (0x3030, 0x3030),
    (0xFE58, 0xFE58),
    (0xFE63, 0xFE63),
    (0xFF0D, 0xFF0D),
];

/// Quotation_Mark.
pub const QUOTATION_MARK: RangeTable = &[
    (0x0022, 0x0022),
    (0x0027, 0x0027),
    (0x00AB, 0x00AB),
    (0x00BB, 0x00BB),
    (0x2018, 0x201F),
    (0x2039, 0x203A),
    (0x300C, 0x300F),
    (0x301D, 0x301F),
    (0xFE41, 0xFE44),
    (0xFF02, 0xFF02),
    (0xFF07, 0xFF07),
    (0xFF62, 0xFF63),
];

/// Terminal_Punctuation.
pub const TERMINAL_PUNCTUATION: RangeTable = &[
    (0x0021, 0x0021),
    (0x002C, 0x002C),
    (0x002E, 0x002E),
    (0x003A, 0x003B),
    (0x003F, 0x003F),
    (0x037E, 0x037E),
    (0x0387, 0x0387),
    (0x0589, 0x0589),
    (0x061B, 0x061B),
    (0x061F, 0x061F),
    (0x06D4, 0x06D4),
    (0x0964, 0x0965),
    (0x0E5A, 0x0E5B),
    (0x3001, 0x3002),
    (0xFE50, 0xFE52),
    (0xFE54, 0xFE57),
    (0xFF01, 0xFF01),
    (0xFF0C, 0xFF0C),
    (0xFF0E, 0xFF0E),
    (0xFF1A, 0xFF1B),
    (0xFF1F, 0xFF1F),
    (0xFF61, 0xFF61),
    (0xFF64, 0xFF64),
];

/// Other_Alphabetic: alphabetic marks outside the Letter categories.
pub const OTHER_ALPHABETIC: RangeTable = &[
    (0x0345, 0x0345),
    (0x05B0, 0x05BD),
    (0x05BF, 0x05BF),
    (0x05C1, 0x05C2),
    (0x064B, 0x0655),
    (0x0670, 0x0670),
    (0x0901, 0x0903),
    (0x093E, 0x094C),
    (0x0962, 0x0963),
    (0x0E31, 0x0E31),
    (0x0E34, 0x0E3A),
    (0x0E4D, 0x0E4D),
];

/// Other_ID_Start.
pub const OTHER_ID_START: RangeTable = &[
    (0x1885, 0x1886),
    (0x2118, 0x2118),
    (0x212E, 0x212E),
    (0x309B, 0x309C),
];

/// Other_ID_Continue.
pub const OTHER_ID_CONTINUE: RangeTable = &[
    (0x00B7, 0x00B7),
    (0x0387, 0x0387),
    (0x1369, 0x1371),
    (0x19DA, 0x19DA),
];

/// Join_Control.
pub const JOIN_CONTROL: RangeTable = &[(0x200C, 0x200D)];

/// Noncharacter_Code_Point.
pub const NONCHARACTER_CODE_POINT: RangeTable = &[
    (0xFDD0, 0xFDEF),
    (0xFFFE, 0xFFFF),
    (0x1FFFE, 0x1FFFF),
    (0x2FFFE, 0x2FFFF),
    (0x3FFFE, 0x3FFFF),
    (0x4FFFE, 0x4FFFF),
    (0x5FFFE, 0x5FFFF),
    (0x6FFFE, 0x6FFFF),
    (0x7FFFE, 0x7FFFF),
    (0x8FFFE, 0x8FFFF),
    (0x9FFFE, 0x9FFFF),
    (0xAFFFE, 0xAFFFF),
    (0xBFFFE, 0xBFFFF),
    (0xCFFFE, 0xCFFFF),
    (0xDFFFE, 0xDFFFF),
    (0xEFFFE, 0xEFFFF),
    (0xFFFFE, 0xFFFFF),
    (0x10FFFE, 0x10FFFF),
];

/// Resolve a canonical binary property name to a table with its own
/// extent. Composed properties return `None` here and are handled by the
/// lookup layer.
pub fn table(name: &str) -> Option<RangeTable> {
    Some(match name {
        "White_Space" => WHITE_SPACE,
        "ASCII" => ASCII,
        "Any" => ANY,
        "ASCII_Hex_Digit" => ASCII_HEX_DIGIT,
        "Hex_Digit" => HEX_DIGIT,
        "Ideographic" => IDEOGRAPHIC,
        "Dash" => DASH,
        "Quotation_Mark" => QUOTATION_MARK,
        "Terminal_Punctuation" => TERMINAL_PUNCTUATION,
        "Join_Control" => JOIN_CONTROL,
        "Noncharacter_Code_Point" => NONCHARACTER_CODE_POINT,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::tables::table_contains;

    #[test]
    fn test_white_space() {
        assert!(table_contains(WHITE_SPACE, 0x20));
        assert!(table_contains(WHITE_SPACE, 0x09));
        assert!(table_contains(WHITE_SPACE, 0x2028));
        assert!(!table_contains(WHITE_SPACE, 'a' as u32));
        // ZWNBSP is not White_Space; the pattern \s adds it separately
        assert!(!table_contains(WHITE_SPACE, 0xFEFF));
    }

    #[test]
    fn test_lookup() {
        assert!(table("White_Space").is_some());
        assert!(table("ASCII").is_some());
        // Composed elsewhere
        assert!(table("Alphabetic").is_none());
    }
}
