//! Script range tables, keyed by canonical long script name.

use super::RangeTable;

/// Latin.
pub const LATIN: RangeTable = &[
    (0x0041, 0x005A),
    (0x0061, 0x007A),
    (0x00AA, 0x00AA),
    (0x00BA, 0x00BA),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x02B8),
    (0x02E0, 0x02E4),
    (0x1D00, 0x1D25),
    (0x1D2C, 0x1D5C),
    (0x1D62, 0x1D65),
    (0x1D6B, 0x1D77),
    (0x1D79, 0x1DBE),
    (0x1E00, 0x1EFF),
    (0x2071, 0x2071),
    (0x207F, 0x207F),
    (0x2090, 0x209C),
    (0x212A, 0x212B),
    (0x2132, 0x2132),
    (0x214E, 0x214E),
    (0x2160, 0x2188),
    (0x2C60, 0x2C7F),
    (0xA722, 0xA787),
    (0xA78B, 0xA7B9),
    (0xAB30, 0xAB5A),
    (0xAB5C, 0xAB64),
    (0xFB00, 0xFB06),
    (0xFF21, 0xFF3A),
    (0xFF41, 0xFF5A),
];

/// Greek.
pub const GREEK: RangeTable = &[
    (0x0370, 0x0373),
    (0x0375, 0x0377),
    (0x037A, 0x037D),
    (0x037F, 0x037F),
    (0x0384, 0x0384),
    (0x0386, 0x0386),
    (0x0388, 0x038A),
    (0x038C, 0x038C),
    (0x038E, 0x03A1),
    (0x03A3, 0x03E1),
    (0x03F0, 0x03FF),
    (0x1D26, 0x1D2A),
    (0x1D5D, 0x1D61),
    (0x1D66, 0x1D6A),
    (0x1F00, 0x1F15),
    (0x1F18, 0x1F1D),
    (0x1F20, 0x1F45),
    (0x1F48, 0x1F4D),
    (0x1F50, 0x1F57),
    (0x1F59, 0x1F59),
    (0x1F5B, 0x1F5B),
    (0x1F5D, 0x1F5D),
    (0x1F5F, 0x1F7D),
    (0x1F80, 0x1FB4),
    (0x1FB6, 0x1FC4),
    (0x1FC6, 0x1FD3),
    (0x1FD6, 0x1FDB),
    (0x1FDD, 0x1FEF),
    (0x1FF2, 0x1FF4),
    (0x1FF6, 0x1FFE),
    (0x2126, 0x2126),
];

/// Cyrillic.
pub const CYRILLIC: RangeTable = &[
    (0x0400, 0x0484),
    (0x0487, 0x052F),
    (0x1C80, 0x1C88),
    (0x1D2B, 0x1D2B),
    (0x1D78, 0x1D78),
    (0x2DE0, 0x2DFF),
    (0xA640, 0xA69F),
    (0xFE2E, 0xFE2F),
];

/// Armenian.
pub const ARMENIAN: RangeTable = &[
    (0x0531, 0x0556),
    (0x0559, 0x058A),
    (0x058D, 0x058F),
    (0xFB13, 0xFB17),
];

/// Hebrew.
pub const HEBREW: RangeTable = &[
    (0x0591, 0x05C7),
    (0x05D0, 0x05EA),
    (0x05EF, 0x05F4),
    (0xFB1D, 0xFB36),
    (0xFB38, 0xFB3C),
    (0xFB3E, 0xFB3E),
    (0xFB40, 0xFB41),
    (0xFB43, 0xFB44),
    (0xFB46, 0xFB4F),
];

/// Arabic.
pub const ARABIC: RangeTable = &[
    (0x0600, 0x0604),
    (0x0606, 0x060B),
    (0x060D, 0x061A),
    (0x061E, 0x061E),
    (0x0620, 0x063F),
    (0x0641, 0x064A),
    (0x0656, 0x066F),
    (0x0671, 0x06DC),
    (0x06DE, 0x06FF),
    (0x0750, 0x077F),
    (0x08A0, 0x08B4),
    (0xFB50, 0xFBC1),
    (0xFDF0, 0xFDFD),
    (0xFE70, 0xFE74),
    (0xFE76, 0xFEFC),
];

/// Devanagari.
pub const DEVANAGARI: RangeTable = &[(0x0900, 0x0950), (0x0953, 0x0963), (0x0966, 0x097F), (0xA8E0, 0xA8FF)];

/// Bengali.
pub const BENGALI: RangeTable = &[
    (0x0980, 0x0983),
    (0x0985, 0x098C),
    (0x098F, 0x0990),
    (0x0993, 0x09A8),
    (0x09AA, 0x09B0),
    (0x09B2, 0x09B2),
    (0x09B6, 0x09B9),
    (0x09BC, 0x09C4),
    (0x09C7, 0x09C8),
    (0x09CB, 0x09CE),
    (0x09D7, 0x09D7),
    (0x09DC, 0x09DD),
    (0x09DF, 0x09E3),
    (0x09E6, 0x09FE),
];

/// Tamil.
pub const TAMIL: RangeTable = &[
    (0x0B82, 0x0B83),
    (0x0B85, 0x0B8A),
    (0x0B8E, 0x0B90),
    (0x0B92, 0x0B95),
    (0x0B99, 0x0B9A),
    (0x0B9C, 0x0B9C),
    (0x0B9E, 0x0B9F),
    (0x0BA3, 0x0BA4),
    (0x0BA8, 0x0BAA),
    (0x0BAE, 0x0BB9),
    (0x0BBE, 0x0BC2),
    (0x0BC6, 0x0BC8),
    (0x0BCA, 0x0BCD),
    (0x0BD0, 0x0BD0),
    (0x0BD7, 0x0BD7),
    (0x0BE6, 0x0BFA),
];

/// Thai.
pub const THAI: RangeTable = &[(0x0E01, 0x0E3A), (0x0E40, 0x0E5B)];

/// Lao.
pub const LAO: RangeTable = &[
    (0x0E81, 0x0E82),
    (0x0E84, 0x0E84),
    (0x0E87, 0x0E88),
    (0x0E8A, 0x0E8A),
    (0x0E8D, 0x0E8D),
    (0x0E94, 0x0E97),
    (0x0E99, 0x0E9F),
    (0x0EA1, 0x0EA3),
    (0x0EA5, 0x0EA5),
    (0x0EA7, 0x0EA7),
    (0x0EAA, 0x0EAB),
    (0x0EAD, 0x0EB9),
    (0x0EBB, 0x0EBD),
    (0x0EC0, 0x0EC4),
    (0x0EC6, 0x0EC6),
    (0x0EC8, 0x0ECD),
    (0x0ED0, 0x0ED9),
];

/// Tibetan.
pub const TIBETAN: RangeTable = &[
    (0x0F00, 0x0F47),
    (0x0F49, 0x0F6C),
    (0x0F71, 0x0F97),
    (0x0F99, 0x0FBC),
    (0x0FBE, 0x0FCC),
    (0x0FCE, 0x0FD4),
];

/// Myanmar.
pub const MYANMAR: RangeTable = &[(0x1000, 0x109F), (0xA9E0, 0xA9FE), (0xAA60, 0xAA7F)];

/// Georgian.
pub const GEORGIAN: RangeTable = &[
    (0x10A0, 0x10C5),
    (0x10C7, 0x10C7),
    (0x10CD, 0x10CD),
    (0x10D0, 0x10FA),
    (0x10FC, 0x10FF),
    (0x1C90, 0x1CBA),
    (0x1CBD, 0x1CBF),
    (0x2D00, 0x2D25),
    (0x2D27, 0x2D27),
    (0x2D2D, 0x2D2D),
];

/// Hangul.
pub const HANGUL: RangeTable = &[
    (0x1100, 0x11FF),
    (0x302E, 0x302F),
    (0x3131, 0x318E),
    (0x3200, 0x321E),
    (0xA960, 0xA97C),
    (0xAC00, 0xD7A3),
    (0xD7B0, 0xD7C6),
    (0xD7CB, 0xD7FB),
    (0xFFA0, 0xFFBE),
    (0xFFC2, 0xFFC7),
    (0xFFCA, 0xFFCF),
    (0xFFD2, 0xFFD7),
    (0xFFDA, 0xFFDC),
];

/// Ethiopic.
pub const ETHIOPIC: RangeTable = &[
    (0x1200, 0x1248),
    (0x124A, 0x124D),
    (0x1250, 0x1256),
    (0x1258, 0x1258),
    (0x125A, 0x125D),
    (0x1260, 0x1288),
    (0x128A, 0x128D),
    (0x1290, 0x12B0),
    (0x12B2, 0x12B5),
    (0x12B8, 0x12BE),
    (0x1318, 0x135A),
    (0x135D, 0x137C),
    (0x1380, 0x1399),
];

/// Cherokee.
pub const CHEROKEE: RangeTable = &[(0x13A0, 0x13F5), (0x13F8, 0x13FD), (0xAB70, 0xABBF)];

/// Mongolian.
pub const MONGOLIAN: RangeTable = &[(0x1800, 0x1801), (0x1804, 0x1804), (0x1806, 0x180E), (0x1810, 0x1819), (0x1820, 0x1878), (0x1880, 0x18AA)];

/// Khmer.
pub const KHMER: RangeTable = &[(0x1780, 0x17DD), (0x17E0, 0x17E9), (0x17F0, 0x17F9), (0x19E0, 0x19FF)];

/// Glagolitic.
pub const GLAGOLITIC: RangeTable = &[(0x2C00, 0x2C2E), (0x2C30, 0x2C5E)];

/// Coptic.
pub const COPTIC: RangeTable = &[(0x03E2, 0x03EF), (0x2C80, 0x2CF3), (0x2CF9, 0x2CFF)];

/// Hiragana.
pub const HIRAGANA: RangeTable = &[
    (0x3041, 0x3096),
    (0x309D, 0x309F),
    (0x1B001, 0x1B11E),
    (0x1F200, 0x1F200),
];

/// Katakana.
pub const KATAKANA: RangeTable = &[
    (0x30A1, 0x30FA),
    (0x30FD, 0x30FF),
    (0x31F0, 0x31FF),
    (0x32D0, 0x32FE),
    (0x3300, 0x3357),
    (0xFF66, 0xFF6F),
    (0xFF71, 0xFF9D),
    (0x1B000, 0x1B000),
];

/// Bopomofo.
pub const BOPOMOFO: RangeTable = &[(0x02EA, 0x02EB), (0x3105, 0x312F), (0x31A0, 0x31BA)];

/// Han.
pub const HAN: RangeTable = &[
    (0x2E80, 0x2E99),
    (0x2E9B, 0x2EF3),
    (0x2F00, 0x2FD5),
    (0x3005, 0x3005),
    (0x3007, 0x3007),
    (0x3021, 0x3029),
    (0x3038, 0x303B),
    (0x3400, 0x4DB5),
    (0x4E00, 0x9FEF),
    (0xF900, 0xFA6D),
    (0xFA70, 0xFAD9),
    (0x20000, 0x2A6D6),
    (0x2A700, 0x2B734),
    (0x2F800, 0x2FA1D),
];

/// Yi.
pub const YI: RangeTable = &[(0xA000, 0xA48C), (0xA490, 0xA4C6)];

/// Gothic.
pub const GOTHIC: RangeTable = &[(0x10330, 0x1034A)];

/// Old_Italic.
pub const OLD_ITALIC: RangeTable = &[(0x10300, 0x10323), (0x1032D, 0x1032F)];

/// Deseret.
pub const DESERET: RangeTable = &[(0x10400, 0x1044F)];

/// Osage.
pub const OSAGE: RangeTable = &[(0x104B0, 0x104D3), (0x104D8, 0x104FB)];

/// Adlam.
pub const ADLAM: RangeTable = &[(0x1E900, 0x1E94A), (0x1E950, 0x1E959), (0x1E95E, 0x1E95F)];

/// Common.
pub const COMMON: RangeTable = &[
    (0x0000, 0x0040),
    (0x005B, 0x0060),
    (0x007B, 0x00A9),
    (0x00AB, 0x00B9),
    (0x00BB, 0x00BF),
    (0x00D7, 0x00D7),
    (0x00F7, 0x00F7),
    (0x02B9, 0x02DF),
    (0x02E5, 0x02E9),
    (0x02EC, 0x02FF),
    (0x0374, 0x0374),
    (0x037E, 0x037E),
    (0x0385, 0x0385),
    (0x0387, 0x0387),
    (0x0605, 0x0605),
    (0x060C, 0x060C),
    (0x061B, 0x061C),
    (0x061F, 0x061F),
    (0x0640, 0x0640),
    (0x06DD, 0x06DD),
    (0x0964, 0x0965),
    (0x0E3F, 0x0E3F),
    (0x10FB, 0x10FB),
    (0x16EB, 0x16ED),
    (0x2000, 0x200B),
    (0x2010, 0x2027),
    (0x2030, 0x205E),
    (0x2060, 0x2064),
    (0x2066, 0x2070),
    (0x2074, 0x207E),
    (0x2080, 0x208E),
    (0x20A0, 0x20BF),
    (0x2100, 0x2125),
    (0x2127, 0x2129),
    (0x212C, 0x2131),
    (0x2133, 0x214D),
    (0x214F, 0x215F),
    (0x2189, 0x2189),
    (0x2190, 0x2426),
    (0x2440, 0x244A),
    (0x2460, 0x27FF),
    (0x2900, 0x2B73),
    (0x2E00, 0x2E4E),
    (0x3000, 0x3004),
    (0x3006, 0x3006),
    (0x3008, 0x3020),
    (0x3030, 0x3037),
    (0x303C, 0x303F),
    (0x30A0, 0x30A0),
    (0x30FB, 0x30FC),
    (0x3358, 0x33FF),
    (0xFE10, 0xFE19),
    (0xFE30, 0xFE52),
    (0xFE54, 0xFE66),
    (0xFE68, 0xFE6B),
    (0xFEFF, 0xFEFF),
    (0xFF01, 0xFF20),
    (0xFF3B, 0xFF40),
    (0xFF5B, 0xFF65),
    (0xFF70, 0xFF70),
    (0xFF9E, 0xFF9F),
    (0xFFE0, 0xFFE6),
    (0xFFE8, 0xFFEE),
    (0x1F300, 0x1F5FF),
    (0x1F600, 0x1F64F),
    (0x1F680, 0x1F6D4),
];

/// Inherited.
pub const INHERITED: RangeTable = &[
    (0x0300, 0x036F),
    (0x0485, 0x0486),
    (0x064B, 0x0655),
    (0x0670, 0x0670),
    (0x0951, 0x0952),
    (0x1AB0, 0x1ABE),
    (0x1CD0, 0x1CD2),
    (0x1DC0, 0x1DF9),
    (0x200C, 0x200D),
    (0x20D0, 0x20F0),
    (0x302A, 0x302D),
    (0x3099, 0x309A),
    (0xFE00, 0xFE0F),
    (0xFE20, 0xFE2D),
];

/// Resolve a canonical long script name to its table.
pub fn table(name: &str) -> Option<RangeTable> {
    Some(match name {
        "Latin" => LATIN,
        "Greek" => GREEK,
        "Cyrillic" => CYRILLIC,
        "Armenian" => ARMENIAN,
        "Hebrew" => HEBREW,
        "Arabic" => ARABIC,
        "Devanagari" => DEVANAGARI,
        "Bengali" => BENGALI,
        "Tamil" => TAMIL,
        "Thai" => THAI,
        "Lao" => LAO,
        "Tibetan" => TIBETAN,
        "Myanmar" => MYANMAR,
        "Georgian" => GEORGIAN,
        "Hangul" => HANGUL,
        "Ethiopic" => ETHIOPIC,
        "Cherokee" => CHEROKEE,
        "Mongolian" => MONGOLIAN,
        "Khmer" => KHMER,
        "Glagolitic" => GLAGOLITIC,
        "Coptic" => COPTIC,
        "Hiragana" => HIRAGANA,
        "Katakana" => KATAKANA,
        "Bopomofo" => BOPOMOFO,
        "Han" => HAN,
        "Yi" => YI,
        "Gothic" => GOTHIC,
        "Old_Italic" => OLD_ITALIC,
        "Deseret" => DESERET,
        "Osage" => OSAGE,
        "Adlam" => ADLAM,
        "Common" => COMMON,
        "Inherited" => INHERITED,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::tables::table_contains;

    #[test]
    fn test_script_membership() {
        assert!(table_contains(HIRAGANA, 0x3042)); // あ
        assert!(!table_contains(HIRAGANA, 0x30A2)); // ア is Katakana
        assert!(table_contains(KATAKANA, 0x30A2));
        assert!(table_contains(HAN, 0x4E00));
        assert!(table_contains(LATIN, 'A' as u32));
        assert!(table_contains(COMMON, '0' as u32));
    }

    #[test]
    fn test_script_lookup() {
        assert!(table("Hiragana").is_some());
        assert!(table("Latin").is_some());
        assert!(table("NoSuchScript").is_none());
    }

    #[test]
    fn test_tables_sorted() {
        for name in ["Latin", "Greek", "Cyrillic", "Hiragana", "Katakana", "Han", "Common"] {
            let t = table(name).unwrap();
            for w in t.windows(2) {
                assert!(w[0].1 < w[1].0, "{} table must be sorted and disjoint", name);
            }
        }
    }
}
