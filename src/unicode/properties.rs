//! Unicode property escape lookup.
//!
//! Resolves `\p{…}` property names to [`CharSet`]s. Names are matched
//! exactly against the canonical names and aliases of ECMA-262
//! §22.2.1 "Patterns" (no loose matching), canonicalized through static
//! phf tables, then dispatched: General_Category values, Script /
//! Script_Extensions values, and binary properties. Per-value sets are
//! built on first use and memoized process-wide.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;
use phf::phf_map;

use crate::char_set::CharSet;
use crate::unicode::tables::general_category as gc;
use crate::unicode::tables::{binary_props, script, script_extensions, RangeTable};

/// Property-name aliases → canonical property name.
static PROPERTY_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "General_Category" => "General_Category",
    "gc" => "General_Category",
    "Script" => "Script",
    "sc" => "Script",
    "Script_Extensions" => "Script_Extensions",
    "scx" => "Script_Extensions",
    "Alphabetic" => "Alphabetic",
    "Alpha" => "Alphabetic",
    "Any" => "Any",
    "ASCII" => "ASCII",
    "ASCII_Hex_Digit" => "ASCII_Hex_Digit",
    "AHex" => "ASCII_Hex_Digit",
    "Assigned" => "Assigned",
    "Cased" => "Cased",
    "Dash" => "Dash",
    "Hex_Digit" => "Hex_Digit",
    "Hex" => "Hex_Digit",
    "ID_Continue" => "ID_Continue",
    "IDC" => "ID_Continue",
    "ID_Start" => "ID_Start",
    "IDS" => "ID_Start",
    "Ideographic" => "Ideographic",
    "Ideo" => "Ideographic",
    "Join_Control" => "Join_Control",
    "Join_C" => "Join_Control",
    "Lowercase" => "Lowercase",
    "Lower" => "Lowercase",
    "Math" => "Math",
    "Noncharacter_Code_Point" => "Noncharacter_Code_Point",
    "NChar" => "Noncharacter_Code_Point",
    "Quotation_Mark" => "Quotation_Mark",
    "QMark" => "Quotation_Mark",
    "Terminal_Punctuation" => "Terminal_Punctuation",
    "Term" => "Terminal_Punctuation",
    "Uppercase" => "Uppercase",
    "Upper" => "Uppercase",
    "White_Space" => "White_Space",
    "space" => "White_Space",
    "XID_Continue" => "XID_Continue",
    "XIDC" => "XID_Continue",
    "XID_Start" => "XID_Start",
    "XIDS" => "XID_Start",
};

/// General_Category value aliases → canonical short name.
static GC_VALUE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "L" => "L", "Letter" => "L",
    "LC" => "LC", "Cased_Letter" => "LC",
    "Lu" => "Lu", "Uppercase_Letter" => "Lu",
    "Ll" => "Ll", "Lowercase_Letter" => "Ll",
    "Lt" => "Lt", "Titlecase_Letter" => "Lt",
    "Lm" => "Lm", "Modifier_Letter" => "Lm",
    "Lo" => "Lo", "Other_Letter" => "Lo",
    "M" => "M", "Mark" => "M", "Combining_Mark" => "M",
    "Mn" => "Mn", "Nonspacing_Mark" => "Mn",
    "Mc" => "Mc", "Spacing_Mark" => "Mc",
    "Me" => "Me", "Enclosing_Mark" => "Me",
    "N" => "N", "Number" => "N",
    "Nd" => "Nd", "Decimal_Number" => "Nd", "digit" => "Nd",
    "Nl" => "Nl", "Letter_Number" => "Nl",
    "No" => "No", "Other_Number" => "No",
    "P" => "P", "Punctuation" => "P", "punct" => "P",
    "Pc" => "Pc", "Connector_Punctuation" => "Pc",
    "Pd" => "Pd", "Dash_Punctuation" => "Pd",
    "Ps" => "Ps", "Open_Punctuation" => "Ps",
    "Pe" => "Pe", "Close_Punctuation" => "Pe",
    "Pi" => "Pi", "Initial_Punctuation" => "Pi",
    "Pf" => "Pf", "Final_Punctuation" => "Pf",
    "Po" => "Po", "Other_Punctuation" => "Po",
    "S" => "S", "Symbol" => "S",
    "Sm" => "Sm", "Math_Symbol" => "Sm",
    "Sc" => "Sc", "Currency_Symbol" => "Sc",
    "Sk" => "Sk", "Modifier_Symbol" => "Sk",
    "So" => "So", "Other_Symbol" => "So",
    "Z" => "Z", "Separator" => "Z",
    "Zs" => "Zs", "Space_Separator" => "Zs",
    "Zl" => "Zl", "Line_Separator" => "Zl",
    "Zp" => "Zp", "Paragraph_Separator" => "Zp",
    "C" => "C", "Other" => "C",
    "Cc" => "Cc", "Control" => "Cc", "cntrl" => "Cc",
    "Cf" => "Cf", "Format" => "Cf",
    "Co" => "Co", "Private_Use" => "Co",
    "Cs" => "Cs", "Surrogate" => "Cs",
    "Cn" => "Cn", "Unassigned" => "Cn",
};

/// Script value aliases → canonical long name.
static SCRIPT_VALUE_ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "Adlm" => "Adlam", "Adlam" => "Adlam",
    "Arab" => "Arabic", "Arabic" => "Arabic",
    "Armn" => "Armenian", "Armenian" => "Armenian",
    "Beng" => "Bengali", "Bengali" => "Bengali",
    "Bopo" => "Bopomofo", "Bopomofo" => "Bopomofo",
    "Cher" => "Cherokee", "Cherokee" => "Cherokee",
    "Copt" => "Coptic", "Coptic" => "Coptic", "Qaac" => "Coptic",
    "Cyrl" => "Cyrillic", "Cyrillic" => "Cyrillic",
    "Deva" => "Devanagari", "Devanagari" => "Devanagari",
    "Dsrt" => "Deseret", "Deseret" => "Deseret",
    "Ethi" => "Ethiopic", "Ethiopic" => "Ethiopic",
    "Geor" => "Georgian", "Georgian" => "Georgian",
    "Glag" => "Glagolitic", "Glagolitic" => "Glagolitic",
    "Goth" => "Gothic", "Gothic" => "Gothic",
    "Grek" => "Greek", "Greek" => "Greek",
    "Hang" => "Hangul", "Hangul" => "Hangul",
    "Hani" => "Han", "Han" => "Han",
    "Hebr" => "Hebrew", "Hebrew" => "Hebrew",
    "Hira" => "Hiragana", "Hiragana" => "Hiragana",
    "Ital" => "Old_Italic", "Old_Italic" => "Old_Italic",
    "Kana" => "Katakana", "Katakana" => "Katakana",
    "Khmr" => "Khmer", "Khmer" => "Khmer",
    "Laoo" => "Lao", "Lao" => "Lao",
    "Latn" => "Latin", "Latin" => "Latin",
    "Mong" => "Mongolian", "Mongolian" => "Mongolian",
    "Mymr" => "Myanmar", "Myanmar" => "Myanmar",
    "Osge" => "Osage", "Osage" => "Osage",
    "Taml" => "Tamil", "Tamil" => "Tamil",
    "Thaa" => "Thaana", "Thaana" => "Thaana",
    "Thai" => "Thai",
    "Tibt" => "Tibetan", "Tibetan" => "Tibetan",
    "Yiii" => "Yi", "Yi" => "Yi",
    "Zinh" => "Inherited", "Inherited" => "Inherited", "Qaai" => "Inherited",
    "Zyyy" => "Common", "Common" => "Common",
};

lazy_static! {
    /// Memoized per-value sets; keys are `"gc:L"`, `"sc:Hiragana"`,
    /// `"scx:Hiragana"`, `"bin:Alphabetic"`.
    static ref SET_CACHE: Mutex<HashMap<String, Option<CharSet>>> = Mutex::new(HashMap::new());
}

fn cached(key: &str, build: impl FnOnce() -> Option<CharSet>) -> Option<CharSet> {
    let mut cache = SET_CACHE.lock().unwrap();
    if let Some(hit) = cache.get(key) {
        return hit.clone();
    }
    let set = build();
    cache.insert(key.to_string(), set.clone());
    set
}

fn union_of(tables: &[RangeTable]) -> CharSet {
    let mut set = CharSet::new();
    for table in tables {
        for &(first, last) in table.iter() {
            set.add(first, last + 1);
        }
    }
    set
}

fn gc_set(canonical: &str) -> Option<CharSet> {
    if let Some(table) = gc::table(canonical) {
        return Some(CharSet::from_inclusive_ranges(table));
    }
    if let Some(members) = gc::grouping(canonical) {
        return Some(union_of(members));
    }
    if canonical == "Cn" {
        let mut assigned = union_of(gc::ALL);
        assigned.invert();
        return Some(assigned);
    }
    None
}

fn script_set(canonical: &str) -> Option<CharSet> {
    script::table(canonical).map(CharSet::from_inclusive_ranges)
}

fn scx_set(canonical: &str) -> Option<CharSet> {
    let mut set = script_set(canonical)?;
    if let Some(extra) = script_extensions::additions(canonical) {
        for &(first, last) in extra {
            set.add(first, last + 1);
        }
    }
    Some(set)
}

fn binary_set(canonical: &str) -> Option<CharSet> {
    if let Some(table) = binary_props::table(canonical) {
        return Some(CharSet::from_inclusive_ranges(table));
    }
    // Properties composed from the category tables.
    let set = match canonical {
        "Alphabetic" => {
            let mut s = union_of(&[gc::LU, gc::LL, gc::LT, gc::LM, gc::LO, gc::NL]);
            s.add_set(&CharSet::from_inclusive_ranges(binary_props::OTHER_ALPHABETIC));
            s
        }
        "Uppercase" => {
            let mut s = CharSet::from_inclusive_ranges(gc::LU);
            s.add(0x2160, 0x2170); // uppercase Roman numerals
            s.add(0x24B6, 0x24D0); // circled capitals
            s
        }
        "Lowercase" => {
            let mut s = CharSet::from_inclusive_ranges(gc::LL);
            s.add(0x2170, 0x2180);
            s.add(0x24D0, 0x24EA);
            s
        }
        "Cased" => {
            let mut s = union_of(&[gc::LU, gc::LL, gc::LT]);
            s.add(0x2160, 0x2180);
            s.add(0x24B6, 0x24EA);
            s
        }
        "ID_Start" | "XID_Start" => id_start_set(),
        "ID_Continue" | "XID_Continue" => id_continue_set(),
        "Assigned" => union_of(gc::ALL),
        "Math" => CharSet::from_inclusive_ranges(gc::SM),
        _ => return None,
    };
    Some(set)
}

/// The ID_Start set (used for property escapes and group-name lexing).
pub fn id_start_set() -> CharSet {
    let mut s = union_of(&[gc::LU, gc::LL, gc::LT, gc::LM, gc::LO, gc::NL]);
    s.add_set(&CharSet::from_inclusive_ranges(binary_props::OTHER_ID_START));
    s
}

/// The ID_Continue set.
pub fn id_continue_set() -> CharSet {
    let mut s = id_start_set();
    s.add_set(&union_of(&[gc::MN, gc::MC, gc::ND, gc::PC]));
    s.add_set(&CharSet::from_inclusive_ranges(binary_props::OTHER_ID_CONTINUE));
    s
}

/// Look up a lone `\p{Name}` property: a binary property, or a bare
/// General_Category value. Returns `None` for unknown names.
pub fn load_property(name: &str) -> Option<CharSet> {
    if let Some(&canonical) = PROPERTY_ALIASES.get(name) {
        // A lone name must not be General_Category/Script/Script_Extensions
        // (those require a value), so fall through to binary lookup only.
        if let Some(set) = cached(&format!("bin:{}", canonical), || binary_set(canonical)) {
            return Some(set);
        }
    }
    let canonical = GC_VALUE_ALIASES.get(name)?;
    cached(&format!("gc:{}", canonical), || gc_set(canonical))
}

/// Look up a `\p{Property=Value}` property. Only General_Category,
/// Script, and Script_Extensions accept values.
pub fn load_property_value(property: &str, value: &str) -> Option<CharSet> {
    let canonical_prop = PROPERTY_ALIASES.get(property)?;
    match *canonical_prop {
        "General_Category" => {
            let v = GC_VALUE_ALIASES.get(value)?;
            cached(&format!("gc:{}", v), || gc_set(v))
        }
        "Script" => {
            let v = SCRIPT_VALUE_ALIASES.get(value)?;
            cached(&format!("sc:{}", v), || script_set(v))
        }
        "Script_Extensions" => {
            let v = SCRIPT_VALUE_ALIASES.get(value)?;
            cached(&format!("scx:{}", v), || scx_set(v))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lone_binary_property() {
        let ws = load_property("White_Space").unwrap();
        assert!(ws.contains(0x20));
        assert!(!ws.contains('a' as u32));
        // Alias
        assert!(load_property("AHex").unwrap().contains('F' as u32));
    }

    #[test]
    fn test_lone_gc_value() {
        let letters = load_property("L").unwrap();
        assert!(letters.contains('a' as u32));
        assert!(letters.contains(0x3042));
        assert!(!letters.contains('0' as u32));
        let letters_long = load_property("Letter").unwrap();
        assert_eq!(letters, letters_long);
    }

    #[test]
    fn test_script_value() {
        let hira = load_property_value("sc", "Hira").unwrap();
        assert!(hira.contains(0x3042)); // あ
        assert!(!hira.contains(0x30A2)); // ア
        let hira_long = load_property_value("Script", "Hiragana").unwrap();
        assert_eq!(hira, hira_long);
    }

    #[test]
    fn test_script_extensions_superset() {
        let sc = load_property_value("sc", "Hira").unwrap();
        let scx = load_property_value("scx", "Hira").unwrap();
        assert!(scx.contains(0x30FC)); // prolonged sound mark
        assert!(!sc.contains(0x30FC));
        for (b, e) in sc.iter_ranges() {
            for cp in b..e {
                assert!(scx.contains(cp));
            }
        }
    }

    #[test]
    fn test_gc_value_pair() {
        let nd = load_property_value("General_Category", "Nd").unwrap();
        assert!(nd.contains('5' as u32));
        let nd2 = load_property_value("gc", "digit").unwrap();
        assert_eq!(nd, nd2);
    }

    #[test]
    fn test_unknown_names_absent() {
        assert!(load_property("NotAProperty").is_none());
        assert!(load_property_value("sc", "NotAScript").is_none());
        assert!(load_property_value("Alphabetic", "L").is_none()); // binary takes no value
        // Exact-match only: lowercase "letter" is not a valid alias
        assert!(load_property("letter").is_none());
    }

    #[test]
    fn test_unassigned_is_complement() {
        let cn = load_property_value("gc", "Cn").unwrap();
        assert!(!cn.contains('a' as u32));
        assert!(!cn.contains(0x3042));
        assert!(cn.contains(0x0378)); // unassigned gap in Greek block
    }

    #[test]
    fn test_memoization_returns_same_set() {
        let a = load_property_value("sc", "Latin").unwrap();
        let b = load_property_value("sc", "Latn").unwrap();
        assert_eq!(a, b);
    }
}
