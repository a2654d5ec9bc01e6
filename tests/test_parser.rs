//! Tests for the pattern parser: AST shapes, capture bookkeeping,
//! round-trip printing, and the Annex B relaxations.

use ecma_regex::ast::Node;
use ecma_regex::{parse, parse_with_options, ParserOptions};

fn strict() -> ParserOptions {
    ParserOptions::new().with_additional(false)
}

/// Re-serialize and compare against the original source.
fn assert_round_trip(source: &str, flags: &str) {
    let pattern = parse(source, flags).unwrap();
    assert_eq!(pattern.to_string(), format!("/{}/{}", source, flags));
}

mod round_trip {
    use super::*;

    #[test]
    fn test_literals_and_quantifiers() {
        assert_round_trip("abc", "");
        assert_round_trip("a*b+c?", "");
        assert_round_trip("a*?b+?c??", "g");
        assert_round_trip("a{2}b{3,}c{4,5}", "");
        assert_round_trip("a{2,3}?", "");
    }

    #[test]
    fn test_groups_and_alternation() {
        assert_round_trip("a|b|c", "");
        assert_round_trip("(a)(?:b)", "i");
        assert_round_trip("(?<name>a)\\k<name>", "");
        assert_round_trip("(?=a)(?!b)(?<=c)(?<!d)", "");
    }

    #[test]
    fn test_classes() {
        assert_round_trip("[a-z0-9_]", "");
        assert_round_trip("[^a-f]", "");
        assert_round_trip("[\\d\\s\\w]", "");
        assert_round_trip("[\\b]", ""); // class backspace is preserved
        assert_round_trip("[-a-]", "");
    }

    #[test]
    fn test_escapes() {
        assert_round_trip("\\n\\t\\r\\v\\f", "");
        assert_round_trip("\\x41\\u0042", "");
        assert_round_trip("\\u{1F600}", "u");
        assert_round_trip("\\p{L}\\P{sc=Grek}", "u");
        assert_round_trip("\\.\\*\\+\\?\\(\\)\\[\\]\\{\\}\\|\\\\\\/", "");
        assert_round_trip("\\0\\cA", "");
        assert_round_trip("(a)\\1", "");
    }

    #[test]
    fn test_assertions() {
        assert_round_trip("^a$", "m");
        assert_round_trip("\\ba\\B", "");
    }

    #[test]
    fn test_empty_pattern_normalizes() {
        let pattern = parse("", "").unwrap();
        assert_eq!(pattern.to_string(), "/(?:)/");
        assert_eq!(format!("{}", pattern.child), "(?:)");
        // empty group bodies round-trip unchanged
        assert_round_trip("(?:)", "");
        assert_round_trip("()", "");
        assert_round_trip("(?=)", "");
    }
}

mod captures {
    use super::*;

    fn capture_indices(node: &Node, out: &mut Vec<usize>) {
        match node {
            Node::Disjunction { children, .. } | Node::Sequence { children, .. } => {
                for child in children {
                    capture_indices(child, out);
                }
            }
            Node::Group { child, .. }
            | Node::Many { child, .. }
            | Node::Some { child, .. }
            | Node::Optional { child, .. }
            | Node::Repeat { child, .. }
            | Node::LookAhead { child, .. }
            | Node::LookBehind { child, .. } => capture_indices(child, out),
            Node::Capture { index, child, .. } => {
                out.push(*index);
                capture_indices(child, out);
            }
            Node::NamedCapture { index, child, .. } => {
                out.push(*index);
                capture_indices(child, out);
            }
            _ => {}
        }
    }

    #[test]
    fn test_indices_match_preorder_source_position() {
        let pattern = parse("((a)(b(c)))(?:x)(?<last>d)", "").unwrap();
        assert_eq!(pattern.capture_count, 5);
        let mut indices = Vec::new();
        capture_indices(&pattern.child, &mut indices);
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
        assert_eq!(pattern.names.get("last"), Some(&5));
    }

    #[test]
    fn test_captures_counted_inside_look_around() {
        let pattern = parse("(?<=(a))(?=(b))(c)", "").unwrap();
        assert_eq!(pattern.capture_count, 3);
        let mut indices = Vec::new();
        capture_indices(&pattern.child, &mut indices);
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_paren_like_text_in_class_not_counted() {
        let pattern = parse("[(](a)[)]", "").unwrap();
        assert_eq!(pattern.capture_count, 1);
    }

    #[test]
    fn test_escaped_paren_not_counted() {
        let pattern = parse("\\((a)\\)", "").unwrap();
        assert_eq!(pattern.capture_count, 1);
    }

    #[test]
    fn test_forward_named_back_reference() {
        // the preprocessing pass makes the later name visible
        let pattern = parse("\\k<later>(?<later>a)", "").unwrap();
        assert_eq!(pattern.names.get("later"), Some(&1));
    }

    #[test]
    fn test_unicode_escape_in_group_name() {
        let pattern = parse("(?<\\u0061b>x)\\k<ab>", "").unwrap();
        assert_eq!(pattern.names.get("ab"), Some(&1));
    }
}

mod annex_b {
    use super::*;

    #[test]
    fn test_lone_braces_are_literals() {
        assert!(parse("a{", "").is_ok());
        assert!(parse("a}", "").is_ok());
        assert!(parse("a]", "").is_ok());
        assert!(parse("{,2}", "").is_ok()); // not a quantifier opener
    }

    #[test]
    fn test_lone_braces_rejected_under_unicode() {
        assert!(parse("a{", "u").is_err());
        assert!(parse("a}", "u").is_err());
        assert!(parse("a]", "u").is_err());
    }

    #[test]
    fn test_lone_braces_rejected_in_strict_mode() {
        assert!(parse_with_options("a{", "", &strict()).is_err());
        assert!(parse_with_options("a}", "", &strict()).is_err());
    }

    #[test]
    fn test_unterminated_quantifier_is_literal_brace() {
        let pattern = parse("a{2,b", "").unwrap();
        assert_eq!(pattern.to_string(), "/a{2,b/");
    }

    #[test]
    fn test_legacy_octal_escapes() {
        let pattern = parse("\\101", "").unwrap();
        match pattern.child {
            Node::Char { value, .. } => assert_eq!(value, 0x41),
            ref other => panic!("expected Char, got {:?}", other),
        }
        assert!(parse_with_options("\\101", "", &strict()).is_err());
        assert!(parse("\\101", "u").is_err());
    }

    #[test]
    fn test_out_of_range_back_reference_becomes_octal() {
        let pattern = parse("\\2(a)", "").unwrap();
        // \2 re-reads as the octal escape for U+0002
        match pattern.child {
            Node::Sequence { ref children, .. } => match children[0] {
                Node::Char { value, .. } => assert_eq!(value, 2),
                ref other => panic!("expected Char, got {:?}", other),
            },
            ref other => panic!("expected Sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_eight_and_nine_become_identity() {
        let pattern = parse("\\8", "").unwrap();
        match pattern.child {
            Node::Char { value, .. } => assert_eq!(value, '8' as u32),
            ref other => panic!("expected Char, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_unicode_escape_is_literal_u() {
        let pattern = parse("\\uXYZ", "").unwrap();
        assert_eq!(pattern.to_string(), "/\\uXYZ/");
        match pattern.child {
            Node::Sequence { ref children, .. } => {
                assert_eq!(children.len(), 4); // u X Y Z
                match children[0] {
                    Node::Char { value, .. } => assert_eq!(value, 'u' as u32),
                    ref other => panic!("expected Char, got {:?}", other),
                }
            }
            ref other => panic!("expected Sequence, got {:?}", other),
        }
        assert!(parse("\\uXYZ", "u").is_err());
        assert!(parse_with_options("\\uXYZ", "", &strict()).is_err());
    }

    #[test]
    fn test_braced_code_point_without_u_quantifies_literal_u() {
        // \u{2} outside unicode mode is a literal u repeated twice
        let pattern = parse("\\u{2}", "").unwrap();
        match pattern.child {
            Node::Repeat { ref child, min: 2, max: Some(2), .. } => match **child {
                Node::Char { value, .. } => assert_eq!(value, 'u' as u32),
                ref other => panic!("expected Char, got {:?}", other),
            },
            ref other => panic!("expected Repeat, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_x_escape_is_literal() {
        let pattern = parse("\\xZ", "").unwrap();
        match pattern.child {
            Node::Sequence { ref children, .. } => match children[0] {
                Node::Char { value, .. } => assert_eq!(value, 'x' as u32),
                ref other => panic!("expected Char, got {:?}", other),
            },
            ref other => panic!("expected Sequence, got {:?}", other),
        }
        assert!(parse("\\xZ", "u").is_err());
    }

    #[test]
    fn test_named_back_reference_without_named_groups() {
        // literal \k when no named group exists, error otherwise
        let pattern = parse("\\k<x>", "").unwrap();
        assert_eq!(pattern.capture_count, 0);
        assert!(parse_with_options("\\k<x>", "", &strict()).is_err());
        assert!(parse("\\k<x>(?<y>a)", "").is_err()); // name must resolve
    }

    #[test]
    fn test_quantified_look_ahead_tolerated() {
        assert!(parse("(?=a)*", "").is_ok());
        assert!(parse("(?=a)*", "u").is_err());
        assert!(parse_with_options("(?=a)*", "", &strict()).is_err());
        // look-behind is never quantifiable
        assert!(parse("(?<=a)*", "").is_err());
    }

    #[test]
    fn test_class_range_with_escape_class_degrades() {
        let pattern = parse("[a-\\d]", "").unwrap();
        match pattern.child {
            Node::Class { ref items, .. } => assert_eq!(items.len(), 3),
            ref other => panic!("expected Class, got {:?}", other),
        }
        assert!(parse("[a-\\d]", "u").is_err());
        assert!(parse_with_options("[a-\\d]", "", &strict()).is_err());
    }
}

mod modes {
    use super::*;

    #[test]
    fn test_surrogate_pair_is_one_char_under_u() {
        let pattern = parse("😀", "u").unwrap();
        match pattern.child {
            Node::Char { value, .. } => assert_eq!(value, 0x1F600),
            ref other => panic!("expected Char, got {:?}", other),
        }
    }

    #[test]
    fn test_surrogate_pair_is_two_units_without_u() {
        let pattern = parse("😀", "").unwrap();
        match pattern.child {
            Node::Sequence { ref children, .. } => {
                assert_eq!(children.len(), 2);
                match (&children[0], &children[1]) {
                    (Node::Char { value: lead, .. }, Node::Char { value: trail, .. }) => {
                        assert_eq!(*lead, 0xD83D);
                        assert_eq!(*trail, 0xDE00);
                    }
                    other => panic!("expected two Chars, got {:?}", other),
                }
            }
            ref other => panic!("expected Sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_flags_recorded_on_pattern() {
        let pattern = parse("a", "misg").unwrap();
        assert!(pattern.flags.multiline());
        assert!(pattern.flags.ignore_case());
        assert!(pattern.flags.dot_all());
        assert!(pattern.flags.global());
        assert!(!pattern.flags.unicode());
    }

    #[test]
    fn test_property_escape_requires_unicode() {
        assert!(parse("\\p{L}", "u").is_ok());
        // Annex B: literal p
        let pattern = parse("\\p{L}", "").unwrap();
        assert_eq!(pattern.capture_count, 0);
        assert!(pattern.to_string().starts_with("/p"));
        assert!(parse_with_options("\\p{L}", "", &strict()).is_err());
    }
}
