//! Tests for the compiled-program surface: the diagnostic dump, the
//! stack bound, and byte-code level expectations the VM relies on.

use ecma_regex::program::OpCode;
use ecma_regex::{compile, Regex};

mod dump {
    use super::*;

    #[test]
    fn test_display_has_pattern_and_codes() {
        let program = compile("a|b", "i").unwrap();
        let dump = program.to_string();
        assert!(dump.starts_with("Program { pattern: /a|b/i, codes:"), "got: {}", dump);
        assert!(dump.contains("fork_cont"));
        assert!(dump.contains("match"));
    }

    #[test]
    fn test_source_round_trips_through_program() {
        let program = compile("(?<d>\\d{2,4})-\\k<d>", "").unwrap();
        assert_eq!(program.source(), "(?<d>\\d{2,4})-\\k<d>");
        assert_eq!(program.names().get("d"), Some(&1));
        assert_eq!(program.capture_count(), 1);
    }
}

mod stack_bound {
    use super::*;

    /// The precomputed bound dominates the stack use of every opcode
    /// path: pushes along any execution path are a subset of the pushes
    /// counted by the linear walk.
    #[test]
    fn test_bound_covers_nested_look_around() {
        let program = compile("(?=(?=(?=a)))a", "").unwrap();
        assert!(program.max_stack() >= 6); // three nested pos+proc pairs
    }

    #[test]
    fn test_bound_covers_counted_loops() {
        let program = compile("(a?){2,5}", "").unwrap();
        // counter plus the empty-check position for the guarded tail
        assert!(program.max_stack() >= 2);
    }

    #[test]
    fn test_flat_pattern_needs_no_stack() {
        let program = compile("abc", "").unwrap();
        assert_eq!(program.max_stack(), 0);
    }
}

mod byte_code {
    use super::*;

    #[test]
    fn test_program_starts_and_ends_with_whole_capture() {
        let program = compile("x", "").unwrap();
        let codes = program.codes();
        assert_eq!(codes.first(), Some(&OpCode::CapBegin(0)));
        assert_eq!(codes[codes.len() - 2], OpCode::CapEnd(0));
        assert_eq!(codes.last(), Some(&OpCode::Match));
    }

    #[test]
    fn test_word_boundary_opcodes() {
        let program = compile("\\b\\B", "").unwrap();
        assert!(program.codes().contains(&OpCode::WordBoundary));
        // \B is the inverted boundary
        assert!(program.codes().contains(&OpCode::WordBoundaryNot));
    }

    #[test]
    fn test_named_back_reference_resolves_to_index() {
        let program = compile("(?<a>x)(?<b>y)\\k<b>", "").unwrap();
        assert!(program.codes().contains(&OpCode::Ref(2)));
    }

    #[test]
    fn test_program_is_shareable_across_threads() {
        let program = compile("a+b", "").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let program = program.clone();
                std::thread::spawn(move || {
                    let input = format!("{}aab", "x".repeat(i));
                    program.exec(&input, 0).map(|m| m.index())
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(i));
        }
    }

    #[test]
    fn test_regex_facade_matches_program() {
        let re = Regex::with_flags("a.c", "s").unwrap();
        assert_eq!(re.program().capture_count(), 0);
        assert!(re.test("a\nc"));
    }
}
