//! The consumer-facing façade.
//!
//! [`Regex`] is a thin wrapper over a compiled [`Program`]: construction
//! parses and compiles in one step, and matching delegates to the VM.
//! Scanning state (the `lastIndex` of a host-language `RegExp`) belongs
//! to the caller; `exec` simply takes the start offset.

use std::fmt;
use std::str::FromStr;

use crate::compiler;
use crate::error::{Error, Result};
use crate::flags::Flags;
use crate::matches::Match;
use crate::parser;
use crate::program::Program;

/// A compiled regular expression.
#[derive(Debug, Clone)]
pub struct Regex {
    program: Program,
}

impl Regex {
    /// Compile a pattern with no flags.
    pub fn new(source: &str) -> Result<Regex> {
        Regex::with_flags(source, "")
    }

    /// Compile a pattern with a flag string (`"gimsuy"` letters).
    pub fn with_flags(source: &str, flags: &str) -> Result<Regex> {
        let pattern = parser::parse(source, flags)?;
        let program = compiler::compile(&pattern)?;
        Ok(Regex { program })
    }

    /// Scan `input` for a match starting at or after the UTF-16 offset
    /// `start` (exactly at `start` under the sticky flag).
    pub fn exec(&self, input: &str, start: usize) -> Option<Match> {
        self.program.exec(input, start)
    }

    /// True if the pattern matches anywhere in `input`.
    pub fn test(&self, input: &str) -> bool {
        self.program.test(input)
    }

    /// The pattern source, as re-serialized by the printer.
    pub fn source(&self) -> &str {
        self.program.source()
    }

    /// The flags the pattern was compiled with.
    pub fn flags(&self) -> Flags {
        self.program.flags()
    }

    /// The underlying compiled program.
    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Parse a `/source/flags` literal, or a bare pattern with no flags.
    fn from_str(s: &str) -> Result<Regex> {
        if let Some(rest) = s.strip_prefix('/') {
            if let Some(slash) = rest.rfind('/') {
                return Regex::with_flags(&rest[..slash], &rest[slash + 1..]);
            }
        }
        Regex::new(s)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_exec() {
        let re = Regex::new("ab+").unwrap();
        let m = re.exec("xabbb", 0).unwrap();
        assert_eq!(m.index(), 1);
        assert_eq!(m.get(0), Some("abbb".to_string()));
    }

    #[test]
    fn test_test() {
        let re = Regex::with_flags("^a", "").unwrap();
        assert!(re.test("abc"));
        assert!(!re.test("bac"));
    }

    #[test]
    fn test_from_str_literal() {
        let re: Regex = "/a+/i".parse().unwrap();
        assert!(re.flags().ignore_case());
        assert!(re.test("AAA"));
    }

    #[test]
    fn test_display_round_trip() {
        let re = Regex::with_flags("a|b", "gi").unwrap();
        assert_eq!(re.to_string(), "/a|b/gi");
    }

    #[test]
    fn test_syntax_error_propagates() {
        assert!(Regex::new("(").is_err());
        assert!(Regex::with_flags("a", "gg").is_err());
    }
}
