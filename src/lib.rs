//! # ecma-regex
//!
//! ECMA-262 regular expressions for Rust: a recursive-descent pattern
//! parser, a byte-code compiler, and a backtracking virtual machine,
//! implementing the ECMA-262 2019 (10th edition) dialect with the
//! Annex B web-compatibility extensions.
//!
//! ## Features
//!
//! - Full pattern grammar: alternation, quantifiers (greedy and
//!   non-greedy), character classes, groups, look-ahead and look-behind,
//!   named captures, numeric and named back-references
//! - The six flags: `g`, `i`, `m`, `s`, `u`, `y`
//! - Unicode mode: code-point matching, simple case folding, `\u{…}`
//!   escapes, and `\p{…}` property escapes (General_Category, Script,
//!   Script_Extensions, binary properties)
//! - Annex B relaxations outside `u` mode: legacy octal escapes, lone
//!   brackets, literal fallbacks for invalid escapes and back-references
//!
//! Matching is reference-faithful rather than fast: the engine is a
//! backtracking NFA simulation, because back-references, capture resets,
//! and non-greedy priority are not expressible in a linear-time matcher.
//! Offsets in and out of the engine are UTF-16 code-unit offsets.
//!
//! ## Quick start
//!
//! ```
//! use ecma_regex::Regex;
//!
//! # fn main() -> ecma_regex::Result<()> {
//! let re = Regex::with_flags(r"(?<word>\w+)-\k<word>", "")?;
//! let m = re.exec("go go-go stop", 0).expect("should match");
//! assert_eq!(m.get(0).as_deref(), Some("go-go"));
//! assert_eq!(m.group("word").as_deref(), Some("go"));
//! # Ok(())
//! # }
//! ```
//!
//! Lower layers are exposed for tooling: [`parse`] yields the AST,
//! [`compile`] yields a [`Program`] whose `Display` impl dumps the
//! instruction listing.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Pattern front end
pub mod ast;
pub mod flags;
pub mod parser;
pub mod printer;

// Compilation and execution
pub mod char_set;
pub mod compiler;
pub mod matches;
pub mod program;
mod regex;
mod vm;

// Unicode data access
pub mod unicode;

pub use crate::ast::Pattern;
pub use crate::char_set::CharSet;
pub use crate::error::{Error, Result};
pub use crate::flags::Flags;
pub use crate::matches::Match;
pub use crate::parser::{parse, parse_with_options, ParserOptions};
pub use crate::program::Program;
pub use crate::regex::Regex;

/// Parse and compile a pattern in one step.
pub fn compile(source: &str, flags: &str) -> Result<Program> {
    let pattern = parser::parse(source, flags)?;
    compiler::compile(&pattern)
}
