//! Pattern flag set.
//!
//! ECMA-262 patterns carry up to six independent flags (`g`, `i`, `m`,
//! `s`, `u`, `y`). The flag string is validated up front: each letter may
//! appear at most once and anything outside the six letters is rejected
//! (ECMA-262 §21.2.3.2.2).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

bitflags::bitflags! {
    /// The six ECMA-262 pattern flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        /// `g`: global matching (the caller resumes scanning after `last_index`)
        const GLOBAL = 1 << 0;
        /// `i`: case-insensitive matching via canonicalization
        const IGNORE_CASE = 1 << 1;
        /// `m`: `^`/`$` also match at line terminators
        const MULTILINE = 1 << 2;
        /// `s`: `.` also matches line terminators
        const DOT_ALL = 1 << 3;
        /// `u`: Unicode mode: code-point stepping, case folding, `\p{…}`, `\u{…}`
        const UNICODE = 1 << 4;
        /// `y`: sticky: a match must begin exactly at the start offset
        const STICKY = 1 << 5;
    }
}

impl Flags {
    /// True if the `g` flag is set.
    pub fn global(self) -> bool {
        self.contains(Flags::GLOBAL)
    }

    /// True if the `i` flag is set.
    pub fn ignore_case(self) -> bool {
        self.contains(Flags::IGNORE_CASE)
    }

    /// True if the `m` flag is set.
    pub fn multiline(self) -> bool {
        self.contains(Flags::MULTILINE)
    }

    /// True if the `s` flag is set.
    pub fn dot_all(self) -> bool {
        self.contains(Flags::DOT_ALL)
    }

    /// True if the `u` flag is set.
    pub fn unicode(self) -> bool {
        self.contains(Flags::UNICODE)
    }

    /// True if the `y` flag is set.
    pub fn sticky(self) -> bool {
        self.contains(Flags::STICKY)
    }
}

impl FromStr for Flags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Flags, Error> {
        let mut flags = Flags::empty();
        for c in s.chars() {
            let flag = match c {
                'g' => Flags::GLOBAL,
                'i' => Flags::IGNORE_CASE,
                'm' => Flags::MULTILINE,
                's' => Flags::DOT_ALL,
                'u' => Flags::UNICODE,
                'y' => Flags::STICKY,
                _ => return Err(Error::UnknownFlag(c)),
            };
            if flags.contains(flag) {
                return Err(Error::DuplicatedFlag(c));
            }
            flags |= flag;
        }
        Ok(flags)
    }
}

impl fmt::Display for Flags {
    /// Renders the flags in canonical `gimsuy` order, regardless of the
    /// order they were written in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, c) in [
            (Flags::GLOBAL, 'g'),
            (Flags::IGNORE_CASE, 'i'),
            (Flags::MULTILINE, 'm'),
            (Flags::DOT_ALL, 's'),
            (Flags::UNICODE, 'u'),
            (Flags::STICKY, 'y'),
        ] {
            if self.contains(flag) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
