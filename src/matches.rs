//! Match records.
//!
//! A [`Match`] is the result of a successful execution: the input, one
//! `(begin, end)` offset pair per capture (pair 0 is the whole match),
//! and the pattern's group-name table. All offsets are UTF-16 code-unit
//! offsets into the input, matching the reference semantics.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use indexmap::IndexMap;

/// The capture information produced by a successful match.
#[derive(Debug, Clone)]
pub struct Match {
    input: Arc<Vec<u16>>,
    /// `2*(N+1)` offsets; `None` marks an unset bound
    caps: Vec<Option<usize>>,
    names: Arc<IndexMap<String, usize>>,
}

impl Match {
    pub(crate) fn new(
        input: Arc<Vec<u16>>,
        caps: Vec<Option<usize>>,
        names: Arc<IndexMap<String, usize>>,
    ) -> Match {
        debug_assert!(caps.len() >= 2 && caps.len() % 2 == 0, "BUG: malformed capture array");
        Match { input, caps, names }
    }

    /// Start offset of the whole match.
    pub fn index(&self) -> usize {
        self.caps[0].expect("BUG: whole match has no begin offset")
    }

    /// End offset of the whole match (the scan position a global or
    /// sticky caller resumes from).
    pub fn last_index(&self) -> usize {
        self.caps[1].expect("BUG: whole match has no end offset")
    }

    /// Number of capture entries, including the whole match: `N + 1`.
    pub fn len(&self) -> usize {
        self.caps.len() / 2
    }

    /// Always false: capture 0 exists on every match.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The offsets of capture `i`, if it participated in the match.
    pub fn get_range(&self, i: usize) -> Option<Range<usize>> {
        if i >= self.len() {
            return None;
        }
        match (self.caps[i * 2], self.caps[i * 2 + 1]) {
            (Some(begin), Some(end)) => Some(begin..end),
            _ => None,
        }
    }

    /// The text of capture `i`, if it participated in the match.
    pub fn get(&self, i: usize) -> Option<String> {
        let range = self.get_range(i)?;
        Some(String::from_utf16_lossy(&self.input[range]))
    }

    /// The offsets of the named capture `name`.
    pub fn group_range(&self, name: &str) -> Option<Range<usize>> {
        self.get_range(*self.names.get(name)?)
    }

    /// The text of the named capture `name`.
    pub fn group(&self, name: &str) -> Option<String> {
        self.get(*self.names.get(name)?)
    }

    /// Iterate the named groups as `(name, text)` pairs in source order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, Option<String>)> + '_ {
        self.names.iter().map(|(name, &i)| (name.as_str(), self.get(i)))
    }

    /// All capture texts in index order: `[whole, cap1, …, capN]`.
    pub fn to_vec(&self) -> Vec<Option<String>> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }

    /// The input the match was produced from.
    pub fn input(&self) -> String {
        String::from_utf16_lossy(&self.input)
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Match {{ index: {}, ", self.index())?;
        for i in 0..self.len() {
            match self.get(i) {
                Some(text) => write!(f, "{}: {:?}", i, text)?,
                None => write!(f, "{}: undefined", i)?,
            }
            if i + 1 < self.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, " }}")
    }
}
