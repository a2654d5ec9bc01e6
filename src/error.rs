//! Error types for the regex engine.
//!
//! This module defines all error types that can occur while parsing a
//! pattern or compiling it to byte-code. Execution itself never fails:
//! a pattern that matches nothing yields `None`, not an error.

/// Result type alias for regex engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during pattern parsing and compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Pattern syntax error at a specific code-point offset
    #[error("Invalid pattern at offset {offset}: {reason}")]
    Syntax {
        /// Code-point offset into the pattern source where the error occurred
        offset: usize,
        /// Reason for the parse failure
        reason: String,
    },

    /// Unknown flag letter in the flag string
    #[error("Unknown flag: '{0}'")]
    UnknownFlag(char),

    /// Flag letter appears more than once in the flag string
    #[error("Duplicated flag: '{0}'")]
    DuplicatedFlag(char),

    /// Numeric back-reference points past the last capture group
    #[error("Invalid back-reference: \\{index} (pattern has {captures} capture groups)")]
    InvalidBackReference {
        /// Back-reference index as written
        index: usize,
        /// Total number of capture groups in the pattern
        captures: usize,
    },
}

impl Error {
    /// Construct a syntax error at the given pattern offset.
    pub(crate) fn syntax(offset: usize, reason: impl Into<String>) -> Error {
        Error::Syntax {
            offset,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        let err = Error::syntax(4, "unterminated group");
        let msg = format!("{}", err);
        assert!(msg.contains("offset 4"));
        assert!(msg.contains("unterminated group"));
    }

    #[test]
    fn test_flag_error_messages() {
        assert_eq!(format!("{}", Error::UnknownFlag('x')), "Unknown flag: 'x'");
        assert_eq!(format!("{}", Error::DuplicatedFlag('g')), "Duplicated flag: 'g'");
    }

    #[test]
    fn test_back_reference_error_message() {
        let err = Error::InvalidBackReference { index: 3, captures: 1 };
        let msg = format!("{}", err);
        assert!(msg.contains("\\3"));
        assert!(msg.contains("1 capture"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
