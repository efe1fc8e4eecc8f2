//! Error types for mode table construction.
//!
//! Lookups never fail with an error: an unknown letter or flag is a
//! `None`. Errors here describe tables that are inconsistent with themselves
//! and must never be handed to a protocol registry.

use thiserror::Error;

use crate::status::StatusLevel;

/// Convenience type alias for Results using [`TableError`].
pub type Result<T, E = TableError> = std::result::Result<T, E>;

/// A mode table violated one of its construction invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
    /// Two entries share a mode letter.
    #[error("duplicate mode letter '{0}'")]
    DuplicateLetter(char),

    /// Two entries share a canonical flag.
    #[error("flag {flag:#x} mapped by both '{first}' and '{second}'")]
    DuplicateFlag {
        /// The shared flag bits.
        flag: u64,
        /// The letter that claimed the flag first.
        first: char,
        /// The letter that claimed it again.
        second: char,
    },

    /// An entry's flag is empty or covers more than one bit.
    #[error("mode letter '{letter}' maps {flag:#x}, which is not a single bit")]
    NotSingleBit {
        /// The offending letter.
        letter: char,
        /// The offending flag bits.
        flag: u64,
    },

    /// A letter is NUL, whitespace, a sign, or outside printable ASCII.
    #[error("invalid mode letter {0:?}")]
    InvalidLetter(char),

    /// Status entries are not in descending privilege order.
    #[error("status level {later:?} listed after lower level {earlier:?}")]
    StatusOrder {
        /// The level listed first.
        earlier: StatusLevel,
        /// The level listed after it.
        later: StatusLevel,
    },

    /// A status level has a mode letter but no prefix (or the reverse).
    #[error("status level {0:?} needs both a mode letter and a prefix")]
    UnpairedStatus(StatusLevel),
}
