//! Unified error handling for slirc-dialects.
//!
//! Two very different failure classes live here:
//! - [`DialectError`]: a descriptor or registry is inconsistent. Fatal to
//!   module load; an inconsistent descriptor is never registered.
//! - [`ModeRejection`]: one character of one mode string could not be
//!   applied. Collected per character, the rest of the string still applies.

use slirc_modes::{Sign, TableError};
use thiserror::Error;

// ============================================================================
// Descriptor / registry errors (module load)
// ============================================================================

/// Errors raised while building or registering a protocol descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    #[error("malformed mode table: {0}")]
    MalformedTable(#[from] TableError),

    #[error("mode letter '{letter}' is claimed by both the {first} and {second} tables")]
    ConflictingLetter {
        letter: char,
        first: &'static str,
        second: &'static str,
    },

    #[error("{field} flag {flag:#x} has no letter in the channel mode table")]
    UnmappedFlag { field: &'static str, flag: u64 },

    #[error("{field} letter '{letter}' is not one of the ban-like modes")]
    NotListMode { field: &'static str, letter: char },

    #[error("dialect {dialect} requires {dependency}, which is not registered")]
    MissingDependency {
        dialect: String,
        dependency: String,
    },

    #[error("dialect {0} is already registered")]
    AlreadyRegistered(String),

    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("dialect {0} cannot be unloaded")]
    Unloadable(String),

    #[error("dialect {dialect} is still required by {dependent}")]
    InUse { dialect: String, dependent: String },
}

impl DialectError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedTable(_) => "malformed_table",
            Self::ConflictingLetter { .. } => "conflicting_letter",
            Self::UnmappedFlag { .. } => "unmapped_flag",
            Self::NotListMode { .. } => "not_list_mode",
            Self::MissingDependency { .. } => "missing_dependency",
            Self::AlreadyRegistered(_) => "already_registered",
            Self::UnknownDialect(_) => "unknown_dialect",
            Self::Unloadable(_) => "unloadable",
            Self::InUse { .. } => "in_use",
        }
    }
}

// ============================================================================
// Per-character mode rejections (mode change processing)
// ============================================================================

/// ERR_NEEDMOREPARAMS
pub const ERR_NEEDMOREPARAMS: u16 = 461;
/// ERR_UNKNOWNMODE
pub const ERR_UNKNOWNMODE: u16 = 472;
/// ERR_UMODEUNKNOWNFLAG
pub const ERR_UMODEUNKNOWNFLAG: u16 = 501;
/// ERR_INVALIDMODEPARAM
pub const ERR_INVALIDMODEPARAM: u16 = 696;

/// Why a single mode character was dropped from a translation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeRejection {
    #[error("{0} is unknown mode char to me")]
    UnknownMode(char),

    #[error("{0} is unknown user mode flag")]
    UnknownUserMode(char),

    #[error("{sign}{letter} rejected value {value:?}")]
    ValidationRejected {
        sign: Sign,
        letter: char,
        value: String,
    },

    #[error("{sign}{letter} needs a parameter")]
    MissingParameter { sign: Sign, letter: char },

    #[error("+{letter} needs a positive number, got {value:?}")]
    InvalidLimit { letter: char, value: String },
}

impl ModeRejection {
    /// The offending mode letter.
    pub fn letter(&self) -> char {
        match self {
            Self::UnknownMode(c) | Self::UnknownUserMode(c) => *c,
            Self::ValidationRejected { letter, .. }
            | Self::MissingParameter { letter, .. }
            | Self::InvalidLimit { letter, .. } => *letter,
        }
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMode(_) => "unknown_mode",
            Self::UnknownUserMode(_) => "unknown_user_mode",
            Self::ValidationRejected { .. } => "validation_rejected",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::InvalidLimit { .. } => "invalid_limit",
        }
    }

    /// The numeric a host would reply with for this rejection.
    pub fn numeric(&self) -> u16 {
        match self {
            Self::UnknownMode(_) => ERR_UNKNOWNMODE,
            Self::UnknownUserMode(_) => ERR_UMODEUNKNOWNFLAG,
            Self::ValidationRejected { .. } | Self::InvalidLimit { .. } => ERR_INVALIDMODEPARAM,
            Self::MissingParameter { .. } => ERR_NEEDMOREPARAMS,
        }
    }
}
