//! Extended (parameterized) channel modes and their validators.
//!
//! These modes cannot be modelled as a bit plus an opaque parameter: each
//! value has to pass a dialect-specific check against live state before it is
//! stored. The registry is a short ordered list searched linearly.

use std::collections::HashSet;

use slirc_modes::TableError;

use crate::context::ValidationContext;
use crate::validate::{check_forward, check_jointhrottle};

/// Capability interface for checking an extended mode value.
pub trait ExtModeCheck {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Accept or reject `value` for this mode.
    fn check(&self, value: &str, ctx: &ValidationContext<'_>) -> bool;
}

/// The validators dialects can attach to an extended mode letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validator {
    /// Forward target channel (`+f #channel`).
    Forward,
    /// Join throttle (`+j count:seconds`).
    JoinThrottle,
}

impl ExtModeCheck for Validator {
    fn name(&self) -> &'static str {
        match self {
            Validator::Forward => "forward",
            Validator::JoinThrottle => "jointhrottle",
        }
    }

    fn check(&self, value: &str, ctx: &ValidationContext<'_>) -> bool {
        match self {
            Validator::Forward => check_forward(value, ctx),
            Validator::JoinThrottle => check_jointhrottle(value),
        }
    }
}

/// Ordered letter → validator list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtModeRegistry {
    entries: Vec<(char, Validator)>,
}

impl ExtModeRegistry {
    /// Build a registry, rejecting duplicate or invalid letters.
    pub fn new<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (char, Validator)>,
    {
        let entries: Vec<(char, Validator)> = entries.into_iter().collect();
        Self::validate(&entries)?;
        Ok(Self { entries })
    }

    fn validate(entries: &[(char, Validator)]) -> Result<(), TableError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for &(letter, _) in entries {
            if !letter.is_ascii_alphabetic() {
                return Err(TableError::InvalidLetter(letter));
            }
            if !seen.insert(letter) {
                return Err(TableError::DuplicateLetter(letter));
            }
        }
        Ok(())
    }

    /// Validator for a mode letter.
    pub fn validator_for(&self, letter: char) -> Option<Validator> {
        self.entries
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|(_, v)| *v)
    }

    /// Whether `letter` is an extended mode here.
    pub fn contains_letter(&self, letter: char) -> bool {
        self.validator_for(letter).is_some()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[(char, Validator)] {
        &self.entries
    }

    /// Extended mode letters, in order, for ISUPPORT.
    pub fn letters(&self) -> String {
        self.entries.iter().map(|(c, _)| *c).collect()
    }

    /// No extended modes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compose: drop `remove`, then replace or append each of `set`.
    pub fn overlay(&self, remove: &str, set: &[(char, Validator)]) -> Result<Self, TableError> {
        let mut entries: Vec<(char, Validator)> = self
            .entries
            .iter()
            .filter(|(c, _)| !remove.contains(*c))
            .copied()
            .collect();

        for &(letter, validator) in set {
            match entries.iter_mut().find(|(c, _)| *c == letter) {
                Some(existing) => existing.1 = validator,
                None => entries.push((letter, validator)),
            }
        }

        Self::validate(&entries)?;
        Ok(Self { entries })
    }
}
