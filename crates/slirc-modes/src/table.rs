//! Letter ↔ canonical-flag tables for simple (unparameterized) modes.
//!
//! A [`ModeTable`] is a bijection: every letter maps to exactly one single-bit
//! flag and every flag to exactly one letter. Both directions are checked when
//! the table is built and again after every [`ModeTable::overlay`].

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TableError};
use crate::flags::ModeFlag;

/// One letter ↔ flag pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeEntry<F> {
    /// The wire letter.
    pub letter: char,
    /// The canonical flag (always a single bit).
    pub flag: F,
}

/// Result of decoding a letter string against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<F> {
    /// Union of every recognised letter's flag.
    pub flags: F,
    /// Letters with no entry, in input order.
    pub unknown: Vec<char>,
}

/// Ordered, validated letter ↔ flag table.
///
/// Iteration order is declaration order, which is also the order
/// [`ModeTable::encode`] emits letters in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTable<F> {
    entries: Vec<ModeEntry<F>>,
}

/// Returns `Ok` if `letter` may appear in a mode table.
///
/// NUL is rejected explicitly: it is the terminator of the tables this format
/// comes from and never a real mode.
pub(crate) fn check_letter(letter: char) -> Result<()> {
    if letter.is_ascii_graphic() && !matches!(letter, '+' | '-') {
        Ok(())
    } else {
        Err(TableError::InvalidLetter(letter))
    }
}

impl<F: ModeFlag> ModeTable<F> {
    /// Build a table from `(letter, flag)` pairs.
    ///
    /// Fails on the first duplicate letter, duplicate flag, multi-bit flag or
    /// invalid letter.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, F)>,
    {
        let entries: Vec<ModeEntry<F>> = entries
            .into_iter()
            .map(|(letter, flag)| ModeEntry { letter, flag })
            .collect();
        Self::validate(&entries)?;
        Ok(Self { entries })
    }

    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn validate(entries: &[ModeEntry<F>]) -> Result<()> {
        let mut letters = HashSet::with_capacity(entries.len());
        let mut flags: HashMap<u64, char> = HashMap::with_capacity(entries.len());

        for entry in entries {
            check_letter(entry.letter)?;

            let raw = entry.flag.to_raw();
            if raw.count_ones() != 1 {
                return Err(TableError::NotSingleBit {
                    letter: entry.letter,
                    flag: raw,
                });
            }
            if !letters.insert(entry.letter) {
                return Err(TableError::DuplicateLetter(entry.letter));
            }
            if let Some(first) = flags.insert(raw, entry.letter) {
                return Err(TableError::DuplicateFlag {
                    flag: raw,
                    first,
                    second: entry.letter,
                });
            }
        }

        Ok(())
    }

    /// Flag for a wire letter.
    pub fn flag_for(&self, letter: char) -> Option<F> {
        self.entries
            .iter()
            .find(|e| e.letter == letter)
            .map(|e| e.flag)
    }

    /// Wire letter for a single canonical flag.
    pub fn char_for(&self, flag: F) -> Option<char> {
        let raw = flag.to_raw();
        self.entries
            .iter()
            .find(|e| e.flag.to_raw() == raw)
            .map(|e| e.letter)
    }

    /// Returns true if `letter` has an entry.
    pub fn contains_letter(&self, letter: char) -> bool {
        self.entries.iter().any(|e| e.letter == letter)
    }

    /// All entries in table order.
    pub fn entries(&self) -> &[ModeEntry<F>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every letter, in table order.
    pub fn letters(&self) -> String {
        self.entries.iter().map(|e| e.letter).collect()
    }

    /// Union of every flag in the table.
    pub fn all_flags(&self) -> F {
        F::from_raw(self.entries.iter().fold(0, |acc, e| acc | e.flag.to_raw()))
    }

    /// Encode a flag set as letters, in table order.
    ///
    /// Bits with no letter in this table are skipped.
    pub fn encode(&self, flags: F) -> String {
        let raw = flags.to_raw();
        self.entries
            .iter()
            .filter(|e| raw & e.flag.to_raw() != 0)
            .map(|e| e.letter)
            .collect()
    }

    /// Decode a string of letters (no signs) into a flag set.
    pub fn decode(&self, letters: &str) -> Decoded<F> {
        let mut raw = 0u64;
        let mut unknown = Vec::new();

        for c in letters.chars() {
            match self.flag_for(c) {
                Some(flag) => raw |= flag.to_raw(),
                None => unknown.push(c),
            }
        }

        Decoded {
            flags: F::from_raw(raw),
            unknown,
        }
    }

    /// Compose a new table from this one.
    ///
    /// Removals apply first, then each `set` either replaces the flag of an
    /// existing letter in place or appends a new entry. The merged table is
    /// validated again, so an overlay that maps an existing flag to a second
    /// letter fails with [`TableError::DuplicateFlag`].
    pub fn overlay(&self, overlay: &TableOverlay<F>) -> Result<Self> {
        let mut entries: Vec<ModeEntry<F>> = self
            .entries
            .iter()
            .filter(|e| !overlay.remove.contains(&e.letter))
            .copied()
            .collect();

        for &(letter, flag) in &overlay.set {
            match entries.iter_mut().find(|e| e.letter == letter) {
                Some(existing) => existing.flag = flag,
                None => entries.push(ModeEntry { letter, flag }),
            }
        }

        Self::validate(&entries)?;
        Ok(Self { entries })
    }
}

/// Changes applied by [`ModeTable::overlay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOverlay<F> {
    remove: Vec<char>,
    set: Vec<(char, F)>,
}

impl<F> Default for TableOverlay<F> {
    fn default() -> Self {
        Self {
            remove: Vec::new(),
            set: Vec::new(),
        }
    }
}

impl<F> TableOverlay<F> {
    /// An overlay that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every letter in `letters` from the base table.
    pub fn remove(mut self, letters: &str) -> Self {
        self.remove.extend(letters.chars());
        self
    }

    /// Map `letter` to `flag`, replacing or appending.
    pub fn set(mut self, letter: char, flag: F) -> Self {
        self.set.push((letter, flag));
        self
    }

    /// Returns true if applying this overlay would change nothing.
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.set.is_empty()
    }
}
