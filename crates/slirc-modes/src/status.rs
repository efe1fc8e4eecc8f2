//! Channel status levels and their mode letters / display prefixes.
//!
//! A dialect names a subset of the five canonical levels. Each named level has
//! a mode letter (used in MODE, e.g. `o`) and a prefix (used in NAMES and
//! bursts, e.g. `@`). The table is always held in descending privilege order,
//! which is the order used to collapse several statuses into one prefix.

use std::cmp::Ordering;

use crate::error::{Result, TableError};
use crate::flags::StatusModes;
use crate::table::check_letter;

/// Channel privilege tier.
///
/// Ordering is total: `Owner > Protect > Op > Halfop > Voice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StatusLevel {
    /// `+v`, usually `+`.
    Voice,
    /// `+h`, usually `%`.
    Halfop,
    /// `+o`, usually `@`.
    Op,
    /// `+a`, usually `&`.
    Protect,
    /// `+q` or `+y`, usually `~`.
    Owner,
}

impl StatusLevel {
    /// Every level, highest first.
    pub const ALL: [StatusLevel; 5] = [
        StatusLevel::Owner,
        StatusLevel::Protect,
        StatusLevel::Op,
        StatusLevel::Halfop,
        StatusLevel::Voice,
    ];

    /// The canonical status flag for this level.
    pub const fn flag(self) -> StatusModes {
        match self {
            StatusLevel::Owner => StatusModes::OWNER,
            StatusLevel::Protect => StatusModes::PROTECT,
            StatusLevel::Op => StatusModes::OP,
            StatusLevel::Halfop => StatusModes::HALFOP,
            StatusLevel::Voice => StatusModes::VOICE,
        }
    }
}

/// One level with its letter and prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    /// Privilege tier.
    pub level: StatusLevel,
    /// MODE letter, e.g. `o`.
    pub letter: char,
    /// Display prefix, e.g. `@`.
    pub prefix: char,
}

/// Status letter / prefix table for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    entries: Vec<StatusEntry>,
}

impl PrefixTable {
    /// Build a table from the dialect's status-letter list and prefix list.
    ///
    /// Both lists must name the same levels in descending order and may not
    /// reuse a character.
    pub fn new(letters: &[(char, StatusLevel)], prefixes: &[(char, StatusLevel)]) -> Result<Self> {
        let mut entries: Vec<StatusEntry> = Vec::with_capacity(letters.len());

        for &(letter, level) in letters {
            check_letter(letter)?;
            if let Some(prev) = entries.last() {
                check_order(prev.level, level)?;
            }
            if entries.iter().any(|e| e.letter == letter) {
                return Err(TableError::DuplicateLetter(letter));
            }

            let prefix = prefixes
                .iter()
                .find(|(_, l)| *l == level)
                .map(|(c, _)| *c)
                .ok_or(TableError::UnpairedStatus(level))?;
            if !prefix.is_ascii_graphic() {
                return Err(TableError::InvalidLetter(prefix));
            }
            if entries.iter().any(|e| e.prefix == prefix) {
                return Err(TableError::DuplicateLetter(prefix));
            }

            entries.push(StatusEntry {
                level,
                letter,
                prefix,
            });
        }

        // Prefix list must not carry levels the letter list lacks, and must
        // itself be in order.
        for window in prefixes.windows(2) {
            check_order(window[0].1, window[1].1)?;
        }
        if let Some((_, level)) = prefixes
            .iter()
            .find(|(_, level)| !entries.iter().any(|e| e.level == *level))
        {
            return Err(TableError::UnpairedStatus(*level));
        }

        Ok(Self { entries })
    }

    /// Entries, highest level first.
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Levels this dialect supports, highest first.
    pub fn levels(&self) -> impl Iterator<Item = StatusLevel> + '_ {
        self.entries.iter().map(|e| e.level)
    }

    /// Returns true if the dialect supports `level`.
    pub fn supports(&self, level: StatusLevel) -> bool {
        self.entry(level).is_some()
    }

    fn entry(&self, level: StatusLevel) -> Option<&StatusEntry> {
        self.entries.iter().find(|e| e.level == level)
    }

    /// MODE letter for a level.
    pub fn status_char_for(&self, level: StatusLevel) -> Option<char> {
        self.entry(level).map(|e| e.letter)
    }

    /// Display prefix for a level.
    pub fn prefix_char_for(&self, level: StatusLevel) -> Option<char> {
        self.entry(level).map(|e| e.prefix)
    }

    /// Level for a MODE letter.
    pub fn level_for_status_char(&self, letter: char) -> Option<StatusLevel> {
        self.entries
            .iter()
            .find(|e| e.letter == letter)
            .map(|e| e.level)
    }

    /// Level for a display prefix.
    pub fn level_for_prefix_char(&self, prefix: char) -> Option<StatusLevel> {
        self.entries
            .iter()
            .find(|e| e.prefix == prefix)
            .map(|e| e.level)
    }

    /// Highest supported level held in `held`.
    pub fn highest(&self, held: StatusModes) -> Option<StatusLevel> {
        self.levels().find(|level| held.contains(level.flag()))
    }

    /// Prefix string for NAMES: only the highest prefix, or every held prefix
    /// (highest first) when `multi_prefix` is set.
    pub fn prefix_string(&self, held: StatusModes, multi_prefix: bool) -> String {
        let mut held_prefixes = self
            .entries
            .iter()
            .filter(|e| held.contains(e.level.flag()))
            .map(|e| e.prefix);

        if multi_prefix {
            held_prefixes.collect()
        } else {
            held_prefixes.next().map(String::from).unwrap_or_default()
        }
    }

    /// Split leading prefixes off a nick as seen in NAMES or a burst line.
    ///
    /// `"@+alice"` yields `(OP | VOICE, "alice")`.
    pub fn split_prefixes<'a>(&self, entry: &'a str) -> (StatusModes, &'a str) {
        let mut held = StatusModes::empty();
        let mut rest = entry;

        while let Some(c) = rest.chars().next() {
            match self.level_for_prefix_char(c) {
                Some(level) => {
                    held |= level.flag();
                    rest = &rest[c.len_utf8()..];
                }
                None => break,
            }
        }

        (held, rest)
    }

    /// The ISUPPORT `PREFIX` value, e.g. `(ov)@+`.
    pub fn isupport_prefix(&self) -> String {
        let letters: String = self.entries.iter().map(|e| e.letter).collect();
        let prefixes: String = self.entries.iter().map(|e| e.prefix).collect();
        format!("({}){}", letters, prefixes)
    }
}

fn check_order(earlier: StatusLevel, later: StatusLevel) -> Result<()> {
    match earlier.cmp(&later) {
        Ordering::Greater => Ok(()),
        Ordering::Equal | Ordering::Less => Err(TableError::StatusOrder { earlier, later }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StatusLevel::*;

    fn five_level() -> PrefixTable {
        PrefixTable::new(
            &[('y', Owner), ('a', Protect), ('o', Op), ('h', Halfop), ('v', Voice)],
            &[('~', Owner), ('&', Protect), ('@', Op), ('%', Halfop), ('+', Voice)],
        )
        .unwrap()
    }

    #[test]
    fn level_order_is_total_and_descending() {
        let mut sorted = StatusLevel::ALL;
        sorted.sort();
        sorted.reverse();
        assert_eq!(sorted, StatusLevel::ALL);
        assert!(Owner > Protect && Protect > Op && Op > Halfop && Halfop > Voice);
    }

    #[test]
    fn status_chars_yield_descending_levels() {
        let table = five_level();
        let levels: Vec<StatusLevel> = "yaohv"
            .chars()
            .map(|c| table.level_for_status_char(c).unwrap())
            .collect();
        assert!(levels.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(levels, StatusLevel::ALL.to_vec());
    }

    #[test]
    fn lookups_both_ways() {
        let table = five_level();
        assert_eq!(table.status_char_for(Owner), Some('y'));
        assert_eq!(table.prefix_char_for(Halfop), Some('%'));
        assert_eq!(table.level_for_prefix_char('&'), Some(Protect));
        assert_eq!(table.level_for_status_char('q'), None);
        assert_eq!(table.level_for_prefix_char('!'), None);
    }

    #[test]
    fn highest_and_prefix_string() {
        let table = five_level();
        let held = StatusModes::VOICE | StatusModes::OP;
        assert_eq!(table.highest(held), Some(Op));
        assert_eq!(table.prefix_string(held, false), "@");
        assert_eq!(table.prefix_string(held, true), "@+");
        assert_eq!(table.prefix_string(StatusModes::empty(), true), "");
    }

    #[test]
    fn unsupported_levels_are_ignored() {
        let table = PrefixTable::new(&[('o', Op), ('v', Voice)], &[('@', Op), ('+', Voice)]).unwrap();
        assert!(!table.supports(Owner));
        assert_eq!(table.highest(StatusModes::OWNER | StatusModes::VOICE), Some(Voice));
        assert_eq!(table.isupport_prefix(), "(ov)@+");
    }

    #[test]
    fn split_prefixes_from_names() {
        let table = five_level();
        assert_eq!(
            table.split_prefixes("~@alice"),
            (StatusModes::OWNER | StatusModes::OP, "alice")
        );
        assert_eq!(table.split_prefixes("bob"), (StatusModes::empty(), "bob"));
    }

    #[test]
    fn out_of_order_rejected() {
        let err = PrefixTable::new(&[('v', Voice), ('o', Op)], &[('+', Voice), ('@', Op)])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::StatusOrder {
                earlier: Voice,
                later: Op
            }
        );
    }

    #[test]
    fn unpaired_levels_rejected() {
        assert_eq!(
            PrefixTable::new(&[('o', Op), ('v', Voice)], &[('@', Op)]).unwrap_err(),
            TableError::UnpairedStatus(Voice)
        );
        assert_eq!(
            PrefixTable::new(&[('o', Op)], &[('@', Op), ('+', Voice)]).unwrap_err(),
            TableError::UnpairedStatus(Voice)
        );
    }

    #[test]
    fn duplicate_characters_rejected() {
        assert_eq!(
            PrefixTable::new(&[('o', Op), ('o', Voice)], &[('@', Op), ('+', Voice)]).unwrap_err(),
            TableError::DuplicateLetter('o')
        );
        assert_eq!(
            PrefixTable::new(&[('o', Op), ('v', Voice)], &[('@', Op), ('@', Voice)]).unwrap_err(),
            TableError::DuplicateLetter('@')
        );
    }
}
