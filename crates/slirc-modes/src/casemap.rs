//! IRC case folding for channel and nick lookups.
//!
//! Which mapping applies is announced by the ircd (`CASEMAPPING`), so it is a
//! runtime value rather than a fixed function.

/// Case mapping advertised by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Casemapping {
    /// Only `A-Z` fold.
    Ascii,
    /// `A-Z`, plus `[]\~` fold to `{}|^`.
    #[default]
    Rfc1459,
    /// `A-Z`, plus `[]\` fold to `{}|` (`~` and `^` stay distinct).
    StrictRfc1459,
}

impl Casemapping {
    /// Fold one character.
    #[inline]
    pub const fn fold_char(self, c: char) -> char {
        match (self, c) {
            (_, 'A'..='Z') => (c as u8 + 32) as char,
            (Casemapping::Ascii, _) => c,
            (_, '[') => '{',
            (_, ']') => '}',
            (_, '\\') => '|',
            (Casemapping::Rfc1459, '~') => '^',
            _ => c,
        }
    }

    /// Fold a whole name.
    pub fn fold(self, name: &str) -> String {
        name.chars().map(|c| self.fold_char(c)).collect()
    }

    /// Compare two names under this mapping.
    pub fn names_equal(self, a: &str, b: &str) -> bool {
        a.len() == b.len()
            && a
                .chars()
                .zip(b.chars())
                .all(|(x, y)| self.fold_char(x) == self.fold_char(y))
    }
}
