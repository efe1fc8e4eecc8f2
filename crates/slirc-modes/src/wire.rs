//! Scanning of sign-prefixed mode strings such as `+nt-s`.
//!
//! Parameters are not consumed here: which letters take one depends on the
//! dialect, so parameter assignment happens in the translator.

use std::fmt;
use std::str::Chars;

/// Direction of a mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// `+`, set.
    Plus,
    /// `-`, unset.
    Minus,
}

impl Sign {
    /// The wire character.
    pub const fn as_char(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }

    /// Returns true for [`Sign::Plus`].
    pub const fn is_plus(self) -> bool {
        matches!(self, Sign::Plus)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Iterator over `(sign, letter)` pairs of a mode string.
///
/// A string without a leading sign is read as `+`.
#[derive(Debug, Clone)]
pub struct ModeString<'a> {
    chars: Chars<'a>,
    sign: Sign,
}

impl<'a> ModeString<'a> {
    /// Start scanning `modes`.
    pub fn scan(modes: &'a str) -> Self {
        Self {
            chars: modes.chars(),
            sign: Sign::Plus,
        }
    }
}

impl Iterator for ModeString<'_> {
    type Item = (Sign, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.chars.next()? {
                '+' => self.sign = Sign::Plus,
                '-' => self.sign = Sign::Minus,
                c => return Some((self.sign, c)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_sign_runs() {
        let pairs: Vec<_> = ModeString::scan("+nt-s+o").collect();
        assert_eq!(
            pairs,
            vec![
                (Sign::Plus, 'n'),
                (Sign::Plus, 't'),
                (Sign::Minus, 's'),
                (Sign::Plus, 'o'),
            ]
        );
    }

    #[test]
    fn missing_sign_means_plus() {
        let pairs: Vec<_> = ModeString::scan("im").collect();
        assert_eq!(pairs, vec![(Sign::Plus, 'i'), (Sign::Plus, 'm')]);
    }

    #[test]
    fn bare_signs_yield_nothing() {
        assert_eq!(ModeString::scan("+-+").count(), 0);
        assert_eq!(ModeString::scan("").count(), 0);
    }
}
