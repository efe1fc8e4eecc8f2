//! Mode translation between wire strings and canonical changes.
//!
//! Each character is resolved on its own, in this order: simple capability
//! table, key / limit, ban-like list modes, extended registry, status table.
//! A character that fails is reported and skipped; the rest of the string is
//! still translated.

use slirc_modes::{ChannelModes, ModeString, Sign, StatusLevel, UserModes};
use tracing::debug;

use crate::context::{ModeLock, ValidationContext};
use crate::descriptor::{KEY_LETTER, LIMIT_LETTER, ProtocolDescriptor};
use crate::error::ModeRejection;
use crate::extmode::ExtModeCheck;

/// One accepted channel mode change, in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    /// Unparameterized mode.
    Simple { sign: Sign, flag: ChannelModes },
    /// Channel key. `-k` may or may not carry the old key.
    Key { sign: Sign, key: Option<String> },
    /// Member limit; only `+l` carries a value.
    Limit { sign: Sign, limit: Option<u32> },
    /// Ban-like list entry.
    List { sign: Sign, letter: char, mask: String },
    /// Status granted to or removed from a member.
    Status {
        sign: Sign,
        level: StatusLevel,
        target: String,
    },
    /// Validated extended mode; only `+` carries a value.
    Extended {
        sign: Sign,
        letter: char,
        value: Option<String>,
    },
}

impl ModeChange {
    /// Direction of the change.
    pub fn sign(&self) -> Sign {
        match self {
            ModeChange::Simple { sign, .. }
            | ModeChange::Key { sign, .. }
            | ModeChange::Limit { sign, .. }
            | ModeChange::List { sign, .. }
            | ModeChange::Status { sign, .. }
            | ModeChange::Extended { sign, .. } => *sign,
        }
    }
}

/// Result of translating one channel mode string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    /// Accepted changes, in input order.
    pub changes: Vec<ModeChange>,
    /// Rejected characters, in input order.
    pub rejected: Vec<ModeRejection>,
}

impl Translation {
    /// Simple flags left on once every change is applied in order.
    pub fn added(&self) -> ChannelModes {
        self.net_simple().0
    }

    /// Simple flags left off once every change is applied in order.
    pub fn removed(&self) -> ChannelModes {
        self.net_simple().1
    }

    fn net_simple(&self) -> (ChannelModes, ChannelModes) {
        let mut net = (ChannelModes::empty(), ChannelModes::empty());
        for change in &self.changes {
            if let ModeChange::Simple { sign, flag } = change {
                toggle(&mut net.0, &mut net.1, *sign, *flag);
            }
        }
        net
    }

    /// No character was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Result of translating a user mode string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserTranslation {
    pub add: UserModes,
    pub remove: UserModes,
    /// Letters with no entry in the user mode table.
    pub unknown: Vec<char>,
}

impl UserTranslation {
    /// One rejection per unknown letter.
    pub fn rejections(&self) -> Vec<ModeRejection> {
        self.unknown
            .iter()
            .map(|c| ModeRejection::UnknownUserMode(*c))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// A live MODE command: every class of mode applies.
    Live,
    /// A stored mode lock: no list entries, no member status.
    Lock,
}

/// Translates mode strings against one descriptor.
#[derive(Debug, Clone, Copy)]
pub struct ModeTranslator<'d> {
    descriptor: &'d ProtocolDescriptor,
}

impl<'d> ModeTranslator<'d> {
    pub fn new(descriptor: &'d ProtocolDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &'d ProtocolDescriptor {
        self.descriptor
    }

    /// Translate a channel MODE string and its parameters.
    pub fn channel(&self, modes: &str, params: &[&str], ctx: &ValidationContext<'_>) -> Translation {
        self.resolve(modes, params, ctx, Scope::Live)
    }

    /// Translate a mode lock definition such as `+ntf-s #overflow`.
    ///
    /// Status and list letters cannot be locked and are reported as unknown.
    pub fn mlock(
        &self,
        modes: &str,
        params: &[&str],
        ctx: &ValidationContext<'_>,
    ) -> (ModeLock, Vec<ModeRejection>) {
        let translation = self.resolve(modes, params, ctx, Scope::Lock);
        let mut lock = ModeLock::default();

        for change in translation.changes {
            match change {
                ModeChange::Simple { sign, flag } => lock_flag(&mut lock, sign, flag),
                ModeChange::Key { sign, key } => {
                    lock_flag(&mut lock, sign, ChannelModes::KEY);
                    lock.key = if sign.is_plus() { key } else { None };
                }
                ModeChange::Limit { sign, limit } => {
                    lock_flag(&mut lock, sign, ChannelModes::LIMIT);
                    lock.limit = limit;
                }
                ModeChange::Extended { letter, value, .. } => {
                    lock.ext.retain(|(c, _)| *c != letter);
                    if let Some(value) = value {
                        lock.ext.push((letter, value));
                    }
                }
                ModeChange::List { .. } | ModeChange::Status { .. } => {}
            }
        }

        (lock, translation.rejected)
    }

    /// Translate a user MODE string. Unknown letters are collected.
    pub fn user(&self, modes: &str) -> UserTranslation {
        let table = self.descriptor.user_modes();
        let mut out = UserTranslation::default();

        for (sign, c) in ModeString::scan(modes) {
            match table.flag_for(c) {
                Some(flag) if sign.is_plus() => {
                    out.add |= flag;
                    out.remove -= flag;
                }
                Some(flag) => {
                    out.remove |= flag;
                    out.add -= flag;
                }
                None => {
                    debug!(letter = %c, dialect = self.descriptor.name(), "unknown user mode");
                    out.unknown.push(c);
                }
            }
        }

        out
    }

    /// Encode canonical changes as a wire mode string plus parameters.
    ///
    /// Signs are emitted only where they change. Changes this dialect has no
    /// letter for are left out.
    pub fn render(&self, changes: &[ModeChange]) -> (String, Vec<String>) {
        let mut modes = String::new();
        let mut params = Vec::new();
        let mut current: Option<Sign> = None;

        for change in changes {
            let Some((letter, param)) = self.wire_form(change) else {
                continue;
            };
            let sign = change.sign();
            if current != Some(sign) {
                modes.push(sign.as_char());
                current = Some(sign);
            }
            modes.push(letter);
            params.extend(param);
        }

        (modes, params)
    }

    fn wire_form(&self, change: &ModeChange) -> Option<(char, Option<String>)> {
        let d = self.descriptor;
        match change {
            ModeChange::Simple { flag, .. } => d.channel_modes().char_for(*flag).map(|c| (c, None)),
            ModeChange::Key { key, .. } => Some((KEY_LETTER, key.clone())),
            ModeChange::Limit { limit, .. } => Some((LIMIT_LETTER, limit.map(|l| l.to_string()))),
            ModeChange::List { letter, mask, .. } => d
                .is_list_mode(*letter)
                .then(|| (*letter, Some(mask.clone()))),
            ModeChange::Status { level, target, .. } => d
                .prefixes()
                .status_char_for(*level)
                .map(|c| (c, Some(target.clone()))),
            ModeChange::Extended { letter, value, .. } => d
                .ext_modes()
                .contains_letter(*letter)
                .then(|| (*letter, value.clone())),
        }
    }

    fn resolve(
        &self,
        modes: &str,
        params: &[&str],
        ctx: &ValidationContext<'_>,
        scope: Scope,
    ) -> Translation {
        let d = self.descriptor;
        let mut params = params.iter().copied();
        let mut out = Translation::default();

        for (sign, c) in ModeString::scan(modes) {
            let result = if let Some(flag) = d.channel_modes().flag_for(c) {
                Ok(ModeChange::Simple { sign, flag })
            } else if c == KEY_LETTER {
                match (sign, params.next()) {
                    (Sign::Plus, Some(key)) => Ok(ModeChange::Key {
                        sign,
                        key: Some(key.to_string()),
                    }),
                    (Sign::Plus, None) => Err(ModeRejection::MissingParameter { sign, letter: c }),
                    (Sign::Minus, key) => Ok(ModeChange::Key {
                        sign,
                        key: key.map(str::to_string),
                    }),
                }
            } else if c == LIMIT_LETTER {
                match sign {
                    Sign::Plus => match params.next() {
                        Some(value) => parse_limit(value)
                            .map(|limit| ModeChange::Limit {
                                sign,
                                limit: Some(limit),
                            })
                            .ok_or_else(|| ModeRejection::InvalidLimit {
                                letter: c,
                                value: value.to_string(),
                            }),
                        None => Err(ModeRejection::MissingParameter { sign, letter: c }),
                    },
                    Sign::Minus => Ok(ModeChange::Limit { sign, limit: None }),
                }
            } else if scope == Scope::Live && d.is_list_mode(c) {
                params
                    .next()
                    .map(|mask| ModeChange::List {
                        sign,
                        letter: c,
                        mask: mask.to_string(),
                    })
                    .ok_or(ModeRejection::MissingParameter { sign, letter: c })
            } else if let Some(validator) = d.ext_modes().validator_for(c) {
                match sign {
                    Sign::Plus => match params.next() {
                        Some(value) if validator.check(value, ctx) => Ok(ModeChange::Extended {
                            sign,
                            letter: c,
                            value: Some(value.to_string()),
                        }),
                        Some(value) => Err(ModeRejection::ValidationRejected {
                            sign,
                            letter: c,
                            value: value.to_string(),
                        }),
                        None => Err(ModeRejection::MissingParameter { sign, letter: c }),
                    },
                    Sign::Minus => Ok(ModeChange::Extended {
                        sign,
                        letter: c,
                        value: None,
                    }),
                }
            } else if let Some(level) = d
                .prefixes()
                .level_for_status_char(c)
                .filter(|_| scope == Scope::Live)
            {
                params
                    .next()
                    .map(|target| ModeChange::Status {
                        sign,
                        level,
                        target: target.to_string(),
                    })
                    .ok_or(ModeRejection::MissingParameter { sign, letter: c })
            } else {
                Err(ModeRejection::UnknownMode(c))
            };

            match result {
                Ok(change) => out.changes.push(change),
                Err(rejection) => {
                    debug!(
                        letter = %c,
                        dialect = d.name(),
                        reason = rejection.error_code(),
                        "mode character rejected"
                    );
                    out.rejected.push(rejection);
                }
            }
        }

        out
    }
}

fn parse_limit(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|limit| *limit > 0)
}

fn lock_flag(lock: &mut ModeLock, sign: Sign, flag: ChannelModes) {
    toggle(&mut lock.on, &mut lock.off, sign, flag);
}

/// Later changes to the same flag win over earlier ones.
fn toggle(on: &mut ChannelModes, off: &mut ChannelModes, sign: Sign, flag: ChannelModes) {
    match sign {
        Sign::Plus => {
            *on |= flag;
            *off -= flag;
        }
        Sign::Minus => {
            *off |= flag;
            *on -= flag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NoLookup;
    use crate::dialects::{charybdis, juno};

    fn internal() -> ValidationContext<'static> {
        ValidationContext::internal(&NoLookup)
    }

    #[test]
    fn simple_flags_both_signs() {
        let d = charybdis::descriptor().unwrap();
        let t = ModeTranslator::new(&d).channel("+nt-s", &[], &internal());
        assert!(t.is_clean());
        assert_eq!(t.added(), ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC);
        assert_eq!(t.removed(), ChannelModes::SECRET);
    }

    #[test]
    fn later_sign_wins_for_simple_flags() {
        let d = juno::descriptor().unwrap();
        let t = ModeTranslator::new(&d).channel("+ntF-F", &[], &internal());
        assert_eq!(t.added(), ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC);
        assert_eq!(t.removed(), ChannelModes::FREE_TARGET);

        let t = ModeTranslator::new(&d).channel("-s+s", &[], &internal());
        assert_eq!(t.added(), ChannelModes::SECRET);
        assert!(t.removed().is_empty());
    }

    #[test]
    fn unknown_letter_does_not_abort() {
        let d = juno::descriptor().unwrap();
        let t = ModeTranslator::new(&d).channel("+nXt", &[], &internal());
        assert_eq!(t.rejected, vec![ModeRejection::UnknownMode('X')]);
        assert_eq!(t.added(), ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC);
    }

    #[test]
    fn rejected_value_still_consumes_parameter() {
        let d = juno::descriptor().unwrap();
        let t = ModeTranslator::new(&d).channel("+jo", &["0:5", "alice"], &internal());
        assert_eq!(
            t.rejected,
            vec![ModeRejection::ValidationRejected {
                sign: Sign::Plus,
                letter: 'j',
                value: "0:5".into(),
            }]
        );
        assert_eq!(
            t.changes,
            vec![ModeChange::Status {
                sign: Sign::Plus,
                level: StatusLevel::Op,
                target: "alice".into(),
            }]
        );
    }

    #[test]
    fn key_and_limit_parameters() {
        let d = charybdis::descriptor().unwrap();
        let tr = ModeTranslator::new(&d);

        let t = tr.channel("+kl-k", &["sekrit", "25"], &internal());
        assert!(t.is_clean());
        assert_eq!(
            t.changes,
            vec![
                ModeChange::Key {
                    sign: Sign::Plus,
                    key: Some("sekrit".into())
                },
                ModeChange::Limit {
                    sign: Sign::Plus,
                    limit: Some(25)
                },
                ModeChange::Key {
                    sign: Sign::Minus,
                    key: None
                },
            ]
        );

        let t = tr.channel("+l", &["many"], &internal());
        assert_eq!(
            t.rejected,
            vec![ModeRejection::InvalidLimit {
                letter: 'l',
                value: "many".into()
            }]
        );

        let t = tr.channel("+k", &[], &internal());
        assert_eq!(t.rejected[0].error_code(), "missing_parameter");
    }

    #[test]
    fn list_and_extended_minus() {
        let d = juno::descriptor().unwrap();
        let t = ModeTranslator::new(&d).channel("+A-fj", &["*!*@spam"], &internal());
        assert!(t.is_clean());
        assert_eq!(t.changes.len(), 3);
        assert!(matches!(
            &t.changes[0],
            ModeChange::List { letter: 'A', mask, .. } if mask == "*!*@spam"
        ));
        assert!(matches!(
            t.changes[1],
            ModeChange::Extended {
                sign: Sign::Minus,
                letter: 'f',
                value: None
            }
        ));
    }

    #[test]
    fn status_letters_follow_dialect() {
        let base = charybdis::descriptor().unwrap();
        let t = ModeTranslator::new(&base).channel("+y", &["alice"], &internal());
        assert_eq!(t.rejected, vec![ModeRejection::UnknownMode('y')]);

        let j = juno::descriptor().unwrap();
        let t = ModeTranslator::new(&j).channel("+yh", &["alice", "bob"], &internal());
        assert!(t.is_clean());
        assert!(matches!(
            t.changes[0],
            ModeChange::Status {
                level: StatusLevel::Owner,
                ..
            }
        ));
    }

    #[test]
    fn mlock_folds_changes() {
        let d = juno::descriptor().unwrap();
        let (lock, rejected) = ModeTranslator::new(&d).mlock(
            "+ntsfk-s+o",
            &["#overflow", "key"],
            &internal(),
        );
        assert_eq!(rejected, vec![ModeRejection::UnknownMode('o')]);
        assert_eq!(
            lock.on,
            ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC | ChannelModes::KEY
        );
        assert_eq!(lock.off, ChannelModes::SECRET);
        assert_eq!(lock.key.as_deref(), Some("key"));
        assert_eq!(lock.ext, vec![('f', "#overflow".to_string())]);
    }

    #[test]
    fn user_modes_translate() {
        let d = juno::descriptor().unwrap();
        let t = ModeTranslator::new(&d).user("+iD-o+a");
        assert_eq!(t.add, UserModes::INVISIBLE | UserModes::DEAF);
        assert_eq!(t.remove, UserModes::IRCOP);
        assert_eq!(t.unknown, vec!['a']);
        assert_eq!(t.rejections(), vec![ModeRejection::UnknownUserMode('a')]);
    }

    #[test]
    fn render_minimizes_sign_switches() {
        let d = juno::descriptor().unwrap();
        let tr = ModeTranslator::new(&d);
        let t = tr.channel("+n+t-s-m+o+j", &["alice", "3:10"], &internal());
        assert!(t.is_clean());

        let (modes, params) = tr.render(&t.changes);
        assert_eq!(modes, "+nt-sm+oj");
        assert_eq!(params, vec!["alice".to_string(), "3:10".to_string()]);
    }

    #[test]
    fn render_skips_what_dialect_lacks() {
        let j = juno::descriptor().unwrap();
        let base = charybdis::descriptor().unwrap();
        let t = ModeTranslator::new(&j).channel("+Oy", &["alice"], &internal());

        let (modes, params) = ModeTranslator::new(&base).render(&t.changes);
        assert_eq!(modes, "");
        assert!(params.is_empty());
    }
}
