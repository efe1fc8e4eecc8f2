//! Read-only view of host state handed to extended-mode validators.
//!
//! The services host owns channels, registrations, users and accounts. This
//! module only describes the shapes validators read and the lookup services
//! the host must provide; nothing here is retained past a validator call.

use bitflags::bitflags;
use slirc_modes::{ChannelModes, StatusModes};

bitflags! {
    /// Channel access flags held by an account against a registration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u32 {
        /// `v`: may voice themselves.
        const VOICE = 0x0000_0001;
        /// `V`: voiced on join.
        const AUTOVOICE = 0x0000_0002;
        /// `o`: may op themselves.
        const OP = 0x0000_0004;
        /// `O`: opped on join.
        const AUTOOP = 0x0000_0008;
        /// `t`: may change the topic.
        const TOPIC = 0x0000_0010;
        /// `s`: may change channel settings, including forward targets.
        const SET = 0x0000_0020;
        /// `r`: may kick and ban.
        const REMOVE = 0x0000_0040;
        /// `i`: may invite.
        const INVITE = 0x0000_0080;
        /// `R`: may recover the channel.
        const RECOVER = 0x0000_0100;
        /// `f`: may edit the access list.
        const FLAGS = 0x0000_0200;
        /// `h`: may halfop themselves.
        const HALFOP = 0x0000_0400;
        /// `H`: halfopped on join.
        const AUTOHALFOP = 0x0000_0800;
        /// `A`: may view the access list.
        const ACLVIEW = 0x0000_1000;
        /// `F`: founder.
        const FOUNDER = 0x0000_2000;
        /// `a`: may take protect status.
        const USEPROTECT = 0x0000_4000;
        /// `q`: may take owner status.
        const USEOWNER = 0x0000_8000;
        /// `e`: exempt from bans.
        const EXEMPT = 0x0001_0000;
        /// `b`: kicked on join.
        const AKICK = 0x8000_0000;
    }
}

const ACCESS_LETTERS: &[(char, AccessFlags)] = &[
    ('v', AccessFlags::VOICE),
    ('V', AccessFlags::AUTOVOICE),
    ('o', AccessFlags::OP),
    ('O', AccessFlags::AUTOOP),
    ('t', AccessFlags::TOPIC),
    ('s', AccessFlags::SET),
    ('r', AccessFlags::REMOVE),
    ('i', AccessFlags::INVITE),
    ('R', AccessFlags::RECOVER),
    ('f', AccessFlags::FLAGS),
    ('h', AccessFlags::HALFOP),
    ('H', AccessFlags::AUTOHALFOP),
    ('A', AccessFlags::ACLVIEW),
    ('F', AccessFlags::FOUNDER),
    ('a', AccessFlags::USEPROTECT),
    ('q', AccessFlags::USEOWNER),
    ('e', AccessFlags::EXEMPT),
    ('b', AccessFlags::AKICK),
];

impl AccessFlags {
    /// Parse services flag letters such as `"+vVs"`.
    ///
    /// A leading `+` is ignored. Returns the first unknown letter on failure.
    pub fn from_letters(letters: &str) -> Result<Self, char> {
        letters
            .trim_start_matches('+')
            .chars()
            .try_fold(AccessFlags::empty(), |acc, c| {
                ACCESS_LETTERS
                    .iter()
                    .find(|(letter, _)| *letter == c)
                    .map(|(_, flag)| acc | *flag)
                    .ok_or(c)
            })
    }

    /// Render as services flag letters, in canonical order.
    pub fn to_letters(self) -> String {
        ACCESS_LETTERS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(letter, _)| *letter)
            .collect()
    }
}

/// Live state of a channel, as the host sees it right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelState {
    pub name: String,
    /// Simple modes currently set.
    pub modes: ChannelModes,
    /// Channel key, if `+k`.
    pub key: Option<String>,
    /// Member limit, if `+l`.
    pub limit: Option<u32>,
    /// Extended mode values currently set, e.g. `('f', "#overflow")`.
    pub ext: Vec<(char, String)>,
}

impl ChannelState {
    pub fn new(name: impl Into<String>, modes: ChannelModes) -> Self {
        Self {
            name: name.into(),
            modes,
            ..Self::default()
        }
    }
}

/// Persisted mode lock of a registered channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModeLock {
    /// Modes forced on.
    pub on: ChannelModes,
    /// Modes forced off.
    pub off: ChannelModes,
    /// Locked member limit.
    pub limit: Option<u32>,
    /// Locked channel key.
    pub key: Option<String>,
    /// Locked extended mode values.
    pub ext: Vec<(char, String)>,
}

impl ModeLock {
    /// Nothing is locked.
    pub fn is_empty(&self) -> bool {
        self.on.is_empty()
            && self.off.is_empty()
            && self.limit.is_none()
            && self.key.is_none()
            && self.ext.is_empty()
    }
}

/// One account's access to a registered channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEntry {
    pub account: String,
    pub flags: AccessFlags,
}

/// Stored registration of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelRegistration {
    pub name: String,
    pub mlock: ModeLock,
    pub access: Vec<AccessEntry>,
}

impl ChannelRegistration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_mlock(mut self, mlock: ModeLock) -> Self {
        self.mlock = mlock;
        self
    }

    pub fn with_access(mut self, account: impl Into<String>, flags: AccessFlags) -> Self {
        self.access.push(AccessEntry {
            account: account.into(),
            flags,
        });
        self
    }

    /// Union of the flags of every entry naming `account`.
    ///
    /// Account names compare ASCII case-insensitively.
    pub fn flags_for_account(&self, account: &str) -> AccessFlags {
        self.access
            .iter()
            .filter(|entry| entry.account.eq_ignore_ascii_case(account))
            .fold(AccessFlags::empty(), |acc, entry| acc | entry.flags)
    }
}

/// A connected user acting on a mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub nick: String,
    /// Account the user is logged in to, if any.
    pub account: Option<String>,
}

impl UserRef {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            account: None,
        }
    }

    pub fn logged_in(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// A services account acting without a live session (e.g. a stored mlock).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRef {
    pub name: String,
}

impl AccountRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Lookup services the host provides to validators.
///
/// All methods are synchronous reads of host state; implementations must
/// not block on I/O. Values are returned by value so an implementation can
/// hand out snapshots without holding locks across the validator call.
pub trait ChannelLookup {
    /// Live channel by name.
    fn channel(&self, name: &str) -> Option<ChannelState>;

    /// Stored registration by channel name.
    fn registration(&self, name: &str) -> Option<ChannelRegistration>;

    /// Status `user` holds in `channel`, or `None` if not a member.
    fn member_status(&self, channel: &str, user: &UserRef) -> Option<StatusModes>;

    /// Access flags of a live user against a registration.
    fn user_access(&self, registration: &ChannelRegistration, user: &UserRef) -> AccessFlags {
        user.account
            .as_deref()
            .map(|account| registration.flags_for_account(account))
            .unwrap_or_default()
    }

    /// Access flags of an account against a registration.
    fn account_access(&self, registration: &ChannelRegistration, account: &AccountRef) -> AccessFlags {
        registration.flags_for_account(&account.name)
    }
}

/// Lookup for contexts with no host state at all; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl ChannelLookup for NoLookup {
    fn channel(&self, _name: &str) -> Option<ChannelState> {
        None
    }

    fn registration(&self, _name: &str) -> Option<ChannelRegistration> {
        None
    }

    fn member_status(&self, _channel: &str, _user: &UserRef) -> Option<StatusModes> {
        None
    }
}

/// Everything a validator may read for one mode change.
///
/// Built by the caller per event and dropped when translation returns.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    pub lookup: &'a dyn ChannelLookup,
    /// Channel the mode is being set on.
    pub channel: Option<&'a ChannelState>,
    /// Registration of that channel.
    pub registration: Option<&'a ChannelRegistration>,
    /// Live user making the change.
    pub user: Option<&'a UserRef>,
    /// Account making the change when there is no live user.
    pub account: Option<&'a AccountRef>,
}

impl<'a> ValidationContext<'a> {
    /// A change made by the server or services themselves.
    pub fn internal(lookup: &'a dyn ChannelLookup) -> Self {
        Self {
            lookup,
            channel: None,
            registration: None,
            user: None,
            account: None,
        }
    }

    /// A change made by a live user.
    pub fn for_user(lookup: &'a dyn ChannelLookup, user: &'a UserRef) -> Self {
        Self {
            user: Some(user),
            ..Self::internal(lookup)
        }
    }

    /// A change attributed to an account (no live session).
    pub fn for_account(lookup: &'a dyn ChannelLookup, account: &'a AccountRef) -> Self {
        Self {
            account: Some(account),
            ..Self::internal(lookup)
        }
    }

    /// Attach the channel being changed.
    pub fn in_channel(
        mut self,
        channel: Option<&'a ChannelState>,
        registration: Option<&'a ChannelRegistration>,
    ) -> Self {
        self.channel = channel;
        self.registration = registration;
        self
    }

    /// Returns true when no user or account is attributed.
    pub fn is_internal(&self) -> bool {
        self.user.is_none() && self.account.is_none()
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("channel", &self.channel.map(|c| c.name.as_str()))
            .field("registration", &self.registration.map(|r| r.name.as_str()))
            .field("user", &self.user.map(|u| u.nick.as_str()))
            .field("account", &self.account.map(|a| a.name.as_str()))
            .finish()
    }
}
