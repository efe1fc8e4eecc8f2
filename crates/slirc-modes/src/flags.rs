//! Canonical, dialect-independent mode flags.
//!
//! Every ircd dialect assigns its own letters to channel and user modes; the
//! services side only ever reasons about the bits defined here. Values follow
//! the numbering used by the services framework so persisted mode locks stay
//! readable across dialect switches.
//!
//! The namespace is `u64`: dialect-specific bits (such as
//! [`ChannelModes::STRIP_COLOR`]) live above bit 32.

use bitflags::bitflags;

use crate::status::StatusLevel;

/// Raw bit access shared by all canonical flag sets.
///
/// Mode tables are generic over this trait so the same bijection checks apply
/// to channel, user and status tables.
pub trait ModeFlag: Copy + Eq + std::fmt::Debug {
    /// The raw bits of this set.
    fn to_raw(self) -> u64;

    /// Build a set from raw bits, keeping bits that have no named flag.
    fn from_raw(bits: u64) -> Self;
}

bitflags! {
    /// Canonical channel mode flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChannelModes: u64 {
        /// Invite only.
        const INVITE = 0x0000_0001;
        /// Channel key. Parameterized, handled outside the simple table.
        const KEY = 0x0000_0002;
        /// Member limit. Parameterized, handled outside the simple table.
        const LIMIT = 0x0000_0004;
        /// Moderated.
        const MODERATED = 0x0000_0008;
        /// No external messages.
        const NO_EXTERNAL = 0x0000_0010;
        /// Private.
        const PRIVATE = 0x0000_0040;
        /// Secret.
        const SECRET = 0x0000_0080;
        /// Only ops may change the topic.
        const TOPIC = 0x0000_0100;
        /// Block color codes.
        const NO_COLOR = 0x0000_1000;
        /// Only registered users may join.
        const REG_ONLY = 0x0000_2000;
        /// Ops receive messages rejected by +m.
        const OP_MODERATED = 0x0000_4000;
        /// Anyone in the channel may INVITE.
        const FREE_INVITE = 0x0000_8000;
        /// Unlimited ban-like list entries.
        const EXEMPT_LIMIT = 0x0001_0000;
        /// Channel survives with no members.
        const PERMANENT = 0x0002_0000;
        /// Free forward target: any channel may forward here.
        const FREE_TARGET = 0x0004_0000;
        /// Forwarding out of this channel is disabled.
        const DISABLE_FORWARD = 0x0008_0000;
        /// Block CTCP other than ACTION.
        const NO_CTCP = 0x0010_0000;
        /// Only IRC operators may join.
        const OPER_ONLY = 0x0080_0000;
        /// Only TLS clients may join.
        const SSL_ONLY = 0x0100_0000;
        /// Strip color codes instead of blocking.
        const STRIP_COLOR = 0x2_0000_0000;
    }
}

bitflags! {
    /// Canonical user mode flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct UserModes: u64 {
        /// Invisible.
        const INVISIBLE = 0x0004;
        /// IRC operator.
        const IRCOP = 0x0010;
        /// Server administrator.
        const ADMIN = 0x0020;
        /// Does not receive channel messages.
        const DEAF = 0x4000;
        /// Network service.
        const SERVICE = 0x8000;
    }
}

bitflags! {
    /// Canonical channel membership status flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusModes: u64 {
        /// Channel operator.
        const OP = 0x01;
        /// Voice.
        const VOICE = 0x02;
        /// Channel owner.
        const OWNER = 0x04;
        /// Protected (admin).
        const PROTECT = 0x08;
        /// Half-operator.
        const HALFOP = 0x10;
    }
}

impl StatusModes {
    /// Returns true if this set holds `level` or any level above it.
    pub fn at_least(self, level: StatusLevel) -> bool {
        StatusLevel::ALL
            .iter()
            .take_while(|held| **held >= level)
            .any(|held| self.contains(held.flag()))
    }
}

macro_rules! impl_mode_flag {
    ($($ty:ty),+) => {
        $(
            impl ModeFlag for $ty {
                #[inline]
                fn to_raw(self) -> u64 {
                    self.bits()
                }

                #[inline]
                fn from_raw(bits: u64) -> Self {
                    Self::from_bits_retain(bits)
                }
            }
        )+
    };
}

impl_mode_flag!(ChannelModes, UserModes, StatusModes);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_color_lives_above_bit_32() {
        assert!(ChannelModes::STRIP_COLOR.bits() > u64::from(u32::MAX));
    }

    #[test]
    fn at_least_respects_order() {
        let op = StatusModes::OP;
        assert!(op.at_least(StatusLevel::Op));
        assert!(op.at_least(StatusLevel::Voice));
        assert!(!op.at_least(StatusLevel::Protect));

        let owner = StatusModes::OWNER;
        assert!(owner.at_least(StatusLevel::Op));
        assert!(!StatusModes::VOICE.at_least(StatusLevel::Halfop));
        assert!(!StatusModes::empty().at_least(StatusLevel::Voice));
    }

    #[test]
    fn raw_round_trip_keeps_unknown_bits() {
        let raw = ChannelModes::SECRET.bits() | (1 << 50);
        assert_eq!(ChannelModes::from_raw(raw).to_raw(), raw);
    }
}
