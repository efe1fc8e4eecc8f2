//! charybdis and its close relatives.

use slirc_modes::{ChannelModes, ModeTable, PrefixTable, StatusLevel, UserModes};

use crate::descriptor::{DialectCaps, IrcdInfo, ProtocolDescriptor, ProtocolType};
use crate::error::DialectError;
use crate::extmode::{ExtModeRegistry, Validator};
use crate::registry::DialectModule;

pub const MODULE: &str = "protocol/charybdis";

const CHANNEL_MODES: &[(char, ChannelModes)] = &[
    ('i', ChannelModes::INVITE),
    ('m', ChannelModes::MODERATED),
    ('n', ChannelModes::NO_EXTERNAL),
    ('p', ChannelModes::PRIVATE),
    ('s', ChannelModes::SECRET),
    ('t', ChannelModes::TOPIC),
    ('c', ChannelModes::NO_COLOR),
    ('r', ChannelModes::REG_ONLY),
    ('z', ChannelModes::OP_MODERATED),
    ('g', ChannelModes::FREE_INVITE),
    ('L', ChannelModes::EXEMPT_LIMIT),
    ('P', ChannelModes::PERMANENT),
    ('F', ChannelModes::FREE_TARGET),
    ('Q', ChannelModes::DISABLE_FORWARD),
    ('C', ChannelModes::NO_CTCP),
];

const USER_MODES: &[(char, UserModes)] = &[
    ('a', UserModes::ADMIN),
    ('i', UserModes::INVISIBLE),
    ('o', UserModes::IRCOP),
    ('D', UserModes::DEAF),
    ('S', UserModes::SERVICE),
];

fn info() -> IrcdInfo {
    let mut info = IrcdInfo::new("charybdis");
    info.oper_only_modes = ChannelModes::EXEMPT_LIMIT | ChannelModes::PERMANENT;
    info.perm_mode = ChannelModes::PERMANENT;
    info.ban_like_modes = "beIq".to_string();
    info.except_letter = Some('e');
    info.invex_letter = Some('I');
    info.protocol = ProtocolType::Charybdis;
    info.caps = DialectCaps::CIDR_BANS | DialectCaps::HOLD_NICK;
    info
}

/// Build the charybdis descriptor.
pub fn descriptor() -> Result<ProtocolDescriptor, DialectError> {
    ProtocolDescriptor::builder(info())
        .channel_modes(ModeTable::new(CHANNEL_MODES.iter().copied())?)
        .user_modes(ModeTable::new(USER_MODES.iter().copied())?)
        .ext_modes(ExtModeRegistry::new([
            ('f', Validator::Forward),
            ('j', Validator::JoinThrottle),
        ])?)
        .prefixes(PrefixTable::new(
            &[('o', StatusLevel::Op), ('v', StatusLevel::Voice)],
            &[('@', StatusLevel::Op), ('+', StatusLevel::Voice)],
        )?)
        .build()
}

/// The `protocol/charybdis` module.
#[derive(Debug, Clone, Copy, Default)]
pub struct Charybdis;

impl DialectModule for Charybdis {
    fn name(&self) -> &'static str {
        MODULE
    }

    fn build(&self, _base: Option<&ProtocolDescriptor>) -> Result<ProtocolDescriptor, DialectError> {
        descriptor()
    }
}
