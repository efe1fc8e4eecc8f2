//! juno: charybdis plus oper-only and TLS-only channels and the full
//! five-level status set.

use slirc_modes::{ChannelModes, PrefixTable, StatusLevel, TableOverlay, UserModes};

use crate::descriptor::{DialectOverlay, ProtocolDescriptor, ProtocolType};
use crate::dialects::charybdis;
use crate::error::DialectError;
use crate::registry::{DialectModule, UnloadCapability};

pub const MODULE: &str = "protocol/juno";

/// The overlay juno applies on top of charybdis.
pub fn overlay() -> Result<DialectOverlay, DialectError> {
    use StatusLevel::*;

    let prefixes = PrefixTable::new(
        &[('y', Owner), ('a', Protect), ('o', Op), ('h', Halfop), ('v', Voice)],
        &[('~', Owner), ('&', Protect), ('@', Op), ('%', Halfop), ('+', Voice)],
    )?;

    Ok(DialectOverlay::new("juno")
        .channel_modes(
            TableOverlay::new()
                .remove("C")
                .set('O', ChannelModes::OPER_ONLY)
                .set('S', ChannelModes::SSL_ONLY),
        )
        .user_modes(TableOverlay::<UserModes>::new().remove("a"))
        .prefixes(prefixes)
        .scalars(|info| {
            info.oper_only_modes =
                ChannelModes::OPER_ONLY | ChannelModes::PERMANENT | ChannelModes::EXEMPT_LIMIT;
            info.ban_like_modes = "AIbeq".to_string();
            info.protocol = ProtocolType::Elemental;
        }))
}

/// Build the juno descriptor from a fresh charybdis base.
pub fn descriptor() -> Result<ProtocolDescriptor, DialectError> {
    charybdis::descriptor()?.overlay(&overlay()?)
}

/// The `protocol/juno` module.
#[derive(Debug, Clone, Copy, Default)]
pub struct Juno;

impl DialectModule for Juno {
    fn name(&self) -> &'static str {
        MODULE
    }

    fn dependency(&self) -> Option<&'static str> {
        Some(charybdis::MODULE)
    }

    fn unload(&self) -> UnloadCapability {
        UnloadCapability::Never
    }

    fn build(&self, base: Option<&ProtocolDescriptor>) -> Result<ProtocolDescriptor, DialectError> {
        let base = base.ok_or_else(|| DialectError::MissingDependency {
            dialect: MODULE.to_string(),
            dependency: charybdis::MODULE.to_string(),
        })?;
        base.overlay(&overlay()?)
    }
}
