//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use std::collections::HashSet;

use slirc_modes::ChannelExt;
use thiserror::Error;

use super::Config;
use crate::context::AccessFlags;
use crate::registry::ProtocolRegistry;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("dialect.name '{0}' is not a registered dialect")]
    UnknownDialect(String),
    #[error("log.filter is empty")]
    EmptyLogFilter,
    #[error("channel name is invalid: {0:?}")]
    InvalidChannelName(String),
    #[error("channel {0} is configured twice")]
    DuplicateChannel(String),
    #[error("channel {channel}: member {entry:?} has no valid nick after its prefixes")]
    InvalidMember { channel: String, entry: String },
    #[error("channel {channel}: access for {account} has unknown flag '{letter}'")]
    InvalidAccessFlag {
        channel: String,
        account: String,
        letter: char,
    },
    #[error("channel {0} is offline and has no registration")]
    OfflineUnregistered(String),
}

/// Validate a configuration against the loaded dialects, returning all
/// errors found.
pub fn validate(config: &Config, registry: &ProtocolRegistry) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let descriptor = registry.get(&config.dialect.name);
    if descriptor.is_none() {
        errors.push(ValidationError::UnknownDialect(config.dialect.name.clone()));
    }

    if config.log.filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    let mut seen = HashSet::new();
    for channel in &config.channels {
        if !channel.name.is_channel_name() {
            errors.push(ValidationError::InvalidChannelName(channel.name.clone()));
        }
        if !seen.insert(config.dialect.casemapping.fold(&channel.name)) {
            errors.push(ValidationError::DuplicateChannel(channel.name.clone()));
        }
        if channel.offline && !channel.is_registered() {
            errors.push(ValidationError::OfflineUnregistered(channel.name.clone()));
        }

        if let Some(descriptor) = &descriptor {
            for entry in &channel.members {
                let (_, nick) = descriptor.prefixes().split_prefixes(entry);
                if !is_valid_nick(nick) {
                    errors.push(ValidationError::InvalidMember {
                        channel: channel.name.clone(),
                        entry: entry.clone(),
                    });
                }
            }
        }

        for access in &channel.access {
            if let Err(letter) = AccessFlags::from_letters(&access.flags) {
                errors.push(ValidationError::InvalidAccessFlag {
                    channel: channel.name.clone(),
                    account: access.account.clone(),
                    letter,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 2812 nickname syntax, without a length cap.
fn is_valid_nick(nick: &str) -> bool {
    fn special(c: char) -> bool {
        matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
    }

    let mut chars = nick.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || special(first) => {
            chars.all(|c| c.is_ascii_alphanumeric() || special(c) || c == '-')
        }
        _ => false,
    }
}
