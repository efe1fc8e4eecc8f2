use tracing::warn;

use super::Snapshot;
use crate::config::ChannelSeed;
use crate::context::{AccessFlags, ChannelRegistration, ChannelState, NoLookup, ValidationContext};
use crate::error::ModeRejection;
use crate::translate::{ModeChange, ModeTranslator};

/// A configured mode that could not be seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRejection {
    pub channel: String,
    pub rejection: ModeRejection,
}

impl Snapshot {
    /// Populate the snapshot from configured channels.
    ///
    /// Modes are read in the translator's dialect as trusted internal
    /// changes. Rejected characters are logged and returned; the rest of
    /// each channel is still seeded.
    pub fn seed(&self, seeds: &[ChannelSeed], translator: &ModeTranslator<'_>) -> Vec<SeedRejection> {
        let ctx = ValidationContext::internal(&NoLookup);
        let mut rejected = Vec::new();
        let mut reject = |channel: &str, rejection: ModeRejection| {
            warn!(channel, error = %rejection, "seed mode rejected");
            rejected.push(SeedRejection {
                channel: channel.to_string(),
                rejection,
            });
        };

        for seed in seeds {
            if !seed.offline {
                let params: Vec<&str> = seed.params.iter().map(String::as_str).collect();
                let translation = translator.channel(&seed.modes, &params, &ctx);
                let mut state = ChannelState::new(&seed.name, translation.added());
                for change in translation.changes {
                    match change {
                        ModeChange::Key { sign, key } => {
                            state.key = if sign.is_plus() { key } else { None };
                        }
                        ModeChange::Limit { limit, .. } => state.limit = limit,
                        ModeChange::Extended { letter, value, .. } => {
                            state.ext.retain(|(c, _)| *c != letter);
                            if let Some(value) = value {
                                state.ext.push((letter, value));
                            }
                        }
                        _ => {}
                    }
                }
                for rejection in translation.rejected {
                    reject(&seed.name, rejection);
                }
                self.insert_channel(state);

                let prefixes = translator.descriptor().prefixes();
                for entry in &seed.members {
                    let (status, nick) = prefixes.split_prefixes(entry);
                    self.set_member(&seed.name, nick, status);
                }
            }

            if seed.is_registered() {
                let mut registration = ChannelRegistration::new(&seed.name);
                if let Some(mlock) = &seed.mlock {
                    let params: Vec<&str> = seed.mlock_params.iter().map(String::as_str).collect();
                    let (lock, lock_rejected) = translator.mlock(mlock, &params, &ctx);
                    registration.mlock = lock;
                    for rejection in lock_rejected {
                        reject(&seed.name, rejection);
                    }
                }
                for access in &seed.access {
                    match AccessFlags::from_letters(&access.flags) {
                        Ok(flags) => registration = registration.with_access(&access.account, flags),
                        Err(letter) => {
                            warn!(channel = %seed.name, account = %access.account, %letter, "unknown access flag");
                        }
                    }
                }
                self.insert_registration(registration);
            }
        }

        rejected
    }
}
