use std::collections::HashMap;

use dashmap::DashMap;
use slirc_modes::{Casemapping, StatusModes};
use tracing::trace;

use super::DashMapExt;
use crate::context::{ChannelLookup, ChannelRegistration, ChannelState, UserRef};

/// Concurrent snapshot of channels, registrations and memberships.
///
/// Every key is folded with the configured [`Casemapping`], so `#Target` and
/// `#target` name the same channel.
#[derive(Debug, Default)]
pub struct Snapshot {
    casemapping: Casemapping,
    /// Live channels, by folded name.
    channels: DashMap<String, ChannelState>,
    /// Registrations, by folded channel name.
    registrations: DashMap<String, ChannelRegistration>,
    /// Folded channel name -> folded nick -> held status.
    members: DashMap<String, HashMap<String, StatusModes>>,
}

impl Snapshot {
    pub fn new(casemapping: Casemapping) -> Self {
        Self {
            casemapping,
            ..Self::default()
        }
    }

    pub fn casemapping(&self) -> Casemapping {
        self.casemapping
    }

    fn key(&self, name: &str) -> String {
        self.casemapping.fold(name)
    }

    /// Insert or replace a live channel.
    pub fn insert_channel(&self, channel: ChannelState) {
        let key = self.key(&channel.name);
        trace!(channel = %channel.name, "snapshot channel");
        self.channels.insert(key, channel);
    }

    /// Insert or replace a registration.
    pub fn insert_registration(&self, registration: ChannelRegistration) {
        let key = self.key(&registration.name);
        trace!(channel = %registration.name, "snapshot registration");
        self.registrations.insert(key, registration);
    }

    /// Set `nick`'s status in `channel`. Membership with no status is an
    /// empty set, not absence.
    pub fn set_member(&self, channel: &str, nick: &str, status: StatusModes) {
        let nick = self.key(nick);
        self.members
            .entry(self.key(channel))
            .or_default()
            .insert(nick, status);
    }

    /// Drop a live channel and its memberships. The registration stays.
    pub fn remove_channel(&self, name: &str) -> Option<ChannelState> {
        let key = self.key(name);
        self.members.remove(&key);
        self.channels.remove(&key).map(|(_, channel)| channel)
    }

    /// Live channels, in no particular order.
    pub fn channels(&self) -> Vec<ChannelState> {
        self.channels.values_cloned()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}

impl ChannelLookup for Snapshot {
    fn channel(&self, name: &str) -> Option<ChannelState> {
        self.channels.get_cloned(&self.key(name))
    }

    fn registration(&self, name: &str) -> Option<ChannelRegistration> {
        self.registrations.get_cloned(&self.key(name))
    }

    fn member_status(&self, channel: &str, user: &UserRef) -> Option<StatusModes> {
        let nick = self.key(&user.nick);
        self.members
            .get(&self.key(channel))
            .and_then(|members| members.get(&nick).copied())
    }
}
