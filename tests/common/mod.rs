//! Integration test common infrastructure.
//!
//! Provides registered dialects and a seeded in-memory network for
//! translation and validation tests.

#![allow(dead_code)]

use std::sync::Arc;

use slirc_dialects::config::Config;
use slirc_dialects::context::{AccountRef, ChannelLookup, UserRef, ValidationContext};
use slirc_dialects::dialects::builtin_modules;
use slirc_dialects::state::Snapshot;
use slirc_dialects::{ModeRejection, ModeTranslator, ProtocolDescriptor, ProtocolRegistry};

/// Every built-in dialect, registered in order.
pub fn registry() -> ProtocolRegistry {
    let mut registry = ProtocolRegistry::new();
    for module in builtin_modules() {
        registry
            .register(module.as_ref())
            .expect("built-in dialect registers");
    }
    registry
}

pub fn juno() -> Arc<ProtocolDescriptor> {
    registry().get("juno").expect("juno registered")
}

pub fn charybdis() -> Arc<ProtocolDescriptor> {
    registry().get("charybdis").expect("charybdis registered")
}

/// Network layout shared by the validation tests.
///
/// - `#target`: live, `~olivia @alice %henry +bob`, registered, carol has `s`
/// - `#open`: live, free forward target
/// - `#closed`: live, free forward set then cleared in the same string
/// - `#lockedopen`: registration only, free forward target in its mlock
/// - `#dormant`: registration only, carol has `s`
/// - `#source`: where the modes are being set
pub const NETWORK: &str = r##"
[dialect]
name = "juno"

[[channel]]
name = "#target"
modes = "+nt"
members = ["~olivia", "@alice", "%henry", "+bob"]
access = [{ account = "carol", flags = "+s" }, { account = "dave", flags = "+vV" }]

[[channel]]
name = "#open"
modes = "+ntF"

[[channel]]
name = "#closed"
modes = "+ntF-F"

[[channel]]
name = "#lockedopen"
offline = true
mlock = "+ntF"

[[channel]]
name = "#dormant"
offline = true
mlock = "+nt"
access = [{ account = "carol", flags = "s" }]

[[channel]]
name = "#source"
modes = "+nt"
members = ["@alice", "eve"]
"##;

/// Seed [`NETWORK`] with `descriptor`'s mode letters and prefixes.
pub fn network(descriptor: &ProtocolDescriptor) -> Snapshot {
    let config = Config::parse(NETWORK).expect("network config parses");
    let snapshot = Snapshot::new(config.dialect.casemapping);
    let rejected = snapshot.seed(&config.channels, &ModeTranslator::new(descriptor));
    assert!(rejected.is_empty(), "seed rejected: {:?}", rejected);
    snapshot
}

/// Who is setting the mode.
#[derive(Debug, Clone, Copy)]
pub enum Actor<'a> {
    Internal,
    User(&'a str),
    /// Nick, account.
    LoggedIn(&'a str, &'a str),
    Account(&'a str),
}

/// Set `+<letter> <value>` on `#source` and return what was rejected.
pub fn set_ext(
    descriptor: &ProtocolDescriptor,
    snapshot: &Snapshot,
    actor: Actor<'_>,
    letter: char,
    value: &str,
) -> Vec<ModeRejection> {
    let channel = snapshot.channel("#source");
    let registration = snapshot.registration("#source");
    let user;
    let account;
    let ctx = match actor {
        Actor::Internal => ValidationContext::internal(snapshot),
        Actor::User(nick) => {
            user = UserRef::new(nick);
            ValidationContext::for_user(snapshot, &user)
        }
        Actor::LoggedIn(nick, name) => {
            user = UserRef::new(nick).logged_in(name);
            ValidationContext::for_user(snapshot, &user)
        }
        Actor::Account(name) => {
            account = AccountRef::new(name);
            ValidationContext::for_account(snapshot, &account)
        }
    }
    .in_channel(channel.as_ref(), registration.as_ref());

    let modes = format!("+{}", letter);
    ModeTranslator::new(descriptor)
        .channel(&modes, &[value], &ctx)
        .rejected
}

/// Returns true if `+<letter> <value>` is accepted.
pub fn accepts(
    descriptor: &ProtocolDescriptor,
    snapshot: &Snapshot,
    actor: Actor<'_>,
    letter: char,
    value: &str,
) -> bool {
    set_ext(descriptor, snapshot, actor, letter, value).is_empty()
}
