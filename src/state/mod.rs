//! In-memory host state.
//!
//! Holds the channels, registrations and memberships a validator may look
//! up. The services host normally supplies its own [`ChannelLookup`]; this
//! snapshot backs the `modecheck` tool and the tests.
//!
//! [`ChannelLookup`]: crate::context::ChannelLookup

mod dashmap_ext;
mod seed;
mod snapshot;

pub use dashmap_ext::DashMapExt;
pub use seed::SeedRejection;
pub use snapshot::Snapshot;
