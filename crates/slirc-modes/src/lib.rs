//! # slirc-modes
//!
//! Wire-level mode vocabulary shared by every ircd dialect the services side
//! speaks to.
//!
//! ## Features
//!
//! - Canonical channel, user and status flag sets over a 64-bit namespace
//! - Validated letter ↔ flag tables with overlay composition
//! - Ordered status tables mapping privilege levels to letters and prefixes
//! - Channel name syntax and runtime-selected case mapping
//! - Sign-aware mode string scanning
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_modes::{ChannelModes, ModeTable};
//!
//! let table = ModeTable::new([
//!     ('n', ChannelModes::NO_EXTERNAL),
//!     ('t', ChannelModes::TOPIC),
//! ])
//! .expect("valid table");
//!
//! assert_eq!(table.flag_for('t'), Some(ChannelModes::TOPIC));
//! assert_eq!(table.encode(ChannelModes::NO_EXTERNAL | ChannelModes::TOPIC), "nt");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod chan;
pub mod error;
pub mod flags;
pub mod status;
pub mod table;
pub mod wire;

pub use self::casemap::Casemapping;
pub use self::chan::{ChannelExt, CHANNEL_NAME_MAX};
pub use self::error::TableError;
pub use self::flags::{ChannelModes, ModeFlag, StatusModes, UserModes};
pub use self::status::{PrefixTable, StatusEntry, StatusLevel};
pub use self::table::{Decoded, ModeEntry, ModeTable, TableOverlay};
pub use self::wire::{ModeString, Sign};
