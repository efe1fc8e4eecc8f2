//! # slirc-dialects
//!
//! Protocol-capability translation for IRC services: maps each ircd
//! dialect's mode letters and status prefixes onto canonical flags, and
//! validates parameterized modes against live channel state.
//!
//! A dialect is an immutable [`ProtocolDescriptor`], built once when its
//! module registers and shared by `Arc` afterwards. Derived dialects are
//! overlays on a base descriptor and are validated again after merging.
//!
//! ```rust
//! use slirc_dialects::context::{NoLookup, ValidationContext};
//! use slirc_dialects::dialects::builtin_modules;
//! use slirc_dialects::registry::ProtocolRegistry;
//! use slirc_dialects::translate::ModeTranslator;
//!
//! let mut registry = ProtocolRegistry::new();
//! for module in builtin_modules() {
//!     registry.register(module.as_ref()).expect("built-in dialect");
//! }
//!
//! let juno = registry.get("juno").expect("registered");
//! let ctx = ValidationContext::internal(&NoLookup);
//! let t = ModeTranslator::new(&juno).channel("+ntj", &["5:10"], &ctx);
//! assert!(t.rejected.is_empty());
//! assert_eq!(t.changes.len(), 3);
//! ```

pub mod config;
pub mod context;
pub mod descriptor;
pub mod dialects;
pub mod error;
pub mod extmode;
pub mod registry;
pub mod state;
pub mod telemetry;
pub mod translate;
pub mod validate;

pub use descriptor::{DialectCaps, IrcdInfo, ProtocolDescriptor, ProtocolType};
pub use error::{DialectError, ModeRejection};
pub use registry::{DialectModule, ProtocolRegistry};
pub use translate::{ModeChange, ModeTranslator, Translation};
