//! Built-in dialects.
//!
//! `protocol/charybdis` is a standalone base; `protocol/juno` overlays it.

pub mod charybdis;
pub mod juno;

use crate::registry::DialectModule;

pub use charybdis::Charybdis;
pub use juno::Juno;

/// Every built-in dialect module, bases before the dialects that overlay them.
pub fn builtin_modules() -> Vec<Box<dyn DialectModule>> {
    vec![Box::new(Charybdis), Box::new(Juno)]
}
