//! Acceptance rules for parameterized channel modes.
//!
//! Validators are pure: they read the [`ValidationContext`] and the proposed
//! value and answer accept or reject. They never mutate host state, never
//! block, and never keep the context past their return.
//!
//! [`ValidationContext`]: crate::context::ValidationContext

mod forward;
mod throttle;

pub use forward::{check_forward, FORWARD_TARGET_MAX};
pub use throttle::{check_jointhrottle, parse_jointhrottle, JoinThrottle, THROTTLE_FIELD_MAX};
