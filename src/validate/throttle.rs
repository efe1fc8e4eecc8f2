//! `+j <count>:<seconds>` join throttle values.

use tracing::trace;

/// Longest accepted textual length of either field.
pub const THROTTLE_FIELD_MAX: usize = 10;

/// A parsed join throttle: at most `joins` joins per `seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinThrottle {
    /// Joins allowed per window.
    pub joins: u64,
    /// Window length.
    pub seconds: u64,
}

/// Parse a `<count>:<seconds>` value.
///
/// Every character must be a decimal digit except exactly one colon. Both
/// fields must be non-empty, at most [`THROTTLE_FIELD_MAX`] characters and
/// non-zero.
pub fn parse_jointhrottle(value: &str) -> Option<JoinThrottle> {
    let mut colon = None;

    for (pos, c) in value.char_indices() {
        match c {
            ':' if colon.is_some() => {
                trace!(value, "join throttle has a second colon");
                return None;
            }
            ':' => colon = Some(pos),
            '0'..='9' => {}
            _ => {
                trace!(value, bad = %c, "join throttle has a non-digit");
                return None;
            }
        }
    }

    let Some(colon) = colon else {
        trace!(value, "join throttle has no colon");
        return None;
    };
    let (joins, seconds) = (&value[..colon], &value[colon + 1..]);

    let joins = parse_field(joins)?;
    let seconds = parse_field(seconds)?;
    Some(JoinThrottle { joins, seconds })
}

fn parse_field(field: &str) -> Option<u64> {
    if field.is_empty() || field.len() > THROTTLE_FIELD_MAX {
        trace!(field, "join throttle field empty or too long");
        return None;
    }
    // Ten digits always fit in a u64; zero is as meaningless as garbage.
    match field.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Validator for mode `j`.
pub fn check_jointhrottle(value: &str) -> bool {
    parse_jointhrottle(value).is_some()
}
