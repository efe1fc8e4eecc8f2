//! Channel name syntax.
//!
//! Services only accept *global* channels as forward targets and registration
//! names; `&local` channels exist on one server and are never valid targets.

/// Longest channel name accepted, in bytes, prefix included.
pub const CHANNEL_NAME_MAX: usize = 50;

/// Extension trait for channel name syntax checks.
pub trait ChannelExt {
    /// Returns true for a network-wide channel name: `#`, `+` or `!`
    /// prefix, no space, comma or control characters, at most
    /// [`CHANNEL_NAME_MAX`] bytes.
    fn is_global_channel(&self) -> bool;

    /// Like [`ChannelExt::is_global_channel`] but also admits `&local`
    /// channels.
    fn is_channel_name(&self) -> bool;
}

fn valid_body(name: &str) -> bool {
    name.len() <= CHANNEL_NAME_MAX
        && !name
            .chars()
            .any(|c| c == ' ' || c == ',' || c.is_control())
}

impl ChannelExt for str {
    fn is_global_channel(&self) -> bool {
        matches!(self.as_bytes().first(), Some(b'#' | b'+' | b'!')) && valid_body(self)
    }

    fn is_channel_name(&self) -> bool {
        matches!(self.as_bytes().first(), Some(b'#' | b'+' | b'!' | b'&')) && valid_body(self)
    }
}

impl ChannelExt for String {
    fn is_global_channel(&self) -> bool {
        self.as_str().is_global_channel()
    }

    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
