//! Channel name utilities.

/// Extension trait for checking if a string is a valid channel name.
pub trait ChannelExt {
    /// Check if this string is a valid channel name.
    ///
    /// Valid channel names:
    /// - Start with '#' or '&'
    /// - Have at least one character after the prefix
    /// - Do not contain space, comma, BEL (0x07), NUL or other control characters
    /// - Are at most 50 characters long
    fn is_channel_name(&self) -> bool;

    /// Check only the leading `#`/`&` that marks a channel target.
    fn has_channel_prefix(&self) -> bool;
}

/// Maximum channel name length, prefix included.
pub const CHANNEL_MAX_LEN: usize = 50;

impl ChannelExt for &str {
    fn is_channel_name(&self) -> bool {
        if !self.has_channel_prefix() {
            return false;
        }

        let len = self.chars().count();
        if !(2..=CHANNEL_MAX_LEN).contains(&len) {
            return false;
        }

        !self
            .chars()
            .skip(1)
            .any(|c| c == ' ' || c == ',' || c == '\x07' || c == '\0' || c.is_control())
    }

    fn has_channel_prefix(&self) -> bool {
        self.starts_with('#') || self.starts_with('&')
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }

    fn has_channel_prefix(&self) -> bool {
        self.as_str().has_channel_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_channels() {
        assert!("#channel".is_channel_name());
        assert!("&local".is_channel_name());
        assert!("#a".is_channel_name());
    }

    #[test]
    fn test_invalid_channels() {
        assert!(!"channel".is_channel_name()); // no prefix
        assert!(!"+modeless".is_channel_name()); // unsupported prefix
        assert!(!"#".is_channel_name()); // prefix only
        assert!(!"#chan\x07".is_channel_name()); // bell
        assert!(!"".is_channel_name());
        assert!(!format!("#{}", "x".repeat(50)).is_channel_name());
    }
}
