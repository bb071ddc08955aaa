//! Nickname validation utilities.

/// Extension trait for checking if a string is an acceptable nickname.
pub trait NickExt {
    /// Check if this string is a valid nickname for this server.
    ///
    /// Valid nicknames:
    /// - Length: 1 to [`NICK_MAX_LEN`] characters
    /// - First character: ASCII letter
    /// - Subsequent characters: letter, digit, or one of ``-[]\`^{}|``
    ///
    /// # Examples
    ///
    /// ```
    /// use ircserv_proto::NickExt;
    ///
    /// assert!("alice".is_valid_nick());
    /// assert!("bob[away]".is_valid_nick());
    ///
    /// assert!(!"9lives".is_valid_nick());    // Can't start with digit
    /// assert!(!"_under".is_valid_nick());    // Nor with a special
    /// assert!(!"".is_valid_nick());
    /// assert!(!"waytoolong".is_valid_nick()); // Ten characters
    /// ```
    fn is_valid_nick(&self) -> bool;
}

/// Maximum nickname length.
pub const NICK_MAX_LEN: usize = 9;

/// Check if a character is a "special" character allowed after the first.
#[inline]
fn is_special(c: char) -> bool {
    matches!(c, '-' | '[' | ']' | '\\' | '`' | '^' | '{' | '}' | '|')
}

impl NickExt for &str {
    fn is_valid_nick(&self) -> bool {
        if self.is_empty() || self.len() > NICK_MAX_LEN {
            return false;
        }

        let mut chars = self.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return false,
        };
        if !first.is_ascii_alphabetic() {
            return false;
        }

        chars.all(|c| c.is_ascii_alphanumeric() || is_special(c))
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert!("a".is_valid_nick());
        assert!("abcdefghi".is_valid_nick());
        assert!(!"abcdefghij".is_valid_nick());
    }

    #[test]
    fn test_specials_after_first() {
        for nick in ["a-b", "a[b]", "a\\b", "a`b", "a^b", "a{b}", "a|b"] {
            assert!(nick.is_valid_nick(), "{nick} should be valid");
        }
        assert!(!"a_b".is_valid_nick());
        assert!(!"a.b".is_valid_nick());
        assert!(!"[ab]".is_valid_nick());
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(!"ålice".is_valid_nick());
        assert!(!"al ice".is_valid_nick());
    }
}
