//! Channel-related types and state.

use std::collections::HashSet;

use super::ConnId;

/// A named room.
///
/// Members are kept in join order so NAMES output is stable. Operators are
/// always a subset of members: every path that drops a member also drops its
/// operator status.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub topic: Option<String>,
    pub key: Option<String>,
    /// Member cap; 0 means unlimited.
    pub limit: usize,
    pub invite_only: bool,
    pub topic_restricted: bool,
    members: Vec<ConnId>,
    operators: HashSet<ConnId>,
    /// Nicknames holding a one-time invite.
    invited: HashSet<String>,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: None,
            key: None,
            limit: 0,
            invite_only: false,
            topic_restricted: false,
            members: Vec::new(),
            operators: HashSet::new(),
            invited: HashSet::new(),
        }
    }

    /// Add a member, consuming any invite held under `nick`.
    ///
    /// A channel without operators hands operator status to whoever joins,
    /// which is how a channel's creator becomes its first operator.
    pub fn add_member(&mut self, id: ConnId, nick: &str) {
        if self.is_member(id) {
            return;
        }
        self.invited.remove(nick);
        self.members.push(id);
        if self.operators.is_empty() {
            self.operators.insert(id);
        }
    }

    /// Remove a member along with its operator status.
    pub fn remove_member(&mut self, id: ConnId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| *m != id);
        self.operators.remove(&id);
        self.members.len() != before
    }

    #[inline]
    pub fn is_member(&self, id: ConnId) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn is_operator(&self, id: ConnId) -> bool {
        self.operators.contains(&id)
    }

    /// Grant operator status. Ignored for non-members.
    pub fn add_operator(&mut self, id: ConnId) -> bool {
        self.is_member(id) && self.operators.insert(id)
    }

    pub fn remove_operator(&mut self, id: ConnId) -> bool {
        self.operators.remove(&id)
    }

    pub fn members(&self) -> &[ConnId] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn invite(&mut self, nick: &str) {
        self.invited.insert(nick.to_string());
    }

    pub fn is_invited(&self, nick: &str) -> bool {
        self.invited.contains(nick)
    }

    /// Whether one more member would exceed the limit.
    pub fn is_full(&self) -> bool {
        self.limit > 0 && self.members.len() >= self.limit
    }

    /// Mode flags followed by their parameters, ready for 324.
    ///
    /// Flags are listed in `itkl` order; the key precedes the limit.
    pub fn mode_params(&self) -> Vec<String> {
        let mut flags = String::from("+");
        let mut params = Vec::new();
        if self.invite_only {
            flags.push('i');
        }
        if self.topic_restricted {
            flags.push('t');
        }
        if let Some(ref key) = self.key {
            flags.push('k');
            params.push(key.clone());
        }
        if self.limit > 0 {
            flags.push('l');
            params.push(self.limit.to_string());
        }
        let mut out = vec![flags];
        out.extend(params);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_member_is_operator() {
        let mut chan = Channel::new("#rust");
        chan.add_member(ConnId(2), "alice");
        chan.add_member(ConnId(3), "bob");
        assert!(chan.is_operator(ConnId(2)));
        assert!(!chan.is_operator(ConnId(3)));
        assert_eq!(chan.members(), &[ConnId(2), ConnId(3)]);
    }

    #[test]
    fn test_removal_drops_operator_status() {
        let mut chan = Channel::new("#rust");
        chan.add_member(ConnId(2), "alice");
        chan.add_member(ConnId(3), "bob");
        assert!(chan.remove_member(ConnId(2)));
        assert!(!chan.is_operator(ConnId(2)));
        assert!(!chan.remove_member(ConnId(2)));

        // With no operators left, the next joiner is promoted.
        chan.add_member(ConnId(4), "carol");
        assert!(chan.is_operator(ConnId(4)));
        assert!(!chan.is_operator(ConnId(3)));
    }

    #[test]
    fn test_invite_is_consumed_on_join() {
        let mut chan = Channel::new("#rust");
        chan.add_member(ConnId(2), "alice");
        chan.invite("bob");
        assert!(chan.is_invited("bob"));
        chan.add_member(ConnId(3), "bob");
        assert!(!chan.is_invited("bob"));
    }

    #[test]
    fn test_operator_requires_membership() {
        let mut chan = Channel::new("#rust");
        assert!(!chan.add_operator(ConnId(5)));
        chan.add_member(ConnId(5), "eve");
        assert!(!chan.add_operator(ConnId(5))); // already op as first member
        assert!(chan.remove_operator(ConnId(5)));
        assert!(chan.add_operator(ConnId(5)));
    }

    #[test]
    fn test_mode_params() {
        let mut chan = Channel::new("#rust");
        assert_eq!(chan.mode_params(), vec!["+"]);

        chan.invite_only = true;
        chan.topic_restricted = true;
        chan.key = Some("secret".into());
        chan.limit = 5;
        assert_eq!(chan.mode_params(), vec!["+itkl", "secret", "5"]);
    }

    #[test]
    fn test_limit() {
        let mut chan = Channel::new("#rust");
        chan.limit = 1;
        assert!(!chan.is_full());
        chan.add_member(ConnId(2), "alice");
        assert!(chan.is_full());
        chan.limit = 0;
        assert!(!chan.is_full());
    }
}
