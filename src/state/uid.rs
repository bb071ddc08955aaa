//! Connection identifiers.

use std::fmt;

/// Handle for one client connection.
///
/// Ids are allocated monotonically and never reused while the server runs,
/// so a stale id simply fails to resolve instead of aliasing a newer client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnId(pub usize);

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Generates connection ids.
///
/// Note: Counter starts at 2 because 0 and 1 are reserved for the listener
/// and the shutdown waker in the readiness registry.
#[derive(Debug)]
pub struct ConnIdGenerator {
    counter: usize,
}

/// Start counter at 2 to skip reserved readiness tokens.
pub const CONN_ID_START: usize = 2;

impl ConnIdGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self {
            counter: CONN_ID_START,
        }
    }

    /// Allocate the next unique id.
    pub fn next_id(&mut self) -> ConnId {
        let id = ConnId(self.counter);
        self.counter += 1;
        id
    }
}

impl Default for ConnIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
