//! Inbound tokenizing and outbound message types.

mod borrowed;
mod types;

pub use self::borrowed::MessageRef;
pub use self::types::Message;
