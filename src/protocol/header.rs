//! Control message header
//!
//! The header identifies a message shape and correlates replies with
//! requests. How it is laid out on the wire is up to the transport.

use super::id::MessageId;
use super::types::TypeId;

/// Control message header: type identifier plus correlation id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageHeader {
    type_id: TypeId,
    id: MessageId,
}

impl MessageHeader {
    /// Create a new message header
    #[must_use]
    pub const fn new(type_id: TypeId, id: MessageId) -> Self {
        Self { type_id, id }
    }

    /// Get type identifier
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Get subsystem number
    #[must_use]
    pub const fn major(&self) -> u8 {
        self.type_id.major()
    }

    /// Get operation number
    #[must_use]
    pub const fn minor(&self) -> u8 {
        self.type_id.minor()
    }

    /// Get message ID
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }
}
