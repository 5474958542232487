//! Transport boundary
//!
//! The transport that frames and ships messages lives outside this crate. It
//! plugs in through two traits: [`MessageBuilder`] turns a header and payload
//! into its own message type, and [`ControlMessage`] exposes both back on a
//! received message. [`Message`] and [`LoopbackBuilder`] are an in-process
//! implementation of that contract.

use bytes::Bytes;

use super::{MessageHeader, Payload};

/// Read access to a received message
pub trait ControlMessage {
    /// Header carrying type identifier and id
    fn header(&self) -> MessageHeader;

    /// Payload exactly as the transport delivered it
    fn payload(&self) -> &Payload;
}

/// Constructs transport messages from packed parts
pub trait MessageBuilder {
    /// Message type produced by this transport
    type Message: ControlMessage;

    /// Build a message ready to send
    fn build(&self, header: MessageHeader, payload: Payload) -> Self::Message;
}

/// Reference control message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message header
    header: MessageHeader,
    /// Message payload
    payload: Payload,
}

impl Message {
    /// Create a message from its parts
    #[must_use]
    pub fn new(header: MessageHeader, payload: Payload) -> Self {
        Self { header, payload }
    }

    /// Create a message carrying a raw byte string
    #[must_use]
    pub fn raw(header: MessageHeader, payload: impl Into<Bytes>) -> Self {
        Self::new(header, Payload::Raw(payload.into()))
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &MessageHeader {
        &self.header
    }

    /// Get payload
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Split into header and payload
    #[must_use]
    pub fn into_parts(self) -> (MessageHeader, Payload) {
        (self.header, self.payload)
    }
}

impl ControlMessage for Message {
    fn header(&self) -> MessageHeader {
        self.header
    }

    fn payload(&self) -> &Payload {
        &self.payload
    }
}

/// Builder producing [`Message`] values without any I/O
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackBuilder;

impl MessageBuilder for LoopbackBuilder {
    type Message = Message;

    fn build(&self, header: MessageHeader, payload: Payload) -> Message {
        Message::new(header, payload)
    }
}
