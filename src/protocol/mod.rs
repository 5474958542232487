//! Control message protocol core
//!
//! This module provides the type registry, id allocation, payload codec and
//! the boundary to the transport that carries messages.

mod codec;
mod error;
mod fields;
mod header;
mod id;
mod message;
mod printer;
mod registry;
pub mod types;

pub use codec::{
    Codec, CodecConfig, MacPolicy, PackedMessage, collapse_fields, expand_fields,
};
pub use error::{Error, Result};
pub use fields::{FieldMap, FieldValue, MAC_FIELD, MAC_LEN, Payload, VALUE_FIELD, WireFields};
pub use header::MessageHeader;
pub use id::{IdAllocator, MessageId};
pub use message::{ControlMessage, LoopbackBuilder, Message, MessageBuilder};
pub use printer::{print_message, print_message_with};
pub use registry::{
    BLKIF_FORMATS, CONSOLE_FORMATS, NETIF_FORMATS, Registry, SHUTDOWN_FORMATS, SubsystemTable,
};
pub use types::{Subsystem, TypeId};
