//! Control messages between a hypervisor control plane and its device
//! backends and frontends (block, network, console, shutdown).
//!
//! This library maps symbolic message type names to their wire
//! `(major, minor)` identifiers, allocates correlation ids, and converts
//! payload fields between the caller's view and the flat wire field set.
//! Framing and delivery belong to the transport, which plugs in through
//! [`MessageBuilder`] and [`ControlMessage`].
//!
//! # Quick Start
//!
//! ```rust
//! use ctrlmsg::{Codec, FieldMap, LoopbackBuilder, Message};
//!
//! let codec = Codec::global();
//!
//! // Pack a message; `mac` goes out as mac[0]..mac[5]
//! let fields = FieldMap::new()
//!     .with("domid", 1u32)
//!     .with("mac", [0xaa_u8, 0x00, 0x00, 0x12, 0x34, 0x56]);
//! let msg: Message = codec.pack("netif_be_create_t", &fields)?.build(&LoopbackBuilder);
//!
//! // Unpack it on the other side
//! let received = codec.unpack_message(&msg)?;
//! assert_eq!(received, fields);
//! # Ok::<(), ctrlmsg::Error>(())
//! ```
//!
//! # Logging
//!
//! Pack and unpack emit `tracing` events at debug level. Nothing is printed
//! unless the host process installs a subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    Codec, CodecConfig, ControlMessage, Error, FieldMap, FieldValue, IdAllocator, LoopbackBuilder,
    MacPolicy, Message, MessageBuilder, MessageHeader, MessageId, PackedMessage, Payload,
    Registry, Result, Subsystem, TypeId, WireFields, print_message,
};

/// Control message protocol version
pub const VERSION: &str = "1.0.0";
