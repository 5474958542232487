//! Control message payload codec (pack/unpack)
//!
//! Packing resolves a type name, allocates an id and flattens the caller's
//! [`FieldMap`] into [`WireFields`]. Unpacking reverses the flattening. The
//! only field with a special wire shape is `mac`, sent as six scalars named
//! `mac[0]` through `mac[5]`.

use bytes::Bytes;
use tracing::debug;

use super::fields::{MAC_FIELD, MAC_LEN, VALUE_FIELD};
use super::{
    ControlMessage, Error, FieldMap, FieldValue, IdAllocator, MessageBuilder, MessageHeader,
    Payload, Registry, Result, WireFields,
};

/// Handling of `mac[i]` wire fields on unpack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MacPolicy {
    /// Missing octets read as 0 and malformed `mac[..]` keys pass through
    #[default]
    Lenient,
    /// All six octets must be present and every `mac[..]` key well formed
    Strict,
}

/// Codec configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecConfig {
    mac_policy: MacPolicy,
}

impl CodecConfig {
    /// Default configuration (lenient MAC handling)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how `mac[i]` fields are collapsed
    #[must_use]
    pub const fn with_mac_policy(mut self, policy: MacPolicy) -> Self {
        self.mac_policy = policy;
        self
    }

    /// Configured MAC policy
    #[must_use]
    pub const fn mac_policy(&self) -> MacPolicy {
        self.mac_policy
    }
}

/// Header and payload produced by [`Codec::pack`], ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedMessage {
    /// Resolved identifier and freshly allocated id
    pub header: MessageHeader,
    /// Wire payload
    pub payload: Payload,
}

impl PackedMessage {
    /// Hand the packed parts to a transport
    pub fn build<B: MessageBuilder>(self, builder: &B) -> B::Message {
        builder.build(self.header, self.payload)
    }
}

/// Packs and unpacks control message payloads
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    registry: &'a Registry,
    ids: &'a IdAllocator,
    config: CodecConfig,
}

impl Codec<'static> {
    /// Codec over the process-wide registry and id allocator
    #[must_use]
    pub fn global() -> Self {
        Self::new(Registry::global(), IdAllocator::global())
    }
}

impl<'a> Codec<'a> {
    /// Create a codec with default configuration
    #[must_use]
    pub fn new(registry: &'a Registry, ids: &'a IdAllocator) -> Self {
        Self::with_config(registry, ids, CodecConfig::default())
    }

    /// Create a codec with explicit configuration
    #[must_use]
    pub fn with_config(registry: &'a Registry, ids: &'a IdAllocator, config: CodecConfig) -> Self {
        Self {
            registry,
            ids,
            config,
        }
    }

    /// Registry used to resolve type names
    #[must_use]
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Pack a structured message.
    ///
    /// Fails without consuming an id if the name is unknown or a field
    /// cannot be expressed on the wire.
    pub fn pack(&self, type_name: &str, fields: &FieldMap) -> Result<PackedMessage> {
        let type_id = self.registry.lookup(type_name)?;
        let wire = expand_fields(fields)?;
        let id = self.ids.next_id();
        debug!(id, type_name, %type_id, fields = wire.len(), "packed message");

        Ok(PackedMessage {
            header: MessageHeader::new(type_id, id),
            payload: Payload::Fields(wire),
        })
    }

    /// Pack a single raw byte string (console data)
    pub fn pack_raw(&self, type_name: &str, value: impl Into<Bytes>) -> Result<PackedMessage> {
        let type_id = self.registry.lookup(type_name)?;
        let value = value.into();
        let id = self.ids.next_id();
        debug!(id, type_name, %type_id, len = value.len(), "packed raw message");

        Ok(PackedMessage {
            header: MessageHeader::new(type_id, id),
            payload: Payload::Raw(value),
        })
    }

    /// Unpack a payload.
    ///
    /// `type_name` is only used for diagnostics. A raw payload comes back as
    /// a single `value` field whatever the type.
    pub fn unpack(&self, type_name: &str, payload: &Payload) -> Result<FieldMap> {
        let fields = match payload {
            Payload::Raw(bytes) => FieldMap::new().with(VALUE_FIELD, bytes.clone()),
            Payload::Fields(wire) => collapse_fields(wire, self.config.mac_policy)?,
        };
        debug!(type_name, fields = fields.len(), "unpacked message");
        Ok(fields)
    }

    /// Unpack a received message, naming it from its header for diagnostics
    pub fn unpack_message<M: ControlMessage + ?Sized>(&self, message: &M) -> Result<FieldMap> {
        let header = message.header();
        let type_name = self
            .registry
            .reverse_lookup(header.type_id())
            .unwrap_or("<unknown>");
        debug!(id = header.id(), type_name, "unpacking message");
        self.unpack(type_name, message.payload())
    }
}

/// Flatten caller fields into wire fields, expanding `mac` into `mac[0]`..`mac[5]`
pub fn expand_fields(fields: &FieldMap) -> Result<WireFields> {
    let mut wire = WireFields::new();
    for (key, value) in fields.iter() {
        if key == MAC_FIELD {
            let octets = match value {
                FieldValue::Array(octets) if octets.len() == MAC_LEN => octets,
                FieldValue::Array(octets) => {
                    return Err(Error::MalformedMacField { len: octets.len() });
                }
                _ => return Err(Error::MalformedMacField { len: 0 }),
            };
            for (i, octet) in octets.iter().enumerate() {
                wire.insert(mac_key(i), *octet);
            }
            continue;
        }

        match value {
            FieldValue::Scalar(scalar) => {
                wire.insert(key.to_owned(), *scalar);
            }
            FieldValue::Array(_) | FieldValue::Raw(_) => {
                return Err(Error::NonScalarField {
                    key: key.to_owned(),
                });
            }
        }
    }
    Ok(wire)
}

/// Rebuild caller fields from wire fields, collapsing `mac[i]` into `mac`
pub fn collapse_fields(wire: &WireFields, policy: MacPolicy) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    let mut mac = [0u64; MAC_LEN];
    let mut seen = [false; MAC_LEN];

    for (key, &value) in wire {
        match parse_mac_key(key) {
            MacKey::Octet(i) => {
                mac[i] = value;
                seen[i] = true;
            }
            MacKey::Malformed if policy == MacPolicy::Strict => {
                return Err(Error::InvalidMacIndex { key: key.clone() });
            }
            MacKey::Malformed | MacKey::Other => {
                fields.insert(key.as_str(), value);
            }
        }
    }

    if seen.iter().any(|&present| present) {
        if policy == MacPolicy::Strict {
            if let Some(index) = seen.iter().position(|&present| !present) {
                return Err(Error::MissingMacOctet { index });
            }
        }
        fields.insert(MAC_FIELD, mac.to_vec());
    }

    Ok(fields)
}

fn mac_key(index: usize) -> String {
    format!("{MAC_FIELD}[{index}]")
}

enum MacKey {
    Octet(usize),
    Malformed,
    Other,
}

fn parse_mac_key(key: &str) -> MacKey {
    let Some(rest) = key
        .strip_prefix(MAC_FIELD)
        .and_then(|rest| rest.strip_prefix('['))
    else {
        return MacKey::Other;
    };

    // Only the canonical spelling mac[0]..mac[5] names an octet
    match rest.as_bytes() {
        [digit @ b'0'..=b'5', b']'] => MacKey::Octet(usize::from(digit - b'0')),
        _ => MacKey::Malformed,
    }
}
