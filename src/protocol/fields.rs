//! Payload field types
//!
//! Callers work with a [`FieldMap`] whose values are scalars, arrays, or raw
//! bytes. The transport carries a [`Payload`]: either a raw byte string or a
//! flat set of named scalars ([`WireFields`]). Conversion between the two
//! happens only in the codec.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// Field holding a MAC address as a 6-element array
pub const MAC_FIELD: &str = "mac";

/// Number of octets in a MAC address
pub const MAC_LEN: usize = 6;

/// Field under which a raw payload is surfaced after unpacking
pub const VALUE_FIELD: &str = "value";

/// Flat scalar field set as carried on the wire
pub type WireFields = BTreeMap<String, u64>;

/// Caller-facing field value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Single integer
    Scalar(u64),
    /// Fixed-length integer array (only `mac` is expanded on the wire)
    Array(Vec<u64>),
    /// Raw byte string from a single-value payload
    Raw(Bytes),
}

impl FieldValue {
    /// Scalar value, if this is one
    #[must_use]
    pub fn as_scalar(&self) -> Option<u64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Array elements, if this is an array
    #[must_use]
    pub fn as_array(&self) -> Option<&[u64]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Raw bytes, if this is a raw value
    #[must_use]
    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            Self::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Scalar(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Scalar(u64::from(value))
    }
}

impl From<Vec<u64>> for FieldValue {
    fn from(values: Vec<u64>) -> Self {
        Self::Array(values)
    }
}

impl From<[u8; MAC_LEN]> for FieldValue {
    fn from(octets: [u8; MAC_LEN]) -> Self {
        Self::Array(octets.iter().copied().map(u64::from).collect())
    }
}

impl From<Bytes> for FieldValue {
    fn from(bytes: Bytes) -> Self {
        Self::Raw(bytes)
    }
}

/// Named payload fields as seen by callers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldMap(BTreeMap<String, FieldValue>);

impl FieldMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Get a scalar field
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    /// Get the collapsed MAC address, if present
    #[must_use]
    pub fn mac(&self) -> Option<&[u64]> {
        self.get(MAC_FIELD).and_then(FieldValue::as_array)
    }

    /// Remove a field
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Message payload as exposed by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    /// Single raw byte string (console data)
    Raw(Bytes),
    /// Named scalar fields
    Fields(WireFields),
}

impl Default for Payload {
    fn default() -> Self {
        Self::Fields(WireFields::new())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(bytes) => write!(f, "\"{}\"", bytes.escape_ascii()),
            Self::Fields(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
