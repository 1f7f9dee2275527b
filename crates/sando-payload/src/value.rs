use core::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::CompactAmount;

/// An untyped field value handed to [`Layout::encode`](crate::Layout::encode).
///
/// Numbers are carried as big-endian bytes of arbitrary length so that values wider than any
/// field (including values of 2^256 and above) can be represented and rejected instead of being
/// silently truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unsigned integer, big-endian, leading zeros allowed.
    Uint(Bytes),
    /// Raw address bytes. Must be exactly 20 bytes long to encode.
    Address(Bytes),
    /// An opaque 32-byte word, such as a pool key hash.
    Word(B256),
    /// An amount already reduced to its compact form.
    Compact(CompactAmount),
}

impl Value {
    /// Creates an unsigned value from big-endian bytes of any length.
    pub fn uint_be(bytes: impl Into<Bytes>) -> Self {
        Self::Uint(bytes.into())
    }

    /// Creates an address value from raw bytes without checking the length.
    pub fn address_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::Address(bytes.into())
    }

    pub(crate) const fn kind_name(&self) -> &'static str {
        match self {
            Self::Uint(_) => "an unsigned integer",
            Self::Address(_) => "an address",
            Self::Word(_) => "a 32-byte word",
            Self::Compact(_) => "a compact amount",
        }
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Uint(Bytes::copy_from_slice(&[value]))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint(Bytes::copy_from_slice(&value.to_be_bytes()))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(Bytes::copy_from_slice(&value.to_be_bytes()))
    }
}

impl From<U256> for Value {
    fn from(value: U256) -> Self {
        Self::Uint(Bytes::copy_from_slice(&value.to_be_bytes::<32>()))
    }
}

impl From<Address> for Value {
    fn from(value: Address) -> Self {
        Self::Address(Bytes::copy_from_slice(value.as_slice()))
    }
}

impl From<B256> for Value {
    fn from(value: B256) -> Self {
        Self::Word(value)
    }
}

impl From<CompactAmount> for Value {
    fn from(value: CompactAmount) -> Self {
        Self::Compact(value)
    }
}

/// A field read back out of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedValue {
    /// Any unsigned field, widened to 256 bits.
    Uint(U256),
    /// An address field.
    Address(Address),
    /// A 32-byte word field.
    Word(B256),
    /// A compact amount field.
    Compact(CompactAmount),
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(value) => write!(f, "{value}"),
            Self::Address(address) => write!(f, "{address}"),
            Self::Word(word) => write!(f, "{word}"),
            Self::Compact(amount) => write!(f, "{amount}"),
        }
    }
}

/// A payload split back into its opcode and named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Name of the layout that matched.
    pub layout: &'static str,
    /// The leading opcode byte.
    pub opcode: u8,
    /// Fields in wire order.
    pub fields: Vec<(&'static str, DecodedValue)>,
}

impl Decoded {
    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<DecodedValue> {
        self.fields.iter().find(|(field, _)| *field == name).map(|(_, value)| *value)
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (opcode {})", self.layout, self.opcode)?;
        for (name, value) in &self.fields {
            write!(f, "\n  {name}: {value}")?;
        }
        Ok(())
    }
}
