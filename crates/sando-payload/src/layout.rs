use core::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};

use crate::{opcode, CompactAmount, Decoded, DecodedValue, PayloadError, Result, Value};

/// Wire type of a single payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One byte.
    Uint8,
    /// Four bytes, big-endian.
    Uint32,
    /// Thirty-two bytes, big-endian.
    Uint256,
    /// Twenty raw address bytes.
    Address,
    /// Thirty-two opaque bytes.
    Bytes32,
    /// Offset byte followed by four significant bytes, see [`CompactAmount`].
    CompactAmount,
}

impl FieldKind {
    /// Number of bytes the field occupies on the wire.
    pub const fn width(self) -> usize {
        match self {
            Self::Uint8 => 1,
            Self::Uint32 => 4,
            Self::Uint256 => 32,
            Self::Address => 20,
            Self::Bytes32 => 32,
            Self::CompactAmount => CompactAmount::WIDTH,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uint8 => "uint8",
            Self::Uint32 => "uint32",
            Self::Uint256 => "uint256",
            Self::Address => "address",
            Self::Bytes32 => "bytes32",
            Self::CompactAmount => "compact amount",
        })
    }
}

/// A named, fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name, used in errors and decoded output.
    pub name: &'static str,
    /// Wire type.
    pub kind: FieldKind,
}

impl Field {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    fn write(&self, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        match (self.kind, value) {
            (FieldKind::Address, Value::Address(bytes)) => {
                if bytes.len() != FieldKind::Address.width() {
                    return Err(PayloadError::InvalidAddress { field: self.name, len: bytes.len() });
                }
                out.extend_from_slice(bytes);
            }
            (FieldKind::Uint8 | FieldKind::Uint32 | FieldKind::Uint256, Value::Uint(bytes)) => {
                let width = self.kind.width();
                let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
                let digits = &bytes[first..];
                if digits.len() > width {
                    return Err(PayloadError::ValueOutOfRange { field: self.name, width });
                }
                out.resize(out.len() + width - digits.len(), 0);
                out.extend_from_slice(digits);
            }
            (FieldKind::Bytes32, Value::Word(word)) => out.extend_from_slice(word.as_slice()),
            (FieldKind::CompactAmount, Value::Compact(amount)) => {
                out.extend_from_slice(&amount.to_bytes());
            }
            (expected, got) => {
                return Err(PayloadError::TypeMismatch {
                    field: self.name,
                    expected,
                    got: got.kind_name(),
                })
            }
        }
        Ok(())
    }

    fn read(&self, chunk: &[u8]) -> Result<DecodedValue> {
        Ok(match self.kind {
            FieldKind::Address => DecodedValue::Address(Address::from_slice(chunk)),
            FieldKind::Uint8 | FieldKind::Uint32 | FieldKind::Uint256 => {
                DecodedValue::Uint(U256::from_be_slice(chunk))
            }
            FieldKind::Bytes32 => DecodedValue::Word(B256::from_slice(chunk)),
            FieldKind::CompactAmount => {
                let mut bytes = [0u8; CompactAmount::WIDTH];
                bytes.copy_from_slice(chunk);
                DecodedValue::Compact(CompactAmount::from_bytes(bytes)?)
            }
        })
    }
}

/// Byte layout of one payload: the opcode byte followed by `fields` in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Layout name.
    pub name: &'static str,
    /// Opcode the contract currently dispatches to this layout.
    pub opcode: u8,
    /// Fields after the opcode, in wire order.
    pub fields: &'static [Field],
}

/// `opcode | target:20 | sub_op:1 | param1:4 | sub_op2:1 | param2:4`, 31 bytes.
pub const FRONTRUN: Layout = Layout {
    name: "frontrun",
    opcode: opcode::FRONTRUN,
    fields: &[
        Field::new("target", FieldKind::Address),
        Field::new("sub_op", FieldKind::Uint8),
        Field::new("param1", FieldKind::Uint32),
        Field::new("sub_op2", FieldKind::Uint8),
        Field::new("param2", FieldKind::Uint32),
    ],
};

/// `opcode | amount:32`, 33 bytes.
pub const RECOVER: Layout = Layout {
    name: "recover",
    opcode: opcode::RECOVER,
    fields: &[Field::new("amount", FieldKind::Uint256)],
};

/// `opcode`, 1 byte.
pub const DESTROY: Layout = Layout { name: "destroy", opcode: opcode::DESTROY, fields: &[] };

const V2_FRONTRUN_MULTI_FIELDS: &[Field] = &[
    Field::new("pool", FieldKind::Address),
    Field::new("amount_in", FieldKind::CompactAmount),
    Field::new("amount_out", FieldKind::CompactAmount),
];

const V2_BACKRUN_MULTI_FIELDS: &[Field] = &[
    Field::new("pool", FieldKind::Address),
    Field::new("input_token", FieldKind::Address),
    Field::new("amount_in", FieldKind::CompactAmount),
    Field::new("amount_out", FieldKind::CompactAmount),
];

const V3_FRONTRUN_MULTI_FIELDS: &[Field] = &[
    Field::new("pool", FieldKind::Address),
    Field::new("pool_key", FieldKind::Bytes32),
    Field::new("amount_in", FieldKind::CompactAmount),
];

const V3_BACKRUN_MULTI_FIELDS: &[Field] = &[
    Field::new("pool", FieldKind::Address),
    Field::new("pool_key", FieldKind::Bytes32),
    Field::new("amount_in", FieldKind::CompactAmount),
    Field::new("input_token", FieldKind::Address),
];

/// `opcode | pool:20 | amount_in:5 | amount_out:5`, 31 bytes.
pub const V2_FRONTRUN_MULTI: Layout = Layout {
    name: "v2_frontrun_multi",
    opcode: opcode::V2_FRONTRUN_MULTI,
    fields: V2_FRONTRUN_MULTI_FIELDS,
};

/// `opcode | pool:20 | input_token:20 | amount_in:5 | amount_out:5`, 51 bytes.
pub const V2_BACKRUN_MULTI: Layout = Layout {
    name: "v2_backrun_multi",
    opcode: opcode::V2_BACKRUN_MULTI,
    fields: V2_BACKRUN_MULTI_FIELDS,
};

/// `opcode | pool:20 | pool_key:32 | amount_in:5`, 58 bytes. Wrapped asset is token0.
pub const V3_FRONTRUN0_MULTI: Layout = Layout {
    name: "v3_frontrun0_multi",
    opcode: opcode::V3_FRONTRUN0_MULTI,
    fields: V3_FRONTRUN_MULTI_FIELDS,
};

/// Same fields as [`V3_FRONTRUN0_MULTI`]. Wrapped asset is token1.
pub const V3_FRONTRUN1_MULTI: Layout = Layout {
    name: "v3_frontrun1_multi",
    opcode: opcode::V3_FRONTRUN1_MULTI,
    fields: V3_FRONTRUN_MULTI_FIELDS,
};

/// `opcode | pool:20 | pool_key:32 | amount_in:5 | input_token:20`, 78 bytes. Wrapped asset is
/// token0.
pub const V3_BACKRUN0_MULTI: Layout = Layout {
    name: "v3_backrun0_multi",
    opcode: opcode::V3_BACKRUN0_MULTI,
    fields: V3_BACKRUN_MULTI_FIELDS,
};

/// Same fields as [`V3_BACKRUN0_MULTI`]. Wrapped asset is token1.
pub const V3_BACKRUN1_MULTI: Layout = Layout {
    name: "v3_backrun1_multi",
    opcode: opcode::V3_BACKRUN1_MULTI,
    fields: V3_BACKRUN_MULTI_FIELDS,
};

/// Every layout the contract understands.
pub const LAYOUTS: [Layout; 9] = [
    FRONTRUN,
    RECOVER,
    DESTROY,
    V2_FRONTRUN_MULTI,
    V2_BACKRUN_MULTI,
    V3_FRONTRUN0_MULTI,
    V3_FRONTRUN1_MULTI,
    V3_BACKRUN0_MULTI,
    V3_BACKRUN1_MULTI,
];

impl Layout {
    /// Finds the layout registered for `opcode`.
    pub fn by_opcode(opcode: u8) -> Option<&'static Self> {
        LAYOUTS.iter().find(|layout| layout.opcode == opcode)
    }

    /// Finds a layout by name.
    pub fn by_name(name: &str) -> Option<&'static Self> {
        LAYOUTS.iter().find(|layout| layout.name == name)
    }

    /// Total encoded size, opcode included.
    pub const fn encoded_len(&self) -> usize {
        let mut len = 1;
        let mut i = 0;
        while i < self.fields.len() {
            len += self.fields[i].kind.width();
            i += 1;
        }
        len
    }

    /// Packs `opcode` and `values` according to this layout.
    pub fn encode(&self, opcode: u8, values: &[Value]) -> Result<Bytes> {
        if values.len() != self.fields.len() {
            return Err(PayloadError::ArityMismatch {
                layout: self.name,
                expected: self.fields.len(),
                got: values.len(),
            });
        }

        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(opcode);
        for (field, value) in self.fields.iter().zip(values) {
            field.write(value, &mut out)?;
        }
        debug_assert_eq!(out.len(), self.encoded_len());
        Ok(out.into())
    }

    /// Splits `data` back into its opcode and fields.
    ///
    /// The opcode byte itself is not checked against [`Layout::opcode`], mirroring the contract,
    /// which only looks at offsets once it has dispatched.
    pub fn decode(&self, data: &[u8]) -> Result<Decoded> {
        if data.len() != self.encoded_len() {
            return Err(PayloadError::LengthMismatch {
                layout: self.name,
                expected: self.encoded_len(),
                got: data.len(),
            });
        }

        let mut offset = 1;
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let end = offset + field.kind.width();
                let value = field.read(&data[offset..end])?;
                offset = end;
                Ok((field.name, value))
            })
            .collect::<Result<_>>()?;

        Ok(Decoded { layout: self.name, opcode: data[0], fields })
    }
}

/// Decodes `data` with the layout selected by its first byte.
pub fn decode(data: &[u8]) -> Result<Decoded> {
    let opcode = *data.first().ok_or(PayloadError::LengthMismatch {
        layout: "any",
        expected: 1,
        got: 0,
    })?;
    Layout::by_opcode(opcode).ok_or(PayloadError::UnknownOpcode(opcode))?.decode(data)
}
