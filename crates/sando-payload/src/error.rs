use crate::FieldKind;

/// Errors raised while packing or unpacking a payload.
///
/// These are local to the caller: a payload that fails to encode is never sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// A numeric value has more significant bytes than the field holds.
    #[error("field `{field}` does not fit in {width} byte(s)")]
    ValueOutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Declared width of the field in bytes
        width: usize,
    },

    /// An address field was given something other than 20 bytes.
    #[error("field `{field}` must be a 20-byte address, got {len} byte(s)")]
    InvalidAddress {
        /// Name of the offending field
        field: &'static str,
        /// Length of the supplied value
        len: usize,
    },

    /// A numeric value was given for an address field or the other way around.
    #[error("field `{field}` expects {expected}, got {got}")]
    TypeMismatch {
        /// Name of the offending field
        field: &'static str,
        /// Kind declared by the layout
        expected: FieldKind,
        /// Kind of the supplied value
        got: &'static str,
    },

    /// The number of values does not match the number of fields.
    #[error("layout `{layout}` takes {expected} field(s), got {got}")]
    ArityMismatch {
        /// Layout name
        layout: &'static str,
        /// Number of fields in the layout
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// Calldata handed to the decoder is not exactly as long as the layout.
    #[error("layout `{layout}` is {expected} byte(s) long, got {got}")]
    LengthMismatch {
        /// Layout name
        layout: &'static str,
        /// Encoded length of the layout
        expected: usize,
        /// Length of the supplied calldata
        got: usize,
    },

    /// A compact amount was aimed at a swap parameter whose offset does not fit in one byte.
    #[error("parameter index {0} is out of range for a compact amount")]
    ParamIndexOutOfRange(u8),

    /// A compact amount carries an offset that no parameter index and shift produce.
    #[error("invalid compact amount offset {0}")]
    InvalidCompactOffset(u8),

    /// No layout is registered for the opcode.
    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),
}

/// Result type for payload encoding and decoding.
pub type Result<T> = std::result::Result<T, PayloadError>;
