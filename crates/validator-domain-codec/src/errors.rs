use thiserror::Error;

/// Errors produced while encoding or decoding keys and field sets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input was not valid base58 in the validator alphabet.
    #[error("invalid base58: {0}")]
    Base58(String),
    /// Decoded address payload had the wrong length.
    #[error("address payload is {0} bytes, expected 34")]
    AddressLength(usize),
    /// Address version byte did not denote a node public key.
    #[error("unexpected address version 0x{0:02X}")]
    AddressVersion(u8),
    /// Address checksum did not match its payload.
    #[error("address checksum mismatch")]
    Checksum,
    /// Raw key bytes did not form a 33-byte typed public key.
    #[error("invalid public key: {0}")]
    InvalidKey(String),
    /// Input ended before a complete field could be read.
    #[error("unexpected end of input at offset {offset}")]
    Truncated {
        /// Byte offset where more input was expected.
        offset: usize,
    },
    /// Field header referenced a type code the codec cannot size.
    #[error("unsupported type code {type_code} at offset {offset}")]
    UnsupportedType {
        /// Type code read from the field header.
        type_code: u16,
        /// Byte offset of the field header.
        offset: usize,
    },
    /// Field header used a longer form than its codes require.
    #[error("non-canonical field header at offset {0}")]
    NonCanonicalHeader(usize),
    /// A field appeared twice or out of canonical order.
    #[error("field ({type_code}, {field_code}) is duplicated or out of order")]
    FieldOrder {
        /// Type code of the offending field.
        type_code: u16,
        /// Field code of the offending field.
        field_code: u16,
    },
    /// A variable-length value exceeded the encodable maximum.
    #[error("variable-length value of {0} bytes is too large")]
    LengthOverflow(usize),
    /// A length prefix started with a byte no prefix form uses.
    #[error("invalid length prefix at offset {0}")]
    InvalidLengthPrefix(usize),
    /// A type or field code cannot be expressed in a field header.
    #[error("field ({type_code}, {field_code}) has a code outside 1..=255")]
    FieldCodeRange {
        /// Type code of the field.
        type_code: u16,
        /// Field code of the field.
        field_code: u16,
    },
    /// A value's type did not match the type code of its field.
    #[error("field ({type_code}, {field_code}) cannot hold a value of type code {value_type}")]
    TypeMismatch {
        /// Type code of the field.
        type_code: u16,
        /// Field code of the field.
        field_code: u16,
        /// Type code of the supplied value.
        value_type: u16,
    },
    /// A fixed-width value had the wrong size for its type.
    #[error("value for type code {type_code} must be {expected} bytes, got {actual}")]
    WidthMismatch {
        /// Type code of the value.
        type_code: u16,
        /// Width the type requires.
        expected: usize,
        /// Width that was supplied.
        actual: usize,
    },
}
