//! Canonical binary encoding of typed field sets.
//!
//! Layout: each field is a header carrying `(type code, field code)` followed
//! by its value. Fixed-width integers are big-endian; blobs carry a
//! variable-length prefix. Fields are always emitted in ascending
//! `(type code, field code)` order, which is what makes the encoding
//! canonical and therefore signable.

use std::collections::BTreeMap;
use std::fmt;

use crate::errors::CodecError;
use crate::fields;

/// Type code for 8-bit unsigned integers.
pub const TYPE_UINT8: u16 = 16;
/// Type code for 16-bit unsigned integers.
pub const TYPE_UINT16: u16 = 1;
/// Type code for 32-bit unsigned integers.
pub const TYPE_UINT32: u16 = 2;
/// Type code for 64-bit unsigned integers.
pub const TYPE_UINT64: u16 = 3;
/// Type code for 128-bit hashes.
pub const TYPE_HASH128: u16 = 4;
/// Type code for 256-bit hashes.
pub const TYPE_HASH256: u16 = 5;
/// Type code for variable-length blobs.
pub const TYPE_BLOB: u16 = 7;
/// Type code for 160-bit hashes.
pub const TYPE_HASH160: u16 = 17;

const MAX_SINGLE_BYTE_LEN: usize = 192;
const MAX_DOUBLE_BYTE_LEN: usize = 12_480;
const MAX_TRIPLE_BYTE_LEN: usize = 918_744;

/// Codes a field header can carry; 0 marks the extended header forms.
const HEADER_CODES: std::ops::RangeInclusive<u16> = 1..=255;

/// Identifies a field by its type and field codes.
///
/// Ordering is `(type_code, field_code)`, the canonical field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    /// Type code; determines how the value is sized.
    pub type_code: u16,
    /// Field code, unique within a type.
    pub field_code: u16,
}

impl FieldId {
    /// Creates a field identifier.
    pub const fn new(type_code: u16, field_code: u16) -> Self {
        Self {
            type_code,
            field_code,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match fields::field_name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "({}, {})", self.type_code, self.field_code),
        }
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// 8-bit unsigned integer.
    UInt8(u8),
    /// 16-bit unsigned integer.
    UInt16(u16),
    /// 32-bit unsigned integer.
    UInt32(u32),
    /// 64-bit unsigned integer.
    UInt64(u64),
    /// 128-bit hash.
    Hash128([u8; 16]),
    /// 160-bit hash.
    Hash160([u8; 20]),
    /// 256-bit hash.
    Hash256([u8; 32]),
    /// Variable-length byte string.
    Blob(Vec<u8>),
}

impl FieldValue {
    /// Type code this value encodes as.
    pub fn type_code(&self) -> u16 {
        match self {
            FieldValue::UInt8(_) => TYPE_UINT8,
            FieldValue::UInt16(_) => TYPE_UINT16,
            FieldValue::UInt32(_) => TYPE_UINT32,
            FieldValue::UInt64(_) => TYPE_UINT64,
            FieldValue::Hash128(_) => TYPE_HASH128,
            FieldValue::Hash160(_) => TYPE_HASH160,
            FieldValue::Hash256(_) => TYPE_HASH256,
            FieldValue::Blob(_) => TYPE_BLOB,
        }
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            FieldValue::UInt8(v) => out.push(*v),
            FieldValue::UInt16(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::UInt32(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::UInt64(v) => out.extend_from_slice(&v.to_be_bytes()),
            FieldValue::Hash128(v) => out.extend_from_slice(v),
            FieldValue::Hash160(v) => out.extend_from_slice(v),
            FieldValue::Hash256(v) => out.extend_from_slice(v),
            FieldValue::Blob(v) => {
                write_length(v.len(), out)?;
                out.extend_from_slice(v);
            }
        }
        Ok(())
    }
}

/// An ordered set of typed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeMap<FieldId, FieldValue>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any previous value.
    ///
    /// Fails when either code does not fit a field header or the value's type
    /// does not match the field's type code.
    pub fn insert(&mut self, id: FieldId, value: FieldValue) -> Result<(), CodecError> {
        if !HEADER_CODES.contains(&id.type_code) || !HEADER_CODES.contains(&id.field_code) {
            return Err(CodecError::FieldCodeRange {
                type_code: id.type_code,
                field_code: id.field_code,
            });
        }
        if value.type_code() != id.type_code {
            return Err(CodecError::TypeMismatch {
                type_code: id.type_code,
                field_code: id.field_code,
                value_type: value.type_code(),
            });
        }
        self.fields.insert(id, value);
        Ok(())
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, id: FieldId) -> Option<&FieldValue> {
        self.fields.get(&id)
    }

    /// Removes a field, returning its value.
    pub fn remove(&mut self, id: FieldId) -> Option<FieldValue> {
        self.fields.remove(&id)
    }

    /// Whether a field is present.
    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Iterates fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &FieldValue)> {
        self.fields.iter()
    }

    /// Field identifiers in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.keys().copied()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Encodes a field set in canonical order.
///
/// Fails only when a blob is longer than the variable-length prefix can
/// express.
pub fn encode(fields: &FieldSet) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    for (id, value) in fields.iter() {
        write_header(*id, &mut out);
        value.write(&mut out)?;
    }
    Ok(out)
}

/// Decodes a canonical field set.
///
/// Rejects truncated input, unknown type codes, non-minimal headers and
/// fields that are duplicated or out of canonical order.
pub fn decode(bytes: &[u8]) -> Result<FieldSet, CodecError> {
    let mut reader = Reader { bytes, pos: 0 };
    let mut fields = FieldSet::new();
    let mut last: Option<FieldId> = None;

    while !reader.is_empty() {
        let header_offset = reader.pos;
        let id = reader.read_header()?;
        if last.is_some_and(|prev| prev >= id) {
            return Err(CodecError::FieldOrder {
                type_code: id.type_code,
                field_code: id.field_code,
            });
        }
        let value = reader.read_value(id.type_code, header_offset)?;
        fields.insert(id, value)?;
        last = Some(id);
    }

    Ok(fields)
}

fn write_header(id: FieldId, out: &mut Vec<u8>) {
    // FieldSet::insert keeps both codes within HEADER_CODES.
    let type_code = id.type_code as u8;
    let field_code = id.field_code as u8;
    match (type_code < 16, field_code < 16) {
        (true, true) => out.push((type_code << 4) | field_code),
        (true, false) => out.extend_from_slice(&[type_code << 4, field_code]),
        (false, true) => out.extend_from_slice(&[field_code, type_code]),
        (false, false) => out.extend_from_slice(&[0, type_code, field_code]),
    }
}

fn write_length(len: usize, out: &mut Vec<u8>) -> Result<(), CodecError> {
    if len <= MAX_SINGLE_BYTE_LEN {
        out.push(len as u8);
    } else if len <= MAX_DOUBLE_BYTE_LEN {
        let rem = len - (MAX_SINGLE_BYTE_LEN + 1);
        out.push(193 + (rem >> 8) as u8);
        out.push((rem & 0xFF) as u8);
    } else if len <= MAX_TRIPLE_BYTE_LEN {
        let rem = len - (MAX_DOUBLE_BYTE_LEN + 1);
        out.push(241 + (rem >> 16) as u8);
        out.push(((rem >> 8) & 0xFF) as u8);
        out.push((rem & 0xFF) as u8);
    } else {
        return Err(CodecError::LengthOverflow(len));
    }
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(CodecError::Truncated { offset: self.pos })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn byte(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn read_header(&mut self) -> Result<FieldId, CodecError> {
        let offset = self.pos;
        let first = self.byte()?;
        let mut type_code = u16::from(first >> 4);
        let mut field_code = u16::from(first & 0x0F);

        if type_code == 0 {
            type_code = u16::from(self.byte()?);
            if type_code < 16 {
                return Err(CodecError::NonCanonicalHeader(offset));
            }
        }
        if field_code == 0 {
            field_code = u16::from(self.byte()?);
            if field_code < 16 {
                return Err(CodecError::NonCanonicalHeader(offset));
            }
        }

        Ok(FieldId::new(type_code, field_code))
    }

    fn read_length(&mut self) -> Result<usize, CodecError> {
        let offset = self.pos;
        let b1 = usize::from(self.byte()?);
        match b1 {
            0..=192 => Ok(b1),
            193..=240 => {
                let b2 = usize::from(self.byte()?);
                Ok(MAX_SINGLE_BYTE_LEN + 1 + (b1 - 193) * 256 + b2)
            }
            241..=254 => {
                let b2 = usize::from(self.byte()?);
                let b3 = usize::from(self.byte()?);
                let len = MAX_DOUBLE_BYTE_LEN + 1 + (b1 - 241) * 65_536 + b2 * 256 + b3;
                if len > MAX_TRIPLE_BYTE_LEN {
                    return Err(CodecError::LengthOverflow(len));
                }
                Ok(len)
            }
            _ => Err(CodecError::InvalidLengthPrefix(offset)),
        }
    }

    fn fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn read_value(&mut self, type_code: u16, offset: usize) -> Result<FieldValue, CodecError> {
        let value = match type_code {
            TYPE_UINT8 => FieldValue::UInt8(self.byte()?),
            TYPE_UINT16 => FieldValue::UInt16(u16::from_be_bytes(self.fixed()?)),
            TYPE_UINT32 => FieldValue::UInt32(u32::from_be_bytes(self.fixed()?)),
            TYPE_UINT64 => FieldValue::UInt64(u64::from_be_bytes(self.fixed()?)),
            TYPE_HASH128 => FieldValue::Hash128(self.fixed()?),
            TYPE_HASH160 => FieldValue::Hash160(self.fixed()?),
            TYPE_HASH256 => FieldValue::Hash256(self.fixed()?),
            TYPE_BLOB => {
                let len = self.read_length()?;
                FieldValue::Blob(self.take(len)?.to_vec())
            }
            _ => return Err(CodecError::UnsupportedType { type_code, offset }),
        };
        Ok(value)
    }
}
