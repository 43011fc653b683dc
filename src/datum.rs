//! Database data types and values.
//!
//! This module defines the type system used by table schemas and the value
//! representation handed to the insert path by the parser. [`Type`] is the
//! declared type of a field, and [`Value`] is a single tagged scalar with an
//! explicit byte length.

use std::fmt;

use thiserror::Error;

/// Default upper bound for the byte length of a TEXT value.
pub const MAX_TEXT_LENGTH: usize = 65535;

/// Errors from value serialization/deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    /// Buffer too small for the operation.
    #[error("buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required.
        required: usize,
        /// Bytes available.
        available: usize,
    },
    /// Invalid data format.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Returns `SerializationError::BufferTooSmall` if the buffer is too small.
#[macro_export]
macro_rules! ensure_buf_len {
    ($buf:expr, $required:expr) => {
        if $buf.len() < $required {
            return Err($crate::datum::SerializationError::BufferTooSmall {
                required: $required,
                available: $buf.len(),
            });
        }
    };
}

/// Declared type of a table field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean type.
    Bool,
    /// 4-byte integer.
    Int4,
    /// 8-byte integer.
    Int8,
    /// Single-precision floating-point.
    Float4,
    /// Double-precision floating-point.
    Float8,
    /// Fixed-width byte string, zero padded to the declared length.
    Char,
    /// Variable-length text.
    Text,
}

impl Type {
    /// Returns the fixed byte size for scalar types, or `None` for string types.
    ///
    /// CHAR is fixed-width too, but its width is declared per field.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Type::Bool => Some(1),
            Type::Int4 => Some(4),
            Type::Int8 => Some(8),
            Type::Float4 => Some(4),
            Type::Float8 => Some(8),
            Type::Char | Type::Text => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Bool => "boolean",
            Type::Int4 => "integer",
            Type::Int8 => "bigint",
            Type::Float4 => "real",
            Type::Float8 => "double precision",
            Type::Char => "character",
            Type::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// A typed database value.
///
/// String literals arrive from the parser as [`Value::Chars`]; the validator
/// pads them to the declared width of CHAR fields and lets TEXT fields accept
/// them unchanged.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Value {
    /// SQL NULL (type is unknown/any).
    Null,
    /// Boolean (true/false).
    Boolean(bool),
    /// 32-bit signed integer (INTEGER).
    Int32(i32),
    /// 64-bit signed integer (BIGINT).
    Int64(i64),
    /// 32-bit floating point (REAL).
    Float32(f32),
    /// 64-bit floating point (DOUBLE PRECISION).
    Float64(f64),
    /// Fixed-width bytes (CHAR).
    Chars(Vec<u8>),
    /// Variable-length text (TEXT).
    Text(String),
}

impl Value {
    /// Builds a CHAR value of exactly `width` bytes: `bytes` followed by zeros.
    ///
    /// Returns `None` if `bytes` is longer than `width`; oversize input is
    /// never truncated.
    pub fn fixed_chars(bytes: &[u8], width: usize) -> Option<Self> {
        if bytes.len() > width {
            return None;
        }
        let mut padded = vec![0u8; width];
        padded[..bytes.len()].copy_from_slice(bytes);
        Some(Value::Chars(padded))
    }

    /// Returns the data type for this value, or `None` for Null.
    pub fn data_type(&self) -> Option<Type> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(Type::Bool),
            Value::Int32(_) => Some(Type::Int4),
            Value::Int64(_) => Some(Type::Int8),
            Value::Float32(_) => Some(Type::Float4),
            Value::Float64(_) => Some(Type::Float8),
            Value::Chars(_) => Some(Type::Char),
            Value::Text(_) => Some(Type::Text),
        }
    }

    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the byte length of the value's payload.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Chars(b) => b.len(),
            Value::Text(s) => s.len(),
            other => other
                .data_type()
                .and_then(Type::fixed_size)
                .unwrap_or_default(),
        }
    }

    /// Returns true if the payload is zero bytes long.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the string payload as bytes, for CHAR and TEXT values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Chars(b) => Some(b),
            Value::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Returns the name of this value's type, `"null"` for NULL.
    pub fn type_name(&self) -> String {
        self.data_type()
            .map(|ty| ty.to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Returns the serialized size in bytes when stored in a field of type `ty`.
    ///
    /// NULL is 0 (tracked by the null bitmap). TEXT adds a 4-byte length prefix;
    /// CHAR is stored raw since its width comes from the schema.
    pub fn serialized_size(&self, ty: Type) -> usize {
        match (self, ty) {
            (Value::Null, _) => 0,
            (_, Type::Text) => 4 + self.len(),
            _ => self.len(),
        }
    }

    /// Serializes this value for a field of type `ty`.
    ///
    /// Returns the number of bytes written. NULL writes 0 bytes.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError::BufferTooSmall` if the buffer is too small,
    /// or `InvalidFormat` if the value cannot be stored as `ty`.
    pub fn serialize(&self, ty: Type, buf: &mut [u8]) -> Result<usize, SerializationError> {
        match (self, ty) {
            (Value::Null, _) => Ok(0),
            (Value::Boolean(b), Type::Bool) => {
                ensure_buf_len!(buf, 1);
                buf[0] = u8::from(*b);
                Ok(1)
            }
            (Value::Int32(n), Type::Int4) => {
                ensure_buf_len!(buf, 4);
                buf[0..4].copy_from_slice(&n.to_le_bytes());
                Ok(4)
            }
            (Value::Int64(n), Type::Int8) => {
                ensure_buf_len!(buf, 8);
                buf[0..8].copy_from_slice(&n.to_le_bytes());
                Ok(8)
            }
            (Value::Float32(n), Type::Float4) => {
                ensure_buf_len!(buf, 4);
                buf[0..4].copy_from_slice(&n.to_le_bytes());
                Ok(4)
            }
            (Value::Float64(n), Type::Float8) => {
                ensure_buf_len!(buf, 8);
                buf[0..8].copy_from_slice(&n.to_le_bytes());
                Ok(8)
            }
            (Value::Chars(data), Type::Char) => {
                ensure_buf_len!(buf, data.len());
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
            (Value::Chars(_) | Value::Text(_), Type::Text) => {
                let data = self.as_bytes().unwrap_or_default();
                let required = 4 + data.len();
                ensure_buf_len!(buf, required);
                buf[0..4].copy_from_slice(&(data.len() as u32).to_le_bytes());
                buf[4..required].copy_from_slice(data);
                Ok(required)
            }
            (value, ty) => Err(SerializationError::InvalidFormat(format!(
                "cannot store {} value as {}",
                value.type_name(),
                ty
            ))),
        }
    }

    /// Deserializes a value of type `ty` from a buffer.
    ///
    /// `width` is the declared length of CHAR fields and is ignored otherwise.
    /// Returns the value and the number of bytes consumed.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError::BufferTooSmall` if the buffer is too small.
    /// Returns `SerializationError::InvalidFormat` for malformed data.
    pub fn deserialize(
        buf: &[u8],
        ty: Type,
        width: usize,
    ) -> Result<(Self, usize), SerializationError> {
        match ty {
            Type::Bool => {
                ensure_buf_len!(buf, 1);
                Ok((Value::Boolean(buf[0] != 0), 1))
            }
            Type::Int4 => {
                ensure_buf_len!(buf, 4);
                let n = i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
                Ok((Value::Int32(n), 4))
            }
            Type::Int8 => {
                ensure_buf_len!(buf, 8);
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&buf[0..8]);
                Ok((Value::Int64(i64::from_le_bytes(raw)), 8))
            }
            Type::Float4 => {
                ensure_buf_len!(buf, 4);
                let n = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
                Ok((Value::Float32(n), 4))
            }
            Type::Float8 => {
                ensure_buf_len!(buf, 8);
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&buf[0..8]);
                Ok((Value::Float64(f64::from_le_bytes(raw)), 8))
            }
            Type::Char => {
                ensure_buf_len!(buf, width);
                Ok((Value::Chars(buf[..width].to_vec()), width))
            }
            Type::Text => {
                ensure_buf_len!(buf, 4);
                let len = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
                let required = 4 + len;
                ensure_buf_len!(buf, required);
                let s = String::from_utf8(buf[4..required].to_vec())
                    .map_err(|e| SerializationError::InvalidFormat(e.to_string()))?;
                Ok((Value::Text(s), required))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", if *b { "t" } else { "f" }),
            Value::Int32(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Float32(n) => write!(f, "{}", n),
            Value::Float64(n) => write!(f, "{}", n),
            Value::Chars(b) => {
                let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
                write!(f, "{}", String::from_utf8_lossy(&b[..end]))
            }
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_chars_pads_with_zeros() {
        let value = Value::fixed_chars(b"hi", 4).unwrap();
        assert_eq!(value, Value::Chars(b"hi\0\0".to_vec()));
        assert_eq!(value.len(), 4);
    }

    #[test]
    fn test_fixed_chars_exact_width() {
        let value = Value::fixed_chars(b"abcd", 4).unwrap();
        assert_eq!(value, Value::Chars(b"abcd".to_vec()));
    }

    #[test]
    fn test_fixed_chars_rejects_oversize() {
        assert_eq!(Value::fixed_chars(b"toolong", 4), None);
    }

    #[test]
    fn test_value_len() {
        assert_eq!(Value::Null.len(), 0);
        assert_eq!(Value::Boolean(true).len(), 1);
        assert_eq!(Value::Int32(7).len(), 4);
        assert_eq!(Value::Int64(7).len(), 8);
        assert_eq!(Value::Float32(1.5).len(), 4);
        assert_eq!(Value::Float64(1.5).len(), 8);
        assert_eq!(Value::Chars(b"abc".to_vec()).len(), 3);
        assert_eq!(Value::Text("hello".into()).len(), 5);
        assert!(Value::Chars(vec![]).is_empty());
    }

    #[test]
    fn test_value_data_type() {
        assert_eq!(Value::Null.data_type(), None);
        assert_eq!(Value::Boolean(true).data_type(), Some(Type::Bool));
        assert_eq!(Value::Int32(0).data_type(), Some(Type::Int4));
        assert_eq!(Value::Int64(0).data_type(), Some(Type::Int8));
        assert_eq!(Value::Float32(0.0).data_type(), Some(Type::Float4));
        assert_eq!(Value::Float64(0.0).data_type(), Some(Type::Float8));
        assert_eq!(Value::Chars(vec![]).data_type(), Some(Type::Char));
        assert_eq!(Value::Text(String::new()).data_type(), Some(Type::Text));
    }

    #[test]
    fn test_type_fixed_size() {
        assert_eq!(Type::Bool.fixed_size(), Some(1));
        assert_eq!(Type::Int4.fixed_size(), Some(4));
        assert_eq!(Type::Int8.fixed_size(), Some(8));
        assert_eq!(Type::Float4.fixed_size(), Some(4));
        assert_eq!(Type::Float8.fixed_size(), Some(8));
        assert_eq!(Type::Char.fixed_size(), None);
        assert_eq!(Type::Text.fixed_size(), None);
    }

    #[test]
    fn test_type_display() {
        assert_eq!(Type::Int4.to_string(), "integer");
        assert_eq!(Type::Char.to_string(), "character");
        assert_eq!(Type::Text.to_string(), "text");
    }

    #[test]
    fn test_chars_stored_in_text_field() {
        let value = Value::Chars(b"abc".to_vec());
        assert_eq!(value.serialized_size(Type::Text), 7);

        let mut buf = vec![0u8; 7];
        assert_eq!(value.serialize(Type::Text, &mut buf).unwrap(), 7);

        let (parsed, consumed) = Value::deserialize(&buf, Type::Text, 0).unwrap();
        assert_eq!(parsed, Value::Text("abc".into()));
        assert_eq!(consumed, 7);
    }

    #[test]
    fn test_char_uses_declared_width() {
        let value = Value::fixed_chars(b"ab", 4).unwrap();
        let mut buf = vec![0u8; 4];
        assert_eq!(value.serialize(Type::Char, &mut buf).unwrap(), 4);

        let (parsed, consumed) = Value::deserialize(&buf, Type::Char, 4).unwrap();
        assert_eq!(parsed, value);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_serialize_type_mismatch() {
        let mut buf = [0u8; 8];
        assert!(matches!(
            Value::Int32(1).serialize(Type::Text, &mut buf),
            Err(SerializationError::InvalidFormat(_))
        ));
        assert!(matches!(
            Value::Text("x".into()).serialize(Type::Char, &mut buf),
            Err(SerializationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            Value::Int32(42).serialize(Type::Int4, &mut buf),
            Err(SerializationError::BufferTooSmall {
                required: 4,
                available: 2
            })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let mut buf = [0u8; 8];
        buf[..4].copy_from_slice(&3u32.to_le_bytes());
        buf[4..7].copy_from_slice(&[0xFF, 0xFE, 0xFF]);
        assert!(matches!(
            Value::deserialize(&buf, Type::Text, 0),
            Err(SerializationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display_trims_char_padding() {
        assert_eq!(Value::Chars(b"hi\0\0".to_vec()).to_string(), "hi");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Boolean(false).to_string(), "f");
    }
}
