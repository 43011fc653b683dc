//! Record representation and serialization.
//!
//! A [`Record`] is the physical form of a table row: system fields followed by
//! the user values, encoded into a single byte buffer. Records are produced by
//! [`Table::make_record`](crate::table::Table::make_record) and owned by the
//! heap once inserted.

use crate::catalog::{FieldMeta, TableMeta};
use crate::datum::{SerializationError, Type, Value};
use crate::ensure_buf_len;
use crate::tx::TxId;

use super::error::HeapError;

/// Size of the `__trx` system field.
const TRX_FIELD_SIZE: usize = 8;

/// An encoded row.
///
/// # Serialization Format
///
/// ```text
/// +---------------------------+
/// | __trx (i64 LE)            |  inserting transaction, 0 until stamped
/// +---------------------------+
/// | Null Bitmap (ceil(n/8) B) |  bit=1: NOT NULL, bit=0: NULL
/// +---------------------------+
/// | Value[0] (if not null)    |  CHAR: declared width, TEXT: u32 len + bytes
/// | Value[1] (if not null)    |
/// | ...                       |
/// +---------------------------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    data: Vec<u8>,
}

impl Record {
    /// Encodes `values` (one per user field, in declared order) as a record.
    ///
    /// Every value is checked against its field; nothing is partially encoded.
    ///
    /// # Errors
    ///
    /// - `HeapError::FieldCountMismatch` if the value count is wrong
    /// - `HeapError::NullViolation` for NULL in a NOT NULL field
    /// - `HeapError::TypeMismatch` if a value cannot be stored in its field
    /// - `HeapError::CharWidthMismatch` if a CHAR value is not exactly the declared width
    pub fn encode(meta: &TableMeta, values: &[Value]) -> Result<Self, HeapError> {
        let fields = meta.user_fields();
        if fields.len() != values.len() {
            return Err(HeapError::FieldCountMismatch {
                expected: fields.len(),
                found: values.len(),
            });
        }

        let mut size = TRX_FIELD_SIZE + fields.len().div_ceil(8);
        for (field, value) in fields.iter().zip(values) {
            check_storable(field, value)?;
            size += value.serialized_size(field.field_type());
        }

        let mut data = vec![0u8; size];
        let bitmap_start = TRX_FIELD_SIZE;
        let mut offset = bitmap_start + fields.len().div_ceil(8);
        for (i, (field, value)) in fields.iter().zip(values).enumerate() {
            if value.is_null() {
                continue;
            }
            data[bitmap_start + i / 8] |= 1 << (i % 8);
            offset += value.serialize(field.field_type(), &mut data[offset..])?;
        }

        Ok(Self { data })
    }

    /// Decodes the user values of this record.
    ///
    /// # Errors
    ///
    /// Returns error if the buffer is malformed or too small for `meta`.
    pub fn decode(&self, meta: &TableMeta) -> Result<Vec<Value>, SerializationError> {
        let fields = meta.user_fields();
        let bitmap_start = TRX_FIELD_SIZE;
        let bitmap_bytes = fields.len().div_ceil(8);
        ensure_buf_len!(self.data, bitmap_start + bitmap_bytes);

        let mut offset = bitmap_start + bitmap_bytes;
        let mut values = Vec::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            // bit=1 means NOT NULL
            if self.data[bitmap_start + i / 8] & (1 << (i % 8)) == 0 {
                values.push(Value::Null);
                continue;
            }
            let (value, consumed) =
                Value::deserialize(&self.data[offset..], field.field_type(), field.len())?;
            values.push(value);
            offset += consumed;
        }
        Ok(values)
    }

    /// Returns the transaction that inserted this record.
    pub fn trx_id(&self) -> TxId {
        let mut raw = [0u8; TRX_FIELD_SIZE];
        raw.copy_from_slice(&self.data[..TRX_FIELD_SIZE]);
        TxId::new(i64::from_le_bytes(raw) as u64)
    }

    /// Stamps the inserting transaction into the `__trx` system field.
    pub fn set_trx_id(&mut self, txid: TxId) {
        self.data[..TRX_FIELD_SIZE].copy_from_slice(&(txid.as_u64() as i64).to_le_bytes());
    }

    /// Returns the encoded size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

fn check_storable(field: &FieldMeta, value: &Value) -> Result<(), HeapError> {
    let Some(value_type) = value.data_type() else {
        if field.nullable() {
            return Ok(());
        }
        return Err(HeapError::NullViolation {
            field: field.name().to_string(),
        });
    };

    match (field.field_type(), value_type) {
        (Type::Char, Type::Char) if value.len() != field.len() => {
            Err(HeapError::CharWidthMismatch {
                field: field.name().to_string(),
                expected: field.len(),
                found: value.len(),
            })
        }
        // decoded as TEXT, so the bytes must be utf-8
        (Type::Text, Type::Char) => match value {
            Value::Chars(bytes) if std::str::from_utf8(bytes).is_err() => {
                Err(HeapError::TypeMismatch {
                    field: field.name().to_string(),
                    expected: Type::Text,
                    found: "character (invalid utf-8)".to_string(),
                })
            }
            _ => Ok(()),
        },
        (expected, found) if expected == found => Ok(()),
        (expected, _) => Err(HeapError::TypeMismatch {
            field: field.name().to_string(),
            expected,
            found: value.type_name(),
        }),
    }
}
