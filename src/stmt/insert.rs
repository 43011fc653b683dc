//! INSERT statement validation and normalization.
//!
//! Turns a [`ParsedInsert`] plus the target table's schema into an
//! [`InsertStatement`]: one value per user field, in declared order, with
//! CHAR values padded to their declared width. Validation is all-or-nothing
//! and performs no storage access.

use std::sync::Arc;

use super::error::StmtError;
use crate::catalog::{Catalog, FieldMeta, TableMeta};
use crate::config::EngineConfig;
use crate::datum::{Type, Value};
use crate::sql::ParsedInsert;
use crate::status::StatusCode;
use crate::table::Table;

/// How supplied values map onto the table's user fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertMode {
    /// No column list: each row holds one value per user field, in declared order.
    FullRow,
    /// Explicit column list: for each user field, the index of its value
    /// within a row, or `None` if the column was not listed.
    Columns(Vec<Option<usize>>),
}

impl InsertMode {
    /// Resolves a column list against `meta`.
    ///
    /// An empty list selects [`InsertMode::FullRow`].
    ///
    /// # Errors
    ///
    /// - `StmtError::FieldNotFound` for unknown or system columns
    /// - `StmtError::DuplicateField` if a column is listed twice
    /// - `StmtError::RequiredFieldOmitted` if a NOT NULL field is not listed
    pub fn resolve(meta: &TableMeta, columns: &[String]) -> Result<Self, StmtError> {
        if columns.is_empty() {
            return Ok(InsertMode::FullRow);
        }

        let mut positions = vec![None; meta.user_field_num()];
        for (value_idx, name) in columns.iter().enumerate() {
            let field = meta
                .find_field(name)
                .filter(|f| f.visible())
                .ok_or_else(|| StmtError::FieldNotFound {
                    table: meta.name().to_string(),
                    field: name.clone(),
                })?;
            let slot = &mut positions[field.index() - meta.sys_field_num()];
            if slot.is_some() {
                return Err(StmtError::DuplicateField {
                    table: meta.name().to_string(),
                    field: name.clone(),
                });
            }
            *slot = Some(value_idx);
        }

        if let Some(field) = meta
            .user_fields()
            .iter()
            .zip(&positions)
            .find_map(|(field, pos)| (pos.is_none() && !field.nullable()).then_some(field))
        {
            return Err(StmtError::RequiredFieldOmitted {
                table: meta.name().to_string(),
                field: field.name().to_string(),
            });
        }

        Ok(InsertMode::Columns(positions))
    }

    /// Number of values each input row must carry.
    fn expected_values(&self, meta: &TableMeta) -> usize {
        match self {
            InsertMode::FullRow => meta.user_field_num(),
            InsertMode::Columns(positions) => positions.iter().flatten().count(),
        }
    }
}

/// A validated INSERT: the target table and its fully normalized rows.
///
/// Immutable once built; consumed by exactly one
/// [`InsertExecutor`](crate::executor::InsertExecutor).
#[derive(Debug)]
pub struct InsertStatement {
    table: Arc<Table>,
    rows: Vec<Vec<Value>>,
}

impl InsertStatement {
    /// Validates `insert` against the catalog and normalizes its rows.
    ///
    /// # Errors
    ///
    /// Returns the first failing check; no rows are produced on failure.
    pub fn create(
        catalog: &Catalog,
        insert: &ParsedInsert,
        config: &EngineConfig,
    ) -> Result<Self, StmtError> {
        Self::build(catalog, insert, config).inspect_err(|e| {
            tracing::warn!(
                table = %insert.table,
                status = %e.status(),
                error = %e,
                "insert statement rejected"
            );
        })
    }

    fn build(
        catalog: &Catalog,
        insert: &ParsedInsert,
        config: &EngineConfig,
    ) -> Result<Self, StmtError> {
        if insert.table.is_empty() {
            return Err(StmtError::MissingTableName);
        }
        if insert.values.is_empty() {
            return Err(StmtError::EmptyValues {
                table: insert.table.clone(),
            });
        }

        let table = catalog
            .find_table(&insert.table)
            .ok_or_else(|| StmtError::TableNotFound {
                name: insert.table.clone(),
            })?;
        let meta = table.table_meta();

        let mode = InsertMode::resolve(meta, &insert.columns)?;
        let rows = normalize_rows(meta, &insert.values, &mode, config.max_text_length)?;

        tracing::debug!(
            table = meta.name(),
            rows = rows.len(),
            partial = matches!(mode, InsertMode::Columns(_)),
            "insert statement validated"
        );
        Ok(Self { table, rows })
    }

    /// Target table.
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Normalized rows, one value per user field.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Builds a statement without validation.
    #[cfg(test)]
    pub(crate) fn from_parts(table: Arc<Table>, rows: Vec<Vec<Value>>) -> Self {
        Self { table, rows }
    }
}

/// Normalizes every input row according to `mode`.
///
/// Stops at the first invalid row or value.
pub fn normalize_rows(
    meta: &TableMeta,
    values: &[Vec<Value>],
    mode: &InsertMode,
    max_text_length: usize,
) -> Result<Vec<Vec<Value>>, StmtError> {
    let expected = mode.expected_values(meta);
    let fields = meta.user_fields();

    values
        .iter()
        .enumerate()
        .map(|(row, input)| {
            if input.len() != expected {
                return Err(match mode {
                    InsertMode::FullRow => StmtError::FieldCountMismatch {
                        table: meta.name().to_string(),
                        row,
                        expected,
                        found: input.len(),
                    },
                    InsertMode::Columns(_) => StmtError::ValueCountMismatch {
                        row,
                        expected,
                        found: input.len(),
                    },
                });
            }

            match mode {
                InsertMode::FullRow => fields
                    .iter()
                    .zip(input)
                    .map(|(field, value)| {
                        normalize_value(meta, field, value, row, max_text_length)
                    })
                    .collect(),
                InsertMode::Columns(positions) => fields
                    .iter()
                    .zip(positions)
                    .map(|(field, pos)| match pos {
                        Some(i) => normalize_value(meta, field, &input[*i], row, max_text_length),
                        None => Ok(Value::Null),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Checks one value against its field and returns its normalized form.
///
/// - NULL into a nullable field is accepted as NULL.
/// - Otherwise the value's type must equal the field's type, except that a
///   TEXT field accepts a CHAR value. The reverse is never accepted.
/// - TEXT values may not exceed `max_text_length` bytes. A CHAR value bound
///   for a TEXT field becomes a TEXT value and must be valid UTF-8.
/// - CHAR values may not exceed the declared width and are zero padded to it.
fn normalize_value(
    meta: &TableMeta,
    field: &FieldMeta,
    value: &Value,
    row: usize,
    max_text_length: usize,
) -> Result<Value, StmtError> {
    if value.is_null() && field.nullable() {
        return Ok(Value::Null);
    }

    let field_type = field.field_type();
    let value_type = value.data_type();
    if value_type != Some(field_type)
        && !(field_type == Type::Text && value_type == Some(Type::Char))
    {
        return Err(StmtError::FieldTypeMismatch {
            table: meta.name().to_string(),
            row,
            field: field.name().to_string(),
            expected: field_type,
            found: value.type_name(),
        });
    }

    if field_type == Type::Text && value.len() > max_text_length {
        return Err(StmtError::TextTooLong {
            row,
            field: field.name().to_string(),
            len: value.len(),
            max: max_text_length,
        });
    }

    match value {
        Value::Chars(bytes) if field.is_fixed_width() => Value::fixed_chars(bytes, field.len())
            .ok_or_else(|| StmtError::CharTooLong {
                row,
                field: field.name().to_string(),
                len: bytes.len(),
                max: field.len(),
            }),
        Value::Chars(bytes) if field_type == Type::Text => String::from_utf8(bytes.clone())
            .map(Value::Text)
            .map_err(|_| StmtError::FieldTypeMismatch {
                table: meta.name().to_string(),
                row,
                field: field.name().to_string(),
                expected: field_type,
                found: "character (invalid utf-8)".to_string(),
            }),
        _ => Ok(value.clone()),
    }
}
