//! Abstract Syntax Tree (AST) nodes for the statements the insert path consumes.

use crate::datum::{Type, Value};

/// Parsed INSERT statement.
///
/// `INSERT INTO t VALUES (..), (..)` leaves `columns` empty (full-row form);
/// `INSERT INTO t (a, b) VALUES (..)` lists the target columns in value order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInsert {
    /// Target table name.
    pub table: String,
    /// Column names (empty means all user columns in declared order).
    pub columns: Vec<String>,
    /// Literal rows to insert.
    pub values: Vec<Vec<Value>>,
}

impl ParsedInsert {
    /// Creates a full-row insert into `table`.
    pub fn new(table: impl Into<String>, values: Vec<Vec<Value>>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            values,
        }
    }

    /// Creates an insert naming its target columns explicitly.
    pub fn with_columns<S: Into<String>>(
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
        values: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            values,
        }
    }
}

/// CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    /// Table name.
    pub name: String,
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
}

impl CreateTableStmt {
    /// Creates a new CREATE TABLE statement.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Whether NULL is allowed (false for `NOT NULL` columns).
    pub nullable: bool,
}

impl ColumnDef {
    /// Creates a nullable column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Marks the column `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// SQL data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// BOOLEAN.
    Boolean,
    /// INTEGER or INT.
    Integer,
    /// BIGINT.
    Bigint,
    /// REAL.
    Real,
    /// DOUBLE PRECISION.
    DoublePrecision,
    /// CHAR(n).
    Char(u32),
    /// TEXT.
    Text,
}

impl DataType {
    /// Returns the storage type and declared byte length for this data type.
    ///
    /// TEXT reports length 0; its bound comes from the engine configuration.
    pub fn storage(&self) -> (Type, usize) {
        match self {
            DataType::Boolean => (Type::Bool, 1),
            DataType::Integer => (Type::Int4, 4),
            DataType::Bigint => (Type::Int8, 8),
            DataType::Real => (Type::Float4, 4),
            DataType::DoublePrecision => (Type::Float8, 8),
            DataType::Char(n) => (Type::Char, *n as usize),
            DataType::Text => (Type::Text, 0),
        }
    }
}
