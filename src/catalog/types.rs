//! Schema descriptors for tables and their fields.

use super::error::CatalogError;
use crate::datum::Type;
use crate::sql::ColumnDef;

/// Name of the system field that records the inserting transaction.
pub const TRX_FIELD_NAME: &str = "__trx";

/// Prefix reserved for system field names.
const SYSTEM_FIELD_PREFIX: &str = "__";

/// Metadata for a single field (column) of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    name: String,
    field_type: Type,
    len: usize,
    nullable: bool,
    visible: bool,
    index: usize,
}

impl FieldMeta {
    /// Creates a new field descriptor.
    ///
    /// `len` is the declared byte length: the width of a CHAR field, the
    /// fixed size of a scalar, 0 for TEXT. `visible` is false for system fields.
    pub fn new(
        name: impl Into<String>,
        field_type: Type,
        len: usize,
        nullable: bool,
        visible: bool,
        index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            len,
            nullable,
            visible,
            index,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn field_type(&self) -> Type {
        self.field_type
    }

    /// Declared byte length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for zero-length fields (TEXT).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether NULL is accepted.
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// False for system fields, which never appear in user column lists.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Position among all fields of the table (system fields first).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if values of this field are padded to a declared width.
    pub fn is_fixed_width(&self) -> bool {
        self.field_type == Type::Char
    }
}

/// Metadata for a table: an ordered list of fields, system fields first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    table_id: u32,
    name: String,
    fields: Vec<FieldMeta>,
    sys_field_num: usize,
}

impl TableMeta {
    /// Builds table metadata from user column definitions.
    ///
    /// The `__trx` system field is placed ahead of the user fields.
    ///
    /// # Errors
    ///
    /// - `CatalogError::EmptySchema` if `columns` is empty
    /// - `CatalogError::ReservedFieldName` if a name uses the `__` prefix
    /// - `CatalogError::DuplicateField` if two columns share a name
    /// - `CatalogError::InvalidFieldLength` for `CHAR(0)`
    pub fn new(table_id: u32, name: &str, columns: &[ColumnDef]) -> Result<Self, CatalogError> {
        if columns.is_empty() {
            return Err(CatalogError::EmptySchema {
                table: name.to_string(),
            });
        }

        let mut fields = vec![FieldMeta::new(
            TRX_FIELD_NAME,
            Type::Int8,
            8,
            false,
            false,
            0,
        )];
        let sys_field_num = fields.len();

        for col in columns {
            if col.name.starts_with(SYSTEM_FIELD_PREFIX) {
                return Err(CatalogError::ReservedFieldName {
                    field: col.name.clone(),
                });
            }
            if fields.iter().any(|f| f.name == col.name) {
                return Err(CatalogError::DuplicateField {
                    table: name.to_string(),
                    field: col.name.clone(),
                });
            }
            let (field_type, len) = col.data_type.storage();
            if field_type == Type::Char && len == 0 {
                return Err(CatalogError::InvalidFieldLength {
                    field: col.name.clone(),
                });
            }
            let index = fields.len();
            fields.push(FieldMeta::new(
                col.name.clone(),
                field_type,
                len,
                col.nullable,
                true,
                index,
            ));
        }

        Ok(Self {
            table_id,
            name: name.to_string(),
            fields,
            sys_field_num,
        })
    }

    /// Unique table identifier.
    pub fn table_id(&self) -> u32 {
        self.table_id
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of leading system fields.
    pub fn sys_field_num(&self) -> usize {
        self.sys_field_num
    }

    /// Number of user-visible fields.
    pub fn user_field_num(&self) -> usize {
        self.fields.len() - self.sys_field_num
    }

    /// User fields in declared order.
    pub fn user_fields(&self) -> &[FieldMeta] {
        &self.fields[self.sys_field_num..]
    }

    /// Returns the absolute position of the field named `name`.
    ///
    /// System fields are searched as well; callers resolving user column
    /// lists must check [`FieldMeta::visible`].
    pub fn find_field_index_by_name(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Looks up a field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldMeta> {
        self.find_field_index_by_name(name).map(|i| &self.fields[i])
    }
}
