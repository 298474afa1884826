use super::ColumnType;

/// A mapped column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The name of the field on the mapped type.
    pub member_name: String,

    /// The column's storage class.
    pub ty: ColumnType,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True if the column is the table's primary key
    pub primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, member_name: impl Into<String>, ty: ColumnType) -> Column {
        Column {
            name: name.into(),
            member_name: member_name.into(),
            ty,
            nullable: false,
            primary_key: false,
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Column {
        self.nullable = nullable;
        self
    }

    pub fn primary_key(mut self) -> Column {
        self.primary_key = true;
        self
    }
}
