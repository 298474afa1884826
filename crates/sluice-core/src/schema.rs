mod builder;
pub use builder::Builder;

mod column;
pub use column::Column;

mod table;
pub use table::TableSchema;

mod ty;
pub use ty::ColumnType;
