mod column;
use column::Column;

mod enumeration;
pub(crate) use enumeration::Enum;

mod error;
use error::ErrorSet;

mod field;
use field::Field;

mod name;
use name::Name;

mod table;
pub(crate) use table::Table;

mod table_attr;
use table_attr::TableAttr;
