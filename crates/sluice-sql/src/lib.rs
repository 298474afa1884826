mod dialect;
pub use dialect::Dialect;

mod generated;
pub use generated::GeneratedSql;

pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};
