mod error;
pub use error::{Error, IntoError};

pub mod query;
pub use query::QueryModel;

pub mod schema;
pub use schema::TableSchema;

pub mod stmt;

/// A Result type alias that uses Sluice's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
