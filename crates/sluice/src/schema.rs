//! Process-wide cache of table mappings, keyed by the mapped Rust type.

use crate::{Result, Table};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use sluice_core::schema::TableSchema;
use std::{any::TypeId, sync::Arc};

static SCHEMAS: Lazy<DashMap<TypeId, Arc<TableSchema>>> = Lazy::new(DashMap::new);

/// Returns the mapping for `T`, building it on first use.
///
/// A mapping that fails to build is not cached, so every use reports the
/// error.
pub fn cached<T: Table>() -> Result<Arc<TableSchema>> {
    let key = TypeId::of::<T>();

    if let Some(schema) = SCHEMAS.get(&key) {
        return Ok(schema.clone());
    }

    let schema = Arc::new(T::schema()?);

    // Two threads may race to build the same mapping; the first insert wins
    // and both callers share it.
    let schema = SCHEMAS
        .entry(key)
        .or_insert_with(|| {
            log::debug!(
                "cached table mapping; table={} type={}",
                schema.name,
                std::any::type_name::<T>()
            );
            schema
        })
        .clone();

    Ok(schema)
}

