use super::{Formatter, ToSql};

use sluice_core::{stmt::Value, Result};

/// Accumulates bound values while SQL is written.
pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// A 1-based parameter position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        Vec::push(self, value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: super::Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let name = f.dialect().format_parameter_name(&format!("p{}", self.0));
        f.dst.push_str(&name);
        Ok(())
    }
}
