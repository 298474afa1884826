use crate::Dialect;

use sluice_core::stmt::Value;

/// A compiled statement: SQL text plus the values to bind.
///
/// `parameters[i]` binds the placeholder named `p{i + 1}`, which is the
/// `i`-th placeholder emitted while writing `command_text`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSql {
    pub command_text: String,
    pub parameters: Vec<Value>,
}

impl GeneratedSql {
    /// Parameters paired with their dialect-formatted names, for binding by
    /// name.
    pub fn named_parameters(
        &self,
        dialect: Dialect,
    ) -> impl ExactSizeIterator<Item = (String, &Value)> + '_ {
        self.parameters.iter().enumerate().map(move |(index, value)| {
            (dialect.format_parameter_name(&format!("p{}", index + 1)), value)
        })
    }
}
