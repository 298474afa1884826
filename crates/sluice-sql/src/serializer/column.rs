use super::{Formatter, Ident, Params, ToSql};

use sluice_core::{stmt::ExprColumn, Error, Result};

/// A column reference, resolved against the rows in scope.
pub(super) struct ColumnRef<'a>(pub(super) &'a ExprColumn);

impl ToSql for ColumnRef<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Some(scope) = f.scope(self.0.source) else {
            return Err(Error::unresolvable_member(
                format!("#{} of a row not in scope", self.0.column),
                f.current_table_name(),
            ));
        };

        let table = scope.table.clone();
        let column = table.resolve(self.0.column)?;

        if f.qualify {
            fmt!(f, Ident(&table.name) "." Ident(&column.name));
        } else {
            fmt!(f, Ident(&column.name));
        }

        Ok(())
    }
}
