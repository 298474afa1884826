use super::{Formatter, Params, ToSql};

use sluice_core::{stmt::Value, Result};

/// A literal is always bound as a parameter, except null which is written
/// inline.
impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self {
            Value::Null => fmt!(f, "NULL"),
            value => {
                let placeholder = f.param(value);
                fmt!(f, placeholder);
            }
        }

        Ok(())
    }
}
