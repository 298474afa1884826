use super::{Formatter, Params, ToSql};

use sluice_core::Result;

/// An identifier, escaped for the current dialect
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let escaped = f.dialect().escape_identifier(self.0.as_ref());
        f.dst.push_str(&escaped);
        Ok(())
    }
}
