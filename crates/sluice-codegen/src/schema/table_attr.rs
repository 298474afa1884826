/// Attributes on the struct itself.
#[derive(Debug, Default)]
pub(crate) struct TableAttr {
    /// Optional database table name to map the struct to
    pub(crate) table: Option<syn::LitStr>,
}

impl TableAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        for attr in attrs {
            if !attr.path().is_ident("table") {
                continue;
            }

            if self.table.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
            }

            let syn::Meta::NameValue(meta) = &attr.meta else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `table = \"table_name\"`",
                ));
            };

            let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = &meta.value
            else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected `table = \"table_name\"`",
                ));
            };

            if lit.value().is_empty() {
                return Err(syn::Error::new_spanned(lit, "table name must not be empty"));
            }

            self.table = Some(lit.clone());
        }

        Ok(())
    }
}
