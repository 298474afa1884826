/// A fieldless enum stored as its discriminant.
#[derive(Debug)]
pub(crate) struct Enum {
    pub(crate) ident: syn::Ident,
}

impl Enum {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "enum types cannot have generic parameters",
            ));
        }

        if ast.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "enum types must have at least one variant",
            ));
        }

        let mut errs = super::ErrorSet::new();

        for variant in &ast.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                errs.push(syn::Error::new_spanned(
                    variant,
                    "enum variants stored in a column cannot have fields",
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
        })
    }
}
