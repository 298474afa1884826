use quote::quote;

/// Contents of a `#[column(...)]` attribute.
#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) ty: Option<ColumnType>,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut result = Self {
            name: None,
            ty: None,
        };

        // Allowed syntax:
        //
        // #[column("name")]
        // #[column(type = int)]
        // #[column("name", type = int)]
        // #[column(type = int, "name")]
        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(syn::LitStr) {
                if result.name.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column name"));
                }
                let name: syn::LitStr = input.parse()?;
                if name.value().is_empty() {
                    return Err(syn::Error::new(name.span(), "column name must not be empty"));
                }
                result.name = Some(name);
            } else if lookahead.peek(syn::Token![type]) {
                if result.ty.is_some() {
                    return Err(syn::Error::new(input.span(), "duplicate column type"));
                }
                let _type_token: syn::Token![type] = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                result.ty = Some(input.parse()?);
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        Ok(result)
    }
}

mod kw {
    syn::custom_keyword!(int);
    syn::custom_keyword!(float);
    syn::custom_keyword!(text);
    syn::custom_keyword!(boolean);
    syn::custom_keyword!(datetime);
    syn::custom_keyword!(guid);
    syn::custom_keyword!(blob);
}

/// Storage class overriding the one implied by the field's Rust type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnType {
    Int,
    Float,
    Text,
    Bool,
    DateTime,
    Guid,
    Blob,
    Enum,
}

impl syn::parse::Parse for ColumnType {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::int) {
            let _kw: kw::int = input.parse()?;
            Ok(Self::Int)
        } else if lookahead.peek(kw::float) {
            let _kw: kw::float = input.parse()?;
            Ok(Self::Float)
        } else if lookahead.peek(kw::text) {
            let _kw: kw::text = input.parse()?;
            Ok(Self::Text)
        } else if lookahead.peek(kw::boolean) {
            let _kw: kw::boolean = input.parse()?;
            Ok(Self::Bool)
        } else if lookahead.peek(kw::datetime) {
            let _kw: kw::datetime = input.parse()?;
            Ok(Self::DateTime)
        } else if lookahead.peek(kw::guid) {
            let _kw: kw::guid = input.parse()?;
            Ok(Self::Guid)
        } else if lookahead.peek(kw::blob) {
            let _kw: kw::blob = input.parse()?;
            Ok(Self::Blob)
        } else if lookahead.peek(syn::Token![enum]) {
            let _kw: syn::Token![enum] = input.parse()?;
            Ok(Self::Enum)
        } else {
            Err(lookahead.error())
        }
    }
}

impl quote::ToTokens for ColumnType {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        match self {
            Self::Int => quote! { Int },
            Self::Float => quote! { Float },
            Self::Text => quote! { Text },
            Self::Bool => quote! { Bool },
            Self::DateTime => quote! { DateTime },
            Self::Guid => quote! { Guid },
            Self::Blob => quote! { Blob },
            Self::Enum => quote! { Enum },
        }
        .to_tokens(tokens);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn name_and_type_in_any_order() {
        let column: Column = syn::parse_quote!("Status", type = enum);
        assert_eq!(column.name.map(|name| name.value()).as_deref(), Some("Status"));
        assert_eq!(column.ty, Some(ColumnType::Enum));

        let column: Column = syn::parse_quote!(type = text, "Code");
        assert_eq!(column.name.map(|name| name.value()).as_deref(), Some("Code"));
        assert_eq!(column.ty, Some(ColumnType::Text));
    }

    #[test]
    fn rejects_duplicates_and_unknown_types() {
        assert!(syn::parse2::<Column>(quote!("A", "B")).is_err());
        assert!(syn::parse2::<Column>(quote!(type = int, type = float)).is_err());
        assert!(syn::parse2::<Column>(quote!(type = decimal)).is_err());
        assert!(syn::parse2::<Column>(quote!("")).is_err());
    }
}
