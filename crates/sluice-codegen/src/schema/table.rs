use super::{ErrorSet, Field, TableAttr};

use std::collections::HashMap;

#[derive(Debug)]
pub(crate) struct Table {
    /// Struct attributes
    pub(crate) attr: TableAttr,

    /// Name of the mapped struct
    pub(crate) ident: syn::Ident,

    /// Visibility of the mapped struct, reused for the generated accessors
    pub(crate) vis: syn::Visibility,

    /// Mapped fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Name of the generated column accessor struct
    pub(crate) fields_struct_ident: syn::Ident,
}

impl Table {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "table fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "table types cannot have generic parameters",
            ));
        }

        let mut attr = TableAttr::default();
        attr.populate_from_ast(&ast.attrs)?;

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for (index, node) in node.named.iter().enumerate() {
            match Field::from_ast(node, index) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        if fields.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "table types must have at least one field",
            ));
        }

        let mut keys = fields.iter().filter_map(|field| field.attrs.key.as_ref());
        keys.next();
        for extra in keys {
            errs.push(syn::Error::new_spanned(
                extra,
                "only one field may be marked #[key]",
            ));
        }

        let mut seen = HashMap::new();
        for field in &fields {
            let column_name = field.column_name();
            if seen.insert(column_name.clone(), field.id).is_some() {
                errs.push(syn::Error::new_spanned(
                    &field.name.ident,
                    format!("duplicate column `{column_name}`"),
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            attr,
            ident: ast.ident.clone(),
            vis: ast.vis.clone(),
            fields,
            fields_struct_ident: struct_ident("Fields", ast),
        })
    }

    /// The database table name: the `#[table = "..."]` override, or the
    /// struct name.
    pub(crate) fn table_name(&self) -> String {
        self.attr
            .table
            .as_ref()
            .map(syn::LitStr::value)
            .unwrap_or_else(|| self.ident.to_string())
    }
}

fn struct_ident(suffix: &str, model: &syn::ItemStruct) -> syn::Ident {
    syn::Ident::new(&format!("{}{}", model.ident, suffix), model.ident.span())
}
