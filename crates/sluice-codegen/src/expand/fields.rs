use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_fields_struct(&self) -> TokenStream {
        let sluice = &self.sluice;
        let vis = &self.table.vis;
        let fields_struct_ident = &self.table.fields_struct_ident;

        let methods = self.table.fields.iter().map(|field| {
            let field_ident = &field.name.ident;
            let ty = &field.ty;
            let index = util::int(field.id);

            quote! {
                #vis fn #field_ident(&self) -> #sluice::Path<#ty> {
                    #sluice::Path::new(self.source, #index)
                }
            }
        });

        quote! {
            #[derive(Debug, Clone, Copy)]
            #vis struct #fields_struct_ident {
                source: #sluice::SourceId,
            }

            impl #fields_struct_ident {
                #( #methods )*
            }
        }
    }
}
