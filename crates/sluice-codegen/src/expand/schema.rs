use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_table_impl(&self) -> TokenStream {
        let sluice = &self.sluice;
        let ident = &self.table.ident;
        let fields_struct_ident = &self.table.fields_struct_ident;
        let table_name = self.table.table_name();

        let columns = self.table.fields.iter().map(|field| {
            let ty = &field.ty;
            let column_name = field.column_name();
            let member_name = field.name.member_name();

            let column_ty = match field.attrs.column.as_ref().and_then(|column| column.ty) {
                Some(column_ty) => quote!(#sluice::ColumnType::#column_ty),
                None => quote!(<#ty as #sluice::Primitive>::TYPE),
            };

            let primary_key = field
                .attrs
                .key
                .as_ref()
                .map(|_| quote!(.primary_key()));

            quote! {
                .column(
                    #sluice::Column::new(#column_name, #member_name, #column_ty)
                        .nullable(<#ty as #sluice::Primitive>::NULLABLE)
                        #primary_key
                )
            }
        });

        quote! {
            impl #sluice::Table for #ident {
                type Fields = #fields_struct_ident;

                fn schema() -> #sluice::Result<#sluice::TableSchema> {
                    #sluice::TableSchema::builder(#table_name)
                        #( #columns )*
                        .build()
                }

                fn fields(source: #sluice::SourceId) -> #fields_struct_ident {
                    #fields_struct_ident { source }
                }
            }
        }
    }
}
