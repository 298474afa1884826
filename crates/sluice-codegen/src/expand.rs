mod fields;
mod schema;
mod util;

use crate::schema::{Enum, Table};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The table being expanded
    table: &'a Table,

    /// Path prefix for sluice types
    sluice: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let table_impl = self.expand_table_impl();
        let fields_struct = self.expand_fields_struct();

        wrap_in_const(quote! {
            #table_impl
            #fields_struct
        })
    }
}

pub(super) fn table(table: &Table) -> TokenStream {
    Expand {
        table,
        sluice: quote!(_sluice::codegen_support),
    }
    .expand()
}

pub(super) fn enumeration(enumeration: &Enum) -> TokenStream {
    let ident = &enumeration.ident;

    wrap_in_const(quote! {
        use _sluice::codegen_support::{ColumnType, Primitive, Value};

        impl Primitive for #ident {
            const TYPE: ColumnType = ColumnType::Enum;

            fn into_value(self) -> Value {
                Value::Enum(self as i64)
            }
        }
    })
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use sluice as _sluice;
            #code
        };
    }
}
