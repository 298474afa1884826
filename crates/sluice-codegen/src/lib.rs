mod expand;
mod schema;

use proc_macro2::TokenStream;

/// Expands `#[derive(Table)]`.
pub fn generate(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let table = schema::Table::from_ast(&item)?;

    Ok(expand::table(&table))
}

/// Expands `#[derive(Enum)]`.
pub fn generate_enum(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemEnum = syn::parse2(input)?;
    let enumeration = schema::Enum::from_ast(&item)?;

    Ok(expand::enumeration(&enumeration))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use quote::quote;

    fn error(input: TokenStream) -> String {
        match generate(input) {
            Ok(output) => panic!("expected an error, got {output}"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn table_name_and_column_names() {
        let output = generate(quote! {
            #[table = "Users"]
            pub struct User {
                #[key]
                id: i64,
                created_at: String,
                #[column("Nick")]
                nickname: Option<String>,
            }
        })
        .unwrap()
        .to_string();

        assert!(output.contains("builder (\"Users\")"), "{output}");
        assert!(output.contains("\"CreatedAt\" , \"created_at\""), "{output}");
        assert!(output.contains("\"Nick\" , \"nickname\""), "{output}");
        assert!(output.contains("primary_key ()"), "{output}");
        assert!(output.contains("struct UserFields"), "{output}");
    }

    #[test]
    fn default_table_name_is_struct_name() {
        let output = generate(quote! {
            struct Order {
                id: i64,
            }
        })
        .unwrap()
        .to_string();

        assert!(output.contains("builder (\"Order\")"), "{output}");
        assert!(!output.contains("primary_key"), "{output}");
    }

    #[test]
    fn rejects_unsupported_shapes() {
        assert_eq!(
            error(quote!(struct User(i64);)),
            "table fields must be named"
        );
        assert_eq!(
            error(quote!(struct User<T> { id: T })),
            "table types cannot have generic parameters"
        );
        assert_eq!(
            error(quote!(struct User {})),
            "table types must have at least one field"
        );
    }

    #[test]
    fn rejects_conflicting_attributes() {
        assert_eq!(
            error(quote! {
                struct User {
                    #[key]
                    id: i64,
                    #[key]
                    other_id: i64,
                }
            }),
            "only one field may be marked #[key]"
        );

        assert_eq!(
            error(quote! {
                struct User {
                    #[key]
                    #[key]
                    id: i64,
                }
            }),
            "duplicate #[key] attribute"
        );

        assert_eq!(
            error(quote! {
                struct User {
                    #[column("Name")]
                    first: String,
                    #[column("Name")]
                    last: String,
                }
            }),
            "duplicate column `Name`"
        );

        assert_eq!(
            error(quote! {
                #[table = "A"]
                #[table = "B"]
                struct User {
                    id: i64,
                }
            }),
            "duplicate `table` attribute"
        );
    }

    #[test]
    fn enum_variants_must_be_unit() {
        assert!(generate_enum(quote!(enum Status { Active, Banned })).is_ok());

        let err = generate_enum(quote!(enum Status { Active(u8) })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "enum variants stored in a column cannot have fields"
        );
    }
}
