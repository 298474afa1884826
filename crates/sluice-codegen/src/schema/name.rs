use heck::{ToSnakeCase, ToUpperCamelCase};
use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Name {
    /// Name parts
    pub(crate) parts: Vec<String>,

    /// field/method identifier
    pub(crate) ident: syn::Ident,
}

impl Name {
    pub(crate) fn from_ident(ident: &syn::Ident) -> Self {
        let snake = ident.unraw().to_string().to_snake_case();
        let parts = snake.split('_').map(String::from).collect();

        Self {
            parts,
            ident: ident.clone(),
        }
    }

    /// The member name recorded in the schema, as written in the source.
    pub(crate) fn member_name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Default column name: `created_at` maps to `CreatedAt`.
    pub(crate) fn column_name(&self) -> String {
        self.parts.join("_").to_upper_camel_case()
    }
}
