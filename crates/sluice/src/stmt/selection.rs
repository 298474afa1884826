use super::Path;

use sluice_core::stmt;

/// Columns a query may project.
pub trait Selection {
    fn into_columns(self) -> Vec<stmt::Expr>;
}

impl<T: ?Sized> Selection for Path<T> {
    fn into_columns(self) -> Vec<stmt::Expr> {
        vec![self.untyped()]
    }
}

macro_rules! impl_selection_for_tuple {
    ( $( ( $( $name:ident ),* ) )* ) => {
        $(
            impl<$( $name: Selection ),*> Selection for ( $( $name, )* ) {
                #[allow(non_snake_case)]
                fn into_columns(self) -> Vec<stmt::Expr> {
                    let ( $( $name, )* ) = self;
                    let mut columns = vec![];
                    $( columns.extend($name.into_columns()); )*
                    columns
                }
            }
        )*
    };
}

impl_selection_for_tuple! {
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, E)
}
