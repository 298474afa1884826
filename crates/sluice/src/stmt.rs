mod expr;
pub use expr::{now, utc_now, Expr};

mod into_expr;
pub use into_expr::IntoExpr;

mod path;
pub use path::Path;

mod primitive;
pub use primitive::{Integer, Numeric, Primitive, Temporal, Text};

mod selection;
pub use selection::Selection;
