mod eval;

mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_cast;
pub use expr_cast::ExprCast;

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_conditional;
pub use expr_conditional::ExprConditional;

mod expr_exists;
pub use expr_exists::ExprExists;

mod expr_func;
pub use expr_func::ExprFunc;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_in_subquery;
pub use expr_in_subquery::ExprInSubquery;

mod expr_unary_op;
pub use expr_unary_op::ExprUnaryOp;

mod func;
pub use func::Func;

mod infer;
pub use infer::ResolveColumn;

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod source_id;
pub use source_id::SourceId;

mod value;
pub use value::Value;

mod visit;
pub use visit::{walk_expr, Visit};
