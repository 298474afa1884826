use super::{Expr, Func};

/// A call to one of the known methods. The first argument is the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFunc {
    pub func: Func,
    pub args: Vec<Expr>,
}

impl ExprFunc {
    pub fn receiver(&self) -> Option<&Expr> {
        self.args.first()
    }

    pub fn arg(&self, index: usize) -> Option<&Expr> {
        self.args.get(index)
    }
}

impl Expr {
    pub fn func(func: Func, args: impl IntoIterator<Item = Expr>) -> Self {
        ExprFunc {
            func,
            args: args.into_iter().collect(),
        }
        .into()
    }

    pub fn is_func(&self) -> bool {
        matches!(self, Self::Func(_))
    }
}

impl From<ExprFunc> for Expr {
    fn from(value: ExprFunc) -> Self {
        Self::Func(value)
    }
}
