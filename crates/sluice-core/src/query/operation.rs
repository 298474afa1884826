use crate::stmt::Expr;

use std::fmt;

/// One step of a query, as recorded by the typed surface.
///
/// `method` is the operation name (`Where`, `OrderBy`, `Take`, ...). The
/// builder validates the name and arguments; recording never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub method: String,
    pub args: Vec<Expr>,
}

impl Operation {
    pub fn new(method: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Operation {
        Operation {
            method: method.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn filter(predicate: Expr) -> Operation {
        Operation::new("Where", [predicate])
    }

    pub fn order_by(column: Expr) -> Operation {
        Operation::new("OrderBy", [column])
    }

    pub fn order_by_descending(column: Expr) -> Operation {
        Operation::new("OrderByDescending", [column])
    }

    pub fn then_by(column: Expr) -> Operation {
        Operation::new("ThenBy", [column])
    }

    pub fn then_by_descending(column: Expr) -> Operation {
        Operation::new("ThenByDescending", [column])
    }

    pub fn skip(count: impl Into<Expr>) -> Operation {
        Operation::new("Skip", [count.into()])
    }

    pub fn take(count: impl Into<Expr>) -> Operation {
        Operation::new("Take", [count.into()])
    }

    pub fn select(columns: impl IntoIterator<Item = Expr>) -> Operation {
        Operation::new("Select", columns)
    }

    pub fn distinct() -> Operation {
        Operation::new("Distinct", Vec::<Expr>::new())
    }

    /// A terminal operation, optionally with an inline predicate.
    pub fn terminal(method: impl Into<String>, predicate: Option<Expr>) -> Operation {
        Operation::new(method, predicate)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.method, self.args.len())
    }
}
