use super::*;

/// A scalar expression over the rows of one or more queries.
///
/// The tree is immutable once built. Column references name the row they are
/// read from through a [`SourceId`], which is how the SQL generator tells an
/// outer-row column from an inner-row one inside a correlated subquery.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary expression
    BinaryOp(ExprBinaryOp),

    /// Convert an expression to a different column type
    Cast(ExprCast),

    /// References a column of a query's row
    Column(ExprColumn),

    /// `test ? then : otherwise`
    Conditional(ExprConditional),

    /// Whether a correlated subquery returns any row
    Exists(ExprExists),

    /// Function call
    Func(ExprFunc),

    /// The expression is one of a fixed list of values
    InList(ExprInList),

    /// The expression is contained by the given subquery
    InSubquery(ExprInSubquery),

    /// Unary expression
    UnaryOp(ExprUnaryOp),

    /// Evaluates to a constant value
    Value(Value),
}

impl Expr {
    pub fn null() -> Self {
        Self::Value(Value::Null)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn is_value_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if the expression can be folded to a value on the
    /// client, without reading any row.
    pub fn is_const(&self) -> bool {
        match self {
            Self::Value(_) => true,
            Self::Column(_) | Self::Exists(_) | Self::InSubquery(_) => false,
            Self::BinaryOp(e) => e.lhs.is_const() && e.rhs.is_const(),
            Self::Cast(e) => e.expr.is_const(),
            Self::Conditional(e) => {
                e.test.is_const() && e.then.is_const() && e.otherwise.is_const()
            }
            Self::Func(e) => e.func.is_foldable() && e.args.iter().all(Expr::is_const),
            Self::InList(e) => e.expr.is_const(),
            Self::UnaryOp(e) => e.expr.is_const(),
        }
    }

    /// Returns `true` if any column of the given row is referenced, including
    /// from inside subqueries.
    pub fn references_source(&self, source: SourceId) -> bool {
        struct Finder {
            source: SourceId,
            found: bool,
        }

        impl Visit for Finder {
            fn visit_expr_column(&mut self, i: &ExprColumn) {
                self.found |= i.source == self.source;
            }
        }

        let mut finder = Finder {
            source,
            found: false,
        };
        finder.visit_expr(self);
        finder.found
    }

    /// Short description of the node, used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::BinaryOp(e) => format!("operator `{}`", e.op.name()),
            Self::Cast(e) => format!("conversion to {}", e.ty),
            Self::Column(_) => "column reference".to_string(),
            Self::Conditional(_) => "conditional".to_string(),
            Self::Exists(_) => "EXISTS subquery".to_string(),
            Self::Func(e) => format!("method `{}`", e.func.name()),
            Self::InList(_) => "list membership".to_string(),
            Self::InSubquery(_) => "subquery membership".to_string(),
            Self::UnaryOp(e) => format!("operator `{}`", e.op.name()),
            Self::Value(value) => format!("{} literal", value.kind_name()),
        }
    }
}

macro_rules! impl_from_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    &String,
    &str,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    uuid::Uuid,
    Vec<u8>
);

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}
