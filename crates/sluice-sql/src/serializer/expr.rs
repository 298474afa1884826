use super::{
    func::FuncCall, ty::cast_type_name, ColumnRef, Comma, Formatter, Ident, Params, Select, ToSql,
};
use crate::Dialect;

use sluice_core::{
    query::TerminalKind,
    stmt::{
        BinaryOp, Expr, ExprBinaryOp, ExprCast, ExprExists, ExprInList, ExprInSubquery, UnaryOp,
        Value,
    },
    Error, Result,
};

/// An expression written in boolean form, as in a WHERE clause.
pub(super) struct Predicate<'a>(pub(super) &'a Expr);

/// An expression written as a value, as in a SELECT list or a function
/// argument.
pub(super) struct Operand<'a>(pub(super) &'a Expr);

impl ToSql for Predicate<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let expr = self.0;

        match expr {
            _ if expr.is_const() => match eval(expr)? {
                Value::Bool(true) => fmt!(f, "(1 = 1)"),
                Value::Bool(false) => fmt!(f, "(1 = 0)"),
                value => {
                    return Err(Error::unsupported_expression(format!(
                        "{} literal used as a predicate",
                        value.kind_name()
                    )))
                }
            },
            Expr::BinaryOp(e) if e.op.is_logical() => {
                fmt!(f, "(" Predicate(&e.lhs) " " e.op " " Predicate(&e.rhs) ")");
            }
            Expr::BinaryOp(e) if e.op.is_comparison() => comparison(f, e)?,
            Expr::UnaryOp(e) if e.op == UnaryOp::Not => {
                fmt!(f, "(not " Predicate(&e.expr) ")");
            }
            Expr::Func(e) if e.func.is_predicate() => fmt!(f, FuncCall(e)),
            Expr::InList(e) => in_list(f, e)?,
            Expr::InSubquery(e) => in_subquery(f, e)?,
            Expr::Exists(e) => exists(f, e)?,
            _ => match f.infer_ty(expr) {
                Some(ty) if !ty.is_bool() => {
                    return Err(Error::unsupported_expression(format!(
                        "{} of type {ty} used as a predicate",
                        expr.describe()
                    )))
                }
                _ => {
                    let t = if f.dialect().is_postgresql() { "true" } else { "1" };
                    fmt!(f, "(" Operand(expr) " = " t ")");
                }
            },
        }

        Ok(())
    }
}

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let expr = strip_widening(f, self.0);

        // Bare columns first, then constants, which fold into a single
        // parameter. Everything else is a computed value over columns.
        if let Expr::Column(column) = expr {
            return ColumnRef(column).to_sql(f);
        }

        if expr.is_const() {
            let value = eval(expr)?;
            return (&value).to_sql(f);
        }

        match expr {
            _ if expr.is_predicate() => {
                let (t, e) = if f.dialect().is_postgresql() {
                    ("true", "false")
                } else {
                    ("1", "0")
                };
                fmt!(f, "(CASE WHEN " Predicate(expr) " THEN " t " ELSE " e " END)");
            }
            Expr::Func(e) => fmt!(f, FuncCall(e)),
            Expr::Cast(e) => cast(f, e)?,
            Expr::Conditional(e) => {
                fmt!(
                    f,
                    "(CASE WHEN " Predicate(&e.test)
                    " THEN " Operand(&e.then)
                    " ELSE " Operand(&e.otherwise) " END)"
                );
            }
            Expr::BinaryOp(e) => arithmetic(f, e)?,
            Expr::UnaryOp(e) if e.op == UnaryOp::Neg => fmt!(f, "(-" Operand(&e.expr) ")"),
            Expr::UnaryOp(e) if e.op == UnaryOp::BitNot => fmt!(f, "(~" Operand(&e.expr) ")"),
            _ => {
                return Err(Error::unsupported_expression(format!(
                    "{} on dialect {}",
                    expr.describe(),
                    f.dialect()
                )))
            }
        }

        Ok(())
    }
}

impl ToSql for BinaryOp {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        use std::fmt::Write;

        write!(f.dst, "{self}")?;
        Ok(())
    }
}

/// Looks through implicit conversions that only widen, e.g. an integer
/// column compared with a float.
fn strip_widening<'e, P>(f: &Formatter<'_, P>, expr: &'e Expr) -> &'e Expr {
    match expr {
        Expr::Cast(ExprCast {
            expr: inner,
            ty,
            implicit: true,
        }) => {
            let inner = strip_widening(f, inner);
            match inner.infer_ty(f) {
                Some(from) if !from.widens_to(*ty) => expr,
                _ => inner,
            }
        }
        _ => expr,
    }
}

/// Evaluates a constant sub-expression. Failures are reported as
/// unsupported expressions.
pub(super) fn eval(expr: &Expr) -> Result<Value> {
    expr.eval_const().map_err(|err| {
        err.context(Error::unsupported_expression(format!(
            "constant {}",
            expr.describe()
        )))
    })
}

/// `NULL` never compares equal inside `IN`, so null members become an
/// `is null` test.
fn in_list<P: Params>(f: &mut Formatter<'_, P>, e: &ExprInList) -> Result<()> {
    let values: Vec<&Value> = e.list.iter().filter(|value| !value.is_null()).collect();
    let has_null = values.len() < e.list.len();

    match (values.is_empty(), has_null) {
        (true, false) => fmt!(f, "(1 = 0)"),
        (true, true) => fmt!(f, "(" Operand(&e.expr) " is null)"),
        (false, false) => fmt!(f, "(" Operand(&e.expr) " IN (" Comma(values) "))"),
        (false, true) => {
            fmt!(
                f,
                "(" Operand(&e.expr) " IN (" Comma(values) ") or " Operand(&e.expr) " is null)"
            );
        }
    }

    Ok(())
}

fn comparison<P: Params>(f: &mut Formatter<'_, P>, e: &ExprBinaryOp) -> Result<()> {
    match (e.lhs.is_const(), e.rhs.is_const()) {
        (false, true) => against_value(f, e.op, &e.lhs, &e.rhs),
        // Keep `column OP value` canonical.
        (true, false) => against_value(f, e.op.commute(), &e.rhs, &e.lhs),
        _ => {
            fmt!(f, "(" Operand(&e.lhs) " " e.op " " Operand(&e.rhs) ")");
            Ok(())
        }
    }
}

fn against_value<P: Params>(
    f: &mut Formatter<'_, P>,
    op: BinaryOp,
    operand: &Expr,
    value: &Expr,
) -> Result<()> {
    let value = eval(value)?;

    if value.is_null() {
        match op {
            BinaryOp::Eq => fmt!(f, "(" Operand(operand) " is null)"),
            BinaryOp::Ne => fmt!(f, "(" Operand(operand) " is not null)"),
            op => {
                return Err(Error::unsupported_expression(format!(
                    "operator `{}` against null",
                    op.name()
                )))
            }
        }
    } else {
        let value = &value;
        fmt!(f, "(" Operand(operand) " " op " " value ")");
    }

    Ok(())
}

fn arithmetic<P: Params>(f: &mut Formatter<'_, P>, e: &ExprBinaryOp) -> Result<()> {
    let (lhs, rhs) = (Operand(&e.lhs), Operand(&e.rhs));

    match e.op {
        BinaryOp::Coalesce => fmt!(f, "COALESCE(" lhs ", " rhs ")"),
        BinaryOp::Add if is_text(f, e) => {
            let concat = if f.dialect().is_sql_server() { " + " } else { " || " };
            fmt!(f, "(" lhs concat rhs ")");
        }
        BinaryOp::BitXor if f.dialect().is_sqlite() => {
            fmt!(
                f,
                "((" lhs " | " rhs ") - (" Operand(&e.lhs) " & " Operand(&e.rhs) "))"
            );
        }
        op if op.is_arithmetic() || op.is_bitwise() => {
            fmt!(f, "(" lhs " " op " " rhs ")");
        }
        op => {
            return Err(Error::unsupported_expression(format!(
                "operator `{}` in value position",
                op.name()
            )))
        }
    }

    Ok(())
}

fn is_text<P>(f: &Formatter<'_, P>, e: &ExprBinaryOp) -> bool {
    [&e.lhs, &e.rhs]
        .into_iter()
        .any(|operand| operand.infer_ty(f).is_some_and(|ty| ty.is_text()))
}

pub(super) fn cast<P: Params>(f: &mut Formatter<'_, P>, e: &ExprCast) -> Result<()> {
    let dialect = f.dialect();
    let Some(name) = cast_type_name(dialect, e.ty) else {
        return Err(Error::unsupported_expression(format!(
            "conversion to {} on dialect {dialect}",
            e.ty
        )));
    };

    fmt!(f, "CAST(" Operand(&e.expr) " AS " name ")");
    Ok(())
}

fn in_subquery<P: Params>(f: &mut Formatter<'_, P>, e: &ExprInSubquery) -> Result<()> {
    if e.query.projection.len() != 1 {
        return Err(Error::unsupported_expression(format!(
            "subquery membership requires exactly one selected column, got {}",
            e.query.projection.len()
        )));
    }

    if !e.query.terminal.is_sequence() {
        return Err(Error::unsupported_expression(format!(
            "subquery membership over terminal `{}`",
            e.query.terminal.name()
        )));
    }

    fmt!(f, "(" Operand(&e.expr) " IN (" Select(&e.query) "))");
    Ok(())
}

fn exists<P: Params>(f: &mut Formatter<'_, P>, e: &ExprExists) -> Result<()> {
    let inner = &*e.query;

    if inner.is_paged() {
        return Err(Error::unsupported_expression(
            "paged subquery inside EXISTS",
        ));
    }

    if !matches!(inner.terminal, TerminalKind::Sequence | TerminalKind::Any) {
        return Err(Error::unsupported_expression(format!(
            "EXISTS over terminal `{}`",
            inner.terminal.name()
        )));
    }

    // Qualified names cannot tell two unaliased instances of one table apart.
    if f.scopes.iter().any(|scope| scope.table.name == inner.table.name) {
        return Err(Error::unsupported_expression(format!(
            "correlated EXISTS over the enclosing table `{}`",
            inner.table.name
        )));
    }

    let qualify = std::mem::replace(&mut f.qualify, true);
    f.push_scope(inner);

    let ret = exists_body(f, e);

    f.pop_scope();
    f.qualify = qualify;
    ret
}

fn exists_body<P: Params>(f: &mut Formatter<'_, P>, e: &ExprExists) -> Result<()> {
    fmt!(f, "EXISTS (SELECT 1 FROM " Ident(&e.query.table.name));

    let filters: Vec<&Expr> = e
        .query
        .predicate
        .iter()
        .chain(e.condition.as_deref())
        .collect();

    let mut s = " WHERE ";
    for filter in filters {
        fmt!(f, s Predicate(filter));
        s = " AND ";
    }

    fmt!(f, ")");
    Ok(())
}

impl Dialect {
    /// The operator for case-insensitive pattern matching.
    pub(super) fn ilike(self) -> &'static str {
        match self {
            Dialect::PostgreSql => "ILIKE",
            Dialect::Sqlite | Dialect::SqlServer => "LIKE",
        }
    }
}
