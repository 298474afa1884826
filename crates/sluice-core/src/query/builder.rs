use super::{OrderBy, Operation, QueryModel, TerminalKind};
use crate::{
    stmt::{Expr, ExprColumn, Value, Visit},
    Error, Result,
};

/// Operations the builder knows how to fold, in the order they are listed in
/// error messages.
pub const SUPPORTED_OPERATIONS: &[&str] = &[
    "Where",
    "OrderBy",
    "OrderByDescending",
    "ThenBy",
    "ThenByDescending",
    "Skip",
    "Take",
    "Select",
    "Distinct",
    "Count",
    "LongCount",
    "First",
    "FirstOrDefault",
    "Single",
    "SingleOrDefault",
    "Last",
    "LastOrDefault",
    "Any",
];

/// Folds `operations`, in order, into `model`.
pub fn build(
    model: QueryModel,
    operations: impl IntoIterator<Item = Operation>,
) -> Result<QueryModel> {
    operations
        .into_iter()
        .try_fold(model, |model, operation| model.apply(operation))
}

impl QueryModel {
    /// Applies one operation, returning the extended model.
    pub fn apply(mut self, operation: Operation) -> Result<QueryModel> {
        log::trace!(
            "folding operation; table={} operation={}",
            self.table.name,
            operation
        );

        if !self.terminal.is_sequence() {
            return Err(Error::invalid_argument(format!(
                "`{}` cannot follow terminal operation `{}`",
                operation.method,
                self.terminal.name()
            )));
        }

        let Operation { method, mut args } = operation;

        match method.as_str() {
            "Where" => {
                let predicate = single_arg(&method, &mut args)?;
                self.check_predicate(&method, &predicate)?;
                self.and_predicate(predicate);
            }
            "OrderBy" | "OrderByDescending" | "ThenBy" | "ThenByDescending" => {
                let expr = single_arg(&method, &mut args)?;
                let column = self.ordering_column(&expr)?;
                let ordering = if method.ends_with("Descending") {
                    OrderBy::desc(column)
                } else {
                    OrderBy::asc(column)
                };

                self.orderings.push(ordering);
            }
            "Skip" => {
                let count = single_arg(&method, &mut args)?;
                self.skip = Some(count_arg(&method, &count)?);
            }
            "Take" => {
                let count = single_arg(&method, &mut args)?;
                self.take = Some(count_arg(&method, &count)?);
            }
            "Select" => {
                if args.is_empty() {
                    return Err(Error::invalid_argument(
                        "`Select` expects at least one column",
                    ));
                }

                self.projection = args
                    .iter()
                    .map(|expr| self.own_column(expr, "projection"))
                    .collect::<Result<_>>()?;
            }
            "Distinct" => {
                if !args.is_empty() {
                    return Err(arity(&method, "no arguments", args.len()));
                }

                self.distinct = true;
            }
            "Count" | "LongCount" | "First" | "FirstOrDefault" | "Single" | "SingleOrDefault"
            | "Last" | "LastOrDefault" | "Any" => {
                if args.len() > 1 {
                    return Err(arity(&method, "at most 1 argument", args.len()));
                }

                if let Some(predicate) = args.pop() {
                    self.check_predicate(&method, &predicate)?;
                    self.and_predicate(predicate);
                }

                self.terminal = terminal_kind(&method);
            }
            _ => return Err(Error::unsupported_operation(&method, SUPPORTED_OPERATIONS)),
        }

        Ok(self)
    }

    /// Every column of this query's row referenced by `predicate` must exist,
    /// and the predicate must be boolean when its type is known.
    fn check_predicate(&self, method: &str, predicate: &Expr) -> Result<()> {
        struct CheckColumns<'a> {
            model: &'a QueryModel,
            result: Result<()>,
        }

        impl Visit for CheckColumns<'_> {
            fn visit_expr_column(&mut self, i: &ExprColumn) {
                if self.result.is_ok() && i.source == self.model.source {
                    self.result = self.model.table.resolve(i.column).map(|_| ());
                }
            }
        }

        let mut check = CheckColumns {
            model: self,
            result: Ok(()),
        };
        check.visit_expr(predicate);
        check.result?;

        match predicate.infer_ty(self) {
            Some(ty) if !ty.is_bool() => Err(Error::invalid_argument(format!(
                "`{method}` expects a boolean predicate, got {ty}"
            ))),
            _ => Ok(()),
        }
    }

    /// An ordering key must be a bare column of this query's row. Implicit
    /// conversions are not looked through: ordering by a converted value is
    /// ordering by a computed value.
    fn ordering_column(&self, expr: &Expr) -> Result<usize> {
        self.own_column(expr, "ordering")
    }

    fn own_column(&self, expr: &Expr, what: &str) -> Result<usize> {
        match expr {
            Expr::Column(column) if column.source == self.source => {
                self.table.resolve(column.column)?;
                Ok(column.column)
            }
            Expr::Column(column) => Err(Error::unresolvable_member(
                format!("#{} of another query", column.column),
                &self.table.name,
            )),
            expr => Err(Error::unsupported_expression(format!(
                "unsupported {what} expression: {}",
                expr.describe()
            ))),
        }
    }
}

fn single_arg(method: &str, args: &mut Vec<Expr>) -> Result<Expr> {
    if args.len() != 1 {
        return Err(arity(method, "1 argument", args.len()));
    }

    Ok(args.remove(0))
}

/// Skip and take counts are evaluated when the query is built.
fn count_arg(method: &str, expr: &Expr) -> Result<u64> {
    if !expr.is_const() {
        return Err(Error::unsupported_expression(format!(
            "`{method}` requires a constant count, got {}",
            expr.describe()
        )));
    }

    match expr.eval_const()? {
        Value::I64(count) if count >= 0 => Ok(count as u64),
        Value::I64(count) => Err(Error::invalid_argument(format!(
            "`{method}` count must not be negative, got {count}"
        ))),
        value => Err(Error::invalid_argument(format!(
            "`{method}` expects an integer count, got {}",
            value.kind_name()
        ))),
    }
}

fn arity(method: &str, expected: &str, got: usize) -> Error {
    Error::invalid_argument(format!("`{method}` expects {expected}, got {got}"))
}

fn terminal_kind(method: &str) -> TerminalKind {
    match method {
        "Count" => TerminalKind::Count,
        "LongCount" => TerminalKind::LongCount,
        "First" => TerminalKind::First,
        "FirstOrDefault" => TerminalKind::FirstOrDefault,
        "Single" => TerminalKind::Single,
        "SingleOrDefault" => TerminalKind::SingleOrDefault,
        "Last" => TerminalKind::Last,
        "LastOrDefault" => TerminalKind::LastOrDefault,
        "Any" => TerminalKind::Any,
        _ => TerminalKind::Sequence,
    }
}
