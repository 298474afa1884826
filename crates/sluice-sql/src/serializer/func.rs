use super::{
    expr::{cast, eval},
    Formatter, Operand, Params, ToSql,
};
use crate::Dialect;

use sluice_core::{
    stmt::{Expr, ExprCast, ExprFunc, Func, Value},
    Error, Result,
};

/// A method call, mapped to the dialect's SQL functions.
pub(super) struct FuncCall<'a>(pub(super) &'a ExprFunc);

impl ToSql for FuncCall<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let e = self.0;
        let func = e.func;
        let dialect = f.dialect();

        if !func.arity().contains(&e.args.len()) {
            return Err(Error::invalid_argument(format!(
                "`{}` expects {:?} arguments, got {}",
                func.name(),
                func.arity(),
                e.args.len()
            )));
        }

        let arg = |i: usize| Operand(&e.args[i]);

        use Dialect::*;
        use Func::*;

        match (func, dialect) {
            // Text
            (Contains, Sqlite) => fmt!(f, "(instr(" arg(0) ", " arg(1) ") > 0)"),
            (Contains, PostgreSql) => fmt!(f, "(strpos(" arg(0) ", " arg(1) ") > 0)"),
            (Contains, SqlServer) => fmt!(f, "(CHARINDEX(" arg(1) ", " arg(0) ") > 0)"),
            (StartsWith, _) => starts_with(f, e)?,
            (EndsWith, _) => ends_with(f, e)?,
            (StartsWithIgnoreCase | EndsWithIgnoreCase, _) => like(f, e)?,
            (Replace, Sqlite | PostgreSql) => {
                fmt!(f, "replace(" arg(0) ", " arg(1) ", " arg(2) ")");
            }
            (Replace, SqlServer) => fmt!(f, "REPLACE(" arg(0) ", " arg(1) ", " arg(2) ")"),
            (ToLower, Sqlite | PostgreSql) => fmt!(f, "lower(" arg(0) ")"),
            (ToLower, SqlServer) => fmt!(f, "LOWER(" arg(0) ")"),
            (ToUpper, Sqlite | PostgreSql) => fmt!(f, "upper(" arg(0) ")"),
            (ToUpper, SqlServer) => fmt!(f, "UPPER(" arg(0) ")"),
            (Trim, Sqlite | PostgreSql) => fmt!(f, "trim(" arg(0) ")"),
            (Trim, SqlServer) => fmt!(f, "LTRIM(RTRIM(" arg(0) "))"),
            (TrimStart, Sqlite | PostgreSql) => fmt!(f, "ltrim(" arg(0) ")"),
            (TrimStart, SqlServer) => fmt!(f, "LTRIM(" arg(0) ")"),
            (TrimEnd, Sqlite | PostgreSql) => fmt!(f, "rtrim(" arg(0) ")"),
            (TrimEnd, SqlServer) => fmt!(f, "RTRIM(" arg(0) ")"),
            (Substring, _) => substring(f, e)?,
            (IndexOf, Sqlite) => fmt!(f, "(instr(" arg(0) ", " arg(1) ") - 1)"),
            (IndexOf, PostgreSql) => fmt!(f, "(strpos(" arg(0) ", " arg(1) ") - 1)"),
            (IndexOf, SqlServer) => fmt!(f, "(CHARINDEX(" arg(1) ", " arg(0) ") - 1)"),
            (Length, Sqlite | PostgreSql) => fmt!(f, "length(" arg(0) ")"),
            (Length, SqlServer) => fmt!(f, "LEN(" arg(0) ")"),
            (IsNullOrEmpty, _) => fmt!(f, "(" arg(0) " is null or " arg(0) " = '')"),
            (IsNullOrWhiteSpace, Sqlite | PostgreSql) => {
                fmt!(f, "(" arg(0) " is null or trim(" arg(0) ") = '')");
            }
            (IsNullOrWhiteSpace, SqlServer) => {
                fmt!(f, "(" arg(0) " is null or LTRIM(RTRIM(" arg(0) ")) = '')");
            }
            (Concat, Sqlite | PostgreSql) => fmt!(f, "(" arg(0) " || " arg(1) ")"),
            (Concat, SqlServer) => fmt!(f, "(" arg(0) " + " arg(1) ")"),

            // Numbers
            (Abs, Sqlite | PostgreSql) => fmt!(f, "abs(" arg(0) ")"),
            (Abs, SqlServer) => fmt!(f, "ABS(" arg(0) ")"),
            (Round, Sqlite | PostgreSql) if e.args.len() == 1 => fmt!(f, "round(" arg(0) ")"),
            (Round, Sqlite | PostgreSql) => fmt!(f, "round(" arg(0) ", " arg(1) ")"),
            (Round, SqlServer) if e.args.len() == 1 => fmt!(f, "ROUND(" arg(0) ", 0)"),
            (Round, SqlServer) => fmt!(f, "ROUND(" arg(0) ", " arg(1) ")"),
            // No native floor/ceil: compare the value with its integer cast.
            (Floor, Sqlite) => fmt!(
                f,
                "(CASE WHEN " arg(0) " < CAST(" arg(0) " AS INTEGER) THEN CAST(" arg(0)
                " AS INTEGER) - 1 ELSE CAST(" arg(0) " AS INTEGER) END)"
            ),
            (Ceiling, Sqlite) => fmt!(
                f,
                "(CASE WHEN " arg(0) " > CAST(" arg(0) " AS INTEGER) THEN CAST(" arg(0)
                " AS INTEGER) + 1 ELSE CAST(" arg(0) " AS INTEGER) END)"
            ),
            (Floor, PostgreSql) => fmt!(f, "floor(" arg(0) ")"),
            (Floor, SqlServer) => fmt!(f, "FLOOR(" arg(0) ")"),
            (Ceiling, PostgreSql) => fmt!(f, "ceil(" arg(0) ")"),
            (Ceiling, SqlServer) => fmt!(f, "CEILING(" arg(0) ")"),
            (Max, Sqlite) => fmt!(f, "max(" arg(0) ", " arg(1) ")"),
            (Max, PostgreSql) => fmt!(f, "greatest(" arg(0) ", " arg(1) ")"),
            (Max, SqlServer) => fmt!(
                f,
                "(CASE WHEN " arg(0) " >= " arg(1) " THEN " arg(0) " ELSE " arg(1) " END)"
            ),
            (Min, Sqlite) => fmt!(f, "min(" arg(0) ", " arg(1) ")"),
            (Min, PostgreSql) => fmt!(f, "least(" arg(0) ", " arg(1) ")"),
            (Min, SqlServer) => fmt!(
                f,
                "(CASE WHEN " arg(0) " <= " arg(1) " THEN " arg(0) " ELSE " arg(1) " END)"
            ),
            (Pow, Sqlite | PostgreSql) => fmt!(f, "power(" arg(0) ", " arg(1) ")"),
            (Pow, SqlServer) => fmt!(f, "POWER(" arg(0) ", " arg(1) ")"),
            (Sqrt, Sqlite | PostgreSql) => fmt!(f, "sqrt(" arg(0) ")"),
            (Sqrt, SqlServer) => fmt!(f, "SQRT(" arg(0) ")"),
            (Log, Sqlite | PostgreSql) => fmt!(f, "ln(" arg(0) ")"),
            (Log, SqlServer) => fmt!(f, "LOG(" arg(0) ")"),
            (Log10, Sqlite) => fmt!(f, "log10(" arg(0) ")"),
            (Log10, PostgreSql) => fmt!(f, "log(" arg(0) ")"),
            (Log10, SqlServer) => fmt!(f, "LOG10(" arg(0) ")"),

            (ConvertTo(ty), _) => cast(
                f,
                &ExprCast {
                    expr: Box::new(e.args[0].clone()),
                    ty,
                    implicit: false,
                },
            )?,

            // Dates
            (Year | Month | Day | Hour | Minute | Second, _) => date_part(f, e)?,
            (Date, Sqlite) => fmt!(f, "datetime(date(" arg(0) "))"),
            (Date, PostgreSql) => fmt!(f, "date_trunc('day', " arg(0) ")"),
            (Date, SqlServer) => fmt!(f, "CAST(CAST(" arg(0) " AS DATE) AS DATETIME2)"),
            // Sunday is 0 everywhere.
            (DayOfWeek, Sqlite) => fmt!(f, "CAST(strftime('%w', " arg(0) ") AS INTEGER)"),
            (DayOfWeek, PostgreSql) => {
                fmt!(f, "CAST(EXTRACT(DOW FROM " arg(0) ") AS INTEGER)");
            }
            (DayOfWeek, SqlServer) => {
                fmt!(f, "((DATEPART(WEEKDAY, " arg(0) ") + @@DATEFIRST - 1) % 7)");
            }
            (AddYears | AddMonths | AddDays | AddHours | AddMinutes | AddSeconds, _) => {
                date_add(f, e)?
            }
            (Now, Sqlite) => fmt!(f, "datetime('now', 'localtime')"),
            (Now, PostgreSql) => fmt!(f, "localtimestamp"),
            (Now, SqlServer) => fmt!(f, "GETDATE()"),
            (UtcNow, Sqlite) => fmt!(f, "datetime('now')"),
            (UtcNow, PostgreSql) => fmt!(f, "(now() at time zone 'utc')"),
            (UtcNow, SqlServer) => fmt!(f, "GETUTCDATE()"),
        }

        Ok(())
    }
}

/// Returns the string value of a constant argument, or `None` if the argument
/// is computed from columns.
fn const_string(func: Func, expr: &Expr) -> Result<Option<String>> {
    if !expr.is_const() {
        return Ok(None);
    }

    match eval(expr)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Err(Error::invalid_argument(format!(
            "`{}` argument must not be null",
            func.name()
        ))),
        value => Err(Error::unsupported_expression(format!(
            "method `{}` with a {} argument",
            func.name(),
            value.kind_name()
        ))),
    }
}

fn starts_with<P: Params>(f: &mut Formatter<'_, P>, e: &ExprFunc) -> Result<()> {
    let (recv, pattern) = (Operand(&e.args[0]), &e.args[1]);
    let substring = if f.dialect().is_sql_server() {
        "SUBSTRING("
    } else {
        "substr("
    };

    match const_string(e.func, pattern)? {
        Some(s) => {
            let len = s.chars().count();
            let value = &Value::String(s);
            fmt!(f, "(" substring recv ", 1, " len ") = " value ")");
        }
        None => {
            let length = length_fn(f.dialect());
            fmt!(
                f,
                "(" substring recv ", 1, " length Operand(pattern) ")) = " Operand(pattern) ")"
            );
        }
    }

    Ok(())
}

fn ends_with<P: Params>(f: &mut Formatter<'_, P>, e: &ExprFunc) -> Result<()> {
    let (recv, pattern) = (Operand(&e.args[0]), &e.args[1]);
    let dialect = f.dialect();

    match const_string(e.func, pattern)? {
        // Every string ends with the empty string. Sqlite reads `-0` as the
        // whole string, so the suffix form cannot express it.
        Some(s) if s.is_empty() => fmt!(f, "(1 = 1)"),
        Some(s) => {
            let len = s.chars().count();
            let value = &Value::String(s);
            match dialect {
                Dialect::Sqlite => fmt!(f, "(substr(" recv ", -" len ") = " value ")"),
                Dialect::PostgreSql => fmt!(f, "(right(" recv ", " len ") = " value ")"),
                Dialect::SqlServer => fmt!(f, "(RIGHT(" recv ", " len ") = " value ")"),
            }
        }
        None => {
            let length = length_fn(dialect);
            match dialect {
                // The explicit length keeps an empty suffix empty.
                Dialect::Sqlite => fmt!(
                    f,
                    "(substr(" recv ", -" length Operand(pattern) "), " length Operand(pattern)
                    ")) = " Operand(pattern) ")"
                ),
                Dialect::PostgreSql => fmt!(
                    f,
                    "(right(" recv ", " length Operand(pattern) ")) = " Operand(pattern) ")"
                ),
                Dialect::SqlServer => fmt!(
                    f,
                    "(RIGHT(" recv ", " length Operand(pattern) ")) = " Operand(pattern) ")"
                ),
            }
        }
    }

    Ok(())
}

fn length_fn(dialect: Dialect) -> &'static str {
    if dialect.is_sql_server() {
        "LEN("
    } else {
        "length("
    }
}

/// Case-insensitive prefix and suffix matching, through `LIKE`.
fn like<P: Params>(f: &mut Formatter<'_, P>, e: &ExprFunc) -> Result<()> {
    let (recv, pattern) = (Operand(&e.args[0]), &e.args[1]);
    let dialect = f.dialect();
    let op = dialect.ilike();
    let prefix = e.func == Func::StartsWithIgnoreCase;

    match const_string(e.func, pattern)? {
        Some(s) => {
            let (escaped, needs_escape) = escape_like(dialect, &s);
            let pattern = if prefix {
                format!("{escaped}%")
            } else {
                format!("%{escaped}")
            };
            let escape = needs_escape.then_some(" ESCAPE '\\'");
            let pattern = &Value::String(pattern);

            fmt!(f, "(" recv " " op " " pattern escape ")");
        }
        None => {
            let concat = if dialect.is_sql_server() { " + " } else { " || " };
            let pattern = EscapedLike(Operand(pattern));
            if prefix {
                fmt!(f, "(" recv " " op " (" pattern concat "'%') ESCAPE '\\')");
            } else {
                fmt!(f, "(" recv " " op " ('%'" concat pattern ") ESCAPE '\\')");
            }
        }
    }

    Ok(())
}

/// Escapes `LIKE` wildcards with a backslash. Returns whether anything was
/// escaped.
fn escape_like(dialect: Dialect, s: &str) -> (String, bool) {
    let mut escaped = String::with_capacity(s.len());
    let mut any = false;

    for c in s.chars() {
        let special = matches!(c, '%' | '_' | '\\') || (c == '[' && dialect.is_sql_server());
        if special {
            escaped.push('\\');
            any = true;
        }
        escaped.push(c);
    }

    (escaped, any)
}

/// A pattern computed in SQL, with its `LIKE` wildcards escaped the way
/// [`escape_like`] escapes constant patterns.
struct EscapedLike<'a>(Operand<'a>);

impl ToSql for EscapedLike<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        if f.dialect().is_sql_server() {
            fmt!(
                f,
                "REPLACE(REPLACE(REPLACE(REPLACE(" self.0 r", '\', '\\'), '%', '\%'), '_', '\_'), '[', '\[')"
            );
        } else {
            fmt!(
                f,
                "replace(replace(replace(" self.0 r", '\', '\\'), '%', '\%'), '_', '\_')"
            );
        }

        Ok(())
    }
}

fn substring<P: Params>(f: &mut Formatter<'_, P>, e: &ExprFunc) -> Result<()> {
    let recv = &e.args[0];
    let sql_server = f.dialect().is_sql_server();

    let name = if sql_server { "SUBSTRING(" } else { "substr(" };
    fmt!(f, name Operand(recv) ", ");

    // 0-based start to 1-based
    let start = &e.args[1];
    if start.is_const() {
        match eval(start)? {
            Value::I64(n) => {
                let start = n.checked_add(1).ok_or_else(|| {
                    Error::invalid_argument(format!("`Substring` start {n} is out of range"))
                })?;
                fmt!(f, &Value::I64(start));
            }
            value => {
                return Err(Error::invalid_argument(format!(
                    "`Substring` start must be an integer, got {}",
                    value.kind_name()
                )))
            }
        }
    } else {
        fmt!(f, "(" Operand(start) " + 1)");
    }

    match e.args.get(2) {
        Some(len) => fmt!(f, ", " Operand(len)),
        None if sql_server => fmt!(f, ", LEN(" Operand(recv) ")"),
        None => {}
    }

    fmt!(f, ")");
    Ok(())
}

fn date_part<P: Params>(f: &mut Formatter<'_, P>, e: &ExprFunc) -> Result<()> {
    let (strftime, part) = match e.func {
        Func::Year => ("%Y", "YEAR"),
        Func::Month => ("%m", "MONTH"),
        Func::Day => ("%d", "DAY"),
        Func::Hour => ("%H", "HOUR"),
        Func::Minute => ("%M", "MINUTE"),
        _ => ("%S", "SECOND"),
    };
    let arg = Operand(&e.args[0]);

    match f.dialect() {
        Dialect::Sqlite => {
            fmt!(f, "CAST(strftime('" strftime "', " arg ") AS INTEGER)");
        }
        // Seconds carry a fractional part.
        Dialect::PostgreSql if part == "SECOND" => {
            fmt!(f, "CAST(FLOOR(EXTRACT(SECOND FROM " arg ")) AS INTEGER)");
        }
        Dialect::PostgreSql => {
            fmt!(f, "CAST(EXTRACT(" part " FROM " arg ") AS INTEGER)");
        }
        Dialect::SqlServer => fmt!(f, "DATEPART(" part ", " arg ")"),
    }

    Ok(())
}

fn date_add<P: Params>(f: &mut Formatter<'_, P>, e: &ExprFunc) -> Result<()> {
    // (sqlite modifier, postgresql interval field, sql server datepart)
    let (modifier, field, part) = match e.func {
        Func::AddYears => ("years", "years", "YEAR"),
        Func::AddMonths => ("months", "months", "MONTH"),
        Func::AddDays => ("days", "days", "DAY"),
        Func::AddHours => ("hours", "hours", "HOUR"),
        Func::AddMinutes => ("minutes", "mins", "MINUTE"),
        _ => ("seconds", "secs", "SECOND"),
    };
    let (date, amount) = (Operand(&e.args[0]), Operand(&e.args[1]));

    match f.dialect() {
        Dialect::Sqlite => {
            fmt!(f, "datetime(" date ", (" amount " || ' " modifier "'))");
        }
        Dialect::PostgreSql => {
            fmt!(f, "(" date " + make_interval(" field " => " amount "))");
        }
        Dialect::SqlServer => fmt!(f, "DATEADD(" part ", " amount ", " date ")"),
    }

    Ok(())
}
