use super::{Integer, IntoExpr, Numeric, Primitive, Temporal, Text};

use sluice_core::{
    stmt::{self, Func},
    Result,
};
use std::{fmt, marker::PhantomData, ops};

/// A typed query expression evaluating to `T`.
///
/// Construction never fails. Anything that can go wrong while building the
/// expression, such as resolving a subquery's table, is carried along and
/// reported when the query is compiled.
pub struct Expr<T: ?Sized> {
    /// The un-typed expression
    pub(crate) untyped: Result<stmt::Expr>,

    /// `T` is the type of the expression
    pub(crate) _p: PhantomData<T>,
}

impl<T: ?Sized> Expr<T> {
    pub(crate) fn from_value(value: stmt::Value) -> Self {
        Self::from_untyped(stmt::Expr::Value(value))
    }

    pub fn from_untyped(untyped: impl Into<stmt::Expr>) -> Self {
        Self::from_result(Ok(untyped.into()))
    }

    pub(crate) fn from_result(untyped: Result<stmt::Expr>) -> Self {
        Self {
            untyped,
            _p: PhantomData,
        }
    }

    pub fn into_untyped(self) -> Result<stmt::Expr> {
        self.untyped
    }

    pub fn cast<U: ?Sized>(self) -> Expr<U> {
        Expr::from_result(self.untyped)
    }

    fn map<U: ?Sized>(self, f: impl FnOnce(stmt::Expr) -> stmt::Expr) -> Expr<U> {
        Expr::from_result(self.untyped.map(f))
    }

    fn zip<R: ?Sized, U: ?Sized>(
        self,
        rhs: Expr<R>,
        f: impl FnOnce(stmt::Expr, stmt::Expr) -> stmt::Expr,
    ) -> Expr<U> {
        Expr::from_result(self.untyped.and_then(|lhs| Ok(f(lhs, rhs.untyped?))))
    }

    /// Calls `func` with `self` as the receiver.
    pub(crate) fn call<U: ?Sized>(
        self,
        func: Func,
        args: impl IntoIterator<Item = Result<stmt::Expr>>,
    ) -> Expr<U> {
        let args = std::iter::once(self.untyped)
            .chain(args)
            .collect::<Result<Vec<_>>>();

        Expr::from_result(args.map(|args| stmt::Expr::func(func, args)))
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.zip(rhs.into_expr(), stmt::Expr::eq)
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.zip(rhs.into_expr(), stmt::Expr::ne)
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.zip(rhs.into_expr(), stmt::Expr::gt)
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.zip(rhs.into_expr(), stmt::Expr::ge)
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.zip(rhs.into_expr(), stmt::Expr::lt)
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        self.zip(rhs.into_expr(), stmt::Expr::le)
    }
}

impl<T: Primitive> Expr<T> {
    /// `self IN (values...)`. An empty list matches nothing.
    pub fn in_list(self, values: impl IntoIterator<Item = T>) -> Expr<bool> {
        let values = values
            .into_iter()
            .map(Primitive::into_value)
            .collect::<Vec<_>>();

        self.map(|expr| stmt::Expr::in_list(expr, values))
    }

    /// Explicit conversion, written as a SQL `CAST`.
    pub fn convert_to<U: Primitive>(self) -> Expr<U> {
        self.call(Func::ConvertTo(U::TYPE), [])
    }
}

impl<T> Expr<Option<T>> {
    pub fn is_null(self) -> Expr<bool> {
        self.map(|expr| stmt::Expr::eq(expr, stmt::Expr::null()))
    }

    pub fn is_not_null(self) -> Expr<bool> {
        self.map(|expr| stmt::Expr::ne(expr, stmt::Expr::null()))
    }

    /// `COALESCE(self, default)`
    pub fn unwrap_or(self, default: impl IntoExpr<T>) -> Expr<T> {
        self.zip(default.into_expr(), stmt::Expr::coalesce)
    }
}

impl Expr<bool> {
    pub fn and(self, rhs: impl IntoExpr<bool>) -> Self {
        self.zip(rhs.into_expr(), stmt::Expr::and)
    }

    pub fn and_all<E>(exprs: impl IntoIterator<Item = E>) -> Self
    where
        E: IntoExpr<bool>,
    {
        exprs
            .into_iter()
            .map(IntoExpr::into_expr)
            .reduce(Expr::and)
            .unwrap_or_else(|| Self::from_value(stmt::Value::Bool(true)))
    }

    pub fn or(self, rhs: impl IntoExpr<bool>) -> Self {
        self.zip(rhs.into_expr(), stmt::Expr::or)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        !self
    }

    /// `CASE WHEN self THEN then ELSE otherwise END`
    pub fn then_else<U>(self, then: impl IntoExpr<U>, otherwise: impl IntoExpr<U>) -> Expr<U> {
        let then = then.into_expr().untyped;
        let otherwise = otherwise.into_expr().untyped;

        Expr::from_result(
            self.untyped
                .and_then(|test| Ok(stmt::Expr::conditional(test, then?, otherwise?))),
        )
    }
}

impl<T: Text> Expr<T> {
    pub fn contains(self, needle: impl IntoExpr<String>) -> Expr<bool> {
        self.call(Func::Contains, [needle.into_expr().untyped])
    }

    pub fn starts_with(self, prefix: impl IntoExpr<String>) -> Expr<bool> {
        self.call(Func::StartsWith, [prefix.into_expr().untyped])
    }

    pub fn starts_with_ignore_case(self, prefix: impl IntoExpr<String>) -> Expr<bool> {
        self.call(Func::StartsWithIgnoreCase, [prefix.into_expr().untyped])
    }

    pub fn ends_with(self, suffix: impl IntoExpr<String>) -> Expr<bool> {
        self.call(Func::EndsWith, [suffix.into_expr().untyped])
    }

    pub fn ends_with_ignore_case(self, suffix: impl IntoExpr<String>) -> Expr<bool> {
        self.call(Func::EndsWithIgnoreCase, [suffix.into_expr().untyped])
    }

    pub fn replace(self, from: impl IntoExpr<String>, to: impl IntoExpr<String>) -> Self {
        self.call(
            Func::Replace,
            [from.into_expr().untyped, to.into_expr().untyped],
        )
    }

    pub fn to_lower(self) -> Self {
        self.call(Func::ToLower, [])
    }

    pub fn to_upper(self) -> Self {
        self.call(Func::ToUpper, [])
    }

    pub fn trim(self) -> Self {
        self.call(Func::Trim, [])
    }

    pub fn trim_start(self) -> Self {
        self.call(Func::TrimStart, [])
    }

    pub fn trim_end(self) -> Self {
        self.call(Func::TrimEnd, [])
    }

    /// Characters from the zero-based `start` to the end.
    pub fn substring(self, start: impl IntoExpr<i32>) -> Self {
        self.call(Func::Substring, [start.into_expr().untyped])
    }

    /// `len` characters from the zero-based `start`.
    pub fn substring_len(self, start: impl IntoExpr<i32>, len: impl IntoExpr<i32>) -> Self {
        self.call(
            Func::Substring,
            [start.into_expr().untyped, len.into_expr().untyped],
        )
    }

    /// Zero-based position of `needle`, or -1.
    pub fn index_of(self, needle: impl IntoExpr<String>) -> Expr<i32> {
        self.call(Func::IndexOf, [needle.into_expr().untyped])
    }

    pub fn len(self) -> Expr<i32> {
        self.call(Func::Length, [])
    }

    pub fn is_null_or_empty(self) -> Expr<bool> {
        self.call(Func::IsNullOrEmpty, [])
    }

    pub fn is_null_or_white_space(self) -> Expr<bool> {
        self.call(Func::IsNullOrWhiteSpace, [])
    }

    pub fn concat(self, rhs: impl IntoExpr<T>) -> Self {
        self.call(Func::Concat, [rhs.into_expr().untyped])
    }
}

impl<T: Numeric> Expr<T> {
    pub fn abs(self) -> Self {
        self.call(Func::Abs, [])
    }

    pub fn round(self) -> Self {
        self.call(Func::Round, [])
    }

    pub fn round_to(self, digits: impl IntoExpr<i32>) -> Self {
        self.call(Func::Round, [digits.into_expr().untyped])
    }

    pub fn floor(self) -> Self {
        self.call(Func::Floor, [])
    }

    pub fn ceiling(self) -> Self {
        self.call(Func::Ceiling, [])
    }

    pub fn max(self, rhs: impl IntoExpr<T>) -> Self {
        self.call(Func::Max, [rhs.into_expr().untyped])
    }

    pub fn min(self, rhs: impl IntoExpr<T>) -> Self {
        self.call(Func::Min, [rhs.into_expr().untyped])
    }

    pub fn pow(self, exponent: impl IntoExpr<f64>) -> Expr<f64> {
        self.call(Func::Pow, [exponent.into_expr().untyped])
    }

    pub fn sqrt(self) -> Expr<f64> {
        self.call(Func::Sqrt, [])
    }

    /// Natural logarithm
    pub fn ln(self) -> Expr<f64> {
        self.call(Func::Log, [])
    }

    pub fn log10(self) -> Expr<f64> {
        self.call(Func::Log10, [])
    }
}

impl<T: Integer> Expr<T> {
    pub fn bit_not(self) -> Self {
        self.map(stmt::Expr::bit_not)
    }
}

impl<T: Temporal> Expr<T> {
    pub fn year(self) -> Expr<i32> {
        self.call(Func::Year, [])
    }

    pub fn month(self) -> Expr<i32> {
        self.call(Func::Month, [])
    }

    pub fn day(self) -> Expr<i32> {
        self.call(Func::Day, [])
    }

    pub fn hour(self) -> Expr<i32> {
        self.call(Func::Hour, [])
    }

    pub fn minute(self) -> Expr<i32> {
        self.call(Func::Minute, [])
    }

    pub fn second(self) -> Expr<i32> {
        self.call(Func::Second, [])
    }

    /// The date part, with the time set to midnight.
    pub fn date(self) -> Self {
        self.call(Func::Date, [])
    }

    /// Zero for Sunday through six for Saturday.
    pub fn day_of_week(self) -> Expr<i32> {
        self.call(Func::DayOfWeek, [])
    }

    pub fn add_years(self, years: impl IntoExpr<i32>) -> Self {
        self.call(Func::AddYears, [years.into_expr().untyped])
    }

    pub fn add_months(self, months: impl IntoExpr<i32>) -> Self {
        self.call(Func::AddMonths, [months.into_expr().untyped])
    }

    pub fn add_days(self, days: impl IntoExpr<f64>) -> Self {
        self.call(Func::AddDays, [days.into_expr().untyped])
    }

    pub fn add_hours(self, hours: impl IntoExpr<f64>) -> Self {
        self.call(Func::AddHours, [hours.into_expr().untyped])
    }

    pub fn add_minutes(self, minutes: impl IntoExpr<f64>) -> Self {
        self.call(Func::AddMinutes, [minutes.into_expr().untyped])
    }

    pub fn add_seconds(self, seconds: impl IntoExpr<f64>) -> Self {
        self.call(Func::AddSeconds, [seconds.into_expr().untyped])
    }
}

/// The database server's local time.
pub fn now() -> Expr<chrono::NaiveDateTime> {
    Expr::from_untyped(stmt::Expr::func(Func::Now, []))
}

/// The database server's time in UTC.
pub fn utc_now() -> Expr<chrono::NaiveDateTime> {
    Expr::from_untyped(stmt::Expr::func(Func::UtcNow, []))
}

macro_rules! impl_binary_ops {
    ( $bound:ident: $( $trait:ident::$method:ident => $ctor:ident ),* ) => {
        $(
            impl<T: $bound, R: IntoExpr<T>> ops::$trait<R> for Expr<T> {
                type Output = Expr<T>;

                fn $method(self, rhs: R) -> Expr<T> {
                    self.zip(rhs.into_expr(), stmt::Expr::$ctor)
                }
            }
        )*
    };
}

impl_binary_ops!(Numeric: Add::add => add, Sub::sub => sub, Mul::mul => mul, Div::div => div, Rem::rem => rem);
impl_binary_ops!(Integer: BitAnd::bitand => bit_and, BitOr::bitor => bit_or, BitXor::bitxor => bit_xor);

impl<T: Numeric> ops::Neg for Expr<T> {
    type Output = Expr<T>;

    fn neg(self) -> Expr<T> {
        self.map(stmt::Expr::neg)
    }
}

impl ops::Not for Expr<bool> {
    type Output = Self;

    fn not(self) -> Self {
        self.map(stmt::Expr::not)
    }
}

impl<T: ?Sized> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self::from_result(self.untyped.clone())
    }
}

impl<T: ?Sized> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&self.untyped).finish()
    }
}
