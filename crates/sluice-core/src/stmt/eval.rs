use super::{BinaryOp, Expr, Func, UnaryOp, Value};
use crate::{schema::ColumnType, Error, Result};

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use uuid::Uuid;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Expr {
    /// Folds the expression to a value without reading any row.
    ///
    /// Only a fixed grammar is evaluated: values, casts, unary and binary
    /// operators, `Coalesce`, conditionals, list membership and the string
    /// methods reported by [`Func::is_foldable`]. Anything else fails with an
    /// expression evaluation error.
    pub fn eval_const(&self) -> Result<Value> {
        match self {
            Expr::Value(value) => Ok(value.clone()),
            Expr::Cast(e) => e.expr.eval_const()?.cast(e.ty),
            Expr::UnaryOp(e) => eval_unary(e.op, e.expr.eval_const()?),
            Expr::BinaryOp(e) => {
                let lhs = e.lhs.eval_const()?;

                // Only evaluate the right side when it is needed.
                match (e.op, &lhs) {
                    (BinaryOp::Coalesce, lhs) if !lhs.is_null() => return Ok(lhs.clone()),
                    (BinaryOp::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
                    (BinaryOp::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
                    _ => {}
                }

                eval_binary(e.op, lhs, e.rhs.eval_const()?)
            }
            Expr::Conditional(e) => match e.test.eval_const()? {
                Value::Bool(true) => e.then.eval_const(),
                Value::Bool(false) => e.otherwise.eval_const(),
                other => Err(Error::expression_evaluation_failed(format!(
                    "conditional test must be a bool, got {}",
                    other.kind_name()
                ))),
            },
            Expr::InList(e) => {
                let value = e.expr.eval_const()?;
                Ok(Value::Bool(
                    e.list.iter().any(|item| {
                        (value.is_null() && item.is_null())
                            || compare(&value, item) == Some(Ordering::Equal)
                    }),
                ))
            }
            Expr::Func(e) if e.func.is_foldable() => {
                let args = e
                    .args
                    .iter()
                    .map(Expr::eval_const)
                    .collect::<Result<Vec<_>>>()?;
                eval_func(e.func, args)
            }
            _ => Err(Error::expression_evaluation_failed(format!(
                "{} is not a constant",
                self.describe()
            ))),
        }
    }
}

impl Value {
    /// Converts the value to another column type.
    pub fn cast(&self, ty: ColumnType) -> Result<Value> {
        let ret = match (self, ty) {
            (Value::Null, _) => Value::Null,

            (Value::I64(v) | Value::Enum(v), ColumnType::Int) => Value::I64(*v),
            (Value::F64(v), ColumnType::Int) if v.is_finite() => Value::I64(v.trunc() as i64),
            (Value::Bool(v), ColumnType::Int) => Value::I64(*v as i64),
            (Value::String(v), ColumnType::Int) => match v.trim().parse() {
                Ok(v) => Value::I64(v),
                Err(_) => return Err(invalid_cast(self, ty)),
            },

            (Value::I64(v) | Value::Enum(v), ColumnType::Float) => Value::F64(*v as f64),
            (Value::F64(v), ColumnType::Float) => Value::F64(*v),
            (Value::Bool(v), ColumnType::Float) => Value::F64(if *v { 1.0 } else { 0.0 }),
            (Value::String(v), ColumnType::Float) => match v.trim().parse() {
                Ok(v) => Value::F64(v),
                Err(_) => return Err(invalid_cast(self, ty)),
            },

            (Value::String(v), ColumnType::Text) => Value::String(v.clone()),
            (Value::I64(v) | Value::Enum(v), ColumnType::Text) => Value::String(v.to_string()),
            (Value::F64(v), ColumnType::Text) => Value::String(v.to_string()),
            (Value::Bool(v), ColumnType::Text) => Value::String(v.to_string()),
            (Value::DateTime(v), ColumnType::Text) => {
                Value::String(v.format(DATE_TIME_FORMAT).to_string())
            }
            (Value::Guid(v), ColumnType::Text) => Value::String(v.hyphenated().to_string()),

            (Value::Bool(v), ColumnType::Bool) => Value::Bool(*v),
            (Value::I64(v), ColumnType::Bool) => Value::Bool(*v != 0),
            (Value::String(v), ColumnType::Bool) => match v.trim().to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(invalid_cast(self, ty)),
            },

            (Value::DateTime(v), ColumnType::DateTime) => Value::DateTime(*v),
            (Value::String(v), ColumnType::DateTime) => {
                match NaiveDateTime::parse_from_str(v.trim(), DATE_TIME_FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(v.trim(), "%Y-%m-%dT%H:%M:%S%.f"))
                {
                    Ok(v) => Value::DateTime(v),
                    Err(_) => return Err(invalid_cast(self, ty)),
                }
            }

            (Value::Guid(v), ColumnType::Guid) => Value::Guid(*v),
            (Value::String(v), ColumnType::Guid) => Value::Guid(Uuid::parse_str(v.trim())?),

            (Value::Blob(v), ColumnType::Blob) => Value::Blob(v.clone()),

            (Value::I64(v) | Value::Enum(v), ColumnType::Enum) => Value::Enum(*v),

            _ => return Err(invalid_cast(self, ty)),
        };

        Ok(ret)
    }
}

fn invalid_cast(value: &Value, ty: ColumnType) -> Error {
    Error::expression_evaluation_failed(format!(
        "cannot convert {} to {ty}",
        value.kind_name()
    ))
}

fn eval_unary(op: UnaryOp, value: Value) -> Result<Value> {
    match (op, value) {
        (_, Value::Null) => Ok(Value::Null),
        (UnaryOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
        (UnaryOp::Neg, Value::I64(v)) => v
            .checked_neg()
            .map(Value::I64)
            .ok_or_else(|| Error::expression_evaluation_failed("integer overflow")),
        (UnaryOp::Neg, Value::F64(v)) => Ok(Value::F64(-v)),
        (UnaryOp::BitNot, Value::I64(v)) => Ok(Value::I64(!v)),
        (op, value) => Err(Error::expression_evaluation_failed(format!(
            "operator `{}` does not apply to {}",
            op.name(),
            value.kind_name()
        ))),
    }
}

fn eval_binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    use BinaryOp::*;

    match op {
        Coalesce => Ok(if lhs.is_null() { rhs } else { lhs }),
        And | Or => match (lhs, rhs) {
            (Value::Bool(lhs), Value::Bool(rhs)) => Ok(Value::Bool(if op == And {
                lhs && rhs
            } else {
                lhs || rhs
            })),
            (lhs, rhs) => Err(mismatch(op, &lhs, &rhs)),
        },
        Eq | Ne | Lt | Le | Gt | Ge => {
            let ordering = compare(&lhs, &rhs);

            // Null equals null and nothing else; ordering against null is
            // false.
            let ret = match (op, ordering) {
                (Eq, Some(ordering)) => ordering == Ordering::Equal,
                (Ne, Some(ordering)) => ordering != Ordering::Equal,
                (Eq, None) => lhs.is_null() && rhs.is_null(),
                (Ne, None) => !(lhs.is_null() && rhs.is_null()),
                (_, None) => {
                    if lhs.is_null() || rhs.is_null() {
                        false
                    } else {
                        return Err(mismatch(op, &lhs, &rhs));
                    }
                }
                (Lt, Some(ordering)) => ordering == Ordering::Less,
                (Le, Some(ordering)) => ordering != Ordering::Greater,
                (Gt, Some(ordering)) => ordering == Ordering::Greater,
                (Ge, Some(ordering)) => ordering != Ordering::Less,
                _ => unreachable!(),
            };

            Ok(Value::Bool(ret))
        }
        Add if matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_)) => {
            Ok(Value::String(concat(&lhs)? + &concat(&rhs)?))
        }
        Add | Sub | Mul | Div | Mod => {
            if lhs.is_null() || rhs.is_null() {
                return Ok(Value::Null);
            }

            match (&lhs, &rhs) {
                (Value::I64(l), Value::I64(r)) => {
                    let ret = match op {
                        Add => l.checked_add(*r),
                        Sub => l.checked_sub(*r),
                        Mul => l.checked_mul(*r),
                        Div if *r == 0 => {
                            return Err(Error::expression_evaluation_failed("division by zero"))
                        }
                        Div => l.checked_div(*r),
                        Mod if *r == 0 => {
                            return Err(Error::expression_evaluation_failed("division by zero"))
                        }
                        Mod => l.checked_rem(*r),
                        _ => unreachable!(),
                    };

                    ret.map(Value::I64)
                        .ok_or_else(|| Error::expression_evaluation_failed("integer overflow"))
                }
                _ => match (lhs.as_f64(), rhs.as_f64()) {
                    (Some(l), Some(r)) => Ok(Value::F64(match op {
                        Add => l + r,
                        Sub => l - r,
                        Mul => l * r,
                        Div => l / r,
                        Mod => l % r,
                        _ => unreachable!(),
                    })),
                    _ => Err(mismatch(op, &lhs, &rhs)),
                },
            }
        }
        BitAnd | BitOr | BitXor => match (&lhs, &rhs) {
            (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
            (Value::I64(l), Value::I64(r)) => Ok(Value::I64(match op {
                BitAnd => l & r,
                BitOr => l | r,
                _ => l ^ r,
            })),
            (Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(match op {
                BitAnd => l & r,
                BitOr => l | r,
                _ => l ^ r,
            })),
            _ => Err(mismatch(op, &lhs, &rhs)),
        },
    }
}

fn eval_func(func: Func, args: Vec<Value>) -> Result<Value> {
    let mut args = args.into_iter();
    let receiver = args.next().unwrap_or_default();

    if func == Func::Concat {
        let rhs = args.next().unwrap_or_default();
        return Ok(Value::String(concat(&receiver)? + &concat(&rhs)?));
    }

    let s = match receiver {
        Value::String(s) => s,
        Value::Null => return Ok(Value::Null),
        receiver => {
            return Err(Error::expression_evaluation_failed(format!(
                "method `{}` does not apply to {}",
                func.name(),
                receiver.kind_name()
            )))
        }
    };

    Ok(match func {
        Func::ToLower => Value::String(s.to_lowercase()),
        Func::ToUpper => Value::String(s.to_uppercase()),
        Func::Trim => Value::String(s.trim().to_string()),
        Func::TrimStart => Value::String(s.trim_start().to_string()),
        Func::TrimEnd => Value::String(s.trim_end().to_string()),
        Func::Length => Value::I64(s.chars().count() as i64),
        _ => {
            return Err(Error::expression_evaluation_failed(format!(
                "method `{}` is not a constant",
                func.name()
            )))
        }
    })
}

/// String concatenation treats null as the empty string.
fn concat(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        value => match value.cast(ColumnType::Text)? {
            Value::String(s) => Ok(s),
            _ => Ok(String::new()),
        },
    }
}

/// Orders two values of compatible types. Numbers compare across integer and
/// float. Returns `None` for null or mismatched operands.
fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::I64(l) | Value::Enum(l), Value::I64(r) | Value::Enum(r)) => Some(l.cmp(r)),
        (Value::F64(_), _) | (_, Value::F64(_)) => lhs.as_f64()?.partial_cmp(&rhs.as_f64()?),
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        (Value::DateTime(l), Value::DateTime(r)) => Some(l.cmp(r)),
        (Value::Guid(l), Value::Guid(r)) => Some(l.cmp(r)),
        (Value::Blob(l), Value::Blob(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

fn mismatch(op: BinaryOp, lhs: &Value, rhs: &Value) -> Error {
    Error::expression_evaluation_failed(format!(
        "operator `{}` does not apply to {} and {}",
        op.name(),
        lhs.kind_name(),
        rhs.kind_name()
    ))
}
