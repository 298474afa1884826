use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sluice_core::{
    schema::ColumnType,
    stmt::{Expr, Value},
};
use uuid::Uuid;

#[test]
fn float_to_int_truncates() {
    assert_eq!(
        Expr::cast(3.9, ColumnType::Int).eval_const().unwrap(),
        Value::I64(3)
    );
    assert_eq!(
        Expr::cast(-3.9, ColumnType::Int).eval_const().unwrap(),
        Value::I64(-3)
    );
}

#[test]
fn int_widens_to_float() {
    assert_eq!(
        Expr::convert(3i64, ColumnType::Float).eval_const().unwrap(),
        Value::F64(3.0)
    );
}

#[test]
fn text_round_trips() {
    assert_eq!(
        Expr::cast("42", ColumnType::Int).eval_const().unwrap(),
        Value::I64(42)
    );
    assert_eq!(
        Expr::cast(42i64, ColumnType::Text).eval_const().unwrap(),
        Value::from("42")
    );
}

#[test]
fn text_to_date_time() {
    let expected = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(13, 30, 0)
        .unwrap();

    assert_eq!(
        Expr::cast("2024-02-29 13:30:00", ColumnType::DateTime)
            .eval_const()
            .unwrap(),
        Value::DateTime(expected)
    );
}

#[test]
fn text_to_guid() {
    let id = Uuid::new_v4();
    assert_eq!(
        Expr::cast(id.to_string(), ColumnType::Guid).eval_const().unwrap(),
        Value::Guid(id)
    );

    assert!(Expr::cast("not-a-guid", ColumnType::Guid).eval_const().is_err());
}

#[test]
fn null_casts_to_null() {
    assert_eq!(
        Expr::cast(Value::Null, ColumnType::Int).eval_const().unwrap(),
        Value::Null
    );
}

#[test]
fn invalid_cast() {
    let err = Expr::cast(true, ColumnType::Guid).eval_const().unwrap_err();
    assert!(err.is_expression_evaluation_failed());
    assert_eq!(
        err.to_string(),
        "expression evaluation failed: cannot convert bool to Guid"
    );
}

#[test]
fn option_into_value() {
    assert_eq!(Value::from(Some(5i32)), Value::I64(5));
    assert_eq!(Value::from(None::<String>), Value::Null);
}
