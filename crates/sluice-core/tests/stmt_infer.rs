use pretty_assertions::assert_eq;
use sluice_core::{
    query::QueryModel,
    schema::{Column, ColumnType, TableSchema},
    stmt::{Expr, Func, SourceId},
};
use std::sync::Arc;

fn model() -> QueryModel {
    let table = TableSchema::builder("Items")
        .column(Column::new("Id", "id", ColumnType::Int).primary_key())
        .column(Column::new("Title", "title", ColumnType::Text))
        .column(Column::new("Price", "price", ColumnType::Float))
        .column(Column::new("Active", "active", ColumnType::Bool))
        .build()
        .unwrap();

    QueryModel::new(Arc::new(table), SourceId::generate())
}

#[test]
fn columns_resolve_through_the_model() {
    let m = model();
    assert_eq!(m.column(1).infer_ty(&m), Some(ColumnType::Text));
    assert_eq!(m.column(3).infer_ty(&m), Some(ColumnType::Bool));
}

#[test]
fn foreign_columns_are_unknown() {
    let m = model();
    assert_eq!(Expr::column(SourceId::generate(), 1).infer_ty(&m), None);
}

#[test]
fn string_concatenation() {
    let m = model();
    assert_eq!(
        Expr::add(m.column(1), "!").infer_ty(&m),
        Some(ColumnType::Text)
    );
}

#[test]
fn mixed_arithmetic_is_float() {
    let m = model();
    assert_eq!(
        Expr::mul(m.column(0), m.column(2)).infer_ty(&m),
        Some(ColumnType::Float)
    );
    assert_eq!(
        Expr::add(m.column(0), 1i64).infer_ty(&m),
        Some(ColumnType::Int)
    );
}

#[test]
fn functions() {
    let m = model();
    assert_eq!(
        Expr::func(Func::Length, [m.column(1)]).infer_ty(&m),
        Some(ColumnType::Int)
    );
    assert_eq!(
        Expr::func(Func::Abs, [m.column(2)]).infer_ty(&m),
        Some(ColumnType::Float)
    );
    assert_eq!(
        Expr::func(Func::ConvertTo(ColumnType::Text), [m.column(0)]).infer_ty(&m),
        Some(ColumnType::Text)
    );
}

#[test]
fn predicates() {
    let m = model();
    assert!(Expr::eq(m.column(0), 1i64).is_predicate());
    assert!(Expr::func(Func::Contains, [m.column(1), Expr::from("x")]).is_predicate());
    assert!(Expr::not(m.column(3)).is_predicate());
    assert!(!m.column(3).is_predicate());
    assert_eq!(m.column(3).infer_ty(&m), Some(ColumnType::Bool));
}

#[test]
fn references_source() {
    let m = model();
    let other = SourceId::generate();
    let expr = Expr::and(
        Expr::eq(m.column(0), Expr::column(other, 0)),
        Expr::gt(m.column(2), 1.5),
    );

    assert!(expr.references_source(m.source));
    assert!(expr.references_source(other));
    assert!(!expr.references_source(SourceId::generate()));
}
