use pretty_assertions::assert_eq;
use sluice_core::{
    query::{build, OrderBy, Operation, QueryModel, TerminalKind},
    schema::{Column, ColumnType, TableSchema},
    stmt::{Expr, Func, SourceId},
};
use std::sync::Arc;

const ID: usize = 0;
const NAME: usize = 1;
const AGE: usize = 2;

fn users() -> QueryModel {
    let table = TableSchema::builder("Users")
        .column(Column::new("Id", "id", ColumnType::Int).primary_key())
        .column(Column::new("Name", "name", ColumnType::Text))
        .column(Column::new("Age", "age", ColumnType::Int))
        .build()
        .unwrap();

    QueryModel::new(Arc::new(table), SourceId::generate())
}

#[test]
fn empty_sequence() {
    let base = users();
    let model = build(base.clone(), Vec::new()).unwrap();
    assert_eq!(model, base);
    assert_eq!(model.terminal, TerminalKind::Sequence);
}

#[test]
fn where_clauses_are_and_combined_in_order() {
    let base = users();
    let first = Expr::gt(base.column(AGE), 18i64);
    let second = Expr::eq(base.column(NAME), "bob");

    let model = build(
        base,
        [
            Operation::filter(first.clone()),
            Operation::filter(second.clone()),
        ],
    )
    .unwrap();

    assert_eq!(model.predicate, Some(Expr::and(first, second)));
}

#[test]
fn orderings_append() {
    let base = users();
    let model = build(
        base.clone(),
        [
            Operation::order_by(base.column(NAME)),
            Operation::then_by_descending(base.column(AGE)),
        ],
    )
    .unwrap();

    assert_eq!(model.orderings, [OrderBy::asc(NAME), OrderBy::desc(AGE)]);
}

#[test]
fn ordering_through_conversion_is_rejected() {
    let base = users();
    let err = build(
        base.clone(),
        [Operation::order_by(Expr::convert(
            base.column(AGE),
            ColumnType::Float,
        ))],
    )
    .unwrap_err();

    assert!(err.is_unsupported_expression());
    assert_eq!(
        err.to_string(),
        "unsupported expression: unsupported ordering expression: conversion to Float"
    );
}

#[test]
fn ordering_by_method_call_is_rejected() {
    let base = users();
    let err = build(
        base.clone(),
        [Operation::order_by(Expr::func(
            Func::ToLower,
            [base.column(NAME)],
        ))],
    )
    .unwrap_err();

    assert!(err.is_unsupported_expression());
}

#[test]
fn ordering_by_foreign_column_is_unresolvable() {
    let base = users();
    let err = build(
        base,
        [Operation::order_by(Expr::column(SourceId::generate(), NAME))],
    )
    .unwrap_err();

    assert!(err.is_unresolvable_member());
}

#[test]
fn out_of_range_column_is_unresolvable() {
    let base = users();
    let err = build(
        base.clone(),
        [Operation::filter(Expr::eq(base.column(17), 1i64))],
    )
    .unwrap_err();

    assert!(err.is_unresolvable_member());
}

#[test]
fn skip_and_take_are_evaluated_eagerly() {
    let model = build(
        users(),
        [
            Operation::skip(Expr::mul(2i64, 10i64)),
            Operation::take(10i64),
        ],
    )
    .unwrap();

    assert_eq!(model.skip, Some(20));
    assert_eq!(model.take, Some(10));
}

#[test]
fn last_take_wins() {
    let model = build(users(), [Operation::take(10i64), Operation::take(3i64)]).unwrap();
    assert_eq!(model.take, Some(3));
}

#[test]
fn take_over_column_is_rejected() {
    let base = users();
    let err = build(base.clone(), [Operation::take(base.column(AGE))]).unwrap_err();
    assert!(err.is_unsupported_expression());
}

#[test]
fn negative_skip_is_invalid() {
    let err = build(users(), [Operation::skip(-1i64)]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: `Skip` count must not be negative, got -1"
    );
}

#[test]
fn take_wrong_arity() {
    let err = build(users(), [Operation::new("Take", Vec::new())]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: `Take` expects 1 argument, got 0"
    );
}

#[test]
fn terminal_with_inline_predicate() {
    let base = users();
    let existing = Expr::gt(base.column(AGE), 18i64);
    let inline = Expr::eq(base.column(NAME), "bob");

    let model = build(
        base,
        [
            Operation::filter(existing.clone()),
            Operation::terminal("FirstOrDefault", Some(inline.clone())),
        ],
    )
    .unwrap();

    assert_eq!(model.terminal, TerminalKind::FirstOrDefault);
    assert_eq!(model.predicate, Some(Expr::and(existing, inline)));
    assert_eq!(model.effective_take(), Some(1));
}

#[test]
fn implicit_takes() {
    for (method, take) in [
        ("Count", None),
        ("LongCount", None),
        ("First", Some(1)),
        ("Last", Some(1)),
        ("Any", Some(1)),
        ("Single", Some(2)),
        ("SingleOrDefault", Some(2)),
    ] {
        let model = build(users(), [Operation::terminal(method, None)]).unwrap();
        assert_eq!(model.effective_take(), take, "{method}");
    }
}

#[test]
fn terminal_limit_caps_explicit_take() {
    let model = build(
        users(),
        [Operation::take(5i64), Operation::terminal("Single", None)],
    )
    .unwrap();

    assert_eq!(model.take, Some(5));
    assert_eq!(model.effective_take(), Some(2));

    let model = build(
        users(),
        [Operation::take(1i64), Operation::terminal("Single", None)],
    )
    .unwrap();

    assert_eq!(model.effective_take(), Some(1));
}

#[test]
fn operation_after_terminal() {
    let err = build(
        users(),
        [Operation::terminal("Count", None), Operation::take(1i64)],
    )
    .unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: `Take` cannot follow terminal operation `Count`"
    );
}

#[test]
fn unsupported_operation_lists_whitelist() {
    let err = build(users(), [Operation::new("GroupBy", Vec::new())]).unwrap_err();

    assert!(err.is_unsupported_operation());
    assert_eq!(
        err.to_string(),
        "unsupported operation `GroupBy`; supported operations: Where, OrderBy, \
         OrderByDescending, ThenBy, ThenByDescending, Skip, Take, Select, Distinct, Count, \
         LongCount, First, FirstOrDefault, Single, SingleOrDefault, Last, LastOrDefault, Any"
    );
}

#[test]
fn non_boolean_predicate() {
    let base = users();
    let err = build(base.clone(), [Operation::filter(base.column(AGE))]).unwrap_err();

    assert!(err.is_invalid_argument());
    assert_eq!(
        err.to_string(),
        "invalid argument: `Where` expects a boolean predicate, got Int"
    );
}

#[test]
fn select_and_distinct() {
    let base = users();
    let model = build(
        base.clone(),
        [
            Operation::select([base.column(NAME), base.column(ID)]),
            Operation::distinct(),
        ],
    )
    .unwrap();

    assert_eq!(model.projection, [NAME, ID]);
    assert!(model.distinct);
}

#[test]
fn select_computed_value_is_rejected() {
    let base = users();
    let err = build(
        base.clone(),
        [Operation::select([Expr::add(base.column(AGE), 1i64)])],
    )
    .unwrap_err();

    assert!(err.is_unsupported_expression());
}
