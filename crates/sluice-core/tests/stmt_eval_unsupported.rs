use pretty_assertions::assert_eq;
use sluice_core::stmt::{Expr, Func, SourceId};

#[test]
fn column_is_not_constant() {
    let expr = Expr::column(SourceId::generate(), 0);
    assert!(!expr.is_const());

    let err = expr.eval_const().unwrap_err();
    assert!(err.is_expression_evaluation_failed());
    assert_eq!(
        err.to_string(),
        "expression evaluation failed: column reference is not a constant"
    );
}

#[test]
fn arithmetic_over_column_is_not_constant() {
    let expr = Expr::add(Expr::column(SourceId::generate(), 1), 1i64);
    assert!(!expr.is_const());
    assert!(expr.eval_const().is_err());
}

#[test]
fn now_is_not_constant() {
    let expr = Expr::func(Func::Now, vec![]);
    assert!(!expr.is_const());
    assert_eq!(
        expr.eval_const().unwrap_err().to_string(),
        "expression evaluation failed: method `Now` is not a constant"
    );
}

#[test]
fn non_foldable_function() {
    let expr = Expr::func(Func::Contains, [Expr::from("abc"), Expr::from("b")]);
    assert!(!expr.is_const());
    assert!(expr.eval_const().unwrap_err().is_expression_evaluation_failed());
}

#[test]
fn source_ids_are_unique() {
    let a = SourceId::generate();
    let b = SourceId::generate();
    assert_ne!(a, b);
}
