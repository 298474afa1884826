mod common;
use common::*;

use pretty_assertions::assert_eq;
use sluice_core::{
    query::{build, Operation, QueryModel},
    stmt::{Expr, Value},
};
use sluice_sql::{Dialect, Serializer};

/// Orders placed by the user row `u`.
fn orders_of(u: &QueryModel) -> QueryModel {
    let o = orders();
    let predicate = Expr::eq(o.column(order::USER_ID), u.column(user::ID));
    build(o, [Operation::filter(predicate)]).unwrap()
}

#[test]
fn in_list() {
    let (sql, params) = filter(Dialect::Sqlite, |u| {
        Expr::in_list(u.column(user::AGE), [18i64, 21, 30])
    });
    assert_eq!(sql, "([Age] IN ($p1, $p2, $p3))");
    assert_eq!(
        params,
        vec![Value::from(18i64), Value::from(21i64), Value::from(30i64)]
    );
}

#[test]
fn empty_in_list_matches_nothing() {
    let (sql, params) = filter(Dialect::SqlServer, |u| {
        Expr::in_list(u.column(user::AGE), Vec::<i64>::new())
    });
    assert_eq!(sql, "(1 = 0)");
    assert!(params.is_empty());
}

#[test]
fn null_in_list_member_matches_null_column() {
    let (sql, params) = filter(Dialect::Sqlite, |u| {
        Expr::in_list(u.column(user::SCORE), [Value::from(1.5f64), Value::Null])
    });
    assert_eq!(sql, "([Score] IN ($p1) or [Score] is null)");
    assert_eq!(params, vec![Value::from(1.5f64)]);

    let (sql, params) = filter(Dialect::PostgreSql, |u| {
        Expr::in_list(u.column(user::SCORE), [Value::Null])
    });
    assert_eq!(sql, r#"("Score" is null)"#);
    assert!(params.is_empty());
}

#[test]
fn in_subquery() {
    let (sql, params) = filter(Dialect::Sqlite, |u| {
        let o = orders();
        let big = Expr::gt(o.column(order::TOTAL), 100f64);
        let ids = build(
            o.clone(),
            [
                Operation::filter(big),
                Operation::select([o.column(order::USER_ID)]),
            ],
        )
        .unwrap();

        Expr::in_subquery(u.column(user::ID), ids)
    });

    assert_eq!(
        sql,
        "([Id] IN (SELECT [UserId] FROM [Orders] WHERE ([Total] > $p1)))"
    );
    assert_eq!(params, vec![Value::from(100f64)]);
}

#[test]
fn correlated_in_subquery_is_qualified() {
    let (sql, _) = filter(Dialect::Sqlite, |u| {
        let o = orders();
        let predicate = Expr::eq(o.column(order::NOTE), u.column(user::NAME));
        let ids = build(
            o.clone(),
            [
                Operation::filter(predicate),
                Operation::select([o.column(order::USER_ID)]),
            ],
        )
        .unwrap();

        Expr::in_subquery(u.column(user::ID), ids)
    });

    assert_eq!(
        sql,
        "([Id] IN (SELECT [Orders].[UserId] FROM [Orders] WHERE ([Orders].[Note] = [Users].[Name])))"
    );
}

#[test]
fn in_subquery_needs_one_column() {
    let err = translate_err(Dialect::Sqlite, |u| {
        Expr::in_subquery(u.column(user::ID), orders())
    });
    assert!(err.is_unsupported_expression());
    assert_eq!(
        err.to_string(),
        "unsupported expression: subquery membership requires exactly one selected column, got 0"
    );
}

#[test]
fn exists() {
    let (sql, params) = filter(Dialect::Sqlite, |u| Expr::exists(orders_of(u)));

    assert_eq!(
        sql,
        "EXISTS (SELECT 1 FROM [Orders] WHERE ([Orders].[UserId] = [Users].[Id]))"
    );
    assert!(params.is_empty());
}

#[test]
fn exists_qualifies_per_dialect() {
    let (sql, _) = filter(Dialect::PostgreSql, |u| Expr::exists(orders_of(u)));
    assert_eq!(
        sql,
        r#"EXISTS (SELECT 1 FROM "Orders" WHERE ("Orders"."UserId" = "Users"."Id"))"#
    );
}

#[test]
fn exists_with_condition() {
    let (sql, params) = filter(Dialect::SqlServer, |u| {
        let orders = orders_of(u);
        let condition = Expr::gt(orders.column(order::TOTAL), 100f64);
        Expr::exists_where(orders, condition)
    });

    assert_eq!(
        sql,
        "EXISTS (SELECT 1 FROM [Orders] WHERE ([Orders].[UserId] = [Users].[Id]) \
         AND ([Orders].[Total] > @p1))"
    );
    assert_eq!(params, vec![Value::from(100f64)]);
}

#[test]
fn negated_exists() {
    let (sql, _) = filter(Dialect::Sqlite, |u| Expr::not(Expr::exists(orders_of(u))));
    assert_eq!(
        sql,
        "(not EXISTS (SELECT 1 FROM [Orders] WHERE ([Orders].[UserId] = [Users].[Id])))"
    );
}

#[test]
fn outer_columns_stay_unqualified() {
    let (sql, params) = filter(Dialect::Sqlite, |u| {
        Expr::and(
            Expr::gt(u.column(user::AGE), 18i64),
            Expr::exists(orders_of(u)),
        )
    });

    assert_eq!(
        sql,
        "(([Age] > $p1) and EXISTS (SELECT 1 FROM [Orders] WHERE ([Orders].[UserId] = [Users].[Id])))"
    );
    assert_eq!(params, vec![Value::from(18i64)]);
}

#[test]
fn exists_over_the_same_table_is_rejected() {
    let err = translate_err(Dialect::Sqlite, |u| {
        let other = users();
        let predicate = Expr::eq(other.column(user::AGE), u.column(user::AGE));
        Expr::exists(build(other, [Operation::filter(predicate)]).unwrap())
    });

    assert!(err.is_unsupported_expression());
    assert_eq!(
        err.to_string(),
        "unsupported expression: correlated EXISTS over the enclosing table `Users`"
    );
}

#[test]
fn paged_exists_is_rejected() {
    let err = translate_err(Dialect::Sqlite, |u| {
        let paged = build(orders_of(u), [Operation::take(1i64)]).unwrap();
        Expr::exists(paged)
    });
    assert!(err.is_unsupported_expression());
}

#[test]
fn subquery_in_a_full_statement() {
    init_logging();

    let u = users();
    let exists = Expr::exists(orders_of(&u));
    let model = build(u, [Operation::filter(exists), Operation::take(5i64)]).unwrap();

    let sql = Serializer::sql_server().generate(&model).unwrap();
    assert_eq!(
        sql.command_text,
        "SELECT TOP (5) * FROM [Users] WHERE EXISTS (SELECT 1 FROM [Orders] \
         WHERE ([Orders].[UserId] = [Users].[Id]))"
    );
}
