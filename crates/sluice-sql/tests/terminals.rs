mod common;
use common::*;

use pretty_assertions::assert_eq;
use sluice_core::{
    query::{build, Operation},
    stmt::{Expr, Value},
};
use sluice_sql::{Dialect, Serializer};

#[test]
fn count_with_inline_predicate() {
    let base = users();
    let predicate = Expr::gt(base.column(user::AGE), 18i64);

    let sql = compile(
        Dialect::Sqlite,
        base,
        [Operation::terminal("Count", Some(predicate))],
    );

    assert_eq!(
        sql.command_text,
        "SELECT COUNT(*) FROM [Users] WHERE ([Age] > $p1)"
    );
    assert_eq!(sql.parameters, vec![Value::from(18i64)]);
}

#[test]
fn long_count() {
    let sql = compile(
        Dialect::SqlServer,
        users(),
        [Operation::terminal("LongCount", None)],
    );
    assert_eq!(sql.command_text, "SELECT COUNT_BIG(*) FROM [Users]");

    let sql = compile(
        Dialect::Sqlite,
        users(),
        [Operation::terminal("LongCount", None)],
    );
    assert_eq!(sql.command_text, "SELECT COUNT(*) FROM [Users]");
}

#[test]
fn count_ignores_orderings() {
    let base = users();
    let ops = [
        Operation::order_by(base.column(user::NAME)),
        Operation::terminal("Count", None),
    ];

    let sql = compile(Dialect::PostgreSql, base, ops);
    assert_eq!(sql.command_text, r#"SELECT COUNT(*) FROM "Users""#);
}

#[test]
fn count_of_a_page() {
    let ops = || [Operation::take(5i64), Operation::terminal("Count", None)];

    let sql = compile(Dialect::Sqlite, users(), ops());
    assert_eq!(
        sql.command_text,
        "SELECT COUNT(*) FROM (SELECT * FROM [Users] limit 5) AS [t]"
    );

    let sql = compile(Dialect::SqlServer, users(), ops());
    assert_eq!(
        sql.command_text,
        "SELECT COUNT(*) FROM (SELECT TOP (5) * FROM [Users]) AS [t]"
    );
}

#[test]
fn count_of_distinct_rows() {
    let base = users();
    let ops = [
        Operation::select([base.column(user::NAME)]),
        Operation::distinct(),
        Operation::terminal("Count", None),
    ];

    let sql = compile(Dialect::Sqlite, base, ops);
    assert_eq!(
        sql.command_text,
        "SELECT COUNT(*) FROM (SELECT DISTINCT [Name] FROM [Users]) AS [t]"
    );
}

#[test]
fn first_limits_to_one_row() {
    for method in ["First", "FirstOrDefault"] {
        let sql = compile(Dialect::Sqlite, users(), [Operation::terminal(method, None)]);
        assert_eq!(sql.command_text, "SELECT * FROM [Users] limit 1");

        let sql = compile(
            Dialect::SqlServer,
            users(),
            [Operation::terminal(method, None)],
        );
        assert_eq!(sql.command_text, "SELECT TOP (1) * FROM [Users]");
    }
}

#[test]
fn single_reads_two_rows() {
    let sql = compile(
        Dialect::PostgreSql,
        users(),
        [Operation::terminal("Single", None)],
    );
    assert_eq!(sql.command_text, r#"SELECT * FROM "Users" limit 2"#);
}

#[test]
fn first_after_skip() {
    let sql = compile(
        Dialect::SqlServer,
        users(),
        [Operation::skip(3i64), Operation::terminal("First", None)],
    );
    assert_eq!(
        sql.command_text,
        "SELECT * FROM [Users] ORDER BY [Id] ASC OFFSET 3 ROWS FETCH NEXT 1 ROWS ONLY"
    );
}

#[test]
fn last_reverses_primary_key_order() {
    let sql = compile(Dialect::Sqlite, users(), [Operation::terminal("Last", None)]);
    assert_eq!(
        sql.command_text,
        "SELECT * FROM [Users] ORDER BY [Id] DESC limit 1"
    );
}

#[test]
fn last_reverses_explicit_order() {
    let base = users();
    let ops = [
        Operation::order_by_descending(base.column(user::AGE)),
        Operation::then_by(base.column(user::NAME)),
        Operation::terminal("LastOrDefault", None),
    ];

    let sql = compile(Dialect::SqlServer, base, ops);
    assert_eq!(
        sql.command_text,
        "SELECT TOP (1) * FROM [Users] ORDER BY [Age] ASC, [Name] DESC"
    );
}

#[test]
fn last_over_a_page_is_rejected() {
    let model = build(
        users(),
        [Operation::take(5i64), Operation::terminal("Last", None)],
    )
    .unwrap();

    let err = Serializer::sqlite().generate(&model).unwrap_err();
    assert!(err.is_unsupported_expression());
}

#[test]
fn any_selects_a_constant_without_ordering() {
    let base = users();
    let predicate = Expr::eq(base.column(user::NAME), "bob");
    let ops = [
        Operation::order_by(base.column(user::AGE)),
        Operation::terminal("Any", Some(predicate)),
    ];

    let sql = compile(Dialect::Sqlite, base, ops);
    assert_eq!(
        sql.command_text,
        "SELECT 1 FROM [Users] WHERE ([Name] = $p1) limit 1"
    );
    assert_eq!(sql.parameters, vec![Value::from("bob")]);
}

#[test]
fn any_on_sql_server() {
    let sql = compile(Dialect::SqlServer, users(), [Operation::terminal("Any", None)]);
    assert_eq!(sql.command_text, "SELECT TOP (1) 1 FROM [Users]");
}
