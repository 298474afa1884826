#![allow(dead_code)]

use chrono::NaiveDateTime;
use sluice::{Dialect, GeneratedSql, Query, Session, Table};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, sluice::Enum)]
pub enum Status {
    Active,
    Suspended,
    Banned,
}

#[derive(Debug, Table)]
#[table = "Users"]
pub struct User {
    #[key]
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub score: Option<f64>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub external_id: Option<Uuid>,
    pub flags: i32,
    pub status: Status,
    #[column("Nick")]
    pub nickname: Option<String>,
    #[column(type = enum)]
    pub level: i32,
}

#[derive(Debug, Table)]
#[table = "Orders"]
pub struct Order {
    #[key]
    pub id: i64,
    pub user_id: i64,
    pub total: f64,
    pub note: Option<String>,
}

/// Mapped without a key, under its struct name.
#[derive(Debug, Table)]
pub struct Event {
    pub name: String,
    pub at: NaiveDateTime,
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn session(dialect: Dialect) -> Session {
    init_logging();
    Session::new(dialect)
}

pub fn compile<M: Table>(dialect: Dialect, query: Query<M>) -> GeneratedSql {
    session(dialect).compile(&query).unwrap()
}

pub fn compile_err<M: Table>(dialect: Dialect, query: Query<M>) -> sluice::Error {
    session(dialect).compile(&query).unwrap_err()
}

pub fn users() -> Query<User> {
    Query::all()
}

pub fn orders() -> Query<Order> {
    Query::all()
}
