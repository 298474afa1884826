#![allow(unused_variables)]

use super::{
    Expr, ExprBinaryOp, ExprCast, ExprColumn, ExprConditional, ExprExists, ExprFunc, ExprInList,
    ExprInSubquery, ExprUnaryOp, Value,
};
use crate::query::QueryModel;

/// Read-only traversal of an expression tree.
///
/// Override the hooks of interest and call the matching free function to keep
/// descending. Subquery models are entered through their filter.
pub trait Visit {
    fn visit_expr(&mut self, i: &Expr) {
        walk_expr(self, i);
    }

    fn visit_expr_binary_op(&mut self, i: &ExprBinaryOp) {
        self.visit_expr(&i.lhs);
        self.visit_expr(&i.rhs);
    }

    fn visit_expr_cast(&mut self, i: &ExprCast) {
        self.visit_expr(&i.expr);
    }

    fn visit_expr_column(&mut self, i: &ExprColumn) {}

    fn visit_expr_conditional(&mut self, i: &ExprConditional) {
        self.visit_expr(&i.test);
        self.visit_expr(&i.then);
        self.visit_expr(&i.otherwise);
    }

    fn visit_expr_exists(&mut self, i: &ExprExists) {
        self.visit_query(&i.query);
        if let Some(condition) = &i.condition {
            self.visit_expr(condition);
        }
    }

    fn visit_expr_func(&mut self, i: &ExprFunc) {
        for arg in &i.args {
            self.visit_expr(arg);
        }
    }

    fn visit_expr_in_list(&mut self, i: &ExprInList) {
        self.visit_expr(&i.expr);
    }

    fn visit_expr_in_subquery(&mut self, i: &ExprInSubquery) {
        self.visit_expr(&i.expr);
        self.visit_query(&i.query);
    }

    fn visit_expr_unary_op(&mut self, i: &ExprUnaryOp) {
        self.visit_expr(&i.expr);
    }

    fn visit_query(&mut self, i: &QueryModel) {
        if let Some(predicate) = &i.predicate {
            self.visit_expr(predicate);
        }
    }

    fn visit_value(&mut self, i: &Value) {}
}

pub fn walk_expr<V>(v: &mut V, node: &Expr)
where
    V: Visit + ?Sized,
{
    match node {
        Expr::BinaryOp(expr) => v.visit_expr_binary_op(expr),
        Expr::Cast(expr) => v.visit_expr_cast(expr),
        Expr::Column(expr) => v.visit_expr_column(expr),
        Expr::Conditional(expr) => v.visit_expr_conditional(expr),
        Expr::Exists(expr) => v.visit_expr_exists(expr),
        Expr::Func(expr) => v.visit_expr_func(expr),
        Expr::InList(expr) => v.visit_expr_in_list(expr),
        Expr::InSubquery(expr) => v.visit_expr_in_subquery(expr),
        Expr::UnaryOp(expr) => v.visit_expr_unary_op(expr),
        Expr::Value(expr) => v.visit_value(expr),
    }
}
