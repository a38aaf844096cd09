//! Core AST definitions.
//!
//! Statements and expressions are closed enums; every consumer matches on
//! them exhaustively. Nodes own their children, so the tree is acyclic and
//! immutable once built.

use crate::Span;

use super::{
    expressions::{
        BinaryExpr, CallExpr, ListExpr, LiteralExpr, MapExpr, SymbolExpr, UnaryExpr,
    },
    statements::{
        AssignmentStmt, BreakStmt, ExpressionStmt, FnDeclStmt, ForeachStmt, IfStmt, PrintStmt,
        ReturnStmt, VarDeclStmt, WhileStmt,
    },
};

/// The root of a translated source file: its top-level statements in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    While(WhileStmt),
    Foreach(ForeachStmt),
    FnDecl(FnDeclStmt),
    Return(ReturnStmt),
    Print(PrintStmt),
    Break(BreakStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Foreach(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    List(ListExpr),
    Map(MapExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::List(expr) => &expr.span,
            Expr::Map(expr) => &expr.span,
        }
    }
}
