use crate::Span;

use super::{ast::BinaryOperator, expressions::Expr};

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expression(Expr),
    /// `target = value`; the target may be any assignable expression.
    Assign { target: Expr, value: Expr },
    /// `target op= value`
    AugAssign {
        target: Expr,
        operator: BinaryOperator,
        value: Expr,
    },
    Def(FnDeclStmt),
    Return(Option<Expr>),
    /// `elif` chains are nested `If` statements in `else_body`.
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    For {
        target: Expr,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Pass,
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `name` or `name = default`
    Normal,
    /// `*name`
    VarArgs,
    /// `**name`
    KwArgs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Expr>,
    pub span: Span,
}

impl Stmt {
    /// Calls `visit` on every expression node in this statement, including nested bodies.
    pub fn walk_exprs<'a>(&'a self, visit: &mut dyn FnMut(&'a Expr)) {
        match &self.kind {
            StmtKind::Expression(expr) => expr.walk(visit),
            StmtKind::Assign { target, value } | StmtKind::AugAssign { target, value, .. } => {
                target.walk(visit);
                value.walk(visit);
            }
            StmtKind::Def(fn_decl) => {
                for default in fn_decl.parameters.iter().filter_map(|param| param.default.as_ref()) {
                    default.walk(visit);
                }
                walk_body(&fn_decl.body, visit);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    value.walk(visit);
                }
            }
            StmtKind::If { condition, then_body, else_body } => {
                condition.walk(visit);
                walk_body(then_body, visit);
                walk_body(else_body, visit);
            }
            StmtKind::For { target, iterable, body } => {
                target.walk(visit);
                iterable.walk(visit);
                walk_body(body, visit);
            }
            StmtKind::Pass | StmtKind::Break | StmtKind::Continue => {}
        }
    }
}

fn walk_body<'a>(body: &'a [Stmt], visit: &mut dyn FnMut(&'a Expr)) {
    for stmt in body {
        stmt.walk_exprs(visit);
    }
}
