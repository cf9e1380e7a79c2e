use crate::Span;

use super::ast::{BinaryOperator, ExprId, UnaryOperator};

/// An expression node: its identity, its kind and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: ExprId,
    pub kind: ExprKind,
    pub span: Span,
}

/// The closed set of expression shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(String),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict(Vec<DictEntry>),
    ListComprehension {
        element: Box<Expr>,
        clauses: Vec<ComprehensionClause>,
    },
    DictComprehension {
        entry: Box<DictEntry>,
        clauses: Vec<ComprehensionClause>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Argument>,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    /// `object.name`
    Attribute {
        object: Box<Expr>,
        name: String,
    },
    /// `object[index]`
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    /// `object[lower:upper:step]`
    Slice {
        object: Box<Expr>,
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
        step: Option<Box<Expr>>,
    },
    /// `then_expr if condition else else_expr`
    Conditional {
        then_expr: Box<Expr>,
        condition: Box<Expr>,
        else_expr: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub key: Expr,
    pub value: Expr,
}

/// One `for … in …` or `if …` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub enum ComprehensionClause {
    For { target: Expr, iterable: Expr },
    If(Expr),
}

/// A call-site argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Positional(Expr),
    /// `name = value`; `name` is a label, not a variable reference.
    Keyword { name: String, name_span: Span, value: Expr },
    /// `*value`
    Unpack(Expr),
    /// `**value`
    UnpackKeywords(Expr),
}

impl Argument {
    pub fn value(&self) -> &Expr {
        match self {
            Argument::Positional(value)
            | Argument::Keyword { value, .. }
            | Argument::Unpack(value)
            | Argument::UnpackKeywords(value) => value,
        }
    }
}

impl Expr {
    pub fn new(id: ExprId, kind: ExprKind, span: Span) -> Self {
        Expr { id, kind, span }
    }

    /// Returns the name if this is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Calls `visit` on this node and then every nested expression, in source order.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Expr)) {
        visit(self);

        match &self.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
            ExprKind::List(elements) | ExprKind::Tuple(elements) => {
                for element in elements {
                    element.walk(visit);
                }
            }
            ExprKind::Dict(entries) => {
                for entry in entries {
                    entry.key.walk(visit);
                    entry.value.walk(visit);
                }
            }
            ExprKind::ListComprehension { element, clauses } => {
                element.walk(visit);
                walk_clauses(clauses, visit);
            }
            ExprKind::DictComprehension { entry, clauses } => {
                entry.key.walk(visit);
                entry.value.walk(visit);
                walk_clauses(clauses, visit);
            }
            ExprKind::Call { callee, arguments } => {
                callee.walk(visit);
                for argument in arguments {
                    argument.value().walk(visit);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            ExprKind::Unary { operand, .. } => operand.walk(visit),
            ExprKind::Attribute { object, .. } => object.walk(visit),
            ExprKind::Index { object, index } => {
                object.walk(visit);
                index.walk(visit);
            }
            ExprKind::Slice { object, lower, upper, step } => {
                object.walk(visit);
                for bound in [lower, upper, step].into_iter().flatten() {
                    bound.walk(visit);
                }
            }
            ExprKind::Conditional { then_expr, condition, else_expr } => {
                then_expr.walk(visit);
                condition.walk(visit);
                else_expr.walk(visit);
            }
        }
    }
}

fn walk_clauses<'a>(clauses: &'a [ComprehensionClause], visit: &mut dyn FnMut(&'a Expr)) {
    for clause in clauses {
        match clause {
            ComprehensionClause::For { target, iterable } => {
                target.walk(visit);
                iterable.walk(visit);
            }
            ComprehensionClause::If(condition) => condition.walk(visit),
        }
    }
}
