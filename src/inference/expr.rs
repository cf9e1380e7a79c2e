use crate::ast::expressions::{Argument, ComprehensionClause, Expr, ExprKind};

use super::{
    builtins::{type_of_builtin_call, type_of_literal},
    inference::TypeInference,
    types::Type,
};

const COMPREHENSION_SCOPE: &str = "<comprehension>";

/// Resolves the type of `expr`, recording every known type on the way.
///
/// Sub-expressions are always resolved, whatever the outcome for the node itself.
pub fn infer_expr(inference: &mut TypeInference, expr: &Expr) -> Option<Type> {
    let ty = match &expr.kind {
        ExprKind::Literal(literal) => type_of_literal(literal),
        ExprKind::Identifier(name) => inference.scopes.lookup(name),
        ExprKind::List(elements) | ExprKind::Tuple(elements) => {
            for element in elements {
                infer_expr(inference, element);
            }
            None
        }
        ExprKind::Dict(entries) => {
            for entry in entries {
                infer_expr(inference, &entry.key);
                infer_expr(inference, &entry.value);
            }
            Some(Type::Dict)
        }
        ExprKind::ListComprehension { element, clauses } => {
            inference.scopes.push(COMPREHENSION_SCOPE);
            infer_clauses(inference, clauses);
            infer_expr(inference, element);
            inference.scopes.pop();
            None
        }
        ExprKind::DictComprehension { entry, clauses } => {
            inference.scopes.push(COMPREHENSION_SCOPE);
            infer_clauses(inference, clauses);
            infer_expr(inference, &entry.key);
            infer_expr(inference, &entry.value);
            inference.scopes.pop();
            Some(Type::Dict)
        }
        ExprKind::Call { callee, arguments } => infer_call(inference, callee, arguments),
        ExprKind::Binary { left, right, .. } => {
            let left = infer_expr(inference, left);
            let right = infer_expr(inference, right);
            combine_operands(left, right)
        }
        ExprKind::Unary { operand, .. } => {
            infer_expr(inference, operand);
            None
        }
        ExprKind::Attribute { object, .. } => {
            infer_expr(inference, object);
            None
        }
        ExprKind::Index { object, index } => {
            infer_expr(inference, object);
            infer_expr(inference, index);
            None
        }
        ExprKind::Slice { object, lower, upper, step } => {
            infer_expr(inference, object);
            for bound in [lower, upper, step].into_iter().flatten() {
                infer_expr(inference, bound);
            }
            None
        }
        ExprKind::Conditional { then_expr, condition, else_expr } => {
            infer_expr(inference, then_expr);
            infer_expr(inference, condition);
            infer_expr(inference, else_expr);
            None
        }
    };

    if let Some(ty) = ty {
        inference.record(expr.id, ty);
    }

    ty
}

fn infer_call(inference: &mut TypeInference, callee: &Expr, arguments: &[Argument]) -> Option<Type> {
    infer_expr(inference, callee);

    // Keyword names are labels; only their values are resolved.
    for argument in arguments {
        infer_expr(inference, argument.value());
    }

    callee.as_identifier().and_then(type_of_builtin_call)
}

/// One known operand decides the type. Two known operands are left unknown,
/// even when they agree.
pub fn combine_operands(left: Option<Type>, right: Option<Type>) -> Option<Type> {
    match (left, right) {
        (Some(ty), None) | (None, Some(ty)) => Some(ty),
        _ => None,
    }
}

fn infer_clauses(inference: &mut TypeInference, clauses: &[ComprehensionClause]) {
    for clause in clauses {
        match clause {
            ComprehensionClause::For { target, iterable } => {
                infer_expr(inference, iterable);
                infer_target(inference, target);
                declare_target(inference, target);
            }
            ComprehensionClause::If(condition) => {
                infer_expr(inference, condition);
            }
        }
    }
}

/// Declares every plain name in a loop target, so the loop variables hide
/// earlier bindings of the same name.
pub fn declare_target(inference: &mut TypeInference, target: &Expr) {
    match &target.kind {
        ExprKind::Identifier(name) => inference.scopes.declare(name),
        ExprKind::Tuple(elements) | ExprKind::List(elements) => {
            for element in elements {
                declare_target(inference, element);
            }
        }
        _ => {}
    }
}

/// Resolves an expression in binding position. Plain names are skipped since
/// they are being bound, not read; subscripts and attributes are resolved.
pub fn infer_target(inference: &mut TypeInference, target: &Expr) {
    match &target.kind {
        ExprKind::Identifier(_) => {}
        ExprKind::Tuple(elements) | ExprKind::List(elements) => {
            for element in elements {
                infer_target(inference, element);
            }
        }
        _ => {
            infer_expr(inference, target);
        }
    }
}
