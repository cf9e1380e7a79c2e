use log::debug;

use crate::ast::statements::{FnDeclStmt, Stmt, StmtKind};

use super::{
    expr::{declare_target, infer_expr, infer_target},
    inference::TypeInference,
};

pub fn infer_block(inference: &mut TypeInference, body: &[Stmt]) {
    for stmt in body {
        infer_stmt(inference, stmt);
    }
}

pub fn infer_stmt(inference: &mut TypeInference, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Expression(expr) => {
            infer_expr(inference, expr);
        }
        StmtKind::Assign { target, value } => {
            let ty = infer_expr(inference, value);
            match (target.as_identifier(), ty) {
                (Some(name), Some(ty)) => inference.scopes.bind(name, ty),
                _ => infer_target(inference, target),
            }
        }
        StmtKind::AugAssign { target, value, .. } => {
            infer_expr(inference, target);
            infer_expr(inference, value);
        }
        StmtKind::Def(fn_decl) => infer_fn_decl(inference, fn_decl),
        StmtKind::Return(value) => {
            if let Some(value) = value {
                infer_expr(inference, value);
            }
        }
        StmtKind::If { condition, then_body, else_body } => {
            infer_expr(inference, condition);
            infer_block(inference, then_body);
            infer_block(inference, else_body);
        }
        StmtKind::For { target, iterable, body } => {
            infer_expr(inference, iterable);
            infer_target(inference, target);
            declare_target(inference, target);
            infer_block(inference, body);
        }
        StmtKind::Pass | StmtKind::Break | StmtKind::Continue => {}
    }
}

/// Defaults are resolved in the enclosing scope. Every parameter is bound in
/// the function's own scope, typed only when its default is.
fn infer_fn_decl(inference: &mut TypeInference, fn_decl: &FnDeclStmt) {
    let parameters: Vec<_> = fn_decl
        .parameters
        .iter()
        .map(|param| {
            let ty = param
                .default
                .as_ref()
                .and_then(|default| infer_expr(inference, default));
            (param.name.as_str(), ty)
        })
        .collect();

    inference.scopes.push(&fn_decl.identifier);

    for (name, ty) in parameters {
        match ty {
            Some(ty) => {
                debug!("parameter `{}` of `{}` is {}", name, fn_decl.identifier, ty);
                inference.scopes.bind(name, ty);
            }
            None => inference.scopes.declare(name),
        }
    }

    infer_block(inference, &fn_decl.body);
    inference.scopes.pop();
}
