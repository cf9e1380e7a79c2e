use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::expressions::Literal;

use super::types::Type;

lazy_static! {
    /// Callee names whose call result type is known regardless of arguments.
    pub static ref BUILTIN_REGISTRY: HashMap<&'static str, Type> = {
        let mut map = HashMap::new();
        map.insert("dict", Type::Dict);
        map.insert("depset", Type::Depset);
        map.insert("str", Type::String);
        map.insert("int", Type::Int);
        map
    };
}

pub fn type_of_builtin_call(name: &str) -> Option<Type> {
    BUILTIN_REGISTRY.get(name).copied()
}

/// Floats, booleans and `None` have no inferable type.
pub fn type_of_literal(literal: &Literal) -> Option<Type> {
    match literal {
        Literal::String(_) => Some(Type::String),
        Literal::Int(_) => Some(Type::Int),
        Literal::Float(_) | Literal::Bool(_) | Literal::None => None,
    }
}
