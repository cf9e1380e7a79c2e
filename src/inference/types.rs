use std::{collections::HashMap, fmt::Display};

use crate::ast::ast::ExprId;

/// The inferable types. An unknown type is represented by `None` wherever a
/// type is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    String,
    Int,
    Dict,
    Depset,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::String => "string",
            Type::Int => "int",
            Type::Dict => "dict",
            Type::Depset => "depset",
        };

        write!(f, "{}", name)
    }
}

/// Types recorded for expression nodes, keyed by node identity.
///
/// Each node is recorded at most once and only with a known type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    types: HashMap<ExprId, Type>,
}

impl TypeMap {
    pub fn new() -> Self {
        TypeMap::default()
    }

    pub fn get(&self, id: ExprId) -> Option<Type> {
        self.types.get(&id).copied()
    }

    pub fn contains(&self, id: ExprId) -> bool {
        self.types.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ExprId, Type)> + '_ {
        let mut entries: Vec<(ExprId, Type)> = self.types.iter().map(|(id, ty)| (*id, *ty)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter()
    }

    /// Records `ty` for `id`. A node that already has a type keeps it.
    pub(crate) fn record(&mut self, id: ExprId, ty: Type) {
        self.types.entry(id).or_insert(ty);
    }
}
