use log::{debug, trace};

use crate::ast::ast::{ExprId, Module};

use super::{scope::ScopeChain, stmt::infer_block, types::{Type, TypeMap}};

/// State of one inference run over one module.
///
/// The walk is a single forward pass: a name is only known from the point of
/// its binding onwards, so a function body never sees bindings made after the
/// `def`, and a reference that precedes its binding stays untyped.
#[derive(Debug, Default)]
pub struct TypeInference {
    pub types: TypeMap,
    pub scopes: ScopeChain,
}

impl TypeInference {
    pub fn new() -> Self {
        TypeInference::default()
    }

    pub fn record(&mut self, id: ExprId, ty: Type) {
        trace!("{} : {}", id, ty);
        self.types.record(id, ty);
    }

    pub fn finish(self) -> TypeMap {
        self.types
    }
}

/// Infers types for the expressions of `module`.
pub fn infer(module: &Module) -> TypeMap {
    let mut inference = TypeInference::new();
    infer_block(&mut inference, &module.body);

    debug!("recorded {} expression types in {}", inference.types.len(), module.file);
    inference.finish()
}
