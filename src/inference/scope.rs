use std::collections::{HashMap, HashSet};

use log::debug;

use super::types::Type;

/// One level of name bindings: the module, a function body or a comprehension.
#[derive(Debug)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Type>,
    /// Names bound here to a value of unknown type. They hide outer bindings.
    pub declared: HashSet<String>,
    /// Name of the function whose body this is, `None` for the module.
    pub function: Option<String>,
}

impl Environment {
    pub fn new(function: Option<String>) -> Self {
        Environment {
            variable_lookup: HashMap::new(),
            declared: HashSet::new(),
            function,
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<Type> {
        self.variable_lookup.get(variable_name).copied()
    }

    pub fn declares(&self, variable_name: &str) -> bool {
        self.variable_lookup.contains_key(variable_name) || self.declared.contains(variable_name)
    }
}

/// Stack of environments mirroring function and comprehension nesting. The
/// bottom entry is the module environment and is never popped.
#[derive(Debug)]
pub struct ScopeChain {
    environments: Vec<Environment>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    pub fn new() -> Self {
        ScopeChain {
            environments: vec![Environment::new(None)],
        }
    }

    /// Enters the body of `function`, or of a comprehension labelled as one.
    pub fn push(&mut self, function: &str) {
        debug!("entering scope of `{}` at depth {}", function, self.environments.len());
        self.environments.push(Environment::new(Some(function.to_string())));
    }

    pub fn pop(&mut self) {
        assert!(
            self.environments.len() > 1,
            "ScopeChain::pop called with only the module scope left"
        );

        if let Some(environment) = self.environments.pop() {
            debug!(
                "leaving scope of `{}` with {} bindings",
                environment.function.as_deref().unwrap_or("<module>"),
                environment.variable_lookup.len()
            );
        }
    }

    /// Looks `name` up from the innermost environment outwards. The search
    /// stops at the first environment that binds or declares the name.
    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.environments
            .iter()
            .rev()
            .find(|environment| environment.declares(name))
            .and_then(|environment| environment.get_variable(name))
    }

    /// Binds `name` in the innermost environment, replacing any earlier binding there.
    pub fn bind(&mut self, name: &str, ty: Type) {
        if let Some(environment) = self.environments.last_mut() {
            environment.declared.remove(name);
            environment.variable_lookup.insert(name.to_string(), ty);
        }
    }

    /// Marks `name` as bound in the innermost environment without a known
    /// type, dropping any typed binding it had there.
    pub fn declare(&mut self, name: &str) {
        if let Some(environment) = self.environments.last_mut() {
            environment.variable_lookup.remove(name);
            environment.declared.insert(name.to_string());
        }
    }

    pub fn depth(&self) -> usize {
        self.environments.len()
    }
}
