//! Best-effort type inference.
//!
//! This module walks a parsed module once, top to bottom, and records a type
//! for every expression whose type can be determined locally:
//!
//! - String and integer literals
//! - Calls to the builtin constructors (`dict`, `depset`, `str`, `int`)
//! - Dict literals and dict comprehensions
//! - Identifiers bound earlier in the same or an enclosing scope
//! - Binary operations with exactly one operand of known type
//!
//! Nothing here ever fails. Anything ambiguous is left out of the resulting
//! `TypeMap`.

pub mod builtins;
pub mod expr;
pub mod inference;
pub mod scope;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
