//! Error types and error handling for the front end.
//!
//! This module defines the errors raised while turning source text into an
//! AST. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing and parsing
//! - Error naming and suggestion tips used when rendering
//!
//! Type inference itself never fails, so nothing here is raised by the
//! `inference` module.

pub mod errors;

#[cfg(test)]
mod tests;
