//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (assignments, functions, control flow)
//! - Expression parsing (binary ops, calls, comprehensions, literals)
//! - Indentation-delimited and single-line suites
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. Every
//! expression node receives an id unique within the parsed module.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
