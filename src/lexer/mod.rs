//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts build-file
//! source into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using an ordered regex pattern table
//! - Recognition of keywords, identifiers, literals, and operators
//! - Indentation tracking (`Indent`/`Dedent`) and logical line ends
//! - Comments, line continuations and implicit joining inside brackets
//! - Token position tracking for error reporting and annotation

pub mod lexer;
pub mod tokens;
