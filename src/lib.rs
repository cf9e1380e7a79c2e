#![allow(clippy::module_inception)]

use std::{fmt::Write, ops::Range, rc::Rc};

use crate::{
    ast::ast::Module,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

pub mod annotate;
pub mod ast;
pub mod errors;
pub mod inference;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use inference::{inference::infer, types::{Type, TypeMap}};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn offset(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Byte range of the span in the source it was lexed from.
    pub fn range(&self) -> Range<usize> {
        self.start.offset()..self.end.offset()
    }
}

/// Lexes and parses `source` in one step.
pub fn parse_source(source: &str, file: &str) -> Result<Module, Error> {
    let tokens = tokenize(source.to_string(), Some(String::from(file)))?;
    let (_, module) = parse(tokens, Rc::new(String::from(file)));
    module
}

/// Returns the 1-based line number, the text of the line and the byte column of `position`.
///
/// A position equal to the source length points just past the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // Only reachable at end of input.
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => Some((line_number - 1, last.to_string(), last.len())),
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders a front-end error against the source it was raised for.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> BUILD.bazel
           |
        20 | x = $
           | ----^
    */

    let position = error.get_position();
    let file = position.1.as_str();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::errors::errors::{Error, ErrorImpl};
    use crate::Position;

    const SOURCE: &str = "x = 1\ny = 2\n    z = $\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 4).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "x = 1\n");
        assert_eq!(line_pos, 4);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 20).unwrap();
        assert_eq!(line_number, 3);
        assert_eq!(line, "    z = $\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("a = 1", 5).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "a = 1");
        assert_eq!(line_pos, 5);

        assert!(super::get_line_at_position("a = 1", 6).is_none());
    }

    #[test]
    fn test_render_error_points_at_column() {
        let error = Error::new(
            ErrorImpl::UnrecognisedToken { token: String::from("$") },
            Position(20, Rc::new(String::from("BUILD"))),
        );
        let rendered = super::render_error(&error, SOURCE);

        assert_eq!(
            rendered,
            "Error: UnrecognisedToken\n-> BUILD\n  |\n3 | z = $\n  | ----^\n"
        );
    }
}
