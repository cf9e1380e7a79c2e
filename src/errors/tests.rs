//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("BUILD".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "BUILD");
}

#[test]
fn test_error_names() {
    let cases = [
        (ErrorImpl::UnterminatedString, "UnterminatedString"),
        (ErrorImpl::InconsistentIndentation, "InconsistentIndentation"),
        (
            ErrorImpl::UnbalancedBracket { bracket: ")".to_string() },
            "UnbalancedBracket",
        ),
        (
            ErrorImpl::UnexpectedTokenDetailed {
                token: "def".to_string(),
                message: "expected expression".to_string(),
            },
            "UnexpectedTokenDetailed",
        ),
        (
            ErrorImpl::NumberParseError { token: "0x".to_string() },
            "NumberParseError",
        ),
        (ErrorImpl::InvalidAssignmentTarget, "InvalidAssignmentTarget"),
    ];

    for (error_impl, name) in cases {
        assert_eq!(Error::new(error_impl, at(0)).get_error_name(), name);
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: ")".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unexpected token: `)`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::new(ErrorImpl::UnterminatedString, at(7));

    assert_eq!(error.to_string(), "unterminated string literal at BUILD:7");
}
