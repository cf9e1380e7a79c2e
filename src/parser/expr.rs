use crate::{
    ast::{
        ast::{BinaryOperator, UnaryOperator},
        expressions::{Argument, ComprehensionClause, DictEntry, Expr, ExprKind, Literal},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.unexpected("expected an expression")),
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.unexpected("expected an operator")),
        };

        let binding_power = parser.current_binding_power();
        left = led_fn(parser, left, binding_power)?;
    }

    Ok(left)
}

/// Parses a comma-separated expression list. More than one element, or a
/// trailing comma, produces a tuple.
pub fn parse_expr_list(parser: &mut Parser) -> Result<Expr, Error> {
    parse_comma_list(parser, BindingPower::Default)
}

/// Parses the target list of a `for` clause, stopping before `in`.
pub fn parse_target_list(parser: &mut Parser) -> Result<Expr, Error> {
    parse_comma_list(parser, BindingPower::Relational)
}

fn parse_comma_list(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let first = parse_expr(parser, bp)?;
    if parser.current_token_kind() != TokenKind::Comma {
        return Ok(first);
    }

    let start = first.span.start.clone();
    let mut elements = vec![first];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if !parser.at_expression_start() {
            break;
        }
        elements.push(parse_expr(parser, bp)?);
    }

    let span = parser.span_from(start);
    Ok(Expr::new(parser.advance_id(), ExprKind::Tuple(elements), span))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let literal = match token.kind {
        TokenKind::Int => Literal::Int(parse_int_literal(&token.value).ok_or_else(|| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?),
        TokenKind::Float => Literal::Float(token.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?),
        TokenKind::String => Literal::String(token.value.clone()),
        TokenKind::True => Literal::Bool(true),
        TokenKind::False => Literal::Bool(false),
        TokenKind::None => Literal::None,
        TokenKind::Identifier => {
            parser.advance();
            return Ok(Expr::new(
                parser.advance_id(),
                ExprKind::Identifier(token.value),
                token.span,
            ));
        }
        _ => return Err(parser.unexpected("expected a literal or identifier")),
    };

    parser.advance();
    Ok(Expr::new(parser.advance_id(), ExprKind::Literal(literal), token.span))
}

fn parse_int_literal(value: &str) -> Option<i64> {
    let lowered = value.to_ascii_lowercase();

    if let Some(digits) = lowered.strip_prefix("0x") {
        i64::from_str_radix(digits, 16).ok()
    } else if let Some(digits) = lowered.strip_prefix("0o") {
        i64::from_str_radix(digits, 8).ok()
    } else {
        lowered.parse().ok()
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = match BinaryOperator::from_token(operator_token.kind) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    Ok(make_binary(parser, left, operator, right))
}

/// `a ** b ** c` groups to the right, and `a ** -b` is allowed.
pub fn parse_power_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(make_binary(parser, left, BinaryOperator::Power, right))
}

pub fn parse_not_in_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let error = parser.unexpected("expected `in` after `not`");
    parser.expect_error(TokenKind::In, Some(error))?;
    let right = parse_expr(parser, bp)?;

    Ok(make_binary(parser, left, BinaryOperator::NotIn, right))
}

fn make_binary(parser: &mut Parser, left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Expr::new(
        parser.advance_id(),
        ExprKind::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        },
        span,
    )
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let (operator, bp) = match (UnaryOperator::from_token(operator_token.kind), operator_token.kind) {
        (Some(operator), TokenKind::Not) => (operator, BindingPower::LogicalNot),
        (Some(operator), _) => (operator, BindingPower::Unary),
        (None, _) => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span.start,
            ))
        }
    };

    let operand = parse_expr(parser, bp)?;
    let span = Span {
        start: operator_token.span.start,
        end: operand.span.end.clone(),
    };

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

/// `then_expr if condition else else_expr`
pub fn parse_conditional_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Conditional)?;

    let error = parser.unexpected("expected `else` in conditional expression");
    parser.expect_error(TokenKind::Else, Some(error))?;
    let else_expr = parse_expr(parser, BindingPower::Default)?;

    let span = Span {
        start: left.span.start.clone(),
        end: else_expr.span.end.clone(),
    };

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Conditional {
            then_expr: Box::new(left),
            condition: Box::new(condition),
            else_expr: Box::new(else_expr),
        },
        span,
    ))
}

/// A parenthesised expression or a tuple. The span covers the parentheses so
/// that enclosing expressions starting at this operand stay well nested.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        let span = parser.span_from(start);
        return Ok(Expr::new(parser.advance_id(), ExprKind::Tuple(vec![]), span));
    }

    let mut expr = parse_expr_list(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    expr.span = parser.span_from(start);

    Ok(expr)
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let mut elements = vec![];

    if parser.current_token_kind() != TokenKind::CloseBracket {
        let first = parse_expr(parser, BindingPower::Default)?;

        if parser.current_token_kind() == TokenKind::For {
            let clauses = parse_comprehension_clauses(parser)?;
            parser.expect(TokenKind::CloseBracket)?;
            let span = parser.span_from(start);

            return Ok(Expr::new(
                parser.advance_id(),
                ExprKind::ListComprehension {
                    element: Box::new(first),
                    clauses,
                },
                span,
            ));
        }

        elements.push(first);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            if parser.current_token_kind() == TokenKind::CloseBracket {
                break;
            }
            elements.push(parse_expr(parser, BindingPower::Default)?);
        }
    }

    parser.expect(TokenKind::CloseBracket)?;
    let span = parser.span_from(start);

    Ok(Expr::new(parser.advance_id(), ExprKind::List(elements), span))
}

pub fn parse_dict_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let mut entries = vec![];

    if parser.current_token_kind() != TokenKind::CloseCurly {
        let first = parse_dict_entry(parser)?;

        if parser.current_token_kind() == TokenKind::For {
            let clauses = parse_comprehension_clauses(parser)?;
            parser.expect(TokenKind::CloseCurly)?;
            let span = parser.span_from(start);

            return Ok(Expr::new(
                parser.advance_id(),
                ExprKind::DictComprehension {
                    entry: Box::new(first),
                    clauses,
                },
                span,
            ));
        }

        entries.push(first);
        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            if parser.current_token_kind() == TokenKind::CloseCurly {
                break;
            }
            entries.push(parse_dict_entry(parser)?);
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    let span = parser.span_from(start);

    Ok(Expr::new(parser.advance_id(), ExprKind::Dict(entries), span))
}

fn parse_dict_entry(parser: &mut Parser) -> Result<DictEntry, Error> {
    let key = parse_expr(parser, BindingPower::Default)?;
    let error = parser.unexpected("expected `:` after dictionary key");
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(DictEntry { key, value })
}

/// Parses `for target in iterable` and `if condition` clauses until neither follows.
fn parse_comprehension_clauses(parser: &mut Parser) -> Result<Vec<ComprehensionClause>, Error> {
    let mut clauses = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::For => {
                parser.advance();
                let target = parse_target_list(parser)?;
                parser.expect(TokenKind::In)?;
                let iterable = parse_expr(parser, BindingPower::Conditional)?;
                clauses.push(ComprehensionClause::For { target, iterable });
            }
            TokenKind::If => {
                parser.advance();
                clauses.push(ComprehensionClause::If(parse_expr(parser, BindingPower::Conditional)?));
            }
            _ => break,
        }
    }

    Ok(clauses)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let argument = match parser.current_token_kind() {
            TokenKind::Star => {
                parser.advance();
                Argument::Unpack(parse_expr(parser, BindingPower::Default)?)
            }
            TokenKind::StarStar => {
                parser.advance();
                Argument::UnpackKeywords(parse_expr(parser, BindingPower::Default)?)
            }
            TokenKind::Identifier if parser.peek_kind(1) == TokenKind::Assignment => {
                let name_token = parser.advance().clone();
                parser.advance();
                Argument::Keyword {
                    name: name_token.value,
                    name_span: name_token.span,
                    value: parse_expr(parser, BindingPower::Default)?,
                }
            }
            _ => Argument::Positional(parse_expr(parser, BindingPower::Default)?),
        };
        arguments.push(argument);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` in argument list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let span = parser.span_from(left.span.start.clone());

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Call {
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

/// `object[index]` or `object[lower:upper:step]`
pub fn parse_subscript_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let start = left.span.start.clone();
    parser.advance();

    let lower = if parser.current_token_kind() == TokenKind::Colon {
        None
    } else {
        Some(parse_expr_list(parser)?)
    };

    let kind = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        let upper = parse_slice_bound(parser)?;
        let step = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            parse_slice_bound(parser)?
        } else {
            None
        };

        ExprKind::Slice {
            object: Box::new(left),
            lower: lower.map(Box::new),
            upper,
            step,
        }
    } else {
        match lower {
            Some(index) => ExprKind::Index {
                object: Box::new(left),
                index: Box::new(index),
            },
            None => return Err(parser.unexpected("expected an index expression")),
        }
    };

    parser.expect(TokenKind::CloseBracket)?;
    let span = parser.span_from(start);

    Ok(Expr::new(parser.advance_id(), kind, span))
}

fn parse_slice_bound(parser: &mut Parser) -> Result<Option<Box<Expr>>, Error> {
    match parser.current_token_kind() {
        TokenKind::Colon | TokenKind::CloseBracket => Ok(None),
        _ => Ok(Some(Box::new(parse_expr(parser, BindingPower::Default)?))),
    }
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let error = parser.unexpected("expected attribute name after `.`");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
    let span = parser.span_from(left.span.start.clone());

    Ok(Expr::new(
        parser.advance_id(),
        ExprKind::Attribute {
            object: Box::new(left),
            name,
        },
        span,
    ))
}
