use crate::{
    ast::{
        ast::BinaryOperator,
        expressions::{Expr, ExprKind},
        statements::{FnDeclStmt, Param, ParamKind, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_expr_list, parse_target_list},
        lookups::BindingPower,
    },
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let stmt_fn = *stmt_fn;
        return stmt_fn(parser);
    }

    parse_simple_stmt(parser)
}

/// An expression statement, an assignment or an augmented assignment.
fn parse_simple_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let lhs = parse_expr_list(parser)?;

    let kind = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        validate_target(&lhs)?;
        let value = parse_expr_list(parser)?;

        StmtKind::Assign { target: lhs, value }
    } else if parser.current_token_kind().is_augmented_assignment() {
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

        match lhs.kind {
            ExprKind::Identifier(_) | ExprKind::Attribute { .. } | ExprKind::Index { .. } => {}
            _ => {
                return Err(Error::new(
                    ErrorImpl::InvalidAssignmentTarget,
                    lhs.span.start.clone(),
                ))
            }
        }
        let value = parse_expr_list(parser)?;

        StmtKind::AugAssign {
            target: lhs,
            operator,
            value,
        }
    } else {
        StmtKind::Expression(lhs)
    };

    let span = parser.span_from(start);
    expect_stmt_end(parser)?;

    Ok(Stmt { kind, span })
}

/// Only names, attributes, subscripts and (nested) tuples or lists of them can be assigned to.
fn validate_target(target: &Expr) -> Result<(), Error> {
    match &target.kind {
        ExprKind::Identifier(_)
        | ExprKind::Attribute { .. }
        | ExprKind::Index { .. }
        | ExprKind::Slice { .. } => Ok(()),
        ExprKind::Tuple(elements) | ExprKind::List(elements) => {
            elements.iter().try_for_each(validate_target)
        }
        _ => Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget,
            target.span.start.clone(),
        )),
    }
}

/// Consumes the terminator of a simple statement: `;`, a newline, or both.
fn expect_stmt_end(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            if parser.current_token_kind() == TokenKind::Newline {
                parser.advance();
            }
            Ok(())
        }
        TokenKind::Newline => {
            parser.advance();
            Ok(())
        }
        TokenKind::EOF | TokenKind::Dedent => Ok(()),
        _ => Err(parser.unexpected("expected end of statement")),
    }
}

/// The body after a `:`, either an indented block or statements on the same line.
fn parse_suite(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let error = parser.unexpected("expected `:`");
    parser.expect_error(TokenKind::Colon, Some(error))?;

    let mut body = vec![];

    if parser.current_token_kind() == TokenKind::Newline {
        parser.advance();
        let error = parser.unexpected("expected an indented block");
        parser.expect_error(TokenKind::Indent, Some(error))?;

        while parser.current_token_kind() != TokenKind::Dedent && parser.has_tokens() {
            body.push(parse_stmt(parser)?);
        }

        parser.expect(TokenKind::Dedent)?;
        return Ok(body);
    }

    body.push(parse_stmt(parser)?);
    while parser.previous_token().map(|token| token.kind) == Some(TokenKind::Semicolon)
        && parser.has_tokens()
        && parser.current_token_kind() != TokenKind::Dedent
    {
        body.push(parse_stmt(parser)?);
    }

    Ok(body)
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected function name after `def`");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        let param_start = parser.get_position();
        let kind = match parser.current_token_kind() {
            TokenKind::Star => {
                parser.advance();
                ParamKind::VarArgs
            }
            TokenKind::StarStar => {
                parser.advance();
                ParamKind::KwArgs
            }
            _ => ParamKind::Normal,
        };

        // A bare `*` only separates keyword-only parameters.
        if kind == ParamKind::VarArgs && parser.current_token_kind() != TokenKind::Identifier {
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            }
            continue;
        }

        let error = parser.unexpected("expected parameter name");
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

        let default = if kind == ParamKind::Normal && parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Default)?)
        } else {
            None
        };

        parameters.push(Param {
            name,
            kind,
            default,
            span: parser.span_from(param_start),
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` in parameter list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let body = parse_suite(parser)?;

    Ok(Stmt {
        kind: StmtKind::Def(FnDeclStmt {
            identifier,
            parameters,
            body,
        }),
        span: parser.span_from(start),
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = match parser.current_token_kind() {
        TokenKind::Newline | TokenKind::Semicolon | TokenKind::EOF | TokenKind::Dedent => None,
        _ => Some(parse_expr_list(parser)?),
    };

    let span = parser.span_from(start);
    expect_stmt_end(parser)?;

    Ok(Stmt {
        kind: StmtKind::Return(value),
        span,
    })
}

/// Handles both `if` and `elif`; an `elif` becomes a nested `if` in the else body.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_suite(parser)?;

    let else_body = match parser.current_token_kind() {
        TokenKind::Elif => vec![parse_if_stmt(parser)?],
        TokenKind::Else => {
            parser.advance();
            parse_suite(parser)?
        }
        _ => vec![],
    };

    Ok(Stmt {
        kind: StmtKind::If {
            condition,
            then_body,
            else_body,
        },
        span: parser.span_from(start),
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let target = parse_target_list(parser)?;
    validate_target(&target)?;
    let error = parser.unexpected("expected `in` in for loop");
    parser.expect_error(TokenKind::In, Some(error))?;
    let iterable = parse_expr_list(parser)?;
    let body = parse_suite(parser)?;

    Ok(Stmt {
        kind: StmtKind::For {
            target,
            iterable,
            body,
        },
        span: parser.span_from(start),
    })
}

/// `pass`, `break` and `continue`
pub fn parse_keyword_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();

    let kind = match token.kind {
        TokenKind::Pass => StmtKind::Pass,
        TokenKind::Break => StmtKind::Break,
        TokenKind::Continue => StmtKind::Continue,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    expect_stmt_end(parser)?;

    Ok(Stmt {
        kind,
        span: token.span,
    })
}
