use std::rc::Rc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, String) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(&format!("^(?:{})", regex)).expect("lexer pattern must compile"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so longer operators come first.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("[ \\t\\f]+", skip_handler),
        pattern("\\\\\\r?\\n", skip_handler),
        pattern("#[^\\n]*", skip_handler),
        pattern("\\r?\\n", newline_handler),
        pattern(r#"[rRbB]?(?:"""(?s:.*?)"""|'''(?s:.*?)'''|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')"#, string_handler),
        pattern(r#"[rRbB]?(?:"""|'''|"|')"#, unterminated_string_handler),
        pattern("0[xX][0-9a-fA-F]+|0[oO][0-7]+|[0-9]+\\.[0-9]*(?:[eE][+-]?[0-9]+)?|\\.[0-9]+(?:[eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+|[0-9]+", number_handler),
        pattern("[\\p{L}_][\\p{L}\\p{N}_]*", symbol_handler),
        pattern("[\\[\\{\\(]", open_bracket_handler),
        pattern("[\\]\\}\\)]", close_bracket_handler),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        pattern(">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("\\+=", MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")),
        pattern("-=", MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")),
        pattern("\\*=", MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")),
        pattern("//=", MK_DEFAULT_HANDLER!(TokenKind::SlashSlashEquals, "//=")),
        pattern("/=", MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")),
        pattern("%=", MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")),
        pattern("\\|=", MK_DEFAULT_HANDLER!(TokenKind::PipeEquals, "|=")),
        pattern("\\*\\*", MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("//", MK_DEFAULT_HANDLER!(TokenKind::SlashSlash, "//")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
        pattern("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern("&", MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&")),
        pattern("\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
    /// Column widths of the enclosing indentation levels; always starts with 0.
    indent_stack: Vec<usize>,
    /// Open brackets; newlines and indentation are ignored while non-empty.
    bracket_stack: Vec<char>,
    at_line_start: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
            indent_stack: vec![0],
            bracket_stack: vec![],
            at_line_start: true,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self, offset: usize) -> Position {
        Position(offset as u32, Rc::clone(&self.file))
    }

    pub fn span_from(&self, start: usize, len: usize) -> Span {
        Span {
            start: self.position(start),
            end: self.position(start + len),
        }
    }

    fn push_layout(&mut self, kind: TokenKind, start: usize, len: usize) {
        let span = self.span_from(start, len);
        self.push(MK_TOKEN!(kind, String::new(), span));
    }

    /// Emits `Indent`/`Dedent` tokens for the line starting at the cursor.
    ///
    /// Blank and comment-only lines leave the indentation stack untouched.
    fn handle_indentation(&mut self) -> Result<(), Error> {
        let mut width = 0;
        let mut indent_len = 0;

        for c in self.remainder().chars() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / 8 + 1) * 8,
                _ => break,
            }
            indent_len += 1;
        }

        if matches!(self.remainder()[indent_len..].chars().next(), None | Some('\n') | Some('\r') | Some('#')) {
            return Ok(());
        }

        self.at_line_start = false;
        let current = *self.indent_stack.last().unwrap_or(&0);

        if width > current {
            self.indent_stack.push(width);
            self.push_layout(TokenKind::Indent, self.pos, indent_len);
        } else if width < current {
            while width < *self.indent_stack.last().unwrap_or(&0) {
                self.indent_stack.pop();
                self.push_layout(TokenKind::Dedent, self.pos + indent_len, 0);
            }

            if width != *self.indent_stack.last().unwrap_or(&0) {
                return Err(Error::new(ErrorImpl::InconsistentIndentation, self.position(self.pos + indent_len)));
            }
        }

        Ok(())
    }

    fn finish(&mut self) {
        if self.tokens.last().is_some_and(|token| token.kind != TokenKind::Newline) {
            self.push_layout(TokenKind::Newline, self.pos, 0);
        }

        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push_layout(TokenKind::Dedent, self.pos, 0);
        }

        self.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span_from(self.pos, 0)));
    }
}

fn skip_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    lexer.advance_n(matched.len());
    Ok(())
}

fn newline_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    if lexer.bracket_stack.is_empty() {
        if lexer.tokens.last().is_some_and(|token| token.kind != TokenKind::Newline) {
            lexer.push_layout(TokenKind::Newline, lexer.pos, matched.len());
        }
        lexer.at_line_start = true;
    }

    lexer.advance_n(matched.len());
    Ok(())
}

fn number_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    let is_radix = matched.len() > 1 && matched.starts_with('0') && matched[1..].starts_with(['x', 'X', 'o', 'O']);
    let kind = if !is_radix && matched.contains(['.', 'e', 'E']) {
        TokenKind::Float
    } else {
        TokenKind::Int
    };

    let span = lexer.span_from(lexer.pos, matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(kind, matched, span));
    Ok(())
}

fn unterminated_string_handler(lexer: &mut Lexer, _matched: String) -> Result<(), Error> {
    Err(Error::new(ErrorImpl::UnterminatedString, lexer.position(lexer.pos)))
}

fn string_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    let prefix_len = usize::from(matched.starts_with(['r', 'R', 'b', 'B']));
    let is_raw = matched.starts_with(['r', 'R']);
    let body = &matched[prefix_len..];
    let quote_len = if body.starts_with("\"\"\"") || body.starts_with("'''") { 3 } else { 1 };
    let string_literal = &body[quote_len..body.len() - quote_len];

    let value = if is_raw {
        string_literal.to_string()
    } else {
        unescape(string_literal)
    };

    let span = lexer.span_from(lexer.pos, matched.len());
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, value, span));
    Ok(())
}

fn unescape(string_literal: &str) -> String {
    let mut result = String::new();
    let mut chars = string_literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some(next_ch) = chars.peek().copied() else {
            result.push(ch); // Keep the lone backslash
            break;
        };

        match next_ch {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            '0' => result.push('\0'),
            '\\' | '"' | '\'' => result.push(next_ch),
            '\n' => {}
            'x' => {
                chars.next();
                let mut hex = String::new();

                while hex.len() < 2 {
                    match chars.peek() {
                        Some(ch) if ch.is_ascii_hexdigit() => {
                            hex.push(*ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
                continue;
            }
            _ => {
                result.push(ch); // Keep the backslash
                result.push(next_ch);
            }
        }
        chars.next();
    }

    result
}

fn symbol_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    let kind = RESERVED_LOOKUP.get(matched.as_str()).copied().unwrap_or(TokenKind::Identifier);
    let span = lexer.span_from(lexer.pos, matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(kind, matched, span));
    Ok(())
}

fn open_bracket_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    let kind = match matched.as_str() {
        "(" => TokenKind::OpenParen,
        "[" => TokenKind::OpenBracket,
        _ => TokenKind::OpenCurly,
    };

    lexer.bracket_stack.extend(matched.chars());
    lexer.push(MK_TOKEN!(kind, matched, lexer.span_from(lexer.pos, 1)));
    lexer.advance_n(1);
    Ok(())
}

fn close_bracket_handler(lexer: &mut Lexer, matched: String) -> Result<(), Error> {
    let (kind, opener) = match matched.as_str() {
        ")" => (TokenKind::CloseParen, '('),
        "]" => (TokenKind::CloseBracket, '['),
        _ => (TokenKind::CloseCurly, '{'),
    };

    if lexer.bracket_stack.pop() != Some(opener) {
        return Err(Error::new(ErrorImpl::UnbalancedBracket { bracket: matched }, lexer.position(lexer.pos)));
    }

    lexer.push(MK_TOKEN!(kind, matched, lexer.span_from(lexer.pos, 1)));
    lexer.advance_n(1);
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        if lex.at_line_start && lex.bracket_stack.is_empty() {
            lex.handle_indentation()?;
        }

        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|found| (pattern.handler, found.as_str().to_string()))
        });

        match matched {
            Some((handler, text)) => handler(&mut lex, text)?,
            None => {
                let token = lex.at().map(String::from).unwrap_or_default();
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position(lex.pos)));
            }
        }
    }

    lex.finish();
    debug!("lexed {} tokens from {}", lex.tokens.len(), lex.file);
    Ok(lex.tokens)
}
