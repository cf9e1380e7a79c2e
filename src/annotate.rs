//! Views of an inference result over the source it was computed from.

use std::{cmp::Reverse, fmt::Display};

use crate::{
    ast::{ast::{ExprId, Module}, expressions::Expr},
    get_line_at_position,
    inference::types::{Type, TypeMap},
};

/// A recorded expression located in its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedExpr {
    pub id: ExprId,
    /// 1-based line of the expression's first character
    pub line: usize,
    /// 1-based column, in characters
    pub column: usize,
    pub ty: Type,
    /// Source text of the expression with runs of whitespace collapsed
    pub snippet: String,
}

impl Display for TypedExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}: {}", self.line, self.column, self.ty, self.snippet)
    }
}

struct Mark<'a> {
    expr: &'a Expr,
    ty: Type,
}

fn typed_exprs<'a>(module: &'a Module, types: &TypeMap) -> Vec<Mark<'a>> {
    let mut marks = vec![];
    module.walk_exprs(&mut |expr| {
        if let Some(ty) = types.get(expr.id) {
            marks.push(Mark { expr, ty });
        }
    });
    marks
}

/// Returns `source` with every typed expression wrapped as `type:<text>`.
///
/// Nested expressions nest their wrappers, e.g. `int:<int:<i> - foo>`.
pub fn annotate(source: &str, module: &Module, types: &TypeMap) -> String {
    let marks = typed_exprs(module, types);

    // Closings sort before openings at the same offset. Inner nodes close
    // first and outer nodes open first; ids break ties between equal spans
    // since parents are allocated after their children.
    let mut inserts: Vec<((usize, u8, Reverse<usize>, i64), String)> = vec![];
    for mark in &marks {
        let range = mark.expr.span.range();
        let id = i64::from(mark.expr.id.0);

        inserts.push(((range.end, 0, Reverse(range.start), id), String::from(">")));
        inserts.push(((range.start, 1, Reverse(range.end), -id), format!("{}:<", mark.ty)));
    }
    inserts.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::with_capacity(source.len() + inserts.len() * 8);
    let mut copied = 0;

    for ((offset, ..), text) in inserts {
        let offset = offset.min(source.len());
        if offset > copied {
            out.push_str(&source[copied..offset]);
            copied = offset;
        }
        out.push_str(&text);
    }

    out.push_str(&source[copied..]);
    out
}

/// Lists every typed expression in source order, outer expressions first.
pub fn describe(source: &str, module: &Module, types: &TypeMap) -> Vec<TypedExpr> {
    let mut marks = typed_exprs(module, types);
    marks.sort_by_key(|mark| {
        let range = mark.expr.span.range();
        (range.start, Reverse(range.end), Reverse(mark.expr.id))
    });

    marks
        .into_iter()
        .map(|mark| {
            let range = mark.expr.span.range();
            let (line, line_text, byte_column) = get_line_at_position(source, range.start as u32)
                .unwrap_or((0, String::new(), 0));
            let column = line_text
                .get(..byte_column)
                .map(|prefix| prefix.chars().count())
                .unwrap_or(byte_column)
                + 1;
            let snippet = source
                .get(range)
                .unwrap_or_default()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");

            TypedExpr {
                id: mark.expr.id,
                line,
                column,
                ty: mark.ty,
                snippet,
            }
        })
        .collect()
}
