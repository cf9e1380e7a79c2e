//! Unit tests for the inference module.
//!
//! Sources are parsed, inferred, and the recorded types are listed against
//! the source text of their expressions, in walk order.

use crate::{
    ast::{ast::ExprId, expressions::Literal},
    parse_source,
};

use super::{
    builtins::{type_of_builtin_call, type_of_literal},
    expr::combine_operands,
    inference::infer,
    scope::ScopeChain,
    types::{Type, TypeMap},
};

fn typed(source: &str) -> Vec<(String, Type)> {
    let module = parse_source(source, "BUILD").unwrap();
    let types = infer(&module);

    let mut result = vec![];
    module.walk_exprs(&mut |expr| {
        if let Some(ty) = types.get(expr.id) {
            result.push((source[expr.span.range()].to_string(), ty));
        }
    });
    result
}

fn entry(snippet: &str, ty: Type) -> (String, Type) {
    (snippet.to_string(), ty)
}

#[test]
fn test_type_display() {
    assert_eq!(Type::String.to_string(), "string");
    assert_eq!(Type::Int.to_string(), "int");
    assert_eq!(Type::Dict.to_string(), "dict");
    assert_eq!(Type::Depset.to_string(), "depset");
}

#[test]
fn test_builtin_registry() {
    assert_eq!(type_of_builtin_call("dict"), Some(Type::Dict));
    assert_eq!(type_of_builtin_call("depset"), Some(Type::Depset));
    assert_eq!(type_of_builtin_call("str"), Some(Type::String));
    assert_eq!(type_of_builtin_call("int"), Some(Type::Int));
    assert_eq!(type_of_builtin_call("list"), None);
    assert_eq!(type_of_builtin_call("glob"), None);
}

#[test]
fn test_literal_types() {
    assert_eq!(type_of_literal(&Literal::String("a".to_string())), Some(Type::String));
    assert_eq!(type_of_literal(&Literal::Int(1)), Some(Type::Int));
    assert_eq!(type_of_literal(&Literal::Float(1.5)), None);
    assert_eq!(type_of_literal(&Literal::Bool(true)), None);
    assert_eq!(type_of_literal(&Literal::None), None);
}

#[test]
fn test_combine_operands() {
    assert_eq!(combine_operands(Some(Type::Int), None), Some(Type::Int));
    assert_eq!(combine_operands(None, Some(Type::String)), Some(Type::String));
    assert_eq!(combine_operands(None, None), None);
    assert_eq!(combine_operands(Some(Type::Int), Some(Type::Int)), None);
    assert_eq!(combine_operands(Some(Type::Int), Some(Type::String)), None);
}

#[test]
fn test_type_map_is_write_once() {
    let mut types = TypeMap::new();
    assert!(types.is_empty());

    types.record(ExprId(3), Type::Int);
    types.record(ExprId(3), Type::String);
    types.record(ExprId(1), Type::Dict);

    assert_eq!(types.len(), 2);
    assert_eq!(types.get(ExprId(3)), Some(Type::Int));
    assert!(types.contains(ExprId(1)));
    assert_eq!(types.get(ExprId(2)), None);
    assert_eq!(
        types.iter().collect::<Vec<_>>(),
        vec![(ExprId(1), Type::Dict), (ExprId(3), Type::Int)]
    );
}

#[test]
fn test_scope_chain_lookup_walks_outwards() {
    let mut scopes = ScopeChain::new();
    scopes.bind("a", Type::Int);
    scopes.bind("b", Type::Int);

    scopes.push("f");
    scopes.bind("b", Type::String);
    assert_eq!(scopes.depth(), 2);
    assert_eq!(scopes.lookup("a"), Some(Type::Int));
    assert_eq!(scopes.lookup("b"), Some(Type::String));

    scopes.pop();
    assert_eq!(scopes.lookup("b"), Some(Type::Int));
    assert_eq!(scopes.lookup("c"), None);
}

#[test]
fn test_scope_chain_sibling_isolation() {
    let mut scopes = ScopeChain::new();

    scopes.push("f");
    scopes.bind("local", Type::Dict);
    scopes.pop();

    scopes.push("g");
    assert_eq!(scopes.lookup("local"), None);
    scopes.pop();
}

#[test]
fn test_scope_chain_declared_name_hides_outer_binding() {
    let mut scopes = ScopeChain::new();
    scopes.bind("x", Type::Int);

    scopes.push("f");
    scopes.declare("x");
    assert_eq!(scopes.lookup("x"), None);

    scopes.bind("x", Type::String);
    assert_eq!(scopes.lookup("x"), Some(Type::String));

    scopes.declare("x");
    assert_eq!(scopes.lookup("x"), None);

    scopes.pop();
    assert_eq!(scopes.lookup("x"), Some(Type::Int));
}

#[test]
#[should_panic(expected = "only the module scope")]
fn test_scope_chain_unmatched_pop_panics() {
    let mut scopes = ScopeChain::new();
    scopes.pop();
}

#[test]
fn test_string_binding_propagates() {
    assert_eq!(
        typed("s = \"string\"\ns2 = s\ns2\n"),
        vec![
            entry("\"string\"", Type::String),
            entry("s", Type::String),
            entry("s2", Type::String),
        ]
    );
}

#[test]
fn test_default_parameter_bound_in_function() {
    assert_eq!(
        typed("x = 3\ndef f(z = \"bar\"):\n    return z\n"),
        vec![
            entry("3", Type::Int),
            entry("\"bar\"", Type::String),
            entry("z", Type::String),
        ]
    );
}

#[test]
fn test_binary_operation_with_unknown_operand() {
    assert_eq!(
        typed("i = 1\ni - foo\nfoo * i\n"),
        vec![
            entry("1", Type::Int),
            entry("i - foo", Type::Int),
            entry("i", Type::Int),
            entry("foo * i", Type::Int),
            entry("i", Type::Int),
        ]
    );
}

#[test]
fn test_binary_operation_with_two_known_operands() {
    assert_eq!(
        typed("1 + 2\n\"a\" + 3\n"),
        vec![
            entry("1", Type::Int),
            entry("2", Type::Int),
            entry("\"a\"", Type::String),
            entry("3", Type::Int),
        ]
    );
}

#[test]
fn test_comparisons_follow_binary_rule() {
    assert_eq!(
        typed("i = 1\ni == foo\nfoo not in i\n"),
        vec![
            entry("1", Type::Int),
            entry("i == foo", Type::Int),
            entry("i", Type::Int),
            entry("foo not in i", Type::Int),
            entry("i", Type::Int),
        ]
    );
}

#[test]
fn test_sibling_functions_do_not_share_bindings() {
    let source = "s = \"a\"\ndef f():\n    s1 = s\n    s1\ndef g():\n    s2 = s1\n    s2\n";

    assert_eq!(
        typed(source),
        vec![
            entry("\"a\"", Type::String),
            entry("s", Type::String),
            entry("s1", Type::String),
        ]
    );
}

#[test]
fn test_rebinding_overrides_later_lookups_only() {
    assert_eq!(
        typed("x = 1\nx\nx = \"a\"\nx\n"),
        vec![
            entry("1", Type::Int),
            entry("x", Type::Int),
            entry("\"a\"", Type::String),
            entry("x", Type::String),
        ]
    );
}

#[test]
fn test_inner_binding_shadows_outer() {
    let source = "x = 1\ndef f():\n    x = \"a\"\n    x\nx\n";

    assert_eq!(
        typed(source),
        vec![
            entry("1", Type::Int),
            entry("\"a\"", Type::String),
            entry("x", Type::String),
            entry("x", Type::Int),
        ]
    );
}

#[test]
fn test_keyword_names_are_not_bound_or_looked_up() {
    assert_eq!(
        typed("foo(y = \"bar\")\ny\n"),
        vec![entry("\"bar\"", Type::String)]
    );
}

#[test]
fn test_builtin_call_with_annotated_arguments() {
    let source = "s = \"a\"\nd = {}\nx = depset(items = [s, d])\nx\n";

    assert_eq!(
        typed(source),
        vec![
            entry("\"a\"", Type::String),
            entry("{}", Type::Dict),
            entry("depset(items = [s, d])", Type::Depset),
            entry("s", Type::String),
            entry("d", Type::Dict),
            entry("x", Type::Depset),
        ]
    );
}

#[test]
fn test_builtin_call_ignores_argument_types() {
    assert_eq!(
        typed("str(1)\nint(\"2\")\n"),
        vec![
            entry("str(1)", Type::String),
            entry("1", Type::Int),
            entry("int(\"2\")", Type::Int),
            entry("\"2\"", Type::String),
        ]
    );
}

#[test]
fn test_qualified_callee_is_not_a_builtin() {
    assert_eq!(typed("foo.dict()\nlist([])\n"), vec![]);
}

#[test]
fn test_unpacked_arguments_are_resolved() {
    let source = "a = \"x\"\nfoo(*a, **{})\n";

    assert_eq!(
        typed(source),
        vec![
            entry("\"x\"", Type::String),
            entry("a", Type::String),
            entry("{}", Type::Dict),
        ]
    );
}

#[test]
fn test_dict_comprehension() {
    let source = "foo = dict()\nx = {k: v for k, v in foo}\n";

    assert_eq!(
        typed(source),
        vec![
            entry("dict()", Type::Dict),
            entry("{k: v for k, v in foo}", Type::Dict),
            entry("foo", Type::Dict),
        ]
    );
}

#[test]
fn test_list_comprehension_is_unknown() {
    assert_eq!(
        typed("[x for x in [1] if x]\n"),
        vec![entry("1", Type::Int)]
    );
}

#[test]
fn test_untyped_literals_are_not_recorded() {
    assert_eq!(typed("x = 1.5\ny = True\nz = None\nx\ny\nz\n"), vec![]);
}

#[test]
fn test_unary_operation_is_unknown() {
    assert_eq!(typed("-1\nnot \"a\"\n"), vec![entry("1", Type::Int), entry("\"a\"", Type::String)]);
}

#[test]
fn test_forward_reference_stays_unknown() {
    assert_eq!(
        typed("def f():\n    return x\nx = 1\n"),
        vec![entry("1", Type::Int)]
    );
}

#[test]
fn test_defaults_resolve_in_enclosing_scope() {
    let source = "def f(p = 1):\n    def g(q = p):\n        q\n";

    assert_eq!(
        typed(source),
        vec![
            entry("1", Type::Int),
            entry("p", Type::Int),
            entry("q", Type::Int),
        ]
    );
}

#[test]
fn test_nested_function_sees_enclosing_bindings() {
    let source = "def f():\n    a = 1\n    def g():\n        a\n    a\ndef h():\n    a\n";

    assert_eq!(
        typed(source),
        vec![
            entry("1", Type::Int),
            entry("a", Type::Int),
            entry("a", Type::Int),
        ]
    );
}

#[test]
fn test_if_and_for_bodies_share_the_enclosing_scope() {
    let source = "if c:\n    x = 1\nelse:\n    y = \"a\"\nfor k in x:\n    z = y\nz\n";

    assert_eq!(
        typed(source),
        vec![
            entry("1", Type::Int),
            entry("\"a\"", Type::String),
            entry("x", Type::Int),
            entry("y", Type::String),
            entry("z", Type::String),
        ]
    );
}

#[test]
fn test_destructuring_creates_no_binding() {
    assert_eq!(
        typed("a, b = 1, 2\na\n"),
        vec![entry("1", Type::Int), entry("2", Type::Int)]
    );
}

#[test]
fn test_subscript_target_is_resolved() {
    let source = "d = {}\ni = 0\nd[i] = \"v\"\n";

    assert_eq!(
        typed(source),
        vec![
            entry("{}", Type::Dict),
            entry("0", Type::Int),
            entry("d", Type::Dict),
            entry("i", Type::Int),
            entry("\"v\"", Type::String),
        ]
    );
}

#[test]
fn test_augmented_assignment_does_not_rebind() {
    assert_eq!(
        typed("x = 1\nx += \"a\"\nx\n"),
        vec![
            entry("1", Type::Int),
            entry("x", Type::Int),
            entry("\"a\"", Type::String),
            entry("x", Type::Int),
        ]
    );
}

#[test]
fn test_unknown_assignment_keeps_earlier_binding() {
    assert_eq!(
        typed("x = 1\nx = foo()\nx\n"),
        vec![entry("1", Type::Int), entry("x", Type::Int)]
    );
}

#[test]
fn test_untyped_parameters_shadow_outer_bindings() {
    let source = "x = 1\nargs = \"a\"\ndef f(x, *args, **kwargs):\n    x\n    args\n    kwargs\n    return x\nx\n";

    assert_eq!(
        typed(source),
        vec![
            entry("1", Type::Int),
            entry("\"a\"", Type::String),
            entry("x", Type::Int),
        ]
    );
}

#[test]
fn test_untyped_parameter_can_be_rebound() {
    let source = "def f(p, q = foo):\n    p = \"a\"\n    p\n    q\n";

    assert_eq!(
        typed(source),
        vec![entry("\"a\"", Type::String), entry("p", Type::String)]
    );
}

#[test]
fn test_comprehension_targets_shadow_outer_bindings() {
    let source = "k = 1\nv = \"a\"\nd = {k: v for k, v in foo}\n[k for k in [v]]\nk\n";

    assert_eq!(
        typed(source),
        vec![
            entry("1", Type::Int),
            entry("\"a\"", Type::String),
            entry("{k: v for k, v in foo}", Type::Dict),
            entry("v", Type::String),
            entry("k", Type::Int),
        ]
    );
}

#[test]
fn test_for_target_replaces_earlier_binding() {
    let source = "x = 1\nfor x in y:\n    x\nx\n";

    assert_eq!(typed(source), vec![entry("1", Type::Int)]);
}
