//! Tests for `visit_each_child` copy-on-write rebuilding.

use tsk_ast::syntax_kind_ext::*;
use tsk_ast::{NodeAccess, NodeArena, NodeIndex, SyntaxKind, visit_each_child};

/// `f(a, b)` inside an expression statement.
fn call_statement(arena: &mut NodeArena) -> (NodeIndex, NodeIndex, NodeIndex, NodeIndex) {
    let callee = arena.add_identifier("f");
    let a = arena.add_identifier("a");
    let b = arena.add_identifier("b");
    let call = arena.add_call_expr(callee, None, vec![a, b]);
    (call, callee, a, b)
}

#[test]
fn test_identity_visitor_allocates_nothing() {
    let mut arena = NodeArena::new();
    let (call, ..) = call_statement(&mut arena);
    let before = arena.len();

    let result = visit_each_child(&mut arena, call, &mut |_, child| Some(child));

    assert_eq!(result, call);
    assert_eq!(arena.len(), before);
}

#[test]
fn test_replaced_child_rebuilds_parent_only() {
    let mut arena = NodeArena::new();
    let (call, callee, a, b) = call_statement(&mut arena);
    let replacement = arena.add_numeric_literal("42");

    let result = visit_each_child(&mut arena, call, &mut |_, child| {
        if child == a { Some(replacement) } else { Some(child) }
    });

    assert_ne!(result, call);
    assert_eq!(arena.kind(result), Some(CALL_EXPRESSION));
    assert_eq!(arena.get_children(result), vec![callee, replacement, b]);
    // The original call still reads the way it was built.
    assert_eq!(arena.get_children(call), vec![callee, a, b]);
}

#[test]
fn test_erased_list_element_is_dropped() {
    let mut arena = NodeArena::new();
    let (call, callee, a, b) = call_statement(&mut arena);

    let result = visit_each_child(&mut arena, call, &mut |_, child| {
        if child == a { None } else { Some(child) }
    });

    assert_eq!(arena.get_children(result), vec![callee, b]);
}

#[test]
fn test_erased_single_slot_becomes_none() {
    let mut arena = NodeArena::new();
    let name = arena.add_identifier("x");
    let init = arena.add_numeric_literal("1");
    let decl = arena.add_variable_declaration(name, NodeIndex::NONE, init);

    let result = visit_each_child(&mut arena, decl, &mut |_, child| {
        if child == init { None } else { Some(child) }
    });

    let node = *arena.get(result).unwrap();
    let data = arena.get_variable_declaration(&node).unwrap();
    assert_eq!(data.name, name);
    assert!(data.initializer.is_none());
}

#[test]
fn test_rebuilt_node_keeps_header() {
    let mut arena = NodeArena::new();
    let stmt_expr = arena.add_identifier("x");
    let stmt = arena.add_expression_statement(stmt_expr);
    let root = arena.add_source_file("/src/a.ts", vec![stmt]);
    arena.with_range(root, 0, 10);

    let result = visit_each_child(&mut arena, root, &mut |_, _| None);

    let old = *arena.get(root).unwrap();
    let new = *arena.get(result).unwrap();
    assert_eq!(new.kind, old.kind);
    assert_eq!((new.pos, new.end), (0, 10));
    assert_ne!(new.data_index, old.data_index);
    let data = arena.get_source_file(&new).unwrap();
    assert_eq!(data.file_name, "/src/a.ts");
    assert!(data.statements.is_empty());
}

#[test]
fn test_leaf_nodes_are_returned_as_is() {
    let mut arena = NodeArena::new();
    let token = arena.add_token(SyntaxKind::NumberKeyword);
    let mut calls = 0;
    let result = visit_each_child(&mut arena, token, &mut |_, child| {
        calls += 1;
        Some(child)
    });
    assert_eq!(result, token);
    assert_eq!(calls, 0);
}

#[test]
fn test_arena_serializes() {
    let mut arena = NodeArena::new();
    call_statement(&mut arena);
    let json = serde_json::to_string(&arena).unwrap();
    let back: NodeArena = serde_json::from_str(&json).unwrap();
    assert_eq!(back.nodes, arena.nodes);
}
