//! Rewriting an already rewritten tree changes nothing.

mod support;

use support::{MARKER_PACKAGE, Project, declare_t};
use tskeys::ast::{AstBuilder, SourceFile};
use tskeys::{CheckerOptions, KeysTransformer, Program, emit_program, print_source_file};

/// Marker import, both markers, an unrelated import and an object literal
/// holding a nested marker call.
fn sample_app(project: &Project) -> SourceFile {
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    b.import_named(&["render"], "./render");
    declare_t(&mut b);
    let arg = b.type_ref("T", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);

    let arg = b.type_ref("T", vec![]);
    let members = b.call("typeMembers", vec![arg]);
    let arena = b.arena();
    let name = arena.add_identifier("members");
    let assignment = arena.add_property_assignment(name, members);
    let object = arena.add_object_literal(vec![assignment]);
    b.const_decl("schema", object);
    b.finish(&project.source_path("src/app.ts"))
}

#[test]
fn test_same_program_second_pass() {
    let project = Project::new();
    let mut app = sample_app(&project);
    let marker = project.marker_source(MARKER_PACKAGE);
    let program = Program::new(&[&app, &marker]);
    let transformer = KeysTransformer::new(&program, &project.config());

    let root = transformer.transform_source_file(&mut app);
    let text = print_source_file(&app);
    assert!(text.contains("const schema = { members: { a: \"string\", b: \"number\" } };\n"), "{text}");
    let arena_len = app.arena.len();

    for _ in 0..3 {
        assert_eq!(transformer.transform_source_file(&mut app), root);
    }
    assert_eq!(app.arena.len(), arena_len);
    assert_eq!(print_source_file(&app), text);
}

#[test]
fn test_fresh_program_over_output() {
    let project = Project::new();
    let app = sample_app(&project);
    let marker = project.marker_source(MARKER_PACKAGE);

    let mut first = emit_program(
        vec![app.clone(), marker.clone()],
        &project.config(),
        CheckerOptions::default(),
    );
    let first_text = first.remove(0).text;

    // Check the rewritten tree from scratch and run the pass again.
    let mut rewritten = app;
    let program = Program::new(&[&rewritten, &marker]);
    KeysTransformer::new(&program, &project.config()).transform_source_file(&mut rewritten);
    let second_program = Program::new(&[&rewritten, &marker]);
    let root = rewritten.root;
    let arena_len = rewritten.arena.len();

    KeysTransformer::new(&second_program, &project.config()).transform_source_file(&mut rewritten);
    assert_eq!(rewritten.root, root);
    assert_eq!(rewritten.arena.len(), arena_len);
    assert_eq!(print_source_file(&rewritten), first_text);
}

#[test]
fn test_file_without_markers_is_untouched() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["render"], "./render");
    declare_t(&mut b);
    let call = b.call("render", vec![]);
    b.expr_stmt(call);
    let mut app = b.finish(&project.source_path("src/app.ts"));
    let before = print_source_file(&app);
    let root = app.root;

    let program = Program::new(&[&app]);
    KeysTransformer::new(&program, &project.config()).transform_source_file(&mut app);
    assert_eq!(app.root, root);
    assert_eq!(print_source_file(&app), before);
}
