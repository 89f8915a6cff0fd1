//! End-to-end rewriting of hand-built trees against a marker package on disk.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tsk_ast::{AstBuilder, NodeIndex, SourceFile, SyntaxKind};
use tsk_checker::{
    CheckerOptions, DeclId, DeclarationInfo, DeclarationKind, Program, PropertySymbol,
    ResolvedSignature, TypeId, TypeOracle,
};
use tsk_emitter::print_source_file;
use tsk_transform::{KeysTransformer, MarkerModule, NodeRewriter, Rewrite, TransformerConfig};

/// Temp project laid out as
///
/// ```text
/// node_modules/tskeys-marker/index.js
/// node_modules/tskeys-marker/index.d.ts
/// src/app.ts
/// ```
struct Project {
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    fn new() -> Project {
        let project = Project::without_declaration();
        project.write("node_modules/tskeys-marker/index.d.ts", "export declare function keys<T>(): string[];\n");
        project
    }

    /// The implementation file only; the declaration file the checker
    /// reports does not exist on disk.
    fn without_declaration() -> Project {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical tempdir");
        let project = Project { _dir: dir, root };
        project.write("node_modules/tskeys-marker/index.js", "module.exports = {};\n");
        project.write("src/app.ts", "");
        project
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(path, content).expect("write file");
    }

    fn path(&self, relative: &str) -> String {
        self.root.join(relative).to_string_lossy().into_owned()
    }

    fn app(&self) -> String {
        self.path("src/app.ts")
    }

    fn config(&self) -> TransformerConfig {
        TransformerConfig::new(MarkerModule::from_package_dir(
            self.root.join("node_modules/tskeys-marker"),
        ))
    }

    /// `declare function keys<T>(): string[]` and
    /// `declare function typeMembers<T>(): Record<string, string>`
    fn marker_source(&self) -> SourceFile {
        marker_functions(&self.path("node_modules/tskeys-marker/index.d.ts"))
    }
}

fn marker_functions(file_name: &str) -> SourceFile {
    let mut b = AstBuilder::new();
    let string = b.keyword(SyntaxKind::StringKeyword);
    let ret = b.arena().add_array_type(string);
    b.declare_function("keys", &["T"], ret);
    let key = b.keyword(SyntaxKind::StringKeyword);
    let value = b.keyword(SyntaxKind::StringKeyword);
    let ret = b.type_ref("Record", vec![key, value]);
    b.declare_function("typeMembers", &["T"], ret);
    b.finish(file_name)
}

/// `interface Props { a: string; b?: number; }`
fn declare_props(b: &mut AstBuilder) {
    let string = b.keyword(SyntaxKind::StringKeyword);
    let a = b.property("a", string);
    let number = b.keyword(SyntaxKind::NumberKeyword);
    let opt = b.optional_property("b", number);
    b.interface("Props", vec![a, opt]);
}

/// Check `app` together with `others`, transform it, print the result.
fn transform_with<O: TypeOracle>(oracle: &O, project: &Project, mut app: SourceFile) -> String {
    let transformer = KeysTransformer::new(oracle, &project.config());
    transformer.transform_source_file(&mut app);
    print_source_file(&app)
}

fn transform(project: &Project, app: SourceFile) -> String {
    let marker = project.marker_source();
    let program = Program::new(&[&app, &marker]);
    transform_with(&program, project, app)
}

#[test]
fn test_keys_and_type_members_are_lowered() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("typeMembers", vec![arg]);
    b.const_decl("m", call);
    let app = b.finish(&project.app());

    let expected = concat!(
        "interface Props {\n",
        "    a: string;\n",
        "    b?: number;\n",
        "}\n",
        "const k = [\"a\", \"b\"];\n",
        "const m = { a: \"string\", b: \"number\" };\n",
    );
    assert_eq!(transform(&project, app), expected);
}

#[test]
fn test_aliased_and_namespace_imports() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_aliased("keys", "propertyNames", "tskeys-marker");
    b.import_namespace("reflect", "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("propertyNames", vec![arg]);
    b.expr_stmt(call);
    let arg = b.type_ref("Props", vec![]);
    let call = b.member_call("reflect", "typeMembers", vec![arg]);
    b.expr_stmt(call);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    assert!(!output.contains("import"), "{output}");
    assert!(output.contains("[\"a\", \"b\"];\n"), "{output}");
    assert!(output.contains("{ a: \"string\", b: \"number\" };\n"), "{output}");
}

#[test]
fn test_every_import_form_of_the_marker_is_erased() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "tskeys-marker");
    b.import_side_effect("tskeys-marker");
    b.import_namespace("m", "../node_modules/tskeys-marker");
    b.import_named(&["keys"], "../node_modules/tskeys-marker/index.js");
    b.import_named(&["helper"], "./util");
    let app = b.finish(&project.app());

    assert_eq!(
        transform(&project, app),
        "import { helper } from \"./util\";\n"
    );
}

#[test]
fn test_other_files_of_the_marker_package_are_kept() {
    let project = Project::new();
    project.write("node_modules/tskeys-marker/extra.js", "");
    let mut b = AstBuilder::new();
    b.import_named(&["extra"], "tskeys-marker/extra");
    let app = b.finish(&project.app());

    assert_eq!(
        transform(&project, app),
        "import { extra } from \"tskeys-marker/extra\";\n"
    );
}

#[test]
fn test_calls_in_nested_positions() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    declare_props(&mut b);

    let arg = b.type_ref("Props", vec![]);
    let inner = b.call("keys", vec![arg]);
    let log = b.ident("log");
    let outer = b.arena().add_call_expr(log, None, vec![inner]);
    b.expr_stmt(outer);

    let arg = b.type_ref("Props", vec![]);
    let call = b.call("typeMembers", vec![arg]);
    let arena = b.arena();
    let ret = arena.add_return_statement(call);
    let body = arena.add_block(vec![ret]);
    let name = arena.add_identifier("describe");
    let func = arena.add_function_declaration(name, None, Vec::new(), NodeIndex::NONE, body);
    b.push(func);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    assert!(output.contains("log([\"a\", \"b\"]);\n"), "{output}");
    assert!(
        output.contains("function describe() {\n    return { a: \"string\", b: \"number\" };\n}\n"),
        "{output}"
    );
}

#[test]
fn test_block_local_interface_shadows_file_interface() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "tskeys-marker");
    let number = b.keyword(SyntaxKind::NumberKeyword);
    let outer = b.property("outer", number);
    b.interface("L", vec![outer]);

    let string = b.keyword(SyntaxKind::StringKeyword);
    let a = b.property("a", string);
    let arena = b.arena();
    let local_name = arena.add_identifier("L");
    let local = arena.add_interface(local_name, None, None, vec![a]);
    let callee = arena.add_identifier("keys");
    let l_name = arena.add_identifier("L");
    let arg = arena.add_type_reference(l_name, None);
    let call = arena.add_call_expr(callee, Some(vec![arg]), Vec::new());
    let ret = arena.add_return_statement(call);
    let body = arena.add_block(vec![local, ret]);
    let name = arena.add_identifier("f");
    let func = arena.add_function_declaration(name, None, Vec::new(), NodeIndex::NONE, body);
    b.push(func);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    assert!(output.contains("    return [\"a\"];\n"), "{output}");
    assert!(!output.contains("[\"outer\"]"), "{output}");
}

#[test]
fn test_deeply_nested_call_is_rewritten() {
    const DEPTH: usize = 20_000;

    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let mut expr = b.call("keys", vec![arg]);
    let arena = b.arena();
    for _ in 0..DEPTH {
        expr = arena.add_parenthesized(expr);
    }
    b.const_decl("k", expr);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    let expected = format!("{}[\"a\", \"b\"]{}", "(".repeat(DEPTH), ")".repeat(DEPTH));
    assert!(output.contains(&expected));
    assert!(!output.contains("keys<"));
    assert!(!output.contains("tskeys-marker"));
}

#[test]
fn test_local_function_named_keys_is_kept() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    declare_props(&mut b);
    let ret = b.keyword(SyntaxKind::AnyKeyword);
    b.declare_function("keys", &["T"], ret);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    assert!(output.contains("const k = keys<Props>();\n"), "{output}");
}

#[test]
fn test_same_named_declaration_outside_the_package_is_kept() {
    let project = Project::new();
    project.write("lib/index.d.ts", "export declare function keys<T>(): string[];\n");
    let lib = marker_functions(&project.path("lib/index.d.ts"));

    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "../lib");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let app = b.finish(&project.app());

    let program = Program::new(&[&app, &lib]);
    let output = transform_with(&program, &project, app);
    assert!(output.starts_with("import { keys } from \"../lib\";\n"), "{output}");
    assert!(output.contains("const k = keys<Props>();\n"), "{output}");
}

#[test]
fn test_missing_declaration_file_leaves_calls() {
    let project = Project::without_declaration();
    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let app = b.finish(&project.app());

    // The import still resolves to the implementation file and goes away.
    let output = transform(&project, app);
    assert!(!output.contains("import"), "{output}");
    assert!(output.contains("const k = keys<Props>();\n"), "{output}");
}

/// Reports every function declaration as a JSDoc signature.
struct JsDocOracle {
    program: Program,
    declarations: Vec<DeclarationInfo>,
}

impl JsDocOracle {
    fn new(program: Program) -> JsDocOracle {
        let declarations = (0..)
            .map(DeclId)
            .map_while(|id| program.declaration(id).cloned())
            .map(|mut info| {
                if info.kind == DeclarationKind::Function {
                    info.kind = DeclarationKind::JsDocSignature;
                }
                info
            })
            .collect();
        JsDocOracle {
            program,
            declarations,
        }
    }
}

impl TypeOracle for JsDocOracle {
    fn resolved_signature(&self, file_name: &str, call: NodeIndex) -> Option<ResolvedSignature> {
        self.program.resolved_signature(file_name, call)
    }

    fn type_from_type_node(&self, file_name: &str, type_node: NodeIndex) -> Option<TypeId> {
        self.program.type_from_type_node(file_name, type_node)
    }

    fn properties_of_type(&self, type_id: TypeId) -> Vec<PropertySymbol> {
        self.program.properties_of_type(type_id)
    }

    fn type_of_symbol_at_location(&self, property: &PropertySymbol, location: DeclId) -> TypeId {
        self.program.type_of_symbol_at_location(property, location)
    }

    fn type_to_string(&self, type_id: TypeId) -> String {
        self.program.type_to_string(type_id)
    }

    fn declaration(&self, decl: DeclId) -> Option<&DeclarationInfo> {
        self.declarations.get(decl.0 as usize)
    }
}

#[test]
fn test_jsdoc_signature_is_not_a_marker() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let app = b.finish(&project.app());

    let marker = project.marker_source();
    let oracle = JsDocOracle::new(Program::new(&[&app, &marker]));
    let output = transform_with(&oracle, &project, app);
    assert!(output.contains("const k = keys<Props>();\n"), "{output}");
}

#[test]
fn test_missing_type_argument_gives_empty_literals() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    let call = b.call("keys", vec![]);
    b.const_decl("k", call);
    let call = b.call("typeMembers", vec![]);
    b.const_decl("m", call);
    let app = b.finish(&project.app());

    assert_eq!(transform(&project, app), "const k = [];\nconst m = {};\n");
}

#[test]
fn test_type_members_skips_properties_without_declarations() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    let arena = b.arena();
    let k_name = arena.add_identifier("K");
    let x = arena.add_string_literal("x");
    let x = arena.add_literal_type(x);
    let y = arena.add_string_literal("y");
    let y = arena.add_literal_type(y);
    let union = arena.add_union_type(vec![x, y]);
    let k_param = arena.add_type_parameter(k_name, union, NodeIndex::NONE);
    let template = arena.add_token(SyntaxKind::NumberKeyword);
    let mapped = arena.add_mapped_type(k_param, template);
    b.type_alias("Flags", mapped);

    let arg = b.type_ref("Flags", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let arg = b.type_ref("Flags", vec![]);
    let call = b.call("typeMembers", vec![arg]);
    b.const_decl("m", call);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    assert!(output.contains("const k = [\"x\", \"y\"];\n"), "{output}");
    assert!(output.contains("const m = {};\n"), "{output}");
}

#[test]
fn test_member_types_and_quoted_names() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["typeMembers"], "tskeys-marker");
    let string = b.keyword(SyntaxKind::StringKeyword);
    let list = b.arena().add_array_type(string);
    let tags = b.property("tags", list);
    let on = b.string_literal_type("on");
    let off = b.string_literal_type("off");
    let union = b.arena().add_union_type(vec![on, off]);
    let state = b.property("state", union);
    let number = b.keyword(SyntaxKind::NumberKeyword);
    let data_id = b.quoted_property("data-id", number);
    b.interface("Widget", vec![tags, state, data_id]);
    let arg = b.type_ref("Widget", vec![]);
    let call = b.call("typeMembers", vec![arg]);
    b.const_decl("m", call);
    let app = b.finish(&project.app());

    let output = transform(&project, app);
    assert!(
        output.contains(
            "const m = { tags: \"string[]\", state: \"\\\"on\\\" | \\\"off\\\"\", \"data-id\": \"number\" };\n"
        ),
        "{output}"
    );
}

#[test]
fn test_strict_null_checks_show_undefined() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["typeMembers"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("typeMembers", vec![arg]);
    b.const_decl("m", call);
    let app = b.finish(&project.app());

    let marker = project.marker_source();
    let program = Program::with_options(
        &[&app, &marker],
        CheckerOptions {
            strict_null_checks: true,
        },
    );
    let output = transform_with(&program, &project, app);
    assert!(
        output.contains("const m = { a: \"string\", b: \"number | undefined\" };\n"),
        "{output}"
    );
}

#[test]
fn test_second_pass_changes_nothing() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("typeMembers", vec![arg]);
    b.const_decl("m", call);
    let mut app = b.finish(&project.app());

    let marker = project.marker_source();
    let program = Program::new(&[&app, &marker]);
    let transformer = KeysTransformer::new(&program, &project.config());

    let first_root = transformer.transform_source_file(&mut app);
    let first_output = print_source_file(&app);
    let arena_len = app.arena.len();

    let second_root = transformer.transform_source_file(&mut app);
    assert_eq!(second_root, first_root);
    assert_eq!(app.arena.len(), arena_len);
    assert_eq!(print_source_file(&app), first_output);
}

#[test]
fn test_untouched_file_keeps_its_root() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    declare_props(&mut b);
    let call = b.call("run", vec![]);
    b.expr_stmt(call);
    let mut app = b.finish(&project.app());
    let root = app.root;
    let arena_len = app.arena.len();

    let program = Program::new(&[&app]);
    let transformer = KeysTransformer::new(&program, &project.config());
    assert_eq!(transformer.transform_source_file(&mut app), root);
    assert_eq!(app.arena.len(), arena_len);
}

#[test]
fn test_rewriter_decisions() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    let import = b.import_named(&["keys"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.expr_stmt(call);
    let mut app = b.finish(&project.app());

    let marker = project.marker_source();
    let program = Program::new(&[&app, &marker]);
    let config = project.config();
    let rewriter = NodeRewriter::new(&program, &config.marker_module, config.resolution.clone());
    let file_name = app.file_name.clone();

    assert_eq!(rewriter.rewrite(&mut app.arena, &file_name, import), Rewrite::Erase);
    let Rewrite::Replace(literal) = rewriter.rewrite(&mut app.arena, &file_name, call) else {
        panic!("marker call was not replaced");
    };
    assert!(app.arena.get(literal).is_some_and(|node| node.is_synthesized()));
    assert_eq!(rewriter.rewrite(&mut app.arena, &file_name, literal), Rewrite::Keep);
    assert_eq!(rewriter.rewrite(&mut app.arena, &file_name, arg), Rewrite::Keep);
}

#[test]
fn test_transformer_function() {
    let project = Project::new();
    let mut b = AstBuilder::new();
    b.import_named(&["keys"], "tskeys-marker");
    declare_props(&mut b);
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let mut app = b.finish(&project.app());

    let marker = project.marker_source();
    let program = Program::new(&[&app, &marker]);
    let transform = tsk_transform::transformer(&program, &project.config());
    transform(&mut app);
    assert!(print_source_file(&app).ends_with("const k = [\"a\", \"b\"];\n"));
}
