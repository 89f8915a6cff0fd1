use tsk_ast::{AstBuilder, NodeIndex, SyntaxKind, node_flags};
use tsk_emitter::{Printer, print_source_file};

#[test]
fn test_imports_and_declarations() {
    let mut b = AstBuilder::new();
    b.import_named(&["keys", "typeMembers"], "tskeys-marker");
    b.import_aliased("keys", "k", "tskeys-marker");
    b.import_namespace("ns", "tskeys-marker");
    let string = b.keyword(SyntaxKind::StringKeyword);
    let a = b.property("a", string);
    let number = b.keyword(SyntaxKind::NumberKeyword);
    let opt = b.optional_property("b", number);
    b.interface("Props", vec![a, opt]);
    let file = b.finish("/src/app.ts");

    let expected = concat!(
        "import { keys, typeMembers } from \"tskeys-marker\";\n",
        "import { keys as k } from \"tskeys-marker\";\n",
        "import * as ns from \"tskeys-marker\";\n",
        "interface Props {\n",
        "    a: string;\n",
        "    b?: number;\n",
        "}\n",
    );
    assert_eq!(print_source_file(&file), expected);
}

#[test]
fn test_call_with_type_arguments() {
    let mut b = AstBuilder::new();
    let arg = b.type_ref("Props", vec![]);
    let call = b.call("keys", vec![arg]);
    b.const_decl("k", call);
    let member = b.member_call("ns", "typeMembers", vec![]);
    b.expr_stmt(member);
    let file = b.finish("/src/app.ts");

    assert_eq!(
        print_source_file(&file),
        "const k = keys<Props>();\nns.typeMembers();\n"
    );
}

#[test]
fn test_array_and_object_literals() {
    let mut b = AstBuilder::new();
    let arena = b.arena();
    let x = arena.add_string_literal("x");
    let y = arena.add_string_literal("y");
    let array = arena.add_array_literal(vec![x, y]);
    let empty_array = arena.add_array_literal(Vec::new());
    let empty_object = arena.add_object_literal(Vec::new());
    let name = arena.add_identifier("a");
    let value = arena.add_string_literal("string");
    let prop = arena.add_property_assignment(name, value);
    let quoted_name = arena.add_string_literal("data-id");
    let quoted_value = arena.add_string_literal("number");
    let quoted = arena.add_property_assignment(quoted_name, quoted_value);
    let object = arena.add_object_literal(vec![prop, quoted]);
    for expr in [array, empty_array, empty_object, object] {
        b.expr_stmt(expr);
    }
    let file = b.finish("/src/app.ts");

    let expected = concat!(
        "[\"x\", \"y\"];\n",
        "[];\n",
        "{};\n",
        "{ a: \"string\", \"data-id\": \"number\" };\n",
    );
    assert_eq!(print_source_file(&file), expected);
}

#[test]
fn test_multi_line_object_literal() {
    let mut b = AstBuilder::new();
    let arena = b.arena();
    let name = arena.add_identifier("a");
    let value = arena.add_string_literal("string");
    let prop = arena.add_property_assignment(name, value);
    let name = arena.add_identifier("b");
    let value = arena.add_string_literal("number");
    let prop_b = arena.add_property_assignment(name, value);
    let object = arena.add_object_literal(vec![prop, prop_b]);
    let object = arena.with_flags(object, node_flags::MULTI_LINE);
    b.const_decl("m", object);
    let file = b.finish("/src/app.ts");

    let expected = concat!(
        "const m = {\n",
        "    a: \"string\",\n",
        "    b: \"number\"\n",
        "};\n",
    );
    assert_eq!(print_source_file(&file), expected);
}

#[test]
fn test_declare_function_and_types() {
    let mut b = AstBuilder::new();
    let string = b.keyword(SyntaxKind::StringKeyword);
    let ret = b.arena().add_array_type(string);
    b.declare_function("keys", &["T"], ret);

    let on = b.string_literal_type("on");
    let off = b.string_literal_type("off");
    let union = b.arena().add_union_type(vec![on, off]);
    let list = b.arena().add_array_type(union);
    b.type_alias("States", list);
    let file = b.finish("/m/index.d.ts");

    let expected = concat!(
        "export declare function keys<T>(): string[];\n",
        "type States = (\"on\" | \"off\")[];\n",
    );
    assert_eq!(print_source_file(&file), expected);
}

#[test]
fn test_function_body_is_indented() {
    let mut b = AstBuilder::new();
    let arena = b.arena();
    let callee = arena.add_identifier("run");
    let call = arena.add_call_expr(callee, None, Vec::new());
    let stmt = arena.add_expression_statement(call);
    let ret_value = arena.add_token(SyntaxKind::TrueKeyword);
    let ret = arena.add_return_statement(ret_value);
    let body = arena.add_block(vec![stmt, ret]);
    let name = arena.add_identifier("main");
    let func = arena.add_function_declaration(name, None, Vec::new(), NodeIndex::NONE, body);
    b.push(func);
    let file = b.finish("/src/main.ts");

    assert_eq!(
        print_source_file(&file),
        "function main() {\n    run();\n    return true;\n}\n"
    );
}

#[test]
fn test_string_escaping() {
    let mut b = AstBuilder::new();
    let text = b.string("say \"hi\"\n");
    b.expr_stmt(text);
    let file = b.finish("/src/a.ts");
    assert_eq!(print_source_file(&file), "\"say \\\"hi\\\"\\n\";\n");
}

#[test]
fn test_printer_prints_single_node() {
    let mut b = AstBuilder::new();
    let string = b.keyword(SyntaxKind::StringKeyword);
    let arg = b.type_ref("Box", vec![string]);
    let file = b.finish("/src/a.ts");

    let mut printer = Printer::new(&file.arena);
    printer.emit_node(arg);
    assert_eq!(printer.finish(), "Box<string>");
}
