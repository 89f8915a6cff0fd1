//! Tree to text.

use tsk_ast::syntax_kind_ext::*;
use tsk_ast::{NodeAccess, NodeArena, NodeIndex, NodeList, SourceFile, SyntaxKind, node_flags};
use tsk_common::stack::ensure_sufficient_stack;

/// Print the current root of `file`.
pub fn print_source_file(file: &SourceFile) -> String {
    let mut printer = Printer::new(&file.arena);
    printer.emit_node(file.root);
    printer.finish()
}

/// Prints nodes of one arena as TypeScript source.
pub struct Printer<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) output: String,
    pub(crate) indent_level: u32,
    pub(crate) indent_str: &'static str,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Print any node: statements end with their own terminator, expressions
    /// and type nodes print inline.
    pub fn emit_node(&mut self, idx: NodeIndex) {
        ensure_sufficient_stack(|| self.emit_node_kind(idx));
    }

    fn emit_node_kind(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            SOURCE_FILE => {
                if let Some(data) = arena.get_source_file(node) {
                    for stmt in data.statements.iter() {
                        self.emit_statement(stmt);
                    }
                }
            }

            // Statements
            BLOCK | VARIABLE_STATEMENT | EXPRESSION_STATEMENT | RETURN_STATEMENT | IF_STATEMENT
            | FUNCTION_DECLARATION | INTERFACE_DECLARATION | TYPE_ALIAS_DECLARATION
            | IMPORT_DECLARATION => self.emit_statement_body(idx),

            // Expressions
            CALL_EXPRESSION => {
                if let Some(call) = arena.get_call_expr(node) {
                    self.emit_node(call.expression);
                    self.write_type_list(call.type_arguments.as_ref());
                    self.write("(");
                    self.write_comma_list(&call.arguments, Self::emit_node);
                    self.write(")");
                }
            }
            PROPERTY_ACCESS_EXPRESSION => {
                if let Some(access) = arena.get_access_expr(node) {
                    self.emit_node(access.expression);
                    self.write(".");
                    self.write_identifier_text(access.name);
                }
            }
            ARRAY_LITERAL_EXPRESSION => {
                if let Some(data) = arena.get_literal_expr(node) {
                    let multi_line = node.has_flag(node_flags::MULTI_LINE);
                    self.emit_bracketed("[", "]", &data.elements, multi_line, false);
                }
            }
            OBJECT_LITERAL_EXPRESSION => {
                if let Some(data) = arena.get_literal_expr(node) {
                    let multi_line = node.has_flag(node_flags::MULTI_LINE);
                    self.emit_bracketed("{", "}", &data.elements, multi_line, true);
                }
            }
            PROPERTY_ASSIGNMENT => {
                if let Some(data) = arena.get_property_assignment(node) {
                    self.write_property_name(data.name);
                    self.write(": ");
                    self.emit_node(data.initializer);
                }
            }
            SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(data) = arena.get_property_assignment(node) {
                    self.write_identifier_text(data.name);
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(data) = arena.get_parenthesized(node) {
                    self.write("(");
                    self.emit_node(data.expression);
                    self.write(")");
                }
            }
            BINARY_EXPRESSION => {
                if let Some(data) = arena.get_binary_expr(node) {
                    self.emit_node(data.left);
                    let operator = SyntaxKind::from_u16(data.operator_token)
                        .and_then(SyntaxKind::token_text)
                        .unwrap_or("?");
                    self.write(" ");
                    self.write(operator);
                    self.write(" ");
                    self.emit_node(data.right);
                }
            }
            ARROW_FUNCTION => {
                if let Some(func) = arena.get_function(node) {
                    self.write("(");
                    self.write_comma_list(&func.parameters, Self::emit_node);
                    self.write(")");
                    self.emit_type_annotation(func.type_annotation);
                    self.write(" => ");
                    if arena.kind(func.body) == Some(BLOCK) {
                        self.emit_block(func.body);
                    } else if let Some(body) = arena.get(func.body).and_then(|n| arena.get_expr_statement(n)) {
                        self.emit_node(body.expression);
                    } else {
                        self.emit_node(func.body);
                    }
                }
            }
            PARAMETER => {
                if let Some(param) = arena.get_parameter(node) {
                    self.write_identifier_text(param.name);
                    if node.has_flag(node_flags::OPTIONAL) {
                        self.write("?");
                    }
                    self.emit_type_annotation(param.type_annotation);
                    if param.initializer.is_some() {
                        self.write(" = ");
                        self.emit_node(param.initializer);
                    }
                }
            }
            TYPE_PARAMETER => {
                if let Some(param) = arena.get_type_parameter(node) {
                    self.write_identifier_text(param.name);
                    if param.constraint.is_some() {
                        self.write(" extends ");
                        self.emit_node(param.constraint);
                    }
                    if param.default.is_some() {
                        self.write(" = ");
                        self.emit_node(param.default);
                    }
                }
            }

            // Types
            TYPE_REFERENCE => {
                if let Some(data) = arena.get_type_ref(node) {
                    self.write_identifier_text(data.type_name);
                    self.write_type_list(data.type_arguments.as_ref());
                }
            }
            UNION_TYPE => {
                if let Some(data) = arena.get_composite_type(node) {
                    for (i, member) in data.types.iter().enumerate() {
                        if i > 0 {
                            self.write(" | ");
                        }
                        self.emit_node(member);
                    }
                }
            }
            ARRAY_TYPE => {
                if let Some(data) = arena.get_array_type(node) {
                    let wrap = matches!(arena.kind(data.element_type), Some(UNION_TYPE | FUNCTION_TYPE));
                    if wrap {
                        self.write("(");
                    }
                    self.emit_node(data.element_type);
                    if wrap {
                        self.write(")");
                    }
                    self.write("[]");
                }
            }
            LITERAL_TYPE => {
                if let Some(data) = arena.get_literal_type(node) {
                    self.emit_node(data.literal);
                }
            }
            TYPE_LITERAL => {
                if let Some(data) = arena.get_type_literal(node) {
                    if data.members.is_empty() {
                        self.write("{}");
                    } else {
                        self.write("{ ");
                        for member in data.members.iter() {
                            self.emit_node(member);
                            self.write("; ");
                        }
                        self.write("}");
                    }
                }
            }
            PROPERTY_SIGNATURE | METHOD_SIGNATURE => {
                if let Some(sig) = arena.get_signature(node) {
                    if node.has_flag(node_flags::READONLY) {
                        self.write("readonly ");
                    }
                    self.write_property_name(sig.name);
                    if node.has_flag(node_flags::OPTIONAL) {
                        self.write("?");
                    }
                    if let Some(params) = &sig.parameters {
                        self.write_type_list(sig.type_parameters.as_ref());
                        self.write("(");
                        self.write_comma_list(params, Self::emit_node);
                        self.write(")");
                    }
                    self.emit_type_annotation(sig.type_annotation);
                }
            }
            INDEX_SIGNATURE => {
                if let Some(sig) = arena.get_index_signature(node) {
                    self.write("[");
                    self.write_comma_list(&sig.parameters, Self::emit_node);
                    self.write("]");
                    self.emit_type_annotation(sig.type_annotation);
                }
            }
            MAPPED_TYPE => {
                if let Some(data) = arena.get_mapped_type(node) {
                    self.write("{ [");
                    if let Some(param) = arena.get(data.type_parameter).and_then(|n| arena.get_type_parameter(n)) {
                        self.write_identifier_text(param.name);
                        self.write(" in ");
                        self.emit_node(param.constraint);
                    }
                    self.write("]");
                    self.emit_type_annotation(data.template_type);
                    self.write("; }");
                }
            }
            FUNCTION_TYPE => {
                if let Some(data) = arena.get_function_type(node) {
                    self.write_type_list(data.type_parameters.as_ref());
                    self.write("(");
                    self.write_comma_list(&data.parameters, Self::emit_node);
                    self.write(") => ");
                    self.emit_node(data.type_annotation);
                }
            }

            kind if kind == SyntaxKind::Identifier as u16 => self.write_identifier_text(idx),
            kind if kind == SyntaxKind::StringLiteral as u16 => {
                if let Some(text) = arena.get_literal_text(idx) {
                    self.write_quoted(text);
                }
            }
            kind if kind == SyntaxKind::NumericLiteral as u16 => {
                if let Some(text) = arena.get_literal_text(idx) {
                    self.write(text);
                }
            }
            kind => match SyntaxKind::from_u16(kind).and_then(SyntaxKind::token_text) {
                Some(text) => self.write(text),
                None => {
                    tracing::debug!(kind = kind_name(kind), "[printer] no printer for node kind");
                }
            },
        }
    }

    fn emit_statement(&mut self, idx: NodeIndex) {
        ensure_sufficient_stack(|| {
            self.write_indent();
            self.emit_statement_body(idx);
            self.write_line();
        });
    }

    fn emit_statement_body(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };

        let is_declaration = matches!(
            node.kind,
            VARIABLE_STATEMENT | FUNCTION_DECLARATION | INTERFACE_DECLARATION | TYPE_ALIAS_DECLARATION
        );
        if is_declaration && node.has_flag(node_flags::EXPORT) {
            self.write("export ");
        }
        if is_declaration && node.has_flag(node_flags::AMBIENT) {
            self.write("declare ");
        }

        match node.kind {
            BLOCK => self.emit_block(idx),
            VARIABLE_STATEMENT => {
                if let Some(var) = arena.get_variable(node) {
                    let keyword = if node.has_flag(node_flags::CONST) {
                        "const "
                    } else if node.has_flag(node_flags::LET) {
                        "let "
                    } else {
                        "var "
                    };
                    self.write(keyword);
                    self.write_comma_list(&var.declarations, Self::emit_variable_declaration);
                    self.write(";");
                }
            }
            EXPRESSION_STATEMENT => {
                if let Some(stmt) = arena.get_expr_statement(node) {
                    self.emit_node(stmt.expression);
                    self.write(";");
                }
            }
            RETURN_STATEMENT => {
                if let Some(stmt) = arena.get_expr_statement(node) {
                    self.write("return");
                    if stmt.expression.is_some() {
                        self.write(" ");
                        self.emit_node(stmt.expression);
                    }
                    self.write(";");
                }
            }
            IF_STATEMENT => {
                if let Some(stmt) = arena.get_if_statement(node) {
                    self.write("if (");
                    self.emit_node(stmt.expression);
                    self.write(") ");
                    self.emit_statement_body(stmt.then_statement);
                    if stmt.else_statement.is_some() {
                        self.write(" else ");
                        self.emit_statement_body(stmt.else_statement);
                    }
                }
            }
            FUNCTION_DECLARATION => {
                if let Some(func) = arena.get_function(node) {
                    self.write("function ");
                    self.write_identifier_text(func.name);
                    self.write_type_list(func.type_parameters.as_ref());
                    self.write("(");
                    self.write_comma_list(&func.parameters, Self::emit_node);
                    self.write(")");
                    self.emit_type_annotation(func.type_annotation);
                    if func.body.is_some() {
                        self.write(" ");
                        self.emit_block(func.body);
                    } else {
                        self.write(";");
                    }
                }
            }
            INTERFACE_DECLARATION => {
                if let Some(iface) = arena.get_interface(node) {
                    self.write("interface ");
                    self.write_identifier_text(iface.name);
                    self.write_type_list(iface.type_parameters.as_ref());
                    if let Some(heritage) = &iface.heritage {
                        self.write(" extends ");
                        self.write_comma_list(heritage, Self::emit_node);
                    }
                    self.write(" {");
                    self.write_line();
                    self.increase_indent();
                    for member in iface.members.iter() {
                        self.write_indent();
                        self.emit_node(member);
                        self.write(";");
                        self.write_line();
                    }
                    self.decrease_indent();
                    self.write_indent();
                    self.write("}");
                }
            }
            TYPE_ALIAS_DECLARATION => {
                if let Some(alias) = arena.get_type_alias(node) {
                    self.write("type ");
                    self.write_identifier_text(alias.name);
                    self.write_type_list(alias.type_parameters.as_ref());
                    self.write(" = ");
                    self.emit_node(alias.type_node);
                    self.write(";");
                }
            }
            IMPORT_DECLARATION => self.emit_import(idx),
            _ => self.emit_node(idx),
        }
    }

    fn emit_block(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(block) = arena.get(idx).and_then(|n| arena.get_block(n)) else {
            return;
        };
        if block.statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in block.statements.iter() {
            self.emit_statement(stmt);
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_variable_declaration(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(decl) = arena.get(idx).and_then(|n| arena.get_variable_declaration(n)) else {
            return;
        };
        self.write_identifier_text(decl.name);
        self.emit_type_annotation(decl.type_annotation);
        if decl.initializer.is_some() {
            self.write(" = ");
            self.emit_node(decl.initializer);
        }
    }

    fn emit_import(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };
        let Some(import) = arena.get_import_decl(node) else {
            return;
        };
        self.write("import ");
        if node.has_flag(node_flags::TYPE_ONLY) {
            self.write("type ");
        }
        if let Some(clause) = arena.get(import.import_clause).and_then(|n| arena.get_import_clause(n)) {
            let has_default = clause.name.is_some();
            if has_default {
                self.write_identifier_text(clause.name);
            }
            if let Some(bindings_node) = arena.get(clause.named_bindings)
                && let Some(bindings) = arena.get_named_imports(bindings_node)
            {
                if has_default {
                    self.write(", ");
                }
                if bindings_node.kind == NAMESPACE_IMPORT {
                    self.write("* as ");
                    self.write_identifier_text(bindings.name);
                } else if bindings.elements.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    self.write_comma_list(&bindings.elements, Self::emit_import_specifier);
                    self.write(" }");
                }
            }
            self.write(" from ");
        }
        self.emit_node(import.module_specifier);
        self.write(";");
    }

    fn emit_import_specifier(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(spec) = arena.get(idx).and_then(|n| arena.get_specifier(n)) else {
            return;
        };
        if spec.property_name.is_some() {
            self.write_identifier_text(spec.property_name);
            self.write(" as ");
        }
        self.write_identifier_text(spec.name);
    }

    fn emit_type_annotation(&mut self, type_node: NodeIndex) {
        if type_node.is_some() {
            self.write(": ");
            self.emit_node(type_node);
        }
    }

    /// `[a, b]` / `{ a: 1 }`, or one element per line when `multi_line`.
    fn emit_bracketed(&mut self, open: &str, close: &str, elements: &NodeList, multi_line: bool, padded: bool) {
        if elements.is_empty() {
            self.write(open);
            self.write(close);
            return;
        }
        self.write(open);
        if multi_line {
            self.write_line();
            self.increase_indent();
            for (i, element) in elements.iter().enumerate() {
                self.write_indent();
                self.emit_node(element);
                if i + 1 < elements.len() {
                    self.write(",");
                }
                self.write_line();
            }
            self.decrease_indent();
            self.write_indent();
        } else {
            if padded {
                self.write(" ");
            }
            self.write_comma_list(elements, Self::emit_node);
            if padded {
                self.write(" ");
            }
        }
        self.write(close);
    }
}
