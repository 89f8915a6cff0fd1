//! Statement-level convenience layer over the `add_*` factories.
//!
//! Hosts without a parser (and tests) describe a file top-down: helpers that
//! produce a top-level statement append it to the file automatically; helpers
//! for expressions and type nodes only return the index.

use crate::base::NodeIndex;
use crate::flags::node_flags;
use crate::node::NodeArena;
use crate::source_file::SourceFile;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Default)]
pub struct AstBuilder {
    arena: NodeArena,
    statements: Vec<NodeIndex>,
}

impl AstBuilder {
    pub fn new() -> AstBuilder {
        AstBuilder::default()
    }

    /// Raw factory access for anything the helpers do not cover.
    pub fn arena(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    /// Append an already built statement.
    pub fn push(&mut self, statement: NodeIndex) -> NodeIndex {
        self.statements.push(statement);
        statement
    }

    pub fn finish(self, file_name: &str) -> SourceFile {
        SourceFile::from_statements(file_name, self.arena, self.statements)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn ident(&mut self, text: &str) -> NodeIndex {
        self.arena.add_identifier(text)
    }

    pub fn string(&mut self, text: &str) -> NodeIndex {
        self.arena.add_string_literal(text)
    }

    /// `callee<type_args>()`; no type argument list when `type_args` is empty.
    pub fn call(&mut self, callee: &str, type_args: Vec<NodeIndex>) -> NodeIndex {
        let callee = self.arena.add_identifier(callee);
        self.call_expr(callee, type_args)
    }

    /// `namespace.member<type_args>()`
    pub fn member_call(&mut self, namespace: &str, member: &str, type_args: Vec<NodeIndex>) -> NodeIndex {
        let object = self.arena.add_identifier(namespace);
        let name = self.arena.add_identifier(member);
        let callee = self.arena.add_property_access(object, name);
        self.call_expr(callee, type_args)
    }

    pub fn call_expr(&mut self, callee: NodeIndex, type_args: Vec<NodeIndex>) -> NodeIndex {
        let type_args = (!type_args.is_empty()).then_some(type_args);
        self.arena.add_call_expr(callee, type_args, Vec::new())
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn keyword(&mut self, kind: SyntaxKind) -> NodeIndex {
        self.arena.add_token(kind)
    }

    /// `Name` or `Name<args>`
    pub fn type_ref(&mut self, name: &str, args: Vec<NodeIndex>) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        let args = (!args.is_empty()).then_some(args);
        self.arena.add_type_reference(name, args)
    }

    pub fn string_literal_type(&mut self, text: &str) -> NodeIndex {
        let literal = self.arena.add_string_literal(text);
        self.arena.add_literal_type(literal)
    }

    pub fn type_param(&mut self, name: &str) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        self.arena.add_type_parameter(name, NodeIndex::NONE, NodeIndex::NONE)
    }

    pub fn property(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        self.arena.add_property_signature(name, ty)
    }

    pub fn optional_property(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let prop = self.property(name, ty);
        self.arena.with_flags(prop, node_flags::OPTIONAL)
    }

    /// Property whose name is written as a string literal (`"data-id": T`).
    pub fn quoted_property(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let name = self.arena.add_string_literal(name);
        self.arena.add_property_signature(name, ty)
    }

    // =========================================================================
    // Top-level statements (appended)
    // =========================================================================

    pub fn interface(&mut self, name: &str, members: Vec<NodeIndex>) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        let decl = self.arena.add_interface(name, None, None, members);
        self.push(decl)
    }

    pub fn type_alias(&mut self, name: &str, ty: NodeIndex) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        let decl = self.arena.add_type_alias(name, None, ty);
        self.push(decl)
    }

    /// `export declare function name<T...>(): ret;`
    pub fn declare_function(&mut self, name: &str, type_params: &[&str], ret: NodeIndex) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        let params: Vec<NodeIndex> = type_params.iter().map(|p| self.type_param(p)).collect();
        let params = (!params.is_empty()).then_some(params);
        let decl = self
            .arena
            .add_function_declaration(name, params, Vec::new(), ret, NodeIndex::NONE);
        let decl = self
            .arena
            .with_flags(decl, node_flags::EXPORT | node_flags::AMBIENT);
        self.push(decl)
    }

    /// `import { a, b } from "specifier";`
    pub fn import_named(&mut self, names: &[&str], specifier: &str) -> NodeIndex {
        let elements = names
            .iter()
            .map(|name| {
                let local = self.arena.add_identifier(name);
                self.arena.add_import_specifier(NodeIndex::NONE, local)
            })
            .collect();
        let bindings = self.arena.add_named_imports(elements);
        self.import_with(bindings, specifier)
    }

    /// `import { imported as local } from "specifier";`
    pub fn import_aliased(&mut self, imported: &str, local: &str, specifier: &str) -> NodeIndex {
        let property_name = self.arena.add_identifier(imported);
        let local = self.arena.add_identifier(local);
        let element = self.arena.add_import_specifier(property_name, local);
        let bindings = self.arena.add_named_imports(vec![element]);
        self.import_with(bindings, specifier)
    }

    /// `import * as local from "specifier";`
    pub fn import_namespace(&mut self, local: &str, specifier: &str) -> NodeIndex {
        let local = self.arena.add_identifier(local);
        let bindings = self.arena.add_namespace_import(local);
        self.import_with(bindings, specifier)
    }

    /// `import "specifier";`
    pub fn import_side_effect(&mut self, specifier: &str) -> NodeIndex {
        let specifier = self.arena.add_string_literal(specifier);
        let decl = self
            .arena
            .add_import_declaration(NodeIndex::NONE, specifier);
        self.push(decl)
    }

    fn import_with(&mut self, bindings: NodeIndex, specifier: &str) -> NodeIndex {
        let clause = self.arena.add_import_clause(NodeIndex::NONE, bindings);
        let specifier = self.arena.add_string_literal(specifier);
        let decl = self.arena.add_import_declaration(clause, specifier);
        self.push(decl)
    }

    /// `const name = init;`
    pub fn const_decl(&mut self, name: &str, init: NodeIndex) -> NodeIndex {
        let name = self.arena.add_identifier(name);
        let decl = self
            .arena
            .add_variable_declaration(name, NodeIndex::NONE, init);
        let stmt = self.arena.add_variable_statement(vec![decl]);
        let stmt = self.arena.with_flags(stmt, node_flags::CONST);
        self.push(stmt)
    }

    pub fn expr_stmt(&mut self, expr: NodeIndex) -> NodeIndex {
        let stmt = self.arena.add_expression_statement(expr);
        self.push(stmt)
    }
}
