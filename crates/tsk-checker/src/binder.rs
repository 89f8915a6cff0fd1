//! Symbol tables.
//!
//! Values and types live in separate tables, as in TypeScript: a name may
//! denote a function and an interface at the same time. Imports are bound
//! into both tables and resolved lazily against the target module's exports
//! in whichever meaning the use site needs.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tsk_ast::syntax_kind_ext::*;
use tsk_ast::{NodeAccess, NodeArena, NodeIndex, NodeList, node_flags};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueSymbol {
    /// Function declaration(s); overloads share one symbol
    Function(SmallVec<[NodeIndex; 1]>),
    /// `VariableDeclaration` node
    Variable(NodeIndex),
    /// `Parameter` node
    Parameter(NodeIndex),
    /// `import { export_name as local }` / default import
    Import {
        module: Option<String>,
        export_name: String,
    },
    /// `import * as local`
    Namespace { module: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSymbol {
    /// Interface declaration(s), merged in declaration order
    Interface(SmallVec<[NodeIndex; 1]>),
    TypeAlias(NodeIndex),
    Import {
        module: Option<String>,
        export_name: String,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scope {
    pub values: FxHashMap<String, ValueSymbol>,
    pub types: FxHashMap<String, TypeSymbol>,
}

impl Scope {
    fn add_value(&mut self, name: &str, symbol: ValueSymbol) {
        match (self.values.get_mut(name), symbol) {
            (Some(ValueSymbol::Function(existing)), ValueSymbol::Function(more)) => {
                existing.extend(more);
            }
            (Some(_), _) => {
                // First declaration wins; duplicates are a host-level error.
            }
            (None, symbol) => {
                self.values.insert(name.to_string(), symbol);
            }
        }
    }

    fn add_type(&mut self, name: &str, symbol: TypeSymbol) {
        match (self.types.get_mut(name), symbol) {
            (Some(TypeSymbol::Interface(existing)), TypeSymbol::Interface(more)) => {
                existing.extend(more);
            }
            (Some(_), _) => {}
            (None, symbol) => {
                self.types.insert(name.to_string(), symbol);
            }
        }
    }
}

/// Top-level symbols of one file.
#[derive(Clone, Debug, Default)]
pub struct FileScope {
    pub locals: Scope,
    pub exports: Scope,
}

/// Bind the top-level statements of a file.
///
/// `resolve_module` maps an import specifier to the program file it names.
pub fn bind_file<R>(arena: &NodeArena, statements: &NodeList, mut resolve_module: R) -> FileScope
where
    R: FnMut(&str) -> Option<String>,
{
    let mut scope = FileScope::default();
    for stmt in statements.iter() {
        let Some(node) = arena.get(stmt) else {
            continue;
        };
        if node.kind == IMPORT_DECLARATION {
            bind_import(arena, stmt, &mut scope.locals, &mut resolve_module);
            continue;
        }
        let exported = node.has_flag(node_flags::EXPORT);
        bind_declaration(arena, stmt, &mut scope.locals);
        if exported {
            bind_declaration(arena, stmt, &mut scope.exports);
        }
    }
    scope
}

/// Bind the declarations hoisted into a block.
pub fn bind_block(arena: &NodeArena, statements: &NodeList) -> Scope {
    let mut scope = Scope::default();
    for stmt in statements.iter() {
        bind_declaration(arena, stmt, &mut scope);
    }
    scope
}

/// Bind function parameters.
pub fn bind_parameters(arena: &NodeArena, parameters: &NodeList) -> Scope {
    let mut scope = Scope::default();
    for param in parameters.iter() {
        let Some(node) = arena.get(param) else {
            continue;
        };
        if let Some(data) = arena.get_parameter(node)
            && let Some(name) = arena.get_identifier_text(data.name)
        {
            scope.add_value(name, ValueSymbol::Parameter(param));
        }
    }
    scope
}

fn bind_declaration(arena: &NodeArena, stmt: NodeIndex, scope: &mut Scope) {
    let Some(node) = arena.get(stmt) else {
        return;
    };
    match node.kind {
        FUNCTION_DECLARATION => {
            if let Some(func) = arena.get_function(node)
                && let Some(name) = arena.get_identifier_text(func.name)
            {
                scope.add_value(name, ValueSymbol::Function(SmallVec::from_elem(stmt, 1)));
            }
        }
        VARIABLE_STATEMENT => {
            let Some(var) = arena.get_variable(node) else {
                return;
            };
            for decl in var.declarations.iter() {
                let name = arena
                    .get(decl)
                    .and_then(|n| arena.get_variable_declaration(n))
                    .and_then(|d| arena.get_identifier_text(d.name));
                if let Some(name) = name {
                    scope.add_value(name, ValueSymbol::Variable(decl));
                }
            }
        }
        INTERFACE_DECLARATION => {
            if let Some(iface) = arena.get_interface(node)
                && let Some(name) = arena.get_identifier_text(iface.name)
            {
                scope.add_type(name, TypeSymbol::Interface(SmallVec::from_elem(stmt, 1)));
            }
        }
        TYPE_ALIAS_DECLARATION => {
            if let Some(alias) = arena.get_type_alias(node)
                && let Some(name) = arena.get_identifier_text(alias.name)
            {
                scope.add_type(name, TypeSymbol::TypeAlias(stmt));
            }
        }
        _ => {}
    }
}

fn bind_import<R>(arena: &NodeArena, stmt: NodeIndex, scope: &mut Scope, resolve_module: &mut R)
where
    R: FnMut(&str) -> Option<String>,
{
    let Some(import) = arena.get(stmt).and_then(|n| arena.get_import_decl(n)) else {
        return;
    };
    let Some(specifier) = arena.get_literal_text(import.module_specifier) else {
        return;
    };
    let module = resolve_module(specifier);
    tracing::trace!(specifier, ?module, "[bind] import");

    let Some(clause) = arena
        .get(import.import_clause)
        .and_then(|n| arena.get_import_clause(n))
    else {
        return;
    };

    if let Some(default_name) = arena.get_identifier_text(clause.name) {
        bind_import_alias(scope, &module, default_name, "default");
    }

    let Some(bindings_node) = arena.get(clause.named_bindings) else {
        return;
    };
    let Some(bindings) = arena.get_named_imports(bindings_node) else {
        return;
    };
    if bindings_node.kind == NAMESPACE_IMPORT {
        if let Some(local) = arena.get_identifier_text(bindings.name) {
            scope.add_value(
                local,
                ValueSymbol::Namespace {
                    module: module.clone(),
                },
            );
        }
        return;
    }
    for element in bindings.elements.iter() {
        let Some(spec) = arena.get(element).and_then(|n| arena.get_specifier(n)) else {
            continue;
        };
        let Some(local) = arena.get_identifier_text(spec.name) else {
            continue;
        };
        let export_name = arena.get_identifier_text(spec.property_name).unwrap_or(local);
        bind_import_alias(scope, &module, local, export_name);
    }
}

fn bind_import_alias(scope: &mut Scope, module: &Option<String>, local: &str, export_name: &str) {
    scope.add_value(
        local,
        ValueSymbol::Import {
            module: module.clone(),
            export_name: export_name.to_string(),
        },
    );
    scope.add_type(
        local,
        TypeSymbol::Import {
            module: module.clone(),
            export_name: export_name.to_string(),
        },
    );
}
