//! Program construction pass.
//!
//! Binds every file, then walks each tree once. The walk keeps a stack of
//! block and parameter scopes so callee names resolve the way they would at
//! runtime (inner declarations shadow imports). Every call expression gets
//! its signature recorded; every call type argument and variable/parameter
//! annotation gets its semantic type recorded.
//!
//! Interfaces and aliases are instantiated lazily: the `TypeId` is interned
//! first and marked in-progress, so self-referencing declarations terminate.
//!
//! Type names resolve lexically. Function type parameters and types declared
//! in blocks form a chain of `TypeScope`s; a local interface or alias keeps
//! the scope it was declared in, so its members resolve there no matter
//! where it is referenced from.

use crate::binder::{self, FileScope, Scope, TypeSymbol, ValueSymbol};
use crate::declarations::{DeclId, DeclarationInfo, DeclarationKind, ResolvedSignature};
use crate::interner::TypeInterner;
use crate::module_lookup;
use crate::program::{CheckerOptions, FileTables};
use crate::types::{
    FunctionShape, LiteralValue, ObjectShape, ParamInfo, PropertySymbol, TypeData, TypeId,
};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::path::PathBuf;
use tracing::{debug, debug_span, trace, warn};
use tsk_ast::syntax_kind_ext::*;
use tsk_ast::{NodeAccess, NodeArena, NodeIndex, NodeList, SourceFile, SyntaxKind, node_flags};
use tsk_common::limits::{MAX_HERITAGE_DEPTH, MAX_TYPE_RESOLUTION_DEPTH};
use tsk_common::stack::ensure_sufficient_stack;

/// Index into `CheckerState::type_scopes`.
type ScopeId = usize;

/// Context a type node is resolved in: bound type parameters plus the
/// innermost lexical scope around it (`None` is file level).
#[derive(Clone, Debug, Default)]
struct TypeEnv {
    bindings: FxHashMap<String, TypeId>,
    scope: Option<ScopeId>,
}

impl TypeEnv {
    fn in_scope(scope: Option<ScopeId>) -> TypeEnv {
        TypeEnv {
            bindings: FxHashMap::default(),
            scope,
        }
    }

    fn get(&self, name: &str) -> Option<TypeId> {
        self.bindings.get(name).copied()
    }

    fn insert(&mut self, name: String, ty: TypeId) {
        self.bindings.insert(name, ty);
    }
}

/// Types visible in one function or block, above file level.
#[derive(Debug)]
struct TypeScope {
    parent: Option<ScopeId>,
    types: FxHashMap<String, TypeSymbol>,
    type_params: Vec<String>,
}

/// What a type name denotes.
enum ScopedType {
    Symbol(TypeSymbol, Option<ScopeId>),
    Parameter,
}

/// Import chains longer than this are treated as unresolved.
const MAX_IMPORT_HOPS: u32 = 8;

pub(crate) struct CheckerOutput {
    pub interner: TypeInterner,
    pub declarations: Vec<DeclarationInfo>,
    pub interface_shapes: FxHashMap<TypeId, ObjectShape>,
    pub alias_targets: FxHashMap<TypeId, TypeId>,
    pub optional_types: FxHashMap<TypeId, TypeId>,
    pub files: FxHashMap<String, FileTables>,
    pub file_order: Vec<String>,
}

/// Scopes opened by the walk: value scopes innermost last, and the current
/// type scope.
#[derive(Default)]
struct WalkScopes {
    values: Vec<Scope>,
    types: Option<ScopeId>,
}

pub(crate) struct CheckerState<'a> {
    sources: FxHashMap<String, &'a SourceFile>,
    file_order: Vec<String>,
    options: CheckerOptions,
    file_scopes: FxHashMap<String, FileScope>,
    type_scopes: Vec<TypeScope>,

    interner: TypeInterner,
    declarations: Vec<DeclarationInfo>,
    decl_ids: FxHashMap<(String, NodeIndex), DeclId>,
    interface_shapes: FxHashMap<TypeId, ObjectShape>,
    alias_targets: FxHashMap<TypeId, TypeId>,
    optional_types: FxHashMap<TypeId, TypeId>,
    in_progress: FxHashSet<TypeId>,
    tables: FxHashMap<String, FileTables>,

    depth: u32,
    heritage_depth: u32,
}

impl<'a> CheckerState<'a> {
    pub fn new(files: &[&'a SourceFile], options: CheckerOptions) -> Self {
        let mut sources = FxHashMap::default();
        let mut file_order = Vec::with_capacity(files.len());
        for &file in files {
            let key = module_lookup::file_key(&file.file_name);
            if sources.insert(key.clone(), file).is_none() {
                file_order.push(key);
            }
        }

        let mut file_scopes = FxHashMap::default();
        for key in &file_order {
            let file = sources[key.as_str()];
            let scope = binder::bind_file(&file.arena, file.statements(), |specifier| {
                module_lookup::resolve_module_name(specifier, key, |candidate| {
                    sources.contains_key(candidate)
                })
            });
            file_scopes.insert(key.clone(), scope);
        }

        CheckerState {
            sources,
            file_order,
            options,
            file_scopes,
            type_scopes: Vec::new(),
            interner: TypeInterner::new(),
            declarations: Vec::new(),
            decl_ids: FxHashMap::default(),
            interface_shapes: FxHashMap::default(),
            alias_targets: FxHashMap::default(),
            optional_types: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            tables: FxHashMap::default(),
            depth: 0,
            heritage_depth: 0,
        }
    }

    pub fn check(mut self) -> CheckerOutput {
        for key in self.file_order.clone() {
            let Some(file) = self.source(&key) else {
                continue;
            };
            let _span = debug_span!("check_source_file", file = %file.file_name).entered();
            self.tables.entry(key.clone()).or_default();
            let mut scopes = WalkScopes::default();
            self.walk(&key, &file.arena, file.root, &mut scopes);
        }
        debug!(
            files = self.file_order.len(),
            types = self.interner.len(),
            declarations = self.declarations.len(),
            "[check] program ready"
        );
        CheckerOutput {
            interner: self.interner,
            declarations: self.declarations,
            interface_shapes: self.interface_shapes,
            alias_targets: self.alias_targets,
            optional_types: self.optional_types,
            files: self.tables,
            file_order: self.file_order,
        }
    }

    fn source(&self, key: &str) -> Option<&'a SourceFile> {
        self.sources.get(key).copied()
    }

    // =========================================================================
    // Walk
    // =========================================================================

    fn walk(&mut self, key: &str, arena: &'a NodeArena, idx: NodeIndex, scopes: &mut WalkScopes) {
        ensure_sufficient_stack(|| self.walk_node(key, arena, idx, scopes));
    }

    fn walk_node(&mut self, key: &str, arena: &'a NodeArena, idx: NodeIndex, scopes: &mut WalkScopes) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            CALL_EXPRESSION => {
                if let Some(call) = arena.get_call_expr(node) {
                    if let Some(signature) = self.resolve_call(key, arena, call.expression, scopes) {
                        self.table(key).signatures.insert(idx, signature);
                    }
                    for arg in call.type_arguments.iter().flat_map(NodeList::iter) {
                        self.record_type_node(key, arg, scopes);
                    }
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(decl) = arena.get_variable_declaration(node) {
                    self.record_type_node(key, decl.type_annotation, scopes);
                }
            }
            PARAMETER => {
                if let Some(param) = arena.get_parameter(node) {
                    self.record_type_node(key, param.type_annotation, scopes);
                }
            }
            FUNCTION_DECLARATION | ARROW_FUNCTION => {
                if let Some(func) = arena.get_function(node) {
                    let outer_types = scopes.types;
                    let type_params = type_parameter_names(arena, func.type_parameters.as_ref());
                    scopes.types = self.open_type_scope(outer_types, FxHashMap::default(), type_params);
                    scopes.values.push(binder::bind_parameters(arena, &func.parameters));
                    self.walk_children(key, arena, idx, scopes);
                    scopes.values.pop();
                    scopes.types = outer_types;
                    return;
                }
            }
            BLOCK => {
                if let Some(block) = arena.get_block(node) {
                    let outer_types = scopes.types;
                    let mut scope = binder::bind_block(arena, &block.statements);
                    let types = std::mem::take(&mut scope.types);
                    scopes.types = self.open_type_scope(outer_types, types, Vec::new());
                    scopes.values.push(scope);
                    self.walk_children(key, arena, idx, scopes);
                    scopes.values.pop();
                    scopes.types = outer_types;
                    return;
                }
            }
            _ => {}
        }

        self.walk_children(key, arena, idx, scopes);
    }

    fn walk_children(&mut self, key: &str, arena: &'a NodeArena, idx: NodeIndex, scopes: &mut WalkScopes) {
        for child in arena.get_children(idx) {
            self.walk(key, arena, child, scopes);
        }
    }

    /// Scope for `types` and `type_params` inside `parent`; nothing is
    /// allocated when both are empty.
    fn open_type_scope(
        &mut self,
        parent: Option<ScopeId>,
        types: FxHashMap<String, TypeSymbol>,
        type_params: Vec<String>,
    ) -> Option<ScopeId> {
        if types.is_empty() && type_params.is_empty() {
            return parent;
        }
        self.type_scopes.push(TypeScope {
            parent,
            types,
            type_params,
        });
        Some(self.type_scopes.len() - 1)
    }

    fn table(&mut self, key: &str) -> &mut FileTables {
        self.tables.entry(key.to_string()).or_default()
    }

    fn record_type_node(&mut self, key: &str, type_node: NodeIndex, scopes: &WalkScopes) {
        if type_node.is_none() {
            return;
        }
        let env = TypeEnv::in_scope(scopes.types);
        let ty = self.resolve_type(key, type_node, &env);
        self.table(key).type_nodes.insert(type_node, ty);
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn declare(
        &mut self,
        key: &str,
        node: NodeIndex,
        kind: DeclarationKind,
        name: Option<&str>,
    ) -> DeclId {
        if let Some(&id) = self.decl_ids.get(&(key.to_string(), node)) {
            return id;
        }
        let file_name = self
            .source(key)
            .map(|file| PathBuf::from(&file.file_name))
            .unwrap_or_else(|| PathBuf::from(key));
        let id = DeclId(self.declarations.len() as u32);
        self.declarations.push(DeclarationInfo {
            kind,
            name: name.map(str::to_string),
            file_name,
            node,
        });
        self.decl_ids.insert((key.to_string(), node), id);
        id
    }

    // =========================================================================
    // Call resolution
    // =========================================================================

    fn lookup_value(&self, key: &str, name: &str, scopes: &WalkScopes) -> Option<ValueSymbol> {
        scopes
            .values
            .iter()
            .rev()
            .find_map(|scope| scope.values.get(name))
            .or_else(|| self.file_scopes.get(key)?.locals.values.get(name))
            .cloned()
    }

    fn resolve_call(
        &mut self,
        key: &str,
        arena: &NodeArena,
        callee: NodeIndex,
        scopes: &WalkScopes,
    ) -> Option<ResolvedSignature> {
        let node = arena.get(callee)?;
        match node.kind {
            PARENTHESIZED_EXPRESSION => {
                let inner = arena.get_parenthesized(node)?.expression;
                self.resolve_call(key, arena, inner, scopes)
            }
            PROPERTY_ACCESS_EXPRESSION => {
                let access = arena.get_access_expr(node)?;
                let namespace = arena.get_identifier_text(access.expression)?;
                let member = arena.get_identifier_text(access.name)?;
                let ValueSymbol::Namespace { module } = self.lookup_value(key, namespace, scopes)?
                else {
                    return None;
                };
                let module = module?;
                let symbol = self.file_scopes.get(&module)?.exports.values.get(member)?.clone();
                trace!(namespace, member, module = %module, "[check] namespace member call");
                self.signature_for_value(&module, &symbol, 1)
            }
            kind if kind == SyntaxKind::Identifier as u16 => {
                let name = arena.get_identifier_text(callee)?;
                let symbol = self.lookup_value(key, name, scopes)?;
                self.signature_for_value(key, &symbol, 0)
            }
            _ => None,
        }
    }

    fn signature_for_value(
        &mut self,
        key: &str,
        symbol: &ValueSymbol,
        hops: u32,
    ) -> Option<ResolvedSignature> {
        match symbol {
            ValueSymbol::Function(nodes) => {
                let first = *nodes.first()?;
                let arena = &self.source(key)?.arena;
                let name = arena
                    .get(first)
                    .and_then(|n| arena.get_function(n))
                    .and_then(|func| arena.get_identifier_text(func.name));
                let decl = self.declare(key, first, DeclarationKind::Function, name);
                Some(ResolvedSignature {
                    declaration: Some(decl),
                })
            }
            ValueSymbol::Import {
                module,
                export_name,
            } => {
                if hops >= MAX_IMPORT_HOPS {
                    return None;
                }
                let module = module.as_deref()?;
                let target = self.file_scopes.get(module)?.exports.values.get(export_name)?.clone();
                self.signature_for_value(module, &target, hops + 1)
            }
            ValueSymbol::Variable(_) | ValueSymbol::Parameter(_) | ValueSymbol::Namespace { .. } => {
                None
            }
        }
    }

    // =========================================================================
    // Type nodes
    // =========================================================================

    fn resolve_type(&mut self, key: &str, idx: NodeIndex, env: &TypeEnv) -> TypeId {
        if self.depth >= MAX_TYPE_RESOLUTION_DEPTH {
            warn!(file = key, "[check] type resolution depth exceeded");
            return TypeId::ANY;
        }
        self.depth += 1;
        let ty = self.resolve_type_inner(key, idx, env);
        self.depth -= 1;
        ty
    }

    fn resolve_type_inner(&mut self, key: &str, idx: NodeIndex, env: &TypeEnv) -> TypeId {
        let Some(file) = self.source(key) else {
            return TypeId::ANY;
        };
        let arena = &file.arena;
        let Some(node) = arena.get(idx) else {
            return TypeId::ANY;
        };

        if SyntaxKind::is_type_keyword(node.kind) {
            return SyntaxKind::from_u16(node.kind)
                .and_then(SyntaxKind::token_text)
                .and_then(TypeInterner::intrinsic)
                .unwrap_or(TypeId::ANY);
        }

        match node.kind {
            TYPE_REFERENCE => match arena.get_type_ref(node) {
                Some(data) => self.resolve_type_reference(key, arena, data.type_name, data.type_arguments.as_ref(), env),
                None => TypeId::ANY,
            },
            LITERAL_TYPE => arena
                .get_literal_type(node)
                .map_or(TypeId::ANY, |data| self.resolve_literal(arena, data.literal)),
            ARRAY_TYPE => match arena.get_array_type(node) {
                Some(data) => {
                    let element = self.resolve_type(key, data.element_type, env);
                    self.interner.intern(TypeData::Array(element))
                }
                None => TypeId::ANY,
            },
            UNION_TYPE => match arena.get_composite_type(node) {
                Some(data) => {
                    let mut members = Vec::with_capacity(data.types.len());
                    for member in data.types.iter() {
                        members.push(self.resolve_type(key, member, env));
                    }
                    self.interner.union(members)
                }
                None => TypeId::ANY,
            },
            TYPE_LITERAL => match arena.get_type_literal(node) {
                Some(data) => {
                    let mut props = IndexMap::new();
                    for member in data.members.iter() {
                        self.add_member(key, arena, member, env, &mut props);
                    }
                    let shape = ObjectShape {
                        properties: props.into_values().collect(),
                    };
                    self.interner.intern(TypeData::Object(shape))
                }
                None => TypeId::ANY,
            },
            FUNCTION_TYPE => match arena.get_function_type(node) {
                Some(data) => {
                    let shape = self.function_shape(key, arena, &data.parameters, data.type_annotation, env);
                    self.interner.intern(TypeData::Function(shape))
                }
                None => TypeId::ANY,
            },
            MAPPED_TYPE => match arena.get_mapped_type(node) {
                Some(data) => self.resolve_mapped(key, arena, data.type_parameter, data.template_type, env),
                None => TypeId::ANY,
            },
            _ => {
                trace!(kind = tsk_ast::syntax_kind_ext::kind_name(node.kind), "[check] unsupported type node");
                TypeId::ANY
            }
        }
    }

    fn resolve_literal(&mut self, arena: &NodeArena, literal: NodeIndex) -> TypeId {
        let Some(node) = arena.get(literal) else {
            return TypeId::ANY;
        };
        match SyntaxKind::from_u16(node.kind) {
            Some(SyntaxKind::StringLiteral) => match arena.get_literal_text(literal) {
                Some(text) => self
                    .interner
                    .intern(TypeData::Literal(LiteralValue::String(text.to_string()))),
                None => TypeId::STRING,
            },
            Some(SyntaxKind::NumericLiteral) => match arena.get_literal_text(literal) {
                Some(text) => self
                    .interner
                    .intern(TypeData::Literal(LiteralValue::Number(text.to_string()))),
                None => TypeId::NUMBER,
            },
            Some(SyntaxKind::TrueKeyword) => TypeId::BOOLEAN_TRUE,
            Some(SyntaxKind::FalseKeyword) => TypeId::BOOLEAN_FALSE,
            Some(SyntaxKind::NullKeyword) => TypeId::NULL,
            _ => TypeId::ANY,
        }
    }

    fn resolve_type_reference(
        &mut self,
        key: &str,
        arena: &NodeArena,
        type_name: NodeIndex,
        type_arguments: Option<&NodeList>,
        env: &TypeEnv,
    ) -> TypeId {
        let Some(name) = arena.get_identifier_text(type_name) else {
            return TypeId::ANY;
        };
        let mut args = Vec::new();
        for arg in type_arguments.iter().flat_map(|list| list.iter()) {
            args.push(self.resolve_type(key, arg, env));
        }

        if let Some(bound) = env.get(name) {
            return bound;
        }

        match self.lookup_type(key, name, env.scope) {
            Some(ScopedType::Parameter) => {
                return self.interner.intern(TypeData::TypeParameter(name.to_string()));
            }
            Some(ScopedType::Symbol(symbol, scope)) => {
                if let Some(ty) = self.instantiate_symbol(key, name, symbol, scope, &args, 0) {
                    return ty;
                }
            }
            None => {}
        }

        if let Some(ty) = self.builtin_reference(name, &args) {
            return ty;
        }

        debug!(name, file = key, "[check] unresolved type reference");
        TypeId::ANY
    }

    /// Innermost declaration of `name` visible from `scope`, then file level.
    fn lookup_type(&self, key: &str, name: &str, scope: Option<ScopeId>) -> Option<ScopedType> {
        let mut current = scope;
        while let Some(id) = current {
            let entry = self.type_scopes.get(id)?;
            if let Some(symbol) = entry.types.get(name) {
                return Some(ScopedType::Symbol(symbol.clone(), Some(id)));
            }
            if entry.type_params.iter().any(|param| param == name) {
                return Some(ScopedType::Parameter);
            }
            current = entry.parent;
        }
        let symbol = self.file_scopes.get(key)?.locals.types.get(name)?;
        Some(ScopedType::Symbol(symbol.clone(), None))
    }

    /// `scope` is where `symbol` was declared.
    fn instantiate_symbol(
        &mut self,
        key: &str,
        name: &str,
        symbol: TypeSymbol,
        scope: Option<ScopeId>,
        args: &[TypeId],
        hops: u32,
    ) -> Option<TypeId> {
        match symbol {
            TypeSymbol::Interface(nodes) => Some(self.instantiate_interface(key, name, &nodes, scope, args)),
            TypeSymbol::TypeAlias(node) => Some(self.instantiate_alias(key, name, node, scope, args)),
            TypeSymbol::Import {
                module,
                export_name,
            } => {
                if hops >= MAX_IMPORT_HOPS {
                    return None;
                }
                let module = module?;
                let target = self
                    .file_scopes
                    .get(&module)?
                    .exports
                    .types
                    .get(&export_name)?
                    .clone();
                self.instantiate_symbol(&module, &export_name, target, None, args, hops + 1)
            }
        }
    }

    /// Global generic types that are not declared in the program.
    fn builtin_reference(&mut self, name: &str, args: &[TypeId]) -> Option<TypeId> {
        match (name, args) {
            ("Array" | "ReadonlyArray", [element]) => Some(self.interner.intern(TypeData::Array(*element))),
            ("Record", [keys, value]) => {
                let properties = self
                    .literal_keys(*keys)
                    .into_iter()
                    .map(|(name, _)| PropertySymbol {
                        name,
                        type_id: *value,
                        optional: false,
                        readonly: false,
                        is_method: false,
                        declarations: SmallVec::new(),
                    })
                    .collect();
                Some(self.interner.intern(TypeData::Object(ObjectShape { properties })))
            }
            _ => None,
        }
    }

    fn resolve_mapped(
        &mut self,
        key: &str,
        arena: &NodeArena,
        type_parameter: NodeIndex,
        template: NodeIndex,
        env: &TypeEnv,
    ) -> TypeId {
        let Some(param) = arena
            .get(type_parameter)
            .and_then(|n| arena.get_type_parameter(n))
        else {
            return TypeId::ANY;
        };
        let Some(param_name) = arena.get_identifier_text(param.name) else {
            return TypeId::ANY;
        };
        let constraint = if param.constraint.is_some() {
            self.resolve_type(key, param.constraint, env)
        } else {
            TypeId::ANY
        };

        let mut properties = Vec::new();
        for (name, key_type) in self.literal_keys(constraint) {
            let mut inner = env.clone();
            inner.insert(param_name.to_string(), key_type);
            let type_id = if template.is_some() {
                self.resolve_type(key, template, &inner)
            } else {
                TypeId::ANY
            };
            properties.push(PropertySymbol {
                name,
                type_id,
                optional: false,
                readonly: false,
                is_method: false,
                declarations: SmallVec::new(),
            });
        }
        self.interner.intern(TypeData::Object(ObjectShape { properties }))
    }

    /// Property names denoted by a key type. Non-literal keys (`string`,
    /// `number`) describe index signatures and contribute no names.
    fn literal_keys(&self, ty: TypeId) -> Vec<(String, TypeId)> {
        let mut out = Vec::new();
        self.collect_literal_keys(ty, &mut out, 0);
        out
    }

    fn collect_literal_keys(&self, ty: TypeId, out: &mut Vec<(String, TypeId)>, depth: u32) {
        if depth >= MAX_TYPE_RESOLUTION_DEPTH {
            return;
        }
        match self.interner.get(ty) {
            Some(TypeData::Literal(LiteralValue::String(text) | LiteralValue::Number(text))) => {
                if !out.iter().any(|(name, _)| name == text) {
                    out.push((text.clone(), ty));
                }
            }
            Some(TypeData::Union(members)) => {
                for &member in members {
                    self.collect_literal_keys(member, out, depth + 1);
                }
            }
            Some(TypeData::Alias { .. }) => {
                if let Some(&target) = self.alias_targets.get(&ty) {
                    self.collect_literal_keys(target, out, depth + 1);
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn add_member(
        &mut self,
        key: &str,
        arena: &NodeArena,
        member: NodeIndex,
        env: &TypeEnv,
        props: &mut IndexMap<String, PropertySymbol>,
    ) {
        let Some(node) = arena.get(member) else {
            return;
        };
        let (decl_kind, is_method) = match node.kind {
            PROPERTY_SIGNATURE => (DeclarationKind::PropertySignature, false),
            METHOD_SIGNATURE => (DeclarationKind::MethodSignature, true),
            _ => return,
        };
        let Some(sig) = arena.get_signature(node) else {
            return;
        };
        let Some(name) = arena.get_name_text(sig.name) else {
            return;
        };
        let decl = self.declare(key, member, decl_kind, Some(name));

        if let Some(existing) = props.get_mut(name) {
            // Overloads and merged declarations share one symbol.
            existing.declarations.push(decl);
            return;
        }

        let type_id = if is_method {
            let empty = NodeList::new();
            let params = sig.parameters.as_ref().unwrap_or(&empty);
            let shape = self.function_shape(key, arena, params, sig.type_annotation, env);
            self.interner.intern(TypeData::Function(shape))
        } else if sig.type_annotation.is_some() {
            self.resolve_type(key, sig.type_annotation, env)
        } else {
            TypeId::ANY
        };

        let optional = node.has_flag(node_flags::OPTIONAL);
        if optional && self.options.strict_null_checks && !self.optional_types.contains_key(&type_id) {
            let widened = self.interner.union(vec![type_id, TypeId::UNDEFINED]);
            self.optional_types.insert(type_id, widened);
        }

        props.insert(
            name.to_string(),
            PropertySymbol {
                name: name.to_string(),
                type_id,
                optional,
                readonly: node.has_flag(node_flags::READONLY),
                is_method,
                declarations: SmallVec::from_elem(decl, 1),
            },
        );
    }

    fn function_shape(
        &mut self,
        key: &str,
        arena: &NodeArena,
        parameters: &NodeList,
        return_type: NodeIndex,
        env: &TypeEnv,
    ) -> FunctionShape {
        let mut params = Vec::with_capacity(parameters.len());
        for param in parameters.iter() {
            let Some(node) = arena.get(param) else {
                continue;
            };
            let Some(data) = arena.get_parameter(node) else {
                continue;
            };
            let type_id = if data.type_annotation.is_some() {
                self.resolve_type(key, data.type_annotation, env)
            } else {
                TypeId::ANY
            };
            params.push(ParamInfo {
                name: arena.get_identifier_text(data.name).unwrap_or("_").to_string(),
                type_id,
                optional: node.has_flag(node_flags::OPTIONAL),
            });
        }
        let return_type = if return_type.is_some() {
            self.resolve_type(key, return_type, env)
        } else {
            TypeId::ANY
        };
        FunctionShape {
            params,
            return_type,
        }
    }

    /// Bind declared type parameters to `args`, falling back to defaults and
    /// then to the unbound parameter itself.
    fn bind_type_arguments(
        &mut self,
        key: &str,
        arena: &NodeArena,
        params: Option<&NodeList>,
        scope: Option<ScopeId>,
        args: &[TypeId],
    ) -> TypeEnv {
        let mut env = TypeEnv::in_scope(scope);
        for (i, param) in params.iter().flat_map(|list| list.iter()).enumerate() {
            let Some(data) = arena.get(param).and_then(|n| arena.get_type_parameter(n)) else {
                continue;
            };
            let Some(name) = arena.get_identifier_text(data.name) else {
                continue;
            };
            let ty = match args.get(i) {
                Some(&arg) => arg,
                None if data.default.is_some() => self.resolve_type(key, data.default, &env),
                None => self.interner.intern(TypeData::TypeParameter(name.to_string())),
            };
            env.insert(name.to_string(), ty);
        }
        env
    }

    // =========================================================================
    // Named types
    // =========================================================================

    fn instantiate_interface(
        &mut self,
        key: &str,
        name: &str,
        nodes: &[NodeIndex],
        scope: Option<ScopeId>,
        args: &[TypeId],
    ) -> TypeId {
        let Some(&first) = nodes.first() else {
            return TypeId::ANY;
        };
        let Some(file) = self.source(key) else {
            return TypeId::ANY;
        };
        let arena = &file.arena;

        let decl = self.declare(key, first, DeclarationKind::Interface, Some(name));
        let ty = self.interner.intern(TypeData::Interface {
            name: name.to_string(),
            decl,
            type_arguments: args.to_vec(),
        });
        if self.interface_shapes.contains_key(&ty) || self.in_progress.contains(&ty) {
            return ty;
        }
        self.in_progress.insert(ty);
        trace!(name, file = key, "[check] instantiate interface");

        let mut props = IndexMap::new();
        let mut bases = Vec::new();
        for &node_idx in nodes {
            let Some(iface) = arena.get(node_idx).and_then(|n| arena.get_interface(n)) else {
                continue;
            };
            let env = self.bind_type_arguments(key, arena, iface.type_parameters.as_ref(), scope, args);
            for member in iface.members.iter() {
                self.add_member(key, arena, member, &env, &mut props);
            }
            for base in iface.heritage.iter().flat_map(NodeList::iter) {
                if self.heritage_depth >= MAX_HERITAGE_DEPTH {
                    warn!(name, "[check] heritage chain too deep");
                    break;
                }
                self.heritage_depth += 1;
                bases.push(self.resolve_type(key, base, &env));
                self.heritage_depth -= 1;
            }
        }

        for base in bases {
            for prop in collect_properties(&self.interner, &self.interface_shapes, &self.alias_targets, base) {
                if !props.contains_key(&prop.name) {
                    props.insert(prop.name.clone(), prop);
                }
            }
        }

        self.interface_shapes.insert(
            ty,
            ObjectShape {
                properties: props.into_values().collect(),
            },
        );
        self.in_progress.remove(&ty);
        ty
    }

    fn instantiate_alias(
        &mut self,
        key: &str,
        name: &str,
        node: NodeIndex,
        scope: Option<ScopeId>,
        args: &[TypeId],
    ) -> TypeId {
        let Some(file) = self.source(key) else {
            return TypeId::ANY;
        };
        let arena = &file.arena;

        let decl = self.declare(key, node, DeclarationKind::TypeAlias, Some(name));
        let ty = self.interner.intern(TypeData::Alias {
            name: name.to_string(),
            decl,
            type_arguments: args.to_vec(),
        });
        if let Some(&target) = self.alias_targets.get(&ty) {
            return self.alias_view(ty, target);
        }
        if self.in_progress.contains(&ty) {
            return ty;
        }
        let Some(data) = arena.get(node).and_then(|n| arena.get_type_alias(n)) else {
            return TypeId::ANY;
        };

        self.in_progress.insert(ty);
        let env = self.bind_type_arguments(key, arena, data.type_parameters.as_ref(), scope, args);
        let target = if data.type_node.is_some() {
            self.resolve_type(key, data.type_node, &env)
        } else {
            TypeId::ANY
        };
        self.alias_targets.insert(ty, target);
        self.in_progress.remove(&ty);
        self.alias_view(ty, target)
    }

    /// Anonymous structures keep their alias name; everything else is
    /// transparent (`type Id = string` is just `string`).
    fn alias_view(&self, alias: TypeId, target: TypeId) -> TypeId {
        match self.interner.get(target) {
            Some(TypeData::Object(_) | TypeData::Union(_) | TypeData::Function(_)) => alias,
            _ => target,
        }
    }
}

/// Properties of `ty`, following alias targets.
pub(crate) fn collect_properties(
    interner: &TypeInterner,
    interface_shapes: &FxHashMap<TypeId, ObjectShape>,
    alias_targets: &FxHashMap<TypeId, TypeId>,
    ty: TypeId,
) -> Vec<PropertySymbol> {
    let mut current = ty;
    for _ in 0..MAX_TYPE_RESOLUTION_DEPTH {
        match interner.get(current) {
            Some(TypeData::Object(shape)) => return shape.properties.clone(),
            Some(TypeData::Interface { .. }) => {
                return interface_shapes
                    .get(&current)
                    .map(|shape| shape.properties.clone())
                    .unwrap_or_default();
            }
            Some(TypeData::Alias { .. }) => match alias_targets.get(&current) {
                Some(&target) => current = target,
                None => return Vec::new(),
            },
            _ => return Vec::new(),
        }
    }
    Vec::new()
}

fn type_parameter_names(arena: &NodeArena, params: Option<&NodeList>) -> Vec<String> {
    params
        .iter()
        .flat_map(|list| list.iter())
        .filter_map(|param| {
            let data = arena.get(param).and_then(|n| arena.get_type_parameter(n))?;
            arena.get_identifier_text(data.name).map(str::to_string)
        })
        .collect()
}
