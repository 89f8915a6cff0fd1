//! Thin node headers and typed data pools.
//!
//! Every node is a 16-byte `Node` header. Nodes that carry more than a kind
//! store their payload in one of the typed pools of `NodeArena`, addressed by
//! `Node::data_index`. Which pool a node uses is fixed by its kind; the
//! `get_*` accessors check the kind before indexing.
//!
//! Headers and pool entries are append-only. A pass that needs a different
//! node builds a new one and returns its index; the old index stays valid and
//! keeps its meaning, so semantic tables keyed by `NodeIndex` survive rewrites.

use crate::base::{NodeIndex, NodeList};
use crate::flags::node_flags;
use crate::syntax_kind::SyntaxKind;
use crate::syntax_kind_ext::*;
use serde::{Deserialize, Serialize};

/// A thin 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// `SyntaxKind` value or one of the `syntax_kind_ext` constants
    pub kind: u16,
    /// Packed `node_flags`
    pub flags: u16,
    /// Start position in source (0 for synthesized nodes)
    pub pos: u32,
    /// End position in source
    pub end: u32,
    /// Index into the kind-specific pool (`NO_DATA` = none)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.has_flag(node_flags::SYNTHESIZED)
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

/// Identifier text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// String and numeric literal text (without quotes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub arguments: NodeList,
}

/// `expression.name`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
}

/// Array literal elements or object literal properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// `name: initializer`, or shorthand `name` (initializer is NONE).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

/// Function declarations and arrow functions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
    /// Block, expression (arrow), or NONE (ambient declaration)
    pub body: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

/// Block statements and source file statement lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Expression statements and `return` (expression may be NONE).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `var`/`let`/`const` statement (kind chosen by flags).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDeclData {
    /// NONE for side-effect imports (`import "mod";`)
    pub import_clause: NodeIndex,
    pub module_specifier: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportClauseData {
    /// Default import binding
    pub name: NodeIndex,
    /// `NamedImports` or `NamespaceImport`
    pub named_bindings: NodeIndex,
}

/// `{ a, b as c }` (elements) or `* as ns` (name).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedImportsData {
    pub name: NodeIndex,
    pub elements: NodeList,
}

/// `property_name as name`; `property_name` is NONE when not renamed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

/// Union constituents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeTypeData {
    pub types: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayTypeData {
    pub element_type: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralTypeData {
    pub literal: NodeIndex,
}

/// Members of a type literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLiteralData {
    pub members: NodeList,
}

/// Property and method signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureData {
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    /// `Some` for method signatures
    pub parameters: Option<NodeList>,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSignatureData {
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

/// `{ [K in Constraint]: Template }`; the constraint lives on the type parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedTypeData {
    pub type_parameter: NodeIndex,
    pub template_type: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionTypeData {
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceData {
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    /// `extends` clause: type references
    pub heritage: Option<NodeList>,
    pub members: NodeList,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasData {
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileData {
    pub file_name: String,
    pub statements: NodeList,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Arena holding node headers and every typed pool.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    /// The thin node headers
    pub nodes: Vec<Node>,

    // Names and literals
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,

    // Expressions
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub binary_exprs: Vec<BinaryExprData>,

    // Functions
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,
    pub type_parameters: Vec<TypeParameterData>,

    // Statements
    pub blocks: Vec<BlockData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,

    // Modules
    pub imports: Vec<ImportDeclData>,
    pub import_clauses: Vec<ImportClauseData>,
    pub named_imports: Vec<NamedImportsData>,
    pub specifiers: Vec<SpecifierData>,

    // Types
    pub type_refs: Vec<TypeRefData>,
    pub composite_types: Vec<CompositeTypeData>,
    pub array_types: Vec<ArrayTypeData>,
    pub literal_types: Vec<LiteralTypeData>,
    pub type_literals: Vec<TypeLiteralData>,
    pub signatures: Vec<SignatureData>,
    pub index_signatures: Vec<IndexSignatureData>,
    pub mapped_types: Vec<MappedTypeData>,
    pub function_types: Vec<FunctionTypeData>,
    pub interfaces: Vec<InterfaceData>,
    pub type_aliases: Vec<TypeAliasData>,

    pub source_files: Vec<SourceFileData>,
}

/// Generates a kind-checked accessor into one pool.
macro_rules! pool_accessor {
    ($(#[$doc:meta])* $name:ident, $pool:ident, $data:ty, $($kind:expr),+) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && ($(node.kind == $kind)||+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    /// Get a node header by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Number of node headers ever allocated in this arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pool_accessor!(get_identifier, identifiers, IdentifierData, SyntaxKind::Identifier as u16);
    pool_accessor!(
        get_literal,
        literals,
        LiteralData,
        SyntaxKind::StringLiteral as u16,
        SyntaxKind::NumericLiteral as u16
    );
    pool_accessor!(get_call_expr, call_exprs, CallExprData, CALL_EXPRESSION);
    pool_accessor!(get_access_expr, access_exprs, AccessExprData, PROPERTY_ACCESS_EXPRESSION);
    pool_accessor!(
        get_literal_expr,
        literal_exprs,
        LiteralExprData,
        ARRAY_LITERAL_EXPRESSION,
        OBJECT_LITERAL_EXPRESSION
    );
    pool_accessor!(
        get_property_assignment,
        property_assignments,
        PropertyAssignmentData,
        PROPERTY_ASSIGNMENT,
        SHORTHAND_PROPERTY_ASSIGNMENT
    );
    pool_accessor!(get_parenthesized, parenthesized, ParenthesizedData, PARENTHESIZED_EXPRESSION);
    pool_accessor!(get_binary_expr, binary_exprs, BinaryExprData, BINARY_EXPRESSION);
    pool_accessor!(get_function, functions, FunctionData, FUNCTION_DECLARATION, ARROW_FUNCTION);
    pool_accessor!(get_parameter, parameters, ParameterData, PARAMETER);
    pool_accessor!(get_type_parameter, type_parameters, TypeParameterData, TYPE_PARAMETER);
    pool_accessor!(get_block, blocks, BlockData, BLOCK);
    pool_accessor!(
        get_expr_statement,
        expr_statements,
        ExprStatementData,
        EXPRESSION_STATEMENT,
        RETURN_STATEMENT
    );
    pool_accessor!(get_if_statement, if_statements, IfStatementData, IF_STATEMENT);
    pool_accessor!(get_variable, variables, VariableData, VARIABLE_STATEMENT);
    pool_accessor!(
        get_variable_declaration,
        variable_declarations,
        VariableDeclarationData,
        VARIABLE_DECLARATION
    );
    pool_accessor!(get_import_decl, imports, ImportDeclData, IMPORT_DECLARATION);
    pool_accessor!(get_import_clause, import_clauses, ImportClauseData, IMPORT_CLAUSE);
    pool_accessor!(
        get_named_imports,
        named_imports,
        NamedImportsData,
        NAMED_IMPORTS,
        NAMESPACE_IMPORT
    );
    pool_accessor!(get_specifier, specifiers, SpecifierData, IMPORT_SPECIFIER);
    pool_accessor!(get_type_ref, type_refs, TypeRefData, TYPE_REFERENCE);
    pool_accessor!(get_composite_type, composite_types, CompositeTypeData, UNION_TYPE);
    pool_accessor!(get_array_type, array_types, ArrayTypeData, ARRAY_TYPE);
    pool_accessor!(get_literal_type, literal_types, LiteralTypeData, LITERAL_TYPE);
    pool_accessor!(get_type_literal, type_literals, TypeLiteralData, TYPE_LITERAL);
    pool_accessor!(
        get_signature,
        signatures,
        SignatureData,
        PROPERTY_SIGNATURE,
        METHOD_SIGNATURE
    );
    pool_accessor!(get_index_signature, index_signatures, IndexSignatureData, INDEX_SIGNATURE);
    pool_accessor!(get_mapped_type, mapped_types, MappedTypeData, MAPPED_TYPE);
    pool_accessor!(get_function_type, function_types, FunctionTypeData, FUNCTION_TYPE);
    pool_accessor!(get_interface, interfaces, InterfaceData, INTERFACE_DECLARATION);
    pool_accessor!(get_type_alias, type_aliases, TypeAliasData, TYPE_ALIAS_DECLARATION);
    pool_accessor!(get_source_file, source_files, SourceFileData, SOURCE_FILE);
}

// =============================================================================
// NodeAccess
// =============================================================================

/// Index-based convenience queries over an arena.
pub trait NodeAccess {
    /// Kind of the node, if the index is valid
    fn kind(&self, index: NodeIndex) -> Option<u16>;

    /// Identifier text (if this is an identifier)
    fn get_identifier_text(&self, index: NodeIndex) -> Option<&str>;

    /// Literal text (if this is a string or numeric literal)
    fn get_literal_text(&self, index: NodeIndex) -> Option<&str>;

    /// Text of a name node: identifier text or string literal text
    fn get_name_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier_text(index)
            .or_else(|| self.get_literal_text(index))
    }

    /// Children of a node in source order (for traversal)
    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex>;
}

impl NodeAccess for NodeArena {
    fn kind(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let data = self.get_identifier(node)?;
        Some(&data.escaped_text)
    }

    fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let data = self.get_literal(node)?;
        Some(&data.text)
    }

    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };

        let mut children = Vec::new();
        let mut add = |idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        match node.kind {
            CALL_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    add(data.expression);
                    data.type_arguments.iter().flat_map(NodeList::iter).for_each(&mut add);
                    data.arguments.iter().for_each(&mut add);
                }
            }
            PROPERTY_ACCESS_EXPRESSION => {
                if let Some(data) = self.get_access_expr(node) {
                    add(data.expression);
                    add(data.name);
                }
            }
            ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => {
                if let Some(data) = self.get_literal_expr(node) {
                    data.elements.iter().for_each(&mut add);
                }
            }
            PROPERTY_ASSIGNMENT | SHORTHAND_PROPERTY_ASSIGNMENT => {
                if let Some(data) = self.get_property_assignment(node) {
                    add(data.name);
                    add(data.initializer);
                }
            }
            PARENTHESIZED_EXPRESSION => {
                if let Some(data) = self.get_parenthesized(node) {
                    add(data.expression);
                }
            }
            BINARY_EXPRESSION => {
                if let Some(data) = self.get_binary_expr(node) {
                    add(data.left);
                    add(data.right);
                }
            }
            FUNCTION_DECLARATION | ARROW_FUNCTION => {
                if let Some(data) = self.get_function(node) {
                    add(data.name);
                    data.type_parameters.iter().flat_map(NodeList::iter).for_each(&mut add);
                    data.parameters.iter().for_each(&mut add);
                    add(data.type_annotation);
                    add(data.body);
                }
            }
            PARAMETER => {
                if let Some(data) = self.get_parameter(node) {
                    add(data.name);
                    add(data.type_annotation);
                    add(data.initializer);
                }
            }
            TYPE_PARAMETER => {
                if let Some(data) = self.get_type_parameter(node) {
                    add(data.name);
                    add(data.constraint);
                    add(data.default);
                }
            }
            BLOCK => {
                if let Some(data) = self.get_block(node) {
                    data.statements.iter().for_each(&mut add);
                }
            }
            EXPRESSION_STATEMENT | RETURN_STATEMENT => {
                if let Some(data) = self.get_expr_statement(node) {
                    add(data.expression);
                }
            }
            IF_STATEMENT => {
                if let Some(data) = self.get_if_statement(node) {
                    add(data.expression);
                    add(data.then_statement);
                    add(data.else_statement);
                }
            }
            VARIABLE_STATEMENT => {
                if let Some(data) = self.get_variable(node) {
                    data.declarations.iter().for_each(&mut add);
                }
            }
            VARIABLE_DECLARATION => {
                if let Some(data) = self.get_variable_declaration(node) {
                    add(data.name);
                    add(data.type_annotation);
                    add(data.initializer);
                }
            }
            IMPORT_DECLARATION => {
                if let Some(data) = self.get_import_decl(node) {
                    add(data.import_clause);
                    add(data.module_specifier);
                }
            }
            IMPORT_CLAUSE => {
                if let Some(data) = self.get_import_clause(node) {
                    add(data.name);
                    add(data.named_bindings);
                }
            }
            NAMED_IMPORTS | NAMESPACE_IMPORT => {
                if let Some(data) = self.get_named_imports(node) {
                    add(data.name);
                    data.elements.iter().for_each(&mut add);
                }
            }
            IMPORT_SPECIFIER => {
                if let Some(data) = self.get_specifier(node) {
                    add(data.property_name);
                    add(data.name);
                }
            }
            TYPE_REFERENCE => {
                if let Some(data) = self.get_type_ref(node) {
                    add(data.type_name);
                    data.type_arguments.iter().flat_map(NodeList::iter).for_each(&mut add);
                }
            }
            UNION_TYPE => {
                if let Some(data) = self.get_composite_type(node) {
                    data.types.iter().for_each(&mut add);
                }
            }
            ARRAY_TYPE => {
                if let Some(data) = self.get_array_type(node) {
                    add(data.element_type);
                }
            }
            LITERAL_TYPE => {
                if let Some(data) = self.get_literal_type(node) {
                    add(data.literal);
                }
            }
            TYPE_LITERAL => {
                if let Some(data) = self.get_type_literal(node) {
                    data.members.iter().for_each(&mut add);
                }
            }
            PROPERTY_SIGNATURE | METHOD_SIGNATURE => {
                if let Some(data) = self.get_signature(node) {
                    add(data.name);
                    data.type_parameters.iter().flat_map(NodeList::iter).for_each(&mut add);
                    data.parameters.iter().flat_map(NodeList::iter).for_each(&mut add);
                    add(data.type_annotation);
                }
            }
            INDEX_SIGNATURE => {
                if let Some(data) = self.get_index_signature(node) {
                    data.parameters.iter().for_each(&mut add);
                    add(data.type_annotation);
                }
            }
            MAPPED_TYPE => {
                if let Some(data) = self.get_mapped_type(node) {
                    add(data.type_parameter);
                    add(data.template_type);
                }
            }
            FUNCTION_TYPE => {
                if let Some(data) = self.get_function_type(node) {
                    data.type_parameters.iter().flat_map(NodeList::iter).for_each(&mut add);
                    data.parameters.iter().for_each(&mut add);
                    add(data.type_annotation);
                }
            }
            INTERFACE_DECLARATION => {
                if let Some(data) = self.get_interface(node) {
                    add(data.name);
                    data.type_parameters.iter().flat_map(NodeList::iter).for_each(&mut add);
                    data.heritage.iter().flat_map(NodeList::iter).for_each(&mut add);
                    data.members.iter().for_each(&mut add);
                }
            }
            TYPE_ALIAS_DECLARATION => {
                if let Some(data) = self.get_type_alias(node) {
                    add(data.name);
                    data.type_parameters.iter().flat_map(NodeList::iter).for_each(&mut add);
                    add(data.type_node);
                }
            }
            SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    data.statements.iter().for_each(&mut add);
                }
            }
            _ => {}
        }

        children
    }
}
