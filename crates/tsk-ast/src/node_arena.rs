//! NodeArena creation methods (`add_*`).
//!
//! Factory methods build synthesized nodes (`pos == end == 0`). Hosts that
//! track source positions can follow up with [`NodeArena::with_range`].

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::syntax_kind_ext::*;

/// Push a payload into `$pool` and a header of `$kind` pointing at it.
macro_rules! push_data {
    ($arena:expr, $pool:ident, $kind:expr, $data:expr) => {{
        let data_index = $arena.$pool.len() as u32;
        $arena.$pool.push($data);
        $arena.push_header(Node::with_data($kind, 0, 0, data_index))
    }};
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[inline]
    fn push_header(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeIndex(index)
    }

    /// Append a copy of `original`'s header pointing at a new payload.
    ///
    /// Used when a child list changed and the parent must be rebuilt: kind,
    /// flags and source range carry over unchanged.
    pub(crate) fn push_rebuilt(&mut self, original: Node, data_index: u32) -> NodeIndex {
        self.push_header(Node {
            data_index,
            ..original
        })
    }

    /// OR `flags` into a freshly built node.
    ///
    /// Only meant for tree construction: once a tree has been handed to a
    /// checker or transform, headers are treated as frozen.
    pub fn with_flags(&mut self, index: NodeIndex, flags: u16) -> NodeIndex {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.flags |= flags;
        }
        index
    }

    /// Record the source range of a freshly built node.
    pub fn with_range(&mut self, index: NodeIndex, pos: u32, end: u32) -> NodeIndex {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.pos = pos;
            node.end = end;
        }
        index
    }

    // =========================================================================
    // Tokens, names and literals
    // =========================================================================

    /// Data-less token node (`string` keyword, `true`, `null`...).
    pub fn add_token(&mut self, kind: SyntaxKind) -> NodeIndex {
        self.push_header(Node::new(kind as u16, 0, 0))
    }

    pub fn add_identifier(&mut self, text: &str) -> NodeIndex {
        push_data!(
            self,
            identifiers,
            SyntaxKind::Identifier as u16,
            IdentifierData {
                escaped_text: text.to_string(),
            }
        )
    }

    pub fn add_string_literal(&mut self, text: &str) -> NodeIndex {
        push_data!(
            self,
            literals,
            SyntaxKind::StringLiteral as u16,
            LiteralData {
                text: text.to_string(),
            }
        )
    }

    pub fn add_numeric_literal(&mut self, text: &str) -> NodeIndex {
        push_data!(
            self,
            literals,
            SyntaxKind::NumericLiteral as u16,
            LiteralData {
                text: text.to_string(),
            }
        )
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn add_call_expr(
        &mut self,
        expression: NodeIndex,
        type_arguments: Option<Vec<NodeIndex>>,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        push_data!(
            self,
            call_exprs,
            CALL_EXPRESSION,
            CallExprData {
                expression,
                type_arguments: type_arguments.map(NodeList::from),
                arguments: NodeList::from(arguments),
            }
        )
    }

    pub fn add_property_access(&mut self, expression: NodeIndex, name: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            access_exprs,
            PROPERTY_ACCESS_EXPRESSION,
            AccessExprData { expression, name }
        )
    }

    pub fn add_array_literal(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            literal_exprs,
            ARRAY_LITERAL_EXPRESSION,
            LiteralExprData {
                elements: NodeList::from(elements),
            }
        )
    }

    pub fn add_object_literal(&mut self, properties: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            literal_exprs,
            OBJECT_LITERAL_EXPRESSION,
            LiteralExprData {
                elements: NodeList::from(properties),
            }
        )
    }

    pub fn add_property_assignment(&mut self, name: NodeIndex, initializer: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            property_assignments,
            PROPERTY_ASSIGNMENT,
            PropertyAssignmentData { name, initializer }
        )
    }

    pub fn add_shorthand_property(&mut self, name: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            property_assignments,
            SHORTHAND_PROPERTY_ASSIGNMENT,
            PropertyAssignmentData {
                name,
                initializer: NodeIndex::NONE,
            }
        )
    }

    pub fn add_parenthesized(&mut self, expression: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            parenthesized,
            PARENTHESIZED_EXPRESSION,
            ParenthesizedData { expression }
        )
    }

    pub fn add_binary_expr(
        &mut self,
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            binary_exprs,
            BINARY_EXPRESSION,
            BinaryExprData {
                left,
                operator_token: operator as u16,
                right,
            }
        )
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Function declaration; pass `NodeIndex::NONE` as `body` for `declare function`.
    pub fn add_function_declaration(
        &mut self,
        name: NodeIndex,
        type_parameters: Option<Vec<NodeIndex>>,
        parameters: Vec<NodeIndex>,
        type_annotation: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            functions,
            FUNCTION_DECLARATION,
            FunctionData {
                name,
                type_parameters: type_parameters.map(NodeList::from),
                parameters: NodeList::from(parameters),
                type_annotation,
                body,
            }
        )
    }

    pub fn add_arrow_function(
        &mut self,
        parameters: Vec<NodeIndex>,
        type_annotation: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            functions,
            ARROW_FUNCTION,
            FunctionData {
                name: NodeIndex::NONE,
                type_parameters: None,
                parameters: NodeList::from(parameters),
                type_annotation,
                body,
            }
        )
    }

    pub fn add_parameter(
        &mut self,
        name: NodeIndex,
        type_annotation: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            parameters,
            PARAMETER,
            ParameterData {
                name,
                type_annotation,
                initializer,
            }
        )
    }

    pub fn add_type_parameter(
        &mut self,
        name: NodeIndex,
        constraint: NodeIndex,
        default: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            type_parameters,
            TYPE_PARAMETER,
            TypeParameterData {
                name,
                constraint,
                default,
            }
        )
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn add_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            blocks,
            BLOCK,
            BlockData {
                statements: NodeList::from(statements),
            }
        )
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            expr_statements,
            EXPRESSION_STATEMENT,
            ExprStatementData { expression }
        )
    }

    pub fn add_return_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            expr_statements,
            RETURN_STATEMENT,
            ExprStatementData { expression }
        )
    }

    pub fn add_if_statement(
        &mut self,
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            if_statements,
            IF_STATEMENT,
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            }
        )
    }

    /// `var` statement; mark with `node_flags::CONST` / `LET` as needed.
    pub fn add_variable_statement(&mut self, declarations: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            variables,
            VARIABLE_STATEMENT,
            VariableData {
                declarations: NodeList::from(declarations),
            }
        )
    }

    pub fn add_variable_declaration(
        &mut self,
        name: NodeIndex,
        type_annotation: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            variable_declarations,
            VARIABLE_DECLARATION,
            VariableDeclarationData {
                name,
                type_annotation,
                initializer,
            }
        )
    }

    // =========================================================================
    // Modules
    // =========================================================================

    pub fn add_import_declaration(
        &mut self,
        import_clause: NodeIndex,
        module_specifier: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            imports,
            IMPORT_DECLARATION,
            ImportDeclData {
                import_clause,
                module_specifier,
            }
        )
    }

    pub fn add_import_clause(&mut self, name: NodeIndex, named_bindings: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            import_clauses,
            IMPORT_CLAUSE,
            ImportClauseData {
                name,
                named_bindings,
            }
        )
    }

    pub fn add_named_imports(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            named_imports,
            NAMED_IMPORTS,
            NamedImportsData {
                name: NodeIndex::NONE,
                elements: NodeList::from(elements),
            }
        )
    }

    pub fn add_namespace_import(&mut self, name: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            named_imports,
            NAMESPACE_IMPORT,
            NamedImportsData {
                name,
                elements: NodeList::new(),
            }
        )
    }

    /// `property_name as name`; pass `NodeIndex::NONE` when not renamed.
    pub fn add_import_specifier(&mut self, property_name: NodeIndex, name: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            specifiers,
            IMPORT_SPECIFIER,
            SpecifierData {
                property_name,
                name,
            }
        )
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn add_type_reference(
        &mut self,
        type_name: NodeIndex,
        type_arguments: Option<Vec<NodeIndex>>,
    ) -> NodeIndex {
        push_data!(
            self,
            type_refs,
            TYPE_REFERENCE,
            TypeRefData {
                type_name,
                type_arguments: type_arguments.map(NodeList::from),
            }
        )
    }

    pub fn add_union_type(&mut self, types: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            composite_types,
            UNION_TYPE,
            CompositeTypeData {
                types: NodeList::from(types),
            }
        )
    }

    pub fn add_array_type(&mut self, element_type: NodeIndex) -> NodeIndex {
        push_data!(self, array_types, ARRAY_TYPE, ArrayTypeData { element_type })
    }

    pub fn add_literal_type(&mut self, literal: NodeIndex) -> NodeIndex {
        push_data!(self, literal_types, LITERAL_TYPE, LiteralTypeData { literal })
    }

    pub fn add_type_literal(&mut self, members: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            type_literals,
            TYPE_LITERAL,
            TypeLiteralData {
                members: NodeList::from(members),
            }
        )
    }

    /// `name: type`; mark with `node_flags::OPTIONAL` / `READONLY` as needed.
    pub fn add_property_signature(&mut self, name: NodeIndex, type_annotation: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            signatures,
            PROPERTY_SIGNATURE,
            SignatureData {
                name,
                type_parameters: None,
                parameters: None,
                type_annotation,
            }
        )
    }

    pub fn add_method_signature(
        &mut self,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            signatures,
            METHOD_SIGNATURE,
            SignatureData {
                name,
                type_parameters: None,
                parameters: Some(NodeList::from(parameters)),
                type_annotation,
            }
        )
    }

    pub fn add_index_signature(
        &mut self,
        parameters: Vec<NodeIndex>,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            index_signatures,
            INDEX_SIGNATURE,
            IndexSignatureData {
                parameters: NodeList::from(parameters),
                type_annotation,
            }
        )
    }

    /// `{ [K in C]: T }`: `type_parameter` is a `TypeParameter` whose
    /// constraint is `C`.
    pub fn add_mapped_type(&mut self, type_parameter: NodeIndex, template_type: NodeIndex) -> NodeIndex {
        push_data!(
            self,
            mapped_types,
            MAPPED_TYPE,
            MappedTypeData {
                type_parameter,
                template_type,
            }
        )
    }

    pub fn add_function_type(
        &mut self,
        parameters: Vec<NodeIndex>,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            function_types,
            FUNCTION_TYPE,
            FunctionTypeData {
                type_parameters: None,
                parameters: NodeList::from(parameters),
                type_annotation,
            }
        )
    }

    pub fn add_interface(
        &mut self,
        name: NodeIndex,
        type_parameters: Option<Vec<NodeIndex>>,
        heritage: Option<Vec<NodeIndex>>,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        push_data!(
            self,
            interfaces,
            INTERFACE_DECLARATION,
            InterfaceData {
                name,
                type_parameters: type_parameters.map(NodeList::from),
                heritage: heritage.map(NodeList::from),
                members: NodeList::from(members),
            }
        )
    }

    pub fn add_type_alias(
        &mut self,
        name: NodeIndex,
        type_parameters: Option<Vec<NodeIndex>>,
        type_node: NodeIndex,
    ) -> NodeIndex {
        push_data!(
            self,
            type_aliases,
            TYPE_ALIAS_DECLARATION,
            TypeAliasData {
                name,
                type_parameters: type_parameters.map(NodeList::from),
                type_node,
            }
        )
    }

    // =========================================================================
    // Source file
    // =========================================================================

    pub fn add_source_file(&mut self, file_name: &str, statements: Vec<NodeIndex>) -> NodeIndex {
        push_data!(
            self,
            source_files,
            SOURCE_FILE,
            SourceFileData {
                file_name: file_name.to_string(),
                statements: NodeList::from(statements),
            }
        )
    }
}
