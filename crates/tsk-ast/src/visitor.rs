//! Structural child visitor.
//!
//! `visit_each_child` hands every direct child of a node to a visitor and
//! rebuilds the parent only when something changed:
//!
//! - visitor returns `Some(same index)` for every child: the parent index is
//!   returned untouched (no allocation)
//! - visitor returns a different index: a new parent with the same kind,
//!   flags and range is appended, pointing at the new children
//! - visitor returns `None`: the child is erased; it is dropped from a list,
//!   or leaves `NodeIndex::NONE` in a single slot
//!
//! Nothing already in the arena is modified, so the original tree stays
//! intact next to the rebuilt one.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::syntax_kind_ext::*;

fn visit_node<F>(arena: &mut NodeArena, child: NodeIndex, visitor: &mut F) -> NodeIndex
where
    F: FnMut(&mut NodeArena, NodeIndex) -> Option<NodeIndex>,
{
    if child.is_none() {
        return child;
    }
    visitor(arena, child).unwrap_or(NodeIndex::NONE)
}

fn visit_nodes<F>(arena: &mut NodeArena, list: &NodeList, visitor: &mut F) -> NodeList
where
    F: FnMut(&mut NodeArena, NodeIndex) -> Option<NodeIndex>,
{
    list.iter().filter_map(|child| visitor(arena, child)).collect()
}

fn visit_opt_nodes<F>(
    arena: &mut NodeArena,
    list: &Option<NodeList>,
    visitor: &mut F,
) -> Option<NodeList>
where
    F: FnMut(&mut NodeArena, NodeIndex) -> Option<NodeIndex>,
{
    list.as_ref().map(|list| visit_nodes(arena, list, visitor))
}

/// Keep `$index` when the payload is unchanged, otherwise append a rebuilt node.
macro_rules! commit {
    ($arena:ident, $index:ident, $node:ident, $pool:ident, $old:ident, $new:ident) => {{
        if $new == $old {
            $index
        } else {
            let data_index = $arena.$pool.len() as u32;
            $arena.$pool.push($new);
            $arena.push_rebuilt($node, data_index)
        }
    }};
}

/// Visit the direct children of `index`, returning the (possibly new) node.
pub fn visit_each_child<F>(arena: &mut NodeArena, index: NodeIndex, visitor: &mut F) -> NodeIndex
where
    F: FnMut(&mut NodeArena, NodeIndex) -> Option<NodeIndex>,
{
    let Some(node) = arena.get(index).copied() else {
        return index;
    };

    match node.kind {
        CALL_EXPRESSION => {
            let Some(old) = arena.get_call_expr(&node).cloned() else {
                return index;
            };
            let new = CallExprData {
                expression: visit_node(arena, old.expression, visitor),
                type_arguments: visit_opt_nodes(arena, &old.type_arguments, visitor),
                arguments: visit_nodes(arena, &old.arguments, visitor),
            };
            commit!(arena, index, node, call_exprs, old, new)
        }
        PROPERTY_ACCESS_EXPRESSION => {
            let Some(old) = arena.get_access_expr(&node).cloned() else {
                return index;
            };
            let new = AccessExprData {
                expression: visit_node(arena, old.expression, visitor),
                name: visit_node(arena, old.name, visitor),
            };
            commit!(arena, index, node, access_exprs, old, new)
        }
        ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION => {
            let Some(old) = arena.get_literal_expr(&node).cloned() else {
                return index;
            };
            let new = LiteralExprData {
                elements: visit_nodes(arena, &old.elements, visitor),
            };
            commit!(arena, index, node, literal_exprs, old, new)
        }
        PROPERTY_ASSIGNMENT | SHORTHAND_PROPERTY_ASSIGNMENT => {
            let Some(old) = arena.get_property_assignment(&node).cloned() else {
                return index;
            };
            let new = PropertyAssignmentData {
                name: visit_node(arena, old.name, visitor),
                initializer: visit_node(arena, old.initializer, visitor),
            };
            commit!(arena, index, node, property_assignments, old, new)
        }
        PARENTHESIZED_EXPRESSION => {
            let Some(old) = arena.get_parenthesized(&node).cloned() else {
                return index;
            };
            let new = ParenthesizedData {
                expression: visit_node(arena, old.expression, visitor),
            };
            commit!(arena, index, node, parenthesized, old, new)
        }
        BINARY_EXPRESSION => {
            let Some(old) = arena.get_binary_expr(&node).cloned() else {
                return index;
            };
            let new = BinaryExprData {
                left: visit_node(arena, old.left, visitor),
                operator_token: old.operator_token,
                right: visit_node(arena, old.right, visitor),
            };
            commit!(arena, index, node, binary_exprs, old, new)
        }
        FUNCTION_DECLARATION | ARROW_FUNCTION => {
            let Some(old) = arena.get_function(&node).cloned() else {
                return index;
            };
            let new = FunctionData {
                name: visit_node(arena, old.name, visitor),
                type_parameters: visit_opt_nodes(arena, &old.type_parameters, visitor),
                parameters: visit_nodes(arena, &old.parameters, visitor),
                type_annotation: visit_node(arena, old.type_annotation, visitor),
                body: visit_node(arena, old.body, visitor),
            };
            commit!(arena, index, node, functions, old, new)
        }
        PARAMETER => {
            let Some(old) = arena.get_parameter(&node).cloned() else {
                return index;
            };
            let new = ParameterData {
                name: visit_node(arena, old.name, visitor),
                type_annotation: visit_node(arena, old.type_annotation, visitor),
                initializer: visit_node(arena, old.initializer, visitor),
            };
            commit!(arena, index, node, parameters, old, new)
        }
        TYPE_PARAMETER => {
            let Some(old) = arena.get_type_parameter(&node).cloned() else {
                return index;
            };
            let new = TypeParameterData {
                name: visit_node(arena, old.name, visitor),
                constraint: visit_node(arena, old.constraint, visitor),
                default: visit_node(arena, old.default, visitor),
            };
            commit!(arena, index, node, type_parameters, old, new)
        }
        BLOCK => {
            let Some(old) = arena.get_block(&node).cloned() else {
                return index;
            };
            let new = BlockData {
                statements: visit_nodes(arena, &old.statements, visitor),
            };
            commit!(arena, index, node, blocks, old, new)
        }
        EXPRESSION_STATEMENT | RETURN_STATEMENT => {
            let Some(old) = arena.get_expr_statement(&node).cloned() else {
                return index;
            };
            let new = ExprStatementData {
                expression: visit_node(arena, old.expression, visitor),
            };
            commit!(arena, index, node, expr_statements, old, new)
        }
        IF_STATEMENT => {
            let Some(old) = arena.get_if_statement(&node).cloned() else {
                return index;
            };
            let new = IfStatementData {
                expression: visit_node(arena, old.expression, visitor),
                then_statement: visit_node(arena, old.then_statement, visitor),
                else_statement: visit_node(arena, old.else_statement, visitor),
            };
            commit!(arena, index, node, if_statements, old, new)
        }
        VARIABLE_STATEMENT => {
            let Some(old) = arena.get_variable(&node).cloned() else {
                return index;
            };
            let new = VariableData {
                declarations: visit_nodes(arena, &old.declarations, visitor),
            };
            commit!(arena, index, node, variables, old, new)
        }
        VARIABLE_DECLARATION => {
            let Some(old) = arena.get_variable_declaration(&node).cloned() else {
                return index;
            };
            let new = VariableDeclarationData {
                name: visit_node(arena, old.name, visitor),
                type_annotation: visit_node(arena, old.type_annotation, visitor),
                initializer: visit_node(arena, old.initializer, visitor),
            };
            commit!(arena, index, node, variable_declarations, old, new)
        }
        IMPORT_DECLARATION => {
            let Some(old) = arena.get_import_decl(&node).cloned() else {
                return index;
            };
            let new = ImportDeclData {
                import_clause: visit_node(arena, old.import_clause, visitor),
                module_specifier: visit_node(arena, old.module_specifier, visitor),
            };
            commit!(arena, index, node, imports, old, new)
        }
        IMPORT_CLAUSE => {
            let Some(old) = arena.get_import_clause(&node).cloned() else {
                return index;
            };
            let new = ImportClauseData {
                name: visit_node(arena, old.name, visitor),
                named_bindings: visit_node(arena, old.named_bindings, visitor),
            };
            commit!(arena, index, node, import_clauses, old, new)
        }
        NAMED_IMPORTS | NAMESPACE_IMPORT => {
            let Some(old) = arena.get_named_imports(&node).cloned() else {
                return index;
            };
            let new = NamedImportsData {
                name: visit_node(arena, old.name, visitor),
                elements: visit_nodes(arena, &old.elements, visitor),
            };
            commit!(arena, index, node, named_imports, old, new)
        }
        IMPORT_SPECIFIER => {
            let Some(old) = arena.get_specifier(&node).cloned() else {
                return index;
            };
            let new = SpecifierData {
                property_name: visit_node(arena, old.property_name, visitor),
                name: visit_node(arena, old.name, visitor),
            };
            commit!(arena, index, node, specifiers, old, new)
        }
        TYPE_REFERENCE => {
            let Some(old) = arena.get_type_ref(&node).cloned() else {
                return index;
            };
            let new = TypeRefData {
                type_name: visit_node(arena, old.type_name, visitor),
                type_arguments: visit_opt_nodes(arena, &old.type_arguments, visitor),
            };
            commit!(arena, index, node, type_refs, old, new)
        }
        UNION_TYPE => {
            let Some(old) = arena.get_composite_type(&node).cloned() else {
                return index;
            };
            let new = CompositeTypeData {
                types: visit_nodes(arena, &old.types, visitor),
            };
            commit!(arena, index, node, composite_types, old, new)
        }
        ARRAY_TYPE => {
            let Some(old) = arena.get_array_type(&node).cloned() else {
                return index;
            };
            let new = ArrayTypeData {
                element_type: visit_node(arena, old.element_type, visitor),
            };
            commit!(arena, index, node, array_types, old, new)
        }
        LITERAL_TYPE => {
            let Some(old) = arena.get_literal_type(&node).cloned() else {
                return index;
            };
            let new = LiteralTypeData {
                literal: visit_node(arena, old.literal, visitor),
            };
            commit!(arena, index, node, literal_types, old, new)
        }
        TYPE_LITERAL => {
            let Some(old) = arena.get_type_literal(&node).cloned() else {
                return index;
            };
            let new = TypeLiteralData {
                members: visit_nodes(arena, &old.members, visitor),
            };
            commit!(arena, index, node, type_literals, old, new)
        }
        PROPERTY_SIGNATURE | METHOD_SIGNATURE => {
            let Some(old) = arena.get_signature(&node).cloned() else {
                return index;
            };
            let new = SignatureData {
                name: visit_node(arena, old.name, visitor),
                type_parameters: visit_opt_nodes(arena, &old.type_parameters, visitor),
                parameters: visit_opt_nodes(arena, &old.parameters, visitor),
                type_annotation: visit_node(arena, old.type_annotation, visitor),
            };
            commit!(arena, index, node, signatures, old, new)
        }
        INDEX_SIGNATURE => {
            let Some(old) = arena.get_index_signature(&node).cloned() else {
                return index;
            };
            let new = IndexSignatureData {
                parameters: visit_nodes(arena, &old.parameters, visitor),
                type_annotation: visit_node(arena, old.type_annotation, visitor),
            };
            commit!(arena, index, node, index_signatures, old, new)
        }
        MAPPED_TYPE => {
            let Some(old) = arena.get_mapped_type(&node).cloned() else {
                return index;
            };
            let new = MappedTypeData {
                type_parameter: visit_node(arena, old.type_parameter, visitor),
                template_type: visit_node(arena, old.template_type, visitor),
            };
            commit!(arena, index, node, mapped_types, old, new)
        }
        FUNCTION_TYPE => {
            let Some(old) = arena.get_function_type(&node).cloned() else {
                return index;
            };
            let new = FunctionTypeData {
                type_parameters: visit_opt_nodes(arena, &old.type_parameters, visitor),
                parameters: visit_nodes(arena, &old.parameters, visitor),
                type_annotation: visit_node(arena, old.type_annotation, visitor),
            };
            commit!(arena, index, node, function_types, old, new)
        }
        INTERFACE_DECLARATION => {
            let Some(old) = arena.get_interface(&node).cloned() else {
                return index;
            };
            let new = InterfaceData {
                name: visit_node(arena, old.name, visitor),
                type_parameters: visit_opt_nodes(arena, &old.type_parameters, visitor),
                heritage: visit_opt_nodes(arena, &old.heritage, visitor),
                members: visit_nodes(arena, &old.members, visitor),
            };
            commit!(arena, index, node, interfaces, old, new)
        }
        TYPE_ALIAS_DECLARATION => {
            let Some(old) = arena.get_type_alias(&node).cloned() else {
                return index;
            };
            let new = TypeAliasData {
                name: visit_node(arena, old.name, visitor),
                type_parameters: visit_opt_nodes(arena, &old.type_parameters, visitor),
                type_node: visit_node(arena, old.type_node, visitor),
            };
            commit!(arena, index, node, type_aliases, old, new)
        }
        SOURCE_FILE => {
            let Some(old) = arena.get_source_file(&node).cloned() else {
                return index;
            };
            let new = SourceFileData {
                file_name: old.file_name.clone(),
                statements: visit_nodes(arena, &old.statements, visitor),
            };
            commit!(arena, index, node, source_files, old, new)
        }
        // Identifiers, literals and keyword tokens have no children.
        _ => index,
    }
}
