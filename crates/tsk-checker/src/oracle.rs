//! Query surface used by syntax transforms.

use crate::declarations::{DeclId, DeclarationInfo, ResolvedSignature};
use crate::types::{PropertySymbol, TypeId};
use tsk_ast::NodeIndex;

/// Read-only semantic queries over a checked program.
///
/// Nodes are identified by the file they were checked in plus their index in
/// that file's arena. Indices of nodes created after checking (rewrites)
/// are unknown to the oracle and resolve to `None`.
pub trait TypeOracle {
    /// Signature chosen for the call expression at `call`.
    fn resolved_signature(&self, file_name: &str, call: NodeIndex) -> Option<ResolvedSignature>;

    /// Semantic type denoted by a type node.
    fn type_from_type_node(&self, file_name: &str, type_node: NodeIndex) -> Option<TypeId>;

    /// Properties of `type_id` in declaration order; inherited members follow
    /// own members. Types without members yield an empty list.
    fn properties_of_type(&self, type_id: TypeId) -> Vec<PropertySymbol>;

    /// Type of `property` as seen from its declaration `location`.
    fn type_of_symbol_at_location(&self, property: &PropertySymbol, location: DeclId) -> TypeId;

    fn type_to_string(&self, type_id: TypeId) -> String;

    fn declaration(&self, decl: DeclId) -> Option<&DeclarationInfo>;
}
