//! Type argument to literal.
//!
//! Every node built here is fresh and flagged `SYNTHESIZED`; nothing that
//! already exists in the arena is touched.

use tsk_ast::{NodeArena, NodeIndex, is_identifier_text, node_flags};
use tsk_checker::TypeOracle;

fn synthesized(arena: &mut NodeArena, idx: NodeIndex) -> NodeIndex {
    arena.with_flags(idx, node_flags::SYNTHESIZED)
}

/// `keys<T>()` -> `["a", "b", ...]`, one entry per property of `T` in
/// declaration order. No type argument gives `[]`.
pub fn lower_keys<O>(
    arena: &mut NodeArena,
    oracle: &O,
    file_name: &str,
    type_argument: Option<NodeIndex>,
) -> NodeIndex
where
    O: TypeOracle + ?Sized,
{
    let properties = type_argument
        .and_then(|node| oracle.type_from_type_node(file_name, node))
        .map(|ty| oracle.properties_of_type(ty))
        .unwrap_or_default();

    let elements = properties
        .iter()
        .map(|prop| {
            let literal = arena.add_string_literal(&prop.name);
            synthesized(arena, literal)
        })
        .collect();
    let array = arena.add_array_literal(elements);
    synthesized(arena, array)
}

/// `typeMembers<T>()` -> `{ a: "string", b: "number" }`.
///
/// Properties without a declaration site (mapped-type members) are skipped;
/// each value is the checker's rendering of the property type at its first
/// declaration. No type argument gives `{}`.
pub fn lower_type_members<O>(
    arena: &mut NodeArena,
    oracle: &O,
    file_name: &str,
    type_argument: Option<NodeIndex>,
) -> NodeIndex
where
    O: TypeOracle + ?Sized,
{
    let properties = type_argument
        .and_then(|node| oracle.type_from_type_node(file_name, node))
        .map(|ty| oracle.properties_of_type(ty))
        .unwrap_or_default();

    let mut assignments = Vec::with_capacity(properties.len());
    for prop in &properties {
        let Some(&first_decl) = prop.declarations.first() else {
            continue;
        };
        let ty = oracle.type_of_symbol_at_location(prop, first_decl);
        let text = oracle.type_to_string(ty);

        let key = property_key(arena, &prop.name);
        let value = arena.add_string_literal(&text);
        let value = synthesized(arena, value);
        let assignment = arena.add_property_assignment(key, value);
        assignments.push(synthesized(arena, assignment));
    }
    let object = arena.add_object_literal(assignments);
    synthesized(arena, object)
}

/// Identifier key when the name allows it, string-literal key otherwise.
fn property_key(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let key = if is_identifier_text(name) {
        arena.add_identifier(name)
    } else {
        arena.add_string_literal(name)
    };
    synthesized(arena, key)
}
