//! Structural type interner.

use crate::types::{TypeData, TypeId};
use rustc_hash::FxHashMap;

/// Deduplicates `TypeData` and hands out stable `TypeId`s.
#[derive(Clone, Debug)]
pub struct TypeInterner {
    map: FxHashMap<TypeData, TypeId>,
    /// Non-intrinsic types, indexed by `id - TypeId::FIRST_USER`
    types: Vec<TypeData>,
}

const INTRINSICS: [(TypeId, &str); 14] = [
    (TypeId::ANY, "any"),
    (TypeId::UNKNOWN, "unknown"),
    (TypeId::NEVER, "never"),
    (TypeId::VOID, "void"),
    (TypeId::UNDEFINED, "undefined"),
    (TypeId::NULL, "null"),
    (TypeId::BOOLEAN, "boolean"),
    (TypeId::NUMBER, "number"),
    (TypeId::STRING, "string"),
    (TypeId::BIGINT, "bigint"),
    (TypeId::SYMBOL, "symbol"),
    (TypeId::OBJECT, "object"),
    (TypeId::BOOLEAN_TRUE, "true"),
    (TypeId::BOOLEAN_FALSE, "false"),
];

impl TypeInterner {
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        for (id, name) in INTRINSICS {
            map.insert(TypeData::Intrinsic(name), id);
        }
        TypeInterner {
            map,
            types: Vec::new(),
        }
    }

    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let id = TypeId(TypeId::FIRST_USER + self.types.len() as u32);
        self.types.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// Intrinsic id for a keyword (`"string"`, `"number"`...).
    pub fn intrinsic(name: &str) -> Option<TypeId> {
        INTRINSICS
            .iter()
            .find(|(_, text)| *text == name)
            .map(|(id, _)| *id)
    }

    /// Structure behind `id`. Intrinsics are reported as `TypeData::Intrinsic`.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        if id.is_intrinsic() {
            return INTRINSICS
                .iter()
                .find(|(intrinsic, _)| *intrinsic == id)
                .map(|(_, name)| TypeData::Intrinsic(name));
        }
        self.types
            .get((id.0 - TypeId::FIRST_USER) as usize)
            .cloned()
    }

    /// Borrowing variant of [`TypeInterner::lookup`] for non-intrinsic ids.
    pub fn get(&self, id: TypeId) -> Option<&TypeData> {
        if id.is_intrinsic() {
            return None;
        }
        self.types.get((id.0 - TypeId::FIRST_USER) as usize)
    }

    /// `a | b | ...`, flattened and deduplicated. A single member collapses
    /// to itself; no members is `never`.
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        let mut flat: Vec<TypeId> = Vec::with_capacity(members.len());
        for member in members {
            let nested = match self.get(member) {
                Some(TypeData::Union(inner)) => inner.clone(),
                _ => vec![member],
            };
            for ty in nested {
                if !flat.contains(&ty) {
                    flat.push(ty);
                }
            }
        }
        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => self.intern(TypeData::Union(flat)),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}
