//! Semantic types.
//!
//! Types are interned: the same `TypeData` always maps to the same `TypeId`,
//! so identity comparison is structural for anonymous types. Named types
//! (interfaces, aliases) carry their declaration id so two declarations that
//! happen to share a name never collapse into one type.

use crate::declarations::DeclId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Handle to an interned type.
///
/// Ids below `TypeId::FIRST_USER` are the pre-interned intrinsics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);
    pub const UNDEFINED: TypeId = TypeId(4);
    pub const NULL: TypeId = TypeId(5);
    pub const BOOLEAN: TypeId = TypeId(6);
    pub const NUMBER: TypeId = TypeId(7);
    pub const STRING: TypeId = TypeId(8);
    pub const BIGINT: TypeId = TypeId(9);
    pub const SYMBOL: TypeId = TypeId(10);
    pub const OBJECT: TypeId = TypeId(11);
    pub const BOOLEAN_TRUE: TypeId = TypeId(12);
    pub const BOOLEAN_FALSE: TypeId = TypeId(13);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 100;

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(String),
    /// Numeric literal source text (`1`, `0x10`, `1.5`)
    Number(String),
    Boolean(bool),
}

/// One member property of an object-like type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertySymbol {
    pub name: String,
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
    pub is_method: bool,
    /// Declaration sites. Empty for properties produced by mapped types.
    pub declarations: SmallVec<[DeclId; 1]>,
}

impl PropertySymbol {
    pub fn has_declarations(&self) -> bool {
        !self.declarations.is_empty()
    }
}

/// Properties of an object-like type, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub properties: Vec<PropertySymbol>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: String,
    pub type_id: TypeId,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
}

/// Structure behind a `TypeId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// Keyword types; the payload is the keyword text.
    Intrinsic(&'static str),
    Literal(LiteralValue),
    Array(TypeId),
    Union(Vec<TypeId>),
    /// Anonymous object type (type literal or mapped type result).
    Object(ObjectShape),
    Function(FunctionShape),
    /// Interface instantiation; members live in the program's shape table.
    Interface {
        name: String,
        decl: DeclId,
        type_arguments: Vec<TypeId>,
    },
    /// Type alias instantiation; the aliased type lives in the program's
    /// alias table.
    Alias {
        name: String,
        decl: DeclId,
        type_arguments: Vec<TypeId>,
    },
    /// Unbound type parameter.
    TypeParameter(String),
}
