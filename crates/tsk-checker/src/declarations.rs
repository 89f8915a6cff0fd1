//! Declaration sites.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tsk_ast::NodeIndex;

/// Index into the program's declaration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Function,
    Interface,
    TypeAlias,
    PropertySignature,
    MethodSignature,
    Variable,
    Parameter,
    /// Signature that only exists in a JSDoc comment; it has no node of its own.
    JsDocSignature,
}

/// Where and how something was declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationInfo {
    pub kind: DeclarationKind,
    /// Name as written at the declaration (`None` for anonymous declarations)
    pub name: Option<String>,
    /// File the declaration lives in, exactly as the program knows it
    pub file_name: PathBuf,
    pub node: NodeIndex,
}

impl DeclarationInfo {
    pub fn file_path(&self) -> &Path {
        &self.file_name
    }
}

/// Result of signature resolution for one call expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSignature {
    /// `None` for synthetic signatures that have no declaration
    pub declaration: Option<DeclId>,
}
