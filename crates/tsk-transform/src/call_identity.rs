//! Deciding whether a call expression really calls a marker function.

use crate::module_identity::ModuleIdentityResolver;
use std::path::Path;
use tracing::trace;
use tsk_ast::syntax_kind_ext::CALL_EXPRESSION;
use tsk_ast::{NodeArena, NodeIndex};
use tsk_checker::{DeclarationKind, TypeOracle};

/// The two marker functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `keys<T>()`: property names
    Keys,
    /// `typeMembers<T>()`: property name to type text
    TypeMembers,
}

impl MarkerKind {
    /// In the order the rewriter tries them.
    pub const ALL: [MarkerKind; 2] = [MarkerKind::Keys, MarkerKind::TypeMembers];

    /// Name the marker module declares the function under.
    pub fn function_name(self) -> &'static str {
        match self {
            MarkerKind::Keys => "keys",
            MarkerKind::TypeMembers => "typeMembers",
        }
    }
}

/// True only when the call at `call` resolves to the marker declaration of
/// `kind`:
///
/// - the resolved signature has a real declaration (not synthetic, not JSDoc)
/// - the declaration is named exactly `kind.function_name()`
/// - the declaration's file is, after following symlinks, `marker_declaration`
///
/// Failures along the way (missing file, canonicalization errors) are a
/// plain `false`.
pub fn is_marker_call<O>(
    oracle: &O,
    arena: &NodeArena,
    file_name: &str,
    call: NodeIndex,
    kind: MarkerKind,
    marker_declaration: &Path,
    resolver: &ModuleIdentityResolver,
) -> bool
where
    O: TypeOracle + ?Sized,
{
    if arena.get(call).is_none_or(|node| node.kind != CALL_EXPRESSION) {
        return false;
    }
    let Some(signature) = oracle.resolved_signature(file_name, call) else {
        return false;
    };
    let Some(declaration) = signature.declaration.and_then(|decl| oracle.declaration(decl)) else {
        return false;
    };
    if declaration.kind == DeclarationKind::JsDocSignature {
        return false;
    }
    if declaration.name.as_deref() != Some(kind.function_name()) {
        return false;
    }

    match resolver.resolve_file(declaration.file_path()) {
        Ok(canonical) => canonical == marker_declaration,
        Err(failure) => {
            trace!(
                file = %declaration.file_path().display(),
                %failure,
                "[keys] declaration file not resolvable"
            );
            false
        }
    }
}
