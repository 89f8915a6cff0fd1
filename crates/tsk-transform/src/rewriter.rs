//! Per-node rewrite decision.

use crate::call_identity::{MarkerKind, is_marker_call};
use crate::config::{MarkerModule, ResolutionOptions};
use crate::lowering::{lower_keys, lower_type_members};
use crate::module_identity::ModuleIdentityResolver;
use std::path::Path;
use tracing::{debug, trace};
use tsk_ast::syntax_kind_ext::IMPORT_DECLARATION;
use tsk_ast::{NodeAccess, NodeArena, NodeIndex, NodeList};
use tsk_checker::TypeOracle;

/// What happens to one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rewrite {
    /// Drop the node from its parent.
    Erase,
    /// Put this (fresh) node in its place.
    Replace(NodeIndex),
    /// Leave it as is.
    Keep,
}

/// Recognizes marker imports and marker calls.
///
/// Checks run in a fixed order: import erasure, then `keys`, then
/// `typeMembers`. The first match decides.
pub struct NodeRewriter<'p, O: ?Sized> {
    oracle: &'p O,
    /// Canonicalized at construction
    marker: MarkerModule,
    resolver: ModuleIdentityResolver,
}

impl<'p, O> NodeRewriter<'p, O>
where
    O: TypeOracle + ?Sized,
{
    pub fn new(oracle: &'p O, marker: &MarkerModule, options: ResolutionOptions) -> Self {
        let marker = marker.canonicalized();
        debug!(
            implementation = %marker.implementation.display(),
            declaration = %marker.declaration.display(),
            "[keys] marker module"
        );
        NodeRewriter {
            oracle,
            marker,
            resolver: ModuleIdentityResolver::new(options),
        }
    }

    pub fn marker(&self) -> &MarkerModule {
        &self.marker
    }

    pub fn rewrite(&self, arena: &mut NodeArena, file_name: &str, idx: NodeIndex) -> Rewrite {
        if self.is_marker_import(arena, file_name, idx) {
            debug!(file = file_name, node = idx.0, "[keys] erased marker import");
            return Rewrite::Erase;
        }

        for kind in MarkerKind::ALL {
            if !is_marker_call(
                self.oracle,
                arena,
                file_name,
                idx,
                kind,
                &self.marker.declaration,
                &self.resolver,
            ) {
                continue;
            }
            let type_argument = first_type_argument(arena, idx);
            let literal = match kind {
                MarkerKind::Keys => lower_keys(arena, self.oracle, file_name, type_argument),
                MarkerKind::TypeMembers => {
                    lower_type_members(arena, self.oracle, file_name, type_argument)
                }
            };
            debug!(
                file = file_name,
                call = idx.0,
                marker = kind.function_name(),
                "[keys] replaced marker call"
            );
            return Rewrite::Replace(literal);
        }

        Rewrite::Keep
    }

    /// An import whose specifier loads the marker implementation file,
    /// whatever it imports and however it is aliased.
    fn is_marker_import(&self, arena: &NodeArena, file_name: &str, idx: NodeIndex) -> bool {
        let Some(node) = arena.get(idx) else {
            return false;
        };
        if node.kind != IMPORT_DECLARATION {
            return false;
        }
        let Some(specifier) = arena
            .get_import_decl(node)
            .and_then(|import| arena.get_literal_text(import.module_specifier))
        else {
            return false;
        };

        match self.resolver.resolve_import(specifier, Path::new(file_name)) {
            Ok(resolved) => resolved == self.marker.implementation,
            Err(failure) => {
                trace!(specifier, %failure, "[resolve] import not resolvable");
                false
            }
        }
    }
}

fn first_type_argument(arena: &NodeArena, call: NodeIndex) -> Option<NodeIndex> {
    arena
        .get(call)
        .and_then(|node| arena.get_call_expr(node))
        .and_then(|data| data.type_arguments.as_ref())
        .and_then(NodeList::first)
}
