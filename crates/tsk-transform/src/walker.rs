//! Pre-order tree fold.
//!
//! Each node is first handed to the rewrite function; the walk then descends
//! into whatever took its place. Parents are rebuilt only along paths where a
//! child changed (see `visit_each_child`), so untouched subtrees keep their
//! indices. Nesting depth is unbounded: the stack grows as needed.

use crate::rewriter::Rewrite;
use tsk_ast::syntax_kind_ext::SOURCE_FILE;
use tsk_ast::{NodeArena, NodeIndex, visit_each_child};
use tsk_common::stack::ensure_sufficient_stack;

/// Walk a whole file. The root is never erased; an `Erase` decision for it
/// is treated as `Keep`.
pub fn walk_root<F>(arena: &mut NodeArena, root: NodeIndex, rewrite: &mut F) -> NodeIndex
where
    F: FnMut(&mut NodeArena, NodeIndex) -> Rewrite,
{
    let current = match rewrite(arena, root) {
        Rewrite::Replace(replacement) => replacement,
        Rewrite::Erase | Rewrite::Keep => root,
    };
    debug_assert!(arena.get(current).is_some_and(|node| node.kind == SOURCE_FILE));
    visit_each_child(arena, current, &mut |arena, child| walk(arena, child, rewrite))
}

/// Walk the subtree at `idx`; `None` when the node itself was erased.
pub fn walk<F>(arena: &mut NodeArena, idx: NodeIndex, rewrite: &mut F) -> Option<NodeIndex>
where
    F: FnMut(&mut NodeArena, NodeIndex) -> Rewrite,
{
    ensure_sufficient_stack(|| {
        let current = match rewrite(arena, idx) {
            Rewrite::Erase => return None,
            Rewrite::Replace(replacement) => replacement,
            Rewrite::Keep => idx,
        };
        Some(visit_each_child(arena, current, &mut |arena, child| walk(arena, child, rewrite)))
    })
}
