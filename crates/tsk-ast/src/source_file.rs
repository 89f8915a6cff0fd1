//! Compilation unit: one file's arena plus its root.

use crate::base::{NodeIndex, NodeList};
use crate::node::NodeArena;
use crate::syntax_kind_ext::SOURCE_FILE;
use std::path::Path;

/// One source file's syntax tree.
///
/// `root` always points at a `SOURCE_FILE` node. A transform that rebuilds
/// the root moves `root` forward; older roots stay readable in `arena`.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub file_name: String,
    pub arena: NodeArena,
    pub root: NodeIndex,
}

impl SourceFile {
    /// Wrap an arena whose `root` was built with `add_source_file`.
    pub fn new(arena: NodeArena, root: NodeIndex) -> SourceFile {
        let file_name = arena
            .get(root)
            .and_then(|node| arena.get_source_file(node))
            .map(|data| data.file_name.clone())
            .unwrap_or_default();
        SourceFile {
            file_name,
            arena,
            root,
        }
    }

    /// Build the `SOURCE_FILE` node for `statements` and wrap it.
    pub fn from_statements(
        file_name: &str,
        mut arena: NodeArena,
        statements: Vec<NodeIndex>,
    ) -> SourceFile {
        let root = arena.add_source_file(file_name, statements);
        SourceFile {
            file_name: file_name.to_string(),
            arena,
            root,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.file_name)
    }

    /// Declaration files (`.d.ts`, `.d.mts`, `.d.cts`) only contain ambient
    /// declarations.
    pub fn is_declaration_file(&self) -> bool {
        [".d.ts", ".d.mts", ".d.cts"]
            .iter()
            .any(|suffix| self.file_name.ends_with(suffix))
    }

    /// Top-level statements of the current root.
    pub fn statements(&self) -> &NodeList {
        static EMPTY: NodeList = NodeList { nodes: Vec::new() };
        self.arena
            .get(self.root)
            .filter(|node| node.kind == SOURCE_FILE)
            .and_then(|node| self.arena.get_source_file(node))
            .map(|data| &data.statements)
            .unwrap_or(&EMPTY)
    }
}
