//! Arena syntax tree for TypeScript source files.
//!
//! Nodes are 16-byte headers (`Node`) that point into typed data pools held by
//! `NodeArena`. Trees are built through the `add_*` factory methods and are
//! never mutated once a pass starts: rewrites append fresh nodes and leave
//! every existing index valid.
//!
//! - `base` - `NodeIndex` / `NodeList` handles
//! - `syntax_kind` / `syntax_kind_ext` - token and node kind discriminants
//! - `flags` - packed per-node flags
//! - `node` - headers, data pools and typed accessors
//! - `node_arena` - factory methods
//! - `visitor` - `visit_each_child`, the structural rebuild primitive
//! - `source_file` - one compilation unit
//! - `builder` - statement-level construction helpers

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, is_identifier_text};

pub mod syntax_kind_ext;

pub mod flags;
pub use flags::node_flags;

pub mod node;
pub use node::{Node, NodeAccess, NodeArena};

mod node_arena;

pub mod visitor;
pub use visitor::visit_each_child;

pub mod source_file;
pub use source_file::SourceFile;

pub mod builder;
pub use builder::AstBuilder;

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod node_tests;
