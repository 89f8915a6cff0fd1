//! Type-checking oracle for tskeys.
//!
//! A `Program` is built once per compilation from every source file taking
//! part in it. Construction binds top-level declarations, resolves imports
//! between the files, and records, for every call expression and every type
//! node in a type position, the resolved signature and semantic type. After
//! that the `Program` is immutable and only answers queries through the
//! `TypeOracle` trait.
//!
//! # Modules
//!
//! - `types` / `declarations` - semantic types, property symbols, declaration sites
//! - `interner` - structural type interning
//! - `binder` - per-scope symbol tables
//! - `module_lookup` - import specifier to program file resolution
//! - `checker` - the construction pass
//! - `program` - the finished oracle
//! - `type_printer` - `typeToString`-style rendering

pub mod types;
pub use types::{FunctionShape, LiteralValue, ObjectShape, ParamInfo, PropertySymbol, TypeData, TypeId};

pub mod declarations;
pub use declarations::{DeclId, DeclarationInfo, DeclarationKind, ResolvedSignature};

pub mod interner;
pub use interner::TypeInterner;

pub mod binder;

pub mod module_lookup;

mod checker;

pub mod oracle;
pub use oracle::TypeOracle;

pub mod program;
pub use program::{CheckerOptions, Program};

pub mod type_printer;
pub use type_printer::TypePrinter;
