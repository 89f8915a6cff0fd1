//! Compile-time rewriting of `keys<T>()` / `typeMembers<T>()`.
//!
//! The marker module declares two generic functions that have no useful
//! runtime behaviour. This crate replaces every genuine call to them with a
//! literal computed from the type argument, and removes imports of the marker
//! module so nothing references it at runtime:
//!
//! ```typescript
//! import { keys, typeMembers } from "tskeys-marker"; // erased
//! interface Props { a: string; b?: number }
//! keys<Props>();        // ["a", "b"]
//! typeMembers<Props>(); // { a: "string", b: "number" }
//! ```
//!
//! A call is only rewritten when the oracle resolves it to the marker
//! declaration file itself; a local function that happens to be called
//! `keys` is left alone.
//!
//! # Pieces
//!
//! - `walker` - pre-order, copy-on-write tree fold
//! - `rewriter` - per-node decision (erase / replace / keep)
//! - `call_identity` - is this call really a marker call?
//! - `lowering` - type argument to array / object literal
//! - `module_identity` - Node-style specifier resolution to canonical paths
//! - `config` - marker module location and resolution options

pub mod config;
pub use config::{MarkerModule, ResolutionOptions, TransformerConfig};

pub mod module_identity;
pub use module_identity::{ModuleIdentityResolver, ResolutionFailure};

pub mod call_identity;
pub use call_identity::MarkerKind;

pub mod lowering;

pub mod rewriter;
pub use rewriter::{NodeRewriter, Rewrite};

pub mod walker;

mod transformer;
pub use transformer::{KeysTransformer, transformer};
