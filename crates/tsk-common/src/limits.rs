//! Centralized limits for the tskeys workspace.
//!
//! Type resolution and type printing both recurse through user-written type
//! structure. Aliases and interfaces can refer to themselves, so every
//! recursive walk over types is bounded by one of these constants.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth when lowering a type node to a semantic type.
///
/// Hit by self-referential aliases such as
///
/// ```typescript
/// type Loop = Loop[];
/// ```
///
/// When exceeded the checker resolves the node to `any`.
pub const MAX_TYPE_RESOLUTION_DEPTH: u32 = 64;

/// Maximum number of interfaces visited while collecting inherited members.
///
/// Guards `interface A extends B {}` / `interface B extends A {}` cycles.
pub const MAX_HERITAGE_DEPTH: u32 = 32;

/// Maximum nesting depth when rendering a type as text.
///
/// Deeper structure is printed as `...`, mirroring how `typeToString`
/// truncates in the reference compiler.
pub const MAX_TYPE_PRINT_DEPTH: u32 = 16;

/// Maximum number of `node_modules` directories probed while resolving a
/// bare module specifier.
pub const MAX_NODE_MODULES_ANCESTORS: usize = 128;

// =============================================================================
// Stack Growth
// =============================================================================

/// Remaining stack below which a tree walk moves onto a fresh segment.
///
/// Syntax trees have no depth limit; every walk over nodes (binding,
/// rewriting, printing) grows the stack instead of truncating.
pub const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated once the red zone is reached.
pub const STACK_GROW_SIZE: usize = 2 * 1024 * 1024;
