//! Packed node flags stored in `Node::flags`.

pub mod node_flags {
    /// `export` modifier on a declaration.
    pub const EXPORT: u16 = 1 << 0;
    /// `declare` modifier, or any declaration inside a `.d.ts` file.
    pub const AMBIENT: u16 = 1 << 1;
    /// `const` variable statement.
    pub const CONST: u16 = 1 << 2;
    /// `let` variable statement.
    pub const LET: u16 = 1 << 3;
    /// `?` on a property signature or parameter.
    pub const OPTIONAL: u16 = 1 << 4;
    /// `readonly` on a property signature.
    pub const READONLY: u16 = 1 << 5;
    /// `import type` / `import { type X }`.
    pub const TYPE_ONLY: u16 = 1 << 6;
    /// Node created by a transform rather than by the host.
    pub const SYNTHESIZED: u16 = 1 << 7;
    /// Print an array/object literal one element per line.
    pub const MULTI_LINE: u16 = 1 << 8;
}
