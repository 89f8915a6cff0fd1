//! Source printer for tskeys syntax trees.
//!
//! Renders a (possibly rewritten) tree back to TypeScript text: four-space
//! indentation, double-quoted strings, one statement per line.

mod printer;
pub use printer::{Printer, print_source_file};

mod helpers;
