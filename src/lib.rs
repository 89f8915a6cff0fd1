//! tskeys: compile-time `keys<T>()` / `typeMembers<T>()` for TypeScript trees.
//!
//! The workspace is split the same way a compiler pipeline is:
//!
//! - [`tsk_ast`] - arena syntax trees and the copy-on-write visitor
//! - [`tsk_checker`] - the `Program` type oracle built from a set of files
//! - [`tsk_transform`] - the marker rewrite pass
//! - [`tsk_emitter`] - printing trees back to TypeScript text
//! - [`tsk_common`] - limits and tracing setup
//!
//! This crate ties them together for hosts that just want text out:
//!
//! ```ignore
//! let config = TransformerConfig::load("tskeys.json")?;
//! for emitted in tskeys::emit_program(files, &config, CheckerOptions::default()) {
//!     std::fs::write(out_dir.join(&emitted.file_name), emitted.text)?;
//! }
//! ```

pub use tsk_ast as ast;
pub use tsk_checker as checker;
pub use tsk_common as common;
pub use tsk_emitter as emitter;
pub use tsk_transform as transform;

pub use tsk_ast::{AstBuilder, NodeIndex, SourceFile};
pub use tsk_checker::{CheckerOptions, Program, TypeOracle};
pub use tsk_common::init_tracing;
pub use tsk_emitter::print_source_file;
pub use tsk_transform::{KeysTransformer, MarkerModule, TransformerConfig, transformer};

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info_span};

/// Printed output for one input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedFile {
    pub file_name: String,
    pub text: String,
}

/// Check `files` as one program, rewrite every non-declaration file and print
/// it. Declaration files take part in checking but produce no output.
pub fn emit_program(
    mut files: Vec<SourceFile>,
    config: &TransformerConfig,
    options: CheckerOptions,
) -> Vec<EmittedFile> {
    let _span = info_span!("emit_program", files = files.len()).entered();
    let program = {
        let refs: Vec<&SourceFile> = files.iter().collect();
        Program::with_options(&refs, options)
    };
    let transformer = KeysTransformer::new(&program, config);

    files
        .iter_mut()
        .filter(|file| !file.is_declaration_file())
        .map(|file| {
            transformer.transform_source_file(file);
            let text = print_source_file(file);
            debug!(file = %file.file_name, bytes = text.len(), "[emit] printed");
            EmittedFile {
                file_name: file.file_name.clone(),
                text,
            }
        })
        .collect()
}

/// `emit_program` with the transformer config read from a JSON file.
pub fn emit_program_with_config_file(
    files: Vec<SourceFile>,
    config_path: impl AsRef<Path>,
    options: CheckerOptions,
) -> Result<Vec<EmittedFile>> {
    let config = TransformerConfig::load(config_path)?;
    Ok(emit_program(files, &config, options))
}
