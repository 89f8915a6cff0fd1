use crate::config::TransformerConfig;
use crate::rewriter::NodeRewriter;
use crate::walker;
use tracing::debug_span;
use tsk_ast::{NodeIndex, SourceFile};
use tsk_checker::TypeOracle;

/// The rewrite pass for one compilation.
///
/// Holds the oracle for the whole program; `transform_source_file` can be
/// called once per file (and again on its output, which changes nothing).
pub struct KeysTransformer<'p, O: ?Sized> {
    rewriter: NodeRewriter<'p, O>,
}

impl<'p, O> KeysTransformer<'p, O>
where
    O: TypeOracle + ?Sized,
{
    pub fn new(oracle: &'p O, config: &TransformerConfig) -> Self {
        KeysTransformer {
            rewriter: NodeRewriter::new(oracle, &config.marker_module, config.resolution.clone()),
        }
    }

    pub fn rewriter(&self) -> &NodeRewriter<'p, O> {
        &self.rewriter
    }

    /// Rewrite `file` in place and return its new root.
    pub fn transform_source_file(&self, file: &mut SourceFile) -> NodeIndex {
        let _span = debug_span!("transform_source_file", file = %file.file_name).entered();
        let file_name = file.file_name.clone();
        let root = walker::walk_root(&mut file.arena, file.root, &mut |arena, idx| {
            self.rewriter.rewrite(arena, &file_name, idx)
        });
        file.root = root;
        root
    }
}

/// Per-file transform function for `oracle`'s program. The config is copied;
/// only the oracle stays borrowed.
///
/// ```ignore
/// let program = Program::new(&files);
/// let transform = transformer(&program, &config);
/// for file in &mut files_to_emit {
///     transform(file);
/// }
/// ```
pub fn transformer<'p, O>(
    oracle: &'p O,
    config: &TransformerConfig,
) -> impl Fn(&mut SourceFile) -> NodeIndex + use<'p, O>
where
    O: TypeOracle + ?Sized,
{
    let transformer = KeysTransformer::new(oracle, config);
    move |file: &mut SourceFile| transformer.transform_source_file(file)
}
