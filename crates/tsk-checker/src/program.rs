//! The checked program: an immutable `TypeOracle`.

use crate::checker::{self, CheckerState};
use crate::declarations::{DeclId, DeclarationInfo, ResolvedSignature};
use crate::interner::TypeInterner;
use crate::module_lookup::file_key;
use crate::oracle::TypeOracle;
use crate::type_printer::TypePrinter;
use crate::types::{ObjectShape, PropertySymbol, TypeId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tsk_ast::{NodeIndex, SourceFile};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    /// Optional properties read as `T | undefined`.
    pub strict_null_checks: bool,
}

/// Per-file facts recorded during construction, keyed by node index.
#[derive(Clone, Debug, Default)]
pub(crate) struct FileTables {
    pub signatures: FxHashMap<NodeIndex, ResolvedSignature>,
    pub type_nodes: FxHashMap<NodeIndex, TypeId>,
}

/// Semantic model of a set of source files.
///
/// Built once up front; afterwards it holds no reference to the trees it was
/// built from, so the trees can be rewritten while the program is queried.
#[derive(Clone, Debug)]
pub struct Program {
    options: CheckerOptions,
    interner: TypeInterner,
    declarations: Vec<DeclarationInfo>,
    interface_shapes: FxHashMap<TypeId, ObjectShape>,
    alias_targets: FxHashMap<TypeId, TypeId>,
    /// Declared type -> declared type `| undefined`
    optional_types: FxHashMap<TypeId, TypeId>,
    files: FxHashMap<String, FileTables>,
    file_order: Vec<String>,
}

impl Program {
    pub fn new(files: &[&SourceFile]) -> Program {
        Program::with_options(files, CheckerOptions::default())
    }

    pub fn with_options(files: &[&SourceFile], options: CheckerOptions) -> Program {
        let output = CheckerState::new(files, options).check();
        Program {
            options,
            interner: output.interner,
            declarations: output.declarations,
            interface_shapes: output.interface_shapes,
            alias_targets: output.alias_targets,
            optional_types: output.optional_types,
            files: output.files,
            file_order: output.file_order,
        }
    }

    pub fn options(&self) -> CheckerOptions {
        self.options
    }

    /// Normalized names of the files in the program, in input order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.file_order.iter().map(String::as_str)
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    /// Aliased type behind an alias instantiation.
    pub fn alias_target(&self, alias: TypeId) -> Option<TypeId> {
        self.alias_targets.get(&alias).copied()
    }

    fn tables(&self, file_name: &str) -> Option<&FileTables> {
        self.files.get(&file_key(file_name))
    }
}

impl TypeOracle for Program {
    fn resolved_signature(&self, file_name: &str, call: NodeIndex) -> Option<ResolvedSignature> {
        self.tables(file_name)?.signatures.get(&call).copied()
    }

    fn type_from_type_node(&self, file_name: &str, type_node: NodeIndex) -> Option<TypeId> {
        self.tables(file_name)?.type_nodes.get(&type_node).copied()
    }

    fn properties_of_type(&self, type_id: TypeId) -> Vec<PropertySymbol> {
        checker::collect_properties(
            &self.interner,
            &self.interface_shapes,
            &self.alias_targets,
            type_id,
        )
    }

    /// All declarations of a property share one declared type here, so
    /// `location` does not narrow the result.
    fn type_of_symbol_at_location(&self, property: &PropertySymbol, _location: DeclId) -> TypeId {
        if property.optional && self.options.strict_null_checks {
            return self
                .optional_types
                .get(&property.type_id)
                .copied()
                .unwrap_or(property.type_id);
        }
        property.type_id
    }

    fn type_to_string(&self, type_id: TypeId) -> String {
        TypePrinter::new(&self.interner).print_type(type_id)
    }

    fn declaration(&self, decl: DeclId) -> Option<&DeclarationInfo> {
        self.declarations.get(decl.0 as usize)
    }
}
