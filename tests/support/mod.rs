//! Temp-directory project with the marker package installed.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tskeys::ast::{AstBuilder, SourceFile, SyntaxKind};
use tskeys::{MarkerModule, TransformerConfig};

pub const MARKER_PACKAGE: &str = "node_modules/tskeys-marker";

pub struct Project {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Project {
    /// `node_modules/tskeys-marker/{index.js,index.d.ts}` and `src/`.
    pub fn new() -> Project {
        tskeys::init_tracing();
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical tempdir");
        let project = Project { _dir: dir, root };
        project.install_marker(MARKER_PACKAGE);
        project
    }

    pub fn install_marker(&self, package_dir: &str) {
        self.write(&format!("{package_dir}/index.js"), "module.exports = {};\n");
        self.write(
            &format!("{package_dir}/index.d.ts"),
            "export declare function keys<T>(): Array<keyof T>;\n",
        );
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(&path, content).expect("write file");
        path
    }

    pub fn path(&self, relative: &str) -> String {
        self.root.join(relative).to_string_lossy().into_owned()
    }

    pub fn config(&self) -> TransformerConfig {
        TransformerConfig::new(MarkerModule::from_package_dir(self.root.join(MARKER_PACKAGE)))
    }

    /// Source file with the marker declarations, at `<package_dir>/index.d.ts`.
    pub fn marker_source(&self, package_dir: &str) -> SourceFile {
        marker_declarations(&self.path(&format!("{package_dir}/index.d.ts")))
    }

    /// Write an empty file for `relative` (so its path canonicalizes) and
    /// return its absolute name.
    pub fn source_path(&self, relative: &str) -> String {
        self.write(relative, "");
        self.path(relative)
    }
}

pub fn marker_declarations(file_name: &str) -> SourceFile {
    let mut b = AstBuilder::new();
    let string = b.keyword(SyntaxKind::StringKeyword);
    let ret = b.arena().add_array_type(string);
    b.declare_function("keys", &["T"], ret);
    let key = b.keyword(SyntaxKind::StringKeyword);
    let value = b.keyword(SyntaxKind::StringKeyword);
    let ret = b.type_ref("Record", vec![key, value]);
    b.declare_function("typeMembers", &["T"], ret);
    b.finish(file_name)
}

/// `type T = { a: string; b: number }`
pub fn declare_t(b: &mut AstBuilder) {
    let string = b.keyword(SyntaxKind::StringKeyword);
    let a = b.property("a", string);
    let number = b.keyword(SyntaxKind::NumberKeyword);
    let b_prop = b.property("b", number);
    let literal = b.arena().add_type_literal(vec![a, b_prop]);
    b.type_alias("T", literal);
}
