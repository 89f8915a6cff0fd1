//! Resolve import specifiers to files that are part of the program.
//!
//! This is the checker's view of module resolution: it never touches the
//! file system and only answers "which program file does this specifier
//! name". Relative and absolute specifiers are joined to the importing
//! file's directory; bare specifiers are looked up in every ancestor
//! `node_modules` (and `node_modules/@types`).

use std::path::{Component, Path, PathBuf};
use tsk_common::limits::MAX_NODE_MODULES_ANCESTORS;

/// Extensions tried, in order, after a specifier without one.
pub const TS_EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".d.ts"];

/// Lexically normalize a path: drop `.` and fold `..` without touching disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Normalized program key for a file name.
pub fn file_key(file_name: &str) -> String {
    normalize_path(Path::new(file_name))
        .to_string_lossy()
        .into_owned()
}

pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Resolve `specifier` imported from `containing_file` to a program file key.
pub fn resolve_module_name<F>(specifier: &str, containing_file: &str, file_exists: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let containing_dir = Path::new(containing_file).parent().unwrap_or(Path::new(""));

    if is_relative_specifier(specifier) || Path::new(specifier).is_absolute() {
        let base = normalize_path(&containing_dir.join(specifier));
        return try_file_or_directory(&base, &file_exists);
    }

    for dir in containing_dir.ancestors().take(MAX_NODE_MODULES_ANCESTORS) {
        for prefix in ["node_modules", "node_modules/@types"] {
            let base = normalize_path(&dir.join(prefix).join(specifier));
            if let Some(found) = try_file_or_directory(&base, &file_exists) {
                return Some(found);
            }
        }
    }
    None
}

fn try_file_or_directory<F>(base: &Path, file_exists: &F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    try_file(base, file_exists).or_else(|| try_file(&base.join("index"), file_exists))
}

fn try_file<F>(base: &Path, file_exists: &F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let text = base.to_string_lossy();

    if TS_EXTENSIONS.iter().any(|ext| text.ends_with(ext)) && file_exists(&text) {
        return Some(text.into_owned());
    }

    // `./foo.js` written in TypeScript source refers to `./foo.ts`.
    let stem = text
        .strip_suffix(".js")
        .or_else(|| text.strip_suffix(".jsx"))
        .unwrap_or(&text[..]);

    TS_EXTENSIONS
        .iter()
        .map(|ext| format!("{stem}{ext}"))
        .find(|candidate| file_exists(candidate))
}
