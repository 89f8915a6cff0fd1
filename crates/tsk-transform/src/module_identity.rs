//! Module identity: which file on disk does a specifier load?
//!
//! Mirrors Node's `require.resolve` closely enough to compare an import
//! against the marker module: relative and absolute specifiers are joined to
//! the importing file's directory, bare specifiers are looked up through the
//! `node_modules` directories above it, and the final path is canonicalized
//! so a symlinked package and its target compare equal.

use crate::config::ResolutionOptions;
use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use tsk_common::limits::MAX_NODE_MODULES_ANCESTORS;

/// Why a specifier or file could not be turned into a canonical path.
///
/// The rewriter treats every variant as "not the marker module".
#[derive(Debug)]
pub enum ResolutionFailure {
    /// Nothing on disk matched
    NotFound {
        specifier: String,
        containing_dir: PathBuf,
    },
    /// A `package.json` on the lookup path could not be read or parsed
    InvalidPackageJson { path: PathBuf, message: String },
    /// The resolved file exists but could not be canonicalized
    Canonicalize { path: PathBuf, source: io::Error },
}

impl ResolutionFailure {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionFailure::NotFound { .. })
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFailure::NotFound {
                specifier,
                containing_dir,
            } => write!(
                f,
                "cannot find module '{specifier}' from '{}'",
                containing_dir.display()
            ),
            ResolutionFailure::InvalidPackageJson { path, message } => {
                write!(f, "invalid package.json {}: {message}", path.display())
            }
            ResolutionFailure::Canonicalize { path, source } => {
                write!(f, "cannot canonicalize {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ResolutionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolutionFailure::Canonicalize { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The one `package.json` field the loader looks at.
#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    main: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ModuleIdentityResolver {
    options: ResolutionOptions,
}

impl ModuleIdentityResolver {
    pub fn new(options: ResolutionOptions) -> Self {
        ModuleIdentityResolver { options }
    }

    pub fn options(&self) -> &ResolutionOptions {
        &self.options
    }

    /// Canonical path of the module `specifier` imports from `importing_file`.
    pub fn resolve_import(
        &self,
        specifier: &str,
        importing_file: &Path,
    ) -> Result<PathBuf, ResolutionFailure> {
        let containing_dir = importing_file.parent().unwrap_or(Path::new(""));

        let found = if is_path_specifier(specifier) {
            self.resolve_path_specifier(specifier, containing_dir)?
        } else {
            self.resolve_bare_specifier(specifier, containing_dir)?
        };
        trace!(specifier, resolved = %found.display(), "[resolve] import");
        canonicalize(&found)
    }

    /// Canonical path of an existing file. Used for declaration files, which
    /// are named by path rather than by specifier.
    pub fn resolve_file(&self, path: &Path) -> Result<PathBuf, ResolutionFailure> {
        if !path.is_file() {
            return Err(ResolutionFailure::NotFound {
                specifier: path.display().to_string(),
                containing_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            });
        }
        canonicalize(path)
    }

    fn resolve_path_specifier(
        &self,
        specifier: &str,
        containing_dir: &Path,
    ) -> Result<PathBuf, ResolutionFailure> {
        let candidate = containing_dir.join(specifier);
        if let Some(found) = self.load_as_file(&candidate) {
            return Ok(found);
        }
        if let Some(found) = self.load_as_directory(&candidate)? {
            return Ok(found);
        }
        Err(ResolutionFailure::NotFound {
            specifier: specifier.to_string(),
            containing_dir: containing_dir.to_path_buf(),
        })
    }

    fn resolve_bare_specifier(
        &self,
        specifier: &str,
        containing_dir: &Path,
    ) -> Result<PathBuf, ResolutionFailure> {
        for dir in containing_dir.ancestors().take(MAX_NODE_MODULES_ANCESTORS) {
            if dir.file_name().is_some_and(|name| name == "node_modules") {
                continue;
            }
            let node_modules = dir.join("node_modules");
            if !node_modules.is_dir() {
                continue;
            }
            let candidate = node_modules.join(specifier);
            trace!(candidate = %candidate.display(), "[resolve] node_modules candidate");
            if let Some(found) = self.load_as_file(&candidate) {
                return Ok(found);
            }
            if let Some(found) = self.load_as_directory(&candidate)? {
                return Ok(found);
            }
        }
        Err(ResolutionFailure::NotFound {
            specifier: specifier.to_string(),
            containing_dir: containing_dir.to_path_buf(),
        })
    }

    /// `X`, then `X` + each extension.
    fn load_as_file(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        self.options
            .extensions
            .iter()
            .map(|ext| append_extension(path, ext))
            .find(|candidate| candidate.is_file())
    }

    /// `package.json` `main`, then the index files.
    fn load_as_directory(&self, dir: &Path) -> Result<Option<PathBuf>, ResolutionFailure> {
        if !dir.is_dir() {
            return Ok(None);
        }

        let package_json = dir.join("package.json");
        if package_json.is_file() {
            let package = read_package_json(&package_json)?;
            if let Some(main) = package.main.filter(|main| !main.is_empty()) {
                let main_path = dir.join(main);
                if let Some(found) = self.load_as_file(&main_path) {
                    return Ok(Some(found));
                }
                if let Some(found) = self.load_index(&main_path) {
                    return Ok(Some(found));
                }
            }
        }

        Ok(self.load_index(dir))
    }

    fn load_index(&self, dir: &Path) -> Option<PathBuf> {
        for name in &self.options.index_names {
            for ext in &self.options.extensions {
                let candidate = dir.join(format!("{name}{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// `./x`, `../x`, `.`, `..` and absolute paths; everything else is a package.
fn is_path_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || Path::new(specifier).is_absolute()
}

/// `foo.bar` + `.js` is `foo.bar.js`, unlike `Path::with_extension`.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut text = path.as_os_str().to_owned();
    text.push(ext);
    PathBuf::from(text)
}

fn read_package_json(path: &Path) -> Result<PackageJson, ResolutionFailure> {
    let content = std::fs::read_to_string(path).map_err(|e| ResolutionFailure::InvalidPackageJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| ResolutionFailure::InvalidPackageJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn canonicalize(path: &Path) -> Result<PathBuf, ResolutionFailure> {
    std::fs::canonicalize(path).map_err(|source| ResolutionFailure::Canonicalize {
        path: path.to_path_buf(),
        source,
    })
}
