//! Transformer configuration.
//!
//! ```json
//! {
//!   "markerModule": {
//!     "implementation": "node_modules/tskeys-marker/index.js",
//!     "declaration": "node_modules/tskeys-marker/index.d.ts"
//!   },
//!   "resolution": { "extensions": [".js", ".json", ".node"] }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the marker functions live.
///
/// `implementation` is what runtime imports resolve to; `declaration` is the
/// file the checker reports as the declaration site of `keys` and
/// `typeMembers`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerModule {
    pub implementation: PathBuf,
    pub declaration: PathBuf,
}

impl MarkerModule {
    pub fn new(implementation: impl Into<PathBuf>, declaration: impl Into<PathBuf>) -> Self {
        MarkerModule {
            implementation: implementation.into(),
            declaration: declaration.into(),
        }
    }

    /// `dir/index.js` + `dir/index.d.ts`
    pub fn from_package_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        MarkerModule::new(dir.join("index.js"), dir.join("index.d.ts"))
    }

    /// Both paths with symlinks resolved. A path that cannot be canonicalized
    /// (missing file, permissions) is kept as given.
    pub fn canonicalized(&self) -> MarkerModule {
        MarkerModule {
            implementation: canonicalize_or_keep(&self.implementation),
            declaration: canonicalize_or_keep(&self.declaration),
        }
    }

    fn resolve_against(&mut self, base: &Path) {
        if self.implementation.is_relative() {
            self.implementation = base.join(&self.implementation);
        }
        if self.declaration.is_relative() {
            self.declaration = base.join(&self.declaration);
        }
    }
}

fn canonicalize_or_keep(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "[keys] marker path kept as given");
            path.to_path_buf()
        }
    }
}

/// How module specifiers are turned into files, following Node's loader.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolutionOptions {
    /// Suffixes appended to a specifier that does not name a file as-is.
    pub extensions: Vec<String>,
    /// File stems tried inside a directory.
    pub index_names: Vec<String>,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        ResolutionOptions {
            extensions: [".js", ".json", ".node"].map(String::from).to_vec(),
            index_names: vec!["index".to_string()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformerConfig {
    pub marker_module: MarkerModule,
    #[serde(default)]
    pub resolution: ResolutionOptions,
}

impl TransformerConfig {
    pub fn new(marker_module: MarkerModule) -> Self {
        TransformerConfig {
            marker_module,
            resolution: ResolutionOptions::default(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid transformer config")
    }

    /// Read a JSON config file. Relative marker paths are taken relative to
    /// the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transformer config {}", path.display()))?;
        let mut config = Self::from_json_str(&text)
            .with_context(|| format!("failed to load transformer config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.marker_module.resolve_against(base);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_package_dir() {
        let marker = MarkerModule::from_package_dir("/m/pkg");
        assert_eq!(marker.implementation, Path::new("/m/pkg/index.js"));
        assert_eq!(marker.declaration, Path::new("/m/pkg/index.d.ts"));
    }

    #[test]
    fn test_json_defaults_resolution() {
        let config = TransformerConfig::from_json_str(
            r#"{ "markerModule": { "implementation": "/a/index.js", "declaration": "/a/index.d.ts" } }"#,
        )
        .expect("config");
        assert_eq!(config.resolution, ResolutionOptions::default());
        assert_eq!(config.marker_module, MarkerModule::from_package_dir("/a"));
    }

    #[test]
    fn test_json_overrides_extensions() {
        let config = TransformerConfig::from_json_str(
            r#"{
                "markerModule": { "implementation": "/a/index.mjs", "declaration": "/a/index.d.mts" },
                "resolution": { "extensions": [".mjs"] }
            }"#,
        )
        .expect("config");
        assert_eq!(config.resolution.extensions, [".mjs"]);
        assert_eq!(config.resolution.index_names, ["index"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = TransformerConfig::from_json_str("{ \"markerModule\": 3 }").unwrap_err();
        assert!(err.to_string().contains("invalid transformer config"));
    }

    #[test]
    fn test_canonicalized_keeps_missing_paths() {
        let marker = MarkerModule::from_package_dir("/definitely/not/here");
        assert_eq!(marker.canonicalized(), marker);
    }
}
