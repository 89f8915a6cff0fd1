//! Specifier resolution against real directory trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tsk_transform::{ModuleIdentityResolver, ResolutionFailure, ResolutionOptions};

/// Temp project with `node_modules/tskeys-marker/{index.js,index.d.ts}` and
/// an empty `src/` directory. Paths are canonical so assertions can compare
/// against them directly.
struct Project {
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    fn new() -> Project {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonical tempdir");
        let project = Project { _dir: dir, root };
        project.write("node_modules/tskeys-marker/index.js", "module.exports = {};\n");
        project.write(
            "node_modules/tskeys-marker/index.d.ts",
            "export declare function keys<T>(): string[];\n",
        );
        fs::create_dir_all(project.root.join("src")).expect("src dir");
        project
    }

    fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent dir");
        }
        fs::write(&path, content).expect("write file");
        path
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn app(&self) -> PathBuf {
        self.path("src/app.ts")
    }
}

fn resolver() -> ModuleIdentityResolver {
    ModuleIdentityResolver::new(ResolutionOptions::default())
}

#[test]
fn test_bare_specifier_resolves_package_index() {
    let project = Project::new();
    let resolved = resolver()
        .resolve_import("tskeys-marker", &project.app())
        .expect("resolved");
    assert_eq!(resolved, project.path("node_modules/tskeys-marker/index.js"));
}

#[test]
fn test_bare_specifier_walks_up_from_nested_directories() {
    let project = Project::new();
    let nested = project.path("src/deep/er/file.ts");
    let resolved = resolver()
        .resolve_import("tskeys-marker", &nested)
        .expect("resolved");
    assert_eq!(resolved, project.path("node_modules/tskeys-marker/index.js"));
}

#[test]
fn test_nearest_node_modules_wins() {
    let project = Project::new();
    let inner = project.write("src/node_modules/tskeys-marker/index.js", "");
    let resolved = resolver()
        .resolve_import("tskeys-marker", &project.app())
        .expect("resolved");
    assert_eq!(resolved, inner);
}

#[test]
fn test_package_json_main_is_followed() {
    let project = Project::new();
    project.write(
        "node_modules/tskeys-marker/package.json",
        r#"{ "name": "tskeys-marker", "main": "lib/entry" }"#,
    );
    let entry = project.write("node_modules/tskeys-marker/lib/entry.js", "");
    let resolved = resolver()
        .resolve_import("tskeys-marker", &project.app())
        .expect("resolved");
    assert_eq!(resolved, entry);
}

#[test]
fn test_package_json_without_main_falls_back_to_index() {
    let project = Project::new();
    project.write("node_modules/tskeys-marker/package.json", r#"{ "name": "tskeys-marker" }"#);
    let resolved = resolver()
        .resolve_import("tskeys-marker", &project.app())
        .expect("resolved");
    assert_eq!(resolved, project.path("node_modules/tskeys-marker/index.js"));
}

#[test]
fn test_invalid_package_json_is_reported() {
    let project = Project::new();
    project.write("node_modules/tskeys-marker/package.json", "{ not json");
    let failure = resolver()
        .resolve_import("tskeys-marker", &project.app())
        .unwrap_err();
    assert!(matches!(failure, ResolutionFailure::InvalidPackageJson { .. }));
}

#[test]
fn test_relative_specifiers() {
    let project = Project::new();
    let resolver = resolver();
    let app = project.app();

    // Direct file path, extension appended, directory index.
    let by_path = resolver
        .resolve_import("../node_modules/tskeys-marker/index.js", &app)
        .expect("file path");
    let by_stem = resolver
        .resolve_import("../node_modules/tskeys-marker/index", &app)
        .expect("stem");
    let by_dir = resolver
        .resolve_import("../node_modules/tskeys-marker", &app)
        .expect("directory");

    let expected = project.path("node_modules/tskeys-marker/index.js");
    assert_eq!(by_path, expected);
    assert_eq!(by_stem, expected);
    assert_eq!(by_dir, expected);
}

#[test]
fn test_subpath_of_package_is_a_different_file() {
    let project = Project::new();
    let other = project.write("node_modules/tskeys-marker/other.js", "");
    let resolved = resolver()
        .resolve_import("tskeys-marker/other", &project.app())
        .expect("resolved");
    assert_eq!(resolved, other);
    assert_ne!(resolved, project.path("node_modules/tskeys-marker/index.js"));
}

#[test]
fn test_missing_module_is_not_found() {
    let project = Project::new();
    let failure = resolver()
        .resolve_import("no-such-package", &project.app())
        .unwrap_err();
    assert!(failure.is_not_found());
    assert!(failure.to_string().contains("no-such-package"));

    let failure = resolver()
        .resolve_import("./missing", &project.app())
        .unwrap_err();
    assert!(failure.is_not_found());
}

#[test]
fn test_custom_extensions() {
    let project = Project::new();
    let mjs = project.write("src/util.mjs", "");
    let options = ResolutionOptions {
        extensions: vec![".mjs".to_string()],
        ..ResolutionOptions::default()
    };
    let resolved = ModuleIdentityResolver::new(options)
        .resolve_import("./util", &project.app())
        .expect("resolved");
    assert_eq!(resolved, mjs);

    // The default list does not know `.mjs`.
    assert!(resolver().resolve_import("./util", &project.app()).is_err());
}

#[test]
fn test_resolve_file_requires_existing_file() {
    let project = Project::new();
    let resolver = resolver();
    let declaration = project.path("node_modules/tskeys-marker/index.d.ts");
    assert_eq!(resolver.resolve_file(&declaration).expect("exists"), declaration);

    let missing = resolver
        .resolve_file(&project.path("node_modules/tskeys-marker/gone.d.ts"))
        .unwrap_err();
    assert!(missing.is_not_found());

    // A directory is not a declaration file.
    assert!(resolver.resolve_file(&project.path("node_modules")).is_err());
}

#[cfg(unix)]
#[test]
fn test_symlinked_package_resolves_to_target() {
    let project = Project::new();
    let store = project.path("store/tskeys-marker");
    fs::create_dir_all(&store).expect("store dir");
    let target_js = project.write("store/tskeys-marker/index.js", "");
    let target_dts = project.write("store/tskeys-marker/index.d.ts", "");
    let app_root = project.path("app");
    fs::create_dir_all(app_root.join("node_modules")).expect("node_modules");
    std::os::unix::fs::symlink(&store, app_root.join("node_modules/tskeys-marker"))
        .expect("symlink");

    let resolver = resolver();
    let resolved = resolver
        .resolve_import("tskeys-marker", &app_root.join("main.ts"))
        .expect("resolved");
    assert_eq!(resolved, target_js);

    let linked_dts = app_root.join("node_modules/tskeys-marker/index.d.ts");
    assert_eq!(resolver.resolve_file(&linked_dts).expect("resolved"), target_dts);
    assert_ne!(linked_dts, target_dts);
}

#[test]
fn test_importing_file_need_not_exist() {
    let project = Project::new();
    let ghost = Path::new(&project.root).join("src/never/written.ts");
    assert!(
        resolver()
            .resolve_import("tskeys-marker", &ghost)
            .is_ok()
    );
}
