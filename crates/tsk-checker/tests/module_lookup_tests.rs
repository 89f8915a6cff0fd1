use std::path::Path;
use tsk_checker::module_lookup::{file_key, is_relative_specifier, normalize_path, resolve_module_name};

fn exists_in<'a>(files: &'a [&'a str]) -> impl Fn(&str) -> bool + 'a {
    move |candidate| files.iter().any(|file| *file == candidate)
}

#[test]
fn test_normalize_path_folds_dots() {
    assert_eq!(
        normalize_path(Path::new("/a/./b/../c/d.ts")),
        Path::new("/a/c/d.ts")
    );
    assert_eq!(normalize_path(Path::new("../x.ts")), Path::new("../x.ts"));
    assert_eq!(file_key("/a/b/./c.ts"), "/a/b/c.ts");
}

#[test]
fn test_relative_specifier_detection() {
    assert!(is_relative_specifier("./a"));
    assert!(is_relative_specifier("../a"));
    assert!(is_relative_specifier("."));
    assert!(!is_relative_specifier("pkg"));
    assert!(!is_relative_specifier("@scope/pkg"));
    assert!(!is_relative_specifier(".hidden"));
}

#[test]
fn test_relative_extension_probing_order() {
    let files = ["/p/src/util.tsx", "/p/src/util.d.ts"];
    assert_eq!(
        resolve_module_name("./util", "/p/src/app.ts", exists_in(&files)).as_deref(),
        Some("/p/src/util.tsx")
    );
}

#[test]
fn test_js_specifier_maps_to_ts_source() {
    let files = ["/p/src/util.ts"];
    assert_eq!(
        resolve_module_name("./util.js", "/p/src/app.ts", exists_in(&files)).as_deref(),
        Some("/p/src/util.ts")
    );
}

#[test]
fn test_directory_index() {
    let files = ["/p/src/lib/index.ts"];
    assert_eq!(
        resolve_module_name("../src/lib", "/p/src/app.ts", exists_in(&files)).as_deref(),
        Some("/p/src/lib/index.ts")
    );
}

#[test]
fn test_bare_specifier_walks_up_node_modules() {
    let files = ["/p/node_modules/marker/index.d.ts"];
    assert_eq!(
        resolve_module_name("marker", "/p/src/deep/app.ts", exists_in(&files)).as_deref(),
        Some("/p/node_modules/marker/index.d.ts")
    );
}

#[test]
fn test_nearest_node_modules_wins() {
    let files = [
        "/p/node_modules/marker/index.d.ts",
        "/p/src/node_modules/marker/index.d.ts",
    ];
    assert_eq!(
        resolve_module_name("marker", "/p/src/app.ts", exists_in(&files)).as_deref(),
        Some("/p/src/node_modules/marker/index.d.ts")
    );
}

#[test]
fn test_types_package_fallback() {
    let files = ["/p/node_modules/@types/marker/index.d.ts"];
    assert_eq!(
        resolve_module_name("marker", "/p/app.ts", exists_in(&files)).as_deref(),
        Some("/p/node_modules/@types/marker/index.d.ts")
    );
}

#[test]
fn test_missing_module() {
    let files: [&str; 0] = [];
    assert_eq!(resolve_module_name("./nope", "/p/app.ts", exists_in(&files)), None);
    assert_eq!(resolve_module_name("nope", "/p/app.ts", exists_in(&files)), None);
}
