//! Integration tests for writing generated pages

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;

use redesign_codegen::writer::{page_path, PAGE_DIR, PAGE_FILE_NAME};
use redesign_codegen::{generate_to_dir, CodegenConfig, CodegenError};

fn plan() -> serde_json::Value {
    json!({
        "sectionOrdering": ["hero", "footer"],
        "sectionProps": {
            "hero": { "headline": "Welcome" },
            "footer": { "logoText": "X", "linkGroups": [] }
        }
    })
}

#[test]
fn test_generate_to_dir_writes_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let (page, path) =
        generate_to_dir(&plan(), &json!({}), &CodegenConfig::default(), dir.path()).unwrap();

    assert_eq!(path, dir.path().join(PAGE_DIR).join(PAGE_FILE_NAME));
    assert_eq!(fs::read_to_string(&path).unwrap(), page.source);

    let top: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(top.len(), 1);
    let inner: Vec<_> = fs::read_dir(dir.path().join(PAGE_DIR)).unwrap().collect();
    assert_eq!(inner.len(), 1);
}

#[test]
fn test_generate_to_dir_twice_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let config = CodegenConfig::default();
    generate_to_dir(&plan(), &json!({}), &config, dir.path()).unwrap();
    let first = fs::read(page_path(dir.path())).unwrap();
    generate_to_dir(&plan(), &json!({}), &config, dir.path()).unwrap();
    let second = fs::read(page_path(dir.path())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_plan_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let result = generate_to_dir(
        &json!({ "sectionOrdering": ["hero", "hero"] }),
        &json!({}),
        &CodegenConfig::default(),
        dir.path(),
    );
    assert!(matches!(result, Err(CodegenError::Plan(_))));
    assert!(!dir.path().join(PAGE_DIR).exists());
}

#[test]
fn test_rewrite_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = CodegenConfig::default();
    generate_to_dir(&plan(), &json!({}), &config, dir.path()).unwrap();
    generate_to_dir(&plan(), &json!({}), &config, dir.path()).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path().join(PAGE_DIR))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec![PAGE_FILE_NAME.to_string()]);
}
