//! Integration tests for cross-checking the codegen registry against a runtime registry

use pretty_assertions::assert_eq;

use redesign_codegen::template::{builtin, check_registry_drift, RegistryDrift};
use redesign_codegen::TemplateRegistry;

fn runtime() -> TemplateRegistry {
    TemplateRegistry::from_toml_str(include_str!("fixtures/runtime-registry.toml"))
        .expect("fixture parses")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_runtime_fixture_variant_drift() {
    let drift = check_registry_drift(builtin(), &runtime());

    assert!(drift.contains(&RegistryDrift::VariantMismatch {
        section: "hero".to_string(),
        codegen: strings(&["centered", "split", "background-image", "minimal"]),
        runtime: strings(&["centered", "split", "minimal"]),
    }));
    assert!(!drift.iter().any(|d| d.section() == "footer"));
}

#[test]
fn test_runtime_fixture_missing_sections() {
    let drift = check_registry_drift(builtin(), &runtime());

    let missing: Vec<&str> = drift
        .iter()
        .filter(|d| matches!(d, RegistryDrift::MissingAtRuntime { .. }))
        .map(|d| d.section())
        .collect();
    let expected: Vec<&str> = builtin()
        .section_types()
        .filter(|s| *s != "hero" && *s != "footer")
        .collect();
    assert_eq!(missing, expected);
}

#[test]
fn test_identical_registries_have_no_drift() {
    assert!(check_registry_drift(builtin(), builtin()).is_empty());
    assert!(check_registry_drift(&runtime(), &runtime()).is_empty());
}
