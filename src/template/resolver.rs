//! Runtime-side variant resolution and registry drift detection
//!
//! The code generator never uses [`resolve_variant_lenient`]; it validates variants
//! strictly (see [`crate::plan::validate_variant`]). The lenient path exists for
//! rendering-time consumers that prefer a default over a failure.

use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;

use super::registry::{TemplateRegistry, TemplateRegistryEntry};

/// Resolve a variant for runtime rendering, falling back to the default with a warning
/// when the requested one is unknown.
pub fn resolve_variant_lenient<'a>(
    entry: &'a TemplateRegistryEntry,
    requested: Option<&str>,
) -> &'a str {
    match requested {
        None => entry.default_variant(),
        Some(variant) => match entry.variants().iter().find(|v| v.as_str() == variant) {
            Some(found) => found.as_str(),
            None => {
                warn!(
                    section = entry.section_type(),
                    requested = variant,
                    fallback = entry.default_variant(),
                    "unknown variant, falling back to default"
                );
                entry.default_variant()
            }
        },
    }
}

/// A disagreement between the code-generation registry and the runtime registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryDrift {
    /// Section known to code generation but absent at runtime
    MissingAtRuntime { section: String },
    /// Section the runtime knows that code generation cannot emit
    MissingInCodegen { section: String },
    ComponentMismatch {
        section: String,
        codegen: String,
        runtime: String,
    },
    /// Variant lists differ, in content or in default
    VariantMismatch {
        section: String,
        codegen: Vec<String>,
        runtime: Vec<String>,
    },
    RequiredPropsMismatch {
        section: String,
        codegen: Vec<String>,
        runtime: Vec<String>,
    },
}

impl RegistryDrift {
    pub fn section(&self) -> &str {
        match self {
            RegistryDrift::MissingAtRuntime { section }
            | RegistryDrift::MissingInCodegen { section }
            | RegistryDrift::ComponentMismatch { section, .. }
            | RegistryDrift::VariantMismatch { section, .. }
            | RegistryDrift::RequiredPropsMismatch { section, .. } => section,
        }
    }
}

impl fmt::Display for RegistryDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryDrift::MissingAtRuntime { section } => {
                write!(f, "section '{}' is missing from the runtime registry", section)
            }
            RegistryDrift::MissingInCodegen { section } => {
                write!(f, "section '{}' is missing from the codegen registry", section)
            }
            RegistryDrift::ComponentMismatch {
                section,
                codegen,
                runtime,
            } => write!(
                f,
                "section '{}' maps to component '{}' in codegen but '{}' at runtime",
                section, codegen, runtime
            ),
            RegistryDrift::VariantMismatch {
                section,
                codegen,
                runtime,
            } => write!(
                f,
                "section '{}' variants differ: codegen [{}], runtime [{}]",
                section,
                codegen.join(", "),
                runtime.join(", ")
            ),
            RegistryDrift::RequiredPropsMismatch {
                section,
                codegen,
                runtime,
            } => write!(
                f,
                "section '{}' required props differ: codegen [{}], runtime [{}]",
                section,
                codegen.join(", "),
                runtime.join(", ")
            ),
        }
    }
}

/// Compare two registries that are supposed to describe the same components.
///
/// Variant lists are compared in order, so a changed default counts as drift.
/// Results are sorted by section type.
pub fn check_registry_drift(
    codegen: &TemplateRegistry,
    runtime: &TemplateRegistry,
) -> Vec<RegistryDrift> {
    let sections: BTreeSet<&str> = codegen
        .section_types()
        .chain(runtime.section_types())
        .collect();

    let mut drift = Vec::new();
    for section in sections {
        let (ours, theirs) = match (codegen.get(section), runtime.get(section)) {
            (Some(ours), Some(theirs)) => (ours, theirs),
            (Some(_), None) => {
                drift.push(RegistryDrift::MissingAtRuntime {
                    section: section.to_string(),
                });
                continue;
            }
            (None, Some(_)) => {
                drift.push(RegistryDrift::MissingInCodegen {
                    section: section.to_string(),
                });
                continue;
            }
            (None, None) => continue,
        };

        if ours.component_name() != theirs.component_name() {
            drift.push(RegistryDrift::ComponentMismatch {
                section: section.to_string(),
                codegen: ours.component_name().to_string(),
                runtime: theirs.component_name().to_string(),
            });
        }
        if ours.variants() != theirs.variants() {
            drift.push(RegistryDrift::VariantMismatch {
                section: section.to_string(),
                codegen: ours.variants().to_vec(),
                runtime: theirs.variants().to_vec(),
            });
        }
        if ours.required_props() != theirs.required_props() {
            drift.push(RegistryDrift::RequiredPropsMismatch {
                section: section.to_string(),
                codegen: ours.required_props().iter().cloned().collect(),
                runtime: theirs.required_props().iter().cloned().collect(),
            });
        }
    }
    drift
}
