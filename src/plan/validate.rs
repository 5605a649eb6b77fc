//! Structural checks on a redesign plan
//!
//! Each check is independent and pure. Checks that can find several violations at once
//! (duplicates, missing props, stray layout keys) collect all of them before failing.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde_json::Value;

use crate::error::{json_type_name, PlanError};
use crate::template::{TemplateRegistry, TemplateRegistryEntry};

use super::types::Props;

/// Ordering must be non-empty and name each section type at most once.
///
/// Duplicates are reported in order of first repetition, each named once.
pub fn validate_section_ordering(ordering: &[String]) -> Result<(), PlanError> {
    if ordering.is_empty() {
        return Err(PlanError::malformed_ordering("sectionOrdering is empty"));
    }

    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for section_type in ordering {
        if !seen.insert(section_type.as_str()) && !duplicates.contains(section_type) {
            duplicates.push(section_type.clone());
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(PlanError::DuplicateSectionType { duplicates })
    }
}

/// Look up a section type, failing with the list of known types
pub fn validate_section_type<'r>(
    section_type: &str,
    registry: &'r TemplateRegistry,
) -> Result<&'r TemplateRegistryEntry, PlanError> {
    let entry = if section_type.is_empty() {
        None
    } else {
        registry.get(section_type)
    };

    entry.ok_or_else(|| PlanError::UnknownSectionType {
        section_type: section_type.to_string(),
        known: registry.section_types().map(str::to_string).collect(),
    })
}

/// Strict variant check used for code generation.
///
/// An absent variant resolves to the entry's default. A supplied variant must be listed
/// by the entry; there is no fallback.
pub fn validate_variant<'e>(
    section_type: &str,
    requested: Option<&str>,
    entry: &'e TemplateRegistryEntry,
) -> Result<&'e str, PlanError> {
    let Some(requested) = requested else {
        return Ok(entry.default_variant());
    };

    entry
        .variants()
        .iter()
        .find(|v| v.as_str() == requested)
        .map(String::as_str)
        .ok_or_else(|| PlanError::InvalidVariant {
            section_type: section_type.to_string(),
            requested: requested.to_string(),
            valid: entry.variants().to_vec(),
            default: entry.default_variant().to_string(),
        })
}

/// Props must be an object holding a non-null value for every required key.
///
/// Reports every missing key together with the keys that were provided.
pub fn validate_required_props<'p>(
    section_type: &str,
    props: &'p Value,
    required: &BTreeSet<String>,
) -> Result<&'p Props, PlanError> {
    let map = props.as_object().ok_or_else(|| PlanError::MalformedProps {
        section_type: section_type.to_string(),
        found: json_type_name(props).to_string(),
    })?;

    let missing: Vec<String> = required
        .iter()
        .filter(|key| map.get(key.as_str()).map_or(true, Value::is_null))
        .cloned()
        .collect();

    if missing.is_empty() {
        return Ok(map);
    }

    let mut provided: Vec<String> = map.keys().cloned().collect();
    provided.sort();
    Err(PlanError::MissingRequiredProps {
        section_type: section_type.to_string(),
        missing,
        provided,
    })
}

/// Every `layoutVariants` key must name a section in the ordering
pub fn validate_layout_variant_keys(
    layout_variants: &BTreeMap<String, Option<String>>,
    ordering: &[String],
) -> Result<(), PlanError> {
    let ordered: HashSet<&str> = ordering.iter().map(String::as_str).collect();
    let keys: Vec<String> = layout_variants
        .keys()
        .filter(|key| !ordered.contains(key.as_str()))
        .cloned()
        .collect();

    if keys.is_empty() {
        Ok(())
    } else {
        Err(PlanError::UnknownLayoutVariantKey { keys })
    }
}
