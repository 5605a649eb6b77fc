//! Render plan construction
//!
//! Building runs in two phases. Every section is validated first; only when all of them
//! pass are the public [`RenderPlanItem`]s constructed. A failing plan yields an error and
//! nothing else.

use serde_json::Value;
use tracing::debug;

use crate::error::PlanError;
use crate::template::{TemplateRegistry, TemplateRegistryEntry};

use super::types::{PageAnalysis, Props, RedesignPlan, RenderPlanItem};
use super::validate::{
    validate_layout_variant_keys, validate_required_props, validate_section_ordering,
    validate_section_type, validate_variant,
};

/// Where a section's props came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropsSource {
    SectionProps,
    ComponentMapping,
    Empty,
}

/// A section that passed validation but has not been turned into output yet
struct ValidatedSection<'a> {
    section_type: &'a str,
    entry: &'a TemplateRegistryEntry,
    variant: &'a str,
    props: Props,
}

/// Pick the props for a section type.
///
/// `sectionProps[type]` wins outright when it is an object. Otherwise the first
/// `componentMappings` entry for the type is used as-is. The two are never merged.
pub fn extract_props(plan: &RedesignPlan, section_type: &str) -> (PropsSource, Value) {
    if let Some(props) = plan
        .section_props
        .as_ref()
        .and_then(|all| all.get(section_type))
        .filter(|props| props.is_object())
    {
        return (PropsSource::SectionProps, props.clone());
    }

    if let Some(mapping) = plan
        .component_mappings
        .iter()
        .find(|m| m.section_type == section_type)
    {
        let props = mapping
            .props
            .clone()
            .unwrap_or_else(|| Value::Object(Props::new()));
        return (PropsSource::ComponentMapping, props);
    }

    (PropsSource::Empty, Value::Object(Props::new()))
}

/// Validate a plan against the registry and produce the ordered render plan.
///
/// The page analysis is accepted for callers that carry it through the pipeline; its
/// contents never influence the result.
pub fn build_render_plan(
    plan: &RedesignPlan,
    analysis: &PageAnalysis,
    registry: &TemplateRegistry,
) -> Result<Vec<RenderPlanItem>, PlanError> {
    debug!(
        sections = plan.section_ordering.len(),
        analysis_keys = analysis.as_map().len(),
        "building render plan"
    );
    validate_section_ordering(&plan.section_ordering)?;
    validate_layout_variant_keys(&plan.layout_variants, &plan.section_ordering)?;

    let mut validated = Vec::with_capacity(plan.section_ordering.len());
    for section_type in &plan.section_ordering {
        let entry = validate_section_type(section_type, registry)?;
        let variant = validate_variant(section_type, plan.requested_variant(section_type), entry)?;
        let (source, raw_props) = extract_props(plan, section_type);
        let props = validate_required_props(section_type, &raw_props, entry.required_props())?;

        debug!(
            section = section_type.as_str(),
            component = entry.component_name(),
            variant,
            props_source = ?source,
            "validated section"
        );

        validated.push(ValidatedSection {
            section_type,
            entry,
            variant,
            props: props.clone(),
        });
    }

    Ok(validated
        .into_iter()
        .map(|section| RenderPlanItem {
            section_type: section.section_type.to_string(),
            component_name: section.entry.component_name().to_string(),
            variant: section.variant.to_string(),
            props: section.props,
        })
        .collect())
}

/// Build from raw JSON values, checking that both are objects first
pub fn build_render_plan_from_values(
    plan: &Value,
    analysis: &Value,
    registry: &TemplateRegistry,
) -> Result<Vec<RenderPlanItem>, PlanError> {
    let analysis = PageAnalysis::from_value(analysis)?;
    let plan = RedesignPlan::from_value(plan)?;
    build_render_plan(&plan, &analysis, registry)
}
