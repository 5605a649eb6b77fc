//! Plan input types and the render plan output type

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{json_type_name, PlanError};

/// A flat property object. Keeps insertion order; emission sorts keys itself.
pub type Props = Map<String, Value>;

/// One entry of `componentMappings`, the fallback property source
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMapping {
    pub section_type: String,
    /// Kept as a raw value so a non-object can be reported as malformed props
    pub props: Option<Value>,
}

/// The redesign plan produced by the planning step.
///
/// Built from JSON with [`RedesignPlan::from_value`], which checks the overall shape
/// only. Referential checks against the registry belong to the builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RedesignPlan {
    /// Render order; duplicates are kept here so validation can report them
    pub section_ordering: Vec<String>,
    /// Explicit variant per section type; `None` means the key was present but null
    pub layout_variants: BTreeMap<String, Option<String>>,
    /// Highest-precedence property source, raw values per section type
    pub section_props: Option<Map<String, Value>>,
    pub component_mappings: Vec<ComponentMapping>,
}

impl RedesignPlan {
    /// Read a plan from a JSON value.
    ///
    /// Fails with `InvalidPlanShape` when the value is not an object or a substructure
    /// has the wrong type, and with `EmptyOrMalformedOrdering` when `sectionOrdering` is
    /// missing, not an array of strings, or empty.
    pub fn from_value(value: &Value) -> Result<Self, PlanError> {
        let obj = value.as_object().ok_or_else(|| {
            PlanError::invalid_shape(format!(
                "redesign plan must be an object, found {}",
                json_type_name(value)
            ))
        })?;

        let section_ordering = parse_ordering(obj.get("sectionOrdering"))?;
        let layout_variants = parse_layout_variants(obj.get("layoutVariants"))?;

        let section_props = match obj.get("sectionProps") {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map.clone()),
            Some(other) => {
                return Err(PlanError::invalid_shape(format!(
                    "sectionProps must be an object, found {}",
                    json_type_name(other)
                )))
            }
        };

        let component_mappings = parse_component_mappings(obj.get("componentMappings"))?;

        Ok(Self {
            section_ordering,
            layout_variants,
            section_props,
            component_mappings,
        })
    }

    /// The explicitly requested variant for a section type, if any
    pub fn requested_variant(&self, section_type: &str) -> Option<&str> {
        self.layout_variants
            .get(section_type)
            .and_then(|v| v.as_deref())
    }
}

fn parse_ordering(value: Option<&Value>) -> Result<Vec<String>, PlanError> {
    let items = match value {
        None | Some(Value::Null) => {
            return Err(PlanError::malformed_ordering("sectionOrdering is missing"))
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(PlanError::malformed_ordering(format!(
                "expected an array, found {}",
                json_type_name(other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(PlanError::malformed_ordering(format!(
                "entry {} is {}, expected a string",
                idx,
                json_type_name(other)
            ))),
        })
        .collect()
}

fn parse_layout_variants(
    value: Option<&Value>,
) -> Result<BTreeMap<String, Option<String>>, PlanError> {
    let map = match value {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(PlanError::invalid_shape(format!(
                "layoutVariants must be an object, found {}",
                json_type_name(other)
            )))
        }
    };

    map.iter()
        .map(|(key, variant)| match variant {
            Value::Null => Ok((key.clone(), None)),
            Value::String(s) => Ok((key.clone(), Some(s.clone()))),
            other => Err(PlanError::invalid_shape(format!(
                "layoutVariants['{}'] must be a string, found {}",
                key,
                json_type_name(other)
            ))),
        })
        .collect()
}

fn parse_component_mappings(value: Option<&Value>) -> Result<Vec<ComponentMapping>, PlanError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(PlanError::invalid_shape(format!(
                "componentMappings must be an array, found {}",
                json_type_name(other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let section_type = item
                .get("sectionType")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    PlanError::invalid_shape(format!(
                        "componentMappings[{}] must be an object with a string sectionType",
                        idx
                    ))
                })?;
            let props = match item.get("props") {
                None | Some(Value::Null) => None,
                Some(props) => Some(props.clone()),
            };
            Ok(ComponentMapping {
                section_type: section_type.to_string(),
                props,
            })
        })
        .collect()
}

/// Description of the crawled page, carried alongside the plan.
///
/// Only its shape is checked. Nothing in plan building reads its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PageAnalysis(Map<String, Value>);

impl PageAnalysis {
    pub fn from_value(value: &Value) -> Result<Self, PlanError> {
        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            other => Err(PlanError::invalid_shape(format!(
                "page analysis must be an object, found {}",
                json_type_name(other)
            ))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// One validated rendering instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlanItem {
    pub section_type: String,
    pub component_name: String,
    pub variant: String,
    pub props: Props,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_plan() {
        let plan = RedesignPlan::from_value(&json!({
            "sectionOrdering": ["hero", "footer"],
            "layoutVariants": { "hero": "split", "footer": null },
            "sectionProps": { "hero": { "headline": "Hi" } },
            "componentMappings": [
                { "sectionType": "footer", "props": { "logoText": "X" } },
                { "sectionType": "hero" }
            ]
        }))
        .expect("Should parse");

        assert_eq!(plan.section_ordering, vec!["hero", "footer"]);
        assert_eq!(plan.requested_variant("hero"), Some("split"));
        assert_eq!(plan.requested_variant("footer"), None);
        assert!(plan.layout_variants.contains_key("footer"));
        assert_eq!(plan.component_mappings.len(), 2);
        assert_eq!(plan.component_mappings[1].props, None);
    }

    #[test]
    fn test_optional_parts_default_to_empty() {
        let plan = RedesignPlan::from_value(&json!({ "sectionOrdering": ["hero"] }))
            .expect("Should parse");
        assert!(plan.layout_variants.is_empty());
        assert!(plan.section_props.is_none());
        assert!(plan.component_mappings.is_empty());
    }

    #[test]
    fn test_null_layout_variants_is_empty() {
        let plan = RedesignPlan::from_value(&json!({
            "sectionOrdering": ["hero"],
            "layoutVariants": null
        }))
        .expect("Should parse");
        assert!(plan.layout_variants.is_empty());
    }

    #[test]
    fn test_non_object_plan_rejected() {
        for value in [json!(null), json!([]), json!("plan"), json!(3)] {
            let err = RedesignPlan::from_value(&value).unwrap_err();
            assert!(matches!(err, PlanError::InvalidPlanShape { .. }), "{:?}", value);
        }
    }

    #[test]
    fn test_missing_or_malformed_ordering() {
        let cases = [
            json!({}),
            json!({ "sectionOrdering": null }),
            json!({ "sectionOrdering": "hero" }),
            json!({ "sectionOrdering": ["hero", 7] }),
        ];
        for value in cases {
            let err = RedesignPlan::from_value(&value).unwrap_err();
            assert!(
                matches!(err, PlanError::EmptyOrMalformedOrdering { .. }),
                "{:?} gave {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_non_string_variant_rejected() {
        let err = RedesignPlan::from_value(&json!({
            "sectionOrdering": ["hero"],
            "layoutVariants": { "hero": 2 }
        }))
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidPlanShape { .. }));
        assert!(err.to_string().contains("layoutVariants['hero']"));
    }

    #[test]
    fn test_mapping_without_section_type_rejected() {
        let err = RedesignPlan::from_value(&json!({
            "sectionOrdering": ["hero"],
            "componentMappings": [{ "props": {} }]
        }))
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidPlanShape { .. }));
    }

    #[test]
    fn test_page_analysis_must_be_object() {
        assert!(PageAnalysis::from_value(&json!({ "title": "Acme" })).is_ok());
        let err = PageAnalysis::from_value(&json!(null)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidPlanShape { .. }));
    }

    #[test]
    fn test_render_plan_item_serializes_camel_case() {
        let item = RenderPlanItem {
            section_type: "hero".to_string(),
            component_name: "HeroSection".to_string(),
            variant: "centered".to_string(),
            props: Props::new(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["sectionType"], "hero");
        assert_eq!(value["componentName"], "HeroSection");
    }
}
