//! Redesign plan validation and render plan construction
//!
//! A [`RedesignPlan`] arrives from the planning step as JSON. The builder checks it
//! against a [`TemplateRegistry`](crate::template::TemplateRegistry) and, if every
//! section is well-formed, returns the ordered [`RenderPlanItem`]s.
//!
//! # Example
//!
//! ```rust
//! use redesign_codegen::plan::build_render_plan_from_values;
//! use redesign_codegen::template::builtin;
//! use serde_json::json;
//!
//! let plan = json!({
//!     "sectionOrdering": ["hero"],
//!     "sectionProps": { "hero": { "headline": "Welcome" } }
//! });
//! let items = build_render_plan_from_values(&plan, &json!({}), builtin()).unwrap();
//! assert_eq!(items[0].component_name, "HeroSection");
//! ```

mod builder;
mod types;
mod validate;

pub use builder::{build_render_plan, build_render_plan_from_values, extract_props, PropsSource};
pub use types::{ComponentMapping, PageAnalysis, Props, RedesignPlan, RenderPlanItem};
pub use validate::{
    validate_layout_variant_keys, validate_required_props, validate_section_ordering,
    validate_section_type, validate_variant,
};
