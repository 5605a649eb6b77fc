//! Redesign Codegen - turns a page redesign plan into front-end source
//!
//! This library validates a redesign plan against a registry of section templates,
//! builds an ordered render plan, and emits the source of a single page component.
//!
//! # Example
//!
//! ```rust
//! use redesign_codegen::generate;
//! use serde_json::json;
//!
//! let plan = json!({
//!     "sectionOrdering": ["hero", "footer"],
//!     "sectionProps": {
//!         "hero": { "headline": "Welcome" },
//!         "footer": { "logoText": "Acme", "linkGroups": [] }
//!     }
//! });
//!
//! let page = generate(&plan, &json!({})).unwrap();
//! assert_eq!(page.items.len(), 2);
//! assert!(page.source.contains("<HeroSection variant=\"centered\""));
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod logging;
pub mod plan;
pub mod template;
pub mod writer;

pub use config::{ConfigError, ProjectConfig};
pub use emitter::{
    generate_app_component, generate_imports, generate_jsx, EmitConfig, EmitConfigError,
};
pub use error::{ErrorKind, PlanError, PlanSourceError};
pub use plan::{build_render_plan, build_render_plan_from_values, RedesignPlan, RenderPlanItem};
pub use template::{RegistryError, TemplateRegistry};
pub use writer::{write_page, WriteError};

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur anywhere in the pipeline
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The plan failed validation
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// The plan text is not valid JSON
    #[error(transparent)]
    Source(#[from] PlanSourceError),

    #[error("emit config error: {0}")]
    Emit(#[from] EmitConfigError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("output error: {0}")]
    Write(#[from] WriteError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration for the complete pipeline
#[derive(Debug, Clone, Default)]
pub struct CodegenConfig {
    /// Emission settings
    pub emit: EmitConfig,
    /// Registry to validate against; the built-in one when unset
    pub registry: Option<TemplateRegistry>,
}

impl CodegenConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emission configuration
    pub fn with_emit(mut self, emit: EmitConfig) -> Self {
        self.emit = emit;
        self
    }

    /// Validate against a specific registry instead of the built-in one
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The registry in effect
    pub fn registry(&self) -> &TemplateRegistry {
        self.registry.as_ref().unwrap_or_else(|| template::builtin())
    }
}

/// Output of one successful generation
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    /// The validated render plan, in render order
    pub items: Vec<RenderPlanItem>,
    /// Page component source
    pub source: String,
}

/// Plan and optional analysis read from one JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInput {
    pub plan: Value,
    pub analysis: Option<Value>,
}

impl PlanInput {
    /// Parse plan JSON text.
    ///
    /// Accepts a bare plan or an envelope `{"plan": ..., "analysis": ...}`. An object
    /// with a `plan` key and no `sectionOrdering` key is treated as an envelope.
    pub fn parse(source: &str) -> Result<Self, PlanSourceError> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| PlanSourceError::from_json(&e, source))?;

        match value {
            Value::Object(mut obj)
                if obj.contains_key("plan") && !obj.contains_key("sectionOrdering") =>
            {
                Ok(Self {
                    plan: obj.remove("plan").unwrap_or(Value::Null),
                    analysis: obj.remove("analysis"),
                })
            }
            plan => Ok(Self {
                plan,
                analysis: None,
            }),
        }
    }
}

/// Validate a plan and emit page source with the default configuration
pub fn generate(plan: &Value, analysis: &Value) -> Result<GeneratedPage, CodegenError> {
    generate_with_config(plan, analysis, &CodegenConfig::default())
}

/// Validate a plan and emit page source
pub fn generate_with_config(
    plan: &Value,
    analysis: &Value,
    config: &CodegenConfig,
) -> Result<GeneratedPage, CodegenError> {
    let items = build_render_plan_from_values(plan, analysis, config.registry())?;
    config.emit.validate_for(&items)?;
    let source = generate_app_component(&items, &config.emit);
    Ok(GeneratedPage { items, source })
}

/// Generate and write the page under `output_root`, returning the written path
pub fn generate_to_dir(
    plan: &Value,
    analysis: &Value,
    config: &CodegenConfig,
    output_root: &Path,
) -> Result<(GeneratedPage, PathBuf), CodegenError> {
    let page = generate_with_config(plan, analysis, config)?;
    let path = write_page(&page.source, output_root)?;
    Ok((page, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn landing_plan() -> Value {
        json!({
            "sectionOrdering": ["hero", "footer"],
            "sectionProps": {
                "hero": { "headline": "Welcome" },
                "footer": { "logoText": "X", "linkGroups": [] }
            }
        })
    }

    #[test]
    fn test_generate_simple_page() {
        let page = generate(&landing_plan(), &json!({})).unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.source.starts_with("import Footer from"));
        assert!(page.source.ends_with("export default App;\n"));
    }

    #[test]
    fn test_generate_validation_error() {
        let result = generate(&json!({ "sectionOrdering": [] }), &json!({}));
        match result {
            Err(CodegenError::Plan(err)) => {
                assert_eq!(err.kind(), ErrorKind::EmptyOrMalformedOrdering)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_custom_registry() {
        let registry = TemplateRegistry::from_toml_str(
            r#"
[sections.hero]
component = "Masthead"
variants = ["tall"]
"#,
        )
        .unwrap();
        let config = CodegenConfig::new().with_registry(registry);
        let page =
            generate_with_config(&json!({ "sectionOrdering": ["hero"] }), &json!({}), &config)
                .unwrap();
        assert_eq!(page.items[0].component_name, "Masthead");
        assert!(page.source.contains("<Masthead variant=\"tall\" {...{}} />"));
    }

    #[test]
    fn test_page_name_colliding_with_section_rejected() {
        let config =
            CodegenConfig::new().with_emit(EmitConfig::new().with_component_name("Footer"));
        let result = generate_with_config(&landing_plan(), &json!({}), &config);
        assert!(matches!(
            result,
            Err(CodegenError::Emit(EmitConfigError::ComponentNameCollision(_)))
        ));
    }

    #[test]
    fn test_invalid_page_name_rejected() {
        let config =
            CodegenConfig::new().with_emit(EmitConfig::new().with_component_name("landing-page"));
        let result = generate_with_config(&landing_plan(), &json!({}), &config);
        assert!(matches!(
            result,
            Err(CodegenError::Emit(EmitConfigError::InvalidComponentName(_)))
        ));
    }

    #[test]
    fn test_plan_input_bare() {
        let input = PlanInput::parse(r#"{"sectionOrdering": ["hero"]}"#).unwrap();
        assert_eq!(input.plan["sectionOrdering"][0], "hero");
        assert!(input.analysis.is_none());
    }

    #[test]
    fn test_plan_input_envelope() {
        let input = PlanInput::parse(
            r#"{"plan": {"sectionOrdering": ["hero"]}, "analysis": {"title": "Acme"}}"#,
        )
        .unwrap();
        assert_eq!(input.plan["sectionOrdering"][0], "hero");
        assert_eq!(input.analysis, Some(json!({ "title": "Acme" })));
    }

    #[test]
    fn test_plan_input_syntax_error() {
        let result = PlanInput::parse("{\"sectionOrdering\": [\"hero\",]}");
        assert!(matches!(result, Err(PlanSourceError::Syntax { .. })));
    }
}
