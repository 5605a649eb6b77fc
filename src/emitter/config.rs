//! Configuration for code emission

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::plan::RenderPlanItem;
use crate::template::is_js_identifier;

/// Emission settings that would produce invalid page source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitConfigError {
    #[error("page component name '{0}' is not a JavaScript identifier")]
    InvalidComponentName(String),

    #[error("page component name '{0}' collides with an imported section component")]
    ComponentNameCollision(String),

    #[error("import prefix '{0}' must be non-empty and may not contain quotes, backslashes or line breaks")]
    InvalidImportPrefix(String),
}

/// Configuration options for generated page source
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
    /// Module path that component imports are resolved against, without a trailing `/`
    #[serde(deserialize_with = "deserialize_import_prefix")]
    pub import_prefix: String,

    /// Name of the generated page component
    pub component_name: String,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            import_prefix: "./templates".to_string(),
            component_name: "App".to_string(),
        }
    }
}

impl EmitConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the import prefix (a trailing `/` is dropped)
    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = normalize_import_prefix(&prefix.into());
        self
    }

    /// Set the page component name
    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    /// Check the settings that do not depend on a render plan
    pub fn validate(&self) -> Result<(), EmitConfigError> {
        if !is_js_identifier(&self.component_name) {
            return Err(EmitConfigError::InvalidComponentName(
                self.component_name.clone(),
            ));
        }

        let prefix = &self.import_prefix;
        if prefix.is_empty() || prefix.contains(['"', '\\', '\n', '\r']) {
            return Err(EmitConfigError::InvalidImportPrefix(prefix.clone()));
        }

        Ok(())
    }

    /// Check the settings against the components a render plan imports
    pub fn validate_for(&self, items: &[RenderPlanItem]) -> Result<(), EmitConfigError> {
        self.validate()?;
        if items
            .iter()
            .any(|item| item.component_name == self.component_name)
        {
            return Err(EmitConfigError::ComponentNameCollision(
                self.component_name.clone(),
            ));
        }
        Ok(())
    }
}

fn normalize_import_prefix(prefix: &str) -> String {
    prefix.trim_end_matches('/').to_string()
}

fn deserialize_import_prefix<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let prefix = String::deserialize(deserializer)?;
    Ok(normalize_import_prefix(&prefix))
}
