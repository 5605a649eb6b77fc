//! Template registry: section type -> component, variants, required props

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or constructing a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("registry defines no sections")]
    Empty,

    #[error("section '{section}' is defined more than once")]
    DuplicateSection { section: String },

    #[error("section '{section}' declares no variants")]
    NoVariants { section: String },

    #[error("section '{section}' lists variant '{variant}' more than once")]
    DuplicateVariant { section: String, variant: String },

    #[error("section '{section}' has invalid variant name '{variant}' (allowed: letters, digits, '-', '_')")]
    InvalidVariantName { section: String, variant: String },

    #[error("section '{section}' has invalid component name '{component}' (must be a JavaScript identifier)")]
    InvalidComponentName { section: String, component: String },
}

/// One registry row. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRegistryEntry {
    section_type: String,
    component_name: String,
    variants: Vec<String>,
    default_variant: String,
    required_props: BTreeSet<String>,
}

impl TemplateRegistryEntry {
    /// Build an entry, deriving the default variant from the head of `variants`
    pub fn new(
        section_type: impl Into<String>,
        component_name: impl Into<String>,
        variants: Vec<String>,
        required_props: impl IntoIterator<Item = String>,
    ) -> Result<Self, RegistryError> {
        let section_type = section_type.into();
        let component_name = component_name.into();

        if !is_js_identifier(&component_name) {
            return Err(RegistryError::InvalidComponentName {
                section: section_type,
                component: component_name,
            });
        }

        let default_variant = match variants.first() {
            Some(v) => v.clone(),
            None => {
                return Err(RegistryError::NoVariants {
                    section: section_type,
                })
            }
        };

        let mut seen = HashSet::new();
        for variant in &variants {
            if !is_variant_name(variant) {
                return Err(RegistryError::InvalidVariantName {
                    section: section_type,
                    variant: variant.clone(),
                });
            }
            if !seen.insert(variant.as_str()) {
                return Err(RegistryError::DuplicateVariant {
                    section: section_type,
                    variant: variant.clone(),
                });
            }
        }

        Ok(Self {
            section_type,
            component_name,
            variants,
            default_variant,
            required_props: required_props.into_iter().collect(),
        })
    }

    pub fn section_type(&self) -> &str {
        &self.section_type
    }

    /// Component identifier the generated code references
    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// All valid variants, default first
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn default_variant(&self) -> &str {
        &self.default_variant
    }

    pub fn required_props(&self) -> &BTreeSet<String> {
        &self.required_props
    }

    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.iter().any(|v| v == variant)
    }
}

/// Read-only table of section templates.
///
/// There is no way to add or change entries after construction; a different table
/// means building a different registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRegistry {
    entries: BTreeMap<String, TemplateRegistryEntry>,
}

/// TOML structure for deserializing registries
#[derive(Deserialize)]
struct TomlRegistry {
    sections: BTreeMap<String, TomlEntry>,
}

#[derive(Deserialize)]
struct TomlEntry {
    component: String,
    variants: Vec<String>,
    #[serde(default)]
    required_props: Vec<String>,
}

/// Built-in section templates, mirrored by the runtime component library
const BUILTIN_REGISTRY: &str = r#"
[sections.navbar]
component = "NavigationBar"
variants = ["standard", "centered", "minimal"]
required_props = ["logoText", "links"]

[sections.hero]
component = "HeroSection"
variants = ["centered", "split", "background-image", "minimal"]
required_props = ["headline"]

[sections.features]
component = "FeaturesSection"
variants = ["grid", "list", "alternating"]
required_props = ["title", "features"]

[sections.about]
component = "AboutSection"
variants = ["text-only", "image-left", "image-right"]
required_props = ["title", "body"]

[sections.stats]
component = "StatsSection"
variants = ["row", "cards"]
required_props = ["stats"]

[sections.testimonials]
component = "TestimonialsSection"
variants = ["grid", "carousel", "single"]
required_props = ["testimonials"]

[sections.pricing]
component = "PricingSection"
variants = ["columns", "table"]
required_props = ["plans"]

[sections.gallery]
component = "GallerySection"
variants = ["grid", "masonry", "carousel"]
required_props = ["images"]

[sections.faq]
component = "FaqSection"
variants = ["accordion", "two-column"]
required_props = ["items"]

[sections.cta]
component = "CallToAction"
variants = ["banner", "split", "minimal"]
required_props = ["headline", "buttonText"]

[sections.contact]
component = "ContactSection"
variants = ["form", "details", "split"]
required_props = ["title"]

[sections.footer]
component = "Footer"
variants = ["columns", "simple", "minimal"]
required_props = ["logoText", "linkGroups"]
"#;

static BUILTIN: Lazy<TemplateRegistry> = Lazy::new(|| {
    TemplateRegistry::from_toml_str(BUILTIN_REGISTRY).expect("built-in registry should be valid")
});

/// The process-wide built-in registry, parsed on first access
pub fn builtin() -> &'static TemplateRegistry {
    &BUILTIN
}

impl TemplateRegistry {
    /// Build a registry from entries; each section type may appear once
    pub fn from_entries(
        entries: impl IntoIterator<Item = TemplateRegistryEntry>,
    ) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if map.contains_key(&entry.section_type) {
                return Err(RegistryError::DuplicateSection {
                    section: entry.section_type,
                });
            }
            map.insert(entry.section_type.clone(), entry);
        }
        if map.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { entries: map })
    }

    /// Load a registry from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a registry from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, RegistryError> {
        let parsed: TomlRegistry = toml::from_str(content)?;
        let entries = parsed
            .sections
            .into_iter()
            .map(|(section_type, entry)| {
                TemplateRegistryEntry::new(
                    section_type,
                    entry.component,
                    entry.variants,
                    entry.required_props,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    /// Look up a section type
    pub fn get(&self, section_type: &str) -> Option<&TemplateRegistryEntry> {
        self.entries.get(section_type)
    }

    /// Known section types in lexicographic order
    pub fn section_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    /// Entries in section-type order
    pub fn entries(&self) -> impl Iterator<Item = &TemplateRegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub(crate) fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_variant_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
