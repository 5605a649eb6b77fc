//! Section template registry
//!
//! The registry maps each section type a plan may name to the component that renders
//! it, the layout variants that component supports, and the props it cannot render
//! without.
//!
//! # Example
//!
//! ```rust
//! use redesign_codegen::template::builtin;
//!
//! let hero = builtin().get("hero").unwrap();
//! assert_eq!(hero.component_name(), "HeroSection");
//! assert_eq!(hero.default_variant(), hero.variants()[0]);
//! ```

mod registry;
mod resolver;

pub use registry::{builtin, RegistryError, TemplateRegistry, TemplateRegistryEntry};
pub(crate) use registry::is_js_identifier;
pub use resolver::{check_registry_drift, resolve_variant_lenient, RegistryDrift};
