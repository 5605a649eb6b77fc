//! Code emitter for generating page source from a render plan
//!
//! All functions here are pure: the same render plan always produces the same text.

pub mod canonical;
pub mod config;
pub mod jsx;

pub use canonical::to_canonical_json;
pub use config::{EmitConfig, EmitConfigError};
pub use jsx::{generate_app_component, generate_imports, generate_jsx};
