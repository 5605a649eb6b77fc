//! JSX source generation from a render plan

use std::collections::BTreeSet;

use serde_json::Value;

use crate::plan::RenderPlanItem;

use super::canonical::to_canonical_json;
use super::EmitConfig;

/// Indentation of section elements inside the page fragment
const SECTION_INDENT: &str = "      ";

/// One import line per distinct component, sorted by name.
///
/// Depends only on the set of component names, never on render order.
pub fn generate_imports(items: &[RenderPlanItem], config: &EmitConfig) -> String {
    let names: BTreeSet<&str> = items.iter().map(|i| i.component_name.as_str()).collect();
    names
        .into_iter()
        .map(|name| format!("import {} from \"{}/{}\";", name, config.import_prefix, name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One self-closing element per item, in render order.
///
/// Props are spread from their canonical encoding. Lines after the first carry the
/// section indentation so the element nests correctly inside the page component.
pub fn generate_jsx(items: &[RenderPlanItem]) -> Vec<String> {
    items.iter().map(section_element).collect()
}

fn section_element(item: &RenderPlanItem) -> String {
    let props = to_canonical_json(&Value::Object(item.props.clone()));
    let props = props.replace('\n', &format!("\n{}", SECTION_INDENT));
    format!(
        "<{} variant=\"{}\" {{...{}}} />",
        item.component_name, item.variant, props
    )
}

/// Assemble the complete page component source.
///
/// Layout: imports, a blank line, the page function returning every section inside a
/// fragment, a blank line, the default export. Always ends with a newline.
pub fn generate_app_component(items: &[RenderPlanItem], config: &EmitConfig) -> String {
    let mut out = String::new();

    let imports = generate_imports(items, config);
    if !imports.is_empty() {
        out.push_str(&imports);
        out.push_str("\n\n");
    }

    out.push_str(&format!("function {}() {{\n", config.component_name));
    out.push_str("  return (\n");
    out.push_str("    <>\n");
    for element in generate_jsx(items) {
        out.push_str(SECTION_INDENT);
        out.push_str(&element);
        out.push('\n');
    }
    out.push_str("    </>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out.push('\n');
    out.push_str(&format!("export default {};\n", config.component_name));

    out
}
