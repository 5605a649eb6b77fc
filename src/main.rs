//! Redesign Codegen CLI
//!
//! Usage:
//!   redesign-codegen [OPTIONS] [PLAN]
//!
//! Options:
//!   -a, --analysis <FILE>          Page analysis JSON (passed through)
//!   -o, --out <DIR>                Output root; writes <DIR>/src/App.jsx
//!   -c, --config <FILE>            Project configuration (TOML)
//!   --registry <FILE>              Replacement template registry (TOML)
//!   --runtime-registry <FILE>      Runtime registry to check for drift
//!   --emit-plan                    Print the render plan as JSON
//!   --list-templates               Print the template registry
//!   -v, --verbose                  Raise log level (repeatable)
//!   -h, --help                     Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde_json::Value;
use tracing::{debug, warn};

use redesign_codegen::config::ProjectConfig;
use redesign_codegen::logging::{init_logging, level_for_verbosity};
use redesign_codegen::template::{builtin, check_registry_drift};
use redesign_codegen::{
    generate_with_config, write_page, CodegenConfig, CodegenError, PlanInput, TemplateRegistry,
};

/// Exit status for plans that fail validation
const EXIT_INVALID_PLAN: i32 = 2;

#[derive(Parser)]
#[command(name = "redesign-codegen")]
#[command(about = "Generate page source from a redesign plan")]
struct Cli {
    /// Plan JSON file (reads from stdin if not provided)
    plan: Option<PathBuf>,

    /// Page analysis JSON file
    #[arg(short, long)]
    analysis: Option<PathBuf>,

    /// Output root directory; the page is written to <DIR>/src/App.jsx
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Project configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Template registry file (TOML) replacing the built-in table
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Runtime registry file (TOML) to cross-check for drift
    #[arg(long)]
    runtime_registry: Option<PathBuf>,

    /// Print the render plan as JSON instead of page source
    #[arg(long)]
    emit_plan: bool,

    /// Print the template registry and exit
    #[arg(long)]
    list_templates: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let project = match &cli.config {
        Some(path) => ProjectConfig::from_file(path).unwrap_or_else(|e| fail(&e.to_string(), 1)),
        None => ProjectConfig::default(),
    };

    let logging = project
        .logging
        .clone()
        .with_level(level_for_verbosity(&project.logging.level, cli.verbose));
    if let Err(e) = init_logging(&logging) {
        eprintln!("Warning: {}", e);
    }

    let registry_path = cli.registry.clone().or_else(|| project.registry.path.clone());
    let registry = match &registry_path {
        Some(path) => load_registry(path),
        None => builtin().clone(),
    };

    let runtime_path = cli
        .runtime_registry
        .clone()
        .or_else(|| project.registry.runtime_path.clone());
    if let Some(path) = &runtime_path {
        let runtime = load_registry(path);
        let drift = check_registry_drift(&registry, &runtime);
        for d in &drift {
            warn!(section = d.section(), "registry drift: {}", d);
        }
        if !drift.is_empty() && project.registry.strict {
            for d in &drift {
                eprintln!("Registry drift: {}", d);
            }
            fail("codegen and runtime registries disagree", 1);
        }
    }

    if cli.list_templates {
        print_templates(&registry);
        return;
    }

    // If no plan file and stdin is a terminal (interactive), show usage
    if cli.plan.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let (source, source_name) = read_plan_source(cli.plan.as_deref());
    let input = match PlanInput::parse(&source) {
        Ok(input) => input,
        Err(e) => {
            eprint!("{}", e.format(&source, &source_name));
            process::exit(EXIT_INVALID_PLAN);
        }
    };

    let analysis = match &cli.analysis {
        Some(path) => read_analysis(path),
        None => input.analysis.clone().unwrap_or_else(|| Value::Object(Default::default())),
    };

    let config = CodegenConfig::new()
        .with_emit(project.emit.clone())
        .with_registry(registry);

    let page = match generate_with_config(&input.plan, &analysis, &config) {
        Ok(page) => page,
        Err(CodegenError::Plan(e)) => {
            eprintln!("error[{}]: {}", e.kind(), e);
            process::exit(EXIT_INVALID_PLAN);
        }
        Err(e) => fail(&e.to_string(), 1),
    };
    debug!(sections = page.items.len(), "render plan built");

    if cli.emit_plan {
        match serde_json::to_string_pretty(&page.items) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("failed to serialize render plan: {}", e), 1),
        }
        return;
    }

    match &cli.out {
        Some(root) => match write_page(&page.source, root) {
            Ok(path) => eprintln!("Wrote {}", path.display()),
            Err(e) => fail(&e.to_string(), 1),
        },
        None => print!("{}", page.source),
    }
}

fn fail(message: &str, code: i32) -> ! {
    eprintln!("Error: {}", message);
    process::exit(code);
}

fn load_registry(path: &Path) -> TemplateRegistry {
    TemplateRegistry::from_file(path).unwrap_or_else(|e| {
        fail(
            &format!("loading registry '{}': {}", path.display(), e),
            1,
        )
    })
}

fn read_plan_source(path: Option<&Path>) -> (String, String) {
    match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => fail(&format!("reading file '{}': {}", path.display(), e), 1),
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => fail(&format!("reading from stdin: {}", e), 1),
            }
        }
    }
}

fn read_analysis(path: &Path) -> Value {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        fail(&format!("reading file '{}': {}", path.display(), e), 1)
    });
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let err = redesign_codegen::PlanSourceError::from_json(&e, &content);
            eprint!("{}", err.format(&content, &path.display().to_string()));
            process::exit(EXIT_INVALID_PLAN);
        }
    }
}

fn print_templates(registry: &TemplateRegistry) {
    println!("{:<14} {:<22} {:<40} REQUIRED PROPS", "SECTION", "COMPONENT", "VARIANTS (default first)");
    for entry in registry.entries() {
        let required: Vec<&str> = entry.required_props().iter().map(|s| s.as_str()).collect();
        println!(
            "{:<14} {:<22} {:<40} {}",
            entry.section_type(),
            entry.component_name(),
            entry.variants().join(", "),
            if required.is_empty() {
                "-".to_string()
            } else {
                required.join(", ")
            }
        );
    }
}

fn print_intro() {
    println!(
        r#"Redesign Codegen - generate page source from a redesign plan

USAGE:
    redesign-codegen [OPTIONS] [PLAN]
    cat plan.json | redesign-codegen

OPTIONS:
    -a, --analysis <FILE>        Page analysis JSON (passed through)
    -o, --out <DIR>              Write <DIR>/src/App.jsx instead of printing
    -c, --config <FILE>          Project configuration (TOML)
    --registry <FILE>            Replacement template registry (TOML)
    --runtime-registry <FILE>    Runtime registry to check for drift
    --emit-plan                  Print the render plan as JSON
    --list-templates             Show section types, variants and required props
    -v, --verbose                Raise log level (repeatable)
    -h, --help                   Print help

PLAN FORMAT:
    {{
      "sectionOrdering": ["hero", "footer"],
      "layoutVariants": {{ "hero": "split" }},
      "sectionProps": {{
        "hero": {{ "headline": "Welcome" }},
        "footer": {{ "logoText": "Acme", "linkGroups": [] }}
      }},
      "componentMappings": [{{ "sectionType": "hero", "props": {{ }} }}]
    }}

A plan may also be wrapped as {{"plan": ..., "analysis": ...}}.
Run --list-templates to see every section type."#
    );
}
