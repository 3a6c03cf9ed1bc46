//! @acp:module "Resolve Command"
//! @acp:summary "Show which template a repository resolves to and its sections"
//! @acp:domain cli
//! @acp:layer handler

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::template::{ResolveOptions, ResolvedTemplate, TemplateResolver};

/// Options for the resolve command
#[derive(Debug, Clone)]
pub struct ResolveCmdOptions {
    /// Repository root
    pub root: PathBuf,
    /// Preset to use when the repository has no template
    pub preset: Option<String>,
    /// Ignore committed pull request templates
    pub no_repo_template: bool,
    /// Output as JSON
    pub json: bool,
}

/// Resolve the template for `root` with CLI flags layered over the config
pub(crate) fn resolve_template(
    root: &Path,
    preset: Option<&str>,
    no_repo_template: bool,
    config: &Config,
) -> ResolvedTemplate {
    let mut options = ResolveOptions::from_config(config);
    if let Some(preset) = preset {
        options = options.with_preset(preset);
    }
    if no_repo_template {
        options = options.without_repo_template();
    }
    TemplateResolver::new(&config.detection).resolve(root, &options)
}

/// Execute the resolve command
pub fn execute_resolve(options: ResolveCmdOptions, config: Config) -> Result<()> {
    let resolved = resolve_template(
        &options.root,
        options.preset.as_deref(),
        options.no_repo_template,
        &config,
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    print_header(&resolved);
    println!();
    for (i, section) in resolved.sections.iter().enumerate() {
        let required = if section.required {
            style(" [required]").yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:>2}. {:28} {:12} {}{}",
            i + 1,
            style(&section.name).bold(),
            section.auto_populate.as_str(),
            style(&section.condition).dim(),
            required
        );
    }

    Ok(())
}

pub(crate) fn print_header(resolved: &ResolvedTemplate) {
    let domain = resolved.detected_domain.as_deref().unwrap_or("-");
    println!(
        "{} {} ({})",
        style("Template:").bold(),
        style(resolved.source).cyan(),
        domain
    );
    if let Some(path) = &resolved.repo_template_path {
        println!("{} {}", style("Path:").bold(), path.display());
    }
}
