//! @acp:module "Preview Command"
//! @acp:summary "Show which sections would appear for a change-set and where their text comes from"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use super::resolve::{print_header, resolve_template};
use crate::change::ChangeSet;
use crate::config::Config;
use crate::template::{preview, Domain, RenderContext, SectionPreview, TemplateSource};

/// Options for the preview command
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Repository root
    pub root: PathBuf,
    /// Change-set JSON file
    pub changes: PathBuf,
    /// Preset to use when the repository has no template
    pub preset: Option<String>,
    /// Ignore committed pull request templates
    pub no_repo_template: bool,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewOutput<'a> {
    source: TemplateSource,
    detected_domain: Option<&'a str>,
    sections: Vec<SectionPreview>,
}

/// Execute the preview command
pub fn execute_preview(options: PreviewOptions, config: Config) -> Result<()> {
    let changes = ChangeSet::from_json_file(&options.changes)
        .with_context(|| format!("Failed to load change-set {}", options.changes.display()))?;
    let resolved = resolve_template(
        &options.root,
        options.preset.as_deref(),
        options.no_repo_template,
        &config,
    );

    let domain = resolved
        .detected_domain
        .as_deref()
        .and_then(|d| d.parse::<Domain>().ok());
    let ctx = RenderContext::from_change_set(&changes)
        .with_overrides(&config.overrides)
        .with_fallback_link_format(config.ticket_link_format.as_deref())
        .with_domain(domain);
    let sections = preview(&resolved, &ctx);

    if options.json {
        let output = PreviewOutput {
            source: resolved.source,
            detected_domain: resolved.detected_domain.as_deref(),
            sections,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_header(&resolved);
    println!();
    for section in &sections {
        let marker = if section.will_appear {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!(
            "  {} {:28} {:12} {}",
            marker,
            section.name,
            section.source.as_str(),
            style(&section.condition).dim()
        );
    }
    let visible = sections.iter().filter(|s| s.will_appear).count();
    println!("\n  {} of {} sections visible", visible, sections.len());

    Ok(())
}
