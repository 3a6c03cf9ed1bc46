//! @acp:module "Presets Command"
//! @acp:summary "List built-in presets or show the sections of one"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{bail, Result};
use console::style;

use crate::template::presets::{get_preset, has_preset, list_presets};

/// Options for the presets command
#[derive(Debug, Clone, Default)]
pub struct PresetsOptions {
    /// Preset to show; all presets are listed when absent
    pub name: Option<String>,
    /// Output as JSON
    pub json: bool,
}

/// Execute the presets command
pub fn execute_presets(options: PresetsOptions) -> Result<()> {
    let Some(name) = options.name else {
        let presets = list_presets();
        if options.json {
            let output: Vec<_> = presets
                .iter()
                .map(|(name, description)| {
                    serde_json::json!({
                        "name": name,
                        "description": description,
                        "sections": get_preset(name).len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Available presets:\n");
            for (name, description) in presets {
                println!(
                    "  {:10} {} ({} sections)",
                    style(name).bold(),
                    description,
                    get_preset(name).len()
                );
            }
        }
        return Ok(());
    };

    if !has_preset(&name) {
        bail!("Unknown preset '{}'. Run 'prdraft presets' to list them.", name);
    }
    let sections = get_preset(&name);

    if options.json {
        println!("{}", serde_json::to_string_pretty(sections)?);
        return Ok(());
    }

    println!("{} {}\n", style("Preset:").bold(), name.to_lowercase());
    for section in sections {
        let required = if section.required { " [required]" } else { "" };
        println!(
            "  {:24} {:12} {}{}",
            section.name,
            section.auto_populate.as_str(),
            style(&section.condition).dim(),
            required
        );
    }
    Ok(())
}
