//! @acp:module "Generate Command"
//! @acp:summary "Write the pull request description for a change-set to stdout"
//! @acp:domain cli
//! @acp:layer handler

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use super::resolve::resolve_template;
use crate::change::ChangeSet;
use crate::config::Config;
use crate::template::{compose, Domain, RenderContext};

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Repository root
    pub root: PathBuf,
    /// Change-set JSON file
    pub changes: PathBuf,
    /// Preset to use when the repository has no template
    pub preset: Option<String>,
    /// Ignore committed pull request templates
    pub no_repo_template: bool,
    /// Section overrides as `NAME=TEXT`
    pub set: Vec<String>,
}

/// Parse `NAME=TEXT` pairs; the text may itself contain `=`
pub fn parse_overrides(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (name, text) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Invalid override '{}', expected NAME=TEXT", pair))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(anyhow!("Invalid override '{}', section name is empty", pair));
            }
            Ok((name.to_string(), text.replace("\\n", "\n")))
        })
        .collect()
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: Config) -> Result<()> {
    let changes = ChangeSet::from_json_file(&options.changes)
        .with_context(|| format!("Failed to load change-set {}", options.changes.display()))?;

    let mut overrides = config.overrides.clone();
    overrides.extend(parse_overrides(&options.set)?);

    let resolved = resolve_template(
        &options.root,
        options.preset.as_deref(),
        options.no_repo_template,
        &config,
    );
    tracing::debug!(
        "Generating from {} template ({} sections)",
        resolved.source,
        resolved.sections.len()
    );

    let domain = resolved
        .detected_domain
        .as_deref()
        .and_then(|d| d.parse::<Domain>().ok());
    let ctx = RenderContext::from_change_set(&changes)
        .with_overrides(&overrides)
        .with_fallback_link_format(config.ticket_link_format.as_deref())
        .with_domain(domain);

    print!("{}", compose(&resolved, &ctx));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let pairs = vec![
            "Summary=Adds a cache".to_string(),
            "Testing=cargo test\\nmanual run".to_string(),
            "Notes=a=b".to_string(),
        ];
        let overrides = parse_overrides(&pairs).unwrap();
        assert_eq!(overrides["Summary"], "Adds a cache");
        assert_eq!(overrides["Testing"], "cargo test\nmanual run");
        assert_eq!(overrides["Notes"], "a=b");
    }

    #[test]
    fn test_parse_overrides_rejects_missing_separator() {
        assert!(parse_overrides(&["Summary".to_string()]).is_err());
        assert!(parse_overrides(&["=text".to_string()]).is_err());
    }
}
