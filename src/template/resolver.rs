//! @acp:module "Template Resolver"
//! @acp:summary "Pick the section list for a repository: repo template, preset, detected domain, default"
//! @acp:domain template
//! @acp:layer service
//!
//! Resolution order, first success wins:
//! 1. A pull request template committed to the repository
//! 2. An explicitly requested preset
//! 3. The preset of the auto-detected domain
//! 4. The `default` preset
//!
//! Filesystem failures during discovery never propagate; they only mean
//! "not found here".

use std::fs;
use std::path::{Path, PathBuf};

use super::detector::{DomainDetector, DEFAULT_DOMAIN};
use super::parser::parse_template;
use super::presets::{get_preset, has_preset, DEFAULT_PRESET};
use super::types::{ResolvedTemplate, TemplateSource};
use crate::config::{Config, DetectionConfig};

/// Directories searched for a template, relative to the repository root
const TEMPLATE_DIRS: &[&str] = &[".github", "", "docs"];

/// Template file names tried in each directory, in order
const TEMPLATE_FILES: &[&str] = &[
    "pull_request_template.md",
    "pull_request_template.txt",
    "pull_request_template",
];

/// Directory holding multiple templates
const TEMPLATE_SUBDIR: &str = "PULL_REQUEST_TEMPLATE";

/// @acp:summary "Options controlling template resolution"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Look for a committed template before anything else
    pub use_repo_template: bool,
    /// Preset requested by the caller
    pub preset: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            use_repo_template: true,
            preset: None,
        }
    }
}

impl ResolveOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            use_repo_template: config.template.use_repo_template,
            preset: config.template.preset.clone(),
        }
    }

    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    pub fn without_repo_template(mut self) -> Self {
        self.use_repo_template = false;
        self
    }
}

/// @acp:summary "Resolves the template for a repository, computed fresh on each call"
#[derive(Debug, Clone, Default)]
pub struct TemplateResolver {
    detector: DomainDetector,
}

impl TemplateResolver {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            detector: DomainDetector::new(config),
        }
    }

    /// @acp:summary "Resolve sections for `repo` following the four-tier priority chain"
    pub fn resolve(&self, repo: &Path, options: &ResolveOptions) -> ResolvedTemplate {
        if options.use_repo_template {
            if let Some(resolved) = self.from_repo_template(repo) {
                return resolved;
            }
        }

        if let Some(requested) = options.preset.as_deref() {
            return from_preset(requested);
        }

        let report = self.detector.detect(repo);
        if let Some(domain) = report.domain {
            tracing::debug!("Using auto-detected '{}' preset", domain);
            return ResolvedTemplate {
                sections: get_preset(domain.as_str()).to_vec(),
                source: TemplateSource::AutoDetected,
                detected_domain: Some(domain.as_str().to_string()),
                repo_template_path: None,
                raw_template: None,
            };
        }

        ResolvedTemplate {
            sections: get_preset(DEFAULT_PRESET).to_vec(),
            source: TemplateSource::Default,
            detected_domain: None,
            repo_template_path: None,
            raw_template: None,
        }
    }

    fn from_repo_template(&self, repo: &Path) -> Option<ResolvedTemplate> {
        candidate_templates(repo).into_iter().find_map(|path| {
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::debug!("Cannot read template {}: {}", path.display(), err);
                    return None;
                }
            };
            if raw.trim().is_empty() {
                tracing::debug!("Ignoring empty template {}", path.display());
                return None;
            }

            tracing::debug!("Using repository template {}", path.display());
            Some(ResolvedTemplate {
                sections: parse_template(&raw),
                source: TemplateSource::Repo,
                detected_domain: None,
                repo_template_path: Some(path),
                raw_template: Some(raw),
            })
        })
    }
}

fn from_preset(requested: &str) -> ResolvedTemplate {
    let name = requested.trim().to_lowercase();
    let reported = if has_preset(&name) {
        name
    } else {
        tracing::warn!("Unknown preset '{}', using '{}'", requested, DEFAULT_PRESET);
        DEFAULT_DOMAIN.to_string()
    };

    ResolvedTemplate {
        sections: get_preset(&reported).to_vec(),
        source: TemplateSource::Preset,
        detected_domain: Some(reported),
        repo_template_path: None,
        raw_template: None,
    }
}

/// Existing template files in priority order: fixed file names first, then
/// the first `.md`/`.txt` inside a `PULL_REQUEST_TEMPLATE/` directory.
pub fn candidate_templates(repo: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for dir in TEMPLATE_DIRS {
        let Some(dir_path) = resolve_dir(repo, dir) else {
            continue;
        };
        for file in TEMPLATE_FILES {
            if let Some(path) = find_entry(&dir_path, file, EntryKind::File) {
                found.push(path);
            }
        }
    }

    for dir in TEMPLATE_DIRS {
        let Some(dir_path) = resolve_dir(repo, dir) else {
            continue;
        };
        if let Some(template_dir) = find_entry(&dir_path, TEMPLATE_SUBDIR, EntryKind::Dir) {
            if let Some(path) = first_template_in(&template_dir) {
                found.push(path);
            }
        }
    }

    found
}

#[derive(Clone, Copy)]
enum EntryKind {
    File,
    Dir,
}

fn resolve_dir(repo: &Path, dir: &str) -> Option<PathBuf> {
    if dir.is_empty() {
        Some(repo.to_path_buf())
    } else {
        find_entry(repo, dir, EntryKind::Dir)
    }
}

/// Case-insensitive lookup of `name` among the actual entries of `dir`
fn find_entry(dir: &Path, name: &str, kind: EntryKind) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            if !entry.file_name().to_string_lossy().eq_ignore_ascii_case(name) {
                return None;
            }
            // follows symlinks
            let path = entry.path();
            let wanted = match kind {
                EntryKind::File => path.is_file(),
                EntryKind::Dir => path.is_dir(),
            };
            wanted.then_some(path)
        })
        .collect();
    // Several spellings on a case-sensitive filesystem: pick deterministically
    matches.sort();
    matches.into_iter().next()
}

fn first_template_in(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let ext = path.extension()?.to_string_lossy().to_lowercase();
            (path.is_file() && (ext == "md" || ext == "txt")).then_some(path)
        })
        .collect();
    files.sort();
    files.into_iter().next()
}
