//! @acp:module "Template Types"
//! @acp:summary "Sections, conditions and resolved templates"
//! @acp:domain template
//! @acp:layer types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where a section's content is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoPopulate {
    /// One-line summary synthesized from commits and branch name
    Purpose,
    /// Ticket identifiers found on the branch
    Extracted,
    /// Bulleted commit list
    Commits,
    /// Review checklist
    Checklist,
    /// Change-type checkbox list
    ChangeType,
    /// Left to the author
    None,
}

impl AutoPopulate {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoPopulate::Purpose => "purpose",
            AutoPopulate::Extracted => "extracted",
            AutoPopulate::Commits => "commits",
            AutoPopulate::Checklist => "checklist",
            AutoPopulate::ChangeType => "change_type",
            AutoPopulate::None => "none",
        }
    }
}

impl fmt::Display for AutoPopulate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hint for consumers assembling the final description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionFormat {
    #[default]
    Markdown,
    Checklist,
}

/// Rule controlling whether a section appears
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Always,
    Never,
    HasTickets,
    CommitCountGt {
        threshold: i64,
    },
    FilePattern {
        #[serde(default)]
        pattern: Option<String>,
    },
}

impl Condition {
    pub fn file_pattern(pattern: impl Into<String>) -> Self {
        Condition::FilePattern {
            pattern: Some(pattern.into()),
        }
    }

    pub fn commit_count_gt(threshold: i64) -> Self {
        Condition::CommitCountGt { threshold }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => f.write_str("always"),
            Condition::Never => f.write_str("never"),
            Condition::HasTickets => f.write_str("has tickets"),
            Condition::CommitCountGt { threshold } => write!(f, "commit count > {threshold}"),
            Condition::FilePattern { pattern: Some(p) } if !p.trim().is_empty() => {
                write!(f, "files match /{p}/")
            }
            Condition::FilePattern { .. } => f.write_str("always (empty file pattern)"),
        }
    }
}

/// @acp:summary "One named, conditionally visible block of a PR description"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    pub auto_populate: AutoPopulate,

    #[serde(default)]
    pub condition: Condition,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub format: SectionFormat,
}

impl Section {
    /// Optional, unconditional section. Checklist-like kinds get the checklist format.
    pub fn new(name: impl Into<String>, auto_populate: AutoPopulate) -> Self {
        let format = match auto_populate {
            AutoPopulate::Checklist | AutoPopulate::ChangeType => SectionFormat::Checklist,
            _ => SectionFormat::Markdown,
        };
        Self {
            name: name.into(),
            required: false,
            auto_populate,
            condition: Condition::Always,
            placeholder: None,
            format,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_format(mut self, format: SectionFormat) -> Self {
        self.format = format;
        self
    }
}

/// Provenance of a resolved template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateSource {
    #[serde(rename = "repo")]
    Repo,
    #[serde(rename = "preset")]
    Preset,
    #[serde(rename = "auto-detected")]
    AutoDetected,
    #[serde(rename = "default")]
    Default,
}

impl TemplateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSource::Repo => "repo",
            TemplateSource::Preset => "preset",
            TemplateSource::AutoDetected => "auto-detected",
            TemplateSource::Default => "default",
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @acp:summary "Ordered sections plus where they came from"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTemplate {
    pub sections: Vec<Section>,
    pub source: TemplateSource,
    pub detected_domain: Option<String>,
    pub repo_template_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_template: Option<String>,
}

impl ResolvedTemplate {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Development-stack category used to pick a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Mobile,
    Frontend,
    Backend,
    Devops,
    Ml,
    Security,
}

impl Domain {
    /// Fixed order used for scoring output and tie-breaking
    pub const ALL: [Domain; 6] = [
        Domain::Mobile,
        Domain::Frontend,
        Domain::Backend,
        Domain::Devops,
        Domain::Ml,
        Domain::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Mobile => "mobile",
            Domain::Frontend => "frontend",
            Domain::Backend => "backend",
            Domain::Devops => "devops",
            Domain::Ml => "ml",
            Domain::Security => "security",
        }
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(Domain::Mobile),
            "frontend" => Ok(Domain::Frontend),
            "backend" => Ok(Domain::Backend),
            "devops" => Ok(Domain::Devops),
            "ml" => Ok(Domain::Ml),
            "security" => Ok(Domain::Security),
            other => Err(format!("Unknown domain: {other}")),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
