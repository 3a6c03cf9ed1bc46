//! @acp:module "Change Type Inference"
//! @acp:summary "Infer the change category from the branch prefix or the changed file kinds"
//! @acp:domain template
//! @acp:layer logic
//!
//! Two lookup tables: branch prefix -> category, and a commit type derived
//! from file extensions -> category. The prefix wins when present.

use std::fmt;

/// Canonical change categories, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeCategory {
    BugFix,
    NewFeature,
    Refactoring,
    BreakingChange,
    Documentation,
    Configuration,
    Test,
    Chore,
    Performance,
    CodeStyle,
}

impl ChangeCategory {
    pub const ALL: [ChangeCategory; 10] = [
        ChangeCategory::BugFix,
        ChangeCategory::NewFeature,
        ChangeCategory::Refactoring,
        ChangeCategory::BreakingChange,
        ChangeCategory::Documentation,
        ChangeCategory::Configuration,
        ChangeCategory::Test,
        ChangeCategory::Chore,
        ChangeCategory::Performance,
        ChangeCategory::CodeStyle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChangeCategory::BugFix => "Bug fix",
            ChangeCategory::NewFeature => "New feature",
            ChangeCategory::Refactoring => "Refactoring",
            ChangeCategory::BreakingChange => "Breaking change",
            ChangeCategory::Documentation => "Documentation update",
            ChangeCategory::Configuration => "Configuration change",
            ChangeCategory::Test => "Test",
            ChangeCategory::Chore => "Chore/maintenance",
            ChangeCategory::Performance => "Performance improvement",
            ChangeCategory::CodeStyle => "Code style",
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const PREFIX_CATEGORIES: &[(&str, ChangeCategory)] = &[
    ("fix", ChangeCategory::BugFix),
    ("bugfix", ChangeCategory::BugFix),
    ("hotfix", ChangeCategory::BugFix),
    ("bug", ChangeCategory::BugFix),
    ("feat", ChangeCategory::NewFeature),
    ("feature", ChangeCategory::NewFeature),
    ("refactor", ChangeCategory::Refactoring),
    ("breaking", ChangeCategory::BreakingChange),
    ("docs", ChangeCategory::Documentation),
    ("doc", ChangeCategory::Documentation),
    ("config", ChangeCategory::Configuration),
    ("ci", ChangeCategory::Configuration),
    ("build", ChangeCategory::Configuration),
    ("test", ChangeCategory::Test),
    ("tests", ChangeCategory::Test),
    ("chore", ChangeCategory::Chore),
    ("deps", ChangeCategory::Chore),
    ("perf", ChangeCategory::Performance),
    ("style", ChangeCategory::CodeStyle),
];

const COMMIT_TYPE_CATEGORIES: &[(&str, ChangeCategory)] = &[
    ("docs", ChangeCategory::Documentation),
    ("test", ChangeCategory::Test),
    ("style", ChangeCategory::CodeStyle),
    ("ci", ChangeCategory::Configuration),
    ("chore", ChangeCategory::Chore),
];

const DOC_EXTENSIONS: &[&str] = &["md", "mdx", "rst", "adoc", "txt"];
const STYLE_FILES: &[&str] = &[
    ".editorconfig",
    ".prettierrc",
    ".prettierignore",
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    ".stylelintrc",
    "rustfmt.toml",
    ".rustfmt.toml",
    ".clang-format",
    ".rubocop.yml",
];
const CI_FILES: &[&str] = &[
    "Jenkinsfile",
    ".gitlab-ci.yml",
    ".travis.yml",
    "azure-pipelines.yml",
    "Dockerfile",
    "docker-compose.yml",
    "Makefile",
];
const CHORE_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.toml",
    "Cargo.lock",
    "go.mod",
    "go.sum",
    "requirements.txt",
    "poetry.lock",
    "Gemfile.lock",
    "Podfile.lock",
    ".gitignore",
    "LICENSE",
];

/// Branch prefix: the part of the branch name before the first `/`
pub fn branch_prefix(branch: &str) -> Option<&str> {
    let (prefix, rest) = branch.trim().split_once('/')?;
    (!prefix.is_empty() && !rest.is_empty()).then_some(prefix)
}

/// Category for a branch prefix such as `fix` or `feature`
pub fn category_for_prefix(prefix: &str) -> Option<ChangeCategory> {
    let prefix = prefix.trim().to_lowercase();
    PREFIX_CATEGORIES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, category)| *category)
}

/// Commit type implied by the changed files, when they all agree
pub fn infer_commit_type<P: AsRef<str>>(changed_files: &[P]) -> Option<&'static str> {
    let mut kinds = changed_files.iter().map(|f| file_commit_type(f.as_ref()));
    let first = kinds.next()??;
    kinds.all(|kind| kind == Some(first)).then_some(first)
}

fn file_commit_type(path: &str) -> Option<&'static str> {
    let lowered = path.to_lowercase();
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if is_test_path(&lowered) {
        return Some("test");
    }
    if lowered.starts_with(".github/workflows/") || CI_FILES.contains(&file_name) {
        return Some("ci");
    }
    if STYLE_FILES.contains(&file_name) {
        return Some("style");
    }
    if CHORE_FILES.contains(&file_name) {
        return Some("chore");
    }
    if DOC_EXTENSIONS.contains(&extension.as_str()) || lowered.starts_with("docs/") {
        return Some("docs");
    }
    None
}

fn is_test_path(lowered: &str) -> bool {
    let file_name = lowered.rsplit('/').next().unwrap_or(lowered);
    lowered.starts_with("tests/")
        || lowered.starts_with("test/")
        || lowered.contains("/tests/")
        || lowered.contains("/test/")
        || lowered.contains("__tests__/")
        || file_name.starts_with("test_")
        || file_name.contains("_test.")
        || file_name.contains(".test.")
        || file_name.contains(".spec.")
}

/// @acp:summary "Pick the change category: branch prefix first, then file kinds"
pub fn infer_change_type<P: AsRef<str>>(
    prefix: Option<&str>,
    changed_files: &[P],
) -> Option<ChangeCategory> {
    if let Some(category) = prefix.and_then(category_for_prefix) {
        return Some(category);
    }

    let commit_type = infer_commit_type(changed_files)?;
    COMMIT_TYPE_CATEGORIES
        .iter()
        .find(|(t, _)| *t == commit_type)
        .map(|(_, category)| *category)
}

/// Render all categories as a task list with at most `selected` checked
pub fn render_change_type(selected: Option<ChangeCategory>) -> String {
    ChangeCategory::ALL
        .iter()
        .map(|category| {
            let mark = if Some(*category) == selected { "x" } else { " " };
            format!("- [{mark}] {}", category.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn generate_change_type<P: AsRef<str>>(prefix: Option<&str>, changed_files: &[P]) -> String {
    render_change_type(infer_change_type(prefix, changed_files))
}
