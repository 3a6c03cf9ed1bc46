//! @acp:module "Purpose Summary"
//! @acp:summary "One-line summary of a change from its commit titles and branch name"
//! @acp:domain template
//! @acp:layer logic

use once_cell::sync::Lazy;
use regex::Regex;

use super::change_type::branch_prefix;
use crate::change::Commit;

/// `feat(scope)!: ` style prefixes
static CONVENTIONAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z]+(\([^)]*\))?!?:\s*").expect("conventional commit pattern is valid")
});

/// Ticket keys such as `ABC-123` leading a branch slug
static TICKET_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*-\d+[-_/]?").expect("ticket key pattern is valid"));

/// Long-lived branches whose names say nothing about the change
const TRUNK_BRANCHES: &[&str] = &["main", "master", "develop", "development", "dev", "trunk"];

/// Commit title with any conventional-commit prefix removed
pub fn clean_title(title: &str) -> String {
    CONVENTIONAL_PREFIX.replace(title.trim(), "").trim().to_string()
}

/// Human-readable description of a branch name, if it carries any words
///
/// `feature/ABC-12-add-oauth-login` becomes `Add oauth login`. Trunk
/// branches such as `main` yield `None`.
pub fn humanize_branch(branch: &str) -> Option<String> {
    if TRUNK_BRANCHES
        .iter()
        .any(|trunk| branch.trim().eq_ignore_ascii_case(trunk))
    {
        return None;
    }
    let slug = match branch_prefix(branch) {
        Some(prefix) => &branch.trim()[prefix.len() + 1..],
        None => branch.trim(),
    };
    let slug = slug.rsplit('/').next().unwrap_or(slug);
    let slug = TICKET_KEY.replace(slug, "");

    let words: Vec<&str> = slug
        .split(['-', '_', '/', ' '])
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(capitalize(&words.join(" ")))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// @acp:summary "Synthesize a one-line summary, or an empty string when nothing is known"
pub fn synthesize_summary(commits: &[Commit], branch: Option<&str>) -> String {
    if let [only] = commits {
        let title = clean_title(only.title());
        if !title.is_empty() {
            return capitalize(&title);
        }
    }

    let base = branch
        .and_then(humanize_branch)
        .or_else(|| {
            commits
                .iter()
                .map(|c| clean_title(c.title()))
                .find(|t| !t.is_empty())
                .map(|t| capitalize(&t))
        })
        .unwrap_or_default();

    if base.is_empty() || commits.len() <= 1 {
        base
    } else {
        format!("{base} ({} commits)", commits.len())
    }
}
