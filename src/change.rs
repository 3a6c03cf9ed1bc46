//! @acp:module "Change Set"
//! @acp:summary "Caller-supplied commits, changed files and tickets for a branch under review"
//! @acp:domain cli
//! @acp:layer types
//!
//! The engine never gathers git data itself. Whatever collects the commit log
//! and diff stats hands them over as a [`ChangeSet`], which is only ever read.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DraftError, Result};
use crate::template::condition::evaluate;
use crate::template::types::Section;

/// A file touched by the change, with its diff stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub path: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            additions: 0,
            deletions: 0,
        }
    }
}

/// A single commit on the branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Commit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            author: String::new(),
            date: None,
        }
    }

    /// First line of the commit message
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }

    /// Abbreviated hash (7 characters, or the full hash if shorter)
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

/// @acp:summary "Read-only input describing the change under review"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    #[serde(default)]
    pub files: Vec<ChangedFile>,

    #[serde(default)]
    pub commits: Vec<Commit>,

    #[serde(default)]
    pub tickets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_link_format: Option<String>,

    /// Current branch name, when the collaborator knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl ChangeSet {
    /// @acp:summary "Load a change-set from a JSON file"
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let change_set: ChangeSet = serde_json::from_str(content)?;
        if let Some(file) = change_set.files.iter().find(|f| f.path.trim().is_empty()) {
            return Err(DraftError::ChangeSet(format!(
                "changed file with empty path (+{} -{})",
                file.additions, file.deletions
            )));
        }
        Ok(change_set)
    }

    pub fn file_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Whether a section's condition currently holds for this change-set
    pub fn will_appear(&self, section: &Section) -> bool {
        evaluate(
            &section.condition,
            &self.file_paths(),
            &self.tickets,
            self.commit_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::types::{AutoPopulate, Condition};

    #[test]
    fn test_parse_minimal_change_set() {
        let json = r#"{
            "files": [{"path": "src/api/users.rs", "additions": 10, "deletions": 2}],
            "commits": [{"hash": "abcdef1234567", "message": "Add users endpoint\n\nBody"}],
            "tickets": ["API-12"],
            "ticketLinkFormat": "https://tracker.example/{ticket}"
        }"#;
        let cs = ChangeSet::from_json(json).unwrap();
        assert_eq!(cs.file_paths(), vec!["src/api/users.rs"]);
        assert_eq!(cs.commits[0].title(), "Add users endpoint");
        assert_eq!(cs.commits[0].short_hash(), "abcdef1");
        assert_eq!(
            cs.ticket_link_format.as_deref(),
            Some("https://tracker.example/{ticket}")
        );
        assert!(cs.branch.is_none());
    }

    #[test]
    fn test_empty_file_path_rejected() {
        let json = r#"{"files": [{"path": "  "}]}"#;
        assert!(matches!(
            ChangeSet::from_json(json),
            Err(DraftError::ChangeSet(_))
        ));
    }

    #[test]
    fn test_short_hash_of_short_hash() {
        let commit = Commit::new("abc", "x");
        assert_eq!(commit.short_hash(), "abc");
    }

    #[test]
    fn test_will_appear_uses_tickets() {
        let section = Section::new("Related Tickets", AutoPopulate::Extracted)
            .with_condition(Condition::HasTickets);
        let mut cs = ChangeSet::default();
        assert!(!cs.will_appear(&section));
        cs.tickets.push("ABC-1".to_string());
        assert!(cs.will_appear(&section));
    }
}
