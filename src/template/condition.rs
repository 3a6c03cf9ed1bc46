//! @acp:module "Section Conditions"
//! @acp:summary "Evaluate section visibility conditions against change-set facts"
//! @acp:domain template
//! @acp:layer logic

use regex::RegexBuilder;

use super::types::Condition;

/// Evaluate a section condition against change-set facts
///
/// Never fails. A `file_pattern` that is empty or does not compile evaluates
/// to `true`: a broken pattern must not hide a section.
///
/// - `always` / `never`
/// - `has_tickets`: at least one ticket id
/// - `commit_count_gt(t)`: strictly more than `t` commits
/// - `file_pattern(p)`: any changed path matches `p`, ignoring case
pub fn evaluate<P: AsRef<str>, T: AsRef<str>>(
    condition: &Condition,
    changed_files: &[P],
    ticket_ids: &[T],
    commit_count: usize,
) -> bool {
    match condition {
        Condition::Always => true,
        Condition::Never => false,
        Condition::HasTickets => !ticket_ids.is_empty(),
        Condition::CommitCountGt { threshold } => {
            i64::try_from(commit_count).unwrap_or(i64::MAX) > *threshold
        }
        Condition::FilePattern { pattern } => {
            matches_any_file(pattern.as_deref().unwrap_or(""), changed_files)
        }
    }
}

fn matches_any_file<P: AsRef<str>>(pattern: &str, changed_files: &[P]) -> bool {
    if pattern.trim().is_empty() {
        return true;
    }

    let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(err) => {
            tracing::debug!("Invalid file pattern '{}', treating as match: {}", pattern, err);
            return true;
        }
    };

    changed_files.iter().any(|path| regex.is_match(path.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TICKETS: &[&str] = &[];
    const NO_FILES: &[&str] = &[];

    #[test]
    fn test_always_and_never() {
        assert!(evaluate(&Condition::Always, NO_FILES, NO_TICKETS, 0));
        assert!(!evaluate(&Condition::Never, &["a.rs"], &["T-1"], 10));
    }

    #[test]
    fn test_has_tickets() {
        assert!(!evaluate(&Condition::HasTickets, NO_FILES, NO_TICKETS, 0));
        assert!(evaluate(&Condition::HasTickets, NO_FILES, &["PROJ-7"], 0));
    }

    #[test]
    fn test_commit_count_is_strict() {
        let condition = Condition::commit_count_gt(1);
        assert!(evaluate(&condition, NO_FILES, NO_TICKETS, 2));
        assert!(!evaluate(&condition, NO_FILES, NO_TICKETS, 1));
        assert!(!evaluate(&condition, NO_FILES, NO_TICKETS, 0));
    }

    #[test]
    fn test_negative_threshold_always_passes() {
        assert!(evaluate(&Condition::commit_count_gt(-1), NO_FILES, NO_TICKETS, 0));
    }

    #[test]
    fn test_file_pattern_matches_case_insensitively() {
        let condition = Condition::file_pattern(r"\.tsx$");
        assert!(evaluate(&condition, &["src/App.TSX"], NO_TICKETS, 0));
        assert!(!evaluate(&condition, &["src/main.rs"], NO_TICKETS, 0));
        assert!(!evaluate(&condition, NO_FILES, NO_TICKETS, 0));
    }

    #[test]
    fn test_file_pattern_invalid_fails_open() {
        let condition = Condition::file_pattern("[bad");
        assert!(evaluate(&condition, &["x.ts"], NO_TICKETS, 0));
        assert!(evaluate(&condition, NO_FILES, NO_TICKETS, 0));
    }

    #[test]
    fn test_file_pattern_empty_or_absent() {
        assert!(evaluate(
            &Condition::FilePattern { pattern: None },
            NO_FILES,
            NO_TICKETS,
            0
        ));
        assert!(evaluate(&Condition::file_pattern("  "), NO_FILES, NO_TICKETS, 0));
    }

    #[test]
    fn test_accepts_owned_strings() {
        let files = vec!["db/migrations/001.sql".to_string()];
        let tickets: Vec<String> = vec![];
        assert!(evaluate(
            &Condition::file_pattern("migrations/"),
            &files,
            &tickets,
            0
        ));
    }
}
