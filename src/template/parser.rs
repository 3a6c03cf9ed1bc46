//! @acp:module "Template Parser"
//! @acp:summary "Turn a committed markdown PR template into an ordered section list"
//! @acp:domain template
//! @acp:layer parsing
//!
//! Every `## ` header opens a section; the text up to the next header is its
//! body. Header names are classified by an ordered keyword table where the
//! first matching group wins. Author-supplied templates are intentional, so
//! every parsed section is required and unconditional.

use super::types::{AutoPopulate, Condition, Section, SectionFormat};

/// Ordered classifier: first keyword group found in the lower-cased header wins
const HEADER_KEYWORDS: &[(&[&str], AutoPopulate)] = &[
    (
        &["summary", "description", "purpose", "overview", "about", "context"],
        AutoPopulate::Purpose,
    ),
    (
        &["ticket", "issue", "related", "jira", "linear", "reference"],
        AutoPopulate::Extracted,
    ),
    (&["checklist"], AutoPopulate::Checklist),
    (
        &["type of change", "change type", "category"],
        AutoPopulate::ChangeType,
    ),
    (
        &["commits", "changelog", "changes", "what changed"],
        AutoPopulate::Commits,
    ),
    (
        &["test", "testing", "qa", "verification", "how to test"],
        AutoPopulate::None,
    ),
];

/// Name given to the single section of a template without `## ` headers
const FALLBACK_SECTION: &str = "Description";

/// Classify a section header into the content it should be generated from
pub fn classify_header(name: &str) -> AutoPopulate {
    let lowered = name.to_lowercase();
    HEADER_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, kind)| *kind)
        .unwrap_or(AutoPopulate::None)
}

/// @acp:summary "Parse markdown template text into sections, in source order"
pub fn parse_template(raw: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;
    let mut in_fence = false;

    for line in raw.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
        }
        let header = if in_fence { None } else { level_two_header(line) };

        if let Some(name) = header {
            if let Some((name, body)) = current.take() {
                push_section(&mut sections, &name, &body);
            }
            current = Some((name, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((name, body)) = current.take() {
        push_section(&mut sections, &name, &body);
    }

    if sections.is_empty() && !raw.trim().is_empty() {
        sections.push(
            Section::new(FALLBACK_SECTION, AutoPopulate::None)
                .required()
                .with_placeholder(raw.trim()),
        );
    }

    sections
}

/// Leading spaces allowed before a header; four or more make a code block
const MAX_HEADER_INDENT: usize = 3;

fn is_fence(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("```") || line.starts_with("~~~")
}

fn level_two_header(line: &str) -> Option<String> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > MAX_HEADER_INDENT {
        return None;
    }
    let rest = line[indent..].strip_prefix("##")?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        // "###" and deeper, or "##text"
        return None;
    }
    let name = rest.trim().trim_end_matches('#').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn push_section(sections: &mut Vec<Section>, name: &str, body: &[&str]) {
    if sections.iter().any(|s| s.name == name) {
        tracing::debug!("Ignoring duplicate template section '{}'", name);
        return;
    }

    let body = body.join("\n");
    let body = body.trim();
    let kind = classify_header(name);

    let mut section = Section::new(name, kind)
        .required()
        .with_condition(Condition::Always);
    if !body.is_empty() {
        section = section.with_placeholder(body);
    }
    if has_task_items(body) {
        section = section.with_format(SectionFormat::Checklist);
    }
    sections.push(section);
}

fn has_task_items(body: &str) -> bool {
    body.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("- [ ]")
            || line.starts_with("- [x]")
            || line.starts_with("- [X]")
            || line.starts_with("* [ ]")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_sections_in_order() {
        let sections = parse_template("## Summary\nfoo\n## Test Plan\nbar");
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].name, "Summary");
        assert_eq!(sections[0].auto_populate, AutoPopulate::Purpose);
        assert_eq!(sections[0].condition, Condition::Always);

        assert_eq!(sections[1].name, "Test Plan");
        assert_eq!(sections[1].auto_populate, AutoPopulate::None);
        assert_eq!(sections[1].placeholder.as_deref(), Some("bar"));
        assert_eq!(sections[1].condition, Condition::Always);
    }

    #[test]
    fn test_classifier_priority() {
        assert_eq!(classify_header("Description"), AutoPopulate::Purpose);
        assert_eq!(classify_header("Related Issues"), AutoPopulate::Extracted);
        assert_eq!(classify_header("JIRA"), AutoPopulate::Extracted);
        assert_eq!(classify_header("PR Checklist"), AutoPopulate::Checklist);
        assert_eq!(classify_header("Type of Change"), AutoPopulate::ChangeType);
        assert_eq!(classify_header("What Changed"), AutoPopulate::Commits);
        assert_eq!(classify_header("Changelog"), AutoPopulate::Commits);
        assert_eq!(classify_header("How to Test"), AutoPopulate::None);
        assert_eq!(classify_header("Deployment Notes"), AutoPopulate::None);
        // purpose group is checked before commits
        assert_eq!(classify_header("Summary of Changes"), AutoPopulate::Purpose);
    }

    #[test]
    fn test_deeper_headers_stay_in_body() {
        let raw = "## Changes\n### Backend\n- thing\n## Notes\n";
        let sections = parse_template(raw);
        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].placeholder.as_deref(),
            Some("### Backend\n- thing")
        );
        assert_eq!(sections[1].placeholder, None);
    }

    #[test]
    fn test_preamble_ignored_and_trailing_hashes_trimmed() {
        let raw = "<!-- Please fill in -->\n# Title\n## Summary ##\nText";
        let sections = parse_template(raw);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Summary");
    }

    #[test]
    fn test_task_list_body_uses_checklist_format() {
        let raw = "## Before merging\n- [ ] Rebased\n- [ ] Squashed";
        let sections = parse_template(raw);
        assert_eq!(sections[0].format, SectionFormat::Checklist);
        assert_eq!(sections[0].auto_populate, AutoPopulate::None);
    }

    #[test]
    fn test_duplicate_headers_keep_first() {
        let sections = parse_template("## Notes\na\n## Notes\nb");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].placeholder.as_deref(), Some("a"));
    }

    #[test]
    fn test_headerless_template_becomes_single_section() {
        let sections = parse_template("Describe your change.\n\nThanks!");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Description");
        assert_eq!(sections[0].auto_populate, AutoPopulate::None);
        assert_eq!(
            sections[0].placeholder.as_deref(),
            Some("Describe your change.\n\nThanks!")
        );
    }

    #[test]
    fn test_headers_inside_code_fences_stay_in_body() {
        let raw = "## Testing\n```bash\n## run the suite\ncargo test\n```\n## Notes\nx";
        let sections = parse_template(raw);
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Testing", "Notes"]);
        assert_eq!(
            sections[0].placeholder.as_deref(),
            Some("```bash\n## run the suite\ncargo test\n```")
        );

        let tilde = parse_template("## Setup\n~~~\n## not a header\n~~~\n");
        assert_eq!(tilde.len(), 1);
    }

    #[test]
    fn test_indented_code_block_is_not_a_header() {
        let sections = parse_template("## Notes\n    ## sample output\n   ## Extra\n");
        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Notes", "Extra"]);
        assert_eq!(sections[0].placeholder.as_deref(), Some("## sample output"));
    }

    #[test]
    fn test_empty_template() {
        assert!(parse_template("   \n").is_empty());
    }
}
