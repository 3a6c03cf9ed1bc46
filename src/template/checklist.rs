//! @acp:module "Checklist Generation"
//! @acp:summary "Review checklist built from universal, file-triggered and domain items"
//! @acp:domain template
//! @acp:layer logic

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::types::Domain;

const UNIVERSAL_ITEMS: [&str; 4] = [
    "I have performed a self-review of my code",
    "I have tested these changes locally",
    "I have added or updated tests that cover my changes",
    "My changes generate no new warnings",
];

/// (changed-file pattern, item added when any file matches)
static FILE_TRIGGERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"\.(md|mdx|rst|adoc)$|(^|/)docs?/",
            "Documentation is accurate and up to date",
        ),
        (
            r"(^|/)(api|routes?|controllers?|handlers?|endpoints?)(/|\.)|openapi|swagger",
            "API changes are backward compatible",
        ),
        (
            r"(^|/)migrations?/|schema|\.sql$",
            "Database migrations are reversible",
        ),
        (
            r"\.(tsx|jsx|vue|svelte|css|scss|sass|less|html|storyboard|xib)$",
            "UI changes match the design",
        ),
        (
            r"(^|/)\.env|(^|/)config/|(^|/)settings\.|\.(ini|cfg)$",
            "New environment variables are documented",
        ),
        (
            r"(^|/)(package\.json|package-lock\.json|yarn\.lock|pnpm-lock\.yaml|Cargo\.toml|Cargo\.lock|go\.mod|go\.sum|requirements[^/]*\.txt|Pipfile(\.lock)?|poetry\.lock|pyproject\.toml|Gemfile(\.lock)?|Podfile(\.lock)?|pom\.xml|build\.gradle(\.kts)?|pubspec\.yaml|composer\.json)$",
            "New dependencies have been reviewed for security",
        ),
    ]
    .into_iter()
    .map(|(pattern, item)| {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("checklist trigger patterns are valid");
        (regex, item)
    })
    .collect()
});

fn domain_items(domain: Domain) -> [&'static str; 3] {
    match domain {
        Domain::Mobile => [
            "Tested on both iOS and Android (or all supported platforms)",
            "Tested on small and large screen sizes",
            "No new permissions requested without justification",
        ],
        Domain::Frontend => [
            "Tested in all supported browsers",
            "Responsive layout verified on mobile viewports",
            "Accessibility checked (keyboard navigation, contrast, ARIA)",
        ],
        Domain::Backend => [
            "Error handling and logging added for new code paths",
            "Database queries are indexed and performant",
            "API documentation updated",
        ],
        Domain::Devops => [
            "Infrastructure changes planned and reviewed (e.g. terraform plan)",
            "Rollback procedure documented and tested",
            "Monitoring and alerts cover the changed components",
        ],
        Domain::Security => [
            "No secrets or credentials committed",
            "Input validation and output encoding reviewed",
            "Threat model updated for the changed components",
        ],
        Domain::Ml => [
            "Model metrics compared against the current baseline",
            "Training and evaluation are reproducible (seeds, versions pinned)",
            "Dataset changes documented",
        ],
    }
}

/// @acp:summary "Build checklist items for the changed files and detected domain"
pub fn checklist_items<P: AsRef<str>>(
    changed_files: &[P],
    domain: Option<Domain>,
) -> Vec<&'static str> {
    let mut items: Vec<&'static str> = UNIVERSAL_ITEMS.to_vec();

    for (pattern, item) in FILE_TRIGGERS.iter() {
        if changed_files.iter().any(|f| pattern.is_match(f.as_ref())) {
            items.push(*item);
        }
    }

    if let Some(domain) = domain {
        items.extend(domain_items(domain));
    }

    items
}

/// Render the checklist as unchecked markdown task items
pub fn generate_checklist<P: AsRef<str>>(changed_files: &[P], domain: Option<Domain>) -> String {
    checklist_items(changed_files, domain)
        .iter()
        .map(|item| format!("- [ ] {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FILES: &[&str] = &[];

    #[test]
    fn test_universal_items_always_present() {
        let items = checklist_items(NO_FILES, None);
        assert_eq!(items, UNIVERSAL_ITEMS.to_vec());
    }

    #[test]
    fn test_file_triggered_items() {
        let items = checklist_items(
            &[
                "docs/setup.md",
                "src/api/users.ts",
                "db/migrations/001_init.sql",
                "package.json",
            ],
            None,
        );
        assert!(items.contains(&"Documentation is accurate and up to date"));
        assert!(items.contains(&"API changes are backward compatible"));
        assert!(items.contains(&"Database migrations are reversible"));
        assert!(items.contains(&"New dependencies have been reviewed for security"));
        assert!(!items.contains(&"UI changes match the design"));
        assert!(!items.contains(&"New environment variables are documented"));
    }

    #[test]
    fn test_txt_manifests_are_not_docs() {
        let items = checklist_items(&["requirements.txt", "CMakeLists.txt"], None);
        assert!(!items.contains(&"Documentation is accurate and up to date"));
        assert!(items.contains(&"New dependencies have been reviewed for security"));
    }

    #[test]
    fn test_env_and_ui_items() {
        let items = checklist_items(&[".env.example", "src/Button.tsx"], None);
        assert!(items.contains(&"New environment variables are documented"));
        assert!(items.contains(&"UI changes match the design"));
    }

    #[test]
    fn test_domain_adds_exactly_three_items() {
        for domain in Domain::ALL {
            let items = checklist_items(NO_FILES, Some(domain));
            assert_eq!(items.len(), UNIVERSAL_ITEMS.len() + 3, "{domain}");
        }
    }

    #[test]
    fn test_rendered_as_task_list() {
        let rendered = generate_checklist(NO_FILES, None);
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.lines().all(|l| l.starts_with("- [ ] ")));
    }
}
