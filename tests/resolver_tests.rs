//! Template resolution integration tests
//!
//! Throw-away repositories on disk, resolved end to end.

use std::fs;
use std::path::Path;

use prdraft::template::detector::DomainDetector;
use prdraft::template::presets::get_preset;
use prdraft::{
    compose, evaluate, parse_template, render, AutoPopulate, ChangeSet, ChangedFile, Commit,
    Condition, Domain, RenderContext, ResolveOptions, Section, TemplateResolver, TemplateSource,
};

fn touch(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn headers(body: &str) -> Vec<&str> {
    body.lines()
        .filter_map(|line| line.strip_prefix("## "))
        .collect()
}

// =============================================================================
// Domain detection
// =============================================================================

mod detection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ios_project_is_mobile() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "App/AppDelegate.swift", "");
        touch(dir.path(), "Podfile", "");
        fs::create_dir_all(dir.path().join("App.xcodeproj")).unwrap();

        let report = DomainDetector::default().detect(dir.path());
        assert_eq!(report.domain, Some(Domain::Mobile));
        assert_eq!(report.domain_name(), "mobile");
    }

    #[test]
    fn test_readme_and_package_json_is_default() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README.md", "# hi");
        touch(dir.path(), "package.json", "{}");

        let report = DomainDetector::default().detect(dir.path());
        assert_eq!(report.domain, None);
        assert_eq!(prdraft::detect_domain(dir.path()), "default");
    }

    #[test]
    fn test_same_tree_same_answer() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "infra/main.tf", "");
        touch(dir.path(), "infra/vars.tf", "");
        touch(dir.path(), "src/api/routes.py", "");

        let detector = DomainDetector::default();
        let first = detector.detect(dir.path());
        let second = detector.detect(dir.path());
        assert_eq!(first, second);
    }
}

// =============================================================================
// Resolution chain
// =============================================================================

mod resolution_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repo_template_beats_strong_signals() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ios/App.swift", "");
        touch(dir.path(), "ios/Other.swift", "");
        touch(dir.path(), "Podfile", "");
        touch(
            dir.path(),
            ".github/pull_request_template.md",
            "## What\n\n## Why\n",
        );

        let options = ResolveOptions::default().with_preset("backend");
        let resolved = TemplateResolver::default().resolve(dir.path(), &options);
        assert_eq!(resolved.source, TemplateSource::Repo);
        assert_eq!(resolved.section_names(), vec!["What", "Why"]);
        assert!(resolved.sections.iter().all(|s| s.required));

        let why = resolved.section("Why").unwrap();
        assert_eq!(why.auto_populate, AutoPopulate::None);
        assert_eq!(why.condition, Condition::Always);
        assert!(resolved.section("Summary").is_none());
    }

    #[test]
    fn test_devops_repository_auto_detected() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.tf", "");
        touch(dir.path(), "helm/Chart.yaml", "");

        let resolved = TemplateResolver::default().resolve(dir.path(), &ResolveOptions::default());
        assert_eq!(resolved.source, TemplateSource::AutoDetected);
        assert_eq!(resolved.detected_domain.as_deref(), Some("devops"));
        assert_eq!(resolved.sections.len(), 8);
        assert_eq!(resolved.sections, get_preset("devops"));
    }

    #[test]
    fn test_unknown_preset_equals_default() {
        assert_eq!(get_preset("does-not-exist"), get_preset("default"));
        assert_eq!(get_preset("DEVOPS"), get_preset("devops"));
    }

    #[test]
    fn test_resolution_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = TemplateResolver::default();

        let before = resolver.resolve(dir.path(), &ResolveOptions::default());
        assert_eq!(before.source, TemplateSource::Default);

        touch(dir.path(), "PULL_REQUEST_TEMPLATE.md", "## Notes\n");
        let after = resolver.resolve(dir.path(), &ResolveOptions::default());
        assert_eq!(after.source, TemplateSource::Repo);
    }
}

// =============================================================================
// Parsing, conditions and content
// =============================================================================

mod content_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_summary_and_test_plan() {
        let sections = parse_template("## Summary\nfoo\n## Test Plan\nbar");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, "Summary");
        assert_eq!(sections[0].auto_populate, AutoPopulate::Purpose);
        assert_eq!(sections[1].name, "Test Plan");
        assert_eq!(sections[1].auto_populate, AutoPopulate::None);
        assert_eq!(sections[1].placeholder.as_deref(), Some("bar"));
        assert!(sections.iter().all(|s| s.condition == Condition::Always));
    }

    #[test]
    fn test_conditions() {
        let none: &[&str] = &[];
        assert!(evaluate(&Condition::file_pattern("[bad"), &["x.ts"], none, 0));
        assert!(evaluate(&Condition::commit_count_gt(1), none, none, 2));
        assert!(!evaluate(&Condition::commit_count_gt(1), none, none, 1));
    }

    #[test]
    fn test_extracted_without_tickets_renders_nothing() {
        let changes = ChangeSet::default();
        let ctx = RenderContext::from_change_set(&changes);
        let section = Section::new("Related Issues", AutoPopulate::Extracted).required();
        assert_eq!(render(&section, &ctx), "");
    }

    #[test]
    fn test_devops_description_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.tf", "");
        touch(dir.path(), "helm/Chart.yaml", "");

        let changes = ChangeSet {
            files: vec![ChangedFile::new("main.tf")],
            commits: vec![Commit::new("abcdef0123", "feat: provision cluster")],
            branch: Some("feature/OPS-3-add-cluster".to_string()),
            ..ChangeSet::default()
        };

        let resolved = TemplateResolver::default().resolve(dir.path(), &ResolveOptions::default());
        let ctx = RenderContext::from_change_set(&changes).with_domain(Some(Domain::Devops));
        let body = compose(&resolved, &ctx);

        assert_eq!(
            headers(&body),
            vec![
                "Summary",
                "Changes",
                "Type of Change",
                "Infrastructure Changes",
                "Deployment Plan",
                "Rollback Plan",
                "Checklist",
            ]
        );
        assert!(body.contains("\nProvision cluster\n"));
        assert!(body.contains("- feat: provision cluster (abcdef0)"));
        assert!(body.contains("- [x] New feature"));
        assert!(body.contains("- [ ] Rollback procedure documented and tested"));
    }

    #[test]
    fn test_change_set_file_round_trip_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            "changes.json",
            r#"{"files": [{"path": "src/auth/jwt.rs", "additions": 4}], "tickets": ["SEC-9"]}"#,
        );

        let changes = ChangeSet::from_json_file(dir.path().join("changes.json")).unwrap();
        assert_eq!(changes.file_paths(), vec!["src/auth/jwt.rs"]);
        assert_eq!(changes.files[0].deletions, 0);

        let tickets = Section::new("Related Tickets", AutoPopulate::Extracted)
            .with_condition(Condition::HasTickets);
        assert!(changes.will_appear(&tickets));
    }
}
