//! @acp:module "Domain Detector"
//! @acp:summary "Classify a repository into a development domain from weighted path signals"
//! @acp:domain template
//! @acp:layer service
//!
//! # Scoring
//!
//! 1. **Walk** the tree below the root, depth-limited, skipping vendor and build
//!    directories, visiting at most `max_entries` entries in file-name order
//! 2. **Match** every visited path (files and directories) against each
//!    domain's `(regex, weight)` signals; every match adds its weight
//! 3. **Accept** the top domain only if it reaches `min_score` and beats the
//!    runner-up by `dominance_ratio`; anything else is `"default"`
//!
//! Ranking ties are broken by [`Domain::ALL`] order, so the outcome never
//! depends on enumeration order.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use walkdir::WalkDir;

use super::types::Domain;
use crate::config::DetectionConfig;

/// Name reported when no domain wins
pub const DEFAULT_DOMAIN: &str = "default";

struct Signal {
    pattern: Regex,
    weight: u32,
}

fn signals(specs: &[(&str, u32)]) -> Vec<Signal> {
    specs
        .iter()
        .map(|(pattern, weight)| Signal {
            pattern: RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("domain signal patterns are valid"),
            weight: *weight,
        })
        .collect()
}

static SIGNALS: Lazy<Vec<(Domain, Vec<Signal>)>> = Lazy::new(|| {
    vec![
        (
            Domain::Mobile,
            signals(&[
                (r"\.swift$", 3),
                (r"\.xcodeproj(/|$)", 3),
                (r"\.xcworkspace(/|$)", 2),
                (r"(^|/)Podfile$", 3),
                (r"(^|/)Cartfile$", 2),
                (r"(^|/)AndroidManifest\.xml$", 3),
                (r"(^|/)pubspec\.yaml$", 3),
                (r"\.dart$", 2),
                (r"\.kt$", 1),
                (r"(^|/)(ios|android)(/|$)", 2),
            ]),
        ),
        (
            Domain::Frontend,
            signals(&[
                (r"\.(tsx|jsx)$", 2),
                (r"\.vue$", 3),
                (r"\.svelte$", 3),
                (r"(^|/)package\.json$", 1),
                (r"\.(css|scss|sass|less)$", 1),
                (r"(^|/)(next|nuxt|vite|webpack|svelte|astro)\.config\.(js|cjs|mjs|ts)$", 3),
                (r"(^|/)angular\.json$", 3),
                (r"(^|/)tailwind\.config\.(js|cjs|ts)$", 2),
                (r"(^|/)(components|pages|public)(/|$)", 1),
                (r"(^|/)index\.html$", 1),
            ]),
        ),
        (
            Domain::Backend,
            signals(&[
                (r"(^|/)go\.mod$", 2),
                (r"(^|/)(api|routes|controllers|handlers|services)(/|$)", 2),
                (r"(^|/)migrations?(/|$)", 2),
                (r"\.sql$", 2),
                (r"(^|/)(requirements\.txt|pyproject\.toml|Pipfile)$", 1),
                (r"(^|/)(pom\.xml|build\.sbt)$", 2),
                (r"(^|/)Gemfile$", 2),
                (r"(^|/)(manage|wsgi|asgi)\.py$", 3),
                (r"(^|/)(server|main|app)\.(py|go|js|ts)$", 1),
                (r"\.proto$", 2),
                (r"(^|/)Cargo\.toml$", 1),
                (r"(^|/)composer\.json$", 2),
            ]),
        ),
        (
            Domain::Devops,
            signals(&[
                (r"\.tf$", 3),
                (r"\.tfvars$", 2),
                (r"(^|/)(helm|charts)(/|$)", 2),
                (r"(^|/)Chart\.yaml$", 3),
                (r"(^|/)Dockerfile", 1),
                (r"(^|/)docker-compose[^/]*\.ya?ml$", 2),
                (r"(^|/)(k8s|kubernetes|manifests)(/|$)", 2),
                (r"(^|/)(ansible|playbooks)(/|$)", 3),
                (r"(^|/)Jenkinsfile$", 2),
                (r"(^|/)\.gitlab-ci\.yml$", 2),
                (r"(^|/)(kustomization|skaffold)\.ya?ml$", 3),
                (r"(^|/)Pulumi\.ya?ml$", 3),
            ]),
        ),
        (
            Domain::Ml,
            signals(&[
                (r"\.ipynb$", 3),
                (r"\.(pt|pth|onnx|h5|ckpt|safetensors|pkl)$", 3),
                (r"(^|/)(train|training|inference|evaluate)\.py$", 2),
                (r"(^|/)dvc\.yaml$", 3),
                (r"(^|/)\.dvc(/|$)", 2),
                (r"(^|/)(notebooks|models|experiments)(/|$)", 1),
                (r"(^|/)(MLproject|mlruns|wandb)(/|$)", 2),
                (r"(^|/)environment\.ya?ml$", 1),
            ]),
        ),
        (
            Domain::Security,
            signals(&[
                (r"(^|/)(security|auth|crypto)(/|$)", 2),
                (r"(^|/)SECURITY\.md$", 2),
                (r"\.(pem|crt|key)$", 2),
                (r"(^|/)\.snyk$", 3),
                (r"(^|/)\.?semgrep(\.ya?ml$|/|$)", 3),
                (r"(^|/)(\.trivyignore|trivy\.ya?ml)$", 3),
                (r"(^|/)\.gitleaks\.toml$", 3),
                (r"(^|/)codeql(/|$)|codeql[^/]*\.ya?ml$", 3),
                (r"\.rego$", 3),
                (r"(^|/)(policies|threat-models?)(/|$)", 1),
            ]),
        ),
    ]
});

/// @acp:summary "Outcome of a detection run, with the evidence behind it"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    /// Winning domain, `None` when the repository looks generic
    pub domain: Option<Domain>,
    /// Score per domain in [`Domain::ALL`] order
    pub scores: Vec<(Domain, u32)>,
    pub entries_visited: usize,
}

impl DetectionReport {
    /// Winning domain name, or `"default"`
    pub fn domain_name(&self) -> &'static str {
        self.domain.map(|d| d.as_str()).unwrap_or(DEFAULT_DOMAIN)
    }

    pub fn score(&self, domain: Domain) -> u32 {
        self.scores
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }
}

/// @acp:summary "Scores repository paths against per-domain signal sets"
#[derive(Debug, Clone, Default)]
pub struct DomainDetector {
    config: DetectionConfig,
}

impl DomainDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// @acp:summary "Detect the domain of the repository at `root`"
    pub fn detect(&self, root: &Path) -> DetectionReport {
        let paths = self.collect_paths(root);
        let report = self.score_paths(&paths);
        tracing::debug!(
            "Domain detection for {}: {} (scores: {:?})",
            root.display(),
            report.domain_name(),
            report.scores
        );
        report
    }

    /// Score an already-enumerated list of root-relative, `/`-separated paths
    pub fn score_paths<S: AsRef<str>>(&self, paths: &[S]) -> DetectionReport {
        let mut totals = [0u32; Domain::ALL.len()];

        for path in paths {
            let path = path.as_ref();
            for (domain, domain_signals) in SIGNALS.iter() {
                let gained: u32 = domain_signals
                    .iter()
                    .filter(|signal| signal.pattern.is_match(path))
                    .map(|signal| signal.weight)
                    .sum();
                totals[domain_index(*domain)] += gained;
            }
        }

        let scores: Vec<(Domain, u32)> = Domain::ALL.iter().copied().zip(totals).collect();
        DetectionReport {
            domain: self.select_winner(&scores),
            scores,
            entries_visited: paths.len(),
        }
    }

    fn select_winner(&self, scores: &[(Domain, u32)]) -> Option<Domain> {
        let mut ranked = scores.to_vec();
        // Stable sort: equal scores keep Domain::ALL order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let (top_domain, top_score) = *ranked.first()?;
        let runner_up = ranked.get(1).map(|(_, score)| *score).unwrap_or(0);

        if top_score < self.config.min_score {
            return None;
        }
        if (top_score as f64) < self.config.dominance_ratio * runner_up as f64 {
            return None;
        }
        Some(top_domain)
    }

    /// Bounded, read-only walk. Unreadable directories are skipped.
    fn collect_paths(&self, root: &Path) -> Vec<String> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(self.config.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir()
                    && self
                        .config
                        .should_skip(&entry.file_name().to_string_lossy()))
            });

        let mut paths = Vec::new();
        for entry in walker {
            if paths.len() >= self.config.max_entries {
                tracing::debug!(
                    "Entry cap of {} reached while scanning {}",
                    self.config.max_entries,
                    root.display()
                );
                break;
            }
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if let Ok(relative) = entry.path().strip_prefix(root) {
                let parts: Vec<_> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect();
                paths.push(parts.join("/"));
            }
        }
        paths
    }
}

fn domain_index(domain: Domain) -> usize {
    Domain::ALL
        .iter()
        .position(|d| *d == domain)
        .unwrap_or_default()
}

/// Detect the domain of `root` with default limits, returning its name or `"default"`
pub fn detect_domain(root: &Path) -> String {
    DomainDetector::default().detect(root).domain_name().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn detector() -> DomainDetector {
        DomainDetector::new(&DetectionConfig::default())
    }

    #[test]
    fn test_all_signals_compile() {
        assert_eq!(SIGNALS.len(), Domain::ALL.len());
    }

    #[test]
    fn test_mobile_paths() {
        let report = detector().score_paths(&["App.swift", "App.xcodeproj", "Podfile"]);
        assert_eq!(report.domain, Some(Domain::Mobile));
        assert_eq!(report.score(Domain::Mobile), 9);
    }

    #[test]
    fn test_readme_and_package_json_is_default() {
        let report = detector().score_paths(&["README.md", "package.json"]);
        assert_eq!(report.domain, None);
        assert_eq!(report.domain_name(), "default");
        assert_eq!(report.score(Domain::Frontend), 1);
    }

    #[test]
    fn test_order_independent() {
        let mut paths = vec![
            "main.tf",
            "helm",
            "helm/Chart.yaml",
            "src",
            "src/server.py",
            "requirements.txt",
            "Dockerfile",
        ];
        let forward = detector().score_paths(&paths);
        paths.reverse();
        let backward = detector().score_paths(&paths);
        assert_eq!(forward, backward);
        assert_eq!(forward.domain, Some(Domain::Devops));
    }

    #[test]
    fn test_runner_up_must_be_dominated() {
        // devops: main.tf (3); backend: go.mod (2)
        let report = detector().score_paths(&["main.tf", "go.mod"]);
        assert_eq!(report.domain, None);
    }

    #[test]
    fn test_exact_tie_is_default() {
        // mobile: Podfile (3); ml: model.onnx (3)
        let report = detector().score_paths(&["Podfile", "model.onnx"]);
        assert_eq!(report.score(Domain::Mobile), report.score(Domain::Ml));
        assert_eq!(report.domain, None);
    }

    #[test]
    fn test_tie_break_follows_domain_order_when_ratio_allows() {
        let config = DetectionConfig {
            dominance_ratio: 1.0,
            ..DetectionConfig::default()
        };
        let report = DomainDetector::new(&config).score_paths(&["Podfile", "model.onnx"]);
        assert_eq!(report.domain, Some(Domain::Mobile));
    }

    #[test]
    fn test_walk_skips_vendor_dirs_and_respects_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/App.vue"), "").unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        fs::write(dir.path().join("a/b/c/train.ipynb"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let report = detector().detect(dir.path());
        assert_eq!(report.score(Domain::Frontend), 0);
        assert_eq!(report.score(Domain::Ml), 0);
        assert_eq!(report.domain, None);
    }

    #[test]
    fn test_entry_cap_bounds_scan() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..20 {
            fs::write(dir.path().join(format!("m{i:02}.tf")), "").unwrap();
        }
        let config = DetectionConfig {
            max_entries: 5,
            ..DetectionConfig::default()
        };
        let report = DomainDetector::new(&config).detect(dir.path());
        assert_eq!(report.entries_visited, 5);
        assert_eq!(report.score(Domain::Devops), 15);
    }

    #[test]
    fn test_missing_root_is_default() {
        assert_eq!(detect_domain(Path::new("/definitely/not/here")), "default");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlinks_do_not_stop_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("a_link")).unwrap();
        fs::write(dir.path().join("main.tf"), "").unwrap();
        fs::write(dir.path().join("vars.tf"), "").unwrap();

        let report = detector().detect(dir.path());
        assert_eq!(report.entries_visited, 3);
        assert_eq!(report.domain, Some(Domain::Devops));
    }
}
