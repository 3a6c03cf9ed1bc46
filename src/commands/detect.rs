//! @acp:module "Detect Command"
//! @acp:summary "Report the detected development domain of a repository"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::template::DomainDetector;

/// Options for the detect command
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Repository root
    pub root: PathBuf,
    /// Show the score of every domain
    pub scores: bool,
    /// Output as JSON
    pub json: bool,
}

/// Execute the detect command
pub fn execute_detect(options: DetectOptions, config: Config) -> Result<()> {
    let report = DomainDetector::new(&config.detection).detect(&options.root);

    if options.json {
        let scores: serde_json::Map<String, serde_json::Value> = report
            .scores
            .iter()
            .map(|(domain, score)| (domain.as_str().to_string(), (*score).into()))
            .collect();
        let output = serde_json::json!({
            "domain": report.domain_name(),
            "scores": scores,
            "entriesVisited": report.entries_visited,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", report.domain_name());

    if options.scores {
        println!();
        for (domain, score) in &report.scores {
            let marker = if report.domain == Some(*domain) {
                style("●").green()
            } else {
                style("○").dim()
            };
            println!("  {} {:10} {}", marker, domain.as_str(), score);
        }
        println!(
            "\n  {} entries scanned (max depth {}, min score {}, ratio {:.1})",
            report.entries_visited,
            config.detection.max_depth,
            config.detection.min_score,
            config.detection.dominance_ratio
        );
    }

    Ok(())
}
