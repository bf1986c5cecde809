// Report generation from crawl results

use crate::crawl::{SeedReport, extract_url_path};
use anyhow::{Result, bail};
use colored::Colorize;
use std::str::FromStr;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => bail!("Unknown report format '{}'", other),
        }
    }
}

pub fn render_report(reports: &[SeedReport], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_crawl_report(reports)),
        ReportFormat::Json => Ok(generate_json_report(reports)?),
    }
}

pub fn generate_json_report(reports: &[SeedReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

/// Generate a human-readable crawl report
pub fn generate_crawl_report(reports: &[SeedReport]) -> String {
    let failed = reports.iter().filter(|r| !r.is_success()).count();
    let pages: usize = reports.iter().map(|r| r.nodes.len()).sum();
    let links: usize = reports.iter().map(SeedReport::total_links).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped.len()).sum();

    let mut report = String::new();
    report.push_str(RULE);
    report.push_str("\n\n# Summary:\n");
    report.push_str(&format!("  Seeds crawled: {} ({} failed)\n", reports.len(), failed));
    report.push_str(&format!("  Pages with links: {}\n", pages));
    report.push_str(&format!("  Links found: {}\n", links));
    report.push_str(&format!("  Links skipped: {}\n", skipped));
    report.push_str(&format!(
        "  Generated: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    report.push('\n');
    report.push_str(RULE);
    report.push_str("\n\n");

    for seed in reports {
        report.push_str(&format!("## {}\n", seed.seed.bold()));

        if let Some(ref error) = seed.error {
            report.push_str(&format!("  {} {}\n\n", "✗".red().bold(), error.red()));
            continue;
        }

        report.push_str(&format!("  {} pages with links\n\n", seed.nodes.len()));
        for node in &seed.nodes {
            let name = if node.name.is_empty() {
                "(untitled)".to_string()
            } else {
                node.name.clone()
            };
            report.push_str(&format!(
                "  {} {} {}\n",
                name.bright_white().bold(),
                extract_url_path(&node.url).cyan(),
                format!("({} links)", node.child_count()).bright_black()
            ));
            for child in node.children.iter().flatten() {
                report.push_str(&format!("    └─ {}\n", extract_url_path(&child.url)));
            }
        }

        if !seed.skipped.is_empty() {
            report.push_str(&format!("\n  {}\n", "Skipped:".yellow()));
            for link in &seed.skipped {
                report.push_str(&format!(
                    "    {} {}\n",
                    extract_url_path(&link.url),
                    link.reason.to_string().bright_black()
                ));
            }
        }
        report.push('\n');
    }

    report
}
