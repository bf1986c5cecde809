// Tests for report rendering

use sitespider_core::crawl::SeedReport;
use sitespider_core::report::{ReportFormat, generate_crawl_report, render_report};
use sitespider_scanner::{CrawlOutcome, LinkNode, SkipReason, SkippedLink};

fn sample_reports() -> Vec<SeedReport> {
    let outcome = CrawlOutcome {
        nodes: vec![
            LinkNode::new("About", "https://x.com/about").with_children(vec![
                LinkNode::new("Team", "https://x.com/team"),
                LinkNode::new("Jobs", "https://x.com/jobs"),
            ]),
        ],
        skipped: vec![SkippedLink {
            name: "Blog".to_string(),
            url: "https://x.com/blog".to_string(),
            reason: SkipReason::NoLinks,
        }],
    };

    vec![
        SeedReport::new("https://x.com/".to_string(), outcome),
        SeedReport::with_error(
            "https://down.example/".to_string(),
            "HTTP request failed: connection refused".to_string(),
        ),
    ]
}

#[test]
fn test_report_format_from_str() {
    assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
    assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
    assert!("csv".parse::<ReportFormat>().is_err());
}

#[test]
fn test_text_report_summary() {
    colored::control::set_override(false);
    let report = generate_crawl_report(&sample_reports());

    assert!(report.contains("Seeds crawled: 2 (1 failed)"));
    assert!(report.contains("Pages with links: 1"));
    assert!(report.contains("Links found: 2"));
    assert!(report.contains("Links skipped: 1"));
}

#[test]
fn test_text_report_tree_and_errors() {
    colored::control::set_override(false);
    let report = generate_crawl_report(&sample_reports());

    assert!(report.contains("## https://x.com/"));
    assert!(report.contains("About /about (2 links)"));
    assert!(report.contains("└─ /team"));
    assert!(report.contains("└─ /jobs"));
    assert!(report.contains("/blog no same-origin links"));
    assert!(report.contains("✗ HTTP request failed: connection refused"));
}

#[test]
fn test_json_report_round_trips() {
    let rendered = render_report(&sample_reports(), ReportFormat::Json).unwrap();
    let parsed: Vec<SeedReport> = serde_json::from_str(&rendered).unwrap();

    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].nodes[0].child_count(), 2);
    assert_eq!(parsed[1].error.as_deref(), Some("HTTP request failed: connection refused"));
}

#[test]
fn test_empty_report() {
    colored::control::set_override(false);
    let report = generate_crawl_report(&[]);
    assert!(report.contains("Seeds crawled: 0 (0 failed)"));
}
