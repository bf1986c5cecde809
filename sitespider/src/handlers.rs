use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use sitespider_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl};
use sitespider_core::report::{ReportFormat, render_report};
use sitespider_core::response::status_json;
use sitespider_scanner::SiteMapCache;
use sitespider_scanner::config::{DEFAULT_CONCURRENCY, FETCH_TIMEOUT_SECS};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, warn};
use url::Url;

// Helper functions for crawl handler

/// Load URLs from either a file or a single URL argument
pub fn load_urls_from_source(url: Option<&Url>, hosts_file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.as_str().to_string()])
    } else {
        Err(anyhow!("Either --url or --hosts-file must be provided"))
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hosts file {}", path.display()))?;

    let urls: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_url_line(line.trim()))
        .collect();

    if urls.is_empty() {
        bail!("No valid URLs found in {}", path.display());
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok_and(|url| url.has_host()) {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    warn!("Skipping invalid URL '{}'", line);
    None
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub fn init_logging(verbosity: u8, quiet: bool) {
    let level = match (quiet, verbosity) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

pub fn print_banner() {
    println!(
        "{} {}",
        "sitespider".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) -> Result<()> {
    let url = sub_matches.get_one::<Url>("url");
    let hosts_file = sub_matches
        .get_one::<String>("hosts-file")
        .map(|p| expand_path(p));
    let concurrency = *sub_matches
        .get_one::<usize>("concurrency")
        .unwrap_or(&DEFAULT_CONCURRENCY);
    let timeout_secs = *sub_matches
        .get_one::<u64>("timeout")
        .unwrap_or(&FETCH_TIMEOUT_SECS);
    let format: ReportFormat = sub_matches
        .get_one::<String>("format")
        .map_or("text", String::as_str)
        .parse()?;
    let output = sub_matches.get_one::<PathBuf>("output");
    let show_cache = sub_matches.get_flag("show-cache");

    let urls = load_urls_from_source(url, hosts_file.as_deref())?;

    // Keep stdout clean for machine-readable output
    let chatty = !quiet && format == ReportFormat::Text && output.is_none();
    if chatty {
        println!("\n🕷️  Crawling {} seed(s)", urls.len());
        println!("Concurrency: {}", concurrency);
        println!("Fetch timeout: {}s", timeout_secs);
        println!("Depth: 2 hops, same origin only\n");
    }

    let options = CrawlOptions {
        urls,
        concurrency,
        timeout_secs,
        show_progress_bars: chatty,
    };

    let progress_callback: Option<CrawlProgressCallback> = if chatty {
        Some(Arc::new(|msg: String| {
            println!("{}", msg);
        }))
    } else {
        None
    };

    let cache = SiteMapCache::shared();
    let reports = execute_crawl(options, Arc::clone(&cache), progress_callback).await?;

    if chatty {
        println!("\n✓ Crawl complete!\n");
    }

    let report = render_report(&reports, format)?;
    match output {
        Some(path) => {
            fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    if show_cache {
        println!("{}", status_json(&cache)?);
    }

    if !reports.is_empty() && reports.iter().all(|r| !r.is_success()) {
        bail!("All {} seed(s) failed to crawl", reports.len());
    }

    Ok(())
}
