use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use sitespider_scanner::config::{DEFAULT_CONCURRENCY, FETCH_TIMEOUT_SECS};
use sitespider_scanner::{CrawlOutcome, Crawler, CrawlerConfig, LinkNode, SiteMapCacheRef, SkippedLink};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub urls: Vec<String>,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: FETCH_TIMEOUT_SECS,
            show_progress_bars: false,
        }
    }
}

impl CrawlOptions {
    pub fn crawler_config(&self) -> CrawlerConfig {
        CrawlerConfig::new()
            .with_concurrency(self.concurrency)
            .with_fetch_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// What one seed produced: its childed first-hop pages, or the error that
/// failed the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub seed: String,
    pub nodes: Vec<LinkNode>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skipped: Vec<SkippedLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeedReport {
    pub fn new(seed: String, outcome: CrawlOutcome) -> Self {
        Self {
            seed,
            nodes: outcome.nodes,
            skipped: outcome.skipped,
            error: None,
        }
    }

    pub fn with_error(seed: String, error: String) -> Self {
        Self {
            seed,
            nodes: Vec::new(),
            skipped: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn total_links(&self) -> usize {
        self.nodes.iter().map(LinkNode::child_count).sum()
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Crawl every seed in `options` in turn against the shared `cache`.
///
/// A failing seed is reported in its [`SeedReport`] and does not stop the
/// remaining seeds. Only failing to set up the HTTP client is an error.
pub async fn execute_crawl(
    options: CrawlOptions,
    cache: SiteMapCacheRef,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<Vec<SeedReport>> {
    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid progress bar template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&processed_count);
    let pb_clone = progress_bar.clone();
    let internal_progress_callback: sitespider_scanner::ProgressCallback =
        Arc::new(move |url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!("Crawling... {} pages fetched ({})", count, url));
            }
        });

    let crawler = Crawler::from_config(&options.crawler_config(), cache)
        .context("Failed to create HTTP client")?
        .with_progress_callback(internal_progress_callback);

    let mut reports = Vec::with_capacity(options.urls.len());
    for (idx, seed) in options.urls.iter().enumerate() {
        if let Some(ref callback) = progress_callback
            && options.urls.len() > 1
        {
            callback(format!(
                "Crawling host {}/{}: {}",
                idx + 1,
                options.urls.len(),
                seed
            ));
        }

        match crawler.crawl_detailed(seed).await {
            Ok(outcome) => reports.push(SeedReport::new(seed.clone(), outcome)),
            Err(e) => {
                warn!("Failed to crawl {}: {}", seed, e);
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to crawl {}: {}", seed, e));
                }
                reports.push(SeedReport::with_error(seed.clone(), e.to_string()));
            }
        }
    }

    if let Some(ref pb) = progress_bar {
        let total = processed_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Crawl complete! {} pages fetched", total));
    }

    Ok(reports)
}
