use crate::cache::SiteMapCacheRef;
use crate::canonical::split_origin;
use crate::collapse::collapse;
use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::extractor::LinkExtractor;
use crate::result::{CrawlOutcome, LinkNode, SkipReason, SkippedLink};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Called with the URL of every first-hop page as it is admitted to fetch.
pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

type UnitResult = std::result::Result<LinkNode, SkippedLink>;

/// Two-hop crawler: the seed page, then every same-origin page it links to.
///
/// Results are read from and written to the shared [`SiteMapCache`], so a
/// second crawl of a known seed performs no fetches at all.
///
/// [`SiteMapCache`]: crate::cache::SiteMapCache
pub struct Crawler {
    extractor: LinkExtractor,
    cache: SiteMapCacheRef,
    concurrency: usize,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(extractor: LinkExtractor, cache: SiteMapCacheRef) -> Self {
        Self {
            extractor,
            cache,
            concurrency: CrawlerConfig::default().concurrency,
            progress_callback: None,
        }
    }

    /// Crawler backed by the reqwest fetcher and the scraper anchor parser.
    pub fn from_config(config: &CrawlerConfig, cache: SiteMapCacheRef) -> Result<Self> {
        let extractor = LinkExtractor::http(config)?;
        Ok(Self::new(extractor, cache).with_concurrency(config.concurrency))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn cache(&self) -> &SiteMapCacheRef {
        &self.cache
    }

    /// Crawl `seed_url` and return the first-hop pages that have links of
    /// their own. Order follows unit completion, not document order.
    pub async fn crawl(&self, seed_url: &str) -> Result<Vec<LinkNode>> {
        Ok(self.crawl_detailed(seed_url).await?.nodes)
    }

    /// Like [`Crawler::crawl`], but also reports every first-hop link that
    /// was left out.
    ///
    /// Only an invalid seed or a failed seed fetch is an error. Failures on
    /// first-hop pages are recorded in [`CrawlOutcome::skipped`].
    pub async fn crawl_detailed(&self, seed_url: &str) -> Result<CrawlOutcome> {
        let (_, canonical_seed) = split_origin(seed_url)?;
        info!("Starting crawl of {} with {} workers", seed_url, self.concurrency);

        let first_hop = match self.cache.get(&canonical_seed) {
            Some(links) => {
                debug!("Cache hit for seed {}", canonical_seed);
                links
            }
            None => {
                let links = collapse(self.extractor.extract_links(seed_url).await?);
                self.cache.put(canonical_seed.clone(), links.clone());
                links
            }
        };
        info!("Total links found: {}", first_hop.len());

        let gate = Arc::new(Semaphore::new(self.concurrency));
        let mut units = JoinSet::new();
        for node in first_hop {
            units.spawn(crawl_unit(
                node,
                self.extractor.clone(),
                Arc::clone(&self.cache),
                Arc::clone(&gate),
                self.progress_callback.clone(),
            ));
        }

        let mut outcome = CrawlOutcome::default();
        while let Some(joined) = units.join_next().await {
            match joined? {
                Ok(node) => outcome.nodes.push(node),
                Err(skipped) => outcome.skipped.push(skipped),
            }
        }
        outcome.nodes = collapse(outcome.nodes);

        info!(
            "Crawl of {} complete. {} pages with links, {} skipped",
            canonical_seed,
            outcome.nodes.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }
}

async fn crawl_unit(
    node: LinkNode,
    extractor: LinkExtractor,
    cache: SiteMapCacheRef,
    gate: Arc<Semaphore>,
    progress_callback: Option<ProgressCallback>,
) -> UnitResult {
    let children = match cache.get(&node.url) {
        Some(children) => {
            debug!("Cache hit for {}", node.url);
            children
        }
        None => {
            let Ok(_permit) = gate.acquire_owned().await else {
                let reason = SkipReason::Fetch("admission gate closed".to_string());
                return Err(SkippedLink::new(node, reason));
            };

            if let Some(ref callback) = progress_callback {
                callback(node.url.clone());
            }

            match extractor.extract_links(&node.url).await {
                Ok(links) => {
                    let links = collapse(links);
                    cache.put(node.url.clone(), links.clone());
                    links
                }
                Err(e) => {
                    warn!("Crawl error for {}: {}", node.url, e);
                    return Err(SkippedLink::new(node, SkipReason::from(e)));
                }
            }
        }
    };

    if children.is_empty() {
        debug!("No links on {}", node.url);
        return Err(SkippedLink::new(node, SkipReason::NoLinks));
    }

    Ok(node.with_children(children))
}
