use crate::canonical::{canonicalize, split_origin};
use crate::config::CrawlerConfig;
use crate::error::{Result, ScanError};
use crate::result::LinkNode;
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Something that can retrieve the body of a page.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Something that can list the anchors of an HTML document.
pub trait AnchorParser: Send + Sync {
    fn parse_anchors(&self, body: &str) -> Result<Vec<Anchor>>;
}

/// An `<a>` element: its visible text and raw `href`, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.fetch_timeout)
            .connect_timeout(config.fetch_timeout / 2)
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            timeout_secs: config.fetch_timeout.as_secs(),
        })
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> ScanError {
        if err.is_timeout() {
            ScanError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            ScanError::HttpError(err)
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>> {
        async move {
            debug!("Fetching {}", url);
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| self.classify(url, e))?;

            // Error pages are still parsed for links.
            let status = response.status();
            if !status.is_success() {
                debug!("{} answered {}", url, status);
            }

            response.text().await.map_err(|e| self.classify(url, e))
        }
        .boxed()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlAnchorParser;

impl AnchorParser for HtmlAnchorParser {
    fn parse_anchors(&self, body: &str) -> Result<Vec<Anchor>> {
        let document = Html::parse_document(body);
        let selector = Selector::parse("a")
            .map_err(|e| ScanError::ParseError(format!("Failed to parse <a> selector: {:?}", e)))?;

        Ok(document
            .select(&selector)
            .map(|element| Anchor {
                text: element.text().collect(),
                href: element.value().attr("href").map(str::to_string),
            })
            .collect())
    }
}

/// Fetch + parse + canonicalize: "give me the same-origin links on this page".
#[derive(Clone)]
pub struct LinkExtractor {
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<dyn AnchorParser>,
    fetch_timeout: Duration,
}

impl LinkExtractor {
    pub fn new(fetcher: Arc<dyn Fetcher>, parser: Arc<dyn AnchorParser>) -> Self {
        Self {
            fetcher,
            parser,
            fetch_timeout: CrawlerConfig::default().fetch_timeout,
        }
    }

    /// reqwest fetcher and scraper parser.
    pub fn http(config: &CrawlerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(HtmlAnchorParser))
            .with_fetch_timeout(config.fetch_timeout))
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub async fn extract_links(&self, page_url: &str) -> Result<Vec<LinkNode>> {
        let (origin, _) = split_origin(page_url)?;

        let body = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch(page_url))
            .await
            .map_err(|_| ScanError::Timeout {
                url: page_url.to_string(),
                secs: self.fetch_timeout.as_secs(),
            })??;

        let anchors = self.parser.parse_anchors(&body)?;
        let links = links_from_anchors(anchors, &origin);
        debug!("Found {} links on {}", links.len(), page_url);
        Ok(links)
    }
}

/// Keep the anchors that canonicalize onto `origin`, in document order.
pub fn links_from_anchors(anchors: impl IntoIterator<Item = Anchor>, origin: &str) -> Vec<LinkNode> {
    anchors
        .into_iter()
        .filter_map(|anchor| {
            let href = anchor.href?;
            match canonicalize(href.trim(), origin) {
                Ok(url) => Some(LinkNode::new(anchor.text.trim(), url)),
                Err(rejection) => {
                    debug!("Skipping link {}: {}", href, rejection);
                    None
                }
            }
        })
        .collect()
}
