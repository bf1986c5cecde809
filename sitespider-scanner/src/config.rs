use std::time::Duration;

/// Ceiling on crawl units fetching at the same time.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Deadline for a single page fetch, in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 15;

pub const USER_AGENT: &str = concat!("Sitespider/", env!("CARGO_PKG_VERSION"));

/// Tunables for a crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub concurrency: usize,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// A zero ceiling would never admit a unit, so it is raised to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new()
    }
}
