pub mod cache;
pub mod canonical;
pub mod collapse;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod result;

pub use cache::{SiteMapCache, SiteMapCacheRef};
pub use canonical::{Rejection, canonicalize, split_origin};
pub use collapse::collapse;
pub use config::CrawlerConfig;
pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use extractor::{Anchor, AnchorParser, Fetcher, HtmlAnchorParser, HttpFetcher, LinkExtractor};
pub use result::{CrawlOutcome, LinkNode, SkipReason, SkippedLink};
