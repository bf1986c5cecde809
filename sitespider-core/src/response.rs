//! Payloads handed across the request and status boundaries.
//!
//! The CLI goes through [`execute_crawl`](crate::crawl::execute_crawl).
//! [`crawl_response`] and [`status_json`] are the entry points for a router
//! embedding the crawler: one request per seed, answered with
//! [`CrawlResponse::status`] and [`CrawlResponse::body`].

use sitespider_scanner::{Crawler, LinkNode, SiteMapCache};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Result of one crawl request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlResponse {
    Success(Vec<LinkNode>),
    Failure { status: u16, message: String },
}

impl CrawlResponse {
    pub fn status(&self) -> u16 {
        match self {
            CrawlResponse::Success(_) => STATUS_OK,
            CrawlResponse::Failure { status, .. } => *status,
        }
    }

    /// JSON array of `{name, url, child_urls}` on success, the error text
    /// otherwise.
    pub fn body(&self) -> serde_json::Result<String> {
        match self {
            CrawlResponse::Success(nodes) => serde_json::to_string(nodes),
            CrawlResponse::Failure { message, .. } => Ok(message.clone()),
        }
    }
}

/// Crawl a seed address as submitted by a user.
pub async fn crawl_response(crawler: &Crawler, seed: &str) -> CrawlResponse {
    match crawler.crawl(seed.trim()).await {
        Ok(nodes) => CrawlResponse::Success(nodes),
        Err(e) => CrawlResponse::Failure {
            status: STATUS_INTERNAL_ERROR,
            message: e.to_string(),
        },
    }
}

/// Entire cache content as a JSON object mapping URL to its child links.
pub fn status_json(cache: &SiteMapCache) -> serde_json::Result<String> {
    serde_json::to_string(&cache.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_body_is_error_text() {
        let response = CrawlResponse::Failure {
            status: STATUS_INTERNAL_ERROR,
            message: "boom".to_string(),
        };
        assert_eq!(response.status(), 500);
        assert_eq!(response.body().unwrap(), "boom");
    }

    #[test]
    fn test_success_body_is_json_array() {
        let response = CrawlResponse::Success(vec![
            LinkNode::new("About", "https://x.com/about")
                .with_children(vec![LinkNode::new("Team", "https://x.com/team")]),
        ]);
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = serde_json::from_str(&response.body().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{
                "name": "About",
                "url": "https://x.com/about",
                "child_urls": [{"name": "Team", "url": "https://x.com/team", "child_urls": null}]
            }])
        );
    }

    #[test]
    fn test_status_of_empty_cache() {
        assert_eq!(status_json(&SiteMapCache::new()).unwrap(), "{}");
    }

    #[test]
    fn test_status_lists_cached_pages() {
        let cache = SiteMapCache::new();
        cache.put("https://x.com/", vec![LinkNode::new("About", "https://x.com/about")]);

        let status: serde_json::Value = serde_json::from_str(&status_json(&cache).unwrap()).unwrap();
        assert_eq!(
            status,
            serde_json::json!({
                "https://x.com/": [{"name": "About", "url": "https://x.com/about", "child_urls": null}]
            })
        );
    }
}
