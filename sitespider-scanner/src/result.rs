use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discovered link. `children` is only populated for pages that were
/// crawled themselves; second-hop links are leaves and serialize as
/// `"child_urls": null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkNode {
    pub name: String,
    pub url: String,
    #[serde(rename = "child_urls")]
    pub children: Option<Vec<LinkNode>>,
}

impl LinkNode {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<LinkNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, Vec::len)
    }
}

/// Why a first-hop link ended up without children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    Fetch(String),
    Timeout,
    Parse(String),
    InvalidUrl(String),
    NoLinks,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(reason) => write!(f, "fetch failed: {}", reason),
            SkipReason::Timeout => write!(f, "fetch timed out"),
            SkipReason::Parse(reason) => write!(f, "parse failed: {}", reason),
            SkipReason::InvalidUrl(reason) => write!(f, "invalid url: {}", reason),
            SkipReason::NoLinks => write!(f, "no same-origin links"),
        }
    }
}

impl From<ScanError> for SkipReason {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Timeout { .. } => SkipReason::Timeout,
            ScanError::ParseError(reason) => SkipReason::Parse(reason),
            ScanError::InvalidSeed { reason, .. } => SkipReason::InvalidUrl(reason),
            ScanError::HttpError(e) if e.is_timeout() => SkipReason::Timeout,
            other => SkipReason::Fetch(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLink {
    pub name: String,
    pub url: String,
    pub reason: SkipReason,
}

impl SkippedLink {
    pub fn new(node: LinkNode, reason: SkipReason) -> Self {
        Self {
            name: node.name,
            url: node.url,
            reason,
        }
    }
}

/// Full result of one crawl: the childed first-hop nodes plus every
/// first-hop link that was left out and why.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlOutcome {
    pub nodes: Vec<LinkNode>,
    pub skipped: Vec<SkippedLink>,
}

impl CrawlOutcome {
    pub fn total_links(&self) -> usize {
        self.nodes.iter().map(LinkNode::child_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_serializes_null_children() {
        let node = LinkNode::new("About", "https://x.com/about");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "About", "url": "https://x.com/about", "child_urls": null})
        );
    }

    #[test]
    fn test_has_children_requires_non_empty() {
        let node = LinkNode::new("", "https://x.com/a");
        assert!(!node.has_children());
        assert!(!node.clone().with_children(Vec::new()).has_children());
        assert!(
            node.with_children(vec![LinkNode::new("b", "https://x.com/b")])
                .has_children()
        );
    }

    #[test]
    fn test_skip_reason_from_scan_error() {
        let timeout = ScanError::Timeout {
            url: "https://x.com/slow".to_string(),
            secs: 15,
        };
        assert_eq!(SkipReason::from(timeout), SkipReason::Timeout);

        let parse = ScanError::ParseError("bad selector".to_string());
        assert_eq!(
            SkipReason::from(parse),
            SkipReason::Parse("bad selector".to_string())
        );

        let fetch = ScanError::fetch("https://x.com/down", "connection refused");
        assert!(matches!(SkipReason::from(fetch), SkipReason::Fetch(msg) if msg.contains("connection refused")));
    }
}
