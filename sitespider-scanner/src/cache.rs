use crate::result::LinkNode;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Process-wide map from canonical URL to the links found on that page.
///
/// Values are cloned in and out, so callers always hold their own snapshot.
/// Entries are never refreshed or evicted. Two requests racing on the same
/// key may both write; the last write wins.
#[derive(Debug, Default)]
pub struct SiteMapCache {
    entries: RwLock<HashMap<String, Vec<LinkNode>>>,
}

pub type SiteMapCacheRef = Arc<SiteMapCache>;

impl SiteMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SiteMapCacheRef {
        Arc::new(Self::new())
    }

    pub fn get(&self, url: &str) -> Option<Vec<LinkNode>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(url).cloned()
    }

    pub fn put(&self, url: impl Into<String>, links: Vec<LinkNode>) {
        let url = url.into();
        debug!("Caching {} links for {}", links.len(), url);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(url, links);
    }

    pub fn contains(&self, url: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every entry, ordered by URL.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<LinkNode>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|(url, links)| (url.clone(), links.clone()))
            .collect()
    }
}
