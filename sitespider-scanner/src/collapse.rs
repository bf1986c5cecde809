use crate::result::LinkNode;
use std::collections::HashSet;

/// Keep the first node for each URL, preserving the order of first
/// occurrences.
pub fn collapse(nodes: Vec<LinkNode>) -> Vec<LinkNode> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes
        .into_iter()
        .filter(|node| seen.insert(node.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, url: &str) -> LinkNode {
        LinkNode::new(name, url)
    }

    #[test]
    fn test_collapse_keeps_first_occurrence() {
        let nodes = vec![node("first", "a"), node("b", "b"), node("second", "a")];
        let collapsed = collapse(nodes);
        assert_eq!(collapsed, vec![node("first", "a"), node("b", "b")]);
    }

    #[test]
    fn test_collapse_preserves_order() {
        let nodes = vec![
            node("", "c"),
            node("", "a"),
            node("", "c"),
            node("", "b"),
            node("", "a"),
        ];
        let urls: Vec<String> = collapse(nodes).into_iter().map(|n| n.url).collect();
        assert_eq!(urls, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_collapse_empty() {
        assert!(collapse(Vec::new()).is_empty());
    }
}
