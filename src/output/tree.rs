//! Sitemap tree built incrementally during a crawl
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Every node except
//! the root carries a link category and the entity-encoded link address.
//! Each node also indexes its children by address, so the crawler finds the
//! node for a link without scanning the tree.

use crate::crawler::{LinkCategory, PageLink};
use quick_xml::escape::escape;
use std::collections::HashMap;

/// Handle to a node in a [`SitemapTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One entry in the sitemap
#[derive(Debug, Clone)]
pub struct SitemapNode {
    /// None only for the root container
    pub category: Option<LinkCategory>,

    /// Entity-encoded address; None only for the root container
    pub loc: Option<String>,

    pub parent: Option<NodeId>,
    children: Vec<NodeId>,
    child_index: HashMap<String, NodeId>,
}

impl SitemapNode {
    fn new(category: Option<LinkCategory>, loc: Option<String>, parent: Option<NodeId>) -> Self {
        Self {
            category,
            loc,
            parent,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    /// Tag name of this node in the output document
    pub fn tag_name(&self) -> &'static str {
        self.category
            .map(|category| category.tag_name())
            .unwrap_or(ROOT_TAG)
    }
}

/// Tag of the synthetic root node
pub const ROOT_TAG: &str = "SITEMAP";

/// Tag of the address leaf under every link node
pub const LOC_TAG: &str = "LOC";

/// Rooted, ordered tree mirroring the crawl
#[derive(Debug, Clone)]
pub struct SitemapTree {
    nodes: Vec<SitemapNode>,
}

impl Default for SitemapTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SitemapTree {
    /// Creates a tree holding only the root container
    pub fn new() -> Self {
        Self {
            nodes: vec![SitemapNode::new(None, None, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends one node per link under `parent`, in link order
    ///
    /// Returns the ids of the new nodes. When `parent` already has a child
    /// with the same address, lookups keep resolving to the older node.
    pub fn attach(&mut self, parent: NodeId, links: &[PageLink]) -> Vec<NodeId> {
        let mut created = Vec::with_capacity(links.len());

        for link in links {
            let id = NodeId(self.nodes.len());
            let loc = encode_loc(&link.target);
            self.nodes.push(SitemapNode::new(Some(link.category), Some(loc.clone()), Some(parent)));

            let parent_node = &mut self.nodes[parent.0];
            parent_node.children.push(id);
            parent_node.child_index.entry(loc).or_insert(id);
            created.push(id);
        }

        created
    }

    /// Finds the child of `parent` whose address equals `target`
    ///
    /// Only direct children of `parent` are considered.
    pub fn find_child(&self, parent: NodeId, target: &str) -> Option<NodeId> {
        self.nodes
            .get(parent.0)?
            .child_index
            .get(encode_loc(target).as_str())
            .copied()
    }

    pub fn node(&self, id: NodeId) -> &SitemapNode {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Total number of nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of ancestors between `id` and the root (root children are at depth 1)
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }

    /// Counts the link nodes of one category anywhere in the tree
    pub fn count_by_category(&self, category: LinkCategory) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.category == Some(category))
            .count()
    }

    /// Iterates over all node ids in creation order, root first
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// Entity-encodes a link address the way it is stored in `LOC`
///
/// # Examples
///
/// ```
/// use sitemap_ripple::output::encode_loc;
///
/// assert_eq!(encode_loc("https://a.com/?x=1&y=2"), "https://a.com/?x=1&amp;y=2");
/// ```
pub fn encode_loc(target: &str) -> String {
    escape(target).into_owned()
}
