//! Query result items

use xot::Node;

/// A single item selected by an XPath expression
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    /// A node in the queried document. This is a handle into the tree owned
    /// by [`super::Document`]; it is only meaningful together with that
    /// document's `Xot`.
    Node(Node),
    /// String value of an atomic result, e.g. from `count(//item)`
    Atomic(String),
}

impl Match {
    /// The node handle, if this match is a node
    pub fn node(&self) -> Option<Node> {
        match self {
            Match::Node(node) => Some(*node),
            Match::Atomic(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Match::Node(_))
    }
}
