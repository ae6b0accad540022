//! Domain types for grouped graphs.
//!
//! A [`Graph`] is a plain value: every operation that "modifies" a graph
//! returns a new one. Node and group ids share a single namespace, which the
//! validator in [`crate::graph::validation`] enforces.
//!
//! The serialized field names (`type`, `groups`) match the JSON documents the
//! diagram front-end and the bundled sources use.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// Prefix of the synthetic node that replaces a collapsed group.
pub const COLLAPSED_GROUP_PREFIX: &str = "GROUP_";

/// Kind of a node, used by renderers to pick a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A step that transforms data
    Process,

    /// A dataset or table
    Data,

    /// A synthetic node standing in for a collapsed group
    Group,

    /// A dashboard or report
    View,

    /// A database
    Database,
}

/// Kind of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// A database or catalog
    Database,

    /// A project
    Project,

    /// A system or platform
    System,

    /// A workflow
    Workflow,

    /// An owning team
    Team,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Process => "process",
            NodeKind::Data => "data",
            NodeKind::Group => "group",
            NodeKind::View => "view",
            NodeKind::Database => "database",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroupKind::Database => "database",
            GroupKind::Project => "project",
            GroupKind::System => "system",
            GroupKind::Workflow => "workflow",
            GroupKind::Team => "team",
        };
        write!(f, "{s}")
    }
}

/// A node in the graph. `id` is its only identity; `name` is display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier (shared namespace with group ids)
    pub id: String,

    /// Display name
    pub name: String,

    /// Node kind
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Ids of the groups this node belongs to, in declaration order
    #[serde(rename = "groups", default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
}

impl Node {
    /// Create a node that belongs to no group
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            group_ids: Vec::new(),
        }
    }

    /// Builder-style helper to set the node's groups
    #[must_use]
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_ids = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the node carries the given group id
    pub fn in_group(&self, group_id: &str) -> bool {
        self.group_ids.iter().any(|g| g == group_id)
    }
}

/// A directed edge. For deduplication an edge is identified by `(from, to)`;
/// the label does not take part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub from: String,

    /// Target node id
    pub to: String,

    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// Create an unlabelled edge
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Builder-style helper to attach a label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The `(from, to)` pair used as the edge's identity
    pub fn key(&self) -> (&str, &str) {
        (self.from.as_str(), self.to.as_str())
    }

    /// Whether either endpoint is `node_id`
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

/// A group label. Membership lives on the nodes, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier (shared namespace with node ids)
    pub id: String,

    /// Group kind
    #[serde(rename = "type")]
    pub kind: GroupKind,
}

impl Group {
    /// Create a group
    pub fn new(id: impl Into<String>, kind: GroupKind) -> Self {
        Self { id: id.into(), kind }
    }
}

/// A directed, grouped graph.
///
/// Nodes and groups are unique by id; order is preserved so that serializing
/// the same pipeline output twice yields identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Nodes, unique by id
    pub nodes: Vec<Node>,

    /// Directed edges
    pub edges: Vec<Edge>,

    /// Groups, unique by id
    pub groups: Vec<Group>,
}

/// Element counts of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Number of nodes
    pub nodes: usize,
    /// Number of edges
    pub edges: usize,
    /// Number of groups
    pub groups: usize,
}

impl Graph {
    /// The empty graph
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the graph has no nodes, edges or groups
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.groups.is_empty()
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether a node with this id exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Look up a group by id
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Whether a group with this id exists
    pub fn contains_group(&self, id: &str) -> bool {
        self.group(id).is_some()
    }

    /// Whether an edge with this `(from, to)` pair exists
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.key() == (from, to))
    }

    /// All node ids
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Nodes that carry the given group id, in graph order
    pub fn nodes_in_group<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.in_group(group_id))
    }

    /// Restrict the graph to `keep`.
    ///
    /// Keeps the listed nodes (in their current order), the edges whose
    /// endpoints both survive, and the groups still referenced by a
    /// surviving node.
    #[must_use]
    pub fn restrict_to(&self, keep: &HashSet<String>) -> Graph {
        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .filter(|n| keep.contains(&n.id))
            .cloned()
            .collect();

        let edges = self
            .edges
            .iter()
            .filter(|e| keep.contains(&e.from) && keep.contains(&e.to))
            .cloned()
            .collect();

        let groups = referenced_groups(&self.groups, &nodes);

        Graph {
            nodes,
            edges,
            groups,
        }
    }

    /// Element counts
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            groups: self.groups.len(),
        }
    }

    /// SHA-256 hex digest of the compact JSON form.
    ///
    /// Two graphs with the same fingerprint serialize to the same bytes.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Groups (in their original order) referenced by at least one of `nodes`.
pub(crate) fn referenced_groups(groups: &[Group], nodes: &[Node]) -> Vec<Group> {
    let used: HashSet<&str> = nodes
        .iter()
        .flat_map(|n| n.group_ids.iter().map(String::as_str))
        .collect();

    groups
        .iter()
        .filter(|g| used.contains(g.id.as_str()))
        .cloned()
        .collect()
}
