//! Constructive operations: copy elements from base into result.

use super::{Outcome, Skip};
use crate::domain::{Edge, Graph, Group, Node};
use std::collections::HashSet;

/// Accumulates elements to copy into a result graph.
///
/// Nodes and groups are deduplicated by id, edges by `(from, to)`; the first
/// occurrence wins. Nothing already in the result is replaced.
pub(crate) struct Merge<'r> {
    result: &'r Graph,
    node_ids: HashSet<String>,
    group_ids: HashSet<String>,
    edge_keys: HashSet<(String, String)>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    groups: Vec<Group>,
}

impl<'r> Merge<'r> {
    pub(crate) fn onto(result: &'r Graph) -> Self {
        Self {
            result,
            node_ids: result.nodes.iter().map(|n| n.id.clone()).collect(),
            group_ids: result.groups.iter().map(|g| g.id.clone()).collect(),
            edge_keys: result
                .edges
                .iter()
                .map(|e| (e.from.clone(), e.to.clone()))
                .collect(),
            nodes: Vec::new(),
            edges: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn node(&mut self, node: &Node) {
        if self.node_ids.insert(node.id.clone()) {
            self.nodes.push(node.clone());
        }
    }

    pub(crate) fn edge(&mut self, edge: &Edge) {
        if self.edge_keys.insert((edge.from.clone(), edge.to.clone())) {
            self.edges.push(edge.clone());
        }
    }

    pub(crate) fn group(&mut self, group: &Group) {
        if self.group_ids.insert(group.id.clone()) {
            self.groups.push(group.clone());
        }
    }

    /// Whether the node is in the result or already queued
    pub(crate) fn has_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    /// Append the queued elements, or report that nothing was new.
    pub(crate) fn finish(self) -> Outcome {
        if self.nodes.is_empty() && self.edges.is_empty() && self.groups.is_empty() {
            return Outcome::NotApplied(Skip::NothingNew);
        }

        let mut graph = self.result.clone();
        graph.nodes.extend(self.nodes);
        graph.edges.extend(self.edges);
        graph.groups.extend(self.groups);
        Outcome::Applied(graph)
    }
}

/// Copy everything from base into result.
pub fn add_all(base: &Graph, result: &Graph) -> Outcome {
    let mut merge = Merge::onto(result);
    base.nodes.iter().for_each(|n| merge.node(n));
    base.edges.iter().for_each(|e| merge.edge(e));
    base.groups.iter().for_each(|g| merge.group(g));
    merge.finish()
}

/// Copy one node from base, plus the base edges linking it to nodes already
/// in result.
pub fn add_node(base: &Graph, result: &Graph, node_id: &str) -> Outcome {
    let Some(node) = base.node(node_id) else {
        return Outcome::NotApplied(Skip::NodeNotInBase(node_id.to_string()));
    };
    if result.contains_node(node_id) {
        return Outcome::NotApplied(Skip::AlreadyPresent(node_id.to_string()));
    }

    let mut merge = Merge::onto(result);
    merge.node(node);
    for edge in base.edges.iter().filter(|e| e.touches(node_id)) {
        let other = if edge.from == node_id { &edge.to } else { &edge.from };
        if merge.has_node(other) {
            merge.edge(edge);
        }
    }
    merge.finish()
}

/// Copy a group from base, together with its member nodes, every base edge
/// touching a member, and the base nodes at the far end of those edges.
pub fn add_group(base: &Graph, result: &Graph, group_id: &str) -> Outcome {
    let Some(group) = base.group(group_id) else {
        return Outcome::NotApplied(Skip::GroupNotInBase(group_id.to_string()));
    };
    if result.contains_group(group_id) {
        return Outcome::NotApplied(Skip::AlreadyPresent(group_id.to_string()));
    }

    let members: HashSet<&str> = base.nodes_in_group(group_id).map(|n| n.id.as_str()).collect();
    let edges: Vec<&Edge> = base
        .edges
        .iter()
        .filter(|e| members.contains(e.from.as_str()) || members.contains(e.to.as_str()))
        .collect();
    let endpoints: HashSet<&str> = edges
        .iter()
        .flat_map(|e| [e.from.as_str(), e.to.as_str()])
        .collect();

    let mut merge = Merge::onto(result);
    merge.group(group);
    base.nodes
        .iter()
        .filter(|n| members.contains(n.id.as_str()) || endpoints.contains(n.id.as_str()))
        .for_each(|n| merge.node(n));
    for edge in edges {
        if merge.has_node(&edge.from) && merge.has_node(&edge.to) {
            merge.edge(edge);
        }
    }
    merge.finish()
}
