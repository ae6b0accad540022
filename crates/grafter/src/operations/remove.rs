//! Removal of nodes and groups from the result graph.

use super::{Outcome, Skip};
use crate::domain::{referenced_groups, Graph, Node};
use std::collections::HashSet;

/// Delete `node_id` and every edge touching it. Groups are left as they are.
pub fn remove_node(result: &Graph, node_id: &str) -> Outcome {
    if !result.contains_node(node_id) {
        return Outcome::NotApplied(Skip::NodeNotInResult(node_id.to_string()));
    }

    Outcome::Applied(Graph {
        nodes: result
            .nodes
            .iter()
            .filter(|n| n.id != node_id)
            .cloned()
            .collect(),
        edges: result
            .edges
            .iter()
            .filter(|e| !e.touches(node_id))
            .cloned()
            .collect(),
        groups: result.groups.clone(),
    })
}

/// Delete `group_id` from result.
///
/// Nodes whose only group is `group_id` are removed; nodes that also carry
/// other groups lose the tag and stay. Edges survive when both endpoints do,
/// and groups are recomputed from the surviving nodes. Not applied when the
/// group is absent from result, or when no node would remain.
pub fn remove_group(result: &Graph, group_id: &str) -> Outcome {
    let tagged = result.nodes_in_group(group_id).next().is_some();
    if !tagged && !result.contains_group(group_id) {
        return Outcome::NotApplied(Skip::GroupNotInResult(group_id.to_string()));
    }

    let nodes: Vec<Node> = result
        .nodes
        .iter()
        .filter_map(|n| {
            if !n.in_group(group_id) {
                return Some(n.clone());
            }
            let remaining: Vec<String> = n
                .group_ids
                .iter()
                .filter(|g| *g != group_id)
                .cloned()
                .collect();
            (!remaining.is_empty()).then(|| Node {
                group_ids: remaining,
                ..n.clone()
            })
        })
        .collect();

    if nodes.is_empty() {
        return Outcome::NotApplied(Skip::WouldEmptyResult(group_id.to_string()));
    }

    let survivors: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let edges = result
        .edges
        .iter()
        .filter(|e| survivors.contains(e.from.as_str()) && survivors.contains(e.to.as_str()))
        .cloned()
        .collect();
    let groups = referenced_groups(&result.groups, &nodes);

    Outcome::Applied(Graph {
        nodes,
        edges,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, Group, GroupKind, NodeKind};

    fn applied(outcome: Outcome) -> Graph {
        match outcome {
            Outcome::Applied(graph) => graph,
            Outcome::NotApplied(skip) => panic!("expected applied, skipped: {skip}"),
        }
    }

    /// A (g1), B (g1, g2), C (no group); `A -> B -> C`
    fn sample() -> Graph {
        Graph {
            nodes: vec![
                Node::new("A", "A", NodeKind::Process).with_groups(["g1"]),
                Node::new("B", "B", NodeKind::Process).with_groups(["g1", "g2"]),
                Node::new("C", "C", NodeKind::Data),
            ],
            edges: vec![Edge::new("A", "B"), Edge::new("B", "C")],
            groups: vec![
                Group::new("g1", GroupKind::System),
                Group::new("g2", GroupKind::Team),
            ],
        }
    }

    // ========== remove_node ==========

    #[test]
    fn test_remove_node_drops_touching_edges() {
        let graph = applied(remove_node(&sample(), "B"));
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert!(graph.edges.is_empty());
        assert_eq!(graph.groups, sample().groups);
    }

    #[test]
    fn test_remove_absent_node_is_not_applied() {
        assert_eq!(
            remove_node(&sample(), "Z"),
            Outcome::NotApplied(Skip::NodeNotInResult("Z".to_string()))
        );
    }

    // ========== remove_group ==========

    #[test]
    fn test_remove_group_keeps_multi_group_nodes() {
        let graph = applied(remove_group(&sample(), "g1"));

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(graph.node("B").unwrap().group_ids, vec!["g2".to_string()]);
        assert_eq!(graph.edges, vec![Edge::new("B", "C")]);
        assert_eq!(graph.groups, vec![Group::new("g2", GroupKind::Team)]);
        assert_eq!(graph.nodes_in_group("g1").count(), 0);
    }

    #[test]
    fn test_remove_absent_group_is_not_applied() {
        assert_eq!(
            remove_group(&sample(), "g9"),
            Outcome::NotApplied(Skip::GroupNotInResult("g9".to_string()))
        );
    }

    #[test]
    fn test_remove_group_that_would_empty_result() {
        let graph = Graph {
            nodes: vec![Node::new("A", "A", NodeKind::Process).with_groups(["g1"])],
            edges: vec![],
            groups: vec![Group::new("g1", GroupKind::System)],
        };
        assert_eq!(
            remove_group(&graph, "g1"),
            Outcome::NotApplied(Skip::WouldEmptyResult("g1".to_string()))
        );
    }
}
