//! Structural transforms of the result graph.

use super::add::Merge;
use super::{Outcome, Skip};
use crate::domain::{Edge, Graph, Node, NodeKind, COLLAPSED_GROUP_PREFIX};
use crate::graph::traversal::{incoming_edges, outgoing_edges};
use std::collections::HashSet;

/// Replace every member of `group_id` with one synthetic node.
///
/// Boundary edges are re-pointed at the synthetic node (incoming first, then
/// outgoing), internal edges are dropped, and the final edge list is
/// deduplicated by `(from, to)` keeping the first occurrence. The synthetic
/// node is appended after the surviving nodes.
pub fn group_collapse(result: &Graph, group_id: &str) -> Outcome {
    let members: HashSet<&str> = result
        .nodes_in_group(group_id)
        .map(|n| n.id.as_str())
        .collect();
    if members.is_empty() {
        return Outcome::NotApplied(Skip::EmptyGroup(group_id.to_string()));
    }

    let merged_id = format!("{COLLAPSED_GROUP_PREFIX}{group_id}");
    let merged = Node::new(
        merged_id.clone(),
        format!("{group_id} ({} nodes)", members.len()),
        NodeKind::Group,
    )
    .with_groups([group_id]);

    let is_member = |id: &str| members.contains(id);

    let incoming = result
        .edges
        .iter()
        .filter(|e| is_member(e.to.as_str()) && !is_member(e.from.as_str()))
        .map(|e| Edge {
            from: e.from.clone(),
            to: merged_id.clone(),
            label: e.label.clone(),
        });
    let outgoing = result
        .edges
        .iter()
        .filter(|e| is_member(e.from.as_str()) && !is_member(e.to.as_str()))
        .map(|e| Edge {
            from: merged_id.clone(),
            to: e.to.clone(),
            label: e.label.clone(),
        });
    let untouched = result
        .edges
        .iter()
        .filter(|e| !is_member(e.from.as_str()) && !is_member(e.to.as_str()))
        .cloned();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let edges = untouched
        .chain(incoming)
        .chain(outgoing)
        .filter(|e| seen.insert((e.from.clone(), e.to.clone())))
        .collect();

    let mut nodes: Vec<Node> = result
        .nodes
        .iter()
        .filter(|n| !is_member(n.id.as_str()))
        .cloned()
        .collect();
    nodes.push(merged);

    Outcome::Applied(Graph {
        nodes,
        edges,
        groups: result.groups.clone(),
    })
}

/// Add the direct predecessors of `node_id` in base, with the connecting
/// edges, to result.
///
/// The anchor node is copied from base too, so grown edges always have both
/// ends in result.
pub fn grow_in(base: &Graph, result: &Graph, node_id: &str) -> Outcome {
    grow(base, result, node_id, incoming_edges(base, node_id), |e| &e.from)
}

/// Add the direct successors of `node_id` in base, with the connecting
/// edges, to result.
pub fn grow_out(base: &Graph, result: &Graph, node_id: &str) -> Outcome {
    grow(base, result, node_id, outgoing_edges(base, node_id), |e| &e.to)
}

fn grow<'a>(
    base: &'a Graph,
    result: &Graph,
    node_id: &str,
    edges: impl Iterator<Item = &'a Edge>,
    neighbor: impl Fn(&'a Edge) -> &'a String,
) -> Outcome {
    let Some(anchor) = base.node(node_id) else {
        return Outcome::NotApplied(Skip::NodeNotInBase(node_id.to_string()));
    };

    let edges: Vec<&Edge> = edges.collect();
    let neighbors: HashSet<&str> = edges.iter().map(|e| neighbor(*e).as_str()).collect();

    let mut merge = Merge::onto(result);
    merge.node(anchor);
    base.nodes
        .iter()
        .filter(|n| neighbors.contains(n.id.as_str()))
        .for_each(|n| merge.node(n));
    // Edges to neighbours with no node in base are left behind.
    for edge in edges {
        if merge.has_node(neighbor(edge)) {
            merge.edge(edge);
        }
    }
    merge.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Group, GroupKind};

    fn applied(outcome: Outcome) -> Graph {
        match outcome {
            Outcome::Applied(graph) => graph,
            Outcome::NotApplied(skip) => panic!("expected applied, skipped: {skip}"),
        }
    }

    // ========== group_collapse ==========

    /// `W -> X -> Y -> Z`, with X, Y, Z in group G
    fn grouped() -> Graph {
        Graph {
            nodes: vec![
                Node::new("W", "W", NodeKind::Data),
                Node::new("X", "X", NodeKind::Process).with_groups(["G"]),
                Node::new("Y", "Y", NodeKind::Process).with_groups(["G"]),
                Node::new("Z", "Z", NodeKind::Process).with_groups(["G"]),
            ],
            edges: vec![Edge::new("W", "X"), Edge::new("X", "Y"), Edge::new("Y", "Z")],
            groups: vec![Group::new("G", GroupKind::Workflow)],
        }
    }

    #[test]
    fn test_collapse_drops_internal_edges() {
        let graph = applied(group_collapse(&grouped(), "G"));

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["W", "GROUP_G"]);
        assert_eq!(graph.edges, vec![Edge::new("W", "GROUP_G")]);

        let merged = graph.node("GROUP_G").unwrap();
        assert_eq!(merged.name, "G (3 nodes)");
        assert_eq!(merged.kind, NodeKind::Group);
        assert_eq!(merged.group_ids, vec!["G".to_string()]);
        assert_eq!(graph.groups, grouped().groups);
    }

    #[test]
    fn test_collapse_deduplicates_parallel_boundary_edges() {
        let mut graph = grouped();
        graph.edges.push(Edge::new("W", "Y").with_label("second"));
        graph.nodes.push(Node::new("V", "V", NodeKind::View));
        graph.edges.push(Edge::new("Z", "V").with_label("first"));
        graph.edges.push(Edge::new("X", "V").with_label("later"));

        let collapsed = applied(group_collapse(&graph, "G"));
        assert_eq!(
            collapsed.edges,
            vec![
                Edge::new("W", "GROUP_G"),
                Edge::new("GROUP_G", "V").with_label("first"),
            ]
        );
    }

    #[test]
    fn test_collapse_of_absent_group_is_not_applied() {
        assert_eq!(
            group_collapse(&grouped(), "nope"),
            Outcome::NotApplied(Skip::EmptyGroup("nope".to_string()))
        );
    }

    // ========== grow_in / grow_out ==========

    fn chain() -> Graph {
        Graph {
            nodes: vec![
                Node::new("A", "A", NodeKind::Data),
                Node::new("B", "B", NodeKind::Process),
                Node::new("C", "C", NodeKind::View),
            ],
            edges: vec![Edge::new("A", "B"), Edge::new("B", "C")],
            groups: vec![],
        }
    }

    fn only_b() -> Graph {
        Graph {
            nodes: vec![Node::new("B", "B", NodeKind::Process)],
            edges: vec![],
            groups: vec![],
        }
    }

    #[test]
    fn test_grow_in_adds_predecessors() {
        let graph = applied(grow_in(&chain(), &only_b(), "B"));
        assert!(graph.contains_node("A"));
        assert!(graph.has_edge("A", "B"));
        assert!(!graph.contains_node("C"));
    }

    #[test]
    fn test_grow_out_adds_successors() {
        let graph = applied(grow_out(&chain(), &only_b(), "B"));
        assert!(graph.contains_node("C"));
        assert!(graph.has_edge("B", "C"));
        assert!(!graph.contains_node("A"));
    }

    #[test]
    fn test_grow_with_nothing_new_is_not_applied() {
        let full = chain();
        assert_eq!(
            grow_in(&chain(), &full, "B"),
            Outcome::NotApplied(Skip::NothingNew)
        );
    }

    #[test]
    fn test_grow_out_into_empty_result_brings_anchor() {
        let graph = applied(grow_out(&chain(), &Graph::empty(), "A"));

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(graph.edges, vec![Edge::new("A", "B")]);
    }

    #[test]
    fn test_grow_from_node_missing_in_base_is_not_applied() {
        assert_eq!(
            grow_out(&chain(), &only_b(), "Q"),
            Outcome::NotApplied(Skip::NodeNotInBase("Q".to_string()))
        );
    }

    #[test]
    fn test_grow_skips_edges_to_nodes_missing_from_base() {
        let mut base = chain();
        base.edges.push(Edge::new("ghost", "B"));

        let graph = applied(grow_in(&base, &only_b(), "B"));

        assert_eq!(graph.edges, vec![Edge::new("A", "B")]);
        assert!(!graph.contains_node("ghost"));
    }

    #[test]
    fn test_grow_with_only_dangling_neighbors_is_not_applied() {
        let mut base = only_b();
        base.edges.push(Edge::new("ghost", "B"));

        assert_eq!(
            grow_in(&base, &only_b(), "B"),
            Outcome::NotApplied(Skip::NothingNew)
        );
    }
}
