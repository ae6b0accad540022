//! Filters that restrict the result graph to a computed node subset.
//!
//! Every filter keeps its node subset, the edges whose endpoints both
//! survive, and the groups still referenced by a surviving node. A filter
//! whose target is missing from result is not applied.

use super::{Outcome, Skip};
use crate::domain::Graph;
use crate::graph::traversal::{connected_component, pass_through_set, reachable_from, reaching_to};
use std::collections::HashSet;

fn filter_by(
    result: &Graph,
    node_id: &str,
    select: impl FnOnce(&Graph, &str) -> HashSet<String>,
) -> Outcome {
    if !result.contains_node(node_id) {
        return Outcome::NotApplied(Skip::NodeNotInResult(node_id.to_string()));
    }
    let keep = select(result, node_id);
    Outcome::Applied(result.restrict_to(&keep))
}

/// Keep what is reachable from `node_id`.
pub fn start_filter(result: &Graph, node_id: &str) -> Outcome {
    filter_by(result, node_id, |g, id| reachable_from(g, id))
}

/// Keep what can reach `node_id`.
pub fn end_filter(result: &Graph, node_id: &str) -> Outcome {
    filter_by(result, node_id, |g, id| reaching_to(g, id))
}

/// Keep the ancestors and descendants of `node_id`, and the node itself.
pub fn pass_through_filter(result: &Graph, node_id: &str) -> Outcome {
    filter_by(result, node_id, |g, id| pass_through_set(g, id))
}

/// Keep the undirected connected component of `node_id`.
pub fn connected_filter(result: &Graph, node_id: &str) -> Outcome {
    filter_by(result, node_id, |g, id| connected_component(g, id))
}

/// Keep exactly the nodes tagged with `group_id`, and the edges between them.
pub fn group_filter(result: &Graph, group_id: &str) -> Outcome {
    let keep: HashSet<String> = result
        .nodes_in_group(group_id)
        .map(|n| n.id.clone())
        .collect();
    if keep.is_empty() {
        return Outcome::NotApplied(Skip::GroupNotInResult(group_id.to_string()));
    }
    Outcome::Applied(result.restrict_to(&keep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, Group, GroupKind, Node, NodeKind};
    use rstest::rstest;

    /// `A -> B -> C`, `X -> C`, `D` isolated; A and B in g1, D in g2
    fn sample() -> Graph {
        Graph {
            nodes: vec![
                Node::new("A", "A", NodeKind::Data).with_groups(["g1"]),
                Node::new("B", "B", NodeKind::Process).with_groups(["g1"]),
                Node::new("C", "C", NodeKind::View),
                Node::new("X", "X", NodeKind::Database),
                Node::new("D", "D", NodeKind::Data).with_groups(["g2"]),
            ],
            edges: vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("X", "C")],
            groups: vec![
                Group::new("g1", GroupKind::Project),
                Group::new("g2", GroupKind::Team),
            ],
        }
    }

    fn node_ids(outcome: Outcome) -> Vec<String> {
        match outcome {
            Outcome::Applied(graph) => graph.nodes.into_iter().map(|n| n.id).collect(),
            Outcome::NotApplied(skip) => panic!("expected applied, skipped: {skip}"),
        }
    }

    type FilterFn = fn(&Graph, &str) -> Outcome;

    #[rstest]
    #[case::start(start_filter as FilterFn, "B", &["B", "C"])]
    #[case::end(end_filter as FilterFn, "C", &["A", "B", "C", "X"])]
    #[case::pass_through(pass_through_filter as FilterFn, "B", &["A", "B", "C"])]
    #[case::connected(connected_filter as FilterFn, "A", &["A", "B", "C", "X"])]
    #[case::connected_isolated(connected_filter as FilterFn, "D", &["D"])]
    fn test_node_filters(#[case] filter: FilterFn, #[case] target: &str, #[case] expected: &[&str]) {
        assert_eq!(node_ids(filter(&sample(), target)), expected);
    }

    #[rstest]
    #[case::start(start_filter as FilterFn)]
    #[case::end(end_filter as FilterFn)]
    #[case::pass_through(pass_through_filter as FilterFn)]
    #[case::connected(connected_filter as FilterFn)]
    fn test_absent_target_is_not_applied(#[case] filter: FilterFn) {
        assert_eq!(
            filter(&sample(), "nope"),
            Outcome::NotApplied(Skip::NodeNotInResult("nope".to_string()))
        );
    }

    #[test]
    fn test_filter_drops_unreferenced_groups_and_edges() {
        let Outcome::Applied(graph) = start_filter(&sample(), "B") else {
            panic!("expected applied");
        };
        assert_eq!(graph.edges, vec![Edge::new("B", "C")]);
        assert_eq!(graph.groups, vec![Group::new("g1", GroupKind::Project)]);
    }

    #[test]
    fn test_start_filter_is_idempotent() {
        let Outcome::Applied(once) = start_filter(&sample(), "A") else {
            panic!("expected applied");
        };
        let Outcome::Applied(twice) = start_filter(&once, "A") else {
            panic!("expected applied");
        };
        assert_eq!(once, twice);
    }

    // ========== group_filter ==========

    #[test]
    fn test_group_filter_keeps_members_and_internal_edges() {
        let Outcome::Applied(graph) = group_filter(&sample(), "g1") else {
            panic!("expected applied");
        };
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(graph.edges, vec![Edge::new("A", "B")]);
        assert_eq!(graph.groups, vec![Group::new("g1", GroupKind::Project)]);
    }

    #[test]
    fn test_group_filter_without_members_is_not_applied() {
        assert_eq!(
            group_filter(&sample(), "g3"),
            Outcome::NotApplied(Skip::GroupNotInResult("g3".to_string()))
        );
    }
}
