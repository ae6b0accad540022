//! Reachability and connectivity using petgraph.
//!
//! This module provides the traversal utilities the filters are built on:
//! - Forward reachability (`reachable_from`)
//! - Backward reachability (`reaching_to`)
//! - Pass-through set (ancestors, descendants and the node itself)
//! - Undirected connected component
//!
//! All functions are total. Edges may reference ids that are not nodes of the
//! graph; such ids are traversed like any other. A start id that appears
//! nowhere in the graph yields a set containing only itself.

use crate::domain::{Edge, Graph};
use petgraph::graphmap::{DiGraphMap, UnGraphMap};
use petgraph::visit::{Dfs, IntoNeighbors, Reversed, Visitable};
use std::collections::HashSet;

/// Build a directed adjacency view over node ids.
///
/// Every node is registered, plus every edge endpoint, so dangling edge
/// endpoints still take part in the traversal.
fn directed_view(graph: &Graph) -> DiGraphMap<&str, ()> {
    let mut view = DiGraphMap::new();
    for node in &graph.nodes {
        view.add_node(node.id.as_str());
    }
    for edge in &graph.edges {
        view.add_edge(edge.from.as_str(), edge.to.as_str(), ());
    }
    view
}

/// Same as [`directed_view`], ignoring edge direction.
fn undirected_view(graph: &Graph) -> UnGraphMap<&str, ()> {
    let mut view = UnGraphMap::new();
    for node in &graph.nodes {
        view.add_node(node.id.as_str());
    }
    for edge in &graph.edges {
        view.add_edge(edge.from.as_str(), edge.to.as_str(), ());
    }
    view
}

/// Stack-based search from `start`, collecting every visited id.
fn collect_visited<'a, G>(view: G, start: &'a str) -> HashSet<String>
where
    G: IntoNeighbors<NodeId = &'a str> + Visitable,
{
    let mut dfs = Dfs::new(view, start);
    let mut visited = HashSet::new();
    while let Some(id) = dfs.next(view) {
        visited.insert(id.to_string());
    }
    visited
}

/// Ids reachable from `node_id` by following outgoing edges, including
/// `node_id` itself.
pub fn reachable_from<'a>(graph: &'a Graph, node_id: &'a str) -> HashSet<String> {
    let view = directed_view(graph);
    collect_visited(&view, node_id)
}

/// Ids that can reach `node_id` by following edges forward, including
/// `node_id` itself.
pub fn reaching_to<'a>(graph: &'a Graph, node_id: &'a str) -> HashSet<String> {
    let view = directed_view(graph);
    collect_visited(Reversed(&view), node_id)
}

/// Union of `reachable_from`, `reaching_to` and the node itself.
pub fn pass_through_set(graph: &Graph, node_id: &str) -> HashSet<String> {
    let mut set = reachable_from(graph, node_id);
    set.extend(reaching_to(graph, node_id));
    set.insert(node_id.to_string());
    set
}

/// Ids connected to `node_id` when edge direction is ignored, including
/// `node_id` itself.
pub fn connected_component<'a>(graph: &'a Graph, node_id: &'a str) -> HashSet<String> {
    let view = undirected_view(graph);
    collect_visited(&view, node_id)
}

/// Edges of `graph` ending at `node_id`, in graph order.
pub fn incoming_edges<'a>(graph: &'a Graph, node_id: &'a str) -> impl Iterator<Item = &'a Edge> {
    graph.edges.iter().filter(move |e| e.to == node_id)
}

/// Edges of `graph` starting at `node_id`, in graph order.
pub fn outgoing_edges<'a>(graph: &'a Graph, node_id: &'a str) -> impl Iterator<Item = &'a Edge> {
    graph.edges.iter().filter(move |e| e.from == node_id)
}
