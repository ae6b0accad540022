//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use grafter::domain::{Edge, Graph, Group, GroupKind, Node, NodeKind};
use std::path::Path;
use std::process::{Command, Output};

/// Run the grafter binary in the specified directory
pub fn run_grafter_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grafter"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute grafter binary")
}

/// Run grafter and assert success, returning stdout
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_grafter_in_dir(dir, args);
    assert!(
        output.status.success(),
        "grafter {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A process node in the given groups
pub fn node(id: &str, groups: &[&str]) -> Node {
    Node::new(id, id, NodeKind::Process).with_groups(groups.iter().copied())
}

/// Build a graph from nodes, `(from, to)` edge pairs and group ids
pub fn graph(nodes: Vec<Node>, edges: &[(&str, &str)], groups: &[&str]) -> Graph {
    Graph {
        nodes,
        edges: edges.iter().map(|(from, to)| Edge::new(*from, *to)).collect(),
        groups: groups
            .iter()
            .map(|id| Group::new(*id, GroupKind::Workflow))
            .collect(),
    }
}

/// Node ids of a graph, in order
pub fn node_ids(graph: &Graph) -> Vec<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

/// Edge keys of a graph, in order
pub fn edge_keys(graph: &Graph) -> Vec<(&str, &str)> {
    graph.edges.iter().map(Edge::key).collect()
}
