//! JSON serialization for graphs.
//!
//! A graph document is `{ "nodes": [...], "edges": [...], "groups": [...] }`.
//! Loading checks that top-level shape before deserializing, so a document
//! missing a key gets a precise [`Error::InvalidGraphShape`] rather than a
//! serde message. Validation is a separate step
//! ([`crate::graph::validate_graph`]).

use crate::domain::Graph;
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

const REQUIRED_KEYS: [&str; 3] = ["nodes", "edges", "groups"];

/// Parse a graph from a JSON string.
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON and
/// [`Error::InvalidGraphShape`] when the document is not an object with
/// `nodes`, `edges` and `groups` arrays.
pub fn load_graph_from_json(json: &str) -> Result<Graph> {
    let value: Value = serde_json::from_str(json)?;
    load_graph_from_value(value)
}

/// Build a graph from an already-parsed JSON value.
///
/// # Errors
///
/// See [`load_graph_from_json`].
pub fn load_graph_from_value(value: Value) -> Result<Graph> {
    let Value::Object(map) = &value else {
        return Err(Error::InvalidGraphShape(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    for key in REQUIRED_KEYS {
        match map.get(key) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(Error::InvalidGraphShape(format!("'{key}' must be an array")));
            }
            None => {
                return Err(Error::InvalidGraphShape(format!(
                    "missing '{key}' array (a graph needs nodes, edges and groups)"
                )));
            }
        }
    }

    Ok(serde_json::from_value(value)?)
}

/// Read and parse a graph document from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise see
/// [`load_graph_from_json`].
pub async fn load_graph_from_file(path: &Path) -> Result<Graph> {
    let content = tokio::fs::read_to_string(path).await?;
    load_graph_from_json(&content)
}

/// Serialize a graph, either indented (`pretty`) or compact.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn save_graph_to_json(graph: &Graph, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(graph)?
    } else {
        serde_json::to_string(graph)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, Group, GroupKind, Node, NodeKind};
    use rstest::rstest;

    #[test]
    fn test_load_minimal_document() {
        let graph = load_graph_from_json(
            r#"{
                "nodes": [{"id": "A", "name": "Alpha", "type": "process", "groups": ["g"]}],
                "edges": [{"from": "A", "to": "B", "label": "x"}],
                "groups": [{"id": "g", "type": "team"}]
            }"#,
        )
        .unwrap();

        assert_eq!(
            graph.nodes,
            vec![Node::new("A", "Alpha", NodeKind::Process).with_groups(["g"])]
        );
        assert_eq!(graph.edges, vec![Edge::new("A", "B").with_label("x")]);
        assert_eq!(graph.groups, vec![Group::new("g", GroupKind::Team)]);
    }

    #[rstest]
    #[case::not_object(r"[]", "top level")]
    #[case::missing_groups(r#"{"nodes": [], "edges": []}"#, "missing 'groups'")]
    #[case::missing_nodes(r#"{"edges": [], "groups": []}"#, "missing 'nodes'")]
    #[case::edges_not_array(r#"{"nodes": [], "edges": {}, "groups": []}"#, "'edges' must be an array")]
    fn test_shape_errors(#[case] json: &str, #[case] expected: &str) {
        let err = load_graph_from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidGraphShape(_)));
        assert!(
            err.to_string().contains(expected),
            "Expected error to contain '{expected}', got: '{err}'"
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = load_graph_from_json("{nodes").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unknown_node_kind_is_rejected() {
        let err = load_graph_from_json(
            r#"{"nodes": [{"id": "A", "name": "A", "type": "robot"}], "edges": [], "groups": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_save_pretty_and_compact() {
        let graph = Graph {
            nodes: vec![Node::new("A", "Alpha", NodeKind::Data)],
            edges: vec![],
            groups: vec![],
        };

        let compact = save_graph_to_json(&graph, false).unwrap();
        let pretty = save_graph_to_json(&graph, true).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\n  \"nodes\""));
        assert_eq!(load_graph_from_json(&compact).unwrap(), graph);
    }

    #[tokio::test]
    async fn test_load_from_missing_file() {
        let err = load_graph_from_file(Path::new("/nonexistent/graph.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
