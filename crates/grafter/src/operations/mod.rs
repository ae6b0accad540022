//! The operation catalog.
//!
//! An [`Operation`] is a tagged record: a kind plus the id of the node, group
//! or source it targets. Records serialize directly as
//! `{"kind": "start-filter", "targetId": "A"}`, so persisting and restoring an
//! operation list is lossless.
//!
//! Each kind belongs to a priority band that decides where a new operation is
//! inserted into a list (see [`crate::pipeline::OperationList`]):
//!
//! | Band | Priority | Kinds |
//! |------|----------|-------|
//! | source | 0 | `source` |
//! | add | 100 | `add-all`, `add-node`, `add-group` |
//! | transform | 200 | `group-collapse`, `grow-in`, `grow-out` |
//! | filter | 300 | `start-filter`, `end-filter`, `pass-through-filter`, `connected-filter`, `group-filter` |
//! | remove | 200 / 300 | `remove-node` (200), `remove-group` (300) |
//!
//! The graph-rewriting semantics live in the submodules; the pipeline runner
//! dispatches to them. Source loading is asynchronous and handled by the
//! runner through [`crate::sources::SourceRegistry`].

pub mod add;
pub mod filter;
pub mod remove;
pub mod transform;

use crate::domain::Graph;
use crate::error::{Error, Result};
use crate::sources::SourceRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Priority of source operations
pub const SOURCE_PRIORITY: u16 = 0;
/// Priority of constructive operations
pub const ADD_PRIORITY: u16 = 100;
/// Priority of structural transforms
pub const TRANSFORM_PRIORITY: u16 = 200;
/// Priority of filters
pub const FILTER_PRIORITY: u16 = 300;

/// Coarse class of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Replaces the base graph with freshly loaded data
    Source,

    /// Copies nodes, edges and groups from base into result
    Add,

    /// Rewrites the structure of result
    Transform,

    /// Restricts result to a computed subset
    Filter,

    /// Deletes a node or group from result
    Remove,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Source => "source",
            OperationKind::Add => "add",
            OperationKind::Transform => "transform",
            OperationKind::Filter => "filter",
            OperationKind::Remove => "remove",
        };
        f.pad(s)
    }
}

/// One step of a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Operation {
    /// Replace base with the graph loaded from `source`
    Source {
        /// Where to load from
        #[serde(rename = "targetId")]
        source: SourceRef,
    },

    /// Copy all of base into result
    AddAll,

    /// Copy one node, plus its edges to nodes already in result
    AddNode {
        /// Node to add
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Copy a group, its member nodes, their edges and the edge endpoints
    AddGroup {
        /// Group to add
        #[serde(rename = "targetId")]
        group_id: String,
    },

    /// Contract every member of a group into one synthetic node
    GroupCollapse {
        /// Group to collapse
        #[serde(rename = "targetId")]
        group_id: String,
    },

    /// Add the direct predecessors of a node (from base)
    GrowIn {
        /// Node whose predecessors are added
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Add the direct successors of a node (from base)
    GrowOut {
        /// Node whose successors are added
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Keep what is reachable from a node
    StartFilter {
        /// Start node
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Keep what can reach a node
    EndFilter {
        /// End node
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Keep a node's ancestors, descendants and itself
    PassThroughFilter {
        /// Pivot node
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Keep the undirected connected component of a node
    ConnectedFilter {
        /// Node whose component is kept
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Keep exactly the nodes tagged with a group
    GroupFilter {
        /// Group to keep
        #[serde(rename = "targetId")]
        group_id: String,
    },

    /// Delete a node and every edge touching it
    RemoveNode {
        /// Node to delete
        #[serde(rename = "targetId")]
        node_id: String,
    },

    /// Delete a group from result
    RemoveGroup {
        /// Group to delete
        #[serde(rename = "targetId")]
        group_id: String,
    },
}

/// Display metadata for an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationMeta {
    /// Stable id derived from kind and target; used for toggling and removal
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Coarse class
    pub kind: OperationKind,
    /// Priority band
    pub priority: u16,
}

impl Operation {
    // ========== Constructors ==========

    /// Load `source` as the new base graph
    pub fn source(source: SourceRef) -> Self {
        Operation::Source { source }
    }

    /// Copy all of base into result
    pub fn add_all() -> Self {
        Operation::AddAll
    }

    /// Copy one node from base
    pub fn add_node(node_id: impl Into<String>) -> Self {
        Operation::AddNode {
            node_id: node_id.into(),
        }
    }

    /// Copy a group and its members from base
    pub fn add_group(group_id: impl Into<String>) -> Self {
        Operation::AddGroup {
            group_id: group_id.into(),
        }
    }

    /// Collapse a group into one node
    pub fn group_collapse(group_id: impl Into<String>) -> Self {
        Operation::GroupCollapse {
            group_id: group_id.into(),
        }
    }

    /// Add a node's direct predecessors
    pub fn grow_in(node_id: impl Into<String>) -> Self {
        Operation::GrowIn {
            node_id: node_id.into(),
        }
    }

    /// Add a node's direct successors
    pub fn grow_out(node_id: impl Into<String>) -> Self {
        Operation::GrowOut {
            node_id: node_id.into(),
        }
    }

    /// Keep what is reachable from a node
    pub fn start_filter(node_id: impl Into<String>) -> Self {
        Operation::StartFilter {
            node_id: node_id.into(),
        }
    }

    /// Keep what can reach a node
    pub fn end_filter(node_id: impl Into<String>) -> Self {
        Operation::EndFilter {
            node_id: node_id.into(),
        }
    }

    /// Keep everything passing through a node
    pub fn pass_through_filter(node_id: impl Into<String>) -> Self {
        Operation::PassThroughFilter {
            node_id: node_id.into(),
        }
    }

    /// Keep a node's connected component
    pub fn connected_filter(node_id: impl Into<String>) -> Self {
        Operation::ConnectedFilter {
            node_id: node_id.into(),
        }
    }

    /// Keep only the members of a group
    pub fn group_filter(group_id: impl Into<String>) -> Self {
        Operation::GroupFilter {
            group_id: group_id.into(),
        }
    }

    /// Delete a node
    pub fn remove_node(node_id: impl Into<String>) -> Self {
        Operation::RemoveNode {
            node_id: node_id.into(),
        }
    }

    /// Delete a group
    pub fn remove_group(group_id: impl Into<String>) -> Self {
        Operation::RemoveGroup {
            group_id: group_id.into(),
        }
    }

    // ========== Metadata ==========

    /// Coarse class of this operation
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Source { .. } => OperationKind::Source,
            Operation::AddAll | Operation::AddNode { .. } | Operation::AddGroup { .. } => {
                OperationKind::Add
            }
            Operation::GroupCollapse { .. } | Operation::GrowIn { .. } | Operation::GrowOut { .. } => {
                OperationKind::Transform
            }
            Operation::StartFilter { .. }
            | Operation::EndFilter { .. }
            | Operation::PassThroughFilter { .. }
            | Operation::ConnectedFilter { .. }
            | Operation::GroupFilter { .. } => OperationKind::Filter,
            Operation::RemoveNode { .. } | Operation::RemoveGroup { .. } => OperationKind::Remove,
        }
    }

    /// Priority band. Removals borrow the band of the step they pair with.
    pub fn priority(&self) -> u16 {
        match self.kind() {
            OperationKind::Source => SOURCE_PRIORITY,
            OperationKind::Add => ADD_PRIORITY,
            OperationKind::Transform => TRANSFORM_PRIORITY,
            OperationKind::Filter => FILTER_PRIORITY,
            OperationKind::Remove => match self {
                Operation::RemoveGroup { .. } => FILTER_PRIORITY,
                _ => TRANSFORM_PRIORITY,
            },
        }
    }

    /// Stable id, e.g. `start-filter-A` or `all-nodes`
    pub fn id(&self) -> String {
        match self {
            Operation::Source { source } => source.operation_id(),
            Operation::AddAll => "all-nodes".to_string(),
            Operation::AddNode { node_id } => format!("add-node-{node_id}"),
            Operation::AddGroup { group_id } => format!("add-group-{group_id}"),
            Operation::GroupCollapse { group_id } => format!("group-collapse-{group_id}"),
            Operation::GrowIn { node_id } => format!("grow-in-{node_id}"),
            Operation::GrowOut { node_id } => format!("grow-out-{node_id}"),
            Operation::StartFilter { node_id } => format!("start-filter-{node_id}"),
            Operation::EndFilter { node_id } => format!("end-filter-{node_id}"),
            Operation::PassThroughFilter { node_id } => format!("pass-through-filter-{node_id}"),
            Operation::ConnectedFilter { node_id } => format!("filter-connected-{node_id}"),
            Operation::GroupFilter { group_id } => format!("filter-group-{group_id}"),
            Operation::RemoveNode { node_id } => format!("remove-node-{node_id}"),
            Operation::RemoveGroup { group_id } => format!("remove-group-{group_id}"),
        }
    }

    /// Human-readable label, e.g. `Start: A`
    pub fn label(&self) -> String {
        match self {
            Operation::Source { source } => source.label(),
            Operation::AddAll => "All Nodes".to_string(),
            Operation::AddNode { node_id } => format!("Add Node: {node_id}"),
            Operation::AddGroup { group_id } => format!("Add Group: {group_id}"),
            Operation::GroupCollapse { group_id } => format!("Group Collapse: {group_id}"),
            Operation::GrowIn { node_id } => format!("Grow In: {node_id}"),
            Operation::GrowOut { node_id } => format!("Grow Out: {node_id}"),
            Operation::StartFilter { node_id } => format!("Start: {node_id}"),
            Operation::EndFilter { node_id } => format!("End: {node_id}"),
            Operation::PassThroughFilter { node_id } => format!("Pass-Through: {node_id}"),
            Operation::ConnectedFilter { node_id } => format!("Filter Connected: {node_id}"),
            Operation::GroupFilter { group_id } => format!("Filter Group: {group_id}"),
            Operation::RemoveNode { node_id } => format!("Remove Node: {node_id}"),
            Operation::RemoveGroup { group_id } => format!("Remove Group: {group_id}"),
        }
    }

    /// Id, label, kind and priority together
    pub fn meta(&self) -> OperationMeta {
        OperationMeta {
            id: self.id(),
            label: self.label(),
            kind: self.kind(),
            priority: self.priority(),
        }
    }

    // ========== Legacy Ids ==========

    /// Best-effort reconstruction from a bare operation id.
    ///
    /// Older operation lists stored only `{ "id": ... }`. Fixed ids are matched
    /// exactly, the rest by prefix. Returns `None` for unrecognized ids.
    pub fn from_legacy_id(id: &str) -> Option<Self> {
        match id {
            "all-nodes" | "all-constructive" => return Some(Operation::AddAll),
            "example-source" => return Some(Operation::source(SourceRef::Example)),
            "complex-example-source" => return Some(Operation::source(SourceRef::ComplexExample)),
            "external-source" => return Some(Operation::source(SourceRef::External)),
            _ => {}
        }

        type Ctor = fn(String) -> Operation;
        // Longer prefixes first where one prefix extends another.
        let prefixes: [(&str, Ctor); 13] = [
            ("start-filter-", |t| Operation::StartFilter { node_id: t }),
            ("end-filter-", |t| Operation::EndFilter { node_id: t }),
            ("pass-through-filter-", |t| Operation::PassThroughFilter { node_id: t }),
            ("filter-connected-", |t| Operation::ConnectedFilter { node_id: t }),
            ("filter-group-", |t| Operation::GroupFilter { group_id: t }),
            ("group-collapse-", |t| Operation::GroupCollapse { group_id: t }),
            ("grow-in-", |t| Operation::GrowIn { node_id: t }),
            ("grow-out-", |t| Operation::GrowOut { node_id: t }),
            ("add-group-constructive-", |t| Operation::AddGroup { group_id: t }),
            ("add-group-", |t| Operation::AddGroup { group_id: t }),
            ("add-node-", |t| Operation::AddNode { node_id: t }),
            ("remove-node-", |t| Operation::RemoveNode { node_id: t }),
            ("remove-group-", |t| Operation::RemoveGroup { group_id: t }),
        ];

        for (prefix, ctor) in prefixes {
            if let Some(target) = id.strip_prefix(prefix) {
                if target.is_empty() {
                    return None;
                }
                return Some(ctor(target.to_string()));
            }
        }

        if let Some(path) = id.strip_prefix("file-source-") {
            return format!("file:{path}").parse().ok().map(Operation::source);
        }
        if let Some(url) = id.strip_prefix("url-source-") {
            return url.parse().ok().map(Operation::source);
        }

        None
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Operation kinds that carry no `targetId`
const UNTARGETED_KINDS: [&str; 1] = ["add-all"];

/// Parse the command-line form `kind[:target]`, e.g. `start-filter:A`,
/// `source:example`, `source:file:graph.json` or `add-all`.
impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (kind, target) = match s.split_once(':') {
            Some((kind, target)) => (kind, Some(target)),
            None => (s, None),
        };

        if kind.is_empty() {
            return Err(Error::InvalidOperation(format!(
                "'{s}': expected kind[:target]"
            )));
        }
        if target.is_some_and(str::is_empty) {
            return Err(Error::InvalidOperation(format!("'{s}': empty target")));
        }
        if target.is_some() && UNTARGETED_KINDS.contains(&kind) {
            return Err(Error::InvalidOperation(format!(
                "'{s}': {kind} takes no target"
            )));
        }

        let mut record = Map::new();
        record.insert("kind".to_string(), Value::String(kind.to_string()));
        if let Some(target) = target {
            record.insert("targetId".to_string(), Value::String(target.to_string()));
        }

        serde_json::from_value(Value::Object(record))
            .map_err(|e| Error::InvalidOperation(format!("'{s}': {e}")))
    }
}

/// Why an operation left the result graph unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "target", rename_all = "snake_case")]
pub enum Skip {
    /// The node does not exist in the base graph
    NodeNotInBase(String),
    /// The group does not exist in the base graph
    GroupNotInBase(String),
    /// The node does not exist in the result graph
    NodeNotInResult(String),
    /// The group does not exist in the result graph
    GroupNotInResult(String),
    /// The node or group is already in the result graph
    AlreadyPresent(String),
    /// Every candidate element is already in the result graph
    NothingNew,
    /// The group has no member nodes in the result graph
    EmptyGroup(String),
    /// Removing the group would leave the result graph without nodes
    WouldEmptyResult(String),
    /// Source operations load through the pipeline and have no pure form
    SourceNotLoaded,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::NodeNotInBase(id) => write!(f, "node '{id}' not found in base graph"),
            Skip::GroupNotInBase(id) => write!(f, "group '{id}' not found in base graph"),
            Skip::NodeNotInResult(id) => write!(f, "node '{id}' not found in result graph"),
            Skip::GroupNotInResult(id) => write!(f, "group '{id}' not found in result graph"),
            Skip::AlreadyPresent(id) => write!(f, "'{id}' already exists in result graph"),
            Skip::NothingNew => write!(f, "nothing new to add"),
            Skip::EmptyGroup(id) => write!(f, "group '{id}' has no nodes in result graph"),
            Skip::WouldEmptyResult(id) => {
                write!(f, "no nodes would remain after removing group '{id}'")
            }
            Skip::SourceNotLoaded => write!(f, "source operations are loaded by the pipeline"),
        }
    }
}

/// Result of applying one graph-rewriting operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The operation produced a new result graph
    Applied(Graph),
    /// The operation found nothing to do; result is unchanged
    NotApplied(Skip),
}

impl Outcome {
    /// Whether the operation was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}
