//! Graph validation.
//!
//! Checks performed before a graph may become the pipeline's base graph:
//! - Node ids and group ids are unique across one shared namespace
//! - No id equals a keyword reserved by the diagram syntax
//!
//! Edge endpoints are deliberately not checked; traversal tolerates dangling
//! references.

use crate::domain::Graph;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifiers the diagram syntax reserves. Keep in sync with the renderer.
pub const RESERVED_KEYWORDS: &[&str] = &[
    // Structural keywords
    "end",
    "start",
    "subgraph",
    "graph",
    "flowchart",
    "sequence",
    "class",
    "state",
    "git",
    "pie",
    "journey",
    "gantt",
    "classDef",
    "link",
    "click",
    "style",
    "direction",
    // Directionals
    "TB",
    "TD",
    "BT",
    "RL",
    "LR",
];

/// Whether `id` collides with a reserved diagram keyword
pub fn is_reserved_keyword(id: &str) -> bool {
    RESERVED_KEYWORDS.contains(&id)
}

/// How strictly to treat problems found during validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Stop at the first duplicate id and turn any problem into an error
    #[default]
    FailFast,

    /// Gather every problem into the report and let the caller decide
    CollectAll,
}

/// One class of validation problem, with every offending identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    /// Ids claimed by more than one node or group
    DuplicateId {
        /// The duplicated ids, in first-seen order
        duplicates: Vec<String>,
    },

    /// Ids equal to a reserved diagram keyword
    ReservedKeyword {
        /// The keywords used as ids
        keywords: Vec<String>,
        /// The offending entities, as `node:<id>` or `group:<id>`
        affected_ids: Vec<String>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { duplicates } => write!(
                f,
                "Found {} duplicate ID(s): {}",
                duplicates.len(),
                duplicates.join(", ")
            ),
            ValidationError::ReservedKeyword { keywords, .. } => write!(
                f,
                "Found {} reserved keyword(s) used as ID(s): {}",
                keywords.len(),
                keywords.join(", ")
            ),
        }
    }
}

/// Result of validating a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems found; empty when the graph is valid
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Whether no problems were found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert an invalid report into [`Error::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "no problems found");
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[derive(Clone, Copy)]
enum Entity {
    Node,
    Group,
}

impl Entity {
    fn as_str(self) -> &'static str {
        match self {
            Entity::Node => "node",
            Entity::Group => "group",
        }
    }
}

/// Validate identifier uniqueness and reserved keywords.
///
/// Nodes are scanned first, then groups, into one identity map.
///
/// # Errors
///
/// In [`ValidationMode::FailFast`] the first duplicate id returns
/// [`Error::DuplicateId`] immediately, and any remaining problem returns
/// [`Error::Validation`]. In [`ValidationMode::CollectAll`] this never fails;
/// inspect [`ValidationReport::is_valid`] instead.
pub fn validate_graph(graph: &Graph, mode: ValidationMode) -> Result<ValidationReport> {
    let mut seen: HashMap<&str, Entity> = HashMap::new();
    let mut duplicates: Vec<String> = Vec::new();
    let mut duplicate_set: HashSet<&str> = HashSet::new();
    let mut keywords: Vec<String> = Vec::new();
    let mut affected_ids: Vec<String> = Vec::new();

    let entries = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), Entity::Node))
        .chain(graph.groups.iter().map(|g| (g.id.as_str(), Entity::Group)));

    for (id, entity) in entries {
        if is_reserved_keyword(id) {
            if !keywords.iter().any(|k| k == id) {
                keywords.push(id.to_string());
            }
            affected_ids.push(format!("{}:{id}", entity.as_str()));
        }

        if let Some(existing) = seen.get(id) {
            if mode == ValidationMode::FailFast {
                return Err(Error::DuplicateId {
                    id: id.to_string(),
                    first: existing.as_str(),
                    second: entity.as_str(),
                });
            }
            if duplicate_set.insert(id) {
                duplicates.push(id.to_string());
            }
        } else {
            seen.insert(id, entity);
        }
    }

    let mut report = ValidationReport::default();
    if !duplicates.is_empty() {
        report.errors.push(ValidationError::DuplicateId { duplicates });
    }
    if !keywords.is_empty() {
        report.errors.push(ValidationError::ReservedKeyword {
            keywords,
            affected_ids,
        });
    }

    if !report.is_valid() {
        tracing::debug!(problems = report.errors.len(), "Graph failed validation");
        if mode == ValidationMode::FailFast {
            return Err(Error::Validation(report));
        }
    }

    Ok(report)
}
