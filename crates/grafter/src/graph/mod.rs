//! Graph algorithms and validation.
//!
//! - [`traversal`]: reachability and connectivity over a [`crate::domain::Graph`]
//! - [`validation`]: identifier uniqueness and reserved-keyword checks

pub mod traversal;
pub mod validation;

pub use traversal::{connected_component, pass_through_set, reachable_from, reaching_to};
pub use validation::{validate_graph, ValidationError, ValidationMode, ValidationReport};
