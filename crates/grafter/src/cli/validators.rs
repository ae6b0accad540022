//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to reject
//! malformed input at parse time.

use crate::operations::Operation;

/// Parse an operation specification of the form `kind[:target]`.
///
/// Examples: `add-all`, `start-filter:A`, `source:example`,
/// `source:file:graphs/team.json`.
pub fn validate_operation(s: &str) -> Result<Operation, String> {
    s.parse::<Operation>().map_err(|e| e.to_string())
}

/// Validate an operation id as shown by `grafter op list`.
pub fn validate_operation_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Operation ID cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!(
            "Invalid operation ID: '{s}'. IDs do not contain whitespace (e.g., start-filter-A)"
        ));
    }

    Ok(s.to_string())
}
