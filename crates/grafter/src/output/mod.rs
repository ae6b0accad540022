//! Output formatting for CLI commands.
//!
//! Every printer has a text form for people and a JSON form for scripts.
//! Text printers write to any [`Write`] so they can be tested against a
//! buffer.

pub mod color;

use crate::domain::Graph;
use crate::graph::ValidationReport;
use crate::operations::Operation;
use crate::pipeline::{PipelineRun, StepReport};
use crate::sources::BUNDLED_SOURCES;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{bold, colorize_id, colorize_kind, dimmed, step_icon};

// ============================================================================
// Output Configuration
// ============================================================================

/// Settings that control text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `GRAFTER_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if lookup("NO_COLOR").is_some() {
            return Self { use_colors: false };
        }

        let use_colors = match lookup("GRAFTER_COLOR") {
            None => true,
            Some(v) if v.is_empty() || v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "GRAFTER_COLOR",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                true
            }
        };

        Self { use_colors }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print any serializable value as JSON
pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value, pretty)
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T, pretty: bool) -> io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

/// Print an operation list
pub fn print_operations(operations: &[Operation], mode: OutputMode, pretty: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            print_operations_text(&mut handle, operations, &OutputConfig::from_env())
        }
        OutputMode::Json => {
            let entries: Vec<OperationEntry<'_>> =
                operations.iter().map(OperationEntry::from).collect();
            write_json(&mut handle, &entries, pretty)
        }
    }
}

/// Print a validation report
pub fn print_validation(report: &ValidationReport, mode: OutputMode, pretty: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_validation_text(&mut handle, report, &OutputConfig::from_env()),
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({
                "valid": report.is_valid(),
                "errors": report.errors,
            }),
            pretty,
        ),
    }
}

/// Print the outcome of a pipeline run
pub fn print_run(run: &PipelineRun, fingerprint: &str, mode: OutputMode, pretty: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_run_text(&mut handle, run, fingerprint, &OutputConfig::from_env()),
        OutputMode::Json => write_json(
            &mut handle,
            &RunOutput {
                result: &run.state.result,
                fingerprint,
                steps: &run.steps,
            },
            pretty,
        ),
    }
}

/// Print the bundled sources
pub fn print_sources(mode: OutputMode, pretty: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_sources_text(&mut handle, &OutputConfig::from_env()),
        OutputMode::Json => {
            let entries: Vec<_> = BUNDLED_SOURCES
                .iter()
                .map(|(name, description)| serde_json::json!({ "name": name, "description": description }))
                .collect();
            write_json(&mut handle, &entries, pretty)
        }
    }
}

// ============================================================================
// JSON Shapes
// ============================================================================

#[derive(Serialize)]
struct OperationEntry<'a> {
    id: String,
    label: String,
    priority: u16,
    #[serde(flatten)]
    operation: &'a Operation,
}

impl<'a> From<&'a Operation> for OperationEntry<'a> {
    fn from(operation: &'a Operation) -> Self {
        Self {
            id: operation.id(),
            label: operation.label(),
            priority: operation.priority(),
            operation,
        }
    }
}

#[derive(Serialize)]
struct RunOutput<'a> {
    result: &'a Graph,
    fingerprint: &'a str,
    steps: &'a [StepReport],
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_operations_text<W: Write>(
    w: &mut W,
    operations: &[Operation],
    config: &OutputConfig,
) -> io::Result<()> {
    if operations.is_empty() {
        writeln!(w, "No operations.")?;
        return Ok(());
    }

    for (index, operation) in operations.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {} {}  {}",
            index + 1,
            colorize_kind(operation.kind(), config),
            colorize_id(&operation.id(), config),
            dimmed(&operation.label(), config)
        )?;
    }
    Ok(())
}

fn print_validation_text<W: Write>(
    w: &mut W,
    report: &ValidationReport,
    config: &OutputConfig,
) -> io::Result<()> {
    if report.is_valid() {
        writeln!(w, "{}", success("Graph is valid", config))?;
        return Ok(());
    }

    writeln!(w, "{}", error("Graph is invalid:", config))?;
    for problem in &report.errors {
        writeln!(w, "  - {problem}")?;
    }
    Ok(())
}

fn print_run_text<W: Write>(
    w: &mut W,
    run: &PipelineRun,
    fingerprint: &str,
    config: &OutputConfig,
) -> io::Result<()> {
    if run.steps.is_empty() {
        writeln!(w, "No operations; result is empty.")?;
    } else {
        writeln!(w, "{}", bold("Steps:", config))?;
        for step in &run.steps {
            match &step.skipped {
                None => writeln!(w, "  {} {}", step_icon(true, config), colorize_id(&step.id, config))?,
                Some(reason) => writeln!(
                    w,
                    "  {} {}  {}",
                    step_icon(false, config),
                    colorize_id(&step.id, config),
                    dimmed(&format!("({reason})"), config)
                )?,
            }
        }
        writeln!(w)?;
    }

    let result = run.state.result.summary();
    let base = run.state.base.summary();
    writeln!(
        w,
        "{} {} nodes, {} edges, {} groups",
        dimmed("Result:", config),
        result.nodes,
        result.edges,
        result.groups
    )?;
    writeln!(
        w,
        "{} {} nodes, {} edges, {} groups",
        dimmed("Base:  ", config),
        base.nodes,
        base.edges,
        base.groups
    )?;
    writeln!(w, "{} {}", dimmed("Fingerprint:", config), fingerprint)?;
    Ok(())
}

fn print_sources_text<W: Write>(w: &mut W, config: &OutputConfig) -> io::Result<()> {
    for (name, description) in BUNDLED_SOURCES {
        writeln!(w, "{:<16} {}", colorize_id(name, config), description)?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "{}",
        dimmed(
            "Also accepted: file:<path> and http(s):// URLs, e.g. `grafter op add source:file:graph.json`",
            config
        )
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Node, NodeKind};
    use crate::graph::ValidationError;
    use crate::operations::Skip;
    use crate::pipeline::PipelineState;
    use rstest::rstest;
    use std::collections::HashMap;

    fn plain() -> OutputConfig {
        OutputConfig { use_colors: false }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    // ========== OutputConfig ==========

    #[rstest]
    #[case::unset(&[], true)]
    #[case::no_color(&[("NO_COLOR", "1")], false)]
    #[case::no_color_empty(&[("NO_COLOR", "")], false)]
    #[case::grafter_zero(&[("GRAFTER_COLOR", "0")], false)]
    #[case::grafter_false(&[("GRAFTER_COLOR", "FALSE")], false)]
    #[case::grafter_true(&[("GRAFTER_COLOR", "true")], true)]
    #[case::grafter_invalid(&[("GRAFTER_COLOR", "maybe")], true)]
    fn test_output_config_from_lookup(#[case] vars: &[(&str, &str)], #[case] expected: bool) {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        let config = OutputConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()));
        assert_eq!(config.use_colors, expected);
    }

    // ========== Text Printers ==========

    #[test]
    fn test_operations_text() {
        let ops = [Operation::add_all(), Operation::start_filter("A")];
        let text = render(|w| print_operations_text(w, &ops, &plain()));

        assert!(text.contains("  1. add       all-nodes  All Nodes"));
        assert!(text.contains("  2. filter    start-filter-A  Start: A"));
    }

    #[test]
    fn test_operations_text_empty() {
        let text = render(|w| print_operations_text(w, &[], &plain()));
        assert_eq!(text, "No operations.\n");
    }

    #[test]
    fn test_validation_text() {
        let report = ValidationReport {
            errors: vec![ValidationError::DuplicateId {
                duplicates: vec!["A".to_string()],
            }],
        };
        let text = render(|w| print_validation_text(w, &report, &plain()));
        assert!(text.starts_with("Graph is invalid:"));
        assert!(text.contains("  - Found 1 duplicate ID(s): A"));

        let text = render(|w| print_validation_text(w, &ValidationReport::default(), &plain()));
        assert_eq!(text, "Graph is valid\n");
    }

    #[test]
    fn test_run_text_lists_steps_and_counts() {
        let run = PipelineRun {
            state: PipelineState {
                base: Graph::empty(),
                result: Graph {
                    nodes: vec![Node::new("A", "A", NodeKind::Data)],
                    edges: vec![],
                    groups: vec![],
                },
            },
            steps: vec![
                StepReport {
                    id: "all-nodes".to_string(),
                    applied: true,
                    skipped: None,
                },
                StepReport {
                    id: "start-filter-Z".to_string(),
                    applied: false,
                    skipped: Some(Skip::NodeNotInResult("Z".to_string())),
                },
            ],
        };

        let text = render(|w| print_run_text(w, &run, "abc123", &plain()));
        assert!(text.contains("  ✓ all-nodes"));
        assert!(text.contains("  - start-filter-Z  (node 'Z' not found in result graph)"));
        assert!(text.contains("Result: 1 nodes, 0 edges, 0 groups"));
        assert!(text.contains("Fingerprint: abc123"));
    }

    #[test]
    fn test_operation_entry_json() {
        let op = Operation::group_collapse("etl");
        let value = serde_json::to_value(OperationEntry::from(&op)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "group-collapse-etl",
                "label": "Group Collapse: etl",
                "priority": 200,
                "kind": "group-collapse",
                "targetId": "etl",
            })
        );
    }
}
