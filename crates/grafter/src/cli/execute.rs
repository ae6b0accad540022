//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{InitArgs, OpAction, OpArgs, RunArgs, SourcesArgs, ValidateArgs};
use crate::app::App;
use crate::output::{self, OutputMode};

/// JSON output for commands that run outside a project is always indented.
const DEFAULT_PRETTY: bool = true;

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let quiet = args.quiet || output_mode == OutputMode::Json;

    if !quiet {
        println!(
            "Initializing grafter project{}...",
            args.validation
                .map(|mode| format!(" with {mode} validation"))
                .unwrap_or_default()
        );
    }

    let result = init::init(&current_dir, args.validation.map(Into::into)).await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(
                &serde_json::json!({
                    "grafter_dir": result.grafter_dir.display().to_string(),
                    "config_file": result.config_file.display().to_string(),
                    "operations_file": result.operations_file.display().to_string(),
                    "validation": result.validation,
                }),
                DEFAULT_PRETTY,
            )?;
        }
        OutputMode::Text if !args.quiet => {
            println!("Initialized grafter in {}", result.grafter_dir.display());
            println!("  Config:     {}", result.config_file.display());
            println!("  Operations: {}", result.operations_file.display());
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the validate command
pub async fn execute_validate(args: &ValidateArgs, output_mode: OutputMode) -> Result<()> {
    use crate::graph::{validate_graph, ValidationMode};
    use crate::serialization::load_graph_from_file;

    let graph = load_graph_from_file(&args.file).await?;
    let report = validate_graph(&graph, ValidationMode::CollectAll)?;

    output::print_validation(&report, output_mode, DEFAULT_PRETTY)?;

    if !report.is_valid() {
        anyhow::bail!(
            "{} failed validation with {} problem(s)",
            args.file.display(),
            report.errors.len()
        );
    }

    Ok(())
}

/// Execute the op command
pub async fn execute_op(app: &App, args: &OpArgs, output_mode: OutputMode) -> Result<()> {
    let pretty = app.config().pretty_json;
    let mut operations = app.operations().await?;

    match &args.action {
        OpAction::Add { spec } => {
            let position = operations.insert(spec.clone())?;
            app.save_operations(&operations).await?;

            match output_mode {
                OutputMode::Json => {
                    output::print_json(
                        &serde_json::json!({
                            "action": "add",
                            "id": spec.id(),
                            "position": position,
                        }),
                        pretty,
                    )?;
                }
                OutputMode::Text => {
                    println!("Added {} at position {}", spec.id(), position + 1);
                }
            }
        }
        OpAction::Toggle { spec } => {
            let present = operations.toggle(spec.clone());
            app.save_operations(&operations).await?;

            match output_mode {
                OutputMode::Json => {
                    output::print_json(
                        &serde_json::json!({
                            "action": "toggle",
                            "id": spec.id(),
                            "present": present,
                        }),
                        pretty,
                    )?;
                }
                OutputMode::Text => {
                    let verb = if present { "Added" } else { "Removed" };
                    println!("{verb} {}", spec.id());
                }
            }
        }
        OpAction::Remove { id } => {
            let removed = operations.remove(id)?;
            app.save_operations(&operations).await?;

            match output_mode {
                OutputMode::Json => {
                    output::print_json(
                        &serde_json::json!({
                            "action": "remove",
                            "id": removed.id(),
                        }),
                        pretty,
                    )?;
                }
                OutputMode::Text => {
                    println!("Removed {}", removed.label());
                }
            }
        }
        OpAction::List => {
            output::print_operations(operations.as_slice(), output_mode, pretty)?;
        }
        OpAction::Clear => {
            let count = operations.len();
            operations.clear();
            app.save_operations(&operations).await?;

            match output_mode {
                OutputMode::Json => {
                    output::print_json(
                        &serde_json::json!({
                            "action": "clear",
                            "removed": count,
                        }),
                        pretty,
                    )?;
                }
                OutputMode::Text => {
                    println!("Cleared {count} operation(s)");
                }
            }
        }
    }

    Ok(())
}

/// Execute the run command
pub async fn execute_run(app: &App, args: &RunArgs, output_mode: OutputMode) -> Result<()> {
    use crate::serialization::save_graph_to_json;

    let pretty = app.config().pretty_json;
    let run = app.run().await?;
    let fingerprint = run.state.result.fingerprint()?;

    if let Some(path) = &args.output {
        let json = save_graph_to_json(&run.state.result, pretty)?;
        tokio::fs::write(path, json).await?;
        tracing::debug!(file = %path.display(), "Wrote result graph");
    }

    output::print_run(&run, &fingerprint, output_mode, pretty)?;
    Ok(())
}

/// Execute the sources command
pub fn execute_sources(_args: &SourcesArgs, output_mode: OutputMode) -> Result<()> {
    output::print_sources(output_mode, DEFAULT_PRETTY)?;
    Ok(())
}
