//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::ValidationModeArg;
use super::validators::{validate_operation, validate_operation_id};
use crate::operations::Operation;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// How sources validate the graphs they load
    #[arg(long, value_enum)]
    pub validation: Option<ValidationModeArg>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Graph document to check
    pub file: PathBuf,
}

/// Arguments for the `op` command
#[derive(Parser, Debug, Clone)]
pub struct OpArgs {
    /// Operation list action
    #[command(subcommand)]
    pub action: OpAction,
}

/// Operation list actions
#[derive(Subcommand, Debug, Clone)]
pub enum OpAction {
    /// Add an operation at its priority position
    ///
    /// Format: `kind[:target]`, e.g. `source:example`, `add-all`,
    /// `start-filter:A`, `group-collapse:etl`.
    Add {
        /// Operation specification
        #[arg(value_parser = validate_operation)]
        spec: Operation,
    },

    /// Add the operation if absent, remove it if present
    Toggle {
        /// Operation specification
        #[arg(value_parser = validate_operation)]
        spec: Operation,
    },

    /// Remove an operation by id
    Remove {
        /// Operation id, as shown by `grafter op list`
        #[arg(value_parser = validate_operation_id)]
        id: String,
    },

    /// List operations in pipeline order
    List,

    /// Remove every operation
    Clear,
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Also write the result graph to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `sources` command
#[derive(Parser, Debug, Clone)]
pub struct SourcesArgs {}
