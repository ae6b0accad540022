//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: Initialize a grafter project
//! - `validate`: Check a graph document for duplicate ids and reserved keywords
//! - `op`: Edit the persisted operation list
//! - `run`: Run the operation list and print the result graph
//! - `sources`: List the bundled sources
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! grafter init
//! grafter op add source:example
//! grafter op add add-all
//! grafter op add start-filter:A
//! grafter run --json
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{InitArgs, OpAction, OpArgs, RunArgs, SourcesArgs, ValidateArgs};

// Re-export types
pub use types::ValidationModeArg;

// Re-export validators for external use
pub use validators::{validate_operation, validate_operation_id};

/// Grafter - compose grouped graphs from an ordered list of operations
///
/// The operation list lives in `.grafter/operations.jsonl`; `grafter run`
/// replays it from an empty graph.
#[derive(Parser, Debug)]
#[command(name = "grafter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new grafter project
    ///
    /// Creates the `.grafter/` directory with configuration and an empty
    /// operation list.
    Init(InitArgs),

    /// Validate a graph document
    ///
    /// Reports every duplicate id and reserved keyword found in the file.
    /// Exits with an error when the graph is invalid.
    Validate(ValidateArgs),

    /// Edit the operation list
    ///
    /// Add, toggle, remove, list, or clear the operations `run` replays.
    Op(OpArgs),

    /// Run the operation list
    ///
    /// Folds every operation over an empty graph and prints the result
    /// together with a per-step report.
    Run(RunArgs),

    /// List the bundled sources
    Sources(SourcesArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Validate(args)) => execute::execute_validate(args, output_mode).await,
            Some(Commands::Op(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_op(&app, args, output_mode).await
            }
            Some(Commands::Run(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_run(&app, args, output_mode).await
            }
            Some(Commands::Sources(args)) => execute::execute_sources(args, output_mode),
            None => {
                println!("Grafter graph pipeline");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
