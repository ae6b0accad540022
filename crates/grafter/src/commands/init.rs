//! Implementation of the `init` command.
//!
//! Creates the `.grafter/` directory with a configuration file and an empty
//! operation list.

use crate::config::{GrafterConfig, CONFIG_FILE_NAME, GRAFTER_DIR_NAME};
use crate::error::{Error, Result};
use crate::graph::ValidationMode;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the gitignore file within .grafter
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created grafter directory
    pub grafter_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created operation list
    pub operations_file: PathBuf,
    /// Validation mode written to the config
    pub validation: ValidationMode,
}

/// Initialize a new grafter project in `base_dir`.
///
/// # Errors
///
/// Returns an error if `.grafter/` already exists or a file cannot be
/// written.
pub async fn init(base_dir: &Path, validation: Option<ValidationMode>) -> Result<InitResult> {
    let grafter_dir = base_dir.join(GRAFTER_DIR_NAME);

    if grafter_dir.exists() {
        return Err(Error::Config(format!(
            "Grafter is already initialized in this directory. Found existing '{GRAFTER_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&grafter_dir).await?;

    let config = GrafterConfig {
        validation: validation.unwrap_or_default(),
        ..GrafterConfig::default()
    };
    let config_file = grafter_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    let operations_file = base_dir.join(&config.operations_file);
    fs::write(&operations_file, "").await?;

    let gitignore_content = "\
# Grafter scratch files
*.tmp
";
    fs::write(grafter_dir.join(GITIGNORE_FILE_NAME), gitignore_content).await?;

    tracing::debug!(dir = %grafter_dir.display(), "Initialized grafter project");

    Ok(InitResult {
        grafter_dir,
        config_file,
        operations_file,
        validation: config.validation,
    })
}
