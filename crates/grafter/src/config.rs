//! Project configuration.
//!
//! A grafter project is a directory containing `.grafter/config.yaml`:
//!
//! ```yaml
//! validation: fail-fast
//! operations-file: .grafter/operations.jsonl
//! pretty-json: true
//! http-timeout-secs: 30
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::error::{Error, Result};
use crate::graph::ValidationMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Name of the grafter directory
pub const GRAFTER_DIR_NAME: &str = ".grafter";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the operation list file
pub const OPERATIONS_FILE_NAME: &str = "operations.jsonl";

/// Maximum directory depth to traverse when searching for the project root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct GrafterConfig {
    /// How sources validate the graphs they load
    pub validation: ValidationMode,

    /// Operation list file, relative to the project root
    pub operations_file: PathBuf,

    /// Indent JSON output
    pub pretty_json: bool,

    /// Timeout for URL sources, in seconds
    pub http_timeout_secs: u64,
}

impl Default for GrafterConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::default(),
            operations_file: Path::new(GRAFTER_DIR_NAME).join(OPERATIONS_FILE_NAME),
            pretty_json: true,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl GrafterConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(Error::Config(
                "http-timeout-secs must be greater than 0".to_string(),
            ));
        }
        if self.operations_file.as_os_str().is_empty() {
            return Err(Error::Config("operations-file cannot be empty".to_string()));
        }
        Ok(())
    }

    /// HTTP timeout as a [`Duration`]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Check if a directory has been initialized with grafter.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(GRAFTER_DIR_NAME).exists()
}

/// Find the project root by searching up the directory tree.
///
/// Returns the first directory, starting at `start_dir`, that contains
/// `.grafter/`, or `None` once the filesystem root or the depth limit is
/// reached.
pub fn find_grafter_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(GRAFTER_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
