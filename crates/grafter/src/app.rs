//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use grafter::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let run = app.run().await?;
//!     println!("{} nodes", run.state.result.nodes.len());
//!     Ok(())
//! }
//! ```

use crate::config::{find_grafter_root, GrafterConfig, CONFIG_FILE_NAME, GRAFTER_DIR_NAME};
use crate::domain::Graph;
use crate::error::{Error, Result};
use crate::persistence::{JsonlOperationStore, OperationStore};
use crate::pipeline::{OperationList, Pipeline, PipelineRun};
use crate::sources::SourceRegistry;
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Ties together the project configuration, the persisted operation list
/// and a pipeline whose sources resolve relative paths against the project
/// root.
pub struct App {
    store: Box<dyn OperationStore>,
    pipeline: Pipeline,
    config: GrafterConfig,
    root_dir: PathBuf,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("root_dir", &self.root_dir)
            .field("config", &self.config)
            .field("pipeline", &self.pipeline)
            .field("store", &"<dyn OperationStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for `.grafter/` and loads its
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] when no project is found, or a
    /// configuration error when `config.yaml` cannot be read.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_grafter_root(working_dir).ok_or(Error::NotInitialized)?;
        let config_path = root_dir.join(GRAFTER_DIR_NAME).join(CONFIG_FILE_NAME);
        let config = GrafterConfig::load(&config_path).await?;

        let store = JsonlOperationStore::new(root_dir.join(&config.operations_file));
        Ok(Self::with_store(root_dir, config, Box::new(store)))
    }

    /// Create an App with an explicit store
    pub fn with_store(
        root_dir: PathBuf,
        config: GrafterConfig,
        store: Box<dyn OperationStore>,
    ) -> Self {
        let sources = SourceRegistry::new(root_dir.clone())
            .with_validation(config.validation)
            .with_http_timeout(config.http_timeout());

        Self {
            store,
            pipeline: Pipeline::new(sources),
            config,
            root_dir,
        }
    }

    /// The loaded configuration
    pub fn config(&self) -> &GrafterConfig {
        &self.config
    }

    /// Directory containing `.grafter/`
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The pipeline used by [`App::run`]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Load the persisted operation list
    pub async fn operations(&self) -> Result<OperationList> {
        Ok(OperationList::from_ordered(self.store.load().await?))
    }

    /// Persist the operation list
    pub async fn save_operations(&self, operations: &OperationList) -> Result<()> {
        self.store.save(operations.as_slice()).await
    }

    /// Run the persisted operation list from an empty base graph
    pub async fn run(&self) -> Result<PipelineRun> {
        let operations = self.operations().await?;
        self.pipeline
            .run(Graph::empty(), operations.as_slice())
            .await
    }
}
