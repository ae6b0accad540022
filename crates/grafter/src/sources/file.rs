//! Graph documents read from disk.

use super::GraphSource;
use crate::domain::Graph;
use crate::error::Result;
use crate::serialization::load_graph_from_file;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a JSON graph document from a file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GraphSource for FileSource {
    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn fetch(&self) -> Result<Graph> {
        tracing::debug!(path = %self.path.display(), "Reading graph document");
        load_graph_from_file(&self.path).await
    }
}
