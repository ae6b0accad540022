//! Persistence for operation lists.
//!
//! The pipeline itself never touches storage. Callers that want an operation
//! list to survive a restart inject an [`OperationStore`]:
//!
//! - [`MemoryOperationStore`]: process-local, for tests and embedding
//! - [`JsonlOperationStore`]: one `{"kind": ..., "targetId": ...}` record per
//!   line
//!
//! # File Format
//!
//! ```text
//! {"kind":"source","targetId":"example"}
//! {"kind":"add-all"}
//! {"kind":"start-filter","targetId":"A"}
//! ```
//!
//! Lines in the older `{"id": "start-filter-A"}` form are still read and
//! rehydrated from the id. Lines that match neither form are skipped with a
//! warning.
//!
//! # Atomicity
//!
//! Saves write the whole list to `<file>.tmp`, flush it, then rename it over
//! the target. A crash mid-write leaves the previous list intact.

use crate::error::Result;
use crate::operations::Operation;
use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Somewhere an ordered operation list can be kept.
#[async_trait]
pub trait OperationStore: Send + Sync {
    /// Load the stored list, in pipeline order. A store that has never been
    /// written yields an empty list.
    async fn load(&self) -> Result<Vec<Operation>>;

    /// Replace the stored list.
    async fn save(&self, operations: &[Operation]) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryOperationStore {
    operations: Mutex<Vec<Operation>>,
}

impl MemoryOperationStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OperationStore for MemoryOperationStore {
    async fn load(&self) -> Result<Vec<Operation>> {
        Ok(self.operations.lock().await.clone())
    }

    async fn save(&self, operations: &[Operation]) -> Result<()> {
        *self.operations.lock().await = operations.to_vec();
        Ok(())
    }
}

/// Store backed by a JSON Lines file.
#[derive(Debug, Clone)]
pub struct JsonlOperationStore {
    path: PathBuf,
}

#[derive(Deserialize)]
struct LegacyRecord {
    id: String,
}

impl JsonlOperationStore {
    /// Store reading and writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse one line of an operation file.
///
/// Returns `None` for lines that are neither a current record nor a legacy
/// `{ "id": ... }` record with a recognizable id.
fn parse_line(line: &str) -> Option<Operation> {
    if let Ok(operation) = serde_json::from_str::<Operation>(line) {
        return Some(operation);
    }
    let legacy: LegacyRecord = serde_json::from_str(line).ok()?;
    Operation::from_legacy_id(&legacy.id)
}

#[async_trait]
impl OperationStore for JsonlOperationStore {
    async fn load(&self) -> Result<Vec<Operation>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut operations = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(operation) => operations.push(operation),
                None => tracing::warn!(
                    file = %self.path.display(),
                    line = index + 1,
                    record = line,
                    "Dropping unrecognized operation record"
                ),
            }
        }

        Ok(operations)
    }

    async fn save(&self, operations: &[Operation]) -> Result<()> {
        let temp_path = make_temp_path(&self.path);

        if let Err(e) = write_records(&temp_path, operations).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }

        tokio::fs::rename(&temp_path, &self.path).await?;
        tracing::debug!(file = %self.path.display(), count = operations.len(), "Saved operations");
        Ok(())
    }
}

/// `ops.jsonl` becomes `ops.jsonl.tmp`; a path without extension gets `.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => {
            let mut ext = ext.to_os_string();
            ext.push(".tmp");
            ext
        }
        None => OsString::from("tmp"),
    };
    path.with_extension(extension)
}

async fn write_records(path: &Path, operations: &[Operation]) -> Result<()> {
    let mut buffer = Vec::new();
    for operation in operations {
        serde_json::to_writer(&mut buffer, operation)?;
        buffer.push(b'\n');
    }

    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(&buffer).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
