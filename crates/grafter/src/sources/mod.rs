//! External source adapters.
//!
//! A source adapter resolves to a complete [`Graph`]: a bundled example, a
//! JSON file on disk, or a JSON document fetched over HTTP. Adapters only
//! fetch; the [`SourceRegistry`] validates what they return before it may
//! become the pipeline's base graph, so a partially-valid graph never gets
//! through.
//!
//! # Architecture
//!
//! [`GraphSource`] is an async trait so that file and network adapters can
//! suspend. It is object-safe; the registry hands out `Arc<dyn GraphSource>`.

mod bundled;
mod file;
mod http;

pub use bundled::{BundledSource, BUNDLED_SOURCES};
pub use file::FileSource;
pub use http::HttpSource;

use crate::domain::Graph;
use crate::error::{Error, Result};
use crate::graph::validation::{validate_graph, ValidationMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Default timeout for HTTP sources
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can produce a raw, not yet validated graph.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Human-readable name used in logs and errors
    fn name(&self) -> String;

    /// Fetch the graph.
    ///
    /// # Errors
    ///
    /// Returns an error when the data cannot be read or parsed.
    async fn fetch(&self) -> Result<Graph>;
}

/// Reference to a source, as stored in an operation record.
///
/// The string form is `example`, `complex-example`, `external`,
/// `file:<path>`, or an `http://` / `https://` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceRef {
    /// The bundled data-pipeline example
    Example,

    /// The bundled multi-system example
    ComplexExample,

    /// The bundled stand-in for externally ingested data
    External,

    /// A JSON graph document on disk
    File(PathBuf),

    /// A JSON graph document served over HTTP(S)
    Url(String),
}

impl SourceRef {
    /// Stable operation id for a source operation reading this source
    pub fn operation_id(&self) -> String {
        match self {
            SourceRef::Example => "example-source".to_string(),
            SourceRef::ComplexExample => "complex-example-source".to_string(),
            SourceRef::External => "external-source".to_string(),
            SourceRef::File(path) => format!("file-source-{}", path.display()),
            SourceRef::Url(url) => format!("url-source-{url}"),
        }
    }

    /// Display label
    pub fn label(&self) -> String {
        match self {
            SourceRef::Example => "Example Source".to_string(),
            SourceRef::ComplexExample => "Complex Source".to_string(),
            SourceRef::External => "External Source".to_string(),
            SourceRef::File(path) => format!("File Source: {}", path.display()),
            SourceRef::Url(url) => format!("URL Source: {url}"),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::Example => write!(f, "example"),
            SourceRef::ComplexExample => write!(f, "complex-example"),
            SourceRef::External => write!(f, "external"),
            SourceRef::File(path) => write!(f, "file:{}", path.display()),
            SourceRef::Url(url) => write!(f, "{url}"),
        }
    }
}

impl FromStr for SourceRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "example" => Ok(SourceRef::Example),
            "complex-example" => Ok(SourceRef::ComplexExample),
            "external" => Ok(SourceRef::External),
            _ if s.starts_with("http://") || s.starts_with("https://") => {
                Ok(SourceRef::Url(s.to_string()))
            }
            _ => match s.strip_prefix("file:") {
                Some(path) if !path.is_empty() => Ok(SourceRef::File(PathBuf::from(path))),
                _ => Err(Error::UnknownSource(s.to_string())),
            },
        }
    }
}

impl TryFrom<String> for SourceRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SourceRef> for String {
    fn from(value: SourceRef) -> Self {
        value.to_string()
    }
}

/// Resolves [`SourceRef`]s to adapters and validates what they load.
///
/// Relative file paths are resolved against `base_dir`. Individual sources
/// can be overridden, which is how tests and embedders inject their own
/// adapters.
#[derive(Clone)]
pub struct SourceRegistry {
    base_dir: PathBuf,
    validation: ValidationMode,
    http_timeout: Duration,
    overrides: HashMap<SourceRef, Arc<dyn GraphSource>>,
}

impl fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("base_dir", &self.base_dir)
            .field("validation", &self.validation)
            .field("http_timeout", &self.http_timeout)
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

impl SourceRegistry {
    /// Create a registry resolving relative paths against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            validation: ValidationMode::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            overrides: HashMap::new(),
        }
    }

    /// Set the validation mode applied to loaded graphs
    #[must_use]
    pub fn with_validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Set the timeout for HTTP sources
    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Serve `source` from `adapter` instead of the built-in resolution
    #[must_use]
    pub fn with_override(mut self, source: SourceRef, adapter: Arc<dyn GraphSource>) -> Self {
        self.overrides.insert(source, adapter);
        self
    }

    /// The adapter responsible for `source`
    pub fn adapter(&self, source: &SourceRef) -> Arc<dyn GraphSource> {
        if let Some(adapter) = self.overrides.get(source) {
            return Arc::clone(adapter);
        }

        match source {
            SourceRef::Example => Arc::new(BundledSource::example()),
            SourceRef::ComplexExample => Arc::new(BundledSource::complex_example()),
            SourceRef::External => Arc::new(BundledSource::external()),
            SourceRef::File(path) => Arc::new(FileSource::new(self.base_dir.join(path))),
            SourceRef::Url(url) => Arc::new(HttpSource::new(url.clone(), self.http_timeout)),
        }
    }

    /// Load and validate the graph behind `source`.
    ///
    /// # Errors
    ///
    /// - [`Error::Load`] wrapping the adapter's failure (I/O, HTTP, JSON shape)
    /// - [`Error::DuplicateId`] or [`Error::Validation`] when the loaded
    ///   graph is invalid, in either validation mode
    pub async fn load(&self, source: &SourceRef) -> Result<Graph> {
        let adapter = self.adapter(source);
        let name = adapter.name();

        let graph = adapter.fetch().await.map_err(|e| Error::Load {
            source_name: name.clone(),
            cause: Box::new(e),
        })?;

        validate_graph(&graph, self.validation)?.into_result()?;

        let summary = graph.summary();
        tracing::info!(
            source = %name,
            nodes = summary.nodes,
            edges = summary.edges,
            groups = summary.groups,
            "Loaded source"
        );

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::example("example", SourceRef::Example)]
    #[case::complex("complex-example", SourceRef::ComplexExample)]
    #[case::external("external", SourceRef::External)]
    #[case::file("file:data/graph.json", SourceRef::File(PathBuf::from("data/graph.json")))]
    #[case::https("https://example.com/g.json", SourceRef::Url("https://example.com/g.json".to_string()))]
    fn test_source_ref_round_trips_through_strings(#[case] text: &str, #[case] expected: SourceRef) {
        let parsed: SourceRef = text.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), text);
    }

    #[rstest]
    #[case::unknown("remote")]
    #[case::empty_path("file:")]
    #[case::blank("")]
    fn test_source_ref_rejects(#[case] text: &str) {
        assert!(matches!(
            text.parse::<SourceRef>(),
            Err(Error::UnknownSource(_))
        ));
    }

    #[test]
    fn test_operation_ids_match_bundled_names() {
        assert_eq!(SourceRef::Example.operation_id(), "example-source");
        assert_eq!(
            SourceRef::ComplexExample.operation_id(),
            "complex-example-source"
        );
        assert_eq!(SourceRef::External.operation_id(), "external-source");
    }

    #[tokio::test]
    async fn test_registry_loads_bundled_sources() {
        let registry = SourceRegistry::default();
        for source in [
            SourceRef::Example,
            SourceRef::ComplexExample,
            SourceRef::External,
        ] {
            let graph = registry.load(&source).await.unwrap();
            assert!(!graph.nodes.is_empty(), "{source} should not be empty");
        }
    }

    #[tokio::test]
    async fn test_registry_wraps_fetch_failures() {
        let registry = SourceRegistry::default();
        let err = registry
            .load(&SourceRef::File(PathBuf::from("/nonexistent/graph.json")))
            .await
            .unwrap_err();

        match err {
            Error::Load { cause, .. } => assert!(matches!(*cause, Error::Io(_))),
            other => panic!("expected Load error, got {other:?}"),
        }
    }
}
