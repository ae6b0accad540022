//! Example graphs shipped inside the binary.

use super::GraphSource;
use crate::domain::Graph;
use crate::error::Result;
use crate::serialization::load_graph_from_json;
use async_trait::async_trait;

/// Names of the bundled sources, with a one-line description each
pub const BUNDLED_SOURCES: &[(&str, &str)] = &[
    ("example", "Data platform: ingestion, validation, ML and reporting"),
    ("complex-example", "Retraining and deployment flow across several systems"),
    ("external", "Small graph standing in for externally ingested data"),
];

/// A graph document compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct BundledSource {
    name: &'static str,
    document: &'static str,
}

impl BundledSource {
    /// The data-platform example
    pub fn example() -> Self {
        Self {
            name: "example",
            document: include_str!("../../data/example.json"),
        }
    }

    /// The multi-system retraining example
    pub fn complex_example() -> Self {
        Self {
            name: "complex-example",
            document: include_str!("../../data/complex_example.json"),
        }
    }

    /// The external-data stand-in
    pub fn external() -> Self {
        Self {
            name: "external",
            document: include_str!("../../data/external.json"),
        }
    }
}

#[async_trait]
impl GraphSource for BundledSource {
    fn name(&self) -> String {
        self.name.to_string()
    }

    async fn fetch(&self) -> Result<Graph> {
        load_graph_from_json(self.document)
    }
}
