//! Capability-provider registry — a static, declared manifest.
//!
//! Providers are declared up front in a YAML manifest instead of being
//! discovered by introspecting the installed environment, so the provider set
//! is deterministic and testable. The registry never gates resolution; the
//! builder only reports which resolved import paths are covered.
//!
//! ```yaml
//! providers:
//!   process-bigraph:
//!     description: process orchestration primitives
//!     imports: [process_bigraph]
//! ```

use super::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One declared capability provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    #[serde(default)]
    pub description: Option<String>,

    /// Import-path roots this provider supplies (dotted-prefix matched).
    #[serde(default)]
    pub imports: Vec<String>,
}

/// The full provider manifest (order-preserving).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderManifest {
    #[serde(default)]
    pub providers: IndexMap<String, Provider>,
}

impl ProviderManifest {
    /// Load a manifest from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::io("read manifest", path, e))?;
        serde_yaml_ng::from_str(&text).map_err(|e| Error::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Find the provider declaring the longest dotted prefix of an import
    /// path. `a.b` covers `a.b` and `a.b.c`, never `a.bc`.
    pub fn provider_for(&self, import_path: &str) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (name, provider) in &self.providers {
            for root in &provider.imports {
                let covers =
                    import_path == root || import_path.starts_with(&format!("{root}."));
                if covers && best.is_none_or(|(_, len)| root.len() > len) {
                    best = Some((name.as_str(), root.len()));
                }
            }
        }
        best.map(|(name, _)| name)
    }
}
