//! Trust whitelist — the approved `(source, package)` pairs.
//!
//! Built once from a flat `source:package` file, immutable afterwards. An
//! empty whitelist is a deliberate deny-all configuration, distinct from
//! passing no whitelist at all.

use super::error::{Error, Result};
use super::types::Source;
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Default)]
pub struct Whitelist {
    approved: HashMap<String, HashSet<String>>,
}

impl Whitelist {
    /// Parse `source:package` lines. Blank lines are skipped; any other line
    /// that does not split into exactly two non-empty fields is fatal.
    /// Duplicate entries are idempotent.
    pub fn parse(text: &str) -> Result<Self> {
        let mut approved: HashMap<String, HashSet<String>> = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(':').collect();
            match fields.as_slice() {
                [source, package] if !source.is_empty() && !package.is_empty() => {
                    approved
                        .entry((*source).to_string())
                        .or_default()
                        .insert((*package).to_string());
                }
                _ => {
                    return Err(Error::MalformedWhitelistEntry {
                        line: line.to_string(),
                    })
                }
            }
        }
        Ok(Self { approved })
    }

    /// Load a whitelist file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| Error::io("read whitelist", path, e))?;
        Self::parse(&text)
    }

    /// Check one address against the whitelist. Sources and packages match
    /// exactly — no case folding, no normalization.
    pub fn check(&self, source: Source, package: &str) -> Result<()> {
        let packages = self
            .approved
            .get(source.as_str())
            .ok_or_else(|| Error::UntrustedSource {
                source_name: source.to_string(),
            })?;
        if packages.contains(package) {
            Ok(())
        } else {
            Err(Error::UntrustedPackage {
                source_name: source.to_string(),
                package: package.to_string(),
            })
        }
    }

    /// Number of approved `(source, package)` pairs.
    pub fn len(&self) -> usize {
        self.approved.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}
