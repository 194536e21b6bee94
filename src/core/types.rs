//! Domain types — dependency addresses, resolved environments, build requests.
//!
//! An address is the inline annotation `source:package[version]@import.path`
//! embedded in a simulation document. Resolution turns the set of addresses
//! into per-source dependency lists plus a rewritten document in which every
//! address has been replaced by its `local:import.path` form.

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Dependency sources
// ============================================================================

/// The known package sources an address may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Pypi,
    Conda,
}

impl Source {
    /// Parse a source token. Matching is case-sensitive; anything outside
    /// the known set is rejected by the resolver.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "pypi" => Some(Self::Pypi),
            "conda" => Some(Self::Conda),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pypi => "pypi",
            Self::Conda => "conda",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Dependency references
// ============================================================================

/// A single dependency address matched in a document.
///
/// Identity for deduplication is `(source, package, version)`; the import
/// path only determines the rewritten `local:` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyReference {
    pub source: Source,

    /// Package name as written — never normalized.
    pub package: String,

    /// Raw version constraint text, empty when the address carried none.
    pub version: String,

    /// Dotted import path after the `@`.
    pub import_path: String,
}

impl DependencyReference {
    /// The full address substring as it appears in the document,
    /// the version bracket present only when a constraint was given.
    pub fn address(&self) -> String {
        if self.version.is_empty() {
            format!("{}:{}@{}", self.source, self.package, self.import_path)
        } else {
            format!(
                "{}:{}[{}]@{}",
                self.source, self.package, self.version, self.import_path
            )
        }
    }

    /// The installable requirement string: package name plus trimmed
    /// constraint, bare name when no constraint was given.
    pub fn requirement(&self) -> String {
        format!("{}{}", self.package, self.version.trim())
    }

    /// The post-resolution local reference this address rewrites to.
    pub fn local_reference(&self) -> String {
        format!("local:{}", self.import_path)
    }
}

// ============================================================================
// Resolved environment
// ============================================================================

/// The outcome of resolving one document. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    /// PyPI requirement strings in first-seen order.
    pub pypi_dependencies: Vec<String>,

    /// Conda-forge requirement strings in first-seen order.
    pub conda_dependencies: Vec<String>,

    /// Document text with every address rewritten to its `local:` form,
    /// trimmed of surrounding whitespace.
    pub document: String,
}

// ============================================================================
// Build configuration
// ============================================================================

/// How many containers the run is allowed to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContainerLevel {
    /// Validate and resolve only; write no artifacts.
    None,
    /// One container for the whole document.
    Single,
    /// Coordinated multi-container output (not implemented).
    Multiple,
}

impl fmt::Display for ContainerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Single => write!(f, "single"),
            Self::Multiple => write!(f, "multiple"),
        }
    }
}

/// Which container engine(s) to emit a recipe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    Docker,
    Apptainer,
    Both,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docker => write!(f, "docker"),
            Self::Apptainer => write!(f, "apptainer"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Caller-supplied configuration for one build run.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Input document (`.pbif`/`.json`) or archive (`.zip`/`.omex`).
    pub input: PathBuf,

    /// Directory recipe artifacts are written to.
    pub output_dir: PathBuf,

    pub level: ContainerLevel,
    pub engine: Engine,

    /// Optional trust whitelist file.
    pub whitelist: Option<PathBuf>,

    /// Optional capability-provider manifest.
    pub providers: Option<PathBuf>,

    /// Optional recipe template overriding the built-in one.
    pub template: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_known() {
        assert_eq!(Source::parse("pypi"), Some(Source::Pypi));
        assert_eq!(Source::parse("conda"), Some(Source::Conda));
    }

    #[test]
    fn test_source_parse_is_case_sensitive() {
        assert_eq!(Source::parse("PyPI"), None);
        assert_eq!(Source::parse("CONDA"), None);
        assert_eq!(Source::parse("local"), None);
    }

    #[test]
    fn test_reference_address_with_version() {
        let r = DependencyReference {
            source: Source::Pypi,
            package: "numpy".to_string(),
            version: ">=2.0.0".to_string(),
            import_path: "numpy.random.rand".to_string(),
        };
        assert_eq!(r.address(), "pypi:numpy[>=2.0.0]@numpy.random.rand");
        assert_eq!(r.requirement(), "numpy>=2.0.0");
        assert_eq!(r.local_reference(), "local:numpy.random.rand");
    }

    #[test]
    fn test_reference_address_without_version() {
        let r = DependencyReference {
            source: Source::Conda,
            package: "readdy".to_string(),
            version: String::new(),
            import_path: "readdy.ReactionDiffusionSystem".to_string(),
        };
        assert_eq!(r.address(), "conda:readdy@readdy.ReactionDiffusionSystem");
        assert_eq!(r.requirement(), "readdy");
    }

    #[test]
    fn test_requirement_trims_constraint_whitespace() {
        let r = DependencyReference {
            source: Source::Pypi,
            package: "basico".to_string(),
            version: " ~0.8 ".to_string(),
            import_path: "basico.model_io".to_string(),
        };
        assert_eq!(r.requirement(), "basico~0.8");
    }

    #[test]
    fn test_level_and_engine_display() {
        assert_eq!(ContainerLevel::Multiple.to_string(), "multiple");
        assert_eq!(Engine::Apptainer.to_string(), "apptainer");
        assert_eq!(Engine::Both.to_string(), "both");
    }
}
