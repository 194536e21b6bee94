//! Error taxonomy for resolution, templating, and artifact handling.
//!
//! Every failure category carries a distinct process exit code so callers
//! (and cron/CI wrappers) can tell rejection classes apart. Validation always
//! precedes mutation: an error here means no artifact was written.

use super::types::ContainerLevel;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed whitelist entry '{line}' (expected source:package)")]
    MalformedWhitelistEntry { line: String },

    #[error("no dependency addresses found in document")]
    NoDependenciesFound,

    #[error("document is already fully localized; nothing left to resolve")]
    DocumentAlreadyLocalized,

    #[error("unknown dependency source '{source_name}' in address '{address}'")]
    UnknownSource {
        source_name: String,
        address: String,
    },

    #[error("source '{source_name}' is not trusted by the whitelist")]
    UntrustedSource { source_name: String },

    #[error("package '{package}' is not whitelisted for source '{source_name}'")]
    UntrustedPackage {
        source_name: String,
        package: String,
    },

    #[error("unknown field in recipe template: {field}")]
    UnknownTemplateField { field: String },

    #[error("{level} containerization is not supported yet")]
    UnsupportedContainerizationLevel { level: ContainerLevel },

    #[error("unsupported archive format: {}", .path.display())]
    UnsupportedArchiveFormat { path: PathBuf },

    #[error("no simulation document found in archive: {}", .path.display())]
    MissingDocumentInArchive { path: PathBuf },

    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("invalid provider manifest {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("cannot convert recipe: {detail}")]
    RecipeConversion { detail: String },

    #[error("{0}")]
    InvalidArguments(String),
}

impl Error {
    /// Shorthand for wrapping a filesystem error with the failed action.
    pub fn io(action: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable exit code for this failure category.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArguments(_) => 2,
            Self::Io { .. } => 10,
            Self::MalformedWhitelistEntry { .. } => 11,
            Self::NoDependenciesFound => 12,
            Self::DocumentAlreadyLocalized => 13,
            Self::UnknownSource { .. } => 14,
            Self::UntrustedSource { .. } => 15,
            Self::UntrustedPackage { .. } => 16,
            Self::UnknownTemplateField { .. } => 17,
            Self::UnsupportedContainerizationLevel { .. } => 18,
            Self::UnsupportedArchiveFormat { .. } => 19,
            Self::MissingDocumentInArchive { .. } => 20,
            Self::Archive { .. } => 21,
            Self::Manifest { .. } => 22,
            Self::RecipeConversion { .. } => 23,
        }
    }
}
