//! Archive input handling — pull the simulation document out of a ZIP/OMEX.
//!
//! The extracted file is a temporary: `ExtractedDocument` removes it when
//! dropped, so every exit path — success or failure, anywhere downstream —
//! releases it.

use crate::core::error::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Document file extensions recognized inside an archive.
const DOCUMENT_EXTENSIONS: [&str; 2] = [".pbif", ".json"];

/// A document extracted from an archive; the file is deleted on drop.
#[derive(Debug)]
pub struct ExtractedDocument {
    path: PathBuf,
}

impl ExtractedDocument {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ExtractedDocument {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Whether a path is one of the supported archive container formats.
pub fn is_archive(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("zip") | Some("omex")
    )
}

/// Extract the first recognizable document from a ZIP or OMEX archive into
/// `output_dir`.
pub fn extract_document(archive_path: &Path, output_dir: &Path) -> Result<ExtractedDocument> {
    match archive_path.extension().and_then(|e| e.to_str()) {
        // OMEX is a ZIP container; nothing format-specific is needed yet.
        Some("zip") | Some("omex") => extract_first_document(archive_path, output_dir),
        _ => Err(Error::UnsupportedArchiveFormat {
            path: archive_path.to_path_buf(),
        }),
    }
}

fn extract_first_document(archive_path: &Path, output_dir: &Path) -> Result<ExtractedDocument> {
    let file = File::open(archive_path).map_err(|e| Error::io("open", archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| Error::Archive {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| Error::Archive {
            path: archive_path.to_path_buf(),
            source: e,
        })?;
        let name = entry.name().to_string();
        if !DOCUMENT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            continue;
        }

        let file_name = Path::new(&name)
            .file_name()
            .ok_or_else(|| Error::MissingDocumentInArchive {
                path: archive_path.to_path_buf(),
            })?;
        std::fs::create_dir_all(output_dir)
            .map_err(|e| Error::io("create directory", output_dir, e))?;
        let dest = output_dir.join(file_name);
        let mut out = File::create(&dest).map_err(|e| Error::io("create", &dest, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| Error::io("extract to", &dest, e))?;
        return Ok(ExtractedDocument { path: dest });
    }

    Err(Error::MissingDocumentInArchive {
        path: archive_path.to_path_buf(),
    })
}
