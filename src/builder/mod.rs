//! Build orchestration — turn one input document into container recipes.
//!
//! The pipeline is resolve-then-write: every fallible resolution step runs
//! before the first byte lands on disk, so a failed run leaves the input
//! document and the output directory untouched.

use crate::archive::{self, ExtractedDocument};
use crate::core::error::{Error, Result};
use crate::core::registry::ProviderManifest;
use crate::core::resolver;
use crate::core::types::{BuildRequest, ContainerLevel, Engine, ResolvedEnvironment};
use crate::core::whitelist::Whitelist;
use crate::recipe::apptainer::{ApptainerConverter, RecipeConverter};
use crate::recipe::template;
use std::path::{Path, PathBuf};

/// Canonical Docker recipe file name.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Canonical Apptainer definition file name.
pub const APPTAINER_DEF_NAME: &str = "Apptainer.def";

/// What a completed build produced.
#[derive(Debug)]
pub struct BuildOutcome {
    /// The resolved document on disk (rewritten in place for direct inputs).
    pub document: PathBuf,

    /// Recipe files written, in write order. Empty for `ContainerLevel::None`.
    pub recipes: Vec<PathBuf>,

    pub environment: ResolvedEnvironment,
}

enum DocumentInput {
    Direct(PathBuf),
    Extracted(ExtractedDocument),
}

impl DocumentInput {
    fn path(&self) -> &Path {
        match self {
            Self::Direct(path) => path,
            Self::Extracted(doc) => doc.path(),
        }
    }
}

/// Run the full pipeline for one request.
pub fn execute(request: &BuildRequest) -> Result<BuildOutcome> {
    let input = if archive::is_archive(&request.input) {
        DocumentInput::Extracted(archive::extract_document(&request.input, &request.output_dir)?)
    } else {
        DocumentInput::Direct(request.input.clone())
    };

    let text = std::fs::read_to_string(input.path())
        .map_err(|e| Error::io("read document", input.path(), e))?;

    let whitelist = match &request.whitelist {
        Some(path) => Some(Whitelist::load(path)?),
        None => None,
    };
    let environment = resolver::resolve(&text, whitelist.as_ref())?;

    if let Some(path) = &request.providers {
        report_provider_coverage(path, &text)?;
    }

    let recipes = match request.level {
        ContainerLevel::None => Vec::new(),
        ContainerLevel::Multiple => {
            return Err(Error::UnsupportedContainerizationLevel {
                level: request.level,
            });
        }
        ContainerLevel::Single => {
            let recipe = render_recipe(request, &environment)?;
            write_recipes(&request.output_dir, request.engine, &recipe)?
        }
    };

    if environment.document != text.trim() {
        std::fs::write(input.path(), &environment.document)
            .map_err(|e| Error::io("write document", input.path(), e))?;
    }

    Ok(BuildOutcome {
        document: input.path().to_path_buf(),
        recipes,
        environment,
    })
}

/// Informational only: name which provider covers each import path. Missing
/// coverage is reported but never fails the build.
fn report_provider_coverage(manifest_path: &Path, document: &str) -> Result<()> {
    let manifest = ProviderManifest::load(manifest_path)?;
    for reference in resolver::scan(document)? {
        match manifest.provider_for(&reference.import_path) {
            Some(provider) => {
                println!("Provider '{}' covers {}", provider, reference.import_path);
            }
            None => println!("No provider covers {}", reference.import_path),
        }
    }
    Ok(())
}

fn render_recipe(request: &BuildRequest, environment: &ResolvedEnvironment) -> Result<String> {
    let template = match &request.template {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| Error::io("read template", path, e))?
        }
        None => template::DEFAULT_TEMPLATE.to_string(),
    };
    template::render(&template, environment)
}

fn write_recipes(output_dir: &Path, engine: Engine, recipe: &str) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| Error::io("create directory", output_dir, e))?;

    let mut written = Vec::new();
    if matches!(engine, Engine::Docker | Engine::Both) {
        let path = output_dir.join(DOCKERFILE_NAME);
        std::fs::write(&path, recipe).map_err(|e| Error::io("write", &path, e))?;
        written.push(path);
    }
    if matches!(engine, Engine::Apptainer | Engine::Both) {
        let definition = ApptainerConverter.convert(recipe)?;
        let path = output_dir.join(APPTAINER_DEF_NAME);
        std::fs::write(&path, definition).map_err(|e| Error::io("write", &path, e))?;
        written.push(path);
    }
    Ok(written)
}
