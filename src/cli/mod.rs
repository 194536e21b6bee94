//! CLI subcommands — build, validate.

use crate::archive;
use crate::builder;
use crate::core::error::{Error, Result};
use crate::core::resolver;
use crate::core::types::{BuildRequest, ContainerLevel, Engine};
use crate::core::whitelist::Whitelist;
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Input extensions the CLI accepts, documents and archives alike.
const INPUT_EXTENSIONS: [&str; 4] = ["pbif", "json", "zip", "omex"];

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a simulation document and emit container recipes
    Build {
        /// Input document (.pbif/.json) or archive (.zip/.omex)
        input: PathBuf,

        /// Directory to write recipes into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Containerization level
        #[arg(long, value_enum, default_value_t = ContainerLevel::Single)]
        containerize: ContainerLevel,

        /// Container engine to emit a recipe for
        #[arg(long, value_enum, default_value_t = Engine::Docker)]
        engine: Engine,

        /// Trust whitelist file (source:package per line)
        #[arg(short, long)]
        whitelist: Option<PathBuf>,

        /// Capability-provider manifest (YAML)
        #[arg(short, long)]
        providers: Option<PathBuf>,

        /// Recipe template overriding the built-in one
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Check a document's dependency addresses without writing anything
    Validate {
        /// Input document (.pbif/.json) or archive (.zip/.omex)
        input: PathBuf,

        /// Trust whitelist file (source:package per line)
        #[arg(short, long)]
        whitelist: Option<PathBuf>,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Build {
            input,
            output_dir,
            containerize,
            engine,
            whitelist,
            providers,
            template,
        } => {
            check_input(&input)?;
            cmd_build(BuildRequest {
                input,
                output_dir,
                level: containerize,
                engine,
                whitelist,
                providers,
                template,
            })
        }
        Commands::Validate { input, whitelist } => {
            check_input(&input)?;
            cmd_validate(&input, whitelist.as_deref())
        }
    }
}

fn check_input(input: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(Error::InvalidArguments(format!(
            "{} is not a file",
            input.display()
        )));
    }
    let recognized = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext));
    if !recognized {
        return Err(Error::InvalidArguments(format!(
            "{}: expected one of .pbif, .json, .zip, .omex",
            input.display()
        )));
    }
    Ok(())
}

fn cmd_build(request: BuildRequest) -> Result<()> {
    let outcome = builder::execute(&request)?;

    println!(
        "Resolved {}: {} PyPI, {} conda-forge",
        request.input.display(),
        outcome.environment.pypi_dependencies.len(),
        outcome.environment.conda_dependencies.len()
    );
    for recipe in &outcome.recipes {
        println!("Recipe written: {}", recipe.display());
    }
    if outcome.recipes.is_empty() {
        println!("No recipes requested (level: {})", request.level);
    }
    Ok(())
}

/// Resolve without touching the input: archives extract to a temp dir and the
/// extracted copy is dropped afterwards; direct documents are only read.
fn cmd_validate(input: &Path, whitelist: Option<&Path>) -> Result<()> {
    let extracted = if archive::is_archive(input) {
        Some(archive::extract_document(input, &std::env::temp_dir())?)
    } else {
        None
    };
    let document = match &extracted {
        Some(doc) => doc.path(),
        None => input,
    };
    let text = std::fs::read_to_string(document)
        .map_err(|e| Error::io("read document", document, e))?;

    let whitelist = match whitelist {
        Some(path) => Some(Whitelist::load(path)?),
        None => None,
    };
    let environment = resolver::resolve(&text, whitelist.as_ref())?;

    println!(
        "OK: {} ({} PyPI, {} conda-forge)",
        input.display(),
        environment.pypi_dependencies.len(),
        environment.conda_dependencies.len()
    );
    for requirement in &environment.pypi_dependencies {
        println!("  pypi: {}", requirement);
    }
    for requirement in &environment.conda_dependencies {
        println!("  conda-forge: {}", requirement);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{"diffusion": "pypi:copasi-basico[>=0.8]@basico"}"#;

    #[test]
    fn test_check_input_rejects_missing_file() {
        let err = check_input(Path::new("/nonexistent/sim.pbif")).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[test]
    fn test_check_input_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.txt");
        std::fs::write(&path, DOCUMENT).unwrap();

        let err = check_input(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidArguments(_)));
    }

    #[test]
    fn test_check_input_accepts_documents_and_archives() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["sim.pbif", "sim.json", "sim.zip", "sim.omex"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "x").unwrap();
            assert!(check_input(&path).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_validate_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.pbif");
        std::fs::write(&path, DOCUMENT).unwrap();

        cmd_validate(&path, None).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DOCUMENT);
    }

    #[test]
    fn test_validate_reports_whitelist_violation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.pbif");
        std::fs::write(&path, DOCUMENT).unwrap();
        let whitelist = dir.path().join("trusted.txt");
        std::fs::write(&whitelist, "conda:readdy\n").unwrap();

        let err = cmd_validate(&path, Some(&whitelist)).unwrap_err();
        assert!(matches!(err, Error::UntrustedSource { .. }));
    }

    #[test]
    fn test_build_dispatch_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.pbif");
        std::fs::write(&path, DOCUMENT).unwrap();

        dispatch(Commands::Build {
            input: path,
            output_dir: dir.path().to_path_buf(),
            containerize: ContainerLevel::Single,
            engine: Engine::Docker,
            whitelist: None,
            providers: None,
            template: None,
        })
        .unwrap();

        assert!(dir.path().join("Dockerfile").exists());
    }
}
