//! Recipe template filling.
//!
//! A template is static text carrying `$${#KEY}` placeholder tokens. The set
//! of required keys is read off the template itself, so templates can grow
//! new placeholders without touching resolution logic — an unrenderable key
//! is a configuration error, not a silent no-op.

use crate::core::error::{Error, Result};
use crate::core::types::ResolvedEnvironment;
use crate::recipe::{conda, pypi};
use indexmap::IndexSet;
use regex::Regex;
use std::sync::OnceLock;

/// The built-in Dockerfile template.
pub const DEFAULT_TEMPLATE: &str = r#"FROM ghcr.io/astral-sh/uv:python3.12-bookworm

RUN apt update
RUN apt upgrade -y
RUN apt install -y git curl

## Dependency installs
### Conda
$${#CONDA_FORGE_DEPENDENCIES}

### PyPI
$${#PYPI_DEPENDENCIES}

RUN mkdir /simulation
WORKDIR /simulation
COPY . /simulation

ENTRYPOINT ["python3", "-m", "simulation"]
"#;

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\$\{#([A-Za-z0-9_]+)\}").expect("placeholder pattern"))
}

/// Enumerate the placeholder keys a template requires, in template order,
/// deduplicated.
pub fn substitution_keys(template: &str) -> Vec<String> {
    let mut keys: IndexSet<String> = IndexSet::new();
    for caps in placeholder_regex().captures_iter(template) {
        keys.insert(caps[1].to_string());
    }
    keys.into_iter().collect()
}

/// Fill every placeholder the template declares. Substitution is exact-match
/// and textual; nothing is re-scanned after replacement.
pub fn render(template: &str, environment: &ResolvedEnvironment) -> Result<String> {
    let mut filled = template.to_string();
    for key in substitution_keys(template) {
        let block = match key.as_str() {
            "PYPI_DEPENDENCIES" => pypi::install_block(&environment.pypi_dependencies),
            "CONDA_FORGE_DEPENDENCIES" => conda::install_block(&environment.conda_dependencies),
            _ => return Err(Error::UnknownTemplateField { field: key }),
        };
        let token = format!("$${{#{key}}}");
        filled = filled.replace(&token, &block);
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(pypi: &[&str], conda: &[&str]) -> ResolvedEnvironment {
        ResolvedEnvironment {
            pypi_dependencies: pypi.iter().map(|s| s.to_string()).collect(),
            conda_dependencies: conda.iter().map(|s| s.to_string()).collect(),
            document: String::new(),
        }
    }

    #[test]
    fn test_default_template_declares_both_keys() {
        let keys = substitution_keys(DEFAULT_TEMPLATE);
        assert_eq!(keys, vec!["CONDA_FORGE_DEPENDENCIES", "PYPI_DEPENDENCIES"]);
    }

    #[test]
    fn test_keys_are_deduplicated_in_order() {
        let keys = substitution_keys("$${#B} $${#A} $${#B}");
        assert_eq!(keys, vec!["B", "A"]);
    }

    #[test]
    fn test_render_pypi_only() {
        let filled = render(
            DEFAULT_TEMPLATE,
            &environment(&["numpy>=2.0.0", "process-bigraph<1.0"], &[]),
        )
        .unwrap();
        assert!(filled
            .contains("RUN python3 -m pip install 'numpy>=2.0.0' 'process-bigraph<1.0'"));
        assert!(filled.contains("# No conda dependencies!"));
        assert!(!filled.contains("$${#"));
    }

    #[test]
    fn test_render_both_blocks_populated() {
        let filled = render(
            DEFAULT_TEMPLATE,
            &environment(&["numpy>=2.0.0"], &["readdy"]),
        )
        .unwrap();
        assert!(filled.contains("micromamba create -y -p /opt/conda -c conda-forge readdy python=3.12"));
        assert!(filled.contains("RUN python3 -m pip install 'numpy>=2.0.0'"));
        // Conda block precedes PyPI block, matching template order.
        let conda_at = filled.find("micromamba create").unwrap();
        let pypi_at = filled.find("pip install").unwrap();
        assert!(conda_at < pypi_at);
    }

    #[test]
    fn test_render_full_default_template_byte_exact() {
        let filled = render(
            DEFAULT_TEMPLATE,
            &environment(&["numpy>=2.0.0", "process-bigraph<1.0"], &[]),
        )
        .unwrap();
        let expected = r#"FROM ghcr.io/astral-sh/uv:python3.12-bookworm

RUN apt update
RUN apt upgrade -y
RUN apt install -y git curl

## Dependency installs
### Conda
# No conda dependencies!

### PyPI
RUN python3 -m pip install 'numpy>=2.0.0' 'process-bigraph<1.0'

RUN mkdir /simulation
WORKDIR /simulation
COPY . /simulation

ENTRYPOINT ["python3", "-m", "simulation"]
"#;
        assert_eq!(filled, expected);
    }

    #[test]
    fn test_unknown_key_is_fatal() {
        let err = render("$${#APK_DEPENDENCIES}", &environment(&[], &[])).unwrap_err();
        match err {
            Error::UnknownTemplateField { field } => assert_eq!(field, "APK_DEPENDENCIES"),
            other => panic!("expected UnknownTemplateField, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_placeholder_fills_every_occurrence() {
        let filled = render(
            "$${#PYPI_DEPENDENCIES}\n$${#PYPI_DEPENDENCIES}",
            &environment(&["numpy"], &[]),
        )
        .unwrap();
        assert_eq!(
            filled,
            "RUN python3 -m pip install 'numpy'\nRUN python3 -m pip install 'numpy'"
        );
    }

    #[test]
    fn test_template_without_placeholders_is_untouched() {
        let filled = render("FROM scratch\n", &environment(&["numpy"], &[])).unwrap();
        assert_eq!(filled, "FROM scratch\n");
    }

    #[test]
    fn test_no_nested_substitution() {
        // A block's own text is never re-scanned for placeholders.
        let filled = render(
            "$${#PYPI_DEPENDENCIES}",
            &environment(&["$${#CONDA_FORGE_DEPENDENCIES}"], &[]),
        )
        .unwrap();
        assert_eq!(
            filled,
            "RUN python3 -m pip install '$${#CONDA_FORGE_DEPENDENCIES}'"
        );
    }
}
