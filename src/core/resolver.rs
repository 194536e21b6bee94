//! Address resolution — scan, validate, deduplicate, rewrite.
//!
//! `resolve` is all-or-nothing: every validation (known source, whitelist)
//! runs before a single byte of the document is rewritten, so a rejected
//! document can never be half-localized.

use super::error::{Error, Result};
use super::grammar;
use super::types::{DependencyReference, ResolvedEnvironment, Source};
use super::whitelist::Whitelist;
use indexmap::{IndexMap, IndexSet};

/// Scan a document for dependency addresses, in document order.
///
/// Fails on the first address with an unknown source. A document with no
/// addresses at all is an error: `DocumentAlreadyLocalized` when it carries
/// at least one `local:` reference, `NoDependenciesFound` otherwise.
pub fn scan(document: &str) -> Result<Vec<DependencyReference>> {
    let mut references = Vec::new();
    for caps in grammar::address_regex().captures_iter(document) {
        let source_token = &caps["source"];
        let source = Source::parse(source_token).ok_or_else(|| Error::UnknownSource {
            source_name: source_token.to_string(),
            address: caps[0].to_string(),
        })?;
        references.push(DependencyReference {
            source,
            package: caps["package"].to_string(),
            version: caps
                .name("version")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            import_path: caps["import"].to_string(),
        });
    }

    if references.is_empty() {
        if grammar::local_reference_regex().is_match(document) {
            return Err(Error::DocumentAlreadyLocalized);
        }
        return Err(Error::NoDependenciesFound);
    }

    Ok(references)
}

/// Resolve a document into its dependency lists and localized text.
pub fn resolve(document: &str, whitelist: Option<&Whitelist>) -> Result<ResolvedEnvironment> {
    let references = scan(document)?;

    // Trust checks run for every address before any rewrite.
    if let Some(whitelist) = whitelist {
        for reference in &references {
            whitelist.check(reference.source, &reference.package)?;
        }
    }

    let mut pypi: IndexSet<String> = IndexSet::new();
    let mut conda: IndexSet<String> = IndexSet::new();
    let mut rewrites: IndexMap<String, String> = IndexMap::new();
    for reference in &references {
        match reference.source {
            Source::Pypi => {
                pypi.insert(reference.requirement());
            }
            Source::Conda => {
                conda.insert(reference.requirement());
            }
        }
        rewrites
            .entry(reference.address())
            .or_insert_with(|| reference.local_reference());
    }

    // Longest addresses first so one address can never clobber the prefix of
    // another whose import path extends it.
    let mut rewrites: Vec<(String, String)> = rewrites.into_iter().collect();
    rewrites.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut rewritten = document.to_string();
    for (address, local) in &rewrites {
        rewritten = rewritten.replace(address.as_str(), local);
    }

    Ok(ResolvedEnvironment {
        pypi_dependencies: pypi.into_iter().collect(),
        conda_dependencies: conda.into_iter().collect(),
        document: rewritten.trim().to_string(),
    })
}
