//! The address grammar — one source of truth for every character class.
//!
//! ```text
//! address     := source ":" package version? "@" importPath
//! source      := [A-Za-z0-9_-]+
//! package     := broad opaque identifier (PyPI names, git/http locators)
//! version     := "[" constraint "]"
//! importPath  := dotted identifier, each segment [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! The match pass and the rewrite pass share these definitions so the two can
//! never drift apart: the rewriter replaces exactly the substrings this
//! module matched.

use regex::Regex;
use std::sync::OnceLock;

/// Source token: letters, digits, underscore, hyphen.
pub const SOURCE: &str = "[A-Za-z0-9_-]+";

/// Package name: must admit PyPI package names and simple git/http-style
/// locator strings. Lazy so the version bracket and import path are never
/// swallowed (the class itself contains `[`, `]`, and `@`).
pub const PACKAGE: &str = r"[A-Za-z0-9\-_.~:/?#\[\]@!$&'()*+,;=%]+?";

/// Version constraint body, between the hard brackets.
pub const VERSION: &str = r"[A-Za-z0-9><=~!*.\-]+";

/// Dotted import path: each `.`-separated segment starts with a letter or
/// underscore.
pub const IMPORT_PATH: &str = "[A-Za-z_][A-Za-z0-9_]*(?:\\.[A-Za-z_][A-Za-z0-9_]*)*";

/// Full address pattern with `source`, `package`, `version`, `import` groups.
pub fn address_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            "(?P<source>{SOURCE}):(?P<package>{PACKAGE})(?:\\[(?P<version>{VERSION})\\])?@(?P<import>{IMPORT_PATH})"
        );
        Regex::new(&pattern).expect("address grammar pattern")
    })
}

/// Already-rewritten form: `local:import.path`.
pub fn local_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("local:{IMPORT_PATH}")).expect("local reference pattern")
    })
}
