//! Crisol — reproducible container recipes for composite biosimulations.
//!
//! Scans a simulation document for `source:package[version]@import.path`
//! dependency addresses, checks them against an optional trust whitelist,
//! rewrites them to their `local:` form, and emits Docker and Apptainer
//! recipes that install the resolved environment.

pub mod archive;
pub mod builder;
pub mod cli;
pub mod core;
pub mod recipe;
