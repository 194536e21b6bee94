//! Recipe generation — template filling and engine-format rendering.
//!
//! Each dependency source has a renderer that produces the install block for
//! its `$${#KEY}` placeholder:
//! 1. `pypi` — a single quoted `pip install` invocation
//! 2. `conda` — a micromamba environment bootstrap
//!
//! `apptainer` holds the Dockerfile→Apptainer definition converter.

pub mod apptainer;
pub mod conda;
pub mod pypi;
pub mod template;
