//! Core resolution logic — grammar, resolver, whitelist, registry, errors.

pub mod error;
pub mod grammar;
pub mod registry;
pub mod resolver;
pub mod types;
pub mod whitelist;
