//! BIFF Configuration Tools
//!
//! Parsing and validation for the configuration files of a three-tier
//! monitoring framework: Minion agents, Oscar hubs and Marvin dashboards.
//!
//! This library provides:
//! - `$(NAME)` alias and environment variable expansion
//! - Rule-based validation with fix suggestions
//! - A small XML element tree and typed section views
//! - Settings and command handling for the `biffcfg` binary

pub mod alias;
pub mod commands;
pub mod config;
pub mod model;
pub mod validation;
pub mod xml;

// Re-exports for clean public API
pub use alias::{AliasResolver, EnvVarResolver, ResolveError, resolve};
pub use config::Config;
pub use model::ConfigKind;
pub use validation::{Finding, Severity, ValidationResult, Validator, validate, validate_document};
pub use xml::{Element, parse_document};
