//! Macro Expansion
//!
//! `$(NAME)` references come in two kinds: aliases defined in the
//! document's `AliasList` sections, and environment variables.

pub mod env;
pub mod resolver;

pub use env::{EnvError, EnvVarResolver, extract_env_vars};
pub use resolver::{AliasResolver, DEFAULT_MAX_ITERATIONS, ResolveError, referenced_names, resolve};
