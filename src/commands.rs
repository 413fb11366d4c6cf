//! Command Dispatch
//!
//! The only layer that touches the filesystem and the process environment.
//! Each command writes its report to `out` and returns whether it succeeded.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::alias::{self, AliasResolver, EnvVarResolver};
use crate::config::{Command, Config, KindArg, OutputFormat, Settings};
use crate::model::ConfigKind;
use crate::model::sections;
use crate::validation::{Validator, parse_failure};
use crate::xml::parse_document;

/// Run the configured command
pub fn run(config: &Config, out: &mut impl Write) -> Result<bool> {
    match &config.command {
        Command::Validate {
            config_file,
            kind,
            format,
        } => validate_file(config_file, *kind, *format, out),
        Command::Resolve {
            config_file,
            max_iterations,
            with_env,
        } => {
            let max_iterations = max_iterations.unwrap_or(config.settings.max_iterations);
            resolve_file(config_file, &config.settings, max_iterations, *with_env, out)
        }
        Command::Aliases { config_file } => list_aliases(config_file, &config.settings, out),
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("File not found: {}", path.display()))
}

/// Validate one file; `Ok(false)` means the configuration has errors
pub fn validate_file(
    path: &Path,
    kind: KindArg,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<bool> {
    let content = read_config_file(path)?;

    let result = match parse_document(&content) {
        Ok(root) => {
            let kind = match kind.kind() {
                Some(kind) => kind,
                None => ConfigKind::detect(&root).ok_or_else(|| {
                    anyhow!(
                        "Could not auto-detect type: root element <{}> is not Minion, Oscar or Marvin",
                        root.name
                    )
                })?,
            };
            log::info!("Validating {} as {} config", path.display(), kind);
            Validator::from_process_env().validate(&root, kind)
        }
        Err(e) => {
            log::warn!("{}: {}", path.display(), e);
            parse_failure(e)
        }
    };

    match format {
        OutputFormat::Text => {
            writeln!(out, "Validating {}", path.display())?;
            write!(out, "{result}")?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        }
    }

    Ok(result.is_valid())
}

/// Build the lookup table for `resolve`: settings, then document aliases,
/// then (optionally) environment variables for names still undefined.
pub(crate) fn resolution_table(
    document_aliases: HashMap<String, String>,
    settings: &Settings,
    env: Option<&EnvVarResolver>,
) -> HashMap<String, String> {
    let mut table = settings.aliases.clone();
    table.extend(document_aliases);

    if let Some(env) = env {
        for (name, value) in env.env() {
            table
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }
    table
}

/// Print the document with every reference expanded
pub fn resolve_file(
    path: &Path,
    settings: &Settings,
    max_iterations: usize,
    with_env: bool,
    out: &mut impl Write,
) -> Result<bool> {
    let content = read_config_file(path)?;
    let root = parse_document(&content)
        .with_context(|| format!("Failed to parse XML in {}", path.display()))?;

    let env = with_env.then(EnvVarResolver::from_process_env);
    let table = resolution_table(sections::aliases(&root), settings, env.as_ref());
    log::debug!("resolving with {} name(s) defined", table.len());

    let expanded = alias::resolve(&content, &table, max_iterations)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    write!(out, "{expanded}")?;
    if !expanded.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(true)
}

/// Print alias definitions and references that have no definition
pub fn list_aliases(path: &Path, settings: &Settings, out: &mut impl Write) -> Result<bool> {
    let content = read_config_file(path)?;
    let root = parse_document(&content)
        .with_context(|| format!("Failed to parse XML in {}", path.display()))?;

    let resolver = AliasResolver::new(resolution_table(sections::aliases(&root), settings, None));
    let mut names: Vec<_> = resolver.aliases().iter().collect();
    names.sort();

    writeln!(out, "{} alias definition(s):", names.len())?;
    for (name, value) in names {
        writeln!(out, "  {name} = {value}")?;
    }

    let undefined = resolver.unresolved_aliases(&content);
    if !undefined.is_empty() {
        writeln!(out, "{} undefined reference(s):", undefined.len())?;
        for name in &undefined {
            writeln!(out, "  $({name})")?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn settings_with(pairs: &[(&str, &str)]) -> Settings {
        Settings {
            aliases: map(pairs),
            ..Settings::default()
        }
    }

    #[test]
    fn test_document_aliases_override_settings() {
        let table = resolution_table(
            map(&[("NS", "Demo")]),
            &settings_with(&[("NS", "Settings"), ("HOST", "localhost")]),
            None,
        );
        assert_eq!(table["NS"], "Demo");
        assert_eq!(table["HOST"], "localhost");
    }

    #[test]
    fn test_environment_only_fills_undefined_names() {
        let env = EnvVarResolver::new(map(&[
            ("NS", "FromEnv"),
            ("HOST", "env-host"),
            ("BIFF_DATA", "/var/biff"),
        ]));
        let table = resolution_table(
            map(&[("NS", "Demo")]),
            &settings_with(&[("HOST", "localhost")]),
            Some(&env),
        );

        assert_eq!(table["NS"], "Demo");
        assert_eq!(table["HOST"], "localhost");
        assert_eq!(table["BIFF_DATA"], "/var/biff");
    }

    #[test]
    fn test_without_environment_names_stay_undefined() {
        let table = resolution_table(map(&[]), &Settings::default(), None);
        assert!(table.is_empty());
    }
}
