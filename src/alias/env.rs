//! Environment Variable References
//!
//! `$(VAR)` references whose names look like environment variables
//! (upper case, digits, underscores) resolved against an explicit environment.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(([A-Z_][A-Z0-9_]*)\)").expect("environment pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("Environment variable not set: {0}")]
    UnsetVariable(String),
}

/// Resolver bound to an environment snapshot
#[derive(Debug, Clone, Default)]
pub struct EnvVarResolver {
    env: HashMap<String, String>,
}

impl EnvVarResolver {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    /// Snapshot of the current process environment
    pub fn from_process_env() -> Self {
        Self::new(std::env::vars().collect())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.env.contains_key(name)
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Substitute every environment reference in a single pass
    pub fn resolve(&self, text: &str) -> Result<String, EnvError> {
        if let Some(unset) = extract_env_vars_in_order(text)
            .into_iter()
            .find(|name| !self.is_set(name))
        {
            return Err(EnvError::UnsetVariable(unset));
        }

        let resolved = ENV_VAR_RE.replace_all(text, |caps: &Captures<'_>| {
            self.env.get(&caps[1]).cloned().unwrap_or_default()
        });
        Ok(resolved.into_owned())
    }

    /// Which referenced variables are set
    pub fn check(&self, text: &str) -> BTreeMap<String, bool> {
        extract_env_vars(text)
            .into_iter()
            .map(|name| {
                let set = self.is_set(&name);
                (name, set)
            })
            .collect()
    }

    /// Referenced variables that are not set, sorted
    pub fn missing(&self, text: &str) -> Vec<String> {
        self.check(text)
            .into_iter()
            .filter_map(|(name, set)| (!set).then_some(name))
            .collect()
    }
}

/// Distinct environment variable names referenced in `text`, sorted
pub fn extract_env_vars(text: &str) -> Vec<String> {
    ENV_VAR_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn extract_env_vars_in_order(text: &str) -> Vec<String> {
    ENV_VAR_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> EnvVarResolver {
        EnvVarResolver::new(HashMap::from([
            ("HOME".to_string(), "/home/biff".to_string()),
            ("JAVA_HOME".to_string(), "/opt/java".to_string()),
        ]))
    }

    #[test]
    fn test_extract_ignores_lowercase_names() {
        let names = extract_env_vars("$(HOME) $(lower) $(JAVA_HOME) $(HOME) $(9BAD)");
        assert_eq!(names, vec!["HOME".to_string(), "JAVA_HOME".to_string()]);
    }

    #[test]
    fn test_resolve_known_vars() {
        let text = resolver().resolve("$(JAVA_HOME)/bin under $(HOME)").unwrap();
        assert_eq!(text, "/opt/java/bin under /home/biff");
    }

    #[test]
    fn test_resolve_unset_var() {
        let err = resolver().resolve("$(HOME)/$(BIFF_DATA)").unwrap_err();
        assert_eq!(err, EnvError::UnsetVariable("BIFF_DATA".to_string()));
    }

    #[test]
    fn test_missing_and_check() {
        let r = resolver();
        let text = "$(HOME) $(BIFF_DATA) $(APP_ROOT)";
        assert_eq!(r.missing(text), vec!["APP_ROOT".to_string(), "BIFF_DATA".to_string()]);

        let status = r.check(text);
        assert_eq!(status.get("HOME"), Some(&true));
        assert_eq!(status.get("APP_ROOT"), Some(&false));
    }
}
