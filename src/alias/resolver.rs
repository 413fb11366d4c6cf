//! Alias Resolution
//!
//! Expands `$(NAME)` references against a flat alias table.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Default number of expansion passes before giving up
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(([^)]+)\)").expect("reference pattern is valid"));

/// Failure to fully expand a text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unresolved aliases: {}", .0.join(", "))]
    UnresolvedReference(Vec<String>),

    #[error("Possible circular reference in aliases: {}", .0.join(", "))]
    CircularReference(Vec<String>),
}

/// Distinct referenced names in order of first appearance
pub fn referenced_names(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    REFERENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Expand every `$(NAME)` in `text` using `table`.
///
/// Each pass collects the distinct names still referenced and replaces all
/// occurrences of each defined one. Resolution stops once a pass leaves the
/// text unchanged or no references remain.
pub fn resolve(
    text: &str,
    table: &HashMap<String, String>,
    max_iterations: usize,
) -> Result<String, ResolveError> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut current = text.to_string();

    for pass in 0..max_iterations {
        let names = referenced_names(&current);
        if names.is_empty() {
            return Ok(current);
        }

        let before = current.clone();
        for name in &names {
            if let Some(replacement) = table.get(name) {
                current = current.replace(&format!("$({name})"), replacement);
            }
        }
        log::debug!("alias pass {}: {} name(s) referenced", pass + 1, names.len());

        if current == before {
            return Err(stalled(&current, table));
        }
    }

    let remaining = sorted(referenced_names(&current));
    if remaining.is_empty() {
        Ok(current)
    } else {
        Err(ResolveError::CircularReference(remaining))
    }
}

/// Classify a pass that changed nothing while references remain.
///
/// Undefined names win; when every name is defined the entries reproduce
/// themselves (e.g. `A -> $(A)`), which is a cycle.
fn stalled(text: &str, table: &HashMap<String, String>) -> ResolveError {
    let remaining = referenced_names(text);
    let undefined: Vec<String> = remaining
        .iter()
        .filter(|name| !table.contains_key(*name))
        .cloned()
        .collect();

    if undefined.is_empty() {
        ResolveError::CircularReference(sorted(remaining))
    } else {
        ResolveError::UnresolvedReference(sorted(undefined))
    }
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

/// Alias table with resolution helpers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasResolver {
    aliases: HashMap<String, String>,
}

impl AliasResolver {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Add or update an alias
    pub fn add_alias(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.aliases.insert(name.into(), value.into());
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Resolve with the default pass limit
    pub fn resolve(&self, text: &str) -> Result<String, ResolveError> {
        resolve(text, &self.aliases, DEFAULT_MAX_ITERATIONS)
    }

    pub fn resolve_with_limit(
        &self,
        text: &str,
        max_iterations: usize,
    ) -> Result<String, ResolveError> {
        resolve(text, &self.aliases, max_iterations)
    }

    /// Names referenced in `text` that have no definition, sorted
    pub fn unresolved_aliases(&self, text: &str) -> Vec<String> {
        sorted(
            referenced_names(text)
                .into_iter()
                .filter(|name| !self.aliases.contains_key(name))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for AliasResolver {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_resolver() -> AliasResolver {
        AliasResolver::new(table(&[
            ("COLOR", "blue"),
            ("SIZE", "10"),
            ("NAMESPACE", "TestNamespace"),
        ]))
    }

    #[test]
    fn test_simple_resolve() {
        let result = sample_resolver().resolve("The color is $(COLOR)").unwrap();
        assert_eq!(result, "The color is blue");
    }

    #[test]
    fn test_multiple_resolve() {
        let result = sample_resolver()
            .resolve("Color: $(COLOR), Size: $(SIZE)")
            .unwrap();
        assert_eq!(result, "Color: blue, Size: 10");
    }

    #[test]
    fn test_repeated_name_replaced_everywhere() {
        let result = sample_resolver()
            .resolve("$(COLOR)/$(COLOR)/$(COLOR)")
            .unwrap();
        assert_eq!(result, "blue/blue/blue");
    }

    #[test]
    fn test_nested_resolve() {
        let resolver = AliasResolver::new(table(&[("A", "$(B)"), ("B", "$(C)"), ("C", "final")]));
        assert_eq!(resolver.resolve("Value: $(A)").unwrap(), "Value: final");
    }

    #[test]
    fn test_text_without_references_is_unchanged() {
        let resolver = sample_resolver();
        for text in ["", "plain", "$ (COLOR)", "$(", "cost: $5"] {
            assert_eq!(resolver.resolve(text).unwrap(), text);
        }
    }

    #[test]
    fn test_unresolved_alias_error() {
        let err = sample_resolver().resolve("Unknown: $(UNKNOWN)").unwrap_err();
        assert_eq!(err, ResolveError::UnresolvedReference(vec!["UNKNOWN".into()]));
        assert!(err.to_string().starts_with("Unresolved aliases"));
    }

    #[test]
    fn test_unresolved_after_partial_progress() {
        let err = sample_resolver()
            .resolve("$(COLOR) $(MISSING) $(SIZE)")
            .unwrap_err();
        assert_eq!(err, ResolveError::UnresolvedReference(vec!["MISSING".into()]));
    }

    #[test]
    fn test_circular_reference_error() {
        let resolver = AliasResolver::new(table(&[("A", "$(B)"), ("B", "$(A)")]));
        let err = resolver.resolve("Value: $(A)").unwrap_err();
        assert!(matches!(err, ResolveError::CircularReference(_)));
        assert!(err.to_string().contains("circular reference"));
    }

    #[test]
    fn test_self_reference_is_circular() {
        let resolver = AliasResolver::new(table(&[("A", "$(A)")]));
        assert_eq!(
            resolver.resolve("$(A)").unwrap_err(),
            ResolveError::CircularReference(vec!["A".into()])
        );
    }

    #[test]
    fn test_growing_self_reference_hits_limit() {
        let resolver = AliasResolver::new(table(&[("A", "x$(A)")]));
        let err = resolver.resolve_with_limit("$(A)", 3).unwrap_err();
        assert_eq!(err, ResolveError::CircularReference(vec!["A".into()]));
    }

    #[test]
    fn test_chain_as_deep_as_limit_resolves() {
        let mut resolver = AliasResolver::default();
        for i in 0..4 {
            resolver.add_alias(format!("L{i}"), format!("$(L{})", i + 1));
        }
        resolver.add_alias("L4", "leaf");
        assert_eq!(resolver.resolve_with_limit("$(L0)", 5).unwrap(), "leaf");
        assert!(matches!(
            resolver.resolve_with_limit("$(L0)", 4),
            Err(ResolveError::CircularReference(_))
        ));
    }

    #[test]
    fn test_add_alias() {
        let mut resolver = sample_resolver();
        resolver.add_alias("NEW", "value");
        assert_eq!(resolver.resolve("New: $(NEW)").unwrap(), "New: value");
    }

    #[test]
    fn test_get_unresolved_aliases() {
        let unresolved = sample_resolver()
            .unresolved_aliases("Known: $(COLOR), Unknown: $(UNKNOWN), Another: $(MISSING)");
        assert_eq!(unresolved, vec!["MISSING".to_string(), "UNKNOWN".to_string()]);
    }

    #[test]
    fn test_referenced_names_are_distinct() {
        assert_eq!(
            referenced_names("$(B) $(A) $(B)"),
            vec!["B".to_string(), "A".to_string()]
        );
    }
}
