//! Behavioural properties of `$(NAME)` expansion
use std::collections::HashMap;

use biff_config::alias::{DEFAULT_MAX_ITERATIONS, ResolveError, resolve};
use biff_config::AliasResolver;

fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_identity_without_references() {
    let tables = [
        table(&[]),
        table(&[("COLOR", "blue"), ("SIZE", "10")]),
        table(&[("A", "$(A)")]),
    ];
    let texts = [
        "",
        "plain text",
        "<Minion><Name>Demo</Name></Minion>",
        "$HOME and ${HOME} are not references",
        "unterminated $(COLOR",
    ];

    for t in &tables {
        for text in texts {
            assert_eq!(resolve(text, t, DEFAULT_MAX_ITERATIONS).unwrap(), text);
        }
    }
}

#[test]
fn test_acyclic_chains_expand_fully() {
    for depth in 1..=DEFAULT_MAX_ITERATIONS {
        let mut t = HashMap::new();
        for i in 0..depth - 1 {
            t.insert(format!("N{i}"), format!("[$(N{})]", i + 1));
        }
        t.insert(format!("N{}", depth - 1), "leaf".to_string());

        let expanded = resolve("$(N0)", &t, DEFAULT_MAX_ITERATIONS).unwrap();
        assert!(expanded.contains("leaf"));
        assert!(!expanded.contains("$("), "depth {depth} left {expanded}");
    }
}

#[test]
fn test_self_reference_is_circular() {
    for text in ["$(A)", "prefix $(A) suffix", "$(A)$(A)"] {
        let err = resolve(text, &table(&[("A", "$(A)")]), DEFAULT_MAX_ITERATIONS).unwrap_err();
        assert_eq!(err, ResolveError::CircularReference(vec!["A".to_string()]));
    }
}

#[test]
fn test_undefined_name_is_unresolved() {
    let t = table(&[("COLOR", "blue")]);
    for text in ["$(NOPE)", "$(COLOR) and $(NOPE)", "$(NOPE) $(NOPE)"] {
        let err = resolve(text, &t, DEFAULT_MAX_ITERATIONS).unwrap_err();
        assert_eq!(err, ResolveError::UnresolvedReference(vec!["NOPE".to_string()]));
    }
}

#[test]
fn test_color_example() {
    let resolver = AliasResolver::new(table(&[("COLOR", "blue"), ("SIZE", "10")]));
    assert_eq!(
        resolver.resolve("The color is $(COLOR)").unwrap(),
        "The color is blue"
    );
}

#[test]
fn test_chain_example() {
    let resolver = AliasResolver::new(table(&[("A", "$(B)"), ("B", "$(C)"), ("C", "final")]));
    assert_eq!(resolver.resolve("Value: $(A)").unwrap(), "Value: final");
}

#[test]
fn test_oscillating_pair_reported_as_circular() {
    let err = resolve("$(A)", &table(&[("A", "$(B)"), ("B", "$(A)")]), 7).unwrap_err();
    assert!(matches!(err, ResolveError::CircularReference(names) if names.len() == 1));
}

#[test]
fn test_error_messages_list_names() {
    let err = resolve("$(Y) $(X)", &table(&[]), DEFAULT_MAX_ITERATIONS).unwrap_err();
    assert_eq!(err.to_string(), "Unresolved aliases: X, Y");
}
