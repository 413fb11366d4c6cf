//! Validation Rules
//!
//! One function per rule group. Each appends findings and never fails.

use crate::alias::EnvVarResolver;
use crate::model::sections::{self, DashboardNetwork, HubConnections};
use crate::model::ConfigKind;
use crate::xml::Element;

use super::engine::ValidationResult;

/// Root tag must match the declared kind
pub fn check_root(root: &Element, kind: ConfigKind, result: &mut ValidationResult) {
    let expected = kind.root_tag();
    if root.name != expected {
        result.add_error(
            "Root",
            format!("Expected <{expected}> root element, got <{}>", root.name),
            format!("Ensure root element is <{expected}>"),
        );
    }
}

/// Environment references that are neither set nor defined as aliases
pub fn check_environment(root: &Element, env: &EnvVarResolver, result: &mut ValidationResult) {
    let aliases = sections::aliases(root);
    let serialized = root.to_xml_string();
    let missing: Vec<String> = env
        .missing(&serialized)
        .into_iter()
        .filter(|name| !aliases.contains_key(name))
        .collect();

    if missing.is_empty() {
        return;
    }

    let exports: Vec<String> = missing.iter().map(|v| format!("export {v}=VALUE")).collect();
    result.add_warning(
        "Environment",
        format!("Environment variables not set: {}", missing.join(", ")),
        format!("Export these variables: {}", exports.join(", ")),
    );
}

/// Agent (`<Minion>`) rules
pub fn check_agent(root: &Element, env: &EnvVarResolver, result: &mut ValidationResult) {
    let aliases = sections::aliases(root);
    if !aliases.is_empty() {
        result.add_info(
            "Aliases",
            format!("Found {} alias definition(s)", aliases.len()),
        );
    }

    check_environment(root, env, result);
    check_namespaces(root, result);
    check_collectors(root, result);
    check_actors(root, result);

    let regex_modifiers = sections::modifiers(root)
        .iter()
        .filter(|m| m.is_regex)
        .count();
    if regex_modifiers > 0 {
        result.add_info(
            "Modifiers",
            format!("Found {regex_modifiers} regex modifier(s)"),
        );
    }
}

fn check_namespaces(root: &Element, result: &mut ValidationResult) {
    let namespaces = sections::namespaces(root);
    if namespaces.is_empty() {
        result.add_error(
            "Namespace",
            "No namespaces defined",
            "Add at least one <Namespace> section",
        );
    }

    for ns in &namespaces {
        if ns.name.is_none() {
            result.add_error(
                "Namespace",
                "Namespace missing <Name>",
                "Add <Name>YourNamespace</Name> to Namespace",
            );
        }

        if !ns.has_target() {
            result.add_warning(
                "Namespace",
                format!(
                    "Namespace '{}' has no TargetConnection",
                    ns.name.as_deref().unwrap_or("")
                ),
                "Add <TargetConnection IP=\"...\" PORT=\"...\"/>",
            );
        }
    }
}

fn check_collectors(root: &Element, result: &mut ValidationResult) {
    let collectors = sections::collectors(root);
    if collectors.is_empty() {
        return;
    }

    result.add_info(
        "Collectors",
        format!("Found {} collector(s)", collectors.len()),
    );

    // At most one error per collector
    for collector in &collectors {
        match (&collector.id, collector.has_data_source()) {
            (None, false) => result.add_error(
                "Collector",
                "Collector missing ID attribute and data source",
                "Add ID=\"collector.name\" and one of <Executable>, <Plugin>, <Operator>, or <Value>",
            ),
            (None, true) => result.add_error(
                "Collector",
                "Collector missing ID attribute",
                "Add ID=\"collector.name\" to <Collector>",
            ),
            (Some(id), false) => result.add_error(
                "Collector",
                format!("Collector '{id}' has no data source"),
                "Add <Executable>, <Plugin>, <Operator>, or <Value>",
            ),
            (Some(_), true) => {}
        }
    }
}

fn check_actors(root: &Element, result: &mut ValidationResult) {
    let actors = sections::actors(root);
    if actors.is_empty() {
        return;
    }

    result.add_info("Actors", format!("Found {} actor(s)", actors.len()));
    for actor in actors.iter().filter(|a| a.id.is_none()) {
        result.add_error(
            "Actor",
            match &actor.executable {
                Some(exe) => format!("Actor running '{exe}' missing ID attribute"),
                None => "Actor missing ID attribute".to_string(),
            },
            "Add ID=\"actor_name\" to <Actor>",
        );
    }
}

/// Hub (`<Oscar>`) rules
pub fn check_hub(root: &Element, result: &mut ValidationResult) {
    let connections = HubConnections::from_root(root);

    if connections.incoming_port.is_none() {
        result.add_error(
            "Connection",
            "No IncomingMinionConnection defined",
            "Add <IncomingMinionConnection PORT=\"10020\"/>",
        );
    }

    match &connections.autoconnect_key {
        Some(key) => result.add_info(
            "Connection",
            format!("MarvinAutoConnect enabled with key: {key}"),
        ),
        // Push mode needs somewhere to push to
        None if connections.targets.is_empty() => result.add_warning(
            "Connection",
            "No TargetConnection defined (Oscar won't forward data)",
            "Add <TargetConnection IP=\"...\" PORT=\"...\"/> or use MarvinAutoConnect",
        ),
        None => {}
    }
}

/// Dashboard (`<Marvin>`) rules
pub fn check_dashboard(root: &Element, result: &mut ValidationResult) {
    let network = DashboardNetwork::from_root(root);

    if network.port.is_none() {
        result.add_warning(
            "Network",
            "No Network Port defined",
            "Add <Network Port=\"5301\">...</Network>",
        );
    }

    if network.hubs.is_empty() {
        return;
    }

    result.add_info(
        "Network",
        format!("Connected to {} Oscar instance(s)", network.hubs.len()),
    );

    let authenticated = network.authenticated_hubs();
    if authenticated > 0 {
        result.add_info(
            "Network",
            format!("{authenticated} Oscar(s) use authentication"),
        );
    }
}
