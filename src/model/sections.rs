//! Section Views
//!
//! Typed views over the parts of a configuration tree the rules care about.
//! Empty attributes and empty element text count as absent.

use std::collections::HashMap;

use crate::xml::Element;

/// `<Collector>` definition from an agent config
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectorDef {
    pub id: Option<String>,
    pub frequency: Option<String>,
    pub executable: Option<String>,
    pub plugin: Option<String>,
    pub entry_point: Option<String>,
    pub params: Vec<String>,
    pub operator: Option<String>,
    pub value: Option<String>,
    pub inputs: Vec<String>,
}

impl CollectorDef {
    pub fn from_element(element: &Element) -> Self {
        Self {
            id: attr(element, "ID"),
            frequency: attr(element, "Frequency"),
            executable: child_text(element, "Executable"),
            plugin: child_text(element, "Plugin"),
            entry_point: child_text(element, "EntryPoint"),
            params: child_texts(element, "Param"),
            operator: child_text(element, "Operator"),
            value: child_text(element, "Value"),
            inputs: child_texts(element, "Input"),
        }
    }

    /// Whether the collector has something to produce data from
    pub fn has_data_source(&self) -> bool {
        self.executable.is_some()
            || self.plugin.is_some()
            || self.operator.is_some()
            || self.value.is_some()
    }
}

/// `<Actor>` definition from an agent config
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActorDef {
    pub id: Option<String>,
    pub executable: Option<String>,
    pub params: Vec<String>,
}

impl ActorDef {
    pub fn from_element(element: &Element) -> Self {
        Self {
            id: attr(element, "ID"),
            executable: child_text(element, "Executable"),
            params: child_texts(element, "Param"),
        }
    }
}

/// `<Modifier>` definition from an agent config
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModifierDef {
    pub id: Option<String>,
    pub precision: Option<String>,
    pub normalize: Option<String>,
    pub is_regex: bool,
}

impl ModifierDef {
    pub fn from_element(element: &Element) -> Self {
        let id = attr(element, "ID");
        let is_regex = id.as_deref().is_some_and(is_regex_pattern);
        Self {
            id,
            precision: child_text(element, "Precision"),
            normalize: child_text(element, "Normalize"),
            is_regex,
        }
    }
}

/// Wildcard IDs such as `cpu.(*)` or `disk.(.*)` target many collectors
pub fn is_regex_pattern(pattern: &str) -> bool {
    pattern.contains('*')
}

/// Target endpoint (`<TargetConnection IP=".." PORT=".."/>`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetDef {
    pub ip: Option<String>,
    pub port: Option<String>,
}

impl TargetDef {
    pub fn from_element(element: &Element) -> Self {
        Self {
            ip: attr(element, "IP"),
            port: attr(element, "PORT"),
        }
    }
}

/// `<Namespace>` definition from an agent config
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamespaceDef {
    pub name: Option<String>,
    pub default_frequency: Option<String>,
    pub target: Option<TargetDef>,
}

impl NamespaceDef {
    pub fn from_element(element: &Element) -> Self {
        Self {
            name: child_text(element, "Name"),
            default_frequency: child_text(element, "DefaultFrequency"),
            target: element.find("TargetConnection").map(TargetDef::from_element),
        }
    }

    /// A target connection only counts when it names an address
    pub fn has_target(&self) -> bool {
        self.target.as_ref().is_some_and(|t| t.ip.is_some())
    }
}

/// Hub connection settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HubConnections {
    pub incoming_port: Option<String>,
    pub autoconnect_key: Option<String>,
    pub targets: Vec<TargetDef>,
}

impl HubConnections {
    pub fn from_root(root: &Element) -> Self {
        Self {
            incoming_port: root
                .find_descendant("IncomingMinionConnection")
                .and_then(|e| attr(e, "PORT")),
            autoconnect_key: root
                .find_descendant("MarvinAutoConnect")
                .and_then(|e| attr(e, "Key")),
            targets: root
                .find_descendants("TargetConnection")
                .into_iter()
                .map(TargetDef::from_element)
                .collect(),
        }
    }
}

/// Upstream hub a dashboard connects to (`<Oscar IP=".." Port=".." Key=".."/>`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpstreamHub {
    pub ip: Option<String>,
    pub port: Option<String>,
    pub key: Option<String>,
}

/// Dashboard `<Network>` section
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardNetwork {
    pub port: Option<String>,
    pub hubs: Vec<UpstreamHub>,
}

impl DashboardNetwork {
    pub fn from_root(root: &Element) -> Self {
        let Some(network) = root.find_descendant("Network") else {
            return Self::default();
        };

        Self {
            port: attr(network, "Port"),
            hubs: network
                .find_all("Oscar")
                .map(|hub| UpstreamHub {
                    ip: attr(hub, "IP"),
                    port: attr(hub, "Port"),
                    key: attr(hub, "Key"),
                })
                .collect(),
        }
    }

    pub fn authenticated_hubs(&self) -> usize {
        self.hubs.iter().filter(|h| h.key.is_some()).count()
    }
}

/// Alias definitions from every `<AliasList>`.
///
/// Each attribute of an `<Alias>` element defines one alias, so
/// `<Alias HOST="localhost" PORT="1100"/>` defines two. Later definitions win.
pub fn aliases(root: &Element) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let lists = std::iter::once(root)
        .filter(|e| e.name == "AliasList")
        .chain(root.find_descendants("AliasList"));

    for list in lists {
        for alias in list.find_all("Alias") {
            for (name, value) in &alias.attributes {
                out.insert(name.clone(), value.clone());
            }
        }
    }
    out
}

pub fn collectors(root: &Element) -> Vec<CollectorDef> {
    root.find_descendants("Collector")
        .into_iter()
        .map(CollectorDef::from_element)
        .collect()
}

pub fn actors(root: &Element) -> Vec<ActorDef> {
    root.find_descendants("Actor")
        .into_iter()
        .map(ActorDef::from_element)
        .collect()
}

pub fn modifiers(root: &Element) -> Vec<ModifierDef> {
    root.find_descendants("Modifier")
        .into_iter()
        .map(ModifierDef::from_element)
        .collect()
}

pub fn namespaces(root: &Element) -> Vec<NamespaceDef> {
    root.find_descendants("Namespace")
        .into_iter()
        .map(NamespaceDef::from_element)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn attr(element: &Element, key: &str) -> Option<String> {
    element.attr(key).and_then(non_empty)
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    element.find_text(name).and_then(non_empty)
}

fn child_texts(element: &Element, name: &str) -> Vec<String> {
    element
        .find_all(name)
        .filter_map(|e| e.text.as_deref().and_then(non_empty))
        .collect()
}
