//! Configuration Kinds
//!
//! The three document dialects, one per framework tier.

use std::fmt;

use serde::Serialize;

use crate::xml::Element;

/// Which tier a configuration document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    /// Data-collection agent (`<Minion>`)
    Agent,
    /// Routing/aggregation hub (`<Oscar>`)
    Hub,
    /// Dashboard front-end (`<Marvin>`)
    Dashboard,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 3] = [ConfigKind::Agent, ConfigKind::Hub, ConfigKind::Dashboard];

    /// Root tag a document of this kind must carry
    pub fn root_tag(self) -> &'static str {
        match self {
            ConfigKind::Agent => "Minion",
            ConfigKind::Hub => "Oscar",
            ConfigKind::Dashboard => "Marvin",
        }
    }

    pub fn from_root_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.root_tag() == tag)
    }

    /// Detect the kind from a parsed document's root tag
    pub fn detect(root: &Element) -> Option<Self> {
        Self::from_root_tag(&root.name)
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_tags_round_trip() {
        for kind in ConfigKind::ALL {
            assert_eq!(ConfigKind::from_root_tag(kind.root_tag()), Some(kind));
        }
    }

    #[test]
    fn test_detect_unknown_root() {
        assert_eq!(ConfigKind::detect(&Element::new("Gadget")), None);
        assert_eq!(ConfigKind::detect(&Element::new("minion")), None);
    }
}
