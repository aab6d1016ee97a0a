use std::collections::BTreeMap;

use canopy_core_types::RouteKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kind::Kind;

/// Serialized property slot on a virtual node
///
/// Only the raw value is consumed by the reconciler; it is copied onto the
/// live object verbatim. The type hint is carried for tooling that performs
/// value coercion outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Declared value type, unused in-core
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    /// Raw value written onto the live object without conversion
    pub value: Value,
}

impl PropertyValue {
    /// Wrap a raw value with no type hint
    pub fn raw(value: Value) -> Self {
        Self {
            type_hint: None,
            value,
        }
    }
}

/// Declarative description of one node of the target tree
///
/// A VirtualNode is immutable input: the caller supplies a fresh tree each
/// reconciliation pass and the reconciler mutates the live tree to match.
/// `(kind, name)` is the identity used to match virtual children against
/// live children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualNode {
    /// Type tag; the wildcard matches any live kind
    pub kind: Kind,

    /// Identity component, compared exactly during matching
    pub name: String,

    /// Property slots applied verbatim to the matched or created object
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,

    /// Child descriptions; order drives the matching heuristic only
    #[serde(default)]
    pub children: Vec<VirtualNode>,

    /// When present, the produced/matched live object is registered in the
    /// route map under this key on every pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteKey>,
}

impl VirtualNode {
    /// Create a childless, property-less node
    pub fn new(kind: Kind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            properties: BTreeMap::new(),
            children: Vec::new(),
            route: None,
        }
    }

    /// Create a wildcard-kind node (reifies as a generic container)
    pub fn container(name: impl Into<String>) -> Self {
        Self::new(Kind::Any, name)
    }

    /// Append a child description
    pub fn with_child(mut self, child: VirtualNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set a raw property value
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), PropertyValue::raw(value));
        self
    }

    /// Declare the stable route key for this node
    pub fn with_route(mut self, route: RouteKey) -> Self {
        self.route = Some(route);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_chaining() {
        let node = VirtualNode::new(Kind::named("Part"), "Brick")
            .with_property("Anchored", json!(true))
            .with_child(VirtualNode::container("Attachments"))
            .with_route(RouteKey::new("src/brick"));

        assert_eq!(node.name, "Brick");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.properties["Anchored"].value, json!(true));
        assert_eq!(node.route, Some(RouteKey::new("src/brick")));
    }

    #[test]
    fn test_deserialize_minimal_node() {
        let node: VirtualNode =
            serde_json::from_str(r#"{"kind": "Part", "name": "Brick"}"#).unwrap();
        assert_eq!(node.kind, Kind::named("Part"));
        assert!(node.children.is_empty());
        assert!(node.properties.is_empty());
        assert!(node.route.is_none());
    }

    #[test]
    fn test_deserialize_with_typed_property() {
        let node: VirtualNode = serde_json::from_str(
            r#"{
                "kind": "*",
                "name": "Config",
                "properties": {
                    "Greeting": {"type": "String", "value": "hello"}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(node.kind, Kind::Any);
        let prop = &node.properties["Greeting"];
        assert_eq!(prop.type_hint.as_deref(), Some("String"));
        assert_eq!(prop.value, json!("hello"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let node = VirtualNode::new(Kind::named("Model"), "Rig")
            .with_child(VirtualNode::new(Kind::named("Part"), "Torso"));
        let json = serde_json::to_string(&node).unwrap();
        let back: VirtualNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
