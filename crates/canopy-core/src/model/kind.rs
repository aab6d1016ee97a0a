use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Concrete kind used when a wildcard node must be materialized, and when
/// scaffolding containers are created along an unresolved path.
pub const CONTAINER_KIND: &str = "Folder";

/// Wildcard spelling in serialized virtual trees
const WILDCARD: &str = "*";

/// Type tag of a node or live object
///
/// `Any` is a compatibility wildcard, not a concrete kind: it matches every
/// kind in either operand position. Kind comparisons in the reconciler go
/// through [`Kind::is_compatible`], never through equality, so that a
/// wildcard never registers as a type change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Matches any live object kind; reifies as [`CONTAINER_KIND`]
    Any,
    /// A concrete kind, compared by exact name
    Named(String),
}

impl Kind {
    /// Create a concrete kind
    pub fn named(name: impl Into<String>) -> Self {
        Kind::Named(name.into())
    }

    /// Compatibility test used for matching and type-change detection
    ///
    /// Symmetric: the wildcard matches in either operand position.
    pub fn is_compatible(&self, other: &Kind) -> bool {
        match (self, other) {
            (Kind::Any, _) | (_, Kind::Any) => true,
            (Kind::Named(a), Kind::Named(b)) => a == b,
        }
    }

    /// Concrete kind to construct when this node must be materialized
    pub fn concrete(&self) -> &str {
        match self {
            Kind::Any => CONTAINER_KIND,
            Kind::Named(name) => name,
        }
    }

    /// Serialized spelling of this kind
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Any => WILDCARD,
            Kind::Named(name) => name,
        }
    }
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        if name == WILDCARD {
            Kind::Any
        } else {
            Kind::Named(name.to_string())
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Kind::from(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_kinds_compare_by_name() {
        let part = Kind::named("Part");
        assert!(part.is_compatible(&Kind::named("Part")));
        assert!(!part.is_compatible(&Kind::named("Model")));
    }

    #[test]
    fn test_wildcard_matches_in_either_position() {
        let part = Kind::named("Part");
        assert!(Kind::Any.is_compatible(&part));
        assert!(part.is_compatible(&Kind::Any));
        assert!(Kind::Any.is_compatible(&Kind::Any));
    }

    #[test]
    fn test_wildcard_reifies_as_container() {
        assert_eq!(Kind::Any.concrete(), CONTAINER_KIND);
        assert_eq!(Kind::named("Part").concrete(), "Part");
    }

    #[test]
    fn test_serde_spelling() {
        let json = serde_json::to_string(&Kind::Any).unwrap();
        assert_eq!(json, "\"*\"");

        let kind: Kind = serde_json::from_str("\"Part\"").unwrap();
        assert_eq!(kind, Kind::named("Part"));

        let wildcard: Kind = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(wildcard, Kind::Any);
    }
}
