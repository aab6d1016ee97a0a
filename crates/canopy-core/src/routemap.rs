//! Bidirectional route index
//!
//! Maps stable route keys to live objects and back. The inverse direction
//! exists so that destroying an object can drop its route entry by identity
//! alone, keeping the invariant that no route entry survives its object.

use std::collections::HashMap;

use canopy_core_types::{LiveId, RouteKey};

/// Index of route-key to live-object pairings
///
/// An object reachable through this map is one the reconciler is actively
/// responsible for. Entries are upserted idempotently on every pass that
/// revisits a routed node and removed in the same logical step as the
/// object's destruction.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    forward: HashMap<RouteKey, LiveId>,
    reverse: HashMap<LiveId, RouteKey>,
}

impl RouteMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a pairing; idempotent
    ///
    /// Re-pointing a route at a new object, or re-routing an object under a
    /// new key, drops the stale half of the old pairing so the two
    /// directions never disagree.
    pub fn insert(&mut self, route: RouteKey, id: LiveId) {
        if let Some(old_id) = self.forward.get(&route).copied() {
            if old_id != id {
                self.reverse.remove(&old_id);
            }
        }
        if let Some(old_route) = self.reverse.get(&id).cloned() {
            if old_route != route {
                self.forward.remove(&old_route);
            }
        }
        self.forward.insert(route.clone(), id);
        self.reverse.insert(id, route);
    }

    /// Look up the live object registered under a route
    pub fn get(&self, route: &RouteKey) -> Option<LiveId> {
        self.forward.get(route).copied()
    }

    /// Look up the route an object is registered under
    pub fn route_of(&self, id: LiveId) -> Option<&RouteKey> {
        self.reverse.get(&id)
    }

    /// Remove any pairing referencing the object; no-op if none
    pub fn remove_by_object(&mut self, id: LiveId) {
        if let Some(route) = self.reverse.remove(&id) {
            self.forward.remove(&route);
        }
    }

    /// Drop all entries without touching live objects
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    /// Number of pairings currently held
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the index holds no pairings
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut map = RouteMap::new();
        let id = LiveId::mint();
        map.insert(RouteKey::new("src/a"), id);

        assert_eq!(map.get(&RouteKey::new("src/a")), Some(id));
        assert_eq!(map.route_of(id), Some(&RouteKey::new("src/a")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut map = RouteMap::new();
        let id = LiveId::mint();
        map.insert(RouteKey::new("src/a"), id);
        map.insert(RouteKey::new("src/a"), id);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&RouteKey::new("src/a")), Some(id));
    }

    #[test]
    fn test_repointing_route_drops_stale_reverse_entry() {
        let mut map = RouteMap::new();
        let old = LiveId::mint();
        let new = LiveId::mint();
        map.insert(RouteKey::new("src/a"), old);
        map.insert(RouteKey::new("src/a"), new);

        assert_eq!(map.get(&RouteKey::new("src/a")), Some(new));
        assert_eq!(map.route_of(old), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_rerouting_object_drops_stale_forward_entry() {
        let mut map = RouteMap::new();
        let id = LiveId::mint();
        map.insert(RouteKey::new("src/a"), id);
        map.insert(RouteKey::new("src/b"), id);

        assert_eq!(map.get(&RouteKey::new("src/a")), None);
        assert_eq!(map.get(&RouteKey::new("src/b")), Some(id));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_by_object() {
        let mut map = RouteMap::new();
        let id = LiveId::mint();
        map.insert(RouteKey::new("src/a"), id);

        map.remove_by_object(id);
        assert!(map.is_empty());
        assert_eq!(map.get(&RouteKey::new("src/a")), None);

        // No-op for objects never registered
        map.remove_by_object(LiveId::mint());
        assert!(map.is_empty());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut map = RouteMap::new();
        map.insert(RouteKey::new("src/a"), LiveId::mint());
        map.insert(RouteKey::new("src/b"), LiveId::mint());

        map.clear();
        assert!(map.is_empty());
    }
}
