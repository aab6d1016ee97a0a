//! In-memory reference runtime
//!
//! HashMap-backed implementation of the [`Runtime`] contract. Serves as the
//! reference host for tests and as the executable description of the
//! behavior the reconciler assumes: idempotent destroy, refusal semantics
//! for protected objects, and lazily materialized top-level namespaces.

use std::collections::{BTreeMap, HashMap, HashSet};

use canopy_core_types::LiveId;
use serde_json::Value;

use super::Runtime;
use crate::errors::{ReconcileError, Result};
use crate::model::Kind;

/// Kind of the implicit root object
const ROOT_KIND: &str = "Root";

#[derive(Debug, Clone)]
struct LiveObject {
    kind: String,
    name: String,
    parent: Option<LiveId>,
    children: Vec<LiveId>,
    properties: BTreeMap<String, Value>,
}

impl LiveObject {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            // Fresh objects answer to their kind until renamed
            name: kind.to_string(),
            parent: None,
            children: Vec::new(),
            properties: BTreeMap::new(),
        }
    }
}

/// In-memory live tree
///
/// Not thread-safe (no Arc/RwLock) - reconciliation is single-threaded and
/// the runtime contract inherits that.
#[derive(Debug, Clone)]
pub struct MemoryRuntime {
    /// Map of handle to live object
    objects: HashMap<LiveId, LiveObject>,
    /// The fixed root every path walk starts from
    root: LiveId,
    /// Declared top-level namespaces: name -> kind, materialized on first
    /// resolution
    namespaces: HashMap<String, String>,
    /// Objects that refuse reparenting and destruction
    protected: HashSet<LiveId>,
}

impl MemoryRuntime {
    /// Create a runtime holding only the root object
    pub fn new() -> Self {
        let root = LiveId::mint();
        let mut objects = HashMap::new();
        objects.insert(root, LiveObject::new(ROOT_KIND));
        Self {
            objects,
            root,
            namespaces: HashMap::new(),
            protected: HashSet::new(),
        }
    }

    /// Handle of the root object
    pub fn root(&self) -> LiveId {
        self.root
    }

    /// Declare a well-known top-level namespace
    ///
    /// The namespace object is created under the root on first resolution,
    /// not at declaration time, and is protected once materialized.
    pub fn declare_namespace(&mut self, name: impl Into<String>, kind: impl Into<String>) {
        self.namespaces.insert(name.into(), kind.into());
    }

    /// Mark an object as refusing reparenting and destruction
    pub fn protect(&mut self, id: LiveId) {
        self.protected.insert(id);
    }

    /// Whether a handle still resolves to a live object
    pub fn exists(&self, id: LiveId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of live objects, root included
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Read a property slot back, for assertions
    pub fn property(&self, id: LiveId, name: &str) -> Option<&Value> {
        self.objects.get(&id).and_then(|obj| obj.properties.get(name))
    }

    fn get(&self, id: LiveId) -> Result<&LiveObject> {
        self.objects
            .get(&id)
            .ok_or(ReconcileError::LiveNotFound { live_id: id })
    }

    fn get_mut(&mut self, id: LiveId) -> Result<&mut LiveObject> {
        self.objects
            .get_mut(&id)
            .ok_or(ReconcileError::LiveNotFound { live_id: id })
    }

    /// Walk ancestors of `start` looking for `needle`
    fn is_ancestor(&self, needle: LiveId, start: LiveId) -> bool {
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            if current == needle {
                return true;
            }
            cursor = self.objects.get(&current).and_then(|obj| obj.parent);
        }
        false
    }
}

impl Default for MemoryRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for MemoryRuntime {
    fn create(&mut self, kind: &str) -> Result<LiveId> {
        if kind.is_empty() {
            return Err(ReconcileError::CreateRejected {
                kind: kind.to_string(),
                reason: "kind must not be empty".to_string(),
            });
        }
        let id = LiveId::mint();
        self.objects.insert(id, LiveObject::new(kind));
        Ok(id)
    }

    fn destroy(&mut self, id: LiveId) -> Result<()> {
        // Idempotent: an unknown handle is an already-destroyed object
        if !self.objects.contains_key(&id) {
            return Ok(());
        }
        if self.protected.contains(&id) {
            return Err(ReconcileError::Protected { live_id: id });
        }

        // Detach from the parent, then release the whole subtree
        if let Some(parent) = self.objects.get(&id).and_then(|obj| obj.parent) {
            if let Some(parent_obj) = self.objects.get_mut(&parent) {
                parent_obj.children.retain(|child| *child != id);
            }
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(obj) = self.objects.remove(&current) {
                stack.extend(obj.children);
            }
            self.protected.remove(&current);
        }
        Ok(())
    }

    fn kind_of(&self, id: LiveId) -> Result<Kind> {
        Ok(Kind::named(self.get(id)?.kind.clone()))
    }

    fn name_of(&self, id: LiveId) -> Result<String> {
        Ok(self.get(id)?.name.clone())
    }

    fn set_name(&mut self, id: LiveId, name: &str) -> Result<()> {
        self.get_mut(id)?.name = name.to_string();
        Ok(())
    }

    fn parent_of(&self, id: LiveId) -> Result<Option<LiveId>> {
        Ok(self.get(id)?.parent)
    }

    fn set_parent(&mut self, id: LiveId, parent: Option<LiveId>) -> Result<()> {
        if self.protected.contains(&id) {
            return Err(ReconcileError::Protected { live_id: id });
        }
        self.get(id)?;
        if let Some(new_parent) = parent {
            self.get(new_parent)?;
            if self.is_ancestor(id, new_parent) {
                return Err(ReconcileError::ReparentRefused {
                    live_id: id,
                    reason: "assignment would create a cycle".to_string(),
                });
            }
        }

        let old_parent = self.get(id)?.parent;
        if old_parent == parent {
            return Ok(());
        }
        if let Some(old) = old_parent {
            if let Some(old_obj) = self.objects.get_mut(&old) {
                old_obj.children.retain(|child| *child != id);
            }
        }
        if let Some(new_parent) = parent {
            self.get_mut(new_parent)?.children.push(id);
        }
        self.get_mut(id)?.parent = parent;
        Ok(())
    }

    fn children_of(&self, id: LiveId) -> Result<Vec<LiveId>> {
        Ok(self.get(id)?.children.clone())
    }

    fn set_property(&mut self, id: LiveId, name: &str, value: &Value) -> Result<()> {
        self.get_mut(id)?
            .properties
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    fn resolve_namespace(&mut self, root: LiveId, name: &str) -> Result<LiveId> {
        if root != self.root {
            return Err(ReconcileError::UnknownNamespace {
                name: name.to_string(),
            });
        }
        // Already materialized under the root?
        if let Some(existing) = self.find_child(root, name)? {
            return Ok(existing);
        }
        let kind = self
            .namespaces
            .get(name)
            .cloned()
            .ok_or_else(|| ReconcileError::UnknownNamespace {
                name: name.to_string(),
            })?;

        let id = LiveId::mint();
        let mut obj = LiveObject::new(&kind);
        obj.name = name.to_string();
        obj.parent = Some(root);
        self.objects.insert(id, obj);
        self.get_mut(root)?.children.push(id);
        // Namespaces are runtime-owned fixtures
        self.protected.insert(id);
        Ok(id)
    }
}
