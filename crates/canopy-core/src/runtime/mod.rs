//! Host runtime contract
//!
//! The live tree is owned by an external runtime; the reconciler only ever
//! touches it through this trait. Every mutating or resolving operation is
//! fallible, and the reconciler decides per call site whether a failure is
//! absorbed (reparent, destroy, namespace resolution) or propagated.

pub mod memory;

use canopy_core_types::LiveId;
use serde_json::Value;

use crate::errors::Result;
use crate::model::Kind;

pub use memory::MemoryRuntime;

/// Operations the host runtime must provide over its live tree
///
/// Object-safe: the reconciler takes `&mut dyn Runtime` so hosts can be
/// swapped without recompiling the kernel.
pub trait Runtime {
    /// Construct a new, unparented live object of the given concrete kind
    fn create(&mut self, kind: &str) -> Result<LiveId>;

    /// Destroy a live object and release its subtree
    ///
    /// Final and idempotent: destroying an unknown or already-destroyed
    /// handle succeeds.
    fn destroy(&mut self, id: LiveId) -> Result<()>;

    /// Kind of a live object (always concrete, never the wildcard)
    fn kind_of(&self, id: LiveId) -> Result<Kind>;

    /// Current name of a live object
    fn name_of(&self, id: LiveId) -> Result<String>;

    /// Rename a live object
    fn set_name(&mut self, id: LiveId, name: &str) -> Result<()>;

    /// Current parent, or None for an unparented object
    fn parent_of(&self, id: LiveId) -> Result<Option<LiveId>>;

    /// Assign a parent; may fail for protected or concurrently destroyed
    /// objects, leaving the prior parent in place
    fn set_parent(&mut self, id: LiveId, parent: Option<LiveId>) -> Result<()>;

    /// Current children, in tree order
    fn children_of(&self, id: LiveId) -> Result<Vec<LiveId>>;

    /// Write a property slot verbatim, no value coercion
    fn set_property(&mut self, id: LiveId, name: &str, value: &Value) -> Result<()>;

    /// Resolve a name against the root's well-known top-level namespaces
    ///
    /// Fails cleanly with `UnknownNamespace` when the name is not
    /// recognized; never fatal.
    fn resolve_namespace(&mut self, root: LiveId, name: &str) -> Result<LiveId>;

    /// First child with the given name, scanning in tree order
    fn find_child(&self, parent: LiveId, name: &str) -> Result<Option<LiveId>> {
        for child in self.children_of(parent)? {
            if self.name_of(child)? == name {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }
}
