//! Canopy Core - virtual-to-live tree reconciliation kernel
//!
//! This crate synchronizes a declarative description of a tree (the virtual
//! tree) onto a live, mutable tree of addressable objects owned by an
//! external runtime, applying only the creations, deletions, reparentings,
//! and property writes needed to make the live tree match:
//!
//! - VirtualNode model with wildcard-aware kinds and verbatim property values
//! - Greedy, order-dependent child matching shared across two diff passes
//! - Best-effort handling of live-object operations that may fail
//! - Route-indexed lookup for re-finding objects across passes
//! - Runtime contract with an in-memory reference implementation
//!
//! Reconciliation is single-threaded and synchronous; callers serialize
//! passes against overlapping subtrees.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reconciler;
pub mod routemap;
pub mod runtime;

// Re-exported for the logging macros, which refer to `$crate::schema`
pub use canopy_core_types::schema;

// Re-export commonly used types
pub use canopy_core_types::{LiveId, RouteKey};
pub use errors::{ReconcileError, Result};
pub use model::{Kind, PropertyValue, VirtualNode, CONTAINER_KIND};
pub use reconciler::Reconciler;
pub use routemap::RouteMap;
pub use runtime::{MemoryRuntime, Runtime};
