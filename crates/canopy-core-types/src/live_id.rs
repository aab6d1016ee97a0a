//! Opaque handles to live objects
//!
//! A `LiveId` identifies one object in the host runtime's live tree. Handles
//! are minted by runtimes, never by callers, and stay valid until the object
//! is destroyed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, copyable handle to a live object
///
/// The identity behind the handle belongs to the runtime; the reconciliation
/// kernel only compares, hashes, and stores these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiveId(Uuid);

impl LiveId {
    /// Mint a fresh handle using UUIDv7
    ///
    /// Intended for runtime implementations; callers obtain handles from
    /// runtime operations, not by minting them.
    pub fn mint() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for LiveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
