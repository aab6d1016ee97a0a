use canopy_core_types::LiveId;
use thiserror::Error;

/// Result type alias using ReconcileError
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// Error taxonomy for reconciliation and runtime operations
///
/// Two classes flow through this type. Runtime-side failures on reparenting,
/// destruction, and namespace resolution are expected outcomes: the
/// reconciler catches them at the point of call and treats them as "no effect
/// occurred". Everything else is a genuine failure that propagates to the
/// caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    // ===== Live tree errors =====
    /// Live object handle does not resolve to an object
    #[error("Live object not found: {live_id}")]
    LiveNotFound { live_id: LiveId },

    /// Runtime refused to construct an object of the requested kind
    #[error("Cannot create object of kind '{kind}': {reason}")]
    CreateRejected { kind: String, reason: String },

    /// Runtime refused a parent assignment
    #[error("Cannot reparent {live_id}: {reason}")]
    ReparentRefused { live_id: LiveId, reason: String },

    /// Object is runtime-protected from reparenting and destruction
    #[error("Live object is protected: {live_id}")]
    Protected { live_id: LiveId },

    /// Runtime rejected a property write
    #[error("Cannot write property '{property}' on {live_id}: {reason}")]
    PropertyRejected {
        live_id: LiveId,
        property: String,
        reason: String,
    },

    // ===== Resolution errors =====
    /// Name is not one of the root's well-known top-level namespaces
    #[error("Unknown namespace: {name}")]
    UnknownNamespace { name: String },

    /// Route-addressed reconcile was given an empty path
    #[error("Route path must contain at least one segment")]
    EmptyPath,

    // ===== Generic errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ReconcileError {
    /// Get the stable error code for this error
    ///
    /// Codes are part of the crate's contract and safe to match on in
    /// external tooling and tests.
    pub fn code(&self) -> &'static str {
        match self {
            ReconcileError::LiveNotFound { .. } => "ERR_LIVE_NOT_FOUND",
            ReconcileError::CreateRejected { .. } => "ERR_CREATE_REJECTED",
            ReconcileError::ReparentRefused { .. } => "ERR_REPARENT_REFUSED",
            ReconcileError::Protected { .. } => "ERR_PROTECTED",
            ReconcileError::PropertyRejected { .. } => "ERR_PROPERTY_REJECTED",
            ReconcileError::UnknownNamespace { .. } => "ERR_UNKNOWN_NAMESPACE",
            ReconcileError::EmptyPath => "ERR_EMPTY_PATH",
            ReconcileError::Serialization { .. } => "ERR_SERIALIZATION",
            ReconcileError::Internal { .. } => "ERR_INTERNAL",
        }
    }
}

/// Conversion from serde_json::Error to ReconcileError
impl From<serde_json::Error> for ReconcileError {
    fn from(err: serde_json::Error) -> Self {
        ReconcileError::Serialization {
            message: err.to_string(),
        }
    }
}
