//! Core types shared across Canopy facilities
//!
//! This crate provides foundational types used by the reconciliation kernel,
//! its error handling, and its logging facility:
//!
//! - **LiveId**: opaque handle to an object in the host runtime's live tree
//! - **RouteKey**: stable, path-independent key for re-finding live objects
//! - **Schema constants**: canonical field keys and event names

pub mod live_id;
pub mod route;
pub mod schema;

pub use live_id::LiveId;
pub use route::RouteKey;
