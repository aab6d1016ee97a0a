//! Structured logging facility for Canopy
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Canonical field keys from `canopy_core_types::schema`
//!
//! # Usage
//!
//! ```rust
//! use canopy_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;

pub use init::{init, Profile};
