//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use canopy_core::log_op_start;
/// log_op_start!("reconcile");
/// log_op_start!("reconcile_route", route = "src/server");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        )
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use canopy_core::log_op_end;
/// log_op_end!("reconcile", duration_ms = 42u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        )
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        )
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use canopy_core::{log_op_error, errors::ReconcileError};
/// let err = ReconcileError::EmptyPath;
/// log_op_error!("reconcile_route", err, duration_ms = 10u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_code = $err.code(),
        )
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_code = $err.code(),
            $($field)*
        )
    };
}
