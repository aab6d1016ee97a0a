//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_LIVE_ID: &str = "live_id";
pub const FIELD_ROUTE: &str = "route";
pub const FIELD_KIND: &str = "kind";
pub const FIELD_NAME: &str = "name";

// Collection sizes
pub const FIELD_PATH_LEN: &str = "path_len";
pub const FIELD_ROUTE_COUNT: &str = "route_count";

// Error fields
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
