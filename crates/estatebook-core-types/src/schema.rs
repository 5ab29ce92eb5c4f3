//! Canonical schema constants for structured logging
//!
//! Every log line emitted by the command layer uses these keys so that
//! captured events can be asserted on by name.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_CLIENT_NAME: &str = "client_name";
pub const FIELD_LISTING_NAME: &str = "listing_name";
pub const FIELD_ROLE: &str = "role";

// Cascade sizes
pub const FIELD_DETACHED_COUNT: &str = "detached_count";
pub const FIELD_DELETED_LISTINGS: &str = "deleted_listings";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_TRANSITION: &str = "transition";
