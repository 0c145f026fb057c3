//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the code that emits
//! events and the code that asserts on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Snapshot sizes
pub const FIELD_OLD_GROUPS: &str = "old_groups";
pub const FIELD_NEW_GROUPS: &str = "new_groups";
pub const FIELD_MATCHED_GROUPS: &str = "matched_groups";

// Plan sizes
pub const FIELD_GROUP_CHANGES: &str = "group_changes";
pub const FIELD_ITEM_CHANGES: &str = "item_changes";
pub const FIELD_DEFERRED: &str = "deferred";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_RECONCILE: &str = "reconcile";
pub const OP_RECONCILE_ITEMS: &str = "reconcile_items";
