//! Canonical logging macros
//!
//! Every macro stamps `component` (the calling module path), `op` and
//! `event` so boundary events are uniform across crates.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use tablex_core::log_op_start;
/// log_op_start!("reconcile");
/// log_op_start!("reconcile", old_groups = 3usize, new_groups = 4usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::tablex_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::tablex_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use tablex_core::log_op_end;
/// log_op_end!("reconcile", duration_ms = 2u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::tablex_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::tablex_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation failure
///
/// The error expression must be a `ReconcileError` (or a reference to one).
///
/// # Example
///
/// ```
/// # use tablex_core::log_op_error;
/// # use tablex_core::errors::{ReconcileError, Side};
/// let err = ReconcileError::DuplicateGroupIdentity {
///     side: Side::Old,
///     group_index: 0,
///     group: "\"g\"".to_string(),
/// };
/// log_op_error!("reconcile", err, duration_ms = 1u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let reconcile_err: &$crate::errors::ReconcileError = &$err;
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::tablex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?reconcile_err.kind(),
            err.code = reconcile_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let reconcile_err: &$crate::errors::ReconcileError = &$err;
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::tablex_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?reconcile_err.kind(),
            err.code = reconcile_err.code(),
            $($field)*
        );
    }};
}
