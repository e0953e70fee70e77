//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operation
//! boundaries. The engine layer owns them; lower layers use plain
//! `tracing::debug!` for internal details.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use slguard_core::log_op_start;
/// log_op_start!("check_contract");
/// log_op_start!("check_contract", contract = "Token");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use slguard_core::log_op_end;
/// log_op_end!("check_contract", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError).
///
/// # Example
///
/// ```
/// # use slguard_core::log_op_error;
/// # use slguard_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::ContractNotFound);
/// log_op_error!("select_contracts", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            "{}",
            ex_err
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
