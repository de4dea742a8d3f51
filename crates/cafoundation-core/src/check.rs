//! Fail-fast status checking for binaries and examples.
//!
//! These helpers print or log a failing status and may terminate the
//! process. Library code returns [`crate::Result`] instead and never calls
//! into this module.

use std::panic::Location;

use parking_lot::RwLock;

use crate::error::{CoreAudioError, Result};
use crate::fourcc::four_char_code;
use crate::status::{OsStatus, is_success};

/// Callback invoked for every failing status passed to [`report_error`]
pub type ErrorHandler = fn(status: OsStatus, operation: &str, location: &'static Location<'static>);

static HANDLER: RwLock<Option<ErrorHandler>> = parking_lot::const_rwlock(None);

fn standard_handler(status: OsStatus, operation: &str, location: &'static Location<'static>) {
    tracing::error!(
        status,
        code = %four_char_code(status),
        file = location.file(),
        line = location.line(),
        "Core Audio error in {operation}"
    );
}

/// Replace the handler used by [`report_error`]
pub fn set_error_handler(handler: ErrorHandler) {
    *HANDLER.write() = Some(handler);
}

/// Restore the default handler, which logs through `tracing`
pub fn reset_error_handler() {
    *HANDLER.write() = None;
}

/// Pass a failing status to the installed handler
///
/// Returns `true` if `status` was a failure.
#[track_caller]
pub fn report_error(status: OsStatus, operation: &str) -> bool {
    if is_success(status) {
        return false;
    }

    let handler = (*HANDLER.read()).unwrap_or(standard_handler);
    handler(status, operation, Location::caller());
    true
}

/// Report a failing status and terminate the process with exit code 1
#[track_caller]
pub fn check_error(status: OsStatus, operation: &str) {
    if report_error(status, operation) {
        if let Some(notice) = exit_notice(format_args!(
            "Error in {operation}: {} ({status})",
            four_char_code(status)
        )) {
            eprintln!("{notice}");
        }
        std::process::exit(1);
    }
}

/// Unwrap a result, or report the error and terminate with exit code 1
#[track_caller]
pub fn unwrap_or_exit<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => exit_with(&error),
    }
}

#[track_caller]
fn exit_with(error: &CoreAudioError) -> ! {
    let reported = match error.status() {
        Some(status) => report_error(status, error.operation()),
        None => false,
    };

    if !reported {
        tracing::error!(%error, "Core Audio operation failed");
    } else if let Some(notice) = exit_notice(format_args!("Error: {error}")) {
        eprintln!("{notice}");
    }
    std::process::exit(1)
}

/// Line to print before exiting
///
/// The standard handler has already logged the failure, so this is only
/// produced when a custom handler is installed.
fn exit_notice(message: std::fmt::Arguments<'_>) -> Option<String> {
    HANDLER.read().is_some().then(|| message.to_string())
}
