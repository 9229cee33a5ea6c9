//! Crate-level error types and the fatal contract-violation macro.

use thiserror_no_std::Error;

use crate::display::DisplayError;

/// Abort on a programmer-contract violation.
///
/// These indicate wiring bugs (triggering a system event by hand, deleting a
/// busy component, adding a component that never went through `create()`),
/// not runtime conditions, so they are logged and then panic.
macro_rules! fatal {
    ($($arg:tt)+) => {{
        log::error!($($arg)+);
        panic!($($arg)+);
    }};
}

/// Errors surfaced by the UI core
#[derive(Debug, Error)]
pub enum UxError {
    /// The display device rejected an operation
    #[error("Display error: {0}")]
    Display(DisplayError),

    /// A configuration blob could not be encoded or decoded
    #[error("Configuration serialization failed")]
    Serialization,
}

impl From<DisplayError> for UxError {
    fn from(err: DisplayError) -> Self {
        UxError::Display(err)
    }
}

/// Result type for UI core operations
pub type UxResult<T> = Result<T, UxError>;
