//! Error types for screen objects.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use screen_objects::{Element, Result};
//!
//! async fn example(screen: &LoginScreen) -> Result<()> {
//!     screen.sign_in()?.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidLocator`], [`Error::InvalidDirection`] |
//! | Element | [`Error::ElementNotFound`], [`Error::StaleElement`] |
//! | Screen slots | [`Error::UnknownSlot`], [`Error::UnboundSlot`], [`Error::SlotSealed`] |
//! | Execution | [`Error::Driver`], [`Error::Timeout`], [`Error::StepLimitExceeded`] |
//! | Data | [`Error::TestData`], [`Error::Decode`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::ElementId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when harness options are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Locator descriptor has zero or several strategy values.
    ///
    /// A programmer error in a screen definition. Raised before any
    /// driver call is made.
    #[error("Invalid locator: {message}")]
    InvalidLocator {
        /// Description of the descriptor problem.
        message: String,
    },

    /// Direction a gesture does not accept.
    #[error("Invalid direction: '{direction}', expected {expected}")]
    InvalidDirection {
        /// The rejected direction as given.
        direction: String,
        /// Directions the gesture accepts.
        expected: &'static str,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// No element matched the locator.
    ///
    /// Raised by the driver during resolution.
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Strategy and value used for the lookup.
        locator: String,
    },

    /// Element is stale (no longer on screen).
    #[error("Stale element: {element_id}")]
    StaleElement {
        /// The stale element's ID.
        element_id: ElementId,
    },

    // ========================================================================
    // Screen Slot Errors
    // ========================================================================
    /// Slot name is not declared by the screen.
    #[error("Unknown slot: {slot}")]
    UnknownSlot {
        /// The slot name.
        slot: String,
    },

    /// Slot has no element handle bound yet.
    #[error("Slot not bound: {slot}")]
    UnboundSlot {
        /// The slot name.
        slot: String,
    },

    /// Slot refuses writes.
    #[error("Slot is sealed: {slot}")]
    SlotSealed {
        /// The slot name.
        slot: String,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Failure reported by the automation driver.
    #[error("Driver error: {message}")]
    Driver {
        /// Message from the driver.
        message: String,
    },

    /// Operation timeout.
    ///
    /// Returned when a bounded wait expires.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// Too many failed or warned steps in one test case.
    #[error("Step limit exceeded: {count} {kind} (limit {limit})")]
    StepLimitExceeded {
        /// "failures" or "warnings".
        kind: &'static str,
        /// Number of steps recorded.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },

    // ========================================================================
    // Data Errors
    // ========================================================================
    /// Test data lookup failed.
    #[error("Test data error: {message}")]
    TestData {
        /// Description of the lookup failure.
        message: String,
    },

    /// Base64 decoding failed.
    #[error("Decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid locator error.
    #[inline]
    pub fn invalid_locator(message: impl Into<String>) -> Self {
        Self::InvalidLocator {
            message: message.into(),
        }
    }

    /// Creates an invalid direction error.
    #[inline]
    pub fn invalid_direction(direction: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidDirection {
            direction: direction.into(),
            expected,
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(element_id: ElementId) -> Self {
        Self::StaleElement { element_id }
    }

    /// Creates an unknown slot error.
    #[inline]
    pub fn unknown_slot(slot: impl Into<String>) -> Self {
        Self::UnknownSlot { slot: slot.into() }
    }

    /// Creates an unbound slot error.
    #[inline]
    pub fn unbound_slot(slot: impl Into<String>) -> Self {
        Self::UnboundSlot { slot: slot.into() }
    }

    /// Creates a sealed slot error.
    #[inline]
    pub fn slot_sealed(slot: impl Into<String>) -> Self {
        Self::SlotSealed { slot: slot.into() }
    }

    /// Creates a driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a test data error.
    #[inline]
    pub fn test_data(message: impl Into<String>) -> Self {
        Self::TestData {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::StaleElement { .. }
        )
    }

    /// Returns `true` if this error points at a broken screen definition
    /// or harness configuration.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InvalidLocator { .. }
                | Self::InvalidDirection { .. }
                | Self::UnknownSlot { .. }
                | Self::SlotSealed { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::ElementNotFound { .. } | Self::StaleElement { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::element_not_found("xpath(\"//button\")");
        assert_eq!(err.to_string(), "Element not found: xpath(\"//button\")");
    }

    #[test]
    fn test_invalid_locator_display() {
        let err = Error::invalid_locator("no strategy value set");
        assert_eq!(err.to_string(), "Invalid locator: no strategy value set");
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("find element", 5000);
        let other_err = Error::driver("session gone");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_config_error() {
        assert!(Error::invalid_locator("x").is_config_error());
        assert!(Error::slot_sealed("btn").is_config_error());
        assert!(Error::invalid_direction("up", "left or right").is_config_error());
        assert!(Error::unknown_slot("btn").is_config_error());
        assert!(!Error::element_not_found("x").is_config_error());
        assert!(!Error::unbound_slot("btn").is_config_error());
    }

    #[test]
    fn test_is_recoverable() {
        let not_found = Error::element_not_found("id(\"x\")");
        let invalid = Error::invalid_locator("test");

        assert!(not_found.is_recoverable());
        assert!(not_found.is_element_error());
        assert!(!invalid.is_recoverable());
    }

    #[test]
    fn test_step_limit_display() {
        let err = Error::StepLimitExceeded {
            kind: "failures",
            count: 5,
            limit: 4,
        };
        assert_eq!(err.to_string(), "Step limit exceeded: 5 failures (limit 4)");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
