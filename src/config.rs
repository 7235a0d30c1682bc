//! Harness timing and step-limit options.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use screen_objects::HarnessOptions;
//!
//! let options = HarnessOptions::new()
//!     .with_element_load_wait(Duration::from_secs(20))
//!     .with_max_step_failures(2);
//!
//! // Or from a JSON file; missing keys keep their defaults.
//! let options = HarnessOptions::from_json_file("config/harness.json")?;
//! ```
//!
//! JSON layout (durations in milliseconds):
//!
//! ```json
//! {
//!   "smallWaitMs": 5000,
//!   "elementLoadWaitMs": 15000,
//!   "pollIntervalMs": 250,
//!   "maxStepFailures": 4,
//!   "maxStepWarnings": 19
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Defaults
// ============================================================================

/// Wait used for quick interactions such as typing.
pub const DEFAULT_SMALL_WAIT: Duration = Duration::from_secs(5);

/// Wait used when looking for an element to appear.
pub const DEFAULT_ELEMENT_LOAD_WAIT: Duration = Duration::from_secs(15);

/// Delay between two visibility checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Failed steps tolerated before the test case is failed.
pub const DEFAULT_MAX_STEP_FAILURES: usize = 4;

/// Warned steps tolerated before the test case is failed.
pub const DEFAULT_MAX_STEP_WARNINGS: usize = 19;

// ============================================================================
// HarnessOptions
// ============================================================================

/// Timeouts and limits of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HarnessOptions {
    /// Bounded wait for quick interactions.
    #[serde(rename = "smallWaitMs", with = "millis")]
    pub small_wait: Duration,

    /// Bounded wait for an element to become visible.
    #[serde(rename = "elementLoadWaitMs", with = "millis")]
    pub element_load_wait: Duration,

    /// Delay between visibility checks during a bounded wait.
    #[serde(rename = "pollIntervalMs", with = "millis")]
    pub poll_interval: Duration,

    /// Failed steps tolerated per test case.
    pub max_step_failures: usize,

    /// Warned steps tolerated per test case.
    pub max_step_warnings: usize,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl HarnessOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            small_wait: DEFAULT_SMALL_WAIT,
            element_load_wait: DEFAULT_ELEMENT_LOAD_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_step_failures: DEFAULT_MAX_STEP_FAILURES,
            max_step_warnings: DEFAULT_MAX_STEP_WARNINGS,
        }
    }

    /// Parses options from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the document is malformed
    /// - [`Error::Config`] if the values are inconsistent
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl HarnessOptions {
    /// Sets the quick-interaction wait.
    #[inline]
    #[must_use]
    pub fn with_small_wait(mut self, wait: Duration) -> Self {
        self.small_wait = wait;
        self
    }

    /// Sets the element wait.
    #[inline]
    #[must_use]
    pub fn with_element_load_wait(mut self, wait: Duration) -> Self {
        self.element_load_wait = wait;
        self
    }

    /// Sets the visibility poll interval.
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the tolerated number of failed steps.
    #[inline]
    #[must_use]
    pub fn with_max_step_failures(mut self, max: usize) -> Self {
        self.max_step_failures = max;
        self
    }

    /// Sets the tolerated number of warned steps.
    #[inline]
    #[must_use]
    pub fn with_max_step_warnings(mut self, max: usize) -> Self {
        self.max_step_warnings = max;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl HarnessOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the poll interval is zero or longer than a wait.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::config("pollIntervalMs must be greater than zero"));
        }
        if self.poll_interval > self.small_wait || self.poll_interval > self.element_load_wait {
            return Err(Error::config(
                "pollIntervalMs must not exceed smallWaitMs or elementLoadWaitMs",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ============================================================================
// Tests
// ============================================================================
