//! Per-test step log.
//!
//! Every action outcome becomes a [`Step`] carrying a snapshot of the
//! narration at the time it was recorded. The log counts failed and warned
//! steps against the session's limits; [`StepLog::verdict`] turns an
//! exceeded limit into [`Error::StepLimitExceeded`].
//!
//! | Status | Log level | Counted |
//! |--------|-----------|---------|
//! | [`StepStatus::Pass`] | info | no |
//! | [`StepStatus::Info`] | info | no |
//! | [`StepStatus::Warn`] | warn | warnings |
//! | [`StepStatus::Fail`] | error | failures |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::HarnessOptions;
use crate::diagnostics::Narration;
use crate::error::{Error, Result};

// ============================================================================
// StepStatus
// ============================================================================

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step succeeded.
    Pass,
    /// Step failed. Counts towards the failure limit.
    Fail,
    /// Step succeeded with a caveat. Counts towards the warning limit.
    Warn,
    /// Informational only.
    Info,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Step
// ============================================================================

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Outcome.
    pub status: StepStatus,
    /// Human-readable message.
    pub message: String,
    /// Narrated alias when the step was recorded.
    pub alias: String,
    /// Narrated locator when the step was recorded.
    pub locator: String,
}

// ============================================================================
// StepReport
// ============================================================================

/// Serializable snapshot of a [`StepLog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    /// Steps in recording order.
    pub steps: Vec<Step>,
    /// Failed step count.
    pub failures: usize,
    /// Warned step count.
    pub warnings: usize,
    /// Configured failure limit.
    pub max_failures: usize,
    /// Configured warning limit.
    pub max_warnings: usize,
}

// ============================================================================
// StepLog
// ============================================================================

#[derive(Debug, Default)]
struct StepLogInner {
    steps: Vec<Step>,
    failures: usize,
    warnings: usize,
}

/// Shared, append-only step log. Clones share one log.
#[derive(Debug, Clone)]
pub struct StepLog {
    inner: Arc<Mutex<StepLogInner>>,
    max_failures: usize,
    max_warnings: usize,
}

impl Default for StepLog {
    fn default() -> Self {
        Self::from_options(&HarnessOptions::default())
    }
}

impl StepLog {
    /// Creates an empty log with the given limits.
    #[must_use]
    pub fn new(max_failures: usize, max_warnings: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StepLogInner::default())),
            max_failures,
            max_warnings,
        }
    }

    /// Creates an empty log with the limits from `options`.
    #[must_use]
    pub fn from_options(options: &HarnessOptions) -> Self {
        Self::new(options.max_step_failures, options.max_step_warnings)
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Records a step and emits the matching log event.
    pub fn record(&self, status: StepStatus, message: impl Into<String>, narration: &Narration) {
        let message = message.into();
        let mut inner = self.inner.lock();

        match status {
            StepStatus::Pass | StepStatus::Info => {
                info!(status = %status, alias = narration.alias(), "{message}");
            }
            StepStatus::Warn => {
                inner.warnings += 1;
                warn!(alias = narration.alias(), locator = narration.locator(), "{message}");
                if just_exceeded(inner.warnings, self.max_warnings) {
                    error!(
                        limit = self.max_warnings,
                        "Test case has more than {} step warnings", self.max_warnings
                    );
                }
            }
            StepStatus::Fail => {
                inner.failures += 1;
                error!(alias = narration.alias(), locator = narration.locator(), "{message}");
                if just_exceeded(inner.failures, self.max_failures) {
                    error!(
                        limit = self.max_failures,
                        "Test case has more than {} step failures", self.max_failures
                    );
                }
            }
        }

        inner.steps.push(Step {
            status,
            message,
            alias: narration.alias().to_string(),
            locator: narration.locator().to_string(),
        });
    }

    /// Records a passed step.
    #[inline]
    pub fn pass(&self, message: impl Into<String>, narration: &Narration) {
        self.record(StepStatus::Pass, message, narration);
    }

    /// Records a failed step.
    #[inline]
    pub fn fail(&self, message: impl Into<String>, narration: &Narration) {
        self.record(StepStatus::Fail, message, narration);
    }

    /// Records a warned step.
    #[inline]
    pub fn warn(&self, message: impl Into<String>, narration: &Narration) {
        self.record(StepStatus::Warn, message, narration);
    }

    /// Records an informational step.
    #[inline]
    pub fn info(&self, message: impl Into<String>, narration: &Narration) {
        self.record(StepStatus::Info, message, narration);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns a copy of every step.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.inner.lock().steps.clone()
    }

    /// Number of failed steps.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.inner.lock().failures
    }

    /// Number of warned steps.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.inner.lock().warnings
    }

    /// Returns `true` if any step failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }

    /// Checks the counters against the limits.
    ///
    /// # Errors
    ///
    /// [`Error::StepLimitExceeded`] once failures exceed the failure limit
    /// or warnings exceed the warning limit. Failures are checked first.
    pub fn verdict(&self) -> Result<()> {
        let inner = self.inner.lock();
        if inner.failures > self.max_failures {
            return Err(Error::StepLimitExceeded {
                kind: "failures",
                count: inner.failures,
                limit: self.max_failures,
            });
        }
        if inner.warnings > self.max_warnings {
            return Err(Error::StepLimitExceeded {
                kind: "warnings",
                count: inner.warnings,
                limit: self.max_warnings,
            });
        }
        Ok(())
    }

    /// Drops every step and resets the counters.
    pub fn clear(&self) {
        *self.inner.lock() = StepLogInner::default();
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Takes a serializable snapshot.
    #[must_use]
    pub fn report(&self) -> StepReport {
        let inner = self.inner.lock();
        StepReport {
            steps: inner.steps.clone(),
            failures: inner.failures,
            warnings: inner.warnings,
            max_failures: self.max_failures,
            max_warnings: self.max_warnings,
        }
    }

    /// Serializes the snapshot as pretty JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }
}

/// Returns `true` if `count` is the first value above `limit`.
fn just_exceeded(count: usize, limit: usize) -> bool {
    count.checked_sub(1) == Some(limit)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn narration() -> Narration {
        Narration::new("'Sign In button'", "Locator: accessibility-tag(\"SIGN IN\")")
    }

    #[test]
    fn test_records_snapshot_of_narration() {
        let log = StepLog::default();
        log.pass("Tapped on 'Sign In button'", &narration());

        let steps = log.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].status, StepStatus::Pass);
        assert_eq!(steps[0].alias, "'Sign In button'");
        assert_eq!(steps[0].locator, "Locator: accessibility-tag(\"SIGN IN\")");
    }

    #[test]
    fn test_counters() {
        let log = StepLog::default();
        log.pass("ok", &Narration::default());
        log.info("note", &Narration::default());
        log.warn("careful", &Narration::default());
        log.fail("broken", &Narration::default());
        log.fail("broken again", &Narration::default());

        assert_eq!(log.failures(), 2);
        assert_eq!(log.warnings(), 1);
        assert!(log.has_failures());
        assert_eq!(log.steps().len(), 5);
    }

    #[test]
    fn test_failure_limit_is_exclusive() {
        let log = StepLog::new(4, 19);
        for _ in 0..4 {
            log.fail("broken", &Narration::default());
        }
        assert!(log.verdict().is_ok());

        log.fail("one too many", &Narration::default());
        match log.verdict().unwrap_err() {
            Error::StepLimitExceeded { kind, count, limit } => {
                assert_eq!(kind, "failures");
                assert_eq!(count, 5);
                assert_eq!(limit, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_warning_limit() {
        let log = StepLog::new(4, 1);
        log.warn("first", &Narration::default());
        assert!(log.verdict().is_ok());
        log.warn("second", &Narration::default());
        assert!(matches!(
            log.verdict(),
            Err(Error::StepLimitExceeded { kind: "warnings", .. })
        ));
    }

    #[test]
    fn test_unbounded_limits_never_trip() {
        let options = HarnessOptions::from_json_str(&format!(
            r#"{{"maxStepFailures": {max}, "maxStepWarnings": {max}}}"#,
            max = usize::MAX
        ))
        .unwrap();
        let log = StepLog::from_options(&options);

        log.warn("careful", &Narration::default());
        log.fail("broken", &Narration::default());

        assert_eq!(log.warnings(), 1);
        assert_eq!(log.failures(), 1);
        assert!(log.verdict().is_ok());
    }

    #[test]
    fn test_clones_share_log() {
        let log = StepLog::default();
        let other = log.clone();
        other.fail("x", &Narration::default());
        assert_eq!(log.failures(), 1);

        log.clear();
        assert_eq!(other.failures(), 0);
        assert!(other.steps().is_empty());
    }

    #[test]
    fn test_to_json() {
        let log = StepLog::new(2, 3);
        log.fail("Cannot find 'Sign In button'", &narration());

        let json: serde_json::Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
        assert_eq!(json["failures"], 1);
        assert_eq!(json["maxFailures"], 2);
        assert_eq!(json["maxWarnings"], 3);
        assert_eq!(json["steps"][0]["status"], "fail");
        assert_eq!(json["steps"][0]["alias"], "'Sign In button'");
    }
}
