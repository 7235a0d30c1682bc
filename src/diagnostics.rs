//! Session-scoped "last touched element" register.
//!
//! Every deferred element operation overwrites the register with the
//! element's alias and locator description. Step narration reads it right
//! after the operation it describes.
//!
//! One [`DiagnosticContext`] belongs to one session. Handles bound by that
//! session's processor share it, so two sessions running in the same
//! process never see each other's narration.
//!
//! # Example
//!
//! ```ignore
//! sign_in.click().await?;
//! let narration = session.narration();
//! tracing::info!("Tapped on {}", narration.alias());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// ============================================================================
// Narration
// ============================================================================

/// Snapshot of the most recently touched element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    alias: String,
    locator: String,
}

impl Narration {
    /// Creates a narration from display alias and locator description.
    pub fn new(alias: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            locator: locator.into(),
        }
    }

    /// Quoted alias of the element, e.g. `'Sign In button'`.
    #[inline]
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Locator description, e.g. `Locator: accessibility-tag("SIGN IN")`.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Returns `true` if nothing has been recorded yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alias.is_empty() && self.locator.is_empty()
    }
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.alias, self.locator)
    }
}

// ============================================================================
// DiagnosticContext
// ============================================================================

/// Shared single-slot register. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticContext {
    current: Arc<Mutex<Narration>>,
}

impl DiagnosticContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both fields. Last writer wins.
    pub fn record(&self, alias: impl Into<String>, locator: impl Into<String>) {
        *self.current.lock() = Narration::new(alias, locator);
    }

    /// Returns the current narration.
    #[must_use]
    pub fn read(&self) -> Narration {
        self.current.lock().clone()
    }

    /// Resets to the empty narration.
    pub fn clear(&self) {
        *self.current.lock() = Narration::default();
    }

    /// Returns `true` if both handles share the same register.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_empty() {
        let ctx = DiagnosticContext::new();
        assert!(ctx.read().is_empty());
    }

    #[test]
    fn test_record_overwrites() {
        let ctx = DiagnosticContext::new();
        ctx.record("'A'", "Locator: identifier(\"a\")");
        ctx.record("'B'", "Locator: identifier(\"b\")");

        let narration = ctx.read();
        assert_eq!(narration.alias(), "'B'");
        assert_eq!(narration.locator(), "Locator: identifier(\"b\")");
    }

    #[test]
    fn test_clones_share_register() {
        let ctx = DiagnosticContext::new();
        let handle = ctx.clone();
        handle.record("'Next'", "Locator: path-expression(\"//n\")");

        assert_eq!(ctx.read().alias(), "'Next'");
        assert!(ctx.same_as(&handle));
    }

    #[test]
    fn test_separate_contexts_are_isolated() {
        let a = DiagnosticContext::new();
        let b = DiagnosticContext::new();
        a.record("'A'", "x");

        assert!(b.read().is_empty());
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_clear() {
        let ctx = DiagnosticContext::new();
        ctx.record("'A'", "x");
        ctx.clear();
        assert!(ctx.read().is_empty());
    }

    #[test]
    fn test_display() {
        let narration = Narration::new("'Verify'", "Locator: identifier(\"v\")");
        assert_eq!(narration.to_string(), "'Verify' | Locator: identifier(\"v\")");
    }
}
