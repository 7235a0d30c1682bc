//! Slot discovery and handle binding.
//!
//! The [`Processor`] walks a screen's declared slots, builds one
//! [`DeferredElement`] per slot and writes it in. A slot that refuses the
//! write is logged and skipped; the rest of the screen still gets bound.
//!
//! # Example
//!
//! ```ignore
//! let processor = session.processor();
//! let summary = processor.process(&mut login);
//! assert!(summary.is_complete());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::diagnostics::DiagnosticContext;
use crate::driver::Driver;
use crate::element::DeferredElement;
use crate::screen::Screen;

// ============================================================================
// BindSummary
// ============================================================================

/// Outcome of one [`Processor::process`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindSummary {
    /// Slots that received a handle.
    pub bound: Vec<String>,
    /// Slots whose write failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl BindSummary {
    /// Returns `true` if every declared slot was bound.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// ============================================================================
// Processor
// ============================================================================

/// Binds deferred handles into screens.
///
/// Every handle it creates shares the processor's driver and diagnostic
/// context.
#[derive(Clone)]
pub struct Processor {
    driver: Arc<dyn Driver>,
    context: DiagnosticContext,
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor").finish_non_exhaustive()
    }
}

impl Processor {
    /// Creates a processor for one session.
    pub fn new(driver: Arc<dyn Driver>, context: DiagnosticContext) -> Self {
        Self { driver, context }
    }

    /// Returns the context handles will write to.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &DiagnosticContext {
        &self.context
    }

    /// Builds and binds a fresh handle for every declared slot.
    ///
    /// Running it again replaces every handle; nothing accumulates.
    /// Descriptors are not resolved here. A malformed one is logged and
    /// still bound, so the error surfaces on first use.
    pub fn process<S: Screen + ?Sized>(&self, screen: &mut S) -> BindSummary {
        let definition = screen.definition();
        let screen_name = definition.name().to_string();
        let entries = definition.entries().to_vec();
        let mut summary = BindSummary::default();

        for (slot, locator) in entries {
            if let Err(e) = locator.validate() {
                warn!(screen = %screen_name, slot = %slot, error = %e, "Slot has an unusable locator");
            }

            let element = DeferredElement::new(
                Arc::clone(&self.driver),
                locator,
                self.context.clone(),
            );

            match screen.bind_slot(&slot, element) {
                Ok(()) => {
                    debug!(screen = %screen_name, slot = %slot, "Deferred element bound");
                    summary.bound.push(slot);
                }
                Err(e) => {
                    error!(screen = %screen_name, slot = %slot, error = %e, "Failed to bind slot");
                    summary.failed.push((slot, e.to_string()));
                }
            }
        }

        summary
    }
}

// ============================================================================
// Tests
// ============================================================================
