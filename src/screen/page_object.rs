//! Generic screen addressed by slot name.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::{FxHashMap, FxHashSet};

use crate::element::DeferredElement;
use crate::error::{Error, Result};

use super::{Screen, ScreenDefinition};

// ============================================================================
// PageObject
// ============================================================================

/// A screen whose slots live in a table keyed by name.
///
/// Every declared slot starts unbound. Extra fields without a descriptor
/// can be added with [`with_field`](Self::with_field); the processor never
/// touches them. Sealed slots refuse writes.
#[derive(Debug, Clone, Default)]
pub struct PageObject {
    definition: ScreenDefinition,
    slots: FxHashMap<String, Option<DeferredElement>>,
    sealed: FxHashSet<String>,
}

impl PageObject {
    /// Creates a page object with every declared slot unbound.
    #[must_use]
    pub fn new(definition: ScreenDefinition) -> Self {
        let slots = definition
            .slot_names()
            .map(|name| (name.to_string(), None))
            .collect();
        Self {
            definition,
            slots,
            sealed: FxHashSet::default(),
        }
    }

    /// Adds a slot that has no descriptor.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.slots.entry(name.into()).or_insert(None);
        self
    }

    /// Makes `name` refuse writes.
    #[must_use]
    pub fn seal(mut self, name: impl Into<String>) -> Self {
        self.sealed.insert(name.into());
        self
    }

    /// Handle bound in `slot`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownSlot`] if the screen has no such slot
    /// - [`Error::UnboundSlot`] if nothing was bound yet
    pub fn element(&self, slot: &str) -> Result<&DeferredElement> {
        match self.slots.get(slot) {
            Some(Some(element)) => Ok(element),
            Some(None) => Err(Error::unbound_slot(slot)),
            None => Err(Error::unknown_slot(slot)),
        }
    }

    /// Returns `true` if `slot` holds a handle.
    #[must_use]
    pub fn is_bound(&self, slot: &str) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    /// Number of slots holding a handle.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.slots.values().filter(|s| s.is_some()).count()
    }

    /// Number of slots, bound or not, including plain fields.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl Screen for PageObject {
    fn definition(&self) -> &ScreenDefinition {
        &self.definition
    }

    fn bind_slot(&mut self, slot: &str, element: DeferredElement) -> Result<()> {
        if self.sealed.contains(slot) {
            return Err(Error::slot_sealed(slot));
        }
        match self.slots.get_mut(slot) {
            Some(entry) => {
                *entry = Some(element);
                Ok(())
            }
            None => Err(Error::unknown_slot(slot)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::diagnostics::DiagnosticContext;
    use crate::driver::MockDriver;
    use crate::locator::Locator;

    fn definition() -> ScreenDefinition {
        ScreenDefinition::builder("Footer")
            .slot("ico_home", Locator::xpath("//home", "Home icon in footer"))
            .build()
    }

    fn element(locator: &Arc<Locator>) -> DeferredElement {
        DeferredElement::new(
            Arc::new(MockDriver::new()),
            Arc::clone(locator),
            DiagnosticContext::new(),
        )
    }

    #[test]
    fn test_slots_start_unbound() {
        let page = PageObject::new(definition());
        assert!(!page.is_bound("ico_home"));
        assert!(matches!(
            page.element("ico_home").unwrap_err(),
            Error::UnboundSlot { .. }
        ));
        assert!(matches!(
            page.element("nope").unwrap_err(),
            Error::UnknownSlot { .. }
        ));
    }

    #[test]
    fn test_bind_slot() {
        let mut page = PageObject::new(definition());
        let locator = Arc::clone(page.definition().locator("ico_home").unwrap());

        page.bind_slot("ico_home", element(&locator)).unwrap();

        assert!(page.is_bound("ico_home"));
        assert_eq!(page.element("ico_home").unwrap().alias(), "Home icon in footer");
    }

    #[test]
    fn test_sealed_slot_refuses_write() {
        let mut page = PageObject::new(definition()).seal("ico_home");
        let locator = Arc::clone(page.definition().locator("ico_home").unwrap());

        let err = page.bind_slot("ico_home", element(&locator)).unwrap_err();
        assert!(matches!(err, Error::SlotSealed { .. }));
        assert_eq!(page.bound_count(), 0);
    }

    #[test]
    fn test_plain_field_counts_as_slot() {
        let page = PageObject::new(definition()).with_field("notes");
        assert_eq!(page.slot_count(), 2);
        assert_eq!(page.definition().len(), 1);
    }
}
