//! Declarative slot registry.
//!
//! A [`ScreenDefinition`] maps slot names to locator descriptors. It is
//! built once, when the screen is defined, and makes no driver call.
//!
//! # Example
//!
//! ```ignore
//! use screen_objects::{Locator, ScreenDefinition};
//!
//! let login = ScreenDefinition::builder("LoginScreen")
//!     .slot("btn_sign_in", Locator::accessibility("SIGN IN", "Sign In button"))
//!     .slot("txt_username", Locator::xpath("//android.widget.EditText[@resource-id='input28']", "Username textfield"))
//!     .build();
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::locator::Locator;

// ============================================================================
// ScreenDefinition
// ============================================================================

/// Ordered `(slot name, descriptor)` pairs of one screen.
#[derive(Debug, Clone, Default)]
pub struct ScreenDefinition {
    name: String,
    slots: Vec<(String, Arc<Locator>)>,
}

impl ScreenDefinition {
    /// Starts a definition for the screen called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ScreenBuilder {
        ScreenBuilder {
            definition: Self {
                name: name.into(),
                slots: Vec::new(),
            },
        }
    }

    /// Screen name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slots in declaration order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[(String, Arc<Locator>)] {
        &self.slots
    }

    /// Slot names in declaration order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// Descriptor registered for `slot`.
    #[must_use]
    pub fn locator(&self, slot: &str) -> Option<&Arc<Locator>> {
        self.slots
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, locator)| locator)
    }

    /// Number of declared slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is declared.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every slot whose descriptor fails validation, with the reason.
    #[must_use]
    pub fn invalid_slots(&self) -> Vec<(&str, Error)> {
        self.slots
            .iter()
            .filter_map(|(name, locator)| locator.validate().err().map(|e| (name.as_str(), e)))
            .collect()
    }

    /// Checks every descriptor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLocator`] naming the first malformed slot.
    pub fn validate(&self) -> Result<()> {
        match self.invalid_slots().into_iter().next() {
            None => Ok(()),
            Some((slot, err)) => Err(Error::invalid_locator(format!(
                "{}.{}: {}",
                self.name, slot, err
            ))),
        }
    }
}

// ============================================================================
// ScreenBuilder
// ============================================================================

/// Builder returned by [`ScreenDefinition::builder`].
#[derive(Debug, Clone)]
pub struct ScreenBuilder {
    definition: ScreenDefinition,
}

impl ScreenBuilder {
    /// Registers `locator` under `slot`.
    ///
    /// Registering a slot twice replaces the earlier descriptor in place.
    #[must_use]
    pub fn slot(mut self, slot: impl Into<String>, locator: Locator) -> Self {
        let slot = slot.into();
        let locator = Arc::new(locator);
        match self.definition.slots.iter_mut().find(|(name, _)| *name == slot) {
            Some(entry) => entry.1 = locator,
            None => self.definition.slots.push((slot, locator)),
        }
        self
    }

    /// Finishes the definition. Descriptors are checked on first use.
    #[must_use]
    pub fn build(self) -> ScreenDefinition {
        self.definition
    }

    /// Finishes the definition, rejecting malformed descriptors now.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLocator`] naming the first malformed slot.
    pub fn build_strict(self) -> Result<ScreenDefinition> {
        self.definition.validate()?;
        Ok(self.definition)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::locator::{By, FindBy};

    #[test]
    fn test_builder_keeps_declaration_order() {
        let def = ScreenDefinition::builder("Login")
            .slot("b", Locator::id("b", "B"))
            .slot("a", Locator::id("a", "A"))
            .build();

        assert_eq!(def.name(), "Login");
        assert_eq!(def.slot_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(def.len(), 2);
    }

    #[test]
    fn test_duplicate_slot_replaces() {
        let def = ScreenDefinition::builder("Login")
            .slot("btn", Locator::id("old", "Old"))
            .slot("btn", Locator::id("new", "New"))
            .build();

        assert_eq!(def.len(), 1);
        assert_eq!(def.locator("btn").unwrap().by().unwrap(), By::id("new"));
    }

    #[test]
    fn test_lenient_build_accepts_invalid() {
        let def = ScreenDefinition::builder("Broken")
            .slot("ok", Locator::id("ok", "Ok"))
            .slot("bad", Locator::new(FindBy::new(), "Bad"))
            .build();

        let invalid = def.invalid_slots();
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].0, "bad");
    }

    #[test]
    fn test_strict_build_rejects_invalid() {
        let err = ScreenDefinition::builder("Broken")
            .slot("bad", Locator::new(FindBy::new().id("x").tag_name("y"), "Bad"))
            .build_strict()
            .unwrap_err();

        assert!(matches!(err, Error::InvalidLocator { .. }));
        assert!(err.to_string().contains("Broken.bad"));
    }

    #[test]
    fn test_unknown_locator_lookup() {
        let def = ScreenDefinition::builder("Empty").build();
        assert!(def.is_empty());
        assert!(def.locator("missing").is_none());
        assert!(def.validate().is_ok());
    }
}
