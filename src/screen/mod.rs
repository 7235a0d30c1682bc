//! Screens: containers of element slots.
//!
//! A screen exposes its `(slot, descriptor)` pairs through
//! [`Screen::definition`] and accepts handles through [`Screen::bind_slot`].
//! The [`Processor`](crate::Processor) walks the first and calls the second.
//!
//! Three ways to get a screen:
//!
//! | Way | When |
//! |-----|------|
//! | [`screen!`](crate::screen!) | Typed accessors per slot, locators written next to each field |
//! | [`PageObject`] | Slots looked up by name at runtime |
//! | Hand-written `impl Screen` | Screens that also carry ordinary fields |

// ============================================================================
// Imports
// ============================================================================

use crate::element::DeferredElement;
use crate::error::Result;

// ============================================================================
// Submodules
// ============================================================================

/// Slot registry and builder.
pub mod definition;

/// `screen!` declarative macro.
mod macros;

/// Name-addressed generic screen.
pub mod page_object;

// ============================================================================
// Re-exports
// ============================================================================

pub use definition::{ScreenBuilder, ScreenDefinition};
pub use page_object::PageObject;

// ============================================================================
// Screen
// ============================================================================

/// A container whose slots a processor can discover and fill.
pub trait Screen {
    /// Declared slots and their descriptors.
    fn definition(&self) -> &ScreenDefinition;

    /// Stores `element` in `slot`.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the slot cannot be written,
    /// e.g. [`Error::UnknownSlot`](crate::Error::UnknownSlot) or
    /// [`Error::SlotSealed`](crate::Error::SlotSealed).
    fn bind_slot(&mut self, slot: &str, element: DeferredElement) -> Result<()>;
}
