//! Locator descriptors and lookup strategies.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Strategy`] | Closed set of lookup strategies |
//! | [`By`] | One validated strategy and value, as sent to a driver |
//! | [`FindBy`] | Raw per-strategy values of a descriptor |
//! | [`Locator`] | Descriptor: a [`FindBy`] plus a human-readable alias |

// ============================================================================
// Submodules
// ============================================================================

/// Descriptor types and validation.
pub mod descriptor;

/// Lookup strategies.
pub mod strategy;

// ============================================================================
// Re-exports
// ============================================================================

pub use descriptor::{FindBy, Locator};
pub use strategy::{By, Strategy};
