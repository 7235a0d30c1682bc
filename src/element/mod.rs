//! Element handles.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Element`] | Live-element capability set |
//! | [`DeferredElement`] | Handle that resolves on every call |
//! | [`Point`], [`Size`] | On-screen geometry |

// ============================================================================
// Submodules
// ============================================================================

/// Capability trait and geometry types.
pub mod capability;

/// Lazily-resolved handle.
pub mod deferred;

// ============================================================================
// Re-exports
// ============================================================================

pub use capability::{Element, Point, Size};
pub use deferred::DeferredElement;
