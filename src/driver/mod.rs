//! Automation driver seam.
//!
//! The crate never talks to a device itself. A [`Driver`] implementation
//! (an Appium client, an XCUITest bridge, or the in-memory [`MockDriver`])
//! performs the single-element lookup every deferred handle relies on.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Driver`] | Lookup, keyboard and gesture operations |
//! | [`MockDriver`] | In-memory device screen for tests and dry runs |
//! | [`MockElement`] | Scriptable element placed on a [`MockDriver`] |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::element::{Element, Size};
use crate::error::{Error, Result};
use crate::gesture::{Direction, Gesture};
use crate::locator::By;

// ============================================================================
// Submodules
// ============================================================================

/// In-memory driver.
pub mod mock;

// ============================================================================
// Re-exports
// ============================================================================

pub use mock::{MockDriver, MockElement};

// ============================================================================
// Driver
// ============================================================================

/// A device automation session.
///
/// Shared read-only by every deferred handle created from one processor.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Looks up exactly one element.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`](crate::Error::ElementNotFound) when nothing
    /// matches; any transport failure as [`Error::Driver`](crate::Error::Driver).
    async fn find_element(&self, by: &By) -> Result<Box<dyn Element>>;

    /// Whether the soft keyboard is currently shown.
    async fn is_keyboard_shown(&self) -> Result<bool> {
        Ok(false)
    }

    /// Dismisses the soft keyboard.
    async fn hide_keyboard(&self) -> Result<()> {
        Ok(())
    }

    /// Performs a touch gesture in viewport coordinates.
    ///
    /// # Errors
    ///
    /// [`Error::Driver`] unless the driver implements gestures.
    async fn perform(&self, gesture: &Gesture) -> Result<()> {
        Err(Error::driver(format!("{} is not supported", gesture.name())))
    }

    /// Size of the device window.
    ///
    /// # Errors
    ///
    /// [`Error::Driver`] unless the driver reports it.
    async fn window_size(&self) -> Result<Size> {
        Err(Error::driver("window size is not supported"))
    }

    /// Whether the current scroll view has content left in `direction`.
    async fn can_scroll(&self, _direction: Direction) -> Result<bool> {
        Ok(false)
    }
}
