//! The live-element capability set.
//!
//! Drivers hand out [`Element`] trait objects; [`DeferredElement`] exposes
//! the same trait so page objects and flows never see the difference.
//!
//! [`DeferredElement`]: super::DeferredElement

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Geometry
// ============================================================================

/// Top-left corner of an element, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Dimensions of an element, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Size {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Center of an element of this size placed at `origin`.
    #[must_use]
    pub const fn center_from(self, origin: Point) -> Point {
        Point::new(origin.x + self.width / 2, origin.y + self.height / 2)
    }
}

// ============================================================================
// Element
// ============================================================================

/// Operations a UI element supports.
#[async_trait]
pub trait Element: Send + Sync {
    /// Visible text of the element.
    async fn text(&self) -> Result<String>;

    /// Attribute value, `None` if the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Taps the element.
    async fn click(&self) -> Result<()>;

    /// Types `value` into the element.
    async fn send_keys(&self, value: &str) -> Result<()>;

    /// Clears an editable element.
    async fn clear(&self) -> Result<()>;

    /// Whether the element is visible on screen.
    async fn is_displayed(&self) -> Result<bool>;

    /// Whether the element accepts input.
    async fn is_enabled(&self) -> Result<bool>;

    /// Top-left corner on screen.
    async fn location(&self) -> Result<Point>;

    /// Width and height on screen.
    async fn size(&self) -> Result<Size>;
}

// ============================================================================
// Tests
// ============================================================================
