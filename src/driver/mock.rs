//! In-memory device screen.
//!
//! [`MockDriver`] keeps a map from lookup to [`MockElement`] and answers
//! [`Driver::find_element`] from it. Every lookup is recorded so tests can
//! assert exactly how often a handle resolved. Elements can be placed,
//! hidden and removed between operations to mimic an accessibility tree
//! that is rebuilt after each gesture.
//!
//! Gestures are recorded too. A vertical swipe consumes one scroll of the
//! configured scroll view and counts down elements waiting to be revealed.
//!
//! # Example
//!
//! ```ignore
//! use screen_objects::{By, MockDriver, MockElement};
//!
//! let driver = MockDriver::new();
//! let button = driver.place(By::accessibility_id("SIGN IN"), MockElement::new().with_text("Sign in"));
//!
//! // ... run a flow ...
//!
//! assert_eq!(button.clicks(), 1);
//! assert_eq!(driver.lookup_count(&By::accessibility_id("SIGN IN")), 1);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::element::{Element, Point, Size};
use crate::error::{Error, Result};
use crate::gesture::{Direction, Gesture};
use crate::identifiers::ElementId;
use crate::locator::By;

use super::Driver;

// ============================================================================
// Constants
// ============================================================================

/// Size given to placed elements unless overridden.
const DEFAULT_SIZE: Size = Size::new(100, 40);

/// Window size reported unless overridden.
const DEFAULT_WINDOW: Size = Size::new(1080, 2400);

// ============================================================================
// Element State
// ============================================================================

/// Mutable state behind a [`MockElement`].
#[derive(Debug, Clone)]
struct ElementState {
    text: String,
    attributes: FxHashMap<String, String>,
    displayed: bool,
    enabled: bool,
    location: Point,
    size: Size,
    clicks: usize,
    typed: Vec<String>,
    attached: bool,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            text: String::new(),
            attributes: FxHashMap::default(),
            displayed: true,
            enabled: true,
            location: Point::default(),
            size: DEFAULT_SIZE,
            clicks: 0,
            typed: Vec::new(),
            attached: true,
        }
    }
}

// ============================================================================
// MockElement
// ============================================================================

/// A scriptable element. Clones share state.
#[derive(Debug, Clone)]
pub struct MockElement {
    id: ElementId,
    state: Arc<Mutex<ElementState>>,
}

impl Default for MockElement {
    fn default() -> Self {
        Self::new()
    }
}

impl MockElement {
    /// Creates a visible, enabled element with no text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ElementId::generate(),
            state: Arc::new(Mutex::new(ElementState::default())),
        }
    }

    /// Sets the visible text.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.state.lock().text = text.into();
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.state
            .lock()
            .attributes
            .insert(name.into(), value.into());
        self
    }

    /// Marks the element as not displayed.
    #[must_use]
    pub fn hidden(self) -> Self {
        self.state.lock().displayed = false;
        self
    }

    /// Marks the element as disabled.
    #[must_use]
    pub fn disabled(self) -> Self {
        self.state.lock().enabled = false;
        self
    }

    /// Places the element at `(x, y)`.
    #[must_use]
    pub fn at(self, x: i32, y: i32) -> Self {
        self.state.lock().location = Point::new(x, y);
        self
    }

    /// Sets the element size.
    #[must_use]
    pub fn sized(self, width: i32, height: i32) -> Self {
        self.state.lock().size = Size::new(width, height);
        self
    }

    /// Returns this element's ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Number of taps received.
    #[must_use]
    pub fn clicks(&self) -> usize {
        self.state.lock().clicks
    }

    /// Every `send_keys` payload received, in order.
    #[must_use]
    pub fn typed(&self) -> Vec<String> {
        self.state.lock().typed.clone()
    }

    /// Current text.
    #[must_use]
    pub fn current_text(&self) -> String {
        self.state.lock().text.clone()
    }

    /// Whether the element is currently shown.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.state.lock().displayed
    }

    /// Changes the text in place.
    pub fn set_text(&self, text: impl Into<String>) {
        self.state.lock().text = text.into();
    }

    /// Shows or hides the element in place.
    pub fn set_displayed(&self, displayed: bool) {
        self.state.lock().displayed = displayed;
    }

    fn live(&self) -> Box<dyn Element> {
        Box::new(LiveElement {
            id: self.id.clone(),
            state: Arc::clone(&self.state),
        })
    }
}

// ============================================================================
// LiveElement
// ============================================================================

/// Element returned from one lookup. Goes stale once removed from screen.
struct LiveElement {
    id: ElementId,
    state: Arc<Mutex<ElementState>>,
}

impl LiveElement {
    fn with_state<T>(&self, f: impl FnOnce(&mut ElementState) -> T) -> Result<T> {
        let mut state = self.state.lock();
        if !state.attached {
            return Err(Error::stale_element(self.id.clone()));
        }
        Ok(f(&mut state))
    }
}

#[async_trait]
impl Element for LiveElement {
    async fn text(&self) -> Result<String> {
        self.with_state(|s| s.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.with_state(|s| s.attributes.get(name).cloned())
    }

    async fn click(&self) -> Result<()> {
        self.with_state(|s| s.clicks += 1)
    }

    async fn send_keys(&self, value: &str) -> Result<()> {
        self.with_state(|s| {
            s.text.push_str(value);
            s.typed.push(value.to_string());
        })
    }

    async fn clear(&self) -> Result<()> {
        self.with_state(|s| s.text.clear())
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.with_state(|s| s.displayed)
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.with_state(|s| s.enabled)
    }

    async fn location(&self) -> Result<Point> {
        self.with_state(|s| s.location)
    }

    async fn size(&self) -> Result<Size> {
        self.with_state(|s| s.size)
    }
}

// ============================================================================
// MockDriver
// ============================================================================

/// Shared state of a [`MockDriver`].
#[derive(Default)]
struct MockScreen {
    elements: RwLock<FxHashMap<By, MockElement>>,
    lookups: Mutex<Vec<By>>,
    keyboard_shown: AtomicBool,
    gestures: Mutex<Vec<Gesture>>,
    window: Mutex<Option<Size>>,
    scrolls_left: AtomicUsize,
    reveals: Mutex<Vec<(By, usize)>>,
}

/// In-memory [`Driver`]. Clones share one screen.
#[derive(Clone, Default)]
pub struct MockDriver {
    inner: Arc<MockScreen>,
}

impl std::fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDriver")
            .field("elements", &self.inner.elements.read().len())
            .field("lookups", &self.inner.lookups.lock().len())
            .finish_non_exhaustive()
    }
}

impl MockDriver {
    /// Creates an empty screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `element` on screen under `by`, replacing whatever was there.
    ///
    /// Returns a handle sharing the element's state.
    pub fn place(&self, by: By, element: MockElement) -> MockElement {
        element.state.lock().attached = true;
        if let Some(previous) = self.inner.elements.write().insert(by, element.clone()) {
            previous.state.lock().attached = false;
        }
        element
    }

    /// Takes the element under `by` off screen. Live references to it go stale.
    pub fn remove(&self, by: &By) -> Option<MockElement> {
        let removed = self.inner.elements.write().remove(by);
        if let Some(element) = &removed {
            element.state.lock().attached = false;
        }
        removed
    }

    /// Returns the element placed under `by`.
    #[must_use]
    pub fn element(&self, by: &By) -> Option<MockElement> {
        self.inner.elements.read().get(by).cloned()
    }

    /// Every lookup received, in order.
    #[must_use]
    pub fn lookups(&self) -> Vec<By> {
        self.inner.lookups.lock().clone()
    }

    /// Number of lookups received for `by`.
    #[must_use]
    pub fn lookup_count(&self, by: &By) -> usize {
        self.inner.lookups.lock().iter().filter(|b| *b == by).count()
    }

    /// Total number of lookups received.
    #[must_use]
    pub fn total_lookups(&self) -> usize {
        self.inner.lookups.lock().len()
    }

    /// Forgets recorded lookups.
    pub fn clear_lookups(&self) {
        self.inner.lookups.lock().clear();
    }

    /// Shows or hides the soft keyboard.
    pub fn set_keyboard_shown(&self, shown: bool) {
        self.inner.keyboard_shown.store(shown, Ordering::SeqCst);
    }

    // ========================================================================
    // Gestures
    // ========================================================================

    /// Every gesture performed, in order.
    #[must_use]
    pub fn gestures(&self) -> Vec<Gesture> {
        self.inner.gestures.lock().clone()
    }

    /// Overrides the reported window size.
    pub fn set_window_size(&self, size: Size) {
        *self.inner.window.lock() = Some(size);
    }

    /// Gives the scroll view content for `scrolls` more vertical swipes.
    pub fn set_scrollable(&self, scrolls: usize) {
        self.inner.scrolls_left.store(scrolls, Ordering::SeqCst);
    }

    /// Shows the element under `by` after `scrolls` vertical swipes.
    ///
    /// The element must already be placed, usually [`hidden`](MockElement::hidden).
    pub fn reveal_after_scrolls(&self, by: By, scrolls: usize) {
        if scrolls == 0 {
            if let Some(element) = self.element(&by) {
                element.set_displayed(true);
            }
            return;
        }
        self.inner.reveals.lock().push((by, scrolls));
    }

    fn scrolled(&self) {
        // Content left is checked by `can_scroll`; a swipe at the end is a no-op.
        let _ = self
            .inner
            .scrolls_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

        let elements = self.inner.elements.read();
        self.inner.reveals.lock().retain_mut(|(by, left)| {
            *left -= 1;
            if *left > 0 {
                return true;
            }
            if let Some(element) = elements.get(&*by) {
                element.set_displayed(true);
            }
            false
        });
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn find_element(&self, by: &By) -> Result<Box<dyn Element>> {
        self.inner.lookups.lock().push(by.clone());
        trace!(locator = %by, "Mock lookup");

        self.inner
            .elements
            .read()
            .get(by)
            .map(MockElement::live)
            .ok_or_else(|| Error::element_not_found(by.to_string()))
    }

    async fn is_keyboard_shown(&self) -> Result<bool> {
        Ok(self.inner.keyboard_shown.load(Ordering::SeqCst))
    }

    async fn hide_keyboard(&self) -> Result<()> {
        self.inner.keyboard_shown.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn perform(&self, gesture: &Gesture) -> Result<()> {
        trace!(gesture = gesture.name(), "Mock gesture");
        self.inner.gestures.lock().push(*gesture);
        if let Gesture::Swipe { from, to, .. } = gesture {
            if from.x == to.x {
                self.scrolled();
            }
        }
        Ok(())
    }

    async fn window_size(&self) -> Result<Size> {
        Ok(self.inner.window.lock().unwrap_or(DEFAULT_WINDOW))
    }

    async fn can_scroll(&self, direction: Direction) -> Result<bool> {
        Ok(direction.is_vertical() && self.inner.scrolls_left.load(Ordering::SeqCst) > 0)
    }
}

// ============================================================================
// Tests
// ============================================================================
