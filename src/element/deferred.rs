//! Lazily-resolved element handles.
//!
//! A [`DeferredElement`] stands in for a live element. It holds a locator,
//! the shared driver and the session's diagnostic context, but never an
//! element reference: each operation looks the element up again, records
//! the narration, then forwards the call.
//!
//! # Example
//!
//! ```ignore
//! let sign_in = screen.sign_in()?;
//!
//! // Resolves via accessibility ID "SIGN IN", then taps.
//! sign_in.click().await?;
//!
//! // Never touches the driver.
//! println!("{sign_in}");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::diagnostics::DiagnosticContext;
use crate::driver::Driver;
use crate::error::Result;
use crate::locator::Locator;

use super::capability::{Element, Point, Size};

// ============================================================================
// DeferredElement
// ============================================================================

/// Handle that re-resolves its element on every operation.
///
/// Cloning is cheap; clones share the driver, locator and context.
#[derive(Clone)]
pub struct DeferredElement {
    driver: Arc<dyn Driver>,
    locator: Arc<Locator>,
    context: DiagnosticContext,
}

// ============================================================================
// DeferredElement - Display
// ============================================================================

impl fmt::Debug for DeferredElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredElement")
            .field("alias", &self.locator.alias())
            .field("locator", &self.locator.describe())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DeferredElement {
    /// Writes the locator description without resolving.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locator.describe())
    }
}

// ============================================================================
// DeferredElement - Constructor & Accessors
// ============================================================================

impl DeferredElement {
    /// Creates a handle. Performs no lookup.
    pub fn new(driver: Arc<dyn Driver>, locator: Arc<Locator>, context: DiagnosticContext) -> Self {
        Self {
            driver,
            locator,
            context,
        }
    }

    /// Returns the descriptor this handle was built from.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Returns the declared alias.
    #[inline]
    #[must_use]
    pub fn alias(&self) -> &str {
        self.locator.alias()
    }

    /// Returns the locator description without resolving.
    #[must_use]
    pub fn describe(&self) -> String {
        self.locator.describe()
    }

    /// Returns the diagnostic context this handle writes to.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &DiagnosticContext {
        &self.context
    }
}

// ============================================================================
// DeferredElement - Resolution
// ============================================================================

impl DeferredElement {
    /// Looks the element up now and records the narration.
    ///
    /// The narration is written whether or not the lookup succeeds, so
    /// failure messages can name the element.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLocator`](crate::Error::InvalidLocator) before any
    ///   driver call if the descriptor is malformed
    /// - whatever the driver returns, unchanged
    pub async fn resolve(&self) -> Result<Box<dyn Element>> {
        let outcome = self.lookup().await;
        self.context
            .record(self.locator.display_alias(), self.locator.describe());
        outcome
    }

    async fn lookup(&self) -> Result<Box<dyn Element>> {
        let by = self.locator.by().inspect_err(|e| {
            warn!(alias = self.locator.alias(), error = %e, "Unsupported locator type");
        })?;
        debug!(alias = self.locator.alias(), locator = %by, "Resolving element");
        self.driver.find_element(&by).await
    }
}

// ============================================================================
// DeferredElement - Element
// ============================================================================

#[async_trait]
impl Element for DeferredElement {
    async fn text(&self) -> Result<String> {
        self.resolve().await?.text().await
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.resolve().await?.attribute(name).await
    }

    async fn click(&self) -> Result<()> {
        self.resolve().await?.click().await
    }

    async fn send_keys(&self, value: &str) -> Result<()> {
        self.resolve().await?.send_keys(value).await
    }

    async fn clear(&self) -> Result<()> {
        self.resolve().await?.clear().await
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.resolve().await?.is_displayed().await
    }

    async fn is_enabled(&self) -> Result<bool> {
        self.resolve().await?.is_enabled().await
    }

    async fn location(&self) -> Result<Point> {
        self.resolve().await?.location().await
    }

    async fn size(&self) -> Result<Size> {
        self.resolve().await?.size().await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::{MockDriver, MockElement};
    use crate::error::Error;
    use crate::locator::{By, FindBy};

    fn handle(driver: &MockDriver, locator: Locator) -> DeferredElement {
        DeferredElement::new(
            Arc::new(driver.clone()),
            Arc::new(locator),
            DiagnosticContext::new(),
        )
    }

    #[tokio::test]
    async fn test_click_resolves_once_and_narrates() {
        let driver = MockDriver::new();
        let by = By::accessibility_id("SIGN IN");
        let button = driver.place(by.clone(), MockElement::new());
        let sign_in = handle(&driver, Locator::accessibility("SIGN IN", "Sign In button"));

        sign_in.click().await.unwrap();

        assert_eq!(button.clicks(), 1);
        assert_eq!(driver.lookups(), vec![by]);
        let narration = sign_in.context().read();
        assert_eq!(narration.alias(), "'Sign In button'");
        assert_eq!(narration.locator(), "Locator: accessibility-tag(\"SIGN IN\")");
    }

    #[tokio::test]
    async fn test_every_operation_resolves_fresh() {
        let driver = MockDriver::new();
        let by = By::xpath("//android.widget.EditText");
        driver.place(
            by.clone(),
            MockElement::new()
                .with_text("hello")
                .with_attribute("content-desc", "greeting")
                .at(5, 6)
                .sized(7, 8),
        );
        let field = handle(&driver, Locator::xpath("//android.widget.EditText", "Field"));

        assert_eq!(field.text().await.unwrap(), "hello");
        assert_eq!(
            field.attribute("content-desc").await.unwrap().as_deref(),
            Some("greeting")
        );
        field.clear().await.unwrap();
        field.send_keys("abc").await.unwrap();
        assert!(field.is_displayed().await.unwrap());
        assert!(field.is_enabled().await.unwrap());
        assert_eq!(field.location().await.unwrap(), Point::new(5, 6));
        assert_eq!(field.size().await.unwrap(), Size::new(7, 8));

        assert_eq!(driver.lookup_count(&by), 9);
    }

    #[tokio::test]
    async fn test_survives_screen_rebuild() {
        let driver = MockDriver::new();
        let by = By::id("com.app:id/next");
        driver.place(by.clone(), MockElement::new().with_text("Next"));
        let next = handle(&driver, Locator::id("com.app:id/next", "Next button"));

        assert_eq!(next.text().await.unwrap(), "Next");

        // Tree rebuilt after a gesture: the old node is gone.
        let rebuilt = driver.place(by, MockElement::new().with_text("Next"));
        next.click().await.unwrap();
        assert_eq!(rebuilt.clicks(), 1);
    }

    #[tokio::test]
    async fn test_invalid_locator_fails_before_driver_call() {
        let driver = MockDriver::new();
        let empty = handle(&driver, Locator::new(FindBy::new(), "Empty"));
        let double = handle(&driver, Locator::new(FindBy::new().id("a").xpath("//a"), "Double"));

        assert!(matches!(
            empty.click().await.unwrap_err(),
            Error::InvalidLocator { .. }
        ));
        assert!(matches!(
            double.text().await.unwrap_err(),
            Error::InvalidLocator { .. }
        ));
        assert_eq!(driver.total_lookups(), 0);
    }

    #[tokio::test]
    async fn test_not_found_propagates_and_still_narrates() {
        let driver = MockDriver::new();
        let missing = handle(&driver, Locator::xpath("//button", "Login button"));

        let err = missing.click().await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));

        let narration = missing.context().read();
        assert_eq!(narration.alias(), "'Login button'");
        assert!(narration.locator().contains("path-expression"));
        assert!(narration.locator().contains("//button"));
    }

    #[tokio::test]
    async fn test_display_never_resolves() {
        let driver = MockDriver::new();
        let missing = handle(&driver, Locator::xpath("//button", "Login button"));

        assert_eq!(missing.to_string(), "Locator: path-expression(\"//button\")");
        assert_eq!(missing.describe(), missing.to_string());
        let _ = format!("{missing:?}");

        assert_eq!(driver.total_lookups(), 0);
        assert!(missing.context().read().is_empty());
    }

    #[tokio::test]
    async fn test_delegated_error_propagates_unchanged() {
        let driver = MockDriver::new();
        let by = By::id("flaky");
        driver.place(by.clone(), MockElement::new());
        let flaky = handle(&driver, Locator::id("flaky", "Flaky"));

        let live = flaky.resolve().await.unwrap();
        driver.remove(&by);
        assert!(matches!(
            live.click().await.unwrap_err(),
            Error::StaleElement { .. }
        ));
    }
}
