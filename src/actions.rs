//! Step vocabulary for screens and flows.
//!
//! [`Actions`] wraps deferred element operations with bounded waits,
//! narration and step logging. Messages name the element by the alias the
//! handle narrated during the operation, so a failure reads
//! `Cannot find 'Sign In button' | Locator: accessibility-tag("SIGN IN")`
//! rather than an opaque driver error.
//!
//! | Method | Wait | Step on success | Step on failure |
//! |--------|------|-----------------|-----------------|
//! | [`find_element`](Actions::find_element) | element load | - | fail |
//! | [`is_element_displayed`](Actions::is_element_displayed) | element load | pass | fail |
//! | [`tap`](Actions::tap) | element load | pass | fail |
//! | [`write`](Actions::write) | small | pass | fail |
//! | [`write_secret`](Actions::write_secret) | small | pass | fail |
//! | [`long_press`](Actions::long_press) | element load | pass | fail |
//! | [`swipe`](Actions::swipe) | element load | pass | fail |
//! | [`scroll_to_element`](Actions::scroll_to_element) | none | pass | fail |
//! | [`scroll_to_end`](Actions::scroll_to_end) | none | info | warn |
//! | [`get_text`](Actions::get_text) | element load | - | fail |
//! | [`assert_element_text`](Actions::assert_element_text) | element load | pass | fail |
//! | [`dismiss_keyboard`](Actions::dismiss_keyboard) | none | info | warn |
//!
//! # Example
//!
//! ```ignore
//! let actions = session.actions();
//! actions.write(login.txt_username()?, "agent01").await?;
//! actions.write_secret(login.txt_password()?, "UEBzc3cwcmQ=").await?;
//! actions.tap(login.btn_sign_in()?).await?;
//! actions.assert_element_text(landing.hdr_whats_new()?, "What's New").await;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

use crate::config::HarnessOptions;
use crate::diagnostics::{DiagnosticContext, Narration};
use crate::driver::Driver;
use crate::element::{DeferredElement, Element};
use crate::error::{Error, Result};
use crate::gesture::{Direction, Gesture};
use crate::redact;
use crate::report::StepLog;

// ============================================================================
// Constants
// ============================================================================

/// Attribute Android exposes accessibility text under.
pub const CONTENT_DESC: &str = "content-desc";

/// Scroll swipes attempted before giving up on a scroll view.
pub const MAX_SCROLLS: usize = 20;

/// Window height fractions of the first scroll swipe.
const LARGE_SCROLL: (f64, f64) = (0.2, 0.8);

/// Window height fractions of every later scroll swipe.
const SMALL_SCROLL: (f64, f64) = (0.4, 0.6);

// ============================================================================
// Actions
// ============================================================================

/// Narrated, step-logged element actions for one session.
#[derive(Clone)]
pub struct Actions {
    driver: Arc<dyn Driver>,
    options: HarnessOptions,
    context: DiagnosticContext,
    steps: StepLog,
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Actions {
    /// Creates the action layer.
    pub fn new(
        driver: Arc<dyn Driver>,
        options: HarnessOptions,
        context: DiagnosticContext,
        steps: StepLog,
    ) -> Self {
        Self {
            driver,
            options,
            context,
            steps,
        }
    }

    /// Returns the step log actions record into.
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &StepLog {
        &self.steps
    }

    /// Returns the options in effect.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }
}

// ============================================================================
// Actions - Bounded Waits
// ============================================================================

impl Actions {
    /// Waits up to the element load wait for `element` to be visible.
    ///
    /// See [`find_element_within`](Self::find_element_within).
    pub async fn find_element(&self, element: &DeferredElement) -> Result<Box<dyn Element>> {
        self.find_element_within(element, self.options.element_load_wait)
            .await
    }

    /// Waits up to `timeout` for `element` to be visible.
    ///
    /// Returns the live element that passed the visibility check. A failed
    /// wait records a failed step.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if the element never became visible
    /// - [`Error::InvalidLocator`] or [`Error::Driver`] immediately, without
    ///   waiting out the timeout
    pub async fn find_element_within(
        &self,
        element: &DeferredElement,
        timeout: Duration,
    ) -> Result<Box<dyn Element>> {
        match self.wait_visible(element, timeout).await {
            Ok(live) => {
                info!("{} is visible", element.context().read().alias());
                Ok(live)
            }
            Err(e) => {
                let narration = element.context().read();
                error!(error = %e, "Cannot find {narration}");
                self.steps
                    .fail(format!("Cannot find {narration}"), &narration);
                Err(e)
            }
        }
    }

    /// Returns `true` if `element` becomes visible within the element load
    /// wait. Records a pass or fail step; never errors.
    pub async fn is_element_displayed(&self, element: &DeferredElement) -> bool {
        let outcome = self
            .wait_visible(element, self.options.element_load_wait)
            .await;
        let narration = element.context().read();

        match outcome {
            Ok(_) => {
                self.steps
                    .pass(format!("{} is displayed", narration.alias()), &narration);
                true
            }
            Err(e) => {
                error!(error = %e, "{} is not displayed | {}", narration.alias(), narration.locator());
                self.steps.fail(e.to_string(), &narration);
                false
            }
        }
    }

    async fn wait_visible(
        &self,
        element: &DeferredElement,
        timeout: Duration,
    ) -> Result<Box<dyn Element>> {
        // A timeout too large for the clock means no deadline.
        let deadline = Instant::now().checked_add(timeout);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match element.resolve().await {
                Ok(live) => match live.is_displayed().await {
                    Ok(true) => return Ok(live),
                    Ok(false) => {}
                    Err(e) if !e.is_recoverable() => return Err(e),
                    Err(_) => {}
                },
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(_) => {}
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        debug!(alias = element.alias(), attempts, "Visibility wait expired");
                        return Err(Error::timeout(
                            format!(
                                "waiting for {} to be visible",
                                element.locator().display_alias()
                            ),
                            millis(timeout),
                        ));
                    }
                    self.options.poll_interval.min(deadline - now)
                }
                None => self.options.poll_interval,
            };
            sleep(pause).await;
        }
    }
}

// ============================================================================
// Actions - Interactions
// ============================================================================

impl Actions {
    /// Waits for `element`, then taps it.
    ///
    /// # Errors
    ///
    /// As [`find_element`](Self::find_element), or the tap's own error.
    pub async fn tap(&self, element: &DeferredElement) -> Result<()> {
        let live = self.find_element(element).await?;
        self.step_result(element, live.click().await, |alias| {
            format!("Tapped on {alias}")
        })
    }

    /// Waits up to the small wait for `element`, then types `value`.
    ///
    /// # Errors
    ///
    /// As [`find_element_within`](Self::find_element_within), or the
    /// typing's own error.
    pub async fn write(&self, element: &DeferredElement, value: &str) -> Result<()> {
        let live = self
            .find_element_within(element, self.options.small_wait)
            .await?;
        self.step_result(element, live.send_keys(value).await, |alias| {
            format!("Entered '{value}' in {alias}")
        })
    }

    /// Decodes a base64 secret and types it. The plain value never reaches
    /// a log or step message.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] before any lookup if `encoded` is not base64,
    /// otherwise as [`write`](Self::write).
    pub async fn write_secret(&self, element: &DeferredElement, encoded: &str) -> Result<()> {
        let secret = redact::decode(encoded)?;
        let live = self
            .find_element_within(element, self.options.small_wait)
            .await?;
        self.step_result(element, live.send_keys(&secret).await, |alias| {
            format!("Entered ***** in {alias}")
        })
    }

    /// Hides the soft keyboard if it is shown; warns otherwise.
    ///
    /// # Errors
    ///
    /// Whatever the driver returns.
    pub async fn dismiss_keyboard(&self) -> Result<()> {
        let narration = self.context.read();
        if self.driver.is_keyboard_shown().await? {
            self.driver.hide_keyboard().await?;
            self.steps.info("Keyboard dismissed", &narration);
        } else {
            self.steps.warn("Keyboard was not displayed", &narration);
        }
        Ok(())
    }

    /// Sleeps for `duration`.
    pub async fn hard_wait(&self, duration: Duration) {
        info!(wait_ms = millis(duration), "Starting to wait");
        sleep(duration).await;
        debug!(wait_ms = millis(duration), "Wait finished");
    }

    fn step_result(
        &self,
        element: &DeferredElement,
        result: Result<()>,
        message: impl FnOnce(&str) -> String,
    ) -> Result<()> {
        let narration = element.context().read();
        match result {
            Ok(()) => {
                self.steps.pass(message(narration.alias()), &narration);
                Ok(())
            }
            Err(e) => {
                self.steps.fail(e.to_string(), &narration);
                Err(e)
            }
        }
    }
}

// ============================================================================
// Actions - Gestures
// ============================================================================

/// How a scroll search ended.
enum ScrollSearch {
    Found(usize),
    EndOfView,
    GaveUp,
}

impl Actions {
    /// Waits for `element`, then long presses its center.
    ///
    /// # Errors
    ///
    /// As [`find_element`](Self::find_element), or the gesture's own error.
    pub async fn long_press(&self, element: &DeferredElement) -> Result<()> {
        let live = self.find_element(element).await?;
        let result: Result<()> = async {
            let at = live.size().await?.center_from(live.location().await?);
            self.driver.perform(&Gesture::long_press(at)).await
        }
        .await;
        self.step_result(element, result, |alias| format!("Long pressed on {alias}"))
    }

    /// Waits for `element`, then swipes from its center towards
    /// `direction` by half its width.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDirection`] for a vertical direction, before any
    ///   lookup
    /// - as [`find_element`](Self::find_element), or the gesture's own error
    pub async fn swipe(&self, element: &DeferredElement, direction: Direction) -> Result<()> {
        if !direction.is_horizontal() {
            return self.reject(Error::invalid_direction(direction.as_str(), "left or right"));
        }

        let live = self.find_element(element).await?;
        let result: Result<()> = async {
            let gesture =
                Gesture::swipe_across(live.location().await?, live.size().await?, direction)?;
            self.driver.perform(&gesture).await
        }
        .await;
        if let Err(e) = &result {
            error!(error = %e, "Cannot swipe {direction} from {}", element.context().read());
        }
        self.step_result(element, result, |alias| format!("Swiped {direction} from {alias}"))
    }

    /// Scrolls the window until `element` is displayed.
    ///
    /// The first swipe covers most of the window, later ones are smaller.
    /// Stops with a failed step once the scroll view has no content left
    /// in `direction` or after [`MAX_SCROLLS`] swipes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDirection`] for a horizontal direction
    /// - [`Error::ElementNotFound`] if the element never came into view
    /// - [`Error::InvalidLocator`] or [`Error::Driver`] as they occur
    pub async fn scroll_to_element(
        &self,
        element: &DeferredElement,
        direction: Direction,
    ) -> Result<()> {
        if !direction.is_vertical() {
            return self.reject(Error::invalid_direction(direction.as_str(), "up or down"));
        }

        let outcome = self.scroll_until_displayed(element, direction).await;
        let narration = element.context().read();

        match outcome {
            Ok(ScrollSearch::Found(scrolls)) => {
                debug!(scrolls, "Scroll search finished");
                self.steps.pass(
                    format!("Scrolled {direction} to {}", narration.alias()),
                    &narration,
                );
                Ok(())
            }
            Ok(ScrollSearch::EndOfView) => {
                self.steps.fail(
                    format!(
                        "Reached the end of the scroll view, but {} is not found. {}",
                        narration.alias(),
                        narration.locator()
                    ),
                    &narration,
                );
                Err(Error::element_not_found(element.locator().describe()))
            }
            Ok(ScrollSearch::GaveUp) => {
                self.steps.fail(
                    format!(
                        "{} is still not displayed after {MAX_SCROLLS} scrolls {direction}. {}",
                        narration.alias(),
                        narration.locator()
                    ),
                    &narration,
                );
                Err(Error::element_not_found(element.locator().describe()))
            }
            Err(e) => {
                error!(error = %e, "Cannot scroll to {narration}");
                self.steps.fail(e.to_string(), &narration);
                Err(e)
            }
        }
    }

    /// Scrolls down until the scroll view has no content left.
    ///
    /// Records an info step, or a warning if content remained after
    /// [`MAX_SCROLLS`] swipes. Returns the number of swipes made.
    ///
    /// # Errors
    ///
    /// Whatever the driver returns.
    pub async fn scroll_to_end(&self) -> Result<usize> {
        let window = self.driver.window_size().await?;
        let gesture = Gesture::scroll(window, Direction::Down, LARGE_SCROLL.0, LARGE_SCROLL.1)?;

        let mut scrolls = 0;
        while self.driver.can_scroll(Direction::Down).await? {
            if scrolls == MAX_SCROLLS {
                self.steps.warn(
                    format!("Scroll view still has content after {MAX_SCROLLS} scrolls"),
                    &self.context.read(),
                );
                return Ok(scrolls);
            }
            self.driver.perform(&gesture).await?;
            scrolls += 1;
        }

        self.steps
            .info("Reached the end of the scroll view", &self.context.read());
        Ok(scrolls)
    }

    async fn scroll_until_displayed(
        &self,
        element: &DeferredElement,
        direction: Direction,
    ) -> Result<ScrollSearch> {
        if self.in_viewport(element).await? {
            return Ok(ScrollSearch::Found(0));
        }

        let window = self.driver.window_size().await?;
        let large = Gesture::scroll(window, direction, LARGE_SCROLL.0, LARGE_SCROLL.1)?;
        let small = Gesture::scroll(window, direction, SMALL_SCROLL.0, SMALL_SCROLL.1)?;

        for scrolls in 0..MAX_SCROLLS {
            if !self.driver.can_scroll(direction).await? {
                return Ok(ScrollSearch::EndOfView);
            }
            if scrolls == 0 {
                warn!(
                    "{} is not in current viewport, scrolling {direction}",
                    element.alias()
                );
                self.driver.perform(&large).await?;
            } else {
                warn!(
                    "{} is still not in current viewport, performing smaller scrolls {direction}",
                    element.alias()
                );
                self.driver.perform(&small).await?;
            }
            if self.in_viewport(element).await? {
                return Ok(ScrollSearch::Found(scrolls + 1));
            }
        }

        Ok(ScrollSearch::GaveUp)
    }

    /// One visibility check. Missing and stale elements count as off screen.
    async fn in_viewport(&self, element: &DeferredElement) -> Result<bool> {
        match element.is_displayed().await {
            Ok(displayed) => Ok(displayed),
            Err(e) if e.is_recoverable() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Records `err` as a failed step against the current narration.
    fn reject(&self, err: Error) -> Result<()> {
        let narration = self.context.read();
        error!(error = %err, "Rejected gesture for {narration}");
        self.steps.fail(err.to_string(), &narration);
        Err(err)
    }
}

// ============================================================================
// Actions - Reads
// ============================================================================

impl Actions {
    /// Waits for `element`, then reads its text.
    ///
    /// # Errors
    ///
    /// As [`find_element`](Self::find_element), or the read's own error.
    pub async fn get_text(&self, element: &DeferredElement) -> Result<String> {
        let live = self.find_element(element).await?;
        let text = live.text().await?;
        info!("Retrieved text: '{text}' for element: {}", element.context().read().alias());
        Ok(text)
    }

    /// Waits for `element`, then reads an attribute. `None` if the element
    /// does not expose it.
    ///
    /// # Errors
    ///
    /// As [`find_element`](Self::find_element), or the read's own error.
    pub async fn get_attribute(
        &self,
        element: &DeferredElement,
        name: &str,
    ) -> Result<Option<String>> {
        let live = self.find_element(element).await?;
        let value = live.attribute(name).await?;
        info!(
            attribute = name,
            value = value.as_deref().unwrap_or_default(),
            "Retrieved attribute for element: {}",
            element.context().read().alias()
        );
        Ok(value)
    }

    /// Reads the `content-desc` attribute.
    ///
    /// # Errors
    ///
    /// As [`get_attribute`](Self::get_attribute).
    pub async fn content_description(&self, element: &DeferredElement) -> Result<Option<String>> {
        self.get_attribute(element, CONTENT_DESC).await
    }
}

// ============================================================================
// Actions - Assertions
// ============================================================================

impl Actions {
    /// Waits for `element` and asserts it shows `expected`.
    ///
    /// Reads the text first and falls back to `content-desc` if the text
    /// is empty or cannot be read. Records a pass or fail step and returns
    /// whether the assertion held; never errors.
    pub async fn assert_element_text(&self, element: &DeferredElement, expected: &str) -> bool {
        let actual = match self.find_element(element).await {
            Ok(live) => text_or_description(live.as_ref(), element.alias()).await,
            Err(e) => Err(e),
        };

        match actual {
            Ok(actual) => self.assert_value(actual, expected),
            Err(e) => {
                let narration = element.context().read();
                error!(error = %e, "Could not retrieve text for {narration}");
                self.steps.fail(
                    format!(
                        "Unable to retrieve text or attribute: '{CONTENT_DESC}' from element - {}",
                        narration.alias()
                    ),
                    &narration,
                );
                false
            }
        }
    }

    /// Compares two values and records a pass or fail step against the
    /// current narration. Never panics.
    pub fn assert_value<A, E>(&self, actual: A, expected: E) -> bool
    where
        A: PartialEq<E> + Display,
        E: Display,
    {
        let narration = self.context.read();
        if actual == expected {
            self.steps.pass(
                format!("Assertion passed: expected [{expected}] and found [{actual}]"),
                &narration,
            );
            true
        } else {
            self.steps.fail(
                format!("Assertion failed: expected [{expected}] but found [{actual}]"),
                &narration,
            );
            false
        }
    }

    /// Compares `actual` line by line against `expected`.
    ///
    /// Lines beyond `expected` are logged as warnings and ignored. Missing
    /// lines fail. Returns `true` if every expected line matched.
    pub fn assert_lines(&self, actual: &str, expected: &[&str]) -> bool {
        let lines: Vec<&str> = actual.lines().collect();
        let mut all_passed = true;

        for (i, line) in lines.iter().enumerate() {
            match expected.get(i) {
                Some(want) => all_passed &= self.assert_value(*line, *want),
                None => {
                    let narration = self.context.read();
                    warn!(line = *line, "Additional line found for {narration}");
                }
            }
        }

        for want in expected.iter().skip(lines.len()) {
            all_passed &= self.assert_value("", *want);
        }

        all_passed
    }

    /// Returns the session's current narration.
    #[must_use]
    pub fn narration(&self) -> Narration {
        self.context.read()
    }
}

async fn text_or_description(live: &dyn Element, alias: &str) -> Result<String> {
    match live.text().await {
        Ok(text) if !text.is_empty() => return Ok(text),
        Ok(_) => warn!(alias, "Text was empty, reading {CONTENT_DESC}"),
        Err(e) => warn!(alias, error = %e, "Text read failed, reading {CONTENT_DESC}"),
    }
    Ok(live.attribute(CONTENT_DESC).await?.unwrap_or_default())
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================
