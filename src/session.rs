//! One automation session.
//!
//! A [`Session`] owns everything that must not leak between two test runs
//! sharing a process: the driver handle, the diagnostic context and the
//! step log. Screens initialised through one session narrate only into
//! that session's context.
//!
//! # Example
//!
//! ```ignore
//! let session = Session::with_options(driver, HarnessOptions::from_json_file("harness.json")?)?;
//!
//! let mut login = LoginScreen::new();
//! session.init(&mut login);
//!
//! let actions = session.actions();
//! actions.tap(login.btn_sign_in()?).await?;
//!
//! session.finish()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{info, warn};

use crate::actions::Actions;
use crate::config::HarnessOptions;
use crate::diagnostics::{DiagnosticContext, Narration};
use crate::driver::Driver;
use crate::error::Result;
use crate::identifiers::SessionId;
use crate::processor::{BindSummary, Processor};
use crate::report::StepLog;
use crate::screen::Screen;

// ============================================================================
// Session
// ============================================================================

/// Driver, context and step log of one test run.
#[derive(Clone)]
pub struct Session {
    id: SessionId,
    driver: Arc<dyn Driver>,
    options: HarnessOptions,
    context: DiagnosticContext,
    steps: StepLog,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Constructors
// ============================================================================

impl Session {
    /// Creates a session with default options.
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self::build(driver, HarnessOptions::default())
    }

    /// Creates a session with `options`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if the options are invalid.
    pub fn with_options(driver: Arc<dyn Driver>, options: HarnessOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(driver, options))
    }

    fn build(driver: Arc<dyn Driver>, options: HarnessOptions) -> Self {
        let id = SessionId::next();
        info!(session_id = %id, "Session started");
        Self {
            id,
            driver,
            steps: StepLog::from_options(&options),
            options,
            context: DiagnosticContext::new(),
        }
    }
}

// ============================================================================
// Session - Accessors
// ============================================================================

impl Session {
    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the options in effect.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &HarnessOptions {
        &self.options
    }

    /// Returns the shared driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Returns this session's diagnostic context.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &DiagnosticContext {
        &self.context
    }

    /// Returns this session's step log.
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &StepLog {
        &self.steps
    }

    /// Returns the most recently touched element.
    #[must_use]
    pub fn narration(&self) -> Narration {
        self.context.read()
    }
}

// ============================================================================
// Session - Screens & Actions
// ============================================================================

impl Session {
    /// Returns a processor bound to this session.
    #[must_use]
    pub fn processor(&self) -> Processor {
        Processor::new(Arc::clone(&self.driver), self.context.clone())
    }

    /// Binds a fresh handle into every declared slot of `screen`.
    pub fn init<S: Screen + ?Sized>(&self, screen: &mut S) -> BindSummary {
        let summary = self.processor().process(screen);
        if summary.is_complete() {
            info!(
                session_id = %self.id,
                screen = screen.definition().name(),
                bound = summary.bound.len(),
                "Screen initialised"
            );
        } else {
            warn!(
                session_id = %self.id,
                screen = screen.definition().name(),
                bound = summary.bound.len(),
                failed = summary.failed.len(),
                "Screen partially initialised"
            );
        }
        summary
    }

    /// Returns the action layer for this session.
    #[must_use]
    pub fn actions(&self) -> Actions {
        Actions::new(
            Arc::clone(&self.driver),
            self.options.clone(),
            self.context.clone(),
            self.steps.clone(),
        )
    }

    /// Checks the step log against the configured limits.
    ///
    /// # Errors
    ///
    /// [`Error::StepLimitExceeded`](crate::Error::StepLimitExceeded) if a
    /// limit was exceeded.
    pub fn finish(&self) -> Result<()> {
        let verdict = self.steps.verdict();
        info!(
            session_id = %self.id,
            failures = self.steps.failures(),
            warnings = self.steps.warnings(),
            passed = verdict.is_ok(),
            "Session finished"
        );
        verdict
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use crate::driver::{MockDriver, MockElement};
    use crate::element::Element;
    use crate::error::Error;
    use crate::locator::{By, Locator};
    use crate::screen::{PageObject, ScreenDefinition};

    fn login_page() -> PageObject {
        PageObject::new(
            ScreenDefinition::builder("Login")
                .slot("btn_sign_in", Locator::accessibility("SIGN IN", "Sign In button"))
                .slot("lnk_forgot", Locator::accessibility("Forgot?", "Forgot password link"))
                .build(),
        )
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let driver: Arc<dyn Driver> = Arc::new(MockDriver::new());
        let a = Session::new(Arc::clone(&driver));
        let b = Session::new(driver);
        assert_ne!(a.id(), b.id());
        assert!(!a.context().same_as(b.context()));
    }

    #[test]
    fn test_with_invalid_options() {
        let options = HarnessOptions::new().with_poll_interval(Duration::ZERO);
        let err = Session::with_options(Arc::new(MockDriver::new()), options).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_init_binds_into_session_context() {
        let session = Session::new(Arc::new(MockDriver::new()));
        let mut page = login_page();

        let summary = session.init(&mut page);

        assert!(summary.is_complete());
        assert!(
            page.element("btn_sign_in")
                .unwrap()
                .context()
                .same_as(session.context())
        );
    }

    #[test]
    fn test_narration_isolated_between_sessions() {
        let driver = MockDriver::new();
        driver.place(By::accessibility_id("SIGN IN"), MockElement::new());
        driver.place(By::accessibility_id("Forgot?"), MockElement::new());

        let first = Session::new(Arc::new(driver.clone()));
        let second = Session::new(Arc::new(driver.clone()));
        let mut first_page = login_page();
        let mut second_page = login_page();
        first.init(&mut first_page);
        second.init(&mut second_page);

        tokio_test::block_on(async {
            first_page.element("btn_sign_in").unwrap().click().await.unwrap();
            second_page.element("lnk_forgot").unwrap().click().await.unwrap();
        });

        assert_eq!(first.narration().alias(), "'Sign In button'");
        assert_eq!(second.narration().alias(), "'Forgot password link'");
    }

    #[tokio::test]
    async fn test_actions_share_session_step_log() {
        let driver = MockDriver::new();
        driver.place(By::accessibility_id("SIGN IN"), MockElement::new());
        let session = Session::new(Arc::new(driver));
        let mut page = login_page();
        session.init(&mut page);

        session
            .actions()
            .tap(page.element("btn_sign_in").unwrap())
            .await
            .unwrap();

        assert_eq!(session.steps().steps().len(), 1);
        assert!(session.finish().is_ok());
    }

    #[test]
    fn test_finish_reports_exceeded_limit() {
        let options = HarnessOptions::new().with_max_step_failures(0);
        let session = Session::with_options(Arc::new(MockDriver::new()), options).unwrap();

        session.actions().assert_value(1, 2);

        assert!(matches!(
            session.finish().unwrap_err(),
            Error::StepLimitExceeded { .. }
        ));
    }
}
