//! Screen objects - declarative page objects for mobile UI automation.
//!
//! Screens declare their elements as named slots, each carrying a locator
//! and a human-readable alias. A processor binds a lazily-resolved handle
//! into every slot. Handles never cache an element: each operation looks
//! the element up again, records what it touched in the session's
//! diagnostic context, then forwards the call.
//!
//! # Architecture
//!
//! - **Screen** declares slots ([`screen!`] or a hand-written [`Screen`])
//! - **Processor** binds one [`DeferredElement`] per slot, without lookups
//! - **DeferredElement** resolves through the [`Driver`] on every call
//! - **DiagnosticContext** holds the last touched element, per session
//! - **Actions** turn outcomes into narrated [`Step`]s
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use screen_objects::{screen, Locator, Result, Session};
//!
//! screen! {
//!     pub struct LoginScreen {
//!         txt_username => Locator::xpath("//android.widget.EditText[1]", "Username textfield"),
//!         btn_sign_in => Locator::accessibility("SIGN IN", "Sign In button"),
//!     }
//! }
//!
//! async fn login(session: &Session) -> Result<()> {
//!     let mut login = LoginScreen::new();
//!     session.init(&mut login);
//!
//!     let actions = session.actions();
//!     actions.write(login.txt_username()?, "agent01").await?;
//!     actions.tap(login.btn_sign_in()?).await?;
//!
//!     session.finish()
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`locator`] | Strategies and locator descriptors |
//! | [`screen`] | Screen definitions, [`screen!`], [`PageObject`] |
//! | [`processor`] | Binds handles into screens |
//! | [`element`] | [`Element`] capability and [`DeferredElement`] |
//! | [`diagnostics`] | Session-scoped narration register |
//! | [`driver`] | [`Driver`] seam and in-memory [`MockDriver`] |
//! | [`session`] | Per-run driver, context and step log |
//! | [`actions`] | Narrated, step-logged element actions |
//! | [`gesture`] | Touch gestures and directions |
//! | [`report`] | Step log and limits |
//! | [`config`] | Waits and limits |
//! | [`testdata`] | Nested JSON inputs |
//! | [`redact`] | Base64 secrets |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Session and element IDs |

// ============================================================================
// Modules
// ============================================================================

/// Narrated, step-logged element actions.
pub mod actions;

/// Harness waits and step limits.
pub mod config;

/// Session-scoped "last touched element" register.
pub mod diagnostics;

/// Automation backend seam.
///
/// Implement [`Driver`] to plug in a real device connection.
pub mod driver;

/// Element capability and deferred handles.
pub mod element;

/// Touch gestures.
pub mod gesture;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
pub mod identifiers;

/// Locator strategies and descriptors.
pub mod locator;

/// Binds deferred handles into screens.
pub mod processor;

/// Base64 helpers for secrets.
pub mod redact;

/// Step log.
pub mod report;

/// Screen definitions and page objects.
pub mod screen;

/// One automation session.
pub mod session;

/// Nested JSON test data.
pub mod testdata;

// ============================================================================
// Re-exports
// ============================================================================

// Actions
pub use actions::Actions;

// Configuration
pub use config::HarnessOptions;

// Diagnostics
pub use diagnostics::{DiagnosticContext, Narration};

// Driver types
pub use driver::{Driver, MockDriver, MockElement};

// Element types
pub use element::{DeferredElement, Element, Point, Size};

// Error types
pub use error::{Error, Result};

// Gestures
pub use gesture::{Direction, Gesture};

// Identifier types
pub use identifiers::{ElementId, SessionId};

// Locator types
pub use locator::{By, FindBy, Locator, Strategy};

// Processing
pub use processor::{BindSummary, Processor};

// Reporting
pub use report::{Step, StepLog, StepReport, StepStatus};

// Screen types
pub use screen::{PageObject, Screen, ScreenBuilder, ScreenDefinition};

// Session
pub use session::Session;

// Test data
pub use testdata::TestData;
