//! Locator descriptors: how to find one element, plus a human label.
//!
//! A [`FindBy`] mirrors the shape of a find-by annotation: one optional
//! value per strategy. Exactly one must be set. The check happens in
//! [`FindBy::by`], so a malformed descriptor can still be written into a
//! screen definition and will fail on first use instead of at compile time.
//!
//! # Example
//!
//! ```ignore
//! use screen_objects::{FindBy, Locator};
//!
//! let sign_in = Locator::new(FindBy::new().accessibility("SIGN IN"), "Sign In button");
//! assert_eq!(sign_in.describe(), "Locator: accessibility-tag(\"SIGN IN\")");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::strategy::{By, Strategy};

/// Description used when a descriptor has no usable strategy.
const UNSUPPORTED_DESCRIPTION: &str = "Unsupported locator type";

// ============================================================================
// FindBy
// ============================================================================

/// Raw strategy values of a descriptor.
///
/// Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FindBy {
    /// Resource identifier.
    pub id: String,
    /// XPath expression.
    pub xpath: String,
    /// Accessibility ID.
    pub accessibility: String,
    /// Widget class name.
    pub class_name: String,
    /// Platform query.
    pub custom: String,
    /// Tag name.
    pub tag_name: String,
}

impl FindBy {
    /// Creates an empty (invalid) descriptor body.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource identifier.
    #[inline]
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the XPath expression.
    #[inline]
    #[must_use]
    pub fn xpath(mut self, expr: impl Into<String>) -> Self {
        self.xpath = expr.into();
        self
    }

    /// Sets the accessibility ID.
    #[inline]
    #[must_use]
    pub fn accessibility(mut self, tag: impl Into<String>) -> Self {
        self.accessibility = tag.into();
        self
    }

    /// Sets the widget class name.
    #[inline]
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    /// Sets the platform query.
    #[inline]
    #[must_use]
    pub fn custom(mut self, query: impl Into<String>) -> Self {
        self.custom = query.into();
        self
    }

    /// Sets the tag name.
    #[inline]
    #[must_use]
    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = tag.into();
        self
    }

    /// Returns the value stored for a strategy.
    #[must_use]
    pub fn get(&self, strategy: Strategy) -> &str {
        match strategy {
            Strategy::Identifier => &self.id,
            Strategy::PathExpression => &self.xpath,
            Strategy::AccessibilityTag => &self.accessibility,
            Strategy::ClassName => &self.class_name,
            Strategy::CustomQuery => &self.custom,
            Strategy::TagName => &self.tag_name,
        }
    }

    /// Returns the strategies that carry a non-empty value.
    #[must_use]
    pub fn populated(&self) -> Vec<Strategy> {
        Strategy::ALL
            .into_iter()
            .filter(|s| !self.get(*s).is_empty())
            .collect()
    }

    /// Validates the body and returns the single lookup it describes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLocator`] if zero or more than one strategy is set.
    pub fn by(&self) -> Result<By> {
        match self.populated().as_slice() {
            [strategy] => Ok(By::from_parts(*strategy, self.get(*strategy))),
            [] => Err(Error::invalid_locator(format!(
                "no strategy value set; pass exactly one of: {}",
                strategy_list()
            ))),
            many => Err(Error::invalid_locator(format!(
                "{} strategy values set ({}); pass exactly one",
                many.len(),
                many.iter()
                    .map(|s| s.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// Comma-separated labels of every strategy.
fn strategy_list() -> String {
    Strategy::ALL
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Locator
// ============================================================================

/// Immutable description of one screen element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locator {
    find_by: FindBy,
    #[serde(default)]
    alias: String,
}

impl Locator {
    /// Creates a descriptor. Validation is deferred to first resolution.
    #[must_use]
    pub fn new(find_by: FindBy, alias: impl Into<String>) -> Self {
        Self {
            find_by,
            alias: alias.into(),
        }
    }

    /// Creates a descriptor and validates it immediately.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLocator`] if the body does not carry exactly one
    /// strategy value.
    pub fn try_new(find_by: FindBy, alias: impl Into<String>) -> Result<Self> {
        let locator = Self::new(find_by, alias);
        locator.validate()?;
        Ok(locator)
    }

    /// Identifier descriptor.
    #[must_use]
    pub fn id(value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(FindBy::new().id(value), alias)
    }

    /// XPath descriptor.
    #[must_use]
    pub fn xpath(value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(FindBy::new().xpath(value), alias)
    }

    /// Accessibility ID descriptor.
    #[must_use]
    pub fn accessibility(value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(FindBy::new().accessibility(value), alias)
    }

    /// Class name descriptor.
    #[must_use]
    pub fn class_name(value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(FindBy::new().class_name(value), alias)
    }

    /// Platform query descriptor.
    #[must_use]
    pub fn custom(value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(FindBy::new().custom(value), alias)
    }

    /// Tag name descriptor.
    #[must_use]
    pub fn tag_name(value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::new(FindBy::new().tag_name(value), alias)
    }

    /// Returns the raw strategy values.
    #[inline]
    #[must_use]
    pub fn find_by(&self) -> &FindBy {
        &self.find_by
    }

    /// Returns the alias as declared (possibly empty).
    #[inline]
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the validated lookup.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLocator`] for a malformed descriptor.
    #[inline]
    pub fn by(&self) -> Result<By> {
        self.find_by.by()
    }

    /// Checks the descriptor without building a lookup.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLocator`] for a malformed descriptor.
    pub fn validate(&self) -> Result<()> {
        self.by().map(|_| ())
    }

    /// Returns `Locator: strategy("value")`. The alias is not included.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.by() {
            Ok(by) => format!("Locator: {by}"),
            Err(_) => UNSUPPORTED_DESCRIPTION.to_string(),
        }
    }

    /// Returns the alias as shown in narration: single-quoted, falling
    /// back to the description when the alias is empty.
    #[must_use]
    pub fn display_alias(&self) -> String {
        if self.alias.is_empty() {
            format!("'{}'", self.describe())
        } else {
            format!("'{}'", self.alias)
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ============================================================================
// Tests
// ============================================================================
