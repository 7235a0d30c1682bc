//! Element locator strategies.
//!
//! Provides Appium-like `By` selectors for finding elements on a device
//! screen.
//!
//! # Example
//!
//! ```ignore
//! use screen_objects::By;
//!
//! // Resource identifier
//! let by = By::id("com.example:id/sign_in");
//!
//! // XPath over the accessibility tree
//! let by = By::xpath("//android.widget.Button[@text='Next']");
//!
//! // Accessibility ID (content-desc on Android, name on iOS)
//! let by = By::accessibility_id("SIGN IN");
//!
//! // Platform query (UiAutomator, iOS predicate string)
//! let by = By::custom("new UiSelector().text(\"Verify\")");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Strategy
// ============================================================================

/// Closed set of lookup strategies a locator can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Resource identifier.
    Identifier,
    /// XPath expression over the accessibility tree.
    PathExpression,
    /// Accessibility ID.
    AccessibilityTag,
    /// Widget class name.
    ClassName,
    /// Platform-specific query (UiAutomator, iOS predicate, class chain).
    CustomQuery,
    /// Tag name.
    TagName,
}

impl Strategy {
    /// Every strategy, in the order a descriptor is checked.
    pub const ALL: [Strategy; 6] = [
        Self::Identifier,
        Self::PathExpression,
        Self::AccessibilityTag,
        Self::ClassName,
        Self::CustomQuery,
        Self::TagName,
    ];

    /// Returns the human-readable label used in narration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::PathExpression => "path-expression",
            Self::AccessibilityTag => "accessibility-tag",
            Self::ClassName => "class-name",
            Self::CustomQuery => "custom-query",
            Self::TagName => "tag-name",
        }
    }

    /// Returns the strategy name for the automation protocol.
    #[must_use]
    pub const fn protocol_name(self) -> &'static str {
        match self {
            Self::Identifier => "id",
            Self::PathExpression => "xpath",
            Self::AccessibilityTag => "accessibility id",
            Self::ClassName => "class name",
            Self::CustomQuery => "-custom query",
            Self::TagName => "tag name",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// By Enum
// ============================================================================

/// A validated lookup: one strategy and its value.
///
/// Produced from a [`FindBy`](super::FindBy) once it has been checked to
/// carry exactly one strategy value. Drivers receive this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// Resource identifier.
    #[serde(rename = "id")]
    Id(String),

    /// XPath expression.
    ///
    /// # Example
    /// ```ignore
    /// By::XPath("//android.widget.TextView[@text='Sign In']".into())
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Accessibility ID.
    #[serde(rename = "accessibility id")]
    AccessibilityId(String),

    /// Widget class name.
    ///
    /// # Example
    /// ```ignore
    /// By::ClassName("android.widget.EditText".into())
    /// ```
    #[serde(rename = "class name")]
    ClassName(String),

    /// Platform-specific query.
    #[serde(rename = "-custom query")]
    Custom(String),

    /// Tag name.
    #[serde(rename = "tag name")]
    TagName(String),
}

impl By {
    /// Creates an identifier selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an accessibility ID selector.
    #[inline]
    pub fn accessibility_id(tag: impl Into<String>) -> Self {
        Self::AccessibilityId(tag.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// Creates a platform query selector.
    #[inline]
    pub fn custom(query: impl Into<String>) -> Self {
        Self::Custom(query.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::TagName(tag.into())
    }

    /// Builds a selector from a strategy and value.
    #[must_use]
    pub fn from_parts(strategy: Strategy, value: impl Into<String>) -> Self {
        let value = value.into();
        match strategy {
            Strategy::Identifier => Self::Id(value),
            Strategy::PathExpression => Self::XPath(value),
            Strategy::AccessibilityTag => Self::AccessibilityId(value),
            Strategy::ClassName => Self::ClassName(value),
            Strategy::CustomQuery => Self::Custom(value),
            Strategy::TagName => Self::TagName(value),
        }
    }

    /// Returns the lookup strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Id(_) => Strategy::Identifier,
            Self::XPath(_) => Strategy::PathExpression,
            Self::AccessibilityId(_) => Strategy::AccessibilityTag,
            Self::ClassName(_) => Strategy::ClassName,
            Self::Custom(_) => Strategy::CustomQuery,
            Self::TagName(_) => Strategy::TagName,
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::XPath(v)
            | Self::AccessibilityId(v)
            | Self::ClassName(v)
            | Self::Custom(v)
            | Self::TagName(v) => v,
        }
    }
}

impl fmt::Display for By {
    /// Formats as `strategy-label("value")`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.strategy().label(), self.value())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_xpath() {
        let by = By::XPath("//button".to_string());
        assert_eq!(by.strategy(), Strategy::PathExpression);
        assert_eq!(by.value(), "//button");
    }

    #[test]
    fn test_by_accessibility_id() {
        let by = By::accessibility_id("SIGN IN");
        assert_eq!(by.strategy().protocol_name(), "accessibility id");
        assert_eq!(by.to_string(), "accessibility-tag(\"SIGN IN\")");
    }

    #[test]
    fn test_from_parts_matches_constructors() {
        for strategy in Strategy::ALL {
            let by = By::from_parts(strategy, "v");
            assert_eq!(by.strategy(), strategy);
            assert_eq!(by.value(), "v");
        }
    }

    #[test]
    fn test_builder_methods() {
        assert!(matches!(By::id("x"), By::Id(_)));
        assert!(matches!(By::xpath("//div"), By::XPath(_)));
        assert!(matches!(By::class_name("Button"), By::ClassName(_)));
        assert!(matches!(By::custom("q"), By::Custom(_)));
        assert!(matches!(By::tag_name("t"), By::TagName(_)));
    }

    #[test]
    fn test_serde_layout() {
        let json = serde_json::to_value(By::xpath("//a")).unwrap();
        assert_eq!(json, serde_json::json!({"strategy": "xpath", "value": "//a"}));

        let back: By = serde_json::from_value(json).unwrap();
        assert_eq!(back, By::xpath("//a"));
    }

    #[test]
    fn test_strategy_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            Strategy::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), Strategy::ALL.len());
    }
}
