//! Nested JSON test data.
//!
//! # Example
//!
//! ```ignore
//! let data = TestData::from_json_file("testdata/login.json")?;
//! let username = data.get(&["users", "agent", "username"])?;
//! let password = redact::decode(data.get(&["users", "agent", "password"])?)?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// TestData
// ============================================================================

/// A parsed JSON document of test inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TestData {
    root: Value,
}

impl TestData {
    /// Wraps an already parsed document.
    #[inline]
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// [`Error::Json`] if `json` is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Reads and parses a document.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Json`] if it is
    /// malformed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loaded test data");
        Self::from_json_str(&json)
    }

    /// Returns the document root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walks `keys` through nested objects and returns the final string.
    ///
    /// # Errors
    ///
    /// [`Error::TestData`] if no keys are given, an intermediate key is
    /// missing or not an object, or the last key is missing or not a string.
    pub fn get(&self, keys: &[&str]) -> Result<&str> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(Error::test_data("no keys given"));
        };

        let mut current = &self.root;
        for key in parents {
            current = current
                .get(key)
                .filter(|v| v.is_object())
                .ok_or_else(|| {
                    Error::test_data(format!("Key '{key}' not found or is not a JSON object"))
                })?;
        }

        current
            .get(last)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::test_data(format!("Key '{last}' not found or is not a String")))
    }
}

// ============================================================================
// Tests
// ============================================================================
