use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

use super::catalog;
use super::codes::ErrorCategory;

/// A normalized outcome: numeric code plus human-readable message.
///
/// Catalog entries are `const` and borrow their message; descriptors built
/// at runtime (the unclassified fallback) own theirs. The type is also an
/// error so it can be returned from fallible code and classified later by
/// [`normalize`](super::normalize).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("error: code={code}, msg={message}")]
pub struct ErrorDescriptor {
    code: i16,
    #[serde(rename = "msg")]
    message: Cow<'static, str>,
}

impl ErrorDescriptor {
    pub const fn new(code: i16, message: &'static str) -> Self {
        Self {
            code,
            message: Cow::Borrowed(message),
        }
    }

    pub fn code(&self) -> i16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Copy of this descriptor carrying a different message
    pub fn with_message(&self, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: self.code,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code)
    }

    /// Specific error number within the category (`00` is unspecified)
    pub fn detail(&self) -> i16 {
        self.code.rem_euclid(100)
    }

    pub fn is_ok(&self) -> bool {
        self.code == catalog::OK.code
    }
}

impl Default for ErrorDescriptor {
    fn default() -> Self {
        catalog::OK
    }
}
