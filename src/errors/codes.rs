use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome category, encoded as the leading digit of a descriptor code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// `0xx`
    Success,

    /// `1xx` malformed or missing request input
    Input,

    /// `2xx` type conversion, token and cookie handling
    TypeConversion,

    /// `3xx` middleware rejections such as missing login
    Middleware,

    /// `4xx` database and storage failures
    Storage,

    /// `5xx` downstream service communication
    Communication,

    /// `6xx` business logic failures
    Logical,

    /// `9xx` anything that could not be classified
    Unclassified,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Input => write!(f, "INPUT"),
            Self::TypeConversion => write!(f, "TYPE_CONVERSION"),
            Self::Middleware => write!(f, "MIDDLEWARE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Communication => write!(f, "COMMUNICATION"),
            Self::Logical => write!(f, "LOGICAL"),
            Self::Unclassified => write!(f, "UNCLASSIFIED"),
        }
    }
}

impl ErrorCategory {
    /// Category of a code. Digits with no assigned category (7, 8, negative
    /// and out of range codes) fall into `Unclassified`.
    pub fn from_code(code: i16) -> Self {
        match code {
            0..=99 => Self::Success,
            100..=199 => Self::Input,
            200..=299 => Self::TypeConversion,
            300..=399 => Self::Middleware,
            400..=499 => Self::Storage,
            500..=599 => Self::Communication,
            600..=699 => Self::Logical,
            _ => Self::Unclassified,
        }
    }
}
