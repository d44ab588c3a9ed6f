//! Built-in descriptors.
//!
//! Codes follow the `CDD` convention: `C` is the [`ErrorCategory`] digit and
//! `DD` the specific error within it, `00` being reserved.
//!
//! [`ErrorCategory`]: super::ErrorCategory

use super::descriptor::ErrorDescriptor;

pub const OK: ErrorDescriptor = ErrorDescriptor::new(0, "success");
pub const UNKNOWN: ErrorDescriptor = ErrorDescriptor::new(900, "unknown error");

pub const INPUT_HEADER: ErrorDescriptor = ErrorDescriptor::new(101, "input header error");
pub const INPUT_BODY: ErrorDescriptor = ErrorDescriptor::new(102, "input body error");
pub const INPUT_TOKEN: ErrorDescriptor = ErrorDescriptor::new(103, "input token error");
pub const INPUT_COOKIE: ErrorDescriptor = ErrorDescriptor::new(104, "input cookie error");

pub const TYPE_CONVERSION: ErrorDescriptor = ErrorDescriptor::new(201, "type conversion error");
pub const PARSE_TOKEN: ErrorDescriptor = ErrorDescriptor::new(202, "parse token error");
pub const PARSE_COOKIE: ErrorDescriptor = ErrorDescriptor::new(203, "parse cookie error");
pub const SET_TOKEN: ErrorDescriptor = ErrorDescriptor::new(204, "set token error");
pub const SET_COOKIE: ErrorDescriptor = ErrorDescriptor::new(205, "set cookie error");
pub const GENERATE_TOKEN: ErrorDescriptor = ErrorDescriptor::new(206, "generate token error");

pub const NOT_LOGGED_IN: ErrorDescriptor = ErrorDescriptor::new(301, "not logged in");

pub const DB_CONNECTION: ErrorDescriptor = ErrorDescriptor::new(401, "database connection error");
pub const NO_RECORD: ErrorDescriptor = ErrorDescriptor::new(402, "database no record error");
pub const DUPLICATE_RECORD: ErrorDescriptor =
    ErrorDescriptor::new(403, "database duplicate record error");

pub const SERVICE_CONNECTION: ErrorDescriptor =
    ErrorDescriptor::new(501, "service communication error");

/// Every catalog entry, in code order
pub static ALL: [ErrorDescriptor; 17] = [
    OK,
    INPUT_HEADER,
    INPUT_BODY,
    INPUT_TOKEN,
    INPUT_COOKIE,
    TYPE_CONVERSION,
    PARSE_TOKEN,
    PARSE_COOKIE,
    SET_TOKEN,
    SET_COOKIE,
    GENERATE_TOKEN,
    NOT_LOGGED_IN,
    DB_CONNECTION,
    NO_RECORD,
    DUPLICATE_RECORD,
    SERVICE_CONNECTION,
    UNKNOWN,
];

/// Find the catalog entry with the given code
pub fn lookup(code: i16) -> Option<&'static ErrorDescriptor> {
    ALL.iter().find(|d| d.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_sorted() {
        let codes: Vec<i16> = ALL.iter().map(|d| d.code()).collect();
        let unique: HashSet<i16> = codes.iter().copied().collect();
        assert_eq!(unique.len(), codes.len());

        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_single_success_and_fallback() {
        let successes = ALL
            .iter()
            .filter(|d| d.category() == ErrorCategory::Success)
            .count();
        let fallbacks = ALL
            .iter()
            .filter(|d| d.category() == ErrorCategory::Unclassified)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(fallbacks, 1);
    }

    #[test]
    fn test_only_reserved_entries_use_detail_zero() {
        for descriptor in ALL.iter().filter(|d| d.detail() == 0) {
            assert!(*descriptor == OK || *descriptor == UNKNOWN);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup(102), Some(&INPUT_BODY));
        assert_eq!(lookup(0), Some(&OK));
        assert_eq!(lookup(777), None);
    }
}
