use std::error::Error as StdError;

use super::catalog;
use super::descriptor::ErrorDescriptor;

/// Map an arbitrary error onto a descriptor.
///
/// `None` is success. An error that is, or wraps somewhere in its `source()`
/// chain, an [`ErrorDescriptor`] yields that descriptor unchanged. Anything
/// else becomes [`catalog::UNKNOWN`] carrying the error's own text.
pub fn normalize(err: Option<&(dyn StdError + 'static)>) -> ErrorDescriptor {
    let Some(err) = err else {
        return catalog::OK;
    };

    match classify(err) {
        Some(descriptor) => descriptor.clone(),
        None => catalog::UNKNOWN.with_message(err.to_string()),
    }
}

/// [`normalize`] over the error side of a result
pub fn normalize_result<T, E>(result: &Result<T, E>) -> ErrorDescriptor
where
    E: StdError + 'static,
{
    normalize(result.as_ref().err().map(|e| e as &(dyn StdError + 'static)))
}

/// [`normalize`] for `anyhow` errors, searching through any attached context
pub fn normalize_anyhow(err: Option<&anyhow::Error>) -> ErrorDescriptor {
    let Some(err) = err else {
        return catalog::OK;
    };

    match err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ErrorDescriptor>())
    {
        Some(descriptor) => descriptor.clone(),
        None => catalog::UNKNOWN.with_message(err.to_string()),
    }
}

fn classify<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a ErrorDescriptor> {
    let mut current = Some(err);
    while let Some(cause) = current {
        if let Some(descriptor) = cause.downcast_ref::<ErrorDescriptor>() {
            return Some(descriptor);
        }
        current = cause.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct Boom;

    #[derive(Debug, Error)]
    #[error("login failed")]
    struct LoginFailed(#[source] ErrorDescriptor);

    #[test]
    fn test_none_is_success() {
        assert_eq!(normalize(None), catalog::OK);
        assert_eq!(normalize_anyhow(None), catalog::OK);
    }

    #[test]
    fn test_descriptor_passes_through() {
        let err = catalog::INPUT_BODY;
        let descriptor = normalize(Some(&err));
        assert_eq!(descriptor.code(), 102);
        assert_eq!(descriptor.message(), "input body error");
    }

    #[test]
    fn test_unclassified_keeps_message() {
        let descriptor = normalize(Some(&Boom));
        assert_eq!(descriptor.code(), catalog::UNKNOWN.code());
        assert_eq!(descriptor.message(), "boom");
    }

    #[test]
    fn test_wrapped_descriptor_is_found() {
        let err = LoginFailed(catalog::NOT_LOGGED_IN);
        assert_eq!(normalize(Some(&err)), catalog::NOT_LOGGED_IN);
    }

    #[test]
    fn test_normalize_result() {
        let ok: Result<u8, Boom> = Ok(1);
        assert_eq!(normalize_result(&ok), catalog::OK);

        let failed: Result<u8, ErrorDescriptor> = Err(catalog::DB_CONNECTION);
        assert_eq!(normalize_result(&failed), catalog::DB_CONNECTION);
    }

    #[test]
    fn test_anyhow_context() {
        let err = Err::<(), _>(catalog::DUPLICATE_RECORD)
            .context("inserting user")
            .unwrap_err();
        assert_eq!(normalize_anyhow(Some(&err)), catalog::DUPLICATE_RECORD);

        let plain = anyhow::anyhow!("socket closed");
        let descriptor = normalize_anyhow(Some(&plain));
        assert_eq!(descriptor.code(), 900);
        assert_eq!(descriptor.message(), "socket closed");
    }

    #[test]
    fn test_catalog_untouched_by_fallback() {
        let _ = normalize(Some(&Boom));
        assert_eq!(catalog::UNKNOWN.message(), "unknown error");
    }
}
