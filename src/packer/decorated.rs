use std::error::Error as StdError;
use tracing::{debug, Level};

use super::{pack_checked, Pack};
use crate::errors::{normalize, normalize_result, ErrorDescriptor};

// `tracing` needs the level at compile time, so dispatch over all five.
macro_rules! outcome_event {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::ERROR => tracing::error!($($arg)+),
            Level::WARN => tracing::warn!($($arg)+),
            Level::INFO => tracing::info!($($arg)+),
            Level::DEBUG => tracing::debug!($($arg)+),
            _ => tracing::trace!($($arg)+),
        }
    };
}

/// Normalizes errors, packs, and logs the outcome.
///
/// Non-success outcomes are logged at `level`; success is logged only when
/// `log_success` is set. Logging never changes the packed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packer {
    level: Level,
    log_success: bool,
}

impl Default for Packer {
    fn default() -> Self {
        Self::new()
    }
}

impl Packer {
    pub fn new() -> Self {
        Self {
            level: Level::WARN,
            log_success: false,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn log_success(mut self, enabled: bool) -> Self {
        self.log_success = enabled;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn pack<T: Pack>(&self, template: &T, err: Option<&(dyn StdError + 'static)>) -> T {
        self.pack_with(template, &normalize(err))
    }

    pub fn pack_result<T, V, E>(&self, template: &T, result: &Result<V, E>) -> T
    where
        T: Pack,
        E: StdError + 'static,
    {
        self.pack_with(template, &normalize_result(result))
    }

    pub fn pack_with<T: Pack>(&self, template: &T, descriptor: &ErrorDescriptor) -> T {
        let report = pack_checked(template, descriptor);
        for diagnostic in &report.diagnostics {
            debug!(field = %diagnostic.field, "{}", diagnostic);
        }
        self.record(descriptor);
        report.value
    }

    fn record(&self, descriptor: &ErrorDescriptor) {
        if descriptor.is_ok() && !self.log_success {
            return;
        }
        outcome_event!(
            self.level,
            code = descriptor.code(),
            category = %descriptor.category(),
            "{}",
            descriptor.message()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::catalog;
    use crate::packer::capture::CapturedLogs;
    use crate::Pack;

    #[derive(Debug, Default, PartialEq, Pack)]
    struct Outcome {
        #[pack("err.code")]
        code: i64,
        #[pack("err.msg")]
        msg: String,
    }

    fn logged(packer: Packer, descriptor: &ErrorDescriptor) -> Vec<String> {
        let logs = CapturedLogs::default();
        tracing::subscriber::with_default(logs.subscriber(), || {
            packer.pack_with(&Outcome::default(), descriptor);
        });
        logs.lines()
    }

    #[derive(Debug, Default, PartialEq, Pack)]
    struct Envelope {
        #[pack("err.code")]
        code: i32,
        #[pack("err.msg")]
        msg: String,
        #[pack("oops")]
        retry: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn test_builder() {
        let packer = Packer::new().with_level(Level::ERROR).log_success(true);
        assert_eq!(packer.level(), Level::ERROR);
        assert_eq!(Packer::default().level(), Level::WARN);
    }

    #[test]
    fn test_pack_success() {
        let packed = Packer::new().pack(&Envelope::default(), None);
        assert_eq!(packed.code, 0);
        assert_eq!(packed.msg, "success");
        assert!(!packed.retry);
    }

    #[test]
    fn test_pack_unclassified() {
        let packed = Packer::new().pack(&Envelope::default(), Some(&DiskFull));
        assert_eq!(packed.code, 900);
        assert_eq!(packed.msg, "disk full");
    }

    #[test]
    fn test_logging_does_not_change_value() {
        let result: Result<(), ErrorDescriptor> = Err(catalog::SET_COOKIE);
        let template = Envelope::default();
        let quiet = crate::pack(&template, &catalog::SET_COOKIE);

        for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE] {
            let packed = Packer::new().with_level(level).pack_result(&template, &result);
            assert_eq!(packed, quiet);
        }
    }

    #[test]
    fn test_failure_logged_once_at_configured_level() {
        let lines = logged(Packer::new(), &catalog::INPUT_BODY);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].trim_start().starts_with("WARN"));
        assert!(lines[0].contains("input body error"));
        assert!(lines[0].contains("code=102"));

        let lines = logged(Packer::new().with_level(Level::ERROR), &catalog::DB_CONNECTION);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].trim_start().starts_with("ERROR"));
        assert!(lines[0].contains("database connection error"));
    }

    #[test]
    fn test_success_not_logged_by_default() {
        assert!(logged(Packer::new(), &catalog::OK).is_empty());
    }

    #[test]
    fn test_success_logged_when_enabled() {
        let packer = Packer::new().with_level(Level::INFO).log_success(true);
        let lines = logged(packer, &catalog::OK);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].trim_start().starts_with("INFO"));
        assert!(lines[0].contains("success"));
        assert!(lines[0].contains("code=0"));
    }

    #[test]
    fn test_conversion_failures_logged_at_debug() {
        let logs = CapturedLogs::default();
        tracing::subscriber::with_default(logs.subscriber(), || {
            Packer::new().pack_with(&Envelope::default(), &catalog::OK);
        });
        let lines = logs.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].trim_start().starts_with("DEBUG"));
        assert!(lines[0].contains("field `retry` (boolean): cannot apply `oops`"));
    }
}
