//! Desk runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the controller.
//! Nothing in this crate reads environment variables; the binary reads them and hands the
//! raw values to the parsing helpers below.

use crate::constants::DEFAULT_ALERT_TIMEOUT_SECS;
use crate::format::DateFormat;
use crate::{DeskError, DeskResult};
use std::time::Duration;

/// Desk configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct DeskConfig {
    alert_timeout: Duration,
    date_format: DateFormat,
}

impl DeskConfig {
    /// Create a new `DeskConfig`.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::InvalidInput` if `alert_timeout` is zero.
    pub fn new(alert_timeout: Duration, date_format: DateFormat) -> DeskResult<Self> {
        if alert_timeout.is_zero() {
            return Err(DeskError::InvalidInput(
                "alert timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            alert_timeout,
            date_format,
        })
    }

    /// How long a non-persistent notification stays on the page.
    pub fn alert_timeout(&self) -> Duration {
        self.alert_timeout
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            alert_timeout: Duration::from_secs(DEFAULT_ALERT_TIMEOUT_SECS),
            date_format: DateFormat::default(),
        }
    }
}

/// Parse the alert timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of five seconds.
pub fn alert_timeout_from_env_value(value: Option<String>) -> DeskResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(Duration::from_secs(DEFAULT_ALERT_TIMEOUT_SECS)),
        Some(v) => v
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| DeskError::InvalidInput(format!("alert timeout is not a number: {v}"))),
    }
}

/// Parse the date display pattern from an optional string value.
///
/// If `value` is `None` or empty, returns the default pattern.
pub fn date_format_from_env_value(value: Option<String>) -> DeskResult<DateFormat> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(DateFormat::default()),
        Some(pattern) => DateFormat::new(pattern),
    }
}
