//! Notification banners.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Styling of a banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Handle used to remove a banner, either by its timer or by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertId(u64);

impl AlertId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A dismissible banner. Non-persistent banners are removed after the configured delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
    pub persistent: bool,
}

/// Source of increasing alert ids.
#[derive(Debug, Default)]
pub(crate) struct AlertIds(AtomicU64);

impl AlertIds {
    pub(crate) fn next(&self) -> AlertId {
        AlertId(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
