//! Constants used throughout the desk core crate.
//!
//! User-facing strings live here so the table, the controller and the tests agree on the
//! exact wording shown on the page.

/// Placeholder for absent values in table cells.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Text of the single row shown when the server returns no patients.
pub const NO_PATIENTS_FOUND: &str = "No patients found";

/// Number of columns in the patient table (name, two visits, risk, status, actions).
pub const TABLE_COLUMN_COUNT: usize = 6;

/// Label of the per-row risk action.
pub const VIEW_RISK_LABEL: &str = "View Risk";

/// Label of the per-row edit action.
pub const EDIT_LABEL: &str = "Edit";

/// Default chrono pattern for visit dates (matches the `en-US` locale date rendering).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Default delay before a non-persistent notification is removed.
pub const DEFAULT_ALERT_TIMEOUT_SECS: u64 = 5;

pub const LOAD_PATIENTS_FAILED: &str = "Error loading patients. Please try again.";
pub const PATIENT_NOT_FOUND: &str = "Patient not found";
pub const LOAD_PATIENT_FAILED: &str = "Error loading patient data. Please try again.";
pub const PATIENT_SAVED: &str = "Patient saved successfully";
pub const SAVE_PATIENT_REJECTED: &str = "Failed to save patient";
pub const SAVE_PATIENT_FAILED: &str = "Error saving patient. Please try again.";
pub const LOAD_RISK_FAILED: &str = "Error loading risk analysis. Please try again.";
pub const LOAD_REMINDER_FAILED: &str = "Error loading follow-up reminder. Please try again.";
pub const TREATMENT_RECORDED: &str = "Treatment recorded successfully";
pub const RECORD_TREATMENT_REJECTED: &str = "Failed to record treatment";
pub const RECORD_TREATMENT_FAILED: &str = "Error recording treatment. Please try again.";
